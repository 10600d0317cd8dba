use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerKind {
    /// Fires every second to advance the countdown.
    Tick,
    /// Fires once per full reminder interval.
    Due,
}

/// Emitted by an armed trigger. `generation` identifies the `start` call
/// that armed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderEvent {
    pub kind: TriggerKind,
    pub generation: u64,
}

/// A running periodic trigger. Cancelling twice is harmless.
pub trait TaskHandle {
    fn cancel(&mut self);
}

pub trait Scheduler {
    type Handle: TaskHandle;

    /// Arm a trigger that emits `event` every `period` until cancelled.
    fn every(&mut self, period: Duration, event: ReminderEvent) -> Self::Handle;
}

/// Runs each trigger on its own thread and delivers events into a channel
/// owned by the event loop.
pub struct ThreadScheduler<E> {
    tx: Sender<E>,
}

impl<E> ThreadScheduler<E>
where
    E: From<ReminderEvent> + Send + 'static,
{
    pub fn new(tx: Sender<E>) -> Self {
        Self { tx }
    }
}

pub struct ThreadTask {
    cancel_tx: Option<Sender<()>>,
    join: Option<JoinHandle<()>>,
}

impl TaskHandle for ThreadTask {
    fn cancel(&mut self) {
        // Dropping the sender disconnects the channel and wakes the thread.
        self.cancel_tx.take();
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}

impl Drop for ThreadTask {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl<E> Scheduler for ThreadScheduler<E>
where
    E: From<ReminderEvent> + Send + 'static,
{
    type Handle = ThreadTask;

    fn every(&mut self, period: Duration, event: ReminderEvent) -> ThreadTask {
        let (cancel_tx, cancel_rx) = mpsc::channel::<()>();
        let tx = self.tx.clone();

        let join = thread::spawn(move || {
            loop {
                match cancel_rx.recv_timeout(period) {
                    Err(RecvTimeoutError::Timeout) => {
                        if tx.send(E::from(event)).is_err() {
                            break;
                        }
                    }
                    // cancelled, or the handle went away
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
            trace!("trigger {:?} (generation {}) stopped", event.kind, event.generation);
        });

        ThreadTask {
            cancel_tx: Some(cancel_tx),
            join: Some(join),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn thread_trigger_fires_until_cancelled() {
        let (tx, rx) = mpsc::channel::<ReminderEvent>();
        let mut scheduler = ThreadScheduler::new(tx);
        let event = ReminderEvent { kind: TriggerKind::Tick, generation: 1 };

        let mut task = scheduler.every(Duration::from_millis(10), event);
        let first = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert_eq!(first, event);

        task.cancel();
        // drain anything sent before cancellation, then expect silence
        while rx.try_recv().is_ok() {}
        assert!(rx.recv_timeout(Duration::from_millis(50)).is_err());
    }

    #[test]
    fn cancel_is_prompt_for_long_periods() {
        let (tx, _rx) = mpsc::channel::<ReminderEvent>();
        let mut scheduler = ThreadScheduler::new(tx);
        let event = ReminderEvent { kind: TriggerKind::Due, generation: 1 };

        let task = scheduler.every(Duration::from_secs(3600), event);
        let started = Instant::now();
        drop(task);
        assert!(started.elapsed() < Duration::from_secs(1));
    }
}
