use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event as CEvent, KeyEvent};

use crate::reminder::ReminderEvent;

#[derive(Debug)]
pub enum Event {
    Key(KeyEvent),
    Tick,
    Reminder(ReminderEvent),
}

impl From<ReminderEvent> for Event {
    fn from(event: ReminderEvent) -> Self {
        Event::Reminder(event)
    }
}

pub struct EventHandler {
    tx: mpsc::Sender<Event>,
    rx: mpsc::Receiver<Event>,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        let (tx, rx) = mpsc::channel();
        let tick_rate = Duration::from_millis(tick_rate_ms);
        let input_tx = tx.clone();

        thread::spawn(move || {
            let mut last_tick = std::time::Instant::now();
            loop {
                let timeout = tick_rate
                    .checked_sub(last_tick.elapsed())
                    .unwrap_or(Duration::ZERO);

                if event::poll(timeout).unwrap_or(false) {
                    match event::read() {
                        Ok(CEvent::Key(key)) => {
                            if input_tx.send(Event::Key(key)).is_err() {
                                break;
                            }
                        }
                        Ok(_) => {}
                        Err(_) => break,
                    }
                }

                if last_tick.elapsed() >= tick_rate {
                    if input_tx.send(Event::Tick).is_err() {
                        break;
                    }
                    last_tick = std::time::Instant::now();
                }
            }
        });

        Self { tx, rx }
    }

    /// A sender into the same queue, for timers that run outside the input loop.
    pub fn sender(&self) -> mpsc::Sender<Event> {
        self.tx.clone()
    }

    pub fn next(&self) -> Result<Event, mpsc::RecvError> {
        self.rx.recv()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reminder::TriggerKind;

    #[test]
    fn test_reminder_event_converts() {
        let event: Event = ReminderEvent {
            kind: TriggerKind::Due,
            generation: 3,
        }
        .into();
        match event {
            Event::Reminder(e) => {
                assert_eq!(e.kind, TriggerKind::Due);
                assert_eq!(e.generation, 3);
            }
            other => panic!("unexpected event {:?}", other),
        }
    }
}
