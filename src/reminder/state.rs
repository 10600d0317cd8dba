use std::time::Duration;

use log::{debug, info};

use crate::reminder::scheduler::{ReminderEvent, Scheduler, TaskHandle, TriggerKind};

pub const DEFAULT_INTERVAL_SECS: u64 = 3600;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderState {
    Inactive,
    Active,
}

impl ReminderState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReminderState::Inactive => "INACTIVE",
            ReminderState::Active => "ACTIVE",
        }
    }
}

/// What the caller should do after feeding an event in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderOutcome {
    /// The countdown moved; redraw if needed.
    Ticked,
    /// A full interval elapsed: show the hydration notification.
    Notify,
}

/// Hourly reminder with a per-second countdown.
///
/// While active it owns exactly one tick trigger and one due trigger. Both
/// are cancelled by `stop` and when the reminder is dropped.
pub struct Reminder<S: Scheduler> {
    scheduler: S,
    interval_secs: u64,
    remaining_secs: u64,
    state: ReminderState,
    generation: u64,
    ticker: Option<S::Handle>,
    due: Option<S::Handle>,
}

impl<S: Scheduler> Reminder<S> {
    pub fn new(scheduler: S, interval_secs: u64) -> Self {
        let interval_secs = interval_secs.max(1);
        Self {
            scheduler,
            interval_secs,
            remaining_secs: interval_secs,
            state: ReminderState::Inactive,
            generation: 0,
            ticker: None,
            due: None,
        }
    }

    pub fn state(&self) -> ReminderState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == ReminderState::Active
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn interval_secs(&self) -> u64 {
        self.interval_secs
    }

    /// Returns `false` when already active.
    pub fn start(&mut self) -> bool {
        if self.is_active() {
            return false;
        }
        self.generation += 1;
        self.state = ReminderState::Active;
        self.remaining_secs = self.interval_secs;

        self.ticker = Some(self.scheduler.every(
            Duration::from_secs(1),
            ReminderEvent { kind: TriggerKind::Tick, generation: self.generation },
        ));
        self.due = Some(self.scheduler.every(
            Duration::from_secs(self.interval_secs),
            ReminderEvent { kind: TriggerKind::Due, generation: self.generation },
        ));
        info!("Reminders started (every {}s)", self.interval_secs);
        true
    }

    /// Returns `false` when already inactive.
    pub fn stop(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        self.disarm();
        self.state = ReminderState::Inactive;
        self.remaining_secs = self.interval_secs;
        info!("Reminders stopped");
        true
    }

    pub fn toggle(&mut self) -> ReminderState {
        if self.is_active() {
            self.stop();
        } else {
            self.start();
        }
        self.state
    }

    /// Apply a trigger event. Events from a previous arming, or arriving
    /// while inactive, are ignored.
    pub fn handle(&mut self, event: ReminderEvent) -> Option<ReminderOutcome> {
        if !self.is_active() || event.generation != self.generation {
            debug!("Ignoring stale reminder event {:?}", event);
            return None;
        }
        match event.kind {
            TriggerKind::Tick => {
                self.remaining_secs = match self.remaining_secs.checked_sub(1) {
                    Some(left) => left,
                    None => self.interval_secs,
                };
                Some(ReminderOutcome::Ticked)
            }
            TriggerKind::Due => {
                self.remaining_secs = self.interval_secs;
                Some(ReminderOutcome::Notify)
            }
        }
    }

    fn disarm(&mut self) {
        if let Some(mut t) = self.ticker.take() {
            t.cancel();
        }
        if let Some(mut d) = self.due.take() {
            d.cancel();
        }
    }
}

impl<S: Scheduler> Drop for Reminder<S> {
    fn drop(&mut self) {
        self.disarm();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug)]
    struct Armed {
        period: Duration,
        event: ReminderEvent,
        cancelled: bool,
    }

    /// Records every trigger instead of running it.
    #[derive(Clone, Default)]
    struct ManualScheduler {
        armed: Rc<RefCell<Vec<Armed>>>,
    }

    impl ManualScheduler {
        fn live(&self, kind: TriggerKind) -> usize {
            self.armed
                .borrow()
                .iter()
                .filter(|a| !a.cancelled && a.event.kind == kind)
                .count()
        }

        fn total_armed(&self) -> usize {
            self.armed.borrow().len()
        }

        fn last_event(&self, kind: TriggerKind) -> ReminderEvent {
            self.armed
                .borrow()
                .iter()
                .rev()
                .find(|a| a.event.kind == kind)
                .map(|a| a.event)
                .unwrap()
        }
    }

    struct ManualTask {
        armed: Rc<RefCell<Vec<Armed>>>,
        idx: usize,
    }

    impl TaskHandle for ManualTask {
        fn cancel(&mut self) {
            self.armed.borrow_mut()[self.idx].cancelled = true;
        }
    }

    impl Scheduler for ManualScheduler {
        type Handle = ManualTask;

        fn every(&mut self, period: Duration, event: ReminderEvent) -> ManualTask {
            let mut armed = self.armed.borrow_mut();
            armed.push(Armed { period, event, cancelled: false });
            ManualTask { armed: self.armed.clone(), idx: armed.len() - 1 }
        }
    }

    fn reminder(interval: u64) -> (Reminder<ManualScheduler>, ManualScheduler) {
        let scheduler = ManualScheduler::default();
        (Reminder::new(scheduler.clone(), interval), scheduler)
    }

    #[test]
    fn starts_inactive_with_full_countdown() {
        let (r, sched) = reminder(3600);
        assert_eq!(r.state(), ReminderState::Inactive);
        assert_eq!(r.remaining_secs(), 3600);
        assert_eq!(sched.total_armed(), 0);
    }

    #[test]
    fn start_arms_one_of_each() {
        let (mut r, sched) = reminder(3600);
        assert!(r.start());
        assert!(r.is_active());
        assert_eq!(sched.live(TriggerKind::Tick), 1);
        assert_eq!(sched.live(TriggerKind::Due), 1);

        let armed = sched.armed.borrow();
        let tick = armed.iter().find(|a| a.event.kind == TriggerKind::Tick).unwrap();
        let due = armed.iter().find(|a| a.event.kind == TriggerKind::Due).unwrap();
        assert_eq!(tick.period, Duration::from_secs(1));
        assert_eq!(due.period, Duration::from_secs(3600));
    }

    #[test]
    fn double_start_does_not_double_arm() {
        let (mut r, sched) = reminder(3600);
        assert!(r.start());
        assert!(!r.start());
        assert_eq!(sched.total_armed(), 2);
        assert_eq!(sched.live(TriggerKind::Tick), 1);
    }

    #[test]
    fn tick_counts_down() {
        let (mut r, sched) = reminder(3600);
        r.start();
        let tick = sched.last_event(TriggerKind::Tick);
        for _ in 0..5 {
            assert_eq!(r.handle(tick), Some(ReminderOutcome::Ticked));
        }
        assert_eq!(r.remaining_secs(), 3595);
    }

    #[test]
    fn tick_wraps_after_zero() {
        let (mut r, sched) = reminder(3);
        r.start();
        let tick = sched.last_event(TriggerKind::Tick);
        r.handle(tick);
        r.handle(tick);
        r.handle(tick);
        assert_eq!(r.remaining_secs(), 0);
        r.handle(tick);
        assert_eq!(r.remaining_secs(), 3);
    }

    #[test]
    fn due_notifies_and_resets_countdown() {
        let (mut r, sched) = reminder(3600);
        r.start();
        let tick = sched.last_event(TriggerKind::Tick);
        let due = sched.last_event(TriggerKind::Due);
        r.handle(tick);
        r.handle(tick);
        assert_eq!(r.handle(due), Some(ReminderOutcome::Notify));
        assert_eq!(r.remaining_secs(), 3600);
    }

    #[test]
    fn stop_cancels_and_resets() {
        let (mut r, sched) = reminder(3600);
        r.start();
        let tick = sched.last_event(TriggerKind::Tick);
        r.handle(tick);
        assert!(r.stop());

        assert_eq!(r.state(), ReminderState::Inactive);
        assert_eq!(r.remaining_secs(), 3600);
        assert_eq!(sched.live(TriggerKind::Tick), 0);
        assert_eq!(sched.live(TriggerKind::Due), 0);

        // queued events from before the stop change nothing
        assert_eq!(r.handle(tick), None);
        assert_eq!(r.remaining_secs(), 3600);
    }

    #[test]
    fn stop_when_inactive_is_noop() {
        let (mut r, sched) = reminder(3600);
        assert!(!r.stop());
        assert_eq!(sched.total_armed(), 0);
    }

    #[test]
    fn restart_ignores_previous_generation() {
        let (mut r, sched) = reminder(3600);
        r.start();
        let old_tick = sched.last_event(TriggerKind::Tick);
        r.stop();
        r.start();
        let new_tick = sched.last_event(TriggerKind::Tick);

        assert_ne!(old_tick.generation, new_tick.generation);
        assert_eq!(r.handle(old_tick), None);
        assert_eq!(r.handle(new_tick), Some(ReminderOutcome::Ticked));
        assert_eq!(sched.live(TriggerKind::Tick), 1);
        assert_eq!(sched.live(TriggerKind::Due), 1);
    }

    #[test]
    fn repeated_cycles_leave_nothing_armed() {
        let (mut r, sched) = reminder(60);
        for _ in 0..5 {
            r.start();
            r.stop();
        }
        assert_eq!(sched.total_armed(), 10);
        assert_eq!(sched.live(TriggerKind::Tick), 0);
        assert_eq!(sched.live(TriggerKind::Due), 0);
    }

    #[test]
    fn drop_cancels_triggers() {
        let (mut r, sched) = reminder(3600);
        r.start();
        drop(r);
        assert_eq!(sched.live(TriggerKind::Tick), 0);
        assert_eq!(sched.live(TriggerKind::Due), 0);
    }

    #[test]
    fn toggle_flips_state() {
        let (mut r, _sched) = reminder(3600);
        assert_eq!(r.toggle(), ReminderState::Active);
        assert_eq!(r.toggle(), ReminderState::Inactive);
    }
}
