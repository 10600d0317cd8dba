pub mod scheduler;
pub mod state;

pub use scheduler::{ReminderEvent, Scheduler, TaskHandle, ThreadScheduler, TriggerKind};
pub use state::{Reminder, ReminderOutcome, ReminderState, DEFAULT_INTERVAL_SECS};
