use serde::{Deserialize, Serialize};

use crate::models::DayRecord;

/// Points and streak rolled up over the tracked window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total_points: u32,
    pub streak: u32,
}

/// Everything that is persisted between runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SavedState {
    pub week: Vec<DayRecord>,
    pub total_points: u32,
    pub streak: u32,
}

impl SavedState {
    pub fn new(week: Vec<DayRecord>, summary: Summary) -> Self {
        Self {
            week,
            total_points: summary.total_points,
            streak: summary.streak,
        }
    }

    pub fn summary(&self) -> Summary {
        Summary {
            total_points: self.total_points,
            streak: self.streak,
        }
    }
}
