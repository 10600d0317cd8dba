use serde::{Deserialize, Serialize};

/// One tracked calendar day. `date` is a `YYYY-MM-DD` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRecord {
    pub date: String,
    pub water_count: u32,
    pub goal: u32,
    pub goal_met: bool,
    pub points: u32,
}

impl DayRecord {
    /// Builds a record with `goal_met` and `points` derived from the count.
    pub fn new(date: &str, water_count: u32, goal: u32) -> Self {
        let goal_met = water_count >= goal;
        Self {
            date: date.to_string(),
            water_count,
            goal,
            goal_met,
            points: points_for(water_count, goal),
        }
    }
}

/// 100 when the goal is met, otherwise the floored percentage of the goal.
pub fn points_for(water_count: u32, goal: u32) -> u32 {
    if water_count >= goal {
        100
    } else {
        // goal > water_count >= 0 here, so goal is non-zero
        (u64::from(water_count) * 100 / u64::from(goal)) as u32
    }
}
