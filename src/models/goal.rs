use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    Low,
    #[default]
    Moderate,
    High,
}

impl ActivityLevel {
    pub fn all() -> Vec<ActivityLevel> {
        vec![ActivityLevel::Low, ActivityLevel::Moderate, ActivityLevel::High]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Low => "low",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::High => "high",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ActivityLevel::Low => "Low",
            ActivityLevel::Moderate => "Moderate",
            ActivityLevel::High => "High",
        }
    }
}

impl std::fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for ActivityLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(ActivityLevel::Low),
            "moderate" | "medium" => Ok(ActivityLevel::Moderate),
            "high" => Ok(ActivityLevel::High),
            _ => Err(anyhow::anyhow!("Unknown activity level: {}", s)),
        }
    }
}

/// Signed per-factor deltas applied on top of the base goal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalFactors {
    pub temperature: i32,
    pub humidity: i32,
    pub climate: i32,
    pub activity: i32,
}

impl GoalFactors {
    pub fn total(&self) -> i32 {
        self.temperature + self.humidity + self.climate + self.activity
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HydrationGoal {
    pub base_goal: u32,
    /// Never below 6.
    pub adjusted_goal: u32,
    pub factors: GoalFactors,
    pub recommendation: String,
}
