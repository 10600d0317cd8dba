pub mod day;
pub mod goal;
pub mod stats;
pub mod weather;

pub use day::DayRecord;
pub use goal::{ActivityLevel, GoalFactors, HydrationGoal};
pub use stats::{SavedState, Summary};
pub use weather::{LocationSnapshot, WeatherSnapshot};
