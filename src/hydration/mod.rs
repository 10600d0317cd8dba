pub mod goal;
pub mod summary;
pub mod week;

pub use goal::compute_goal;
pub use summary::{progress_percentage, summarize};
pub use week::{apply_water_count, date_key, demo_week, empty_week, trim_window, WINDOW_DAYS};
