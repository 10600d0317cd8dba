pub mod header;
pub mod reminder;
pub mod stats;
pub mod statusbar;
pub mod tracker;
pub mod weather;
pub mod weekly;
