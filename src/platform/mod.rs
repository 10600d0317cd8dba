pub mod local;
pub mod notify;
pub mod weather;

use crate::models::{LocationSnapshot, SavedState, WeatherSnapshot};

pub use local::LocalPlatform;
pub use notify::{DesktopNotifier, Notifier};
pub use weather::WeatherClient;

#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("Location unavailable: {0}")]
    LocationUnavailable(String),
    #[error("Weather lookup is not configured (set weather.api_key or HYDROFLOW_API_KEY)")]
    MissingApiKey,
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Weather service returned status {0}")]
    Status(u16),
    #[error("Unexpected weather payload: {0}")]
    Payload(String),
    #[error("Desktop notification failed: {0}")]
    Desktop(String),
    #[error("Notification failed: {0}")]
    Notification(#[from] std::io::Error),
    #[error("Storage error: {0}")]
    Storage(String),
}

impl PlatformError {
    pub fn storage(err: anyhow::Error) -> Self {
        PlatformError::Storage(format!("{:#}", err))
    }
}

/// Everything the hydration session needs from the outside world.
pub trait Platform {
    fn get_location(&mut self) -> Result<LocationSnapshot, PlatformError>;

    fn get_weather(&mut self, location: &LocationSnapshot) -> Result<WeatherSnapshot, PlatformError>;

    /// Returns whether notifications may be shown.
    fn request_notify_permission(&mut self) -> bool;

    fn show_notification(&mut self, title: &str, body: &str) -> Result<(), PlatformError>;

    /// `Ok(None)` means nothing has been stored yet.
    fn load_state(&mut self) -> Result<Option<SavedState>, PlatformError>;

    fn save_state(&mut self, state: &SavedState) -> Result<(), PlatformError>;
}
