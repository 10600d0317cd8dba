use std::time::Duration;

use log::{debug, info, warn};
use rusqlite::Connection;

use crate::config::AppConfig;
use crate::db::repository::StateRepo;
use crate::models::{LocationSnapshot, SavedState, WeatherSnapshot};
use crate::platform::notify::ring_bell;
use crate::platform::{DesktopNotifier, Notifier, Platform, PlatformError, WeatherClient};

/// Configured location, OpenWeatherMap, desktop notifications and SQLite.
pub struct LocalPlatform {
    conn: Connection,
    config: AppConfig,
    notifier: Box<dyn Notifier>,
    notifications_allowed: bool,
}

impl LocalPlatform {
    pub fn new(conn: Connection, config: AppConfig) -> Self {
        Self::with_notifier(conn, config, DesktopNotifier)
    }

    pub fn with_notifier(conn: Connection, config: AppConfig, notifier: impl Notifier + 'static) -> Self {
        Self {
            conn,
            config,
            notifier: Box::new(notifier),
            notifications_allowed: false,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

impl Platform for LocalPlatform {
    fn get_location(&mut self) -> Result<LocationSnapshot, PlatformError> {
        let loc = &self.config.location;
        match (loc.latitude, loc.longitude) {
            (Some(latitude), Some(longitude)) => Ok(LocationSnapshot {
                latitude,
                longitude,
                city: loc.city.clone(),
                country: loc.country.clone(),
            }),
            _ => Err(PlatformError::LocationUnavailable(
                "no coordinates configured, run `hydroflow setup`".to_string(),
            )),
        }
    }

    fn get_weather(&mut self, location: &LocationSnapshot) -> Result<WeatherSnapshot, PlatformError> {
        let api_key = self
            .config
            .weather
            .resolved_api_key()
            .ok_or(PlatformError::MissingApiKey)?;
        let client = WeatherClient::new(
            &self.config.weather.base_url,
            &api_key,
            Duration::from_secs(self.config.weather.timeout_secs),
        )?;
        client.fetch(location.latitude, location.longitude)
    }

    fn request_notify_permission(&mut self) -> bool {
        self.notifications_allowed = self.config.reminder.notifications;
        debug!("Notifications allowed: {}", self.notifications_allowed);
        self.notifications_allowed
    }

    fn show_notification(&mut self, title: &str, body: &str) -> Result<(), PlatformError> {
        if !self.notifications_allowed {
            debug!("Notification suppressed: {}", title);
            return Ok(());
        }
        info!("{} {}", title, body);
        if let Err(e) = self.notifier.notify(title, body) {
            warn!("{}, ringing the terminal bell instead", e);
            ring_bell(&mut std::io::stdout())?;
        }
        Ok(())
    }

    fn load_state(&mut self) -> Result<Option<SavedState>, PlatformError> {
        StateRepo::load(&self.conn).map_err(PlatformError::storage)
    }

    fn save_state(&mut self, state: &SavedState) -> Result<(), PlatformError> {
        StateRepo::save(&mut self.conn, state).map_err(PlatformError::storage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use crate::models::DayRecord;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records every delivery; fails each one when `fail` is set.
    #[derive(Clone, Default)]
    struct RecordingNotifier {
        sent: Rc<RefCell<Vec<(String, String)>>>,
        fail: bool,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&mut self, title: &str, body: &str) -> Result<(), PlatformError> {
            self.sent.borrow_mut().push((title.to_string(), body.to_string()));
            if self.fail {
                Err(PlatformError::Desktop("no notification daemon".into()))
            } else {
                Ok(())
            }
        }
    }

    fn platform(config: AppConfig) -> LocalPlatform {
        platform_with(config, RecordingNotifier::default())
    }

    fn platform_with(config: AppConfig, notifier: RecordingNotifier) -> LocalPlatform {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        LocalPlatform::with_notifier(conn, config, notifier)
    }

    #[test]
    fn location_requires_coordinates() {
        let mut p = platform(AppConfig::default());
        assert!(matches!(
            p.get_location(),
            Err(PlatformError::LocationUnavailable(_))
        ));
    }

    #[test]
    fn location_from_config() {
        let mut config = AppConfig::default();
        config.location.city = "Lagos".into();
        config.location.country = "Nigeria".into();
        config.location.latitude = Some(6.45);
        config.location.longitude = Some(3.39);

        let loc = platform(config).get_location().unwrap();
        assert_eq!(loc.city, "Lagos");
        assert_eq!(loc.latitude, 6.45);
    }

    #[test]
    fn weather_uses_configured_endpoint() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/data/2.5/weather")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(r#"{"weather": [{"main": "Clouds"}], "main": {"temp": 12.4, "feels_like": 10.6, "humidity": 71}}"#)
            .create();

        let mut config = AppConfig::default();
        config.weather.api_key = "k".into();
        config.weather.base_url = server.url();
        let mut p = platform(config);

        let weather = p.get_weather(&LocationSnapshot::fallback()).unwrap();
        assert_eq!(weather.condition, "clouds");
        assert_eq!(weather.temperature, 12.0);
        assert_eq!(weather.feels_like, 11.0);
    }

    #[test]
    fn notifications_follow_config() {
        let notifier = RecordingNotifier::default();
        let mut config = AppConfig::default();
        config.reminder.notifications = false;
        let mut p = platform_with(config, notifier.clone());
        assert!(!p.request_notify_permission());
        assert!(p.show_notification("t", "b").is_ok());
        assert!(notifier.sent.borrow().is_empty());
    }

    #[test]
    fn notification_reaches_notifier() {
        let notifier = RecordingNotifier::default();
        let mut p = platform_with(AppConfig::default(), notifier.clone());
        assert!(p.request_notify_permission());
        p.show_notification("Drink", "A glass now").unwrap();
        assert_eq!(
            *notifier.sent.borrow(),
            vec![("Drink".to_string(), "A glass now".to_string())]
        );
    }

    #[test]
    fn failed_notification_falls_back_to_bell() {
        let notifier = RecordingNotifier {
            fail: true,
            ..Default::default()
        };
        let mut p = platform_with(AppConfig::default(), notifier.clone());
        assert!(p.request_notify_permission());
        assert!(p.show_notification("Drink", "A glass now").is_ok());
        assert_eq!(notifier.sent.borrow().len(), 1);
    }

    #[test]
    fn state_round_trip() {
        let mut p = platform(AppConfig::default());
        assert_eq!(p.load_state().unwrap(), None);

        let state = SavedState {
            week: vec![DayRecord::new("2024-06-01", 8, 8)],
            total_points: 100,
            streak: 1,
        };
        p.save_state(&state).unwrap();
        assert_eq!(p.load_state().unwrap(), Some(state));
    }
}
