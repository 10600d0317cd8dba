use serde::{Deserialize, Serialize};

/// Current conditions at the user's location. Temperatures are in °C,
/// humidity in percent, and `condition` is always lower-cased.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub temperature: f64,
    pub humidity: f64,
    pub condition: String,
    pub feels_like: f64,
}

impl WeatherSnapshot {
    pub fn new(temperature: f64, humidity: f64, condition: &str, feels_like: f64) -> Self {
        Self {
            temperature,
            humidity,
            condition: condition.to_lowercase(),
            feels_like,
        }
    }

    /// Used whenever the weather lookup fails or is not configured.
    pub fn fallback() -> Self {
        Self::new(25.0, 60.0, "moderate", 26.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationSnapshot {
    pub latitude: f64,
    pub longitude: f64,
    pub city: String,
    pub country: String,
}

impl LocationSnapshot {
    /// Stand-in location when none can be determined.
    pub fn fallback() -> Self {
        Self {
            latitude: 0.0,
            longitude: 0.0,
            city: "Your Location".to_string(),
            country: "Unknown".to_string(),
        }
    }

    pub fn display_name(&self) -> String {
        if self.country.is_empty() || self.country == "Unknown" {
            self.city.clone()
        } else {
            format!("{}, {}", self.city, self.country)
        }
    }
}
