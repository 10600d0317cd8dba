use std::time::Duration;

use log::debug;
use serde::Deserialize;

use crate::models::WeatherSnapshot;
use crate::platform::PlatformError;

#[derive(Debug, Deserialize)]
struct CurrentWeatherResponse {
    main: MainReadings,
    #[serde(default)]
    weather: Vec<Condition>,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: f64,
    feels_like: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct Condition {
    main: String,
}

/// OpenWeatherMap current-conditions client.
pub struct WeatherClient {
    client: reqwest::blocking::Client,
    base_url: String,
    api_key: String,
}

impl WeatherClient {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self, PlatformError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    pub fn fetch(&self, latitude: f64, longitude: f64) -> Result<WeatherSnapshot, PlatformError> {
        let url = format!("{}/data/2.5/weather", self.base_url);
        debug!("Fetching weather for {:.4},{:.4}", latitude, longitude);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
                ("appid", self.api_key.clone()),
                ("units", "metric".to_string()),
            ])
            .send()?;

        let status = response.status();
        debug!("Weather service answered {}", status);
        if !status.is_success() {
            return Err(PlatformError::Status(status.as_u16()));
        }

        let body: CurrentWeatherResponse = response
            .json()
            .map_err(|e| PlatformError::Payload(e.to_string()))?;
        let condition = body
            .weather
            .first()
            .ok_or_else(|| PlatformError::Payload("no weather conditions".to_string()))?;

        Ok(WeatherSnapshot::new(
            body.main.temp.round(),
            body.main.humidity,
            &condition.main,
            body.main.feels_like.round(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    const BODY: &str = r#"{
        "weather": [{"id": 800, "main": "Clear", "description": "clear sky"}],
        "main": {"temp": 31.6, "feels_like": 35.2, "humidity": 84, "pressure": 1009},
        "name": "Lagos"
    }"#;

    fn client(server: &mockito::Server) -> WeatherClient {
        WeatherClient::new(&server.url(), "test-key", Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn parses_current_weather() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/data/2.5/weather")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("appid".into(), "test-key".into()),
                Matcher::UrlEncoded("units".into(), "metric".into()),
                Matcher::UrlEncoded("lat".into(), "6.45".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(BODY)
            .create();

        let weather = client(&server).fetch(6.45, 3.39).unwrap();
        assert_eq!(weather.temperature, 32.0);
        assert_eq!(weather.feels_like, 35.0);
        assert_eq!(weather.humidity, 84.0);
        assert_eq!(weather.condition, "clear");

        mock.assert();
    }

    #[test]
    fn error_status_is_reported() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/data/2.5/weather")
            .match_query(Matcher::Any)
            .with_status(401)
            .with_body(r#"{"cod": 401, "message": "Invalid API key"}"#)
            .create();

        match client(&server).fetch(0.0, 0.0) {
            Err(PlatformError::Status(401)) => {}
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[test]
    fn missing_conditions_is_a_payload_error() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/data/2.5/weather")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"weather": [], "main": {"temp": 20, "feels_like": 20, "humidity": 50}}"#)
            .create();

        assert!(matches!(
            client(&server).fetch(1.0, 2.0),
            Err(PlatformError::Payload(_))
        ));
    }

    #[test]
    fn garbage_body_is_a_payload_error() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/data/2.5/weather")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>nope</html>")
            .create();

        assert!(matches!(
            client(&server).fetch(1.0, 2.0),
            Err(PlatformError::Payload(_))
        ));
    }
}
