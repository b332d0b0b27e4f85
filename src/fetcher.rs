use backon::{ExponentialBuilder, Retryable};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument, warn};
use utoipa::ToSchema;

use crate::fetch_error::FetchError;

/// Current conditions for one city, in imperial units.
///
/// Only the temperature is required from the provider. Humidity, wind
/// speed, wind gust and rainfall default to 0 when the provider omits them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReading {
    pub city: String,
    pub temperature_f: f64,
    #[serde(default)]
    pub feels_like_f: Option<f64>,
    #[serde(default)]
    pub humidity_pct: f64,
    #[serde(default)]
    pub wind_speed_mph: f64,
    #[serde(default)]
    pub wind_gust_mph: f64,
    #[serde(default)]
    pub rain_1h_in: f64,
    #[serde(default)]
    pub conditions: Option<String>,
    #[serde(default = "Utc::now")]
    pub observed_at: DateTime<Utc>,
}

// Provider payload (OpenWeatherMap current-weather shape). Everything is
// optional here; `into_reading` decides the fallbacks.
#[derive(Debug, Deserialize)]
struct ProviderPayload {
    name: Option<String>,
    dt: Option<i64>,
    main: Option<ProviderMain>,
    wind: Option<ProviderWind>,
    rain: Option<ProviderRain>,
    #[serde(default)]
    weather: Vec<ProviderCondition>,
}

#[derive(Debug, Deserialize)]
struct ProviderMain {
    temp: Option<f64>,
    feels_like: Option<f64>,
    humidity: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ProviderWind {
    speed: Option<f64>,
    gust: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ProviderRain {
    #[serde(rename = "1h")]
    one_hour_mm: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ProviderCondition {
    description: Option<String>,
}

const MM_PER_INCH: f64 = 25.4;

impl ProviderPayload {
    fn into_reading(self, requested_city: &str) -> Result<WeatherReading, FetchError> {
        let main = self.main.ok_or(FetchError::MissingTemperature)?;
        let temperature_f = main.temp.ok_or(FetchError::MissingTemperature)?;

        let (wind_speed_mph, wind_gust_mph) = match self.wind {
            Some(wind) => (wind.speed.unwrap_or(0.0), wind.gust.unwrap_or(0.0)),
            None => (0.0, 0.0),
        };

        // The provider reports rain in millimetres even in imperial mode
        let rain_1h_in = self
            .rain
            .and_then(|r| r.one_hour_mm)
            .map(|mm| mm / MM_PER_INCH)
            .unwrap_or(0.0);

        let observed_at = self
            .dt
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
            .unwrap_or_else(Utc::now);

        Ok(WeatherReading {
            city: self.name.unwrap_or_else(|| requested_city.to_string()),
            temperature_f,
            feels_like_f: main.feels_like,
            humidity_pct: main.humidity.unwrap_or(0.0),
            wind_speed_mph,
            wind_gust_mph,
            rain_1h_in,
            conditions: self.weather.into_iter().find_map(|c| c.description),
            observed_at,
        })
    }
}

#[derive(Clone)]
pub struct WeatherFetcher {
    client: reqwest::Client,
    url: String,
    api_key: String,
}

impl WeatherFetcher {
    pub fn new(url: String, api_key: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            url,
            api_key,
        }
    }

    /// Current conditions for `city`, retrying transient failures.
    #[instrument(skip(self), fields(url = %self.url))]
    pub async fn fetch_current(&self, city: &str) -> Result<WeatherReading, FetchError> {
        let backoff = ExponentialBuilder::default()
            .with_min_delay(Duration::from_secs(1))
            .with_max_delay(Duration::from_secs(10))
            .with_max_times(3);

        (|| self.fetch_once(city))
            .retry(backoff)
            .when(FetchError::is_transient)
            .notify(|err, delay| {
                warn!("Weather fetch for {} failed, retrying in {:?}: {}", city, delay, err);
            })
            .await
    }

    async fn fetch_once(&self, city: &str) -> Result<WeatherReading, FetchError> {
        debug!("Requesting current weather for {}", city);
        let response = self
            .client
            .get(&self.url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "imperial"),
            ])
            .send()
            .await?;

        let status = response.status();
        debug!("Received HTTP response with status: {}", status);
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                city: city.to_string(),
            });
        }

        let body = response.text().await?;
        parse_current_weather(&body, city)
    }
}

/// Parse a provider current-weather body into a [`WeatherReading`].
pub fn parse_current_weather(body: &str, requested_city: &str) -> Result<WeatherReading, FetchError> {
    let payload: ProviderPayload = serde_json::from_str(body)?;
    payload.into_reading(requested_city)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_payload() {
        let body = r#"{
            "name": "Fresno",
            "dt": 1720000000,
            "main": {"temp": 101.3, "feels_like": 99.8, "humidity": 18},
            "wind": {"speed": 7.5, "gust": 12.1},
            "rain": {"1h": 2.54},
            "weather": [{"main": "Clear", "description": "clear sky"}]
        }"#;

        let reading = parse_current_weather(body, "fresno").unwrap();
        assert_eq!(reading.city, "Fresno");
        assert_eq!(reading.temperature_f, 101.3);
        assert_eq!(reading.feels_like_f, Some(99.8));
        assert_eq!(reading.humidity_pct, 18.0);
        assert_eq!(reading.wind_speed_mph, 7.5);
        assert_eq!(reading.wind_gust_mph, 12.1);
        assert!((reading.rain_1h_in - 0.1).abs() < 1e-9);
        assert_eq!(reading.conditions.as_deref(), Some("clear sky"));
        assert_eq!(reading.observed_at.timestamp(), 1720000000);
    }

    #[test]
    fn test_parse_missing_optional_fields_defaults_to_zero() {
        let body = r#"{"main": {"temp": 50.0}}"#;
        let reading = parse_current_weather(body, "Boise").unwrap();
        assert_eq!(reading.city, "Boise");
        assert_eq!(reading.humidity_pct, 0.0);
        assert_eq!(reading.wind_speed_mph, 0.0);
        assert_eq!(reading.wind_gust_mph, 0.0);
        assert_eq!(reading.rain_1h_in, 0.0);
        assert_eq!(reading.conditions, None);
    }

    #[test]
    fn test_parse_wind_without_gust() {
        let body = r#"{"main": {"temp": 60.0}, "wind": {"speed": 31.0}}"#;
        let reading = parse_current_weather(body, "Casper").unwrap();
        assert_eq!(reading.wind_speed_mph, 31.0);
        assert_eq!(reading.wind_gust_mph, 0.0);
    }

    #[test]
    fn test_parse_missing_temperature() {
        let result = parse_current_weather(r#"{"main": {"humidity": 40}}"#, "Nowhere");
        assert!(matches!(result, Err(FetchError::MissingTemperature)));
        let result = parse_current_weather(r#"{"name": "Nowhere"}"#, "Nowhere");
        assert!(matches!(result, Err(FetchError::MissingTemperature)));
    }

    #[test]
    fn test_parse_invalid_json() {
        let result = parse_current_weather("<html>", "Nowhere");
        assert!(matches!(result, Err(FetchError::ParseError(_))));
        assert!(!result.unwrap_err().is_transient());
    }

    #[test]
    fn test_status_transience() {
        let server = FetchError::Status { status: 503, city: "x".into() };
        let client = FetchError::Status { status: 401, city: "x".into() };
        assert!(server.is_transient());
        assert!(!client.is_transient());
    }
}
