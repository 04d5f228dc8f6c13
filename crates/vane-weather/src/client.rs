//! Open-Meteo "current weather" client.
//!
//! One GET per call, no retry: retry policy belongs to whatever
//! schedules the refresh cycle.

use std::time::Duration;

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;
use tracing::instrument;

use vane_core::Coordinate;

const OPEN_METEO_BASE: &str = "https://api.open-meteo.com";
const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP status {0}")]
    Http(StatusCode),

    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Raw provider result: the WMO code and the temperature, before
/// condition normalization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrentConditions {
    pub weather_code: i32,
    /// `NaN` when the provider omitted the temperature
    pub temperature_c: f64,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current_weather: Option<CurrentWeatherBody>,
}

#[derive(Debug, Deserialize)]
struct CurrentWeatherBody {
    weathercode: Option<i32>,
    temperature: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: reqwest::Client,
    base_url: String,
}

impl WeatherClient {
    pub fn new() -> Result<Self, FetchError> {
        Self::with_base_url(OPEN_METEO_BASE)
    }

    /// Client against an alternate endpoint (mock servers in tests).
    pub fn with_base_url(base_url: &str) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch current conditions for a coordinate.
    #[instrument(skip(self), level = "info")]
    pub async fn current(&self, coord: Coordinate) -> Result<CurrentConditions, FetchError> {
        let url = format!(
            "{}/v1/forecast?latitude={}&longitude={}&current_weather=true",
            self.base_url, coord.latitude, coord.longitude
        );

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Weather request failed with status {}", status);
            return Err(FetchError::Http(status));
        }

        let body = response.text().await?;
        let parsed: ForecastResponse = serde_json::from_str(&body)
            .map_err(|e| FetchError::Malformed(format!("invalid JSON: {}", e)))?;

        let current = parsed
            .current_weather
            .ok_or_else(|| FetchError::Malformed("missing current_weather object".to_string()))?;

        let weather_code = current
            .weathercode
            .ok_or_else(|| FetchError::Malformed("missing weathercode field".to_string()))?;

        Ok(CurrentConditions {
            weather_code,
            temperature_c: current.temperature.unwrap_or(f64::NAN),
        })
    }
}
