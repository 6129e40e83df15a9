//! OpenWeatherMap forecast client
//!
//! Thin relay: the parsed upstream body is returned verbatim, including
//! upstream error bodies. No timeout is configured beyond the transport
//! defaults and there are no retries.

use serde_json::Value;
use thiserror::Error;

const FORECAST_PATH: &str = "/data/2.5/forecast";

/// Weather client errors
#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("weather request failed: {0}")]
    Network(String),

    #[error("weather response was not valid JSON: {0}")]
    Parse(String),
}

/// Where to fetch the forecast for.
#[derive(Debug, Clone)]
pub enum ForecastPlace {
    /// Free-text city query
    City(String),
    /// Coordinate pair
    Coords { lat: f64, lon: f64 },
}

/// OpenWeatherMap API client
#[derive(Clone)]
pub struct WeatherClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl WeatherClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }

    /// Fetch the 5-day / 3-hour forecast (metric units) and return the
    /// parsed body unmodified.
    ///
    /// The upstream's own status code is deliberately not interpreted:
    /// whatever it returned is relayed to the caller, as long as it
    /// parses as JSON.
    pub async fn forecast(&self, place: &ForecastPlace) -> Result<Value, ForecastError> {
        let mut params: Vec<(&str, String)> = match place {
            ForecastPlace::City(q) => vec![("q", q.clone())],
            ForecastPlace::Coords { lat, lon } => {
                vec![("lat", lat.to_string()), ("lon", lon.to_string())]
            }
        };
        params.push(("units", "metric".to_string()));
        params.push(("appid", self.api_key.clone()));

        let url = format!("{}{}", self.base_url, FORECAST_PATH);
        tracing::debug!(url = %url, "querying forecast upstream");

        let response = self
            .http
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| ForecastError::Network(e.to_string()))?;

        response
            .json::<Value>()
            .await
            .map_err(|e| ForecastError::Parse(e.to_string()))
    }
}
