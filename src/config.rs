//! Environment configuration
//!
//! All runtime configuration is read once at startup into an explicit
//! [`Config`] struct; handlers never touch the environment directly.
//! An empty credential string is the same as an unset one and disables
//! the corresponding proxy endpoint.

use anyhow::{Context, Result};

/// Default listen port when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 4000;

/// OpenWeatherMap API base URL (overridable via `WEATHER_API_URL`).
pub const DEFAULT_WEATHER_API_URL: &str = "https://api.openweathermap.org";

/// Plant.id v3 API base URL (overridable via `DISEASE_API_URL`).
pub const DEFAULT_DISEASE_API_URL: &str = "https://plant.id/api/v3";

/// Process-wide immutable configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP listen port (`PORT`, default 4000)
    pub port: u16,
    /// OpenWeatherMap credential (`WEATHER_API_KEY`); `None` disables /api/weather
    pub weather_api_key: Option<String>,
    /// Plant.id credential (`DISEASE_API_KEY`); `None` disables /api/disease
    pub disease_api_key: Option<String>,
    /// Weather upstream base URL
    pub weather_api_url: String,
    /// Plant-identification upstream base URL
    pub disease_api_url: String,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// A malformed `PORT` is a startup error rather than a silent fallback.
    pub fn from_env() -> Result<Self> {
        let port = match std::env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("invalid PORT value: {}", raw))?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            port,
            weather_api_key: env_nonempty("WEATHER_API_KEY"),
            disease_api_key: env_nonempty("DISEASE_API_KEY"),
            weather_api_url: env_nonempty("WEATHER_API_URL")
                .unwrap_or_else(|| DEFAULT_WEATHER_API_URL.to_string()),
            disease_api_url: env_nonempty("DISEASE_API_URL")
                .unwrap_or_else(|| DEFAULT_DISEASE_API_URL.to_string()),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            weather_api_key: None,
            disease_api_key: None,
            weather_api_url: DEFAULT_WEATHER_API_URL.to_string(),
            disease_api_url: DEFAULT_DISEASE_API_URL.to_string(),
        }
    }
}

/// Read an environment variable, treating empty/whitespace values as unset.
fn env_nonempty(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_no_credentials() {
        let config = Config::default();
        assert_eq!(config.port, DEFAULT_PORT);
        assert!(config.weather_api_key.is_none());
        assert!(config.disease_api_key.is_none());
        assert_eq!(config.weather_api_url, DEFAULT_WEATHER_API_URL);
        assert_eq!(config.disease_api_url, DEFAULT_DISEASE_API_URL);
    }
}
