//! agrosense library - agricultural diagnostics backend
//!
//! Three independent request handlers with no shared mutable state: a
//! rule-based soil nutrient analyzer, a pass-through weather forecast
//! proxy, and a two-step plant disease identification proxy.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

pub mod api;
pub mod config;
pub mod services;
pub mod soil;

use config::Config;
use services::{PlantIdClient, WeatherClient};

/// Request size ceiling for disease image uploads (10 MB).
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application state shared across HTTP handlers
///
/// A proxy client exists only when its credential is configured, so the
/// credential check is structural and always precedes any network call.
#[derive(Clone)]
pub struct AppState {
    pub weather: Option<WeatherClient>,
    pub plant_id: Option<PlantIdClient>,
}

impl AppState {
    /// Build clients from configuration.
    pub fn new(config: &Config) -> Self {
        let weather = config
            .weather_api_key
            .as_ref()
            .map(|key| WeatherClient::new(config.weather_api_url.clone(), key.clone()));

        let plant_id = config
            .disease_api_key
            .as_ref()
            .map(|key| PlantIdClient::new(config.disease_api_url.clone(), key.clone()));

        Self { weather, plant_id }
    }
}

/// Build application router
///
/// Unmatched paths fall back to the embedded front-end entry document.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(api::health_check))
        .route("/api/soil", post(api::analyze_soil))
        .route("/api/weather", get(api::get_forecast))
        .route(
            "/api/disease",
            post(api::assess_disease).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .fallback(api::serve_index)
        .with_state(state)
}
