//! Weather forecast proxy endpoint

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::services::{ForecastError, ForecastPlace};
use crate::AppState;

/// Query parameters: either `q`, or `lat` + `lon`.
#[derive(Debug, Deserialize)]
pub struct ForecastParams {
    pub q: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

/// Weather endpoint errors
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Missing location: provide ?q=<city> or ?lat=<..>&lon=<..>")]
    MissingLocation,

    #[error("Weather service is not configured (WEATHER_API_KEY is not set)")]
    NotConfigured,

    #[error(transparent)]
    Upstream(#[from] ForecastError),
}

impl IntoResponse for WeatherError {
    fn into_response(self) -> Response {
        let status = match self {
            WeatherError::MissingLocation => StatusCode::BAD_REQUEST,
            WeatherError::NotConfigured => StatusCode::INTERNAL_SERVER_ERROR,
            WeatherError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

/// GET /api/weather
///
/// Relays the upstream forecast body verbatim. The credential check runs
/// before any network I/O: when the key is unconfigured no client exists
/// at all.
pub async fn get_forecast(
    State(state): State<AppState>,
    Query(params): Query<ForecastParams>,
) -> Result<Json<Value>, WeatherError> {
    let place = match (params.q, params.lat, params.lon) {
        (Some(q), _, _) if !q.trim().is_empty() => ForecastPlace::City(q),
        (_, Some(lat), Some(lon)) => ForecastPlace::Coords { lat, lon },
        _ => return Err(WeatherError::MissingLocation),
    };

    let client = state.weather.as_ref().ok_or(WeatherError::NotConfigured)?;
    let forecast = client.forecast(&place).await?;
    Ok(Json(forecast))
}
