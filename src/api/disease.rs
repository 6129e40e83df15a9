//! Plant disease assessment endpoint
//!
//! Two strictly sequential upstream calls: identify (is this a plant?),
//! then health assessment. A low identification confidence short-circuits
//! with a successful "not a plant" response rather than an error.

use axum::{
    body::Bytes,
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use base64::{engine::general_purpose, Engine as _};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::debug;

use crate::services::{plant_probability, PlantIdError, PLANT_PROBABILITY_THRESHOLD};
use crate::AppState;

/// Disease endpoint errors
#[derive(Debug, Error)]
pub enum DiseaseError {
    #[error("No image file uploaded (expected multipart field \"image\")")]
    NoImage,

    #[error("Could not read uploaded file: {0}")]
    InvalidUpload(String),

    #[error("Disease detection is not configured (DISEASE_API_KEY is not set)")]
    NotConfigured,

    #[error("Plant identification service returned an error")]
    UpstreamStatus { status: u16, body: String },

    #[error("Plant identification service returned an unreadable response")]
    UpstreamParse { raw: String },

    #[error("Could not determine plant probability")]
    ProbabilityUndetermined { verify: Value },

    #[error("{0}")]
    Internal(String),
}

impl From<PlantIdError> for DiseaseError {
    fn from(err: PlantIdError) -> Self {
        match err {
            PlantIdError::Network(msg) => DiseaseError::Internal(msg),
            PlantIdError::UpstreamStatus { status, body } => {
                DiseaseError::UpstreamStatus { status, body }
            }
            PlantIdError::UpstreamParse { raw } => DiseaseError::UpstreamParse { raw },
        }
    }
}

impl IntoResponse for DiseaseError {
    fn into_response(self) -> Response {
        let message = self.to_string();

        // BadGateway responses echo the upstream diagnostics; acceptable
        // for an internal diagnostic tool.
        let (status, body) = match self {
            DiseaseError::NoImage | DiseaseError::InvalidUpload(_) => {
                (StatusCode::BAD_REQUEST, json!({ "error": message }))
            }
            DiseaseError::NotConfigured | DiseaseError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": message }))
            }
            DiseaseError::UpstreamStatus { status, body } => (
                StatusCode::BAD_GATEWAY,
                json!({ "error": message, "status": status, "body": body }),
            ),
            DiseaseError::UpstreamParse { raw } => (
                StatusCode::BAD_GATEWAY,
                json!({ "error": message, "body": raw }),
            ),
            DiseaseError::ProbabilityUndetermined { verify } => (
                StatusCode::BAD_GATEWAY,
                json!({ "error": message, "verify": verify }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

/// POST /api/disease
///
/// Multipart field `image`. Verifies the image shows a plant, then relays
/// the upstream health assessment verbatim.
pub async fn assess_disease(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Value>, DiseaseError> {
    let image = read_image_field(&mut multipart).await?;
    let client = state.plant_id.as_ref().ok_or(DiseaseError::NotConfigured)?;

    let encoded = general_purpose::STANDARD.encode(&image);

    let verify = client.identify(&encoded).await?;
    let probability = plant_probability(&verify).ok_or_else(|| {
        DiseaseError::ProbabilityUndetermined {
            verify: verify.clone(),
        }
    })?;

    debug!(probability, "plant identification complete");

    if probability < PLANT_PROBABILITY_THRESHOLD {
        // Terminal success-path outcome, not an error.
        return Ok(Json(json!({
            "success": false,
            "message": "not a plant",
            "plant_probability": probability,
            "verify": verify,
        })));
    }

    let assessment = client.assess_health(&encoded).await?;
    Ok(Json(assessment))
}

/// Pull the `image` field's bytes out of the multipart stream.
async fn read_image_field(multipart: &mut Multipart) -> Result<Bytes, DiseaseError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| DiseaseError::InvalidUpload(e.to_string()))?
    {
        if field.name() == Some("image") {
            return field
                .bytes()
                .await
                .map_err(|e| DiseaseError::InvalidUpload(e.to_string()));
        }
    }

    Err(DiseaseError::NoImage)
}
