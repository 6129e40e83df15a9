//! Soil analysis endpoint

use axum::Json;

use crate::soil::{self, SoilReport, SoilSample};

/// POST /api/soil
///
/// Pure rule-table evaluation; no upstream calls and no failure path
/// beyond axum's own JSON rejection for a malformed body.
pub async fn analyze_soil(Json(sample): Json<SoilSample>) -> Json<SoilReport> {
    Json(soil::analyze(&sample))
}
