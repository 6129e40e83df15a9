//! Plant.id v3 client
//!
//! Two endpoints: `identification` (is this a plant at all?) and
//! `health_assessment` (what is wrong with it?). Bodies are read as raw
//! text before parsing so that a failure can echo exactly what the
//! upstream sent.

use serde_json::{json, Value};
use thiserror::Error;

/// Minimum identification confidence before a health assessment is attempted.
pub const PLANT_PROBABILITY_THRESHOLD: f64 = 0.60;

/// Plant.id client errors
#[derive(Debug, Error)]
pub enum PlantIdError {
    #[error("plant identification request failed: {0}")]
    Network(String),

    #[error("plant identification upstream returned status {status}")]
    UpstreamStatus { status: u16, body: String },

    #[error("plant identification upstream returned a non-JSON body")]
    UpstreamParse { raw: String },
}

/// Plant.id API client
#[derive(Clone)]
pub struct PlantIdClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl PlantIdClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }

    /// Identify the image: full classification with similar-images metadata.
    pub async fn identify(&self, image_b64: &str) -> Result<Value, PlantIdError> {
        self.post(
            "identification",
            json!({
                "images": [image_b64],
                "classification_level": "all",
                "similar_images": true,
            }),
        )
        .await
    }

    /// Health-only assessment at species-level classification.
    pub async fn assess_health(&self, image_b64: &str) -> Result<Value, PlantIdError> {
        self.post(
            "health_assessment",
            json!({
                "images": [image_b64],
                "classification_level": "species",
                "similar_images": true,
                "health": "only",
            }),
        )
        .await
    }

    async fn post(&self, endpoint: &str, body: Value) -> Result<Value, PlantIdError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        tracing::debug!(url = %url, "calling plant-id upstream");

        let response = self
            .http
            .post(&url)
            .header("Api-Key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| PlantIdError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| PlantIdError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(PlantIdError::UpstreamStatus {
                status: status.as_u16(),
                body: text,
            });
        }

        serde_json::from_str(&text).map_err(|_| PlantIdError::UpstreamParse { raw: text })
    }
}

/// Locate `is_plant_probability` in an identification response of
/// variable shape.
///
/// The upstream has been observed placing the probability in several
/// different locations depending on API version and plan. The first
/// numeric match wins, so the order of the extractors is load-bearing:
/// a response satisfying more than one shape resolves to the earliest.
pub fn plant_probability(body: &Value) -> Option<f64> {
    [
        body.pointer("/result/is_plant_probability"),
        body.pointer("/result/is_plant/probability"),
        body.get("is_plant_probability"),
        body.pointer("/results/0/is_plant_probability"),
        body.pointer("/result/0/is_plant_probability"),
    ]
    .into_iter()
    .flatten()
    .find_map(Value::as_f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probability_under_result() {
        let body = json!({ "result": { "is_plant_probability": 0.91 } });
        assert_eq!(plant_probability(&body), Some(0.91));
    }

    #[test]
    fn probability_under_nested_is_plant() {
        let body = json!({ "result": { "is_plant": { "probability": 0.82 } } });
        assert_eq!(plant_probability(&body), Some(0.82));
    }

    #[test]
    fn probability_at_top_level() {
        let body = json!({ "is_plant_probability": 0.73 });
        assert_eq!(plant_probability(&body), Some(0.73));
    }

    #[test]
    fn probability_in_results_array() {
        let body = json!({ "results": [{ "is_plant_probability": 0.64 }] });
        assert_eq!(plant_probability(&body), Some(0.64));
    }

    #[test]
    fn probability_in_result_array() {
        let body = json!({ "result": [{ "is_plant_probability": 0.55 }] });
        assert_eq!(plant_probability(&body), Some(0.55));
    }

    #[test]
    fn earliest_shape_wins_when_several_are_present() {
        let body = json!({
            "is_plant_probability": 0.10,
            "result": {
                "is_plant_probability": 0.90,
                "is_plant": { "probability": 0.50 }
            },
            "results": [{ "is_plant_probability": 0.20 }]
        });
        assert_eq!(plant_probability(&body), Some(0.90));
    }

    #[test]
    fn nested_shape_beats_top_level() {
        let body = json!({
            "is_plant_probability": 0.10,
            "result": { "is_plant": { "probability": 0.50 } }
        });
        assert_eq!(plant_probability(&body), Some(0.50));
    }

    #[test]
    fn non_numeric_candidates_are_skipped() {
        let body = json!({
            "result": { "is_plant_probability": null },
            "is_plant_probability": 0.44
        });
        assert_eq!(plant_probability(&body), Some(0.44));
    }

    #[test]
    fn none_when_no_shape_matches() {
        let body = json!({ "result": { "classification": {} } });
        assert_eq!(plant_probability(&body), None);
    }
}
