//! Handler for the prediction endpoint.
//!
//! Accepts a JSON object of named feature fields, assembles the canonical
//! vector with defaults for optional fields, scores it, and returns the
//! probability and risk level. Raw and scaled vectors are echoed back in
//! `debug_info` when `http.debug_responses` is enabled.

use axum::{body::Bytes, extract::State, Extension, Json};
use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use crate::error::AppError;
use crate::features::vectorize_named;
use crate::middleware::RequestId;
use crate::scorer::RiskLevel;
use crate::state::AppState;

/// Response body for a successful prediction.
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub probability: f64,
    pub risk_level: RiskLevel,
    /// Input echoed back for caller-side debugging.
    pub features_received: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug_info: Option<DebugInfo>,
}

/// Internal numeric state, exposed only when debug responses are enabled.
#[derive(Debug, Serialize)]
pub struct DebugInfo {
    pub features: Vec<Vec<f64>>,
    pub scaled_features: Vec<Vec<f64>>,
}

/// Handler for `POST /predict`.
///
/// The body is parsed by hand rather than with the `Json` extractor: a
/// syntactically malformed body must surface through the same 500
/// `{error, success: false}` contract as every other prediction failure,
/// not the extractor's plain-text 400 rejection.
#[instrument(name = "predict", skip(state, request_id, body))]
pub async fn predict(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    body: Bytes,
) -> Result<Json<PredictResponse>, AppError> {
    let body: Value = serde_json::from_slice(&body)
        .map_err(|e| AppError::BadBody(format!("failed to parse request body as JSON: {e}")))?;
    let record = body
        .as_object()
        .ok_or_else(|| AppError::BadBody("expected a JSON object of feature fields".to_string()))?;

    let features = vectorize_named(record)?;
    tracing::debug!(?features, "Assembled feature vector");

    let prediction = state.scorer.score(&features)?;
    tracing::info!(
        request_id = %request_id.0,
        probability = prediction.probability,
        risk_level = ?prediction.risk_level,
        "Scored prediction"
    );

    let debug_info = state.config.http.debug_responses.then(|| DebugInfo {
        // Single-row matrices, the shape the offline pipeline works in.
        features: vec![prediction.features.clone()],
        scaled_features: vec![prediction.scaled_features.clone()],
    });

    Ok(Json(PredictResponse {
        probability: prediction.probability,
        risk_level: prediction.risk_level,
        features_received: body,
        debug_info,
    }))
}
