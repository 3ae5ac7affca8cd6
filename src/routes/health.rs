//! Health check endpoint for container orchestration.
//!
//! Reports whether the two artifacts deserialized from disk at startup.
//! A process running on untrained stand-ins is alive but degraded; the
//! flags surface that without validating the artifacts are actually fitted.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub model_loaded: bool,
    pub scaler_loaded: bool,
}

/// Handler for `GET /health`.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        model_loaded: state.model_loaded,
        scaler_loaded: state.scaler_loaded,
    })
}
