//! Application error type and its HTTP rendering.
//!
//! Every prediction failure, whatever the cause, is surfaced to HTTP
//! callers as a 500 with a `{error, success: false}` JSON body. The taxonomy
//! below exists for logging; callers see one shape.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::artifacts::ArtifactError;
use crate::features::VectorizeError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Vectorize(#[from] VectorizeError),

    #[error("{0}")]
    Inference(#[from] ArtifactError),

    #[error("invalid request body: {0}")]
    BadBody(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Prediction failed");
        let body = json!({
            "error": self.to_string(),
            "success": false,
        });
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
