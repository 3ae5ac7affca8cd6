//! HTTP route handlers for the inference API.
//!
//! Two routes: `POST /predict` scores a feature record, `GET /health`
//! reports artifact load status. CORS is wide open so browser front-ends
//! on other origins can call the API, and every request gets a request-ID
//! span for log correlation.

pub mod health;
pub mod predict;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::middleware::request_id_layer;
use crate::state::AppState;

/// Creates the Axum router with both routes, CORS, and request tracing.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/predict", post(predict::predict))
        .route("/health", get(health::health))
        .with_state(state)
        .layer(CorsLayer::permissive())
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}
