//! Shared application state for request handlers.

use std::sync::Arc;

use crate::artifacts::Artifacts;
use crate::config::AppConfig;
use crate::scorer::Scorer;

/// Shared application state, cloneable across handlers via Arc-wrapped fields.
///
/// Holds the configuration, the scorer built from the loaded artifacts, and
/// the artifact load flags reported by the health endpoint. Everything is
/// read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub scorer: Arc<Scorer>,
    pub model_loaded: bool,
    pub scaler_loaded: bool,
}

impl AppState {
    /// Creates application state from the configuration and loaded artifacts.
    pub fn new(config: AppConfig, artifacts: &Artifacts) -> Self {
        Self {
            config: Arc::new(config),
            scorer: Arc::new(Scorer::new(artifacts)),
            model_loaded: artifacts.model_loaded,
            scaler_loaded: artifacts.scaler_loaded,
        }
    }
}
