//! Pre-fit model artifacts.
//!
//! The classifier and scaler are trained offline and exported as JSON files
//! holding the fitted parameters: logistic-regression coefficients plus
//! intercept, and per-feature standardization mean/scale. Both are loaded
//! once at startup and shared read-only for the process lifetime.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::ArtifactConfig;

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("failed to read artifact {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse artifact {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },

    #[error("model has not been fitted")]
    NotFitted,

    #[error("feature dimension mismatch: artifact expects {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// Fitted binary logistic-regression classifier.
///
/// Probability of the positive class is `sigmoid(w . x + b)`. The untrained
/// stand-in has no coefficients and fails on every prediction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticModel {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LogisticModel {
    /// Untrained stand-in used when the artifact file cannot be loaded.
    /// The process can start with it, but predictions always fail.
    pub fn untrained() -> Self {
        Self {
            coefficients: Vec::new(),
            intercept: 0.0,
        }
    }

    pub fn is_fitted(&self) -> bool {
        !self.coefficients.is_empty()
    }

    /// Class probabilities `[p0, p1]`; index 1 is the positive class.
    pub fn predict_proba(&self, features: &[f64]) -> Result<[f64; 2], ArtifactError> {
        if !self.is_fitted() {
            return Err(ArtifactError::NotFitted);
        }
        if features.len() != self.coefficients.len() {
            return Err(ArtifactError::DimensionMismatch {
                expected: self.coefficients.len(),
                actual: features.len(),
            });
        }
        let score: f64 = self
            .coefficients
            .iter()
            .zip(features)
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.intercept;
        let p1 = sigmoid(score);
        Ok([1.0 - p1, p1])
    }

    /// Hard class label from thresholding the positive-class probability at 0.5.
    pub fn predict(&self, features: &[f64]) -> Result<u8, ArtifactError> {
        let proba = self.predict_proba(features)?;
        Ok(if proba[1] > 0.5 { 1 } else { 0 })
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Fitted standardization transform: `(x - mean) / scale` per feature.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    /// Unfitted stand-in; transforms nothing successfully.
    pub fn unfitted() -> Self {
        Self {
            mean: Vec::new(),
            scale: Vec::new(),
        }
    }

    pub fn is_fitted(&self) -> bool {
        !self.mean.is_empty() && self.mean.len() == self.scale.len()
    }

    pub fn transform(&self, features: &[f64]) -> Result<Vec<f64>, ArtifactError> {
        if !self.is_fitted() {
            return Err(ArtifactError::NotFitted);
        }
        if features.len() != self.mean.len() {
            return Err(ArtifactError::DimensionMismatch {
                expected: self.mean.len(),
                actual: features.len(),
            });
        }
        Ok(features
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(x, (m, s))| (x - m) / s)
            .collect())
    }
}

/// The two artifacts plus a record of whether each deserialized from disk.
///
/// `model_loaded`/`scaler_loaded` feed the health endpoint; they report load
/// success, not fitted-ness.
#[derive(Debug, Clone)]
pub struct Artifacts {
    pub model: LogisticModel,
    pub scaler: StandardScaler,
    pub model_loaded: bool,
    pub scaler_loaded: bool,
}

impl Artifacts {
    /// Load both artifacts, failing on the first error. Used by the CLI,
    /// which treats a load failure as fatal.
    pub fn load(config: &ArtifactConfig) -> Result<Self, ArtifactError> {
        let model: LogisticModel = load_json(&config.model_path)?;
        let scaler: StandardScaler = load_json(&config.scaler_path)?;
        Ok(Self {
            model,
            scaler,
            model_loaded: true,
            scaler_loaded: true,
        })
    }

    /// Load both artifacts, substituting untrained stand-ins for anything
    /// that fails. Used by the HTTP server so the process still starts;
    /// predictions against a stand-in fail per request instead.
    pub fn load_or_untrained(config: &ArtifactConfig) -> Self {
        let (model, model_loaded) = match load_json::<LogisticModel>(&config.model_path) {
            Ok(model) => (model, true),
            Err(e) => {
                tracing::error!(path = %config.model_path, error = %e, "Failed to load model artifact, using untrained stand-in");
                (LogisticModel::untrained(), false)
            }
        };
        let (scaler, scaler_loaded) = match load_json::<StandardScaler>(&config.scaler_path) {
            Ok(scaler) => (scaler, true),
            Err(e) => {
                tracing::error!(path = %config.scaler_path, error = %e, "Failed to load scaler artifact, using unfitted stand-in");
                (StandardScaler::unfitted(), false)
            }
        };
        Self {
            model,
            scaler,
            model_loaded,
            scaler_loaded,
        }
    }
}

fn load_json<T: serde::de::DeserializeOwned>(path: &str) -> Result<T, ArtifactError> {
    let contents = std::fs::read_to_string(Path::new(path)).map_err(|source| ArtifactError::Io {
        path: path.to_string(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| ArtifactError::Parse {
        path: path.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn untrained_model_refuses_to_predict() {
        let model = LogisticModel::untrained();
        assert!(!model.is_fitted());
        assert!(matches!(
            model.predict_proba(&[0.0; 12]),
            Err(ArtifactError::NotFitted)
        ));
    }

    #[test]
    fn probabilities_are_complementary() {
        let model = LogisticModel {
            coefficients: vec![0.5, -0.25],
            intercept: 0.1,
        };
        let [p0, p1] = model.predict_proba(&[1.0, 2.0]).unwrap();
        assert!((p0 + p1 - 1.0).abs() < 1e-12);
        assert!(p1 > 0.0 && p1 < 1.0);
    }

    #[test]
    fn zero_score_gives_even_odds() {
        let model = LogisticModel {
            coefficients: vec![0.0, 0.0],
            intercept: 0.0,
        };
        let [_, p1] = model.predict_proba(&[3.0, -7.0]).unwrap();
        assert_eq!(p1, 0.5);
        assert_eq!(model.predict(&[3.0, -7.0]).unwrap(), 0);
    }

    #[test]
    fn dimension_mismatch_is_detected() {
        let model = LogisticModel {
            coefficients: vec![1.0, 1.0, 1.0],
            intercept: 0.0,
        };
        assert!(matches!(
            model.predict_proba(&[1.0, 2.0]),
            Err(ArtifactError::DimensionMismatch {
                expected: 3,
                actual: 2
            })
        ));
    }

    #[test]
    fn scaler_standardizes_each_feature() {
        let scaler = StandardScaler {
            mean: vec![10.0, 0.0],
            scale: vec![2.0, 4.0],
        };
        let scaled = scaler.transform(&[14.0, -8.0]).unwrap();
        assert_eq!(scaled, vec![2.0, -2.0]);
    }

    #[test]
    fn load_round_trips_through_json() {
        let dir = tempfile::tempdir().unwrap();
        let model_path = dir.path().join("model.json");
        let scaler_path = dir.path().join("scaler.json");

        let model = LogisticModel {
            coefficients: vec![0.1; 12],
            intercept: -1.5,
        };
        let scaler = StandardScaler {
            mean: vec![0.0; 12],
            scale: vec![1.0; 12],
        };
        std::fs::File::create(&model_path)
            .unwrap()
            .write_all(serde_json::to_string(&model).unwrap().as_bytes())
            .unwrap();
        std::fs::File::create(&scaler_path)
            .unwrap()
            .write_all(serde_json::to_string(&scaler).unwrap().as_bytes())
            .unwrap();

        let config = ArtifactConfig {
            model_path: model_path.to_string_lossy().into_owned(),
            scaler_path: scaler_path.to_string_lossy().into_owned(),
        };
        let artifacts = Artifacts::load(&config).unwrap();
        assert!(artifacts.model_loaded && artifacts.scaler_loaded);
        assert_eq!(artifacts.model.coefficients.len(), 12);
    }

    #[test]
    fn missing_file_falls_back_to_stand_ins() {
        let config = ArtifactConfig {
            model_path: "/nonexistent/model.json".to_string(),
            scaler_path: "/nonexistent/scaler.json".to_string(),
        };
        let artifacts = Artifacts::load_or_untrained(&config);
        assert!(!artifacts.model_loaded);
        assert!(!artifacts.scaler_loaded);
        assert!(!artifacts.model.is_fitted());
        assert!(Artifacts::load(&config).is_err());
    }
}
