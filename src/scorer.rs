//! Scoring pipeline shared by both transport adapters.
//!
//! Purely functional given the loaded artifacts: scale the input vector,
//! take the classifier's positive-class probability, threshold at 0.5.

use serde::Serialize;

use crate::artifacts::{ArtifactError, Artifacts, LogisticModel, StandardScaler};
use crate::features::FEATURE_COUNT;

/// Probability threshold separating High from Low risk.
pub const RISK_THRESHOLD: f64 = 0.5;

/// Binarized risk decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskLevel {
    High,
    Low,
}

impl RiskLevel {
    /// High iff probability exceeds the threshold; exactly 0.5 is Low.
    pub fn from_probability(probability: f64) -> Self {
        if probability > RISK_THRESHOLD {
            RiskLevel::High
        } else {
            RiskLevel::Low
        }
    }
}

/// Result of scoring one feature vector, including the raw and scaled
/// vectors for debug reporting.
#[derive(Debug, Clone)]
pub struct Prediction {
    pub probability: f64,
    pub risk_level: RiskLevel,
    pub features: Vec<f64>,
    pub scaled_features: Vec<f64>,
}

/// Scores canonical feature vectors against the injected artifacts.
#[derive(Debug, Clone)]
pub struct Scorer {
    model: LogisticModel,
    scaler: StandardScaler,
}

impl Scorer {
    pub fn new(artifacts: &Artifacts) -> Self {
        Self {
            model: artifacts.model.clone(),
            scaler: artifacts.scaler.clone(),
        }
    }

    /// Scale, predict, threshold. Fails if either artifact is an untrained
    /// stand-in or was fit against a different dimensionality.
    pub fn score(&self, features: &[f64; FEATURE_COUNT]) -> Result<Prediction, ArtifactError> {
        let scaled = self.scaler.transform(features)?;
        let proba = self.model.predict_proba(&scaled)?;
        let probability = proba[1];
        Ok(Prediction {
            probability,
            risk_level: RiskLevel::from_probability(probability),
            features: features.to_vec(),
            scaled_features: scaled,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fitted_artifacts() -> Artifacts {
        // Positive weight on the first feature only, identity scaling.
        let mut coefficients = vec![0.0; FEATURE_COUNT];
        coefficients[0] = 1.0;
        Artifacts {
            model: LogisticModel {
                coefficients,
                intercept: 0.0,
            },
            scaler: StandardScaler {
                mean: vec![0.0; FEATURE_COUNT],
                scale: vec![1.0; FEATURE_COUNT],
            },
            model_loaded: true,
            scaler_loaded: true,
        }
    }

    #[test]
    fn boundary_probability_maps_to_low() {
        assert_eq!(RiskLevel::from_probability(0.5), RiskLevel::Low);
        assert_eq!(RiskLevel::from_probability(0.5 + f64::EPSILON), RiskLevel::High);
        assert_eq!(RiskLevel::from_probability(0.0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_probability(1.0), RiskLevel::High);
    }

    #[test]
    fn positive_score_is_high_risk() {
        let scorer = Scorer::new(&fitted_artifacts());
        let mut features = [0.0; FEATURE_COUNT];
        features[0] = 3.0;
        let prediction = scorer.score(&features).unwrap();
        assert!(prediction.probability > 0.5);
        assert_eq!(prediction.risk_level, RiskLevel::High);
        assert_eq!(prediction.features, features.to_vec());
        assert_eq!(prediction.scaled_features, features.to_vec());
    }

    #[test]
    fn zero_score_is_low_risk() {
        let scorer = Scorer::new(&fitted_artifacts());
        let prediction = scorer.score(&[0.0; FEATURE_COUNT]).unwrap();
        assert_eq!(prediction.probability, 0.5);
        assert_eq!(prediction.risk_level, RiskLevel::Low);
    }

    #[test]
    fn untrained_stand_in_fails_per_request() {
        let artifacts = Artifacts {
            model: LogisticModel::untrained(),
            scaler: StandardScaler::unfitted(),
            model_loaded: false,
            scaler_loaded: false,
        };
        let scorer = Scorer::new(&artifacts);
        assert!(scorer.score(&[0.0; FEATURE_COUNT]).is_err());
    }

    #[test]
    fn scaling_is_applied_before_prediction() {
        let mut artifacts = fitted_artifacts();
        artifacts.scaler.mean[0] = 3.0;
        let scorer = Scorer::new(&artifacts);
        let mut features = [0.0; FEATURE_COUNT];
        features[0] = 3.0;
        // Standardized first feature is 0, so the model sees a zero score.
        let prediction = scorer.score(&features).unwrap();
        assert_eq!(prediction.probability, 0.5);
        assert_eq!(prediction.scaled_features[0], 0.0);
    }
}
