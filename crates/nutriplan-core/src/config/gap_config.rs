//! Nutrient-gap prediction configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_GAP_CONFIDENCE_LOSS_PER_RMSE, DEFAULT_MIN_TRAINING_SAMPLES,
    DEFAULT_OBSERVED_GAP_CONFIDENCE,
};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GapConfig {
    /// Regions with an observed value required to fit one nutrient. Default: 10.
    pub min_training_samples: Option<usize>,
    /// Ridge penalty for the per-nutrient models. Default: 0.1.
    pub ridge_penalty: Option<f64>,
    /// Confidence of gaps read from observed adequacy. Default: 75.
    pub observed_confidence: Option<f64>,
    /// Confidence lost per adequacy point of training RMSE. Default: 2.
    pub confidence_loss_per_rmse: Option<f64>,
}

impl GapConfig {
    pub fn effective_min_training_samples(&self) -> usize {
        self.min_training_samples
            .unwrap_or(DEFAULT_MIN_TRAINING_SAMPLES)
    }

    pub fn effective_ridge_penalty(&self) -> f64 {
        self.ridge_penalty.unwrap_or(0.1)
    }

    pub fn effective_observed_confidence(&self) -> f64 {
        self.observed_confidence
            .unwrap_or(DEFAULT_OBSERVED_GAP_CONFIDENCE)
    }

    pub fn effective_confidence_loss_per_rmse(&self) -> f64 {
        self.confidence_loss_per_rmse
            .unwrap_or(DEFAULT_GAP_CONFIDENCE_LOSS_PER_RMSE)
    }
}
