//! Risk scoring configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_CRITICAL_THRESHOLD, DEFAULT_HIGH_THRESHOLD, DEFAULT_MEDIUM_THRESHOLD,
    DEFAULT_MIN_TRAINING_SAMPLES,
};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RiskConfig {
    /// Score at or above which a region is critical. Default: 70.
    pub critical_threshold: Option<f64>,
    /// Default: 50.
    pub high_threshold: Option<f64>,
    /// Default: 30.
    pub medium_threshold: Option<f64>,
    /// Usable samples required to fit a classifier. Default: 10.
    pub min_training_samples: Option<usize>,
    /// Gradient-descent step size. Default: 0.5.
    pub learning_rate: Option<f64>,
    /// Gradient-descent passes over the training set. Default: 400.
    pub training_epochs: Option<usize>,
    /// L2 penalty on classifier weights. Default: 0.001.
    pub l2_penalty: Option<f64>,
}

impl RiskConfig {
    pub fn effective_critical_threshold(&self) -> f64 {
        self.critical_threshold.unwrap_or(DEFAULT_CRITICAL_THRESHOLD)
    }

    pub fn effective_high_threshold(&self) -> f64 {
        self.high_threshold.unwrap_or(DEFAULT_HIGH_THRESHOLD)
    }

    pub fn effective_medium_threshold(&self) -> f64 {
        self.medium_threshold.unwrap_or(DEFAULT_MEDIUM_THRESHOLD)
    }

    pub fn effective_min_training_samples(&self) -> usize {
        self.min_training_samples.unwrap_or(DEFAULT_MIN_TRAINING_SAMPLES)
    }

    pub fn effective_learning_rate(&self) -> f64 {
        self.learning_rate.unwrap_or(0.5)
    }

    pub fn effective_training_epochs(&self) -> usize {
        self.training_epochs.unwrap_or(400)
    }

    pub fn effective_l2_penalty(&self) -> f64 {
        self.l2_penalty.unwrap_or(0.001)
    }
}
