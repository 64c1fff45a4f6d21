//! Coverage estimation configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_FITTED_INTERVAL_WIDTH, DEFAULT_FULL_BUDGET_PER_CAPITA, DEFAULT_MIN_TRAINING_SAMPLES,
    DEFAULT_RULE_INTERVAL_WIDTH, DEFAULT_RURAL_COVERAGE_CAP, DEFAULT_URBAN_COVERAGE_CAP,
};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CoverageConfig {
    /// Coverage ceiling for urban regions. Default: 0.95.
    pub urban_cap: Option<f64>,
    /// Coverage ceiling for rural regions. Default: 0.85.
    pub rural_cap: Option<f64>,
    /// Budget per capita at which budget stops limiting coverage. Default: 10.
    pub full_budget_per_capita: Option<f64>,
    /// Relative half-width of the rule-based interval. Default: 0.20.
    pub rule_interval_width: Option<f64>,
    /// Relative half-width of the fitted-model interval. Default: 0.15.
    pub fitted_interval_width: Option<f64>,
    /// Historical samples required to fit a baseline model. Default: 10.
    pub min_training_samples: Option<usize>,
    /// Ridge penalty for the fitted baseline. Default: 0.1.
    pub ridge_penalty: Option<f64>,
}

impl CoverageConfig {
    pub fn effective_urban_cap(&self) -> f64 {
        self.urban_cap.unwrap_or(DEFAULT_URBAN_COVERAGE_CAP)
    }

    pub fn effective_rural_cap(&self) -> f64 {
        self.rural_cap.unwrap_or(DEFAULT_RURAL_COVERAGE_CAP)
    }

    pub fn effective_full_budget_per_capita(&self) -> f64 {
        self.full_budget_per_capita
            .unwrap_or(DEFAULT_FULL_BUDGET_PER_CAPITA)
    }

    pub fn effective_rule_interval_width(&self) -> f64 {
        self.rule_interval_width.unwrap_or(DEFAULT_RULE_INTERVAL_WIDTH)
    }

    pub fn effective_fitted_interval_width(&self) -> f64 {
        self.fitted_interval_width
            .unwrap_or(DEFAULT_FITTED_INTERVAL_WIDTH)
    }

    pub fn effective_min_training_samples(&self) -> usize {
        self.min_training_samples.unwrap_or(DEFAULT_MIN_TRAINING_SAMPLES)
    }

    pub fn effective_ridge_penalty(&self) -> f64 {
        self.ridge_penalty.unwrap_or(0.1)
    }
}
