//! Baseline coverage models.
//!
//! A baseline is the coverage a program would reach before the delivery
//! channel and budget adjustments. The rule-based baseline is always
//! available; a fitted baseline is ridge regression on historical programs.

use nutriplan_core::config::CoverageConfig;
use nutriplan_core::errors::TrainingError;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::types::{CoverageFeatures, EstimationMode};
use crate::regression::RidgeModel;

pub trait CoverageBaseline: Send + Sync {
    fn mode(&self) -> EstimationMode;

    /// Baseline coverage fraction, unclamped.
    fn baseline(&self, features: &CoverageFeatures) -> f64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedBaseline;

impl CoverageBaseline for RuleBasedBaseline {
    fn mode(&self) -> EstimationMode {
        EstimationMode::RuleBased
    }

    fn baseline(&self, features: &CoverageFeatures) -> f64 {
        let mut coverage = 0.5;

        if features.facilities_per_10k > 2.0 {
            coverage += 0.15;
        } else if features.facilities_per_10k > 1.0 {
            coverage += 0.08;
        }

        if features.population_density > 200.0 {
            coverage += 0.10;
        } else if features.population_density < 50.0 {
            coverage -= 0.10;
        }

        coverage - (features.rural_fraction - 0.5) * 0.2
    }
}

/// Coverage achieved by a past program.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoverageSample {
    pub features: CoverageFeatures,
    /// Achieved coverage fraction (0.0-1.0).
    pub achieved: f64,
}

/// Ridge regression of achieved coverage on facility density,
/// log population density, and rural share.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedBaseline {
    model: RidgeModel,
}

impl FittedBaseline {
    pub fn fit(samples: &[CoverageSample], config: &CoverageConfig) -> Result<Self, TrainingError> {
        let (rows, targets): (Vec<Vec<f64>>, Vec<f64>) = samples
            .iter()
            .filter(|s| s.features.is_finite() && (0.0..=1.0).contains(&s.achieved))
            .map(|s| (feature_row(&s.features), s.achieved))
            .unzip();

        let required = config.effective_min_training_samples();
        if rows.len() < required {
            return Err(TrainingError::InsufficientData {
                usable: rows.len(),
                required,
            });
        }

        let model = RidgeModel::fit(&rows, &targets, config.effective_ridge_penalty())
            .ok_or_else(|| TrainingError::Degenerate {
                message: "singular normal equations".to_string(),
            })?;

        info!(
            training_samples = rows.len(),
            rmse = model.rmse(),
            "fitted coverage baseline"
        );
        Ok(Self { model })
    }
}

impl CoverageBaseline for FittedBaseline {
    fn mode(&self) -> EstimationMode {
        EstimationMode::Fitted
    }

    fn baseline(&self, features: &CoverageFeatures) -> f64 {
        self.model.predict(&feature_row(features)).clamp(0.0, 1.0)
    }
}

fn feature_row(features: &CoverageFeatures) -> Vec<f64> {
    vec![
        features.facilities_per_10k,
        features.population_density.max(0.0).ln_1p(),
        features.rural_fraction,
    ]
}
