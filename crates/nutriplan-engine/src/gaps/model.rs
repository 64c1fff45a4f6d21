//! Gap models: observed adequacy and per-nutrient ridge regression.

use std::collections::BTreeMap;

use nutriplan_core::config::GapConfig;
use nutriplan_core::types::SanitizedRegion;
use tracing::debug;

use super::types::{GapFeatures, GapMode, NutrientGap};
use crate::regression::RidgeModel;

/// A gap model. Implementations are immutable once built.
pub trait GapModel: Send + Sync {
    fn mode(&self) -> GapMode;

    /// `None` when the model has nothing to say about `nutrient`.
    fn predict(&self, nutrient: &str, region: &SanitizedRegion) -> Option<NutrientGap>;
}

/// Reads the region's sanitized adequacy at a fixed confidence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObservedGapModel {
    confidence: f64,
}

impl ObservedGapModel {
    pub fn new(config: &GapConfig) -> Self {
        Self {
            confidence: config.effective_observed_confidence(),
        }
    }
}

impl GapModel for ObservedGapModel {
    fn mode(&self) -> GapMode {
        GapMode::Observed
    }

    fn predict(&self, nutrient: &str, region: &SanitizedRegion) -> Option<NutrientGap> {
        let adequacy = region.adequacy.get(nutrient)?;
        Some(NutrientGap::new(
            nutrient,
            *adequacy,
            self.confidence,
            GapMode::Observed,
        ))
    }
}

/// One ridge model per nutrient. Nutrients without a model are read from
/// observed data.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedGapModel {
    models: BTreeMap<String, RidgeModel>,
    fallback: ObservedGapModel,
    confidence_loss_per_rmse: f64,
}

impl FittedGapModel {
    pub fn new(models: BTreeMap<String, RidgeModel>, config: &GapConfig) -> Self {
        Self {
            models,
            fallback: ObservedGapModel::new(config),
            confidence_loss_per_rmse: config.effective_confidence_loss_per_rmse(),
        }
    }

    pub fn nutrients(&self) -> impl Iterator<Item = &str> {
        self.models.keys().map(String::as_str)
    }

    pub fn model(&self, nutrient: &str) -> Option<&RidgeModel> {
        self.models.get(nutrient)
    }
}

impl GapModel for FittedGapModel {
    fn mode(&self) -> GapMode {
        GapMode::Fitted
    }

    fn predict(&self, nutrient: &str, region: &SanitizedRegion) -> Option<NutrientGap> {
        let features = GapFeatures::from_region(region);
        let Some(model) = self.models.get(nutrient).filter(|_| features.is_finite()) else {
            return self.fallback.predict(nutrient, region);
        };
        let adequacy = model.predict(&features.to_row());
        let confidence = 100.0 - self.confidence_loss_per_rmse * model.rmse();
        debug!(nutrient, adequacy, confidence, "predicted nutrient gap");
        Some(NutrientGap::new(nutrient, adequacy, confidence, GapMode::Fitted))
    }
}
