//! NutrientGapPredictor: swaps between observed and fitted gap models.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use nutriplan_core::config::GapConfig;
use nutriplan_core::errors::TrainingError;
use nutriplan_core::types::SanitizedRegion;
use tracing::{info, instrument, warn};

use super::model::{FittedGapModel, GapModel, ObservedGapModel};
use super::types::{GapFeatures, GapMode, NutrientGap};
use crate::regression::RidgeModel;

pub struct NutrientGapPredictor {
    config: GapConfig,
    model: RwLock<Arc<dyn GapModel>>,
}

impl Default for NutrientGapPredictor {
    fn default() -> Self {
        Self::new(&GapConfig::default())
    }
}

impl NutrientGapPredictor {
    pub fn new(config: &GapConfig) -> Self {
        Self {
            config: config.clone(),
            model: RwLock::new(Arc::new(ObservedGapModel::new(config))),
        }
    }

    pub fn mode(&self) -> GapMode {
        self.current_model().mode()
    }

    pub fn current_model(&self) -> Arc<dyn GapModel> {
        let guard = self.model.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    pub fn install_model(&self, model: Arc<dyn GapModel>) {
        let mut guard = self.model.write().unwrap_or_else(|e| e.into_inner());
        *guard = model;
    }

    /// Gaps for each of `nutrients` the current model can predict, in the
    /// order given.
    pub fn predict(&self, region: &SanitizedRegion, nutrients: &[String]) -> Vec<NutrientGap> {
        let model = self.current_model();
        nutrients
            .iter()
            .filter_map(|n| model.predict(n, region))
            .collect()
    }

    /// Fit one model per nutrient from regions where it was observed.
    /// Nutrients with too few observations are skipped; if none can be fit
    /// the current model stays in place. Returns the fitted nutrients.
    #[instrument(skip_all, fields(region_count = regions.len()))]
    pub fn train(&self, regions: &[SanitizedRegion]) -> Result<Vec<String>, TrainingError> {
        let required = self.config.effective_min_training_samples();
        let lambda = self.config.effective_ridge_penalty();

        let mut targets: BTreeMap<&str, (Vec<Vec<f64>>, Vec<f64>)> = BTreeMap::new();
        for region in regions {
            let features = GapFeatures::from_region(region);
            if !features.is_finite() {
                continue;
            }
            for (nutrient, adequacy) in &region.adequacy {
                let observed = region
                    .region
                    .nutrient_adequacy
                    .get(nutrient)
                    .copied()
                    .flatten()
                    .is_some_and(f64::is_finite);
                if observed {
                    let (rows, ys) = targets.entry(nutrient.as_str()).or_default();
                    rows.push(features.to_row());
                    ys.push(*adequacy);
                }
            }
        }

        let most_usable = targets.values().map(|(_, ys)| ys.len()).max().unwrap_or(0);
        let models: BTreeMap<String, RidgeModel> = targets
            .into_iter()
            .filter(|(_, (_, ys))| ys.len() >= required)
            .filter_map(|(nutrient, (rows, ys))| {
                RidgeModel::fit(&rows, &ys, lambda).map(|m| (nutrient.to_string(), m))
            })
            .collect();

        if models.is_empty() {
            let err = TrainingError::InsufficientData {
                usable: most_usable,
                required,
            };
            warn!(error = %err, "keeping current gap model");
            return Err(err);
        }

        for (nutrient, model) in &models {
            info!(nutrient = nutrient.as_str(), rmse = model.rmse(), "fitted gap model");
        }
        let fitted: Vec<String> = models.keys().cloned().collect();
        self.install_model(Arc::new(FittedGapModel::new(models, &self.config)));
        Ok(fitted)
    }
}
