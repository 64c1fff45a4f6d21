//! Gap prediction types.

use nutriplan_core::types::SanitizedRegion;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapMode {
    Observed,
    Fitted,
}

impl GapMode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Observed => "observed",
            Self::Fitted => "fitted",
        }
    }
}

/// Predicted shortfall of one nutrient in one region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutrientGap {
    pub nutrient: String,
    /// Percent of recommended intake (0-100).
    pub predicted_adequacy: f64,
    /// `100 - predicted_adequacy`.
    pub gap: f64,
    /// 0-100.
    pub confidence: f64,
    pub mode: GapMode,
}

impl NutrientGap {
    pub fn new(nutrient: &str, adequacy: f64, confidence: f64, mode: GapMode) -> Self {
        let predicted_adequacy = if adequacy.is_finite() {
            adequacy.clamp(0.0, 100.0)
        } else {
            0.0
        };
        Self {
            nutrient: nutrient.to_string(),
            predicted_adequacy,
            gap: 100.0 - predicted_adequacy,
            confidence: confidence.clamp(0.0, 100.0),
            mode,
        }
    }
}

/// Regional inputs of the fitted gap model. Adequacy itself is never an
/// input since it is the target.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GapFeatures {
    pub facilities_per_10k: f64,
    pub population_density: f64,
    pub rural_fraction: f64,
    pub poverty_rate: f64,
    pub under5_proportion: f64,
}

impl GapFeatures {
    pub fn from_region(region: &SanitizedRegion) -> Self {
        let r = &region.region;
        Self {
            facilities_per_10k: r.facilities_per_10k(),
            population_density: r.population_density(),
            rural_fraction: r.rural_fraction,
            poverty_rate: r.poverty_rate,
            under5_proportion: r.under5_proportion(),
        }
    }

    pub fn to_row(&self) -> Vec<f64> {
        vec![
            self.facilities_per_10k,
            self.population_density.max(0.0).ln_1p(),
            self.rural_fraction,
            self.poverty_rate,
            self.under5_proportion,
        ]
    }

    pub fn is_finite(&self) -> bool {
        self.to_row().iter().all(|v| v.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gap_is_complement_of_adequacy() {
        let gap = NutrientGap::new("iron", 62.5, 80.0, GapMode::Observed);
        assert_eq!(gap.gap, 37.5);
    }

    #[test]
    fn test_out_of_range_prediction_is_clamped() {
        let over = NutrientGap::new("zinc", 130.0, 140.0, GapMode::Fitted);
        assert_eq!(over.predicted_adequacy, 100.0);
        assert_eq!(over.gap, 0.0);
        assert_eq!(over.confidence, 100.0);

        let under = NutrientGap::new("zinc", -12.0, -5.0, GapMode::Fitted);
        assert_eq!(under.gap, 100.0);
        assert_eq!(under.confidence, 0.0);
    }
}
