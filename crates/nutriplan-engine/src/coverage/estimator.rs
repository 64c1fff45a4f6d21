//! CoverageEstimator: baseline, channel and budget adjustments, caps, intervals.

use std::sync::{Arc, RwLock};

use nutriplan_core::config::CoverageConfig;
use nutriplan_core::errors::TrainingError;
use nutriplan_core::types::DeliveryChannel;
use tracing::{debug, warn};

use super::baseline::{CoverageBaseline, CoverageSample, FittedBaseline, RuleBasedBaseline};
use super::types::{
    CoverageEstimate, CoverageFeatures, CoverageInterval, EstimationMode, LimitingFactor,
};

/// Road density (km/km²) below which roads limit coverage.
const POOR_ROAD_DENSITY: f64 = 0.1;

pub struct CoverageEstimator {
    config: CoverageConfig,
    baseline: RwLock<Arc<dyn CoverageBaseline>>,
}

impl Default for CoverageEstimator {
    fn default() -> Self {
        Self::new(&CoverageConfig::default())
    }
}

impl CoverageEstimator {
    pub fn new(config: &CoverageConfig) -> Self {
        Self {
            config: config.clone(),
            baseline: RwLock::new(Arc::new(RuleBasedBaseline)),
        }
    }

    pub fn mode(&self) -> EstimationMode {
        self.current_baseline().mode()
    }

    pub fn current_baseline(&self) -> Arc<dyn CoverageBaseline> {
        let guard = self.baseline.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    pub fn install_baseline(&self, baseline: Arc<dyn CoverageBaseline>) {
        let mut guard = self.baseline.write().unwrap_or_else(|e| e.into_inner());
        *guard = baseline;
    }

    /// Fit a baseline from past programs and make it current. On error the
    /// current baseline stays in place.
    pub fn train(&self, samples: &[CoverageSample]) -> Result<(), TrainingError> {
        match FittedBaseline::fit(samples, &self.config) {
            Ok(model) => {
                self.install_baseline(Arc::new(model));
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "keeping current coverage baseline");
                Err(e)
            }
        }
    }

    /// Estimate achievable coverage. A non-finite budget per capita is
    /// treated as unknown.
    pub fn estimate(
        &self,
        features: &CoverageFeatures,
        channel: DeliveryChannel,
        budget_per_capita: Option<f64>,
    ) -> CoverageEstimate {
        let baseline = self.current_baseline();
        let mode = baseline.mode();

        let cap = if features.is_urban() {
            self.config.effective_urban_cap()
        } else {
            self.config.effective_rural_cap()
        };

        let budget_factor = budget_per_capita
            .filter(|b| b.is_finite())
            .map(|b| (b / self.config.effective_full_budget_per_capita()).clamp(0.0, 1.0))
            .unwrap_or(1.0);

        let raw = baseline.baseline(features) * channel.coverage_factor() * budget_factor;
        let coverage = if raw.is_finite() { raw.clamp(0.0, cap) } else { 0.0 };

        let width = match mode {
            EstimationMode::RuleBased => self.config.effective_rule_interval_width(),
            EstimationMode::Fitted => self.config.effective_fitted_interval_width(),
        };
        let interval = CoverageInterval {
            lower: (coverage * (1.0 - width)).max(0.0),
            upper: (coverage * (1.0 + width)).min(cap),
        };

        let mut limiting_factors = Vec::new();
        if features.facilities_per_10k < 1.0 {
            limiting_factors.push(LimitingFactor::LowFacilityDensity);
        }
        if features.rural_fraction > 0.8 {
            limiting_factors.push(LimitingFactor::HighRuralShare);
        }
        if features.road_density.is_some_and(|d| d < POOR_ROAD_DENSITY) {
            limiting_factors.push(LimitingFactor::PoorRoadNetwork);
        }
        if budget_factor < 1.0 {
            limiting_factors.push(LimitingFactor::BudgetConstraint);
        }
        if limiting_factors.is_empty() {
            limiting_factors.push(LimitingFactor::NoneIdentified);
        }

        debug!(
            channel = channel.name(),
            coverage,
            budget_factor,
            "estimated coverage"
        );

        CoverageEstimate {
            target_population: features.population,
            coverage,
            interval,
            cap,
            people_covered: (coverage * features.population as f64).floor() as u64,
            limiting_factors,
            mode,
        }
    }
}
