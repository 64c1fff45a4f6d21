//! PlanningEngine: the single entry point wiring every component together.
//!
//! Built once with explicit dependencies; holds no global state. The risk
//! scorer and coverage estimator are passed in so callers can train them
//! before or after construction. The gap predictor is built from config and
//! trained through [`PlanningEngine::gap_predictor`].

use std::sync::Arc;

use nutriplan_core::config::EngineConfig;
use nutriplan_core::constants::{DEFAULT_FORECAST_CONFIDENCE, MIN_COVERAGE_CONFIDENCE};
use nutriplan_core::errors::{Checked, EngineError, ValidationError};
use nutriplan_core::traits::{ReferenceData, StaticReferenceData};
use nutriplan_core::types::{DeliveryChannel, InterventionCatalog, PlanParameters, Region};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::allocation::{AllocationOptimizer, AllocationPlan, AllocationStrategy};
use crate::coverage::{CoverageEstimate, CoverageEstimator, CoverageFeatures};
use crate::financial::{FinancialProjection, FinancialProjector};
use crate::gaps::{NutrientGap, NutrientGapPredictor};
use crate::outcomes::{OutcomeProjection, OutcomeSimulator, SimulationInput};
use crate::risk::{sanitize_regions, RiskAssessment, RiskScorer};
use crate::scenario::ScenarioSnapshot;
use crate::synergy::SynergyTable;
use crate::validation::{validate_plan, ValidationReport};

/// Gaps, coverage, risk, and outcomes for one region under one plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionForecast {
    pub region_id: String,
    pub nutrient_gaps: Vec<NutrientGap>,
    pub coverage: CoverageEstimate,
    pub risk: RiskAssessment,
    pub outcome: OutcomeProjection,
    /// 0-100.
    pub confidence: f64,
}

/// Everything computed for one set of plan parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanEvaluation {
    pub report: ValidationReport,
    pub outcome: OutcomeProjection,
    pub financial: FinancialProjection,
}

pub struct PlanningEngine {
    config: EngineConfig,
    reference: Arc<dyn ReferenceData>,
    catalog: InterventionCatalog,
    scorer: RiskScorer,
    estimator: CoverageEstimator,
    gap_predictor: NutrientGapPredictor,
    allocator: AllocationOptimizer,
    simulator: OutcomeSimulator,
    projector: FinancialProjector,
}

impl PlanningEngine {
    pub fn new(
        config: EngineConfig,
        reference: Arc<dyn ReferenceData>,
        scorer: RiskScorer,
        estimator: CoverageEstimator,
    ) -> Self {
        let catalog = reference.catalog();
        let synergy = SynergyTable::from_pairs(&reference.synergy_pairs());
        Self {
            gap_predictor: NutrientGapPredictor::new(&config.gaps),
            allocator: AllocationOptimizer::new(&config.allocation),
            simulator: OutcomeSimulator::new(&config.outcomes, catalog.clone(), synergy),
            projector: FinancialProjector::new(&config.financial),
            catalog,
            reference,
            scorer,
            estimator,
            config,
        }
    }

    /// Compiled reference data and untrained models.
    pub fn with_config(config: EngineConfig) -> Self {
        let scorer = RiskScorer::new(&config.risk);
        let estimator = CoverageEstimator::new(&config.coverage);
        Self::new(config, Arc::new(StaticReferenceData), scorer, estimator)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn reference(&self) -> &dyn ReferenceData {
        self.reference.as_ref()
    }

    pub fn catalog(&self) -> &InterventionCatalog {
        &self.catalog
    }

    pub fn scorer(&self) -> &RiskScorer {
        &self.scorer
    }

    pub fn estimator(&self) -> &CoverageEstimator {
        &self.estimator
    }

    pub fn gap_predictor(&self) -> &NutrientGapPredictor {
        &self.gap_predictor
    }

    pub fn allocator(&self) -> &AllocationOptimizer {
        &self.allocator
    }

    pub fn simulator(&self) -> &OutcomeSimulator {
        &self.simulator
    }

    /// Validate, simulate, and project one plan.
    #[instrument(skip_all, fields(budget = params.budget, population = params.population))]
    pub fn evaluate(&self, params: &PlanParameters) -> Result<PlanEvaluation, EngineError> {
        let report = validate_plan(params, &self.catalog, &self.config.validation)?;
        let outcome = self
            .simulator
            .simulate(&SimulationInput::from_parameters(params))?;
        let financial = self.projector.project(
            &outcome,
            params.budget,
            params.horizon_years,
            params.discount_rate,
            params.spend_years(),
        )?;
        info!(
            warnings = report.warnings.len(),
            health_impact = outcome.health_impact,
            net_npv = financial.net_npv,
            "evaluated plan"
        );
        Ok(PlanEvaluation {
            report,
            outcome,
            financial,
        })
    }

    /// Evaluate `params` and keep an independent copy under `name`.
    pub fn snapshot(
        &self,
        name: impl Into<String>,
        params: &PlanParameters,
    ) -> Result<ScenarioSnapshot, EngineError> {
        let eval = self.evaluate(params)?;
        Ok(ScenarioSnapshot::capture(
            name,
            params,
            &eval.outcome,
            &eval.financial,
        ))
    }

    /// Assess `regions` with the current risk model and allocate `budget`.
    /// Data-quality corrections made while assessing are carried along.
    pub fn allocate(
        &self,
        budget: f64,
        regions: &[Region],
        strategy: &AllocationStrategy,
    ) -> Result<Checked<AllocationPlan>, EngineError> {
        let assessed = self.scorer.assess_regions(regions);
        let plan = self
            .allocator
            .allocate(budget, &assessed.data, &self.catalog, strategy)?;
        Ok(Checked {
            data: plan,
            issues: assessed.issues,
        })
    }

    pub fn estimate_coverage(
        &self,
        region: &Region,
        channel: DeliveryChannel,
        budget_per_capita: Option<f64>,
    ) -> CoverageEstimate {
        self.estimator
            .estimate(&CoverageFeatures::from_region(region), channel, budget_per_capita)
    }

    /// Forecast one region: predict gaps for `params.nutrients`, estimate
    /// coverage at the plan budget per capita, assess risk, and simulate the
    /// plan at the estimated coverage for the region's population.
    #[instrument(skip_all, fields(region = region.id.as_str(), budget = params.budget))]
    pub fn forecast_region(
        &self,
        region: &Region,
        params: &PlanParameters,
        channel: DeliveryChannel,
    ) -> Result<Checked<RegionForecast>, EngineError> {
        let Checked { data, issues } = sanitize_regions(std::slice::from_ref(region));
        let sanitized = data
            .into_iter()
            .next()
            .ok_or_else(|| ValidationError::invalid("region", "could not be sanitized"))?;

        let nutrient_gaps = self.gap_predictor.predict(&sanitized, &params.nutrients);
        let budget_per_capita =
            (region.population > 0).then(|| params.budget / region.population as f64);
        let coverage = self.estimate_coverage(region, channel, budget_per_capita);
        let risk = self.scorer.assess(&sanitized);

        let input = SimulationInput {
            coverage: coverage.coverage,
            population: region.population,
            under5_population: Some(region.under5_population),
            rural_fraction: Some(region.rural_fraction),
            ..SimulationInput::from_parameters(params)
        };
        let outcome = self.simulator.simulate(&input)?;

        let confidence = forecast_confidence(&nutrient_gaps, &coverage, &risk);
        info!(
            gaps = nutrient_gaps.len(),
            coverage = coverage.coverage,
            risk_category = risk.category.name(),
            confidence,
            "forecast region"
        );
        Ok(Checked {
            data: RegionForecast {
                region_id: region.id.clone(),
                nutrient_gaps,
                coverage,
                risk,
                outcome,
                confidence,
            },
            issues,
        })
    }
}

/// Mean of the component confidences that are available: gap models,
/// coverage interval width, and the risk model's top class probability.
fn forecast_confidence(
    gaps: &[NutrientGap],
    coverage: &CoverageEstimate,
    risk: &RiskAssessment,
) -> f64 {
    let mut parts = Vec::with_capacity(3);
    if !gaps.is_empty() {
        parts.push(gaps.iter().map(|g| g.confidence).sum::<f64>() / gaps.len() as f64);
    }
    let width = coverage.interval.upper - coverage.interval.lower;
    parts.push((100.0 - width * 100.0).max(MIN_COVERAGE_CONFIDENCE));
    if let Some(probabilities) = &risk.probabilities {
        parts.push(probabilities.get(probabilities.argmax()) * 100.0);
    }
    if parts.is_empty() {
        return DEFAULT_FORECAST_CONFIDENCE;
    }
    parts.iter().sum::<f64>() / parts.len() as f64
}
