//! Outcome simulation types.

use nutriplan_core::types::{InterventionMix, PlanParameters};
use serde::{Deserialize, Serialize};

/// Inputs for one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationInput {
    /// Requested coverage (0.0-1.0).
    pub coverage: f64,
    pub mix: InterventionMix,
    pub population: u64,
    pub nutrients: Vec<String>,
    /// When set, coverage is limited to what the budget can buy.
    pub budget: Option<f64>,
    pub under5_population: Option<u64>,
    /// Enables the agricultural benefit term.
    pub rural_fraction: Option<f64>,
    pub sensitivity: f64,
    /// Confidence level in percent.
    pub confidence_level: f64,
}

impl SimulationInput {
    pub fn from_parameters(params: &PlanParameters) -> Self {
        Self {
            coverage: params.coverage_target,
            mix: params.mix.clone(),
            population: params.population,
            nutrients: params.nutrients.clone(),
            budget: Some(params.budget),
            under5_population: params.under5_population,
            rural_fraction: params.rural_fraction,
            sensitivity: params.sensitivity,
            confidence_level: params.confidence_level,
        }
    }

    pub fn with_budget(mut self, budget: f64) -> Self {
        self.budget = Some(budget);
        self
    }
}

/// A point estimate with its confidence bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutcomeEstimate {
    pub value: f64,
    pub lower: f64,
    pub upper: f64,
}

impl OutcomeEstimate {
    pub fn contains(&self, v: f64) -> bool {
        v >= self.lower && v <= self.upper
    }
}

/// The projected result of funding one portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeProjection {
    pub requested_coverage: f64,
    pub actual_coverage: f64,
    /// True when the budget could not buy the requested coverage.
    pub budget_limited: bool,
    pub weighted_effectiveness: f64,
    /// Per-person cost of the mix.
    pub weighted_cost: f64,
    pub synergy_factor: f64,
    /// Weighted effectiveness after synergy.
    pub effectiveness: f64,
    pub population: u64,
    pub under5_population: u64,
    pub people_reached: u64,
    pub lives_saved: OutcomeEstimate,
    pub stunting_prevented: OutcomeEstimate,
    pub anemia_reduced: OutcomeEstimate,
    pub dalys_averted: OutcomeEstimate,
    pub economic_benefit: OutcomeEstimate,
    /// 0-100 index of cases averted relative to population.
    pub health_impact: f64,
    pub total_cost: f64,
    pub cost_per_daly: Option<f64>,
    pub cost_per_life: Option<f64>,
    pub confidence_level: f64,
}

impl OutcomeProjection {
    /// Lives saved, stunting prevented, and anemia reduced.
    pub fn cases_averted(&self) -> f64 {
        self.lives_saved.value + self.stunting_prevented.value + self.anemia_reduced.value
    }
}
