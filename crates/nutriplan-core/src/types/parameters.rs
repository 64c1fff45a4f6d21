//! The flat parameter bag describing one planning scenario.

use serde::{Deserialize, Serialize};

use super::InterventionMix;
use crate::constants::{
    DEFAULT_CONFIDENCE_LEVEL, DEFAULT_DISCOUNT_RATE, DEFAULT_TIME_HORIZON_YEARS,
    DEFAULT_UNDER5_SHARE, FOLATE, IRON, VITAMIN_A, ZINC,
};

/// Inputs for one scenario. An immutable value: changing a parameter means
/// building a new bag, and every derived figure is computed on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanParameters {
    /// Total program budget.
    pub budget: f64,
    /// Target population.
    pub population: u64,
    /// Under-5 population. Defaults to a fixed share of `population`.
    #[serde(default)]
    pub under5_population: Option<u64>,
    /// Rural share of the target population (0.0-1.0), if known.
    #[serde(default)]
    pub rural_fraction: Option<f64>,
    /// Requested coverage (0.0-1.0).
    pub coverage_target: f64,
    pub mix: InterventionMix,
    pub nutrients: Vec<String>,
    pub discount_rate: f64,
    /// Multiplier applied to every outcome (0.5-1.5).
    pub sensitivity: f64,
    /// Confidence level in percent.
    pub confidence_level: f64,
    pub horizon_years: u32,
    pub duration_months: u32,
}

impl Default for PlanParameters {
    fn default() -> Self {
        Self {
            budget: 5_000_000.0,
            population: 1_000_000,
            under5_population: None,
            rural_fraction: None,
            coverage_target: 0.8,
            mix: InterventionMix::new()
                .with_share("supplementation", 40.0)
                .with_share("fortification", 30.0)
                .with_share("biofortification", 20.0)
                .with_share("education", 10.0),
            nutrients: [IRON, VITAMIN_A, ZINC, FOLATE]
                .iter()
                .map(|n| n.to_string())
                .collect(),
            discount_rate: DEFAULT_DISCOUNT_RATE,
            sensitivity: 1.0,
            confidence_level: DEFAULT_CONFIDENCE_LEVEL,
            horizon_years: DEFAULT_TIME_HORIZON_YEARS,
            duration_months: 12,
        }
    }
}

impl PlanParameters {
    pub fn with_budget(mut self, budget: f64) -> Self {
        self.budget = budget;
        self
    }

    pub fn with_population(mut self, population: u64) -> Self {
        self.population = population;
        self
    }

    pub fn with_coverage_target(mut self, coverage: f64) -> Self {
        self.coverage_target = coverage;
        self
    }

    pub fn with_mix(mut self, mix: InterventionMix) -> Self {
        self.mix = mix;
        self
    }

    pub fn with_nutrients<I, S>(mut self, nutrients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.nutrients = nutrients.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_sensitivity(mut self, sensitivity: f64) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    pub fn with_confidence_level(mut self, level: f64) -> Self {
        self.confidence_level = level;
        self
    }

    pub fn with_horizon(mut self, years: u32) -> Self {
        self.horizon_years = years;
        self
    }

    pub fn with_discount_rate(mut self, rate: f64) -> Self {
        self.discount_rate = rate;
        self
    }

    pub fn with_rural_fraction(mut self, fraction: f64) -> Self {
        self.rural_fraction = Some(fraction);
        self
    }

    /// People reached if the coverage target is met.
    pub fn people_reached(&self) -> u64 {
        (self.coverage_target.clamp(0.0, 1.0) * self.population as f64).floor() as u64
    }

    pub fn monthly_budget(&self) -> f64 {
        self.budget / self.duration_months.max(1) as f64
    }

    pub fn budget_per_capita(&self) -> f64 {
        if self.population == 0 {
            return 0.0;
        }
        self.budget / self.population as f64
    }

    pub fn effective_under5_population(&self) -> u64 {
        self.under5_population
            .unwrap_or_else(|| (self.population as f64 * DEFAULT_UNDER5_SHARE).floor() as u64)
    }

    /// Whole years over which the budget is disbursed, within `1..=horizon`.
    pub fn spend_years(&self) -> u32 {
        let years = self.duration_months.div_ceil(12).max(1);
        years.min(self.horizon_years.max(1))
    }
}
