//! Outcome simulation configuration.
//!
//! Epidemiological baselines, reduction rates, DALY weights, and the per-unit
//! economic values used to monetize outcomes. Economic values are in the same
//! currency unit as the budget.

use serde::{Deserialize, Serialize};

use crate::constants::*;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OutcomeConfig {
    /// Under-5 share assumed when no under-5 population is supplied. Default: 0.15.
    pub under5_share: Option<f64>,
    /// Under-5 deaths per 1000 children. Default: 43.
    pub u5_mortality_per_1000: Option<f64>,
    /// Default: 0.29.
    pub stunting_prevalence: Option<f64>,
    /// Default: 0.28.
    pub anemia_prevalence: Option<f64>,
    /// Mortality reduction per unit effectiveness. Default: 0.20.
    pub mortality_reduction_rate: Option<f64>,
    /// Default: 0.25.
    pub mortality_reduction_cap: Option<f64>,
    /// Default: 0.25.
    pub stunting_reduction_rate: Option<f64>,
    /// Default: 0.30.
    pub stunting_reduction_cap: Option<f64>,
    /// Default: 0.35.
    pub anemia_reduction_rate: Option<f64>,
    /// Default: 0.40.
    pub anemia_reduction_cap: Option<f64>,
    /// Default: 33.
    pub dalys_per_life: Option<f64>,
    /// Default: 4.6.
    pub dalys_per_stunting_case: Option<f64>,
    /// Default: 0.8.
    pub dalys_per_anemia_case: Option<f64>,
    /// Healthcare saving per effectively covered person. Default: 178000.
    pub healthcare_saving_per_person: Option<f64>,
    /// Lifetime productivity gain per effectively covered child. Default: 712000.
    pub productivity_gain_per_child: Option<f64>,
    /// Agricultural output gain per effectively covered rural person. Default: 21360.
    pub agricultural_gain_per_person: Option<f64>,
    /// Share of rural beneficiaries with an agricultural gain. Default: 0.1.
    pub agricultural_uptake: Option<f64>,
    /// Include the rural agricultural term in economic benefit. Default: true.
    pub include_agricultural_benefit: Option<bool>,
    /// Relative standard error for every outcome. Default: 0.15.
    pub stderr_fraction: Option<f64>,
    /// Marginal benefit per unit budget a sweep step must reach. Default: 1.5.
    pub marginal_benefit_threshold: Option<f64>,
    /// Highest acceptable cost per life saved. Default: 500,000.
    pub max_cost_per_life: Option<f64>,
    /// Weight of the efficiency criterion. Default: 0.3.
    pub efficiency_weight: Option<f64>,
    /// Weight of the marginal-return criterion. Default: 0.3.
    pub marginal_weight: Option<f64>,
    /// Weight of the cost-effectiveness criterion. Default: 0.2.
    pub cost_effectiveness_weight: Option<f64>,
    /// Weight of the coverage-target criterion. Default: 0.2.
    pub coverage_weight: Option<f64>,
    /// Largest budget the delivery system can absorb. No limit by default.
    pub annual_capacity: Option<f64>,
}

impl OutcomeConfig {
    pub fn effective_under5_share(&self) -> f64 {
        self.under5_share.unwrap_or(DEFAULT_UNDER5_SHARE)
    }

    pub fn effective_u5_mortality_per_1000(&self) -> f64 {
        self.u5_mortality_per_1000
            .unwrap_or(DEFAULT_U5_MORTALITY_PER_1000)
    }

    pub fn effective_stunting_prevalence(&self) -> f64 {
        self.stunting_prevalence.unwrap_or(DEFAULT_STUNTING_PREVALENCE)
    }

    pub fn effective_anemia_prevalence(&self) -> f64 {
        self.anemia_prevalence.unwrap_or(DEFAULT_ANEMIA_PREVALENCE)
    }

    /// (rate, cap) for mortality reduction.
    pub fn effective_mortality_reduction(&self) -> (f64, f64) {
        (
            self.mortality_reduction_rate
                .unwrap_or(DEFAULT_MORTALITY_REDUCTION_RATE),
            self.mortality_reduction_cap
                .unwrap_or(DEFAULT_MORTALITY_REDUCTION_CAP),
        )
    }

    pub fn effective_stunting_reduction(&self) -> (f64, f64) {
        (
            self.stunting_reduction_rate
                .unwrap_or(DEFAULT_STUNTING_REDUCTION_RATE),
            self.stunting_reduction_cap
                .unwrap_or(DEFAULT_STUNTING_REDUCTION_CAP),
        )
    }

    pub fn effective_anemia_reduction(&self) -> (f64, f64) {
        (
            self.anemia_reduction_rate
                .unwrap_or(DEFAULT_ANEMIA_REDUCTION_RATE),
            self.anemia_reduction_cap
                .unwrap_or(DEFAULT_ANEMIA_REDUCTION_CAP),
        )
    }

    /// DALY weights as (per life, per stunting case, per anemia case).
    pub fn effective_daly_weights(&self) -> (f64, f64, f64) {
        (
            self.dalys_per_life.unwrap_or(DEFAULT_DALYS_PER_LIFE),
            self.dalys_per_stunting_case
                .unwrap_or(DEFAULT_DALYS_PER_STUNTING_CASE),
            self.dalys_per_anemia_case
                .unwrap_or(DEFAULT_DALYS_PER_ANEMIA_CASE),
        )
    }

    pub fn effective_healthcare_saving_per_person(&self) -> f64 {
        self.healthcare_saving_per_person
            .unwrap_or(DEFAULT_HEALTHCARE_SAVING_PER_PERSON)
    }

    pub fn effective_productivity_gain_per_child(&self) -> f64 {
        self.productivity_gain_per_child
            .unwrap_or(DEFAULT_PRODUCTIVITY_GAIN_PER_CHILD)
    }

    pub fn effective_agricultural_gain_per_person(&self) -> f64 {
        self.agricultural_gain_per_person
            .unwrap_or(DEFAULT_AGRICULTURAL_GAIN_PER_PERSON)
    }

    pub fn effective_agricultural_uptake(&self) -> f64 {
        self.agricultural_uptake.unwrap_or(DEFAULT_AGRICULTURAL_UPTAKE)
    }

    pub fn effective_include_agricultural_benefit(&self) -> bool {
        self.include_agricultural_benefit.unwrap_or(true)
    }

    pub fn effective_stderr_fraction(&self) -> f64 {
        self.stderr_fraction.unwrap_or(DEFAULT_STDERR_FRACTION)
    }

    pub fn effective_marginal_benefit_threshold(&self) -> f64 {
        self.marginal_benefit_threshold
            .unwrap_or(DEFAULT_MARGINAL_BENEFIT_THRESHOLD)
    }

    pub fn effective_max_cost_per_life(&self) -> f64 {
        self.max_cost_per_life.unwrap_or(DEFAULT_MAX_COST_PER_LIFE)
    }

    /// Criterion weights as (efficiency, marginal, cost-effectiveness, coverage).
    pub fn effective_budget_criteria_weights(&self) -> [f64; 4] {
        let [e, m, c, v] = DEFAULT_BUDGET_CRITERIA_WEIGHTS;
        [
            self.efficiency_weight.unwrap_or(e),
            self.marginal_weight.unwrap_or(m),
            self.cost_effectiveness_weight.unwrap_or(c),
            self.coverage_weight.unwrap_or(v),
        ]
    }
}
