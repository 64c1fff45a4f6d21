//! Allocation configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BALANCED_TOP_K, DEFAULT_CRITICAL_ADEQUACY, DEFAULT_EMERGENCY_TOP_N,
    DEFAULT_FACILITIES_FOR_FULL_INFRASTRUCTURE, DEFAULT_GREEDY_SHARE,
    DEFAULT_MIN_INFRASTRUCTURE_SCORE, DEFAULT_PREVENTION_LOWER, DEFAULT_PREVENTION_UPPER,
    DEFAULT_SIMPLEX_MAX_ITERATIONS,
};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AllocationConfig {
    /// Regions taken by the emergency strategy. Default: 15.
    pub emergency_top_n: Option<usize>,
    /// Regions taken by the balanced strategy. Default: 45.
    pub balanced_top_k: Option<usize>,
    /// Lower adequacy bound (exclusive) of the prevention band. Default: 40.
    pub prevention_lower: Option<f64>,
    /// Upper adequacy bound (exclusive) of the prevention band. Default: 60.
    pub prevention_upper: Option<f64>,
    /// Share of the remaining budget per eligible intervention. Default: 0.4.
    pub greedy_share: Option<f64>,
    /// Nutrients below this adequacy are critical. Default: 50.
    pub critical_adequacy: Option<f64>,
    /// Facility count at which infrastructure saturates. Default: 10.
    pub facilities_for_full_infrastructure: Option<f64>,
    /// Infrastructure score required for high-tier interventions. Default: 0.5.
    pub min_infrastructure_score: Option<f64>,
    /// Run the cross-region optimization after the greedy pass. Default: false.
    pub cross_region: Option<bool>,
    /// Fraction of the budget the cross-region plan must disburse. Default: 0.
    pub min_disbursement: Option<f64>,
    /// Simplex pivot limit. Default: 10000.
    pub max_iterations: Option<usize>,
}

impl AllocationConfig {
    pub fn effective_emergency_top_n(&self) -> usize {
        self.emergency_top_n.unwrap_or(DEFAULT_EMERGENCY_TOP_N)
    }

    pub fn effective_balanced_top_k(&self) -> usize {
        self.balanced_top_k.unwrap_or(DEFAULT_BALANCED_TOP_K)
    }

    pub fn effective_prevention_band(&self) -> (f64, f64) {
        (
            self.prevention_lower.unwrap_or(DEFAULT_PREVENTION_LOWER),
            self.prevention_upper.unwrap_or(DEFAULT_PREVENTION_UPPER),
        )
    }

    pub fn effective_greedy_share(&self) -> f64 {
        self.greedy_share.unwrap_or(DEFAULT_GREEDY_SHARE)
    }

    pub fn effective_critical_adequacy(&self) -> f64 {
        self.critical_adequacy.unwrap_or(DEFAULT_CRITICAL_ADEQUACY)
    }

    pub fn effective_facilities_for_full_infrastructure(&self) -> f64 {
        self.facilities_for_full_infrastructure
            .unwrap_or(DEFAULT_FACILITIES_FOR_FULL_INFRASTRUCTURE)
    }

    pub fn effective_min_infrastructure_score(&self) -> f64 {
        self.min_infrastructure_score
            .unwrap_or(DEFAULT_MIN_INFRASTRUCTURE_SCORE)
    }

    pub fn effective_cross_region(&self) -> bool {
        self.cross_region.unwrap_or(false)
    }

    pub fn effective_min_disbursement(&self) -> f64 {
        self.min_disbursement.unwrap_or(0.0)
    }

    pub fn effective_max_iterations(&self) -> usize {
        self.max_iterations.unwrap_or(DEFAULT_SIMPLEX_MAX_ITERATIONS)
    }
}
