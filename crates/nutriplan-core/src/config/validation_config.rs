//! Parameter validation thresholds.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BUDGET_FLOOR, DEFAULT_HIGH_COVERAGE_BUDGET, DEFAULT_LIMITED_BUDGET,
    DEFAULT_MAX_NUTRIENTS,
};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ValidationConfig {
    /// Budgets below this are rejected. Default: 100000.
    pub budget_floor: Option<f64>,
    /// Budgets below this get a warning. Default: 500000.
    pub limited_budget: Option<f64>,
    /// Coverage above 80% with less budget than this gets a warning. Default: 5000000.
    pub high_coverage_budget: Option<f64>,
    /// Selecting more nutrients than this gets a warning. Default: 7.
    pub max_nutrients: Option<usize>,
    /// Fortification share (%) above which a warning is raised. Default: 70.
    pub max_fortification_share: Option<f64>,
    /// Supplementation share (%) above which a warning is raised. Default: 60.
    pub max_supplementation_share: Option<f64>,
}

impl ValidationConfig {
    pub fn effective_budget_floor(&self) -> f64 {
        self.budget_floor.unwrap_or(DEFAULT_BUDGET_FLOOR)
    }

    pub fn effective_limited_budget(&self) -> f64 {
        self.limited_budget.unwrap_or(DEFAULT_LIMITED_BUDGET)
    }

    pub fn effective_high_coverage_budget(&self) -> f64 {
        self.high_coverage_budget
            .unwrap_or(DEFAULT_HIGH_COVERAGE_BUDGET)
    }

    pub fn effective_max_nutrients(&self) -> usize {
        self.max_nutrients.unwrap_or(DEFAULT_MAX_NUTRIENTS)
    }

    pub fn effective_max_fortification_share(&self) -> f64 {
        self.max_fortification_share.unwrap_or(70.0)
    }

    pub fn effective_max_supplementation_share(&self) -> f64 {
        self.max_supplementation_share.unwrap_or(60.0)
    }
}
