//! Allocation strategies and plans.

use serde::{Deserialize, Serialize};

/// How regions are chosen for funding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationStrategy {
    /// Highest risk scores first.
    Emergency,
    /// Regions whose average adequacy sits inside the prevention band.
    Prevention,
    /// Risk score weighted by population.
    Balanced,
    /// Explicit region ids, in the given order.
    Custom(Vec<String>),
}

impl AllocationStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Emergency => "emergency",
            Self::Prevention => "prevention",
            Self::Balanced => "balanced",
            Self::Custom(_) => "custom",
        }
    }
}

impl std::fmt::Display for AllocationStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterventionAllocation {
    pub intervention_id: String,
    pub amount: f64,
}

/// Greedy split of one region's budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionAllocation {
    pub region_id: String,
    pub budget: f64,
    pub critical_nutrients: Vec<String>,
    pub infrastructure_score: f64,
    pub interventions: Vec<InterventionAllocation>,
    pub unallocated: f64,
}

impl RegionAllocation {
    pub fn allocated(&self) -> f64 {
        self.interventions.iter().map(|i| i.amount).sum()
    }
}

/// Coverage of one intervention in one region from the cross-region program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageAssignment {
    pub region_id: String,
    pub intervention_id: String,
    /// Percent of the region's population covered (0-100).
    pub coverage_percent: f64,
    pub people: u64,
    pub spend: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossRegionPlan {
    /// Non-zero assignments only.
    pub assignments: Vec<CoverageAssignment>,
    pub total_spend: f64,
    /// Population-weighted adequacy improvement achieved.
    pub improvement: f64,
    pub iterations: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationPlan {
    pub strategy: AllocationStrategy,
    pub budget: f64,
    pub budget_per_region: f64,
    pub regions: Vec<RegionAllocation>,
    pub total_allocated: f64,
    pub total_unallocated: f64,
    pub cross_region: Option<CrossRegionPlan>,
}
