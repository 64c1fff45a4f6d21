//! Coverage estimation types.

use nutriplan_core::types::Region;
use serde::{Deserialize, Serialize};

/// Region characteristics that drive reachable coverage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoverageFeatures {
    pub population: u64,
    pub facilities_per_10k: f64,
    /// Inhabitants per km².
    pub population_density: f64,
    pub rural_fraction: f64,
    /// Road km per km², when known.
    pub road_density: Option<f64>,
}

impl CoverageFeatures {
    pub fn from_region(region: &Region) -> Self {
        Self {
            population: region.population,
            facilities_per_10k: region.facilities_per_10k(),
            population_density: region.population_density(),
            rural_fraction: region.rural_fraction,
            road_density: region.road_density(),
        }
    }

    pub fn is_urban(&self) -> bool {
        self.rural_fraction < 0.5
    }

    pub fn is_finite(&self) -> bool {
        self.facilities_per_10k.is_finite()
            && self.population_density.is_finite()
            && self.rural_fraction.is_finite()
            && self.road_density.map_or(true, f64::is_finite)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimationMode {
    RuleBased,
    Fitted,
}

/// What keeps coverage from going higher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitingFactor {
    LowFacilityDensity,
    HighRuralShare,
    PoorRoadNetwork,
    BudgetConstraint,
    /// Sentinel when nothing else applies.
    NoneIdentified,
}

impl LimitingFactor {
    pub fn name(&self) -> &'static str {
        match self {
            Self::LowFacilityDensity => "low_facility_density",
            Self::HighRuralShare => "high_rural_share",
            Self::PoorRoadNetwork => "poor_road_network",
            Self::BudgetConstraint => "budget_constraint",
            Self::NoneIdentified => "none_identified",
        }
    }
}

impl std::fmt::Display for LimitingFactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoverageInterval {
    pub lower: f64,
    pub upper: f64,
}

impl CoverageInterval {
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }
}

/// Achievable coverage for one region and delivery channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageEstimate {
    pub target_population: u64,
    /// Fraction of the target population reached, in [0, cap].
    pub coverage: f64,
    pub interval: CoverageInterval,
    /// Ceiling applied to this region.
    pub cap: f64,
    pub people_covered: u64,
    pub limiting_factors: Vec<LimitingFactor>,
    pub mode: EstimationMode,
}
