//! Scenario types.

use std::fmt;

use nutriplan_core::types::PlanParameters;
use serde::{Deserialize, Serialize};

use crate::financial::FinancialProjection;
use crate::outcomes::OutcomeProjection;

/// A named, self-contained copy of one evaluated plan. Later changes to the
/// parameters it was built from never reach it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSnapshot {
    pub name: String,
    pub parameters: PlanParameters,
    pub outcome: OutcomeProjection,
    pub financial: FinancialProjection,
}

impl ScenarioSnapshot {
    pub fn capture(
        name: impl Into<String>,
        parameters: &PlanParameters,
        outcome: &OutcomeProjection,
        financial: &FinancialProjection,
    ) -> Self {
        Self {
            name: name.into(),
            parameters: parameters.clone(),
            outcome: outcome.clone(),
            financial: financial.clone(),
        }
    }

    pub fn health_impact(&self) -> f64 {
        self.outcome.health_impact
    }

    pub fn total_cost(&self) -> f64 {
        self.parameters.budget
    }

    pub fn coverage(&self) -> f64 {
        self.outcome.actual_coverage
    }

    /// Undiscounted benefit per unit of cost.
    pub fn roi(&self) -> f64 {
        self.financial.benefit_cost_ratio
    }
}

/// One finding from comparing a scenario against a baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Insight {
    /// Health impact points gained (negative when lost).
    HealthImpactChange { delta: f64 },
    AdditionalInvestment {
        amount: f64,
        cost_per_impact_point: f64,
    },
    CostSavings { amount: f64 },
    /// Additional children under five reached.
    CoverageIncrease { people: u64 },
    /// Relative ROI gain, 0.25 meaning 25% better.
    RoiImprovement { relative: f64 },
}

impl fmt::Display for Insight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HealthImpactChange { delta } if *delta > 0.0 => {
                write!(f, "{delta:.1}% improvement in health outcomes")
            }
            Self::HealthImpactChange { delta } => {
                write!(f, "{:.1}% reduction in health outcomes", delta.abs())
            }
            Self::AdditionalInvestment {
                amount,
                cost_per_impact_point,
            } => write!(
                f,
                "additional {amount:.0} investment ({cost_per_impact_point:.0} per health impact point)"
            ),
            Self::CostSavings { amount } => write!(f, "{amount:.0} cost savings achieved"),
            Self::CoverageIncrease { people } => write!(f, "{people} more children reached"),
            Self::RoiImprovement { relative } => {
                write!(f, "{:.1}% better return on investment", relative * 100.0)
            }
        }
    }
}
