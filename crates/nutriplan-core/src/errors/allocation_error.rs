//! Allocation errors. A failed optimization is never reported as an empty plan.

use super::error_code::{self, NutriplanErrorCode};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AllocationError {
    #[error("No region satisfies the {strategy} selection rule")]
    NoEligibleRegions { strategy: String },

    #[error("Allocation is infeasible: {reason}")]
    Infeasible { reason: String },

    #[error("Allocation objective is unbounded")]
    Unbounded,

    #[error("Non-finite coefficient in {context}")]
    NonFiniteInput { context: String },

    #[error("Optimizer stopped after {iterations} iterations without converging")]
    IterationLimit { iterations: usize },
}

impl NutriplanErrorCode for AllocationError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NoEligibleRegions { .. } => error_code::NO_ELIGIBLE_REGIONS,
            _ => error_code::UNSOLVABLE_ALLOCATION,
        }
    }
}
