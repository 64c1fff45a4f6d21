//! Parameter validation errors. Fatal: the calculation never proceeds.

use super::error_code::{self, NutriplanErrorCode};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Intervention mix must total 100%, got {total:.2}%")]
    MixSumInvalid { total: f64 },

    #[error("Unknown intervention type: {id}")]
    UnknownIntervention { id: String },

    #[error("Budget {budget:.0} is below the minimum of {floor:.0}")]
    BudgetBelowFloor { budget: f64, floor: f64 },

    #[error("At least one nutrient must be selected")]
    NoNutrientsSelected,

    #[error("Invalid parameter {field}: {message}")]
    InvalidParameter { field: String, message: String },
}

impl ValidationError {
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl NutriplanErrorCode for ValidationError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MixSumInvalid { .. } | Self::UnknownIntervention { .. } => {
                error_code::MIX_INVALID
            }
            Self::BudgetBelowFloor { .. } => error_code::BUDGET_BELOW_FLOOR,
            _ => error_code::VALIDATION_ERROR,
        }
    }
}
