//! Aggregate error for whole-plan evaluation.

use super::error_code::NutriplanErrorCode;
use super::{AllocationError, ConfigError, ValidationError};

/// Errors that abort a plan evaluation.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Allocation error: {0}")]
    Allocation(#[from] AllocationError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl NutriplanErrorCode for EngineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(e) => e.error_code(),
            Self::Allocation(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }
}
