//! Model training errors. Recoverable: callers keep the rule-based model.

use super::error_code::{self, NutriplanErrorCode};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TrainingError {
    #[error("Insufficient training data: {usable} usable samples, {required} required")]
    InsufficientData { usable: usize, required: usize },

    #[error("Training produced a degenerate model: {message}")]
    Degenerate { message: String },
}

impl NutriplanErrorCode for TrainingError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientData { .. } => error_code::INSUFFICIENT_TRAINING_DATA,
            Self::Degenerate { .. } => error_code::TRAINING_ERROR,
        }
    }
}
