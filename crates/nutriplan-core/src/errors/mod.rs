//! Error handling for the planning engine.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod allocation_error;
pub mod config_error;
pub mod data_quality;
pub mod engine_error;
pub mod error_code;
pub mod training_error;
pub mod validation_error;

pub use allocation_error::AllocationError;
pub use config_error::ConfigError;
pub use data_quality::{Checked, DataQualityIssue};
pub use engine_error::EngineError;
pub use error_code::NutriplanErrorCode;
pub use training_error::TrainingError;
pub use validation_error::ValidationError;
