//! Configuration for the planning engine.
//! TOML-based, 3-layer resolution: overrides > env > project file > defaults.

pub mod allocation_config;
pub mod coverage_config;
pub mod engine_config;
pub mod financial_config;
pub mod gap_config;
pub mod outcome_config;
pub mod risk_config;
pub mod validation_config;

pub use allocation_config::AllocationConfig;
pub use coverage_config::CoverageConfig;
pub use engine_config::{ConfigOverrides, EngineConfig};
pub use financial_config::FinancialConfig;
pub use gap_config::GapConfig;
pub use outcome_config::OutcomeConfig;
pub use risk_config::RiskConfig;
pub use validation_config::ValidationConfig;
