//! Achievable-coverage estimation.

pub mod baseline;
pub mod estimator;
pub mod types;

pub use baseline::{CoverageBaseline, CoverageSample, FittedBaseline, RuleBasedBaseline};
pub use estimator::CoverageEstimator;
pub use types::*;
