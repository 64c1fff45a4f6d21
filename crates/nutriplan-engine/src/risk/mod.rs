//! Regional nutrition risk scoring.
//!
//! Adequacy data is sanitized first, then scored either by fixed rules or by a
//! fitted classifier. Both paths produce the same `RiskAssessment` shape.

pub mod classifier;
pub mod rules;
pub mod sanitize;
pub mod scorer;
pub mod types;

pub use classifier::{LogisticClassifier, TrainingSample, TrainingSummary};
pub use rules::RuleBasedModel;
pub use sanitize::{clean_adequacy, sanitize_regions};
pub use scorer::{AssessedRegion, ModelOutput, RiskModel, RiskScorer};
pub use types::*;
