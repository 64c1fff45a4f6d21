//! Outcome simulation: health outcomes, economic benefit, and confidence
//! intervals for one intervention portfolio.

pub mod intervals;
pub mod simulator;
pub mod sweep;
pub mod types;

pub use intervals::z_score;
pub use simulator::OutcomeSimulator;
pub use sweep::{BudgetCriteria, BudgetRecommendation, BudgetSweep, SweepPoint};
pub use types::*;
