//! Scenario snapshots and side-by-side comparison.

pub mod compare;
pub mod types;

pub use compare::compare;
pub use types::*;
