//! Budget allocation across regions and interventions.
//!
//! A strategy selects regions, a greedy pass splits each region's share
//! across eligible interventions, and an optional linear program spreads the
//! whole budget across regions to maximize population-weighted improvement.

pub mod greedy;
pub mod optimizer;
pub mod selection;
pub mod simplex;
pub mod types;

pub use greedy::{allocate_region, infrastructure_score, GreedyParams};
pub use optimizer::AllocationOptimizer;
pub use selection::select_regions;
pub use simplex::{Constraint, ConstraintKind, LinearProgram, LpSolution};
pub use types::*;
