//! # nutriplan-engine
//!
//! Decision-support computations for nutrition-intervention planning:
//! nutrient synergy, regional risk scoring, nutrient-gap prediction,
//! coverage estimation, budget allocation, outcome simulation, financial
//! projection, and scenario comparison. Every computation is synchronous and free of I/O.

pub mod allocation;
pub mod coverage;
pub mod financial;
pub mod gaps;
pub mod outcomes;
pub mod planner;
pub mod regression;
pub mod risk;
pub mod scenario;
pub mod synergy;
pub mod validation;
