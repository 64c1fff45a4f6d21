//! Nutrient synergy model.
//!
//! Nutrients delivered together can reinforce or inhibit each other. The
//! table maps unordered nutrient pairs to a multiplier; the combined factor
//! for a selection is the product over matched pairs, clamped to a fixed band.

pub mod table;

pub use table::{SynergyContribution, SynergyTable, MAX_SYNERGY_FACTOR, MIN_SYNERGY_FACTOR};
