//! Nutrient-gap prediction.
//!
//! A gap is the distance between predicted adequacy and full adequacy.
//! Gaps are read from observed data until a fitted model is trained.

pub mod model;
pub mod predictor;
pub mod types;

pub use model::{FittedGapModel, GapModel, ObservedGapModel};
pub use predictor::NutrientGapPredictor;
pub use types::*;
