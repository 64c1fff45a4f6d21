//! Data model shared by every engine component.

pub mod intervention;
pub mod nutrient;
pub mod parameters;
pub mod region;

pub use intervention::{
    DeliveryChannel, InfrastructureTier, InterventionCatalog, InterventionMix, InterventionType,
};
pub use nutrient::{default_synergy_pairs, NutrientPair};
pub use parameters::PlanParameters;
pub use region::{Region, SanitizedRegion};
