//! ReferenceData trait: where the intervention catalog and synergy table come from.
//!
//! The engine selects one provider at construction time. The static provider
//! returns the compiled defaults; `ReferenceSet` carries data loaded from a
//! TOML or JSON document supplied by the host application.

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::types::{default_synergy_pairs, InterventionCatalog, NutrientPair};

/// Provider of reference data for the engine.
///
/// Default implementations return the compiled defaults.
pub trait ReferenceData: Send + Sync {
    fn catalog(&self) -> InterventionCatalog {
        InterventionCatalog::static_defaults()
    }

    fn synergy_pairs(&self) -> Vec<NutrientPair> {
        default_synergy_pairs()
    }
}

/// Compiled defaults only.
pub struct StaticReferenceData;

impl ReferenceData for StaticReferenceData {}

/// Reference data loaded from a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceSet {
    pub catalog: InterventionCatalog,
    #[serde(default = "default_synergy_pairs")]
    pub synergy_pairs: Vec<NutrientPair>,
}

impl Default for ReferenceSet {
    fn default() -> Self {
        Self {
            catalog: InterventionCatalog::static_defaults(),
            synergy_pairs: default_synergy_pairs(),
        }
    }
}

impl ReferenceSet {
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let set: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<reference:toml>".to_string(),
            message: e.to_string(),
        })?;
        set.validate()?;
        Ok(set)
    }

    pub fn from_json(json_str: &str) -> Result<Self, ConfigError> {
        let set: Self = serde_json::from_str(json_str).map_err(|e| ConfigError::ParseError {
            path: "<reference:json>".to_string(),
            message: e.to_string(),
        })?;
        set.validate()?;
        Ok(set)
    }

    /// Reject entries no calculation could use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for item in self.catalog.iter() {
            if !item.unit_cost.is_finite() || item.unit_cost <= 0.0 {
                return Err(ConfigError::ValidationFailed {
                    field: format!("catalog.{}.unit_cost", item.id),
                    message: "must be a positive number".to_string(),
                });
            }
            if !(0.0..=1.0).contains(&item.effectiveness) {
                return Err(ConfigError::ValidationFailed {
                    field: format!("catalog.{}.effectiveness", item.id),
                    message: "must be between 0.0 and 1.0".to_string(),
                });
            }
        }
        for pair in &self.synergy_pairs {
            if !pair.multiplier.is_finite() || pair.multiplier <= 0.0 {
                return Err(ConfigError::ValidationFailed {
                    field: format!("synergy_pairs.{}-{}", pair.a, pair.b),
                    message: "multiplier must be a positive number".to_string(),
                });
            }
        }
        Ok(())
    }
}

impl ReferenceData for ReferenceSet {
    fn catalog(&self) -> InterventionCatalog {
        self.catalog.clone()
    }

    fn synergy_pairs(&self) -> Vec<NutrientPair> {
        self.synergy_pairs.clone()
    }
}
