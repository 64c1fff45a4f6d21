//! Nutrient interaction reference data.

use serde::{Deserialize, Serialize};

use crate::constants::{
    CALCIUM, FOLATE, IRON, PROTEIN, VITAMIN_A, VITAMIN_B12, VITAMIN_C, ZINC,
};

/// Interaction multiplier for two nutrients delivered together.
/// Above 1.0 is synergistic, below 1.0 antagonistic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutrientPair {
    pub a: String,
    pub b: String,
    pub multiplier: f64,
}

impl NutrientPair {
    pub fn new(a: impl Into<String>, b: impl Into<String>, multiplier: f64) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
            multiplier,
        }
    }

    pub fn is_synergistic(&self) -> bool {
        self.multiplier > 1.0
    }
}

/// Published interaction multipliers used when no other table is supplied.
pub fn default_synergy_pairs() -> Vec<NutrientPair> {
    vec![
        NutrientPair::new(VITAMIN_B12, FOLATE, 1.4),
        NutrientPair::new(IRON, VITAMIN_C, 1.3),
        NutrientPair::new(CALCIUM, VITAMIN_A, 1.25),
        NutrientPair::new(ZINC, PROTEIN, 1.25),
        NutrientPair::new(VITAMIN_A, ZINC, 1.2),
        NutrientPair::new(IRON, FOLATE, 1.15),
        NutrientPair::new(VITAMIN_B12, IRON, 1.2),
        NutrientPair::new(VITAMIN_C, FOLATE, 1.15),
        NutrientPair::new(CALCIUM, ZINC, 0.85),
    ]
}
