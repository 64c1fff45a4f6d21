//! Pair table with canonical unordered keys.

use std::collections::BTreeSet;

use nutriplan_core::types::{default_synergy_pairs, NutrientPair};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

pub const MIN_SYNERGY_FACTOR: f64 = 0.5;
pub const MAX_SYNERGY_FACTOR: f64 = 2.0;

/// One matched pair in a selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynergyContribution {
    pub a: String,
    pub b: String,
    pub multiplier: f64,
}

/// Lookup table keyed by the sorted nutrient pair.
#[derive(Debug, Clone, Default)]
pub struct SynergyTable {
    pairs: FxHashMap<(String, String), f64>,
}

impl SynergyTable {
    /// Build from reference pairs. A pair listed under both orderings keeps
    /// the first listing; self-pairs and non-finite multipliers are dropped.
    pub fn from_pairs(pairs: &[NutrientPair]) -> Self {
        let mut table = FxHashMap::default();
        for pair in pairs {
            if pair.a == pair.b || !pair.multiplier.is_finite() || pair.multiplier <= 0.0 {
                continue;
            }
            table
                .entry(pair_key(&pair.a, &pair.b))
                .or_insert(pair.multiplier);
        }
        Self { pairs: table }
    }

    pub fn static_defaults() -> Self {
        Self::from_pairs(&default_synergy_pairs())
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn multiplier(&self, a: &str, b: &str) -> Option<f64> {
        self.pairs.get(&pair_key(a, b)).copied()
    }

    /// Combined factor for a nutrient selection, in [0.5, 2.0].
    /// Fewer than two distinct nutrients give 1.0.
    pub fn factor<S: AsRef<str>>(&self, selected: &[S]) -> f64 {
        let product: f64 = self
            .breakdown(selected)
            .iter()
            .map(|c| c.multiplier)
            .product();
        product.clamp(MIN_SYNERGY_FACTOR, MAX_SYNERGY_FACTOR)
    }

    /// Pairs of the selection present in the table, in name order.
    pub fn breakdown<S: AsRef<str>>(&self, selected: &[S]) -> Vec<SynergyContribution> {
        let distinct: Vec<&str> = selected
            .iter()
            .map(AsRef::as_ref)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut matched = Vec::new();
        for (i, a) in distinct.iter().enumerate() {
            for b in &distinct[i + 1..] {
                if let Some(multiplier) = self.multiplier(a, b) {
                    matched.push(SynergyContribution {
                        a: a.to_string(),
                        b: b.to_string(),
                        multiplier,
                    });
                }
            }
        }
        matched
    }

    /// Every nutrient that takes part in at least one pair.
    pub fn nutrients_with_synergies(&self) -> BTreeSet<&str> {
        self.pairs
            .keys()
            .flat_map(|(a, b)| [a.as_str(), b.as_str()])
            .collect()
    }
}

fn pair_key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}
