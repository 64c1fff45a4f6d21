//! Intervention catalog and portfolio mix.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::{FOLATE, IRON, MIX_SUM_TOLERANCE, VITAMIN_A, VITAMIN_B12, ZINC};
use crate::errors::ValidationError;

/// Infrastructure an intervention needs on the ground.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InfrastructureTier {
    Low,
    Medium,
    High,
}

impl InfrastructureTier {
    pub const ALL: &'static [InfrastructureTier] = &[Self::Low, Self::Medium, Self::High];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for InfrastructureTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// How an intervention reaches its beneficiaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryChannel {
    Supplementation,
    Fortification,
    Biofortification,
    Education,
    Mixed,
}

impl DeliveryChannel {
    pub const ALL: &'static [DeliveryChannel] = &[
        Self::Supplementation,
        Self::Fortification,
        Self::Biofortification,
        Self::Education,
        Self::Mixed,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Supplementation => "supplementation",
            Self::Fortification => "fortification",
            Self::Biofortification => "biofortification",
            Self::Education => "education",
            Self::Mixed => "mixed",
        }
    }

    /// Multiplier applied to baseline coverage for this channel.
    pub fn coverage_factor(&self) -> f64 {
        match self {
            Self::Supplementation => 1.2,
            Self::Fortification => 0.9,
            Self::Education => 0.8,
            Self::Biofortification | Self::Mixed => 1.0,
        }
    }
}

impl std::fmt::Display for DeliveryChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One deliverable intervention and its unit economics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterventionType {
    pub id: String,
    /// Cost per person reached.
    pub unit_cost: f64,
    /// Baseline effectiveness (0.0-1.0).
    pub effectiveness: f64,
    pub infrastructure: InfrastructureTier,
    /// Months before the intervention reaches its population.
    pub reach_months: u32,
    pub channel: DeliveryChannel,
    /// Nutrients addressed. Empty means every nutrient.
    #[serde(default)]
    pub addresses: Vec<String>,
}

impl InterventionType {
    pub fn addresses_nutrient(&self, nutrient: &str) -> bool {
        self.addresses.is_empty() || self.addresses.iter().any(|n| n == nutrient)
    }
}

/// Ordered list of interventions. Order is significant to the greedy allocator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterventionCatalog {
    pub interventions: Vec<InterventionType>,
}

impl Default for InterventionCatalog {
    fn default() -> Self {
        Self::static_defaults()
    }
}

impl InterventionCatalog {
    pub fn new(interventions: Vec<InterventionType>) -> Self {
        Self { interventions }
    }

    /// Field-program costs per person reached.
    pub fn static_defaults() -> Self {
        let nutrients = |list: &[&str]| list.iter().map(|n| n.to_string()).collect::<Vec<_>>();
        Self::new(vec![
            InterventionType {
                id: "fortification".to_string(),
                unit_cost: 55_500.0,
                effectiveness: 0.61,
                infrastructure: InfrastructureTier::Low,
                reach_months: 6,
                channel: DeliveryChannel::Fortification,
                addresses: nutrients(&[IRON, ZINC, FOLATE, VITAMIN_B12]),
            },
            InterventionType {
                id: "supplementation".to_string(),
                unit_cost: 1_850.0,
                effectiveness: 0.73,
                infrastructure: InfrastructureTier::Medium,
                reach_months: 3,
                channel: DeliveryChannel::Supplementation,
                addresses: Vec::new(),
            },
            InterventionType {
                id: "biofortification".to_string(),
                unit_cost: 74_000.0,
                effectiveness: 0.65,
                infrastructure: InfrastructureTier::Low,
                reach_months: 24,
                channel: DeliveryChannel::Biofortification,
                addresses: nutrients(&[IRON, ZINC, VITAMIN_A]),
            },
            InterventionType {
                id: "education".to_string(),
                unit_cost: 29_600.0,
                effectiveness: 0.55,
                infrastructure: InfrastructureTier::High,
                reach_months: 12,
                channel: DeliveryChannel::Education,
                addresses: Vec::new(),
            },
        ])
    }

    pub fn get(&self, id: &str) -> Option<&InterventionType> {
        self.interventions.iter().find(|i| i.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InterventionType> {
        self.interventions.iter()
    }

    pub fn len(&self) -> usize {
        self.interventions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interventions.is_empty()
    }

    /// Lowest unit cost in the catalog, if any.
    pub fn cheapest_unit_cost(&self) -> Option<f64> {
        self.interventions
            .iter()
            .map(|i| i.unit_cost)
            .filter(|c| c.is_finite() && *c > 0.0)
            .fold(None, |acc, c| Some(acc.map_or(c, |a: f64| a.min(c))))
    }
}

/// Percentage share of the portfolio per intervention id.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InterventionMix {
    shares: BTreeMap<String, f64>,
}

impl InterventionMix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_share(mut self, id: impl Into<String>, percent: f64) -> Self {
        self.shares.insert(id.into(), percent);
        self
    }

    /// Share of `id` in percent, zero when absent.
    pub fn share(&self, id: &str) -> f64 {
        self.shares.get(id).copied().unwrap_or(0.0)
    }

    pub fn total(&self) -> f64 {
        self.shares.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.shares.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }

    /// Check the mix totals 100% and every id is in `catalog`.
    pub fn validate(&self, catalog: &InterventionCatalog) -> Result<(), ValidationError> {
        let total = self.total();
        // 1e-9 absorbs float noise when summing shares like 99.99.
        if !total.is_finite() || (total - 100.0).abs() > MIX_SUM_TOLERANCE + 1e-9 {
            return Err(ValidationError::MixSumInvalid { total });
        }
        for (id, share) in &self.shares {
            if catalog.get(id).is_none() {
                return Err(ValidationError::UnknownIntervention { id: id.clone() });
            }
            if !share.is_finite() || *share < 0.0 {
                return Err(ValidationError::invalid(
                    format!("mix.{id}"),
                    "share must be a non-negative percentage",
                ));
            }
        }
        Ok(())
    }
}

impl FromIterator<(String, f64)> for InterventionMix {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            shares: iter.into_iter().collect(),
        }
    }
}
