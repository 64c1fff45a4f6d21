//! Region records as consumed by the engine.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_MISSING_ADEQUACY, DEFAULT_REGION_AREA_KM2};

/// A geographic unit with population, deficiency, and infrastructure data.
///
/// Adequacy values are percent of recommended intake as supplied by the data
/// source: unbounded, possibly negative, possibly missing (`None`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub id: String,
    pub population: u64,
    pub under5_population: u64,
    #[serde(default)]
    pub nutrient_adequacy: BTreeMap<String, Option<f64>>,
    pub facility_count: u32,
    pub rural_fraction: f64,
    pub poverty_rate: f64,
    #[serde(default)]
    pub area_km2: Option<f64>,
    #[serde(default)]
    pub road_km: Option<f64>,
}

impl Region {
    /// Create a region with no adequacy data and no facilities.
    pub fn new(id: impl Into<String>, population: u64, under5_population: u64) -> Self {
        Self {
            id: id.into(),
            population,
            under5_population,
            nutrient_adequacy: BTreeMap::new(),
            facility_count: 0,
            rural_fraction: 0.0,
            poverty_rate: 0.0,
            area_km2: None,
            road_km: None,
        }
    }

    pub fn with_adequacy(mut self, nutrient: impl Into<String>, value: Option<f64>) -> Self {
        self.nutrient_adequacy.insert(nutrient.into(), value);
        self
    }

    pub fn with_facilities(mut self, count: u32) -> Self {
        self.facility_count = count;
        self
    }

    pub fn with_rural_fraction(mut self, fraction: f64) -> Self {
        self.rural_fraction = fraction;
        self
    }

    pub fn with_poverty_rate(mut self, rate: f64) -> Self {
        self.poverty_rate = rate;
        self
    }

    pub fn with_area(mut self, area_km2: f64) -> Self {
        self.area_km2 = Some(area_km2);
        self
    }

    pub fn with_roads(mut self, road_km: f64) -> Self {
        self.road_km = Some(road_km);
        self
    }

    /// Health facilities per 10,000 inhabitants. Zero for an empty region.
    pub fn facilities_per_10k(&self) -> f64 {
        if self.population == 0 {
            return 0.0;
        }
        self.facility_count as f64 / (self.population as f64 / 10_000.0)
    }

    pub fn under5_proportion(&self) -> f64 {
        if self.population == 0 {
            return 0.0;
        }
        self.under5_population as f64 / self.population as f64
    }

    /// Inhabitants per km², using the default area when none is recorded.
    pub fn population_density(&self) -> f64 {
        self.population as f64 / self.effective_area()
    }

    /// Road km per km² of area, if road data is known.
    pub fn road_density(&self) -> Option<f64> {
        self.road_km.map(|km| km / self.effective_area())
    }

    /// A region counts as urban when less than half of it is rural.
    pub fn is_urban(&self) -> bool {
        self.rural_fraction < 0.5
    }

    fn effective_area(&self) -> f64 {
        match self.area_km2 {
            Some(area) if area.is_finite() && area > 0.0 => area,
            _ => DEFAULT_REGION_AREA_KM2,
        }
    }
}

/// A region whose adequacy map has been cleaned: every value lies in
/// [0, 100] and every nutrient column of the dataset is present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SanitizedRegion {
    pub region: Region,
    pub adequacy: BTreeMap<String, f64>,
}

impl SanitizedRegion {
    pub fn id(&self) -> &str {
        &self.region.id
    }

    /// Mean adequacy. A region without any adequacy data counts as
    /// `DEFAULT_MISSING_ADEQUACY`, not as fully deficient.
    pub fn average_adequacy(&self) -> f64 {
        if self.adequacy.is_empty() {
            return DEFAULT_MISSING_ADEQUACY;
        }
        self.adequacy.values().sum::<f64>() / self.adequacy.len() as f64
    }

    pub fn min_adequacy(&self) -> f64 {
        if self.adequacy.is_empty() {
            return DEFAULT_MISSING_ADEQUACY;
        }
        self.adequacy
            .values()
            .copied()
            .fold(f64::INFINITY, f64::min)
            .min(100.0)
    }

    pub fn has_adequacy_data(&self) -> bool {
        !self.adequacy.is_empty()
    }

    /// Number of nutrients strictly below `threshold`.
    pub fn count_below(&self, threshold: f64) -> usize {
        self.adequacy.values().filter(|v| **v < threshold).count()
    }

    /// Nutrients strictly below `threshold`, in name order.
    pub fn nutrients_below(&self, threshold: f64) -> Vec<&str> {
        self.adequacy
            .iter()
            .filter(|(_, v)| **v < threshold)
            .map(|(k, _)| k.as_str())
            .collect()
    }
}
