//! Greedy per-region split of a regional budget across interventions.

use nutriplan_core::config::AllocationConfig;
use nutriplan_core::types::{InfrastructureTier, InterventionCatalog, SanitizedRegion};

use super::types::{InterventionAllocation, RegionAllocation};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GreedyParams {
    pub share: f64,
    pub critical_adequacy: f64,
    pub facilities_for_full_infrastructure: f64,
    pub min_infrastructure_score: f64,
}

impl GreedyParams {
    pub fn from_config(config: &AllocationConfig) -> Self {
        Self {
            share: config.effective_greedy_share(),
            critical_adequacy: config.effective_critical_adequacy(),
            facilities_for_full_infrastructure: config
                .effective_facilities_for_full_infrastructure(),
            min_infrastructure_score: config.effective_min_infrastructure_score(),
        }
    }
}

impl Default for GreedyParams {
    fn default() -> Self {
        Self::from_config(&AllocationConfig::default())
    }
}

/// Infrastructure readiness in [0, 1].
pub fn infrastructure_score(facility_count: u32, saturation: f64) -> f64 {
    (facility_count as f64 / saturation).min(1.0)
}

/// Walk the catalog in order, giving each eligible intervention a fixed
/// share of what remains. An intervention is eligible when it addresses a
/// critical nutrient and the region can support its infrastructure tier.
pub fn allocate_region(
    region: &SanitizedRegion,
    budget: f64,
    catalog: &InterventionCatalog,
    params: &GreedyParams,
) -> RegionAllocation {
    let critical: Vec<String> = region
        .nutrients_below(params.critical_adequacy)
        .into_iter()
        .map(str::to_string)
        .collect();
    let infra = infrastructure_score(
        region.region.facility_count,
        params.facilities_for_full_infrastructure,
    );

    let mut remaining = budget.max(0.0);
    let mut interventions = Vec::new();
    for intervention in catalog.iter() {
        if remaining <= 0.0 {
            break;
        }
        if !critical.iter().any(|n| intervention.addresses_nutrient(n)) {
            continue;
        }
        if intervention.infrastructure == InfrastructureTier::High
            && infra < params.min_infrastructure_score
        {
            continue;
        }
        let amount = (remaining * params.share).min(remaining);
        remaining -= amount;
        interventions.push(InterventionAllocation {
            intervention_id: intervention.id.clone(),
            amount,
        });
    }

    RegionAllocation {
        region_id: region.id().to_string(),
        budget,
        critical_nutrients: critical,
        infrastructure_score: infra,
        interventions,
        unallocated: remaining,
    }
}
