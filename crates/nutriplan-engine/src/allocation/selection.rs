//! Region selection per strategy.

use std::cmp::Ordering;

use nutriplan_core::config::AllocationConfig;
use rustc_hash::FxHashSet;

use super::types::AllocationStrategy;
use crate::risk::AssessedRegion;

/// Regions a strategy funds, in funding priority order.
pub fn select_regions<'a>(
    regions: &'a [AssessedRegion],
    strategy: &AllocationStrategy,
    config: &AllocationConfig,
) -> Vec<&'a AssessedRegion> {
    match strategy {
        AllocationStrategy::Emergency => {
            let mut ranked: Vec<&AssessedRegion> = regions.iter().collect();
            ranked.sort_by(|a, b| descending(a.assessment.score, b.assessment.score, a, b));
            ranked.truncate(config.effective_emergency_top_n());
            ranked
        }
        AllocationStrategy::Prevention => {
            let (lower, upper) = config.effective_prevention_band();
            regions
                .iter()
                .filter(|r| {
                    let avg = r.region.average_adequacy();
                    avg > lower && avg < upper
                })
                .collect()
        }
        AllocationStrategy::Balanced => {
            let mut ranked: Vec<&AssessedRegion> = regions.iter().collect();
            ranked.sort_by(|a, b| descending(balanced_weight(a), balanced_weight(b), a, b));
            ranked.truncate(config.effective_balanced_top_k());
            ranked
        }
        AllocationStrategy::Custom(ids) => {
            // First mention wins; repeated ids would fund a region twice.
            let mut seen = FxHashSet::default();
            ids.iter()
                .filter(|id| seen.insert(id.as_str()))
                .filter_map(|id| regions.iter().find(|r| r.region.id() == id))
                .collect()
        }
    }
}

/// Risk score scaled by population in millions.
fn balanced_weight(region: &AssessedRegion) -> f64 {
    region.assessment.score * region.region.region.population as f64 / 1e6
}

fn descending(x: f64, y: f64, a: &AssessedRegion, b: &AssessedRegion) -> Ordering {
    y.partial_cmp(&x)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.region.id().cmp(b.region.id()))
}
