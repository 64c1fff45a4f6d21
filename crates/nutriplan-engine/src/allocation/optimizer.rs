//! AllocationOptimizer: strategy selection, greedy split, cross-region program.

use nutriplan_core::config::AllocationConfig;
use nutriplan_core::errors::AllocationError;
use nutriplan_core::types::{InterventionCatalog, InterventionType, SanitizedRegion};
use tracing::{debug, info, instrument};

use super::greedy::{allocate_region, GreedyParams};
use super::selection::select_regions;
use super::simplex::{Constraint, LinearProgram};
use super::types::{AllocationPlan, AllocationStrategy, CoverageAssignment, CrossRegionPlan};
use crate::risk::AssessedRegion;

/// Upper bound on any coverage variable, in percent.
const MAX_COVERAGE_PERCENT: f64 = 100.0;

#[derive(Debug, Clone, Default)]
pub struct AllocationOptimizer {
    config: AllocationConfig,
}

impl AllocationOptimizer {
    pub fn new(config: &AllocationConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Allocate `budget` to the regions `strategy` selects. Runs the
    /// cross-region program too when configured; its failures are fatal.
    #[instrument(skip(self, regions, catalog, strategy), fields(strategy = %strategy, region_count = regions.len()))]
    pub fn allocate(
        &self,
        budget: f64,
        regions: &[AssessedRegion],
        catalog: &InterventionCatalog,
        strategy: &AllocationStrategy,
    ) -> Result<AllocationPlan, AllocationError> {
        check_budget(budget)?;

        let selected = select_regions(regions, strategy, &self.config);
        if selected.is_empty() {
            return Err(AllocationError::NoEligibleRegions {
                strategy: strategy.name().to_string(),
            });
        }

        let budget_per_region = budget / selected.len() as f64;
        let params = GreedyParams::from_config(&self.config);
        let allocations: Vec<_> = selected
            .iter()
            .map(|r| allocate_region(&r.region, budget_per_region, catalog, &params))
            .collect();

        let total_allocated: f64 = allocations.iter().map(|a| a.allocated()).sum();
        let total_unallocated: f64 = allocations.iter().map(|a| a.unallocated).sum();

        let cross_region = if self.config.effective_cross_region() {
            let sanitized: Vec<&SanitizedRegion> = selected.iter().map(|r| &r.region).collect();
            Some(self.optimize_cross_region(budget, &sanitized, catalog)?)
        } else {
            None
        };

        info!(
            selected = selected.len(),
            total_allocated, total_unallocated, "allocated budget"
        );
        Ok(AllocationPlan {
            strategy: strategy.clone(),
            budget,
            budget_per_region,
            regions: allocations,
            total_allocated,
            total_unallocated,
            cross_region,
        })
    }

    /// Spread the whole budget across regions and interventions to maximize
    /// population-weighted improvement.
    pub fn optimize_cross_region(
        &self,
        budget: f64,
        regions: &[&SanitizedRegion],
        catalog: &InterventionCatalog,
    ) -> Result<CrossRegionPlan, AllocationError> {
        check_budget(budget)?;
        if regions.is_empty() || catalog.is_empty() {
            return Err(AllocationError::NoEligibleRegions {
                strategy: "cross_region".to_string(),
            });
        }

        let pairs: Vec<(&SanitizedRegion, &InterventionType)> = regions
            .iter()
            .flat_map(|r| catalog.iter().map(move |i| (*r, i)))
            .collect();

        let gains: Vec<f64> = pairs
            .iter()
            .map(|(r, i)| r.region.population as f64 * i.effectiveness * deficit(r, i))
            .collect();
        let costs: Vec<f64> = pairs
            .iter()
            .map(|(r, i)| i.unit_cost * r.region.population as f64 / MAX_COVERAGE_PERCENT)
            .collect();

        // Scale rows to keep pivots well conditioned.
        let gain_scale = gains.iter().copied().fold(0.0, f64::max).max(1.0);
        let budget_scale = budget.max(1.0);
        let objective: Vec<f64> = gains.iter().map(|g| g / gain_scale).collect();
        let spend_row: Vec<f64> = costs.iter().map(|c| c / budget_scale).collect();

        let mut program = LinearProgram::new(objective)
            .with_constraint(Constraint::less_eq(spend_row.clone(), budget / budget_scale))
            .with_upper_bounds(MAX_COVERAGE_PERCENT);
        let min_disbursement = self.config.effective_min_disbursement();
        if min_disbursement > 0.0 {
            program = program.with_constraint(Constraint::greater_eq(
                spend_row,
                min_disbursement * budget / budget_scale,
            ));
        }

        let solution = program.solve(self.config.effective_max_iterations())?;
        debug!(simplex_iterations = solution.iterations, "cross-region program solved");

        let mut assignments = Vec::new();
        let mut total_spend = 0.0;
        let mut improvement = 0.0;
        for (k, (region, intervention)) in pairs.iter().enumerate() {
            let percent = solution.values[k].min(MAX_COVERAGE_PERCENT);
            if percent <= 1e-9 {
                continue;
            }
            let spend = costs[k] * percent;
            total_spend += spend;
            improvement += gains[k] * percent;
            assignments.push(CoverageAssignment {
                region_id: region.id().to_string(),
                intervention_id: intervention.id.clone(),
                coverage_percent: percent,
                people: (region.region.population as f64 * percent / MAX_COVERAGE_PERCENT)
                    .floor() as u64,
                spend,
            });
        }

        Ok(CrossRegionPlan {
            assignments,
            total_spend,
            improvement,
            iterations: solution.iterations,
        })
    }
}

/// Mean shortfall from full adequacy over the nutrients an intervention addresses.
fn deficit(region: &SanitizedRegion, intervention: &InterventionType) -> f64 {
    let shortfalls: Vec<f64> = region
        .adequacy
        .iter()
        .filter(|(n, _)| intervention.addresses_nutrient(n))
        .map(|(_, v)| 100.0 - v)
        .collect();
    if shortfalls.is_empty() {
        0.0
    } else {
        shortfalls.iter().sum::<f64>() / shortfalls.len() as f64
    }
}

fn check_budget(budget: f64) -> Result<(), AllocationError> {
    if !budget.is_finite() {
        return Err(AllocationError::NonFiniteInput {
            context: "budget".to_string(),
        });
    }
    if budget < 0.0 {
        return Err(AllocationError::Infeasible {
            reason: "budget is negative".to_string(),
        });
    }
    Ok(())
}
