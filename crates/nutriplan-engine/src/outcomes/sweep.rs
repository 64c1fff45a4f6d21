//! Budget sweeps: how outcomes respond across a linear range of budgets,
//! and which budget a set of weighted criteria recommends.

use std::cmp::Ordering;

use nutriplan_core::config::OutcomeConfig;
use nutriplan_core::errors::ValidationError;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::simulator::OutcomeSimulator;
use super::types::SimulationInput;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    pub budget: f64,
    pub actual_coverage: f64,
    pub budget_limited: bool,
    pub lives_saved: f64,
    pub dalys_averted: f64,
    pub economic_benefit: f64,
    /// Economic benefit per unit of budget; zero at a zero budget.
    pub benefit_per_budget: f64,
    /// Extra benefit per extra unit of budget since the previous point.
    /// Zero at the first point.
    pub marginal_benefit: f64,
    /// `(benefit - budget) / budget * 100`; zero at a zero budget.
    pub roi_percent: f64,
    /// `roi_percent * actual_coverage`.
    pub efficiency_score: f64,
    /// `None` when no life is saved.
    pub cost_per_life: Option<f64>,
}

/// Thresholds and weights for choosing a budget from a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetCriteria {
    pub marginal_benefit_threshold: f64,
    pub max_cost_per_life: f64,
    /// (efficiency, marginal, cost-effectiveness, coverage).
    pub weights: [f64; 4],
    pub annual_capacity: Option<f64>,
}

impl BudgetCriteria {
    pub fn from_config(config: &OutcomeConfig) -> Self {
        Self {
            marginal_benefit_threshold: config.effective_marginal_benefit_threshold(),
            max_cost_per_life: config.effective_max_cost_per_life(),
            weights: config.effective_budget_criteria_weights(),
            annual_capacity: config.annual_capacity,
        }
    }
}

impl Default for BudgetCriteria {
    fn default() -> Self {
        Self::from_config(&OutcomeConfig::default())
    }
}

/// Budgets picked by each criterion and their weighted combination.
/// A criterion with no qualifying point takes the efficiency budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetRecommendation {
    /// Highest efficiency score.
    pub efficiency_budget: f64,
    /// Last budget whose marginal benefit meets the threshold.
    pub marginal_budget: f64,
    /// Last budget within the cost-per-life ceiling.
    pub cost_effective_budget: f64,
    /// First budget that buys the requested coverage.
    pub coverage_budget: f64,
    pub weighted_budget: f64,
    /// Swept point closest to `weighted_budget`.
    pub recommended: SweepPoint,
    /// Swept point closest to capacity, when `recommended` exceeds it.
    pub capacity_constrained: Option<SweepPoint>,
}

impl BudgetRecommendation {
    /// `None` when no swept budget is positive.
    pub fn from_points(points: &[SweepPoint], criteria: &BudgetCriteria) -> Option<Self> {
        let funded: Vec<&SweepPoint> = points.iter().filter(|p| p.budget > 0.0).collect();
        let efficiency = funded
            .iter()
            .copied()
            .max_by(|a, b| cmp_f64(a.efficiency_score, b.efficiency_score))?;

        let marginal = funded
            .iter()
            .rev()
            .find(|p| p.marginal_benefit >= criteria.marginal_benefit_threshold)
            .unwrap_or(&efficiency);
        let cost_effective = funded
            .iter()
            .rev()
            .find(|p| p.cost_per_life.is_some_and(|c| c <= criteria.max_cost_per_life))
            .unwrap_or(&efficiency);
        let coverage = funded
            .iter()
            .find(|p| !p.budget_limited)
            .unwrap_or(&efficiency);

        let budgets = [
            efficiency.budget,
            marginal.budget,
            cost_effective.budget,
            coverage.budget,
        ];
        let weight_sum: f64 = criteria.weights.iter().sum();
        let weighted_budget = if weight_sum > 0.0 {
            budgets
                .iter()
                .zip(&criteria.weights)
                .map(|(b, w)| b * w)
                .sum::<f64>()
                / weight_sum
        } else {
            efficiency.budget
        };

        let recommended = *closest(points, weighted_budget)?;
        let capacity_constrained = criteria
            .annual_capacity
            .filter(|cap| recommended.budget > *cap)
            .and_then(|cap| closest(points, cap).copied());

        debug!(
            efficiency = efficiency.budget,
            marginal = marginal.budget,
            cost_effective = cost_effective.budget,
            coverage = coverage.budget,
            weighted_budget,
            "budget criteria"
        );

        Some(Self {
            efficiency_budget: efficiency.budget,
            marginal_budget: marginal.budget,
            cost_effective_budget: cost_effective.budget,
            coverage_budget: coverage.budget,
            weighted_budget,
            recommended,
            capacity_constrained,
        })
    }
}

fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// First point with the smallest distance to `target`.
fn closest(points: &[SweepPoint], target: f64) -> Option<&SweepPoint> {
    points.iter().reduce(|best, p| {
        if (p.budget - target).abs() < (best.budget - target).abs() {
            p
        } else {
            best
        }
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetSweep {
    pub points: Vec<SweepPoint>,
    /// Smallest swept budget that buys the requested coverage.
    pub minimum_budget_for_target: Option<f64>,
    /// Point with the highest benefit per unit of budget.
    pub best_value: Option<SweepPoint>,
    /// Weighted choice under the simulator's configured criteria.
    pub recommendation: Option<BudgetRecommendation>,
}

impl BudgetSweep {
    /// Simulate `steps` evenly spaced budgets from `min_budget` to
    /// `max_budget` inclusive.
    pub fn run(
        simulator: &OutcomeSimulator,
        input: &SimulationInput,
        min_budget: f64,
        max_budget: f64,
        steps: usize,
    ) -> Result<Self, ValidationError> {
        if steps < 2 {
            return Err(ValidationError::invalid("steps", "a sweep needs at least 2 points"));
        }
        if !(min_budget.is_finite() && max_budget.is_finite())
            || min_budget < 0.0
            || max_budget < min_budget
        {
            return Err(ValidationError::invalid(
                "budget_range",
                "must be finite, non-negative, and ordered",
            ));
        }

        let step = (max_budget - min_budget) / (steps - 1) as f64;
        let mut points: Vec<SweepPoint> = Vec::with_capacity(steps);
        for k in 0..steps {
            let budget = if k == steps - 1 {
                max_budget
            } else {
                min_budget + step * k as f64
            };
            let out = simulator.simulate(&input.clone().with_budget(budget))?;
            let benefit = out.economic_benefit.value;
            let lives = out.lives_saved.value;
            let marginal_benefit = match points.last() {
                Some(prev) if budget > prev.budget => {
                    (benefit - prev.economic_benefit) / (budget - prev.budget)
                }
                _ => 0.0,
            };
            let roi_percent = if budget > 0.0 {
                (benefit - budget) / budget * 100.0
            } else {
                0.0
            };
            points.push(SweepPoint {
                budget,
                actual_coverage: out.actual_coverage,
                budget_limited: out.budget_limited,
                lives_saved: lives,
                dalys_averted: out.dalys_averted.value,
                economic_benefit: benefit,
                benefit_per_budget: if budget > 0.0 { benefit / budget } else { 0.0 },
                marginal_benefit,
                roi_percent,
                efficiency_score: roi_percent * out.actual_coverage,
                cost_per_life: (lives > 0.0).then(|| budget / lives),
            });
        }

        let minimum_budget_for_target = points.iter().find(|p| !p.budget_limited).map(|p| p.budget);
        let best_value = points
            .iter()
            .filter(|p| p.budget > 0.0)
            .max_by(|a, b| {
                cmp_f64(a.benefit_per_budget, b.benefit_per_budget)
                    .then_with(|| cmp_f64(b.budget, a.budget))
            })
            .copied();

        let criteria = BudgetCriteria::from_config(simulator.config());
        let recommendation = BudgetRecommendation::from_points(&points, &criteria);
        if let Some(rec) = &recommendation {
            info!(
                recommended_budget = rec.recommended.budget,
                weighted_budget = rec.weighted_budget,
                capacity_constrained = rec.capacity_constrained.is_some(),
                "budget sweep recommendation"
            );
        }

        Ok(Self {
            points,
            minimum_budget_for_target,
            best_value,
            recommendation,
        })
    }
}

#[cfg(test)]
mod tests {
    use nutriplan_core::config::OutcomeConfig;
    use nutriplan_core::types::{InterventionCatalog, PlanParameters};

    use super::*;
    use crate::synergy::SynergyTable;

    fn setup() -> (OutcomeSimulator, SimulationInput) {
        let sim = OutcomeSimulator::new(
            &OutcomeConfig::default(),
            InterventionCatalog::static_defaults(),
            SynergyTable::static_defaults(),
        );
        let params = PlanParameters::default().with_population(1_000).with_coverage_target(0.5);
        (sim, SimulationInput::from_parameters(&params))
    }

    #[test]
    fn test_sweep_endpoints_and_length() {
        let (sim, input) = setup();
        let sweep = BudgetSweep::run(&sim, &input, 0.0, 40_000_000.0, 5).unwrap();
        assert_eq!(sweep.points.len(), 5);
        assert_eq!(sweep.points[0].budget, 0.0);
        assert_eq!(sweep.points[4].budget, 40_000_000.0);
    }

    #[test]
    fn test_finds_minimum_budget_reaching_target() {
        let (sim, input) = setup();
        // 500 people at 35150 each.
        let sweep = BudgetSweep::run(&sim, &input, 0.0, 40_000_000.0, 5).unwrap();
        assert_eq!(sweep.minimum_budget_for_target, Some(20_000_000.0));
    }

    #[test]
    fn test_coverage_never_decreases_along_the_sweep() {
        let (sim, input) = setup();
        let sweep = BudgetSweep::run(&sim, &input, 0.0, 30_000_000.0, 7).unwrap();
        for w in sweep.points.windows(2) {
            assert!(w[1].actual_coverage >= w[0].actual_coverage);
        }
    }

    fn point(budget: f64, coverage: f64, benefit: f64, lives: f64, marginal: f64) -> SweepPoint {
        let roi_percent = (benefit - budget) / budget * 100.0;
        SweepPoint {
            budget,
            actual_coverage: coverage,
            budget_limited: coverage < 0.8,
            lives_saved: lives,
            dalys_averted: 0.0,
            economic_benefit: benefit,
            benefit_per_budget: benefit / budget,
            marginal_benefit: marginal,
            roi_percent,
            efficiency_score: roi_percent * coverage,
            cost_per_life: (lives > 0.0).then(|| budget / lives),
        }
    }

    fn curve() -> Vec<SweepPoint> {
        vec![
            // roi 200%, efficiency 40
            point(100.0, 0.2, 300.0, 1.0, 3.0),
            // roi 150%, efficiency 75
            point(200.0, 0.5, 500.0, 1.5, 2.0),
            // roi 100%, efficiency 80
            point(400.0, 0.8, 800.0, 2.0, 1.5),
            // roi 20%, efficiency 18
            point(800.0, 0.9, 960.0, 2.1, 0.4),
        ]
    }

    #[test]
    fn test_each_criterion_picks_its_budget() {
        let criteria = BudgetCriteria {
            max_cost_per_life: 150.0,
            ..BudgetCriteria::default()
        };
        let rec = BudgetRecommendation::from_points(&curve(), &criteria).unwrap();
        assert_eq!(rec.efficiency_budget, 400.0);
        assert_eq!(rec.marginal_budget, 400.0);
        assert_eq!(rec.cost_effective_budget, 200.0);
        assert_eq!(rec.coverage_budget, 400.0);
        // 0.3 * 400 + 0.3 * 400 + 0.2 * 200 + 0.2 * 400
        assert!((rec.weighted_budget - 360.0).abs() < 1e-9);
        assert_eq!(rec.recommended.budget, 400.0);
        assert!(rec.capacity_constrained.is_none());
    }

    #[test]
    fn test_unmet_criteria_take_the_efficiency_budget() {
        let criteria = BudgetCriteria {
            marginal_benefit_threshold: 10.0,
            max_cost_per_life: 1.0,
            ..BudgetCriteria::default()
        };
        let points: Vec<SweepPoint> = curve()
            .into_iter()
            .map(|p| SweepPoint {
                budget_limited: true,
                ..p
            })
            .collect();
        let rec = BudgetRecommendation::from_points(&points, &criteria).unwrap();
        assert_eq!(rec.marginal_budget, rec.efficiency_budget);
        assert_eq!(rec.cost_effective_budget, rec.efficiency_budget);
        assert_eq!(rec.coverage_budget, rec.efficiency_budget);
        assert_eq!(rec.recommended.budget, 400.0);
    }

    #[test]
    fn test_capacity_limits_the_recommendation() {
        let criteria = BudgetCriteria {
            annual_capacity: Some(250.0),
            ..BudgetCriteria::default()
        };
        let rec = BudgetRecommendation::from_points(&curve(), &criteria).unwrap();
        assert_eq!(rec.recommended.budget, 400.0);
        assert_eq!(rec.capacity_constrained.map(|p| p.budget), Some(200.0));
    }

    #[test]
    fn test_zero_budget_points_give_no_recommendation() {
        let zero = SweepPoint {
            budget: 0.0,
            ..curve()[0]
        };
        assert!(BudgetRecommendation::from_points(&[zero], &BudgetCriteria::default()).is_none());
    }

    #[test]
    fn test_sweep_points_carry_marginal_benefit() {
        let (sim, input) = setup();
        let sweep = BudgetSweep::run(&sim, &input, 0.0, 40_000_000.0, 5).unwrap();
        assert_eq!(sweep.points[0].marginal_benefit, 0.0);
        assert_eq!(sweep.points[0].roi_percent, 0.0);
        for w in sweep.points.windows(2) {
            let expected = (w[1].economic_benefit - w[0].economic_benefit)
                / (w[1].budget - w[0].budget);
            assert!((w[1].marginal_benefit - expected).abs() < 1e-9);
        }
        let rec = sweep.recommendation.unwrap();
        assert!(sweep.points.contains(&rec.recommended));
        assert!(rec.recommended.budget > 0.0);
    }

    #[test]
    fn test_rejects_degenerate_ranges() {
        let (sim, input) = setup();
        assert!(BudgetSweep::run(&sim, &input, 0.0, 1.0, 1).is_err());
        assert!(BudgetSweep::run(&sim, &input, 10.0, 1.0, 3).is_err());
        assert!(BudgetSweep::run(&sim, &input, f64::NAN, 1.0, 3).is_err());
    }
}
