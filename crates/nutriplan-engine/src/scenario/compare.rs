//! Baseline-versus-scenario comparison.

use super::types::{Insight, ScenarioSnapshot};

/// Floor for the health delta when pricing an impact point.
const MIN_IMPACT_DIVISOR: f64 = 0.1;

/// Compare `scenario` against `baseline`. Always yields the health and cost
/// findings, in that order, followed by coverage and ROI findings when they
/// improved.
pub fn compare(baseline: &ScenarioSnapshot, scenario: &ScenarioSnapshot) -> Vec<Insight> {
    let mut insights = Vec::with_capacity(4);

    let health_delta = scenario.health_impact() - baseline.health_impact();
    insights.push(Insight::HealthImpactChange {
        delta: health_delta,
    });

    let cost_delta = scenario.total_cost() - baseline.total_cost();
    if cost_delta > 0.0 {
        insights.push(Insight::AdditionalInvestment {
            amount: cost_delta,
            cost_per_impact_point: cost_delta / health_delta.max(MIN_IMPACT_DIVISOR),
        });
    } else {
        insights.push(Insight::CostSavings {
            amount: cost_delta.abs(),
        });
    }

    let coverage_delta = scenario.coverage() - baseline.coverage();
    if coverage_delta > 0.0 {
        let children = scenario.outcome.under5_population as f64;
        insights.push(Insight::CoverageIncrease {
            people: (coverage_delta * children).floor() as u64,
        });
    }

    let (base_roi, new_roi) = (baseline.roi(), scenario.roi());
    if new_roi > base_roi && base_roi > 0.0 {
        insights.push(Insight::RoiImprovement {
            relative: new_roi / base_roi - 1.0,
        });
    }

    insights
}
