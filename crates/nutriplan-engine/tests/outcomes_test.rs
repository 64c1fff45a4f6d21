//! Outcome simulation: budget limits, determinism, intervals.

use nutriplan_core::config::OutcomeConfig;
use nutriplan_core::types::{InterventionCatalog, PlanParameters};
use nutriplan_engine::outcomes::*;
use nutriplan_engine::synergy::SynergyTable;

fn simulator() -> OutcomeSimulator {
    OutcomeSimulator::new(
        &OutcomeConfig::default(),
        InterventionCatalog::static_defaults(),
        SynergyTable::static_defaults(),
    )
}

#[test]
fn test_default_portfolio_is_budget_limited() {
    let input = SimulationInput::from_parameters(&PlanParameters::default());
    let out = simulator().simulate(&input).unwrap();

    assert!((out.weighted_cost - 35_150.0).abs() < 1e-6);
    let expected = 5_000_000.0 / (35_150.0 * 1_000_000.0);
    assert!((out.actual_coverage - expected).abs() < 1e-12);
    assert!((out.actual_coverage - 0.000141).abs() < 2e-6);
    assert!(out.budget_limited);
    assert_eq!(out.requested_coverage, 0.8);
    assert_eq!(out.people_reached, 142);
}

#[test]
fn test_identical_inputs_give_identical_outputs() {
    let input = SimulationInput::from_parameters(
        &PlanParameters::default()
            .with_budget(900_000_000_000.0)
            .with_rural_fraction(0.75),
    );
    let sim = simulator();
    assert_eq!(sim.simulate(&input).unwrap(), sim.simulate(&input).unwrap());
}

#[test]
fn test_more_budget_never_lowers_coverage() {
    let sim = simulator();
    let params = PlanParameters::default();
    let mut last = 0.0;
    for budget in [1e5, 1e7, 1e9, 1e10, 1e11, 1e12] {
        let out = sim
            .simulate(&SimulationInput::from_parameters(&params.clone().with_budget(budget)))
            .unwrap();
        assert!(out.actual_coverage >= last);
        last = out.actual_coverage;
    }
    assert_eq!(last, 0.8);
}

#[test]
fn test_fully_funded_outcomes_follow_formulas() {
    let params = PlanParameters::default().with_budget(1e12);
    let out = simulator()
        .simulate(&SimulationInput::from_parameters(&params))
        .unwrap();
    assert!(!out.budget_limited);

    let eff = out.weighted_effectiveness * out.synergy_factor;
    assert!((out.effectiveness - eff).abs() < 1e-12);
    let u5 = 150_000.0;
    let lives = (0.8 * u5 * 0.043 * (eff * 0.20).min(0.25)).floor();
    let stunting = (0.8 * u5 * 0.29 * (eff * 0.25).min(0.30)).floor();
    let anemia = (0.8 * u5 * 0.28 * (eff * 0.35).min(0.40)).floor();
    assert_eq!(out.lives_saved.value, lives);
    assert_eq!(out.stunting_prevented.value, stunting);
    assert_eq!(out.anemia_reduced.value, anemia);
    assert!((out.dalys_averted.value - (lives * 33.0 + stunting * 4.6 + anemia * 0.8)).abs() < 1e-6);
    assert_eq!(out.under5_population, 150_000);
}

#[test]
fn test_intervals_widen_with_confidence() {
    let sim = simulator();
    let base = PlanParameters::default().with_budget(1e12);
    let narrow = sim
        .simulate(&SimulationInput::from_parameters(&base.clone().with_confidence_level(80.0)))
        .unwrap();
    let wide = sim
        .simulate(&SimulationInput::from_parameters(&base.with_confidence_level(99.0)))
        .unwrap();
    assert_eq!(narrow.lives_saved.value, wide.lives_saved.value);
    assert!(wide.lives_saved.upper > narrow.lives_saved.upper);
    assert!(wide.lives_saved.lower <= narrow.lives_saved.lower);
    for e in [wide.lives_saved, wide.dalys_averted, wide.economic_benefit] {
        assert!(e.lower >= 0.0 && e.contains(e.value));
    }
}

#[test]
fn test_budget_sweep_finds_target_budget() {
    let sim = simulator();
    let params = PlanParameters::default()
        .with_population(10_000)
        .with_coverage_target(0.5);
    let input = SimulationInput::from_parameters(&params);
    let sweep = BudgetSweep::run(&sim, &input, 0.0, 400_000_000.0, 9).unwrap();
    // 5,000 people at 35,150 each needs 175.75M; the grid steps by 50M.
    assert_eq!(sweep.minimum_budget_for_target, Some(200_000_000.0));
    assert!(sweep.best_value.is_some());
}
