//! The planning engine wired end to end.

use std::sync::Arc;

use nutriplan_core::config::EngineConfig;
use nutriplan_core::errors::{EngineError, NutriplanErrorCode, ValidationError};
use nutriplan_core::tracing::init_tracing_with;
use nutriplan_core::traits::ReferenceSet;
use nutriplan_core::types::{DeliveryChannel, InterventionMix, PlanParameters, Region};
use nutriplan_engine::allocation::AllocationStrategy;
use nutriplan_engine::coverage::CoverageEstimator;
use nutriplan_engine::gaps::GapMode;
use nutriplan_engine::planner::PlanningEngine;
use nutriplan_engine::risk::RiskScorer;
use nutriplan_engine::validation::ValidationWarning;

#[test]
fn test_evaluate_default_plan() {
    init_tracing_with("nutriplan_engine=debug");
    let engine = PlanningEngine::with_config(EngineConfig::default());
    let eval = engine.evaluate(&PlanParameters::default()).unwrap();
    assert!(eval.outcome.budget_limited);
    assert_eq!(eval.financial.horizon_years, 5);
    assert!(eval
        .report
        .warnings
        .iter()
        .any(|w| matches!(w, ValidationWarning::TargetUnaffordable { .. })));
}

#[test]
fn test_invalid_mix_aborts_evaluation() {
    let engine = PlanningEngine::with_config(EngineConfig::default());
    let params = PlanParameters::default()
        .with_mix(InterventionMix::new().with_share("supplementation", 90.0));
    let err = engine.evaluate(&params).unwrap_err();
    assert!(matches!(
        err,
        EngineError::Validation(ValidationError::MixSumInvalid { .. })
    ));
    assert_eq!(err.error_code(), "MIX_INVALID");
}

#[test]
fn test_budget_floor_follows_config() {
    let config = EngineConfig::from_toml("[validation]\nbudget_floor = 10000000.0\n").unwrap();
    let engine = PlanningEngine::with_config(config);
    let err = engine.evaluate(&PlanParameters::default()).unwrap_err();
    assert!(matches!(
        err,
        EngineError::Validation(ValidationError::BudgetBelowFloor { .. })
    ));
}

#[test]
fn test_custom_reference_data_changes_costs() {
    let json = r#"{
        "catalog": { "interventions": [
            { "id": "supplementation", "unit_cost": 10.0, "effectiveness": 0.7,
              "infrastructure": "medium", "reach_months": 3, "channel": "supplementation" }
        ] },
        "synergy_pairs": []
    }"#;
    let reference = ReferenceSet::from_json(json).unwrap();
    let config = EngineConfig::default();
    let engine = PlanningEngine::new(
        config.clone(),
        Arc::new(reference),
        RiskScorer::new(&config.risk),
        CoverageEstimator::new(&config.coverage),
    );
    let params = PlanParameters::default()
        .with_mix(InterventionMix::new().with_share("supplementation", 100.0));
    let eval = engine.evaluate(&params).unwrap();
    assert_eq!(eval.outcome.weighted_cost, 10.0);
    assert_eq!(eval.outcome.synergy_factor, 1.0);
    // 5M buys half of 1M people at 10 each.
    assert_eq!(eval.outcome.actual_coverage, 0.5);
    assert!(eval.outcome.budget_limited);
}

#[test]
fn test_allocate_carries_data_quality_issues() {
    let engine = PlanningEngine::with_config(EngineConfig::default());
    let regions = [
        Region::new("a", 80_000, 12_000)
            .with_adequacy("iron", Some(2500.0))
            .with_adequacy("zinc", Some(20.0)),
        Region::new("b", 60_000, 9_000)
            .with_adequacy("iron", Some(15.0))
            .with_adequacy("zinc", None),
    ];
    let checked = engine
        .allocate(1_000_000.0, &regions, &AllocationStrategy::Emergency)
        .unwrap();
    assert_eq!(checked.issue_count(), 2);
    assert_eq!(checked.data.regions.len(), 2);
}

#[test]
fn test_estimate_coverage_through_engine() {
    let engine = PlanningEngine::with_config(EngineConfig::default());
    let region = Region::new("gulu", 300_000, 45_000)
        .with_facilities(30)
        .with_rural_fraction(0.6);
    let est = engine.estimate_coverage(&region, DeliveryChannel::Fortification, Some(20.0));
    assert!(est.coverage > 0.0 && est.coverage <= est.cap);
    assert_eq!(est.target_population, 300_000);
}

#[test]
fn test_forecast_region_combines_components() {
    let engine = PlanningEngine::with_config(EngineConfig::default());
    let region = Region::new("gulu", 200_000, 30_000)
        .with_facilities(40)
        .with_rural_fraction(0.6)
        .with_poverty_rate(0.35)
        .with_adequacy("iron", Some(4_000.0))
        .with_adequacy("zinc", Some(60.0));
    let params = PlanParameters::default().with_nutrients(["iron", "zinc", "folate"]);

    let forecast = engine
        .forecast_region(&region, &params, DeliveryChannel::Fortification)
        .unwrap();
    // The unit-entry correction on iron travels with the result.
    assert_eq!(forecast.issues.len(), 1);

    let f = forecast.data;
    assert_eq!(f.region_id, "gulu");
    let gaps: Vec<(&str, f64)> = f
        .nutrient_gaps
        .iter()
        .map(|g| (g.nutrient.as_str(), g.gap))
        .collect();
    assert_eq!(gaps, [("iron", 60.0), ("zinc", 40.0)]);
    assert!(f.nutrient_gaps.iter().all(|g| g.mode == GapMode::Observed));

    assert_eq!(f.outcome.population, 200_000);
    assert_eq!(f.outcome.under5_population, 30_000);
    assert_eq!(f.outcome.requested_coverage, f.coverage.coverage);
    assert_eq!(f.risk.region_id, "gulu");
    // Rule-based risk has no class probabilities: mean of gap and coverage parts.
    assert!(f.risk.probabilities.is_none());
    assert!((62.5..=87.5).contains(&f.confidence), "confidence={}", f.confidence);
}
