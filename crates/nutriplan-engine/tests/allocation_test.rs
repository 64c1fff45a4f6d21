//! Allocation across assessed regions: strategies, greedy split, and the
//! cross-region program.

use nutriplan_core::config::AllocationConfig;
use nutriplan_core::errors::AllocationError;
use nutriplan_core::types::{
    DeliveryChannel, InfrastructureTier, InterventionCatalog, InterventionType, Region,
    SanitizedRegion,
};
use nutriplan_engine::allocation::*;
use nutriplan_engine::risk::{AssessedRegion, RiskScorer};

fn assessed(regions: &[Region]) -> Vec<AssessedRegion> {
    RiskScorer::default().assess_regions(regions).data
}

fn districts(n: usize) -> Vec<Region> {
    (0..n)
        .map(|i| {
            let adequacy = 15.0 + i as f64 * 4.0;
            Region::new(format!("district-{i:02}"), 50_000 + i as u64 * 1_000, 7_500)
                .with_adequacy("iron", Some(adequacy))
                .with_adequacy("zinc", Some(adequacy + 2.0))
                .with_adequacy("vitamin_a", Some(adequacy - 2.0))
                .with_facilities(8)
        })
        .collect()
}

fn single_intervention_catalog() -> InterventionCatalog {
    InterventionCatalog::new(vec![InterventionType {
        id: "supplementation".to_string(),
        unit_cost: 10.0,
        effectiveness: 0.5,
        infrastructure: InfrastructureTier::Medium,
        reach_months: 3,
        channel: DeliveryChannel::Supplementation,
        addresses: Vec::new(),
    }])
}

#[test]
fn test_emergency_funds_top_fifteen() {
    let regions = assessed(&districts(20));
    let plan = AllocationOptimizer::default()
        .allocate(
            3_000_000.0,
            &regions,
            &InterventionCatalog::static_defaults(),
            &AllocationStrategy::Emergency,
        )
        .unwrap();
    assert_eq!(plan.regions.len(), 15);
    assert!((plan.budget_per_region - 200_000.0).abs() < 1e-9);
    assert!((plan.total_allocated + plan.total_unallocated - 3_000_000.0).abs() < 1e-6);
    assert!(plan.cross_region.is_none());
    // Lowest adequacy ranks first.
    assert_eq!(plan.regions[0].region_id, "district-00");
}

#[test]
fn test_prevention_band_is_exclusive() {
    let regions = assessed(&districts(20));
    let plan = AllocationOptimizer::default()
        .allocate(
            1_000_000.0,
            &regions,
            &InterventionCatalog::static_defaults(),
            &AllocationStrategy::Prevention,
        )
        .unwrap();
    for allocation in &plan.regions {
        let region = regions
            .iter()
            .find(|r| r.region.id() == allocation.region_id)
            .unwrap();
        let avg = region.region.average_adequacy();
        assert!(avg > 40.0 && avg < 60.0, "{} has {avg}", allocation.region_id);
    }
    assert!(!plan.regions.is_empty());
}

#[test]
fn test_custom_strategy_with_unknown_ids_fails() {
    let regions = assessed(&districts(3));
    let err = AllocationOptimizer::default()
        .allocate(
            1_000_000.0,
            &regions,
            &InterventionCatalog::static_defaults(),
            &AllocationStrategy::Custom(vec!["nowhere".to_string()]),
        )
        .unwrap_err();
    assert_eq!(
        err,
        AllocationError::NoEligibleRegions {
            strategy: "custom".to_string()
        }
    );
}

#[test]
fn test_custom_strategy_funds_repeated_ids_once() {
    let regions = assessed(&districts(3));
    let ids = ["district-01", "district-01", "district-00", "district-01"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let plan = AllocationOptimizer::default()
        .allocate(
            1_000_000.0,
            &regions,
            &InterventionCatalog::static_defaults(),
            &AllocationStrategy::Custom(ids),
        )
        .unwrap();
    let funded: Vec<&str> = plan.regions.iter().map(|r| r.region_id.as_str()).collect();
    assert_eq!(funded, vec!["district-01", "district-00"]);
    assert!((plan.budget_per_region - 500_000.0).abs() < 1e-9);
}

#[test]
fn test_non_finite_budget_is_rejected() {
    let regions = assessed(&districts(3));
    let err = AllocationOptimizer::default()
        .allocate(
            f64::INFINITY,
            &regions,
            &InterventionCatalog::static_defaults(),
            &AllocationStrategy::Balanced,
        )
        .unwrap_err();
    assert!(matches!(err, AllocationError::NonFiniteInput { .. }));
}

#[test]
fn test_cross_region_program_favors_larger_deficit() {
    let needy = SanitizedRegion {
        region: Region::new("needy", 1_000, 150),
        adequacy: [("iron".to_string(), 20.0)].into_iter().collect(),
    };
    let fine = SanitizedRegion {
        region: Region::new("fine", 1_000, 150),
        adequacy: [("iron".to_string(), 90.0)].into_iter().collect(),
    };
    let optimizer = AllocationOptimizer::default();
    let plan = optimizer
        .optimize_cross_region(5_000.0, &[&needy, &fine], &single_intervention_catalog())
        .unwrap();

    assert_eq!(plan.assignments.len(), 1);
    let a = &plan.assignments[0];
    assert_eq!(a.region_id, "needy");
    assert!((a.coverage_percent - 50.0).abs() < 1e-6);
    assert!((a.people as i64 - 500).abs() <= 1);
    assert!((plan.total_spend - 5_000.0).abs() < 1e-3);
}

#[test]
fn test_cross_region_program_caps_coverage_at_100() {
    let needy = SanitizedRegion {
        region: Region::new("needy", 1_000, 150),
        adequacy: [("iron".to_string(), 20.0)].into_iter().collect(),
    };
    let plan = AllocationOptimizer::default()
        .optimize_cross_region(1_000_000.0, &[&needy], &single_intervention_catalog())
        .unwrap();
    assert_eq!(plan.assignments.len(), 1);
    assert!((plan.assignments[0].coverage_percent - 100.0).abs() < 1e-9);
    assert!((plan.total_spend - 10_000.0).abs() < 1e-6);
}

#[test]
fn test_cross_region_runs_when_configured() {
    let config = AllocationConfig {
        cross_region: Some(true),
        ..Default::default()
    };
    let regions = assessed(&districts(5));
    let plan = AllocationOptimizer::new(&config)
        .allocate(
            500_000_000.0,
            &regions,
            &InterventionCatalog::static_defaults(),
            &AllocationStrategy::Emergency,
        )
        .unwrap();
    let cross = plan.cross_region.expect("cross-region plan requested");
    assert!(!cross.assignments.is_empty());
    assert!(cross.total_spend <= 500_000_000.0 * (1.0 + 1e-9));
    for a in &cross.assignments {
        assert!(a.coverage_percent > 0.0 && a.coverage_percent <= 100.0);
    }
}

#[test]
fn test_unreachable_disbursement_floor_is_infeasible() {
    let config = AllocationConfig {
        min_disbursement: Some(1.0),
        ..Default::default()
    };
    let needy = SanitizedRegion {
        region: Region::new("needy", 1_000, 150),
        adequacy: [("iron".to_string(), 20.0)].into_iter().collect(),
    };
    // Full coverage costs 10,000, so 1,000,000 can never be disbursed.
    let err = AllocationOptimizer::new(&config)
        .optimize_cross_region(1_000_000.0, &[&needy], &single_intervention_catalog())
        .unwrap_err();
    assert!(matches!(err, AllocationError::Infeasible { .. }));
}
