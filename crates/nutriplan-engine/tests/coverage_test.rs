//! Coverage estimation: caps, channels, budgets, and fitted baselines.

use nutriplan_core::config::CoverageConfig;
use nutriplan_core::errors::TrainingError;
use nutriplan_core::types::{DeliveryChannel, Region};
use nutriplan_engine::coverage::*;

fn dense_urban() -> CoverageFeatures {
    CoverageFeatures::from_region(
        &Region::new("kampala", 1_500_000, 225_000)
            .with_facilities(400)
            .with_rural_fraction(0.1)
            .with_area(190.0)
            .with_roads(600.0),
    )
}

fn sparse_rural() -> CoverageFeatures {
    CoverageFeatures::from_region(
        &Region::new("karamoja", 40_000, 6_000)
            .with_facilities(2)
            .with_rural_fraction(0.95)
            .with_area(5_000.0)
            .with_roads(100.0),
    )
}

#[test]
fn test_urban_supplementation_hits_urban_cap() {
    let est = CoverageEstimator::default().estimate(
        &dense_urban(),
        DeliveryChannel::Supplementation,
        None,
    );
    assert_eq!(est.cap, 0.95);
    assert_eq!(est.coverage, 0.95);
    assert_eq!(est.limiting_factors, [LimitingFactor::NoneIdentified]);
    assert_eq!(est.mode, EstimationMode::RuleBased);
}

#[test]
fn test_rural_region_collects_limiting_factors() {
    let est = CoverageEstimator::default().estimate(
        &sparse_rural(),
        DeliveryChannel::Education,
        Some(2.0),
    );
    assert_eq!(est.cap, 0.85);
    assert!(est.coverage < 0.85);
    for factor in [
        LimitingFactor::LowFacilityDensity,
        LimitingFactor::HighRuralShare,
        LimitingFactor::PoorRoadNetwork,
        LimitingFactor::BudgetConstraint,
    ] {
        assert!(est.limiting_factors.contains(&factor), "missing {factor:?}");
    }
}

#[test]
fn test_interval_brackets_estimate_within_cap() {
    let estimator = CoverageEstimator::default();
    for features in [dense_urban(), sparse_rural()] {
        for channel in [
            DeliveryChannel::Supplementation,
            DeliveryChannel::Fortification,
            DeliveryChannel::Education,
        ] {
            let est = estimator.estimate(&features, channel, Some(5.0));
            assert!(0.0 <= est.interval.lower);
            assert!(est.interval.lower <= est.coverage);
            assert!(est.coverage <= est.interval.upper);
            assert!(est.interval.upper <= est.cap);
        }
    }
}

#[test]
fn test_failed_training_keeps_rule_baseline() {
    let estimator = CoverageEstimator::default();
    let samples = [CoverageSample {
        features: dense_urban(),
        achieved: 0.9,
    }];
    assert!(matches!(
        estimator.train(&samples),
        Err(TrainingError::InsufficientData { usable: 1, .. })
    ));
    assert_eq!(estimator.mode(), EstimationMode::RuleBased);
}

#[test]
fn test_fitted_baseline_uses_narrower_interval() {
    let estimator = CoverageEstimator::new(&CoverageConfig::default());
    let samples: Vec<CoverageSample> = (0..20)
        .map(|i| {
            let facilities = 1 + i * 3;
            let features = CoverageFeatures::from_region(
                &Region::new(format!("d{i}"), 100_000, 15_000)
                    .with_facilities(facilities)
                    .with_rural_fraction(0.9 - i as f64 * 0.04)
                    .with_area(1_000.0),
            );
            CoverageSample {
                features,
                achieved: 0.3 + i as f64 * 0.025,
            }
        })
        .collect();
    estimator.train(&samples).unwrap();
    assert_eq!(estimator.mode(), EstimationMode::Fitted);

    let est = estimator.estimate(&samples[10].features, DeliveryChannel::Mixed, None);
    assert_eq!(est.mode, EstimationMode::Fitted);
    if est.coverage > 0.0 && est.interval.upper < est.cap {
        let width = (est.interval.upper - est.coverage) / est.coverage;
        assert!((width - 0.15).abs() < 1e-9);
    }
}
