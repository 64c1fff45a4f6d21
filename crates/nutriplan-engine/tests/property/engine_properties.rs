//! Property tests for the planning engine.

use nutriplan_core::config::OutcomeConfig;
use nutriplan_core::constants::TRACKED_NUTRIENTS;
use nutriplan_core::types::{
    DeliveryChannel, InterventionCatalog, NutrientPair, PlanParameters,
};
use nutriplan_engine::coverage::{CoverageEstimator, CoverageFeatures};
use nutriplan_engine::outcomes::{OutcomeSimulator, SimulationInput};
use nutriplan_engine::risk::{
    clean_adequacy, RiskFeatures, RiskModel, RiskThresholds, RuleBasedModel,
};
use nutriplan_engine::synergy::{SynergyTable, MAX_SYNERGY_FACTOR, MIN_SYNERGY_FACTOR};
use proptest::prelude::*;

fn arb_selection() -> impl Strategy<Value = Vec<&'static str>> {
    proptest::sample::subsequence(TRACKED_NUTRIENTS.to_vec(), 0..=TRACKED_NUTRIENTS.len())
}

fn arb_channel() -> impl Strategy<Value = DeliveryChannel> {
    prop_oneof![
        Just(DeliveryChannel::Supplementation),
        Just(DeliveryChannel::Fortification),
        Just(DeliveryChannel::Biofortification),
        Just(DeliveryChannel::Education),
        Just(DeliveryChannel::Mixed),
    ]
}

fn arb_features() -> impl Strategy<Value = RiskFeatures> {
    (
        0.0f64..=100.0,
        0usize..12,
        0usize..12,
        0.0f64..0.5,
        0.0f64..=1.0,
        0.0f64..10.0,
        0.0f64..=1.0,
    )
        .prop_map(|(avg, below_50, below_30, u5, poverty, fpk, rural)| RiskFeatures {
            avg_adequacy: avg,
            min_adequacy: avg.min(30.0),
            below_50,
            below_30: below_30.min(below_50),
            under5_proportion: u5,
            poverty_rate: poverty,
            facilities_per_10k: fpk,
            rural_proportion: rural,
        })
}

// ── Synergy ─────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn synergy_factor_is_bounded(selection in arb_selection()) {
        let table = SynergyTable::static_defaults();
        let factor = table.factor(&selection);
        prop_assert!((MIN_SYNERGY_FACTOR..=MAX_SYNERGY_FACTOR).contains(&factor));
        if selection.len() < 2 {
            prop_assert_eq!(factor, 1.0);
        }
    }

    #[test]
    fn reversed_duplicate_pairs_change_nothing(
        selection in arb_selection(),
        first in 0.5f64..1.5,
        second in 0.5f64..1.5,
    ) {
        let once = SynergyTable::from_pairs(&[NutrientPair::new("iron", "zinc", first)]);
        let twice = SynergyTable::from_pairs(&[
            NutrientPair::new("iron", "zinc", first),
            NutrientPair::new("zinc", "iron", second),
        ]);
        prop_assert_eq!(once.len(), twice.len());
        prop_assert_eq!(once.factor(&selection), twice.factor(&selection));
    }
}

// ── Risk ────────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn rule_score_in_range(features in arb_features()) {
        let out = RuleBasedModel::default().evaluate(&features);
        prop_assert!((0.0..=100.0).contains(&out.score));
        prop_assert_eq!(out.category, RiskThresholds::default().categorize(out.score));
    }

    #[test]
    fn category_monotonic_in_score(a in 0.0f64..=100.0, b in 0.0f64..=100.0) {
        let t = RiskThresholds::default();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(t.categorize(lo) <= t.categorize(hi));
    }

    #[test]
    fn clean_adequacy_keeps_in_range_values(v in 0.0f64..=100.0) {
        let (cleaned, correction) = clean_adequacy(v);
        prop_assert_eq!(cleaned, v);
        prop_assert!(correction.is_none());
    }

    #[test]
    fn clean_adequacy_always_lands_in_range(v in -1e6f64..1e6) {
        let (cleaned, _) = clean_adequacy(v);
        prop_assert!((0.0..=100.0).contains(&cleaned));
    }
}

// ── Coverage ────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn coverage_interval_is_ordered(
        fpk in 0.0f64..20.0,
        density in 1.0f64..5_000.0,
        rural in 0.0f64..=1.0,
        budget in proptest::option::of(0.0f64..50.0),
        channel in arb_channel(),
    ) {
        let features = CoverageFeatures {
            population: 100_000,
            facilities_per_10k: fpk,
            population_density: density,
            rural_fraction: rural,
            road_density: None,
        };
        let est = CoverageEstimator::default().estimate(&features, channel, budget);
        prop_assert!(0.0 <= est.interval.lower);
        prop_assert!(est.interval.lower <= est.coverage);
        prop_assert!(est.coverage <= est.interval.upper);
        prop_assert!(est.interval.upper <= est.cap);
    }
}

// ── Outcomes ────────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn more_budget_never_lowers_coverage(
        low in 0.0f64..1e11,
        extra in 0.0f64..1e11,
        coverage in 0.0f64..=1.0,
    ) {
        let sim = OutcomeSimulator::new(
            &OutcomeConfig::default(),
            InterventionCatalog::static_defaults(),
            SynergyTable::static_defaults(),
        );
        let params = PlanParameters::default().with_coverage_target(coverage);
        let input = SimulationInput::from_parameters(&params);
        let a = sim.simulate(&input.clone().with_budget(low)).unwrap();
        let b = sim.simulate(&input.with_budget(low + extra)).unwrap();
        prop_assert!(b.actual_coverage >= a.actual_coverage);
        prop_assert!(b.people_reached >= a.people_reached);
    }
}
