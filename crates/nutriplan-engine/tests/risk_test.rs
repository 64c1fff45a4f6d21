//! Risk scoring end to end: sanitization, rule scoring, learned mode.

use nutriplan_core::errors::{DataQualityIssue, TrainingError};
use nutriplan_core::types::Region;
use nutriplan_engine::risk::*;

fn region(id: &str, iron: f64, zinc: f64, vitamin_a: f64) -> Region {
    Region::new(id, 100_000, 15_000)
        .with_adequacy("iron", Some(iron))
        .with_adequacy("zinc", Some(zinc))
        .with_adequacy("vitamin_a", Some(vitamin_a))
        .with_facilities(10)
        .with_poverty_rate(0.2)
        .with_rural_fraction(0.3)
}

#[test]
fn test_two_critical_deficiencies_score_medium() {
    let scorer = RiskScorer::default();
    let assessed = scorer.assess_regions(&[region("kasese", 20.0, 25.0, 60.0)]);
    let a = &assessed.data[0].assessment;
    assert_eq!(a.score, 45.0);
    assert_eq!(a.category, RiskCategory::Medium);
    assert_eq!(a.mode, ScoringMode::RuleBased);
    let rules: Vec<ScoreRule> = a.components.iter().map(|c| c.rule).collect();
    assert_eq!(
        rules,
        [
            ScoreRule::ModerateDeficiencies,
            ScoreRule::MultipleCriticalDeficiencies
        ]
    );
    assert!(a.disagreement.is_none());
    assert!(assessed.is_clean());
}

#[test]
fn test_regions_ranked_by_score_then_id() {
    let scorer = RiskScorer::default();
    let regions = [
        region("b", 90.0, 90.0, 90.0),
        region("a", 90.0, 90.0, 90.0),
        region("c", 10.0, 10.0, 10.0),
    ];
    let ids: Vec<String> = scorer
        .assess_regions(&regions)
        .data
        .iter()
        .map(|r| r.region.id().to_string())
        .collect();
    assert_eq!(ids, ["c", "a", "b"]);
}

#[test]
fn test_dirty_adequacy_is_corrected_and_reported() {
    let regions = [
        region("x", 5000.0, 40.0, 40.0),
        region("y", 40.0, 140.0, 40.0),
        Region::new("z", 50_000, 7_500)
            .with_adequacy("iron", None)
            .with_adequacy("zinc", Some(40.0))
            .with_adequacy("vitamin_a", Some(40.0)),
    ];
    let checked = RiskScorer::default().assess_regions(&regions);
    assert_eq!(checked.issue_count(), 3);

    let find = |id: &str| {
        checked
            .data
            .iter()
            .find(|r| r.region.id() == id)
            .unwrap()
            .region
            .adequacy["iron"]
    };
    assert_eq!(find("x"), 50.0);
    // Median of the observed iron values 50 and 40.
    assert_eq!(find("z"), 45.0);
    assert!(checked
        .issues
        .iter()
        .any(|i| matches!(i, DataQualityIssue::AboveRange { region, .. } if region == "y")));
}

#[test]
fn test_training_needs_enough_samples() {
    let scorer = RiskScorer::default();
    let regions = [region("a", 20.0, 20.0, 20.0), region("b", 80.0, 80.0, 80.0)];
    let sanitized = sanitize_regions(&regions).data;
    let err = scorer.train_on_regions(&sanitized).unwrap_err();
    assert_eq!(
        err,
        TrainingError::InsufficientData {
            usable: 2,
            required: 10
        }
    );
    assert_eq!(scorer.mode(), ScoringMode::RuleBased);
}

#[test]
fn test_learned_mode_reports_probabilities() {
    let scorer = RiskScorer::default();
    let regions: Vec<Region> = (0..24)
        .map(|i| {
            let v = 10.0 + (i as f64) * 3.5;
            region(&format!("r{i:02}"), v, v + 5.0, v - 5.0)
        })
        .collect();
    let sanitized = sanitize_regions(&regions).data;
    let summary = scorer.train_on_regions(&sanitized).unwrap();
    assert_eq!(summary.samples, 24);
    assert_eq!(scorer.mode(), ScoringMode::Learned);

    for r in &sanitized {
        let a = scorer.assess(r);
        let p = a.probabilities.expect("learned mode has probabilities");
        assert_eq!(a.category, p.argmax());
        assert!((0.0..=100.0).contains(&a.score));
        if let Some(d) = a.disagreement {
            assert_eq!(d.class_category, a.category);
            assert_ne!(d.score_category, d.class_category);
        }
    }

    scorer.reset_to_rules();
    assert_eq!(scorer.mode(), ScoringMode::RuleBased);
}

/// Fixed-output model standing in for a fitted classifier.
struct FixedProbabilities(ClassProbabilities);

impl RiskModel for FixedProbabilities {
    fn mode(&self) -> ScoringMode {
        ScoringMode::Learned
    }

    fn evaluate(&self, _features: &RiskFeatures) -> ModelOutput {
        ModelOutput {
            score: self.0.expected_score(),
            category: self.0.argmax(),
            probabilities: Some(self.0),
            components: Vec::new(),
        }
    }
}

fn scorer_with(probabilities: [f64; 4]) -> RiskScorer {
    let scorer = RiskScorer::default();
    scorer.install_model(std::sync::Arc::new(FixedProbabilities(ClassProbabilities(
        probabilities,
    ))));
    scorer
}

#[test]
fn test_disagreement_keeps_argmax_category() {
    // 0.45 * 25 + 0.55 * 100 = 66.25, which thresholds to high; argmax is critical.
    let scorer = scorer_with([0.45, 0.0, 0.0, 0.55]);
    let sanitized = sanitize_regions(&[region("k", 70.0, 70.0, 70.0)]).data;
    let a = scorer.assess(&sanitized[0]);

    assert_eq!(a.score, 66.25);
    assert_eq!(a.category, RiskCategory::Critical);
    assert_eq!(
        a.disagreement,
        Some(Disagreement {
            score_category: RiskCategory::High,
            class_category: RiskCategory::Critical,
        })
    );
    assert!(a.factors.is_empty());
    assert_eq!(
        a.recommendations,
        RiskCategory::Critical.base_recommendations().to_vec()
    );
}

#[test]
fn test_agreeing_model_has_no_disagreement() {
    let scorer = scorer_with([0.0, 0.0, 0.0, 1.0]);
    let sanitized = sanitize_regions(&[region("k", 70.0, 70.0, 70.0)]).data;
    let a = scorer.assess(&sanitized[0]);
    assert_eq!(a.score, 100.0);
    assert_eq!(a.category, RiskCategory::Critical);
    assert!(a.disagreement.is_none());
}

#[test]
fn test_region_without_adequacy_data_is_not_severe() {
    let regions = [Region::new("x", 100_000, 10_000)
        .with_facilities(20)
        .with_poverty_rate(0.1)];
    let checked = RiskScorer::default().assess_regions(&regions);
    let a = &checked.data[0].assessment;

    assert_eq!(a.features.avg_adequacy, 50.0);
    assert_eq!(a.score, 0.0);
    assert_eq!(a.category, RiskCategory::Low);
    assert!(!a.factors.contains(&RiskFactor::LowAdequacy));
    assert_eq!(checked.issue_count(), 1);
    assert!(matches!(
        checked.issues[0],
        DataQualityIssue::NoAdequacyData { ref region, .. } if region == "x"
    ));
}
