//! RiskScorer: sanitizes, scores, and ranks regions with the current model.

use std::cmp::Ordering;
use std::sync::{Arc, RwLock};

use nutriplan_core::config::RiskConfig;
use nutriplan_core::errors::{Checked, TrainingError};
use nutriplan_core::types::{Region, SanitizedRegion};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use super::classifier::{LogisticClassifier, TrainingSample, TrainingSummary};
use super::rules::RuleBasedModel;
use super::sanitize::sanitize_regions;
use super::types::{
    ClassProbabilities, Disagreement, Recommendation, RiskAssessment, RiskCategory, RiskFactor,
    RiskFeatures, RiskThresholds, ScoreComponent, ScoringMode,
};

/// Raw model output before factors and recommendations are attached.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelOutput {
    pub score: f64,
    pub category: RiskCategory,
    pub probabilities: Option<ClassProbabilities>,
    pub components: Vec<ScoreComponent>,
}

/// A scoring model. Implementations are immutable once built.
pub trait RiskModel: Send + Sync {
    fn mode(&self) -> ScoringMode;

    fn evaluate(&self, features: &RiskFeatures) -> ModelOutput;
}

/// A sanitized region paired with its assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessedRegion {
    pub region: SanitizedRegion,
    pub assessment: RiskAssessment,
}

/// Scores regions with whichever model is current. Starts rule-based;
/// a successful `train` swaps in a fitted classifier.
pub struct RiskScorer {
    config: RiskConfig,
    thresholds: RiskThresholds,
    model: RwLock<Arc<dyn RiskModel>>,
}

impl Default for RiskScorer {
    fn default() -> Self {
        Self::new(&RiskConfig::default())
    }
}

impl RiskScorer {
    pub fn new(config: &RiskConfig) -> Self {
        let thresholds = RiskThresholds::from_config(config);
        Self {
            config: config.clone(),
            thresholds,
            model: RwLock::new(Arc::new(RuleBasedModel::new(thresholds))),
        }
    }

    pub fn thresholds(&self) -> RiskThresholds {
        self.thresholds
    }

    pub fn mode(&self) -> ScoringMode {
        self.current_model().mode()
    }

    /// The model used by subsequent calls.
    pub fn current_model(&self) -> Arc<dyn RiskModel> {
        let guard = self.model.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    /// Replace the current model.
    pub fn install_model(&self, model: Arc<dyn RiskModel>) {
        let mut guard = self.model.write().unwrap_or_else(|e| e.into_inner());
        *guard = model;
    }

    /// Return to rule-based scoring.
    pub fn reset_to_rules(&self) {
        self.install_model(Arc::new(RuleBasedModel::new(self.thresholds)));
    }

    /// Fit a classifier and make it current. On error the current model
    /// stays in place.
    #[instrument(skip(self, samples), fields(sample_count = samples.len()))]
    pub fn train(&self, samples: &[TrainingSample]) -> Result<TrainingSummary, TrainingError> {
        match LogisticClassifier::fit(samples, &self.config) {
            Ok((model, summary)) => {
                self.install_model(Arc::new(model));
                Ok(summary)
            }
            Err(e) => {
                warn!(error = %e, "keeping current risk model");
                Err(e)
            }
        }
    }

    /// Train on regions, labeling each with its rule-based category.
    pub fn train_on_regions(
        &self,
        regions: &[SanitizedRegion],
    ) -> Result<TrainingSummary, TrainingError> {
        let samples: Vec<TrainingSample> = regions
            .iter()
            .map(|r| TrainingSample::unlabeled(RiskFeatures::from_region(r)))
            .collect();
        self.train(&samples)
    }

    /// Score one feature set.
    pub fn score(&self, region_id: &str, features: &RiskFeatures) -> RiskAssessment {
        let model = self.current_model();
        let output = model.evaluate(features);

        let disagreement = output.probabilities.and_then(|_| {
            let score_category = self.thresholds.categorize(output.score);
            (score_category != output.category).then_some(Disagreement {
                score_category,
                class_category: output.category,
            })
        });
        if let Some(d) = &disagreement {
            debug!(
                region_id,
                score = output.score,
                score_category = %d.score_category,
                class_category = %d.class_category,
                "score and class disagree"
            );
        }

        let factors = RiskFactor::top_three(features);
        let recommendations = Recommendation::for_assessment(output.category, &factors);

        RiskAssessment {
            region_id: region_id.to_string(),
            score: output.score,
            category: output.category,
            factors,
            recommendations,
            mode: model.mode(),
            features: *features,
            components: output.components,
            probabilities: output.probabilities,
            disagreement,
        }
    }

    pub fn assess(&self, region: &SanitizedRegion) -> RiskAssessment {
        self.score(region.id(), &RiskFeatures::from_region(region))
    }

    /// Sanitize and score a dataset, highest score first (ties by id).
    #[instrument(skip(self, regions), fields(region_count = regions.len()))]
    pub fn assess_regions(&self, regions: &[Region]) -> Checked<Vec<AssessedRegion>> {
        let sanitized = sanitize_regions(regions);
        let mode = self.mode();
        let ranked = sanitized.map(|regions| {
            let mut assessed: Vec<AssessedRegion> = regions
                .into_iter()
                .map(|region| {
                    let assessment = self.assess(&region);
                    AssessedRegion { region, assessment }
                })
                .collect();
            assessed.sort_by(|a, b| {
                b.assessment
                    .score
                    .partial_cmp(&a.assessment.score)
                    .unwrap_or(Ordering::Equal)
                    .then_with(|| a.region.id().cmp(b.region.id()))
            });
            assessed
        });
        info!(
            scoring_mode = mode.name(),
            corrections_applied = ranked.issue_count(),
            "assessed regions"
        );
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(id: &str, iron: f64, zinc: f64, facilities: u32) -> Region {
        Region::new(id, 100_000, 15_000)
            .with_adequacy("iron", Some(iron))
            .with_adequacy("zinc", Some(zinc))
            .with_facilities(facilities)
            .with_poverty_rate(0.2)
    }

    #[test]
    fn test_assess_regions_ranks_by_score() {
        let scorer = RiskScorer::default();
        let regions = vec![
            region("healthy", 90.0, 85.0, 30),
            region("severe", 10.0, 20.0, 2),
            region("moderate", 45.0, 40.0, 30),
        ];
        let checked = scorer.assess_regions(&regions);
        let ids: Vec<&str> = checked.data.iter().map(|a| a.region.id()).collect();
        assert_eq!(ids, ["severe", "moderate", "healthy"]);

        let severe = &checked.data[0].assessment;
        // 40 severe + 20 multiple critical + 10 facility shortage
        assert_eq!(severe.score, 70.0);
        assert_eq!(severe.category, RiskCategory::Critical);
        assert_eq!(severe.mode, ScoringMode::RuleBased);
        assert!(severe.recommendations.len() <= 4);
        assert!(severe.disagreement.is_none());
    }

    #[test]
    fn test_failed_training_keeps_rule_model() {
        let scorer = RiskScorer::default();
        let err = scorer.train(&[]).unwrap_err();
        assert!(matches!(err, TrainingError::InsufficientData { usable: 0, .. }));
        assert_eq!(scorer.mode(), ScoringMode::RuleBased);
    }

    #[test]
    fn test_recommendations_include_factor_additions() {
        let scorer = RiskScorer::default();
        let features = RiskFeatures {
            avg_adequacy: 60.0,
            min_adequacy: 20.0,
            below_50: 2,
            below_30: 2,
            under5_proportion: 0.1,
            poverty_rate: 0.1,
            facilities_per_10k: 0.5,
            rural_proportion: 0.3,
        };
        let assessment = scorer.score("r", &features);
        // 20 multiple critical + 10 facility shortage = 30 -> medium
        assert_eq!(assessment.category, RiskCategory::Medium);
        assert_eq!(
            assessment.recommendations,
            vec![
                Recommendation::NutritionEducation,
                Recommendation::Biofortification,
                Recommendation::RegularMonitoring,
                Recommendation::MultiMicronutrientSupplementation,
            ]
        );
        assert_eq!(
            assessment.factors.as_slice(),
            &[
                RiskFactor::MultipleSevereDeficiencies,
                RiskFactor::InsufficientFacilities
            ]
        );
    }
}
