//! Rule-based risk model: fixed points per triggered condition.

use super::scorer::{ModelOutput, RiskModel};
use super::types::{RiskFeatures, RiskThresholds, ScoreComponent, ScoreRule, ScoringMode};

/// Deterministic additive scoring, always available.
#[derive(Debug, Clone, Default)]
pub struct RuleBasedModel {
    thresholds: RiskThresholds,
}

impl RuleBasedModel {
    pub fn new(thresholds: RiskThresholds) -> Self {
        Self { thresholds }
    }

    /// Rules that fire for `features`. The two deficiency-severity rules
    /// are exclusive.
    pub fn fired_rules(features: &RiskFeatures) -> Vec<ScoreRule> {
        let mut rules = Vec::new();
        if features.avg_adequacy < 30.0 {
            rules.push(ScoreRule::SevereDeficiencies);
        } else if features.avg_adequacy < 50.0 {
            rules.push(ScoreRule::ModerateDeficiencies);
        }
        if features.below_30 >= 2 {
            rules.push(ScoreRule::MultipleCriticalDeficiencies);
        }
        if features.under5_proportion > 0.2 {
            rules.push(ScoreRule::LargeChildPopulation);
        }
        if features.poverty_rate > 0.4 {
            rules.push(ScoreRule::HighPoverty);
        }
        if features.facilities_per_10k < 1.0 {
            rules.push(ScoreRule::FacilityShortage);
        }
        rules
    }
}

impl RiskModel for RuleBasedModel {
    fn mode(&self) -> ScoringMode {
        ScoringMode::RuleBased
    }

    fn evaluate(&self, features: &RiskFeatures) -> ModelOutput {
        let components: Vec<ScoreComponent> = Self::fired_rules(features)
            .into_iter()
            .map(|rule| ScoreComponent {
                rule,
                points: rule.points(),
            })
            .collect();
        let score = components
            .iter()
            .map(|c| c.points)
            .sum::<f64>()
            .clamp(0.0, 100.0);

        ModelOutput {
            score,
            category: self.thresholds.categorize(score),
            probabilities: None,
            components,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::types::RiskCategory;

    fn features(avg: f64, below_30: usize) -> RiskFeatures {
        RiskFeatures {
            avg_adequacy: avg,
            min_adequacy: avg,
            below_50: below_30,
            below_30,
            under5_proportion: 0.15,
            poverty_rate: 0.2,
            facilities_per_10k: 2.0,
            rural_proportion: 0.5,
        }
    }

    #[test]
    fn test_moderate_with_two_critical_is_medium() {
        let out = RuleBasedModel::default().evaluate(&features(35.0, 2));
        assert_eq!(out.score, 45.0);
        assert_eq!(out.category, RiskCategory::Medium);
        assert_eq!(out.components.len(), 2);
    }

    #[test]
    fn test_severity_rules_are_exclusive() {
        let rules = RuleBasedModel::fired_rules(&features(10.0, 0));
        assert_eq!(rules, vec![ScoreRule::SevereDeficiencies]);
    }

    #[test]
    fn test_all_rules_reach_exactly_100() {
        let f = RiskFeatures {
            avg_adequacy: 10.0,
            min_adequacy: 0.0,
            below_50: 5,
            below_30: 5,
            under5_proportion: 0.3,
            poverty_rate: 0.6,
            facilities_per_10k: 0.2,
            rural_proportion: 0.9,
        };
        let out = RuleBasedModel::default().evaluate(&f);
        assert_eq!(out.score, 100.0);
        assert_eq!(out.category, RiskCategory::Critical);
    }

    #[test]
    fn test_well_nourished_region_scores_zero() {
        let out = RuleBasedModel::default().evaluate(&features(85.0, 0));
        assert_eq!(out.score, 0.0);
        assert_eq!(out.category, RiskCategory::Low);
        assert!(out.probabilities.is_none());
    }
}
