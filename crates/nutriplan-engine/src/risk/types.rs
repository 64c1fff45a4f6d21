//! Risk scoring types: categories, factors, recommendations, assessments.

use nutriplan_core::config::RiskConfig;
use nutriplan_core::types::SanitizedRegion;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Risk category, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskCategory {
    /// All categories, least severe first. Index order is the classifier's class order.
    pub const ALL: &'static [RiskCategory] =
        &[Self::Low, Self::Medium, Self::High, Self::Critical];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    /// Score contributed per unit of class probability.
    pub fn class_points(&self) -> f64 {
        match self {
            Self::Low => 25.0,
            Self::Medium => 50.0,
            Self::High => 75.0,
            Self::Critical => 100.0,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
            Self::Critical => 3,
        }
    }

    /// Interventions recommended for every region in this category.
    pub fn base_recommendations(&self) -> &'static [Recommendation] {
        use Recommendation::*;
        match self {
            Self::Critical => &[
                EmergencySupplementation,
                MobileHealthClinics,
                FoodAssistance,
            ],
            Self::High => &[
                TargetedSupplementation,
                StapleFortification,
                CommunityHealthWorkers,
            ],
            Self::Medium => &[NutritionEducation, Biofortification, RegularMonitoring],
            Self::Low => &[PreventiveNutrition, MaintainCurrent],
        }
    }
}

impl std::fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Fixed score thresholds separating the categories.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskThresholds {
    pub critical: f64,
    pub high: f64,
    pub medium: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self::from_config(&RiskConfig::default())
    }
}

impl RiskThresholds {
    pub fn from_config(config: &RiskConfig) -> Self {
        Self {
            critical: config.effective_critical_threshold(),
            high: config.effective_high_threshold(),
            medium: config.effective_medium_threshold(),
        }
    }

    pub fn categorize(&self, score: f64) -> RiskCategory {
        if score >= self.critical {
            RiskCategory::Critical
        } else if score >= self.high {
            RiskCategory::High
        } else if score >= self.medium {
            RiskCategory::Medium
        } else {
            RiskCategory::Low
        }
    }
}

/// Conditions that explain a region's risk, in reporting priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactor {
    LowAdequacy,
    MultipleSevereDeficiencies,
    InsufficientFacilities,
    HighPoverty,
    HighlyRural,
}

impl RiskFactor {
    pub const ALL: &'static [RiskFactor] = &[
        Self::LowAdequacy,
        Self::MultipleSevereDeficiencies,
        Self::InsufficientFacilities,
        Self::HighPoverty,
        Self::HighlyRural,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::LowAdequacy => "low_adequacy",
            Self::MultipleSevereDeficiencies => "multiple_severe_deficiencies",
            Self::InsufficientFacilities => "insufficient_facilities",
            Self::HighPoverty => "high_poverty",
            Self::HighlyRural => "highly_rural",
        }
    }

    pub fn applies(&self, features: &RiskFeatures) -> bool {
        match self {
            Self::LowAdequacy => features.avg_adequacy < 50.0,
            Self::MultipleSevereDeficiencies => features.below_30 >= 2,
            Self::InsufficientFacilities => features.facilities_per_10k < 1.0,
            Self::HighPoverty => features.poverty_rate > 0.3,
            Self::HighlyRural => features.rural_proportion > 0.8,
        }
    }

    /// The first three factors that apply, in priority order.
    pub fn top_three(features: &RiskFeatures) -> SmallVec<[RiskFactor; 3]> {
        Self::ALL
            .iter()
            .copied()
            .filter(|f| f.applies(features))
            .take(3)
            .collect()
    }
}

impl std::fmt::Display for RiskFactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Intervention programs suggested by an assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    EmergencySupplementation,
    MobileHealthClinics,
    FoodAssistance,
    TargetedSupplementation,
    StapleFortification,
    CommunityHealthWorkers,
    NutritionEducation,
    Biofortification,
    RegularMonitoring,
    PreventiveNutrition,
    MaintainCurrent,
    MultiMicronutrientSupplementation,
    StrengthenHealthInfrastructure,
}

/// At most this many recommendations are returned.
pub const MAX_RECOMMENDATIONS: usize = 4;

impl Recommendation {
    /// Category list plus factor-driven additions, truncated.
    pub fn for_assessment(category: RiskCategory, factors: &[RiskFactor]) -> Vec<Recommendation> {
        let mut list = category.base_recommendations().to_vec();
        if factors.contains(&RiskFactor::MultipleSevereDeficiencies) {
            list.push(Self::MultiMicronutrientSupplementation);
        }
        if factors.contains(&RiskFactor::InsufficientFacilities) {
            list.push(Self::StrengthenHealthInfrastructure);
        }
        list.truncate(MAX_RECOMMENDATIONS);
        list
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMode {
    RuleBased,
    Learned,
}

impl ScoringMode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::RuleBased => "rule_based",
            Self::Learned => "learned",
        }
    }
}

/// Model inputs derived from a sanitized region.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RiskFeatures {
    pub avg_adequacy: f64,
    pub min_adequacy: f64,
    pub below_50: usize,
    pub below_30: usize,
    pub under5_proportion: f64,
    pub poverty_rate: f64,
    pub facilities_per_10k: f64,
    pub rural_proportion: f64,
}

/// Number of numeric features fed to fitted models.
pub const FEATURE_COUNT: usize = 8;

impl RiskFeatures {
    pub fn from_region(region: &SanitizedRegion) -> Self {
        Self {
            avg_adequacy: region.average_adequacy(),
            min_adequacy: region.min_adequacy(),
            below_50: region.count_below(50.0),
            below_30: region.count_below(30.0),
            under5_proportion: region.region.under5_proportion(),
            poverty_rate: region.region.poverty_rate,
            facilities_per_10k: region.region.facilities_per_10k(),
            rural_proportion: region.region.rural_fraction,
        }
    }

    pub fn to_vector(&self) -> [f64; FEATURE_COUNT] {
        [
            self.avg_adequacy,
            self.min_adequacy,
            self.below_50 as f64,
            self.below_30 as f64,
            self.under5_proportion,
            self.poverty_rate,
            self.facilities_per_10k,
            self.rural_proportion,
        ]
    }

    pub fn is_finite(&self) -> bool {
        self.to_vector().iter().all(|v| v.is_finite())
    }
}

/// Scoring rules of the rule-based model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreRule {
    SevereDeficiencies,
    ModerateDeficiencies,
    MultipleCriticalDeficiencies,
    LargeChildPopulation,
    HighPoverty,
    FacilityShortage,
}

impl ScoreRule {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SevereDeficiencies => "severe_deficiencies",
            Self::ModerateDeficiencies => "moderate_deficiencies",
            Self::MultipleCriticalDeficiencies => "multiple_critical_deficiencies",
            Self::LargeChildPopulation => "large_child_population",
            Self::HighPoverty => "high_poverty",
            Self::FacilityShortage => "facility_shortage",
        }
    }

    pub fn points(&self) -> f64 {
        match self {
            Self::SevereDeficiencies => 40.0,
            Self::ModerateDeficiencies => 25.0,
            Self::MultipleCriticalDeficiencies => 20.0,
            Self::LargeChildPopulation | Self::HighPoverty => 15.0,
            Self::FacilityShortage => 10.0,
        }
    }
}

/// One rule that fired, with the points it added.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub rule: ScoreRule,
    pub points: f64,
}

/// Per-class probabilities from a fitted classifier, least severe first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassProbabilities(pub [f64; 4]);

impl ClassProbabilities {
    pub fn get(&self, category: RiskCategory) -> f64 {
        self.0[category.index()]
    }

    /// Most probable class. Ties go to the more severe class.
    pub fn argmax(&self) -> RiskCategory {
        let mut best = RiskCategory::Low;
        for category in RiskCategory::ALL {
            if self.get(*category) >= self.get(best) {
                best = *category;
            }
        }
        best
    }

    /// Probability-weighted class points.
    pub fn expected_score(&self) -> f64 {
        RiskCategory::ALL
            .iter()
            .map(|c| self.get(*c) * c.class_points())
            .sum()
    }
}

/// Score and class disagree: the threshold category of the score is not the
/// most probable class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Disagreement {
    pub score_category: RiskCategory,
    pub class_category: RiskCategory,
}

/// Result of scoring one region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub region_id: String,
    pub score: f64,
    pub category: RiskCategory,
    pub factors: SmallVec<[RiskFactor; 3]>,
    pub recommendations: Vec<Recommendation>,
    pub mode: ScoringMode,
    pub features: RiskFeatures,
    #[serde(default)]
    pub components: Vec<ScoreComponent>,
    #[serde(default)]
    pub probabilities: Option<ClassProbabilities>,
    #[serde(default)]
    pub disagreement: Option<Disagreement>,
}
