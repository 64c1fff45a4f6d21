//! Fitted risk classifier: multinomial logistic regression over
//! standardized features, trained by full-batch gradient descent.
//!
//! Training is deterministic (zero initialization, fixed epoch count), so the
//! same samples always produce the same model. A fitted model is immutable.

use nutriplan_core::config::RiskConfig;
use nutriplan_core::errors::TrainingError;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::rules::RuleBasedModel;
use super::scorer::{ModelOutput, RiskModel};
use super::types::{
    ClassProbabilities, RiskCategory, RiskFeatures, RiskThresholds, ScoringMode, FEATURE_COUNT,
};

const CLASS_COUNT: usize = 4;

/// A training example. Without a label, the rule-based category is used.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainingSample {
    pub features: RiskFeatures,
    pub label: Option<RiskCategory>,
}

impl TrainingSample {
    pub fn unlabeled(features: RiskFeatures) -> Self {
        Self {
            features,
            label: None,
        }
    }

    pub fn labeled(features: RiskFeatures, label: RiskCategory) -> Self {
        Self {
            features,
            label: Some(label),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSummary {
    pub samples: usize,
    pub discarded: usize,
    /// Share of training samples the fitted model classifies correctly.
    pub training_accuracy: f64,
    /// Sample count per class, least severe first.
    pub class_counts: [usize; CLASS_COUNT],
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogisticClassifier {
    means: [f64; FEATURE_COUNT],
    scales: [f64; FEATURE_COUNT],
    weights: [[f64; FEATURE_COUNT]; CLASS_COUNT],
    biases: [f64; CLASS_COUNT],
    thresholds: RiskThresholds,
}

impl LogisticClassifier {
    /// Fit a classifier. Samples with non-finite features are discarded
    /// before the minimum-sample check.
    pub fn fit(
        samples: &[TrainingSample],
        config: &RiskConfig,
    ) -> Result<(Self, TrainingSummary), TrainingError> {
        let thresholds = RiskThresholds::from_config(config);
        let labeler = RuleBasedModel::new(thresholds);

        let usable: Vec<([f64; FEATURE_COUNT], usize)> = samples
            .iter()
            .filter(|s| s.features.is_finite())
            .map(|s| {
                let label = s
                    .label
                    .unwrap_or_else(|| labeler.evaluate(&s.features).category);
                (s.features.to_vector(), label.index())
            })
            .collect();

        let required = config.effective_min_training_samples();
        if usable.len() < required {
            return Err(TrainingError::InsufficientData {
                usable: usable.len(),
                required,
            });
        }

        let n = usable.len() as f64;
        let mut means = [0.0; FEATURE_COUNT];
        let mut scales = [0.0; FEATURE_COUNT];
        for (x, _) in &usable {
            for j in 0..FEATURE_COUNT {
                means[j] += x[j] / n;
            }
        }
        for (x, _) in &usable {
            for j in 0..FEATURE_COUNT {
                scales[j] += (x[j] - means[j]).powi(2) / n;
            }
        }
        for scale in &mut scales {
            *scale = scale.sqrt();
            if *scale < 1e-12 {
                *scale = 1.0;
            }
        }

        let standardized: Vec<([f64; FEATURE_COUNT], usize)> = usable
            .iter()
            .map(|(x, y)| (standardize(x, &means, &scales), *y))
            .collect();

        let mut model = Self {
            means,
            scales,
            weights: [[0.0; FEATURE_COUNT]; CLASS_COUNT],
            biases: [0.0; CLASS_COUNT],
            thresholds,
        };

        let learning_rate = config.effective_learning_rate();
        let l2 = config.effective_l2_penalty();
        for _ in 0..config.effective_training_epochs() {
            let mut grad_w = [[0.0; FEATURE_COUNT]; CLASS_COUNT];
            let mut grad_b = [0.0; CLASS_COUNT];
            for (x, y) in &standardized {
                let p = model.class_probabilities(x);
                for k in 0..CLASS_COUNT {
                    let err = p[k] - if k == *y { 1.0 } else { 0.0 };
                    grad_b[k] += err / n;
                    for j in 0..FEATURE_COUNT {
                        grad_w[k][j] += err * x[j] / n;
                    }
                }
            }
            for k in 0..CLASS_COUNT {
                model.biases[k] -= learning_rate * grad_b[k];
                for j in 0..FEATURE_COUNT {
                    let penalty = l2 * model.weights[k][j];
                    model.weights[k][j] -= learning_rate * (grad_w[k][j] + penalty);
                }
            }
        }

        let finite = model.biases.iter().all(|b| b.is_finite())
            && model.weights.iter().flatten().all(|w| w.is_finite());
        if !finite {
            return Err(TrainingError::Degenerate {
                message: "non-finite weights after gradient descent".to_string(),
            });
        }

        let mut class_counts = [0usize; CLASS_COUNT];
        let mut correct = 0usize;
        for (x, y) in &standardized {
            class_counts[*y] += 1;
            if argmax(&model.class_probabilities(x)) == *y {
                correct += 1;
            }
        }
        let summary = TrainingSummary {
            samples: usable.len(),
            discarded: samples.len() - usable.len(),
            training_accuracy: correct as f64 / n,
            class_counts,
        };
        debug!(?class_counts, "risk classifier class balance");
        info!(
            training_samples = summary.samples,
            training_accuracy = summary.training_accuracy,
            "fitted risk classifier"
        );
        Ok((model, summary))
    }

    /// Class probabilities for raw (unstandardized) features.
    pub fn predict(&self, features: &RiskFeatures) -> ClassProbabilities {
        let x = standardize(&features.to_vector(), &self.means, &self.scales);
        ClassProbabilities(self.class_probabilities(&x))
    }

    fn class_probabilities(&self, x: &[f64; FEATURE_COUNT]) -> [f64; CLASS_COUNT] {
        let mut logits = [0.0; CLASS_COUNT];
        for k in 0..CLASS_COUNT {
            logits[k] = self.biases[k]
                + self.weights[k]
                    .iter()
                    .zip(x.iter())
                    .map(|(w, v)| w * v)
                    .sum::<f64>();
        }
        softmax(logits)
    }
}

impl RiskModel for LogisticClassifier {
    fn mode(&self) -> ScoringMode {
        ScoringMode::Learned
    }

    fn evaluate(&self, features: &RiskFeatures) -> ModelOutput {
        let probabilities = self.predict(features);
        ModelOutput {
            score: probabilities.expected_score().clamp(0.0, 100.0),
            category: probabilities.argmax(),
            probabilities: Some(probabilities),
            components: Vec::new(),
        }
    }
}

fn standardize(
    x: &[f64; FEATURE_COUNT],
    means: &[f64; FEATURE_COUNT],
    scales: &[f64; FEATURE_COUNT],
) -> [f64; FEATURE_COUNT] {
    let mut out = [0.0; FEATURE_COUNT];
    for j in 0..FEATURE_COUNT {
        // Unseen extremes could otherwise saturate the softmax.
        out[j] = ((x[j] - means[j]) / scales[j]).clamp(-10.0, 10.0);
        if !out[j].is_finite() {
            out[j] = 0.0;
        }
    }
    out
}

fn softmax(logits: [f64; CLASS_COUNT]) -> [f64; CLASS_COUNT] {
    let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mut out = [0.0; CLASS_COUNT];
    let mut total = 0.0;
    for k in 0..CLASS_COUNT {
        out[k] = (logits[k] - max).exp();
        total += out[k];
    }
    for p in &mut out {
        *p /= total;
    }
    out
}

fn argmax(p: &[f64; CLASS_COUNT]) -> usize {
    ClassProbabilities(*p).argmax().index()
}
