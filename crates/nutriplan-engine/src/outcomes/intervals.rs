//! Normal-approximation confidence intervals.

use statrs::distribution::{ContinuousCDF, Normal};

use super::types::OutcomeEstimate;

/// Two-sided z for a confidence level in percent. Levels outside (0, 100)
/// give 0.
pub fn z_score(confidence_level: f64) -> f64 {
    if !(confidence_level > 0.0 && confidence_level < 100.0) {
        return 0.0;
    }
    match Normal::new(0.0, 1.0) {
        Ok(normal) => normal.inverse_cdf((1.0 + confidence_level / 100.0) / 2.0),
        Err(_) => 0.0,
    }
}

/// Interval around `value` with a standard error of `stderr_fraction × value`.
/// The lower bound never drops below zero.
pub fn estimate(value: f64, z: f64, stderr_fraction: f64) -> OutcomeEstimate {
    let margin = z * stderr_fraction * value;
    OutcomeEstimate {
        value,
        lower: (value - margin).max(0.0),
        upper: value + margin,
    }
}
