//! Ridge regression on standardized features.
//!
//! Shared by the fitted coverage baseline and the fitted nutrient-gap model.
//! Zero-variance columns standardize to zero, so the ridge term alone keeps
//! the normal equations solvable.

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

/// A fitted linear model `y = ȳ + β·z` where `z` is the standardized input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RidgeModel {
    means: Vec<f64>,
    scales: Vec<f64>,
    coefficients: Vec<f64>,
    intercept: f64,
    /// Root-mean-square training residual.
    rmse: f64,
}

impl RidgeModel {
    /// Fit on `rows` (one feature vector per sample, all the same length)
    /// against `targets`. `None` when the inputs are empty or ragged or the
    /// normal equations cannot be solved.
    pub fn fit(rows: &[Vec<f64>], targets: &[f64], lambda: f64) -> Option<Self> {
        let n = rows.len();
        let width = rows.first()?.len();
        if n != targets.len() || width == 0 || rows.iter().any(|r| r.len() != width) {
            return None;
        }

        let raw = DMatrix::from_fn(n, width, |i, j| rows[i][j]);
        let means: Vec<f64> = raw.column_iter().map(|c| c.mean()).collect();
        let scales: Vec<f64> = raw
            .column_iter()
            .zip(&means)
            .map(|(c, m)| {
                let sd = (c.iter().map(|v| (v - m).powi(2)).sum::<f64>() / n as f64).sqrt();
                if sd < 1e-12 {
                    1.0
                } else {
                    sd
                }
            })
            .collect();

        let design = DMatrix::from_fn(n, width, |i, j| {
            standardized(rows[i][j], means[j], scales[j])
        });
        let y = DVector::from_column_slice(targets);
        let intercept = y.mean();
        let centered = y.add_scalar(-intercept);

        let gram = design.transpose() * &design + DMatrix::<f64>::identity(width, width) * lambda;
        let rhs = design.transpose() * &centered;
        let beta = solve_normal_equations(gram, &rhs)?;

        let residuals = &design * &beta - &centered;
        let rmse = (residuals.norm_squared() / n as f64).sqrt();

        Some(Self {
            means,
            scales,
            coefficients: beta.iter().copied().collect(),
            intercept,
            rmse,
        })
    }

    pub fn predict(&self, x: &[f64]) -> f64 {
        self.intercept
            + x.iter()
                .zip(&self.means)
                .zip(&self.scales)
                .zip(&self.coefficients)
                .map(|(((v, m), s), b)| b * standardized(*v, *m, *s))
                .sum::<f64>()
    }

    pub fn rmse(&self) -> f64 {
        self.rmse
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }
}

fn standardized(value: f64, mean: f64, scale: f64) -> f64 {
    let z = (value - mean) / scale;
    if z.is_finite() {
        z
    } else {
        0.0
    }
}

/// Solve `(ZᵀZ + λI) β = Zᵀy` by Cholesky factorization. `None` when the
/// system is not positive definite or the solution is not finite.
pub(crate) fn solve_normal_equations(
    gram: DMatrix<f64>,
    rhs: &DVector<f64>,
) -> Option<DVector<f64>> {
    let solution = gram.cholesky()?.solve(rhs);
    solution.iter().all(|v| v.is_finite()).then_some(solution)
}
