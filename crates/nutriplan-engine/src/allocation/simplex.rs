//! Dense two-phase simplex for small allocation programs.
//!
//! Maximizes `c·x` subject to `≤`/`≥` rows, `x ≥ 0`, and optional upper
//! bounds. Bland's rule prevents cycling. Every non-optimal outcome is an
//! explicit error; a zero solution is only returned when it is optimal.

use nutriplan_core::errors::AllocationError;

const EPS: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    LessEq,
    GreaterEq,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    pub coefficients: Vec<f64>,
    pub kind: ConstraintKind,
    pub rhs: f64,
}

impl Constraint {
    pub fn less_eq(coefficients: Vec<f64>, rhs: f64) -> Self {
        Self {
            coefficients,
            kind: ConstraintKind::LessEq,
            rhs,
        }
    }

    pub fn greater_eq(coefficients: Vec<f64>, rhs: f64) -> Self {
        Self {
            coefficients,
            kind: ConstraintKind::GreaterEq,
            rhs,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinearProgram {
    /// Objective coefficients (maximized).
    pub objective: Vec<f64>,
    pub constraints: Vec<Constraint>,
    /// Per-variable upper bound; `None` is unbounded above.
    pub upper_bounds: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LpSolution {
    pub values: Vec<f64>,
    pub objective: f64,
    pub iterations: usize,
}

impl LinearProgram {
    pub fn new(objective: Vec<f64>) -> Self {
        let n = objective.len();
        Self {
            objective,
            constraints: Vec::new(),
            upper_bounds: vec![None; n],
        }
    }

    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    pub fn with_upper_bounds(mut self, bound: f64) -> Self {
        self.upper_bounds = vec![Some(bound); self.objective.len()];
        self
    }

    pub fn solve(&self, max_iterations: usize) -> Result<LpSolution, AllocationError> {
        self.check_inputs()?;
        let n = self.objective.len();

        // Bounds become ordinary rows; negative right-hand sides are flipped.
        let mut rows: Vec<(Vec<f64>, ConstraintKind, f64)> = self
            .constraints
            .iter()
            .map(|c| (c.coefficients.clone(), c.kind, c.rhs))
            .collect();
        for (j, bound) in self.upper_bounds.iter().enumerate() {
            if let Some(bound) = bound {
                let mut coefficients = vec![0.0; n];
                coefficients[j] = 1.0;
                rows.push((coefficients, ConstraintKind::LessEq, *bound));
            }
        }
        for (coefficients, kind, rhs) in &mut rows {
            if *rhs < 0.0 {
                coefficients.iter_mut().for_each(|a| *a = -*a);
                *rhs = -*rhs;
                *kind = match kind {
                    ConstraintKind::LessEq => ConstraintKind::GreaterEq,
                    ConstraintKind::GreaterEq => ConstraintKind::LessEq,
                };
            }
        }

        let m = rows.len();
        let ge_count = rows
            .iter()
            .filter(|(_, k, _)| *k == ConstraintKind::GreaterEq)
            .count();
        // Columns: originals, one slack/surplus per row, one artificial per ≥ row, rhs.
        let slack_start = n;
        let art_start = n + m;
        let width = n + m + ge_count;

        let mut tableau = vec![vec![0.0; width + 1]; m];
        let mut basis = vec![0usize; m];
        let mut next_art = art_start;
        for (i, (coefficients, kind, rhs)) in rows.iter().enumerate() {
            tableau[i][..n].copy_from_slice(coefficients);
            tableau[i][width] = *rhs;
            match kind {
                ConstraintKind::LessEq => {
                    tableau[i][slack_start + i] = 1.0;
                    basis[i] = slack_start + i;
                }
                ConstraintKind::GreaterEq => {
                    tableau[i][slack_start + i] = -1.0;
                    tableau[i][next_art] = 1.0;
                    basis[i] = next_art;
                    next_art += 1;
                }
            }
        }

        let mut iterations = 0;
        if ge_count > 0 {
            let mut phase1 = vec![0.0; width];
            phase1[art_start..width].iter_mut().for_each(|c| *c = -1.0);
            let all = vec![true; width];
            run(&mut tableau, &mut basis, &phase1, &all, max_iterations, &mut iterations)?;

            let infeasibility: f64 = basis
                .iter()
                .zip(&tableau)
                .filter(|(b, _)| **b >= art_start)
                .map(|(_, row)| row[width])
                .sum();
            let scale = rows.iter().map(|(_, _, rhs)| rhs.abs()).sum::<f64>().max(1.0);
            if infeasibility > EPS * scale {
                return Err(AllocationError::Infeasible {
                    reason: "constraints cannot all be satisfied".to_string(),
                });
            }
            // Drive zero-level artificials out of the basis where possible.
            for i in 0..m {
                if basis[i] >= art_start {
                    if let Some(j) = (0..art_start).find(|&j| tableau[i][j].abs() > EPS) {
                        pivot(&mut tableau, &mut basis, i, j);
                    }
                }
            }
        }

        let mut phase2 = vec![0.0; width];
        phase2[..n].copy_from_slice(&self.objective);
        let allowed: Vec<bool> = (0..width).map(|j| j < art_start).collect();
        run(&mut tableau, &mut basis, &phase2, &allowed, max_iterations, &mut iterations)?;

        let mut values = vec![0.0; n];
        for (i, &b) in basis.iter().enumerate() {
            if b < n {
                values[b] = tableau[i][width].max(0.0);
            }
        }
        let objective = values
            .iter()
            .zip(&self.objective)
            .map(|(x, c)| x * c)
            .sum();
        Ok(LpSolution {
            values,
            objective,
            iterations,
        })
    }

    fn check_inputs(&self) -> Result<(), AllocationError> {
        let non_finite = |context: &str| AllocationError::NonFiniteInput {
            context: context.to_string(),
        };
        if self.objective.iter().any(|c| !c.is_finite()) {
            return Err(non_finite("objective"));
        }
        for c in &self.constraints {
            if c.coefficients.len() != self.objective.len() {
                return Err(AllocationError::Infeasible {
                    reason: "constraint width does not match variable count".to_string(),
                });
            }
            if !c.rhs.is_finite() || c.coefficients.iter().any(|a| !a.is_finite()) {
                return Err(non_finite("constraint"));
            }
        }
        if self.upper_bounds.iter().flatten().any(|b| !b.is_finite()) {
            return Err(non_finite("upper bound"));
        }
        Ok(())
    }
}

/// Maximize `cost` from the current basic feasible solution.
fn run(
    tableau: &mut [Vec<f64>],
    basis: &mut [usize],
    cost: &[f64],
    allowed: &[bool],
    max_iterations: usize,
    iterations: &mut usize,
) -> Result<(), AllocationError> {
    let width = cost.len();
    loop {
        // Bland: lowest-index column with positive reduced cost enters.
        let entering = (0..width).find(|&j| {
            allowed[j] && {
                let reduced = cost[j]
                    - basis
                        .iter()
                        .zip(tableau.iter())
                        .map(|(&b, row)| cost[b] * row[j])
                        .sum::<f64>();
                reduced > EPS
            }
        });
        let Some(col) = entering else {
            return Ok(());
        };

        // Ratio test; ties go to the lowest basis index.
        let mut leaving: Option<(usize, f64)> = None;
        for (i, row) in tableau.iter().enumerate() {
            if row[col] > EPS {
                let ratio = row[width] / row[col];
                leaving = match leaving {
                    None => Some((i, ratio)),
                    Some((best, best_ratio)) => {
                        if ratio < best_ratio - EPS
                            || (ratio <= best_ratio + EPS && basis[i] < basis[best])
                        {
                            Some((i, ratio))
                        } else {
                            Some((best, best_ratio))
                        }
                    }
                };
            }
        }
        let Some((row, _)) = leaving else {
            return Err(AllocationError::Unbounded);
        };

        if *iterations >= max_iterations {
            return Err(AllocationError::IterationLimit {
                iterations: *iterations,
            });
        }
        pivot(tableau, basis, row, col);
        *iterations += 1;
    }
}

fn pivot(tableau: &mut [Vec<f64>], basis: &mut [usize], row: usize, col: usize) {
    let divisor = tableau[row][col];
    tableau[row].iter_mut().for_each(|v| *v /= divisor);
    let pivot_row = tableau[row].clone();
    for (i, other) in tableau.iter_mut().enumerate() {
        if i == row {
            continue;
        }
        let factor = other[col];
        if factor.abs() > 0.0 {
            other
                .iter_mut()
                .zip(&pivot_row)
                .for_each(|(v, p)| *v -= factor * p);
        }
    }
    basis[row] = col;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_two_variable_program() {
        // max 3x + 5y; x ≤ 4; 2y ≤ 12; 3x + 2y ≤ 18 → (2, 6), 36
        let lp = LinearProgram::new(vec![3.0, 5.0])
            .with_constraint(Constraint::less_eq(vec![1.0, 0.0], 4.0))
            .with_constraint(Constraint::less_eq(vec![0.0, 2.0], 12.0))
            .with_constraint(Constraint::less_eq(vec![3.0, 2.0], 18.0));
        let sol = lp.solve(100).unwrap();
        assert!((sol.values[0] - 2.0).abs() < 1e-9);
        assert!((sol.values[1] - 6.0).abs() < 1e-9);
        assert!((sol.objective - 36.0).abs() < 1e-9);
    }

    #[test]
    fn test_greater_eq_rows_use_phase_one() {
        // max -x - y (min x + y) with x + y ≥ 2, x ≤ 5
        let lp = LinearProgram::new(vec![-1.0, -1.0])
            .with_constraint(Constraint::greater_eq(vec![1.0, 1.0], 2.0))
            .with_upper_bounds(5.0);
        let sol = lp.solve(100).unwrap();
        assert!((sol.values[0] + sol.values[1] - 2.0).abs() < 1e-9);
        assert!((sol.objective + 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_infeasible_program_is_error() {
        let lp = LinearProgram::new(vec![1.0])
            .with_constraint(Constraint::greater_eq(vec![1.0], 10.0))
            .with_upper_bounds(5.0);
        assert!(matches!(lp.solve(100), Err(AllocationError::Infeasible { .. })));
    }

    #[test]
    fn test_unbounded_program_is_error() {
        let lp = LinearProgram::new(vec![1.0, 0.0])
            .with_constraint(Constraint::less_eq(vec![0.0, 1.0], 3.0));
        assert_eq!(lp.solve(100), Err(AllocationError::Unbounded));
    }

    #[test]
    fn test_iteration_limit_is_error() {
        let lp = LinearProgram::new(vec![1.0, 1.0]).with_upper_bounds(1.0);
        assert_eq!(
            lp.solve(1),
            Err(AllocationError::IterationLimit { iterations: 1 })
        );
    }

    #[test]
    fn test_non_finite_objective_is_error() {
        let lp = LinearProgram::new(vec![f64::NAN]).with_upper_bounds(1.0);
        assert!(matches!(lp.solve(10), Err(AllocationError::NonFiniteInput { .. })));
    }

    #[test]
    fn test_zero_solution_when_optimal() {
        let lp = LinearProgram::new(vec![-1.0, -2.0]).with_upper_bounds(10.0);
        let sol = lp.solve(10).unwrap();
        assert_eq!(sol.values, vec![0.0, 0.0]);
        assert_eq!(sol.iterations, 0);
    }
}
