//! Stationary iterative methods: Jacobi and Gauss-Seidel.
//!
//! Each sweep costs O(n^2) for a dense matrix, against O(n^3) for a direct
//! factorization. Convergence is declared when the infinity norm of the
//! update drops below the tolerance.
//!
//! Strict row diagonal dominance guarantees convergence of both methods; the
//! solver logs a warning when it does not hold.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::NormOrder;
use crate::error::{LinalgError, Result};
use crate::math::{Array1, Array2};
use crate::norms::vector_norm;
use crate::solve::residual;

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum IterativeMethod {
    /// Every component of the new iterate is computed from the previous one.
    Jacobi,
    /// Components are updated in place and reused within the same sweep.
    GaussSeidel,
}

impl FromStr for IterativeMethod {
    type Err = LinalgError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "jacobi" => Ok(IterativeMethod::Jacobi),
            "seidel" | "gauss-seidel" | "gauss_seidel" => Ok(IterativeMethod::GaussSeidel),
            _ => Err(LinalgError::InvalidParameter(format!(
                "unknown iterative method {} (expected jacobi or seidel)",
                s
            ))),
        }
    }
}

impl fmt::Display for IterativeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IterativeMethod::Jacobi => write!(f, "Jacobi"),
            IterativeMethod::GaussSeidel => write!(f, "Gauss-Seidel"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvergenceStatus {
    Converged,
    MaxIterationsReached,
    /// The iterate overflowed to a non-finite value.
    Diverged,
}

#[derive(Debug, Clone)]
pub struct IterativeSolution {
    pub x: Array1<f64>,
    pub iterations: usize,
    /// `||b - A x||_2` at the returned iterate.
    pub residual_norm: f64,
    pub status: ConvergenceStatus,
}

#[derive(Debug, Clone)]
pub struct IterativeSolver {
    pub method: IterativeMethod,
    pub tol: f64,
    pub max_iter: usize,
}

impl Default for IterativeSolver {
    fn default() -> Self {
        Self {
            method: IterativeMethod::GaussSeidel,
            tol: 1e-10,
            max_iter: 1000,
        }
    }
}

impl IterativeSolver {
    pub fn new(method: IterativeMethod, tol: f64, max_iter: usize) -> Self {
        Self {
            method,
            tol,
            max_iter,
        }
    }

    /// Iterate from `x0` (zeros when `None`) until the update is below `tol`.
    pub fn solve(
        &self,
        a: &Array2<f64>,
        b: &Array1<f64>,
        x0: Option<&Array1<f64>>,
    ) -> Result<IterativeSolution> {
        if !(self.tol.is_finite() && self.tol > 0.0) {
            return Err(LinalgError::InvalidParameter(format!(
                "tolerance must be a positive number, got {}",
                self.tol
            )));
        }
        if !a.is_square() {
            return Err(LinalgError::NotSquare {
                rows: a.nrows(),
                cols: a.ncols(),
            });
        }
        let n = a.nrows();
        if b.len() != n {
            return Err(LinalgError::DimensionMismatch {
                op: "iterative solve",
                left: a.shape(),
                right: (b.len(), 1),
            });
        }
        if let Some(i) = (0..n).find(|&i| a[(i, i)] == 0.0) {
            return Err(LinalgError::ZeroDiagonal(i));
        }
        if !is_diagonally_dominant(a) {
            log::warn!(
                "[SLAE::Iterative] matrix is not strictly diagonally dominant; {} may not converge",
                self.method
            );
        }

        let mut x = match x0 {
            Some(x0) if x0.len() != n => {
                return Err(LinalgError::LengthMismatch {
                    left: n,
                    right: x0.len(),
                })
            }
            Some(x0) => x0.clone(),
            None => Array1::zeros(n),
        };

        let mut status = ConvergenceStatus::MaxIterationsReached;
        let mut iterations = 0;
        while iterations < self.max_iter {
            let previous = x.clone();
            match self.method {
                IterativeMethod::Jacobi => jacobi_sweep(a, b, &previous, &mut x),
                IterativeMethod::GaussSeidel => seidel_sweep(a, b, &mut x),
            }
            iterations += 1;

            if !x.is_finite() {
                status = ConvergenceStatus::Diverged;
                break;
            }
            let update = vector_norm(&x.sub(&previous)?, NormOrder::Inf)?;
            log::trace!(
                "[SLAE::Iterative] {} iteration {}: ||dx||_inf = {:e}",
                self.method,
                iterations,
                update
            );
            if update < self.tol {
                status = ConvergenceStatus::Converged;
                break;
            }
        }

        let residual_norm = if status == ConvergenceStatus::Diverged {
            f64::INFINITY
        } else {
            vector_norm(&residual(a, &x, b)?, NormOrder::Two)?
        };

        log::debug!(
            "[SLAE::Iterative] {} finished after {} iterations with status {:?}",
            self.method,
            iterations,
            status
        );

        Ok(IterativeSolution {
            x,
            iterations,
            residual_norm,
            status,
        })
    }
}

fn jacobi_sweep(a: &Array2<f64>, b: &Array1<f64>, previous: &Array1<f64>, x: &mut Array1<f64>) {
    for i in 0..a.nrows() {
        let off_diagonal: f64 = a
            .row_slice(i)
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != i)
            .map(|(j, aij)| aij * previous[j])
            .sum();
        x[i] = (b[i] - off_diagonal) / a[(i, i)];
    }
}

fn seidel_sweep(a: &Array2<f64>, b: &Array1<f64>, x: &mut Array1<f64>) {
    for i in 0..a.nrows() {
        let mut off_diagonal = 0.0;
        for (j, aij) in a.row_slice(i).iter().enumerate() {
            if j != i {
                off_diagonal += aij * x[j];
            }
        }
        x[i] = (b[i] - off_diagonal) / a[(i, i)];
    }
}

/// `|a_ii| > sum_{j != i} |a_ij|` for every row.
pub fn is_diagonally_dominant(a: &Array2<f64>) -> bool {
    a.is_square()
        && (0..a.nrows()).all(|i| {
            let off: f64 = a
                .row_slice(i)
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .map(|(_, v)| v.abs())
                .sum();
            a[(i, i)].abs() > off
        })
}
