//! Condition numbers and the sensitivity of `A x = b` to perturbations.
//!
//! For any consistent norm, a relative perturbation `||db|| / ||b||` of the
//! right-hand side changes the solution by at most
//! `cond(A) * ||db|| / ||b||` relative to `||x||`. A condition number of
//! `10^k` therefore costs up to `k` significant digits on top of the
//! arithmetic's own round-off.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use std::fmt;

use crate::config::{MatrixNormOrder, NormOrder};
use crate::decomposition::svd;
use crate::error::{LinalgError, Result};
use crate::math::{Array1, Array2};
use crate::norms::{matrix_norm, vector_norm};
use crate::solve::{determinant, inverse, solve};

/// Upper bound of the well-conditioned range.
pub const WELL_CONDITIONED_MAX: f64 = 100.0;
/// Lower bound of the ill-conditioned range.
pub const ILL_CONDITIONED_MIN: f64 = 1000.0;

/// Condition number `cond(A) = ||A|| * ||A^-1||`.
///
/// For the 2-norm this is `s_max / s_min` and non-square matrices are
/// accepted. Other orders need an inverse and therefore a square matrix.
/// Singular matrices have an infinite condition number.
pub fn condition_number(a: &Array2<f64>, ord: MatrixNormOrder) -> Result<f64> {
    match ord {
        MatrixNormOrder::Two | MatrixNormOrder::NegTwo => {
            let decomposition = svd(a)?;
            let (s_max, s_min) = match (decomposition.largest(), decomposition.smallest()) {
                (Some(s_max), Some(s_min)) => (s_max, s_min),
                _ => return Err(LinalgError::Empty),
            };
            let cond = if s_min == 0.0 {
                f64::INFINITY
            } else {
                s_max / s_min
            };
            Ok(if ord == MatrixNormOrder::NegTwo {
                1.0 / cond
            } else {
                cond
            })
        }
        _ => {
            if !a.is_square() {
                return Err(LinalgError::NotSquare {
                    rows: a.nrows(),
                    cols: a.ncols(),
                });
            }
            match inverse(a) {
                Ok(inv) => Ok(matrix_norm(a, ord)? * matrix_norm(&inv, ord)?),
                Err(LinalgError::Singular) => Ok(f64::INFINITY),
                Err(e) => Err(e),
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Conditioning {
    WellConditioned,
    Moderate,
    IllConditioned,
    Singular,
}

impl Conditioning {
    pub fn classify(cond: f64) -> Self {
        if !cond.is_finite() {
            Conditioning::Singular
        } else if cond <= WELL_CONDITIONED_MAX {
            Conditioning::WellConditioned
        } else if cond < ILL_CONDITIONED_MIN {
            Conditioning::Moderate
        } else {
            Conditioning::IllConditioned
        }
    }
}

impl fmt::Display for Conditioning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Conditioning::WellConditioned => "well-conditioned",
            Conditioning::Moderate => "moderately conditioned",
            Conditioning::IllConditioned => "ill-conditioned",
            Conditioning::Singular => "singular",
        };
        write!(f, "{}", label)
    }
}

/// Significant decimal digits that may be lost, `log10(cond)`, never negative.
pub fn digits_lost(cond: f64) -> f64 {
    cond.log10().max(0.0)
}

/// Worst-case relative error of the solution for a given relative error of the data.
pub fn relative_error_bound(cond: f64, rel_perturbation: f64) -> f64 {
    cond * rel_perturbation
}

#[derive(Debug, Clone)]
pub struct ConditioningReport {
    pub order: MatrixNormOrder,
    pub cond: f64,
    pub classification: Conditioning,
    pub digits_lost: f64,
    /// Only available for square matrices.
    pub determinant: Option<f64>,
}

pub fn conditioning_report(a: &Array2<f64>, ord: MatrixNormOrder) -> Result<ConditioningReport> {
    let cond = condition_number(a, ord)?;
    let determinant = if a.is_square() {
        Some(determinant(a)?)
    } else {
        None
    };
    let classification = Conditioning::classify(cond);

    log::info!(
        "[SLAE::Conditioning] cond_{}(A) = {:.4e} ({})",
        ord,
        cond,
        classification
    );

    Ok(ConditioningReport {
        order: ord,
        cond,
        classification,
        digits_lost: digits_lost(cond),
        determinant,
    })
}

/// Randomized right-hand-side perturbation experiment.
///
/// Every trial multiplies each component of `b` by `1 + rel_noise * u` with
/// `u` uniform in `[-1, 1]`, solves the perturbed system and compares the
/// relative change of the solution with the relative change of the data.
/// Trials run in parallel; trial `i` draws from a generator seeded with
/// `seed + i`, so results do not depend on scheduling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PerturbationStudy {
    pub rel_noise: f64,
    pub trials: usize,
    pub seed: u64,
}

impl Default for PerturbationStudy {
    fn default() -> Self {
        Self {
            rel_noise: 0.03,
            trials: 1000,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PerturbationReport {
    pub solution: Array1<f64>,
    pub cond: f64,
    /// `cond * rel_noise`, the worst case allowed by the 2-norm bound.
    pub error_bound: f64,
    pub max_rel_error: f64,
    pub mean_rel_error: f64,
    pub std_rel_error: f64,
    /// Largest observed ratio of solution error to data error.
    pub max_amplification: f64,
    /// Right-hand side of the trial that produced `max_rel_error`.
    pub worst_rhs: Array1<f64>,
    pub worst_solution: Array1<f64>,
}

struct Trial {
    rhs: Array1<f64>,
    solution: Array1<f64>,
    rel_error: f64,
    amplification: f64,
}

impl PerturbationStudy {
    pub fn new(rel_noise: f64, trials: usize, seed: u64) -> Self {
        Self {
            rel_noise,
            trials,
            seed,
        }
    }

    pub fn run(&self, a: &Array2<f64>, b: &Array1<f64>) -> Result<PerturbationReport> {
        if self.trials == 0 {
            return Err(LinalgError::InvalidParameter(
                "perturbation study needs at least one trial".to_string(),
            ));
        }
        if !(self.rel_noise.is_finite() && self.rel_noise >= 0.0) {
            return Err(LinalgError::InvalidParameter(format!(
                "relative noise must be a non-negative number, got {}",
                self.rel_noise
            )));
        }

        let solution = solve(a, b)?;
        let norm_b = vector_norm(b, NormOrder::Two)?;
        let norm_x = vector_norm(&solution, NormOrder::Two)?;
        if norm_b == 0.0 || norm_x == 0.0 {
            return Err(LinalgError::ZeroVector);
        }
        let cond = condition_number(a, MatrixNormOrder::Two)?;

        log::info!(
            "[SLAE::Perturbation] running {} trials with relative noise {}",
            self.trials,
            self.rel_noise
        );

        let trials = (0..self.trials)
            .into_par_iter()
            .map(|i| -> Result<Trial> {
                let mut rng = StdRng::seed_from_u64(self.seed.wrapping_add(i as u64));
                let rhs: Array1<f64> = b
                    .iter()
                    .map(|&v| v * (1.0 + self.rel_noise * rng.gen_range(-1.0..=1.0)))
                    .collect();
                let perturbed = solve(a, &rhs)?;
                let rel_b = vector_norm(&rhs.sub(b)?, NormOrder::Two)? / norm_b;
                let rel_error = vector_norm(&perturbed.sub(&solution)?, NormOrder::Two)? / norm_x;
                let amplification = if rel_b > 0.0 { rel_error / rel_b } else { 0.0 };
                Ok(Trial {
                    rhs,
                    solution: perturbed,
                    rel_error,
                    amplification,
                })
            })
            .collect::<Result<Vec<Trial>>>()?;

        let errors: Vec<f64> = trials.iter().map(|t| t.rel_error).collect();
        let max_rel_error = Statistics::max(errors.iter());
        let mean_rel_error = Statistics::mean(errors.iter());
        let std_rel_error = if errors.len() > 1 {
            Statistics::std_dev(errors.iter())
        } else {
            0.0
        };
        let max_amplification = trials
            .iter()
            .map(|t| t.amplification)
            .fold(0.0, f64::max);

        let worst = trials
            .iter()
            .max_by(|l, r| l.rel_error.total_cmp(&r.rel_error))
            .ok_or(LinalgError::Empty)?;

        log::info!(
            "[SLAE::Perturbation] max relative error {:.4e}, mean {:.4e}, bound {:.4e}",
            max_rel_error,
            mean_rel_error,
            cond * self.rel_noise
        );

        Ok(PerturbationReport {
            error_bound: relative_error_bound(cond, self.rel_noise),
            cond,
            max_rel_error,
            mean_rel_error,
            std_rel_error,
            max_amplification,
            worst_rhs: worst.rhs.clone(),
            worst_solution: worst.solution.clone(),
            solution,
        })
    }
}
