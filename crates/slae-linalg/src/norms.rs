//! Vector norms, distances, inner products and matrix norms.
//!
//! For vectors `ord = 1` is the sum of absolute values, `ord = 2` the
//! Euclidean length, `ord = inf` the largest absolute value. For matrices
//! `ord = 1` / `ord = inf` are the induced column / row sum norms and
//! `ord = 2` is the spectral norm.
//!
//! NaN entries are rejected for every order; infinite entries only for orders
//! where the result would not be meaningful.

use crate::config::{MatrixNormOrder, NormOrder};
use crate::decomposition::singular_values;
use crate::error::{LinalgError, Result};
use crate::math::{Array1, Array2};

/// Norm of a vector for the given order.
///
/// # Arguments
///
/// * `x` - The vector.
/// * `ord` - Which norm to take.
///
/// # Returns
///
/// The norm. An empty vector has norm 0 for every order except `NegInf`,
/// which has no minimum and yields [`LinalgError::Empty`].
pub fn vector_norm(x: &Array1<f64>, ord: NormOrder) -> Result<f64> {
    if x.iter().any(|v| v.is_nan())
        || (!x.is_finite() && !matches!(ord, NormOrder::Inf | NormOrder::NegInf))
    {
        return Err(LinalgError::NonFinite);
    }
    let abs = x.iter().map(|v| v.abs());
    let value: f64 = match ord {
        NormOrder::One => abs.sum(),
        NormOrder::Two => euclidean(x.as_slice()),
        NormOrder::P(p) => {
            if p.is_nan() || p < 1.0 {
                return Err(LinalgError::InvalidOrder(p.to_string()));
            }
            scaled_p_norm(x.as_slice(), p)
        }
        NormOrder::Inf => abs.fold(0.0, f64::max),
        NormOrder::NegInf => {
            if x.is_empty() {
                return Err(LinalgError::Empty);
            }
            abs.fold(f64::INFINITY, f64::min)
        }
        NormOrder::Zero => abs.filter(|&v| v != 0.0).count() as f64,
    };
    Ok(value)
}

/// Scaled sum of squares, so entries around 1e200 do not overflow.
fn euclidean(values: &[f64]) -> f64 {
    let scale = values.iter().fold(0.0f64, |m, v| m.max(v.abs()));
    if scale == 0.0 {
        return 0.0;
    }
    let sum_sq: f64 = values.iter().map(|v| (v / scale).powi(2)).sum();
    scale * sum_sq.sqrt()
}

/// Same rescaling as [`euclidean`] for a general `p`.
fn scaled_p_norm(values: &[f64], p: f64) -> f64 {
    let scale = values.iter().fold(0.0f64, |m, v| m.max(v.abs()));
    if scale == 0.0 {
        return 0.0;
    }
    let sum: f64 = values.iter().map(|v| (v.abs() / scale).powf(p)).sum();
    scale * sum.powf(1.0 / p)
}

/// Euclidean length, `sqrt(<x, x>)`.
pub fn length(x: &Array1<f64>) -> Result<f64> {
    vector_norm(x, NormOrder::Two)
}

/// `||x - y||` in the given order.
pub fn distance(x: &Array1<f64>, y: &Array1<f64>, ord: NormOrder) -> Result<f64> {
    vector_norm(&x.sub(y)?, ord)
}

pub fn dot(x: &Array1<f64>, y: &Array1<f64>) -> Result<f64> {
    x.dot(y)
}

/// `<x, y> / (|x| |y|)`, clamped to `[-1, 1]` against round-off.
pub fn cosine_similarity(x: &Array1<f64>, y: &Array1<f64>) -> Result<f64> {
    let inner = dot(x, y)?;
    let nx = length(x)?;
    let ny = length(y)?;
    if nx == 0.0 || ny == 0.0 {
        return Err(LinalgError::ZeroVector);
    }
    Ok((inner / nx / ny).clamp(-1.0, 1.0))
}

/// Angle between two non-zero vectors in radians, in `[0, pi]`.
pub fn angle(x: &Array1<f64>, y: &Array1<f64>) -> Result<f64> {
    Ok(cosine_similarity(x, y)?.acos())
}

/// Norm of a matrix for the given order.
pub fn matrix_norm(a: &Array2<f64>, ord: MatrixNormOrder) -> Result<f64> {
    if a.is_empty() {
        return Err(LinalgError::Empty);
    }
    if a.as_slice().iter().any(|v| v.is_nan()) {
        return Err(LinalgError::NonFinite);
    }
    let value: f64 = match ord {
        MatrixNormOrder::One => column_sums(a).fold(0.0, f64::max),
        MatrixNormOrder::NegOne => column_sums(a).fold(f64::INFINITY, f64::min),
        MatrixNormOrder::Inf => row_sums(a).fold(0.0, f64::max),
        MatrixNormOrder::NegInf => row_sums(a).fold(f64::INFINITY, f64::min),
        MatrixNormOrder::Frobenius => {
            if !a.is_finite() {
                return Err(LinalgError::NonFinite);
            }
            euclidean(a.as_slice())
        }
        MatrixNormOrder::Two => singular_values(a)?.iter().copied().fold(0.0, f64::max),
        MatrixNormOrder::NegTwo => singular_values(a)?
            .iter()
            .copied()
            .fold(f64::INFINITY, f64::min),
        MatrixNormOrder::Nuclear => singular_values(a)?.iter().sum(),
    };
    Ok(value)
}

fn column_sums(a: &Array2<f64>) -> impl Iterator<Item = f64> + '_ {
    (0..a.ncols()).map(move |c| (0..a.nrows()).map(|r| a[(r, c)].abs()).sum::<f64>())
}

fn row_sums(a: &Array2<f64>) -> impl Iterator<Item = f64> + '_ {
    (0..a.nrows()).map(move |r| a.row_slice(r).iter().map(|v| v.abs()).sum::<f64>())
}
