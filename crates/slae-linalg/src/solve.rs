//! Direct solution of square linear systems via LU with partial pivoting.

use crate::config::NormOrder;
use crate::error::{LinalgError, Result};
use crate::math::{Array1, Array2};
use crate::norms::vector_norm;

fn ensure_square(a: &Array2<f64>) -> Result<usize> {
    if !a.is_square() {
        return Err(LinalgError::NotSquare {
            rows: a.nrows(),
            cols: a.ncols(),
        });
    }
    if a.is_empty() {
        return Err(LinalgError::Empty);
    }
    Ok(a.nrows())
}

/// Solve `A x = b`.
///
/// # Arguments
///
/// * `a` - Square coefficient matrix.
/// * `b` - Right-hand side, one entry per row of `a`.
///
/// # Returns
///
/// The solution vector, or [`LinalgError::Singular`] when elimination hits an
/// exact zero pivot or the result is not finite.
pub fn solve(a: &Array2<f64>, b: &Array1<f64>) -> Result<Array1<f64>> {
    let n = ensure_square(a)?;
    if b.len() != n {
        return Err(LinalgError::DimensionMismatch {
            op: "solve",
            left: a.shape(),
            right: (b.len(), 1),
        });
    }
    if !a.is_finite() || !b.is_finite() {
        return Err(LinalgError::NonFinite);
    }

    let lu = a.to_dmatrix().lu();
    let x = lu.solve(&b.to_dvector()).ok_or(LinalgError::Singular)?;
    let x = Array1::from_dvector(&x);
    if !x.is_finite() {
        return Err(LinalgError::Singular);
    }

    log::debug!("[SLAE::Solve] solved {}x{} system: x = {}", n, n, x);
    Ok(x)
}

pub fn determinant(a: &Array2<f64>) -> Result<f64> {
    ensure_square(a)?;
    Ok(a.to_dmatrix().lu().determinant())
}

pub fn inverse(a: &Array2<f64>) -> Result<Array2<f64>> {
    ensure_square(a)?;
    if !a.is_finite() {
        return Err(LinalgError::NonFinite);
    }
    let inv = a
        .to_dmatrix()
        .lu()
        .try_inverse()
        .ok_or(LinalgError::Singular)?;
    let inv = Array2::from_dmatrix(&inv);
    if !inv.is_finite() {
        return Err(LinalgError::Singular);
    }
    Ok(inv)
}

/// `b - A x`.
pub fn residual(a: &Array2<f64>, x: &Array1<f64>, b: &Array1<f64>) -> Result<Array1<f64>> {
    b.sub(&a.matvec(x)?)
}

/// `||b - A x||_2 / ||b||_2`, or the absolute residual when `b` is zero.
pub fn relative_residual(a: &Array2<f64>, x: &Array1<f64>, b: &Array1<f64>) -> Result<f64> {
    let r = vector_norm(&residual(a, x, b)?, NormOrder::Two)?;
    let nb = vector_norm(b, NormOrder::Two)?;
    Ok(if nb == 0.0 { r } else { r / nb })
}
