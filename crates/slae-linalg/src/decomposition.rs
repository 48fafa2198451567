//! Singular value decomposition and a pivot-free LU factorization.
//!
//! The SVD is delegated to `nalgebra`. The LU routine performs no row
//! exchanges, so a tiny leading pivot shows up as round-off in `L U`.

use nalgebra::SVD;

use crate::error::{LinalgError, Result};
use crate::math::{Array1, Array2};

/// Thin singular value decomposition `A = U diag(s) V^T`.
#[derive(Clone, Debug)]
pub struct Svd {
    pub u: Array2<f64>,
    /// Sorted in non-increasing order.
    pub singular_values: Array1<f64>,
    pub v_t: Array2<f64>,
}

impl Svd {
    pub fn largest(&self) -> Option<f64> {
        self.singular_values.iter().copied().next()
    }

    pub fn smallest(&self) -> Option<f64> {
        self.singular_values.iter().copied().last()
    }

    /// Numerical rank with the usual `max(m, n) * eps * s_max` cutoff.
    pub fn rank(&self) -> usize {
        let (m, n) = (self.u.nrows(), self.v_t.ncols());
        let tol = self.largest().unwrap_or(0.0) * m.max(n) as f64 * f64::EPSILON;
        self.singular_values.iter().filter(|&&s| s > tol).count()
    }
}

pub fn svd(a: &Array2<f64>) -> Result<Svd> {
    if a.is_empty() {
        return Err(LinalgError::Empty);
    }
    if !a.is_finite() {
        return Err(LinalgError::NonFinite);
    }

    let decomposition = SVD::try_new(a.to_dmatrix(), true, true, f64::EPSILON, 0)
        .ok_or(LinalgError::NonFinite)?;
    let (u, v_t) = match (decomposition.u, decomposition.v_t) {
        (Some(u), Some(v_t)) => (u, v_t),
        _ => return Err(LinalgError::NonFinite),
    };
    let sigma = decomposition.singular_values;

    // nalgebra does not promise an ordering; permute U columns and V^T rows to match
    let mut order: Vec<usize> = (0..sigma.len()).collect();
    order.sort_by(|&i, &j| sigma[j].total_cmp(&sigma[i]));

    let k = order.len();
    let mut u_sorted = Array2::zeros(u.nrows(), k);
    let mut v_t_sorted = Array2::zeros(k, v_t.ncols());
    for (dst, &src) in order.iter().enumerate() {
        for r in 0..u.nrows() {
            u_sorted[(r, dst)] = u[(r, src)];
        }
        for c in 0..v_t.ncols() {
            v_t_sorted[(dst, c)] = v_t[(src, c)];
        }
    }
    let singular_values: Array1<f64> = order.iter().map(|&i| sigma[i]).collect();

    log::trace!("[SLAE::Svd] singular values: {}", singular_values);

    Ok(Svd {
        u: u_sorted,
        singular_values,
        v_t: v_t_sorted,
    })
}

pub fn singular_values(a: &Array2<f64>) -> Result<Array1<f64>> {
    Ok(svd(a)?.singular_values)
}

/// Multiply the factors back together.
pub fn reconstruct(decomposition: &Svd) -> Result<Array2<f64>> {
    let mut us = decomposition.u.clone();
    for r in 0..us.nrows() {
        for c in 0..us.ncols() {
            us[(r, c)] *= decomposition.singular_values[c];
        }
    }
    us.matmul(&decomposition.v_t)
}

/// Doolittle elimination without row exchanges: `A = L U` with a unit lower
/// triangular `L`.
pub fn lu_no_pivot(a: &Array2<f64>) -> Result<(Array2<f64>, Array2<f64>)> {
    if !a.is_square() {
        return Err(LinalgError::NotSquare {
            rows: a.nrows(),
            cols: a.ncols(),
        });
    }
    let n = a.nrows();
    let mut l = Array2::eye(n);
    let mut u = a.clone();

    for k in 0..n {
        let pivot = u[(k, k)];
        if pivot == 0.0 {
            return Err(LinalgError::ZeroPivot(k));
        }
        for i in (k + 1)..n {
            let factor = u[(i, k)] / pivot;
            l[(i, k)] = factor;
            u[(i, k)] = 0.0;
            for j in (k + 1)..n {
                u[(i, j)] -= factor * u[(k, j)];
            }
        }
    }

    Ok((l, u))
}

/// Result of re-multiplying pivot-free LU factors of a badly scaled matrix.
#[derive(Clone, Debug)]
pub struct RoundoffDemo {
    pub original: Array2<f64>,
    pub l: Array2<f64>,
    pub u: Array2<f64>,
    pub product: Array2<f64>,
    pub max_abs_error: f64,
}

/// Factor `[[eps, 1], [1, 1]]` without pivoting and multiply the factors back.
///
/// With `eps = 1e-20` the exact factors are `L = [[1, 0], [1e20, 1]]` and
/// `U = [[1e-20, 1], [0, 1 - 1e20]]`; in floating point `1 - 1e20` rounds to
/// `-1e20` and the bottom-right entry of `L U` comes back as `0` instead of `1`.
pub fn lu_roundoff_demo(eps: f64) -> Result<RoundoffDemo> {
    let original = Array2::from_shape_vec((2, 2), vec![eps, 1.0, 1.0, 1.0])?;
    let (l, u) = lu_no_pivot(&original)?;
    let product = l.matmul(&u)?;
    let max_abs_error = product.max_abs_diff(&original)?;

    log::debug!(
        "[SLAE::Lu] round-off demo with eps={:e}: max |LU - A| = {:e}",
        eps,
        max_abs_error
    );

    Ok(RoundoffDemo {
        original,
        l,
        u,
        product,
        max_abs_error,
    })
}
