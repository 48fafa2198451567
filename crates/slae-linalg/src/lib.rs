//! slae-linalg: norms, distances and conditioning of linear systems.
//!
//! This crate provides small dense containers (`Array1`, `Array2`), vector
//! and matrix norms, a direct solver and SVD backed by `nalgebra`, the
//! classic Jacobi and Gauss-Seidel iterations, and condition number
//! estimates together with a randomized right-hand-side perturbation study.
//!
//! All fallible routines return [`error::Result`]; shape mismatches, singular
//! systems and invalid norm orders are reported as [`LinalgError`] values.
pub mod conditioning;
pub mod config;
pub mod decomposition;
pub mod error;
pub mod iterative;
pub mod math;
pub mod norms;
pub mod solve;

pub use error::{LinalgError, Result};
pub use math::{Array1, Array2};
