//! Small ndarray-like types used throughout the crate.
//!
//! Provides `Array2` (2D, row-major) and `Array1` (1D) containers with the
//! arithmetic the norm, solve and conditioning modules need. Decompositions
//! convert to `nalgebra` types at the boundary and back.
pub mod matrix;
pub mod vector;

pub use matrix::{Array2, ShapeError};
pub use vector::Array1;
