use std::error::Error;
use std::fmt;

use crate::math::ShapeError;

pub type Result<T> = std::result::Result<T, LinalgError>;

/// Failures reported by the numeric routines.
#[derive(Debug, Clone, PartialEq)]
pub enum LinalgError {
    Shape(ShapeError),
    LengthMismatch {
        left: usize,
        right: usize,
    },
    DimensionMismatch {
        op: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    },
    NotSquare {
        rows: usize,
        cols: usize,
    },
    Singular,
    ZeroVector,
    Empty,
    InvalidOrder(String),
    InvalidParameter(String),
    ZeroPivot(usize),
    ZeroDiagonal(usize),
    NonFinite,
}

impl fmt::Display for LinalgError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LinalgError::Shape(e) => write!(f, "{}", e),
            LinalgError::LengthMismatch { left, right } => {
                write!(f, "Vectors must have equal length (got {} and {})", left, right)
            }
            LinalgError::DimensionMismatch { op, left, right } => write!(
                f,
                "Incompatible shapes for {}: {:?} and {:?}",
                op, left, right
            ),
            LinalgError::NotSquare { rows, cols } => {
                write!(f, "Matrix must be square, got {}x{}", rows, cols)
            }
            LinalgError::Singular => write!(f, "Singular matrix"),
            LinalgError::ZeroVector => write!(f, "Operation is undefined for a zero vector"),
            LinalgError::Empty => write!(f, "Operation is undefined for an empty array"),
            LinalgError::InvalidOrder(order) => write!(f, "Invalid norm order: {}", order),
            LinalgError::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
            LinalgError::ZeroPivot(k) => write!(f, "Zero pivot encountered at step {}", k),
            LinalgError::ZeroDiagonal(i) => write!(f, "Zero diagonal entry in row {}", i),
            LinalgError::NonFinite => write!(f, "Input or result contains NaN or infinite values"),
        }
    }
}

impl Error for LinalgError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            LinalgError::Shape(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ShapeError> for LinalgError {
    fn from(e: ShapeError) -> Self {
        LinalgError::Shape(e)
    }
}
