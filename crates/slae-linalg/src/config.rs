use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LinalgError;

/// Order of a vector norm.
///
/// Serialized as the same short strings accepted by [`FromStr`]:
/// `"1"`, `"2"`, `"inf"`, `"-inf"`, `"0"` or any float `p >= 1`.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
#[serde(try_from = "String", into = "String")]
pub enum NormOrder {
    /// Sum of absolute values (octahedral / Manhattan norm).
    One,
    /// Euclidean norm.
    Two,
    /// Hölder p-norm, `p >= 1`.
    P(f64),
    /// Largest absolute value (cubic norm, "m-norm").
    Inf,
    /// Smallest absolute value. Not a norm.
    NegInf,
    /// Number of non-zero entries. Not a norm either.
    Zero,
}

impl Default for NormOrder {
    fn default() -> Self {
        NormOrder::Two
    }
}

impl NormOrder {
    /// Hölder norm of order `p`, normalizing `1`, `2` and `inf` to their named variants.
    pub fn p(p: f64) -> Result<Self, LinalgError> {
        if p.is_nan() {
            return Err(LinalgError::InvalidOrder(p.to_string()));
        }
        if p == f64::INFINITY {
            return Ok(NormOrder::Inf);
        }
        if p == f64::NEG_INFINITY {
            return Ok(NormOrder::NegInf);
        }
        if p == 0.0 {
            return Ok(NormOrder::Zero);
        }
        if p == 1.0 {
            return Ok(NormOrder::One);
        }
        if p == 2.0 {
            return Ok(NormOrder::Two);
        }
        if p < 1.0 {
            return Err(LinalgError::InvalidOrder(format!(
                "{} (p-norms require p >= 1)",
                p
            )));
        }
        Ok(NormOrder::P(p))
    }
}

impl FromStr for NormOrder {
    type Err = LinalgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "inf" | "+inf" | "max" => Ok(NormOrder::Inf),
            "-inf" | "min" => Ok(NormOrder::NegInf),
            other => other
                .parse::<f64>()
                .map_err(|_| LinalgError::InvalidOrder(s.to_string()))
                .and_then(NormOrder::p),
        }
    }
}

impl fmt::Display for NormOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormOrder::One => write!(f, "1"),
            NormOrder::Two => write!(f, "2"),
            NormOrder::P(p) => write!(f, "{}", p),
            NormOrder::Inf => write!(f, "inf"),
            NormOrder::NegInf => write!(f, "-inf"),
            NormOrder::Zero => write!(f, "0"),
        }
    }
}

impl TryFrom<String> for NormOrder {
    type Error = LinalgError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<NormOrder> for String {
    fn from(value: NormOrder) -> Self {
        value.to_string()
    }
}

/// Order of a matrix norm.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(try_from = "String", into = "String")]
pub enum MatrixNormOrder {
    /// Maximum absolute column sum.
    One,
    /// Minimum absolute column sum.
    NegOne,
    /// Spectral norm (largest singular value).
    Two,
    /// Smallest singular value.
    NegTwo,
    /// Maximum absolute row sum.
    Inf,
    /// Minimum absolute row sum.
    NegInf,
    /// Square root of the sum of squared entries.
    Frobenius,
    /// Sum of singular values.
    Nuclear,
}

impl Default for MatrixNormOrder {
    fn default() -> Self {
        MatrixNormOrder::Two
    }
}

impl FromStr for MatrixNormOrder {
    type Err = LinalgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" => Ok(MatrixNormOrder::One),
            "-1" => Ok(MatrixNormOrder::NegOne),
            "2" => Ok(MatrixNormOrder::Two),
            "-2" => Ok(MatrixNormOrder::NegTwo),
            "inf" | "+inf" => Ok(MatrixNormOrder::Inf),
            "-inf" => Ok(MatrixNormOrder::NegInf),
            "fro" | "frobenius" => Ok(MatrixNormOrder::Frobenius),
            "nuc" | "nuclear" => Ok(MatrixNormOrder::Nuclear),
            _ => Err(LinalgError::InvalidOrder(format!(
                "{} (expected one of 1, -1, 2, -2, inf, -inf, fro, nuc)",
                s
            ))),
        }
    }
}

impl fmt::Display for MatrixNormOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MatrixNormOrder::One => "1",
            MatrixNormOrder::NegOne => "-1",
            MatrixNormOrder::Two => "2",
            MatrixNormOrder::NegTwo => "-2",
            MatrixNormOrder::Inf => "inf",
            MatrixNormOrder::NegInf => "-inf",
            MatrixNormOrder::Frobenius => "fro",
            MatrixNormOrder::Nuclear => "nuc",
        };
        write!(f, "{}", name)
    }
}

impl TryFrom<String> for MatrixNormOrder {
    type Error = LinalgError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MatrixNormOrder> for String {
    fn from(value: MatrixNormOrder) -> Self {
        value.to_string()
    }
}
