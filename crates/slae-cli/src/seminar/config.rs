use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use slae_linalg::conditioning::PerturbationStudy;
use slae_linalg::iterative::IterativeMethod;
use slae_linalg::math::{Array1, Array2};

/// Inputs of the seminar walk-through. Every field has a default, so a config
/// file only needs the values it wants to change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeminarConfig {
    /// Vector whose l1, l2 and max norms are shown.
    pub norm_vector: Vec<f64>,
    /// Pair of vectors for distances, dot product and angle.
    pub distance_pair: (Vec<f64>, Vec<f64>),
    /// Shape of the `0..rows*cols` matrix used for matrix norms.
    pub arange_shape: (usize, usize),
    /// Leading pivot of the round-off demonstration.
    pub roundoff_eps: f64,
    pub system_matrix: Vec<Vec<f64>>,
    pub rhs: Vec<f64>,
    /// Right-hand side after rounding errors in the data.
    pub perturbed_rhs: Vec<f64>,
    pub perturbation: PerturbationStudy,
    pub iterative_matrix: Vec<Vec<f64>>,
    pub iterative_rhs: Vec<f64>,
    pub iterative_method: IterativeMethod,
    pub tolerance: f64,
    pub max_iterations: usize,
    /// Decimal places in the rendered report.
    pub precision: usize,
}

impl Default for SeminarConfig {
    fn default() -> Self {
        SeminarConfig {
            norm_vector: vec![-1.0, 2.0, -1.0],
            distance_pair: (vec![1.0, 2.0, -3.0], vec![-4.0, 3.0, 8.0]),
            arange_shape: (3, 4),
            roundoff_eps: 1e-20,
            system_matrix: vec![vec![10.0, 9.0], vec![9.0, 8.0]],
            rhs: vec![19.0, 17.0],
            perturbed_rhs: vec![18.9, 17.1],
            perturbation: PerturbationStudy::default(),
            iterative_matrix: vec![
                vec![10.0, -1.0, 2.0, 0.0],
                vec![-1.0, 11.0, -1.0, 3.0],
                vec![2.0, -1.0, 10.0, -1.0],
                vec![0.0, 3.0, -1.0, 8.0],
            ],
            iterative_rhs: vec![6.0, 25.0, -11.0, 15.0],
            iterative_method: IterativeMethod::GaussSeidel,
            tolerance: 1e-10,
            max_iterations: 1000,
            precision: 6,
        }
    }
}

impl SeminarConfig {
    pub fn norm_vector(&self) -> Array1<f64> {
        Array1::from_vec(self.norm_vector.clone())
    }

    pub fn system_matrix(&self) -> Result<Array2<f64>> {
        Array2::from_rows(self.system_matrix.clone()).context("system_matrix has ragged rows")
    }

    pub fn iterative_matrix(&self) -> Result<Array2<f64>> {
        Array2::from_rows(self.iterative_matrix.clone())
            .context("iterative_matrix has ragged rows")
    }
}

/// Load a seminar configuration from a JSON file.
pub fn load_seminar_config<P: AsRef<Path>>(path: P) -> Result<SeminarConfig> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config: {}", path.as_ref().display()))?;
    let config: SeminarConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.as_ref().display()))?;
    Ok(config)
}
