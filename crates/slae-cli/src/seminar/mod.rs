//! Scripted walk-through: vector norms, distances and angles, matrix norms,
//! round-off in pivot-free elimination, the conditioning of a 2x2 system
//! and iterative solution of a diagonally dominant one.
pub mod config;
pub mod report;

use anyhow::{Context, Result};

use slae_linalg::conditioning::{conditioning_report, ConditioningReport, PerturbationReport};
use slae_linalg::config::{MatrixNormOrder, NormOrder};
use slae_linalg::decomposition::{lu_roundoff_demo, singular_values, RoundoffDemo};
use slae_linalg::iterative::{IterativeSolution, IterativeSolver};
use slae_linalg::math::{Array1, Array2};
use slae_linalg::norms::{angle, cosine_similarity, distance, dot, matrix_norm, vector_norm};
use slae_linalg::solve::solve;

pub use config::{load_seminar_config, SeminarConfig};

#[derive(Debug, Clone)]
pub struct VectorNormSection {
    pub vector: Array1<f64>,
    pub l1: f64,
    pub l2: f64,
    pub max: f64,
}

#[derive(Debug, Clone)]
pub struct DistanceSection {
    pub a: Array1<f64>,
    pub b: Array1<f64>,
    pub l1: f64,
    pub l2: f64,
    pub dot: f64,
    pub cosine: f64,
    pub angle: f64,
}

#[derive(Debug, Clone)]
pub struct MatrixNormSection {
    pub matrix: Array2<f64>,
    pub one: f64,
    pub two: f64,
    pub inf: f64,
    pub frobenius: f64,
}

#[derive(Debug, Clone)]
pub struct SystemSection {
    pub matrix: Array2<f64>,
    pub rhs: Array1<f64>,
    pub solution: Array1<f64>,
    pub perturbed_rhs: Array1<f64>,
    pub perturbed_solution: Array1<f64>,
    /// `||b' - b|| / ||b||`
    pub rhs_change: f64,
    /// `||x' - x|| / ||x||`
    pub solution_change: f64,
    pub singular_values: Array1<f64>,
    pub conditioning: ConditioningReport,
}

#[derive(Debug, Clone)]
pub struct SeminarReport {
    pub precision: usize,
    pub vector_norms: VectorNormSection,
    pub distances: DistanceSection,
    pub matrix_norms: MatrixNormSection,
    pub roundoff: RoundoffDemo,
    pub system: SystemSection,
    pub perturbation: PerturbationReport,
    pub iterative: IterativeSolution,
    pub iterative_config: IterativeSolver,
    pub iterative_direct: Array1<f64>,
}

pub fn run_seminar(config: &SeminarConfig) -> Result<SeminarReport> {
    log::info!("[SLAE::Seminar] Vector norms");
    let v = config.norm_vector();
    let vector_norms = VectorNormSection {
        l1: vector_norm(&v, NormOrder::One)?,
        l2: vector_norm(&v, NormOrder::Two)?,
        max: vector_norm(&v, NormOrder::Inf)?,
        vector: v,
    };

    log::info!("[SLAE::Seminar] Distances and angles");
    let a = Array1::from_vec(config.distance_pair.0.clone());
    let b = Array1::from_vec(config.distance_pair.1.clone());
    let distances = DistanceSection {
        l1: distance(&a, &b, NormOrder::One).context("distance_pair")?,
        l2: distance(&a, &b, NormOrder::Two)?,
        dot: dot(&a, &b)?,
        cosine: cosine_similarity(&a, &b).context("distance_pair")?,
        angle: angle(&a, &b)?,
        a,
        b,
    };

    log::info!("[SLAE::Seminar] Matrix norms");
    let (rows, cols) = config.arange_shape;
    let m = Array2::arange(rows, cols);
    let matrix_norms = MatrixNormSection {
        one: matrix_norm(&m, MatrixNormOrder::One).context("arange_shape")?,
        two: matrix_norm(&m, MatrixNormOrder::Two)?,
        inf: matrix_norm(&m, MatrixNormOrder::Inf)?,
        frobenius: matrix_norm(&m, MatrixNormOrder::Frobenius)?,
        matrix: m,
    };

    log::info!("[SLAE::Seminar] Round-off without pivoting");
    let roundoff = lu_roundoff_demo(config.roundoff_eps).context("roundoff_eps")?;

    log::info!("[SLAE::Seminar] Conditioning of the linear system");
    let system = system_section(config)?;

    let perturbation = config
        .perturbation
        .run(&system.matrix, &system.rhs)
        .context("Perturbation study failed")?;

    log::info!("[SLAE::Seminar] Iterative solution");
    let iterative_matrix = config.iterative_matrix()?;
    let iterative_rhs = Array1::from_vec(config.iterative_rhs.clone());
    let iterative_config = IterativeSolver::new(
        config.iterative_method,
        config.tolerance,
        config.max_iterations,
    );
    let iterative = iterative_config
        .solve(&iterative_matrix, &iterative_rhs, None)
        .context("Iterative solve failed")?;
    let iterative_direct =
        solve(&iterative_matrix, &iterative_rhs).context("Direct solve of iterative system failed")?;

    Ok(SeminarReport {
        precision: config.precision,
        vector_norms,
        distances,
        matrix_norms,
        roundoff,
        system,
        perturbation,
        iterative,
        iterative_config,
        iterative_direct,
    })
}

fn system_section(config: &SeminarConfig) -> Result<SystemSection> {
    let matrix = config.system_matrix()?;
    let rhs = Array1::from_vec(config.rhs.clone());
    let perturbed_rhs = Array1::from_vec(config.perturbed_rhs.clone());

    let solution = solve(&matrix, &rhs).context("Failed to solve the original system")?;
    let perturbed_solution =
        solve(&matrix, &perturbed_rhs).context("Failed to solve the perturbed system")?;

    let rhs_change = relative_change(&rhs, &perturbed_rhs)?;
    let solution_change = relative_change(&solution, &perturbed_solution)?;

    Ok(SystemSection {
        singular_values: singular_values(&matrix)?,
        conditioning: conditioning_report(&matrix, MatrixNormOrder::Two)?,
        matrix,
        rhs,
        solution,
        perturbed_rhs,
        perturbed_solution,
        rhs_change,
        solution_change,
    })
}

fn relative_change(reference: &Array1<f64>, changed: &Array1<f64>) -> Result<f64> {
    let norm = vector_norm(reference, NormOrder::Two)?;
    if norm == 0.0 {
        anyhow::bail!("Relative change is undefined for a zero reference vector");
    }
    Ok(distance(changed, reference, NormOrder::Two)? / norm)
}
