//! One function per `slae` subcommand. Each returns the text to print.

use anyhow::{Context, Result};
use std::fmt::Write;

use slae_linalg::conditioning::{conditioning_report, PerturbationStudy};
use slae_linalg::config::{MatrixNormOrder, NormOrder};
use slae_linalg::decomposition::svd;
use slae_linalg::iterative::{IterativeMethod, IterativeSolver};
use slae_linalg::math::{Array1, Array2};
use slae_linalg::norms::{angle, cosine_similarity, distance, dot, matrix_norm, vector_norm};
use slae_linalg::solve::{relative_residual, solve};

pub fn norm(x: &Array1<f64>, ord: NormOrder, precision: usize) -> Result<String> {
    let value = vector_norm(x, ord).with_context(|| format!("Failed to compute norm of {}", x))?;
    Ok(format!("||x||_{} = {:.*}\n", ord, precision, value))
}

pub fn distance_between(
    x: &Array1<f64>,
    y: &Array1<f64>,
    ord: NormOrder,
    precision: usize,
) -> Result<String> {
    let value = distance(x, y, ord).context("Failed to compute distance")?;
    Ok(format!("||x - y||_{} = {:.*}\n", ord, precision, value))
}

pub fn dot_product(x: &Array1<f64>, y: &Array1<f64>, precision: usize) -> Result<String> {
    let value = dot(x, y).context("Failed to compute dot product")?;
    Ok(format!("<x, y> = {:.*}\n", precision, value))
}

pub fn angle_between(x: &Array1<f64>, y: &Array1<f64>, precision: usize) -> Result<String> {
    let cos = cosine_similarity(x, y).context("Failed to compute the angle")?;
    let radians = angle(x, y)?;
    let mut out = String::new();
    writeln!(out, "cos(alpha) = {:.*}", precision, cos)?;
    writeln!(
        out,
        "alpha = {:.*} rad ({:.*} deg)",
        precision,
        radians,
        precision,
        radians.to_degrees()
    )?;
    Ok(out)
}

pub fn matrix_norm_of(a: &Array2<f64>, ord: MatrixNormOrder, precision: usize) -> Result<String> {
    let value = matrix_norm(a, ord).context("Failed to compute matrix norm")?;
    Ok(format!("||A||_{} = {:.*}\n", ord, precision, value))
}

pub fn solve_system(a: &Array2<f64>, b: &Array1<f64>, precision: usize) -> Result<String> {
    let x = solve(a, b).context("Failed to solve the linear system")?;
    let rel = relative_residual(a, &x, b)?;
    let mut out = String::new();
    writeln!(out, "x = {:.*}", precision, x)?;
    writeln!(out, "||b - A x|| / ||b|| = {:.3e}", rel)?;
    Ok(out)
}

pub fn condition(a: &Array2<f64>, ord: MatrixNormOrder, precision: usize) -> Result<String> {
    let report = conditioning_report(a, ord).context("Failed to compute condition number")?;
    let mut out = String::new();
    writeln!(out, "cond_{}(A) = {:.*}", ord, precision, report.cond)?;
    writeln!(out, "classification: {}", report.classification)?;
    writeln!(out, "digits lost: up to {:.1}", report.digits_lost)?;
    if let Some(det) = report.determinant {
        writeln!(out, "det(A) = {:.*}", precision, det)?;
    }
    Ok(out)
}

pub fn singular_value_decomposition(a: &Array2<f64>, precision: usize) -> Result<String> {
    let decomposition = svd(a).context("Failed to compute SVD")?;
    let mut out = String::new();
    writeln!(out, "U =\n{:.*}", precision, decomposition.u)?;
    writeln!(out, "s = {:.*}", precision, decomposition.singular_values)?;
    writeln!(out, "V^T =\n{:.*}", precision, decomposition.v_t)?;
    writeln!(out, "rank = {}", decomposition.rank())?;
    Ok(out)
}

pub fn perturb(
    a: &Array2<f64>,
    b: &Array1<f64>,
    study: &PerturbationStudy,
    precision: usize,
) -> Result<String> {
    let report = study
        .run(a, b)
        .context("Failed to run the perturbation study")?;
    let mut out = String::new();
    writeln!(out, "x = {:.*}", precision, report.solution)?;
    writeln!(
        out,
        "{} trials, relative noise {} per component",
        study.trials, study.rel_noise
    )?;
    writeln!(out, "cond_2(A) = {:.*}", precision, report.cond)?;
    writeln!(
        out,
        "relative error of x: max {:.*}, mean {:.*}, std {:.*}",
        precision, report.max_rel_error, precision, report.mean_rel_error, precision, report.std_rel_error
    )?;
    writeln!(out, "bound cond * noise = {:.*}", precision, report.error_bound)?;
    writeln!(
        out,
        "max amplification = {:.*} (never above cond_2)",
        precision, report.max_amplification
    )?;
    writeln!(
        out,
        "worst case: b' = {:.*} -> x' = {:.*}",
        precision, report.worst_rhs, precision, report.worst_solution
    )?;
    Ok(out)
}

pub fn iterate(
    a: &Array2<f64>,
    b: &Array1<f64>,
    method: IterativeMethod,
    tol: f64,
    max_iter: usize,
    precision: usize,
) -> Result<String> {
    let solution = IterativeSolver::new(method, tol, max_iter)
        .solve(a, b, None)
        .with_context(|| format!("{} iteration failed", method))?;
    let mut out = String::new();
    writeln!(out, "method: {}", method)?;
    writeln!(out, "status: {:?} after {} iterations", solution.status, solution.iterations)?;
    writeln!(out, "x = {:.*}", precision, solution.x)?;
    writeln!(out, "||b - A x|| = {:.3e}", solution.residual_norm)?;
    Ok(out)
}
