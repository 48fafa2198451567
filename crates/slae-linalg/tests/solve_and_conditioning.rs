//! Direct solves, SVD and condition numbers on the 2x2 textbook system
//! `10 x + 9 y = 19`, `9 x + 8 y = 17`.

use slae_linalg::conditioning::{
    condition_number, conditioning_report, relative_error_bound, Conditioning,
    PerturbationStudy,
};
use slae_linalg::config::MatrixNormOrder;
use slae_linalg::decomposition::{reconstruct, svd};
use slae_linalg::math::{Array1, Array2};
use slae_linalg::solve::{determinant, inverse, relative_residual, solve};
use slae_linalg::LinalgError;

fn system() -> Array2<f64> {
    Array2::from_rows(vec![vec![10.0, 9.0], vec![9.0, 8.0]]).unwrap()
}

fn assert_vec_close(actual: &Array1<f64>, expected: &[f64], tol: f64) {
    assert_eq!(actual.len(), expected.len());
    for (a, e) in actual.iter().zip(expected) {
        assert!((a - e).abs() < tol, "{} vs {:?}", actual, expected);
    }
}

// ---------------------------------------------------------------------------
// Direct solve
// ---------------------------------------------------------------------------

#[test]
fn solve_exact_rhs() {
    let x = solve(&system(), &Array1::from_vec(vec![19.0, 17.0])).unwrap();
    assert_vec_close(&x, &[1.0, 1.0], 1e-9);
}

#[test]
fn solve_rounded_rhs_moves_solution_far() {
    let x = solve(&system(), &Array1::from_vec(vec![18.9, 17.1])).unwrap();
    assert_vec_close(&x, &[2.7, -0.9], 1e-9);
}

#[test]
fn solve_has_small_residual() {
    let a = Array2::from_rows(vec![
        vec![4.0, -1.0, 0.0],
        vec![-1.0, 4.0, -1.0],
        vec![0.0, -1.0, 4.0],
    ])
    .unwrap();
    let b = Array1::from_vec(vec![15.0, 10.0, 10.0]);
    let x = solve(&a, &b).unwrap();
    assert!(relative_residual(&a, &x, &b).unwrap() < 1e-14);
}

#[test]
fn solve_singular_matrix_errors() {
    let a = Array2::from_rows(vec![vec![1.0, 2.0], vec![2.0, 4.0]]).unwrap();
    let b = Array1::from_vec(vec![1.0, 2.0]);
    assert_eq!(solve(&a, &b).unwrap_err(), LinalgError::Singular);
    assert_eq!(inverse(&a).unwrap_err(), LinalgError::Singular);
}

#[test]
fn solve_shape_errors() {
    let rect = Array2::arange(2, 3);
    let b = Array1::from_vec(vec![1.0, 2.0]);
    assert_eq!(
        solve(&rect, &b).unwrap_err(),
        LinalgError::NotSquare { rows: 2, cols: 3 }
    );
    let short = Array1::from_vec(vec![1.0]);
    assert!(matches!(
        solve(&system(), &short),
        Err(LinalgError::DimensionMismatch { op: "solve", .. })
    ));
}

#[test]
fn determinant_and_inverse() {
    assert!((determinant(&system()).unwrap() + 1.0).abs() < 1e-12);
    let inv = inverse(&system()).unwrap();
    let expected = [-8.0, 9.0, 9.0, -10.0];
    for (a, e) in inv.as_slice().iter().zip(expected) {
        assert!((a - e).abs() < 1e-9);
    }
}

// ---------------------------------------------------------------------------
// SVD
// ---------------------------------------------------------------------------

#[test]
fn svd_sorted_and_reconstructs() {
    let a = Array2::arange(3, 4);
    let decomposition = svd(&a).unwrap();
    let s = decomposition.singular_values.to_vec();
    assert!(s.windows(2).all(|w| w[0] >= w[1]));
    assert_eq!(decomposition.rank(), 2);

    let back = reconstruct(&decomposition).unwrap();
    assert!(back.max_abs_diff(&a).unwrap() < 1e-10);
}

#[test]
fn svd_rejects_non_finite_input() {
    let a = Array2::from_rows(vec![vec![1.0, f64::NAN], vec![0.0, 1.0]]).unwrap();
    assert_eq!(svd(&a).unwrap_err(), LinalgError::NonFinite);
}

// ---------------------------------------------------------------------------
// Condition numbers
// ---------------------------------------------------------------------------

#[test]
fn condition_number_of_textbook_system() {
    let lambda_max = 9.0 + 82f64.sqrt();
    let lambda_min = 82f64.sqrt() - 9.0;
    let cond = condition_number(&system(), MatrixNormOrder::Two).unwrap();
    assert!((cond - lambda_max / lambda_min).abs() < 1e-6);
    assert_eq!(Conditioning::classify(cond), Conditioning::Moderate);
}

#[test]
fn condition_number_in_one_and_inf_norms() {
    // ||A||_1 = 19, ||A^-1||_1 = 19
    let cond = condition_number(&system(), MatrixNormOrder::One).unwrap();
    assert!((cond - 361.0).abs() < 1e-6);
    let cond = condition_number(&system(), MatrixNormOrder::Inf).unwrap();
    assert!((cond - 361.0).abs() < 1e-6);
}

#[test]
fn identity_is_perfectly_conditioned() {
    let i: Array2<f64> = Array2::eye(4);
    for ord in [
        MatrixNormOrder::One,
        MatrixNormOrder::Two,
        MatrixNormOrder::Inf,
    ] {
        assert!((condition_number(&i, ord).unwrap() - 1.0).abs() < 1e-12);
    }
}

#[test]
fn singular_matrix_has_infinite_condition_number() {
    let a = Array2::from_rows(vec![vec![1.0, 2.0], vec![2.0, 4.0]]).unwrap();
    let cond = condition_number(&a, MatrixNormOrder::One).unwrap();
    assert!(cond.is_infinite());
    let report = conditioning_report(&a, MatrixNormOrder::One).unwrap();
    assert_eq!(report.classification, Conditioning::Singular);
}

#[test]
fn condition_number_of_rectangular_matrix_needs_two_norm() {
    let a = Array2::from_rows(vec![vec![1.0, 0.0], vec![0.0, 2.0], vec![0.0, 0.0]]).unwrap();
    assert!((condition_number(&a, MatrixNormOrder::Two).unwrap() - 2.0).abs() < 1e-12);
    assert!(matches!(
        condition_number(&a, MatrixNormOrder::Frobenius),
        Err(LinalgError::NotSquare { .. })
    ));
}

#[test]
fn report_contains_determinant_and_digits() {
    let report = conditioning_report(&system(), MatrixNormOrder::Two).unwrap();
    assert!((report.determinant.unwrap() + 1.0).abs() < 1e-12);
    assert!(report.digits_lost > 2.0 && report.digits_lost < 3.0);
}

// ---------------------------------------------------------------------------
// Perturbation study
// ---------------------------------------------------------------------------

#[test]
fn observed_amplification_respects_condition_bound() {
    let study = PerturbationStudy::new(0.03, 200, 7);
    let report = study
        .run(&system(), &Array1::from_vec(vec![19.0, 17.0]))
        .unwrap();
    assert!(report.max_amplification <= report.cond * (1.0 + 1e-9));
    assert!(report.max_rel_error <= report.error_bound * (1.0 + 1e-9));
    assert!(report.mean_rel_error <= report.max_rel_error);
    // 3% noise on this system moves the solution by far more than 3%
    assert!(report.max_rel_error > 0.03);
}

#[test]
fn perturbation_study_is_deterministic_for_a_seed() {
    let b = Array1::from_vec(vec![19.0, 17.0]);
    let first = PerturbationStudy::new(0.01, 50, 11).run(&system(), &b).unwrap();
    let second = PerturbationStudy::new(0.01, 50, 11).run(&system(), &b).unwrap();
    assert_eq!(first.max_rel_error, second.max_rel_error);
    assert_eq!(first.worst_rhs, second.worst_rhs);
}

#[test]
fn zero_noise_leaves_solution_unchanged() {
    let b = Array1::from_vec(vec![19.0, 17.0]);
    let report = PerturbationStudy::new(0.0, 5, 0).run(&system(), &b).unwrap();
    assert_eq!(report.max_rel_error, 0.0);
    assert_eq!(report.max_amplification, 0.0);
}

#[test]
fn perturbation_study_rejects_bad_parameters() {
    let b = Array1::from_vec(vec![19.0, 17.0]);
    assert!(matches!(
        PerturbationStudy::new(0.01, 0, 0).run(&system(), &b),
        Err(LinalgError::InvalidParameter(_))
    ));
    assert!(matches!(
        PerturbationStudy::new(-0.5, 10, 0).run(&system(), &b),
        Err(LinalgError::InvalidParameter(_))
    ));
    let zero: Array1<f64> = Array1::zeros(2);
    assert_eq!(
        PerturbationStudy::default().run(&system(), &zero).unwrap_err(),
        LinalgError::ZeroVector
    );
}

#[test]
fn error_bound_scales_linearly() {
    assert!((relative_error_bound(326.0, 0.01) - 3.26).abs() < 1e-12);
}
