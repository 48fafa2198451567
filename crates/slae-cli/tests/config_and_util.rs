//! Integration tests for seminar config parsing, util helpers and the
//! seminar run itself.

use slae_cli::seminar::{load_seminar_config, run_seminar, SeminarConfig};
use slae_cli::util::{parse_matrix, parse_vector, validate_json_file};
use slae_linalg::conditioning::Conditioning;
use slae_linalg::iterative::{ConvergenceStatus, IterativeMethod};

// ---------------------------------------------------------------------------
// Parsing helpers
// ---------------------------------------------------------------------------

#[test]
fn parse_vector_values() {
    let v = parse_vector("-1, 2, -1").unwrap();
    assert_eq!(v.to_vec(), vec![-1.0, 2.0, -1.0]);
}

#[test]
fn parse_vector_rejects_garbage() {
    assert!(parse_vector("1,x").is_err());
    assert!(parse_vector(" , ").is_err());
}

#[test]
fn parse_matrix_rows() {
    let m = parse_matrix("10, 9; 9, 8").unwrap();
    assert_eq!(m.shape(), (2, 2));
    assert_eq!(m[(0, 1)], 9.0);
    assert!(parse_matrix("1,2;3").is_err());
    assert!(parse_matrix(";;").is_err());
}

// ---------------------------------------------------------------------------
// validate_json_file
// ---------------------------------------------------------------------------

#[test]
fn validate_json_file_exists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("seminar.json");
    std::fs::File::create(&path).unwrap();
    assert!(validate_json_file(&path).is_ok());
}

#[test]
fn validate_wrong_extension_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("seminar.toml");
    std::fs::File::create(&path).unwrap();
    assert!(validate_json_file(&path).is_err());
}

#[test]
fn validate_nonexistent_file_errors() {
    assert!(validate_json_file(std::path::Path::new("/nonexistent/seminar.json")).is_err());
}

// ---------------------------------------------------------------------------
// SeminarConfig defaults & serialization
// ---------------------------------------------------------------------------

#[test]
fn seminar_config_default_values() {
    let cfg = SeminarConfig::default();
    assert_eq!(cfg.norm_vector, vec![-1.0, 2.0, -1.0]);
    assert_eq!(cfg.arange_shape, (3, 4));
    assert_eq!(cfg.rhs, vec![19.0, 17.0]);
    assert_eq!(cfg.iterative_method, IterativeMethod::GaussSeidel);
    assert!(cfg.perturbation.trials > 0);
}

#[test]
fn seminar_config_round_trips_json() {
    let cfg = SeminarConfig::default();
    let json = serde_json::to_string_pretty(&cfg).unwrap();
    assert!(json.contains("\"gauss-seidel\""));
    let cfg2: SeminarConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(cfg.system_matrix, cfg2.system_matrix);
    assert_eq!(cfg.perturbation.seed, cfg2.perturbation.seed);
}

#[test]
fn seminar_config_partial_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("seminar.json");
    std::fs::write(
        &path,
        r#"{ "rhs": [1.0, 1.0], "iterative_method": "jacobi", "perturbation": { "trials": 10 } }"#,
    )
    .unwrap();

    let cfg = load_seminar_config(&path).unwrap();
    assert_eq!(cfg.rhs, vec![1.0, 1.0]);
    assert_eq!(cfg.iterative_method, IterativeMethod::Jacobi);
    assert_eq!(cfg.perturbation.trials, 10);
    assert_eq!(cfg.perturbation.seed, 42);
    assert_eq!(cfg.system_matrix, SeminarConfig::default().system_matrix);
}

#[test]
fn seminar_config_malformed_json_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("seminar.json");
    std::fs::write(&path, "{ not json").unwrap();
    let err = load_seminar_config(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to parse config"));
}

// ---------------------------------------------------------------------------
// Seminar run
// ---------------------------------------------------------------------------

#[test]
fn seminar_default_run_reproduces_worked_examples() {
    let mut cfg = SeminarConfig::default();
    cfg.perturbation.trials = 50;
    let report = run_seminar(&cfg).unwrap();

    assert_eq!(report.vector_norms.l1, 4.0);
    assert_eq!(report.vector_norms.max, 2.0);
    assert_eq!(report.distances.l1, 17.0);
    assert_eq!(report.distances.dot, -22.0);
    assert_eq!(report.matrix_norms.one, 21.0);
    assert_eq!(report.roundoff.product[(1, 1)], 0.0);

    let system = &report.system;
    assert!((system.perturbed_solution[0] - 2.7).abs() < 1e-9);
    assert!((system.perturbed_solution[1] + 0.9).abs() < 1e-9);
    assert!(system.solution_change > 100.0 * system.rhs_change);
    assert_eq!(system.conditioning.classification, Conditioning::Moderate);

    assert_eq!(report.iterative.status, ConvergenceStatus::Converged);
    for (x, d) in report.iterative.x.iter().zip(report.iterative_direct.iter()) {
        assert!((x - d).abs() < 1e-8);
    }
}

#[test]
fn seminar_rejects_ragged_system_matrix() {
    let mut cfg = SeminarConfig::default();
    cfg.system_matrix = vec![vec![1.0, 2.0], vec![3.0]];
    assert!(run_seminar(&cfg).is_err());
}

#[test]
fn seminar_rejects_negative_tolerance() {
    let mut cfg = SeminarConfig::default();
    cfg.perturbation.trials = 10;
    cfg.tolerance = -1.0;
    let err = run_seminar(&cfg).unwrap_err();
    assert!(format!("{:#}", err).contains("tolerance must be a positive number"));
}

#[test]
fn seminar_report_renders_every_section() {
    let mut cfg = SeminarConfig::default();
    cfg.perturbation.trials = 10;
    let text = run_seminar(&cfg).unwrap().to_string();
    for section in [
        "## Vector norms",
        "## Distances, dot product and angle",
        "## Matrix norms",
        "## Round-off in elimination without pivoting",
        "## Conditioning",
        "## Random perturbations of b",
        "## Iterative solution",
    ] {
        assert!(text.contains(section), "missing {}", section);
    }
}
