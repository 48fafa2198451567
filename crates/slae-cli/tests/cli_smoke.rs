//! CLI binary smoke tests using assert_cmd.
//!
//! These tests exercise the compiled `slae` binary to verify that argument
//! parsing, printed results and error handling work end-to-end.

use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    Command::cargo_bin("slae").unwrap()
}

// ---------------------------------------------------------------------------
// Top-level
// ---------------------------------------------------------------------------

#[test]
fn no_args_shows_help() {
    cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn help_lists_subcommands() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("norm"))
        .stdout(predicate::str::contains("cond"))
        .stdout(predicate::str::contains("seminar"));
}

#[test]
fn version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("slae"));
}

// ---------------------------------------------------------------------------
// Vector commands
// ---------------------------------------------------------------------------

#[test]
fn norm_l1_of_negative_leading_vector() {
    cmd()
        .args(["norm", "-1,2,-1", "--ord", "1", "--precision", "1"])
        .assert()
        .success()
        .stdout("||x||_1 = 4.0\n");
}

#[test]
fn norm_defaults_to_euclidean() {
    cmd()
        .args(["norm", "3,4", "-p", "3"])
        .assert()
        .success()
        .stdout("||x||_2 = 5.000\n");
}

#[test]
fn norm_accepts_negative_infinity_order() {
    cmd()
        .args(["norm", "3,-0.5,7", "--ord", "-inf", "-p", "2"])
        .assert()
        .success()
        .stdout("||x||_-inf = 0.50\n");
}

#[test]
fn norm_rejects_invalid_order() {
    cmd()
        .args(["norm", "1,2", "--ord", "0.5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid norm order"));
}

#[test]
fn distance_and_dot() {
    cmd()
        .args(["distance", "1,2,-3", "-4,3,8", "--ord", "1", "-p", "0"])
        .assert()
        .success()
        .stdout("||x - y||_1 = 17\n");
    cmd()
        .args(["dot", "1,2,-3", "-4,3,8", "-p", "0"])
        .assert()
        .success()
        .stdout("<x, y> = -22\n");
}

#[test]
fn distance_length_mismatch_fails() {
    cmd()
        .args(["distance", "1,2", "1,2,3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("equal length"));
}

#[test]
fn angle_of_orthogonal_vectors() {
    cmd()
        .args(["angle", "1,0", "0,2", "-p", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("90.0 deg"));
}

#[test]
fn bad_number_is_reported() {
    cmd()
        .args(["norm", "1,two,3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid number"));
}

// ---------------------------------------------------------------------------
// Matrix commands
// ---------------------------------------------------------------------------

#[test]
fn matrix_norm_one() {
    cmd()
        .args(["matrix-norm", "0,1,2,3;4,5,6,7;8,9,10,11", "--ord", "1", "-p", "0"])
        .assert()
        .success()
        .stdout("||A||_1 = 21\n");
}

#[test]
fn solve_textbook_system() {
    cmd()
        .args(["solve", "10,9;9,8", "19,17", "-p", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("x = [1.000, 1.000]"));
}

#[test]
fn solve_singular_system_fails() {
    cmd()
        .args(["solve", "1,2;2,4", "1,2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Singular matrix"));
}

#[test]
fn ragged_matrix_fails() {
    cmd()
        .args(["solve", "1,2;3", "1,2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("same length"));
}

#[test]
fn cond_reports_classification() {
    cmd()
        .args(["cond", "10,9;9,8"])
        .assert()
        .success()
        .stdout(predicate::str::contains("moderately conditioned"))
        .stdout(predicate::str::contains("det(A)"));
}

#[test]
fn svd_prints_factors() {
    cmd()
        .args(["svd", "3,0;0,-2", "-p", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("s = [3.00, 2.00]"))
        .stdout(predicate::str::contains("rank = 2"));
}

#[test]
fn perturb_with_custom_trials() {
    cmd()
        .args(["perturb", "10,9;9,8", "19,17", "--trials", "20", "--seed", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("20 trials"))
        .stdout(predicate::str::contains("max amplification"));
}

#[test]
fn iterate_with_jacobi() {
    cmd()
        .args([
            "iterate",
            "4,1;1,3",
            "1,2",
            "--method",
            "jacobi",
            "--tol",
            "1e-12",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("method: Jacobi"))
        .stdout(predicate::str::contains("Converged"));
}

// ---------------------------------------------------------------------------
// Seminar
// ---------------------------------------------------------------------------

#[test]
fn seminar_no_config_prints_template_and_report() {
    cmd()
        .args(["seminar", "--precision", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"norm_vector\""))
        .stdout(predicate::str::contains("\"system_matrix\""))
        .stdout(predicate::str::contains("## Conditioning"))
        .stdout(predicate::str::contains("l1 norm (sum of |x_i|):    4.0000"))
        .stderr(predicate::str::contains("No config file provided"));
}

#[test]
fn seminar_print_config_applies_precision_override() {
    cmd()
        .args(["seminar", "-p", "2", "--print-config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"precision\": 2"))
        .stdout(predicate::str::contains("\"precision\": 6").not())
        .stdout(predicate::str::contains("## Conditioning").not());
}

#[test]
fn seminar_print_config_with_file_applies_precision_override() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("seminar.json");
    std::fs::write(&config_path, r#"{ "precision": 8 }"#).unwrap();

    cmd()
        .arg("seminar")
        .arg(&config_path)
        .args(["--precision", "3", "--print-config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"precision\": 3"))
        .stdout(predicate::str::contains("\"precision\": 8").not());
}

#[test]
fn iterate_rejects_negative_tolerance() {
    cmd()
        .args(["iterate", "4,1;1,3", "1,2", "--tol=-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("tolerance must be a positive number"));
}

#[test]
fn matrix_norm_rejects_nan_entries() {
    cmd()
        .args(["matrix-norm", "1,nan;2,3", "--ord", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("NaN"));
}

#[test]
fn seminar_nonexistent_config_errors() {
    cmd()
        .args(["seminar", "/nonexistent/config.json"])
        .assert()
        .failure();
}

#[test]
fn seminar_writes_report_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("seminar.json");
    std::fs::write(&config_path, r#"{ "norm_vector": [3.0, 4.0], "precision": 2 }"#).unwrap();
    let out_path = dir.path().join("report.txt");

    cmd()
        .arg("seminar")
        .arg(&config_path)
        .arg("--output")
        .arg(&out_path)
        .assert()
        .success()
        .stderr(predicate::str::contains("Report written"));

    let report = std::fs::read_to_string(&out_path).unwrap();
    assert!(report.contains("l2 norm (Euclidean):       5.00"));
    assert!(report.contains("## Iterative solution"));
}
