use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use log::LevelFilter;
use std::path::PathBuf;

use slae_cli::commands;
use slae_cli::seminar::{load_seminar_config, run_seminar, SeminarConfig};
use slae_cli::util::{parse_matrix, parse_vector, validate_json_file, write_bytes_to_file};
use slae_linalg::conditioning::PerturbationStudy;
use slae_linalg::config::{MatrixNormOrder, NormOrder};
use slae_linalg::iterative::IterativeMethod;

fn vector_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .help(help)
        .required(true)
        .allow_hyphen_values(true)
        .value_hint(ValueHint::Other)
}

fn matrix_arg() -> Arg {
    Arg::new("matrix")
        .help("Matrix with rows separated by ';', e.g. \"10,9;9,8\"")
        .required(true)
        .allow_hyphen_values(true)
        .value_hint(ValueHint::Other)
}

fn ord_arg(help: &'static str, default: &'static str) -> Arg {
    Arg::new("ord")
        .long("ord")
        .help(help)
        .default_value(default)
        .allow_hyphen_values(true)
        .value_hint(ValueHint::Other)
}

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("SLAE_LOG", "error,slae=info"))
        .init();

    let matches = Command::new("slae")
        .version(clap::crate_version!())
        .about("Norms, distances and conditioning of systems of linear equations")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("precision")
                .short('p')
                .long("precision")
                .help("Number of decimal places in printed results")
                .global(true)
                .value_parser(clap::value_parser!(usize)),
        )
        .subcommand(
            Command::new("norm")
                .about("Norm of a vector")
                .arg(vector_arg("x", "Vector as comma separated numbers, e.g. \"-1,2,-1\""))
                .arg(ord_arg("Norm order: 1, 2, inf, -inf, 0 or any p >= 1", "2")),
        )
        .subcommand(
            Command::new("distance")
                .about("Distance ||x - y|| between two vectors")
                .arg(vector_arg("x", "First vector"))
                .arg(vector_arg("y", "Second vector"))
                .arg(ord_arg("Norm order: 1, 2, inf, -inf, 0 or any p >= 1", "2")),
        )
        .subcommand(
            Command::new("dot")
                .about("Dot product of two vectors")
                .arg(vector_arg("x", "First vector"))
                .arg(vector_arg("y", "Second vector")),
        )
        .subcommand(
            Command::new("angle")
                .about("Cosine and angle between two non-zero vectors")
                .arg(vector_arg("x", "First vector"))
                .arg(vector_arg("y", "Second vector")),
        )
        .subcommand(
            Command::new("matrix-norm")
                .about("Norm of a matrix")
                .arg(matrix_arg())
                .arg(ord_arg("Norm order: 1, -1, 2, -2, inf, -inf, fro, nuc", "2")),
        )
        .subcommand(
            Command::new("solve")
                .about("Solve A x = b with LU and partial pivoting")
                .arg(matrix_arg())
                .arg(vector_arg("rhs", "Right-hand side b")),
        )
        .subcommand(
            Command::new("cond")
                .about("Condition number of a matrix")
                .arg(matrix_arg())
                .arg(ord_arg("Norm order: 1, -1, 2, -2, inf, -inf, fro, nuc", "2")),
        )
        .subcommand(
            Command::new("svd")
                .about("Singular value decomposition")
                .arg(matrix_arg()),
        )
        .subcommand(
            Command::new("perturb")
                .about("Randomly perturb b and measure how far the solution moves")
                .arg(matrix_arg())
                .arg(vector_arg("rhs", "Right-hand side b"))
                .arg(
                    Arg::new("noise")
                        .long("noise")
                        .help("Relative noise per component of b")
                        .value_parser(clap::value_parser!(f64)),
                )
                .arg(
                    Arg::new("trials")
                        .long("trials")
                        .help("Number of perturbed systems to solve")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .help("Random seed")
                        .value_parser(clap::value_parser!(u64)),
                ),
        )
        .subcommand(
            Command::new("iterate")
                .about("Solve A x = b with Jacobi or Gauss-Seidel iterations")
                .arg(matrix_arg())
                .arg(vector_arg("rhs", "Right-hand side b"))
                .arg(
                    Arg::new("method")
                        .short('m')
                        .long("method")
                        .help("Iterative method")
                        .value_parser(["jacobi", "seidel"])
                        .default_value("seidel"),
                )
                .arg(
                    Arg::new("tol")
                        .long("tol")
                        .help("Stop when ||x_{k+1} - x_k||_inf drops below this value")
                        .value_parser(clap::value_parser!(f64))
                        .default_value("1e-10"),
                )
                .arg(
                    Arg::new("max_iter")
                        .long("max-iter")
                        .help("Maximum number of sweeps")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("1000"),
                ),
        )
        .subcommand(
            Command::new("seminar")
                .about("Run the full walk-through of norms and conditioning")
                .arg(
                    Arg::new("config")
                        .help("Path to a JSON configuration file")
                        .required(false)
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("output_file")
                        .short('o')
                        .long("output")
                        .help("Write the report to this file instead of stdout")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("print_config")
                        .long("print-config")
                        .help("Print the effective configuration as JSON and exit")
                        .action(ArgAction::SetTrue),
                ),
        )
        .help_template(
            "{usage-heading} {usage}\n\n\
             {about-with-newline}\n\
             Version {version}\n\n\
             {all-args}{after-help}",
        )
        .get_matches();

    let precision = matches.get_one::<usize>("precision").copied();

    let output = match matches.subcommand() {
        Some(("seminar", sub_m)) => return handle_seminar(sub_m, precision),
        Some((name, sub_m)) => handle_command(name, sub_m, precision.unwrap_or(6))?,
        None => unreachable!("Subcommand is required by CLI configuration"),
    };
    print!("{}", output);
    Ok(())
}

fn required<'a>(matches: &'a ArgMatches, id: &str) -> Result<&'a String> {
    matches
        .get_one::<String>(id)
        .with_context(|| format!("Missing required argument: {}", id))
}

fn handle_command(name: &str, matches: &ArgMatches, precision: usize) -> Result<String> {
    log::debug!("[SLAE::Cli] running {}", name);
    match name {
        "norm" => {
            let x = parse_vector(required(matches, "x")?)?;
            let ord: NormOrder = required(matches, "ord")?.parse()?;
            commands::norm(&x, ord, precision)
        }
        "distance" => {
            let x = parse_vector(required(matches, "x")?)?;
            let y = parse_vector(required(matches, "y")?)?;
            let ord: NormOrder = required(matches, "ord")?.parse()?;
            commands::distance_between(&x, &y, ord, precision)
        }
        "dot" => {
            let x = parse_vector(required(matches, "x")?)?;
            let y = parse_vector(required(matches, "y")?)?;
            commands::dot_product(&x, &y, precision)
        }
        "angle" => {
            let x = parse_vector(required(matches, "x")?)?;
            let y = parse_vector(required(matches, "y")?)?;
            commands::angle_between(&x, &y, precision)
        }
        "matrix-norm" => {
            let a = parse_matrix(required(matches, "matrix")?)?;
            let ord: MatrixNormOrder = required(matches, "ord")?.parse()?;
            commands::matrix_norm_of(&a, ord, precision)
        }
        "solve" => {
            let a = parse_matrix(required(matches, "matrix")?)?;
            let b = parse_vector(required(matches, "rhs")?)?;
            commands::solve_system(&a, &b, precision)
        }
        "cond" => {
            let a = parse_matrix(required(matches, "matrix")?)?;
            let ord: MatrixNormOrder = required(matches, "ord")?.parse()?;
            commands::condition(&a, ord, precision)
        }
        "svd" => {
            let a = parse_matrix(required(matches, "matrix")?)?;
            commands::singular_value_decomposition(&a, precision)
        }
        "perturb" => {
            let a = parse_matrix(required(matches, "matrix")?)?;
            let b = parse_vector(required(matches, "rhs")?)?;
            let mut study = PerturbationStudy::default();
            if let Some(noise) = matches.get_one::<f64>("noise") {
                study.rel_noise = *noise;
            }
            if let Some(trials) = matches.get_one::<usize>("trials") {
                study.trials = *trials;
            }
            if let Some(seed) = matches.get_one::<u64>("seed") {
                study.seed = *seed;
            }
            commands::perturb(&a, &b, &study, precision)
        }
        "iterate" => {
            let a = parse_matrix(required(matches, "matrix")?)?;
            let b = parse_vector(required(matches, "rhs")?)?;
            let method: IterativeMethod = required(matches, "method")?.parse()?;
            let tol = *matches.get_one::<f64>("tol").context("Missing --tol")?;
            let max_iter = *matches
                .get_one::<usize>("max_iter")
                .context("Missing --max-iter")?;
            commands::iterate(&a, &b, method, tol, max_iter, precision)
        }
        _ => unreachable!("Unknown subcommand {}", name),
    }
}

fn handle_seminar(matches: &ArgMatches, precision: Option<usize>) -> Result<()> {
    let config_path = matches.get_one::<PathBuf>("config");
    let mut config = match config_path {
        Some(config_path) => {
            validate_json_file(config_path)?;
            log::info!("[SLAE::Seminar] Using config: {:?}", config_path);
            load_seminar_config(config_path)?
        }
        None => {
            eprintln!("[SLAE::Seminar] No config file provided; using defaults.");
            SeminarConfig::default()
        }
    };

    if let Some(precision) = precision {
        config.precision = precision;
    }

    let print_config = matches.get_flag("print_config");
    if config_path.is_none() || print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
    }
    if print_config {
        return Ok(());
    }

    let report = match run_seminar(&config) {
        Ok(report) => report,
        Err(e) => {
            log::error!("Seminar failed: {:#}", e);
            std::process::exit(1)
        }
    };
    let rendered = report.to_string();

    match matches.get_one::<PathBuf>("output_file") {
        Some(path) => {
            write_bytes_to_file(path, rendered.as_bytes())?;
            eprintln!("[SLAE::Seminar] Report written to {}", path.display());
        }
        None => print!("{}", rendered),
    }
    Ok(())
}
