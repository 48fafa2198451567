use anyhow::{Context, Result};
use std::{
    fs::File,
    io::Write,
    path::{Path, PathBuf},
};

use slae_linalg::math::{Array1, Array2};

/// Parse a vector written as comma or whitespace separated numbers, e.g. `"1, 2, -3"`.
pub fn parse_vector(text: &str) -> Result<Array1<f64>> {
    let values = text
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<f64>()
                .with_context(|| format!("Invalid number {:?} in vector {:?}", s, text))
        })
        .collect::<Result<Vec<f64>>>()?;
    if values.is_empty() {
        anyhow::bail!("Vector must contain at least one number: {:?}", text);
    }
    Ok(Array1::from_vec(values))
}

/// Parse a matrix written row by row with `;` between rows, e.g. `"10,9; 9,8"`.
pub fn parse_matrix(text: &str) -> Result<Array2<f64>> {
    let rows = text
        .split(';')
        .map(str::trim)
        .filter(|row| !row.is_empty())
        .map(|row| parse_vector(row).map(Vec::from))
        .collect::<Result<Vec<Vec<f64>>>>()
        .with_context(|| format!("Failed to parse matrix {:?}", text))?;
    if rows.is_empty() {
        anyhow::bail!("Matrix must contain at least one row: {:?}", text);
    }
    Array2::from_rows(rows)
        .with_context(|| format!("All rows of matrix {:?} must have the same length", text))
}

pub fn validate_json_file(path: &Path) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase());
    match ext.as_deref() {
        Some("json") => {}
        _ => anyhow::bail!("Config file must have a .json extension: {}", path.display()),
    }

    if !path.exists() {
        anyhow::bail!("File does not exist: {}", path.display());
    }

    Ok(())
}

pub fn write_bytes_to_file(path: &PathBuf, bytes: &[u8]) -> Result<()> {
    let mut file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    file.write_all(bytes)
        .with_context(|| format!("Failed to write output file: {}", path.display()))?;
    Ok(())
}
