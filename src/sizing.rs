//! Interactive sizing: resolve how many rows the run should produce.

use std::io::{BufRead, Write};

use anyhow::{Context, Result, bail};
use thiserror::Error;

/// Assumed average serialized size of one row, used to convert a target
/// file size into a row count.
pub const APPROX_BYTES_PER_ROW: u64 = 500;

/// How the user chose to size the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeMode {
    /// An explicit number of rows.
    Rows,
    /// An approximate output size in megabytes.
    Megabytes,
}

/// Why an input line failed positive-integer validation. The `Display`
/// strings are the messages shown on the console.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("Invalid input. Please enter a whole number.")]
    NotANumber,
    #[error("Please enter a positive number.")]
    NotPositive,
}

/// Parse one input line as a positive integer.
pub fn parse_positive(line: &str) -> Result<u64, InputError> {
    let trimmed = line.trim();
    match trimmed.parse::<u64>() {
        Ok(0) => Err(InputError::NotPositive),
        Ok(n) => Ok(n),
        // Negative numbers fail the u64 parse; report them as non-positive
        // rather than non-numeric.
        Err(_) if trimmed.parse::<i64>().is_ok() => Err(InputError::NotPositive),
        Err(_) => Err(InputError::NotANumber),
    }
}

/// Rows needed to reach approximately `size_mb` megabytes of output.
pub fn rows_for_megabytes(size_mb: u64) -> u64 {
    size_mb.saturating_mul(1024 * 1024) / APPROX_BYTES_PER_ROW
}

/// Prompt until the user picks mode `1` (rows) or `2` (megabytes).
pub fn prompt_mode<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<SizeMode> {
    writeln!(out, "How do you want to define the amount of fake data?")?;
    writeln!(out, "  1. By a specific number of rows.")?;
    writeln!(out, "  2. By an approximate file size (in MB).")?;
    loop {
        write!(out, "Enter your choice (1 or 2): ")?;
        out.flush()?;
        let line = read_line(input)?;
        match line.trim() {
            "1" => return Ok(SizeMode::Rows),
            "2" => return Ok(SizeMode::Megabytes),
            _ => writeln!(out, "Invalid input. Please enter 1 or 2.")?,
        }
    }
}

/// Prompt until a positive integer is entered, then resolve it to a total
/// row count according to `mode`.
pub fn prompt_total_rows<R: BufRead, W: Write>(
    mode: SizeMode,
    input: &mut R,
    out: &mut W,
) -> Result<u64> {
    let prompt = match mode {
        SizeMode::Rows => "Enter the desired number of rows: ",
        SizeMode::Megabytes => "Enter the desired file size in MB: ",
    };
    loop {
        write!(out, "{prompt}")?;
        out.flush()?;
        let line = read_line(input)?;
        match parse_positive(&line) {
            Ok(value) => match mode {
                SizeMode::Rows => return Ok(value),
                SizeMode::Megabytes => {
                    let rows = rows_for_megabytes(value);
                    writeln!(
                        out,
                        "To create a file of approximately {value} MB, {rows} rows will be generated."
                    )?;
                    return Ok(rows);
                }
            },
            Err(err) => writeln!(out, "{err}")?,
        }
    }
}

fn read_line<R: BufRead>(input: &mut R) -> Result<String> {
    let mut line = String::new();
    let n = input
        .read_line(&mut line)
        .context("failed to read from stdin")?;
    if n == 0 {
        bail!("unexpected end of input");
    }
    Ok(line)
}
