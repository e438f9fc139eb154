use std::io;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use piigen::config::Config;
use piigen::{chunk, combine, sizing};

/// No flags beyond the stock --help/--version: the run is driven entirely
/// by the two interactive prompts.
#[derive(Parser)]
#[command(
    name = "piigen",
    about = "Generate a large synthetic PII CSV dataset in parallel",
    version
)]
struct Cli {}

fn main() -> Result<()> {
    Cli::parse();
    let start = Instant::now();

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();

    let mode = sizing::prompt_mode(&mut input, &mut out)?;
    let total_rows = sizing::prompt_total_rows(mode, &mut input, &mut out)?;

    let config = Config::default();
    run(total_rows, &config)?;

    println!();
    println!(
        "Success! Your file '{}' with {total_rows} rows has been created.",
        config.output_path.display()
    );
    println!(
        "Total time taken: {:.2} seconds.",
        start.elapsed().as_secs_f64()
    );
    Ok(())
}

/// Partition, generate on the worker pool, then combine.
fn run(total_rows: u64, config: &Config) -> Result<()> {
    let total_cores = std::thread::available_parallelism()
        .context("failed to determine CPU count")?
        .get();
    let workers = piigen::worker_count(total_cores);
    println!();
    println!(
        "Utilizing {workers} of {total_cores} available CPU cores to keep the system responsive."
    );

    let chunks = chunk::partition(total_rows, workers);
    chunk::generate_chunks(&chunks, workers, config)?;

    println!();
    println!(
        "Combining {workers} temporary files into '{}'...",
        config.output_path.display()
    );
    let report = combine::combine(workers, config)?;
    for &index in &report.missing {
        eprintln!(
            "Warning: temporary file {} not found. It might have had no rows to generate.",
            config.temp_part_path(index).display()
        );
    }
    println!("Cleaned up temporary files.");

    Ok(())
}
