//! Partitioning the total row count and generating chunks in parallel.
//!
//! Each chunk is generated by one pool task writing its own temporary file;
//! tasks share nothing, so the only synchronization point is the pool's
//! collective completion. A failed task fails the whole run.

use std::fs;

use anyhow::{Context, Result};
use rayon::prelude::*;

use crate::config::Config;
use crate::record::{FIELD_NAMES, RecordGenerator};

/// One worker's share of the total row count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkAssignment {
    /// Original partition index; keys the temp filename even when other
    /// indices are skipped.
    pub index: usize,
    /// First row offset of this chunk.
    pub start_row: u64,
    /// Rows this worker generates. Always at least 1.
    pub rows: u64,
}

/// Split `total_rows` into up to `worker_count` contiguous chunks of
/// `ceil(total_rows / worker_count)` rows each.
///
/// Indices whose share would be empty are dropped, so when
/// `total_rows < worker_count` the result is shorter than `worker_count`
/// and the dropped indices never get a temp file.
pub fn partition(total_rows: u64, worker_count: usize) -> Vec<ChunkAssignment> {
    let worker_count = worker_count.max(1) as u64;
    let chunk_size = total_rows.div_ceil(worker_count);
    let mut chunks = Vec::new();
    for index in 0..worker_count {
        let start_row = index.saturating_mul(chunk_size);
        if start_row >= total_rows {
            continue;
        }
        chunks.push(ChunkAssignment {
            index: index as usize,
            start_row,
            rows: chunk_size.min(total_rows - start_row),
        });
    }
    chunks
}

/// Generate every chunk on a pool of `worker_count` threads, one temp file
/// per chunk. Any worker error fails the whole run.
pub fn generate_chunks(
    chunks: &[ChunkAssignment],
    worker_count: usize,
    config: &Config,
) -> Result<()> {
    fs::create_dir_all(&config.temp_dir).with_context(|| {
        format!(
            "failed to create temp directory: {}",
            config.temp_dir.display()
        )
    })?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(worker_count.max(1))
        .build()
        .context("failed to build worker pool")?;

    pool.install(|| {
        chunks
            .par_iter()
            .map(|chunk| generate_chunk(chunk, config))
            .collect::<Result<Vec<_>>>()
    })?;

    Ok(())
}

/// Worker body: fresh generator, header row, then `chunk.rows` records into
/// this chunk's temp file.
fn generate_chunk(chunk: &ChunkAssignment, config: &Config) -> Result<()> {
    let path = config.temp_part_path(chunk.index);
    println!(
        "  worker {} generating {} rows into {}",
        chunk.index,
        chunk.rows,
        path.display()
    );

    let mut generator = RecordGenerator::new();
    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("failed to create temp file: {}", path.display()))?;
    writer
        .write_record(FIELD_NAMES)
        .with_context(|| format!("failed to write header: {}", path.display()))?;
    for _ in 0..chunk.rows {
        writer
            .write_record(generator.generate())
            .with_context(|| format!("failed to write row: {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("failed to flush temp file: {}", path.display()))?;

    println!("  worker {} finished.", chunk.index);
    Ok(())
}
