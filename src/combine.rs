//! Concatenate per-chunk temp files into the final output file.

use std::fs;
use std::io::ErrorKind;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::record::FIELD_NAMES;

/// Outcome of one combine pass.
#[derive(Debug, Default)]
pub struct CombineReport {
    /// Data rows copied into the output.
    pub rows_written: u64,
    /// Chunk indices whose temp file was merged and deleted.
    pub chunks_merged: Vec<usize>,
    /// Chunk indices whose temp file was missing.
    pub missing: Vec<usize>,
}

/// Merge `temp_part_0 ..= temp_part_{worker_count-1}` into the output file
/// under a single header, deleting each temp file once its rows are copied.
///
/// The output is opened in create/truncate mode, so a re-run replaces any
/// previous output. A missing temp file is recorded in the report and
/// skipped; it is not an error (partition gaps are expected when
/// `total_rows < worker_count`).
pub fn combine(worker_count: usize, config: &Config) -> Result<CombineReport> {
    let mut writer = csv::Writer::from_path(&config.output_path).with_context(|| {
        format!(
            "failed to create output file: {}",
            config.output_path.display()
        )
    })?;
    writer.write_record(FIELD_NAMES).with_context(|| {
        format!(
            "failed to write output header: {}",
            config.output_path.display()
        )
    })?;

    let mut report = CombineReport::default();

    for index in 0..worker_count {
        let path = config.temp_part_path(index);
        let mut reader = match csv::ReaderBuilder::new().has_headers(true).from_path(&path) {
            Ok(reader) => reader,
            Err(err) if is_not_found(&err) => {
                report.missing.push(index);
                continue;
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("failed to open temp file: {}", path.display()));
            }
        };

        let mut record = csv::ByteRecord::new();
        while reader
            .read_byte_record(&mut record)
            .with_context(|| format!("failed to read temp file: {}", path.display()))?
        {
            writer.write_byte_record(&record).with_context(|| {
                format!("failed to write output: {}", config.output_path.display())
            })?;
            report.rows_written += 1;
        }

        fs::remove_file(&path)
            .with_context(|| format!("failed to remove temp file: {}", path.display()))?;
        report.chunks_merged.push(index);
    }

    writer.flush().with_context(|| {
        format!(
            "failed to flush output file: {}",
            config.output_path.display()
        )
    })?;
    Ok(report)
}

fn is_not_found(err: &csv::Error) -> bool {
    matches!(err.kind(), csv::ErrorKind::Io(io) if io.kind() == ErrorKind::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn scratch_config(dir: &TempDir) -> Config {
        Config {
            output_path: dir.path().join("out.csv"),
            temp_dir: dir.path().join("temp_files"),
        }
    }

    /// Write a temp chunk file whose rows carry a recognizable first field.
    fn write_chunk(config: &Config, index: usize, rows: usize) {
        fs::create_dir_all(&config.temp_dir).unwrap();
        let mut writer = csv::Writer::from_path(config.temp_part_path(index)).unwrap();
        writer.write_record(FIELD_NAMES).unwrap();
        for row in 0..rows {
            let mut values = vec![format!("chunk{index}-row{row}")];
            values.extend((1..FIELD_NAMES.len()).map(|f| format!("v{f}")));
            writer.write_record(&values).unwrap();
        }
        writer.flush().unwrap();
    }

    fn read_first_fields(config: &Config) -> Vec<String> {
        let mut reader = csv::Reader::from_path(&config.output_path).unwrap();
        reader
            .records()
            .map(|r| r.unwrap()[0].to_string())
            .collect()
    }

    #[test]
    fn merges_chunks_in_index_order() {
        let dir = TempDir::new().unwrap();
        let config = scratch_config(&dir);
        write_chunk(&config, 0, 2);
        write_chunk(&config, 1, 1);
        write_chunk(&config, 2, 2);

        let report = combine(3, &config).unwrap();
        assert_eq!(report.rows_written, 5);
        assert_eq!(report.chunks_merged, vec![0, 1, 2]);
        assert!(report.missing.is_empty());

        assert_eq!(
            read_first_fields(&config),
            vec![
                "chunk0-row0",
                "chunk0-row1",
                "chunk1-row0",
                "chunk2-row0",
                "chunk2-row1"
            ]
        );
    }

    #[test]
    fn deletes_temp_files_after_merge() {
        let dir = TempDir::new().unwrap();
        let config = scratch_config(&dir);
        write_chunk(&config, 0, 1);
        write_chunk(&config, 1, 1);

        combine(2, &config).unwrap();
        assert!(!config.temp_part_path(0).exists());
        assert!(!config.temp_part_path(1).exists());
    }

    #[test]
    fn output_header_matches_field_names() {
        let dir = TempDir::new().unwrap();
        let config = scratch_config(&dir);
        write_chunk(&config, 0, 1);

        combine(1, &config).unwrap();
        let mut reader = csv::Reader::from_path(&config.output_path).unwrap();
        assert_eq!(
            reader.headers().unwrap().iter().collect::<Vec<_>>(),
            FIELD_NAMES.to_vec()
        );
    }

    #[test]
    fn missing_chunks_warn_but_do_not_fail() {
        let dir = TempDir::new().unwrap();
        let config = scratch_config(&dir);
        // 2 rows over 8 workers: only chunks 0 and 1 exist.
        write_chunk(&config, 0, 1);
        write_chunk(&config, 1, 1);

        let report = combine(8, &config).unwrap();
        assert_eq!(report.rows_written, 2);
        assert_eq!(report.chunks_merged, vec![0, 1]);
        assert_eq!(report.missing, vec![2, 3, 4, 5, 6, 7]);
        assert_eq!(read_first_fields(&config).len(), 2);
    }

    #[test]
    fn rerun_after_cleanup_truncates_to_header_only() {
        let dir = TempDir::new().unwrap();
        let config = scratch_config(&dir);
        write_chunk(&config, 0, 3);

        let first = combine(1, &config).unwrap();
        assert_eq!(first.rows_written, 3);

        // All temp files are gone now; a second pass must not error and must
        // leave a fresh header-only output.
        let second = combine(1, &config).unwrap();
        assert_eq!(second.rows_written, 0);
        assert!(second.chunks_merged.is_empty());
        assert_eq!(second.missing, vec![0]);
        assert!(read_first_fields(&config).is_empty());
    }

    #[test]
    fn absent_temp_dir_reads_as_all_missing() {
        let dir = TempDir::new().unwrap();
        let config = scratch_config(&dir);

        let report = combine(3, &config).unwrap();
        assert_eq!(report.missing, vec![0, 1, 2]);
        assert_eq!(report.rows_written, 0);
    }

    #[test]
    fn gap_in_chunk_sequence_is_skipped() {
        let dir = TempDir::new().unwrap();
        let config = scratch_config(&dir);
        write_chunk(&config, 0, 1);
        write_chunk(&config, 2, 1);

        let report = combine(3, &config).unwrap();
        assert_eq!(report.chunks_merged, vec![0, 2]);
        assert_eq!(report.missing, vec![1]);
        assert_eq!(
            read_first_fields(&config),
            vec!["chunk0-row0", "chunk2-row0"]
        );
    }
}
