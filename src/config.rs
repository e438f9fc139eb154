use std::path::PathBuf;

/// Where a generation run reads and writes.
///
/// The defaults reproduce the tool's fixed relative paths; tests point both
/// at scratch directories instead.
#[derive(Debug, Clone)]
pub struct Config {
    /// Final combined CSV.
    pub output_path: PathBuf,
    /// Directory holding the per-chunk temporary files.
    pub temp_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from("large_pii_dataset.csv"),
            temp_dir: PathBuf::from("temp_files"),
        }
    }
}

impl Config {
    /// Temporary file owned by the chunk with the given partition index.
    pub fn temp_part_path(&self, index: usize) -> PathBuf {
        self.temp_dir.join(format!("temp_part_{index}.csv"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_paths() {
        let config = Config::default();
        assert_eq!(config.output_path, PathBuf::from("large_pii_dataset.csv"));
        assert_eq!(config.temp_dir, PathBuf::from("temp_files"));
    }

    #[test]
    fn temp_part_path_keyed_by_index() {
        let config = Config::default();
        assert_eq!(
            config.temp_part_path(3),
            PathBuf::from("temp_files").join("temp_part_3.csv")
        );
        assert_eq!(
            config.temp_part_path(11),
            PathBuf::from("temp_files").join("temp_part_11.csv")
        );
    }
}
