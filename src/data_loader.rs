//! Data loading utilities
//!
//! Parsing is not part of the core contract (the pipeline takes an
//! already-parsed frame); this is the thin reader the CLI uses to get one.

use crate::error::{PrediksiError, Result};
use polars::prelude::*;
use std::fs::File;

/// Loads tabular files into a DataFrame
#[derive(Debug, Clone, Default)]
pub struct DataLoader;

impl DataLoader {
    /// Create a new data loader
    pub fn new() -> Self {
        Self
    }

    /// Load a CSV file with header and schema inference
    pub fn load_csv(&self, path: &str) -> Result<DataFrame> {
        let file = File::open(path).map_err(|e| PrediksiError::DataError(e.to_string()))?;

        let reader = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(100))
            .into_reader_with_file_handle(file);

        reader
            .finish()
            .map_err(|e| PrediksiError::DataError(e.to_string()))
    }

    /// Load a line-delimited JSON file
    pub fn load_json(&self, path: &str) -> Result<DataFrame> {
        let file = File::open(path).map_err(|e| PrediksiError::DataError(e.to_string()))?;

        JsonReader::new(file)
            .finish()
            .map_err(|e| PrediksiError::DataError(e.to_string()))
    }

    /// Detect the format from the extension and load
    pub fn load_auto(&self, path: &str) -> Result<DataFrame> {
        let path_lower = path.to_lowercase();

        if path_lower.ends_with(".json") || path_lower.ends_with(".jsonl") {
            self.load_json(path)
        } else {
            // CSV is the default
            self.load_csv(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_csv() -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "Tahun,Produksi,Luas").unwrap();
        writeln!(file, "2019,10.0,5.0").unwrap();
        writeln!(file, "2020,20.0,6.0").unwrap();
        writeln!(file, "2021,,7.0").unwrap();
        writeln!(file, "2022,1000.0,8.0").unwrap();
        file
    }

    #[test]
    fn test_load_csv() {
        let file = create_test_csv();
        let loader = DataLoader::new();

        let df = loader.load_csv(file.path().to_str().unwrap()).unwrap();

        assert_eq!(df.height(), 4);
        assert_eq!(df.width(), 3);
        assert_eq!(df.column("Produksi").unwrap().null_count(), 1);
    }

    #[test]
    fn test_load_auto_defaults_to_csv() {
        let file = create_test_csv();
        let loader = DataLoader::new();

        let df = loader.load_auto(file.path().to_str().unwrap()).unwrap();
        assert_eq!(df.height(), 4);
    }

    #[test]
    fn test_missing_file_is_data_error() {
        let loader = DataLoader::new();
        assert!(matches!(
            loader.load_csv("/no/such/file.csv"),
            Err(PrediksiError::DataError(_))
        ));
    }
}
