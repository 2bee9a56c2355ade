//! Configuration for dataset loading.

use std::time::Duration;

use log::warn;

use crate::reader::DataSource;

/// Public copy of the heart-failure clinical records dataset
pub const DEFAULT_DATASET_URL: &str = "https://raw.githubusercontent.com/hisrinivas1972/heart_failure/main/heart_failure_clinical_records_dataset.csv";

/// Environment variable overriding the dataset source
pub const SOURCE_ENV_VAR: &str = "HF_DATASET_SOURCE";

/// Environment variable overriding the batch size
pub const BATCH_SIZE_ENV_VAR: &str = "HF_BATCH_SIZE";

/// Default number of rows per decoded batch
pub const DEFAULT_BATCH_SIZE: usize = 8192;

/// Configuration for loading the patient dataset
#[derive(Debug, Clone)]
pub struct DatasetConfig {
    /// Where the records are read from
    pub source: DataSource,
    /// Whether CSV input starts with a header row
    pub has_header: bool,
    /// CSV field delimiter
    pub delimiter: u8,
    /// Rows per decoded batch
    pub batch_size: usize,
    /// Rows sampled when inferring the CSV schema (`None` reads everything)
    pub infer_schema_rows: Option<usize>,
    /// Timeout for fetching URL sources
    pub request_timeout: Duration,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            source: DataSource::Url(DEFAULT_DATASET_URL.to_string()),
            has_header: true,
            delimiter: b',',
            batch_size: DEFAULT_BATCH_SIZE,
            infer_schema_rows: None,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl DatasetConfig {
    /// Default configuration reading from the given source
    #[must_use]
    pub fn for_source(source: DataSource) -> Self {
        Self {
            source,
            ..Self::default()
        }
    }

    /// Default configuration with overrides from `HF_DATASET_SOURCE` and `HF_BATCH_SIZE`
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(source) = std::env::var(SOURCE_ENV_VAR) {
            if !source.trim().is_empty() {
                config.source = DataSource::parse(source.trim());
            }
        }

        if let Ok(value) = std::env::var(BATCH_SIZE_ENV_VAR) {
            match value.trim().parse::<usize>() {
                Ok(size) if size > 0 => config.batch_size = size,
                _ => warn!("Ignoring invalid {BATCH_SIZE_ENV_VAR} value '{value}'"),
            }
        }

        config
    }

    /// Set the dataset source
    #[must_use]
    pub fn with_source(mut self, source: DataSource) -> Self {
        self.source = source;
        self
    }

    /// Set the CSV delimiter
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the batch size, ignoring zero
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        if batch_size > 0 {
            self.batch_size = batch_size;
        }
        self
    }
}
