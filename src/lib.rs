//! A Rust library for loading heart-failure clinical records and computing
//! the grouped survival summaries behind the clinical dashboard.

pub mod algorithm;
pub mod chart;
pub mod config;
pub mod dataset;
pub mod error;
pub mod models;
pub mod reader;
pub mod schema;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use config::DatasetConfig;
pub use error::{Error, Result};
pub use models::{AgeGroup, Gender, PatientRecord};
pub use reader::DataSource;

// Dataset preparation
pub use dataset::{DatasetCache, PatientTable, prepare_dataset, prepare_dataset_with_config};

// Summaries
pub use algorithm::summary::{
    HeadlineMetrics, SummaryRow, SummaryTable, summarize, summarize_all, summarize_records,
};

// Chart descriptors
pub use chart::{ChartSpec, dashboard_charts};

// Arrow types
pub use arrow::record_batch::RecordBatch;
