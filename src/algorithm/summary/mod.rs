//! Survival summaries for the dashboard
//!
//! Given a gender, the summary restricts the prepared table to that gender
//! and computes headline metrics plus one row per age group. Everything
//! here is a pure function of its input: repeated calls with the same
//! table and gender produce identical output.

pub mod groups;
pub mod headline;

use arrow::datatypes::FieldRef;
use arrow::record_batch::RecordBatch;
use serde::{Deserialize, Serialize};
use serde_arrow::schema::{SchemaLike, TracingOptions};

use crate::dataset::PatientTable;
use crate::error::{Error, Result};
use crate::models::{Gender, PatientRecord};

pub use groups::{SummaryRow, summary_rows};
pub use headline::{HeadlineMetrics, calculate_headline, survival_rate};

/// Headline metrics and age-group rows for one gender
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryTable {
    /// Gender the table was computed for
    pub gender: Gender,
    /// Scalar metrics over the whole subset
    pub headline: HeadlineMetrics,
    /// One row per age group, youngest first
    pub rows: Vec<SummaryRow>,
}

/// Flat row layout used for Arrow export
#[derive(Debug, Serialize, Deserialize)]
struct SummaryRecord {
    gender: String,
    age_group: String,
    survival_count: u64,
    total: u64,
    survival_rate: f64,
    avg_serum_creatinine: Option<f64>,
    avg_ejection_fraction: Option<f64>,
    smoking: u64,
    high_blood_pressure: u64,
    anaemia: u64,
    diabetes: u64,
}

impl SummaryTable {
    /// Split into headline metrics and rows
    #[must_use]
    pub fn into_parts(self) -> (HeadlineMetrics, Vec<SummaryRow>) {
        (self.headline, self.rows)
    }

    /// Serialise as pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Convert the rows into an Arrow record batch with a `gender` column
    ///
    /// The schema is fixed: labels are `Utf8` like the enriched table's
    /// derived columns, and the group means are nullable `Float64` even when
    /// every group is empty.
    pub fn to_record_batch(&self) -> Result<RecordBatch> {
        let records: Vec<SummaryRecord> = self
            .rows
            .iter()
            .map(|row| SummaryRecord {
                gender: self.gender.label().to_string(),
                age_group: row.age_group.label().to_string(),
                survival_count: row.survival_count as u64,
                total: row.total as u64,
                survival_rate: row.survival_rate,
                avg_serum_creatinine: row.avg_serum_creatinine,
                avg_ejection_fraction: row.avg_ejection_fraction,
                smoking: row.smoking as u64,
                high_blood_pressure: row.high_blood_pressure as u64,
                anaemia: row.anaemia as u64,
                diabetes: row.diabetes as u64,
            })
            .collect();

        let fields = Vec::<FieldRef>::from_type::<SummaryRecord>(
            TracingOptions::default().strings_as_large_utf8(false),
        )
        .map_err(|e| Error::Serialization(format!("schema generation error: {e}")))?;

        serde_arrow::to_record_batch(&fields, &records)
            .map_err(|e| Error::Serialization(e.to_string()))
    }
}

/// Summarise records already restricted to one gender
#[must_use]
pub fn summarize_records(gender: Gender, records: &[PatientRecord]) -> SummaryTable {
    SummaryTable {
        gender,
        headline: calculate_headline(records),
        rows: summary_rows(records),
    }
}

/// Summarise the patients of one gender
#[must_use]
pub fn summarize(table: &PatientTable, gender: Gender) -> SummaryTable {
    let records: Vec<PatientRecord> = table.records_for(gender).cloned().collect();
    summarize_records(gender, &records)
}

/// Summarise both genders, in selector order
#[must_use]
pub fn summarize_all(table: &PatientTable) -> Vec<SummaryTable> {
    Gender::ALL
        .into_iter()
        .map(|gender| summarize(table, gender))
        .collect()
}
