//! Dataset preparation
//!
//! Loads the raw patient table, validates and normalises the required
//! columns and attaches the derived `Gender` and `AgeGroup` columns. The
//! result is immutable and meant to be shared through [`DatasetCache`].

pub mod cache;

use std::sync::Arc;

use arrow::array::{Array, ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use log::debug;

use crate::config::DatasetConfig;
use crate::error::{Error, Result};
use crate::models::{AgeGroup, Gender, PatientRecord};
use crate::reader::{DataSource, read_source};
use crate::schema::{AGE_GROUP_COLUMN, GENDER_COLUMN, normalize_batch};
use crate::utils::logging::log_warning;

pub use cache::DatasetCache;

/// Validated patient table with derived columns
#[derive(Debug, Clone)]
pub struct PatientTable {
    source: DataSource,
    batch: RecordBatch,
    records: Vec<PatientRecord>,
}

impl PatientTable {
    /// Build a table from a raw batch read from `source`
    pub fn from_raw_batch(source: DataSource, raw: &RecordBatch) -> Result<Self> {
        let normalized = normalize_batch(raw)?;
        let batch = enrich_batch(&normalized)?;
        let records = PatientRecord::from_batch(&batch)?;
        if records.is_empty() {
            log_warning("Dataset contains no patients", Some(&source));
        }
        debug!("Prepared {} patient records from {source}", records.len());

        Ok(Self {
            source,
            batch,
            records,
        })
    }

    /// Where the table was loaded from
    #[must_use]
    pub const fn source(&self) -> &DataSource {
        &self.source
    }

    /// The enriched Arrow batch (input columns plus `Gender` and `AgeGroup`)
    #[must_use]
    pub const fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    /// Typed view of every record
    #[must_use]
    pub fn records(&self) -> &[PatientRecord] {
        &self.records
    }

    /// Number of patients
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.records.len()
    }

    /// Whether the table holds no patients
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records of one gender, in table order
    pub fn records_for(&self, gender: Gender) -> impl Iterator<Item = &PatientRecord> {
        self.records.iter().filter(move |record| record.gender == gender)
    }
}

/// Load and prepare the dataset from a source with default options
///
/// Every age must fall into one of the five bins, `[0, 150)`. A single
/// negative, non-finite or too-high age fails the whole load with a
/// `Schema` error; such records are never dropped or left unbinned.
pub fn prepare_dataset(source: &DataSource) -> Result<PatientTable> {
    prepare_dataset_with_config(&DatasetConfig::for_source(source.clone()))
}

/// Load and prepare the dataset described by `config`
pub fn prepare_dataset_with_config(config: &DatasetConfig) -> Result<PatientTable> {
    let raw = read_source(config)?;
    PatientTable::from_raw_batch(config.source.clone(), &raw)
}

/// Append `Gender` and `AgeGroup` columns to a normalised batch
///
/// Existing columns with those names are replaced.
pub fn enrich_batch(batch: &RecordBatch) -> Result<RecordBatch> {
    let sex = typed_column::<Int64Array>(batch, "sex")?;
    let age = typed_column::<Float64Array>(batch, "age")?;

    let genders: StringArray = sex
        .values()
        .iter()
        .map(|code| Some(Gender::from_sex_code(*code).label()))
        .collect();

    let age_groups: StringArray = age
        .values()
        .iter()
        .map(|age| {
            AgeGroup::from_age(*age)
                .map(|group| Some(group.label()))
                .ok_or_else(|| Error::schema(format!("age {age} does not fall into an age group")))
        })
        .collect::<Result<_>>()?;

    let schema = batch.schema();
    let mut fields: Vec<Field> = Vec::with_capacity(schema.fields().len() + 2);
    let mut columns: Vec<ArrayRef> = Vec::with_capacity(batch.num_columns() + 2);

    for (field, column) in schema.fields().iter().zip(batch.columns()) {
        if field.name() == GENDER_COLUMN || field.name() == AGE_GROUP_COLUMN {
            continue;
        }
        fields.push(field.as_ref().clone());
        columns.push(column.clone());
    }

    fields.push(Field::new(GENDER_COLUMN, DataType::Utf8, false));
    columns.push(Arc::new(genders));
    fields.push(Field::new(AGE_GROUP_COLUMN, DataType::Utf8, false));
    columns.push(Arc::new(age_groups));

    Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)?)
}

fn typed_column<'a, T: Array + 'static>(batch: &'a RecordBatch, name: &str) -> Result<&'a T> {
    batch
        .column_by_name(name)
        .ok_or_else(|| Error::schema(format!("missing required column '{name}'")))?
        .as_any()
        .downcast_ref::<T>()
        .ok_or_else(|| Error::schema(format!("column '{name}' has not been normalised")))
}
