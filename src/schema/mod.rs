//! Required columns, schema validation and numeric normalisation.
//!
//! CSV schema inference decides column types from the data, so the same
//! column may arrive as `Int64`, `Float64` or `Utf8` depending on the file.
//! Validation casts every required column onto one canonical type and
//! rejects missing, non-numeric or out-of-domain values.

use std::sync::Arc;

use arrow::array::{Array, ArrayRef, Float64Array};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use log::debug;

use crate::error::{Error, Result};
use crate::models::AgeGroup;

/// Name of the derived gender column
pub const GENDER_COLUMN: &str = "Gender";

/// Name of the derived age group column
pub const AGE_GROUP_COLUMN: &str = "AgeGroup";

/// How a required column is validated and stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Finite measurement, stored as `Float64`
    Continuous,
    /// 0/1 indicator, stored as `Int64`
    Binary,
}

impl ColumnKind {
    /// Canonical Arrow type for the column
    #[must_use]
    pub const fn data_type(self) -> DataType {
        match self {
            Self::Continuous => DataType::Float64,
            Self::Binary => DataType::Int64,
        }
    }
}

/// Required columns and their kinds, in the order records are read
pub const REQUIRED_FIELDS: [(&str, ColumnKind); 9] = [
    ("age", ColumnKind::Continuous),
    ("sex", ColumnKind::Binary),
    ("DEATH_EVENT", ColumnKind::Binary),
    ("serum_creatinine", ColumnKind::Continuous),
    ("ejection_fraction", ColumnKind::Continuous),
    ("smoking", ColumnKind::Binary),
    ("high_blood_pressure", ColumnKind::Binary),
    ("anaemia", ColumnKind::Binary),
    ("diabetes", ColumnKind::Binary),
];

/// Names of the required columns
pub const REQUIRED_COLUMNS: [&str; 9] = [
    "age",
    "sex",
    "DEATH_EVENT",
    "serum_creatinine",
    "ejection_fraction",
    "smoking",
    "high_blood_pressure",
    "anaemia",
    "diabetes",
];

/// A schema problem found in the input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaIssue {
    /// Column the issue concerns
    pub column: String,
    /// Description of the problem
    pub description: String,
}

/// List every required column missing from a schema
#[must_use]
pub fn find_missing_columns(schema: &Schema) -> Vec<SchemaIssue> {
    REQUIRED_COLUMNS
        .iter()
        .filter(|name| schema.index_of(name).is_err())
        .map(|name| SchemaIssue {
            column: (*name).to_string(),
            description: format!("missing required column '{name}'"),
        })
        .collect()
}

/// Fail with a `Schema` error naming all missing required columns
pub fn validate_schema(schema: &Schema) -> Result<()> {
    let issues = find_missing_columns(schema);
    if issues.is_empty() {
        return Ok(());
    }

    let message = issues
        .iter()
        .map(|issue| issue.description.as_str())
        .collect::<Vec<_>>()
        .join("; ");
    Err(Error::schema(message))
}

/// Validate a raw batch and cast required columns onto their canonical types
///
/// Columns that are not required are carried through unchanged.
pub fn normalize_batch(batch: &RecordBatch) -> Result<RecordBatch> {
    let schema = batch.schema();
    validate_schema(&schema)?;

    let mut fields: Vec<Field> = Vec::with_capacity(schema.fields().len());
    let mut columns: Vec<ArrayRef> = Vec::with_capacity(batch.num_columns());

    for (idx, field) in schema.fields().iter().enumerate() {
        let required = REQUIRED_FIELDS
            .iter()
            .find(|(name, _)| *name == field.name().as_str());

        if let Some((name, kind)) = required {
            let column = normalize_column(batch.column(idx), name, *kind)?;
            fields.push(Field::new(*name, kind.data_type(), false));
            columns.push(column);
        } else {
            fields.push(field.as_ref().clone());
            columns.push(batch.column(idx).clone());
        }
    }

    Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)?)
}

/// Project a normalised batch onto the required columns, in `REQUIRED_COLUMNS` order
pub fn project_required(batch: &RecordBatch) -> Result<RecordBatch> {
    let schema = batch.schema();
    let indices = REQUIRED_COLUMNS
        .iter()
        .map(|name| {
            schema
                .index_of(name)
                .map_err(|_| Error::schema(format!("missing required column '{name}'")))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(batch.project(&indices)?)
}

fn normalize_column(column: &ArrayRef, name: &str, kind: ColumnKind) -> Result<ArrayRef> {
    if column.null_count() > 0 {
        return Err(Error::schema(format!(
            "column '{name}' contains {} missing values",
            column.null_count()
        )));
    }

    let as_float = if column.data_type() == &DataType::Float64 {
        column.clone()
    } else {
        debug!(
            "Converting column '{name}' from {:?} to Float64",
            column.data_type()
        );
        cast(column, &DataType::Float64).map_err(|e| {
            Error::schema(format!(
                "column '{name}' of type {:?} is not numeric: {e}",
                column.data_type()
            ))
        })?
    };

    // Safe casts turn unparsable values into nulls
    if as_float.null_count() > 0 {
        return Err(Error::schema(format!(
            "column '{name}' contains {} non-numeric values",
            as_float.null_count()
        )));
    }

    let values = as_float
        .as_any()
        .downcast_ref::<Float64Array>()
        .ok_or_else(|| Error::schema(format!("column '{name}' could not be read as Float64")))?;

    if let Some(row) = values.values().iter().position(|v| !v.is_finite()) {
        return Err(Error::schema(format!(
            "column '{name}' has a non-numeric value at row {row}"
        )));
    }

    match kind {
        ColumnKind::Continuous => {
            if name == "age" {
                check_age_domain(values)?;
            }
            Ok(as_float)
        }
        ColumnKind::Binary => {
            if let Some((row, value)) = values
                .values()
                .iter()
                .enumerate()
                .find(|(_, v)| **v != 0.0 && **v != 1.0)
            {
                return Err(Error::schema(format!(
                    "column '{name}' must be 0 or 1, found {value} at row {row}"
                )));
            }
            Ok(cast(&as_float, &DataType::Int64)?)
        }
    }
}

fn check_age_domain(ages: &Float64Array) -> Result<()> {
    for (row, age) in ages.values().iter().enumerate() {
        if *age < AgeGroup::MIN_AGE {
            return Err(Error::schema(format!("age is negative ({age}) at row {row}")));
        }
        if AgeGroup::from_age(*age).is_none() {
            return Err(Error::schema(format!(
                "age {age} at row {row} is outside [{}, {})",
                AgeGroup::MIN_AGE,
                AgeGroup::MAX_AGE
            )));
        }
    }
    Ok(())
}
