//! Patient record model
//!
//! One row of the heart-failure dataset, with the derived `Gender` and
//! `AgeGroup` fields attached. Records are built from normalised Arrow
//! batches using `serde_arrow`.

use arrow::record_batch::RecordBatch;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::types::{AgeGroup, Gender};
use crate::schema::{REQUIRED_COLUMNS, project_required};

/// Row shape of the required columns after normalisation
#[derive(Debug, Clone, Deserialize)]
struct RawPatientRecord {
    age: f64,
    sex: i64,
    #[serde(rename = "DEATH_EVENT")]
    death_event: i64,
    serum_creatinine: f64,
    ejection_fraction: f64,
    smoking: i64,
    high_blood_pressure: i64,
    anaemia: i64,
    diabetes: i64,
}

/// A single patient with clinical measurements and risk-factor flags
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatientRecord {
    /// Age in years
    pub age: f64,
    /// Derived from the sex code
    pub gender: Gender,
    /// Derived from `age`
    pub age_group: AgeGroup,
    /// Outcome flag (`DEATH_EVENT == 1`)
    pub died: bool,
    /// Serum creatinine (mg/dL)
    pub serum_creatinine: f64,
    /// Ejection fraction (%)
    pub ejection_fraction: f64,
    /// Smoker
    pub smoking: bool,
    /// High blood pressure
    pub high_blood_pressure: bool,
    /// Anaemia
    pub anaemia: bool,
    /// Diabetes
    pub diabetes: bool,
}

impl PatientRecord {
    /// Create a record with zeroed clinical values and no risk factors
    ///
    /// Fails when `age` is outside the binned domain `[0, 150)`.
    pub fn new(age: f64, gender: Gender, died: bool) -> Result<Self> {
        let age_group = AgeGroup::from_age(age)
            .ok_or_else(|| Error::schema(format!("age {age} is outside [0, 150)")))?;

        Ok(Self {
            age,
            gender,
            age_group,
            died,
            serum_creatinine: 0.0,
            ejection_fraction: 0.0,
            smoking: false,
            high_blood_pressure: false,
            anaemia: false,
            diabetes: false,
        })
    }

    /// Set clinical measurements
    #[must_use]
    pub const fn with_clinical(mut self, serum_creatinine: f64, ejection_fraction: f64) -> Self {
        self.serum_creatinine = serum_creatinine;
        self.ejection_fraction = ejection_fraction;
        self
    }

    /// Set risk-factor flags
    #[must_use]
    pub const fn with_risk_factors(
        mut self,
        smoking: bool,
        high_blood_pressure: bool,
        anaemia: bool,
        diabetes: bool,
    ) -> Self {
        self.smoking = smoking;
        self.high_blood_pressure = high_blood_pressure;
        self.anaemia = anaemia;
        self.diabetes = diabetes;
        self
    }

    /// Whether the patient survived (`DEATH_EVENT == 0`)
    #[must_use]
    pub const fn survived(&self) -> bool {
        !self.died
    }

    /// Convert a normalised record batch into patient records
    ///
    /// The batch must already have passed schema validation; columns other
    /// than the required ones are ignored.
    pub fn from_batch(batch: &RecordBatch) -> Result<Vec<Self>> {
        let projected = project_required(batch)?;

        let raw: Vec<RawPatientRecord> = serde_arrow::from_record_batch(&projected)
            .map_err(|e| {
                Error::schema(format!(
                    "failed to read columns {}: {e}",
                    REQUIRED_COLUMNS.join(", ")
                ))
            })?;

        raw.into_iter().map(Self::try_from).collect()
    }
}

impl TryFrom<RawPatientRecord> for PatientRecord {
    type Error = Error;

    fn try_from(raw: RawPatientRecord) -> Result<Self> {
        Ok(Self::new(raw.age, Gender::from_sex_code(raw.sex), raw.death_event == 1)?
            .with_clinical(raw.serum_creatinine, raw.ejection_fraction)
            .with_risk_factors(
                raw.smoking == 1,
                raw.high_blood_pressure == 1,
                raw.anaemia == 1,
                raw.diabetes == 1,
            ))
    }
}
