//! Headline survival metrics over a filtered set of patients.

use std::fmt;

use serde::Serialize;

use crate::models::PatientRecord;
use crate::utils::round2;

/// Scalar survival figures for the selected subset
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeadlineMetrics {
    /// Survivors as a percentage of all patients, 2 decimals
    pub survival_rate: f64,
    /// Mean age of survivors, 2 decimals (0 without survivors)
    pub avg_age_survival: f64,
    /// Patients with `DEATH_EVENT == 0`
    pub total_survival: usize,
    /// Patients with `DEATH_EVENT == 1`
    pub total_death: usize,
    /// All patients in the subset
    pub total: usize,
}

/// Survival percentage rounded to 2 decimals, 0 for an empty population
#[must_use]
pub fn survival_rate(survived: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round2(survived as f64 / total as f64 * 100.0)
}

/// Compute headline metrics over every record given
#[must_use]
pub fn calculate_headline(records: &[PatientRecord]) -> HeadlineMetrics {
    let total = records.len();
    let (total_survival, survivor_age_sum) = records
        .iter()
        .filter(|record| record.survived())
        .fold((0usize, 0.0f64), |(count, sum), record| {
            (count + 1, sum + record.age)
        });

    let avg_age_survival = if total_survival == 0 {
        0.0
    } else {
        round2(survivor_age_sum / total_survival as f64)
    };

    HeadlineMetrics {
        survival_rate: survival_rate(total_survival, total),
        avg_age_survival,
        total_survival,
        total_death: total - total_survival,
        total,
    }
}

impl fmt::Display for HeadlineMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Survival Rate: {}%", self.survival_rate)?;
        writeln!(f, "Average Age of Survival: {}", self.avg_age_survival)?;
        writeln!(f, "Total Survival: {}", self.total_survival)?;
        write!(f, "Total Death: {}", self.total_death)
    }
}
