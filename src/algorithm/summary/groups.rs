//! Per-age-group breakdown.
//!
//! Records are partitioned by `AgeGroup` into a fixed array indexed by the
//! group's position, so every group appears exactly once and in ascending
//! age order whatever the input holds.

use serde::Serialize;

use crate::algorithm::summary::headline::survival_rate;
use crate::models::{AgeGroup, PatientRecord};

/// Aggregates for one age group
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryRow {
    /// The group these figures describe
    pub age_group: AgeGroup,
    /// Survivors in the group
    pub survival_count: usize,
    /// Patients in the group
    pub total: usize,
    /// Survivors as a percentage of the group, 2 decimals (0 for an empty group)
    pub survival_rate: f64,
    /// Mean serum creatinine, `None` for an empty group
    pub avg_serum_creatinine: Option<f64>,
    /// Mean ejection fraction, `None` for an empty group
    pub avg_ejection_fraction: Option<f64>,
    /// Smokers
    pub smoking: usize,
    /// Patients with high blood pressure
    pub high_blood_pressure: usize,
    /// Patients with anaemia
    pub anaemia: usize,
    /// Patients with diabetes
    pub diabetes: usize,
}

impl SummaryRow {
    /// Deaths in the group
    #[must_use]
    pub const fn death_count(&self) -> usize {
        self.total - self.survival_count
    }

    /// Whether the group has no patients
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total == 0
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct GroupAccumulator {
    survival_count: usize,
    total: usize,
    serum_creatinine_sum: f64,
    ejection_fraction_sum: f64,
    smoking: usize,
    high_blood_pressure: usize,
    anaemia: usize,
    diabetes: usize,
}

impl GroupAccumulator {
    fn add(&mut self, record: &PatientRecord) {
        self.total += 1;
        self.survival_count += usize::from(record.survived());
        self.serum_creatinine_sum += record.serum_creatinine;
        self.ejection_fraction_sum += record.ejection_fraction;
        self.smoking += usize::from(record.smoking);
        self.high_blood_pressure += usize::from(record.high_blood_pressure);
        self.anaemia += usize::from(record.anaemia);
        self.diabetes += usize::from(record.diabetes);
    }

    fn mean(&self, sum: f64) -> Option<f64> {
        (self.total > 0).then(|| sum / self.total as f64)
    }

    fn finish(self, age_group: AgeGroup) -> SummaryRow {
        SummaryRow {
            age_group,
            survival_count: self.survival_count,
            total: self.total,
            survival_rate: survival_rate(self.survival_count, self.total),
            avg_serum_creatinine: self.mean(self.serum_creatinine_sum),
            avg_ejection_fraction: self.mean(self.ejection_fraction_sum),
            smoking: self.smoking,
            high_blood_pressure: self.high_blood_pressure,
            anaemia: self.anaemia,
            diabetes: self.diabetes,
        }
    }
}

/// Compute the five summary rows, youngest group first
#[must_use]
pub fn summary_rows<'a>(records: impl IntoIterator<Item = &'a PatientRecord>) -> Vec<SummaryRow> {
    let mut groups = [GroupAccumulator::default(); AgeGroup::ALL.len()];

    for record in records {
        groups[record.age_group.index()].add(record);
    }

    AgeGroup::ALL
        .into_iter()
        .zip(groups)
        .map(|(age_group, acc)| acc.finish(age_group))
        .collect()
}
