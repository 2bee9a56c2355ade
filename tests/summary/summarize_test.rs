//! Tests for headline metrics and age-group summaries

use hf_summary::{
    AgeGroup, DataSource, Gender, PatientTable, prepare_dataset, summarize, summarize_all,
    summarize_records,
};
use tempfile::TempDir;

use crate::utils::{SAMPLE_ROWS, SCENARIO_ROWS, write_csv};

const LABELS: [&str; 5] = ["Below 40", "40-50", "51-60", "61-70", "71+"];

fn load(rows: &[&str]) -> PatientTable {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "heart.csv", rows);
    prepare_dataset(&DataSource::Path(path)).unwrap()
}

fn assert_close(actual: Option<f64>, expected: f64) {
    let actual = actual.expect("expected a value");
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn test_three_patient_scenario() {
    let table = load(&SCENARIO_ROWS);
    let summary = summarize(&table, Gender::Female);

    assert_eq!(summary.headline.survival_rate, 66.67);
    assert_eq!(summary.headline.total_survival, 2);
    assert_eq!(summary.headline.total_death, 1);
    assert_eq!(summary.headline.avg_age_survival, 53.5);

    let survivors: Vec<_> = summary.rows.iter().map(|row| row.survival_count).collect();
    assert_eq!(survivors, [1, 0, 0, 0, 1]);
    assert_eq!(summary.rows[1].total, 1);
    assert_eq!(summary.rows[1].death_count(), 1);
}

#[test]
fn test_gender_without_patients() {
    let table = load(&SCENARIO_ROWS);
    let summary = summarize(&table, Gender::Male);

    assert_eq!(summary.headline.survival_rate, 0.0);
    assert_eq!(summary.headline.avg_age_survival, 0.0);
    assert_eq!(summary.headline.total_survival, 0);
    assert_eq!(summary.headline.total_death, 0);
    assert_eq!(summary.rows.len(), 5);
    assert!(summary.rows.iter().all(|row| row.total == 0));
    assert!(summary.rows.iter().all(|row| row.avg_ejection_fraction.is_none()));
}

#[test]
fn test_sample_female_summary() {
    let table = load(&SAMPLE_ROWS);
    let summary = summarize(&table, Gender::Female);

    assert_eq!(summary.headline.total, 4);
    assert_eq!(summary.headline.total_survival, 2);
    assert_eq!(summary.headline.survival_rate, 50.0);
    assert_eq!(summary.headline.avg_age_survival, 51.33);

    let row = &summary.rows[AgeGroup::From61To70.index()];
    assert_eq!(row.total, 3);
    assert_eq!(row.survival_count, 1);
    assert_eq!(row.survival_rate, 33.33);
    assert_close(row.avg_serum_creatinine, 5.2 / 3.0);
    assert_close(row.avg_ejection_fraction, 125.0 / 3.0);
    assert_eq!(row.anaemia, 2);
    assert_eq!(row.diabetes, 2);
    assert_eq!(row.high_blood_pressure, 1);
    assert_eq!(row.smoking, 0);

    let row = &summary.rows[AgeGroup::From40To50.index()];
    assert_eq!((row.total, row.survival_count), (1, 1));
    assert_eq!(row.survival_rate, 100.0);
}

#[test]
fn test_sample_male_summary() {
    let table = load(&SAMPLE_ROWS);
    let summary = summarize(&table, Gender::Male);

    assert_eq!(summary.headline.total, 9);
    assert_eq!(summary.headline.total_survival, 1);
    assert_eq!(summary.headline.total_death, 8);
    assert_eq!(summary.headline.survival_rate, 11.11);
    assert_eq!(summary.headline.avg_age_survival, 45.0);

    let totals: Vec<_> = summary.rows.iter().map(|row| row.total).collect();
    assert_eq!(totals, [0, 1, 2, 2, 4]);

    let row = &summary.rows[AgeGroup::From51To60.index()];
    assert_close(row.avg_serum_creatinine, 1.5);
    assert_close(row.avg_ejection_fraction, 29.0);
    assert_eq!(row.survival_rate, 0.0);

    let row = &summary.rows[AgeGroup::Over70.index()];
    assert_eq!(row.smoking, 2);
    assert_eq!(row.high_blood_pressure, 3);
    assert_eq!(row.anaemia, 3);
}

#[test]
fn test_counts_are_consistent() {
    let table = load(&SAMPLE_ROWS);
    for summary in summarize_all(&table) {
        let headline = summary.headline;
        assert_eq!(headline.total_survival + headline.total_death, headline.total);

        let row_total: usize = summary.rows.iter().map(|row| row.total).sum();
        let row_survivors: usize = summary.rows.iter().map(|row| row.survival_count).sum();
        assert_eq!(row_total, headline.total);
        assert_eq!(row_survivors, headline.total_survival);

        for row in &summary.rows {
            assert_eq!(row.survival_count + row.death_count(), row.total);
            assert!((0.0..=100.0).contains(&row.survival_rate));
        }
        assert!((0.0..=100.0).contains(&headline.survival_rate));
    }
}

#[test]
fn test_rows_keep_fixed_order() {
    let mut reversed = SAMPLE_ROWS;
    reversed.reverse();

    let forward = summarize(&load(&SAMPLE_ROWS), Gender::Male);
    let backward = summarize(&load(&reversed), Gender::Male);

    for summary in [&forward, &backward] {
        let labels: Vec<_> = summary.rows.iter().map(|row| row.age_group.label()).collect();
        assert_eq!(labels, LABELS);
    }
    for (a, b) in forward.rows.iter().zip(&backward.rows) {
        assert_eq!(a.total, b.total);
        assert_eq!(a.survival_count, b.survival_count);
        assert_eq!(a.survival_rate, b.survival_rate);
        assert_eq!(a.smoking, b.smoking);
    }
    assert_eq!(forward.headline, backward.headline);
}

#[test]
fn test_summarize_is_idempotent() {
    let table = load(&SAMPLE_ROWS);
    let first = summarize(&table, Gender::Female);
    let second = summarize(&table, Gender::Female);
    assert_eq!(first, second);
    assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());

    for (a, b) in first.rows.iter().zip(&second.rows) {
        assert_eq!(
            a.avg_serum_creatinine.map(f64::to_bits),
            b.avg_serum_creatinine.map(f64::to_bits)
        );
    }
    // The table itself is left untouched
    assert_eq!(table.num_rows(), 13);
}

#[test]
fn test_summarize_records_matches_table() {
    let table = load(&SAMPLE_ROWS);
    let females: Vec<_> = table.records_for(Gender::Female).cloned().collect();
    assert_eq!(
        summarize_records(Gender::Female, &females),
        summarize(&table, Gender::Female)
    );
}
