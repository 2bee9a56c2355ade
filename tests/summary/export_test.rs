//! Tests for summary export and chart descriptors on a prepared dataset

use arrow::array::{Array, Float64Array, StringArray, UInt64Array};
use hf_summary::{DataSource, Gender, dashboard_charts, prepare_dataset, summarize};
use tempfile::TempDir;

use crate::utils::{SAMPLE_ROWS, write_csv};

#[test]
fn test_summary_to_record_batch() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "heart.csv", &SAMPLE_ROWS);
    let table = prepare_dataset(&DataSource::Path(path)).unwrap();

    let batch = summarize(&table, Gender::Male).to_record_batch().unwrap();
    assert_eq!(batch.num_rows(), 5);

    let groups = batch
        .column_by_name("age_group")
        .and_then(|col| col.as_any().downcast_ref::<StringArray>())
        .unwrap();
    assert_eq!(groups.value(0), "Below 40");
    assert_eq!(groups.value(4), "71+");

    let totals = batch
        .column_by_name("total")
        .and_then(|col| col.as_any().downcast_ref::<UInt64Array>())
        .unwrap();
    assert_eq!(totals.values().to_vec(), vec![0, 1, 2, 2, 4]);

    let creatinine = batch
        .column_by_name("avg_serum_creatinine")
        .and_then(|col| col.as_any().downcast_ref::<Float64Array>())
        .unwrap();
    assert!(creatinine.is_null(0));
    assert!((creatinine.value(2) - 1.5).abs() < 1e-9);
}

#[test]
fn test_dashboard_charts_follow_rows() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "heart.csv", &SAMPLE_ROWS);
    let table = prepare_dataset(&DataSource::Path(path)).unwrap();

    let summary = summarize(&table, Gender::Female);
    let charts = dashboard_charts(&summary);
    assert_eq!(charts.len(), 4);

    let rates = &charts[2].traces[0].y;
    let expected: Vec<_> = summary.rows.iter().map(|row| Some(row.survival_rate)).collect();
    assert_eq!(rates, &expected);

    let ejection = &charts[1].traces[1].y;
    assert_eq!(ejection[0], None);
    assert_eq!(ejection[1], Some(15.0));

    let json = serde_json::to_value(&charts).unwrap();
    assert_eq!(json[3]["traces"].as_array().map(Vec::len), Some(4));
}
