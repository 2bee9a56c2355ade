//! Tests for loading and preparing the patient dataset

use hf_summary::schema::{AGE_GROUP_COLUMN, GENDER_COLUMN};
use hf_summary::{AgeGroup, DataSource, Gender, prepare_dataset};
use tempfile::TempDir;

use crate::utils::{HEADER, SAMPLE_ROWS, write_csv, write_file};

#[test]
fn test_prepare_sample_csv() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "heart.csv", &SAMPLE_ROWS);

    let table = prepare_dataset(&DataSource::from(path.as_path())).unwrap();
    assert_eq!(table.num_rows(), 13);
    assert_eq!(table.source(), &DataSource::Path(path));

    // Input columns are kept alongside the derived ones
    let schema = table.batch().schema();
    assert!(schema.index_of("platelets").is_ok());
    assert!(schema.index_of("time").is_ok());
    assert_eq!(schema.fields().len(), 15);
    assert_eq!(schema.field(13).name(), GENDER_COLUMN);
    assert_eq!(schema.field(14).name(), AGE_GROUP_COLUMN);

    let first = &table.records()[0];
    assert_eq!(first.gender, Gender::Male);
    assert_eq!(first.age_group, AgeGroup::Over70);
    assert!(first.died);
    assert!(first.high_blood_pressure);
    assert_eq!(first.serum_creatinine, 1.9);

    let fractional = &table.records()[11];
    assert_eq!(fractional.age, 60.667);
    assert_eq!(fractional.age_group, AgeGroup::From61To70);
    assert_eq!(fractional.gender, Gender::Female);
    assert!(fractional.survived());

    assert_eq!(table.records_for(Gender::Female).count(), 4);
    assert_eq!(table.records_for(Gender::Male).count(), 9);
}

#[test]
fn test_age_group_assignment_is_total() {
    let dir = TempDir::new().unwrap();
    let rows = [
        "0,0,100,0,30,0,250000,1.0,135,0,0,30,0",
        "39.9,0,100,0,30,0,250000,1.0,135,0,0,30,0",
        "40,0,100,0,30,0,250000,1.0,135,0,0,30,0",
        "50,0,100,0,30,0,250000,1.0,135,0,0,30,0",
        "60,0,100,0,30,0,250000,1.0,135,0,0,30,0",
        "70,0,100,0,30,0,250000,1.0,135,0,0,30,0",
        "149,0,100,0,30,0,250000,1.0,135,0,0,30,0",
    ];
    let path = write_csv(&dir, "bounds.csv", &rows);
    let table = prepare_dataset(&DataSource::from(path.as_path())).unwrap();

    let groups: Vec<_> = table.records().iter().map(|r| r.age_group).collect();
    assert_eq!(
        groups,
        [
            AgeGroup::Below40,
            AgeGroup::Below40,
            AgeGroup::From40To50,
            AgeGroup::From51To60,
            AgeGroup::From61To70,
            AgeGroup::Over70,
            AgeGroup::Over70,
        ]
    );
}

#[test]
fn test_header_only_file_gives_empty_table() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "empty.csv", &[]);
    let table = prepare_dataset(&DataSource::from(path.as_path())).unwrap();
    assert!(table.is_empty());
}

#[test]
fn test_missing_source_is_unavailable() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("does_not_exist.csv");
    let err = prepare_dataset(&DataSource::from(path.as_path())).unwrap_err();
    assert!(err.is_unavailable(), "unexpected error: {err}");
}

#[test]
fn test_missing_column_is_schema_error() {
    let dir = TempDir::new().unwrap();
    let header = HEADER.replace(",diabetes", "");
    let path = write_file(
        &dir,
        "no_diabetes.csv",
        &format!("{header}\n75,0,582,20,1,265000,1.9,130,1,0,4,1\n"),
    );
    let err = prepare_dataset(&DataSource::from(path.as_path())).unwrap_err();
    assert!(err.is_schema());
    assert!(err.to_string().contains("'diabetes'"));
}

#[test]
fn test_non_numeric_age_is_schema_error() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(
        &dir,
        "bad_age.csv",
        &[
            "75,0,582,0,20,1,265000,1.9,130,1,0,4,1",
            "unknown,0,582,0,20,1,265000,1.9,130,1,0,4,1",
        ],
    );
    let err = prepare_dataset(&DataSource::from(path.as_path())).unwrap_err();
    assert!(err.is_schema());
    assert!(err.to_string().contains("'age'"));
}

#[test]
fn test_negative_age_is_schema_error() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "negative.csv", &["-4,0,582,0,20,1,265000,1.9,130,1,0,4,1"]);
    let err = prepare_dataset(&DataSource::from(path.as_path())).unwrap_err();
    assert!(err.is_schema());
    assert!(err.to_string().contains("negative"));
}

#[test]
fn test_age_beyond_last_bin_rejects_dataset() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(
        &dir,
        "old.csv",
        &["65,0,146,0,20,0,162000,1.3,129,1,1,7,1", "150,0,146,0,20,0,162000,1.3,129,1,1,7,0"],
    );
    let err = prepare_dataset(&DataSource::from(path.as_path())).unwrap_err();
    assert!(err.is_schema());
    assert!(err.to_string().contains("age 150"));
}

#[test]
fn test_missing_value_is_schema_error() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(
        &dir,
        "gap.csv",
        &[
            "75,0,582,0,20,1,265000,1.9,130,1,0,4,1",
            "55,0,582,0,20,1,265000,,130,1,0,4,1",
        ],
    );
    let err = prepare_dataset(&DataSource::from(path.as_path())).unwrap_err();
    assert!(err.is_schema());
    assert!(err.to_string().contains("serum_creatinine"));
}
