#![allow(missing_docs)]

use std::fs;
use std::path::PathBuf;

use labrec_model::{
    PatientRecord, RecordStatus, ReferenceRange, TestDefinition, TurnaroundPolicy, parse_timestamp,
};
use labrec_store::{
    RecordUpdate, append_record, append_test, load_catalog, load_records, record_exists,
    update_record,
};
use tempfile::TempDir;

fn temp_path(dir: &TempDir, name: &str) -> PathBuf {
    dir.path().join(name)
}

fn hgb_record() -> PatientRecord {
    PatientRecord {
        patient_id: "1234567".to_string(),
        test_name: "HGB".to_string(),
        test_at: parse_timestamp("2024-01-01 08:00:00").unwrap(),
        result: 12.0,
        unit: "g/dL".to_string(),
        status: RecordStatus::Pending,
        result_at: None,
    }
}

#[test]
fn missing_files_load_empty() {
    let dir = TempDir::new().unwrap();
    assert!(load_catalog(&temp_path(&dir, "medicalTest.txt")).unwrap().is_empty());
    assert!(load_records(&temp_path(&dir, "medicalRecord.txt")).unwrap().is_empty());
    assert!(!record_exists(&temp_path(&dir, "medicalRecord.txt"), "1234567", "HGB").unwrap());
}

#[test]
fn catalog_append_then_load_round_trips() {
    let dir = TempDir::new().unwrap();
    let path = temp_path(&dir, "medicalTest.txt");
    let definition = TestDefinition {
        name: "HGB".to_string(),
        range: ReferenceRange::parse(">13.8,<17.2").unwrap(),
        unit: "g/dL".to_string(),
        turnaround: TurnaroundPolicy::parse("1-0-0").unwrap(),
    };
    append_test(&path, &definition).unwrap();
    let catalog = load_catalog(&path).unwrap();
    assert_eq!(catalog.lookup("HGB"), Some(&definition));
}

#[test]
fn catalog_load_skips_malformed_lines() {
    let dir = TempDir::new().unwrap();
    let path = temp_path(&dir, "medicalTest.txt");
    fs::write(
        &path,
        "HGB;>13.8,<17.2;g/dL;1-0-0\ngarbage\nWBC;>4.5,<11.0;x10^9/L;0-4-0\n",
    )
    .unwrap();
    let catalog = load_catalog(&path).unwrap();
    assert_eq!(catalog.len(), 2);
}

#[test]
fn record_append_then_load_round_trips() {
    let dir = TempDir::new().unwrap();
    let path = temp_path(&dir, "medicalRecord.txt");
    let record = hgb_record();
    append_record(&path, &record).unwrap();
    assert_eq!(load_records(&path).unwrap(), vec![record]);
    assert!(record_exists(&path, "1234567", "HGB").unwrap());
    assert!(!record_exists(&path, "1234567", "WBC").unwrap());
}

#[test]
fn record_load_skips_malformed_lines() {
    let dir = TempDir::new().unwrap();
    let path = temp_path(&dir, "medicalRecord.txt");
    fs::write(
        &path,
        "1234567: HGB, 2024-01-01 08:00:00, 12.0, g/dL, Pending\nnot a record\n",
    )
    .unwrap();
    assert_eq!(load_records(&path).unwrap().len(), 1);
}

#[test]
fn update_rewrites_only_the_first_matching_line() {
    let dir = TempDir::new().unwrap();
    let path = temp_path(&dir, "medicalRecord.txt");
    fs::write(
        &path,
        "1234567: HGB, 2024-01-01 08:00:00, 12.0, g/dL, Pending\n\
         garbage line kept verbatim\n\
         1234567: HGB, 2024-01-02 08:00:00, 13.0, g/dL, Pending\n\
         7654321: HGB, 2024-01-03 08:00:00, 14.0, g/dL, Pending\n",
    )
    .unwrap();

    let update = RecordUpdate {
        test_at: parse_timestamp("2024-01-01 08:00:00").unwrap(),
        result: 12.5,
        unit: "g/dL".to_string(),
        status: RecordStatus::Completed,
        result_at: Some(parse_timestamp("2024-01-01 10:00:00").unwrap()),
    };
    assert!(update_record(&path, "1234567", "HGB", &update).unwrap());

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(
        lines[0],
        "1234567: HGB, 2024-01-01 08:00:00, 12.5, g/dL, Completed, 2024-01-01 10:00:00"
    );
    // The duplicate key on line 3 and everything else is untouched.
    assert_eq!(lines[1], "garbage line kept verbatim");
    assert_eq!(lines[2], "1234567: HGB, 2024-01-02 08:00:00, 13.0, g/dL, Pending");
    assert_eq!(lines[3], "7654321: HGB, 2024-01-03 08:00:00, 14.0, g/dL, Pending");
}

#[test]
fn update_without_match_reports_false_and_leaves_file_alone() {
    let dir = TempDir::new().unwrap();
    let path = temp_path(&dir, "medicalRecord.txt");
    let original = "1234567: HGB, 2024-01-01 08:00:00, 12.0, g/dL, Pending\n";
    fs::write(&path, original).unwrap();

    let update = RecordUpdate {
        test_at: parse_timestamp("2024-01-01 08:00:00").unwrap(),
        result: 9.9,
        unit: "g/dL".to_string(),
        status: RecordStatus::Completed,
        result_at: None,
    };
    assert!(!update_record(&path, "7654321", "HGB", &update).unwrap());
    assert_eq!(fs::read_to_string(&path).unwrap(), original);
}

#[test]
fn key_match_does_not_cross_test_names_sharing_a_prefix() {
    let dir = TempDir::new().unwrap();
    let path = temp_path(&dir, "medicalRecord.txt");
    fs::write(
        &path,
        "1234567: HGB A1C, 2024-01-01 08:00:00, 5.0, %, Pending\n",
    )
    .unwrap();
    assert!(!record_exists(&path, "1234567", "HGB").unwrap());
    assert!(record_exists(&path, "1234567", "HGB A1C").unwrap());
}
