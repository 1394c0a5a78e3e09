//! Record log file: append on add, full rewrite on update.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use chrono::NaiveDateTime;
use labrec_ingest::{parse_records, render_record};
use labrec_model::{PatientRecord, RecordStatus};
use tracing::debug;

use crate::error::StoreError;

/// Replacement values for an in-place record update. The identity pair
/// stays fixed; every other field is rewritten.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordUpdate {
    pub test_at: NaiveDateTime,
    pub result: f64,
    pub unit: String,
    pub status: RecordStatus,
    pub result_at: Option<NaiveDateTime>,
}

/// Load every parseable record. A missing file is an empty log; malformed
/// lines are skipped with a diagnostic.
pub fn load_records(path: &Path) -> Result<Vec<PatientRecord>, StoreError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "record file not found, starting empty");
            return Ok(Vec::new());
        }
        Err(error) => return Err(StoreError::read(path, error)),
    };
    Ok(parse_records(content.lines()))
}

/// Append one record line, creating the file if needed.
pub fn append_record(path: &Path, record: &PatientRecord) -> Result<(), StoreError> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|error| StoreError::write(path, error))?;
    writeln!(file, "{}", render_record(record)).map_err(|error| StoreError::write(path, error))
}

/// Rewrite the file with exactly the FIRST line matching the identity pair
/// replaced; later duplicates and unparseable lines pass through untouched.
///
/// Returns whether a matching line was found and rewritten.
pub fn update_record(
    path: &Path,
    patient_id: &str,
    test_name: &str,
    update: &RecordUpdate,
) -> Result<bool, StoreError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(false),
        Err(error) => return Err(StoreError::read(path, error)),
    };
    let prefix = key_prefix(patient_id, test_name);
    let mut rewritten = String::with_capacity(content.len());
    let mut updated = false;
    for line in content.lines() {
        if !updated && line.starts_with(&prefix) {
            let replacement = PatientRecord {
                patient_id: patient_id.to_string(),
                test_name: test_name.to_string(),
                test_at: update.test_at,
                result: update.result,
                unit: update.unit.clone(),
                status: update.status,
                result_at: update.result_at,
            };
            rewritten.push_str(&render_record(&replacement));
            updated = true;
        } else {
            rewritten.push_str(line);
        }
        rewritten.push('\n');
    }
    if !updated {
        return Ok(false);
    }
    std::fs::write(path, rewritten).map_err(|error| StoreError::write(path, error))?;
    Ok(true)
}

/// Whether a stored line exists for the identity pair.
pub fn record_exists(path: &Path, patient_id: &str, test_name: &str) -> Result<bool, StoreError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(false),
        Err(error) => return Err(StoreError::read(path, error)),
    };
    let prefix = key_prefix(patient_id, test_name);
    Ok(content.lines().any(|line| line.starts_with(&prefix)))
}

/// Stored lines are matched on their `"{patient_id}: {test_name},"` prefix.
fn key_prefix(patient_id: &str, test_name: &str) -> String {
    format!("{patient_id}: {test_name},")
}
