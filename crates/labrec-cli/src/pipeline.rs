//! Command logic behind the CLI: validation, store access, filtering.
//!
//! Everything here takes plain values and returns `anyhow::Result`, so the
//! behavior is testable without argument parsing or process spawning.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use tracing::info;

use labrec_core::{ClassifyOutcome, classify_result, filter, summarize};
use labrec_model::{
    FilterCriteria, PatientRecord, RecordStatus, ReferenceRange, SummaryResult, TestCatalog,
    TestDefinition, TurnaroundPolicy, datetime::DATE_FORMAT, parse_timestamp, validate_patient_id,
};
use labrec_store::{
    RecordUpdate, append_record, append_test, load_catalog, load_records, record_exists,
};

/// Locations of the two flat files.
#[derive(Debug, Clone)]
pub struct StorePaths {
    pub test_file: PathBuf,
    pub record_file: PathBuf,
}

/// Field values for a new or updated patient record, as entered.
#[derive(Debug, Clone)]
pub struct RecordInput {
    pub patient_id: String,
    pub test_name: String,
    pub test_date: String,
    pub result: f64,
    pub unit: String,
    pub status: String,
    pub result_date: Option<String>,
}

/// Validate and persist a new test definition.
pub fn add_test(
    paths: &StorePaths,
    name: &str,
    range: &str,
    unit: &str,
    turnaround: &str,
    force: bool,
) -> Result<TestDefinition> {
    let name = name.trim();
    if name.is_empty() {
        bail!("test name must not be empty");
    }
    let unit = unit.trim();
    if unit.is_empty() {
        bail!("unit must not be empty");
    }
    let definition = TestDefinition {
        name: name.to_string(),
        range: ReferenceRange::parse(range)?,
        unit: unit.to_string(),
        turnaround: TurnaroundPolicy::parse(turnaround)?,
    };
    let catalog = load_catalog(&paths.test_file)?;
    if catalog.contains(name) && !force {
        bail!("test {name:?} already exists (use --force to replace it)");
    }
    // Appending a second line for the name is enough: the loader lets the
    // last definition win, matching an append-only file's history.
    append_test(&paths.test_file, &definition)
        .with_context(|| format!("add test {name:?}"))?;
    info!(test_name = %definition.name, "test definition added");
    Ok(definition)
}

/// Load the catalog for listing or classification.
pub fn load_tests(paths: &StorePaths) -> Result<TestCatalog> {
    Ok(load_catalog(&paths.test_file)?)
}

/// Classify a value against the named test's reference range.
pub fn classify(paths: &StorePaths, test_name: &str, value: f64) -> Result<ClassifyOutcome> {
    let catalog = load_catalog(&paths.test_file)?;
    Ok(classify_result(&catalog, test_name, value))
}

/// Validate and append a new patient record. Refuses a duplicate identity
/// pair; `update-record` is the way to change a stored record.
pub fn add_record(paths: &StorePaths, input: &RecordInput) -> Result<PatientRecord> {
    let catalog = load_catalog(&paths.test_file)?;
    let record = validate_record(&catalog, input)?;
    if record_exists(&paths.record_file, &record.patient_id, &record.test_name)? {
        bail!(
            "a record for patient {} and test {} already exists (use update-record)",
            record.patient_id,
            record.test_name
        );
    }
    append_record(&paths.record_file, &record)?;
    info!(
        patient_id = %record.patient_id,
        test_name = %record.test_name,
        "patient record added"
    );
    Ok(record)
}

/// Validate replacement fields and rewrite the first stored match.
pub fn update_record(paths: &StorePaths, input: &RecordInput) -> Result<PatientRecord> {
    let catalog = load_catalog(&paths.test_file)?;
    let record = validate_record(&catalog, input)?;
    let update = RecordUpdate {
        test_at: record.test_at,
        result: record.result,
        unit: record.unit.clone(),
        status: record.status,
        result_at: record.result_at,
    };
    let updated = labrec_store::update_record(
        &paths.record_file,
        &record.patient_id,
        &record.test_name,
        &update,
    )?;
    if !updated {
        bail!(
            "no record found for patient {} and test {}",
            record.patient_id,
            record.test_name
        );
    }
    info!(
        patient_id = %record.patient_id,
        test_name = %record.test_name,
        "patient record updated"
    );
    Ok(record)
}

/// Load the stores and apply the filter, keeping source order.
pub fn filter_records(
    paths: &StorePaths,
    criteria: &FilterCriteria,
) -> Result<Vec<PatientRecord>> {
    let catalog = load_catalog(&paths.test_file)?;
    let records = load_records(&paths.record_file)?;
    Ok(filter(&records, criteria, &catalog).cloned().collect())
}

/// Filter, then aggregate the surviving records.
pub fn summarize_records(
    paths: &StorePaths,
    criteria: &FilterCriteria,
) -> Result<SummaryResult> {
    let kept = filter_records(paths, criteria)?;
    Ok(summarize(&kept))
}

/// Build filter criteria from the raw flag values.
pub fn build_criteria(
    patient: Option<&str>,
    test: Option<&str>,
    status: Option<&str>,
    from: Option<&str>,
    to: Option<&str>,
    abnormal_only: bool,
) -> Result<FilterCriteria> {
    let status = status
        .map(|text| text.parse::<RecordStatus>())
        .transpose()?;
    let date_range = match (from, to) {
        (None, None) => None,
        (from, to) => {
            let start = from
                .map(|text| parse_bound(text, false))
                .transpose()?
                .unwrap_or(NaiveDateTime::MIN);
            let end = to
                .map(|text| parse_bound(text, true))
                .transpose()?
                .unwrap_or(NaiveDateTime::MAX);
            if start > end {
                bail!("--from {start} is after --to {end}");
            }
            Some((start, end))
        }
    };
    Ok(FilterCriteria {
        patient_id: patient.map(str::to_string),
        test_name: test.map(str::to_string),
        status,
        date_range,
        abnormal_only,
    })
}

/// A range bound is a full timestamp or a bare date; a bare date expands
/// to the start or end of that day so both bounds stay inclusive.
fn parse_bound(text: &str, end_of_day: bool) -> Result<NaiveDateTime> {
    if let Ok(ts) = parse_timestamp(text) {
        return Ok(ts);
    }
    let date = NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
        .with_context(|| format!("invalid date {text:?}: expected YYYY-MM-DD or YYYY-MM-DD HH:MM:SS"))?;
    let time = if end_of_day {
        NaiveTime::from_hms_opt(23, 59, 59).expect("valid clock time")
    } else {
        NaiveTime::MIN
    };
    Ok(date.and_time(time))
}

/// Check the entered fields against the catalog and the record invariants.
fn validate_record(catalog: &TestCatalog, input: &RecordInput) -> Result<PatientRecord> {
    validate_patient_id(&input.patient_id)?;
    if !catalog.contains(&input.test_name) {
        bail!(
            "unknown test {:?}: add it to the catalog first",
            input.test_name
        );
    }
    let unit = input.unit.trim();
    if !catalog.is_known_unit(unit) {
        bail!("unit {unit:?} is not used by any catalog test");
    }
    let status: RecordStatus = input.status.parse()?;
    let test_at = parse_timestamp(&input.test_date)?;
    let result_at = input
        .result_date
        .as_deref()
        .map(parse_timestamp)
        .transpose()?;
    if let Some(result_at) = result_at
        && result_at <= test_at
    {
        bail!(
            "result date {result_at} must be after test date {test_at}"
        );
    }
    Ok(PatientRecord {
        patient_id: input.patient_id.clone(),
        test_name: input.test_name.clone(),
        test_at,
        result: input.result,
        unit: unit.to_string(),
        status,
        result_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_expand_bare_dates() {
        let start = parse_bound("2024-01-01", false).unwrap();
        let end = parse_bound("2024-01-31", true).unwrap();
        assert_eq!(start, parse_timestamp("2024-01-01 00:00:00").unwrap());
        assert_eq!(end, parse_timestamp("2024-01-31 23:59:59").unwrap());
    }

    #[test]
    fn bounds_accept_full_timestamps() {
        let bound = parse_bound("2024-01-01 12:30:00", true).unwrap();
        assert_eq!(bound, parse_timestamp("2024-01-01 12:30:00").unwrap());
    }

    #[test]
    fn criteria_require_ordered_bounds() {
        assert!(build_criteria(None, None, None, Some("2024-02-01"), Some("2024-01-01"), false).is_err());
        let criteria =
            build_criteria(Some("1234567"), None, Some("pending"), None, None, true).unwrap();
        assert_eq!(criteria.patient_id.as_deref(), Some("1234567"));
        assert_eq!(criteria.status, Some(RecordStatus::Pending));
        assert!(criteria.abnormal_only);
        assert!(criteria.date_range.is_none());
    }

    #[test]
    fn open_ended_ranges_fill_the_missing_bound() {
        let criteria = build_criteria(None, None, None, Some("2024-01-01"), None, false).unwrap();
        let (start, end) = criteria.date_range.unwrap();
        assert_eq!(start, parse_timestamp("2024-01-01 00:00:00").unwrap());
        assert_eq!(end, NaiveDateTime::MAX);
    }
}
