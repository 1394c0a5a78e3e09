//! Patient record line decoding and rendering.
//!
//! Field order is fixed:
//! `patientId: testName, testTimestamp, result, unit, status[, resultTimestamp]`
//! with timestamps in `YYYY-MM-DD HH:MM:SS`.

use labrec_model::{PatientRecord, format_timestamp, parse_timestamp};
use tracing::warn;

use crate::error::ParseError;

/// Fields after the patient id: name, timestamp, result, unit, status.
const MIN_FIELDS: usize = 5;
/// One more for the optional result timestamp.
const MAX_FIELDS: usize = 6;

/// Decode one record line.
pub fn parse_record(line: &str) -> Result<PatientRecord, ParseError> {
    let line = line.trim();
    let (patient_id, rest) = line.split_once(": ").ok_or(ParseError::MissingSeparator)?;
    let fields: Vec<&str> = rest.split(", ").map(str::trim).collect();
    if !(MIN_FIELDS..=MAX_FIELDS).contains(&fields.len()) {
        return Err(ParseError::FieldCount {
            found: fields.len(),
        });
    }
    let result: f64 = fields[2].parse().map_err(|_| ParseError::InvalidResult {
        text: fields[2].to_string(),
    })?;
    let result_at = match fields.get(5) {
        Some(text) => Some(parse_timestamp(text)?),
        None => None,
    };
    Ok(PatientRecord {
        patient_id: patient_id.trim().to_string(),
        test_name: fields[0].to_string(),
        test_at: parse_timestamp(fields[1])?,
        result,
        unit: fields[3].to_string(),
        status: fields[4].parse()?,
        result_at,
    })
}

/// Decode a batch of lines, skipping malformed ones with a diagnostic.
///
/// One bad line never discards the rest of the batch; blank lines are
/// ignored without comment.
pub fn parse_records<I, S>(lines: I) -> Vec<PatientRecord>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut records = Vec::new();
    for (index, line) in lines.into_iter().enumerate() {
        let line = line.as_ref();
        if line.trim().is_empty() {
            continue;
        }
        match parse_record(line) {
            Ok(record) => records.push(record),
            Err(error) => {
                warn!(
                    line = index + 1,
                    error = %error,
                    "skipping malformed record line"
                );
            }
        }
    }
    records
}

/// Render a record in the persisted line format. Inverse of
/// [`parse_record`] for any record this crate accepts.
pub fn render_record(record: &PatientRecord) -> String {
    let mut line = format!(
        "{}: {}, {}, {}, {}, {}",
        record.patient_id,
        record.test_name,
        format_timestamp(record.test_at),
        record.result,
        record.unit,
        record.status
    );
    if let Some(result_at) = record.result_at {
        line.push_str(", ");
        line.push_str(&format_timestamp(result_at));
    }
    line
}
