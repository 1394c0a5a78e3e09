//! Patient test records and their workflow status.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Workflow status of a patient test record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordStatus {
    Pending,
    Completed,
    Reviewed,
}

impl RecordStatus {
    /// Canonical capitalized form as written to the record file.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordStatus::Pending => "Pending",
            RecordStatus::Completed => "Completed",
            RecordStatus::Reviewed => "Reviewed",
        }
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RecordStatus {
    type Err = ModelError;

    /// Case-insensitive: stored files and user input may use any casing.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(RecordStatus::Pending),
            "completed" => Ok(RecordStatus::Completed),
            "reviewed" => Ok(RecordStatus::Reviewed),
            _ => Err(ModelError::InvalidStatus {
                text: s.trim().to_string(),
            }),
        }
    }
}

/// One patient test record.
///
/// Identity is the `(patient_id, test_name)` pair; the store keeps at most
/// one live record per pair and updates rewrite the first stored match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub patient_id: String,
    pub test_name: String,
    /// When the sample was taken.
    pub test_at: NaiveDateTime,
    pub result: f64,
    pub unit: String,
    pub status: RecordStatus,
    /// When the result came back; absent while the test is outstanding.
    /// Expected to be strictly after `test_at` when present.
    pub result_at: Option<NaiveDateTime>,
}

impl PatientRecord {
    /// Raw elapsed time between sample and result, when a result exists.
    ///
    /// No sign check here: a record violating the result-after-test
    /// invariant yields a non-positive delta, which aggregation discards.
    pub fn turnaround(&self) -> Option<TimeDelta> {
        self.result_at.map(|result_at| result_at - self.test_at)
    }
}

/// Check a patient id: exactly 7 ASCII digits.
pub fn validate_patient_id(text: &str) -> Result<(), ModelError> {
    if text.len() == 7 && text.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ModelError::InvalidPatientId {
            text: text.to_string(),
        })
    }
}
