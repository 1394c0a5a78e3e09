//! Filter criteria: a conjunction of optional predicates.

use chrono::NaiveDateTime;

use crate::record::RecordStatus;

/// Criteria narrowing a record sequence. Absent fields match everything;
/// present fields must all hold.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub patient_id: Option<String>,
    pub test_name: Option<String>,
    pub status: Option<RecordStatus>,
    /// Inclusive bounds on the test timestamp.
    pub date_range: Option<(NaiveDateTime, NaiveDateTime)>,
    pub abnormal_only: bool,
}

impl FilterCriteria {
    pub fn with_patient_id(mut self, patient_id: impl Into<String>) -> Self {
        self.patient_id = Some(patient_id.into());
        self
    }

    pub fn with_test_name(mut self, test_name: impl Into<String>) -> Self {
        self.test_name = Some(test_name.into());
        self
    }

    pub fn with_status(mut self, status: RecordStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_date_range(mut self, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        self.date_range = Some((start, end));
        self
    }

    pub fn abnormal_only(mut self) -> Self {
        self.abnormal_only = true;
        self
    }

    /// True when no predicate is set, so every record passes.
    pub fn is_unrestricted(&self) -> bool {
        *self == Self::default()
    }
}
