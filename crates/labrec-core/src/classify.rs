//! Classification of a result value by test name.

use std::fmt;

use labrec_model::{Classification, TestCatalog};

/// Outcome of classifying a result against a named test's reference range.
///
/// `UnknownTest` is a typed outcome, not an error: callers decide whether
/// an absent catalog entry matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifyOutcome {
    Normal,
    Abnormal,
    UnknownTest,
}

impl ClassifyOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassifyOutcome::Normal => "Normal",
            ClassifyOutcome::Abnormal => "Abnormal",
            ClassifyOutcome::UnknownTest => "Unknown test",
        }
    }
}

impl fmt::Display for ClassifyOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<Classification> for ClassifyOutcome {
    fn from(classification: Classification) -> Self {
        match classification {
            Classification::Normal => ClassifyOutcome::Normal,
            Classification::Abnormal => ClassifyOutcome::Abnormal,
        }
    }
}

/// Classify `value` against the reference range of `test_name`.
pub fn classify_result(catalog: &TestCatalog, test_name: &str, value: f64) -> ClassifyOutcome {
    match catalog.lookup(test_name) {
        Some(definition) => definition.range.classify(value).into(),
        None => ClassifyOutcome::UnknownTest,
    }
}
