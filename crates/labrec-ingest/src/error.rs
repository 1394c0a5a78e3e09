use labrec_model::ModelError;
use thiserror::Error;

/// Errors from decoding one persisted record line.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("missing \": \" separator after the patient id")]
    MissingSeparator,

    #[error("expected 5 or 6 fields after the patient id, found {found}")]
    FieldCount { found: usize },

    #[error("result {text:?} is not numeric")]
    InvalidResult { text: String },

    #[error(transparent)]
    Field(#[from] ModelError),
}

/// Errors from decoding one catalog definition line.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogLineError {
    #[error("expected 4 fields (name;range;unit;turnaround), found {found}")]
    FieldCount { found: usize },

    #[error("test name is empty")]
    EmptyName,

    #[error(transparent)]
    Field(#[from] ModelError),
}
