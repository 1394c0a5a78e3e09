use thiserror::Error;

/// Errors from parsing user-entered field values into model types.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("invalid reference range {text:?}: {reason}")]
    InvalidRange { text: String, reason: String },

    #[error("reference range lower bound {lower} must be below upper bound {upper}")]
    InvalidBounds { lower: f64, upper: f64 },

    #[error("invalid turnaround time {text:?}: expected days-hours-minutes")]
    InvalidTurnaround { text: String },

    #[error("invalid patient id {text:?}: expected exactly 7 digits")]
    InvalidPatientId { text: String },

    #[error("unknown record status {text:?}: expected Pending, Completed, or Reviewed")]
    InvalidStatus { text: String },

    #[error("invalid timestamp {text:?}: expected YYYY-MM-DD HH:MM:SS")]
    InvalidTimestamp { text: String },
}
