//! Flat-file persistence for the catalog and the patient record log.
//!
//! Both stores are plain text, one entry per line. New entries append;
//! record updates rewrite the whole file with exactly the first matching
//! line replaced. The filter/summary core never touches these files
//! directly; it consumes the already-loaded values.

pub mod catalog;
pub mod error;
pub mod records;

pub use catalog::{append_test, load_catalog};
pub use error::StoreError;
pub use records::{RecordUpdate, append_record, load_records, record_exists, update_record};
