//! Line decoding for the two persisted flat-file formats.
//!
//! Record lines use a fixed field order behind `": "` and `", "`
//! separators; catalog lines are `;`-delimited. Batch readers share one
//! tolerance policy: a malformed line is skipped with a diagnostic and
//! never discards the rest of the file.

pub mod catalog;
pub mod error;
pub mod record;

pub use catalog::{definition_from_fields, read_catalog, render_definition};
pub use error::{CatalogLineError, ParseError};
pub use record::{parse_record, parse_records, render_record};
