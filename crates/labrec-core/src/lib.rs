//! Record filtering and summary statistics.
//!
//! The pipeline is: parsed records → conjunctive filter (consulting the
//! test catalog for abnormal-value detection) → aggregate statistics over
//! the filtered set. Everything here is a pure function over borrowed
//! data; the catalog is passed in explicitly and never mutated by a read.

pub mod classify;
pub mod filter;
pub mod summary;

pub use classify::{ClassifyOutcome, classify_result};
pub use filter::{filter, matches};
pub use summary::summarize;
