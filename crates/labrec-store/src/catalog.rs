//! Catalog file: load at startup, append on add.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use labrec_ingest::{read_catalog, render_definition};
use labrec_model::{TestCatalog, TestDefinition};
use tracing::debug;

use crate::error::StoreError;

/// Load the catalog file. Malformed lines are skipped with a diagnostic by
/// the reader; a missing file is an empty catalog.
pub fn load_catalog(path: &Path) -> Result<TestCatalog, StoreError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "catalog file not found, starting empty");
            return Ok(TestCatalog::new());
        }
        Err(error) => return Err(StoreError::read(path, error)),
    };
    read_catalog(file).map_err(|error| {
        // The reader only propagates I/O failures; format problems are
        // skipped line by line inside read_catalog.
        let source = match error.into_kind() {
            csv::ErrorKind::Io(source) => source,
            other => std::io::Error::other(format!("{other:?}")),
        };
        StoreError::read(path, source)
    })
}

/// Append one definition line, creating the file if needed.
pub fn append_test(path: &Path, definition: &TestDefinition) -> Result<(), StoreError> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|error| StoreError::write(path, error))?;
    writeln!(file, "{}", render_definition(definition))
        .map_err(|error| StoreError::write(path, error))
}
