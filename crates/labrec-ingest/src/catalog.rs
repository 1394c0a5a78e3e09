//! Catalog definition line decoding and rendering.
//!
//! Definitions are `;`-delimited: `name;range;unit;turnaround` with the
//! range in `>lower,<upper` form and the turnaround in `days-hours-minutes`.

use std::io::Read;

use csv::ReaderBuilder;
use labrec_model::{ReferenceRange, TestCatalog, TestDefinition, TurnaroundPolicy};
use tracing::warn;

use crate::error::CatalogLineError;

const CATALOG_FIELDS: usize = 4;

/// Build a definition from the four fields of a catalog line.
pub fn definition_from_fields(fields: &[&str]) -> Result<TestDefinition, CatalogLineError> {
    if fields.len() != CATALOG_FIELDS {
        return Err(CatalogLineError::FieldCount {
            found: fields.len(),
        });
    }
    let name = fields[0].trim();
    if name.is_empty() {
        return Err(CatalogLineError::EmptyName);
    }
    Ok(TestDefinition {
        name: name.to_string(),
        range: ReferenceRange::parse(fields[1])?,
        unit: fields[2].trim().to_string(),
        turnaround: TurnaroundPolicy::parse(fields[3])?,
    })
}

/// Read a whole catalog, skipping malformed lines with a diagnostic.
///
/// Later lines for an already-seen name replace the earlier definition,
/// so the last write wins, as with an appended file.
pub fn read_catalog<R: Read>(reader: R) -> Result<TestCatalog, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut catalog = TestCatalog::new();
    for (index, result) in reader.records().enumerate() {
        let line = index + 1;
        let record = match result {
            Ok(record) => record,
            Err(error) => {
                if error.is_io_error() {
                    return Err(error);
                }
                warn!(line, error = %error, "skipping unreadable catalog line");
                continue;
            }
        };
        let fields: Vec<&str> = record.iter().collect();
        if fields.iter().all(|field| field.is_empty()) {
            continue;
        }
        match definition_from_fields(&fields) {
            Ok(definition) => catalog.insert(definition),
            Err(error) => {
                warn!(line, error = %error, "skipping malformed catalog line");
            }
        }
    }
    Ok(catalog)
}

/// Render a definition in the persisted line format.
pub fn render_definition(definition: &TestDefinition) -> String {
    format!(
        "{};{};{};{}",
        definition.name, definition.range, definition.unit, definition.turnaround
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_catalog_and_skips_bad_lines() {
        let text = "HGB;>13.8,<17.2;g/dL;1-0-0\n\
                    bad line without fields\n\
                    WBC;>4.5,<11.0;x10^9/L;0-4-30\n";
        let catalog = read_catalog(text.as_bytes()).unwrap();
        assert_eq!(catalog.len(), 2);
        let hgb = catalog.lookup("HGB").unwrap();
        assert_eq!(hgb.unit, "g/dL");
        assert_eq!(hgb.range, ReferenceRange::parse(">13.8,<17.2").unwrap());
        assert_eq!(hgb.turnaround, TurnaroundPolicy::parse("1-0-0").unwrap());
    }

    #[test]
    fn later_lines_replace_earlier_definitions() {
        let text = "HGB;>13.8,<17.2;g/dL;1-0-0\nHGB;>12.0,<16.0;g/dL;0-6-0\n";
        let catalog = read_catalog(text.as_bytes()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(
            catalog.lookup("HGB").unwrap().range,
            ReferenceRange::parse(">12.0,<16.0").unwrap()
        );
    }

    #[test]
    fn skips_lines_with_bad_range_or_turnaround() {
        let text = "HGB;>17.2,<13.8;g/dL;1-0-0\n\
                    WBC;>4.5,<11.0;x10^9/L;0-25-0\n\
                    PLT;>150,<450;x10^9/L;0-2-0\n";
        let catalog = read_catalog(text.as_bytes()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.contains("PLT"));
    }

    #[test]
    fn empty_input_is_an_empty_catalog() {
        let catalog = read_catalog("".as_bytes()).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn render_round_trips() {
        let line = "HGB;>13.8,<17.2;g/dL;1-0-0";
        let fields: Vec<&str> = line.split(';').collect();
        let definition = definition_from_fields(&fields).unwrap();
        assert_eq!(render_definition(&definition), line);
    }
}
