//! The test catalog: definitions keyed by test name.

use serde::{Deserialize, Serialize};

use crate::policy::TurnaroundPolicy;
use crate::range::ReferenceRange;

/// Definition of one medical test.
///
/// Immutable once loaded into a filtering pass; catalog mutation replaces
/// whole definitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestDefinition {
    pub name: String,
    pub range: ReferenceRange,
    pub unit: String,
    pub turnaround: TurnaroundPolicy,
}

/// Catalog of test definitions in file order.
///
/// Constructed once at startup from the persisted definitions and mutated
/// only through [`TestCatalog::insert`]; read paths never change it. Small
/// enough that linear name lookup is fine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestCatalog {
    definitions: Vec<TestDefinition>,
}

impl TestCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exact-name lookup.
    pub fn lookup(&self, test_name: &str) -> Option<&TestDefinition> {
        self.definitions.iter().find(|def| def.name == test_name)
    }

    pub fn contains(&self, test_name: &str) -> bool {
        self.lookup(test_name).is_some()
    }

    /// Add a definition, replacing an existing one with the same name in
    /// place (listing order is file order).
    pub fn insert(&mut self, definition: TestDefinition) {
        match self
            .definitions
            .iter_mut()
            .find(|def| def.name == definition.name)
        {
            Some(slot) => *slot = definition,
            None => self.definitions.push(definition),
        }
    }

    /// True when any definition uses this unit. Record input validation
    /// accepts only units the catalog already knows.
    pub fn is_known_unit(&self, unit: &str) -> bool {
        self.definitions.iter().any(|def| def.unit == unit)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TestDefinition> {
        self.definitions.iter()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl FromIterator<TestDefinition> for TestCatalog {
    fn from_iter<I: IntoIterator<Item = TestDefinition>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for definition in iter {
            catalog.insert(definition);
        }
        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definition(name: &str, unit: &str) -> TestDefinition {
        TestDefinition {
            name: name.to_string(),
            range: ReferenceRange::parse(">1,<2").unwrap(),
            unit: unit.to_string(),
            turnaround: TurnaroundPolicy::parse("1-0-0").unwrap(),
        }
    }

    #[test]
    fn lookup_is_exact() {
        let catalog: TestCatalog = [definition("HGB", "g/dL")].into_iter().collect();
        assert!(catalog.lookup("HGB").is_some());
        assert!(catalog.lookup("hgb").is_none());
        assert!(catalog.lookup("WBC").is_none());
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut catalog: TestCatalog =
            [definition("HGB", "g/dL"), definition("WBC", "x10^9/L")]
                .into_iter()
                .collect();
        catalog.insert(definition("HGB", "mg/mL"));
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.lookup("HGB").unwrap().unit, "mg/mL");
        // Replacement keeps the original position.
        assert_eq!(catalog.iter().next().unwrap().name, "HGB");
    }

    #[test]
    fn known_units_cover_all_definitions() {
        let catalog: TestCatalog =
            [definition("HGB", "g/dL"), definition("WBC", "x10^9/L")]
                .into_iter()
                .collect();
        assert!(catalog.is_known_unit("g/dL"));
        assert!(catalog.is_known_unit("x10^9/L"));
        assert!(!catalog.is_known_unit("mmol/L"));
    }
}
