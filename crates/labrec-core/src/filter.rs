//! The conjunctive filter over parsed records.

use labrec_model::{FilterCriteria, PatientRecord, TestCatalog};

/// Whether one record satisfies every specified criterion.
///
/// Absent criteria are no-ops. Date bounds are inclusive on both ends
/// against the test timestamp. Under `abnormal_only`, a record whose test
/// name has no catalog entry is dropped, not an error.
pub fn matches(record: &PatientRecord, criteria: &FilterCriteria, catalog: &TestCatalog) -> bool {
    if let Some(patient_id) = &criteria.patient_id
        && record.patient_id != *patient_id
    {
        return false;
    }
    if let Some(test_name) = &criteria.test_name
        && record.test_name != *test_name
    {
        return false;
    }
    if let Some(status) = criteria.status
        && record.status != status
    {
        return false;
    }
    if let Some((start, end)) = criteria.date_range
        && (record.test_at < start || record.test_at > end)
    {
        return false;
    }
    if criteria.abnormal_only {
        match catalog.lookup(&record.test_name) {
            Some(definition) => {
                if !definition.range.classify(record.result).is_abnormal() {
                    return false;
                }
            }
            None => return false,
        }
    }
    true
}

/// Lazily filter `records`, preserving their order.
///
/// Restartable: each call walks the source slice afresh, so consuming the
/// returned iterator leaves no state behind.
pub fn filter<'a>(
    records: &'a [PatientRecord],
    criteria: &'a FilterCriteria,
    catalog: &'a TestCatalog,
) -> impl Iterator<Item = &'a PatientRecord> {
    records
        .iter()
        .filter(move |record| matches(record, criteria, catalog))
}
