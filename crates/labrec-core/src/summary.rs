//! Aggregate statistics over a filtered record set.

use chrono::TimeDelta;
use labrec_model::{PatientRecord, SummaryResult};
use tracing::warn;

/// Compute min/max/average of result values and turnaround durations.
///
/// Every record contributes to the value statistics. Turnaround statistics
/// cover only records with a result timestamp strictly after the test
/// timestamp: a non-positive duration means the result-after-test invariant
/// was violated upstream (hand-edited file), and such durations are dropped
/// from the turnaround side with a diagnostic rather than skewing the
/// aggregate with a negative value. Pure function of its input.
pub fn summarize<'a, I>(records: I) -> SummaryResult
where
    I: IntoIterator<Item = &'a PatientRecord>,
{
    let mut summary = SummaryResult::default();
    let mut value_total = 0.0;
    let mut turnaround_total = TimeDelta::zero();

    for record in records {
        summary.value_count += 1;
        value_total += record.result;
        summary.min_value = Some(summary.min_value.map_or(record.result, |m| m.min(record.result)));
        summary.max_value = Some(summary.max_value.map_or(record.result, |m| m.max(record.result)));

        let Some(turnaround) = record.turnaround() else {
            continue;
        };
        if turnaround <= TimeDelta::zero() {
            warn!(
                patient_id = %record.patient_id,
                test_name = %record.test_name,
                "result timestamp not after test timestamp, dropped from turnaround statistics"
            );
            continue;
        }
        summary.turnaround_count += 1;
        turnaround_total = turnaround_total + turnaround;
        summary.min_turnaround =
            Some(summary.min_turnaround.map_or(turnaround, |m| m.min(turnaround)));
        summary.max_turnaround =
            Some(summary.max_turnaround.map_or(turnaround, |m| m.max(turnaround)));
    }

    if summary.value_count > 0 {
        summary.avg_value = Some(value_total / summary.value_count as f64);
    }
    if summary.turnaround_count > 0 {
        summary.avg_turnaround = Some(turnaround_total / summary.turnaround_count as i32);
    }
    summary
}
