//! Aggregate statistics over a filtered record set.

use chrono::TimeDelta;

/// Min/max/average of result values and turnaround durations.
///
/// Value statistics cover every summarized record; turnaround statistics
/// cover only records with a usable result timestamp. All fields are absent
/// over an empty input. Computed fresh per invocation, never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryResult {
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    pub avg_value: Option<f64>,
    pub min_turnaround: Option<TimeDelta>,
    pub max_turnaround: Option<TimeDelta>,
    pub avg_turnaround: Option<TimeDelta>,
    /// Records contributing to the value statistics.
    pub value_count: usize,
    /// Records contributing to the turnaround statistics.
    pub turnaround_count: usize,
}

impl SummaryResult {
    /// True when nothing was summarized.
    pub fn is_empty(&self) -> bool {
        self.value_count == 0
    }
}
