//! Timestamp parsing and formatting for the persisted record format.
//!
//! Record and catalog files carry timestamps in the fixed layout
//! `YYYY-MM-DD HH:MM:SS` (space-separated, second precision, no zone).

use chrono::{NaiveDateTime, TimeDelta};

use crate::error::ModelError;

/// Timestamp layout used everywhere a date/time is persisted or entered.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Date-only layout accepted for range filter bounds.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD HH:MM:SS` timestamp.
pub fn parse_timestamp(text: &str) -> Result<NaiveDateTime, ModelError> {
    NaiveDateTime::parse_from_str(text.trim(), TIMESTAMP_FORMAT).map_err(|_| {
        ModelError::InvalidTimestamp {
            text: text.trim().to_string(),
        }
    })
}

/// Render a timestamp in the persisted layout.
pub fn format_timestamp(ts: NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Render a duration as `NdNhNmNs`, e.g. `2d5h30m0s`.
///
/// Negative durations keep a single leading sign: `-1d2h0m0s`.
pub fn format_delta(delta: TimeDelta) -> String {
    let total = delta.num_seconds();
    let sign = if total < 0 { "-" } else { "" };
    let total = total.abs();
    let days = total / 86_400;
    let hours = total % 86_400 / 3_600;
    let minutes = total % 3_600 / 60;
    let seconds = total % 60;
    format!("{sign}{days}d{hours}h{minutes}m{seconds}s")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_timestamp() {
        let ts = parse_timestamp("2024-01-01 08:30:00").unwrap();
        assert_eq!(format_timestamp(ts), "2024-01-01 08:30:00");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert!(parse_timestamp(" 2024-01-01 08:30:00 ").is_ok());
    }

    #[test]
    fn rejects_date_without_time() {
        assert_eq!(
            parse_timestamp("2024-01-01"),
            Err(ModelError::InvalidTimestamp {
                text: "2024-01-01".to_string()
            })
        );
    }

    #[test]
    fn rejects_out_of_range_components() {
        assert!(parse_timestamp("2024-13-01 00:00:00").is_err());
        assert!(parse_timestamp("2024-01-01 25:00:00").is_err());
    }

    #[test]
    fn formats_delta_components() {
        let delta = TimeDelta::days(2) + TimeDelta::hours(5) + TimeDelta::minutes(30);
        assert_eq!(format_delta(delta), "2d5h30m0s");
        assert_eq!(format_delta(TimeDelta::zero()), "0d0h0m0s");
        assert_eq!(format_delta(-TimeDelta::hours(26)), "-1d2h0m0s");
    }
}
