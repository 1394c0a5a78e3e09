//! Turnaround-time policy attached to a test definition.

use std::fmt;
use std::str::FromStr;

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Expected time from sample collection to result, entered as
/// `days-hours-minutes` (e.g. `1-0-0`, `0-12-30`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnaroundPolicy {
    days: u32,
    hours: u32,
    minutes: u32,
}

impl TurnaroundPolicy {
    /// Build a policy from components; hours must stay below 24 and
    /// minutes below 60.
    pub fn new(days: u32, hours: u32, minutes: u32) -> Option<Self> {
        if hours < 24 && minutes < 60 {
            Some(Self {
                days,
                hours,
                minutes,
            })
        } else {
            None
        }
    }

    /// Parse a `days-hours-minutes` expression.
    pub fn parse(text: &str) -> Result<Self, ModelError> {
        let error = || ModelError::InvalidTurnaround {
            text: text.trim().to_string(),
        };
        let mut parts = text.trim().split('-');
        let days = parts.next().and_then(|p| p.parse().ok()).ok_or_else(error)?;
        let hours = parts.next().and_then(|p| p.parse().ok()).ok_or_else(error)?;
        let minutes = parts.next().and_then(|p| p.parse().ok()).ok_or_else(error)?;
        if parts.next().is_some() {
            return Err(error());
        }
        Self::new(days, hours, minutes).ok_or_else(error)
    }

    pub fn days(&self) -> u32 {
        self.days
    }

    pub fn hours(&self) -> u32 {
        self.hours
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    /// The policy as an exact duration.
    pub fn to_delta(&self) -> TimeDelta {
        TimeDelta::days(i64::from(self.days))
            + TimeDelta::hours(i64::from(self.hours))
            + TimeDelta::minutes(i64::from(self.minutes))
    }
}

impl FromStr for TurnaroundPolicy {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TurnaroundPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.days, self.hours, self.minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_round_trips() {
        let policy = TurnaroundPolicy::parse("1-0-0").unwrap();
        assert_eq!(policy, TurnaroundPolicy::new(1, 0, 0).unwrap());
        assert_eq!(policy.to_string(), "1-0-0");
        assert_eq!(policy.to_delta(), TimeDelta::days(1));
    }

    #[test]
    fn rejects_out_of_range_components() {
        assert!(TurnaroundPolicy::parse("1-24-00").is_err());
        assert!(TurnaroundPolicy::parse("0-0-60").is_err());
    }

    #[test]
    fn rejects_malformed_expressions() {
        assert!(TurnaroundPolicy::parse("1-2").is_err());
        assert!(TurnaroundPolicy::parse("1-2-3-4").is_err());
        assert!(TurnaroundPolicy::parse("one-2-3").is_err());
        assert!(TurnaroundPolicy::parse("-1-2-3").is_err());
        assert!(TurnaroundPolicy::parse("").is_err());
    }
}
