//! Reference ranges and normal/abnormal classification.
//!
//! A reference range is entered as comma-joined bound tokens, each prefixed
//! with `>` (lower) or `<` (upper): `>13.8,<17.2`, `<5.0,>1.2`, `>10`, or
//! empty for an unbounded range. Both bounds are exclusive: a result equal
//! to a bound already counts as abnormal.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Outcome of checking a result value against a reference range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    Normal,
    Abnormal,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Normal => "Normal",
            Classification::Abnormal => "Abnormal",
        }
    }

    pub fn is_abnormal(&self) -> bool {
        matches!(self, Classification::Abnormal)
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Normal interval for a test result, with optional exclusive bounds.
///
/// Invariant: when both bounds are present, `lower < upper`. Construction
/// through [`ReferenceRange::parse`] enforces this.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ReferenceRange {
    lower: Option<f64>,
    upper: Option<f64>,
}

impl ReferenceRange {
    /// Build a range from already-validated bounds.
    pub fn new(lower: Option<f64>, upper: Option<f64>) -> Result<Self, ModelError> {
        if let (Some(lower), Some(upper)) = (lower, upper)
            && lower >= upper
        {
            return Err(ModelError::InvalidBounds { lower, upper });
        }
        Ok(Self { lower, upper })
    }

    /// Parse a range expression of zero, one, or two bound tokens.
    pub fn parse(text: &str) -> Result<Self, ModelError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }
        let mut lower = None;
        let mut upper = None;
        for token in trimmed.split(',') {
            let token = token.trim();
            let (slot, kind) = match token.as_bytes().first() {
                Some(b'>') => (&mut lower, "lower"),
                Some(b'<') => (&mut upper, "upper"),
                _ => {
                    return Err(invalid(text, format!("bound token {token:?} must start with > or <")));
                }
            };
            if slot.is_some() {
                return Err(invalid(text, format!("duplicate {kind} bound")));
            }
            let number = &token[1..];
            if !is_decimal(number) {
                return Err(invalid(text, format!("{number:?} is not a decimal number")));
            }
            let value: f64 = number
                .parse()
                .map_err(|_| invalid(text, format!("{number:?} is not a decimal number")))?;
            *slot = Some(value);
        }
        Self::new(lower, upper)
    }

    pub fn lower(&self) -> Option<f64> {
        self.lower
    }

    pub fn upper(&self) -> Option<f64> {
        self.upper
    }

    /// Returns true when neither bound is set, so every value is normal.
    pub fn is_unbounded(&self) -> bool {
        self.lower.is_none() && self.upper.is_none()
    }

    /// Classify a result value against this range.
    ///
    /// Abnormal when the value is at or below the lower bound, or at or
    /// above the upper bound. A bound of `0.0` participates like any other
    /// value.
    pub fn classify(&self, value: f64) -> Classification {
        let below = self.lower.is_some_and(|lower| value <= lower);
        let above = self.upper.is_some_and(|upper| value >= upper);
        if below || above {
            Classification::Abnormal
        } else {
            Classification::Normal
        }
    }
}

impl FromStr for ReferenceRange {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ReferenceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.lower, self.upper) {
            (Some(lower), Some(upper)) => write!(f, ">{lower},<{upper}"),
            (Some(lower), None) => write!(f, ">{lower}"),
            (None, Some(upper)) => write!(f, "<{upper}"),
            (None, None) => Ok(()),
        }
    }
}

fn invalid(text: &str, reason: String) -> ModelError {
    ModelError::InvalidRange {
        text: text.trim().to_string(),
        reason,
    }
}

/// Sign-optional decimal number: `12`, `-3.5`, `+0.25`.
fn is_decimal(text: &str) -> bool {
    let digits = text.strip_prefix(['-', '+']).unwrap_or(text);
    if digits.is_empty() {
        return false;
    }
    match digits.split_once('.') {
        Some((whole, frac)) => {
            !whole.is_empty()
                && !frac.is_empty()
                && whole.bytes().all(|b| b.is_ascii_digit())
                && frac.bytes().all(|b| b.is_ascii_digit())
        }
        None => digits.bytes().all(|b| b.is_ascii_digit()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_both_orderings() {
        let a = ReferenceRange::parse(">13.8,<17.2").unwrap();
        let b = ReferenceRange::parse("<17.2,>13.8").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.lower(), Some(13.8));
        assert_eq!(a.upper(), Some(17.2));
    }

    #[test]
    fn parses_single_bound_and_empty() {
        assert_eq!(ReferenceRange::parse(">10").unwrap().upper(), None);
        assert_eq!(ReferenceRange::parse("<4.5").unwrap().lower(), None);
        assert!(ReferenceRange::parse("").unwrap().is_unbounded());
        assert!(ReferenceRange::parse("  ").unwrap().is_unbounded());
    }

    #[test]
    fn parses_negative_bounds() {
        let range = ReferenceRange::parse(">-2.5,<-1").unwrap();
        assert_eq!(range.lower(), Some(-2.5));
        assert_eq!(range.upper(), Some(-1.0));
    }

    #[test]
    fn rejects_misordered_bounds() {
        assert_eq!(
            ReferenceRange::parse(">17.2,<13.8"),
            Err(ModelError::InvalidBounds {
                lower: 17.2,
                upper: 13.8
            })
        );
        assert!(ReferenceRange::parse(">5,<5").is_err());
    }

    #[test]
    fn rejects_malformed_tokens() {
        assert!(ReferenceRange::parse("13.8").is_err());
        assert!(ReferenceRange::parse(">abc").is_err());
        assert!(ReferenceRange::parse(">1,").is_err());
        assert!(ReferenceRange::parse(">1,>2").is_err());
        assert!(ReferenceRange::parse("<1,<2").is_err());
        assert!(ReferenceRange::parse(">1.").is_err());
        assert!(ReferenceRange::parse(">.5").is_err());
    }

    #[test]
    fn classifies_exclusive_bounds() {
        let range = ReferenceRange::parse(">13.8,<17.2").unwrap();
        assert_eq!(range.classify(12.0), Classification::Abnormal);
        assert_eq!(range.classify(13.8), Classification::Abnormal);
        assert_eq!(range.classify(15.0), Classification::Normal);
        assert_eq!(range.classify(17.2), Classification::Abnormal);
        assert_eq!(range.classify(20.0), Classification::Abnormal);
    }

    #[test]
    fn zero_bound_is_not_a_hole() {
        let range = ReferenceRange::parse(">0").unwrap();
        assert_eq!(range.classify(0.0), Classification::Abnormal);
        assert_eq!(range.classify(0.1), Classification::Normal);
    }

    #[test]
    fn unbounded_range_is_always_normal() {
        let range = ReferenceRange::default();
        assert_eq!(range.classify(f64::MAX), Classification::Normal);
        assert_eq!(range.classify(-1e9), Classification::Normal);
    }

    #[test]
    fn display_round_trips() {
        for text in [">13.8,<17.2", ">10", "<4.5", ""] {
            let range = ReferenceRange::parse(text).unwrap();
            assert_eq!(ReferenceRange::parse(&range.to_string()).unwrap(), range);
        }
    }

    proptest! {
        // Monotonic around a lone lower bound: everything at or below is
        // abnormal, everything above is normal.
        #[test]
        fn lower_bound_is_monotonic(value in -1000.0f64..1000.0) {
            let range = ReferenceRange::parse(">10").unwrap();
            let expected = if value <= 10.0 {
                Classification::Abnormal
            } else {
                Classification::Normal
            };
            prop_assert_eq!(range.classify(value), expected);
        }
    }
}
