use crate::utils::error::{RegistryError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A closed validity interval `[start, end]`. A missing `end` means the
/// interval runs indefinitely from `start` onward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
}

impl Interval {
    /// Builds an interval, rejecting an `end` that lies before `start`.
    pub fn new(start: NaiveDate, end: Option<NaiveDate>) -> Result<Self> {
        if let Some(end) = end {
            if end < start {
                return Err(RegistryError::InvalidInterval { start, end });
            }
        }
        Ok(Self { start, end })
    }

    pub fn bounded(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        Self::new(start, Some(end))
    }

    pub fn open(start: NaiveDate) -> Self {
        Self { start, end: None }
    }

    /// Single-day interval used for point-in-time queries.
    pub fn day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: Some(date),
        }
    }

    pub fn is_open_ended(&self) -> bool {
        self.end.is_none()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        overlaps(self, &Interval::day(date))
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.end {
            Some(end) => write!(f, "[{}, {}]", self.start, end),
            None => write!(f, "[{}, open]", self.start),
        }
    }
}

/// Whether two intervals share at least one date.
///
/// Both ends are inclusive, so an interval ending on the day another one
/// starts counts as overlapping.
pub fn overlaps(a: &Interval, b: &Interval) -> bool {
    match (a.end, b.end) {
        (None, None) => true,
        (None, Some(b_end)) => b_end >= a.start,
        (Some(a_end), None) => a_end >= b.start,
        (Some(a_end), Some(b_end)) => !(a_end < b.start || a.start > b_end),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn b(start: &str, end: &str) -> Interval {
        Interval::bounded(d(start), d(end)).unwrap()
    }

    #[test]
    fn test_shared_boundary_overlaps() {
        assert!(overlaps(
            &b("2025-01-01", "2025-06-30"),
            &b("2025-06-30", "2025-12-31")
        ));
    }

    #[test]
    fn test_adjacent_days_do_not_overlap() {
        assert!(!overlaps(
            &b("2025-01-01", "2025-06-29"),
            &b("2025-06-30", "2025-12-31")
        ));
    }

    #[test]
    fn test_open_ended_against_bounded() {
        let open = Interval::open(d("2025-01-01"));
        assert!(!overlaps(&open, &b("2024-01-01", "2024-12-31")));
        assert!(overlaps(&open, &b("2025-06-01", "2025-12-31")));
        assert!(overlaps(&open, &b("2024-06-01", "2025-01-01")));
    }

    #[test]
    fn test_two_open_ended_always_overlap() {
        assert!(overlaps(
            &Interval::open(d("2025-01-01")),
            &Interval::open(d("2026-01-01"))
        ));
    }

    #[test]
    fn test_symmetry_and_reflexivity() {
        let samples = [
            b("2025-01-01", "2025-06-30"),
            b("2025-06-30", "2025-12-31"),
            b("2024-03-01", "2024-03-01"),
            b("2023-01-01", "2030-01-01"),
            Interval::open(d("2025-01-01")),
            Interval::open(d("2027-05-05")),
            Interval::day(d("2025-06-15")),
        ];

        for a in &samples {
            assert!(overlaps(a, a), "{} should overlap itself", a);
            for other in &samples {
                assert_eq!(overlaps(a, other), overlaps(other, a), "{} vs {}", a, other);
            }
        }
    }

    #[test]
    fn test_contains_point() {
        let interval = b("2025-01-01", "2025-12-31");
        assert!(interval.contains(d("2025-01-01")));
        assert!(interval.contains(d("2025-12-31")));
        assert!(!interval.contains(d("2026-01-01")));
        assert!(Interval::open(d("2025-01-01")).contains(d("2099-01-01")));
    }

    #[test]
    fn test_reversed_interval_rejected() {
        let err = Interval::bounded(d("2025-02-01"), d("2025-01-31")).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidInterval { .. }));
        assert!(Interval::bounded(d("2025-02-01"), d("2025-02-01")).is_ok());
    }

    #[test]
    fn test_display() {
        assert_eq!(b("2025-01-01", "2025-12-31").to_string(), "[2025-01-01, 2025-12-31]");
        assert_eq!(Interval::open(d("2025-01-01")).to_string(), "[2025-01-01, open]");
    }
}
