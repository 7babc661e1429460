//! Pure decision functions behind the non-overlap invariant.
//!
//! Everything here works on a slice of assignments already fetched by the
//! caller. Nothing is cached: "active" is recomputed from the intervals on
//! every call.

use crate::domain::interval::{overlaps, Interval};
use crate::domain::model::{Assignment, AssignmentId, CompanyId, SupplierNumber};
use chrono::NaiveDate;
use std::collections::BTreeMap;

fn for_number(
    assignments: &[Assignment],
    number: SupplierNumber,
) -> impl Iterator<Item = &Assignment> {
    assignments
        .iter()
        .filter(move |a| a.supplier_number == number)
}

/// True iff some assignment for `number`, other than `exclude`, overlaps
/// `candidate`.
///
/// Advisory only: a caller that checks and then writes without holding a
/// lock can still race another writer.
pub fn has_overlapping_assignment(
    assignments: &[Assignment],
    number: SupplierNumber,
    candidate: &Interval,
    exclude: Option<AssignmentId>,
) -> bool {
    for_number(assignments, number)
        .filter(|a| exclude.is_none() || a.id != exclude)
        .any(|existing| overlaps(candidate, &existing.interval()))
}

/// First assignment for `number` covering `date`.
pub fn find_active_assignment(
    assignments: &[Assignment],
    number: SupplierNumber,
    date: NaiveDate,
) -> Option<&Assignment> {
    let day = Interval::day(date);
    let mut matches = for_number(assignments, number).filter(|a| overlaps(&a.interval(), &day));

    let first = matches.next()?;
    if let Some(second) = matches.next() {
        tracing::warn!(
            "Supplier number {} has more than one active assignment on {}: {} and {}",
            number,
            date,
            first,
            second
        );
    }
    Some(first)
}

/// Holder of every supplier number active on `date`. On a collision the first
/// assignment encountered wins.
pub fn active_holders(assignments: &[Assignment], date: NaiveDate) -> BTreeMap<SupplierNumber, CompanyId> {
    let mut holders = BTreeMap::new();
    for assignment in assignments.iter().filter(|a| a.is_active_on(date)) {
        holders
            .entry(assignment.supplier_number)
            .or_insert(assignment.company_id);
    }
    holders
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn saved(number: u32, company: CompanyId, from: &str, to: Option<&str>) -> Assignment {
        let mut a = Assignment::new(company, SupplierNumber::new(number), d(from), to.map(d));
        a.id = Some(AssignmentId::generate());
        a
    }

    #[test]
    fn test_overlap_with_and_without_exclusion() {
        let company = CompanyId::generate();
        let existing = saved(7, company, "2025-01-01", Some("2025-12-31"));
        let id = existing.id;
        let assignments = vec![existing];
        let candidate = Interval::bounded(d("2025-06-01"), d("2025-06-30")).unwrap();

        assert!(has_overlapping_assignment(&assignments, SupplierNumber::new(7), &candidate, None));
        assert!(!has_overlapping_assignment(&assignments, SupplierNumber::new(7), &candidate, id));
    }

    #[test]
    fn test_other_numbers_are_ignored() {
        let assignments = vec![saved(2, CompanyId::generate(), "2025-01-01", None)];
        let candidate = Interval::open(d("2025-01-01"));

        assert!(!has_overlapping_assignment(&assignments, SupplierNumber::new(3), &candidate, None));
        assert!(has_overlapping_assignment(&assignments, SupplierNumber::new(2), &candidate, None));
    }

    #[test]
    fn test_open_candidate_against_earlier_bounded() {
        let assignments = vec![saved(1, CompanyId::generate(), "2024-01-01", Some("2024-12-31"))];

        let after = Interval::open(d("2025-01-01"));
        let touching = Interval::open(d("2024-12-31"));
        assert!(!has_overlapping_assignment(&assignments, SupplierNumber::new(1), &after, None));
        assert!(has_overlapping_assignment(&assignments, SupplierNumber::new(1), &touching, None));
    }

    #[test]
    fn test_check_is_repeatable() {
        let assignments = vec![saved(5, CompanyId::generate(), "2025-01-01", Some("2025-03-31"))];
        let candidate = Interval::bounded(d("2025-03-01"), d("2025-04-30")).unwrap();

        let first = has_overlapping_assignment(&assignments, SupplierNumber::new(5), &candidate, None);
        let second = has_overlapping_assignment(&assignments, SupplierNumber::new(5), &candidate, None);
        assert_eq!(first, second);
    }

    #[test]
    fn test_find_active_assignment() {
        let assignments = vec![saved(7, CompanyId::generate(), "2025-01-01", Some("2025-12-31"))];

        let active = find_active_assignment(&assignments, SupplierNumber::new(7), d("2025-07-01"));
        assert_eq!(active, assignments.first());
        assert!(find_active_assignment(&assignments, SupplierNumber::new(7), d("2026-01-01")).is_none());
        assert!(find_active_assignment(&[], SupplierNumber::new(7), d("2025-07-01")).is_none());
    }

    #[test]
    fn test_find_active_returns_first_of_conflicting() {
        let a = saved(1, CompanyId::generate(), "2025-01-01", None);
        let b = saved(1, CompanyId::generate(), "2025-02-01", None);
        let assignments = vec![a.clone(), b];

        let active = find_active_assignment(&assignments, SupplierNumber::new(1), d("2025-03-01"));
        assert_eq!(active, Some(&a));
    }

    #[test]
    fn test_active_holders_first_wins() {
        let first = CompanyId::generate();
        let second = CompanyId::generate();
        let other = CompanyId::generate();
        let assignments = vec![
            saved(1, first, "2025-01-01", None),
            saved(1, second, "2025-01-01", Some("2025-12-31")),
            saved(2, other, "2024-01-01", Some("2024-12-31")),
        ];

        let holders = active_holders(&assignments, d("2025-06-01"));
        assert_eq!(holders.len(), 1);
        assert_eq!(holders.get(&SupplierNumber::new(1)), Some(&first));
    }
}
