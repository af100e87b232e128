//! Date-range filtering of a transaction snapshot

use crate::models::{BoundaryMode, DateRange, Transaction};

/// Keep the transactions dated inside `range`
///
/// An unbounded selection (`None`) returns the input unchanged. Bound days are
/// matched according to `mode`.
pub fn filter_by_range(
    transactions: &[Transaction],
    range: Option<&DateRange>,
    mode: BoundaryMode,
) -> Vec<Transaction> {
    match range {
        None => transactions.to_vec(),
        Some(range) => transactions
            .iter()
            .filter(|t| range.contains(t.date, mode))
            .cloned()
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::test_support::{expense, income};

    fn ids(transactions: &[Transaction]) -> Vec<&str> {
        transactions.iter().map(|t| t.id.as_str()).collect()
    }

    fn sample() -> Vec<Transaction> {
        vec![
            income("a", 100_00, "2023-12-31"),
            income("b", 100_00, "2024-01-01"),
            expense("c", 20_00, "2024-01-15"),
            expense("d", 30_00, "2024-01-31"),
            expense("e", 40_00, "2024-02-01"),
        ]
    }

    #[test]
    fn test_unbounded_returns_everything() {
        let all = sample();
        assert_eq!(filter_by_range(&all, None, BoundaryMode::InclusiveDays), all);
    }

    #[test]
    fn test_inclusive_keeps_boundary_days() {
        let range = DateRange::parse("2024-01-01..2024-01-31").unwrap();
        let kept = filter_by_range(&sample(), Some(&range), BoundaryMode::InclusiveDays);
        assert_eq!(ids(&kept), vec!["b", "c", "d"]);
    }

    #[test]
    fn test_exclusive_drops_boundary_days() {
        let range = DateRange::parse("2024-01-01..2024-01-31").unwrap();
        let kept = filter_by_range(&sample(), Some(&range), BoundaryMode::Exclusive);
        assert_eq!(ids(&kept), vec!["c"]);
    }

    #[test]
    fn test_empty_input() {
        let range = DateRange::parse("2024-01").unwrap();
        assert!(filter_by_range(&[], Some(&range), BoundaryMode::InclusiveDays).is_empty());
    }
}
