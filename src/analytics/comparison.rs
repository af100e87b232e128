//! Period-over-period expense comparison

use serde::Serialize;

use crate::models::{BoundaryMode, DateRange, Money, Transaction, TransactionType};

use super::filter::filter_by_range;
use super::totals::sum_of_kind;

/// Expenses of the active range against the window just before it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseComparison {
    /// Percent change from the previous window to the current one
    pub percent_change: f64,
    /// The preceding window the current range was compared against
    pub compared_to: DateRange,
    /// Display label for the reference window
    pub label: String,
    pub current_expenses: Money,
    pub previous_expenses: Money,
}

/// Percent change from `previous` to `current`
///
/// A zero `previous` yields 100 when anything was spent now and 0 otherwise.
pub fn percent_change(current: Money, previous: Money) -> f64 {
    if previous.is_zero() {
        return if current.is_positive() { 100.0 } else { 0.0 };
    }
    (current - previous).cents() as f64 / previous.cents() as f64 * 100.0
}

/// Compare the expenses of `current` with those of the preceding window in `all`
///
/// `current` holds the transactions already filtered to `range`; `all` is the
/// full snapshot the preceding window is cut from. Returns None without a
/// bounded range, or when the preceding window cannot be represented.
pub fn compute_expense_comparison(
    current: &[Transaction],
    all: &[Transaction],
    range: Option<&DateRange>,
    mode: BoundaryMode,
    label: &str,
) -> Option<ExpenseComparison> {
    let range = range?;
    let previous_window = range.preceding()?;

    let current_expenses = sum_of_kind(current, TransactionType::Out);
    let previous = filter_by_range(all, Some(&previous_window), mode);
    let previous_expenses = sum_of_kind(&previous, TransactionType::Out);

    Some(ExpenseComparison {
        percent_change: percent_change(current_expenses, previous_expenses),
        compared_to: previous_window,
        label: label.to_string(),
        current_expenses,
        previous_expenses,
    })
}
