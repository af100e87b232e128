//! Dashboard analytics over a transaction snapshot
//!
//! Every function here is a pure computation over borrowed transactions: no
//! I/O, no shared state, no caching. Callers recompute a view whenever the
//! snapshot or the selected range changes.
//!
//! # Example
//!
//! ```
//! use ledgerlens::analytics::{DashboardOptions, DashboardView};
//! use ledgerlens::models::{DateRange, Money, Transaction, TransactionType};
//! use chrono::NaiveDate;
//!
//! let salary = Transaction::new(
//!     "1",
//!     "main",
//!     TransactionType::In,
//!     Money::from_cents(250_000),
//!     NaiveDate::from_ymd_opt(2024, 1, 27).unwrap(),
//! )
//! .with_category("Salary");
//!
//! let range = DateRange::parse("2024-01").unwrap();
//! let view = DashboardView::compute(&[salary], Some(range), &DashboardOptions::default());
//! assert_eq!(view.totals.total_income.cents(), 250_000);
//! assert_eq!(view.income_by_category[0].label, "Salary");
//! ```

pub mod categories;
pub mod comparison;
pub mod filter;
pub mod search;
pub mod totals;
pub mod transfers;
pub mod trend;

pub use categories::{compute_category_breakdown, CategoryBucket};
pub use comparison::{compute_expense_comparison, percent_change, ExpenseComparison};
pub use filter::filter_by_range;
pub use search::LedgerFilter;
pub use totals::{compute_totals, Totals};
pub use transfers::{candidates_for, find_transfer_candidates, TransferCandidate};
pub use trend::{
    compute_monthly_net_series, compute_monthly_trend, MonthlyBar, MonthlyNetPoint,
    NetSeriesTransfers,
};

use serde::Serialize;

use crate::config::Settings;
use crate::models::{BoundaryMode, DateRange, Transaction, TransactionType};

/// Knobs that change how the dashboard is derived
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardOptions {
    pub boundary_mode: BoundaryMode,
    pub net_series_transfers: NetSeriesTransfers,
    pub comparison_label: String,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            boundary_mode: BoundaryMode::default(),
            net_series_transfers: NetSeriesTransfers::default(),
            comparison_label: "previous period".to_string(),
        }
    }
}

impl From<&Settings> for DashboardOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            boundary_mode: settings.boundary_mode,
            net_series_transfers: settings.net_series_transfers,
            comparison_label: settings.comparison_label.clone(),
        }
    }
}

/// Every derived dashboard view for one snapshot and range
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub range: Option<DateRange>,
    /// Number of transactions inside the range, transfers included
    pub transaction_count: usize,
    pub totals: Totals,
    pub income_by_category: Vec<CategoryBucket>,
    pub expenses_by_category: Vec<CategoryBucket>,
    pub monthly_trend: Vec<MonthlyBar>,
    pub monthly_net: Vec<MonthlyNetPoint>,
    pub expense_comparison: Option<ExpenseComparison>,
}

impl DashboardView {
    /// Derive all views from `transactions` restricted to `range`
    pub fn compute(
        transactions: &[Transaction],
        range: Option<DateRange>,
        options: &DashboardOptions,
    ) -> Self {
        let filtered = filter_by_range(transactions, range.as_ref(), options.boundary_mode);

        tracing::debug!(
            total = transactions.len(),
            in_range = filtered.len(),
            range = ?range.map(|r| r.to_string()),
            "computing dashboard"
        );

        Self {
            range,
            transaction_count: filtered.len(),
            totals: compute_totals(&filtered),
            income_by_category: compute_category_breakdown(&filtered, TransactionType::In),
            expenses_by_category: compute_category_breakdown(&filtered, TransactionType::Out),
            monthly_trend: compute_monthly_trend(&filtered),
            monthly_net: compute_monthly_net_series(&filtered, options.net_series_transfers),
            expense_comparison: compute_expense_comparison(
                &filtered,
                transactions,
                range.as_ref(),
                options.boundary_mode,
                &options.comparison_label,
            ),
        }
    }

    /// True when nothing fell inside the selected range
    pub fn is_empty(&self) -> bool {
        self.transaction_count == 0
    }
}
