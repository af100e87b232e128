//! Month-bucketed series: income/expense bars and the cumulative net line

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Money, Month, Transaction, TransactionType};

/// Whether transfer legs contribute to the monthly net-balance series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NetSeriesTransfers {
    /// Skip transfer legs, consistent with totals and the trend bars
    #[default]
    Exclude,
    /// Count transfer legs like any other income or expense
    Include,
}

/// One bar of the grouped income/expense chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthlyBar {
    pub month: Month,
    pub kind: TransactionType,
    pub total: Money,
}

/// One point of the cumulative net-balance line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthlyNetPoint {
    pub month: Month,
    /// Last calendar day of `month`, used as the point label
    pub month_end: NaiveDate,
    pub cumulative_balance: Money,
    pub monthly_net: Money,
}

#[derive(Default)]
struct MonthSums {
    income: Money,
    expense: Money,
}

fn sums_by_month<'a>(
    transactions: impl Iterator<Item = &'a Transaction>,
) -> BTreeMap<Month, MonthSums> {
    let mut months: BTreeMap<Month, MonthSums> = BTreeMap::new();
    for txn in transactions {
        let sums = months.entry(txn.month()).or_default();
        match txn.kind {
            TransactionType::In => sums.income += txn.amount,
            TransactionType::Out => sums.expense += txn.amount,
        }
    }
    months
}

/// Income and expense totals per month, two rows per month in chronological order
///
/// Every month present in the input yields an IN row followed by an OUT row,
/// even when one side is zero. Transfer legs are skipped.
pub fn compute_monthly_trend(transactions: &[Transaction]) -> Vec<MonthlyBar> {
    sums_by_month(transactions.iter().filter(|t| !t.is_transfer()))
        .into_iter()
        .flat_map(|(month, sums)| {
            [
                MonthlyBar {
                    month,
                    kind: TransactionType::In,
                    total: sums.income,
                },
                MonthlyBar {
                    month,
                    kind: TransactionType::Out,
                    total: sums.expense,
                },
            ]
        })
        .collect()
}

/// Monthly net (income minus expense) with a running cumulative balance
pub fn compute_monthly_net_series(
    transactions: &[Transaction],
    transfers: NetSeriesTransfers,
) -> Vec<MonthlyNetPoint> {
    let included = transactions
        .iter()
        .filter(|t| transfers == NetSeriesTransfers::Include || !t.is_transfer());

    let mut cumulative = Money::zero();
    sums_by_month(included)
        .into_iter()
        .map(|(month, sums)| {
            let monthly_net = sums.income - sums.expense;
            cumulative += monthly_net;
            MonthlyNetPoint {
                month,
                month_end: month.last_day(),
                cumulative_balance: cumulative,
                monthly_net,
            }
        })
        .collect()
}
