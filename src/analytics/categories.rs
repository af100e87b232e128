//! Category breakdowns for pie/donut charts

use std::collections::HashMap;

use serde::Serialize;

use crate::models::{Money, Transaction, TransactionType};

/// Total spent or earned under one category label
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryBucket {
    pub label: String,
    pub total: Money,
    pub transaction_count: usize,
}

impl CategoryBucket {
    /// Share of `grand_total` as a percentage, 0 when the total is zero
    pub fn percentage_of(&self, grand_total: Money) -> f64 {
        if grand_total.is_zero() {
            0.0
        } else {
            (self.total.cents() as f64 / grand_total.cents() as f64) * 100.0
        }
    }
}

/// Group categorized, non-transfer transactions of `kind` by category name
///
/// Buckets are sorted by total, largest first. Equal totals keep the order in
/// which their category was first seen in `transactions`.
pub fn compute_category_breakdown(
    transactions: &[Transaction],
    kind: TransactionType,
) -> Vec<CategoryBucket> {
    let mut buckets: Vec<CategoryBucket> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for txn in transactions
        .iter()
        .filter(|t| t.kind == kind && !t.is_transfer())
    {
        let Some(label) = txn.category() else {
            continue;
        };

        let slot = *index.entry(label).or_insert_with(|| {
            buckets.push(CategoryBucket {
                label: label.to_string(),
                total: Money::zero(),
                transaction_count: 0,
            });
            buckets.len() - 1
        });

        buckets[slot].total += txn.amount;
        buckets[slot].transaction_count += 1;
    }

    // sort_by is stable, so ties stay in first-encounter order
    buckets.sort_by(|a, b| b.total.cmp(&a.total));
    buckets
}

/// Sum of all bucket totals
pub fn buckets_total(buckets: &[CategoryBucket]) -> Money {
    buckets.iter().map(|b| b.total).sum()
}
