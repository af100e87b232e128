//! Ledger search for the transaction register

use chrono::NaiveDate;

use crate::models::{Transaction, TransactionType};

/// Criteria for narrowing the transaction register
///
/// Every field is optional; an empty filter keeps everything. Date bounds are
/// inclusive and may be given independently.
#[derive(Debug, Clone, Default)]
pub struct LedgerFilter {
    /// Case-insensitive text matched against description, account and category
    pub query: Option<String>,
    /// Keep only these directions (empty = both)
    pub kinds: Vec<TransactionType>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl LedgerFilter {
    /// Check a single transaction against the filter
    pub fn matches(&self, txn: &Transaction) -> bool {
        if let Some(query) = self.query.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            let needle = query.to_lowercase();
            let hit = txn.description.to_lowercase().contains(&needle)
                || txn
                    .account_name
                    .as_deref()
                    .is_some_and(|a| a.to_lowercase().contains(&needle))
                || txn
                    .category()
                    .is_some_and(|c| c.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }

        if !self.kinds.is_empty() && !self.kinds.contains(&txn.kind) {
            return false;
        }

        if self.start.is_some_and(|start| txn.date < start) {
            return false;
        }

        if self.end.is_some_and(|end| txn.date > end) {
            return false;
        }

        true
    }

    /// Apply the filter, newest first
    pub fn apply(&self, transactions: &[Transaction]) -> Vec<Transaction> {
        let mut hits: Vec<_> = transactions
            .iter()
            .filter(|t| self.matches(t))
            .cloned()
            .collect();
        hits.sort_by(|a, b| b.date.cmp(&a.date));
        hits
    }
}
