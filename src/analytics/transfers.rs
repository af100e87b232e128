//! Matching unlinked rows that look like the other leg of a transfer
//!
//! When money moves between two owned accounts the bank feeds produce one
//! expense and one income row that are not yet linked. A matching row has the
//! opposite direction, the same amount, a different account, no transfer link
//! of its own, and a date close to the source.

use serde::Serialize;

use crate::error::{LensError, LensResult};
use crate::models::{AccountId, Transaction, TransactionId};

/// A possible counterpart for a source transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferCandidate {
    pub transaction: Transaction,
    /// Absolute distance in days from the source date
    pub days_apart: i64,
}

/// Find counterparts for `source` among `candidates`
///
/// `window_days` is inclusive: a row dated exactly `window_days` away still
/// matches. Results are ordered by closeness, then date, then id.
pub fn find_transfer_candidates(
    source: &Transaction,
    candidates: &[Transaction],
    window_days: i64,
) -> Vec<TransferCandidate> {
    if source.is_transfer() {
        return Vec::new();
    }

    let mut matches: Vec<TransferCandidate> = candidates
        .iter()
        .filter(|t| t.id != source.id)
        .filter(|t| t.account_id != source.account_id)
        .filter(|t| !t.is_transfer())
        .filter(|t| t.kind == source.kind.opposite())
        .filter(|t| t.amount == source.amount)
        .filter_map(|t| {
            let days_apart = (t.date - source.date).num_days().abs();
            (days_apart <= window_days).then(|| TransferCandidate {
                transaction: t.clone(),
                days_apart,
            })
        })
        .collect();

    matches.sort_by(|a, b| {
        a.days_apart
            .cmp(&b.days_apart)
            .then(a.transaction.date.cmp(&b.transaction.date))
            .then(a.transaction.id.cmp(&b.transaction.id))
    });
    matches
}

/// Look up `source_id` in `ledger` and match it against the rest
///
/// With `destination` set, only rows of that account are considered.
pub fn candidates_for(
    ledger: &[Transaction],
    source_id: &TransactionId,
    destination: Option<&AccountId>,
    window_days: i64,
) -> LensResult<Vec<TransferCandidate>> {
    let source = ledger
        .iter()
        .find(|t| &t.id == source_id)
        .ok_or_else(|| LensError::transaction_not_found(source_id.as_str()))?;

    let pool: Vec<Transaction> = match destination {
        Some(account) => ledger
            .iter()
            .filter(|t| &t.account_id == account)
            .cloned()
            .collect(),
        None => ledger.to_vec(),
    };

    Ok(find_transfer_candidates(source, &pool, window_days))
}
