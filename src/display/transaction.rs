//! Transaction display formatting
//!
//! Register views for search results, transfer candidates and records that
//! were rejected at load time.

use super::report::{separator, truncate};
use crate::analytics::TransferCandidate;
use crate::ingest::RejectedRecord;
use crate::models::{Transaction, TransactionType};

/// Format a single transaction for display (register row)
pub fn format_transaction_row(txn: &Transaction, symbol: &str) -> String {
    let transfer_indicator = if txn.is_transfer() { "⇄" } else { " " };

    let description = if txn.description.is_empty() {
        "(no description)"
    } else {
        txn.description.as_str()
    };

    let signed = match txn.kind {
        TransactionType::In => txn.amount.format_with_symbol(symbol),
        TransactionType::Out => (-txn.amount).format_with_symbol(symbol),
    };

    format!(
        "{} {:<8} {} {:24} {:16} {:>13}",
        transfer_indicator,
        truncate(txn.id.as_str(), 8),
        txn.date.format("%Y-%m-%d"),
        truncate(description, 24),
        truncate(txn.category().unwrap_or("-"), 16),
        signed
    )
}

fn register_header() -> String {
    format!(
        "  {:<8} {:10} {:24} {:16} {:>13}\n{}\n",
        "Id",
        "Date",
        "Description",
        "Category",
        "Amount",
        separator(76)
    )
}

/// Format a list of transactions as a register
pub fn format_transaction_register(transactions: &[Transaction], symbol: &str) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = register_header();
    for txn in transactions {
        output.push_str(&format_transaction_row(txn, symbol));
        output.push('\n');
    }
    output.push_str(&format!("{} transaction(s)\n", transactions.len()));
    output
}

/// Format the possible counterparts of a transfer
pub fn format_transfer_candidates(
    source: &Transaction,
    candidates: &[TransferCandidate],
    symbol: &str,
) -> String {
    let mut output = format!(
        "Transfer candidates for {} ({} {} on {})\n",
        source.id.short(),
        source.kind,
        source.amount.format_with_symbol(symbol),
        source.date.format("%Y-%m-%d")
    );

    if candidates.is_empty() {
        output.push_str("No matching transactions.\n");
        return output;
    }

    output.push_str(&register_header());
    for candidate in candidates {
        output.push_str(&format!(
            "{}  [{} day(s), account {}]\n",
            format_transaction_row(&candidate.transaction, symbol),
            candidate.days_apart,
            candidate
                .transaction
                .account_name
                .as_deref()
                .unwrap_or(candidate.transaction.account_id.as_str())
        ));
    }
    output
}

/// Format the records skipped while loading a snapshot
pub fn format_rejections(rejected: &[RejectedRecord]) -> String {
    let mut output = format!("Skipped {} record(s):\n", rejected.len());
    for record in rejected {
        output.push_str(&format!(
            "  row {:>4} {:>10}  {}\n",
            record.row,
            record.id.as_deref().unwrap_or("-"),
            record.reason
        ));
    }
    output
}
