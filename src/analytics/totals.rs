//! Income, expense and net totals

use serde::Serialize;

use crate::models::{Money, Transaction, TransactionType};

/// Summary totals over a set of transactions, transfers excluded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Totals {
    pub total_income: Money,
    pub total_expenses: Money,
    pub net_balance: Money,
}

/// Sum income and expenses, skipping transfer legs
pub fn compute_totals(transactions: &[Transaction]) -> Totals {
    let mut total_income = Money::zero();
    let mut total_expenses = Money::zero();

    for txn in transactions.iter().filter(|t| !t.is_transfer()) {
        match txn.kind {
            TransactionType::In => total_income += txn.amount,
            TransactionType::Out => total_expenses += txn.amount,
        }
    }

    Totals {
        total_income,
        total_expenses,
        net_balance: total_income - total_expenses,
    }
}

/// Total of one direction, skipping transfer legs
pub fn sum_of_kind(transactions: &[Transaction], kind: TransactionType) -> Money {
    transactions
        .iter()
        .filter(|t| t.kind == kind && !t.is_transfer())
        .map(|t| t.amount)
        .sum()
}
