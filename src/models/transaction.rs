//! Transaction model
//!
//! A ledger transaction as delivered by the backend. The amount is always
//! non-negative; direction is carried by `TransactionType`. Transfer legs are
//! marked by a `transfer_id` shared between the two linked rows.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::{AccountId, TransactionId, TransferId};
use super::money::Money;
use super::period::Month;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TransactionType {
    /// Income
    #[serde(rename = "IN")]
    In,
    /// Expense
    #[serde(rename = "OUT")]
    Out,
}

impl TransactionType {
    /// The opposite direction
    pub fn opposite(&self) -> Self {
        match self {
            Self::In => Self::Out,
            Self::Out => Self::In,
        }
    }

    /// Wire code used by the backend
    pub fn code(&self) -> &'static str {
        match self {
            Self::In => "IN",
            Self::Out => "OUT",
        }
    }

    /// Human label for terminal output
    pub fn label(&self) -> &'static str {
        match self {
            Self::In => "Income",
            Self::Out => "Expenses",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "IN" | "INCOME" => Ok(Self::In),
            "OUT" | "EXPENSE" | "EXPENSES" => Ok(Self::Out),
            other => Err(format!("unknown transaction type '{}'", other)),
        }
    }
}

/// A validated ledger transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// The account this transaction belongs to
    pub account_id: AccountId,

    /// Account display name, when the backend supplied one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_name: Option<String>,

    /// Non-negative amount; direction is in `kind`
    pub amount: Money,

    /// Income or expense
    #[serde(rename = "type")]
    pub kind: TransactionType,

    /// Calendar date
    pub date: NaiveDate,

    /// Category label; None means uncategorized
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,

    /// Free-text description
    #[serde(default)]
    pub description: String,

    /// Shared link between the two legs of an internal transfer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer_id: Option<TransferId>,
}

impl Transaction {
    /// Create a new uncategorized transaction
    pub fn new(
        id: impl Into<TransactionId>,
        account_id: impl Into<AccountId>,
        kind: TransactionType,
        amount: Money,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            account_id: account_id.into(),
            account_name: None,
            amount,
            kind,
            date,
            category_name: None,
            description: String::new(),
            transfer_id: None,
        }
    }

    /// Builder-style category setter
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category_name = Some(category.into());
        self
    }

    /// Builder-style transfer link setter
    pub fn with_transfer(mut self, transfer_id: impl Into<TransferId>) -> Self {
        self.transfer_id = Some(transfer_id.into());
        self
    }

    /// Builder-style description setter
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Check if this is a transfer leg
    pub fn is_transfer(&self) -> bool {
        self.transfer_id.is_some()
    }

    /// Check if this is income
    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::In
    }

    /// Check if this is an expense
    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Out
    }

    /// Signed contribution to a net balance (income positive, expense negative)
    pub fn signed_amount(&self) -> Money {
        match self.kind {
            TransactionType::In => self.amount,
            TransactionType::Out => -self.amount,
        }
    }

    /// The calendar month this transaction falls in
    pub fn month(&self) -> Month {
        Month::of(self.date)
    }

    /// Non-empty category label, if any
    pub fn category(&self) -> Option<&str> {
        self.category_name
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.date.format("%Y-%m-%d"),
            self.kind,
            self.amount,
            self.description
        )
    }
}
