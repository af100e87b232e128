//! Raw ledger records and their validation into `Transaction`s

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;

use crate::models::{AccountId, Money, Transaction, TransactionId, TransactionType, TransferId};

/// An amount as delivered: a JSON number or a decimal string
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    Number(f64),
    Text(String),
}

/// A ledger record before validation
///
/// Field names follow the backend listing endpoint. Everything is optional so
/// a single malformed row can be reported instead of failing the whole load.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecord {
    pub id: Option<TransactionId>,
    pub account_id: Option<AccountId>,
    pub account_name: Option<String>,
    pub amount: Option<RawAmount>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub date: Option<String>,
    pub category_name: Option<String>,
    pub description: Option<String>,
    pub transfer_id: Option<TransferId>,
}

impl RawRecord {
    /// Validate into a transaction, or explain why the record is unusable
    pub fn validate(self) -> Result<Transaction, String> {
        let id = self
            .id
            .filter(|id| !id.is_blank())
            .ok_or_else(|| "missing id".to_string())?;

        let account_id = self
            .account_id
            .filter(|id| !id.is_blank())
            .ok_or_else(|| "missing accountId".to_string())?;

        let amount = parse_amount(self.amount.as_ref().ok_or("missing amount")?)?;

        let kind: TransactionType = self
            .kind
            .as_deref()
            .ok_or("missing type")?
            .parse()?;

        let date = parse_date(self.date.as_deref().ok_or("missing date")?)?;

        Ok(Transaction {
            id,
            account_id,
            account_name: non_blank(self.account_name),
            amount,
            kind,
            date,
            category_name: non_blank(self.category_name),
            description: self.description.unwrap_or_default().trim().to_string(),
            transfer_id: self.transfer_id.filter(|t| !t.is_blank()),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Largest amount a single record may carry: one trillion currency units
///
/// Keeps range totals over tens of thousands of maximal records inside i64 cents.
pub const MAX_RECORD_AMOUNT: Money = Money::from_cents(1_000_000_000_000 * 100);

/// Parse a non-negative amount, rounding to cents
pub fn parse_amount(raw: &RawAmount) -> Result<Money, String> {
    let money = match raw {
        RawAmount::Number(n) => {
            Money::from_decimal(*n).ok_or_else(|| format!("amount {} is not a finite number", n))?
        }
        RawAmount::Text(s) => {
            Money::parse(s).map_err(|e| format!("could not parse amount '{}': {}", s.trim(), e))?
        }
    };

    if money.is_negative() {
        return Err(format!(
            "amount {} is negative; direction belongs in the type field",
            money
        ));
    }
    if money > MAX_RECORD_AMOUNT {
        return Err(format!(
            "amount {} exceeds the per-record limit of {}",
            money, MAX_RECORD_AMOUNT
        ));
    }
    Ok(money)
}

/// Parse an ISO-8601 date, or take the date part of a timestamp
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    let s = s.trim();

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Ok(ts.date_naive());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(ts.date());
        }
    }

    Err(format!("could not parse date '{}'", s))
}
