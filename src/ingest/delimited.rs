//! CSV snapshot reader
//!
//! Columns are located by header name, so any column order works and
//! unknown columns are ignored.

use std::io::Read;

use csv::{ReaderBuilder, StringRecord};

use super::record::{RawAmount, RawRecord};
use crate::error::{LensError, LensResult};

/// Column positions detected from a CSV header row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMapping {
    pub id: Option<usize>,
    pub account_id: Option<usize>,
    pub account_name: Option<usize>,
    pub amount: Option<usize>,
    pub kind: Option<usize>,
    pub date: Option<usize>,
    pub category_name: Option<usize>,
    pub description: Option<usize>,
    pub transfer_id: Option<usize>,
}

impl ColumnMapping {
    /// Detect column mapping from the header record
    pub fn from_headers(headers: &StringRecord) -> Self {
        let mut mapping = Self::default();

        for (idx, header) in headers.iter().enumerate() {
            let h: String = header
                .trim()
                .chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .collect::<String>()
                .to_ascii_lowercase();

            let slot = match h.as_str() {
                "id" | "transactionid" => &mut mapping.id,
                "accountid" | "account" => &mut mapping.account_id,
                "accountname" => &mut mapping.account_name,
                "amount" => &mut mapping.amount,
                "type" | "kind" | "direction" => &mut mapping.kind,
                "date" => &mut mapping.date,
                "categoryname" | "category" => &mut mapping.category_name,
                "description" | "memo" | "payee" => &mut mapping.description,
                "transferid" | "transfer" => &mut mapping.transfer_id,
                _ => continue,
            };
            // First matching column wins
            if slot.is_none() {
                *slot = Some(idx);
            }
        }

        mapping
    }

    /// Names of required columns the header did not provide
    pub fn missing_required(&self) -> Vec<&'static str> {
        [
            ("id", self.id),
            ("accountId", self.account_id),
            ("amount", self.amount),
            ("type", self.kind),
            ("date", self.date),
        ]
        .into_iter()
        .filter(|(_, col)| col.is_none())
        .map(|(name, _)| name)
        .collect()
    }

    fn field(&self, record: &StringRecord, col: Option<usize>) -> Option<String> {
        col.and_then(|c| record.get(c))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    /// Turn one data row into a raw record
    pub fn to_raw(&self, record: &StringRecord) -> RawRecord {
        RawRecord {
            id: self.field(record, self.id).map(Into::into),
            account_id: self.field(record, self.account_id).map(Into::into),
            account_name: self.field(record, self.account_name),
            amount: self.field(record, self.amount).map(RawAmount::Text),
            kind: self.field(record, self.kind),
            date: self.field(record, self.date),
            category_name: self.field(record, self.category_name),
            description: self.field(record, self.description),
            transfer_id: self.field(record, self.transfer_id).map(Into::into),
        }
    }
}

/// Read every data row of a CSV snapshot
///
/// The outer error is for unusable input as a whole (no header, required
/// columns absent). Per-row problems are returned in place.
pub fn read_records<R: Read>(reader: R) -> LensResult<Vec<Result<RawRecord, String>>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let mapping = ColumnMapping::from_headers(&headers);

    let missing = mapping.missing_required();
    if !missing.is_empty() {
        return Err(LensError::Csv(format!(
            "missing required column(s): {}",
            missing.join(", ")
        )));
    }

    let rows = reader
        .records()
        .map(|result| match result {
            Ok(record) => Ok(mapping.to_raw(&record)),
            Err(e) => Err(format!("error reading CSV record: {}", e)),
        })
        .collect();

    Ok(rows)
}
