//! Loading ledger snapshots
//!
//! This is the only place untrusted data enters the crate. Records are
//! validated here into `Transaction`s; anything unusable is skipped, logged
//! and listed in the returned `IngestReport` so the analytics never see it.

pub mod delimited;
pub mod json;
pub mod record;

pub use record::{parse_amount, parse_date, RawAmount, RawRecord};

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LensError, LensResult};
use crate::models::Transaction;

/// Snapshot file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Json,
    Csv,
}

impl SnapshotFormat {
    /// Pick the format from a file extension, defaulting to JSON
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("csv") => Self::Csv,
            _ => Self::Json,
        }
    }
}

/// A record that was dropped at the boundary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedRecord {
    /// 1-based position of the record in the input
    pub row: usize,
    /// Record id, when one could be read
    pub id: Option<String>,
    pub reason: String,
}

/// Outcome of loading a snapshot
#[derive(Debug, Clone, Default)]
pub struct IngestReport {
    pub transactions: Vec<Transaction>,
    pub rejected: Vec<RejectedRecord>,
}

impl IngestReport {
    /// Validate raw rows into a report, skipping and logging bad records
    pub fn from_rows(rows: Vec<Result<RawRecord, String>>) -> Self {
        let mut report = Self::default();
        let mut seen = HashSet::new();

        for (idx, row) in rows.into_iter().enumerate() {
            let row_number = idx + 1;

            let raw = match row {
                Ok(raw) => raw,
                Err(reason) => {
                    report.reject(row_number, None, reason);
                    continue;
                }
            };

            let id = raw.id.as_ref().map(|id| id.to_string());
            match raw.validate() {
                Ok(txn) => {
                    if seen.insert(txn.id.clone()) {
                        report.transactions.push(txn);
                    } else {
                        report.reject(row_number, id, "duplicate id".to_string());
                    }
                }
                Err(reason) => report.reject(row_number, id, reason),
            }
        }

        tracing::info!(
            accepted = report.transactions.len(),
            rejected = report.rejected.len(),
            "snapshot loaded"
        );
        report
    }

    fn reject(&mut self, row: usize, id: Option<String>, reason: String) {
        tracing::warn!(row, id = id.as_deref().unwrap_or("-"), %reason, "skipping record");
        self.rejected.push(RejectedRecord { row, id, reason });
    }

    /// True when no record was rejected
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }

    /// Fail on the first rejected record instead of skipping it
    pub fn into_strict(self) -> LensResult<Vec<Transaction>> {
        match self.rejected.into_iter().next() {
            Some(first) => Err(LensError::InvalidRecord {
                row: first.row,
                reason: first.reason,
            }),
            None => Ok(self.transactions),
        }
    }
}

/// Load a snapshot from any reader
pub fn load_from_reader<R: Read>(reader: R, format: SnapshotFormat) -> LensResult<IngestReport> {
    let rows = match format {
        SnapshotFormat::Json => json::read_records(reader)?,
        SnapshotFormat::Csv => delimited::read_records(reader)?,
    };
    Ok(IngestReport::from_rows(rows))
}

/// Load a snapshot file, choosing the format by extension
pub fn load_snapshot(path: &Path) -> LensResult<IngestReport> {
    let file = File::open(path).map_err(|e| {
        LensError::Io(format!("failed to open snapshot {}: {}", path.display(), e))
    })?;

    let format = SnapshotFormat::from_path(path);
    tracing::debug!(path = %path.display(), ?format, "reading snapshot");

    load_from_reader(BufReader::new(file), format)
}
