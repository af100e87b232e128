//! CLI command handlers
//!
//! This module contains the implementation of CLI commands, bridging the
//! clap argument parsing with ingest, analytics and the output layers.

pub mod config;
pub mod dashboard;
pub mod search;
pub mod transfers;

pub use config::{handle_config_command, handle_init_command, ConfigCommands};
pub use dashboard::{
    handle_categories_command, handle_dashboard_command, handle_trend_command, CategoriesArgs,
    DashboardArgs, TrendArgs,
};
pub use search::{handle_search_command, SearchArgs};
pub use transfers::{handle_transfers_command, TransfersArgs};

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use serde::Serialize;

use crate::config::Settings;
use crate::display::format_rejections;
use crate::error::{LensError, LensResult};
use crate::ingest::{load_snapshot, RejectedRecord};
use crate::models::period::parse_date;
use crate::models::{DateRange, Transaction, TransactionType};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable terminal output
    #[default]
    Text,
    /// JSON (camelCase, chart-ready)
    Json,
    /// YAML (same document as JSON)
    Yaml,
    /// CSV (spreadsheet-compatible)
    Csv,
}

/// Transaction direction as a command-line value
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    #[value(alias = "income")]
    In,
    #[value(alias = "expense")]
    Out,
}

impl From<KindArg> for TransactionType {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::In => TransactionType::In,
            KindArg::Out => TransactionType::Out,
        }
    }
}

/// Which snapshot to read and how strictly
#[derive(Args, Debug, Clone)]
pub struct SnapshotArgs {
    /// Ledger snapshot file (.json array or .csv)
    #[arg(env = "LEDGERLENS_SNAPSHOT")]
    pub snapshot: PathBuf,

    /// Fail on the first invalid record instead of skipping it
    #[arg(long)]
    pub strict: bool,
}

/// Dashboard range selection
#[derive(Args, Debug, Clone, Default)]
pub struct RangeArgs {
    /// Range start (YYYY-MM-DD)
    #[arg(short, long)]
    pub start: Option<String>,

    /// Range end (YYYY-MM-DD)
    #[arg(short, long)]
    pub end: Option<String>,

    /// A month ("2024-03") or an explicit range ("2024-01-01..2024-03-31")
    #[arg(short, long, conflicts_with_all = ["start", "end"])]
    pub range: Option<String>,

    /// Use every transaction, ignoring the configured default range
    #[arg(long, conflicts_with_all = ["start", "end", "range"])]
    pub all: bool,
}

impl RangeArgs {
    /// Resolve the selection, falling back to the configured default range
    pub fn resolve(&self, settings: &Settings) -> LensResult<Option<DateRange>> {
        if let Some(range) = &self.range {
            return DateRange::parse(range)
                .map(Some)
                .map_err(|e| LensError::Validation(format!("Invalid range '{}': {}", range, e)));
        }

        if self.all {
            return Ok(None);
        }

        let start = parse_bound(self.start.as_deref(), "start")?;
        let end = parse_bound(self.end.as_deref(), "end")?;

        match (start, end) {
            (None, None) => Ok(settings.default_range.resolve()),
            (Some(_), None) | (None, Some(_)) => {
                tracing::warn!("only one range bound given, using all transactions");
                Ok(None)
            }
            _ => DateRange::from_bounds(start, end)
                .map_err(|e| LensError::Validation(e.to_string())),
        }
    }
}

fn parse_bound(value: Option<&str>, which: &str) -> LensResult<Option<chrono::NaiveDate>> {
    value
        .map(|s| {
            parse_date(s).map_err(|_| {
                LensError::Validation(format!(
                    "Invalid {} date format: {}. Use YYYY-MM-DD",
                    which, s
                ))
            })
        })
        .transpose()
}

/// Output selection shared by all report commands
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Load a snapshot, echoing skipped records to stderr
///
/// In strict mode the first rejected record becomes the error.
pub(crate) fn load_ledger(
    args: &SnapshotArgs,
) -> LensResult<(Vec<Transaction>, Vec<RejectedRecord>)> {
    let report = load_snapshot(&args.snapshot)?;

    if args.strict {
        return Ok((report.into_strict()?, Vec::new()));
    }

    if !report.is_clean() {
        eprint!("{}", format_rejections(&report.rejected));
    }
    Ok((report.transactions, report.rejected))
}

/// Open the requested output target
pub(crate) fn open_output(path: Option<&Path>) -> LensResult<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                LensError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            tracing::info!(path = %path.display(), "writing output file");
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

/// Write serializable rows as JSON, YAML or CSV
pub(crate) fn write_rows<T: Serialize, W: Write>(
    rows: &[T],
    format: OutputFormat,
    writer: &mut W,
) -> LensResult<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, rows)
                .map_err(|e| LensError::Export(e.to_string()))?;
            writeln!(writer).map_err(|e| LensError::Export(e.to_string()))?;
        }
        OutputFormat::Yaml => {
            serde_yaml::to_writer(&mut *writer, rows)
                .map_err(|e| LensError::Export(e.to_string()))?;
        }
        OutputFormat::Csv => {
            let mut csv_writer = csv::Writer::from_writer(&mut *writer);
            for row in rows {
                csv_writer.serialize(row)?;
            }
            csv_writer.flush()?;
        }
        OutputFormat::Text => {
            return Err(LensError::Export(
                "text output has no row serialization".to_string(),
            ))
        }
    }
    Ok(())
}

/// Write a text block to the output target
pub(crate) fn write_text<W: Write>(writer: &mut W, text: &str) -> LensResult<()> {
    writer
        .write_all(text.as_bytes())
        .and_then(|_| writer.flush())
        .map_err(|e| LensError::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DefaultRange;
    use crate::export::CategoryPoint;

    fn range_args(start: Option<&str>, end: Option<&str>) -> RangeArgs {
        RangeArgs {
            start: start.map(String::from),
            end: end.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn test_resolve_explicit_bounds() {
        let settings = Settings::default();
        let range = range_args(Some("2024-01-01"), Some("2024-01-31"))
            .resolve(&settings)
            .unwrap()
            .unwrap();
        assert_eq!(range.to_string(), "2024-01-01..2024-01-31");
    }

    #[test]
    fn test_resolve_reversed_is_validation_error() {
        let err = range_args(Some("2024-02-01"), Some("2024-01-01"))
            .resolve(&Settings::default())
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_resolve_bad_date() {
        let err = range_args(Some("01/02/2024"), None)
            .resolve(&Settings::default())
            .unwrap_err();
        assert!(err.to_string().contains("start"));
    }

    #[test]
    fn test_single_bound_is_unbounded() {
        let range = range_args(Some("2024-01-01"), None)
            .resolve(&Settings::default())
            .unwrap();
        assert!(range.is_none());
    }

    #[test]
    fn test_default_range_and_all_flag() {
        let mut settings = Settings::default();
        settings.default_range = DefaultRange::CurrentYear;

        assert!(RangeArgs::default().resolve(&settings).unwrap().is_some());

        let all = RangeArgs {
            all: true,
            ..Default::default()
        };
        assert!(all.resolve(&settings).unwrap().is_none());
    }

    #[test]
    fn test_resolve_month_shorthand() {
        let args = RangeArgs {
            range: Some("2024-02".into()),
            ..Default::default()
        };
        let range = args.resolve(&Settings::default()).unwrap().unwrap();
        assert_eq!(range.end().to_string(), "2024-02-29");
    }

    #[test]
    fn test_write_rows_csv() {
        let rows = vec![CategoryPoint {
            label: "Food".into(),
            value: 12.5,
        }];
        let mut buffer = Vec::new();
        write_rows(&rows, OutputFormat::Csv, &mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "label,value\nFood,12.5\n");
    }

    #[test]
    fn test_write_rows_rejects_text() {
        let mut buffer = Vec::new();
        assert!(write_rows::<CategoryPoint, _>(&[], OutputFormat::Text, &mut buffer).is_err());
    }
}
