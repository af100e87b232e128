//! CLI command for searching the ledger

use std::io::Write;

use clap::Args;

use super::{
    load_ledger, open_output, write_rows, write_text, KindArg, OutputArgs, OutputFormat,
    SnapshotArgs,
};
use crate::analytics::LedgerFilter;
use crate::config::Settings;
use crate::display::format_transaction_register;
use crate::error::{LensError, LensResult};
use crate::export::export_transactions_csv;
use crate::models::period::parse_date;

/// Arguments for `ledgerlens search`
#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    #[command(flatten)]
    pub snapshot: SnapshotArgs,

    /// Text to look for in description, account or category
    pub query: Option<String>,

    /// Only show this direction (repeatable)
    #[arg(short = 't', long = "type", value_enum)]
    pub kinds: Vec<KindArg>,

    /// Earliest date (YYYY-MM-DD, inclusive)
    #[arg(short, long)]
    pub start: Option<String>,

    /// Latest date (YYYY-MM-DD, inclusive)
    #[arg(short, long)]
    pub end: Option<String>,

    /// Number of transactions to show
    #[arg(short, long)]
    pub limit: Option<usize>,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl SearchArgs {
    /// Build the ledger filter from the arguments
    pub fn filter(&self) -> LensResult<LedgerFilter> {
        let date = |value: &Option<String>| {
            value
                .as_deref()
                .map(|s| {
                    parse_date(s).map_err(|_| {
                        LensError::Validation(format!("Invalid date format: {}. Use YYYY-MM-DD", s))
                    })
                })
                .transpose()
        };

        Ok(LedgerFilter {
            query: self.query.clone(),
            kinds: self.kinds.iter().copied().map(Into::into).collect(),
            start: date(&self.start)?,
            end: date(&self.end)?,
        })
    }
}

/// Handle ledger search
pub fn handle_search_command(settings: &Settings, args: SearchArgs) -> LensResult<()> {
    let filter = args.filter()?;
    let (transactions, _) = load_ledger(&args.snapshot)?;

    let mut hits = filter.apply(&transactions);
    tracing::info!(matched = hits.len(), total = transactions.len(), "search complete");
    if let Some(limit) = args.limit {
        hits.truncate(limit);
    }

    let mut out = open_output(args.output.output.as_deref())?;
    match args.output.format {
        OutputFormat::Text => write_text(
            &mut out,
            &format_transaction_register(&hits, &settings.currency_symbol),
        )?,
        OutputFormat::Csv => export_transactions_csv(&hits, &mut out)?,
        format => write_rows(&hits, format, &mut out)?,
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionType;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn args(query: Option<&str>) -> SearchArgs {
        SearchArgs {
            snapshot: SnapshotArgs {
                snapshot: PathBuf::from("unused.json"),
                strict: false,
            },
            query: query.map(String::from),
            kinds: vec![KindArg::Out],
            start: Some("2024-01-01".into()),
            end: None,
            limit: None,
            output: OutputArgs::default(),
        }
    }

    #[test]
    fn test_filter_from_args() {
        let filter = args(Some("rent")).filter().unwrap();
        assert_eq!(filter.query.as_deref(), Some("rent"));
        assert_eq!(filter.kinds, vec![TransactionType::Out]);
        assert!(filter.start.is_some());
        assert!(filter.end.is_none());
    }

    #[test]
    fn test_bad_date_rejected() {
        let mut bad = args(None);
        bad.end = Some("yesterday".into());
        assert!(bad.filter().unwrap_err().is_validation());
    }

    #[test]
    fn test_search_json_output() {
        let temp_dir = TempDir::new().unwrap();
        let snapshot = temp_dir.path().join("ledger.json");
        fs::write(
            &snapshot,
            r#"[
                {"id": 1, "accountId": 1, "amount": 900, "type": "OUT", "date": "2024-01-01", "description": "Rent January"},
                {"id": 2, "accountId": 1, "amount": 900, "type": "OUT", "date": "2024-02-01", "description": "Rent February"},
                {"id": 3, "accountId": 1, "amount": 12, "type": "OUT", "date": "2024-02-03", "description": "Coffee"}
            ]"#,
        )
        .unwrap();
        let target = temp_dir.path().join("hits.json");

        let mut search = args(Some("rent"));
        search.snapshot.snapshot = snapshot;
        search.limit = Some(1);
        search.output = OutputArgs {
            format: OutputFormat::Json,
            output: Some(target.clone()),
        };
        handle_search_command(&Settings::default(), search).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&target).unwrap()).unwrap();
        let hits = json.as_array().unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0]["description"], "Rent February");
    }
}
