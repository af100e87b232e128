//! CLI command for finding the other leg of a transfer

use std::io::Write;

use clap::Args;

use super::{
    load_ledger, open_output, write_rows, write_text, OutputArgs, OutputFormat, SnapshotArgs,
};
use crate::analytics::candidates_for;
use crate::config::Settings;
use crate::display::format_transfer_candidates;
use crate::error::{LensError, LensResult};
use crate::export::export_transactions_csv;
use crate::models::{AccountId, Transaction, TransactionId};

/// Arguments for `ledgerlens transfers`
#[derive(Args, Debug, Clone)]
pub struct TransfersArgs {
    #[command(flatten)]
    pub snapshot: SnapshotArgs,

    /// Id of the transaction to find a counterpart for
    pub source: String,

    /// Only consider transactions of this account
    #[arg(short, long)]
    pub account: Option<String>,

    /// Maximum days between the two legs (default from settings)
    #[arg(short, long)]
    pub window: Option<i64>,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Handle transfer candidate lookup
pub fn handle_transfers_command(settings: &Settings, args: TransfersArgs) -> LensResult<()> {
    let window = args.window.unwrap_or(settings.transfer_match_window_days);
    if window < 0 {
        return Err(LensError::Validation(format!(
            "Window must not be negative (got {})",
            window
        )));
    }

    let (transactions, _) = load_ledger(&args.snapshot)?;
    let source_id = TransactionId::new(args.source.trim());
    let account = args.account.as_deref().map(AccountId::from);

    let candidates = candidates_for(&transactions, &source_id, account.as_ref(), window)?;
    tracing::info!(source = %source_id, window, found = candidates.len(), "transfer candidates");

    let mut out = open_output(args.output.output.as_deref())?;
    match args.output.format {
        OutputFormat::Text => {
            // candidates_for has already confirmed the source exists
            let source = transactions
                .iter()
                .find(|t| t.id == source_id)
                .ok_or_else(|| LensError::transaction_not_found(source_id.as_str()))?;
            write_text(
                &mut out,
                &format_transfer_candidates(source, &candidates, &settings.currency_symbol),
            )?
        }
        OutputFormat::Csv => {
            let rows: Vec<Transaction> =
                candidates.iter().map(|c| c.transaction.clone()).collect();
            export_transactions_csv(&rows, &mut out)?
        }
        format => write_rows(&candidates, format, &mut out)?,
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const LEDGER: &str = r#"[
        {"id": 10, "accountId": 1, "amount": 250, "type": "OUT", "date": "2024-03-01"},
        {"id": 11, "accountId": 2, "accountName": "Savings", "amount": 250, "type": "IN", "date": "2024-03-03"},
        {"id": 12, "accountId": 3, "amount": 250, "type": "IN", "date": "2024-03-09"}
    ]"#;

    fn args(temp_dir: &TempDir, source: &str) -> TransfersArgs {
        let snapshot = temp_dir.path().join("ledger.json");
        fs::write(&snapshot, LEDGER).unwrap();
        TransfersArgs {
            snapshot: SnapshotArgs {
                snapshot,
                strict: false,
            },
            source: source.to_string(),
            account: None,
            window: None,
            output: OutputArgs {
                format: OutputFormat::Json,
                output: Some(temp_dir.path().join("out.json")),
            },
        }
    }

    #[test]
    fn test_window_from_settings() {
        let temp_dir = TempDir::new().unwrap();
        handle_transfers_command(&Settings::default(), args(&temp_dir, "10")).unwrap();

        let json: serde_json::Value = serde_json::from_str(
            &fs::read_to_string(temp_dir.path().join("out.json")).unwrap(),
        )
        .unwrap();
        let found = json.as_array().unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0]["transaction"]["id"], "11");
        assert_eq!(found[0]["daysApart"], 2);
    }

    #[test]
    fn test_wider_window() {
        let temp_dir = TempDir::new().unwrap();
        let mut wide = args(&temp_dir, "10");
        wide.window = Some(10);
        handle_transfers_command(&Settings::default(), wide).unwrap();

        let json: serde_json::Value = serde_json::from_str(
            &fs::read_to_string(temp_dir.path().join("out.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(json.as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_unknown_source() {
        let temp_dir = TempDir::new().unwrap();
        let err = handle_transfers_command(&Settings::default(), args(&temp_dir, "99")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_negative_window() {
        let temp_dir = TempDir::new().unwrap();
        let mut bad = args(&temp_dir, "10");
        bad.window = Some(-1);
        let err = handle_transfers_command(&Settings::default(), bad).unwrap_err();
        assert!(err.is_validation());
    }
}
