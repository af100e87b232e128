//! CLI commands for the dashboard views

use std::io::Write;

use clap::Args;

use super::{
    load_ledger, open_output, write_rows, write_text, KindArg, OutputArgs, OutputFormat,
    RangeArgs, SnapshotArgs,
};
use crate::analytics::{DashboardOptions, DashboardView};
use crate::config::Settings;
use crate::display::{format_category_table, format_dashboard, format_net_series, format_trend};
use crate::error::LensResult;
use crate::ingest::RejectedRecord;
use crate::export::{
    export_dashboard_csv, export_dashboard_json, export_dashboard_yaml, BarPoint, CategoryPoint,
    DashboardExport, NetPoint,
};
use crate::models::TransactionType;

/// Arguments for `ledgerlens dashboard`
#[derive(Args, Debug, Clone)]
pub struct DashboardArgs {
    #[command(flatten)]
    pub snapshot: SnapshotArgs,

    #[command(flatten)]
    pub range: RangeArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Arguments for `ledgerlens categories`
#[derive(Args, Debug, Clone)]
pub struct CategoriesArgs {
    #[command(flatten)]
    pub snapshot: SnapshotArgs,

    #[command(flatten)]
    pub range: RangeArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Which side of the ledger to break down
    #[arg(short = 't', long = "type", value_enum, default_value = "out")]
    pub kind: KindArg,

    /// Show top N categories only
    #[arg(long)]
    pub top: Option<usize>,
}

/// Arguments for `ledgerlens trend`
#[derive(Args, Debug, Clone)]
pub struct TrendArgs {
    #[command(flatten)]
    pub snapshot: SnapshotArgs,

    #[command(flatten)]
    pub range: RangeArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Show the cumulative net balance instead of income/expense bars
    #[arg(long)]
    pub net: bool,
}

/// Load the snapshot and derive every view for the selected range
fn compute_view(
    settings: &Settings,
    snapshot: &SnapshotArgs,
    range: &RangeArgs,
) -> LensResult<(DashboardView, Vec<RejectedRecord>)> {
    let (transactions, rejected) = load_ledger(snapshot)?;
    let range = range.resolve(settings)?;
    let view = DashboardView::compute(&transactions, range, &DashboardOptions::from(settings));
    Ok((view, rejected))
}

/// Handle the full dashboard
pub fn handle_dashboard_command(settings: &Settings, args: DashboardArgs) -> LensResult<()> {
    let (view, rejected) = compute_view(settings, &args.snapshot, &args.range)?;
    let mut out = open_output(args.output.output.as_deref())?;

    match args.output.format {
        OutputFormat::Text => {
            write_text(&mut out, &format_dashboard(&view, &settings.currency_symbol))?
        }
        OutputFormat::Json => {
            export_dashboard_json(&DashboardExport::from_view(&view, &rejected), &mut out)?
        }
        OutputFormat::Yaml => {
            export_dashboard_yaml(&DashboardExport::from_view(&view, &rejected), &mut out)?
        }
        OutputFormat::Csv => export_dashboard_csv(&view, &mut out)?,
    }
    out.flush()?;

    if let Some(path) = &args.output.output {
        println!("Dashboard written to: {}", path.display());
    }
    Ok(())
}

/// Handle a single category breakdown
pub fn handle_categories_command(settings: &Settings, args: CategoriesArgs) -> LensResult<()> {
    let (view, _) = compute_view(settings, &args.snapshot, &args.range)?;
    let kind = TransactionType::from(args.kind);

    let buckets = match kind {
        TransactionType::In => &view.income_by_category,
        TransactionType::Out => &view.expenses_by_category,
    };

    let mut out = open_output(args.output.output.as_deref())?;
    match args.output.format {
        OutputFormat::Text => write_text(
            &mut out,
            &format_category_table(buckets, kind, &settings.currency_symbol, args.top),
        )?,
        format => {
            let shown = args.top.unwrap_or(buckets.len()).min(buckets.len());
            let rows: Vec<CategoryPoint> = buckets[..shown].iter().map(Into::into).collect();
            write_rows(&rows, format, &mut out)?;
        }
    }
    out.flush()?;
    Ok(())
}

/// Handle the monthly trend or the cumulative net series
pub fn handle_trend_command(settings: &Settings, args: TrendArgs) -> LensResult<()> {
    let (view, _) = compute_view(settings, &args.snapshot, &args.range)?;
    let symbol = &settings.currency_symbol;

    let mut out = open_output(args.output.output.as_deref())?;
    match (args.output.format, args.net) {
        (OutputFormat::Text, false) => {
            write_text(&mut out, &format_trend(&view.monthly_trend, symbol))?
        }
        (OutputFormat::Text, true) => {
            write_text(&mut out, &format_net_series(&view.monthly_net, symbol))?
        }
        (format, false) => {
            let rows: Vec<BarPoint> = view.monthly_trend.iter().map(Into::into).collect();
            write_rows(&rows, format, &mut out)?;
        }
        (format, true) => {
            let rows: Vec<NetPoint> = view.monthly_net.iter().map(Into::into).collect();
            write_rows(&rows, format, &mut out)?;
        }
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const SNAPSHOT: &str = r#"[
        {"id": 1, "accountId": 1, "amount": 100, "type": "IN", "date": "2024-01-15", "categoryName": "Salary"},
        {"id": 2, "accountId": 1, "amount": 40, "type": "OUT", "date": "2024-01-20", "categoryName": "Food"},
        {"id": 3, "accountId": 1, "amount": 60, "type": "OUT", "date": "2024-02-05", "categoryName": "Food"}
    ]"#;

    fn setup() -> (TempDir, SnapshotArgs) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ledger.json");
        fs::write(&path, SNAPSHOT).unwrap();
        let snapshot = SnapshotArgs {
            snapshot: path,
            strict: false,
        };
        (temp_dir, snapshot)
    }

    #[test]
    fn test_dashboard_json_to_file() {
        let (temp_dir, snapshot) = setup();
        let target = temp_dir.path().join("dashboard.json");

        let args = DashboardArgs {
            snapshot,
            range: RangeArgs {
                range: Some("2024-02".into()),
                ..Default::default()
            },
            output: OutputArgs {
                format: OutputFormat::Json,
                output: Some(target.clone()),
            },
        };
        handle_dashboard_command(&Settings::default(), args).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&target).unwrap()).unwrap();
        assert_eq!(json["totals"]["totalExpenses"], 60.0);
        assert_eq!(json["expenseComparison"]["percentageChange"], 50.0);
    }

    #[test]
    fn test_categories_top_csv() {
        let (temp_dir, snapshot) = setup();
        let target = temp_dir.path().join("categories.csv");

        let args = CategoriesArgs {
            snapshot,
            range: RangeArgs {
                all: true,
                ..Default::default()
            },
            output: OutputArgs {
                format: OutputFormat::Csv,
                output: Some(target.clone()),
            },
            kind: KindArg::Out,
            top: Some(1),
        };
        handle_categories_command(&Settings::default(), args).unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "label,value\nFood,100.0\n");
    }

    #[test]
    fn test_trend_net_yaml() {
        let (temp_dir, snapshot) = setup();
        let target = temp_dir.path().join("net.yaml");

        let args = TrendArgs {
            snapshot,
            range: RangeArgs::default(),
            output: OutputArgs {
                format: OutputFormat::Yaml,
                output: Some(target.clone()),
            },
            net: true,
        };
        handle_trend_command(&Settings::default(), args).unwrap();

        let text = fs::read_to_string(&target).unwrap();
        assert!(text.contains("2024-01-31"));
        assert!(text.contains("monthlyNet: -60.0"));
    }
}
