//! CSV export functionality
//!
//! The dashboard is flattened into `section,label,type,value,share` rows so a
//! spreadsheet can pivot on the section column.

use std::io::Write;

use crate::analytics::categories::buckets_total;
use crate::analytics::{CategoryBucket, DashboardView};
use crate::error::{LensError, LensResult};
use crate::models::{Transaction, TransactionType};

fn export_err(e: impl std::fmt::Display) -> LensError {
    LensError::Export(e.to_string())
}

fn write_buckets<W: Write>(
    writer: &mut ::csv::Writer<W>,
    buckets: &[CategoryBucket],
    kind: TransactionType,
) -> LensResult<()> {
    let grand_total = buckets_total(buckets);
    for bucket in buckets {
        let value = format!("{:.2}", bucket.total.to_decimal());
        let share = format!("{:.2}", bucket.percentage_of(grand_total));
        writer
            .write_record([
                "category",
                bucket.label.as_str(),
                kind.code(),
                value.as_str(),
                share.as_str(),
            ])
            .map_err(export_err)?;
    }
    Ok(())
}

/// Export every dashboard view as flat CSV rows
pub fn export_dashboard_csv<W: Write>(view: &DashboardView, writer: W) -> LensResult<()> {
    let mut writer = ::csv::Writer::from_writer(writer);

    writer
        .write_record(["section", "label", "type", "value", "share"])
        .map_err(export_err)?;

    let totals = [
        ("totalIncome", view.totals.total_income),
        ("totalExpenses", view.totals.total_expenses),
        ("netBalance", view.totals.net_balance),
    ];
    for (label, amount) in totals {
        let value = format!("{:.2}", amount.to_decimal());
        writer
            .write_record(["totals", label, "", value.as_str(), ""])
            .map_err(export_err)?;
    }

    write_buckets(&mut writer, &view.income_by_category, TransactionType::In)?;
    write_buckets(&mut writer, &view.expenses_by_category, TransactionType::Out)?;

    for bar in &view.monthly_trend {
        let month = bar.month.to_string();
        let value = format!("{:.2}", bar.total.to_decimal());
        writer
            .write_record(["trend", month.as_str(), bar.kind.code(), value.as_str(), ""])
            .map_err(export_err)?;
    }

    for point in &view.monthly_net {
        let label = point.month_end.format("%Y-%m-%d").to_string();
        let value = format!("{:.2}", point.cumulative_balance.to_decimal());
        writer
            .write_record(["net", label.as_str(), "", value.as_str(), ""])
            .map_err(export_err)?;
    }

    if let Some(cmp) = &view.expense_comparison {
        let value = format!("{:.2}", cmp.percent_change);
        writer
            .write_record(["comparison", cmp.label.as_str(), "OUT", value.as_str(), ""])
            .map_err(export_err)?;
    }

    writer.flush().map_err(export_err)?;
    Ok(())
}

/// Export a list of transactions in the snapshot column layout
pub fn export_transactions_csv<W: Write>(transactions: &[Transaction], writer: W) -> LensResult<()> {
    let mut writer = ::csv::Writer::from_writer(writer);

    writer
        .write_record([
            "id",
            "accountId",
            "accountName",
            "amount",
            "type",
            "date",
            "categoryName",
            "description",
            "transferId",
        ])
        .map_err(export_err)?;

    for txn in transactions {
        let amount = txn.amount.to_string();
        let date = txn.date.format("%Y-%m-%d").to_string();
        writer
            .write_record([
                txn.id.as_str(),
                txn.account_id.as_str(),
                txn.account_name.as_deref().unwrap_or(""),
                amount.as_str(),
                txn.kind.code(),
                date.as_str(),
                txn.category_name.as_deref().unwrap_or(""),
                txn.description.as_str(),
                txn.transfer_id.as_ref().map(|t| t.as_str()).unwrap_or(""),
            ])
            .map_err(export_err)?;
    }

    writer.flush().map_err(export_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::test_support::{expense, scenario};
    use crate::analytics::DashboardOptions;
    use crate::ingest::{load_from_reader, SnapshotFormat};
    use crate::models::DateRange;

    #[test]
    fn test_dashboard_csv() {
        let range = DateRange::parse("2024-02").unwrap();
        let view = DashboardView::compute(&scenario(), Some(range), &DashboardOptions::default());

        let mut buffer = Vec::new();
        export_dashboard_csv(&view, &mut buffer).unwrap();
        let csv = String::from_utf8(buffer).unwrap();

        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("section,label,type,value,share"));
        assert!(csv.contains("totals,totalExpenses,,60.00,"));
        assert!(csv.contains("category,Food,OUT,60.00,100.00"));
        assert!(csv.contains("trend,2024-02,IN,0.00,"));
        assert!(csv.contains("net,2024-02-29,,-60.00,"));
        assert!(csv.contains("comparison,previous period,OUT,50.00,"));
    }

    #[test]
    fn test_labels_with_commas_are_quoted() {
        let txns = vec![expense("1", 5_00, "2024-01-01").with_category("Food, drinks")];
        let view = DashboardView::compute(&txns, None, &DashboardOptions::default());

        let mut buffer = Vec::new();
        export_dashboard_csv(&view, &mut buffer).unwrap();
        let csv = String::from_utf8(buffer).unwrap();
        assert!(csv.contains("\"Food, drinks\""));
    }

    #[test]
    fn test_transactions_csv_reloads() {
        let txns = scenario();
        let mut buffer = Vec::new();
        export_transactions_csv(&txns, &mut buffer).unwrap();

        let report = load_from_reader(buffer.as_slice(), SnapshotFormat::Csv).unwrap();
        assert!(report.is_clean());
        assert_eq!(report.transactions, txns);
    }
}
