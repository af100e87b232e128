//! JSON export of the dashboard
//!
//! The DTOs mirror what chart components consume: decimal values, month keys
//! as "YYYY-MM", net-series labels as month-end dates.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::analytics::{
    CategoryBucket, DashboardView, ExpenseComparison, MonthlyBar, MonthlyNetPoint, Totals,
};
use crate::error::{LensError, LensResult};
use crate::ingest::RejectedRecord;
use crate::models::DateRange;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalsPoint {
    pub total_income: f64,
    pub total_expenses: f64,
    pub net_balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryPoint {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarPoint {
    /// "YYYY-MM"
    pub month: String,
    /// "IN" or "OUT"
    #[serde(rename = "type")]
    pub kind: String,
    pub value: f64,
}

/// One point of the cumulative net series; `value` is the running balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetPoint {
    /// Month-end date, "YYYY-MM-DD"
    pub label: String,
    pub value: f64,
    pub monthly_net: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonPoint {
    pub percentage_change: f64,
    pub period: String,
}

/// The dashboard as a self-describing document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub generated_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// Selected range; null means every transaction
    pub range: Option<ExportRange>,

    pub transaction_count: usize,
    pub totals: TotalsPoint,
    pub income_by_category: Vec<CategoryPoint>,
    pub expenses_by_category: Vec<CategoryPoint>,
    pub monthly_trend: Vec<BarPoint>,
    pub monthly_net: Vec<NetPoint>,
    pub expense_comparison: Option<ComparisonPoint>,

    /// Records skipped while loading the snapshot
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rejected: Vec<RejectedRecord>,
}

impl From<&DateRange> for ExportRange {
    fn from(range: &DateRange) -> Self {
        Self {
            start: range.start(),
            end: range.end(),
        }
    }
}

impl From<&Totals> for TotalsPoint {
    fn from(totals: &Totals) -> Self {
        Self {
            total_income: totals.total_income.to_decimal(),
            total_expenses: totals.total_expenses.to_decimal(),
            net_balance: totals.net_balance.to_decimal(),
        }
    }
}

impl From<&CategoryBucket> for CategoryPoint {
    fn from(bucket: &CategoryBucket) -> Self {
        Self {
            label: bucket.label.clone(),
            value: bucket.total.to_decimal(),
        }
    }
}

impl From<&MonthlyBar> for BarPoint {
    fn from(bar: &MonthlyBar) -> Self {
        Self {
            month: bar.month.to_string(),
            kind: bar.kind.code().to_string(),
            value: bar.total.to_decimal(),
        }
    }
}

impl From<&MonthlyNetPoint> for NetPoint {
    fn from(point: &MonthlyNetPoint) -> Self {
        Self {
            label: point.month_end.format("%Y-%m-%d").to_string(),
            value: point.cumulative_balance.to_decimal(),
            monthly_net: point.monthly_net.to_decimal(),
        }
    }
}

impl From<&ExpenseComparison> for ComparisonPoint {
    fn from(cmp: &ExpenseComparison) -> Self {
        Self {
            percentage_change: cmp.percent_change,
            period: cmp.label.clone(),
        }
    }
}

impl DashboardExport {
    /// Build the export document for a computed view
    pub fn from_view(view: &DashboardView, rejected: &[RejectedRecord]) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            generated_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            range: view.range.as_ref().map(ExportRange::from),
            transaction_count: view.transaction_count,
            totals: TotalsPoint::from(&view.totals),
            income_by_category: view.income_by_category.iter().map(Into::into).collect(),
            expenses_by_category: view.expenses_by_category.iter().map(Into::into).collect(),
            monthly_trend: view.monthly_trend.iter().map(Into::into).collect(),
            monthly_net: view.monthly_net.iter().map(Into::into).collect(),
            expense_comparison: view.expense_comparison.as_ref().map(Into::into),
            rejected: rejected.to_vec(),
        }
    }
}

/// Write the dashboard as pretty-printed JSON
pub fn export_dashboard_json<W: Write>(
    export: &DashboardExport,
    writer: &mut W,
) -> LensResult<()> {
    serde_json::to_writer_pretty(&mut *writer, export)
        .map_err(|e| LensError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| LensError::Export(e.to_string()))?;
    Ok(())
}
