//! Export module for ledgerlens
//!
//! Writes the dashboard as chart-ready data in several formats:
//! - JSON: camelCase DTOs for chart front-ends
//! - YAML: the same document, human-readable
//! - CSV: one flat row per chart point (spreadsheet-compatible)
//!
//! Amounts leave the crate as decimal currency units here and nowhere else.

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::{export_dashboard_csv, export_transactions_csv};
pub use self::json::{
    export_dashboard_json, BarPoint, CategoryPoint, ComparisonPoint, DashboardExport, NetPoint,
    ExportRange, TotalsPoint, EXPORT_SCHEMA_VERSION,
};
pub use self::yaml::export_dashboard_yaml;
