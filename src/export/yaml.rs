//! YAML export of the dashboard

use std::io::Write;

use crate::error::{LensError, LensResult};
use crate::export::json::DashboardExport;

/// Write the dashboard as YAML, preceded by a comment header
pub fn export_dashboard_yaml<W: Write>(
    export: &DashboardExport,
    writer: &mut W,
) -> LensResult<()> {
    let range = match &export.range {
        Some(range) => format!("{}..{}", range.start, range.end),
        None => "all transactions".to_string(),
    };

    writeln!(writer, "# ledgerlens dashboard export")
        .and_then(|_| writeln!(writer, "# Generated: {}", export.generated_at))
        .and_then(|_| writeln!(writer, "# Range: {}", range))
        .and_then(|_| writeln!(writer))
        .map_err(|e| LensError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, export).map_err(|e| LensError::Export(e.to_string()))?;

    Ok(())
}

/// Read back a YAML dashboard export
pub fn import_from_yaml(yaml_str: &str) -> LensResult<DashboardExport> {
    Ok(serde_yaml::from_str(yaml_str)?)
}
