//! JSON Export functionality
//!
//! Exports a dashboard report to JSON with schema versioning, for
//! external chart renderers.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

use crate::charts::ChartSpec;
use crate::error::{DashboardError, DashboardResult};
use crate::reports::DashboardReport;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Versioned wrapper around an exported report
#[derive(Debug, Clone, Serialize)]
pub struct DashboardExport<'a> {
    /// Schema version for compatibility checking
    pub schema_version: &'static str,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: &'static str,

    pub report: &'a DashboardReport,
}

impl<'a> DashboardExport<'a> {
    pub fn new(report: &'a DashboardReport) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION,
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION"),
            report,
        }
    }
}

/// Export a dashboard report to JSON
pub fn export_report_json<W: Write>(
    report: &DashboardReport,
    writer: &mut W,
    pretty: bool,
) -> DashboardResult<()> {
    let export = DashboardExport::new(report);

    let result = if pretty {
        serde_json::to_writer_pretty(&mut *writer, &export)
    } else {
        serde_json::to_writer(&mut *writer, &export)
    };
    result.map_err(|e| DashboardError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| DashboardError::Export(e.to_string()))?;

    Ok(())
}

/// Export a single chart description to JSON
pub fn export_chart_json<W: Write>(chart: &ChartSpec, writer: &mut W) -> DashboardResult<()> {
    serde_json::to_writer_pretty(&mut *writer, chart)
        .map_err(|e| DashboardError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| DashboardError::Export(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::{select_chart_kind, ChartKind};
    use crate::config::Settings;
    use crate::models::{FilterSelection, Money, Table};
    use crate::services::{load_csv, ImportOptions};

    #[test]
    fn test_export_report_json() {
        let data = "\
CATEGORY,COUNTRY,CLIENTID,GROSSSALES,NETSALES,PROFITAFTERTAX,RETAINEDEARNINGS,DIVIDEND,CSAT
A,Kenya,1,10,8,5,2,1,4
";
        let dataset = load_csv(data.as_bytes(), &ImportOptions::default()).unwrap();
        let selection = FilterSelection::select_all(&dataset).unwrap();
        let report =
            DashboardReport::generate(&dataset, &selection, None, &Settings::default()).unwrap();

        let mut output = Vec::new();
        export_report_json(&report, &mut output, true).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();

        assert_eq!(value["schema_version"], EXPORT_SCHEMA_VERSION);
        assert_eq!(value["report"]["metrics"]["total_gross_sales"], 10.0);
        assert_eq!(value["report"]["sales"]["charts"][0]["kind"], "bar");
    }

    #[test]
    fn test_export_chart_json() {
        let mut table = Table::new(["Metric", "Amount"]);
        table
            .push_row(vec!["DIVIDEND".into(), Money::from_cents(250).into()])
            .unwrap();
        let chart =
            select_chart_kind(ChartKind::Bar, &table, "Metric", &["Amount"], "Overview").unwrap();

        let mut output = Vec::new();
        export_chart_json(&chart, &mut output).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();

        assert_eq!(value["kind"], "bar");
        assert_eq!(value["series"][0]["values"][0], 2.5);
    }
}
