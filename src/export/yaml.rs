//! YAML Export functionality
//!
//! Exports a dashboard report to YAML for human-readable review.

use std::io::Write;

use crate::error::{DashboardError, DashboardResult};
use crate::export::json::DashboardExport;
use crate::reports::DashboardReport;

/// Export a dashboard report to YAML
pub fn export_report_yaml<W: Write>(
    report: &DashboardReport,
    writer: &mut W,
) -> DashboardResult<()> {
    let export = DashboardExport::new(report);

    writeln!(writer, "# Project Financial Analysis Report")
        .map_err(|e| DashboardError::Export(e.to_string()))?;
    writeln!(writer, "# Generated: {}", export.exported_at)
        .map_err(|e| DashboardError::Export(e.to_string()))?;
    writeln!(
        writer,
        "# Rows: {} of {}",
        report.filtered_rows(),
        report.total_rows
    )
    .map_err(|e| DashboardError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| DashboardError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| DashboardError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::models::FilterSelection;
    use crate::services::{load_csv, ImportOptions};

    #[test]
    fn test_export_report_yaml() {
        let data = "\
CATEGORY,COUNTRY,CLIENTID,GROSSSALES,NETSALES,PROFITAFTERTAX,RETAINEDEARNINGS,DIVIDEND,CSAT
A,Kenya,1,10,8,5,2,1,4
B,Ghana,2,20,18,6,3,1,5
";
        let dataset = load_csv(data.as_bytes(), &ImportOptions::default()).unwrap();
        let selection = FilterSelection::select_all(&dataset)
            .unwrap()
            .with_countries(["Ghana"]);
        let report =
            DashboardReport::generate(&dataset, &selection, None, &Settings::default()).unwrap();

        let mut output = Vec::new();
        export_report_yaml(&report, &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();

        assert!(text.starts_with("# Project Financial Analysis Report"));
        assert!(text.contains("# Rows: 1 of 2"));

        let body: serde_yaml::Value = serde_yaml::from_str(&text).unwrap();
        assert_eq!(body["report"]["total_rows"].as_u64(), Some(2));
    }
}
