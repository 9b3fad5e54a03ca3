//! Export module for the project dashboard
//!
//! Provides export of the filtered data and the analysis page:
//! - XLSX: the filtered table as a single-sheet workbook report
//! - CSV: the filtered table as delimited text
//! - JSON/YAML: the full dashboard report with chart descriptions

pub mod csv;
pub mod json;
pub mod xlsx;
pub mod yaml;

pub use self::csv::export_dataset_csv;
pub use json::{export_chart_json, export_report_json, DashboardExport, EXPORT_SCHEMA_VERSION};
pub use xlsx::{
    encode_report, read_report_bytes, read_report_path, ReportCache, REPORT_FILE_NAME,
    REPORT_SHEET_NAME, XLSX_MIME,
};
pub use yaml::export_report_yaml;
