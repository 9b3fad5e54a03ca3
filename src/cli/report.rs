//! CLI command for the analysis page
//!
//! Renders the dashboard report to the terminal or exports it.

use clap::{Args, ValueEnum};
use std::io::Write;
use std::path::PathBuf;

use super::filters::{FilterArgs, SourceArgs};
use super::open_output;
use crate::charts::ChartKind;
use crate::config::Settings;
use crate::error::{DashboardError, DashboardResult};
use crate::export::{export_report_json, export_report_yaml};
use crate::reports::DashboardReport;

/// Report output formats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Terminal layout with text charts
    #[default]
    Text,
    /// Chart data and metrics, one value per line
    Csv,
    /// Full report with chart descriptions
    Json,
    /// Full report, human-readable
    Yaml,
}

#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub filters: FilterArgs,

    /// Draw every section as this chart kind (Bar, Pie, Line, Histogram)
    #[arg(long, value_name = "KIND")]
    pub chart: Option<ChartKind>,

    /// Output format
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Handle the `report` command
pub fn handle_report_command(settings: &Settings, args: &ReportArgs) -> DashboardResult<()> {
    let dataset = args.source.load(settings)?;
    let selection = args.filters.to_selection(&dataset, &settings.date_format)?;
    let report = DashboardReport::generate(&dataset, &selection, args.chart, settings)?;
    if report.is_empty() {
        eprintln!("Notice: {}", DashboardError::EmptyFilterResult);
    }

    let mut writer = open_output(args.output.as_deref())?;
    match args.format {
        ReportFormat::Text => {
            write!(writer, "{}", report.format_terminal())
                .map_err(|e| DashboardError::Export(e.to_string()))?;
        }
        ReportFormat::Csv => report.export_csv(&mut writer)?,
        ReportFormat::Json => export_report_json(&report, &mut writer, true)?,
        ReportFormat::Yaml => export_report_yaml(&report, &mut writer)?,
    }
    writer
        .flush()
        .map_err(|e| DashboardError::Export(e.to_string()))?;

    if let Some(path) = &args.output {
        println!("Report written to: {}", path.display());
    }
    Ok(())
}
