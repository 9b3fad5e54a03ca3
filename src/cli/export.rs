//! CLI command for the report download
//!
//! Writes the filtered table as a workbook (the downloadable report) or
//! as CSV.

use clap::{Args, ValueEnum};
use std::io::Write;
use std::path::PathBuf;

use super::filters::{FilterArgs, SourceArgs};
use super::open_output;
use crate::config::Settings;
use crate::error::{DashboardError, DashboardResult};
use crate::export::{encode_report, export_dataset_csv, read_report_path, XLSX_MIME};

/// Export format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// Excel workbook with a single `Report` sheet
    #[default]
    Xlsx,
    /// Comma-separated values
    Csv,
}

#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub filters: FilterArgs,

    /// Export format
    #[arg(long, value_enum, default_value_t = ExportFormat::Xlsx)]
    pub format: ExportFormat,

    /// Output file (xlsx defaults to the configured report file name; csv defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Re-read the written workbook and check its header and row count
    #[arg(long)]
    pub verify: bool,
}

/// Handle the `export` command
pub fn handle_export_command(settings: &Settings, args: &ExportArgs) -> DashboardResult<()> {
    let (_, _, filtered) = args.filters.apply(&args.source, settings)?;

    match args.format {
        ExportFormat::Xlsx => {
            let output = args
                .output
                .clone()
                .unwrap_or_else(|| PathBuf::from(&settings.report_file_name));

            let bytes = encode_report(&filtered)?;
            std::fs::write(&output, &bytes).map_err(|e| {
                DashboardError::Export(format!(
                    "Failed to create file {}: {}",
                    output.display(),
                    e
                ))
            })?;
            println!(
                "Exported {} projects to: {} ({})",
                filtered.len(),
                output.display(),
                XLSX_MIME
            );

            if args.verify {
                let read_back = read_report_path(&output)?;
                if read_back.headers() != filtered.headers() || read_back.len() != filtered.len() {
                    return Err(DashboardError::Export(format!(
                        "{} holds {} rows, expected {}",
                        output.display(),
                        read_back.len(),
                        filtered.len()
                    )));
                }
                println!("Verified {} rows.", read_back.len());
            }
        }
        ExportFormat::Csv => {
            if args.verify {
                return Err(DashboardError::Validation(
                    "--verify applies to xlsx exports only".into(),
                ));
            }
            let mut writer = open_output(args.output.as_deref())?;
            export_dataset_csv(&filtered, &mut writer)?;
            writer
                .flush()
                .map_err(|e| DashboardError::Export(e.to_string()))?;
            if let Some(path) = &args.output {
                println!("Exported {} projects to: {}", filtered.len(), path.display());
            }
        }
    }

    Ok(())
}
