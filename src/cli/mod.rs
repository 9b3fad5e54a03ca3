//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod chart;
pub mod export;
pub mod filters;
pub mod report;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::{DashboardError, DashboardResult};

pub use chart::{handle_chart_command, handle_histogram_command, ChartArgs, HistogramArgs};
pub use export::{handle_export_command, ExportArgs, ExportFormat};
pub use filters::{handle_filters_command, handle_overview_command, FilterArgs, SourceArgs};
pub use report::{handle_report_command, ReportArgs, ReportFormat};

/// Open `path` for writing, or stdout when no path is given
pub fn open_output(path: Option<&Path>) -> DashboardResult<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                DashboardError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout()))),
    }
}
