//! CLI commands for single charts
//!
//! `chart` groups the filtered rows and builds one chart of the chosen
//! kind; `histogram` buckets one column of the filtered rows.

use clap::{Args, ValueEnum};
use std::io::Write;
use std::path::PathBuf;

use super::filters::{FilterArgs, SourceArgs};
use super::open_output;
use crate::charts::{histogram_chart, select_chart_kind, ChartKind, ChartSpec};
use crate::config::Settings;
use crate::display::format_chart;
use crate::error::{DashboardError, DashboardResult};
use crate::export::export_chart_json;
use crate::models::{Column, Dimension, Measure};
use crate::services::aggregate_sum;

/// Chart output formats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ChartFormat {
    /// Chart description as JSON
    #[default]
    Json,
    /// Chart description as YAML
    Yaml,
    /// Text bars
    Text,
}

#[derive(Args, Debug, Clone)]
pub struct ChartArgs {
    /// Chart kind: Bar, Pie, Line or Histogram
    #[arg(value_name = "KIND")]
    pub kind: ChartKind,

    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub filters: FilterArgs,

    /// Field to group by: category, country or client
    #[arg(short, long, default_value = "category")]
    pub group: Dimension,

    /// Money column to sum (repeatable), e.g. gross-sales
    #[arg(short, long = "measure", required = true)]
    pub measures: Vec<Measure>,

    /// Chart title
    #[arg(short, long)]
    pub title: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = ChartFormat::Json)]
    pub format: ChartFormat,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct HistogramArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub filters: FilterArgs,

    /// Column to bucket
    #[arg(long, default_value = "CSAT")]
    pub column: String,

    /// Number of buckets for numeric columns (defaults to the configured value)
    #[arg(short, long)]
    pub bins: Option<usize>,

    /// Output format
    #[arg(long, value_enum, default_value_t = ChartFormat::Text)]
    pub format: ChartFormat,
}

/// Handle the `chart` command
pub fn handle_chart_command(settings: &Settings, args: &ChartArgs) -> DashboardResult<()> {
    let (_, _, filtered) = args.filters.apply(&args.source, settings)?;

    let table = aggregate_sum(&filtered, args.group, &args.measures)?.to_table();
    let y_fields: Vec<&str> = args.measures.iter().map(|m| m.column().name()).collect();
    let title = args.title.clone().unwrap_or_else(|| {
        format!("{} by {}", y_fields.join(" and "), args.group.label())
    });

    let chart =
        select_chart_kind(args.kind, &table, args.group.column().name(), &y_fields, &title)?;
    let mut writer = open_output(args.output.as_deref())?;
    write_chart(&chart, args.format, &mut writer)
}

/// Handle the `histogram` command
pub fn handle_histogram_command(settings: &Settings, args: &HistogramArgs) -> DashboardResult<()> {
    let bins = args.bins.unwrap_or(settings.histogram_bins);
    if bins == 0 {
        return Err(DashboardError::Validation("--bins must be at least 1".into()));
    }

    let (_, _, filtered) = args.filters.apply(&args.source, settings)?;
    let title = if args.column == Column::Csat.name() {
        "Customer Satisfaction Score Distribution".to_string()
    } else {
        format!("{} Distribution", args.column)
    };

    let chart = histogram_chart(&filtered.to_table(), &args.column, bins, &title)?;
    let mut writer = open_output(None)?;
    write_chart(&chart, args.format, &mut writer)
}

fn write_chart<W: Write>(
    chart: &ChartSpec,
    format: ChartFormat,
    writer: &mut W,
) -> DashboardResult<()> {
    match format {
        ChartFormat::Json => export_chart_json(chart, writer)?,
        ChartFormat::Yaml => serde_yaml::to_writer(&mut *writer, chart)?,
        ChartFormat::Text => write!(writer, "{}", format_chart(chart))?,
    }
    writer.flush()?;
    Ok(())
}
