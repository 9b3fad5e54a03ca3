//! Shared CLI arguments for the uploaded file and the filter sidebar
//!
//! Also handles the `filters` and `overview` commands, which show the
//! filter choices and the filtered table.

use chrono::NaiveDate;
use clap::Args;
use std::path::PathBuf;

use crate::config::Settings;
use crate::display::{format_filter_values, format_table};
use crate::error::{DashboardError, DashboardResult};
use crate::models::{Dataset, DateRange, FilterSelection};
use crate::services::{ensure_rows, filter, load_csv_path, ImportOptions};

/// Environment variable read when `--file` is not given
pub const FILE_ENV: &str = "PROJDASH_FILE";

/// The uploaded CSV file
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// CSV file of project data
    #[arg(short, long, env = FILE_ENV, value_name = "CSV")]
    pub file: Option<PathBuf>,
}

impl SourceArgs {
    /// Load the uploaded file, or fail with `NoFileUploaded`
    pub fn load(&self, settings: &Settings) -> DashboardResult<Dataset> {
        let options = ImportOptions::new().with_delimiter(settings.csv_delimiter);
        load_csv_path(self.file.as_deref(), &options)
    }
}

/// Filter selection; a field left out accepts every value in the file
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Keep only this category (repeatable)
    #[arg(short = 'c', long = "category", value_name = "NAME")]
    pub categories: Vec<String>,

    /// Keep only this country (repeatable)
    #[arg(long = "country", value_name = "NAME")]
    pub countries: Vec<String>,

    /// Keep only this client ID (repeatable)
    #[arg(long = "client", value_name = "ID")]
    pub clients: Vec<String>,

    /// First project date to keep (inclusive)
    #[arg(long, value_name = "DATE", requires = "to")]
    pub from: Option<String>,

    /// Last project date to keep (inclusive)
    #[arg(long, value_name = "DATE", requires = "from")]
    pub to: Option<String>,
}

impl FilterArgs {
    /// Build the selection, starting from every value present in `dataset`
    pub fn to_selection(
        &self,
        dataset: &Dataset,
        date_format: &str,
    ) -> DashboardResult<FilterSelection> {
        let mut selection = FilterSelection::select_all(dataset)?;
        if !self.categories.is_empty() {
            selection = selection.with_categories(self.categories.iter().cloned());
        }
        if !self.countries.is_empty() {
            selection = selection.with_countries(self.countries.iter().cloned());
        }
        if !self.clients.is_empty() {
            selection = selection.with_clients(self.clients.iter().cloned());
        }

        let range = match (&self.from, &self.to) {
            (Some(from), Some(to)) => Some(DateRange::new(
                parse_date_arg(from, date_format)?,
                parse_date_arg(to, date_format)?,
            )?),
            (None, None) => None,
            _ => {
                return Err(DashboardError::Validation(
                    "--from and --to must be given together".into(),
                ))
            }
        };

        Ok(selection.with_date_range(range))
    }

    /// Load, select and filter in one step
    ///
    /// Returns the uploaded dataset and its filtered view. An empty result is
    /// reported as a notice on stderr rather than an error.
    pub fn apply(
        &self,
        source: &SourceArgs,
        settings: &Settings,
    ) -> DashboardResult<(Dataset, FilterSelection, Dataset)> {
        let dataset = source.load(settings)?;
        let selection = self.to_selection(&dataset, &settings.date_format)?;
        let filtered = filter(&dataset, &selection)?;
        notice_if_empty(&filtered)?;
        Ok((dataset, selection, filtered))
    }
}

/// Print recoverable conditions as a notice; propagate anything else
pub fn notice_if_empty(filtered: &Dataset) -> DashboardResult<()> {
    match ensure_rows(filtered) {
        Err(e) if e.is_recoverable() => {
            eprintln!("Notice: {}", e);
            Ok(())
        }
        other => other,
    }
}

fn parse_date_arg(raw: &str, format: &str) -> DashboardResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), format).map_err(|e| {
        DashboardError::Validation(format!(
            "invalid date '{}' (expected format {}): {}",
            raw, format, e
        ))
    })
}

/// Handle the `filters` command
pub fn handle_filters_command(settings: &Settings, source: &SourceArgs) -> DashboardResult<()> {
    let dataset = source.load(settings)?;
    println!("Data uploaded successfully! {} projects loaded.", dataset.len());
    println!();
    print!("{}", format_filter_values(&dataset)?);
    Ok(())
}

/// Handle the `overview` command
pub fn handle_overview_command(
    settings: &Settings,
    source: &SourceArgs,
    filters: &FilterArgs,
) -> DashboardResult<()> {
    let (dataset, selection, filtered) = filters.apply(source, settings)?;

    println!("Filtered Project Overview");
    println!("Rows: {} of {}", filtered.len(), dataset.len());
    if let Some(range) = selection.date_range() {
        println!("Project dates: {}", range);
    }
    print!("{}", format_table(&filtered.to_table()));
    Ok(())
}
