//! CSV import service
//!
//! Reads an uploaded delimited file with a header row into a `Dataset`.
//! Schema columns are validated per operation later, so a file missing some
//! columns still loads.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::{ReaderBuilder, Trim};

use crate::error::{DashboardError, DashboardResult};
use crate::models::Dataset;

/// Options for reading an uploaded file
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Field delimiter
    pub delimiter: char,
    /// Trim whitespace around cells
    pub trim: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            trim: true,
        }
    }
}

impl ImportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the delimiter
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }
}

/// Read a CSV document into a dataset
pub fn load_csv<R: Read>(reader: R, options: &ImportOptions) -> DashboardResult<Dataset> {
    let delimiter = u8::try_from(options.delimiter).map_err(|_| {
        DashboardError::Validation(format!(
            "delimiter must be a single-byte character, got '{}'",
            options.delimiter
        ))
    })?;

    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .trim(if options.trim { Trim::All } else { Trim::None })
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            if i == 0 {
                h.trim_start_matches('\u{feff}').to_string()
            } else {
                h.to_string()
            }
        })
        .collect();

    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Err(DashboardError::Validation(
            "uploaded file has no header row".into(),
        ));
    }

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result.map_err(|e| {
            DashboardError::Csv(format!("Error reading CSV record {}: {}", idx + 1, e))
        })?;
        rows.push(record.iter().map(str::to_string).collect::<Vec<_>>());
    }

    let dataset = Dataset::from_rows(headers, rows)?;
    tracing::info!(
        rows = dataset.len(),
        columns = dataset.headers().len(),
        "loaded project data"
    );
    Ok(dataset)
}

/// Load the uploaded file at `path`
///
/// `None` means nothing was uploaded and fails with `NoFileUploaded`.
pub fn load_csv_path(path: Option<&Path>, options: &ImportOptions) -> DashboardResult<Dataset> {
    let path = path.ok_or(DashboardError::NoFileUploaded)?;
    tracing::debug!(path = %path.display(), "opening upload");

    let file = File::open(path).map_err(|e| {
        DashboardError::Io(format!("Failed to open {}: {}", path.display(), e))
    })?;
    load_csv(BufReader::new(file), options)
}
