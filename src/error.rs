//! Custom error types for the project dashboard
//!
//! This module defines the error hierarchy for the pipeline using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for dashboard operations
#[derive(Error, Debug)]
pub enum DashboardError {
    /// A column required by the requested operation is absent from the dataset
    #[error("Missing column: {column}")]
    MissingColumn { column: String },

    /// Chart kind outside the supported set
    #[error("Unsupported chart kind: {0} (expected one of Bar, Pie, Line, Histogram)")]
    UnsupportedChartKind(String),

    /// Filtering produced zero rows
    #[error("No projects match the selected filters")]
    EmptyFilterResult,

    /// No input file was given
    #[error("No file uploaded. Please upload a CSV file to begin analysis.")]
    NoFileUploaded,

    /// A cell could not be parsed as its column's type
    #[error("Invalid value in row {row}, column {column}: {message}")]
    Parse {
        row: usize,
        column: String,
        message: String,
    },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation errors for inputs and arguments
    #[error("Validation error: {0}")]
    Validation(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// CSV reading errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// YAML serialization errors
    #[error("YAML error: {0}")]
    Yaml(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Import errors (re-reading an exported workbook)
    #[error("Import error: {0}")]
    Import(String),
}

impl DashboardError {
    /// Create a "missing column" error
    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
        }
    }

    /// Check if this is a "missing column" error
    pub fn is_missing_column(&self) -> bool {
        matches!(self, Self::MissingColumn { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Errors after which the dashboard still renders (with zero/empty values)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::EmptyFilterResult)
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for DashboardError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<csv::Error> for DashboardError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

impl From<serde_json::Error> for DashboardError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<serde_yaml::Error> for DashboardError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Yaml(err.to_string())
    }
}

/// Result type alias for dashboard operations
pub type DashboardResult<T> = Result<T, DashboardError>;
