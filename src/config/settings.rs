//! User settings for the project dashboard
//!
//! Manages display and report preferences: currency symbol, histogram
//! bucketing, the report file name and the default chart kind.

use serde::{Deserialize, Serialize};

use super::paths::DashboardPaths;
use crate::charts::ChartKind;
use crate::error::DashboardError;

/// User settings for the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used for metric display
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Number of buckets for numeric histograms
    #[serde(default = "default_histogram_bins")]
    pub histogram_bins: usize,

    /// File name offered for the spreadsheet report
    #[serde(default = "default_report_file_name")]
    pub report_file_name: String,

    /// Chart kind applied to every report section (None keeps per-section defaults)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_chart_kind: Option<ChartKind>,

    /// Field delimiter of uploaded files
    #[serde(default = "default_delimiter")]
    pub csv_delimiter: char,

    /// Date format for command-line date arguments (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_histogram_bins() -> usize {
    10
}

fn default_report_file_name() -> String {
    crate::export::xlsx::REPORT_FILE_NAME.to_string()
}

fn default_delimiter() -> char {
    ','
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            histogram_bins: default_histogram_bins(),
            report_file_name: default_report_file_name(),
            default_chart_kind: None,
            csv_delimiter: default_delimiter(),
            date_format: default_date_format(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if no file exists
    pub fn load_or_create(paths: &DashboardPaths) -> Result<Self, DashboardError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                DashboardError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                DashboardError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.validate()?;
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &DashboardPaths) -> Result<(), DashboardError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            DashboardError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| DashboardError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Check that the settings are usable
    pub fn validate(&self) -> Result<(), DashboardError> {
        if self.histogram_bins == 0 {
            return Err(DashboardError::Config(
                "histogram_bins must be at least 1".into(),
            ));
        }
        if !self.csv_delimiter.is_ascii() {
            return Err(DashboardError::Config(format!(
                "csv_delimiter must be a single ASCII character, got '{}'",
                self.csv_delimiter
            )));
        }
        if self.report_file_name.trim().is_empty() {
            return Err(DashboardError::Config(
                "report_file_name must not be empty".into(),
            ));
        }
        Ok(())
    }
}
