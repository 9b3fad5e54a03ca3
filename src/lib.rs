//! Project Dashboard - financial analysis of project data from CSV
//!
//! This library loads an uploaded CSV of project records, filters it by
//! category, country, client and project date, aggregates the money
//! columns, describes charts for each analysis section, and exports the
//! filtered table as a spreadsheet report.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Schema columns, records, datasets and filter selections
//! - `services`: Loading, filtering and aggregation
//! - `charts`: Chart kinds and renderer-agnostic chart descriptions
//! - `reports`: The analysis page (sections, charts and key metrics)
//! - `display`: Terminal formatting
//! - `export`: CSV, JSON, YAML and xlsx output
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use project_dashboard::config::Settings;
//! use project_dashboard::models::FilterSelection;
//! use project_dashboard::reports::DashboardReport;
//! use project_dashboard::services::{load_csv_path, ImportOptions};
//!
//! let dataset = load_csv_path(Some("projects.csv".as_ref()), &ImportOptions::default())?;
//! let selection = FilterSelection::select_all(&dataset)?;
//! let report = DashboardReport::generate(&dataset, &selection, None, &Settings::default())?;
//! print!("{}", report.format_terminal());
//! ```

pub mod charts;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;

pub use error::{DashboardError, DashboardResult};
