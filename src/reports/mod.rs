//! Reports module for the project dashboard
//!
//! Provides the analysis page that combines filtered data, grouped charts
//! and key financial metrics.

pub mod dashboard;

pub use dashboard::{DashboardReport, ReportSection};
