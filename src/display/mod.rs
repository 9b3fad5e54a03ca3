//! Display formatting for terminal output
//!
//! Provides utilities for drawing tables, charts and report headers in
//! the terminal.

pub mod chart;
pub mod layout;
pub mod table;

pub use chart::format_chart;
pub use table::{format_filter_values, format_table};
