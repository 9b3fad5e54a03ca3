//! Table display formatting
//!
//! Formats the filtered project table and the filter choices for terminal
//! output.

use tabled::builder::Builder;
use tabled::settings::Style;

use crate::models::{Dataset, Dimension, Table};

/// Format a table with a header row, or a placeholder when it has no rows
pub fn format_table(table: &Table) -> String {
    if table.is_empty() {
        return "No projects found.\n".to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(table.columns().iter().cloned());
    for row in table.rows() {
        builder.push_record(row.iter().map(|cell| cell.to_string()));
    }

    let mut rendered = builder.build();
    rendered.with(Style::sharp());
    format!("{}\n", rendered)
}

/// List the distinct values of each filter field
pub fn format_filter_values(dataset: &Dataset) -> crate::error::DashboardResult<String> {
    let mut output = String::new();
    for dimension in Dimension::ALL {
        let values = dataset.distinct(dimension)?;
        output.push_str(&format!("{} ({}):\n", dimension.label(), values.len()));
        for value in values {
            output.push_str(&format!("  {}\n", value));
        }
    }
    Ok(output)
}
