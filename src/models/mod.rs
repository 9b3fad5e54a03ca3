//! Core data models for the project dashboard
//!
//! This module contains the data structures of the pipeline: schema
//! columns, records, datasets, filter selections, and the generic table
//! handed to charts and exports.

pub mod column;
pub mod dataset;
pub mod money;
pub mod record;
pub mod selection;
pub mod table;

pub use column::{Column, ColumnKind, Dimension, Measure};
pub use dataset::Dataset;
pub use money::{Money, MoneyParseError};
pub use record::{parse_date, Record};
pub use selection::{DateRange, FilterSelection};
pub use table::{Cell, Table};
