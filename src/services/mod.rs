//! Service layer for the project dashboard
//!
//! The service layer implements the pipeline stages between an uploaded
//! file and its presentation: import, filtering and aggregation.

pub mod aggregate;
pub mod filter;
pub mod import;

pub use aggregate::{
    aggregate_sum, key_metrics, measure_totals, AggregateRow, AggregationResult, KeyMetrics,
};
pub use filter::{ensure_rows, filter};
pub use import::{load_csv, load_csv_path, ImportOptions};
