//! Row filtering
//!
//! Produces the subsequence of a dataset accepted by a `FilterSelection`.

use crate::error::{DashboardError, DashboardResult};
use crate::models::{Column, Dataset, Dimension, FilterSelection, Record};

/// Keep the rows whose category, country and client are all accepted and,
/// when the selection carries a date range, whose project date lies inside it
///
/// Row order is preserved. Rows without a project date are dropped when a
/// date range is set.
pub fn filter(dataset: &Dataset, selection: &FilterSelection) -> DashboardResult<Dataset> {
    dataset.require(&[Column::Category, Column::Country, Column::ClientId])?;
    if selection.date_range().is_some() {
        dataset.require(&[Column::ProjDate])?;
        check_dates(dataset)?;
    }

    let rows: Vec<Record> = dataset
        .iter()
        .filter(|record| matches(record, selection))
        .cloned()
        .collect();

    tracing::debug!(
        input = dataset.len(),
        output = rows.len(),
        "filtered project rows"
    );
    if rows.is_empty() && !dataset.is_empty() {
        tracing::warn!("filter selection excludes every row");
    }

    Ok(dataset.with_rows(rows))
}

/// Fail with `EmptyFilterResult` when a filtered dataset has no rows
///
/// Callers treat this as a notice and keep rendering with empty values.
pub fn ensure_rows(filtered: &Dataset) -> DashboardResult<()> {
    if filtered.is_empty() {
        Err(DashboardError::EmptyFilterResult)
    } else {
        Ok(())
    }
}

/// A date range needs every `PROJDATE` cell to be blank or a date
fn check_dates(dataset: &Dataset) -> DashboardResult<()> {
    match dataset
        .iter()
        .enumerate()
        .find_map(|(idx, r)| r.unparsed_date.as_ref().map(|raw| (idx + 1, raw)))
    {
        Some((row, raw)) => Err(DashboardError::Parse {
            row,
            column: Column::ProjDate.name().to_string(),
            message: format!("not a date: {}", raw),
        }),
        None => Ok(()),
    }
}

fn matches(record: &Record, selection: &FilterSelection) -> bool {
    let accepted = Dimension::ALL
        .iter()
        .all(|dimension| selection.accepts(*dimension, record.dimension(*dimension)));
    if !accepted {
        return false;
    }

    match selection.date_range() {
        Some(range) => record.project_date.is_some_and(|date| range.contains(date)),
        None => true,
    }
}
