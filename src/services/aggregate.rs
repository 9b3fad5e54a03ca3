//! Grouped sums and summary metrics
//!
//! Blank money cells do not contribute to any sum, so a group whose cells
//! are all blank sums to zero.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;

use crate::error::{DashboardError, DashboardResult};
use crate::models::{Cell, Column, Dataset, Dimension, Measure, Money, Table};

/// Sums for one group key
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateRow {
    /// Group key (one category, country or client)
    pub key: String,
    /// One sum per requested measure, in request order
    pub sums: Vec<Money>,
    /// Number of rows in the group
    pub row_count: usize,
}

/// Grouped sums keyed by a dimension
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregationResult {
    pub group: Dimension,
    pub measures: Vec<Measure>,
    pub rows: Vec<AggregateRow>,
}

impl AggregationResult {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|r| r.key.as_str())
    }

    pub fn get(&self, key: &str) -> Option<&AggregateRow> {
        self.rows.iter().find(|r| r.key == key)
    }

    /// Sum of one measure for one group
    pub fn sum(&self, key: &str, measure: Measure) -> Option<Money> {
        let idx = self.measures.iter().position(|m| *m == measure)?;
        self.get(key).map(|row| row.sums[idx])
    }

    /// Table with the group column followed by one column per measure
    pub fn to_table(&self) -> Table {
        let mut table = Table::new(
            std::iter::once(self.group.column().name())
                .chain(self.measures.iter().map(|m| m.column().name())),
        );
        for row in &self.rows {
            let cells: Vec<Cell> = std::iter::once(Cell::Text(row.key.clone()))
                .chain(row.sums.iter().map(|s| Cell::Money(*s)))
                .collect();
            table.push_fitted(cells);
        }
        table
    }
}

/// Sum `measures` per distinct value of `group`
///
/// Groups appear once each, ordered by key (numerically when both keys are
/// numbers). Groups with no rows in `dataset` do not appear.
pub fn aggregate_sum(
    dataset: &Dataset,
    group: Dimension,
    measures: &[Measure],
) -> DashboardResult<AggregationResult> {
    if measures.is_empty() {
        return Err(DashboardError::Validation(
            "at least one measure is required to aggregate".into(),
        ));
    }

    let mut required = vec![group.column()];
    required.extend(measures.iter().map(Measure::column));
    dataset.require(&required)?;

    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut rows: Vec<AggregateRow> = Vec::new();

    for record in dataset.iter() {
        let key = record.dimension(group);
        let slot = *index.entry(key).or_insert_with(|| {
            rows.push(AggregateRow {
                key: key.to_string(),
                sums: vec![Money::zero(); measures.len()],
                row_count: 0,
            });
            rows.len() - 1
        });

        let row = &mut rows[slot];
        row.row_count += 1;
        for (sum, measure) in row.sums.iter_mut().zip(measures) {
            if let Some(value) = record.measure(*measure) {
                *sum = sum.checked_add(value).ok_or_else(|| overflow(*measure))?;
            }
        }
    }

    rows.sort_by(|a, b| compare_keys(&a.key, &b.key));

    tracing::debug!(
        group = %group,
        groups = rows.len(),
        rows = dataset.len(),
        "aggregated project rows"
    );

    Ok(AggregationResult {
        group,
        measures: measures.to_vec(),
        rows,
    })
}

/// Numeric keys sort by value and before text keys; text keys sort lexically
fn compare_keys(a: &str, b: &str) -> Ordering {
    match (a.parse::<f64>(), b.parse::<f64>()) {
        (Ok(x), Ok(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal).then_with(|| a.cmp(b)),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

/// The dashboard's headline totals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KeyMetrics {
    pub total_gross_sales: Money,
    pub total_net_sales: Money,
    pub profit_after_tax: Money,
}

/// Total gross sales, net sales and profit after tax over every row
pub fn key_metrics(dataset: &Dataset) -> DashboardResult<KeyMetrics> {
    dataset.require(&[Column::GrossSales, Column::NetSales, Column::ProfitAfterTax])?;
    Ok(KeyMetrics {
        total_gross_sales: total(dataset, Measure::GrossSales)?,
        total_net_sales: total(dataset, Measure::NetSales)?,
        profit_after_tax: total(dataset, Measure::ProfitAfterTax)?,
    })
}

/// Column totals as a two-column `Metric`/`Amount` table, one row per measure
pub fn measure_totals(dataset: &Dataset, measures: &[Measure]) -> DashboardResult<Table> {
    let columns: Vec<Column> = measures.iter().map(Measure::column).collect();
    dataset.require(&columns)?;

    let mut table = Table::new([METRIC_COLUMN, AMOUNT_COLUMN]);
    for measure in measures {
        table.push_row(vec![
            Cell::Text(measure.column().name().to_string()),
            Cell::Money(total(dataset, *measure)?),
        ])?;
    }
    Ok(table)
}

/// Column names of the `measure_totals` table
pub const METRIC_COLUMN: &str = "Metric";
pub const AMOUNT_COLUMN: &str = "Amount";

fn total(dataset: &Dataset, measure: Measure) -> DashboardResult<Money> {
    Money::checked_sum(dataset.iter().filter_map(|r| r.measure(measure)))
        .ok_or_else(|| overflow(measure))
}

fn overflow(measure: Measure) -> DashboardError {
    DashboardError::Validation(format!("sum of {} overflows", measure))
}
