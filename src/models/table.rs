//! Generic tabular data handed to chart construction and exports
//!
//! A `Table` is the declarative shape both a filtered dataset and an
//! aggregation result can be viewed as: named columns and rows of cells.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use std::hash::{Hash, Hasher};

use super::money::Money;
use crate::error::{DashboardError, DashboardResult};

/// A single table cell
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Money(Money),
    Number(f64),
    Date(NaiveDate),
    Empty,
}

impl Cell {
    /// Numeric value of the cell, if it has one
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Money(m) => Some(m.to_f64()),
            Cell::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Cell::Money(_) | Cell::Number(_))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => f.write_str(s),
            Cell::Money(m) => f.write_str(&m.to_decimal_string()),
            Cell::Number(n) => write!(f, "{}", n),
            Cell::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Cell::Empty => Ok(()),
        }
    }
}

impl Hash for Cell {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Cell::Text(s) => s.hash(state),
            Cell::Money(m) => m.hash(state),
            Cell::Number(n) => n.to_bits().hash(state),
            Cell::Date(d) => d.hash(state),
            Cell::Empty => {}
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<Money> for Cell {
    fn from(m: Money) -> Self {
        Cell::Money(m)
    }
}

impl From<Option<Money>> for Cell {
    fn from(m: Option<Money>) -> Self {
        m.map_or(Cell::Empty, Cell::Money)
    }
}

impl From<Option<f64>> for Cell {
    fn from(n: Option<f64>) -> Self {
        n.map_or(Cell::Empty, Cell::Number)
    }
}

impl From<Option<NaiveDate>> for Cell {
    fn from(d: Option<NaiveDate>) -> Self {
        d.map_or(Cell::Empty, Cell::Date)
    }
}

/// Named columns and rows of cells
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Create an empty table with the given column names
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row, which must have one cell per column
    pub fn push_row(&mut self, row: Vec<Cell>) -> DashboardResult<()> {
        if row.len() != self.columns.len() {
            return Err(DashboardError::Validation(format!(
                "row has {} cells, table has {} columns",
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    /// Append a row whose width comes from the table's own column list
    ///
    /// Short rows are padded with `Empty`; surplus cells are dropped.
    pub(crate) fn push_fitted(&mut self, mut row: Vec<Cell>) {
        row.resize(self.columns.len(), Cell::Empty);
        self.rows.push(row);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Index of a column, or `MissingColumn` naming it
    pub fn require_column(&self, name: &str) -> DashboardResult<usize> {
        self.column_index(name)
            .ok_or_else(|| DashboardError::missing_column(name))
    }

    /// All cells of one column, top to bottom
    pub fn column(&self, name: &str) -> DashboardResult<Vec<&Cell>> {
        let idx = self.require_column(name)?;
        Ok(self.rows.iter().map(|row| &row[idx]).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        let mut table = Table::new(["CATEGORY", "GROSSSALES"]);
        table
            .push_row(vec!["A".into(), Money::from_cents(3000).into()])
            .unwrap();
        table
            .push_row(vec!["B".into(), Cell::Empty])
            .unwrap();
        table
    }

    #[test]
    fn test_column_access() {
        let table = sample();
        let cells = table.column("GROSSSALES").unwrap();
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[0].as_f64(), Some(30.0));
        assert!(cells[1].is_empty());
    }

    #[test]
    fn test_missing_column() {
        let table = sample();
        let err = table.column("CSAT").unwrap_err();
        assert!(matches!(err, DashboardError::MissingColumn { column } if column == "CSAT"));
    }

    #[test]
    fn test_push_fitted_pads_and_truncates() {
        let mut table = Table::new(["A", "B"]);
        table.push_fitted(vec![Cell::Number(1.0)]);
        table.push_fitted(vec![Cell::Number(1.0), Cell::Empty, Cell::Number(3.0)]);
        assert_eq!(table.rows()[0], vec![Cell::Number(1.0), Cell::Empty]);
        assert_eq!(table.rows()[1].len(), 2);
    }

    #[test]
    fn test_push_row_checks_width() {
        let mut table = sample();
        assert!(table.push_row(vec![Cell::Empty]).is_err());
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_cell_display() {
        assert_eq!(Cell::Money(Money::from_cents(-150)).to_string(), "-1.50");
        assert_eq!(Cell::Number(4.5).to_string(), "4.5");
        assert_eq!(
            Cell::Date(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()).to_string(),
            "2024-03-01"
        );
        assert_eq!(Cell::Empty.to_string(), "");
    }
}
