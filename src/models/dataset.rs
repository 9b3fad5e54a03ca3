//! Dataset model
//!
//! The ordered rows of one uploaded file together with its header row.
//! A dataset is never mutated after loading; filtering builds a new one
//! that shares the header layout.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};

use super::column::{Column, Dimension};
use super::record::Record;
use super::table::{Cell, Table};
use crate::error::{DashboardError, DashboardResult};

/// Where a header's cells live inside a `Record`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Known(Column),
    Extra(usize),
}

/// Ordered project rows sharing one header layout
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    headers: Vec<String>,
    layout: Vec<Slot>,
    rows: Vec<Record>,
}

impl Dataset {
    /// Build a dataset from a header row and rows of raw string cells
    ///
    /// Schema columns are parsed into their types; any other column is kept
    /// verbatim. A repeated schema header is treated as an extra column.
    /// Rows shorter than the header are padded with blanks, and rows whose
    /// cells are all blank are dropped. Row numbers in errors count data rows
    /// from 1, dropped rows included.
    pub fn from_rows<I, R, S>(headers: Vec<String>, rows: I) -> DashboardResult<Self>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let layout = Self::layout_for(&headers);
        let extra_count = layout
            .iter()
            .filter(|slot| matches!(slot, Slot::Extra(_)))
            .count();

        let mut records = Vec::new();
        for (idx, row) in rows.into_iter().enumerate() {
            let row_number = idx + 1;
            let cells: Vec<S> = row.into_iter().collect();
            if cells.len() > headers.len() {
                return Err(DashboardError::Validation(format!(
                    "row {} has {} cells but the header has {} columns",
                    row_number,
                    cells.len(),
                    headers.len()
                )));
            }

            let mut record = Record {
                extra: vec![String::new(); extra_count],
                ..Default::default()
            };
            for (cell, slot) in cells.iter().zip(&layout) {
                let raw: &str = cell.as_ref();
                match *slot {
                    Slot::Known(column) => {
                        record
                            .set_from_str(column, raw)
                            .map_err(|message| DashboardError::Parse {
                                row: row_number,
                                column: column.name().to_string(),
                                message,
                            })?;
                    }
                    Slot::Extra(i) => record.extra[i] = raw.trim().to_string(),
                }
            }
            if layout_cells(&layout, &record).iter().all(is_blank) {
                continue;
            }
            records.push(record);
        }

        Ok(Self {
            headers,
            layout,
            rows: records,
        })
    }

    fn layout_for(headers: &[String]) -> Vec<Slot> {
        let mut seen = HashSet::new();
        let mut extra = 0;
        headers
            .iter()
            .map(|header| match Column::from_name(header) {
                Some(column) if seen.insert(column) => Slot::Known(column),
                _ => {
                    extra += 1;
                    Slot::Extra(extra - 1)
                }
            })
            .collect()
    }

    /// A dataset with the same header layout and the given rows
    pub fn with_rows(&self, rows: Vec<Record>) -> Self {
        Self {
            headers: self.headers.clone(),
            layout: self.layout.clone(),
            rows,
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether the upload carried this schema column
    pub fn has_column(&self, column: Column) -> bool {
        self.layout.contains(&Slot::Known(column))
    }

    /// Fail with `MissingColumn` naming the first absent column
    pub fn require(&self, columns: &[Column]) -> DashboardResult<()> {
        match columns.iter().find(|c| !self.has_column(**c)) {
            Some(missing) => Err(DashboardError::missing_column(missing.name())),
            None => Ok(()),
        }
    }

    /// Distinct values of a dimension in first-appearance order
    pub fn distinct(&self, dimension: Dimension) -> DashboardResult<Vec<String>> {
        self.require(&[dimension.column()])?;
        let mut seen = HashSet::new();
        Ok(self
            .rows
            .iter()
            .map(|r| r.dimension(dimension))
            .filter(|v| seen.insert(*v))
            .map(str::to_string)
            .collect())
    }

    /// Cells of one record in header order
    pub fn row_cells(&self, record: &Record) -> Vec<Cell> {
        layout_cells(&self.layout, record)
    }

    /// View the dataset as a generic table
    pub fn to_table(&self) -> Table {
        let mut table = Table::new(self.headers.iter().cloned());
        for record in &self.rows {
            table.push_fitted(self.row_cells(record));
        }
        table
    }

    /// Content hash over headers and every cell
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.headers.hash(&mut hasher);
        self.rows.len().hash(&mut hasher);
        for record in &self.rows {
            for cell in self.row_cells(record) {
                cell.hash(&mut hasher);
            }
        }
        hasher.finish()
    }
}

fn layout_cells(layout: &[Slot], record: &Record) -> Vec<Cell> {
    layout
        .iter()
        .map(|slot| match *slot {
            Slot::Known(column) => record.cell(column),
            Slot::Extra(i) => match record.extra.get(i) {
                Some(s) if !s.is_empty() => Cell::Text(s.clone()),
                _ => Cell::Empty,
            },
        })
        .collect()
}

/// Blank text and missing values leave nothing in an exported row
fn is_blank(cell: &Cell) -> bool {
    match cell {
        Cell::Text(s) => s.is_empty(),
        Cell::Empty => true,
        _ => false,
    }
}
