//! Spreadsheet report export
//!
//! Writes the filtered table to a single-sheet workbook and reads it back.
//! Money and score cells are written as numbers, dates as `YYYY-MM-DD`
//! text, everything else as strings. Blank cells stay blank; a dataset never
//! holds an all-blank row, so every record keeps a cell the reader sees.

use std::io::Cursor;
use std::path::Path;

use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use crate::error::{DashboardError, DashboardResult};
use crate::models::{Cell, Dataset};

/// File name offered for the downloaded report
pub const REPORT_FILE_NAME: &str = "project_analysis_report.xlsx";

/// Name of the only sheet in the report workbook
pub const REPORT_SHEET_NAME: &str = "Report";

/// MIME type of the report workbook
pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

fn xlsx_error(err: XlsxError) -> DashboardError {
    DashboardError::Export(format!("Failed to build workbook: {}", err))
}

/// Encode a dataset as workbook bytes: header row, then one row per record
pub fn encode_report(dataset: &Dataset) -> DashboardResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let money = Format::new().set_num_format("#,##0.00");

    let sheet = workbook.add_worksheet();
    sheet.set_name(REPORT_SHEET_NAME).map_err(xlsx_error)?;

    for (col, name) in dataset.headers().iter().enumerate() {
        sheet
            .write_string_with_format(0, column_index(col)?, name, &header)
            .map_err(xlsx_error)?;
    }

    for (idx, record) in dataset.iter().enumerate() {
        let row = u32::try_from(idx + 1)
            .map_err(|_| DashboardError::Export("too many rows for a worksheet".into()))?;
        for (col, cell) in dataset.row_cells(record).iter().enumerate() {
            write_cell(sheet, row, column_index(col)?, cell, &money)?;
        }
    }

    let bytes = workbook.save_to_buffer().map_err(xlsx_error)?;
    tracing::info!(rows = dataset.len(), bytes = bytes.len(), "encoded report workbook");
    Ok(bytes)
}

fn column_index(col: usize) -> DashboardResult<u16> {
    u16::try_from(col)
        .map_err(|_| DashboardError::Export("too many columns for a worksheet".into()))
}

fn write_cell(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &Cell,
    money: &Format,
) -> DashboardResult<()> {
    match cell {
        Cell::Text(s) if s.is_empty() => {}
        Cell::Text(s) => {
            sheet.write_string(row, col, s).map_err(xlsx_error)?;
        }
        Cell::Money(m) => {
            sheet
                .write_number_with_format(row, col, m.to_f64(), money)
                .map_err(xlsx_error)?;
        }
        Cell::Number(n) => {
            sheet.write_number(row, col, *n).map_err(xlsx_error)?;
        }
        Cell::Date(d) => {
            sheet
                .write_string(row, col, d.format("%Y-%m-%d").to_string())
                .map_err(xlsx_error)?;
        }
        Cell::Empty => {}
    }
    Ok(())
}

/// Read the `Report` sheet of workbook bytes back into a dataset
pub fn read_report_bytes(bytes: &[u8]) -> DashboardResult<Dataset> {
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes))
        .map_err(|e| DashboardError::Import(format!("Failed to open workbook: {}", e)))?;
    let range = workbook
        .worksheet_range(REPORT_SHEET_NAME)
        .map_err(|e| {
            DashboardError::Import(format!(
                "Failed to read sheet {}: {}",
                REPORT_SHEET_NAME, e
            ))
        })?;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .map(|row| row.iter().map(cell_text).collect())
        .unwrap_or_default();
    if headers.is_empty() {
        return Err(DashboardError::Import(format!(
            "sheet {} has no header row",
            REPORT_SHEET_NAME
        )));
    }

    Dataset::from_rows(
        headers,
        rows.map(|row| row.iter().map(cell_text).collect::<Vec<_>>()),
    )
}

/// Read a report workbook from disk
pub fn read_report_path(path: &Path) -> DashboardResult<Dataset> {
    let bytes = std::fs::read(path)
        .map_err(|e| DashboardError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
    read_report_bytes(&bytes)
}

fn cell_text(data: &Data) -> String {
    match data {
        Data::String(v) => v.clone(),
        Data::Float(v) => v.to_string(),
        Data::Int(v) => v.to_string(),
        Data::Bool(v) => v.to_string(),
        Data::DateTime(v) => v.to_string(),
        Data::DateTimeIso(v) => v.clone(),
        Data::DurationIso(v) => v.clone(),
        Data::Error(v) => format!("{v:?}"),
        Data::Empty => String::new(),
    }
}

/// Single-entry memo of the last encoded report
///
/// Re-encoding is skipped while the dataset fingerprint is unchanged.
#[derive(Debug, Default)]
pub struct ReportCache {
    fingerprint: Option<u64>,
    bytes: Vec<u8>,
}

impl ReportCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Workbook bytes for `dataset`, encoding only when it changed
    pub fn get_or_encode(&mut self, dataset: &Dataset) -> DashboardResult<&[u8]> {
        let fingerprint = dataset.fingerprint();
        if self.fingerprint != Some(fingerprint) {
            self.bytes = encode_report(dataset)?;
            self.fingerprint = Some(fingerprint);
        } else {
            tracing::debug!(fingerprint, "reusing encoded report");
        }
        Ok(&self.bytes)
    }

    /// Whether the cached bytes belong to `dataset`
    pub fn is_cached(&self, dataset: &Dataset) -> bool {
        self.fingerprint == Some(dataset.fingerprint())
    }

    pub fn clear(&mut self) {
        self.fingerprint = None;
        self.bytes.clear();
    }
}
