//! Project record model
//!
//! One row of uploaded project data with its typed schema columns.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use super::column::{Column, Dimension, Measure};
use super::money::Money;
use super::table::Cell;

/// Date layouts accepted in the `PROJDATE` column
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%b-%Y"];

/// Date-time layouts accepted in the `PROJDATE` column (time part is dropped)
const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%m/%d/%Y %H:%M"];

/// One row of project data
///
/// Text columns absent from the upload read as empty strings; numeric and date
/// cells that are blank (or whose column is absent) are `None`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Record {
    pub category: String,
    pub country: String,
    /// Client identifier, kept verbatim even when numeric
    pub client_id: String,
    pub project_date: Option<NaiveDate>,
    /// `PROJDATE` text in none of the accepted layouts, kept for export
    ///
    /// Only an error once a date range asks for the date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unparsed_date: Option<String>,
    pub gross_sales: Option<Money>,
    pub net_sales: Option<Money>,
    pub profit_after_tax: Option<Money>,
    pub retained_earnings: Option<Money>,
    pub dividend: Option<Money>,
    /// Customer satisfaction score
    pub csat: Option<f64>,
    /// Cells of columns outside the schema, in header order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extra: Vec<String>,
}

impl Record {
    /// Value of a text dimension
    pub fn dimension(&self, dimension: Dimension) -> &str {
        match dimension {
            Dimension::Category => &self.category,
            Dimension::Country => &self.country,
            Dimension::Client => &self.client_id,
        }
    }

    /// Value of a money measure
    pub fn measure(&self, measure: Measure) -> Option<Money> {
        match measure {
            Measure::GrossSales => self.gross_sales,
            Measure::NetSales => self.net_sales,
            Measure::ProfitAfterTax => self.profit_after_tax,
            Measure::RetainedEarnings => self.retained_earnings,
            Measure::Dividend => self.dividend,
        }
    }

    /// Typed cell for a schema column
    pub fn cell(&self, column: Column) -> Cell {
        match column {
            Column::Category => Cell::Text(self.category.clone()),
            Column::Country => Cell::Text(self.country.clone()),
            Column::ClientId => Cell::Text(self.client_id.clone()),
            Column::ProjDate => match (&self.project_date, &self.unparsed_date) {
                (None, Some(raw)) => Cell::Text(raw.clone()),
                (date, _) => (*date).into(),
            },
            Column::GrossSales => self.gross_sales.into(),
            Column::NetSales => self.net_sales.into(),
            Column::ProfitAfterTax => self.profit_after_tax.into(),
            Column::RetainedEarnings => self.retained_earnings.into(),
            Column::Dividend => self.dividend.into(),
            Column::Csat => self.csat.into(),
        }
    }

    /// Parse `raw` as the given column's type and store it
    ///
    /// Returns a message describing the problem when the cell cannot be parsed.
    pub(crate) fn set_from_str(&mut self, column: Column, raw: &str) -> Result<(), String> {
        let raw = raw.trim();
        match column {
            Column::Category => self.category = raw.to_string(),
            Column::Country => self.country = raw.to_string(),
            Column::ClientId => self.client_id = raw.to_string(),
            Column::ProjDate => match parse_optional(raw, parse_date) {
                Ok(date) => {
                    self.project_date = date;
                    self.unparsed_date = None;
                }
                Err(_) => {
                    self.project_date = None;
                    self.unparsed_date = Some(raw.to_string());
                }
            },
            Column::GrossSales => self.gross_sales = parse_optional(raw, parse_money)?,
            Column::NetSales => self.net_sales = parse_optional(raw, parse_money)?,
            Column::ProfitAfterTax => self.profit_after_tax = parse_optional(raw, parse_money)?,
            Column::RetainedEarnings => {
                self.retained_earnings = parse_optional(raw, parse_money)?
            }
            Column::Dividend => self.dividend = parse_optional(raw, parse_money)?,
            Column::Csat => self.csat = parse_optional(raw, parse_score)?,
        }
        Ok(())
    }
}

fn parse_optional<T>(raw: &str, parse: fn(&str) -> Result<T, String>) -> Result<Option<T>, String> {
    if raw.is_empty() || raw.eq_ignore_ascii_case("nan") || raw.eq_ignore_ascii_case("null") {
        Ok(None)
    } else {
        parse(raw).map(Some)
    }
}

fn parse_money(raw: &str) -> Result<Money, String> {
    Money::parse(raw).map_err(|e| e.to_string())
}

fn parse_score(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .parse()
        .map_err(|_| format!("not a number: {}", raw))?;
    if !value.is_finite() {
        return Err(format!("not a finite number: {}", raw));
    }
    Ok(value)
}

/// Parse a project date in any of the accepted layouts
pub fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
        .ok_or_else(|| format!("not a date: {}", raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(parse_date("2024-03-15").unwrap(), expected);
        assert_eq!(parse_date("2024/03/15").unwrap(), expected);
        assert_eq!(parse_date("03/15/2024").unwrap(), expected);
        assert_eq!(parse_date("15-Mar-2024").unwrap(), expected);
        assert_eq!(parse_date("2024-03-15 10:30:00").unwrap(), expected);
        assert_eq!(parse_date("2024-03-15T10:30:00").unwrap(), expected);
        assert!(parse_date("15.03.2024").is_err());
    }

    #[test]
    fn test_set_from_str() {
        let mut record = Record::default();
        record.set_from_str(Column::Category, " Software ").unwrap();
        record.set_from_str(Column::GrossSales, "1,250.50").unwrap();
        record.set_from_str(Column::Csat, "4.5").unwrap();
        record.set_from_str(Column::NetSales, "").unwrap();

        assert_eq!(record.category, "Software");
        assert_eq!(record.gross_sales, Some(Money::from_cents(125050)));
        assert_eq!(record.csat, Some(4.5));
        assert_eq!(record.net_sales, None);
    }

    #[test]
    fn test_set_from_str_rejects_bad_values() {
        let mut record = Record::default();
        assert!(record.set_from_str(Column::GrossSales, "lots").is_err());
        assert!(record.set_from_str(Column::Csat, "inf").is_err());
    }

    #[test]
    fn test_unrecognised_date_is_kept_as_text() {
        let mut record = Record::default();
        record.set_from_str(Column::ProjDate, "Q3 2024").unwrap();
        assert_eq!(record.project_date, None);
        assert_eq!(record.unparsed_date.as_deref(), Some("Q3 2024"));
        assert_eq!(record.cell(Column::ProjDate), Cell::Text("Q3 2024".into()));

        record.set_from_str(Column::ProjDate, "2024-07-01").unwrap();
        assert_eq!(record.unparsed_date, None);
        assert_eq!(
            record.cell(Column::ProjDate),
            Cell::Date(NaiveDate::from_ymd_opt(2024, 7, 1).unwrap())
        );
    }

    #[test]
    fn test_nan_reads_as_missing() {
        let mut record = Record::default();
        record.set_from_str(Column::Dividend, "NaN").unwrap();
        assert_eq!(record.dividend, None);
    }

    #[test]
    fn test_accessors() {
        let record = Record {
            category: "A".into(),
            client_id: "1001".into(),
            gross_sales: Some(Money::from_cents(1000)),
            ..Default::default()
        };
        assert_eq!(record.dimension(Dimension::Client), "1001");
        assert_eq!(record.measure(Measure::GrossSales), Some(Money::from_cents(1000)));
        assert_eq!(record.measure(Measure::Dividend), None);
        assert_eq!(record.cell(Column::Category), Cell::Text("A".into()));
        assert_eq!(record.cell(Column::ProjDate), Cell::Empty);
    }
}
