//! Schema columns of an uploaded project file
//!
//! Column names are a fixed, case-sensitive contract: `CLIENTID` matches,
//! `ClientID` does not.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a column's cells are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Date,
    Money,
    Score,
}

/// A known column of the project data schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Column {
    #[serde(rename = "CATEGORY")]
    Category,
    #[serde(rename = "COUNTRY")]
    Country,
    #[serde(rename = "CLIENTID")]
    ClientId,
    #[serde(rename = "PROJDATE")]
    ProjDate,
    #[serde(rename = "GROSSSALES")]
    GrossSales,
    #[serde(rename = "NETSALES")]
    NetSales,
    #[serde(rename = "PROFITAFTERTAX")]
    ProfitAfterTax,
    #[serde(rename = "RETAINEDEARNINGS")]
    RetainedEarnings,
    #[serde(rename = "DIVIDEND")]
    Dividend,
    #[serde(rename = "CSAT")]
    Csat,
}

impl Column {
    /// Every known column, in the order the dashboard documents them
    pub const ALL: [Column; 10] = [
        Column::Category,
        Column::Country,
        Column::ClientId,
        Column::ProjDate,
        Column::GrossSales,
        Column::NetSales,
        Column::ProfitAfterTax,
        Column::RetainedEarnings,
        Column::Dividend,
        Column::Csat,
    ];

    /// The exact header name
    pub const fn name(&self) -> &'static str {
        match self {
            Column::Category => "CATEGORY",
            Column::Country => "COUNTRY",
            Column::ClientId => "CLIENTID",
            Column::ProjDate => "PROJDATE",
            Column::GrossSales => "GROSSSALES",
            Column::NetSales => "NETSALES",
            Column::ProfitAfterTax => "PROFITAFTERTAX",
            Column::RetainedEarnings => "RETAINEDEARNINGS",
            Column::Dividend => "DIVIDEND",
            Column::Csat => "CSAT",
        }
    }

    pub const fn kind(&self) -> ColumnKind {
        match self {
            Column::Category | Column::Country | Column::ClientId => ColumnKind::Text,
            Column::ProjDate => ColumnKind::Date,
            Column::Csat => ColumnKind::Score,
            Column::GrossSales
            | Column::NetSales
            | Column::ProfitAfterTax
            | Column::RetainedEarnings
            | Column::Dividend => ColumnKind::Money,
        }
    }

    /// Look up a header name, exactly as written
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A text column that rows can be filtered on and grouped by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Category,
    Country,
    Client,
}

impl Dimension {
    pub const ALL: [Dimension; 3] = [Dimension::Category, Dimension::Country, Dimension::Client];

    pub const fn column(&self) -> Column {
        match self {
            Dimension::Category => Column::Category,
            Dimension::Country => Column::Country,
            Dimension::Client => Column::ClientId,
        }
    }

    /// Human label used in listings
    pub const fn label(&self) -> &'static str {
        match self {
            Dimension::Category => "Category",
            Dimension::Country => "Country",
            Dimension::Client => "Client ID",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column().name())
    }
}

impl FromStr for Dimension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "category" | "CATEGORY" => Ok(Dimension::Category),
            "country" | "COUNTRY" => Ok(Dimension::Country),
            "client" | "clientid" | "CLIENTID" => Ok(Dimension::Client),
            other => Err(format!(
                "unknown group field '{}' (expected category, country or client)",
                other
            )),
        }
    }
}

/// A summable money column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Measure {
    GrossSales,
    NetSales,
    ProfitAfterTax,
    RetainedEarnings,
    Dividend,
}

impl Measure {
    pub const ALL: [Measure; 5] = [
        Measure::GrossSales,
        Measure::NetSales,
        Measure::ProfitAfterTax,
        Measure::RetainedEarnings,
        Measure::Dividend,
    ];

    pub const fn column(&self) -> Column {
        match self {
            Measure::GrossSales => Column::GrossSales,
            Measure::NetSales => Column::NetSales,
            Measure::ProfitAfterTax => Column::ProfitAfterTax,
            Measure::RetainedEarnings => Column::RetainedEarnings,
            Measure::Dividend => Column::Dividend,
        }
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column().name())
    }
}

impl FromStr for Measure {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_uppercase();
        Measure::ALL
            .into_iter()
            .find(|m| m.column().name() == normalized)
            .ok_or_else(|| {
                format!(
                    "unknown measure '{}' (expected one of gross-sales, net-sales, \
                     profit-after-tax, retained-earnings, dividend)",
                    s
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_case_sensitive() {
        assert_eq!(Column::from_name("CLIENTID"), Some(Column::ClientId));
        assert_eq!(Column::from_name("ClientID"), None);
        assert_eq!(Column::from_name("csat"), None);
    }

    #[test]
    fn test_column_kinds() {
        assert_eq!(Column::ProjDate.kind(), ColumnKind::Date);
        assert_eq!(Column::Csat.kind(), ColumnKind::Score);
        assert_eq!(Column::Dividend.kind(), ColumnKind::Money);
        assert_eq!(Column::ClientId.kind(), ColumnKind::Text);
    }

    #[test]
    fn test_dimension_parse() {
        assert_eq!("client".parse::<Dimension>().unwrap(), Dimension::Client);
        assert_eq!(Dimension::Client.column(), Column::ClientId);
        assert!("region".parse::<Dimension>().is_err());
    }

    #[test]
    fn test_measure_parse() {
        assert_eq!("gross-sales".parse::<Measure>().unwrap(), Measure::GrossSales);
        assert_eq!(
            "PROFITAFTERTAX".parse::<Measure>().unwrap(),
            Measure::ProfitAfterTax
        );
        assert_eq!(
            "retained_earnings".parse::<Measure>().unwrap(),
            Measure::RetainedEarnings
        );
        assert!("csat".parse::<Measure>().is_err());
    }
}
