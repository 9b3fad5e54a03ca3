//! Filter selection model
//!
//! A `FilterSelection` is built fresh for every render and passed explicitly
//! into the pipeline. An empty accepted set for a field accepts nothing;
//! "everything selected" is an explicit initialization via `select_all`.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

use super::column::Dimension;
use super::dataset::Dataset;
use crate::error::{DashboardError, DashboardResult};

/// Closed interval of project dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Create a range; `start` must not be after `end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> DashboardResult<Self> {
        if start > end {
            return Err(DashboardError::Validation(format!(
                "date range start {} is after end {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Inclusive on both ends
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// Accepted values per filterable field plus an optional date range
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterSelection {
    categories: BTreeSet<String>,
    countries: BTreeSet<String>,
    clients: BTreeSet<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    date_range: Option<DateRange>,
}

impl FilterSelection {
    /// A selection that accepts no rows
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept every distinct category, country and client present in the dataset
    pub fn select_all(dataset: &Dataset) -> DashboardResult<Self> {
        Ok(Self {
            categories: dataset.distinct(Dimension::Category)?.into_iter().collect(),
            countries: dataset.distinct(Dimension::Country)?.into_iter().collect(),
            clients: dataset.distinct(Dimension::Client)?.into_iter().collect(),
            date_range: None,
        })
    }

    /// Replace the accepted values of one field
    pub fn with_values<I, S>(mut self, dimension: Dimension, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: BTreeSet<String> = values.into_iter().map(Into::into).collect();
        match dimension {
            Dimension::Category => self.categories = values,
            Dimension::Country => self.countries = values,
            Dimension::Client => self.clients = values,
        }
        self
    }

    pub fn with_categories<I, S>(self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.with_values(Dimension::Category, values)
    }

    pub fn with_countries<I, S>(self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.with_values(Dimension::Country, values)
    }

    pub fn with_clients<I, S>(self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.with_values(Dimension::Client, values)
    }

    pub fn with_date_range(mut self, date_range: Option<DateRange>) -> Self {
        self.date_range = date_range;
        self
    }

    /// Accepted values of one field
    pub fn accepted(&self, dimension: Dimension) -> &BTreeSet<String> {
        match dimension {
            Dimension::Category => &self.categories,
            Dimension::Country => &self.countries,
            Dimension::Client => &self.clients,
        }
    }

    pub fn accepts(&self, dimension: Dimension, value: &str) -> bool {
        self.accepted(dimension).contains(value)
    }

    pub fn date_range(&self) -> Option<DateRange> {
        self.date_range
    }
}
