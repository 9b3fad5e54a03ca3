//! Declarative chart descriptions
//!
//! A `ChartSpec` carries everything an external renderer needs to draw a
//! chart. Nothing here knows how to draw.

use serde::Serialize;

use super::histogram::Bin;
use super::kind::ChartKind;

/// One named sequence of y values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    /// One value per x label; `None` where the cell was blank
    pub values: Vec<Option<f64>>,
}

impl Series {
    /// Largest present value
    pub fn max(&self) -> Option<f64> {
        self.values.iter().flatten().copied().reduce(f64::max)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChart {
    pub title: String,
    pub x_field: String,
    pub labels: Vec<String>,
    pub series: Vec<Series>,
    /// Series drawn side by side per label
    pub grouped: bool,
    /// Value printed on each bar
    pub show_values: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineChart {
    pub title: String,
    pub x_field: String,
    pub labels: Vec<String>,
    pub series: Vec<Series>,
}

/// One pie slice
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slice {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieChart {
    pub title: String,
    pub names_field: String,
    pub values_field: String,
    pub slices: Vec<Slice>,
}

impl PieChart {
    pub fn total(&self) -> f64 {
        self.slices.iter().map(|s| s.value).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramChart {
    pub title: String,
    pub x_field: String,
    pub bins: Vec<Bin>,
}

/// A chart ready for rendering, tagged by kind when serialized
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ChartSpec {
    Bar(BarChart),
    Pie(PieChart),
    Line(LineChart),
    Histogram(HistogramChart),
}

impl ChartSpec {
    pub fn kind(&self) -> ChartKind {
        match self {
            ChartSpec::Bar(_) => ChartKind::Bar,
            ChartSpec::Pie(_) => ChartKind::Pie,
            ChartSpec::Line(_) => ChartKind::Line,
            ChartSpec::Histogram(_) => ChartKind::Histogram,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            ChartSpec::Bar(c) => &c.title,
            ChartSpec::Pie(c) => &c.title,
            ChartSpec::Line(c) => &c.title,
            ChartSpec::Histogram(c) => &c.title,
        }
    }

    /// True when there is nothing to draw
    pub fn is_empty(&self) -> bool {
        match self {
            ChartSpec::Bar(c) => c.labels.is_empty(),
            ChartSpec::Pie(c) => c.slices.is_empty(),
            ChartSpec::Line(c) => c.labels.is_empty(),
            ChartSpec::Histogram(c) => c.bins.is_empty(),
        }
    }
}
