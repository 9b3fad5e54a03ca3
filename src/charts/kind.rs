//! Chart kind selection

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DashboardError;

/// The supported chart kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Pie,
    Line,
    Histogram,
}

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [
        ChartKind::Bar,
        ChartKind::Pie,
        ChartKind::Line,
        ChartKind::Histogram,
    ];

    /// Label shown in the diagram type picker
    pub const fn label(&self) -> &'static str {
        match self {
            ChartKind::Bar => "Bar Chart",
            ChartKind::Pie => "Pie Chart",
            ChartKind::Line => "Line Chart",
            ChartKind::Histogram => "Histogram",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChartKind::Bar => "Bar",
            ChartKind::Pie => "Pie",
            ChartKind::Line => "Line",
            ChartKind::Histogram => "Histogram",
        };
        f.write_str(name)
    }
}

impl FromStr for ChartKind {
    type Err = DashboardError;

    /// Accepts the bare kind or its picker label in any case: `bar`,
    /// `Bar`, `Bar Chart`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        let name = normalized
            .strip_suffix(" chart")
            .unwrap_or(&normalized)
            .trim_end();

        match name {
            "bar" => Ok(ChartKind::Bar),
            "pie" => Ok(ChartKind::Pie),
            "line" => Ok(ChartKind::Line),
            "histogram" => Ok(ChartKind::Histogram),
            _ => Err(DashboardError::UnsupportedChartKind(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kind_names() {
        assert_eq!("bar".parse::<ChartKind>().unwrap(), ChartKind::Bar);
        assert_eq!("Pie".parse::<ChartKind>().unwrap(), ChartKind::Pie);
        assert_eq!("Line Chart".parse::<ChartKind>().unwrap(), ChartKind::Line);
        assert_eq!("HISTOGRAM".parse::<ChartKind>().unwrap(), ChartKind::Histogram);
    }

    #[test]
    fn test_labels_parse_back() {
        for kind in ChartKind::ALL {
            assert_eq!(kind.label().parse::<ChartKind>().unwrap(), kind);
            assert_eq!(kind.to_string().parse::<ChartKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unsupported_kind() {
        let err = "Radar".parse::<ChartKind>().unwrap_err();
        assert!(matches!(err, DashboardError::UnsupportedChartKind(ref name) if name == "Radar"));
        assert_eq!(
            err.to_string(),
            "Unsupported chart kind: Radar (expected one of Bar, Pie, Line, Histogram)"
        );
        assert!("".parse::<ChartKind>().is_err());
        assert!("chart".parse::<ChartKind>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&ChartKind::Histogram).unwrap(), "\"histogram\"");
        let kind: ChartKind = serde_json::from_str("\"pie\"").unwrap();
        assert_eq!(kind, ChartKind::Pie);
    }
}
