//! Build a chart description from tabular data

use crate::error::{DashboardError, DashboardResult};
use crate::models::{Cell, Table};

use super::histogram::{bucket_cells, DEFAULT_BINS};
use super::kind::ChartKind;
use super::model::{BarChart, ChartSpec, HistogramChart, LineChart, PieChart, Series, Slice};

/// Build a chart of `kind` plotting `y_fields` against `x_field`
///
/// Every named field must be a column of `data`. Pie charts take exactly one
/// y field. Histograms ignore the y fields and bucket the x column into
/// `DEFAULT_BINS` buckets; use [`histogram_chart`] to choose the bucket count.
pub fn select_chart_kind(
    kind: ChartKind,
    data: &Table,
    x_field: &str,
    y_fields: &[&str],
    title: &str,
) -> DashboardResult<ChartSpec> {
    data.require_column(x_field)?;
    for field in y_fields {
        data.require_column(field)?;
    }

    let spec = match kind {
        ChartKind::Bar => ChartSpec::Bar(BarChart {
            title: title.to_string(),
            x_field: x_field.to_string(),
            labels: labels(data, x_field)?,
            series: series(data, y_fields)?,
            grouped: y_fields.len() > 1,
            show_values: true,
        }),
        ChartKind::Line => ChartSpec::Line(LineChart {
            title: title.to_string(),
            x_field: x_field.to_string(),
            labels: labels(data, x_field)?,
            series: series(data, y_fields)?,
        }),
        ChartKind::Pie => pie(data, x_field, y_fields, title)?,
        ChartKind::Histogram => histogram_chart(data, x_field, DEFAULT_BINS, title)?,
    };

    tracing::debug!(kind = %kind, title, rows = data.len(), "built chart");
    Ok(spec)
}

/// Histogram of one column with `bins` numeric buckets
pub fn histogram_chart(
    data: &Table,
    x_field: &str,
    bins: usize,
    title: &str,
) -> DashboardResult<ChartSpec> {
    let cells = data.column(x_field)?;
    Ok(ChartSpec::Histogram(HistogramChart {
        title: title.to_string(),
        x_field: x_field.to_string(),
        bins: bucket_cells(cells, bins),
    }))
}

fn pie(
    data: &Table,
    names_field: &str,
    y_fields: &[&str],
    title: &str,
) -> DashboardResult<ChartSpec> {
    let values_field = match y_fields {
        [single] => *single,
        _ => {
            return Err(DashboardError::Validation(format!(
                "a pie chart takes exactly one value field, got {}",
                y_fields.len()
            )))
        }
    };

    let names = labels(data, names_field)?;
    let values = numeric_column(data, values_field)?;
    let slices = names
        .into_iter()
        .zip(values)
        .filter_map(|(label, value)| value.map(|value| Slice { label, value }))
        .collect();

    Ok(ChartSpec::Pie(PieChart {
        title: title.to_string(),
        names_field: names_field.to_string(),
        values_field: values_field.to_string(),
        slices,
    }))
}

fn labels(data: &Table, field: &str) -> DashboardResult<Vec<String>> {
    Ok(data.column(field)?.into_iter().map(Cell::to_string).collect())
}

fn series(data: &Table, fields: &[&str]) -> DashboardResult<Vec<Series>> {
    fields
        .iter()
        .map(|field| {
            Ok(Series {
                name: field.to_string(),
                values: numeric_column(data, field)?,
            })
        })
        .collect()
}

/// Values of a column that must hold numbers; blank cells become `None`
fn numeric_column(data: &Table, field: &str) -> DashboardResult<Vec<Option<f64>>> {
    data.column(field)?
        .into_iter()
        .map(|cell| match cell {
            Cell::Empty => Ok(None),
            other => other.as_f64().map(Some).ok_or_else(|| {
                DashboardError::Validation(format!(
                    "column {} holds non-numeric value '{}'",
                    field, other
                ))
            }),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Dataset, Money};

    fn sales() -> Table {
        let mut table = Table::new(["CATEGORY", "GROSSSALES", "NETSALES"]);
        table
            .push_row(vec![
                "A".into(),
                Money::from_cents(3000).into(),
                Money::from_cents(2300).into(),
            ])
            .unwrap();
        table
            .push_row(vec!["B".into(), Money::from_cents(500).into(), Cell::Empty])
            .unwrap();
        table
    }

    #[test]
    fn test_grouped_bar() {
        let spec = select_chart_kind(
            ChartKind::Bar,
            &sales(),
            "CATEGORY",
            &["GROSSSALES", "NETSALES"],
            "Sales Comparison per Category",
        )
        .unwrap();

        let ChartSpec::Bar(bar) = spec else {
            panic!("expected a bar chart");
        };
        assert!(bar.grouped);
        assert!(bar.show_values);
        assert_eq!(bar.labels, vec!["A", "B"]);
        assert_eq!(bar.series.len(), 2);
        assert_eq!(bar.series[0].values, vec![Some(30.0), Some(5.0)]);
        assert_eq!(bar.series[1].values, vec![Some(23.0), None]);
    }

    #[test]
    fn test_single_series_bar_is_not_grouped() {
        let spec =
            select_chart_kind(ChartKind::Bar, &sales(), "CATEGORY", &["GROSSSALES"], "t").unwrap();
        assert!(matches!(spec, ChartSpec::Bar(ref bar) if !bar.grouped));
    }

    #[test]
    fn test_line_keeps_row_order() {
        let spec =
            select_chart_kind(ChartKind::Line, &sales(), "CATEGORY", &["GROSSSALES"], "t").unwrap();
        let ChartSpec::Line(line) = spec else {
            panic!("expected a line chart");
        };
        assert_eq!(line.labels, vec!["A", "B"]);
        assert_eq!(line.series[0].max(), Some(30.0));
    }

    #[test]
    fn test_pie_one_slice_per_row() {
        let spec =
            select_chart_kind(ChartKind::Pie, &sales(), "CATEGORY", &["GROSSSALES"], "t").unwrap();
        let ChartSpec::Pie(pie) = spec else {
            panic!("expected a pie chart");
        };
        assert_eq!(pie.slices.len(), 2);
        assert_eq!(pie.total(), 35.0);
    }

    #[test]
    fn test_pie_needs_exactly_one_value_field() {
        let err = select_chart_kind(
            ChartKind::Pie,
            &sales(),
            "CATEGORY",
            &["GROSSSALES", "NETSALES"],
            "t",
        )
        .unwrap_err();
        assert!(err.is_validation());

        let err = select_chart_kind(ChartKind::Pie, &sales(), "CATEGORY", &[], "t").unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_histogram_ignores_y_fields() {
        let spec = select_chart_kind(
            ChartKind::Histogram,
            &sales(),
            "CATEGORY",
            &["GROSSSALES"],
            "t",
        )
        .unwrap();
        let ChartSpec::Histogram(hist) = spec else {
            panic!("expected a histogram");
        };
        assert_eq!(hist.bins.len(), 2);
        assert!(hist.bins.iter().all(|b| b.count == 1));
    }

    #[test]
    fn test_missing_fields() {
        let err = select_chart_kind(
            ChartKind::Bar,
            &sales(),
            "COUNTRY",
            &["GROSSSALES"],
            "t",
        )
        .unwrap_err();
        assert!(matches!(err, DashboardError::MissingColumn { column } if column == "COUNTRY"));

        let err = select_chart_kind(
            ChartKind::Line,
            &sales(),
            "CATEGORY",
            &["DIVIDEND"],
            "t",
        )
        .unwrap_err();
        assert!(matches!(err, DashboardError::MissingColumn { column } if column == "DIVIDEND"));
    }

    #[test]
    fn test_csat_histogram_without_csat_column() {
        let dataset = Dataset::from_rows(
            vec!["CATEGORY".into(), "GROSSSALES".into()],
            vec![vec!["A", "10"]],
        )
        .unwrap();
        let err = histogram_chart(&dataset.to_table(), "CSAT", 10, "CSAT").unwrap_err();
        assert!(matches!(err, DashboardError::MissingColumn { column } if column == "CSAT"));
    }

    #[test]
    fn test_text_values_rejected_as_series() {
        let err = select_chart_kind(
            ChartKind::Bar,
            &sales(),
            "GROSSSALES",
            &["CATEGORY"],
            "t",
        )
        .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_chart_spec_serializes_with_kind_tag() {
        let spec = select_chart_kind(
            ChartKind::Pie,
            &sales(),
            "CATEGORY",
            &["GROSSSALES"],
            "Share",
        )
        .unwrap();
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["kind"], "pie");
        assert_eq!(json["title"], "Share");
        assert_eq!(json["slices"][0]["label"], "A");
    }
}
