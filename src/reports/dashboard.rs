//! Dashboard Report
//!
//! Assembles one render of the analysis page from an uploaded dataset and a
//! filter selection: the filtered overview, the sales, profit, earnings and
//! CSAT charts, the key metrics and the dividend comparison.

use serde::Serialize;
use std::io::Write;

use crate::charts::{histogram_chart, select_chart_kind, ChartKind, ChartSpec};
use crate::config::Settings;
use crate::display::{format_chart, format_table};
use crate::display::layout::{centered, rule, Rule};
use crate::error::{DashboardError, DashboardResult};
use crate::models::{Column, Dataset, Dimension, FilterSelection, Measure, Table};
use crate::services::aggregate::{AMOUNT_COLUMN, METRIC_COLUMN};
use crate::services::{aggregate_sum, filter, key_metrics, measure_totals, KeyMetrics};

const WIDTH: usize = 72;

/// One titled block of the page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSection {
    pub heading: String,
    /// Usually one chart; a pie over several measures gives one per measure
    pub charts: Vec<ChartSpec>,
}

/// The whole analysis page for one filter selection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    /// Rows in the uploaded dataset
    pub total_rows: usize,
    pub selection: FilterSelection,
    /// Kind forced on every section; `None` keeps the page defaults
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_kind: Option<ChartKind>,
    /// Filtered rows
    pub overview: Table,
    pub sales: ReportSection,
    pub profit: ReportSection,
    pub earnings: ReportSection,
    pub csat: ReportSection,
    pub metrics: KeyMetrics,
    pub dividend: ReportSection,
    #[serde(skip)]
    currency_symbol: String,
}

impl DashboardReport {
    /// Generate the page
    ///
    /// `chart_kind` falls back to the configured default. A selection that
    /// excludes every row still produces a report with zero metrics and
    /// empty charts; check `is_empty`.
    pub fn generate(
        dataset: &Dataset,
        selection: &FilterSelection,
        chart_kind: Option<ChartKind>,
        settings: &Settings,
    ) -> DashboardResult<Self> {
        let filtered = filter(dataset, selection)?;
        let chart_kind = chart_kind.or(settings.default_chart_kind);
        let bins = settings.histogram_bins;

        let sales_table = aggregate_sum(
            &filtered,
            Dimension::Category,
            &[Measure::GrossSales, Measure::NetSales],
        )?
        .to_table();
        let sales = ReportSection {
            heading: "Gross Sales vs. Net Sales by Category".into(),
            charts: section_charts(
                chart_kind.unwrap_or(ChartKind::Bar),
                &sales_table,
                Column::Category.name(),
                &[Column::GrossSales.name(), Column::NetSales.name()],
                "Sales Comparison per Category",
                bins,
            )?,
        };

        let profit_table =
            aggregate_sum(&filtered, Dimension::Country, &[Measure::ProfitAfterTax])?.to_table();
        let profit = ReportSection {
            heading: "Profit After Tax by Country".into(),
            charts: section_charts(
                chart_kind.unwrap_or(ChartKind::Pie),
                &profit_table,
                Column::Country.name(),
                &[Column::ProfitAfterTax.name()],
                "Profit Distribution by Country",
                bins,
            )?,
        };

        let earnings_table =
            aggregate_sum(&filtered, Dimension::Client, &[Measure::RetainedEarnings])?.to_table();
        let earnings = ReportSection {
            heading: "Retained Earnings per Client".into(),
            charts: section_charts(
                chart_kind.unwrap_or(ChartKind::Bar),
                &earnings_table,
                Column::ClientId.name(),
                &[Column::RetainedEarnings.name()],
                "Retained Earnings per Client",
                bins,
            )?,
        };

        let overview = filtered.to_table();
        let csat = ReportSection {
            heading: "CSAT Distribution".into(),
            charts: vec![histogram_chart(
                &overview,
                Column::Csat.name(),
                bins,
                "Customer Satisfaction Score Distribution",
            )?],
        };

        let metrics = key_metrics(&filtered)?;

        let dividend_table =
            measure_totals(&filtered, &[Measure::Dividend, Measure::RetainedEarnings])?;
        let dividend = ReportSection {
            heading: "Dividend vs. Retained Earnings".into(),
            charts: section_charts(
                chart_kind.unwrap_or(ChartKind::Bar),
                &dividend_table,
                METRIC_COLUMN,
                &[AMOUNT_COLUMN],
                "Dividend and Retained Earnings Overview",
                bins,
            )?,
        };

        tracing::info!(
            total = dataset.len(),
            filtered = filtered.len(),
            chart_kind = ?chart_kind,
            "generated dashboard report"
        );

        Ok(Self {
            total_rows: dataset.len(),
            selection: selection.clone(),
            chart_kind,
            overview,
            sales,
            profit,
            earnings,
            csat,
            metrics,
            dividend,
            currency_symbol: settings.currency_symbol.clone(),
        })
    }

    /// True when the selection excluded every row
    pub fn is_empty(&self) -> bool {
        self.overview.is_empty()
    }

    /// Number of rows that passed the filter
    pub fn filtered_rows(&self) -> usize {
        self.overview.len()
    }

    /// Sections in page order, excluding the metrics block
    pub fn sections(&self) -> [&ReportSection; 5] {
        [
            &self.sales,
            &self.profit,
            &self.earnings,
            &self.csat,
            &self.dividend,
        ]
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&centered("Project Financial Analysis Dashboard", WIDTH));
        output.push('\n');
        output.push_str(&rule(Rule::Double, WIDTH));
        output.push('\n');
        output.push_str(&format!(
            "Rows: {} of {}\n",
            self.filtered_rows(),
            self.total_rows
        ));
        if let Some(range) = self.selection.date_range() {
            output.push_str(&format!("Project dates: {}\n", range));
        }
        if self.is_empty() {
            output.push_str(&format!("\nNotice: {}\n", DashboardError::EmptyFilterResult));
        }

        output.push_str("\nFiltered Project Overview\n");
        output.push_str(&rule(Rule::Single, WIDTH));
        output.push('\n');
        output.push_str(&format_table(&self.overview));
        output.push('\n');

        for section in [&self.sales, &self.profit, &self.earnings, &self.csat] {
            self.push_section(&mut output, section);
        }

        output.push_str("\nKey Financial Metrics\n");
        output.push_str(&rule(Rule::Single, WIDTH));
        output.push('\n');
        let symbol = &self.currency_symbol;
        output.push_str(&format!(
            "{:<24} {:>20}\n",
            "Total Gross Sales",
            self.metrics.total_gross_sales.format_with_symbol(symbol)
        ));
        output.push_str(&format!(
            "{:<24} {:>20}\n",
            "Total Net Sales",
            self.metrics.total_net_sales.format_with_symbol(symbol)
        ));
        output.push_str(&format!(
            "{:<24} {:>20}\n",
            "Profit After Tax",
            self.metrics.profit_after_tax.format_with_symbol(symbol)
        ));

        self.push_section(&mut output, &self.dividend);
        output
    }

    fn push_section(&self, output: &mut String, section: &ReportSection) {
        output.push('\n');
        output.push_str(&section.heading);
        output.push('\n');
        output.push_str(&rule(Rule::Single, WIDTH));
        output.push('\n');
        for chart in &section.charts {
            output.push_str(&format_chart(chart));
        }
    }

    /// Export the chart data and metrics to CSV, one value per line
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> DashboardResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        let export_err = |e: csv::Error| DashboardError::Export(e.to_string());

        csv_writer
            .write_record(["Section", "Chart", "Label", "Series", "Value"])
            .map_err(export_err)?;

        for section in self.sections() {
            for chart in &section.charts {
                for (label, series, value) in chart_points(chart) {
                    csv_writer
                        .write_record([
                            section.heading.as_str(),
                            chart.title(),
                            label.as_str(),
                            series.as_str(),
                            value.as_str(),
                        ])
                        .map_err(export_err)?;
                }
            }
        }

        for (name, amount) in [
            ("Total Gross Sales", self.metrics.total_gross_sales),
            ("Total Net Sales", self.metrics.total_net_sales),
            ("Profit After Tax", self.metrics.profit_after_tax),
        ] {
            csv_writer
                .write_record([
                    "Key Financial Metrics",
                    "",
                    name,
                    "",
                    amount.to_decimal_string().as_str(),
                ])
                .map_err(export_err)?;
        }

        csv_writer
            .flush()
            .map_err(|e| DashboardError::Export(e.to_string()))?;
        Ok(())
    }
}

/// Charts for one section; a pie over several measures becomes one pie each
fn section_charts(
    kind: ChartKind,
    table: &Table,
    x_field: &str,
    y_fields: &[&str],
    title: &str,
    bins: usize,
) -> DashboardResult<Vec<ChartSpec>> {
    match kind {
        ChartKind::Pie if y_fields.len() > 1 => y_fields
            .iter()
            .map(|y| {
                select_chart_kind(kind, table, x_field, &[*y], &format!("{} ({})", title, y))
            })
            .collect(),
        ChartKind::Histogram => Ok(vec![histogram_chart(table, x_field, bins, title)?]),
        _ => Ok(vec![select_chart_kind(kind, table, x_field, y_fields, title)?]),
    }
}

/// Flatten a chart into (label, series, value) triples
fn chart_points(chart: &ChartSpec) -> Vec<(String, String, String)> {
    let number = |v: Option<f64>| v.map(|v| format!("{:.2}", v)).unwrap_or_default();
    match chart {
        ChartSpec::Bar(c) => c
            .series
            .iter()
            .flat_map(|s| {
                c.labels
                    .iter()
                    .zip(&s.values)
                    .map(move |(label, value)| (label.clone(), s.name.clone(), number(*value)))
            })
            .collect(),
        ChartSpec::Line(c) => c
            .series
            .iter()
            .flat_map(|s| {
                c.labels
                    .iter()
                    .zip(&s.values)
                    .map(move |(label, value)| (label.clone(), s.name.clone(), number(*value)))
            })
            .collect(),
        ChartSpec::Pie(c) => c
            .slices
            .iter()
            .map(|s| (s.label.clone(), c.values_field.clone(), number(Some(s.value))))
            .collect(),
        ChartSpec::Histogram(c) => c
            .bins
            .iter()
            .map(|b| (b.label.clone(), "count".to_string(), b.count.to_string()))
            .collect(),
    }
}
