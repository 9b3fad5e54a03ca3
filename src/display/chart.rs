//! Chart display formatting
//!
//! Draws chart descriptions as labelled text bars.

use super::layout::{fit, meter, share};
use crate::charts::{ChartSpec, Series};

const LABEL_WIDTH: usize = 18;
const BAR_WIDTH: usize = 30;

/// Render a chart as text, one line per bar, slice, point or bucket
pub fn format_chart(chart: &ChartSpec) -> String {
    let mut output = format!("{} [{}]\n", chart.title(), chart.kind());
    if chart.is_empty() {
        output.push_str("  (no data)\n");
        return output;
    }

    match chart {
        ChartSpec::Bar(bar) => push_series(&mut output, &bar.labels, &bar.series, bar.show_values),
        ChartSpec::Line(line) => push_series(&mut output, &line.labels, &line.series, true),
        ChartSpec::Pie(pie) => {
            let total = pie.total();
            for slice in &pie.slices {
                output.push_str(&format!(
                    "  {} {} {:>7}  {:.2}\n",
                    fit(&slice.label, LABEL_WIDTH),
                    meter(slice.value, total, BAR_WIDTH),
                    share(slice.value, total),
                    slice.value
                ));
            }
        }
        ChartSpec::Histogram(hist) => {
            let max = hist.bins.iter().map(|b| b.count).max().unwrap_or(0) as f64;
            for bin in &hist.bins {
                output.push_str(&format!(
                    "  {} {} {}\n",
                    fit(&bin.label, LABEL_WIDTH),
                    meter(bin.count as f64, max, BAR_WIDTH),
                    bin.count
                ));
            }
        }
    }
    output
}

fn push_series(output: &mut String, labels: &[String], series: &[Series], show_values: bool) {
    let max = series
        .iter()
        .filter_map(Series::max)
        .fold(0.0_f64, f64::max);

    for s in series {
        if series.len() > 1 {
            output.push_str(&format!("  {}\n", s.name));
        }
        for (name, value) in labels.iter().zip(&s.values) {
            let value_text = match (show_values, value) {
                (true, Some(v)) => format!("{:.2}", v),
                (true, None) => "-".to_string(),
                (false, _) => String::new(),
            };
            output.push_str(&format!(
                "  {} {} {}\n",
                fit(name, LABEL_WIDTH),
                meter(value.unwrap_or(0.0), max, BAR_WIDTH),
                value_text
            ));
        }
    }
}
