//! Histogram bucketing
//!
//! Numeric columns are split into equal-width buckets between the smallest
//! and largest value. Text columns get one bucket per distinct label.

use serde::Serialize;

use crate::models::Cell;

/// Bucket count used when none is configured
pub const DEFAULT_BINS: usize = 10;

/// One histogram bucket
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bin {
    pub label: String,
    /// Lower edge (inclusive); absent for label buckets
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<f64>,
    /// Upper edge (exclusive except on the last bucket); absent for label buckets
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<f64>,
    pub count: usize,
}

/// Bucket the non-empty cells of one column
///
/// The column is treated as numeric when every non-empty cell is numeric.
/// A `bins` of zero is treated as one.
pub fn bucket_cells<'a, I>(cells: I, bins: usize) -> Vec<Bin>
where
    I: IntoIterator<Item = &'a Cell>,
{
    let cells: Vec<&Cell> = cells.into_iter().filter(|c| !c.is_empty()).collect();
    if cells.is_empty() {
        return Vec::new();
    }

    if cells.iter().all(|c| c.is_numeric()) {
        let values: Vec<f64> = cells.iter().filter_map(|c| c.as_f64()).collect();
        numeric_bins(&values, bins.max(1))
    } else {
        label_bins(cells.iter().map(|c| c.to_string()))
    }
}

fn numeric_bins(values: &[f64], bins: usize) -> Vec<Bin> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if min == max {
        return vec![Bin {
            label: format!("[{}, {}]", edge(min), edge(max)),
            start: Some(min),
            end: Some(max),
            count: values.len(),
        }];
    }

    let width = (max - min) / bins as f64;
    let mut counts = vec![0usize; bins];
    for value in values {
        let idx = (((value - min) / width).floor() as usize).min(bins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| {
            let start = min + width * i as f64;
            let last = i == bins - 1;
            let end = if last { max } else { min + width * (i + 1) as f64 };
            let close = if last { ']' } else { ')' };
            Bin {
                label: format!("[{}, {}{}", edge(start), edge(end), close),
                start: Some(start),
                end: Some(end),
                count,
            }
        })
        .collect()
}

fn label_bins<I: Iterator<Item = String>>(labels: I) -> Vec<Bin> {
    let mut bins: Vec<Bin> = Vec::new();
    for label in labels {
        match bins.iter_mut().find(|b| b.label == label) {
            Some(bin) => bin.count += 1,
            None => bins.push(Bin {
                label,
                start: None,
                end: None,
                count: 1,
            }),
        }
    }
    bins
}

fn edge(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    format!("{}", rounded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    fn numbers(values: &[f64]) -> Vec<Cell> {
        values.iter().map(|v| Cell::Number(*v)).collect()
    }

    #[test]
    fn test_equal_width_buckets() {
        let cells = numbers(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let bins = bucket_cells(&cells, 4);

        assert_eq!(bins.len(), 4);
        assert_eq!(bins[0].start, Some(1.0));
        assert_eq!(bins[3].end, Some(5.0));
        let counts: Vec<_> = bins.iter().map(|b| b.count).collect();
        // The maximum lands in the closed last bucket
        assert_eq!(counts, vec![1, 1, 1, 2]);
        assert_eq!(bins[0].label, "[1, 2)");
        assert_eq!(bins[3].label, "[4, 5]");
    }

    #[test]
    fn test_counts_sum_to_non_empty_cells() {
        let mut cells = numbers(&[4.5, 3.0, 5.0, 1.2, 4.9, 2.2]);
        cells.push(Cell::Empty);
        let bins = bucket_cells(&cells, DEFAULT_BINS);

        assert_eq!(bins.len(), DEFAULT_BINS);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 6);
    }

    #[test]
    fn test_single_value_gives_one_bucket() {
        let cells = numbers(&[3.0, 3.0, 3.0]);
        let bins = bucket_cells(&cells, 10);
        assert_eq!(bins.len(), 1);
        assert_eq!(bins[0].count, 3);
    }

    #[test]
    fn test_money_cells_are_numeric() {
        let cells = vec![
            Cell::Money(Money::from_cents(100)),
            Cell::Money(Money::from_cents(300)),
        ];
        let bins = bucket_cells(&cells, 2);
        assert_eq!(bins[0].start, Some(1.0));
        assert_eq!(bins[1].count, 1);
    }

    #[test]
    fn test_text_cells_count_labels() {
        let cells: Vec<Cell> = ["A", "B", "A", "C", "A"].iter().map(|s| Cell::from(*s)).collect();
        let bins = bucket_cells(&cells, 10);

        let summary: Vec<_> = bins.iter().map(|b| (b.label.as_str(), b.count)).collect();
        assert_eq!(summary, vec![("A", 3), ("B", 1), ("C", 1)]);
        assert!(bins[0].start.is_none());
    }

    #[test]
    fn test_empty_column_has_no_buckets() {
        let cells = vec![Cell::Empty, Cell::Empty];
        assert!(bucket_cells(&cells, 10).is_empty());
    }
}
