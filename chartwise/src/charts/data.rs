//! Chart specifications built from raw column values.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, instrument};

use crate::analyzers::inference::{is_numeric, RawCell};
use crate::analyzers::recommendations::ChartKind;
use crate::error::{ChartwiseError, Result};

/// Number of equal-width bins used for histograms
pub const DEFAULT_HISTOGRAM_BINS: usize = 10;

/// One histogram bin covering `[lower, upper)`; the last bin also includes `upper`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: u64,
}

/// Minimum, quartiles and maximum of a numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FiveNumberSummary {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub mean: f64,
    pub count: usize,
}

impl FiveNumberSummary {
    /// Summary of `values`, or `None` when there are none.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let mean = sorted.iter().sum::<f64>() / sorted.len() as f64;
        Some(Self {
            min: sorted[0],
            q1: quantile(&sorted, 0.25),
            median: quantile(&sorted, 0.5),
            q3: quantile(&sorted, 0.75),
            max: sorted[sorted.len() - 1],
            mean,
            count: sorted.len(),
        })
    }

    /// Distance between the first and third quartile.
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

/// Linear interpolation between closest ranks over already sorted values.
fn quantile(sorted: &[f64], p: f64) -> f64 {
    let position = p * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let weight = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * weight
}

/// Data a chart is drawn from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChartData {
    /// Value and number of occurrences
    Frequencies { entries: Vec<(String, u64)> },
    Histogram { bins: Vec<HistogramBin> },
    BoxPlot { summary: FiveNumberSummary },
    Scatter { points: Vec<(f64, f64)> },
}

/// Everything a renderer needs to draw one chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub column: String,
    pub kind: ChartKind,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub data: ChartData,
}

impl ChartSpec {
    /// Prepare a single-column chart from the column's raw values.
    ///
    /// Frequency charts skip null cells and count trimmed values. Pie, donut and bar charts
    /// list the most frequent values first; line charts keep first-appearance order so the
    /// sequence of the source rows is preserved. Numeric charts skip cells that do not
    /// parse and fail when none do.
    #[instrument(level = "debug", skip(values))]
    pub fn build<I>(column: &str, kind: ChartKind, values: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: RawCell,
    {
        let (title, x_label, y_label, data) = match kind {
            ChartKind::Pie | ChartKind::Donut => (
                format!("{column} Distribution"),
                column.to_string(),
                "Count".to_string(),
                ChartData::Frequencies {
                    entries: frequencies_by_count(values),
                },
            ),
            ChartKind::Bar => (
                format!("{column} Frequency"),
                column.to_string(),
                "Count".to_string(),
                ChartData::Frequencies {
                    entries: frequencies_by_count(values),
                },
            ),
            ChartKind::HorizontalBar => (
                format!("{column} Frequency"),
                "Count".to_string(),
                column.to_string(),
                ChartData::Frequencies {
                    entries: frequencies_by_count(values),
                },
            ),
            ChartKind::Line => (
                format!("{column} Trend"),
                column.to_string(),
                "Count".to_string(),
                ChartData::Frequencies {
                    entries: frequencies_in_order(values),
                },
            ),
            ChartKind::Histogram => {
                let numbers = numeric_values(kind, column, values)?;
                (
                    format!("{column} Distribution"),
                    column.to_string(),
                    "Frequency".to_string(),
                    ChartData::Histogram {
                        bins: histogram(&numbers, DEFAULT_HISTOGRAM_BINS),
                    },
                )
            }
            ChartKind::BoxPlot => {
                let numbers = numeric_values(kind, column, values)?;
                let summary = FiveNumberSummary::from_values(&numbers).ok_or_else(|| {
                    ChartwiseError::chart_preparation(kind.slug(), column, "no numeric values")
                })?;
                (
                    format!("{column} Distribution"),
                    column.to_string(),
                    "Value".to_string(),
                    ChartData::BoxPlot { summary },
                )
            }
            ChartKind::Scatter => {
                return Err(ChartwiseError::chart_preparation(
                    kind.slug(),
                    column,
                    "scatter plots need two columns, use ChartSpec::scatter",
                ))
            }
        };

        debug!(column, kind = kind.slug(), "Prepared chart data");

        Ok(Self {
            column: column.to_string(),
            kind,
            title,
            x_label,
            y_label,
            data,
        })
    }

    /// Prepare a scatter plot pairing two columns row by row.
    ///
    /// Rows where either cell is null or not numeric are skipped.
    pub fn scatter<X, Y>(x_column: &str, x_values: X, y_column: &str, y_values: Y) -> Result<Self>
    where
        X: IntoIterator,
        X::Item: RawCell,
        Y: IntoIterator,
        Y::Item: RawCell,
    {
        let pair_name = format!("{x_column}, {y_column}");
        let xs: Vec<X::Item> = x_values.into_iter().collect();
        let ys: Vec<Y::Item> = y_values.into_iter().collect();

        if xs.len() != ys.len() {
            return Err(ChartwiseError::invalid_input(format!(
                "scatter columns differ in length: '{x_column}' has {} rows, '{y_column}' has {}",
                xs.len(),
                ys.len()
            )));
        }

        let points: Vec<(f64, f64)> = xs
            .iter()
            .zip(ys.iter())
            .filter_map(|(x, y)| Some((parse_number(x.as_cell())?, parse_number(y.as_cell())?)))
            .collect();

        if points.is_empty() {
            return Err(ChartwiseError::chart_preparation(
                ChartKind::Scatter.slug(),
                pair_name,
                "no valid numeric pairs found",
            ));
        }

        Ok(Self {
            column: pair_name,
            kind: ChartKind::Scatter,
            title: format!("{x_column} vs {y_column}"),
            x_label: x_column.to_string(),
            y_label: y_column.to_string(),
            data: ChartData::Scatter { points },
        })
    }
}

fn trimmed_cells<I>(values: I) -> impl Iterator<Item = String>
where
    I: IntoIterator,
    I::Item: RawCell,
{
    values.into_iter().filter_map(|cell| {
        cell.as_cell()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    })
}

/// Counts per value, in first-appearance order.
fn frequencies_in_order<I>(values: I) -> Vec<(String, u64)>
where
    I: IntoIterator,
    I::Item: RawCell,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut entries: Vec<(String, u64)> = Vec::new();

    for value in trimmed_cells(values) {
        match index.get(&value) {
            Some(&i) => entries[i].1 += 1,
            None => {
                index.insert(value.clone(), entries.len());
                entries.push((value, 1));
            }
        }
    }

    entries
}

/// Counts per value, most frequent first, ties by value.
fn frequencies_by_count<I>(values: I) -> Vec<(String, u64)>
where
    I: IntoIterator,
    I::Item: RawCell,
{
    let mut entries = frequencies_in_order(values);
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries
}

fn parse_number(cell: Option<&str>) -> Option<f64> {
    let value = cell?.trim();
    if is_numeric(value) {
        value.parse::<f64>().ok()
    } else {
        None
    }
}

fn numeric_values<I>(kind: ChartKind, column: &str, values: I) -> Result<Vec<f64>>
where
    I: IntoIterator,
    I::Item: RawCell,
{
    let numbers: Vec<f64> = values
        .into_iter()
        .filter_map(|cell| parse_number(cell.as_cell()))
        .collect();

    if numbers.is_empty() {
        return Err(ChartwiseError::chart_preparation(
            kind.slug(),
            column,
            format!("No numeric values found in column: {column}"),
        ));
    }

    Ok(numbers)
}

/// Equal-width bins spanning the minimum to the maximum value.
fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if bins == 0 || values.is_empty() {
        return Vec::new();
    }

    if max == min {
        return vec![HistogramBin {
            lower: min,
            upper: max,
            count: values.len() as u64,
        }];
    }

    let width = (max - min) / bins as f64;
    let mut result: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            lower: min + width * i as f64,
            upper: if i + 1 == bins {
                max
            } else {
                min + width * (i + 1) as f64
            },
            count: 0,
        })
        .collect();

    for &value in values {
        let idx = (((value - min) / width).floor() as usize).min(bins - 1);
        result[idx].count += 1;
    }

    result
}
