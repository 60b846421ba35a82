//! Chart data preparation and rendering sinks.
//!
//! The recommendation engine only picks a [`ChartKind`]. This module turns a column's raw
//! values into the data that kind of chart is drawn from, and hands the resulting
//! [`ChartSpec`] to a [`ChartRenderer`] that persists it.
//!
//! - Pie, donut, bar, horizontal bar and line charts use value frequencies.
//! - Histograms use ten equal-width bins over the parsed numbers.
//! - Box plots use the five-number summary of the parsed numbers.
//! - Scatter plots pair two numeric columns row by row.

pub mod data;
pub mod render;

pub use data::{ChartData, ChartSpec, FiveNumberSummary, HistogramBin, DEFAULT_HISTOGRAM_BINS};
pub use render::{default_file_name, ChartRenderer, JsonSpecRenderer};

pub use crate::analyzers::recommendations::ChartKind;
