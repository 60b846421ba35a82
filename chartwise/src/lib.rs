//! # chartwise - column type inference and chart recommendation
//!
//! chartwise looks at the raw string values of a tabular dataset, decides what each column
//! *means* (a measurement, a category, a date, a yes/no flag, free text) and recommends the
//! charts that suit it, best fit first, with a reason and an optional warning for each.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chartwise::prelude::*;
//!
//! # async fn example() -> chartwise::error::Result<()> {
//! let dataset = CsvSource::new("sales.csv")?.load().await?;
//! let report = DatasetAnalyzer::new().analyze(&dataset).await?;
//!
//! for column in &report.columns {
//!     if let Some(best) = column.best() {
//!         println!("{}: {}", column.profile.name, best.chart_kind);
//!     }
//! }
//!
//! // Prepare the data for the top chart of the first column and save it as JSON
//! let first = &report.columns[0];
//! if let Some(best) = first.best() {
//!     let values = dataset.column_values(&first.profile.name)?;
//!     let spec = ChartSpec::build(&first.profile.name, best.chart_kind, values)?;
//!     JsonSpecRenderer::new().render_to_dir(&spec, std::path::Path::new("charts"))?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Classification
//!
//! Values are trimmed, and empty cells count as nulls. The first rule that holds wins:
//!
//! 1. no non-null values: `UNKNOWN`
//! 2. at least 80% parse as dates: `DATE`
//! 3. at least 80% are boolean tokens: `BOOLEAN`
//! 4. at least 80% are numbers: `NUMERIC`, unless the column looks like an identifier
//!    (at least 100 values, 90% distinct, almost no decimals), which is `TEXT`
//! 5. fewer than 20% distinct and at most 10 distinct values: `CATEGORICAL`
//! 6. otherwise `TEXT`
//!
//! All thresholds are configurable through [`analyzers::TypeClassifier::builder`].
//!
//! ## Architecture
//!
//! - **`analyzers`**: the type classifier, column profiles and the recommendation engine
//! - **`core`**: in-memory datasets and whole-dataset analysis
//! - **`sources`**: data source connectors (CSV through DataFusion)
//! - **`charts`**: chart data preparation and renderers
//! - **`formatters`**: human, JSON and Markdown reports
//! - **`logging`**: `tracing` configuration helpers

pub mod analyzers;
pub mod charts;
pub mod core;
pub mod error;
pub mod formatters;
pub mod logging;
pub mod prelude;
pub mod sources;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_fixtures;
