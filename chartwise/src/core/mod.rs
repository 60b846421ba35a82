//! Datasets and whole-dataset analysis.
//!
//! A [`Dataset`] holds a table of raw string cells, usually produced by a
//! [`DataSource`](crate::sources::DataSource). [`DatasetAnalyzer`] classifies every column and
//! collects the recommendations into an [`AnalysisReport`].
//!
//! ## Example
//!
//! ```rust
//! use chartwise::core::{Dataset, DatasetAnalyzer};
//! use chartwise::analyzers::SemanticType;
//!
//! # async fn example() -> chartwise::error::Result<()> {
//! let dataset = Dataset::new(
//!     "survey",
//!     vec!["answer".to_string()],
//!     vec![vec![Some("yes".to_string())], vec![Some("no".to_string())]],
//! )?;
//!
//! let report = DatasetAnalyzer::new().analyze(&dataset).await?;
//! assert_eq!(report.columns[0].profile.semantic_type, SemanticType::Boolean);
//! # Ok(())
//! # }
//! ```

pub mod analyzer;
pub mod dataset;

pub use analyzer::{AnalysisReport, ColumnAnalysis, DatasetAnalyzer, DatasetAnalyzerBuilder};
pub use dataset::Dataset;
