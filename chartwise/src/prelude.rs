//! Prelude for commonly used types and traits in chartwise.

pub use crate::analyzers::{
    ChartKind, ColumnProfile, Recommendation, RecommendationEngine, SemanticType, TypeClassifier,
};
pub use crate::charts::{ChartRenderer, ChartSpec, JsonSpecRenderer};
pub use crate::core::{AnalysisReport, Dataset, DatasetAnalyzer};
pub use crate::error::{ChartwiseError, Result};
pub use crate::formatters::{FormatterConfig, ReportFormatter};
pub use crate::logging::LogConfig;
pub use crate::sources::{CsvSource, DataSource};
