//! Value types produced by the type classifier.
//!
//! A [`ColumnProfile`] is only ever created by finishing a scan over every value of a
//! column (see [`TypeClassifier::finish`](crate::analyzers::inference::TypeClassifier::finish)), so
//! the semantic type it carries is always the final decision for that column.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Inferred meaning of a column's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SemanticType {
    /// Measurable quantities (prices, measurements, counts)
    Numeric,
    /// A small, closed set of labels (payment methods, regions)
    Categorical,
    /// Calendar dates
    Date,
    /// Free-form text, including numeric-looking identifiers
    Text,
    /// Two-valued flags (true/false, yes/no, 1/0, t/f)
    Boolean,
    /// No non-empty value to decide from
    Unknown,
}

impl SemanticType {
    /// Upper-case label used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            SemanticType::Numeric => "NUMERIC",
            SemanticType::Categorical => "CATEGORICAL",
            SemanticType::Date => "DATE",
            SemanticType::Text => "TEXT",
            SemanticType::Boolean => "BOOLEAN",
            SemanticType::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Summary of one column after classification.
///
/// The heuristic tallies (`numeric_count`, `date_count`, `boolean_count`, `decimal_count`)
/// are independent: `"1"` counts as both numeric and boolean.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnProfile {
    /// Column name, unique within its dataset
    pub name: String,
    /// Rows examined, including nulls
    pub total_count: usize,
    /// Rows whose value was absent, empty or whitespace only
    pub null_count: usize,
    /// Distinct trimmed non-null values
    pub unique_count: usize,
    pub numeric_count: usize,
    pub date_count: usize,
    pub boolean_count: usize,
    /// Numeric values written with a decimal point
    pub decimal_count: usize,
    pub semantic_type: SemanticType,
}

impl ColumnProfile {
    /// Number of non-null values.
    pub fn valid_count(&self) -> usize {
        self.total_count - self.null_count
    }

    /// Fraction of rows that were null, `0.0` for an empty column.
    pub fn null_ratio(&self) -> f64 {
        ratio(self.null_count, self.total_count)
    }

    /// Distinct values relative to non-null values, `0.0` when there are none.
    pub fn unique_ratio(&self) -> f64 {
        ratio(self.unique_count, self.valid_count())
    }
}

impl fmt::Display for ColumnProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Column: {}, Type: {}, Total: {}, Unique: {}, Nulls: {}",
            self.name, self.semantic_type, self.total_count, self.unique_count, self.null_count
        )
    }
}

/// `part / whole`, defined as `0.0` when `whole` is zero.
pub(crate) fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}
