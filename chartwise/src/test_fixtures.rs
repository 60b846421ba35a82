//! Common fixtures for tests and benchmarks.
//!
//! Available to this crate's unit tests and, with the `test-utils` feature, to integration
//! tests and benchmarks.

use crate::analyzers::profile_types::{ColumnProfile, SemanticType};
use crate::core::{AnalysisReport, Dataset, DatasetAnalyzer};
use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// `count` values cycling through `labels`.
pub fn cycle_values(labels: &[&str], count: usize) -> Vec<String> {
    labels
        .iter()
        .cycle()
        .take(count)
        .map(|s| s.to_string())
        .collect()
}

/// `count` distinct zero-padded six digit strings, shaped like order numbers.
pub fn id_values(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("{:06}", 100_000 + i)).collect()
}

/// `count` two-decimal prices, 37 distinct values.
pub fn price_values(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| format!("{}.{:02}", 10 + i % 37, (i * 7) % 100))
        .collect()
}

/// A 60-row sales table with a categorical, a numeric and an all-empty column.
pub fn sample_dataset() -> Dataset {
    let regions = cycle_values(&["North", "South", "East"], 60);
    let rows = (0..60)
        .map(|i| {
            vec![
                Some(regions[i].clone()),
                Some(format!("{}.50", i % 25)),
                None,
            ]
        })
        .collect();

    // Fixed, well-formed input
    Dataset::new(
        "sales",
        vec!["region".to_string(), "amount".to_string(), "notes".to_string()],
        rows,
    )
    .unwrap_or_else(|e| panic!("sample dataset is invalid: {e}"))
}

/// Report for [`sample_dataset`], computed on the calling thread.
pub fn sample_report() -> AnalysisReport {
    let dataset = sample_dataset();
    let analyzer = DatasetAnalyzer::builder().parallel(false).build();

    let columns = dataset
        .headers()
        .iter()
        .map(|name| analyzer.analyze_column(&dataset, name))
        .collect::<Result<Vec<_>>>()
        .unwrap_or_else(|e| panic!("sample analysis failed: {e}"));

    AnalysisReport {
        dataset: dataset.name().to_string(),
        row_count: dataset.row_count(),
        column_count: dataset.column_count(),
        columns,
    }
}

/// A finished categorical profile with the given number of distinct values.
///
/// The classifier never labels a column with more than ten distinct values as categorical,
/// so this is the only way to reach the recommendation rule for wide categorical columns.
pub fn categorical_profile(name: &str, unique_count: usize, total_count: usize) -> ColumnProfile {
    ColumnProfile {
        name: name.to_string(),
        total_count,
        null_count: 0,
        unique_count,
        numeric_count: 0,
        date_count: 0,
        boolean_count: 0,
        decimal_count: 0,
        semantic_type: SemanticType::Categorical,
    }
}

/// Write `content` to `dir/file_name` and return the path.
pub fn write_csv(dir: &Path, file_name: &str, content: &str) -> Result<PathBuf> {
    let path = dir.join(file_name);
    fs::write(&path, content)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_report_shape() {
        let report = sample_report();
        let types: Vec<SemanticType> = report.profiles().map(|p| p.semantic_type).collect();

        assert_eq!(
            types,
            [
                SemanticType::Categorical,
                SemanticType::Numeric,
                SemanticType::Unknown
            ]
        );
    }

    #[test]
    fn test_value_generators() {
        assert_eq!(cycle_values(&["a", "b"], 3), ["a", "b", "a"]);
        assert_eq!(id_values(2), ["100000", "100001"]);
        assert!(price_values(100).iter().all(|p| p.contains('.')));
    }
}
