//! Error types for the chartwise library.
//!
//! Classification itself never fails: a value that does not parse simply does not count
//! toward that heuristic, and an all-empty column is reported as `Unknown`. Errors are
//! reserved for contract violations at the edges (data sources, dataset construction,
//! chart preparation and rendering). All of them are represented by [`ChartwiseError`].

use thiserror::Error;

/// The main error type for the chartwise library.
#[derive(Error, Debug)]
pub enum ChartwiseError {
    /// The caller handed the core something that breaks its input contract.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Error that occurs when a chart cannot be built from the selected column(s).
    #[error("Cannot build {chart} chart for '{column}': {message}")]
    ChartPreparation {
        /// Chart kind that was requested
        chart: String,
        /// Column (or column pair) the chart was requested for
        column: String,
        /// Detailed error message
        message: String,
    },

    /// Error from DataFusion operations.
    #[error("DataFusion error: {0}")]
    DataFusion(#[from] datafusion::error::DataFusionError),

    /// Error from Arrow operations.
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Error from data source operations.
    #[error("Data source error: {message}")]
    DataSource {
        /// Type of data source (e.g., "CSV")
        source_type: String,
        /// Detailed error message
        message: String,
        /// Optional underlying error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Error from I/O operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error related to configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error from serialization/deserialization operations.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Error when a required column is not found in the dataset.
    #[error("Column '{column}' not found in dataset")]
    ColumnNotFound { column: String },

    /// Generic internal error for unexpected conditions.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A type alias for `Result<T, ChartwiseError>`.
///
/// # Examples
///
/// ```rust
/// use chartwise::error::Result;
///
/// fn load() -> Result<()> {
///     Ok(())
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChartwiseError>;

impl ChartwiseError {
    /// Creates a new invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Creates a new chart preparation error.
    pub fn chart_preparation(
        chart: impl Into<String>,
        column: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::ChartPreparation {
            chart: chart.into(),
            column: column.into(),
            message: message.into(),
        }
    }

    /// Creates a new data source error.
    pub fn data_source(source_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DataSource {
            source_type: source_type.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new data source error with a source error.
    pub fn data_source_with_source(
        source_type: impl Into<String>,
        message: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self::DataSource {
            source_type: source_type.into(),
            message: message.into(),
            source: Some(source),
        }
    }

    /// Creates a column-not-found error.
    pub fn column_not_found(column: impl Into<String>) -> Self {
        Self::ColumnNotFound {
            column: column.into(),
        }
    }
}

impl From<serde_json::Error> for ChartwiseError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_invalid_input_error() {
        let err = ChartwiseError::invalid_input("row 3 has 2 cells, expected 4");
        assert_eq!(err.to_string(), "Invalid input: row 3 has 2 cells, expected 4");
    }

    #[test]
    fn test_chart_preparation_error() {
        let err = ChartwiseError::chart_preparation("histogram", "city", "no numeric values");
        assert_eq!(
            err.to_string(),
            "Cannot build histogram chart for 'city': no numeric values"
        );
    }

    #[test]
    fn test_data_source_error_with_source() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err =
            ChartwiseError::data_source_with_source("CSV", "Could not open sales.csv", Box::new(source));

        assert_eq!(err.to_string(), "Data source error: Could not open sales.csv");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_column_not_found() {
        let err = ChartwiseError::column_not_found("price");
        assert_eq!(err.to_string(), "Column 'price' not found in dataset");
    }

    #[test]
    fn test_serde_json_conversion() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: ChartwiseError = parse_err.into();
        assert!(matches!(err, ChartwiseError::Serialization(_)));
    }
}
