//! Data sources that produce a [`Dataset`] for analysis.

use crate::core::Dataset;
use crate::error::Result;
use async_trait::async_trait;
use std::fmt::Debug;

mod csv;

pub use csv::{CsvOptions, CsvSource};

/// Anything that can hand the analyzers a table of raw string cells.
///
/// Sources own file formats, delimiters and encodings. The dataset they return must have
/// unique column names and rows of equal length.
#[async_trait]
pub trait DataSource: Debug + Send + Sync {
    /// Reads the whole source into memory.
    async fn load(&self) -> Result<Dataset>;

    /// Returns a human-readable description of this data source.
    fn description(&self) -> String;
}

/// A dataset that is already in memory.
#[derive(Debug, Clone)]
pub struct MemorySource {
    dataset: Dataset,
}

impl MemorySource {
    pub fn new(dataset: Dataset) -> Self {
        Self { dataset }
    }
}

#[async_trait]
impl DataSource for MemorySource {
    async fn load(&self) -> Result<Dataset> {
        Ok(self.dataset.clone())
    }

    fn description(&self) -> String {
        format!(
            "In-memory dataset '{}' ({} rows)",
            self.dataset.name(),
            self.dataset.row_count()
        )
    }
}
