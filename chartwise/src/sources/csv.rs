//! CSV file source implementation.

use super::DataSource;
use crate::core::Dataset;
use crate::error::{ChartwiseError, Result};
use arrow::array::{Array, LargeStringArray, StringArray, StringViewArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::display::array_value_to_string;
use async_trait::async_trait;
use datafusion::prelude::{CsvReadOptions, SessionContext};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Options for configuring CSV file reading.
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Whether the CSV file has a header row
    pub has_header: bool,
    /// Field delimiter (default: ',')
    pub delimiter: u8,
    /// Quote character (default: '"')
    pub quote: u8,
    /// Escape character (default: None)
    pub escape: Option<u8>,
    /// Comment prefix (lines starting with this are ignored)
    pub comment: Option<u8>,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            has_header: true,
            delimiter: b',',
            quote: b'"',
            escape: None,
            comment: None,
        }
    }
}

impl CsvOptions {
    /// Tab-separated values.
    pub fn tsv() -> Self {
        Self {
            delimiter: b'\t',
            ..Self::default()
        }
    }
}

/// A CSV file loaded as raw strings.
///
/// Every column is read as text, so values reach the classifier exactly as written: `75.00`
/// keeps its decimal point and `007` keeps its leading zeros. Empty cells become nulls.
///
/// # Examples
///
/// ```rust,no_run
/// use chartwise::sources::{CsvOptions, CsvSource, DataSource};
///
/// # async fn example() -> chartwise::error::Result<()> {
/// let dataset = CsvSource::new("data/sales.csv")?.load().await?;
///
/// let options = CsvOptions {
///     delimiter: b';',
///     ..Default::default()
/// };
/// let dataset = CsvSource::with_options("data/sales_eu.csv", options)?.load().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
    options: CsvOptions,
}

impl CsvSource {
    /// Creates a new CSV source from a file path.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        Self::with_options(path, CsvOptions::default())
    }

    /// Creates a new CSV source with custom options.
    pub fn with_options(path: impl AsRef<Path>, options: CsvOptions) -> Result<Self> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(ChartwiseError::Configuration(
                "CSV path must not be empty".to_string(),
            ));
        }
        Ok(Self {
            path: path.to_path_buf(),
            options,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn options(&self) -> &CsvOptions {
        &self.options
    }

    fn path_str(&self) -> Result<&str> {
        self.path.to_str().ok_or_else(|| {
            ChartwiseError::Configuration(format!(
                "Path contains invalid UTF-8: {}",
                self.path.display()
            ))
        })
    }

    /// Extension DataFusion should accept, taken from the file itself so `.tsv` and `.txt`
    /// files are not filtered out.
    fn file_extension(&self) -> String {
        self.path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{ext}"))
            .unwrap_or_default()
    }

    fn read_options<'a>(&self, extension: &'a str) -> CsvReadOptions<'a> {
        let mut read_options = CsvReadOptions::new()
            .has_header(self.options.has_header)
            .delimiter(self.options.delimiter)
            .quote(self.options.quote)
            .file_extension(extension);

        if let Some(escape) = self.options.escape {
            read_options = read_options.escape(escape);
        }
        if let Some(comment) = self.options.comment {
            read_options = read_options.comment(comment);
        }
        read_options
    }

    /// Reads only the column names and turns them into an all-text schema.
    #[instrument(skip(self, ctx))]
    async fn text_schema(&self, ctx: &SessionContext, path: &str, extension: &str) -> Result<Schema> {
        let read_options = self.read_options(extension).schema_infer_max_records(1);
        let df = ctx.read_csv(path, read_options).await?;

        let fields: Vec<Field> = df
            .schema()
            .fields()
            .iter()
            .map(|field| Field::new(field.name(), DataType::Utf8, true))
            .collect();

        debug!(columns = fields.len(), "Built text schema from CSV header");
        Ok(Schema::new(fields))
    }

    fn dataset_name(&self) -> String {
        self.path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("dataset")
            .to_string()
    }
}

#[async_trait]
impl DataSource for CsvSource {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn load(&self) -> Result<Dataset> {
        if !self.path.is_file() {
            return Err(ChartwiseError::data_source(
                "CSV",
                format!("File not found: {}", self.path.display()),
            ));
        }

        let path = self.path_str()?;
        let extension = self.file_extension();
        let ctx = SessionContext::new();

        let schema = self
            .text_schema(&ctx, path, &extension)
            .await
            .map_err(|e| {
                ChartwiseError::data_source_with_source(
                    "CSV",
                    format!("Could not read header of {}", self.path.display()),
                    Box::new(e),
                )
            })?;

        let headers: Vec<String> = schema.fields().iter().map(|f| f.name().clone()).collect();
        let df = ctx
            .read_csv(path, self.read_options(&extension).schema(&schema))
            .await?;
        let batches = df.collect().await?;

        let mut columns: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];
        for batch in &batches {
            append_batch(&mut columns, batch)?;
        }

        let dataset = Dataset::from_columns(self.dataset_name(), headers, columns)?;

        info!(
            path = %self.path.display(),
            rows = dataset.row_count(),
            columns = dataset.column_count(),
            "Loaded CSV file"
        );

        Ok(dataset)
    }

    fn description(&self) -> String {
        format!("CSV file: {}", self.path.display())
    }
}

fn append_batch(columns: &mut [Vec<Option<String>>], batch: &RecordBatch) -> Result<()> {
    if batch.num_columns() != columns.len() {
        return Err(ChartwiseError::Internal(format!(
            "batch has {} columns, expected {}",
            batch.num_columns(),
            columns.len()
        )));
    }

    for (cells, array) in columns.iter_mut().zip(batch.columns()) {
        let array: &dyn Array = array.as_ref();
        cells.reserve(array.len());

        if let Some(arr) = array.as_any().downcast_ref::<StringArray>() {
            cells.extend(arr.iter().map(|v| v.map(str::to_string)));
        } else if let Some(arr) = array.as_any().downcast_ref::<StringViewArray>() {
            cells.extend(arr.iter().map(|v| v.map(str::to_string)));
        } else if let Some(arr) = array.as_any().downcast_ref::<LargeStringArray>() {
            cells.extend(arr.iter().map(|v| v.map(str::to_string)));
        } else {
            // Generic fallback - use display representation
            for row in 0..array.len() {
                if array.is_null(row) {
                    cells.push(None);
                } else {
                    cells.push(Some(array_value_to_string(array, row)?));
                }
            }
        }
    }

    Ok(())
}
