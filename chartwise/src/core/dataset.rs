//! In-memory tabular data handed to the analyzers.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::error::{ChartwiseError, Result};

/// An ordered set of named columns holding raw, optional string cells.
///
/// Values are stored column by column so a column can be handed to a worker without copying.
/// Every column has the same number of cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    name: String,
    headers: Vec<String>,
    columns: Vec<Arc<Vec<Option<String>>>>,
    row_count: usize,
}

impl Dataset {
    /// Build a dataset from positional rows.
    ///
    /// Headers are trimmed. Duplicate headers (compared case-insensitively) and rows whose
    /// length differs from the header count are rejected.
    pub fn new(
        name: impl Into<String>,
        headers: Vec<String>,
        rows: Vec<Vec<Option<String>>>,
    ) -> Result<Self> {
        let headers = normalize_headers(headers)?;
        let mut columns: Vec<Vec<Option<String>>> =
            headers.iter().map(|_| Vec::with_capacity(rows.len())).collect();

        let row_count = rows.len();
        for (index, row) in rows.into_iter().enumerate() {
            if row.len() != headers.len() {
                return Err(ChartwiseError::invalid_input(format!(
                    "row {} has {} cells, expected {}",
                    index + 1,
                    row.len(),
                    headers.len()
                )));
            }
            for (column, cell) in columns.iter_mut().zip(row) {
                column.push(cell);
            }
        }

        Ok(Self {
            name: name.into(),
            headers,
            columns: columns.into_iter().map(Arc::new).collect(),
            row_count,
        })
    }

    /// Build a dataset from column-major cells, one vector per header.
    pub fn from_columns(
        name: impl Into<String>,
        headers: Vec<String>,
        columns: Vec<Vec<Option<String>>>,
    ) -> Result<Self> {
        let headers = normalize_headers(headers)?;
        if columns.len() != headers.len() {
            return Err(ChartwiseError::invalid_input(format!(
                "{} columns supplied for {} headers",
                columns.len(),
                headers.len()
            )));
        }

        let row_count = columns.first().map_or(0, Vec::len);
        if let Some((header, column)) = headers
            .iter()
            .zip(columns.iter())
            .find(|(_, c)| c.len() != row_count)
        {
            return Err(ChartwiseError::invalid_input(format!(
                "column '{header}' has {} cells, expected {row_count}",
                column.len()
            )));
        }

        Ok(Self {
            name: name.into(),
            headers,
            columns: columns.into_iter().map(Arc::new).collect(),
            row_count,
        })
    }

    /// Build a dataset from rows keyed by column name.
    ///
    /// A header missing from a row is a null cell. A key that is not a header is rejected.
    pub fn from_named_rows<R>(
        name: impl Into<String>,
        headers: Vec<String>,
        rows: R,
    ) -> Result<Self>
    where
        R: IntoIterator<Item = HashMap<String, Option<String>>>,
    {
        let headers = normalize_headers(headers)?;
        let positions: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.to_lowercase(), i))
            .collect();

        let mut positional = Vec::new();
        for (index, row) in rows.into_iter().enumerate() {
            let mut cells = vec![None; headers.len()];
            for (key, value) in row {
                let Some(&position) = positions.get(&key.trim().to_lowercase()) else {
                    return Err(ChartwiseError::invalid_input(format!(
                        "row {} has unknown column '{key}'",
                        index + 1
                    )));
                };
                cells[position] = value;
            }
            positional.push(cells);
        }

        Self::new(name, headers, positional)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    /// Position of a column, matching exactly first and then ignoring case and whitespace.
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == column).or_else(|| {
            let wanted = column.trim().to_lowercase();
            self.headers.iter().position(|h| h.to_lowercase() == wanted)
        })
    }

    /// Raw cells of a column, in row order.
    pub fn column_values(&self, column: &str) -> Result<&[Option<String>]> {
        self.column_index(column)
            .map(|i| self.columns[i].as_slice())
            .ok_or_else(|| ChartwiseError::column_not_found(column))
    }

    /// Shared handle to a column's cells, for moving onto another thread.
    pub(crate) fn column_handle(&self, index: usize) -> Arc<Vec<Option<String>>> {
        Arc::clone(&self.columns[index])
    }

    /// Iterate over `(header, cells)` pairs in header order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &[Option<String>])> {
        self.headers
            .iter()
            .zip(self.columns.iter())
            .map(|(h, c)| (h.as_str(), c.as_slice()))
    }
}

fn normalize_headers(headers: Vec<String>) -> Result<Vec<String>> {
    let mut seen = HashSet::new();
    let mut normalized = Vec::with_capacity(headers.len());

    for header in headers {
        let header = header.trim().to_string();
        if !seen.insert(header.to_lowercase()) {
            return Err(ChartwiseError::invalid_input(format!(
                "duplicate column name '{header}'"
            )));
        }
        normalized.push(header);
    }

    Ok(normalized)
}
