//! Sinks that persist prepared charts.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use super::data::ChartSpec;
use crate::error::{ChartwiseError, Result};

/// Persists a [`ChartSpec`] somewhere a chart can be drawn from.
pub trait ChartRenderer {
    /// Render `spec` to `destination` and return the path that was written.
    fn render(&self, spec: &ChartSpec, destination: &Path) -> Result<PathBuf>;

    /// Render into `directory` using [`default_file_name`].
    fn render_to_dir(&self, spec: &ChartSpec, directory: &Path) -> Result<PathBuf> {
        self.render(spec, &directory.join(default_file_name(spec)))
    }
}

/// Writes the chart specification as JSON, for plotting front ends to pick up.
#[derive(Debug, Clone)]
pub struct JsonSpecRenderer {
    pretty: bool,
}

impl JsonSpecRenderer {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    /// Single-line JSON output.
    pub fn compact() -> Self {
        Self { pretty: false }
    }
}

impl Default for JsonSpecRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartRenderer for JsonSpecRenderer {
    #[instrument(skip(self, spec), fields(column = %spec.column, kind = spec.kind.slug()))]
    fn render(&self, spec: &ChartSpec, destination: &Path) -> Result<PathBuf> {
        if let Some(parent) = destination.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    ChartwiseError::Io(std::io::Error::new(
                        e.kind(),
                        format!("Could not create {}: {e}", parent.display()),
                    ))
                })?;
            }
        }

        let body = if self.pretty {
            serde_json::to_string_pretty(spec)?
        } else {
            serde_json::to_string(spec)?
        };
        fs::write(destination, body)?;

        info!(path = %destination.display(), "Chart saved");
        Ok(destination.to_path_buf())
    }
}

/// `"{column}_{kind}.json"`, with anything outside `[a-z0-9_-]` in the column replaced by `_`.
pub fn default_file_name(spec: &ChartSpec) -> String {
    let column: String = spec
        .column
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();

    let column = if column.is_empty() {
        "column".to_string()
    } else {
        column
    };

    format!("{column}_{}.json", spec.kind.slug())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::recommendations::ChartKind;
    use tempfile::TempDir;

    fn pie_spec(column: &str) -> ChartSpec {
        ChartSpec::build(column, ChartKind::Pie, ["a", "b", "a"]).unwrap()
    }

    #[test]
    fn test_default_file_name() {
        assert_eq!(default_file_name(&pie_spec("region")), "region_pie.json");
        assert_eq!(
            default_file_name(&pie_spec("Unit Price ($)")),
            "unit_price____pie.json"
        );

        let scatter = ChartSpec::scatter("h", ["1"], "w", ["2"]).unwrap();
        assert_eq!(default_file_name(&scatter), "h__w_scatter.json");
    }

    #[test]
    fn test_json_renderer_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("nested").join("charts").join("out.json");

        let written = JsonSpecRenderer::new()
            .render(&pie_spec("region"), &target)
            .unwrap();
        assert_eq!(written, target);

        let content = fs::read_to_string(&target).unwrap();
        let parsed: ChartSpec = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, pie_spec("region"));
        assert!(content.contains('\n'));
    }

    #[test]
    fn test_render_to_dir_compact() {
        let dir = TempDir::new().unwrap();
        let written = JsonSpecRenderer::compact()
            .render_to_dir(&pie_spec("region"), dir.path())
            .unwrap();

        assert_eq!(written, dir.path().join("region_pie.json"));
        let content = fs::read_to_string(&written).unwrap();
        assert!(!content.contains('\n'));
    }
}
