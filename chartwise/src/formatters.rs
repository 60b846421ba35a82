//! Report formatting for analysis results.
//!
//! This module renders an [`AnalysisReport`] for people (terminal text, Markdown) or for
//! programs (JSON). Recommendation order is always preserved.
//!
//! # Examples
//!
//! ```rust
//! use chartwise::formatters::{FormatterConfig, HumanFormatter, ReportFormatter};
//! use chartwise::core::AnalysisReport;
//!
//! let report = AnalysisReport {
//!     dataset: "empty".to_string(),
//!     row_count: 0,
//!     column_count: 0,
//!     columns: Vec::new(),
//! };
//!
//! let output = HumanFormatter::with_config(FormatterConfig::plain())
//!     .format(&report)
//!     .unwrap();
//! assert!(output.contains("Dataset: empty (0 rows, 0 columns)"));
//! ```

use crate::analyzers::recommendations::Recommendation;
use crate::core::{AnalysisReport, ColumnAnalysis};
use crate::error::{ChartwiseError, Result};
use std::borrow::Cow;
use std::fmt::{self, Write};

const BOLD: &str = "\x1b[1m";
const CYAN: &str = "\x1b[36m";
const YELLOW: &str = "\x1b[33m";
const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";

/// Configuration options for formatting analysis reports.
#[derive(Debug, Clone, PartialEq)]
pub struct FormatterConfig {
    /// Include per-column chart recommendations
    pub include_recommendations: bool,
    /// Include total and null counts for each column
    pub include_statistics: bool,
    /// Maximum recommendations shown per column (`None` for all)
    pub max_recommendations: Option<usize>,
    /// Whether to use ANSI colours (human formatter)
    pub use_colors: bool,
    /// Whether to use emoji and box-drawing characters (human formatter)
    pub use_unicode: bool,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            include_recommendations: true,
            include_statistics: true,
            max_recommendations: None,
            use_colors: true,
            use_unicode: true,
        }
    }
}

impl FormatterConfig {
    /// Creates a minimal configuration showing only the column table.
    pub fn minimal() -> Self {
        Self {
            include_recommendations: false,
            include_statistics: false,
            max_recommendations: Some(0),
            use_colors: false,
            use_unicode: false,
        }
    }

    /// Everything, rendered with plain ASCII and no colours.
    pub fn plain() -> Self {
        Self {
            use_colors: false,
            use_unicode: false,
            ..Self::default()
        }
    }

    pub fn with_recommendations(mut self, include: bool) -> Self {
        self.include_recommendations = include;
        self
    }

    pub fn with_statistics(mut self, include: bool) -> Self {
        self.include_statistics = include;
        self
    }

    /// Sets the maximum number of recommendations shown per column.
    pub fn with_max_recommendations(mut self, max: usize) -> Self {
        self.max_recommendations = Some(max);
        self
    }

    /// Sets whether to use colorized output.
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Sets whether to use emoji and box-drawing characters.
    pub fn with_unicode(mut self, use_unicode: bool) -> Self {
        self.use_unicode = use_unicode;
        self
    }

    fn visible<'a>(&self, recommendations: &'a [Recommendation]) -> &'a [Recommendation] {
        if !self.include_recommendations {
            return &[];
        }
        match self.max_recommendations {
            Some(max) => &recommendations[..max.min(recommendations.len())],
            None => recommendations,
        }
    }

    fn paint(&self, text: &str, color: &str) -> String {
        if self.use_colors {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}

/// Trait for formatting analysis reports into different output formats.
///
/// # Examples
///
/// ```rust
/// use chartwise::formatters::ReportFormatter;
/// use chartwise::core::AnalysisReport;
///
/// struct CountFormatter;
///
/// impl ReportFormatter for CountFormatter {
///     fn format(&self, report: &AnalysisReport) -> chartwise::error::Result<String> {
///         Ok(format!("{} columns", report.columns.len()))
///     }
/// }
/// ```
pub trait ReportFormatter {
    /// Formats a report into a string representation.
    fn format(&self, report: &AnalysisReport) -> Result<String>;

    /// Formats a report with custom configuration.
    fn format_with_config(&self, report: &AnalysisReport, _config: &FormatterConfig) -> Result<String> {
        // Default implementation ignores config and uses standard format
        self.format(report)
    }
}

fn render_failed(format: &str, err: fmt::Error) -> ChartwiseError {
    ChartwiseError::Internal(format!("Failed to render {format} report: {err}"))
}

/// Formats reports as structured JSON.
#[derive(Debug, Clone)]
pub struct JsonFormatter {
    config: FormatterConfig,
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter with default configuration.
    pub fn new() -> Self {
        Self {
            config: FormatterConfig::default(),
            pretty: true,
        }
    }

    /// Creates a new JSON formatter with the specified configuration.
    pub fn with_config(config: FormatterConfig) -> Self {
        Self {
            config,
            pretty: true,
        }
    }

    /// Sets whether to use pretty-printed JSON.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Drops recommendations the configuration hides, borrowing when nothing changes.
fn filter_report<'a>(report: &'a AnalysisReport, config: &FormatterConfig) -> Cow<'a, AnalysisReport> {
    let unchanged = report
        .columns
        .iter()
        .all(|c| config.visible(&c.recommendations).len() == c.recommendations.len());
    if unchanged {
        return Cow::Borrowed(report);
    }

    let mut filtered = report.clone();
    for column in &mut filtered.columns {
        let keep = config.visible(&column.recommendations).len();
        column.recommendations.truncate(keep);
    }
    Cow::Owned(filtered)
}

impl ReportFormatter for JsonFormatter {
    fn format(&self, report: &AnalysisReport) -> Result<String> {
        self.format_with_config(report, &self.config)
    }

    fn format_with_config(&self, report: &AnalysisReport, config: &FormatterConfig) -> Result<String> {
        let filtered = filter_report(report, config);

        if self.pretty {
            serde_json::to_string_pretty(filtered.as_ref()).map_err(|e| {
                ChartwiseError::Internal(format!("Failed to serialize report to JSON: {e}"))
            })
        } else {
            serde_json::to_string(filtered.as_ref()).map_err(|e| {
                ChartwiseError::Internal(format!("Failed to serialize report to JSON: {e}"))
            })
        }
    }
}

/// Formats reports for a terminal, in the layout of the interactive column picker.
#[derive(Debug, Clone)]
pub struct HumanFormatter {
    config: FormatterConfig,
}

impl HumanFormatter {
    /// Creates a new human formatter with default configuration.
    pub fn new() -> Self {
        Self {
            config: FormatterConfig::default(),
        }
    }

    /// Creates a new human formatter with the specified configuration.
    pub fn with_config(config: FormatterConfig) -> Self {
        Self { config }
    }

    fn write_report(
        &self,
        output: &mut String,
        report: &AnalysisReport,
        config: &FormatterConfig,
    ) -> fmt::Result {
        let unicode = config.use_unicode;

        writeln!(output)?;
        let heading = format!(
            "Dataset: {} ({} rows, {} columns)",
            report.dataset, report.row_count, report.column_count
        );
        if unicode {
            writeln!(output, "📊 {}", config.paint(&heading, BOLD))?;
        } else {
            writeln!(output, "{}", config.paint(&heading, BOLD))?;
        }

        writeln!(output)?;
        writeln!(output, "{}", rule(unicode))?;
        writeln!(output, "AVAILABLE COLUMNS")?;
        writeln!(output, "{}", rule(unicode))?;
        writeln!(output)?;

        for (i, column) in report.columns.iter().enumerate() {
            let profile = &column.profile;
            writeln!(
                output,
                "{:2}. {:<25} [{}] - {} unique values",
                i + 1,
                profile.name,
                config.paint(profile.semantic_type.label(), CYAN),
                profile.unique_count
            )?;
            if config.include_statistics {
                let stats = format!(
                    "Total: {}, Nulls: {}",
                    profile.total_count, profile.null_count
                );
                writeln!(output, "    {}", config.paint(&stats, DIM))?;
            }
        }

        if !config.include_recommendations {
            return writeln!(output);
        }

        writeln!(output)?;
        writeln!(output, "{}", rule(unicode))?;
        writeln!(output, "RECOMMENDED CHARTS")?;
        writeln!(output, "{}", rule(unicode))?;

        for column in &report.columns {
            self.write_column(output, column, config)?;
        }

        writeln!(output)
    }

    fn write_column(
        &self,
        output: &mut String,
        column: &ColumnAnalysis,
        config: &FormatterConfig,
    ) -> fmt::Result {
        let profile = &column.profile;

        writeln!(output)?;
        if config.use_unicode {
            writeln!(
                output,
                "📈 {} [{}]",
                config.paint(&profile.name, BOLD),
                profile.semantic_type
            )?;
        } else {
            writeln!(
                output,
                "{} [{}]",
                config.paint(&profile.name, BOLD),
                profile.semantic_type
            )?;
        }

        if column.recommendations.is_empty() {
            let message = "No chart recommendations available for this column.";
            if config.use_unicode {
                writeln!(output, "   ❌ {message}")?;
            } else {
                writeln!(output, "   {message}")?;
            }
            return Ok(());
        }

        let visible = config.visible(&column.recommendations);
        for (i, rec) in visible.iter().enumerate() {
            writeln!(
                output,
                "{:>4}. {} (Priority: {})",
                i + 1,
                rec.chart_kind.label(),
                rec.priority
            )?;
            if config.use_unicode {
                writeln!(output, "      💡 {}", rec.reason)?;
            } else {
                writeln!(output, "      Reason: {}", rec.reason)?;
            }
            if let Some(warning) = rec.warning.as_deref().filter(|w| !w.is_empty()) {
                let warning = config.paint(warning, YELLOW);
                if config.use_unicode {
                    writeln!(output, "      ⚠️  {warning}")?;
                } else {
                    writeln!(output, "      Warning: {warning}")?;
                }
            }
        }

        let hidden = column.recommendations.len() - visible.len();
        if hidden > 0 {
            writeln!(output, "      ... and {hidden} more")?;
        }

        Ok(())
    }
}

fn rule(unicode: bool) -> String {
    if unicode {
        "═".repeat(50)
    } else {
        "=".repeat(50)
    }
}

impl Default for HumanFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for HumanFormatter {
    fn format(&self, report: &AnalysisReport) -> Result<String> {
        self.format_with_config(report, &self.config)
    }

    fn format_with_config(&self, report: &AnalysisReport, config: &FormatterConfig) -> Result<String> {
        let mut output = String::new();
        self.write_report(&mut output, report, config)
            .map_err(|e| render_failed("human", e))?;
        Ok(output)
    }
}

/// Formats reports as Markdown tables, for READMEs and pull request comments.
#[derive(Debug, Clone)]
pub struct MarkdownFormatter {
    config: FormatterConfig,
    heading_level: u8,
}

impl MarkdownFormatter {
    /// Creates a new Markdown formatter with default configuration.
    pub fn new() -> Self {
        Self {
            config: FormatterConfig::default(),
            heading_level: 2,
        }
    }

    /// Creates a new Markdown formatter with the specified configuration.
    pub fn with_config(config: FormatterConfig) -> Self {
        Self {
            config,
            heading_level: 2,
        }
    }

    /// Sets the base heading level for the output.
    pub fn with_heading_level(mut self, level: u8) -> Self {
        self.heading_level = level.clamp(1, 4);
        self
    }

    fn write_report(
        &self,
        output: &mut String,
        report: &AnalysisReport,
        config: &FormatterConfig,
    ) -> fmt::Result {
        let h = "#".repeat(self.heading_level as usize);

        writeln!(output, "{h} Analysis: {}", cell(&report.dataset))?;
        writeln!(output)?;
        writeln!(output, "**Rows:** {}  ", report.row_count)?;
        writeln!(output, "**Columns:** {}", report.column_count)?;
        writeln!(output)?;

        writeln!(output, "{h}# Columns")?;
        writeln!(output)?;
        if config.include_statistics {
            writeln!(output, "| # | Column | Type | Unique | Nulls | Total |")?;
            writeln!(output, "|---|--------|------|--------|-------|-------|")?;
        } else {
            writeln!(output, "| # | Column | Type | Unique |")?;
            writeln!(output, "|---|--------|------|--------|")?;
        }
        for (i, column) in report.columns.iter().enumerate() {
            let p = &column.profile;
            if config.include_statistics {
                writeln!(
                    output,
                    "| {} | {} | {} | {} | {} | {} |",
                    i + 1,
                    cell(&p.name),
                    p.semantic_type,
                    p.unique_count,
                    p.null_count,
                    p.total_count
                )?;
            } else {
                writeln!(
                    output,
                    "| {} | {} | {} | {} |",
                    i + 1,
                    cell(&p.name),
                    p.semantic_type,
                    p.unique_count
                )?;
            }
        }

        if !config.include_recommendations {
            return Ok(());
        }

        writeln!(output)?;
        writeln!(output, "{h}# Recommendations")?;

        for column in &report.columns {
            writeln!(output)?;
            writeln!(output, "{h}## {}", cell(&column.profile.name))?;
            writeln!(output)?;

            if column.recommendations.is_empty() {
                writeln!(output, "_No chart recommendations available._")?;
                continue;
            }

            writeln!(output, "| Priority | Chart | Reason | Warning |")?;
            writeln!(output, "|----------|-------|--------|---------|")?;
            for rec in config.visible(&column.recommendations) {
                writeln!(
                    output,
                    "| {} | {} | {} | {} |",
                    rec.priority,
                    rec.chart_kind.label(),
                    cell(&rec.reason),
                    cell(rec.warning.as_deref().unwrap_or(""))
                )?;
            }
        }

        Ok(())
    }
}

/// Escapes characters that would break a Markdown table cell.
fn cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for MarkdownFormatter {
    fn format(&self, report: &AnalysisReport) -> Result<String> {
        self.format_with_config(report, &self.config)
    }

    fn format_with_config(&self, report: &AnalysisReport, config: &FormatterConfig) -> Result<String> {
        let mut output = String::new();
        self.write_report(&mut output, report, config)
            .map_err(|e| render_failed("markdown", e))?;
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::sample_report;

    #[test]
    fn test_human_plain_layout() {
        let output = HumanFormatter::with_config(FormatterConfig::plain())
            .format(&sample_report())
            .unwrap();

        assert!(output.contains("Dataset: sales (60 rows, 3 columns)"));
        assert!(output.contains(" 1. region                    [CATEGORICAL] - 3 unique values"));
        assert!(output.contains("Total: 60, Nulls: 0"));
        assert!(output.contains("   1. Pie Chart (Priority: 1)"));
        assert!(output.contains("Reason: Perfect for showing distribution of 3 categories"));
        assert!(!output.contains('\x1b'));
        assert!(output.is_ascii());
    }

    #[test]
    fn test_human_unicode_and_colors() {
        let output = HumanFormatter::new().format(&sample_report()).unwrap();

        assert!(output.contains("📊"));
        assert!(output.contains("💡"));
        assert!(output.contains("\x1b[36mCATEGORICAL\x1b[0m"));
    }

    #[test]
    fn test_human_shows_warnings() {
        let output = HumanFormatter::with_config(FormatterConfig::plain())
            .format(&sample_report())
            .unwrap();

        assert!(output.contains("Warning: Data type could not be determined"));
    }

    #[test]
    fn test_human_minimal_hides_recommendations() {
        let output = HumanFormatter::with_config(FormatterConfig::minimal())
            .format(&sample_report())
            .unwrap();

        assert!(output.contains("[NUMERIC]"));
        assert!(!output.contains("RECOMMENDED CHARTS"));
        assert!(!output.contains("Total:"));
    }

    #[test]
    fn test_human_truncates_recommendations() {
        let config = FormatterConfig::plain().with_max_recommendations(1);
        let output = HumanFormatter::with_config(config)
            .format(&sample_report())
            .unwrap();

        assert!(output.contains("... and 2 more"));
    }

    #[test]
    fn test_json_round_trip_preserves_order() {
        let report = sample_report();
        let json = JsonFormatter::new().format(&report).unwrap();
        let parsed: AnalysisReport = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, report);
    }

    #[test]
    fn test_json_respects_config() {
        let json = JsonFormatter::with_config(FormatterConfig::minimal())
            .with_pretty(false)
            .format(&sample_report())
            .unwrap();
        let parsed: AnalysisReport = serde_json::from_str(&json).unwrap();

        assert!(!json.contains('\n'));
        assert!(parsed.columns.iter().all(|c| c.recommendations.is_empty()));
        assert_eq!(parsed.columns.len(), 3);
    }

    #[test]
    fn test_markdown_tables() {
        let output = MarkdownFormatter::new()
            .with_heading_level(3)
            .format(&sample_report())
            .unwrap();

        assert!(output.starts_with("### Analysis: sales"));
        assert!(output.contains("| 1 | region | CATEGORICAL | 3 | 0 | 60 |"));
        assert!(output.contains("##### region"));
        assert!(output.contains("| 1 | Pie Chart | Perfect for showing distribution of 3 categories |  |"));
    }

    #[test]
    fn test_markdown_escapes_pipes() {
        assert_eq!(cell("a|b"), "a\\|b");
    }
}
