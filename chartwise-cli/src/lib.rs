//! Command implementations for the `chartwise` binary.
//!
//! Each subcommand returns what it would print, so it can be tested without a terminal.

use anyhow::{bail, Context, Result};
use chartwise::analyzers::{ChartKind, TypeClassifier};
use chartwise::charts::{default_file_name, ChartRenderer, ChartSpec, JsonSpecRenderer};
use chartwise::core::{Dataset, DatasetAnalyzer};
use chartwise::formatters::{
    FormatterConfig, HumanFormatter, JsonFormatter, MarkdownFormatter, ReportFormatter,
};
use chartwise::logging::LogConfig;
use chartwise::sources::{CsvOptions, CsvSource, DataSource};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about = "Infer column types in a CSV file and recommend charts")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Classify every column and list the recommended charts
    Analyze(AnalyzeArgs),
    /// Prepare the data for one chart and save it
    Chart(ChartArgs),
}

#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// CSV file to read
    pub file: PathBuf,

    /// Field delimiter
    #[arg(long, default_value_t = ',')]
    pub delimiter: char,

    /// Treat the first line as data rather than column names
    #[arg(long)]
    pub no_header: bool,

    /// Also recognise ISO yyyy-MM-dd dates
    #[arg(long)]
    pub extended_dates: bool,
}

impl InputArgs {
    fn csv_options(&self) -> Result<CsvOptions> {
        if !self.delimiter.is_ascii() {
            bail!("delimiter must be a single ASCII character, got '{}'", self.delimiter);
        }
        Ok(CsvOptions {
            has_header: !self.no_header,
            delimiter: self.delimiter as u8,
            ..CsvOptions::default()
        })
    }

    async fn load(&self) -> Result<Dataset> {
        let source = CsvSource::with_options(&self.file, self.csv_options()?)?;
        let dataset = source
            .load()
            .await
            .with_context(|| format!("failed to load {}", self.file.display()))?;
        Ok(dataset)
    }

    fn analyzer(&self, parallel: bool, log_config: LogConfig) -> DatasetAnalyzer {
        DatasetAnalyzer::builder()
            .classifier(
                TypeClassifier::builder()
                    .extended_date_formats(self.extended_dates)
                    .build(),
            )
            .parallel(parallel)
            .log_config(log_config)
            .build()
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
    Markdown,
}

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,

    /// Plain ASCII output, no emoji or box drawing
    #[arg(long)]
    pub ascii: bool,

    /// Disable ANSI colours
    #[arg(long)]
    pub no_color: bool,

    /// Show at most this many recommendations per column
    #[arg(long)]
    pub max_recommendations: Option<usize>,

    /// Classify columns one after another on the current thread
    #[arg(long)]
    pub sequential: bool,
}

impl AnalyzeArgs {
    fn formatter_config(&self) -> FormatterConfig {
        let mut config = FormatterConfig::default()
            .with_unicode(!self.ascii)
            .with_colors(!self.no_color);
        if let Some(max) = self.max_recommendations {
            config = config.with_max_recommendations(max);
        }
        config
    }
}

fn parse_chart_kind(value: &str) -> std::result::Result<ChartKind, String> {
    value.parse::<ChartKind>().map_err(|e| e.to_string())
}

#[derive(Args, Debug, Clone)]
pub struct ChartArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Column to chart (the x axis for scatter plots)
    #[arg(long)]
    pub column: String,

    /// Chart kind; defaults to the top recommendation for the column
    #[arg(long, value_parser = parse_chart_kind)]
    pub kind: Option<ChartKind>,

    /// Second column, for scatter plots
    #[arg(long)]
    pub y: Option<String>,

    /// Output file; defaults to "<column>_<kind>.json" in --out-dir
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Directory for the default output file
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,
}

/// Run `analyze` and return the formatted report.
pub async fn run_analyze(args: &AnalyzeArgs, log_config: LogConfig) -> Result<String> {
    let dataset = args.input.load().await?;
    let report = args
        .input
        .analyzer(!args.sequential, log_config)
        .analyze(&dataset)
        .await?;

    let config = args.formatter_config();
    let output = match args.format {
        OutputFormat::Human => HumanFormatter::with_config(config).format(&report)?,
        OutputFormat::Json => JsonFormatter::with_config(config).format(&report)?,
        OutputFormat::Markdown => MarkdownFormatter::with_config(config).format(&report)?,
    };
    Ok(output)
}

/// Run `chart` and return the path that was written.
pub async fn run_chart(args: &ChartArgs, log_config: LogConfig) -> Result<PathBuf> {
    let dataset = args.input.load().await?;
    let analysis = args
        .input
        .analyzer(false, log_config)
        .analyze_column(&dataset, &args.column)?;
    let column = analysis.profile.name.clone();

    let kind = match args.kind {
        Some(kind) => {
            if !analysis.recommendations.iter().any(|r| r.chart_kind == kind) {
                warn!(
                    column = %column,
                    kind = kind.slug(),
                    semantic_type = %analysis.profile.semantic_type,
                    "Chart kind is not among the recommendations for this column"
                );
            }
            kind
        }
        None => match analysis.best() {
            Some(best) => best.chart_kind,
            None => bail!(
                "no chart recommendations available for column '{column}' ({})",
                analysis.profile.semantic_type
            ),
        },
    };

    let spec = if kind == ChartKind::Scatter {
        let Some(y) = args.y.as_deref() else {
            bail!("scatter plots need a second column, pass --y <COLUMN>");
        };
        let y_index = dataset
            .column_index(y)
            .with_context(|| format!("column '{y}' not found"))?;
        let y_name = dataset.headers()[y_index].clone();
        ChartSpec::scatter(
            &column,
            dataset.column_values(&column)?,
            &y_name,
            dataset.column_values(&y_name)?,
        )?
    } else {
        ChartSpec::build(&column, kind, dataset.column_values(&column)?)?
    };

    let destination = match &args.output {
        Some(path) => path.clone(),
        None => args.out_dir.join(default_file_name(&spec)),
    };
    let written = JsonSpecRenderer::new().render(&spec, &destination)?;

    info!(column = %column, kind = kind.slug(), path = %written.display(), "Chart written");
    Ok(written)
}

/// Message printed after a chart was saved.
pub fn saved_message(path: &Path) -> String {
    format!("Chart saved to {}", path.display())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SALES: &str = "region,amount,paid\n\
        North,10.50,yes\n\
        South,12.00,no\n\
        North,9.99,yes\n\
        East,11.25,yes\n\
        South,15.00,no\n";

    fn write_sales(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("sales.csv");
        std::fs::write(&path, SALES).unwrap();
        path
    }

    fn input(file: PathBuf) -> InputArgs {
        InputArgs {
            file,
            delimiter: ',',
            no_header: false,
            extended_dates: false,
        }
    }

    #[test]
    fn test_cli_parses_analyze() {
        let cli = Cli::parse_from([
            "chartwise",
            "-vv",
            "analyze",
            "data.csv",
            "--format",
            "markdown",
            "--ascii",
        ]);

        assert_eq!(cli.verbose, 2);
        let Command::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(args.format, OutputFormat::Markdown);
        assert!(args.ascii);
        assert_eq!(args.input.file, PathBuf::from("data.csv"));
    }

    #[test]
    fn test_cli_parses_chart_kind() {
        let cli = Cli::parse_from([
            "chartwise", "chart", "data.csv", "--column", "x", "--kind", "box_plot",
        ]);
        let Command::Chart(args) = cli.command else {
            panic!("expected chart");
        };
        assert_eq!(args.kind, Some(ChartKind::BoxPlot));

        assert!(Cli::try_parse_from([
            "chartwise", "chart", "data.csv", "--column", "x", "--kind", "radar",
        ])
        .is_err());
    }

    #[test]
    fn test_verbosity_selects_analyzer_logging() {
        let args = input(PathBuf::from("x.csv"));

        let quiet = args.analyzer(true, LogConfig::from_verbosity(0));
        assert!(!quiet.log_config().log_data_operations);

        let chatty = args.analyzer(true, LogConfig::from_verbosity(2));
        assert!(chatty.log_config().log_column_details);
    }

    #[test]
    fn test_non_ascii_delimiter_rejected() {
        let mut args = input(PathBuf::from("x.csv"));
        args.delimiter = '§';
        assert!(args.csv_options().is_err());
    }

    #[tokio::test]
    async fn test_analyze_json() {
        let dir = TempDir::new().unwrap();
        let args = AnalyzeArgs {
            input: input(write_sales(&dir)),
            format: OutputFormat::Json,
            ascii: true,
            no_color: true,
            max_recommendations: None,
            sequential: false,
        };

        let output = run_analyze(&args, LogConfig::default()).await.unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["dataset"], "sales");
        assert_eq!(json["row_count"], 5);
        assert_eq!(json["columns"][0]["profile"]["semantic_type"], "TEXT");
        assert_eq!(json["columns"][1]["profile"]["semantic_type"], "NUMERIC");
        assert_eq!(json["columns"][2]["profile"]["semantic_type"], "BOOLEAN");
    }

    #[tokio::test]
    async fn test_chart_defaults_to_best_recommendation() {
        let dir = TempDir::new().unwrap();
        let args = ChartArgs {
            input: input(write_sales(&dir)),
            column: "amount".to_string(),
            kind: None,
            y: None,
            output: None,
            out_dir: dir.path().join("charts"),
        };

        let written = run_chart(&args, LogConfig::default()).await.unwrap();
        assert_eq!(written, dir.path().join("charts").join("amount_histogram.json"));
        assert!(written.exists());
        assert_eq!(
            saved_message(&written),
            format!("Chart saved to {}", written.display())
        );
    }

    #[tokio::test]
    async fn test_scatter_requires_y() {
        let dir = TempDir::new().unwrap();
        let mut args = ChartArgs {
            input: input(write_sales(&dir)),
            column: "amount".to_string(),
            kind: Some(ChartKind::Scatter),
            y: None,
            output: Some(dir.path().join("scatter.json")),
            out_dir: dir.path().to_path_buf(),
        };
        assert!(run_chart(&args, LogConfig::default()).await.is_err());

        args.y = Some("amount".to_string());
        let written = run_chart(&args, LogConfig::default()).await.unwrap();
        assert_eq!(written, dir.path().join("scatter.json"));
    }

    #[tokio::test]
    async fn test_chart_missing_column() {
        let dir = TempDir::new().unwrap();
        let args = ChartArgs {
            input: input(write_sales(&dir)),
            column: "nope".to_string(),
            kind: None,
            y: None,
            output: None,
            out_dir: dir.path().to_path_buf(),
        };

        let err = run_chart(&args, LogConfig::default()).await.unwrap_err();
        assert!(err.to_string().contains("nope"));
    }
}
