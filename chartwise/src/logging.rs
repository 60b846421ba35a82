//! Logging utilities and configuration for chartwise.
//!
//! The library only emits `tracing` events; installing a subscriber is left to the
//! application. [`setup::init_logging`] is the one the command line tool uses.

/// Controls how chatty the analyzers are.
#[derive(Debug, Clone, PartialEq)]
pub struct LogConfig {
    /// Whether to log the classification of every column
    pub log_column_details: bool,
    /// Whether to log data source and rendering operations
    pub log_data_operations: bool,
    /// Maximum length for logged field values such as column names
    pub max_field_length: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_column_details: false,
            log_data_operations: true,
            max_field_length: 256,
        }
    }
}

impl LogConfig {
    /// Creates a verbose configuration suitable for debugging.
    pub fn verbose() -> Self {
        Self {
            log_column_details: true,
            log_data_operations: true,
            max_field_length: 1024,
        }
    }

    /// Creates a minimal configuration with the lowest overhead.
    pub fn production() -> Self {
        Self {
            log_column_details: false,
            log_data_operations: false,
            max_field_length: 128,
        }
    }

    /// Picks a preset from a `-v` count: none is production, one is the default and two or
    /// more are verbose.
    pub fn from_verbosity(verbosity: u8) -> Self {
        match verbosity {
            0 => Self::production(),
            1 => Self::default(),
            _ => Self::verbose(),
        }
    }
}

/// Logs per-column details only when the configuration asks for them.
#[macro_export]
macro_rules! log_column {
    ($config:expr, $($arg:tt)*) => {
        if $config.log_column_details {
            tracing::debug!($($arg)*);
        }
    };
}

/// Logs data operations only when the configuration asks for them.
#[macro_export]
macro_rules! log_data_op {
    ($config:expr, $($arg:tt)*) => {
        if $config.log_data_operations {
            tracing::info!($($arg)*);
        }
    };
}

/// Truncates a string to at most `max_length` bytes, on a character boundary.
pub fn truncate_field(value: &str, max_length: usize) -> String {
    if value.len() <= max_length {
        return value.to_string();
    }

    let mut end = max_length;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...(truncated)", &value[..end])
}

/// Subscriber setup for applications.
pub mod setup {
    use tracing::Level;

    /// Configuration for chartwise's logging setup.
    #[derive(Debug, Clone)]
    pub struct LoggingConfig {
        /// Log level for everything else
        pub level: Level,
        /// Log level for chartwise crates
        pub chartwise_level: Level,
        /// Whether to use JSON output format
        pub json_format: bool,
        /// Write to stderr instead of stdout
        pub to_stderr: bool,
        /// Environment filter override
        pub env_filter: Option<String>,
    }

    impl Default for LoggingConfig {
        fn default() -> Self {
            Self {
                level: Level::WARN,
                chartwise_level: Level::INFO,
                json_format: false,
                to_stderr: true,
                env_filter: None,
            }
        }
    }

    impl LoggingConfig {
        /// Map a `-v` count to levels: 0 warnings only, 1 info, 2 debug, 3+ trace.
        pub fn from_verbosity(verbosity: u8) -> Self {
            let chartwise_level = match verbosity {
                0 => Level::WARN,
                1 => Level::INFO,
                2 => Level::DEBUG,
                _ => Level::TRACE,
            };
            Self {
                chartwise_level,
                ..Self::default()
            }
        }

        /// Sets whether to use JSON output format.
        pub fn with_json_format(mut self, enabled: bool) -> Self {
            self.json_format = enabled;
            self
        }

        /// Sets a custom environment filter.
        pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
            self.env_filter = Some(filter.into());
            self
        }

        /// Builds the environment filter string.
        pub fn env_filter(&self) -> String {
            if let Some(ref filter) = self.env_filter {
                filter.clone()
            } else {
                let chartwise = self.chartwise_level.as_str().to_lowercase();
                format!(
                    "{},chartwise={chartwise},chartwise_cli={chartwise}",
                    self.level.as_str().to_lowercase()
                )
            }
        }
    }

    /// Installs a global subscriber. `RUST_LOG` takes precedence over the configuration.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use chartwise::logging::setup::{init_logging, LoggingConfig};
    ///
    /// init_logging(LoggingConfig::from_verbosity(2).with_json_format(true)).unwrap();
    /// ```
    pub fn init_logging(config: LoggingConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

        let env_filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(config.env_filter()))?;

        let fmt_layer = match (config.json_format, config.to_stderr) {
            (true, true) => tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .boxed(),
            (true, false) => tracing_subscriber::fmt::layer().json().boxed(),
            (false, true) => tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .boxed(),
            (false, false) => tracing_subscriber::fmt::layer().boxed(),
        };

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::setup::LoggingConfig;
    use super::*;
    use tracing::Level;

    #[test]
    fn test_log_config_presets() {
        let config = LogConfig::default();
        assert!(!config.log_column_details);
        assert!(config.log_data_operations);
        assert_eq!(config.max_field_length, 256);

        let verbose = LogConfig::verbose();
        assert!(verbose.log_column_details);
        assert_eq!(verbose.max_field_length, 1024);

        let production = LogConfig::production();
        assert!(!production.log_data_operations);
        assert_eq!(production.max_field_length, 128);
    }

    #[test]
    fn test_log_config_from_verbosity() {
        assert_eq!(LogConfig::from_verbosity(0), LogConfig::production());
        assert_eq!(LogConfig::from_verbosity(1), LogConfig::default());
        assert_eq!(LogConfig::from_verbosity(2), LogConfig::verbose());
        assert_eq!(LogConfig::from_verbosity(5), LogConfig::verbose());
    }

    #[test]
    fn test_truncate_field() {
        assert_eq!(truncate_field("hello", 10), "hello");
        assert_eq!(
            truncate_field("this is a very long column name", 10),
            "this is a ...(truncated)"
        );
        // 'é' is two bytes; the cut moves back to the boundary
        assert_eq!(truncate_field("aé", 2), "a...(truncated)");
    }

    #[test]
    fn test_env_filter() {
        assert_eq!(
            LoggingConfig::default().env_filter(),
            "warn,chartwise=info,chartwise_cli=info"
        );
        assert_eq!(
            LoggingConfig::from_verbosity(2).env_filter(),
            "warn,chartwise=debug,chartwise_cli=debug"
        );
        assert_eq!(
            LoggingConfig::default()
                .with_env_filter("chartwise=trace")
                .env_filter(),
            "chartwise=trace"
        );
    }

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(LoggingConfig::from_verbosity(0).chartwise_level, Level::WARN);
        assert_eq!(LoggingConfig::from_verbosity(1).chartwise_level, Level::INFO);
        assert_eq!(LoggingConfig::from_verbosity(9).chartwise_level, Level::TRACE);
    }
}
