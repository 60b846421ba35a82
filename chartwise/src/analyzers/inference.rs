//! Semantic type classifier for columns of raw string values.
//!
//! The classifier makes a single pass over a column, tallying how many values look
//! numeric, date-like or boolean-like, and then makes one decision. Specific types are
//! checked before general ones: `"1"` and `"0"` parse as numbers, so a column of flags
//! would otherwise be reported as numeric.
//!
//! Decision order (ratios are taken over non-null values):
//! 1. no non-null value → `Unknown`
//! 2. dates ≥ 80% → `Date`
//! 3. booleans ≥ 80% → `Boolean`
//! 4. numbers ≥ 80% → `Numeric`, unless the column looks like an identifier
//!    (≥ 90% distinct, ≥ 100 values, < 10% decimals), which is `Text`
//! 5. < 20% distinct and at most 10 distinct values → `Categorical`
//! 6. otherwise `Text`
//!
//! # Example
//!
//! ```rust
//! use chartwise::analyzers::inference::TypeClassifier;
//! use chartwise::analyzers::SemanticType;
//!
//! let classifier = TypeClassifier::new();
//! let profile = classifier.classify("in_stock", ["yes", "no", "YES", " ", "no"]);
//!
//! assert_eq!(profile.semantic_type, SemanticType::Boolean);
//! assert_eq!(profile.null_count, 1);
//! ```

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, instrument};

use crate::analyzers::profile_types::{ratio, ColumnProfile, SemanticType};

/// Configuration for the type classifier
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierConfig {
    /// Minimum share of date-like values for `Date` (default: 0.8)
    pub date_threshold: f64,
    /// Minimum share of boolean-like values for `Boolean` (default: 0.8)
    pub boolean_threshold: f64,
    /// Minimum share of numeric values for `Numeric` (default: 0.8)
    pub numeric_threshold: f64,
    /// Distinct share at or above which a numeric column may be an identifier (default: 0.9)
    pub id_unique_ratio: f64,
    /// Minimum number of values before identifier detection applies (default: 100)
    pub id_min_values: usize,
    /// Decimal share below which a numeric column may be an identifier (default: 0.1)
    pub id_max_decimal_ratio: f64,
    /// Distinct share below which a column may be categorical (default: 0.2)
    pub categorical_max_unique_ratio: f64,
    /// Maximum number of distinct values for `Categorical` (default: 10)
    pub categorical_max_cardinality: usize,
    /// Also accept ISO `yyyy-MM-dd` dates (default: false)
    pub extended_date_formats: bool,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            date_threshold: 0.8,
            boolean_threshold: 0.8,
            numeric_threshold: 0.8,
            id_unique_ratio: 0.9,
            id_min_values: 100,
            id_max_decimal_ratio: 0.1,
            categorical_max_unique_ratio: 0.2,
            categorical_max_cardinality: 10,
            extended_date_formats: false,
        }
    }
}

/// Builder for TypeClassifier
pub struct TypeClassifierBuilder {
    config: ClassifierConfig,
}

impl TypeClassifierBuilder {
    /// Set the share a heuristic must reach for date, boolean and numeric detection
    pub fn type_threshold(mut self, threshold: f64) -> Self {
        let threshold = threshold.clamp(0.0, 1.0);
        self.config.date_threshold = threshold;
        self.config.boolean_threshold = threshold;
        self.config.numeric_threshold = threshold;
        self
    }

    /// Configure when a numeric column is treated as an identifier
    pub fn id_detection(
        mut self,
        unique_ratio: f64,
        min_values: usize,
        max_decimal_ratio: f64,
    ) -> Self {
        self.config.id_unique_ratio = unique_ratio.clamp(0.0, 1.0);
        self.config.id_min_values = min_values;
        self.config.id_max_decimal_ratio = max_decimal_ratio.clamp(0.0, 1.0);
        self
    }

    /// Configure the categorical cardinality limits
    pub fn categorical_limits(mut self, max_unique_ratio: f64, max_cardinality: usize) -> Self {
        self.config.categorical_max_unique_ratio = max_unique_ratio.clamp(0.0, 1.0);
        self.config.categorical_max_cardinality = max_cardinality;
        self
    }

    /// Enable or disable ISO `yyyy-MM-dd` date detection
    pub fn extended_date_formats(mut self, enable: bool) -> Self {
        self.config.extended_date_formats = enable;
        self
    }

    /// Replace the whole configuration
    pub fn config(mut self, config: ClassifierConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the TypeClassifier
    pub fn build(self) -> TypeClassifier {
        TypeClassifier {
            config: self.config,
        }
    }
}

/// A calendar date layout, tried in list order.
#[derive(Debug)]
struct DatePattern {
    name: &'static str,
    shape: Regex,
    /// Capture group indices of (day, month, year)
    order: (usize, usize, usize),
}

impl DatePattern {
    fn new(name: &'static str, shape: &str, order: (usize, usize, usize)) -> Self {
        Self {
            name,
            shape: Regex::new(shape).expect("date pattern is a valid regex"),
            order,
        }
    }

    /// Parses `value` as a calendar date in this layout.
    ///
    /// Day and month are range checked (1-31, 1-12) and the day is then clamped to the
    /// length of the month, so `31/04/2023` resolves to 30 April.
    fn parse(&self, value: &str) -> Option<NaiveDate> {
        let caps = self.shape.captures(value)?;
        let field = |idx: usize| caps.get(idx)?.as_str().parse::<u32>().ok();
        let (day, month, year) = (field(self.order.0)?, field(self.order.1)?, field(self.order.2)?);

        if !(1..=12).contains(&month) || !(1..=31).contains(&day) || year == 0 {
            return None;
        }

        let year = i32::try_from(year).ok()?;
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let last_day = last_day_of_month(first)?;
        first.with_day(day.min(last_day))
    }
}

fn last_day_of_month(first: NaiveDate) -> Option<u32> {
    let next = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)?
    };
    next.pred_opt().map(|d| d.day())
}

/// Pattern matching utilities for type detection
struct TypePatterns {
    numeric: Regex,
    boolean: Regex,
    iso_date: DatePattern,
    dates: Vec<DatePattern>,
}

static PATTERNS: Lazy<TypePatterns> = Lazy::new(|| TypePatterns {
    numeric: Regex::new(r"^[+-]?([0-9]+\.?[0-9]*|\.[0-9]+)([eE][+-]?[0-9]+)?$")
        .expect("numeric pattern is a valid regex"),
    boolean: Regex::new(r"(?i)^(true|false|yes|no|1|0|t|f)$")
        .expect("boolean pattern is a valid regex"),
    iso_date: DatePattern::new("yyyy-MM-dd", r"^([0-9]{4,})-([0-9]{2})-([0-9]{2})$", (3, 2, 1)),
    dates: vec![
        DatePattern::new("dd/MM/yyyy", r"^([0-9]{2})/([0-9]{2})/([0-9]{4,})$", (1, 2, 3)),
        DatePattern::new("MM/dd/yyyy", r"^([0-9]{2})/([0-9]{2})/([0-9]{4,})$", (2, 1, 3)),
        DatePattern::new("dd-MM-yyyy", r"^([0-9]{2})-([0-9]{2})-([0-9]{4,})$", (1, 2, 3)),
        DatePattern::new("yyyy/MM/dd", r"^([0-9]{4,})/([0-9]{2})/([0-9]{2})$", (3, 2, 1)),
    ],
});

/// A single cell handed to the classifier. `None` and blank strings are nulls.
pub trait RawCell {
    /// The cell's text, or `None` when the cell is absent.
    fn as_cell(&self) -> Option<&str>;
}

impl RawCell for str {
    fn as_cell(&self) -> Option<&str> {
        Some(self)
    }
}

impl RawCell for String {
    fn as_cell(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

impl<T: RawCell + ?Sized> RawCell for &T {
    fn as_cell(&self) -> Option<&str> {
        (**self).as_cell()
    }
}

impl<T: RawCell> RawCell for Option<T> {
    fn as_cell(&self) -> Option<&str> {
        self.as_ref().and_then(|cell| cell.as_cell())
    }
}

/// Running tallies for one column. Turn into a [`ColumnProfile`] with
/// [`TypeClassifier::finish`] once every value has been observed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeStats {
    pub total_count: usize,
    pub null_count: usize,
    pub unique_values: HashSet<String>,
    pub numeric_count: usize,
    pub date_count: usize,
    pub boolean_count: usize,
    pub decimal_count: usize,
}

impl TypeStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of non-null values seen so far.
    pub fn valid_count(&self) -> usize {
        self.total_count - self.null_count
    }
}

/// Classifies columns into a [`SemanticType`].
#[derive(Debug, Clone, Default)]
pub struct TypeClassifier {
    config: ClassifierConfig,
}

impl TypeClassifier {
    /// Create a new builder for TypeClassifier
    pub fn builder() -> TypeClassifierBuilder {
        TypeClassifierBuilder {
            config: ClassifierConfig::default(),
        }
    }

    /// Create a TypeClassifier with default configuration
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classify one column from its raw values.
    #[instrument(level = "debug", skip(self, values))]
    pub fn classify<I>(&self, column_name: &str, values: I) -> ColumnProfile
    where
        I: IntoIterator,
        I::Item: RawCell,
    {
        let mut stats = TypeStats::new();
        for value in values {
            self.observe(&mut stats, value.as_cell());
        }
        self.finish(column_name, stats)
    }

    /// Fold one cell into the running tallies.
    pub fn observe(&self, stats: &mut TypeStats, value: Option<&str>) {
        stats.total_count += 1;

        let trimmed = match value.map(str::trim) {
            Some(v) if !v.is_empty() => v,
            _ => {
                stats.null_count += 1;
                return;
            }
        };

        if !stats.unique_values.contains(trimmed) {
            stats.unique_values.insert(trimmed.to_string());
        }

        if is_numeric(trimmed) {
            stats.numeric_count += 1;
            if trimmed.contains('.') {
                stats.decimal_count += 1;
            }
        }

        if self.match_date(trimmed).is_some() {
            stats.date_count += 1;
        }

        if is_boolean(trimmed) {
            stats.boolean_count += 1;
        }
    }

    /// Decide the semantic type and seal the tallies into a profile.
    pub fn finish(&self, column_name: &str, stats: TypeStats) -> ColumnProfile {
        let semantic_type = self.determine_type(&stats);

        debug!(
            column = column_name,
            total = stats.total_count,
            nulls = stats.null_count,
            unique = stats.unique_values.len(),
            numeric = stats.numeric_count,
            dates = stats.date_count,
            booleans = stats.boolean_count,
            decimals = stats.decimal_count,
            semantic_type = semantic_type.label(),
            "Classified column"
        );

        ColumnProfile {
            name: column_name.to_string(),
            total_count: stats.total_count,
            null_count: stats.null_count,
            unique_count: stats.unique_values.len(),
            numeric_count: stats.numeric_count,
            date_count: stats.date_count,
            boolean_count: stats.boolean_count,
            decimal_count: stats.decimal_count,
            semantic_type,
        }
    }

    /// Determine the semantic type from finished tallies
    pub fn determine_type(&self, stats: &TypeStats) -> SemanticType {
        let valid = stats.valid_count();
        if valid == 0 {
            return SemanticType::Unknown;
        }

        let config = &self.config;
        let unique = stats.unique_values.len();
        let unique_ratio = ratio(unique, valid);

        if ratio(stats.date_count, valid) >= config.date_threshold {
            return SemanticType::Date;
        }

        if ratio(stats.boolean_count, valid) >= config.boolean_threshold {
            return SemanticType::Boolean;
        }

        if ratio(stats.numeric_count, valid) >= config.numeric_threshold {
            // Postal codes and phone numbers parse as numbers but are labels
            let decimal_ratio = ratio(stats.decimal_count, stats.numeric_count);
            let looks_like_id = unique_ratio >= config.id_unique_ratio
                && valid >= config.id_min_values
                && decimal_ratio < config.id_max_decimal_ratio;

            return if looks_like_id {
                SemanticType::Text
            } else {
                SemanticType::Numeric
            };
        }

        if unique_ratio < config.categorical_max_unique_ratio
            && unique <= config.categorical_max_cardinality
        {
            return SemanticType::Categorical;
        }

        SemanticType::Text
    }

    /// Name of the first date layout that accepts `value`.
    pub fn match_date(&self, value: &str) -> Option<&'static str> {
        let patterns = &*PATTERNS;
        let iso = self
            .config
            .extended_date_formats
            .then_some(&patterns.iso_date);

        iso.into_iter()
            .chain(patterns.dates.iter())
            .find(|pattern| pattern.parse(value).is_some())
            .map(|pattern| pattern.name)
    }
}

/// Standard decimal float syntax over ASCII digits; no thousands separators, no `NaN` or `inf`.
pub fn is_numeric(value: &str) -> bool {
    PATTERNS.numeric.is_match(value)
}

/// One of `true, false, yes, no, 1, 0, t, f`, ignoring case.
pub fn is_boolean(value: &str) -> bool {
    PATTERNS.boolean.is_match(value)
}
