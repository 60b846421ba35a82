//! Chart recommendation rules keyed by semantic type.
//!
//! Every [`SemanticType`] has exactly one [`ChartRule`]. The engine looks the rule up for a
//! profile's type, applies it, and returns the recommendations ordered by priority
//! (1 = best fit). Ties keep the order the rule produced them in.
//!
//! Categorical columns with more than 10 distinct values get no recommendation at all.
//! Callers must treat an empty list as "no chart fits", not as an error.
//!
//! ## Example Usage
//!
//! ```rust
//! use chartwise::analyzers::{ChartKind, RecommendationEngine, TypeClassifier};
//!
//! let consoles = ["PS5", "Switch", "Xbox", "PC", "Mobile"];
//! let values: Vec<&str> = consoles.iter().cycle().take(50).copied().collect();
//!
//! let profile = TypeClassifier::new().classify("platform", values);
//! let recommendations = RecommendationEngine::new().recommend(&profile);
//!
//! assert_eq!(recommendations[0].chart_kind, ChartKind::Pie);
//! assert_eq!(recommendations[0].priority, 1);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, instrument};

use crate::analyzers::profile_types::{ColumnProfile, SemanticType};
use crate::error::ChartwiseError;

/// Supported chart kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartKind {
    Pie,
    Bar,
    HorizontalBar,
    Line,
    Histogram,
    /// Needs two numeric columns
    Scatter,
    BoxPlot,
    Donut,
}

impl ChartKind {
    pub const ALL: [ChartKind; 8] = [
        ChartKind::Pie,
        ChartKind::Bar,
        ChartKind::HorizontalBar,
        ChartKind::Line,
        ChartKind::Histogram,
        ChartKind::Scatter,
        ChartKind::BoxPlot,
        ChartKind::Donut,
    ];

    /// Human-readable name.
    pub fn label(&self) -> &'static str {
        match self {
            ChartKind::Pie => "Pie Chart",
            ChartKind::Bar => "Bar Chart",
            ChartKind::HorizontalBar => "Horizontal Bar Chart",
            ChartKind::Line => "Line Chart",
            ChartKind::Histogram => "Histogram",
            ChartKind::Scatter => "Scatter Plot",
            ChartKind::BoxPlot => "Box Plot",
            ChartKind::Donut => "Donut Chart",
        }
    }

    /// Short identifier used on the command line and in file names.
    pub fn slug(&self) -> &'static str {
        match self {
            ChartKind::Pie => "pie",
            ChartKind::Bar => "bar",
            ChartKind::HorizontalBar => "horizontal-bar",
            ChartKind::Line => "line",
            ChartKind::Histogram => "histogram",
            ChartKind::Scatter => "scatter",
            ChartKind::BoxPlot => "box-plot",
            ChartKind::Donut => "donut",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ChartKind {
    type Err = ChartwiseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        ChartKind::ALL
            .into_iter()
            .find(|kind| kind.slug() == wanted)
            .ok_or_else(|| {
                ChartwiseError::invalid_input(format!(
                    "unknown chart kind '{s}', expected one of: {}",
                    ChartKind::ALL.map(|k| k.slug()).join(", ")
                ))
            })
    }
}

/// One suggested chart for a column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub chart_kind: ChartKind,
    /// Why this chart fits the column
    pub reason: String,
    /// 1 = best fit, higher = weaker fit
    pub priority: u8,
    /// Advisory note, e.g. about overcrowding
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl Recommendation {
    pub fn new(chart_kind: ChartKind, reason: impl Into<String>, priority: u8) -> Self {
        Self {
            chart_kind,
            reason: reason.into(),
            priority,
            warning: None,
        }
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warning = Some(warning.into());
        self
    }

    pub fn has_warning(&self) -> bool {
        self.warning.as_deref().is_some_and(|w| !w.is_empty())
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (Priority: {})", self.chart_kind, self.priority)?;
        write!(f, "\n  Reason: {}", self.reason)?;
        if let Some(warning) = self.warning.as_deref().filter(|w| !w.is_empty()) {
            write!(f, "\n  Warning: {warning}")?;
        }
        Ok(())
    }
}

/// Trait for implementing chart recommendation rules
pub trait ChartRule: Send + Sync {
    /// Semantic type this rule handles
    fn semantic_type(&self) -> SemanticType;

    /// Apply this rule to a column profile and return recommended charts
    fn apply(&self, profile: &ColumnProfile) -> Vec<Recommendation>;

    /// Get a human-readable name for this rule
    fn name(&self) -> &str;
}

/// Small label sets: pie and donut for up to 7 categories, bars for 8 to 10.
/// Above 10 there is intentionally no recommendation.
pub struct CategoricalRule {
    pie_max_categories: usize,
    bar_max_categories: usize,
}

impl CategoricalRule {
    pub fn new() -> Self {
        Self {
            pie_max_categories: 7,
            bar_max_categories: 10,
        }
    }
}

impl Default for CategoricalRule {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartRule for CategoricalRule {
    fn semantic_type(&self) -> SemanticType {
        SemanticType::Categorical
    }

    fn apply(&self, profile: &ColumnProfile) -> Vec<Recommendation> {
        let categories = profile.unique_count;

        if categories <= self.pie_max_categories {
            vec![
                Recommendation::new(
                    ChartKind::Pie,
                    format!("Perfect for showing distribution of {categories} categories"),
                    1,
                ),
                Recommendation::new(ChartKind::Donut, "Modern alternative to pie chart", 1),
                Recommendation::new(ChartKind::Bar, "Good for comparing categories", 2),
            ]
        } else if categories <= self.bar_max_categories {
            vec![
                Recommendation::new(
                    ChartKind::Bar,
                    format!("Best for comparing {categories} categories"),
                    1,
                ),
                Recommendation::new(
                    ChartKind::HorizontalBar,
                    "Alternative for easier label reading",
                    1,
                ),
                Recommendation::new(
                    ChartKind::Pie,
                    "Can show distribution, but may be crowded",
                    2,
                )
                .with_warning(format!(
                    "Chart may be crowded with {categories} categories. Consider grouping."
                )),
            ]
        } else {
            Vec::new()
        }
    }

    fn name(&self) -> &str {
        "CategoricalRule"
    }
}

pub struct NumericRule;

impl ChartRule for NumericRule {
    fn semantic_type(&self) -> SemanticType {
        SemanticType::Numeric
    }

    fn apply(&self, _profile: &ColumnProfile) -> Vec<Recommendation> {
        vec![
            Recommendation::new(
                ChartKind::Histogram,
                "Shows distribution of numeric values",
                1,
            ),
            Recommendation::new(
                ChartKind::BoxPlot,
                "Shows statistical distribution (median, quartiles, outliers)",
                2,
            ),
            Recommendation::new(
                ChartKind::Bar,
                "Can show individual values or aggregated stats",
                2,
            ),
        ]
    }

    fn name(&self) -> &str {
        "NumericRule"
    }
}

pub struct DateRule;

impl ChartRule for DateRule {
    fn semantic_type(&self) -> SemanticType {
        SemanticType::Date
    }

    fn apply(&self, _profile: &ColumnProfile) -> Vec<Recommendation> {
        vec![
            Recommendation::new(ChartKind::Line, "Perfect for showing trends over time", 1),
            Recommendation::new(
                ChartKind::Bar,
                "Good for comparing values across time periods",
                2,
            ),
        ]
    }

    fn name(&self) -> &str {
        "DateRule"
    }
}

pub struct BooleanRule;

impl ChartRule for BooleanRule {
    fn semantic_type(&self) -> SemanticType {
        SemanticType::Boolean
    }

    fn apply(&self, _profile: &ColumnProfile) -> Vec<Recommendation> {
        vec![
            Recommendation::new(
                ChartKind::Pie,
                "Perfect for showing true/false or yes/no distribution",
                1,
            ),
            Recommendation::new(ChartKind::Donut, "Modern alternative for binary data", 1),
            Recommendation::new(ChartKind::Bar, "Simple comparison of two values", 2),
        ]
    }

    fn name(&self) -> &str {
        "BooleanRule"
    }
}

/// Free text only ever gets a frequency bar chart, with a warning either way.
pub struct TextRule {
    top_values_max: usize,
}

impl TextRule {
    pub fn new() -> Self {
        Self { top_values_max: 20 }
    }
}

impl Default for TextRule {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartRule for TextRule {
    fn semantic_type(&self) -> SemanticType {
        SemanticType::Text
    }

    fn apply(&self, profile: &ColumnProfile) -> Vec<Recommendation> {
        let unique = profile.unique_count;

        let recommendation = if unique <= self.top_values_max {
            Recommendation::new(ChartKind::Bar, "Can show frequency of top values", 2)
                .with_warning("Consider showing only top 10 values for readability")
        } else {
            Recommendation::new(
                ChartKind::Bar,
                "Limited visualization options for free-form text",
                3,
            )
            .with_warning(format!(
                "Text data with {unique} unique values. Consider filtering to top values."
            ))
        };

        vec![recommendation]
    }

    fn name(&self) -> &str {
        "TextRule"
    }
}

pub struct UnknownRule;

impl ChartRule for UnknownRule {
    fn semantic_type(&self) -> SemanticType {
        SemanticType::Unknown
    }

    fn apply(&self, _profile: &ColumnProfile) -> Vec<Recommendation> {
        vec![Recommendation::new(
            ChartKind::Bar,
            "Default fallback for unknown data type",
            3,
        )
        .with_warning("Data type could not be determined")]
    }

    fn name(&self) -> &str {
        "UnknownRule"
    }
}

/// The built-in rule for each semantic type.
fn default_rule(semantic_type: SemanticType) -> Box<dyn ChartRule> {
    match semantic_type {
        SemanticType::Categorical => Box::new(CategoricalRule::new()),
        SemanticType::Numeric => Box::new(NumericRule),
        SemanticType::Date => Box::new(DateRule),
        SemanticType::Boolean => Box::new(BooleanRule),
        SemanticType::Text => Box::new(TextRule::new()),
        SemanticType::Unknown => Box::new(UnknownRule),
    }
}

/// Engine that maps column profiles to ranked chart recommendations
pub struct RecommendationEngine {
    rules: HashMap<SemanticType, Box<dyn ChartRule>>,
}

impl RecommendationEngine {
    /// Create an engine with the built-in rule for every semantic type
    pub fn new() -> Self {
        let rules = [
            SemanticType::Numeric,
            SemanticType::Categorical,
            SemanticType::Date,
            SemanticType::Text,
            SemanticType::Boolean,
            SemanticType::Unknown,
        ]
        .into_iter()
        .map(|semantic_type| (semantic_type, default_rule(semantic_type)))
        .collect();

        Self { rules }
    }

    /// Replace the rule for the semantic type the given rule handles
    pub fn with_rule(mut self, rule: Box<dyn ChartRule>) -> Self {
        self.rules.insert(rule.semantic_type(), rule);
        self
    }

    /// Recommend charts for a column, best fit first
    #[instrument(level = "debug", skip(self, profile), fields(column = %profile.name))]
    pub fn recommend(&self, profile: &ColumnProfile) -> Vec<Recommendation> {
        let Some(rule) = self.rules.get(&profile.semantic_type) else {
            debug!(
                semantic_type = profile.semantic_type.label(),
                "No rule registered for semantic type"
            );
            return Vec::new();
        };

        let mut recommendations = rule.apply(profile);
        // Stable: equal priorities keep rule order
        recommendations.sort_by_key(|r| r.priority);

        if recommendations.is_empty() {
            debug!(
                rule = rule.name(),
                unique = profile.unique_count,
                "No applicable chart for column"
            );
        } else {
            debug!(
                rule = rule.name(),
                count = recommendations.len(),
                best = recommendations[0].chart_kind.slug(),
                "Recommended charts"
            );
        }

        recommendations
    }

    /// Recommend charts for several profiles, keyed by column name
    pub fn recommend_batch(&self, profiles: &[ColumnProfile]) -> HashMap<String, Vec<Recommendation>> {
        profiles
            .iter()
            .map(|profile| (profile.name.clone(), self.recommend(profile)))
            .collect()
    }
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new()
    }
}
