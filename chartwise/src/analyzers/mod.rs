//! Column analysis: semantic type classification and chart recommendation.
//!
//! ## Overview
//!
//! Analysis happens one column at a time in two steps:
//!
//! - **[`TypeClassifier`]** scans a column's raw string values, tallies how many look numeric,
//!   date-like or boolean, and assigns exactly one [`SemanticType`] once the scan is done.
//! - **[`RecommendationEngine`]** maps the resulting [`ColumnProfile`] to an ordered list of
//!   [`Recommendation`]s, best fit first.
//!
//! ```text
//! raw values ──> TypeClassifier ──> ColumnProfile ──> RecommendationEngine ──> Vec<Recommendation>
//! ```
//!
//! Both components are synchronous and hold no mutable state, so a single instance can be
//! shared across threads.
//!
//! ## Example
//!
//! ```rust
//! use chartwise::analyzers::{ChartKind, RecommendationEngine, SemanticType, TypeClassifier};
//!
//! let classifier = TypeClassifier::new();
//! let profile = classifier.classify("subscribed", ["yes", "no", "Yes", "", "no"]);
//!
//! assert_eq!(profile.semantic_type, SemanticType::Boolean);
//! assert_eq!(profile.null_count, 1);
//!
//! let recommendations = RecommendationEngine::new().recommend(&profile);
//! assert_eq!(recommendations[0].chart_kind, ChartKind::Pie);
//! ```

pub mod inference;
pub mod profile_types;
pub mod recommendations;

pub use inference::{
    is_boolean, is_numeric, ClassifierConfig, RawCell, TypeClassifier, TypeClassifierBuilder,
    TypeStats,
};
pub use profile_types::{ColumnProfile, SemanticType};
pub use recommendations::{
    BooleanRule, CategoricalRule, ChartKind, ChartRule, DateRule, NumericRule, Recommendation,
    RecommendationEngine, TextRule, UnknownRule,
};
