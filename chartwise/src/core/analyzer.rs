//! Whole-dataset analysis: classify every column and recommend charts for it.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::instrument;

use super::dataset::Dataset;
use crate::analyzers::inference::{ClassifierConfig, TypeClassifier};
use crate::analyzers::profile_types::ColumnProfile;
use crate::analyzers::recommendations::{Recommendation, RecommendationEngine};
use crate::error::{ChartwiseError, Result};
use crate::logging::{truncate_field, LogConfig};
use crate::{log_column, log_data_op};

/// Profile and ranked recommendations for one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnAnalysis {
    pub profile: ColumnProfile,
    pub recommendations: Vec<Recommendation>,
}

impl ColumnAnalysis {
    /// The top-ranked recommendation, if any chart fits.
    pub fn best(&self) -> Option<&Recommendation> {
        self.recommendations.first()
    }
}

/// Result of analyzing a dataset. Columns appear in header order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub dataset: String,
    pub row_count: usize,
    pub column_count: usize,
    pub columns: Vec<ColumnAnalysis>,
}

impl AnalysisReport {
    /// Look a column up by name.
    pub fn column(&self, name: &str) -> Option<&ColumnAnalysis> {
        self.columns.iter().find(|c| c.profile.name == name)
    }

    pub fn profiles(&self) -> impl Iterator<Item = &ColumnProfile> {
        self.columns.iter().map(|c| &c.profile)
    }

    /// Columns for which no chart was recommended.
    pub fn unchartable(&self) -> impl Iterator<Item = &ColumnAnalysis> {
        self.columns.iter().filter(|c| c.recommendations.is_empty())
    }
}

/// Builder for [`DatasetAnalyzer`].
pub struct DatasetAnalyzerBuilder {
    classifier: TypeClassifier,
    engine: RecommendationEngine,
    parallel: bool,
    log_config: LogConfig,
}

impl DatasetAnalyzerBuilder {
    /// Use a preconfigured classifier
    pub fn classifier(mut self, classifier: TypeClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Build the classifier from a configuration
    pub fn classifier_config(mut self, config: ClassifierConfig) -> Self {
        self.classifier = TypeClassifier::builder().config(config).build();
        self
    }

    /// Use a custom recommendation engine
    pub fn engine(mut self, engine: RecommendationEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Classify columns on the blocking thread pool, one task per column
    pub fn parallel(mut self, enable: bool) -> Self {
        self.parallel = enable;
        self
    }

    pub fn log_config(mut self, config: LogConfig) -> Self {
        self.log_config = config;
        self
    }

    pub fn build(self) -> DatasetAnalyzer {
        DatasetAnalyzer {
            classifier: Arc::new(self.classifier),
            engine: Arc::new(self.engine),
            parallel: self.parallel,
            log_config: Arc::new(self.log_config),
        }
    }
}

/// Runs the classifier and recommendation engine over every column of a [`Dataset`].
#[derive(Clone)]
pub struct DatasetAnalyzer {
    classifier: Arc<TypeClassifier>,
    engine: Arc<RecommendationEngine>,
    parallel: bool,
    log_config: Arc<LogConfig>,
}

impl DatasetAnalyzer {
    pub fn builder() -> DatasetAnalyzerBuilder {
        DatasetAnalyzerBuilder {
            classifier: TypeClassifier::new(),
            engine: RecommendationEngine::new(),
            parallel: true,
            log_config: LogConfig::default(),
        }
    }

    /// Analyzer with default classifier and engine, running columns in parallel.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn classifier(&self) -> &TypeClassifier {
        &self.classifier
    }

    pub fn engine(&self) -> &RecommendationEngine {
        &self.engine
    }

    pub fn log_config(&self) -> &LogConfig {
        &self.log_config
    }

    /// Analyze every column of the dataset.
    #[instrument(skip(self, dataset), fields(dataset = %dataset.name(), columns = dataset.column_count()))]
    pub async fn analyze(&self, dataset: &Dataset) -> Result<AnalysisReport> {
        let columns = if self.parallel && dataset.column_count() > 1 {
            let mut handles = Vec::with_capacity(dataset.column_count());

            for (index, name) in dataset.headers().iter().enumerate() {
                let values = dataset.column_handle(index);
                let name = name.clone();
                let classifier = Arc::clone(&self.classifier);
                let engine = Arc::clone(&self.engine);
                let log_config = Arc::clone(&self.log_config);

                handles.push(tokio::task::spawn_blocking(move || {
                    analyze_values(&classifier, &engine, &log_config, &name, values.as_slice())
                }));
            }

            // Awaiting in spawn order keeps the header order
            let mut results = Vec::with_capacity(handles.len());
            for handle in handles {
                let analysis = handle
                    .await
                    .map_err(|e| ChartwiseError::Internal(format!("Task join error: {e}")))?;
                results.push(analysis);
            }
            results
        } else {
            dataset
                .columns()
                .map(|(name, values)| {
                    analyze_values(
                        &self.classifier,
                        &self.engine,
                        &self.log_config,
                        name,
                        values,
                    )
                })
                .collect()
        };

        log_data_op!(
            self.log_config,
            dataset = %dataset.name(),
            rows = dataset.row_count(),
            columns = columns.len(),
            "Dataset analysis complete"
        );

        Ok(AnalysisReport {
            dataset: dataset.name().to_string(),
            row_count: dataset.row_count(),
            column_count: dataset.column_count(),
            columns,
        })
    }

    /// Analyze a single column on the calling thread.
    pub fn analyze_column(&self, dataset: &Dataset, column: &str) -> Result<ColumnAnalysis> {
        let index = dataset
            .column_index(column)
            .ok_or_else(|| ChartwiseError::column_not_found(column))?;
        let name = &dataset.headers()[index];
        let values = dataset.column_values(name)?;
        Ok(analyze_values(
            &self.classifier,
            &self.engine,
            &self.log_config,
            name,
            values,
        ))
    }
}

impl Default for DatasetAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

fn analyze_values(
    classifier: &TypeClassifier,
    engine: &RecommendationEngine,
    log_config: &LogConfig,
    name: &str,
    values: &[Option<String>],
) -> ColumnAnalysis {
    let profile = classifier.classify(name, values);
    let recommendations = engine.recommend(&profile);

    log_column!(
        log_config,
        column = %truncate_field(name, log_config.max_field_length),
        semantic_type = %profile.semantic_type,
        recommendations = recommendations.len(),
        "Column analyzed"
    );

    ColumnAnalysis {
        profile,
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::profile_types::SemanticType;
    use crate::analyzers::recommendations::ChartKind;

    fn dataset() -> Dataset {
        let rows = (0..120)
            .map(|i| {
                vec![
                    Some(format!("{}", 100_000 + i)),
                    Some(["North", "South", "East"][i % 3].to_string()),
                    Some(format!("{}.99", i % 40)),
                    Some(if i % 2 == 0 { "yes" } else { "no" }.to_string()),
                    None,
                ]
            })
            .collect();

        Dataset::new(
            "orders",
            ["order_id", "region", "price", "express", "notes"]
                .iter()
                .map(|h| h.to_string())
                .collect(),
            rows,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_analyze_keeps_header_order() {
        let report = DatasetAnalyzer::new().analyze(&dataset()).await.unwrap();

        assert_eq!(report.dataset, "orders");
        assert_eq!(report.row_count, 120);
        assert_eq!(report.column_count, 5);

        let types: Vec<(&str, SemanticType)> = report
            .profiles()
            .map(|p| (p.name.as_str(), p.semantic_type))
            .collect();
        assert_eq!(
            types,
            [
                ("order_id", SemanticType::Text),
                ("region", SemanticType::Categorical),
                ("price", SemanticType::Numeric),
                ("express", SemanticType::Boolean),
                ("notes", SemanticType::Unknown),
            ]
        );
    }

    #[tokio::test]
    async fn test_parallel_matches_sequential() {
        let data = dataset();
        let parallel = DatasetAnalyzer::new().analyze(&data).await.unwrap();
        let sequential = DatasetAnalyzer::builder()
            .parallel(false)
            .build()
            .analyze(&data)
            .await
            .unwrap();

        assert_eq!(parallel, sequential);
    }

    #[tokio::test]
    async fn test_best_recommendation() {
        let report = DatasetAnalyzer::new().analyze(&dataset()).await.unwrap();

        let region = report.column("region").unwrap();
        assert_eq!(region.best().unwrap().chart_kind, ChartKind::Pie);

        let price = report.column("price").unwrap();
        assert_eq!(price.best().unwrap().chart_kind, ChartKind::Histogram);

        assert!(report.column("missing").is_none());
        assert_eq!(report.unchartable().count(), 0);
    }

    #[test]
    fn test_analyze_column() {
        let analyzer = DatasetAnalyzer::new();
        let analysis = analyzer.analyze_column(&dataset(), "REGION").unwrap();
        assert_eq!(analysis.profile.name, "region");

        let err = analyzer.analyze_column(&dataset(), "nope").unwrap_err();
        assert!(matches!(err, ChartwiseError::ColumnNotFound { .. }));
    }

    #[test]
    fn test_extended_dates_via_config() {
        let data = Dataset::new(
            "t",
            vec!["day".to_string()],
            vec![vec![Some("2024-03-01".to_string())]],
        )
        .unwrap();

        let analyzer = DatasetAnalyzer::builder()
            .classifier_config(ClassifierConfig {
                extended_date_formats: true,
                ..ClassifierConfig::default()
            })
            .build();

        let analysis = analyzer.analyze_column(&data, "day").unwrap();
        assert_eq!(analysis.profile.semantic_type, SemanticType::Date);
    }
}
