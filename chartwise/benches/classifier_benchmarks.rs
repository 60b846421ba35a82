//! Benchmarks for column classification and dataset analysis.

use chartwise::analyzers::{RecommendationEngine, TypeClassifier};
use chartwise::core::{Dataset, DatasetAnalyzer};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use std::time::Duration;
use tokio::runtime::Runtime;

fn column(kind: &str, rows: usize) -> Vec<String> {
    (0..rows)
        .map(|i| match kind {
            "numeric" => format!("{}.{:02}", i % 997, i % 100),
            "categorical" => ["North", "South", "East", "West"][i % 4].to_string(),
            "date" => format!("{:02}/{:02}/20{:02}", 1 + i % 28, 1 + i % 12, i % 30),
            "boolean" => if i % 2 == 0 { "yes" } else { "no" }.to_string(),
            _ => format!("free text value number {i}"),
        })
        .collect()
}

fn bench_single_column_classification(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_column_classification");
    group.measurement_time(Duration::from_secs(5));

    let classifier = TypeClassifier::new();
    for kind in ["numeric", "categorical", "date", "boolean", "text"] {
        let values = column(kind, 10_000);
        group.throughput(Throughput::Elements(values.len() as u64));
        group.bench_with_input(BenchmarkId::new("classify", kind), &values, |b, values| {
            b.iter(|| classifier.classify(black_box("col"), black_box(values)));
        });
    }

    group.finish();
}

fn bench_recommendation(c: &mut Criterion) {
    let engine = RecommendationEngine::new();
    let profile = TypeClassifier::new().classify("region", column("categorical", 1_000));

    c.bench_function("recommend_categorical", |b| {
        b.iter(|| engine.recommend(black_box(&profile)));
    });
}

fn bench_dataset_analysis(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("dataset_analysis");
    group.measurement_time(Duration::from_secs(10));

    for rows in [1_000usize, 50_000] {
        let kinds = ["numeric", "categorical", "date", "boolean", "text"];
        let columns: Vec<Vec<Option<String>>> = kinds
            .iter()
            .map(|kind| column(kind, rows).into_iter().map(Some).collect())
            .collect();
        let dataset = Dataset::from_columns(
            "bench",
            kinds.iter().map(|k| k.to_string()).collect(),
            columns,
        )
        .unwrap();

        for parallel in [false, true] {
            let analyzer = DatasetAnalyzer::builder().parallel(parallel).build();
            let mode = if parallel { "parallel" } else { "sequential" };
            group.bench_with_input(BenchmarkId::new(mode, rows), &dataset, |b, dataset| {
                b.iter(|| rt.block_on(analyzer.analyze(black_box(dataset))));
            });
        }
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_single_column_classification,
    bench_recommendation,
    bench_dataset_analysis
);
criterion_main!(benches);
