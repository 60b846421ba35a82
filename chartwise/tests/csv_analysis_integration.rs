//! Loading CSV files through DataFusion and analyzing them end to end.

use chartwise::analyzers::{ChartKind, SemanticType};
use chartwise::core::DatasetAnalyzer;
use chartwise::error::ChartwiseError;
use chartwise::sources::{CsvOptions, CsvSource, DataSource};
use std::fmt::Write;
use std::path::PathBuf;
use tempfile::TempDir;

/// Writes a 200-row store export with one column of every semantic type.
fn write_store_csv(dir: &TempDir) -> PathBuf {
    let mut content = String::from("order_id,payment,total,order_date,gift,comment,coupon\n");
    for i in 0..200 {
        let payment = ["Card", "Cash", "UPI", "Wallet"][i % 4];
        let total = format!("{}.{:02}", 20 + i % 50, (i * 13) % 100);
        let date = format!("{:02}/{:02}/2024", 1 + i % 28, 1 + i % 12);
        let gift = if i % 3 == 0 { "yes" } else { "no" };
        let comment = format!("note {i}");
        writeln!(
            content,
            "{},{payment},{total},{date},{gift},\"{comment}, thanks\",",
            700_000 + i
        )
        .unwrap();
    }

    let path = dir.path().join("store.csv");
    std::fs::write(&path, content).unwrap();
    path
}

#[tokio::test]
async fn analyze_store_export() {
    let dir = TempDir::new().unwrap();
    let dataset = CsvSource::new(write_store_csv(&dir))
        .unwrap()
        .load()
        .await
        .unwrap();

    assert_eq!(dataset.name(), "store");
    assert_eq!(dataset.row_count(), 200);
    assert_eq!(dataset.column_count(), 7);

    let report = DatasetAnalyzer::new().analyze(&dataset).await.unwrap();
    let types: Vec<(&str, SemanticType)> = report
        .profiles()
        .map(|p| (p.name.as_str(), p.semantic_type))
        .collect();

    assert_eq!(
        types,
        [
            ("order_id", SemanticType::Text),
            ("payment", SemanticType::Categorical),
            ("total", SemanticType::Numeric),
            ("order_date", SemanticType::Date),
            ("gift", SemanticType::Boolean),
            ("comment", SemanticType::Text),
            ("coupon", SemanticType::Unknown),
        ]
    );

    let best: Vec<Option<ChartKind>> = report
        .columns
        .iter()
        .map(|c| c.best().map(|r| r.chart_kind))
        .collect();
    assert_eq!(
        best,
        [
            Some(ChartKind::Bar),
            Some(ChartKind::Pie),
            Some(ChartKind::Histogram),
            Some(ChartKind::Line),
            Some(ChartKind::Pie),
            Some(ChartKind::Bar),
            Some(ChartKind::Bar),
        ]
    );
}

#[tokio::test]
async fn quoted_fields_keep_delimiters() {
    let dir = TempDir::new().unwrap();
    let dataset = CsvSource::new(write_store_csv(&dir))
        .unwrap()
        .load()
        .await
        .unwrap();

    let comments = dataset.column_values("comment").unwrap();
    assert_eq!(comments[0].as_deref(), Some("note 0, thanks"));

    let coupons = dataset.column_values("coupon").unwrap();
    assert!(coupons.iter().all(Option::is_none));
}

#[tokio::test]
async fn semicolon_delimited_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("eu.csv");
    std::fs::write(&path, "Artikel;Preis\nA;1.50\nB;2.75\nC;3.00\n").unwrap();

    let options = CsvOptions {
        delimiter: b';',
        ..CsvOptions::default()
    };
    let dataset = CsvSource::with_options(&path, options)
        .unwrap()
        .load()
        .await
        .unwrap();

    assert_eq!(dataset.headers(), ["Artikel", "Preis"]);
    let report = DatasetAnalyzer::new().analyze(&dataset).await.unwrap();
    assert_eq!(
        report.column("Preis").unwrap().profile.semantic_type,
        SemanticType::Numeric
    );
}

#[tokio::test]
async fn missing_file_is_a_data_source_error() {
    let dir = TempDir::new().unwrap();
    let err = CsvSource::new(dir.path().join("absent.csv"))
        .unwrap()
        .load()
        .await
        .unwrap_err();

    assert!(matches!(err, ChartwiseError::DataSource { .. }));
    assert!(err.to_string().contains("absent.csv"));
}

#[tokio::test]
async fn sequential_and_parallel_reports_match() {
    let dir = TempDir::new().unwrap();
    let dataset = CsvSource::new(write_store_csv(&dir))
        .unwrap()
        .load()
        .await
        .unwrap();

    let parallel = DatasetAnalyzer::new().analyze(&dataset).await.unwrap();
    let sequential = DatasetAnalyzer::builder()
        .parallel(false)
        .build()
        .analyze(&dataset)
        .await
        .unwrap();

    assert_eq!(parallel, sequential);
}
