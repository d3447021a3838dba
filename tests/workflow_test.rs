//! Batch comparison, export and discovery against an in-memory source.

use augury::services::discovery::{self, AssetDiscovery};
use augury::services::{export, ComparativeAnalyzer, ComparisonSummary};
use augury::sources::StaticSource;
use augury::types::{AssetCatalog, Bar, ChartRange, ComparisonReport, Interval, Series};
use chrono::{Duration, TimeZone, Utc};
use std::fs;
use std::sync::Arc;

fn series(symbol: &str, closes: impl Iterator<Item = f64>) -> Series {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let bars = closes
        .enumerate()
        .map(|(i, c)| {
            let volume = 1000.0 + i as f64 * 10.0;
            Bar::new(start + Duration::days(i as i64), c, c + 0.5, c - 0.5, c, volume)
        })
        .collect();
    Series::new(symbol, Interval::OneDay, bars).unwrap()
}

fn source() -> StaticSource {
    StaticSource::new()
        .with_series(
            "GROW",
            series("GROW", (0..130).map(|i| 50.0 * 1.008f64.powi(i))),
        )
        .with_series(
            "FADE",
            series("FADE", (0..130).map(|i| 120.0 - i as f64 * 0.5)),
        )
        .with_series(
            "CHOP",
            series(
                "CHOP",
                (0..130).map(|i| 80.0 + (i as f64 * 0.9).sin() * 3.0),
            ),
        )
}

#[tokio::test]
async fn test_compare_and_export() {
    let catalog = AssetCatalog::from_pairs([
        ("Grow", "GROW"),
        ("Fade", "FADE"),
        ("Chop", "CHOP"),
        ("Gone", "GONE"),
    ]);
    let analyzer = ComparativeAnalyzer::new(Arc::new(source()));
    let report = analyzer
        .analyze_all(&catalog, ChartRange::SixMonths, Interval::OneDay, None)
        .await;

    assert_eq!(report.rows.len(), 3);
    assert_eq!(report.failures.len(), 1);
    assert!(report
        .rows
        .windows(2)
        .all(|w| w[0].score >= w[1].score));

    let text = ComparisonSummary(&report).to_string();
    assert!(text.contains("3 assets ranked"));
    assert!(text.contains("Gone"));

    let dir = tempfile::tempdir().unwrap();
    let csv_path = export::export_csv(&report, dir.path()).unwrap();
    let csv = fs::read_to_string(&csv_path).unwrap();
    assert_eq!(csv.lines().count(), 4);
    assert!(csv.starts_with("asset,ticker,category,recommendation,score"));

    let json_path = export::export_json(&report, dir.path()).unwrap();
    let parsed: ComparisonReport =
        serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(parsed.rows, report.rows);
    assert_eq!(parsed.failures, report.failures);
}

#[tokio::test]
async fn test_discover_and_save_catalog() {
    let discovery = AssetDiscovery::with_candidates(
        Arc::new(source()),
        vec![
            ("Grow".to_string(), "GROW".to_string()),
            ("Fade".to_string(), "FADE".to_string()),
        ],
    );
    let mut catalog = AssetCatalog::from_pairs([("Chop", "CHOP")]);

    let found = discovery.discover(&catalog, 60).await;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].ticker, "GROW");

    assert_eq!(discovery::merge_into(&mut catalog, &found), 1);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data").join("assets.json");
    catalog.save(&path).unwrap();

    let reloaded = AssetCatalog::load(&path).unwrap();
    assert_eq!(reloaded, catalog);
    assert_eq!(reloaded.iter().nth(1).map(|e| e.ticker.as_str()), Some("GROW"));
}
