//! Comparative analyzer.
//!
//! Runs the full pipeline (statistics, patterns, trend, prediction,
//! effectiveness, score) for one asset or for every asset of a catalog, and
//! ranks the results by rentability score.

use crate::error::AnalysisError;
use crate::services::signals::{
    evaluate_effectiveness, PatternDetector, PredictionEngine, TrendCalculator,
};
use crate::services::{scoring, statistics};
use crate::sources::SeriesSource;
use crate::types::{
    AssetAnalysis, AssetCatalog, AssetFailure, ChartRange, ComparisonReport, ComparisonRow,
    Interval, Series,
};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Bars required before an asset is analyzed at all.
pub const MIN_ANALYSIS_BARS: usize = 5;

/// Progress callback: a status message and the completed fraction in [0, 1].
pub type ProgressFn<'a> = dyn Fn(&str, f64) + Send + Sync + 'a;

/// Runs the analysis pipeline against a series source.
pub struct ComparativeAnalyzer {
    source: Arc<dyn SeriesSource>,
    detector: PatternDetector,
    trend: TrendCalculator,
    predictor: PredictionEngine,
}

impl ComparativeAnalyzer {
    pub fn new(source: Arc<dyn SeriesSource>) -> Self {
        Self {
            source,
            detector: PatternDetector::default(),
            trend: TrendCalculator::new(),
            predictor: PredictionEngine::new(),
        }
    }

    pub fn with_detector(mut self, detector: PatternDetector) -> Self {
        self.detector = detector;
        self
    }

    /// Analyze an already loaded series.
    pub fn analyze_series(
        &self,
        name: &str,
        ticker: &str,
        range: ChartRange,
        series: &Series,
    ) -> Result<AssetAnalysis, AnalysisError> {
        if series.len() < MIN_ANALYSIS_BARS {
            return Err(AnalysisError::InsufficientData {
                needed: MIN_ANALYSIS_BARS,
                available: series.len(),
            });
        }

        let statistics = statistics::compute(series)?;
        let patterns = self.detector.detect(series);
        let trend = self.trend.compute(series);
        let prediction = self.predictor.predict(series, &patterns.recent)?;
        let effectiveness = evaluate_effectiveness(series, &patterns.recent);
        let score = scoring::score(&statistics, &trend, &patterns, &prediction);
        let expected_return_pct = prediction.expected_return_pct();

        debug!(
            "{} ({}): score {:.2} [{}], {} patterns",
            name,
            ticker,
            score.score,
            score.category.label(),
            patterns.total
        );

        Ok(AssetAnalysis {
            asset: name.to_string(),
            ticker: ticker.to_string(),
            range,
            interval: series.interval(),
            generated_at: Utc::now(),
            statistics,
            trend,
            patterns,
            prediction,
            effectiveness,
            score,
            expected_return_pct,
        })
    }

    /// Fetch and analyze one asset.
    pub async fn analyze_asset(
        &self,
        name: &str,
        ticker: &str,
        range: ChartRange,
        interval: Interval,
    ) -> Result<AssetAnalysis, AnalysisError> {
        let series = self.source.fetch(ticker, range, interval).await?;
        self.analyze_series(name, ticker, range, &series)
    }

    /// Analyze every catalog entry in order.
    ///
    /// Failed assets are logged and recorded; the batch always completes.
    /// Rows come back sorted by score, highest first.
    pub async fn analyze_all(
        &self,
        catalog: &AssetCatalog,
        range: ChartRange,
        interval: Interval,
        progress: Option<&ProgressFn<'_>>,
    ) -> ComparisonReport {
        let total = catalog.len();
        let mut rows = Vec::with_capacity(total);
        let mut failures = Vec::new();

        info!(
            "Comparing {} assets over {} at {} interval",
            total, range, interval
        );

        for (i, entry) in catalog.iter().enumerate() {
            if let Some(report) = progress {
                report(
                    &format!("Analyzing {} ({})", entry.name, entry.ticker),
                    i as f64 / total as f64,
                );
            }

            match self
                .analyze_asset(&entry.name, &entry.ticker, range, interval)
                .await
            {
                Ok(analysis) => rows.push(ComparisonRow::from(&analysis)),
                Err(e) => {
                    warn!("Skipping {} ({}): {}", entry.name, entry.ticker, e);
                    failures.push(AssetFailure {
                        asset: entry.name.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        if let Some(report) = progress {
            report("Comparison complete", 1.0);
        }

        rows.sort_by(|a, b| b.score.total_cmp(&a.score));
        info!(
            "Comparison finished: {} ranked, {} failed",
            rows.len(),
            failures.len()
        );

        ComparisonReport {
            generated_at: Utc::now(),
            range,
            interval,
            rows,
            failures,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::StaticSource;
    use crate::types::Bar;
    use chrono::{Duration, TimeZone};
    use std::sync::Mutex;

    fn series(symbol: &str, n: usize, step: f64) -> Series {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let bars = (0..n)
            .map(|i| {
                let c = 100.0 + i as f64 * step + (i as f64).sin();
                Bar::new(start + Duration::days(i as i64), c, c + 1.0, c - 1.0, c, 1000.0)
            })
            .collect();
        Series::new(symbol, Interval::OneDay, bars).unwrap()
    }

    fn analyzer() -> ComparativeAnalyzer {
        let source = StaticSource::new()
            .with_series("UP", series("UP", 60, 1.0))
            .with_series("DOWN", series("DOWN", 60, -1.0))
            .with_series("TINY", series("TINY", 4, 1.0));
        ComparativeAnalyzer::new(Arc::new(source))
    }

    #[test]
    fn test_short_series_is_insufficient() {
        let err = analyzer()
            .analyze_series("Tiny", "TINY", ChartRange::OneMonth, &series("TINY", 4, 1.0))
            .unwrap_err();
        assert_eq!(
            err,
            AnalysisError::InsufficientData {
                needed: 5,
                available: 4
            }
        );
    }

    #[tokio::test]
    async fn test_analyze_asset() {
        let analysis = analyzer()
            .analyze_asset("Up", "UP", ChartRange::SixMonths, Interval::OneDay)
            .await
            .unwrap();
        assert_eq!(analysis.ticker, "UP");
        assert_eq!(analysis.statistics.bars, 60);
        assert!((0.0..=100.0).contains(&analysis.score.score));
    }

    #[tokio::test]
    async fn test_batch_records_failures_and_ranks() {
        let catalog = AssetCatalog::from_pairs([
            ("Down", "DOWN"),
            ("Missing", "NOPE"),
            ("Up", "UP"),
            ("Tiny", "TINY"),
        ]);
        let calls = Mutex::new(Vec::new());
        let progress = |msg: &str, fraction: f64| {
            calls.lock().unwrap().push((msg.to_string(), fraction));
        };

        let report = analyzer()
            .analyze_all(
                &catalog,
                ChartRange::SixMonths,
                Interval::OneDay,
                Some(&progress),
            )
            .await;

        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.failures.len(), 2);
        assert!(report.rows[0].score >= report.rows[1].score);
        assert_eq!(report.failures[0].asset, "Missing");
        assert_eq!(report.failures[1].asset, "Tiny");

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 5);
        assert_eq!(calls.last().unwrap().1, 1.0);
    }
}
