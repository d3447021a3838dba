use super::{
    ChartRange, Direction, Interval, MarketStatistics, PatternEffectiveness, PatternScan,
    Prediction, Recommendation, RentabilityScore, ScoreCategory, TrendLabel, TrendSnapshot,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Everything computed for one asset in one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetAnalysis {
    pub asset: String,
    pub ticker: String,
    pub range: ChartRange,
    pub interval: Interval,
    pub generated_at: DateTime<Utc>,
    pub statistics: MarketStatistics,
    pub trend: TrendSnapshot,
    pub patterns: PatternScan,
    pub prediction: Prediction,
    pub effectiveness: PatternEffectiveness,
    pub score: RentabilityScore,
    /// Return to the predicted target, in percent.
    pub expected_return_pct: f64,
}

/// Flattened record used for ranking and CSV export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRow {
    pub asset: String,
    pub ticker: String,
    pub category: ScoreCategory,
    pub recommendation: Recommendation,
    pub score: f64,
    pub price: f64,
    pub target: f64,
    pub return_pct: f64,
    pub direction: Direction,
    pub confidence: f64,
    pub trend: Option<TrendLabel>,
    pub rsi: Option<f64>,
    pub volatility: f64,
    pub bullish_patterns: usize,
    pub bearish_patterns: usize,
    pub total_patterns: usize,
}

impl From<&AssetAnalysis> for ComparisonRow {
    fn from(analysis: &AssetAnalysis) -> Self {
        Self {
            asset: analysis.asset.clone(),
            ticker: analysis.ticker.clone(),
            category: analysis.score.category,
            recommendation: analysis.score.recommendation,
            score: analysis.score.score,
            price: analysis.statistics.current_price,
            target: analysis.prediction.price_range.target,
            return_pct: analysis.expected_return_pct,
            direction: analysis.prediction.direction,
            confidence: analysis.prediction.confidence,
            trend: analysis.trend.trend,
            rsi: analysis.trend.rsi14,
            volatility: analysis.statistics.volatility,
            bullish_patterns: analysis.patterns.bullish_count(),
            bearish_patterns: analysis.patterns.bearish_count(),
            total_patterns: analysis.patterns.total,
        }
    }
}

/// An asset that could not be analyzed in a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetFailure {
    pub asset: String,
    pub reason: String,
}

/// Result of a batch comparison, rows sorted by score descending.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonReport {
    pub generated_at: DateTime<Utc>,
    pub range: ChartRange,
    pub interval: Interval,
    pub rows: Vec<ComparisonRow>,
    pub failures: Vec<AssetFailure>,
}

/// Buy/hold/sell split of a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalDistribution {
    pub buy: usize,
    pub hold: usize,
    pub sell: usize,
}

impl ComparisonReport {
    pub fn top(&self, n: usize) -> &[ComparisonRow] {
        &self.rows[..n.min(self.rows.len())]
    }

    /// The `n` lowest-scoring rows, lowest last.
    pub fn bottom(&self, n: usize) -> &[ComparisonRow] {
        let start = self.rows.len().saturating_sub(n);
        &self.rows[start..]
    }

    /// Row count per category, most bullish first.
    pub fn category_counts(&self) -> Vec<(ScoreCategory, usize)> {
        let mut counts: BTreeMap<ScoreCategory, usize> = BTreeMap::new();
        for row in &self.rows {
            *counts.entry(row.category).or_default() += 1;
        }
        counts.into_iter().rev().collect()
    }

    pub fn signal_distribution(&self) -> SignalDistribution {
        let mut dist = SignalDistribution::default();
        for row in &self.rows {
            if row.recommendation.is_buy() {
                dist.buy += 1;
            } else if row.recommendation.is_sell() {
                dist.sell += 1;
            } else {
                dist.hold += 1;
            }
        }
        dist
    }

    pub fn average_score(&self) -> Option<f64> {
        mean(self.rows.iter().map(|r| r.score))
    }

    pub fn average_return(&self) -> Option<f64> {
        mean(self.rows.iter().map(|r| r.return_pct))
    }

    pub fn average_confidence(&self) -> Option<f64> {
        mean(self.rows.iter().map(|r| r.confidence))
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    (count > 0).then(|| sum / count as f64)
}
