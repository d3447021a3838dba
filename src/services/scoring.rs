//! Rentability scorer.
//!
//! Combines the prediction, pattern balance, RSI zone, trend label and
//! volatility into a 0-100 score used to rank assets:
//!
//! | Input                     | Contribution                         |
//! |---------------------------|--------------------------------------|
//! | Prediction direction      | +/- confidence / 100 x 30            |
//! | Recent pattern balance    | (bullish / total - 0.5) x 30         |
//! | RSI                       | < 30: +10, > 70: -10, 40-60: +5      |
//! | Trend label               | bullish +10, bearish -10             |
//! | Volatility                | < 2%: +5, > 5%: -5                   |
//!
//! The score starts at 50, is clamped to [0, 100] and rounded to two decimals.

use crate::types::{
    Direction, MarketStatistics, PatternScan, Prediction, Recommendation, RentabilityScore,
    ScoreCategory, TrendLabel, TrendSnapshot,
};

const BASELINE: f64 = 50.0;
const PREDICTION_SPAN: f64 = 30.0;
const PATTERN_SPAN: f64 = 30.0;

/// Score one asset.
pub fn score(
    stats: &MarketStatistics,
    trend: &TrendSnapshot,
    scan: &PatternScan,
    prediction: &Prediction,
) -> RentabilityScore {
    let mut score = BASELINE;

    if prediction.direction != Direction::Sideways {
        score += prediction.direction.sign() * prediction.confidence / 100.0 * PREDICTION_SPAN;
    }

    if let Some(ratio) = scan.bullish_ratio() {
        score += (ratio - 0.5) * PATTERN_SPAN;
    }

    if let Some(rsi) = trend.rsi14 {
        if rsi < 30.0 {
            score += 10.0;
        } else if rsi > 70.0 {
            score -= 10.0;
        } else if (40.0..=60.0).contains(&rsi) {
            score += 5.0;
        }
    }

    match trend.trend {
        Some(TrendLabel::Bullish) => score += 10.0,
        Some(TrendLabel::Bearish) => score -= 10.0,
        None => {}
    }

    let volatility = stats.volatility;
    if volatility != 0.0 {
        if volatility < 2.0 {
            score += 5.0;
        } else if volatility > 5.0 {
            score -= 5.0;
        }
    }

    let score = round2(score.clamp(0.0, 100.0));
    RentabilityScore {
        score,
        category: ScoreCategory::from_score(score),
        recommendation: Recommendation::from_score(score, prediction.confidence),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
