//! Prediction combinator.
//!
//! Folds the patterns detected in the last few days of a series into a
//! probable direction, a confidence, a price band and three scenarios. The
//! band width comes from the series' own volatility.

use crate::error::AnalysisError;
use crate::services::statistics::volatility_pct;
use crate::types::{
    ActivePattern, Bias, Direction, Pattern, Prediction, PriceRange, Scenario, ScenarioName,
    Series,
};
use chrono::Duration;
use tracing::debug;

/// Patterns newer than this, measured from the final bar, are considered.
pub const RECENT_WINDOW_DAYS: i64 = 5;
/// One side must outweigh the other by this factor to set a direction.
pub const DOMINANCE_FACTOR: f64 = 1.5;
/// Confidence ceiling for a directional call.
pub const MAX_CONFIDENCE: f64 = 90.0;

const NEUTRAL_CONFIDENCE: f64 = 50.0;
const BASE_PROBABILITY: f64 = 50.0;
const FALLBACK_PROBABILITY: f64 = 30.0;

/// Builds predictions from a series and its detected patterns.
#[derive(Debug, Clone, Copy, Default)]
pub struct PredictionEngine;

impl PredictionEngine {
    pub fn new() -> Self {
        Self
    }

    /// Predict the next move.
    ///
    /// `patterns` is usually `PatternScan::recent`; anything older than five
    /// days before the final bar is ignored. Fails on fewer than two bars,
    /// where volatility is undefined.
    pub fn predict(
        &self,
        series: &Series,
        patterns: &[Pattern],
    ) -> Result<Prediction, AnalysisError> {
        let last = match series.last() {
            Some(bar) if series.len() >= 2 => bar,
            _ => {
                return Err(AnalysisError::InsufficientData {
                    needed: 2,
                    available: series.len(),
                })
            }
        };

        let price = last.close;
        let volatility = volatility_pct(series);
        let cutoff = last.timestamp - Duration::days(RECENT_WINDOW_DAYS);
        let recent: Vec<&Pattern> = patterns.iter().filter(|p| p.timestamp >= cutoff).collect();

        let mut bull_weight = 0.0;
        let mut bear_weight = 0.0;
        let mut active_patterns = Vec::new();
        for pattern in &recent {
            let weight = pattern.confidence.weight();
            match pattern.bias {
                Bias::Bullish => bull_weight += weight,
                Bias::Bearish => bear_weight += weight,
                Bias::Neutral => continue,
            }
            active_patterns.push(ActivePattern {
                kind: pattern.kind,
                bullish: pattern.bias == Bias::Bullish,
                weight,
            });
        }

        let (direction, confidence) = if recent.is_empty() {
            (Direction::Sideways, NEUTRAL_CONFIDENCE)
        } else {
            combine(bull_weight, bear_weight)
        };

        let price_range = price_range(direction, price, volatility / 100.0);
        let scenarios = scenarios(direction, confidence, &price_range, !recent.is_empty());

        debug!(
            "{}: {} recent patterns, bull={:.1} bear={:.1} -> {} ({:.0}%)",
            series.symbol(),
            recent.len(),
            bull_weight,
            bear_weight,
            direction.label(),
            confidence
        );

        Ok(Prediction {
            direction,
            confidence,
            price_range,
            scenarios,
            active_patterns,
            volatility,
            current_price: price,
        })
    }
}

/// Direction and confidence from the summed side weights.
fn combine(bull: f64, bear: f64) -> (Direction, f64) {
    if bull > bear * DOMINANCE_FACTOR {
        (Direction::Bullish, (bull / (bull + bear) * 100.0).min(MAX_CONFIDENCE))
    } else if bear > bull * DOMINANCE_FACTOR {
        (Direction::Bearish, (bear / (bull + bear) * 100.0).min(MAX_CONFIDENCE))
    } else {
        (Direction::Sideways, NEUTRAL_CONFIDENCE)
    }
}

/// Price band around `price` for a fractional volatility `v`.
fn price_range(direction: Direction, price: f64, v: f64) -> PriceRange {
    match direction {
        Direction::Bullish => PriceRange {
            minimum: price * (1.0 - v),
            target: price * (1.0 + v),
            maximum: price * (1.0 + 1.5 * v),
        },
        Direction::Bearish => PriceRange {
            minimum: price * (1.0 - 1.5 * v),
            target: price * (1.0 - v),
            maximum: price * (1.0 + v),
        },
        Direction::Sideways => PriceRange {
            minimum: price * (1.0 - v),
            target: price,
            maximum: price * (1.0 + v),
        },
    }
}

fn scenarios(
    direction: Direction,
    confidence: f64,
    range: &PriceRange,
    has_signals: bool,
) -> Vec<Scenario> {
    let optimistic = if direction == Direction::Bullish {
        confidence
    } else {
        FALLBACK_PROBABILITY
    };
    let pessimistic = if direction == Direction::Bearish {
        confidence
    } else {
        FALLBACK_PROBABILITY
    };

    let (up, base, down) = if has_signals {
        (
            "Bullish patterns confirm and price rises",
            "Price follows the detected trends",
            "Bearish patterns confirm and price falls",
        )
    } else {
        (
            "Market moves favorably without clear signals",
            "Market stays stable",
            "Market moves unfavorably without clear signals",
        )
    };

    vec![
        Scenario {
            name: ScenarioName::Optimistic,
            target_price: range.maximum,
            probability: optimistic,
            description: up.to_string(),
        },
        Scenario {
            name: ScenarioName::Base,
            target_price: range.target,
            probability: BASE_PROBABILITY,
            description: base.to_string(),
        },
        Scenario {
            name: ScenarioName::Pessimistic,
            target_price: range.minimum,
            probability: pessimistic,
            description: down.to_string(),
        },
    ]
}
