use super::{Bias, PatternKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Coarse trend over the last 20 bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendLabel {
    Bullish,
    Bearish,
}

impl TrendLabel {
    pub fn label(&self) -> &'static str {
        match self {
            TrendLabel::Bullish => "bullish",
            TrendLabel::Bearish => "bearish",
        }
    }
}

/// Moving-average crossover signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalLabel {
    Buy,
    Sell,
    Neutral,
}

impl SignalLabel {
    pub fn label(&self) -> &'static str {
        match self {
            SignalLabel::Buy => "buy",
            SignalLabel::Sell => "sell",
            SignalLabel::Neutral => "neutral",
        }
    }
}

/// Indicator values at the final bar of a series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendSnapshot {
    pub sma20: Option<f64>,
    pub sma50: Option<f64>,
    pub rsi14: Option<f64>,
    pub support: f64,
    pub resistance: f64,
    pub trend: Option<TrendLabel>,
    pub signal: SignalLabel,
    /// Distance of the last close from SMA-20, in percent.
    pub price_vs_sma20: Option<f64>,
    /// Distance of the last close from SMA-50, in percent.
    pub price_vs_sma50: Option<f64>,
}

impl TrendSnapshot {
    /// RSI zone description used in reports.
    pub fn rsi_zone(&self) -> Option<&'static str> {
        self.rsi14.map(|rsi| {
            if rsi > 70.0 {
                "overbought"
            } else if rsi < 30.0 {
                "oversold"
            } else {
                "neutral"
            }
        })
    }
}

/// Descriptive statistics of a series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketStatistics {
    pub current_price: f64,
    pub initial_price: f64,
    pub max_price: f64,
    pub min_price: f64,
    pub change_abs: f64,
    pub change_pct: f64,
    /// Standard deviation of bar-to-bar returns, in percent.
    pub volatility: f64,
    pub average_volume: f64,
    pub bars: usize,
}

/// One back-checked pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectivenessCase {
    pub kind: PatternKind,
    pub timestamp: DateTime<Utc>,
    pub expected: Bias,
    /// Close-to-close change after the pattern, in percent.
    pub realized_change_pct: f64,
    pub hit: bool,
    pub bars_ahead: usize,
}

/// How often reported patterns were followed by a move in their direction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternEffectiveness {
    pub analyzed: usize,
    pub bullish_hits: usize,
    pub bearish_hits: usize,
    pub precision_pct: f64,
    pub cases: Vec<EffectivenessCase>,
}
