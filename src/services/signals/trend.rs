//! Trend labels, moving-average signal and support/resistance levels.

use super::indicators::{Indicator, Rsi, Sma};
use crate::types::{Series, SignalLabel, TrendLabel, TrendSnapshot};

/// Bars compared for the trend label.
pub const TREND_LOOKBACK: usize = 20;
/// Bars used for support and resistance.
pub const LEVEL_WINDOW: usize = 30;

/// Computes the indicator snapshot at the final bar of a series.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrendCalculator;

impl TrendCalculator {
    pub fn new() -> Self {
        Self
    }

    pub fn compute(&self, series: &Series) -> TrendSnapshot {
        let closes = series.closes();
        let sma20 = Sma::new(20).latest(&closes);
        let sma50 = Sma::new(50).latest(&closes);
        let rsi14 = Rsi::default().latest(&closes);
        let (support, resistance) = levels(series, LEVEL_WINDOW);
        let last = closes.last().copied();

        TrendSnapshot {
            sma20,
            sma50,
            rsi14,
            support,
            resistance,
            trend: trend_label(&closes),
            signal: signal_label(sma20, sma50),
            price_vs_sma20: last.zip(sma20).map(|(p, s)| distance_pct(p, s)),
            price_vs_sma50: last.zip(sma50).map(|(p, s)| distance_pct(p, s)),
        }
    }
}

/// Bullish when the last close is strictly above the close 20 bars back.
///
/// Equal closes read as bearish. Fewer than 20 bars give no label.
pub fn trend_label(closes: &[f64]) -> Option<TrendLabel> {
    if closes.len() < TREND_LOOKBACK {
        return None;
    }
    let last = closes[closes.len() - 1];
    let anchor = closes[closes.len() - TREND_LOOKBACK];
    Some(if last > anchor {
        TrendLabel::Bullish
    } else {
        TrendLabel::Bearish
    })
}

/// Buy on SMA-20 above SMA-50, sell below, neutral when equal or missing.
pub fn signal_label(sma20: Option<f64>, sma50: Option<f64>) -> SignalLabel {
    match (sma20, sma50) {
        (Some(fast), Some(slow)) if fast > slow => SignalLabel::Buy,
        (Some(fast), Some(slow)) if fast < slow => SignalLabel::Sell,
        _ => SignalLabel::Neutral,
    }
}

/// Minimum low and maximum high over the trailing `window` bars.
///
/// An empty series gives (0, 0).
pub fn levels(series: &Series, window: usize) -> (f64, f64) {
    let bars = series.bars();
    if bars.is_empty() {
        return (0.0, 0.0);
    }
    let tail = &bars[bars.len().saturating_sub(window)..];
    let support = tail.iter().map(|b| b.low).fold(f64::MAX, f64::min);
    let resistance = tail.iter().map(|b| b.high).fold(f64::MIN, f64::max);
    (support, resistance)
}

fn distance_pct(price: f64, reference: f64) -> f64 {
    if reference == 0.0 {
        0.0
    } else {
        (price - reference) / reference * 100.0
    }
}
