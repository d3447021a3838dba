//! Price/RSI momentum divergences.

use crate::services::signals::indicators::rsi_series;
use crate::types::{Pattern, PatternDetail, PatternKind, Series};

/// Bars needed before divergences are evaluated.
pub const MIN_BARS: usize = 30;

const LOOKBACK: usize = 20;
const PRICE_MOVE: f64 = 0.05;
const RSI_MOVE: f64 = 5.0;

/// Compare price change and RSI change over 20 bars, for every bar from 30.
///
/// Falling price with rising RSI is bullish; rising price with falling RSI is
/// bearish.
pub fn detect(series: &Series) -> Vec<Pattern> {
    let mut patterns = Vec::new();
    if series.len() < MIN_BARS {
        return patterns;
    }

    let bars = series.bars();
    let closes = series.closes();
    let rsi = rsi_series(&closes, 14);

    for i in MIN_BARS..bars.len() {
        let (Some(rsi_now), Some(rsi_then)) = (rsi[i], rsi[i - LOOKBACK]) else {
            continue;
        };
        let price_change = (closes[i] - closes[i - LOOKBACK]) / closes[i - LOOKBACK];
        let rsi_change = rsi_now - rsi_then;

        if price_change < -PRICE_MOVE && rsi_change > RSI_MOVE {
            patterns.push(
                Pattern::new(
                    PatternKind::BullishDivergence,
                    bars[i].timestamp,
                    closes[i],
                    "Price made a lower low while RSI made a higher low",
                )
                .with_detail(PatternDetail::Rsi(rsi_now)),
            );
        }
        if price_change > PRICE_MOVE && rsi_change < -RSI_MOVE {
            patterns.push(
                Pattern::new(
                    PatternKind::BearishDivergence,
                    bars[i].timestamp,
                    closes[i],
                    "Price made a higher high while RSI made a lower high",
                )
                .with_detail(PatternDetail::Rsi(rsi_now)),
            );
        }
    }

    patterns
}
