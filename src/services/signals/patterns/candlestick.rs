//! Single and multi-bar candlestick shapes.

use crate::types::{Bar, Pattern, PatternKind, Series};

/// Bars needed before any candlestick shape is evaluated.
pub const MIN_BARS: usize = 3;

/// Scan every bar from index 2 for candlestick shapes.
///
/// Within one bar the shapes are reported in a fixed order: hammer, shooting
/// star, engulfing, doji, three soldiers, three crows.
pub fn detect(series: &Series) -> Vec<Pattern> {
    let bars = series.bars();
    let mut patterns = Vec::new();
    if bars.len() < MIN_BARS {
        return patterns;
    }

    for i in 2..bars.len() {
        let (prev2, prev1, current) = (&bars[i - 2], &bars[i - 1], &bars[i]);
        let mut found = |kind: PatternKind, rationale: &str| {
            patterns.push(Pattern::new(kind, current.timestamp, current.close, rationale));
        };

        if is_hammer(prev1, current) {
            found(
                PatternKind::Hammer,
                "Possible bullish reversal after a decline",
            );
        }
        if is_shooting_star(prev1, current) {
            found(
                PatternKind::ShootingStar,
                "Possible bearish reversal after a rally",
            );
        }
        if is_bullish_engulfing(prev1, current) {
            found(
                PatternKind::BullishEngulfing,
                "Bullish body engulfs the previous bearish body",
            );
        }
        if is_bearish_engulfing(prev1, current) {
            found(
                PatternKind::BearishEngulfing,
                "Bearish body engulfs the previous bullish body",
            );
        }
        if is_doji(current) {
            found(PatternKind::Doji, "Market indecision, possible trend change");
        }
        if is_three_white_soldiers(prev2, prev1, current) {
            found(
                PatternKind::ThreeWhiteSoldiers,
                "Three rising bullish candles, strong continuation",
            );
        }
        if is_three_black_crows(prev2, prev1, current) {
            found(
                PatternKind::ThreeBlackCrows,
                "Three falling bearish candles, strong continuation",
            );
        }
    }

    patterns
}

fn is_hammer(prev: &Bar, bar: &Bar) -> bool {
    let body = bar.body();
    bar.range() > 0.0
        && bar.lower_shadow() > 2.0 * body
        && bar.upper_shadow() < body * 0.3
        && bar.close < prev.close
}

fn is_shooting_star(prev: &Bar, bar: &Bar) -> bool {
    let body = bar.body();
    bar.range() > 0.0
        && bar.upper_shadow() > 2.0 * body
        && bar.lower_shadow() < body * 0.3
        && bar.close > prev.close
}

fn is_bullish_engulfing(prev: &Bar, bar: &Bar) -> bool {
    prev.is_bearish()
        && bar.is_bullish()
        && bar.open < prev.close
        && bar.close > prev.open
        && bar.body() > prev.body()
}

fn is_bearish_engulfing(prev: &Bar, bar: &Bar) -> bool {
    prev.is_bullish()
        && bar.is_bearish()
        && bar.open > prev.close
        && bar.close < prev.open
        && bar.body() > prev.body()
}

fn is_doji(bar: &Bar) -> bool {
    let range = bar.range();
    range > 0.0 && bar.body() < range * 0.1
}

fn is_three_white_soldiers(a: &Bar, b: &Bar, c: &Bar) -> bool {
    a.is_bullish()
        && b.is_bullish()
        && c.is_bullish()
        && b.close > a.close
        && c.close > b.close
        && b.open > a.open
        && c.open > b.open
}

fn is_three_black_crows(a: &Bar, b: &Bar, c: &Bar) -> bool {
    a.is_bearish()
        && b.is_bearish()
        && c.is_bearish()
        && b.close < a.close
        && c.close < b.close
        && b.open < a.open
        && c.open < b.open
}
