//! Back-check of detected patterns against what the price did next.

use crate::types::{Bias, EffectivenessCase, Pattern, PatternEffectiveness, Series};

/// Bars ahead compared with the pattern bar.
pub const LOOKAHEAD_BARS: usize = 5;

/// Score each pattern by the close up to five bars after it.
///
/// Patterns on the final bar, or whose timestamp is not a bar of the series,
/// are skipped. Neutral patterns are counted but can never be hits.
pub fn evaluate_effectiveness(series: &Series, patterns: &[Pattern]) -> PatternEffectiveness {
    let bars = series.bars();
    let mut result = PatternEffectiveness::default();

    for pattern in patterns {
        let Ok(idx) = bars.binary_search_by(|b| b.timestamp.cmp(&pattern.timestamp)) else {
            continue;
        };
        if idx + 1 >= bars.len() {
            continue;
        }

        let bars_ahead = LOOKAHEAD_BARS.min(bars.len() - idx - 1);
        let then = bars[idx].close;
        let later = bars[idx + bars_ahead].close;
        let change = (later - then) / then * 100.0;

        let hit = match pattern.bias {
            Bias::Bullish if change > 0.0 => {
                result.bullish_hits += 1;
                true
            }
            Bias::Bearish if change < 0.0 => {
                result.bearish_hits += 1;
                true
            }
            _ => false,
        };

        result.analyzed += 1;
        result.cases.push(EffectivenessCase {
            kind: pattern.kind,
            timestamp: pattern.timestamp,
            expected: pattern.bias,
            realized_change_pct: change,
            hit,
            bars_ahead,
        });
    }

    if result.analyzed > 0 {
        result.precision_pct =
            (result.bullish_hits + result.bearish_hits) as f64 / result.analyzed as f64 * 100.0;
    }
    result
}
