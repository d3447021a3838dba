//! Chart formations: double tops and bottoms, level breaks.

use crate::types::{Pattern, PatternDetail, PatternKind, Series};

/// Bars needed before double tops and bottoms are evaluated.
pub const MIN_BARS: usize = 10;
/// Bars needed before level breaks are evaluated.
pub const MIN_BREAK_BARS: usize = 30;

const EXTREMA_WINDOW: usize = 20;
const SIMILARITY: f64 = 0.03;
const BREAK_WINDOW: usize = 30;
const BREAK_MARGIN: f64 = 0.01;

/// Run all chart formation checks.
///
/// Order: every double top, then every double bottom, then the level breaks
/// at the final bar.
pub fn detect(series: &Series) -> Vec<Pattern> {
    let mut patterns = Vec::new();
    if series.len() < MIN_BARS {
        return patterns;
    }

    patterns.extend(double_extrema(series, Extremum::Peak));
    patterns.extend(double_extrema(series, Extremum::Valley));
    patterns.extend(level_breaks(series));
    patterns
}

#[derive(Clone, Copy)]
enum Extremum {
    Peak,
    Valley,
}

/// For each bar from index 20, look at the 20 preceding closes and compare the
/// last two local extrema.
fn double_extrema(series: &Series, extremum: Extremum) -> Vec<Pattern> {
    let bars = series.bars();
    let closes = series.closes();
    let mut patterns = Vec::new();

    for i in EXTREMA_WINDOW..bars.len() {
        let window = &closes[i - EXTREMA_WINDOW..i];
        let points: Vec<f64> = (1..window.len() - 1)
            .filter(|&j| match extremum {
                Extremum::Peak => window[j] > window[j - 1] && window[j] > window[j + 1],
                Extremum::Valley => window[j] < window[j - 1] && window[j] < window[j + 1],
            })
            .map(|j| window[j])
            .collect();

        if let [.., second_last, last] = points[..] {
            if (last - second_last).abs() / last < SIMILARITY {
                let (kind, rationale) = match extremum {
                    Extremum::Peak => (
                        PatternKind::DoubleTop,
                        format!("Price failed twice to break resistance near {:.2}", last),
                    ),
                    Extremum::Valley => (
                        PatternKind::DoubleBottom,
                        format!("Price bounced twice off support near {:.2}", last),
                    ),
                };
                patterns.push(
                    Pattern::new(kind, bars[i].timestamp, bars[i].close, rationale)
                        .with_detail(PatternDetail::Level(last)),
                );
            }
        }
    }

    patterns
}

/// Compare the final close with the range of the 30 bars before it.
fn level_breaks(series: &Series) -> Vec<Pattern> {
    let bars = series.bars();
    let mut patterns = Vec::new();
    if bars.len() < MIN_BREAK_BARS {
        return patterns;
    }

    let Some((last, history)) = bars.split_last() else {
        return patterns;
    };
    let window = &history[history.len().saturating_sub(BREAK_WINDOW)..];
    let resistance = window.iter().map(|b| b.high).fold(f64::MIN, f64::max);
    let support = window.iter().map(|b| b.low).fold(f64::MAX, f64::min);

    if last.close > resistance * (1.0 + BREAK_MARGIN) {
        patterns.push(
            Pattern::new(
                PatternKind::ResistanceBreak,
                last.timestamp,
                last.close,
                format!("Price broke resistance at {:.2}", resistance),
            )
            .with_detail(PatternDetail::Level(resistance)),
        );
    }
    if last.close < support * (1.0 - BREAK_MARGIN) {
        patterns.push(
            Pattern::new(
                PatternKind::SupportBreak,
                last.timestamp,
                last.close,
                format!("Price broke support at {:.2}", support),
            )
            .with_detail(PatternDetail::Level(support)),
        );
    }

    patterns
}
