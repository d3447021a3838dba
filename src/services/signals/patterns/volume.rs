//! Volume spikes.

use crate::types::{Pattern, PatternDetail, PatternKind, Series};

/// Bars needed before volume spikes are evaluated.
pub const MIN_BARS: usize = 20;

const AVERAGE_WINDOW: usize = 20;
const SPIKE_FACTOR: f64 = 2.0;

/// Flag bars whose volume exceeds twice the average of the last 20 bars.
///
/// The average is taken once over the tail of the series and compared against
/// every bar from index 20. A spike on a rising close is bullish, anything else
/// bearish.
pub fn detect(series: &Series) -> Vec<Pattern> {
    let bars = series.bars();
    let mut patterns = Vec::new();
    if bars.len() < MIN_BARS {
        return patterns;
    }

    let tail = &bars[bars.len() - AVERAGE_WINDOW..];
    let average = tail.iter().map(|b| b.volume).sum::<f64>() / AVERAGE_WINDOW as f64;
    if average <= 0.0 {
        return patterns;
    }

    for i in MIN_BARS..bars.len() {
        let bar = &bars[i];
        if bar.volume <= average * SPIKE_FACTOR {
            continue;
        }
        let ratio = bar.volume / average;
        let (kind, rationale) = if bar.close > bars[i - 1].close {
            (
                PatternKind::VolumeSpikeUp,
                format!("Volume {:.1}x above average on a rising close", ratio),
            )
        } else {
            (
                PatternKind::VolumeSpikeDown,
                format!("Volume {:.1}x above average on a falling close", ratio),
            )
        };
        patterns.push(
            Pattern::new(kind, bar.timestamp, bar.close, rationale)
                .with_detail(PatternDetail::VolumeRatio(ratio)),
        );
    }

    patterns
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Bar, Interval};
    use chrono::{Duration, TimeZone, Utc};

    fn series(rows: &[(f64, f64)]) -> Series {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let bars = rows
            .iter()
            .enumerate()
            .map(|(i, &(close, volume))| {
                Bar::new(
                    start + Duration::days(i as i64),
                    close,
                    close + 1.0,
                    close - 1.0,
                    close,
                    volume,
                )
            })
            .collect();
        Series::new("TEST", Interval::OneDay, bars).unwrap()
    }

    #[test]
    fn test_short_series_is_empty() {
        let rows = vec![(100.0, 1000.0); 19];
        assert!(detect(&series(&rows)).is_empty());
    }

    #[test]
    fn test_spike_direction_follows_close() {
        let mut rows = vec![(100.0, 1000.0); 25];
        rows[22] = (101.0, 10_000.0);
        rows[24] = (99.0, 10_000.0);
        let found = detect(&series(&rows));
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].kind, PatternKind::VolumeSpikeUp);
        assert_eq!(found[1].kind, PatternKind::VolumeSpikeDown);
        assert!(matches!(found[0].detail, Some(PatternDetail::VolumeRatio(r)) if r > 2.0));
    }

    #[test]
    fn test_unchanged_close_counts_as_bearish() {
        let mut rows = vec![(100.0, 1000.0); 21];
        rows[20] = (100.0, 50_000.0);
        let found = detect(&series(&rows));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].kind, PatternKind::VolumeSpikeDown);
    }

    #[test]
    fn test_zero_volume_produces_nothing() {
        let rows = vec![(100.0, 0.0); 30];
        assert!(detect(&series(&rows)).is_empty());
    }

    #[test]
    fn test_spike_before_index_20_ignored() {
        let mut rows = vec![(100.0, 1000.0); 25];
        rows[5] = (101.0, 100_000.0);
        assert!(detect(&series(&rows)).is_empty());
    }
}
