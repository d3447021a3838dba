//! Pattern detection over OHLCV series.
//!
//! Four independent sub-detectors each scan the whole series:
//! - `candlestick`: single and three-bar candle shapes (3+ bars)
//! - `chart`: double tops/bottoms (10+ bars) and level breaks (30+ bars)
//! - `divergence`: price vs RSI momentum (30+ bars)
//! - `volume`: volume spikes (20+ bars)
//!
//! A series shorter than a sub-detector's minimum yields no patterns from it.
//! Detection is a pure function of the series.

pub mod candlestick;
pub mod chart;
pub mod divergence;
pub mod volume;

use crate::types::{Pattern, PatternScan, Series};
use tracing::debug;

/// Default number of patterns kept in `PatternScan::recent`.
pub const DEFAULT_RECENT_LIMIT: usize = 20;

/// Runs every sub-detector and pools the results.
#[derive(Debug, Clone, Copy)]
pub struct PatternDetector {
    recent_limit: usize,
}

impl Default for PatternDetector {
    fn default() -> Self {
        Self {
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }
}

impl PatternDetector {
    pub fn new(recent_limit: usize) -> Self {
        Self { recent_limit }
    }

    pub fn recent_limit(&self) -> usize {
        self.recent_limit
    }

    /// Scan a series with all sub-detectors.
    pub fn detect(&self, series: &Series) -> PatternScan {
        let candlestick = candlestick::detect(series);
        let chart = chart::detect(series);
        let divergence = divergence::detect(series);
        let volume = volume::detect(series);

        let pooled = pool(&[&candlestick, &chart, &divergence, &volume]);
        let total = pooled.len();
        let recent = pooled.into_iter().take(self.recent_limit).collect();

        debug!(
            "{}: {} patterns ({} candlestick, {} chart, {} divergence, {} volume)",
            series.symbol(),
            total,
            candlestick.len(),
            chart.len(),
            divergence.len(),
            volume.len()
        );

        PatternScan {
            candlestick,
            chart,
            divergence,
            volume,
            total,
            recent,
        }
    }
}

/// Every detected pattern, most recent first.
pub fn detect(series: &Series) -> Vec<Pattern> {
    PatternDetector::new(usize::MAX).detect(series).recent
}

/// Concatenate families in order and sort newest first.
///
/// The sort is stable, so patterns sharing a timestamp keep family order and
/// the order each sub-detector produced them in.
fn pool(families: &[&Vec<Pattern>]) -> Vec<Pattern> {
    let mut all: Vec<Pattern> = families.iter().flat_map(|f| f.iter().cloned()).collect();
    all.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    all
}
