//! Descriptive statistics of a price series.

use crate::error::AnalysisError;
use crate::types::{MarketStatistics, Series};

/// Sample standard deviation of bar-to-bar close returns, in percent.
///
/// Returns 0 when fewer than two returns exist.
pub fn volatility_pct(series: &Series) -> f64 {
    sample_std_dev(&series.returns()) * 100.0
}

/// Sample (n - 1) standard deviation; 0 for fewer than two values.
pub fn sample_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    variance.sqrt()
}

/// Compute price, change, volatility and volume figures for a series.
pub fn compute(series: &Series) -> Result<MarketStatistics, AnalysisError> {
    let (Some(first), Some(last)) = (series.first(), series.last()) else {
        return Err(AnalysisError::InsufficientData {
            needed: 1,
            available: 0,
        });
    };

    let bars = series.bars();
    let max_price = bars.iter().map(|b| b.high).fold(f64::MIN, f64::max);
    let min_price = bars.iter().map(|b| b.low).fold(f64::MAX, f64::min);
    let average_volume = bars.iter().map(|b| b.volume).sum::<f64>() / bars.len() as f64;

    let change_abs = last.close - first.close;
    let change_pct = if first.close != 0.0 {
        change_abs / first.close * 100.0
    } else {
        0.0
    };

    Ok(MarketStatistics {
        current_price: last.close,
        initial_price: first.close,
        max_price,
        min_price,
        change_abs,
        change_pct,
        volatility: volatility_pct(series),
        average_volume,
        bars: bars.len(),
    })
}
