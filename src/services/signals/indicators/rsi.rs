//! Relative Strength Index (RSI) indicator.

use super::Indicator;

/// RSI (Relative Strength Index) indicator.
///
/// Measures momentum by comparing the magnitude of recent gains to recent losses.
/// Values range from 0-100:
/// - Below 30: Oversold
/// - Above 70: Overbought
///
/// Gains and losses are averaged with a plain rolling mean over `period`
/// bars. The first bar contributes a zero change, so the first value is
/// defined at index `period - 1`.
pub struct Rsi {
    period: usize,
}

impl Default for Rsi {
    fn default() -> Self {
        Self { period: 14 }
    }
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Self { period }
    }
}

impl Indicator for Rsi {
    fn id(&self) -> &str {
        "rsi"
    }

    fn name(&self) -> &str {
        "RSI (14)"
    }

    fn min_periods(&self) -> usize {
        self.period
    }

    fn series(&self, closes: &[f64]) -> Vec<Option<f64>> {
        rsi_series(closes, self.period)
    }
}

/// Rolling RSI aligned with `closes`.
///
/// A window with no losses reads 100 when it has gains and is undefined when
/// prices did not move at all.
pub fn rsi_series(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    let n = closes.len();
    if period == 0 {
        return vec![None; n];
    }

    let mut gains = Vec::with_capacity(n);
    let mut losses = Vec::with_capacity(n);
    for i in 0..n {
        let change = if i == 0 { 0.0 } else { closes[i] - closes[i - 1] };
        gains.push(change.max(0.0));
        losses.push((-change).max(0.0));
    }

    (0..n)
        .map(|i| {
            if i + 1 < period {
                return None;
            }
            let start = i + 1 - period;
            let avg_gain = gains[start..=i].iter().sum::<f64>() / period as f64;
            let avg_loss = losses[start..=i].iter().sum::<f64>() / period as f64;

            if avg_loss == 0.0 {
                return (avg_gain > 0.0).then_some(100.0);
            }
            let rs = avg_gain / avg_loss;
            Some(100.0 - 100.0 / (1.0 + rs))
        })
        .collect()
}
