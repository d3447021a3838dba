//! Simple Moving Average (SMA) indicator.

use super::Indicator;

/// SMA (Simple Moving Average) indicator.
///
/// Mean of the trailing `period` closes.
pub struct Sma {
    period: usize,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        Self { period }
    }
}

impl Indicator for Sma {
    fn id(&self) -> &str {
        match self.period {
            20 => "sma20",
            50 => "sma50",
            _ => "sma",
        }
    }

    fn name(&self) -> &str {
        match self.period {
            20 => "SMA (20)",
            50 => "SMA (50)",
            _ => "SMA",
        }
    }

    fn min_periods(&self) -> usize {
        self.period
    }

    fn series(&self, closes: &[f64]) -> Vec<Option<f64>> {
        sma_series(closes, self.period)
    }

    fn latest(&self, closes: &[f64]) -> Option<f64> {
        sma(closes, self.period)
    }
}

/// Mean of the last `period` values, if that many exist.
pub fn sma(closes: &[f64], period: usize) -> Option<f64> {
    if period == 0 || closes.len() < period {
        return None;
    }
    let window = &closes[closes.len() - period..];
    Some(window.iter().sum::<f64>() / period as f64)
}

/// Rolling SMA aligned with `closes`.
pub fn sma_series(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    (0..closes.len())
        .map(|i| sma(&closes[..=i], period))
        .collect()
}
