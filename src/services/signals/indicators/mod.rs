//! Technical indicator implementations.
//!
//! Indicators work on close prices and return one value per bar, `None`
//! until enough history exists.

pub mod rsi;
pub mod sma;

pub use rsi::{rsi_series, Rsi};
pub use sma::{sma, sma_series, Sma};

/// Trait for indicators computed over a close-price column.
pub trait Indicator: Send + Sync {
    /// Unique identifier for this indicator.
    fn id(&self) -> &str;

    /// Human-readable name.
    fn name(&self) -> &str;

    /// Minimum number of bars before the first value is defined.
    fn min_periods(&self) -> usize;

    /// Value at every bar, aligned with `closes`.
    fn series(&self, closes: &[f64]) -> Vec<Option<f64>>;

    /// Value at the final bar.
    fn latest(&self, closes: &[f64]) -> Option<f64> {
        self.series(closes).last().copied().flatten()
    }
}
