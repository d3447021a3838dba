//! Price series sources.
//!
//! `SeriesSource` is the seam between the engine and wherever bars come from.
//! `YahooFinanceClient` talks to the Yahoo Finance chart endpoint;
//! `StaticSource` serves prebuilt series from memory for tests and offline runs.

pub mod yahoo;

pub use yahoo::YahooFinanceClient;

use crate::error::AnalysisError;
use crate::types::{ChartRange, Interval, Series};
use async_trait::async_trait;
use std::collections::HashMap;

/// Supplies an ordered OHLCV series for a ticker.
#[async_trait]
pub trait SeriesSource: Send + Sync {
    /// Fetch bars for `ticker` over `range` at `interval`.
    ///
    /// An empty result is reported as `SourceUnavailable`.
    async fn fetch(
        &self,
        ticker: &str,
        range: ChartRange,
        interval: Interval,
    ) -> Result<Series, AnalysisError>;
}

/// In-memory source keyed by ticker.
///
/// Range and interval are ignored; the stored series is returned as is.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    series: HashMap<String, Series>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(mut self, ticker: impl Into<String>, series: Series) -> Self {
        self.insert(ticker, series);
        self
    }

    pub fn insert(&mut self, ticker: impl Into<String>, series: Series) {
        self.series.insert(ticker.into(), series);
    }
}

#[async_trait]
impl SeriesSource for StaticSource {
    async fn fetch(
        &self,
        ticker: &str,
        _range: ChartRange,
        _interval: Interval,
    ) -> Result<Series, AnalysisError> {
        match self.series.get(ticker) {
            Some(series) if !series.is_empty() => Ok(series.clone()),
            Some(_) => Err(AnalysisError::SourceUnavailable(format!(
                "no data for {}",
                ticker
            ))),
            None => Err(AnalysisError::SourceUnavailable(format!(
                "unknown ticker {}",
                ticker
            ))),
        }
    }
}
