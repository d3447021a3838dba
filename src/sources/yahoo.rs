//! Yahoo Finance API client for historical price series.
//!
//! Provides OHLCV bars for stocks, ETFs, indices, futures and crypto pairs
//! through the unofficial v8 chart endpoint. One request per fetch, no retry.

use super::SeriesSource;
use crate::error::AnalysisError;
use crate::types::{Bar, ChartRange, Interval, Series};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

const BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

/// Yahoo Finance chart response.
#[derive(Debug, Deserialize)]
struct YahooChartResponse {
    chart: YahooChart,
}

#[derive(Debug, Deserialize)]
struct YahooChart {
    result: Option<Vec<YahooResult>>,
    error: Option<YahooError>,
}

#[derive(Debug, Deserialize)]
struct YahooError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct YahooResult {
    timestamp: Option<Vec<i64>>,
    indicators: YahooIndicators,
}

#[derive(Debug, Deserialize)]
struct YahooIndicators {
    quote: Vec<YahooQuote>,
}

#[derive(Debug, Deserialize)]
struct YahooQuote {
    open: Option<Vec<Option<f64>>>,
    high: Option<Vec<Option<f64>>>,
    low: Option<Vec<Option<f64>>>,
    close: Option<Vec<Option<f64>>>,
    volume: Option<Vec<Option<f64>>>,
}

/// Normalize symbol for Yahoo Finance API.
/// Yahoo uses hyphens instead of dots for share classes (e.g., BRK-B not BRK.B)
fn normalize_yahoo_symbol(symbol: &str) -> String {
    symbol.to_uppercase().replace('.', "-")
}

/// Yahoo Finance API client.
pub struct YahooFinanceClient {
    client: Client,
    base_url: String,
}

impl YahooFinanceClient {
    /// Create a client with the given request timeout.
    pub fn new(timeout: Duration) -> Result<Self, AnalysisError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .map_err(|e| AnalysisError::SourceUnavailable(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: BASE_URL.to_string(),
        })
    }

    /// Point the client at another host serving the same chart API.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn chart_url(&self, symbol: &str, range: ChartRange, interval: Interval) -> String {
        format!(
            "{}/{}?range={}&interval={}&includePrePost=false",
            self.base_url.trim_end_matches('/'),
            normalize_yahoo_symbol(symbol),
            range,
            interval
        )
    }
}

#[async_trait]
impl SeriesSource for YahooFinanceClient {
    async fn fetch(
        &self,
        ticker: &str,
        range: ChartRange,
        interval: Interval,
    ) -> Result<Series, AnalysisError> {
        let clamped = range.clamp_for(interval);
        if clamped != range {
            debug!(
                "Range {} not served at {} interval, using {}",
                range, interval, clamped
            );
        }

        let url = self.chart_url(ticker, clamped, interval);
        debug!("Fetching Yahoo Finance data: {}", url);

        let unavailable = |reason: String| {
            warn!("Yahoo Finance fetch for {} failed: {}", ticker, reason);
            AnalysisError::SourceUnavailable(format!("{}: {}", ticker, reason))
        };

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| unavailable(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(unavailable(format!("API error: {}", response.status())));
        }

        let data: YahooChartResponse = response
            .json()
            .await
            .map_err(|e| unavailable(format!("parse error: {}", e)))?;

        let series = into_series(ticker, interval, data).map_err(unavailable)?;
        debug!("Fetched {} bars for {}", series.len(), ticker);
        Ok(series)
    }
}

/// Turn a chart response into a validated series.
///
/// Rows without a positive close are dropped, as are rows whose timestamp does
/// not advance. Missing open/high/low fall back to the close, and high/low are
/// widened to cover the candle body.
fn into_series(
    ticker: &str,
    interval: Interval,
    data: YahooChartResponse,
) -> Result<Series, String> {
    if let Some(error) = data.chart.error {
        return Err(format!(
            "Yahoo API error: {} - {}",
            error.code, error.description
        ));
    }

    let result = data
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| "no results in response".to_string())?;

    let timestamps = result
        .timestamp
        .ok_or_else(|| "no timestamps in response".to_string())?;

    let quote = result
        .indicators
        .quote
        .into_iter()
        .next()
        .ok_or_else(|| "no quote data in response".to_string())?;

    let opens = quote.open.unwrap_or_default();
    let highs = quote.high.unwrap_or_default();
    let lows = quote.low.unwrap_or_default();
    let closes = quote.close.unwrap_or_default();
    let volumes = quote.volume.unwrap_or_default();

    let at = |column: &[Option<f64>], i: usize| column.get(i).copied().flatten();

    let mut bars: Vec<Bar> = Vec::with_capacity(timestamps.len());
    for (i, &secs) in timestamps.iter().enumerate() {
        let close = match at(&closes, i) {
            Some(c) if c.is_finite() && c > 0.0 => c,
            _ => continue,
        };
        let Some(timestamp) = DateTime::<Utc>::from_timestamp(secs, 0) else {
            continue;
        };
        if bars.last().is_some_and(|prev| prev.timestamp >= timestamp) {
            continue;
        }

        let positive = |v: &f64| v.is_finite() && *v > 0.0;
        let open = at(&opens, i).filter(positive).unwrap_or(close);
        let high = at(&highs, i)
            .filter(positive)
            .unwrap_or(close)
            .max(open.max(close));
        let low = at(&lows, i)
            .filter(positive)
            .unwrap_or(close)
            .min(open.min(close));
        let volume = at(&volumes, i)
            .filter(|v| v.is_finite() && *v >= 0.0)
            .unwrap_or(0.0);

        bars.push(Bar::new(timestamp, open, high, low, close, volume));
    }

    if bars.is_empty() {
        return Err("no usable bars in response".to_string());
    }

    Series::new(ticker, interval, bars).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(json: &str) -> YahooChartResponse {
        serde_json::from_str(json).unwrap()
    }

    // =========================================================================
    // normalize_yahoo_symbol Tests
    // =========================================================================

    #[test]
    fn test_normalize_yahoo_symbol_uppercase() {
        assert_eq!(normalize_yahoo_symbol("aapl"), "AAPL");
        assert_eq!(normalize_yahoo_symbol("btc-usd"), "BTC-USD");
    }

    #[test]
    fn test_normalize_yahoo_symbol_dots_to_hyphens() {
        assert_eq!(normalize_yahoo_symbol("BRK.B"), "BRK-B");
        assert_eq!(normalize_yahoo_symbol("brk.a"), "BRK-A");
    }

    #[test]
    fn test_normalize_yahoo_symbol_index_and_futures() {
        assert_eq!(normalize_yahoo_symbol("^GSPC"), "^GSPC");
        assert_eq!(normalize_yahoo_symbol("GC=F"), "GC=F");
    }

    // =========================================================================
    // URL Tests
    // =========================================================================

    #[test]
    fn test_chart_url() {
        let client = YahooFinanceClient::new(Duration::from_secs(5))
            .unwrap()
            .with_base_url("http://localhost:9999/chart/");
        assert_eq!(
            client.chart_url("msft", ChartRange::SixMonths, Interval::OneDay),
            "http://localhost:9999/chart/MSFT?range=6mo&interval=1d&includePrePost=false"
        );
    }

    // =========================================================================
    // Response Parsing Tests
    // =========================================================================

    #[test]
    fn test_yahoo_error_is_reported() {
        let data = response(
            r#"{"chart": {"result": null, "error": {"code": "Not Found", "description": "No data found, symbol may be delisted"}}}"#,
        );
        let err = into_series("XXXX", Interval::OneDay, data).unwrap_err();
        assert!(err.contains("Not Found"));
    }

    #[test]
    fn test_parse_full_rows() {
        let data = response(
            r#"{"chart": {"result": [{
                "timestamp": [1700000000, 1700086400, 1700172800],
                "indicators": {"quote": [{
                    "open": [150.0, 151.0, 152.0],
                    "high": [155.0, 156.0, 157.0],
                    "low": [148.0, 149.0, 150.0],
                    "close": [153.0, 154.0, 155.0],
                    "volume": [50000000, 51000000, 52000000]
                }]}
            }], "error": null}}"#,
        );
        let series = into_series("AAPL", Interval::OneDay, data).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.symbol(), "AAPL");
        let last = series.last().unwrap();
        assert_eq!(last.close, 155.0);
        assert_eq!(last.volume, 52_000_000.0);
        assert_eq!(last.timestamp.timestamp(), 1700172800);
    }

    #[test]
    fn test_rows_without_close_are_dropped() {
        let data = response(
            r#"{"chart": {"result": [{
                "timestamp": [1700000000, 1700086400, 1700172800],
                "indicators": {"quote": [{
                    "open": [150.0, null, 152.0],
                    "close": [153.0, null, 0.0]
                }]}
            }], "error": null}}"#,
        );
        let series = into_series("AAPL", Interval::OneDay, data).unwrap();
        assert_eq!(series.len(), 1);
        let bar = series.first().unwrap();
        assert_eq!(bar.high, 153.0);
        assert_eq!(bar.low, 150.0);
        assert_eq!(bar.volume, 0.0);
    }

    #[test]
    fn test_zero_open_and_low_fall_back_to_close() {
        let data = response(
            r#"{"chart": {"result": [{
                "timestamp": [1700000000],
                "indicators": {"quote": [{
                    "open": [0.0],
                    "high": [12.0],
                    "low": [0.0],
                    "close": [10.0]
                }]}
            }], "error": null}}"#,
        );
        let series = into_series("X", Interval::OneDay, data).unwrap();
        let bar = series.first().unwrap();
        assert_eq!(bar.open, 10.0);
        assert_eq!(bar.low, 10.0);
        assert_eq!(bar.high, 12.0);
    }

    #[test]
    fn test_duplicate_timestamps_are_dropped() {
        let data = response(
            r#"{"chart": {"result": [{
                "timestamp": [1700000000, 1700000000],
                "indicators": {"quote": [{"close": [10.0, 11.0]}]}
            }], "error": null}}"#,
        );
        let series = into_series("X", Interval::OneDay, data).unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series.last().unwrap().close, 10.0);
    }

    #[test]
    fn test_empty_result_is_error() {
        let data = response(
            r#"{"chart": {"result": [{
                "timestamp": [1700000000],
                "indicators": {"quote": [{"close": [null]}]}
            }], "error": null}}"#,
        );
        assert!(into_series("X", Interval::OneDay, data).is_err());
    }

    #[test]
    fn test_missing_timestamps_is_error() {
        let data = response(
            r#"{"chart": {"result": [{"indicators": {"quote": [{}]}}], "error": null}}"#,
        );
        assert!(into_series("X", Interval::OneDay, data).is_err());
    }
}
