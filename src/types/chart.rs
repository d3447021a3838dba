use crate::error::AnalysisError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lookback range requested from a series source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartRange {
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "5d")]
    FiveDays,
    #[serde(rename = "7d")]
    SevenDays,
    #[serde(rename = "1mo")]
    OneMonth,
    #[serde(rename = "60d")]
    SixtyDays,
    #[serde(rename = "3mo")]
    ThreeMonths,
    #[serde(rename = "6mo")]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "2y")]
    TwoYears,
    #[serde(rename = "730d")]
    SevenHundredThirtyDays,
    #[serde(rename = "5y")]
    FiveYears,
}

impl ChartRange {
    /// Query-string form used by Yahoo Finance.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartRange::OneDay => "1d",
            ChartRange::FiveDays => "5d",
            ChartRange::SevenDays => "7d",
            ChartRange::OneMonth => "1mo",
            ChartRange::SixtyDays => "60d",
            ChartRange::ThreeMonths => "3mo",
            ChartRange::SixMonths => "6mo",
            ChartRange::OneYear => "1y",
            ChartRange::TwoYears => "2y",
            ChartRange::SevenHundredThirtyDays => "730d",
            ChartRange::FiveYears => "5y",
        }
    }

    /// Approximate length of the range in calendar days.
    pub fn approx_days(&self) -> u32 {
        match self {
            ChartRange::OneDay => 1,
            ChartRange::FiveDays => 5,
            ChartRange::SevenDays => 7,
            ChartRange::OneMonth => 30,
            ChartRange::SixtyDays => 60,
            ChartRange::ThreeMonths => 90,
            ChartRange::SixMonths => 180,
            ChartRange::OneYear => 365,
            ChartRange::TwoYears => 730,
            ChartRange::SevenHundredThirtyDays => 730,
            ChartRange::FiveYears => 1825,
        }
    }

    /// Shrink the range to what the provider serves for the given interval.
    ///
    /// Minute intervals only go back 7 days, 15m/30m go back 60 days and
    /// hourly data goes back 730 days. Daily and longer intervals are unbounded.
    pub fn clamp_for(self, interval: Interval) -> ChartRange {
        match interval.max_range() {
            Some(cap) if self.approx_days() > cap.approx_days() => cap,
            _ => self,
        }
    }
}

impl FromStr for ChartRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1d" => Ok(ChartRange::OneDay),
            "5d" => Ok(ChartRange::FiveDays),
            "7d" => Ok(ChartRange::SevenDays),
            "1mo" => Ok(ChartRange::OneMonth),
            "60d" => Ok(ChartRange::SixtyDays),
            "3mo" => Ok(ChartRange::ThreeMonths),
            "6mo" => Ok(ChartRange::SixMonths),
            "1y" => Ok(ChartRange::OneYear),
            "2y" => Ok(ChartRange::TwoYears),
            "730d" => Ok(ChartRange::SevenHundredThirtyDays),
            "5y" => Ok(ChartRange::FiveYears),
            other => Err(format!("unsupported range '{}'", other)),
        }
    }
}

impl fmt::Display for ChartRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sampling granularity of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interval {
    #[serde(rename = "1m")]
    OneMinute,
    #[serde(rename = "2m")]
    TwoMinutes,
    #[serde(rename = "5m")]
    FiveMinutes,
    #[serde(rename = "15m")]
    FifteenMinutes,
    #[serde(rename = "30m")]
    ThirtyMinutes,
    #[serde(rename = "60m")]
    SixtyMinutes,
    #[serde(rename = "90m")]
    NinetyMinutes,
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "5d")]
    FiveDays,
    #[serde(rename = "1wk")]
    OneWeek,
    #[serde(rename = "1mo")]
    OneMonth,
}

impl Interval {
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::OneMinute => "1m",
            Interval::TwoMinutes => "2m",
            Interval::FiveMinutes => "5m",
            Interval::FifteenMinutes => "15m",
            Interval::ThirtyMinutes => "30m",
            Interval::SixtyMinutes => "60m",
            Interval::NinetyMinutes => "90m",
            Interval::OneHour => "1h",
            Interval::OneDay => "1d",
            Interval::FiveDays => "5d",
            Interval::OneWeek => "1wk",
            Interval::OneMonth => "1mo",
        }
    }

    /// Whether bars are shorter than a trading day.
    pub fn is_intraday(&self) -> bool {
        self.max_range().is_some()
    }

    /// Longest range the provider serves at this granularity.
    pub fn max_range(&self) -> Option<ChartRange> {
        match self {
            Interval::OneMinute | Interval::TwoMinutes | Interval::FiveMinutes => {
                Some(ChartRange::SevenDays)
            }
            Interval::FifteenMinutes | Interval::ThirtyMinutes => Some(ChartRange::SixtyDays),
            Interval::SixtyMinutes | Interval::NinetyMinutes | Interval::OneHour => {
                Some(ChartRange::SevenHundredThirtyDays)
            }
            _ => None,
        }
    }
}

impl FromStr for Interval {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1m" => Ok(Interval::OneMinute),
            "2m" => Ok(Interval::TwoMinutes),
            "5m" => Ok(Interval::FiveMinutes),
            "15m" => Ok(Interval::FifteenMinutes),
            "30m" => Ok(Interval::ThirtyMinutes),
            "60m" => Ok(Interval::SixtyMinutes),
            "90m" => Ok(Interval::NinetyMinutes),
            "1h" => Ok(Interval::OneHour),
            "1d" => Ok(Interval::OneDay),
            "5d" => Ok(Interval::FiveDays),
            "1wk" => Ok(Interval::OneWeek),
            "1mo" => Ok(Interval::OneMonth),
            other => Err(format!("unsupported interval '{}'", other)),
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One OHLCV sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    pub fn new(
        timestamp: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Absolute size of the candle body.
    pub fn body(&self) -> f64 {
        (self.close - self.open).abs()
    }

    /// High to low distance.
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    pub fn upper_shadow(&self) -> f64 {
        self.high - self.open.max(self.close)
    }

    pub fn lower_shadow(&self) -> f64 {
        self.open.min(self.close) - self.low
    }

    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }

    fn validate(&self) -> Result<(), String> {
        let prices = [self.open, self.high, self.low, self.close];
        if prices.iter().any(|p| !p.is_finite()) {
            return Err("non-finite price".to_string());
        }
        if prices.iter().any(|p| *p <= 0.0) {
            return Err(format!("non-positive price in {:?}", prices));
        }
        if !self.volume.is_finite() || self.volume < 0.0 {
            return Err(format!("invalid volume {}", self.volume));
        }
        if self.high < self.low {
            return Err(format!("high {} below low {}", self.high, self.low));
        }
        if self.high < self.open.max(self.close) {
            return Err(format!("high {} below candle body", self.high));
        }
        if self.low > self.open.min(self.close) {
            return Err(format!("low {} above candle body", self.low));
        }
        Ok(())
    }
}

/// Ordered bars for one asset at one granularity.
///
/// Bars are validated on construction and never mutated afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct Series {
    symbol: String,
    interval: Interval,
    bars: Vec<Bar>,
}

impl Series {
    /// Build a series, rejecting malformed bars and out-of-order timestamps.
    pub fn new(
        symbol: impl Into<String>,
        interval: Interval,
        bars: Vec<Bar>,
    ) -> Result<Self, AnalysisError> {
        for (i, bar) in bars.iter().enumerate() {
            bar.validate()
                .map_err(|reason| AnalysisError::InvalidSeries(format!("bar {}: {}", i, reason)))?;
            if i > 0 && bar.timestamp <= bars[i - 1].timestamp {
                return Err(AnalysisError::InvalidSeries(format!(
                    "bar {}: timestamp {} not after {}",
                    i,
                    bar.timestamp,
                    bars[i - 1].timestamp
                )));
            }
        }

        Ok(Self {
            symbol: symbol.into(),
            interval,
            bars,
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn interval(&self) -> Interval {
        self.interval
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn first(&self) -> Option<&Bar> {
        self.bars.first()
    }

    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }

    /// Close prices in bar order.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Bar-to-bar fractional returns of the close.
    pub fn returns(&self) -> Vec<f64> {
        self.bars
            .windows(2)
            .map(|w| (w[1].close - w[0].close) / w[0].close)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn ts(day: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::days(day)
    }

    #[test]
    fn test_chart_range_parse_and_display() {
        assert_eq!("6mo".parse::<ChartRange>(), Ok(ChartRange::SixMonths));
        assert_eq!(ChartRange::TwoYears.to_string(), "2y");
        assert!("10y".parse::<ChartRange>().is_err());
    }

    #[test]
    fn test_interval_parse() {
        assert_eq!("1wk".parse::<Interval>(), Ok(Interval::OneWeek));
        assert_eq!("15m".parse::<Interval>(), Ok(Interval::FifteenMinutes));
        assert!("2h".parse::<Interval>().is_err());
    }

    #[test]
    fn test_minute_intervals_clamp_to_seven_days() {
        assert_eq!(
            ChartRange::OneMonth.clamp_for(Interval::FiveMinutes),
            ChartRange::SevenDays
        );
        assert_eq!(
            ChartRange::FiveDays.clamp_for(Interval::OneMinute),
            ChartRange::FiveDays
        );
    }

    #[test]
    fn test_quarter_hour_intervals_clamp_to_sixty_days() {
        assert_eq!(
            ChartRange::OneYear.clamp_for(Interval::FifteenMinutes),
            ChartRange::SixtyDays
        );
        assert_eq!(
            ChartRange::OneMonth.clamp_for(Interval::ThirtyMinutes),
            ChartRange::OneMonth
        );
    }

    #[test]
    fn test_hourly_intervals_clamp_to_730_days() {
        assert_eq!(
            ChartRange::FiveYears.clamp_for(Interval::OneHour),
            ChartRange::SevenHundredThirtyDays
        );
        assert_eq!(
            ChartRange::TwoYears.clamp_for(Interval::SixtyMinutes),
            ChartRange::TwoYears
        );
    }

    #[test]
    fn test_daily_interval_is_unbounded() {
        assert!(!Interval::OneDay.is_intraday());
        assert_eq!(
            ChartRange::FiveYears.clamp_for(Interval::OneDay),
            ChartRange::FiveYears
        );
    }

    #[test]
    fn test_bar_geometry() {
        let bar = Bar::new(ts(0), 100.0, 110.0, 90.0, 105.0, 1.0);
        assert_eq!(bar.body(), 5.0);
        assert_eq!(bar.range(), 20.0);
        assert_eq!(bar.upper_shadow(), 5.0);
        assert_eq!(bar.lower_shadow(), 10.0);
        assert!(bar.is_bullish());
        assert!(!bar.is_bearish());
    }

    #[test]
    fn test_series_rejects_high_below_low() {
        let bars = vec![Bar::new(ts(0), 100.0, 90.0, 95.0, 92.0, 1.0)];
        let err = Series::new("X", Interval::OneDay, bars).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidSeries(_)));
    }

    #[test]
    fn test_series_rejects_high_below_close() {
        let bars = vec![Bar::new(ts(0), 100.0, 101.0, 99.0, 102.0, 1.0)];
        assert!(Series::new("X", Interval::OneDay, bars).is_err());
    }

    #[test]
    fn test_series_rejects_unordered_timestamps() {
        let bars = vec![
            Bar::new(ts(1), 100.0, 101.0, 99.0, 100.0, 1.0),
            Bar::new(ts(1), 100.0, 101.0, 99.0, 100.0, 1.0),
        ];
        let err = Series::new("X", Interval::OneDay, bars).unwrap_err();
        assert!(err.to_string().contains("not after"));
    }

    #[test]
    fn test_series_rejects_non_positive_price() {
        let mut bars: Vec<Bar> = (0..30)
            .map(|i| Bar::new(ts(i), 100.0, 100.0, 100.0, 100.0, 1.0))
            .collect();
        bars[10] = Bar::new(ts(10), 100.0, 100.0, 0.0, 0.0, 1.0);
        let err = Series::new("X", Interval::OneDay, bars).unwrap_err();
        assert!(err.to_string().contains("bar 10"));

        let bars = vec![Bar::new(ts(0), -2.0, -1.0, -3.0, -2.0, 1.0)];
        assert!(Series::new("X", Interval::OneDay, bars).is_err());
    }

    #[test]
    fn test_series_rejects_negative_volume() {
        let bars = vec![Bar::new(ts(0), 100.0, 101.0, 99.0, 100.0, -5.0)];
        assert!(Series::new("X", Interval::OneDay, bars).is_err());
    }

    #[test]
    fn test_series_returns() {
        let bars = vec![
            Bar::new(ts(0), 100.0, 100.0, 100.0, 100.0, 1.0),
            Bar::new(ts(1), 110.0, 110.0, 110.0, 110.0, 1.0),
            Bar::new(ts(2), 99.0, 99.0, 99.0, 99.0, 1.0),
        ];
        let series = Series::new("X", Interval::OneDay, bars).unwrap();
        let returns = series.returns();
        assert_eq!(returns.len(), 2);
        assert!((returns[0] - 0.1).abs() < 1e-12);
        assert!((returns[1] + 0.1).abs() < 1e-12);
        assert_eq!(series.closes(), vec![100.0, 110.0, 99.0]);
    }
}
