//! Plain-text reports.
//!
//! Each report borrows its data and renders through `Display`, so callers can
//! print it, log it or write it to a file.

use crate::services::discovery::DiscoveredAsset;
use crate::types::{AssetAnalysis, ComparisonReport, ComparisonRow, ScenarioName};
use std::fmt;

/// Rows listed in the top and bottom sections of a comparison.
pub const SUMMARY_ROWS: usize = 5;

/// Patterns listed per analysis report.
const LISTED_PATTERNS: usize = 10;

const RULE: &str = "============================================================";

fn optional(value: Option<f64>, suffix: &str) -> String {
    value
        .map(|v| format!("{:.2}{}", v, suffix))
        .unwrap_or_else(|| "n/a".to_string())
}

/// Full report for one analyzed asset.
pub struct AssetReport<'a>(pub &'a AssetAnalysis);

impl fmt::Display for AssetReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let a = self.0;
        let stats = &a.statistics;
        let trend = &a.trend;
        let prediction = &a.prediction;

        writeln!(f, "{}", RULE)?;
        writeln!(f, "{} ({})", a.asset, a.ticker)?;
        writeln!(
            f,
            "Range {} / interval {} / generated {}",
            a.range,
            a.interval,
            a.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(f, "{}", RULE)?;

        writeln!(f, "\nMarket statistics")?;
        writeln!(f, "  Current price:   {:.2}", stats.current_price)?;
        writeln!(f, "  Initial price:   {:.2}", stats.initial_price)?;
        writeln!(
            f,
            "  Change:          {:+.2} ({:+.2}%)",
            stats.change_abs, stats.change_pct
        )?;
        writeln!(
            f,
            "  High / low:      {:.2} / {:.2}",
            stats.max_price, stats.min_price
        )?;
        writeln!(f, "  Volatility:      {:.2}%", stats.volatility)?;
        writeln!(f, "  Average volume:  {:.0}", stats.average_volume)?;
        writeln!(f, "  Bars:            {}", stats.bars)?;

        writeln!(f, "\nTrend")?;
        writeln!(f, "  SMA 20:          {}", optional(trend.sma20, ""))?;
        writeln!(f, "  SMA 50:          {}", optional(trend.sma50, ""))?;
        match trend.rsi_zone() {
            Some(zone) => writeln!(
                f,
                "  RSI 14:          {} ({})",
                optional(trend.rsi14, ""),
                zone
            )?,
            None => writeln!(f, "  RSI 14:          n/a")?,
        }
        writeln!(
            f,
            "  Support:         {:.2}   Resistance: {:.2}",
            trend.support, trend.resistance
        )?;
        writeln!(
            f,
            "  Trend:           {}   Signal: {}",
            trend.trend.map(|t| t.label()).unwrap_or("n/a"),
            trend.signal.label()
        )?;

        writeln!(
            f,
            "\nPatterns ({} detected, {} recent: {} bullish, {} bearish)",
            a.patterns.total,
            a.patterns.recent.len(),
            a.patterns.bullish_count(),
            a.patterns.bearish_count()
        )?;
        for pattern in a.patterns.recent.iter().take(LISTED_PATTERNS) {
            writeln!(
                f,
                "  {}  {:<22} {:<8} {:<9} {}",
                pattern.timestamp.format("%Y-%m-%d"),
                pattern.kind.name(),
                pattern.bias.label(),
                pattern.confidence.label(),
                pattern.rationale
            )?;
        }

        writeln!(f, "\nPrediction")?;
        writeln!(
            f,
            "  Direction:       {} ({:.0}% confidence)",
            prediction.direction.label(),
            prediction.confidence
        )?;
        writeln!(
            f,
            "  Price range:     {:.2} .. {:.2} (target {:.2}, {:+.2}%)",
            prediction.price_range.minimum,
            prediction.price_range.maximum,
            prediction.price_range.target,
            a.expected_return_pct
        )?;
        for name in [
            ScenarioName::Optimistic,
            ScenarioName::Base,
            ScenarioName::Pessimistic,
        ] {
            if let Some(s) = prediction.scenario(name) {
                writeln!(
                    f,
                    "  {:<16} {:.2} ({:.0}%) {}",
                    format!("{:?}:", s.name),
                    s.target_price,
                    s.probability,
                    s.description
                )?;
            }
        }

        let eff = &a.effectiveness;
        writeln!(f, "\nPattern effectiveness")?;
        if eff.analyzed == 0 {
            writeln!(f, "  No patterns with enough follow-up bars")?;
        } else {
            writeln!(
                f,
                "  {} evaluated, {} bullish hits, {} bearish hits, precision {:.1}%",
                eff.analyzed, eff.bullish_hits, eff.bearish_hits, eff.precision_pct
            )?;
        }

        writeln!(
            f,
            "\nRentability score: {:.2} [{}] -> {}",
            a.score.score,
            a.score.category.label(),
            a.score.recommendation.label()
        )
    }
}

/// Ranking summary for a batch comparison.
pub struct ComparisonSummary<'a>(pub &'a ComparisonReport);

impl ComparisonSummary<'_> {
    fn write_rows(f: &mut fmt::Formatter<'_>, rows: &[ComparisonRow]) -> fmt::Result {
        for row in rows {
            writeln!(
                f,
                "  {:<24} {:<10} {:>6.2}  {:<16} {:>+7.2}%",
                row.asset,
                row.ticker,
                row.score,
                row.recommendation.label(),
                row.return_pct
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for ComparisonSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;

        writeln!(f, "{}", RULE)?;
        writeln!(
            f,
            "Comparative analysis: {} assets ranked, range {} / interval {}",
            report.rows.len(),
            report.range,
            report.interval
        )?;
        writeln!(f, "{}", RULE)?;

        if report.rows.is_empty() {
            writeln!(f, "\nNo asset could be analyzed.")?;
        } else {
            writeln!(f, "\nTop {}", SUMMARY_ROWS.min(report.rows.len()))?;
            Self::write_rows(f, report.top(SUMMARY_ROWS))?;

            writeln!(f, "\nBottom {}", SUMMARY_ROWS.min(report.rows.len()))?;
            Self::write_rows(f, report.bottom(SUMMARY_ROWS))?;

            writeln!(f, "\nBy category")?;
            for (category, count) in report.category_counts() {
                writeln!(f, "  {:<16} {}", category.label(), count)?;
            }

            let dist = report.signal_distribution();
            writeln!(f, "\nSignals")?;
            writeln!(
                f,
                "  buy {}   hold {}   sell {}",
                dist.buy, dist.hold, dist.sell
            )?;

            writeln!(f, "\nAverages")?;
            writeln!(f, "  Score:           {}", optional(report.average_score(), ""))?;
            writeln!(
                f,
                "  Expected return: {}",
                optional(report.average_return(), "%")
            )?;
            writeln!(
                f,
                "  Confidence:      {}",
                optional(report.average_confidence(), "%")
            )?;
        }

        if !report.failures.is_empty() {
            writeln!(f, "\nFailed ({})", report.failures.len())?;
            for failure in &report.failures {
                writeln!(f, "  {}: {}", failure.asset, failure.reason)?;
            }
        }
        Ok(())
    }
}

/// Listing of discovered candidates.
pub struct DiscoveryReport<'a>(pub &'a [DiscoveredAsset]);

impl fmt::Display for DiscoveryReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", RULE)?;
        writeln!(f, "Discovery: {} promising assets", self.0.len())?;
        writeln!(f, "{}", RULE)?;
        for asset in self.0 {
            writeln!(
                f,
                "  {:<24} {:<10} score {:>3}  30d {:>+7.2}%  90d {:>+7.2}%  vol {:.2}%  RSI {:.1}{}",
                asset.name,
                asset.ticker,
                asset.score,
                asset.growth_30d,
                asset.growth_90d,
                asset.volatility,
                asset.rsi,
                if asset.uptrend { "  uptrend" } else { "" }
            )?;
        }
        Ok(())
    }
}
