//! Asset discovery.
//!
//! Scores a list of candidate tickers for growth potential and proposes the
//! best ones for the comparison catalog.

use crate::error::AnalysisError;
use crate::services::signals::indicators::{Indicator, Rsi, Sma};
use crate::services::statistics::volatility_pct;
use crate::sources::SeriesSource;
use crate::types::{AssetCatalog, ChartRange, Interval, Series};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Bars required before a candidate is scored.
pub const MIN_DISCOVERY_BARS: usize = 30;

/// Candidates scanned when no custom list is given.
pub const DEFAULT_CANDIDATES: &[(&str, &str)] = &[
    ("Solana", "SOL-USD"),
    ("Cardano", "ADA-USD"),
    ("Polkadot", "DOT-USD"),
    ("Avalanche", "AVAX-USD"),
    ("Chainlink", "LINK-USD"),
    ("Polygon", "MATIC-USD"),
    ("Palantir", "PLTR"),
    ("Snowflake", "SNOW"),
    ("CrowdStrike", "CRWD"),
    ("Cloudflare", "NET"),
    ("Datadog", "DDOG"),
    ("MongoDB", "MDB"),
    ("Unity", "U"),
    ("Roblox", "RBLX"),
    ("Advanced Micro Devices", "AMD"),
    ("Intel", "INTC"),
    ("Qualcomm", "QCOM"),
    ("Arm Holdings", "ARM"),
    ("Broadcom", "AVGO"),
    ("Block", "SQ"),
    ("PayPal", "PYPL"),
    ("Coinbase", "COIN"),
    ("Robinhood", "HOOD"),
    ("First Solar", "FSLR"),
    ("Enphase Energy", "ENPH"),
    ("SunPower", "SPWR"),
    ("Plug Power", "PLUG"),
    ("Moderna", "MRNA"),
    ("BioNTech", "BNTX"),
    ("Illumina", "ILMN"),
    ("CRISPR Therapeutics", "CRSP"),
    ("Shopify", "SHOP"),
    ("Etsy", "ETSY"),
    ("MercadoLibre", "MELI"),
    ("Rivian", "RIVN"),
    ("Lucid", "LCID"),
    ("NIO", "NIO"),
    ("Li Auto", "LI"),
    ("Sea Limited", "SE"),
    ("DraftKings", "DKNG"),
    ("Zoom", "ZM"),
    ("DocuSign", "DOCU"),
    ("Twilio", "TWLO"),
    ("Okta", "OKTA"),
];

/// Growth metrics and potential score of one candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveredAsset {
    pub name: String,
    pub ticker: String,
    pub price: f64,
    pub growth_30d: f64,
    pub growth_90d: f64,
    pub growth_total: f64,
    pub volatility: f64,
    pub rsi: f64,
    pub uptrend: bool,
    pub average_volume: f64,
    pub volume_increase_pct: f64,
    /// 0-100.
    pub score: u32,
}

/// Score a candidate series.
///
/// Missing RSI counts as 50 and a missing SMA-50 falls back to SMA-20.
pub fn assess(name: &str, ticker: &str, series: &Series) -> Result<DiscoveredAsset, AnalysisError> {
    if series.len() < MIN_DISCOVERY_BARS {
        return Err(AnalysisError::InsufficientData {
            needed: MIN_DISCOVERY_BARS,
            available: series.len(),
        });
    }

    let closes = series.closes();
    let n = closes.len();
    let price = closes[n - 1];
    let growth = |reference: f64| (price - reference) / reference * 100.0;

    let growth_30d = growth(closes[n - 30]);
    let growth_90d = growth(if n >= 90 { closes[n - 90] } else { closes[0] });
    let growth_total = growth(closes[0]);
    let volatility = volatility_pct(series);

    let volumes: Vec<f64> = series.bars().iter().map(|b| b.volume).collect();
    let average_volume = volumes.iter().sum::<f64>() / n as f64;
    let recent_volume = volumes[n - 10..].iter().sum::<f64>() / 10.0;
    let volume_increase_pct = if average_volume > 0.0 {
        (recent_volume - average_volume) / average_volume * 100.0
    } else {
        0.0
    };

    let rsi = Rsi::default().latest(&closes).unwrap_or(50.0);
    let sma20 = Sma::new(20).latest(&closes).unwrap_or(price);
    let sma50 = Sma::new(50).latest(&closes).unwrap_or(sma20);
    let uptrend = price > sma20 && sma20 > sma50;

    let mut score = 0;
    score += match growth_30d {
        g if g > 10.0 => 30,
        g if g > 5.0 => 20,
        g if g > 0.0 => 10,
        _ => 0,
    };
    score += match growth_90d {
        g if g > 20.0 => 25,
        g if g > 10.0 => 15,
        g if g > 0.0 => 5,
        _ => 0,
    };
    if uptrend {
        score += if rsi > 30.0 && rsi < 70.0 { 20 } else { 10 };
    }
    score += match volume_increase_pct {
        v if v > 20.0 => 15,
        v if v > 0.0 => 7,
        _ => 0,
    };
    score += match volatility {
        v if v < 3.0 => 10,
        v if v < 5.0 => 5,
        _ => 0,
    };

    Ok(DiscoveredAsset {
        name: name.to_string(),
        ticker: ticker.to_string(),
        price,
        growth_30d,
        growth_90d,
        growth_total,
        volatility,
        rsi,
        uptrend,
        average_volume,
        volume_increase_pct,
        score,
    })
}

/// Scans candidate tickers through a series source.
pub struct AssetDiscovery {
    source: Arc<dyn SeriesSource>,
    candidates: Vec<(String, String)>,
}

impl AssetDiscovery {
    pub fn new(source: Arc<dyn SeriesSource>) -> Self {
        Self::with_candidates(
            source,
            DEFAULT_CANDIDATES
                .iter()
                .map(|(n, t)| (n.to_string(), t.to_string())),
        )
    }

    pub fn with_candidates(
        source: Arc<dyn SeriesSource>,
        candidates: impl IntoIterator<Item = (String, String)>,
    ) -> Self {
        Self {
            source,
            candidates: candidates.into_iter().collect(),
        }
    }

    /// Score every candidate not already in `catalog` and keep those scoring
    /// at least `min_score`, best first.
    pub async fn discover(&self, catalog: &AssetCatalog, min_score: u32) -> Vec<DiscoveredAsset> {
        let mut found = Vec::new();
        info!(
            "Scanning {} candidates (min score {})",
            self.candidates.len(),
            min_score
        );

        for (name, ticker) in &self.candidates {
            if catalog.contains_ticker(ticker) {
                debug!("{} already in catalog", ticker);
                continue;
            }

            let assessed = match self
                .source
                .fetch(ticker, ChartRange::SixMonths, Interval::OneDay)
                .await
            {
                Ok(series) => assess(name, ticker, &series),
                Err(e) => Err(e),
            };

            match assessed {
                Ok(asset) if asset.score >= min_score => {
                    debug!("{} scored {}", ticker, asset.score);
                    found.push(asset);
                }
                Ok(asset) => debug!("{} scored {}, below threshold", ticker, asset.score),
                Err(e) => warn!("Skipping candidate {} ({}): {}", name, ticker, e),
            }
        }

        found.sort_by(|a, b| b.score.cmp(&a.score));
        info!("Discovered {} promising assets", found.len());
        found
    }
}

/// Add discovered assets to a catalog. Returns how many were new.
pub fn merge_into(catalog: &mut AssetCatalog, discovered: &[DiscoveredAsset]) -> usize {
    discovered
        .iter()
        .filter(|asset| catalog.add(asset.name.clone(), asset.ticker.clone()))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::StaticSource;
    use crate::types::Bar;
    use chrono::{Duration, TimeZone, Utc};

    fn series(closes: &[f64], volumes: &[f64]) -> Series {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let bars = closes
            .iter()
            .zip(volumes)
            .enumerate()
            .map(|(i, (&c, &v))| {
                Bar::new(start + Duration::days(i as i64), c, c + 0.5, c - 0.5, c, v)
            })
            .collect();
        Series::new("TEST", Interval::OneDay, bars).unwrap()
    }

    /// Steady 1% daily growth with rising volume.
    fn rocket(n: usize) -> Series {
        let closes: Vec<f64> = (0..n).map(|i| 100.0 * 1.01f64.powi(i as i32)).collect();
        let volumes: Vec<f64> = (0..n).map(|i| 1000.0 + i as f64 * 50.0).collect();
        series(&closes, &volumes)
    }

    #[test]
    fn test_short_series_rejected() {
        let err = assess("X", "X", &rocket(29)).unwrap_err();
        assert!(matches!(err, AnalysisError::InsufficientData { needed: 30, .. }));
    }

    #[test]
    fn test_steady_growth_scores_high() {
        // 30d +34% (+30), 90d +145% (+25), uptrend with RSI 100 (+10),
        // volume rising (+15), volatility ~0 (+10).
        let asset = assess("Rocket", "RKT", &rocket(120)).unwrap();
        assert!(asset.uptrend);
        assert_eq!(asset.rsi, 100.0);
        assert_eq!(asset.score, 90);
    }

    #[test]
    fn test_decline_scores_low() {
        let closes: Vec<f64> = (0..60).map(|i| 200.0 - i as f64 * 2.0).collect();
        let volumes = vec![1000.0; 60];
        let asset = assess("Sink", "SNK", &series(&closes, &volumes)).unwrap();
        assert!(!asset.uptrend);
        assert_eq!(asset.volume_increase_pct, 0.0);
        // Only the volatility bucket contributes.
        assert_eq!(asset.score, 10);
    }

    #[tokio::test]
    async fn test_discover_filters_and_skips_known() {
        let source = StaticSource::new()
            .with_series("RKT", rocket(120))
            .with_series("AAPL", rocket(120));
        let discovery = AssetDiscovery::with_candidates(
            Arc::new(source),
            vec![
                ("Rocket".to_string(), "RKT".to_string()),
                ("Apple".to_string(), "AAPL".to_string()),
                ("Ghost".to_string(), "GHOST".to_string()),
            ],
        );

        let found = discovery.discover(&AssetCatalog::default(), 60).await;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].ticker, "RKT");

        let mut catalog = AssetCatalog::empty();
        assert_eq!(merge_into(&mut catalog, &found), 1);
        assert_eq!(merge_into(&mut catalog, &found), 0);
        assert_eq!(catalog.get("Rocket"), Some("RKT"));
    }
}
