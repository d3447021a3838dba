use crate::services::signals::patterns::DEFAULT_RECENT_LIMIT;
use crate::types::{ChartRange, Interval};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// JSON file holding the asset catalog.
    pub catalog_path: PathBuf,
    /// Root directory for reports and exports.
    pub output_dir: PathBuf,
    /// Range used when a command or request does not name one.
    pub default_range: ChartRange,
    /// Interval used when a command or request does not name one.
    pub default_interval: Interval,
    /// Number of most recent patterns kept per scan.
    pub recent_patterns: usize,
    /// Minimum potential score for discovered assets (0-100).
    pub discovery_min_score: u32,
    /// Timeout for a single series request.
    pub http_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from any key lookup, applying defaults for
    /// missing or unparsable values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parsed(&lookup, "PORT").unwrap_or(3001),
            catalog_path: lookup("AUGURY_CATALOG_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("data/assets.json")),
            output_dir: lookup("AUGURY_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("output")),
            default_range: parsed(&lookup, "AUGURY_DEFAULT_RANGE")
                .unwrap_or(ChartRange::SixMonths),
            default_interval: parsed(&lookup, "AUGURY_DEFAULT_INTERVAL")
                .unwrap_or(Interval::OneDay),
            recent_patterns: parsed(&lookup, "AUGURY_RECENT_PATTERNS")
                .filter(|&n: &usize| n > 0)
                .unwrap_or(DEFAULT_RECENT_LIMIT),
            discovery_min_score: parsed(&lookup, "AUGURY_DISCOVERY_MIN_SCORE")
                .map(|n: u32| n.min(100))
                .unwrap_or(60),
            http_timeout: Duration::from_secs(
                parsed(&lookup, "AUGURY_HTTP_TIMEOUT_SECS").unwrap_or(30),
            ),
        }
    }

    /// Address the HTTP server binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Directory receiving comparison exports.
    pub fn reports_dir(&self) -> PathBuf {
        self.output_dir.join("reports")
    }
}

fn parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|v| v.trim().parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
