use crate::error::{AppError, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Assets compared by default when no catalog file exists yet.
const DEFAULT_ASSETS: &[(&str, &str)] = &[
    ("Bitcoin", "BTC-USD"),
    ("Ethereum", "ETH-USD"),
    ("Tesla", "TSLA"),
    ("Apple", "AAPL"),
    ("Microsoft", "MSFT"),
    ("Amazon", "AMZN"),
    ("Google", "GOOGL"),
    ("NVIDIA", "NVDA"),
    ("Meta", "META"),
    ("Netflix", "NFLX"),
    ("S&P 500", "^GSPC"),
    ("Dow Jones", "^DJI"),
    ("NASDAQ", "^IXIC"),
    ("Gold", "GC=F"),
    ("Silver", "SI=F"),
];

/// One named ticker in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub ticker: String,
}

/// On-disk layout of the catalog file.
#[derive(Debug, Serialize, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    updated_at: Option<String>,
    #[serde(default)]
    total: Option<usize>,
    assets: serde_json::Map<String, serde_json::Value>,
}

/// Ordered map of display name to ticker symbol.
///
/// The catalog is a plain value: load it once, pass it to whatever needs it,
/// save it back after edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetCatalog {
    entries: Vec<CatalogEntry>,
}

impl Default for AssetCatalog {
    fn default() -> Self {
        Self::from_pairs(DEFAULT_ASSETS.iter().copied())
    }
}

impl AssetCatalog {
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn from_pairs<N, T>(pairs: impl IntoIterator<Item = (N, T)>) -> Self
    where
        N: Into<String>,
        T: Into<String>,
    {
        let mut catalog = Self::empty();
        for (name, ticker) in pairs {
            catalog.add(name, ticker);
        }
        catalog
    }

    /// Read a catalog file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let file: CatalogFile = serde_json::from_str(&raw)?;

        let mut catalog = Self::empty();
        for (name, value) in file.assets {
            let ticker = value.as_str().ok_or_else(|| {
                AppError::BadRequest(format!("ticker for '{}' is not a string", name))
            })?;
            catalog.add(name, ticker);
        }
        Ok(catalog)
    }

    /// Read a catalog file, falling back to the built-in assets when it is
    /// missing or unreadable.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(catalog) => {
                tracing::debug!("Loaded {} assets from {}", catalog.len(), path.display());
                catalog
            }
            Err(e) => {
                if path.exists() {
                    tracing::warn!("Failed to load catalog {}: {}", path.display(), e);
                }
                Self::default()
            }
        }
    }

    /// Write the catalog, creating parent directories as needed.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let assets = self
            .entries
            .iter()
            .map(|e| (e.name.clone(), serde_json::Value::String(e.ticker.clone())))
            .collect();
        let file = CatalogFile {
            updated_at: Some(Utc::now().to_rfc3339()),
            total: Some(self.entries.len()),
            assets,
        };

        std::fs::write(path, serde_json::to_string_pretty(&file)?)?;
        tracing::info!("Saved {} assets to {}", self.entries.len(), path.display());
        Ok(())
    }

    /// Insert or update an entry. Returns true when the name was new.
    pub fn add(&mut self, name: impl Into<String>, ticker: impl Into<String>) -> bool {
        let name = name.into();
        let ticker = ticker.into();
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(existing) => {
                existing.ticker = ticker;
                false
            }
            None => {
                self.entries.push(CatalogEntry { name, ticker });
                true
            }
        }
    }

    /// Ticker for an exact display name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.ticker.as_str())
    }

    /// Find an entry by display name or ticker, ignoring case.
    pub fn resolve(&self, query: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| {
            e.name.eq_ignore_ascii_case(query) || e.ticker.eq_ignore_ascii_case(query)
        })
    }

    pub fn contains_ticker(&self, ticker: &str) -> bool {
        self.entries
            .iter()
            .any(|e| e.ticker.eq_ignore_ascii_case(ticker))
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
