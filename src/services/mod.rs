pub mod comparison;
pub mod discovery;
pub mod export;
pub mod news;
pub mod report;
pub mod scoring;
pub mod signals;
pub mod statistics;

pub use comparison::{ComparativeAnalyzer, ProgressFn};
pub use discovery::{AssetDiscovery, DiscoveredAsset};
pub use report::{AssetReport, ComparisonSummary, DiscoveryReport};
pub use signals::{PatternDetector, PredictionEngine, TrendCalculator};
