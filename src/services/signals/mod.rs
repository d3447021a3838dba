//! Technical signal engine.
//!
//! Provides pattern detection, indicator and trend calculation, the
//! prediction combinator and a back-check of pattern effectiveness. Every
//! entry point is a pure function of a validated `Series`.

pub mod accuracy;
pub mod indicators;
pub mod patterns;
pub mod predictions;
pub mod trend;

pub use accuracy::evaluate_effectiveness;
pub use indicators::{rsi_series, sma, sma_series, Indicator, Rsi, Sma};
pub use patterns::{detect, PatternDetector};
pub use predictions::PredictionEngine;
pub use trend::TrendCalculator;
