//! Augury - technical pattern detection, prediction and rentability ranking
//! for market price series.

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod sources;
pub mod types;

pub use config::Config;
pub use error::{AnalysisError, AppError};
pub use types::*;
