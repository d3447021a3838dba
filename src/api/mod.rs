pub mod analysis;
pub mod assets;
pub mod health;
pub mod news;

use crate::config::Config;
use crate::services::signals::PatternDetector;
use crate::services::ComparativeAnalyzer;
use crate::sources::SeriesSource;
use crate::types::AssetCatalog;
use axum::Router;
use serde::Serialize;
use std::sync::Arc;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub catalog: Arc<AssetCatalog>,
    pub analyzer: Arc<ComparativeAnalyzer>,
}

impl AppState {
    pub fn new(config: Config, catalog: AssetCatalog, source: Arc<dyn SeriesSource>) -> Self {
        let analyzer = ComparativeAnalyzer::new(source)
            .with_detector(PatternDetector::new(config.recent_patterns));
        Self {
            config: Arc::new(config),
            catalog: Arc::new(catalog),
            analyzer: Arc::new(analyzer),
        }
    }
}

/// API response wrapper.
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
    pub meta: ApiMeta,
}

#[derive(Serialize)]
pub struct ApiMeta {
    /// Response time in unix milliseconds.
    pub timestamp: i64,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            meta: ApiMeta {
                timestamp: chrono::Utc::now().timestamp_millis(),
            },
        }
    }
}

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(assets::router())
        .merge(analysis::router())
        .merge(news::router())
}
