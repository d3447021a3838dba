//! Analysis and ranking endpoints.

use super::{ApiResponse, AppState};
use crate::error::{AnalysisError, AppError, Result};
use crate::types::{AssetAnalysis, ChartRange, ComparisonReport, Interval};
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::info;

/// Query parameters shared by the analysis endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct AnalysisQuery {
    /// Lookback range, e.g. `6mo` or `1y`.
    pub range: Option<String>,
    /// Bar interval, e.g. `1d` or `1h`.
    pub interval: Option<String>,
}

impl AnalysisQuery {
    /// Resolve range and interval against the configured defaults.
    fn resolve(&self, state: &AppState) -> Result<(ChartRange, Interval)> {
        let range = match self.range.as_deref() {
            Some(raw) => raw.parse().map_err(AppError::BadRequest)?,
            None => state.config.default_range,
        };
        let interval = match self.interval.as_deref() {
            Some(raw) => raw.parse().map_err(AppError::BadRequest)?,
            None => state.config.default_interval,
        };
        Ok((range, interval))
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/analysis/:asset", get(analyze_asset))
        .route("/api/ranking", get(ranking))
}

/// Analyze one catalog asset, addressed by name or ticker.
async fn analyze_asset(
    State(state): State<AppState>,
    Path(asset): Path<String>,
    Query(query): Query<AnalysisQuery>,
) -> Result<Json<ApiResponse<AssetAnalysis>>> {
    let (range, interval) = query.resolve(&state)?;
    let entry = state
        .catalog
        .resolve(&asset)
        .ok_or_else(|| AnalysisError::UnknownAsset(asset.clone()))?;

    let analysis = state
        .analyzer
        .analyze_asset(&entry.name, &entry.ticker, range, interval)
        .await?;

    Ok(Json(ApiResponse::new(analysis)))
}

/// Rank every catalog asset.
async fn ranking(
    State(state): State<AppState>,
    Query(query): Query<AnalysisQuery>,
) -> Result<Json<ApiResponse<ComparisonReport>>> {
    let (range, interval) = query.resolve(&state)?;
    info!("Ranking {} assets via API", state.catalog.len());
    let report = state
        .analyzer
        .analyze_all(&state.catalog, range, interval, None)
        .await;
    Ok(Json(ApiResponse::new(report)))
}
