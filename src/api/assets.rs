//! Asset catalog endpoint.

use super::{ApiResponse, AppState};
use crate::types::CatalogEntry;
use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
pub struct AssetList {
    pub total: usize,
    pub assets: Vec<CatalogEntry>,
}

/// List the catalog in insertion order.
async fn list_assets(State(state): State<AppState>) -> Json<ApiResponse<AssetList>> {
    let assets: Vec<CatalogEntry> = state.catalog.iter().cloned().collect();
    Json(ApiResponse::new(AssetList {
        total: assets.len(),
        assets,
    }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/assets", get(list_assets))
}
