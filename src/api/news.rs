//! News sentiment endpoint.

use super::{ApiResponse, AppState};
use crate::services::news;
use crate::types::{NewsItem, SentimentSummary};
use axum::{routing::post, Json, Router};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SummaryRequest {
    #[serde(default)]
    pub items: Vec<NewsItem>,
}

/// POST /api/news/summary
///
/// Aggregate the polarity of externally scored headlines.
async fn summarize(Json(request): Json<SummaryRequest>) -> Json<ApiResponse<SentimentSummary>> {
    Json(ApiResponse::new(news::summarize(&request.items)))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/news/summary", post(summarize))
}
