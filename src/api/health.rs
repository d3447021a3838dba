use super::AppState;
use crate::types::{ChartRange, Interval};
use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

/// Liveness plus the defaults analysis requests fall back to.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthReport {
    status: &'static str,
    version: &'static str,
    catalog_size: usize,
    default_range: ChartRange,
    default_interval: Interval,
}

async fn health(State(state): State<AppState>) -> Json<HealthReport> {
    Json(HealthReport {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        catalog_size: state.catalog.len(),
        default_range: state.config.default_range,
        default_interval: state.config.default_interval,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/health", get(health))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_report_serialization() {
        let report = HealthReport {
            status: "ok",
            version: "1.0.0",
            catalog_size: 15,
            default_range: ChartRange::SixMonths,
            default_interval: Interval::OneDay,
        };

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"status\":\"ok\""));
        assert!(json.contains("\"catalogSize\":15"));
        assert!(json.contains("\"defaultRange\":\"6mo\""));
        assert!(json.contains("\"defaultInterval\":\"1d\""));
    }
}
