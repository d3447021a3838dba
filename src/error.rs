use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errors raised while loading or analyzing a single asset.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("Insufficient data: need at least {needed} bars, got {available}")]
    InsufficientData { needed: usize, available: usize },

    #[error("Source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("Invalid series: {0}")]
    InvalidSeries(String),

    #[error("Unknown asset: {0}")]
    UnknownAsset(String),
}

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Analysis(e) => match e {
                AnalysisError::UnknownAsset(_) => StatusCode::NOT_FOUND,
                AnalysisError::SourceUnavailable(_) => StatusCode::BAD_GATEWAY,
                AnalysisError::InsufficientData { .. } | AnalysisError::InvalidSeries(_) => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
            },
            AppError::SerdeJson(_) => StatusCode::BAD_REQUEST,
            AppError::Io(_) | AppError::Csv(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_data_message() {
        let err = AnalysisError::InsufficientData {
            needed: 2,
            available: 1,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient data: need at least 2 bars, got 1"
        );
    }

    #[test]
    fn test_unknown_asset_maps_to_not_found() {
        let err = AppError::from(AnalysisError::UnknownAsset("Dogecoin".to_string()));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_source_unavailable_maps_to_bad_gateway() {
        let err = AppError::from(AnalysisError::SourceUnavailable("timeout".to_string()));
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_bad_request_and_io_statuses() {
        let err = AppError::BadRequest("unknown range 'forever'".to_string());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err = AppError::from(std::io::Error::new(std::io::ErrorKind::Other, "disk full"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_invalid_series_is_unprocessable() {
        let err = AppError::from(AnalysisError::InvalidSeries("high < low".to_string()));
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
