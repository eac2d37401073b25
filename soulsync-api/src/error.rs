//! Error types for soulsync-api

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use soulsync_common::assessment::ScoringError;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or invalid session (401)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Upstream analysis service failure (502)
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Scoring engine error
    #[error("Scoring error: {0}")]
    Scoring(#[from] ScoringError),

    /// soulsync-common error
    #[error("Common error: {0}")]
    Common(#[from] soulsync_common::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            ApiError::Upstream(msg) => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR", msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg),
            ApiError::Io(ref err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "IO_ERROR",
                err.to_string(),
            ),
            ApiError::Scoring(ref err) => {
                let (status, code) = match err {
                    ScoringError::InvalidAnswer { .. } => {
                        (StatusCode::BAD_REQUEST, "INVALID_ANSWER")
                    }
                    ScoringError::SessionComplete => (StatusCode::CONFLICT, "SESSION_COMPLETE"),
                    // catalogue defects are server-side bugs
                    ScoringError::InconsistentScale { .. } | ScoringError::Catalog(_) => {
                        (StatusCode::INTERNAL_SERVER_ERROR, "CATALOG_ERROR")
                    }
                };
                (status, code, err.to_string())
            }
            // storage and config failures are always the server's fault
            ApiError::Common(ref err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "COMMON_ERROR",
                err.to_string(),
            ),
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: ApiError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_of(ApiError::Unauthorized("no cookie".into())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(ApiError::Scoring(ScoringError::InvalidAnswer {
                question_id: "root-1".into(),
                reason: "value 11 outside scale range 1-10".into(),
            })),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(ApiError::Scoring(ScoringError::SessionComplete)),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(ApiError::Upstream("connection refused".into())),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_of(ApiError::Common(soulsync_common::Error::Config(
                "missing key".into()
            ))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
