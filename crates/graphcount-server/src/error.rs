use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use graphcount_core::error::AppError;

/// API error type that maps to HTTP responses.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Cache unavailable: {0}")]
    CacheUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error response body.
///
/// `status` repeats the HTTP status; `code` is a six-digit application code
/// whose first three digits are the HTTP status.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub cause: String,
    pub status: u16,
    pub message: String,
    pub code: u32,
}

impl ApiError {
    fn parts(&self) -> (StatusCode, u32, &'static str) {
        match self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, 400_001, "param error"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, 404_001, "graph not found"),
            ApiError::CacheUnavailable(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                500_001,
                "rollup cache unavailable",
            ),
            ApiError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                500_000,
                "internal error",
            ),
        }
    }

    fn into_body(self) -> (StatusCode, ErrorResponse) {
        let (status, code, message) = self.parts();
        let cause = match self {
            ApiError::BadRequest(msg)
            | ApiError::NotFound(msg)
            | ApiError::CacheUnavailable(msg)
            | ApiError::Internal(msg) => msg,
        };

        let body = ErrorResponse {
            cause,
            status: status.as_u16(),
            message: message.to_string(),
            code,
        };
        (status, body)
    }

    /// Renders the error payload with HTTP 200.
    ///
    /// Used where callers expect a degraded answer rather than a failed
    /// request; the error status is carried only in the body.
    pub fn into_degraded_response(self) -> Response {
        let (_, body) = self.into_body();
        (StatusCode::OK, Json(body)).into_response()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = self.into_body();
        (status, Json(body)).into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        match &err {
            AppError::InvalidGraphId(_) => ApiError::BadRequest(err.to_string()),
            AppError::GraphNotFound(_) => ApiError::NotFound(err.to_string()),
            AppError::CacheUnavailable(_) => ApiError::CacheUnavailable(err.to_string()),
            AppError::DatabaseError(_) => ApiError::Internal("Database error".to_string()),
            _ => ApiError::Internal(err.to_string()),
        }
    }
}
