//! Error types for Lectern server

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Numeric error codes carried in every error response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Failure = 1,
    NotAuthenticated = 2,
    OutOfStock = 7,
    Duplicate = 8,
    AlreadyBorrowed = 13,
    NoActiveLoan = 14,
    BadValue = 18,
    NoSuchData = 20,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Not authenticated: {0}")]
    NotAuthenticated(String),

    #[error("Out of stock: {0}")]
    OutOfStock(String),

    #[error("Duplicate loan: {0}")]
    DuplicateLoan(String),

    #[error("No active loan: {0}")]
    NoActiveLoan(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status and error code for this error
    pub fn status_and_code(&self) -> (StatusCode, ErrorCode) {
        match self {
            AppError::DuplicateKey(_) => (StatusCode::CONFLICT, ErrorCode::Duplicate),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, ErrorCode::NoSuchData),
            AppError::NotAuthenticated(_) => {
                (StatusCode::UNAUTHORIZED, ErrorCode::NotAuthenticated)
            }
            AppError::OutOfStock(_) => (StatusCode::UNPROCESSABLE_ENTITY, ErrorCode::OutOfStock),
            AppError::DuplicateLoan(_) => (StatusCode::CONFLICT, ErrorCode::AlreadyBorrowed),
            AppError::NoActiveLoan(_) => (StatusCode::NOT_FOUND, ErrorCode::NoActiveLoan),
            AppError::InvalidInput(_) => (StatusCode::BAD_REQUEST, ErrorCode::BadValue),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::Failure),
        }
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match self {
            AppError::DuplicateKey(msg)
            | AppError::NotFound(msg)
            | AppError::NotAuthenticated(msg)
            | AppError::OutOfStock(msg)
            | AppError::DuplicateLoan(msg)
            | AppError::NoActiveLoan(msg)
            | AppError::InvalidInput(msg) => msg,
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Internal server error".to_string()
            }
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (status, body).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::InvalidInput(errors.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::DuplicateKey("x".into()), StatusCode::CONFLICT),
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (AppError::NotAuthenticated("x".into()), StatusCode::UNAUTHORIZED),
            (AppError::OutOfStock("x".into()), StatusCode::UNPROCESSABLE_ENTITY),
            (AppError::DuplicateLoan("x".into()), StatusCode::CONFLICT),
            (AppError::NoActiveLoan("x".into()), StatusCode::NOT_FOUND),
            (AppError::InvalidInput("x".into()), StatusCode::BAD_REQUEST),
            (AppError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(err.status_and_code().0, status, "{err}");
        }
    }

    #[test]
    fn test_response_carries_code() {
        let response = AppError::OutOfStock("none left".into()).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_internal_error_hides_detail() {
        let response = AppError::Internal("lock poisoned".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = tokio_test::block_on(axum::body::to_bytes(response.into_body(), usize::MAX))
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["code"], 1);
        assert_eq!(body["error"], "Failure");
        assert_eq!(body["message"], "Internal server error");
    }
}
