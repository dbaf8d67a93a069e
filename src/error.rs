//! Error types for the Libris server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error codes exposed to API clients
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Success = 0,
    Failure = 1,
    NotAuthorized = 2,
    StorageFailure = 3,
    NoSuchUser = 4,
    NoSuchItem = 5,
    OutOfStock = 6,
    Duplicate = 7,
    DuplicateLoan = 8,
    NoOpenLoan = 9,
    BadValue = 10,
    ItemHasOpenLoans = 11,
    UserHasOpenLoans = 12,
}

/// Main application error type.
///
/// Business-rule violations (not found, duplicates, out of stock) are
/// ordinary result values. `Persistence` is the one category that is logged
/// in full where it is detected and travels upward as an opaque failure.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Item not found: {0}")]
    ItemNotFound(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Out of stock: {0}")]
    OutOfStock(String),

    #[error("Duplicate loan: {0}")]
    DuplicateLoan(String),

    #[error("No open loan: {0}")]
    NoOpenLoan(String),

    #[error("Item has open loans: {0}")]
    ItemHasOpenLoans(String),

    #[error("Holder has open loans: {0}")]
    HolderHasOpenLoans(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Persistence failure: {0}")]
    Persistence(String),
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
        let (status, code, message) = match &self {
            AppError::Authentication(msg) => {
                (StatusCode::UNAUTHORIZED, ErrorCode::NotAuthorized, msg.clone())
            }
            AppError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, ErrorCode::NoSuchItem, msg.clone())
            }
            AppError::ItemNotFound(msg) => {
                (StatusCode::NOT_FOUND, ErrorCode::NoSuchItem, msg.clone())
            }
            AppError::AlreadyExists(msg) => {
                (StatusCode::CONFLICT, ErrorCode::Duplicate, msg.clone())
            }
            AppError::OutOfStock(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, ErrorCode::OutOfStock, msg.clone())
            }
            AppError::DuplicateLoan(msg) => {
                (StatusCode::CONFLICT, ErrorCode::DuplicateLoan, msg.clone())
            }
            AppError::NoOpenLoan(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, ErrorCode::NoOpenLoan, msg.clone())
            }
            AppError::ItemHasOpenLoans(msg) => {
                (StatusCode::CONFLICT, ErrorCode::ItemHasOpenLoans, msg.clone())
            }
            AppError::HolderHasOpenLoans(msg) => {
                (StatusCode::CONFLICT, ErrorCode::UserHasOpenLoans, msg.clone())
            }
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone())
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::Failure,
                    "Internal server error".to_string(),
                )
            }
            AppError::Persistence(msg) => {
                // Full detail was logged where the write failed; the caller
                // only learns that the durable write did not complete.
                tracing::error!("Persistence failure surfaced to caller: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::StorageFailure,
                    "Persistent storage failure".to_string(),
                )
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

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
