//! Error types for the portfolio API
//!
//! Provides:
//! - Distinct error types for validation, store and internal failures
//! - HTTP status code mapping
//! - Structured error responses with per-field details

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::schema::ValidationFailure;

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

/// Error codes for machine-readable error identification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Validation errors
    ValidationError,

    // Database errors
    DatabaseError,
    DatabaseUnavailable,
    InvalidDocument,

    // Internal errors
    SerializationError,
}

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation failed: {0}")]
    Validation(ValidationFailure),

    // Database errors
    #[error("Database not available")]
    DatabaseUnavailable,

    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("Invalid document in collection '{collection}': {message}")]
    InvalidDocument { collection: String, message: String },

    // Internal errors
    #[error("Document serialization error: {0}")]
    BsonSerialization(#[from] bson::ser::Error),
}

impl AppError {
    /// Get the error code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation(_) => ErrorCode::ValidationError,
            AppError::DatabaseUnavailable => ErrorCode::DatabaseUnavailable,
            AppError::Database(_) => ErrorCode::DatabaseError,
            AppError::InvalidDocument { .. } => ErrorCode::InvalidDocument,
            AppError::BsonSerialization(_) => ErrorCode::SerializationError,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 422 Unprocessable Entity
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,

            // 500 Internal Server Error
            AppError::DatabaseUnavailable |
            AppError::Database(_) |
            AppError::InvalidDocument { .. } |
            AppError::BsonSerialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Check if this error should be logged at error level
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }

    /// Check if this error is a client error
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }

    /// Per-field detail attached to the response body
    fn details(&self) -> Option<serde_json::Value> {
        match self {
            AppError::Validation(failure) => serde_json::to_value(&failure.violations).ok(),
            _ => None,
        }
    }
}

impl From<ValidationFailure> for AppError {
    fn from(failure: ValidationFailure) -> Self {
        AppError::Validation(failure)
    }
}

/// Structured error response for API
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetails,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();
        let message = self.to_string();

        // Log based on severity
        if self.is_server_error() {
            tracing::error!(
                error = %message,
                code = ?code,
                status = status.as_u16(),
                "Server error"
            );
        } else if self.is_client_error() {
            tracing::warn!(
                error = %message,
                code = ?code,
                status = status.as_u16(),
                "Client error"
            );
        }

        let body = ErrorResponse {
            error: ErrorDetails {
                code,
                message,
                details: self.details(),
            },
        };

        (status, Json(body)).into_response()
    }
}
