//! Error Types for Ticketry API
//!
//! This module defines error handling for the API layer, including:
//! - ApiError struct carrying an error code and message
//! - ErrorCode enum for categorizing errors
//! - IntoResponse implementation writing the failure envelope
//!
//! Every error leaves the server as `{"isSuccessful": false, "error": "..."}`
//! with the status code of its category.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use ticketry_core::ValidationError;
use tokio_postgres::error::SqlState;

use crate::types::Envelope;

// ============================================================================
// ERROR CODE ENUM
// ============================================================================

/// Error codes for API responses.
///
/// Each error code maps to a specific HTTP status code and represents
/// a category of error that can occur during API operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // ========================================================================
    // Validation Errors (400)
    // ========================================================================
    /// Request contains invalid input data
    InvalidInput,

    /// Field format is incorrect
    InvalidFormat,

    /// Edit touched a field that is fixed at creation
    ImmutableField,

    // ========================================================================
    // Not Found Errors (404, 422)
    // ========================================================================
    /// Requested entity does not exist
    EntityNotFound,

    /// A foreign key in the request points at a missing row
    ReferenceNotFound,

    // ========================================================================
    // Conflict Errors (409)
    // ========================================================================
    /// A uniqueness rule would be violated
    EntityAlreadyExists,

    // ========================================================================
    // Server Errors (500, 503)
    // ========================================================================
    /// A statement affected an unexpected number of rows
    IntegrityViolation,

    /// Internal server error
    InternalError,

    /// Database operation failed
    DatabaseError,

    /// Service is temporarily unavailable
    ServiceUnavailable,

    /// Database connection pool exhausted
    ConnectionPoolExhausted,
}

impl ErrorCode {
    /// Get the HTTP status code for this error code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::InvalidInput | ErrorCode::InvalidFormat | ErrorCode::ImmutableField => {
                StatusCode::BAD_REQUEST
            }

            ErrorCode::EntityNotFound => StatusCode::NOT_FOUND,

            ErrorCode::ReferenceNotFound => StatusCode::UNPROCESSABLE_ENTITY,

            ErrorCode::EntityAlreadyExists => StatusCode::CONFLICT,

            ErrorCode::ServiceUnavailable | ErrorCode::ConnectionPoolExhausted => {
                StatusCode::SERVICE_UNAVAILABLE
            }

            ErrorCode::IntegrityViolation
            | ErrorCode::InternalError
            | ErrorCode::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get a default message for this error code.
    pub fn default_message(&self) -> &'static str {
        match self {
            ErrorCode::InvalidInput => "Invalid input data",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::ImmutableField => "Field cannot be changed",
            ErrorCode::EntityNotFound => "Entity not found",
            ErrorCode::ReferenceNotFound => "Referenced entity not found",
            ErrorCode::EntityAlreadyExists => "Entity already exists",
            ErrorCode::IntegrityViolation => "Unexpected number of rows affected",
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database operation failed",
            ErrorCode::ServiceUnavailable => "Service temporarily unavailable",
            ErrorCode::ConnectionPoolExhausted => "Connection pool exhausted",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

// ============================================================================
// API ERROR STRUCT
// ============================================================================

/// Structured error for API operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code categorizing the error
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

impl ApiError {
    /// Create a new API error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Create a new API error with the given code, using the default message.
    pub fn from_code(code: ErrorCode) -> Self {
        Self {
            code,
            message: code.default_message().to_string(),
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        self.code.status_code()
    }

    // ========================================================================
    // Convenience constructors for common errors
    // ========================================================================

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Create an InvalidFormat error.
    pub fn invalid_format(field: &str, expected: &str) -> Self {
        Self::new(
            ErrorCode::InvalidFormat,
            format!("Field '{}' has invalid format, expected {}", field, expected),
        )
    }

    pub fn immutable_field(table: &str, field: &str) -> Self {
        Self::new(
            ErrorCode::ImmutableField,
            format!("Cannot change {} of {}", field, table),
        )
    }

    /// Create an EntityNotFound error.
    pub fn entity_not_found(entity_type: &str, id: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::EntityNotFound,
            format!("{} with id {} not found", entity_type, id),
        )
    }

    /// A foreign key of the request names a row that does not exist.
    pub fn reference_not_found(entity_type: &str, id: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::ReferenceNotFound,
            format!("{} with id {} does not exist", entity_type, id),
        )
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::EntityAlreadyExists, message)
    }

    pub fn integrity_violation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::IntegrityViolation, message)
    }

    /// Create an InternalError.
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Create a DatabaseError.
    pub fn database_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }

    /// Create a ServiceUnavailable error.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Create a ConnectionPoolExhausted error.
    pub fn connection_pool_exhausted() -> Self {
        Self::from_code(ErrorCode::ConnectionPoolExhausted)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// ============================================================================
// AXUM INTEGRATION
// ============================================================================

/// Writes the failure envelope with the status of the error's category.
///
/// ```ignore
/// async fn handler() -> ApiResult<Envelope<Ticket>> {
///     Err(ApiError::entity_not_found("Ticket", 9))
/// }
/// ```
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(Envelope::<()>::failure(self.to_string()));
        (status, body).into_response()
    }
}

// ============================================================================
// CONVERSIONS FROM STANDARD ERRORS
// ============================================================================

/// Convert from tokio_postgres::Error to ApiError.
///
/// Constraint violations keep their category so a race that slips past an
/// application guard still answers with the guard's error kind.
impl From<tokio_postgres::Error> for ApiError {
    fn from(err: tokio_postgres::Error) -> Self {
        let constraint = err
            .as_db_error()
            .and_then(|db| db.constraint())
            .unwrap_or("unknown")
            .to_string();

        match err.code() {
            Some(code) if *code == SqlState::UNIQUE_VIOLATION => {
                tracing::warn!(constraint = %constraint, "Unique constraint violated");
                ApiError::conflict(format!("Unique constraint {} violated", constraint))
            }
            Some(code) if *code == SqlState::FOREIGN_KEY_VIOLATION => {
                tracing::warn!(constraint = %constraint, "Foreign key constraint violated");
                ApiError::new(
                    ErrorCode::ReferenceNotFound,
                    format!("Foreign key constraint {} violated", constraint),
                )
            }
            Some(code) if *code == SqlState::CHECK_VIOLATION => {
                tracing::warn!(constraint = %constraint, "Check constraint violated");
                ApiError::invalid_input(format!("Check constraint {} violated", constraint))
            }
            _ => {
                // Log the full error for debugging
                tracing::error!("Database error: {:?}", err);

                // Return a generic database error to avoid leaking internal details
                ApiError::database_error("Database operation failed")
            }
        }
    }
}

/// Convert from deadpool_postgres::PoolError to ApiError.
impl From<deadpool_postgres::PoolError> for ApiError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        tracing::error!("Connection pool error: {:?}", err);

        match err {
            deadpool_postgres::PoolError::Timeout(_) => ApiError::connection_pool_exhausted(),
            deadpool_postgres::PoolError::Closed => {
                ApiError::service_unavailable("Database connection pool is closed")
            }
            _ => ApiError::database_error("Failed to acquire database connection"),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::ImmutableField { table, field } => {
                ApiError::immutable_field(table, field)
            }
            ValidationError::ColumnNotInTable { .. } => {
                tracing::error!("Guard misconfigured: {}", err);
                ApiError::internal_error(err.to_string())
            }
            ValidationError::UnknownField { .. }
            | ValidationError::UnknownColumn { .. }
            | ValidationError::InvalidValue { .. }
            | ValidationError::EmptyUpdate { .. } => ApiError::invalid_input(err.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::invalid_input(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::invalid_input(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::invalid_format("id", &rejection.body_text())
    }
}

// ============================================================================
// RESULT TYPE ALIAS
// ============================================================================

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
