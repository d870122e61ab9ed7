//! Error types for the user service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Persistence Error ==
/// Raised when the record store rejects a write.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// Another record already uses this email
    #[error("Email already taken: {0}")]
    DuplicateEmail(String),

    /// The store could not be reached or refused the operation
    #[error("Record store unavailable: {0}")]
    Unavailable(String),
}

// == App Error Enum ==
/// Unified error type for the user service.
#[derive(Error, Debug)]
pub enum AppError {
    /// No record (or cache key) for the given identifier
    #[error("Not found: {0}")]
    NotFound(String),

    /// Cache key has expired
    #[error("Key expired: {0}")]
    Expired(String),

    /// Malformed or missing input
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Record store rejected a write
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    /// Cache store failure
    #[error("Cache error: {0}")]
    Cache(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound(_) | AppError::Expired(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Persistence(PersistenceError::DuplicateEmail(_)) => StatusCode::CONFLICT,
            AppError::Persistence(PersistenceError::Unavailable(_)) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            AppError::Cache(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the user service.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::NotFound("user 1".into()), StatusCode::NOT_FOUND),
            (AppError::Validation("name".into()), StatusCode::UNPROCESSABLE_ENTITY),
            (
                PersistenceError::DuplicateEmail("a@b.c".into()).into(),
                StatusCode::CONFLICT,
            ),
            (
                PersistenceError::Unavailable("down".into()).into(),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (AppError::Cache("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_persistence_message_is_transparent() {
        let err: AppError = PersistenceError::DuplicateEmail("test@test.com".into()).into();
        assert_eq!(err.to_string(), "Email already taken: test@test.com");
    }
}
