//! Unified error types for all layers of the application.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

/// Unified error type for the timetable service.
///
/// Covers the domain conditions raised by the services (missing groups or
/// schedules, invalid input, duplicate group numbers), failures of the
/// external schedule feed, and infrastructure errors.
#[derive(Error, Debug)]
pub enum TimetableError {
    // ============ Domain Errors ============
    /// Resource not found
    #[error("{resource_type} not found with {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Conflict error (e.g., duplicate group number)
    #[error("Conflict: {0}")]
    Conflict(String),

    // ============ External Feed Errors ============
    /// The external schedule API could not be fetched or parsed
    #[error("Failed to fetch schedule from {service}: {message}")]
    ExternalFetch { service: String, message: String },

    // ============ Infrastructure Errors ============
    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    // ============ Internal Errors ============
    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TimetableError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::Validation(_) => 400,
            Self::Conflict(_) => 409,
            Self::ExternalFetch { .. } => 502,
            Self::Database(_) | Self::Configuration(_) | Self::Internal(_) | Self::Other(_) => 500,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::ExternalFetch { .. } => "EXTERNAL_FETCH_FAILURE",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Internal(_) | Self::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// Creates a not found error for a resource looked up by id.
    #[must_use]
    pub fn not_found<T: ToString>(resource_type: &'static str, id: T) -> Self {
        Self::NotFound {
            resource_type,
            id: format!("id: {}", id.to_string()),
        }
    }

    /// Creates a not found error for a group looked up by its number.
    #[must_use]
    pub fn group_number_not_found(group_number: &str) -> Self {
        Self::NotFound {
            resource_type: "Group",
            id: format!("number: {group_number}"),
        }
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a conflict error.
    #[must_use]
    pub fn conflict<T: Into<String>>(message: T) -> Self {
        Self::Conflict(message.into())
    }

    /// Creates an external fetch failure.
    #[must_use]
    pub fn external_fetch<S: Into<String>, M: ToString>(service: S, message: M) -> Self {
        Self::ExternalFetch {
            service: service.into(),
            message: message.to_string(),
        }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }

    /// Checks if this is a not-found condition.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for TimetableError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => Self::NotFound {
                resource_type: "database_row",
                id: "unknown".to_string(),
            },
            sqlx::Error::Database(db_err) => {
                // MySQL duplicate key / PostgreSQL unique violation
                if let Some(code) = db_err.code() {
                    if code == "23000" || code == "1062" || code == "23505" {
                        return Self::Conflict(db_err.message().to_string());
                    }
                }
                Self::Database(err.to_string())
            }
            _ => Self::Database(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for TimetableError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON serialization error: {}", err))
    }
}

/// Serializable error response for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional field-level errors for validation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

/// Field-level validation error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FieldError {
    /// Field name
    pub field: String,
    /// Error message
    pub message: String,
    /// Error code
    pub code: String,
}

impl ErrorResponse {
    /// Creates a new error response from a `TimetableError`.
    #[must_use]
    pub fn from_error(error: &TimetableError) -> Self {
        Self {
            code: error.error_code().to_string(),
            message: error.to_string(),
            details: None,
        }
    }

    /// Sets field-level validation errors.
    #[must_use]
    pub fn with_details(mut self, details: Vec<FieldError>) -> Self {
        self.details = Some(details);
        self
    }
}

impl From<&TimetableError> for ErrorResponse {
    fn from(error: &TimetableError) -> Self {
        Self::from_error(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(TimetableError::not_found("Group", 1).status_code(), 404);
        assert_eq!(TimetableError::validation("blank subject").status_code(), 400);
        assert_eq!(TimetableError::conflict("duplicate").status_code(), 409);
        assert_eq!(
            TimetableError::external_fetch("iis.bsuir.by", "connection refused").status_code(),
            502
        );
        assert_eq!(TimetableError::Database("db error".to_string()).status_code(), 500);
        assert_eq!(TimetableError::internal("oops").status_code(), 500);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(TimetableError::not_found("Schedule", 7).error_code(), "NOT_FOUND");
        assert_eq!(TimetableError::validation("bad").error_code(), "VALIDATION_ERROR");
        assert_eq!(TimetableError::conflict("dup").error_code(), "CONFLICT");
        assert_eq!(
            TimetableError::external_fetch("api", "timeout").error_code(),
            "EXTERNAL_FETCH_FAILURE"
        );
        assert_eq!(TimetableError::internal("err").error_code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_not_found_messages_carry_identifier() {
        let by_id = TimetableError::not_found("Group", 42);
        assert_eq!(by_id.to_string(), "Group not found with id: 42");

        let by_number = TimetableError::group_number_not_found("350501");
        assert_eq!(by_number.to_string(), "Group not found with number: 350501");
        assert!(by_number.is_not_found());
    }

    #[test]
    fn test_external_fetch_message() {
        let err = TimetableError::external_fetch("iis.bsuir.by", "HTTP status 500");
        assert!(err.to_string().contains("iis.bsuir.by"));
        assert!(err.to_string().contains("HTTP status 500"));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_error_response_from_error() {
        let err = TimetableError::not_found("Group", 1);
        let response = ErrorResponse::from_error(&err);
        assert_eq!(response.code, "NOT_FOUND");
        assert!(!response.message.is_empty());
        assert!(response.details.is_none());
    }

    #[test]
    fn test_error_response_with_details() {
        let err = TimetableError::validation("bad input");
        let details = vec![FieldError {
            field: "groupNumber".to_string(),
            message: "Group number cannot be blank".to_string(),
            code: "not_blank".to_string(),
        }];
        let response = ErrorResponse::from(&err).with_details(details);
        assert_eq!(response.details.map(|d| d.len()), Some(1));
    }
}
