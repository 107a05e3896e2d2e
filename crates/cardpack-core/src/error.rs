//! Unified error types for all layers of the draw engine.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

/// Unified error type for the Cardpack workspace.
///
/// The draw flow surfaces the domain variants verbatim; infrastructure
/// variants are the only ones the orchestration will ever retry.
#[derive(Error, Debug)]
pub enum CardpackError {
    // ============ Domain Errors ============
    /// Invalid pack data, rejected before it reaches storage.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Resource not found
    #[error("Resource not found: {resource_type} with id {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// The pack exists but is disabled.
    #[error("Pack {pack_id} is not active")]
    Inactive { pack_id: String },

    /// The pack has no rates to draw from.
    #[error("Pack {pack_id} has no cards to draw")]
    EmptyPool { pack_id: String },

    /// A drawn card id has no record in the card catalog.
    #[error("Card {card_id} drawn from pack {pack_id} is missing from the catalog")]
    MissingCard { pack_id: String, card_id: u32 },

    /// Validation error for malformed input values.
    #[error("Validation error: {0}")]
    Validation(String),

    // ============ Infrastructure Errors ============
    /// Event publication failed. Never escapes the draw flow.
    #[error("Publish error: {0}")]
    Publish(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Timeout error
    #[error("Operation timed out: {0}")]
    Timeout(String),

    // ============ Internal Errors ============
    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CardpackError {
    /// Returns the HTTP-equivalent status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::Validation(_) | Self::Configuration(_) => 400,
            Self::Inactive { .. } | Self::EmptyPool { .. } => 409,
            Self::Timeout(_) => 503,
            Self::Publish(_) => 502,
            Self::MissingCard { .. }
            | Self::Database(_)
            | Self::Internal(_)
            | Self::Other(_) => 500,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Inactive { .. } => "PACK_INACTIVE",
            Self::EmptyPool { .. } => "EMPTY_POOL",
            Self::MissingCard { .. } => "MISSING_CARD",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Publish(_) => "PUBLISH_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Timeout(_) => "TIMEOUT",
            Self::Internal(_) | Self::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// Creates a not found error for a resource.
    #[must_use]
    pub fn not_found<T: ToString>(resource_type: &'static str, id: T) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn configuration<T: Into<String>>(message: T) -> Self {
        Self::Configuration(message.into())
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a publish error.
    #[must_use]
    pub fn publish<T: Into<String>>(message: T) -> Self {
        Self::Publish(message.into())
    }

    /// Creates a database error.
    #[must_use]
    pub fn database<T: Into<String>>(message: T) -> Self {
        Self::Database(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }

    /// Checks if this error is transient and the failed call may be repeated.
    #[must_use]
    pub const fn is_retriable(&self) -> bool {
        matches!(self, Self::Database(_) | Self::Timeout(_))
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for CardpackError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => Self::NotFound {
                resource_type: "database_row",
                id: "unknown".to_string(),
            },
            _ => Self::Database(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for CardpackError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON serialization error: {}", err))
    }
}

/// Serializable error body for outer surfaces (CLI output, future transports).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ErrorResponse {
    /// Creates a new error response from a `CardpackError`.
    #[must_use]
    pub fn from_error(error: &CardpackError) -> Self {
        Self {
            code: error.error_code().to_string(),
            message: error.to_string(),
        }
    }
}

impl From<&CardpackError> for ErrorResponse {
    fn from(error: &CardpackError) -> Self {
        Self::from_error(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(CardpackError::not_found("Pack", "starter").status_code(), 404);
        assert_eq!(CardpackError::validation("bad id").status_code(), 400);
        assert_eq!(CardpackError::configuration("cost").status_code(), 400);
        assert_eq!(
            CardpackError::Inactive { pack_id: "p".into() }.status_code(),
            409
        );
        assert_eq!(CardpackError::database("down").status_code(), 500);
        assert_eq!(CardpackError::Timeout("slow".into()).status_code(), 503);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CardpackError::not_found("Pack", 1).error_code(), "NOT_FOUND");
        assert_eq!(
            CardpackError::EmptyPool { pack_id: "p".into() }.error_code(),
            "EMPTY_POOL"
        );
        assert_eq!(
            CardpackError::MissingCard {
                pack_id: "p".into(),
                card_id: 9
            }
            .error_code(),
            "MISSING_CARD"
        );
        assert_eq!(CardpackError::publish("x").error_code(), "PUBLISH_ERROR");
    }

    #[test]
    fn test_retriable_errors() {
        assert!(CardpackError::database("connection lost").is_retriable());
        assert!(CardpackError::Timeout("request timed out".into()).is_retriable());
    }

    #[test]
    fn test_domain_errors_are_not_retriable() {
        assert!(!CardpackError::not_found("Pack", "p").is_retriable());
        assert!(!CardpackError::Inactive { pack_id: "p".into() }.is_retriable());
        assert!(!CardpackError::EmptyPool { pack_id: "p".into() }.is_retriable());
        assert!(!CardpackError::MissingCard {
            pack_id: "p".into(),
            card_id: 1
        }
        .is_retriable());
        assert!(!CardpackError::configuration("bad").is_retriable());
        assert!(!CardpackError::publish("down").is_retriable());
    }

    #[test]
    fn test_error_display() {
        let err = CardpackError::MissingCard {
            pack_id: "starter".into(),
            card_id: 42,
        };
        let message = err.to_string();
        assert!(message.contains("42"));
        assert!(message.contains("starter"));
    }

    #[test]
    fn test_error_response_from_error() {
        let err = CardpackError::not_found("Pack", "starter");
        let response = ErrorResponse::from(&err);
        assert_eq!(response.code, "NOT_FOUND");
        assert!(response.message.contains("starter"));
    }
}
