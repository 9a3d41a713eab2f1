//! Error types for DocChat
//!
//! Provides:
//! - Distinct error types for different failure modes
//! - Error codes for machine-readable handling
//! - Classification of answer-generator failures
//!
//! The retrieval engine itself is total and never produces these errors;
//! they come from configuration, document loading and answer generation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

/// Error codes for machine-readable error identification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Validation errors (1xxx)
    ValidationError,
    InvalidFormat,

    // Resource errors (4xxx)
    DocumentNotFound,

    // External service errors (8xxx)
    UpstreamError,
    UpstreamTimeout,
    MalformedResponse,

    // Internal errors (9xxx)
    InternalError,
    ConfigurationError,
    SerializationError,
    IoError,
}

impl ErrorCode {
    /// Get the numeric code for this error
    pub fn as_code(&self) -> u16 {
        match self {
            ErrorCode::ValidationError => 1001,
            ErrorCode::InvalidFormat => 1003,

            ErrorCode::DocumentNotFound => 4001,

            ErrorCode::UpstreamError => 8001,
            ErrorCode::UpstreamTimeout => 8002,
            ErrorCode::MalformedResponse => 8003,

            ErrorCode::InternalError => 9001,
            ErrorCode::ConfigurationError => 9002,
            ErrorCode::SerializationError => 9003,
            ErrorCode::IoError => 9004,
        }
    }
}

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation failed: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    #[error("Invalid format: {message}")]
    InvalidFormat { message: String },

    // Resource errors
    #[error("Document not found: {path}")]
    DocumentNotFound { path: String },

    // Answer generator errors
    #[error("Answer generator {service} failed: {message}")]
    Upstream { service: String, message: String },

    #[error("Answer generator {service} timed out after {timeout_ms}ms")]
    UpstreamTimeout { service: String, timeout_ms: u64 },

    #[error("Answer generator {service} returned a malformed response: {message}")]
    MalformedResponse { service: String, message: String },

    // Internal errors
    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // Generic
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Get the error code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { .. } => ErrorCode::ValidationError,
            AppError::InvalidFormat { .. } => ErrorCode::InvalidFormat,
            AppError::DocumentNotFound { .. } => ErrorCode::DocumentNotFound,
            AppError::Upstream { .. } => ErrorCode::UpstreamError,
            AppError::UpstreamTimeout { .. } => ErrorCode::UpstreamTimeout,
            AppError::MalformedResponse { .. } => ErrorCode::MalformedResponse,
            AppError::Internal { .. } => ErrorCode::InternalError,
            AppError::Configuration { .. } | AppError::Config(_) => ErrorCode::ConfigurationError,
            AppError::Io(_) => ErrorCode::IoError,
            AppError::Serialization(_) => ErrorCode::SerializationError,
            AppError::Other(_) => ErrorCode::InternalError,
        }
    }

    /// Check if this error came from an answer generator and should be
    /// absorbed by the local fallback
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            AppError::Upstream { .. }
                | AppError::UpstreamTimeout { .. }
                | AppError::MalformedResponse { .. }
        )
    }

    /// Check if this error was caused by caller input
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AppError::Validation { .. }
                | AppError::InvalidFormat { .. }
                | AppError::DocumentNotFound { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_mapping() {
        let err = AppError::DocumentNotFound { path: "missing.txt".into() };
        assert_eq!(err.code(), ErrorCode::DocumentNotFound);
        assert_eq!(err.code().as_code(), 4001);
        assert!(err.is_client_error());
        assert!(!err.is_upstream());
    }

    #[test]
    fn test_upstream_classification() {
        let err = AppError::UpstreamTimeout { service: "remote".into(), timeout_ms: 500 };
        assert!(err.is_upstream());
        assert_eq!(err.code(), ErrorCode::UpstreamTimeout);
        assert_eq!(err.to_string(), "Answer generator remote timed out after 500ms");

        let err = AppError::Internal { message: "boom".into() };
        assert!(!err.is_upstream());
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_io_conversion() {
        let err: AppError = std::io::Error::new(std::io::ErrorKind::Other, "disk").into();
        assert_eq!(err.code(), ErrorCode::IoError);
    }
}
