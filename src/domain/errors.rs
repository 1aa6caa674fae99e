//! Domain error types
//!
//! This module defines the error hierarchy for PrivChat. All errors are
//! domain-specific and don't expose third-party types: adapters map
//! transport failures into [`NerError`] / [`CompletionError`] before they
//! cross a module boundary.

use thiserror::Error;

/// Main PrivChat error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum PrivChatError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Client input validation errors (rejected before any processing)
    #[error("Validation error: {0}")]
    Validation(String),

    /// NER service errors
    #[error("NER error: {0}")]
    Ner(#[from] NerError),

    /// Completion backend errors
    #[error("Completion error: {0}")]
    Completion(#[from] CompletionError),

    /// Detection pipeline errors
    #[error("Detection error: {0}")]
    Detection(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// NER service-specific errors
///
/// Errors that occur when calling the entity-recognition sidecar.
/// A recognizer failure fails the whole request: proceeding without NER
/// spans would let unredacted names through to the completion service.
#[derive(Debug, Error)]
pub enum NerError {
    /// Failed to connect to the NER service
    #[error("Failed to connect to NER service: {0}")]
    ConnectionFailed(String),

    /// Request timed out
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// Response body could not be decoded
    #[error("Invalid response from NER service: {0}")]
    InvalidResponse(String),

    /// Non-success status from the service
    #[error("NER service error: {status} - {message}")]
    ServerError { status: u16, message: String },
}

/// Completion backend-specific errors
///
/// Transport failures only. A successful-but-empty reply is not an error;
/// it is reported as [`CompletionOutcome::Empty`] by the backend.
///
/// [`CompletionOutcome::Empty`]: crate::adapters::completion::CompletionOutcome
#[derive(Debug, Error)]
pub enum CompletionError {
    /// Failed to connect to the completion service
    #[error("Failed to connect to completion service: {0}")]
    ConnectionFailed(String),

    /// Request timed out
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// Response body could not be decoded
    #[error("Invalid response from completion service: {0}")]
    InvalidResponse(String),

    /// Non-success status from the service
    #[error("Completion service error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// No configured model could be provisioned
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for PrivChatError {
    fn from(err: std::io::Error) -> Self {
        PrivChatError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for PrivChatError {
    fn from(err: serde_json::Error) -> Self {
        PrivChatError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for PrivChatError {
    fn from(err: toml::de::Error) -> Self {
        PrivChatError::Configuration(format!("TOML parse error: {err}"))
    }
}
