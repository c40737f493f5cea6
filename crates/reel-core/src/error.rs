//! Error types for reelfinder.

use thiserror::Error;

/// Result type alias using reelfinder's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for reelfinder operations.
///
/// Failure policy by variant:
/// - `InvalidInput` is the only variant surfaced to callers with detail (400).
/// - `Provider` and `Parse` are recovered inside the pipeline stage that hit
///   them (empty result / default structure) and logged at `warn`.
/// - Everything else escaping the pipeline becomes a generic 500.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid input from the caller
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Outbound provider call failed (non-success status or transport)
    #[error("Provider error: {0}")]
    Provider(String),

    /// Model output could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// HTTP/network request failed
    #[error("Request error: {0}")]
    Request(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request(e.to_string())
    }
}
