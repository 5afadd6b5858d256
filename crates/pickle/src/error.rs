//! Error types for Pickle

use thiserror::Error;

/// Main error type for Pickle operations
#[derive(Error, Debug)]
pub enum PickleError {
    /// Storage-related errors (memory file, data directory, etc.)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP server errors
    #[error("Server error: {0}")]
    Server(String),

    /// Memory validation errors
    #[error("Memory error: {0}")]
    Memory(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for PickleError {
    fn from(e: serde_json::Error) -> Self {
        PickleError::Serialization(e.to_string())
    }
}

/// Result type alias for Pickle operations
pub type Result<T> = std::result::Result<T, PickleError>;
