//! Error types shared across pulsegrid crates.

use thiserror::Error;

/// Result type for pulsegrid operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in pulsegrid operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed, missing or out-of-range sensor selector
    #[error("Invalid sensor: {0}")]
    InvalidSensor(String),

    /// Transport-level failure, surfaced to the dashboard as an error state
    #[error("Transport error: {0}")]
    Transport(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
