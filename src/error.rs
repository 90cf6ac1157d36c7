//! Error types for the Floodgate crate.

use thiserror::Error;

/// Main error type for Floodgate operations.
#[derive(Error, Debug)]
pub enum FloodgateError {
    /// Limiter constructed with a zero burst capacity
    #[error("Capacity must be at least 1, got {0}")]
    InvalidCapacity(u32),

    /// Limiter constructed with a zero refill interval
    #[error("Refill interval must be greater than zero")]
    InvalidInterval,

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Floodgate operations.
pub type Result<T> = std::result::Result<T, FloodgateError>;
