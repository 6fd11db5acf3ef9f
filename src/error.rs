//! Error types for edc-explorer
//!
//! Startup and server-level errors. Data-layer failures keep their own type
//! ([`edc_data::DataError`]) and are turned into HTTP responses by the
//! routes that hit them.

use thiserror::Error;

/// Result type alias for edc-explorer operations
pub type Result<T> = std::result::Result<T, ExplorerError>;

/// Top-level error type
#[derive(Error, Debug)]
pub enum ExplorerError {
    /// Invalid configuration (bad address, unknown cell format, unreadable config file, ...)
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP server failed to start or crashed
    #[error("Server error: {0}")]
    Server(String),
}
