//! Error types for the EDC data layer.
//!
//! Two failure families matter to callers: the database file is missing
//! or unopenable (a configuration problem that no request can recover
//! from) and a fetch failed (recovered at the request boundary).
//!
//! `Display` output is sent to HTTP clients, so it never carries a
//! filesystem path or engine text. Paths stay in the variant fields and
//! engine errors in [`std::error::Error::source`], both logged server-side.

use std::path::PathBuf;

/// Errors from the data layer.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// The database file does not exist at the configured location.
    #[error("Database file not found")]
    Configuration {
        /// Path that was checked.
        path: PathBuf,
    },

    /// The file exists but DuckDB refused to open it (corrupt file,
    /// incompatible storage version, permission denied, ...).
    #[error("Failed to open database.")]
    Open {
        /// Path of the database file.
        path: PathBuf,
        /// Engine error.
        #[source]
        source: duckdb::Error,
    },

    /// Any failure while connecting, executing, or reading a query.
    #[error("Failed to fetch example rows.")]
    Fetch {
        /// What actually went wrong.
        #[source]
        source: FetchFailure,
    },

    /// A table identifier did not pass validation.
    #[error("Invalid table identifier: {0}")]
    InvalidIdentifier(String),
}

/// Underlying cause of a [`DataError::Fetch`].
#[derive(Debug, thiserror::Error)]
pub enum FetchFailure {
    /// DuckDB reported an error.
    #[error("DuckDB error: {0}")]
    Engine(#[from] duckdb::Error),

    /// The blocking worker running the query panicked or was cancelled.
    #[error("Fetch worker failed: {0}")]
    Worker(String),

    /// A row came back with a different width than the column metadata.
    #[error("Row {row} has {actual} values, expected {expected}")]
    RaggedRow {
        /// Row index.
        row: usize,
        /// Column count reported by the statement.
        expected: usize,
        /// Values actually read.
        actual: usize,
    },
}

impl DataError {
    /// Build a `Configuration` error for a missing database file.
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::Configuration { path: path.into() }
    }

    /// Wrap any fetch-time failure.
    pub fn fetch(source: impl Into<FetchFailure>) -> Self {
        Self::Fetch {
            source: source.into(),
        }
    }

    /// Returns `true` for errors no request can recover from without an
    /// operator fixing the deployment.
    pub fn is_configuration(&self) -> bool {
        matches!(self, DataError::Configuration { .. } | DataError::Open { .. })
    }
}

impl From<duckdb::Error> for DataError {
    fn from(e: duckdb::Error) -> Self {
        DataError::fetch(e)
    }
}

/// A specialised `Result` type for data-layer operations.
pub type Result<T> = std::result::Result<T, DataError>;
