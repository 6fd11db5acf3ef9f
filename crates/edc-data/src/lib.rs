//! Read-only DuckDB access layer for edc-explorer.
//!
//! Workspace member holding the bundled `duckdb` dependency apart from the
//! web layer.
//!
//! # Overview
//!
//! 1. [`HandleProvider`] lazily opens one read-only [`DatabaseHandle`] per
//!    process and shares it between requests.
//! 2. [`Fetcher`] opens a connection per call, executes a query and
//!    materializes up to a target number of rows into a [`QueryResult`].
//! 3. [`ColumnKind`] and [`CellValue`] describe column types and cell values
//!    independently of DuckDB's borrowed, chunk-scoped representations.
//!
//! # Modules
//!
//! - [`handle`] -- Database file location and the shared read-only handle.
//! - [`fetch`] -- Bounded query execution and result types.
//! - [`column`] -- Column type descriptors.
//! - [`value`] -- Owned cell values and their JSON/text conversions.
//! - [`error`] -- Domain-specific error types.

pub mod column;
pub mod error;
pub mod fetch;
pub mod handle;
pub mod value;

pub use column::ColumnKind;
pub use error::{DataError, FetchFailure, Result};
pub use fetch::{
    select_all_query, Fetcher, QueryParam, QueryResult, Row, DEFAULT_QUERY, DEFAULT_ROW_TARGET,
    DEFAULT_TABLE, ENGINE_CHUNK_SIZE,
};
pub use handle::{
    default_database_path, DatabaseHandle, HandleProvider, DATABASE_DIR, DATABASE_FILE,
};
pub use value::CellValue;
