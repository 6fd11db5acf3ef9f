#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

//! # edc-explorer
//!
//! A small read-only web viewer for the EDC results database. It opens one
//! DuckDB file in read-only mode on first use and serves the same rows two
//! ways: as a server-rendered HTML table and as JSON.
//!
//! ## Quick Start
//!
//! ```bash
//! # Serve ../database/data.duckdb on 0.0.0.0:3000
//! $ ./edc-explorer
//!
//! # Point at another file and cap responses at 50 rows
//! $ ./edc-explorer --database-path /srv/edc/data.duckdb --row-target 50
//! ```
//!
//! ## Routes
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/duckdb-example` | Results rendered as an HTML table |
//! | `GET` | `/api/db-example` | Results as JSON |
//! | `GET` | `/health` | Liveness check |
//! | `GET` | `/` | Redirects to `/duckdb-example` |
//!
//! ## Modules
//!
//! - [`config`] - CLI arguments, TOML file and resolved configuration
//! - [`server`] - Routers, shared state and shutdown handling
//! - [`error`] - Application error type
//!
//! Database access lives in the `edc-data` workspace crate.

pub mod config;
pub mod error;
pub mod server;

pub use config::{ServerArgs, ServerConfig};
pub use error::{ExplorerError, Result};
pub use server::{build_http_router, start_http_server, ExplorerState};
