//! Configuration module for edc-explorer
//!
//! This module is organized into submodules:
//! - `defaults` - Default constants and values
//! - `args` - CLI argument definitions
//! - `file` - TOML configuration file
//! - `merge` - Config file / CLI precedence

mod args;
mod defaults;
pub mod file;
mod merge;

// Re-export submodule types
pub use args::ServerArgs;
pub use defaults::*;
pub use file::ConfigFile;
pub use merge::merge_config_with_args;

use crate::error::{ExplorerError, Result};
use crate::server::cell_format::CellFormat;
use std::net::SocketAddr;
use std::num::NonZeroUsize;
use std::path::PathBuf;

/// Complete server configuration for edc-explorer.
///
/// Built from [`ServerArgs`] (after merging any config file) by
/// [`ServerConfig::from_args`]. All values are parsed and validated here so
/// request handlers never see malformed settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP listen address
    pub http_addr: SocketAddr,

    /// Log level filter used when `RUST_LOG` is unset
    pub log_level: String,

    /// Database settings
    pub database: DatabaseConfig,

    /// HTML page settings
    pub display: DisplayConfig,
}

/// Which database to open and what to read from it.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// DuckDB file, opened read-only on first request
    pub path: PathBuf,

    /// Table shown by the routes
    pub table: String,

    /// `SELECT * from <table>`, built from a validated identifier
    pub query: String,

    /// Maximum rows materialized per request
    pub row_target: NonZeroUsize,
}

/// HTML page settings.
#[derive(Debug, Clone, Default)]
pub struct DisplayConfig {
    /// Cell rendering mode
    pub cell_format: CellFormat,
}

impl ServerConfig {
    /// Create a new server configuration from command-line arguments
    pub fn from_args(args: ServerArgs) -> Result<Self> {
        let http_addr: SocketAddr = args
            .http_addr
            .parse()
            .map_err(|e| ExplorerError::Config(format!("Invalid HTTP address: {}", e)))?;

        let path = match args.database_path {
            Some(path) => path,
            None => {
                let cwd = std::env::current_dir().map_err(|e| {
                    ExplorerError::Config(format!("Cannot determine working directory: {}", e))
                })?;
                edc_data::default_database_path(&cwd)
            }
        };

        let query = edc_data::select_all_query(&args.table)
            .map_err(|e| ExplorerError::Config(e.to_string()))?;

        let row_target = NonZeroUsize::new(args.row_target).ok_or_else(|| {
            ExplorerError::Config("Row target must be a positive integer".to_string())
        })?;

        let cell_format: CellFormat = args
            .cell_format
            .parse()
            .map_err(|e| ExplorerError::Config(format!("Invalid cell format: {}", e)))?;

        Ok(Self {
            http_addr,
            log_level: args.log_level,
            database: DatabaseConfig {
                path,
                table: args.table,
                query,
                row_target,
            },
            display: DisplayConfig { cell_format },
        })
    }

    /// Validate the configuration before starting the server.
    ///
    /// A missing database file is only warned about: the data routes fail
    /// on their own until the file exists, while `/health` keeps working.
    pub fn validate(&self) -> Result<()> {
        use tracing::warn;

        if self.http_addr.port() == 0 {
            return Err(ExplorerError::Config(
                "HTTP listen port must be between 1 and 65535".to_string(),
            ));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            return Err(ExplorerError::Config(format!(
                "Invalid log level '{}'. Valid options: {}",
                self.log_level,
                valid_levels.join(", ")
            )));
        }

        if !self.database.path.is_file() {
            warn!(
                path = %self.database.path.display(),
                "Database file not found. Data routes will fail until it exists."
            );
        }

        Ok(())
    }
}
