//! Command-line arguments for the edc-explorer server
//!
//! This module defines the CLI arguments structure using clap.

use clap::Parser;
use std::path::PathBuf;

use super::defaults::*;

/// Command-line arguments for the edc-explorer server
#[derive(Parser, Debug, Clone)]
#[command(name = "edc-explorer")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Read-only web viewer for the EDC results DuckDB database")]
pub struct ServerArgs {
    /// Path to configuration file (TOML format)
    /// If not specified, looks for edc-explorer.toml in current directory,
    /// /etc/edc-explorer/, or ~/.config/edc-explorer/
    #[arg(short, long, env = "EDC_EXPLORER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Generate example configuration file and exit
    #[arg(long)]
    pub generate_config: bool,

    /// Address to listen on for HTTP
    #[arg(long, env = "EDC_EXPLORER_HTTP_ADDR", default_value = DEFAULT_HTTP_ADDR)]
    pub http_addr: String,

    /// Path to the DuckDB database file.
    /// Defaults to ../database/data.duckdb relative to the working directory.
    #[arg(long, env = "EDC_EXPLORER_DATABASE_PATH")]
    pub database_path: Option<PathBuf>,

    /// Table rendered by the page and API routes
    #[arg(long, env = "EDC_EXPLORER_TABLE", default_value = DEFAULT_TABLE)]
    pub table: String,

    /// Maximum number of rows read per request (must be positive)
    #[arg(long, env = "EDC_EXPLORER_ROW_TARGET", default_value_t = DEFAULT_ROW_TARGET)]
    pub row_target: usize,

    /// Cell rendering on the HTML page:
    ///   "plain" - generic text conversion of every value (default)
    ///   "typed" - per-type formatting (VARCHAR truncated, BIGINT scaled,
    ///             DOUBLE in exponential notation)
    #[arg(long, env = "EDC_EXPLORER_CELL_FORMAT", default_value = DEFAULT_CELL_FORMAT)]
    pub cell_format: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "EDC_EXPLORER_LOG_LEVEL", default_value = DEFAULT_LOG_LEVEL)]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = ServerArgs::parse_from(["edc-explorer"]);
        assert_eq!(args.http_addr, DEFAULT_HTTP_ADDR);
        assert_eq!(args.table, "edc_resultats");
        assert_eq!(args.row_target, 1000);
        assert_eq!(args.cell_format, "plain");
        assert!(args.database_path.is_none());
        assert!(!args.generate_config);
    }

    #[test]
    fn test_overrides() {
        let args = ServerArgs::parse_from([
            "edc-explorer",
            "--http-addr",
            "127.0.0.1:8080",
            "--database-path",
            "/data/edc.duckdb",
            "--row-target",
            "25",
            "--cell-format",
            "typed",
        ]);
        assert_eq!(args.http_addr, "127.0.0.1:8080");
        assert_eq!(args.database_path, Some(PathBuf::from("/data/edc.duckdb")));
        assert_eq!(args.row_target, 25);
        assert_eq!(args.cell_format, "typed");
    }
}
