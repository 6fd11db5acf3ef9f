//! Configuration file support for edc-explorer
//!
//! This module provides TOML configuration file parsing and merging with CLI arguments.
//!
//! ## Priority Order
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. Command-line arguments
//! 2. Environment variables
//! 3. Configuration file
//! 4. Default values
//!
//! ## Example Configuration
//!
//! ```toml
//! # edc-explorer.toml
//!
//! [server]
//! http_addr = "0.0.0.0:3000"
//! log_level = "info"
//!
//! [database]
//! path = "/var/lib/edc/data.duckdb"
//! table = "edc_resultats"
//! row_target = 1000
//!
//! [display]
//! cell_format = "plain"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::defaults::CONFIG_FILE_NAME;
use crate::error::{ExplorerError, Result};

/// Root configuration structure for TOML file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    /// Server configuration
    pub server: ServerSection,

    /// Database configuration
    pub database: DatabaseSection,

    /// Page rendering configuration
    pub display: DisplaySection,
}

/// Server section configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    /// HTTP listen address
    pub http_addr: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    pub log_level: Option<String>,
}

/// Database section configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    /// Path to the DuckDB file
    pub path: Option<PathBuf>,

    /// Table to display
    pub table: Option<String>,

    /// Rows read per request
    pub row_target: Option<usize>,
}

/// Display section configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySection {
    /// Cell rendering mode ("plain" or "typed")
    pub cell_format: Option<String>,
}

impl ConfigFile {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ExplorerError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        toml::from_str(&contents).map_err(|e| {
            ExplorerError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })
    }

    /// Try to load configuration from default locations
    ///
    /// Searches in order:
    /// 1. ./edc-explorer.toml
    /// 2. /etc/edc-explorer/edc-explorer.toml
    /// 3. ~/.config/edc-explorer/edc-explorer.toml
    pub fn load_default() -> Option<Self> {
        let default_paths = [
            PathBuf::from(CONFIG_FILE_NAME),
            PathBuf::from("/etc/edc-explorer").join(CONFIG_FILE_NAME),
            dirs::config_dir()
                .map(|p| p.join("edc-explorer").join(CONFIG_FILE_NAME))
                .unwrap_or_default(),
        ];

        for path in default_paths.iter().filter(|p| !p.as_os_str().is_empty()) {
            if path.exists() {
                match Self::load(path) {
                    Ok(config) => {
                        tracing::info!("Loaded configuration from {:?}", path);
                        return Some(config);
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        None
    }

    /// Generate an example configuration file
    pub fn generate_example() -> String {
        r#"# edc-explorer Configuration File
# Copy to edc-explorer.toml and customize as needed
#
# Configuration priority (highest to lowest):
# 1. Command-line arguments
# 2. Environment variables
# 3. This configuration file
# 4. Default values

[server]
# HTTP listen address
http_addr = "0.0.0.0:3000"

# Log level (trace, debug, info, warn, error)
log_level = "info"

[database]
# DuckDB file, opened read-only.
# Defaults to ../database/data.duckdb relative to the working directory.
# path = "/var/lib/edc/data.duckdb"

# Table rendered by /duckdb-example and /api/db-example
table = "edc_resultats"

# Maximum rows read per request
row_target = 1000

[display]
# "plain" prints every value as text.
# "typed" truncates VARCHAR, scales BIGINT and prints DOUBLE in exponential notation.
cell_format = "plain"
"#
        .to_string()
    }
}
