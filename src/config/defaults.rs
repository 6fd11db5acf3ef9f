//! Default constants for edc-explorer configuration
//!
//! These constants define the default values used throughout the configuration
//! system when no explicit value is provided.

/// Default listen address for the HTTP server
pub const DEFAULT_HTTP_ADDR: &str = "0.0.0.0:3000";

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Default table shown by the page and API routes
pub const DEFAULT_TABLE: &str = edc_data::DEFAULT_TABLE;

/// Default number of rows read per request
pub const DEFAULT_ROW_TARGET: usize = 1000;

/// Default cell rendering mode ("plain" or "typed")
pub const DEFAULT_CELL_FORMAT: &str = "plain";

/// Config file name searched in the default locations
pub const CONFIG_FILE_NAME: &str = "edc-explorer.toml";
