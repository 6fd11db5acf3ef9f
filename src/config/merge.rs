//! Configuration merging utilities
//!
//! This module provides functions to merge configuration from files
//! with command-line arguments, where CLI arguments take precedence.

use super::args::ServerArgs;
use super::defaults::*;
use super::file::ConfigFile;

/// Merge configuration file values with CLI arguments.
/// CLI arguments take precedence over config file values.
/// Only applies config file values where CLI uses defaults.
pub fn merge_config_with_args(mut args: ServerArgs, config: &ConfigFile) -> ServerArgs {
    // Helper macro to apply config value if CLI is at default
    macro_rules! apply_if_default {
        ($field:ident, $config_val:expr, $default:expr) => {
            if let Some(val) = $config_val {
                if args.$field == $default {
                    args.$field = val;
                }
            }
        };
    }

    macro_rules! apply_if_default_string {
        ($field:ident, $config_val:expr, $default:expr) => {
            if let Some(ref val) = $config_val {
                if args.$field == $default {
                    args.$field = val.clone();
                }
            }
        };
    }

    macro_rules! apply_option {
        ($field:ident, $config_val:expr) => {
            if args.$field.is_none() {
                if let Some(ref val) = $config_val {
                    args.$field = Some(val.clone());
                }
            }
        };
    }

    // Server section
    apply_if_default_string!(http_addr, config.server.http_addr, DEFAULT_HTTP_ADDR);
    apply_if_default_string!(log_level, config.server.log_level, DEFAULT_LOG_LEVEL);

    // Database section
    apply_option!(database_path, config.database.path);
    apply_if_default_string!(table, config.database.table, DEFAULT_TABLE);
    apply_if_default!(row_target, config.database.row_target, DEFAULT_ROW_TARGET);

    // Display section
    apply_if_default_string!(cell_format, config.display.cell_format, DEFAULT_CELL_FORMAT);

    args
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::path::PathBuf;

    fn file_config() -> ConfigFile {
        toml::from_str(
            r#"
[server]
http_addr = "127.0.0.1:4000"

[database]
path = "/from/file.duckdb"
row_target = 50

[display]
cell_format = "typed"
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_file_fills_defaults() {
        let args = ServerArgs::parse_from(["edc-explorer"]);
        let merged = merge_config_with_args(args, &file_config());

        assert_eq!(merged.http_addr, "127.0.0.1:4000");
        assert_eq!(merged.database_path, Some(PathBuf::from("/from/file.duckdb")));
        assert_eq!(merged.row_target, 50);
        assert_eq!(merged.cell_format, "typed");
        // Untouched by the file
        assert_eq!(merged.table, DEFAULT_TABLE);
        assert_eq!(merged.log_level, DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn test_cli_wins_over_file() {
        let args = ServerArgs::parse_from([
            "edc-explorer",
            "--http-addr",
            "127.0.0.1:5000",
            "--database-path",
            "/from/cli.duckdb",
            "--row-target",
            "7",
        ]);
        let merged = merge_config_with_args(args, &file_config());

        assert_eq!(merged.http_addr, "127.0.0.1:5000");
        assert_eq!(merged.database_path, Some(PathBuf::from("/from/cli.duckdb")));
        assert_eq!(merged.row_target, 7);
    }
}
