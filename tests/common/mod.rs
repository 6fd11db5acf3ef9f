//! Shared fixtures for edc-explorer integration tests
//!
//! # Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::*;
//! ```

#![allow(dead_code)]

use clap::Parser;
use duckdb::Connection;
use edc_explorer::server::cell_format::CellFormat;
use edc_explorer::{ExplorerState, ServerArgs, ServerConfig};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Create `data.duckdb` in a fresh temp dir and run `setup_sql` against it.
///
/// The writer connection is closed before returning so the file can be
/// reopened read-only.
pub fn create_database(setup_sql: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join("data.duckdb");
    {
        let conn = Connection::open(&path).expect("failed to create database");
        conn.execute_batch(setup_sql).expect("failed to run setup SQL");
    }
    (dir, path)
}

/// `edc_resultats(id INTEGER, name VARCHAR, value DOUBLE)` with `rows` rows:
/// `(i, 'param-i', i * 0.5)`.
pub fn sample_database(rows: usize) -> (TempDir, PathBuf) {
    let (dir, path) = create_database(
        "CREATE TABLE edc_resultats (id INTEGER, name VARCHAR, value DOUBLE);",
    );
    {
        let conn = Connection::open(&path).expect("failed to reopen database");
        let mut stmt = conn
            .prepare("INSERT INTO edc_resultats VALUES (?, ?, ?)")
            .expect("failed to prepare insert");
        for i in 0..rows {
            stmt.execute(duckdb::params![i as i32, format!("param-{}", i), i as f64 * 0.5])
                .expect("failed to insert row");
        }
    }
    (dir, path)
}

/// Resolve a configuration the way the binary does, from CLI-style flags.
pub fn config_for(database: &Path, extra: &[&str]) -> ServerConfig {
    let mut argv = vec![
        "edc-explorer".to_string(),
        "--database-path".to_string(),
        database.display().to_string(),
    ];
    argv.extend(extra.iter().map(|s| s.to_string()));
    ServerConfig::from_args(ServerArgs::parse_from(argv)).expect("invalid test configuration")
}

/// State over `database` with default settings.
pub fn state_for(database: &Path) -> ExplorerState {
    ExplorerState::from_config(&config_for(database, &[]))
}

/// State over `database` rendering cells in `format`.
pub fn state_with_format(database: &Path, format: CellFormat) -> ExplorerState {
    let mut state = state_for(database);
    state.cell_format = format;
    state
}
