//! Bounded, fully materialized query execution.
//!
//! [`Fetcher::fetch_rows`] opens one connection from the shared handle,
//! runs a query, and reads rows until the target count is reached or the
//! result is exhausted. DuckDB itself pulls data in vectors of
//! [`ENGINE_CHUNK_SIZE`] rows; the fetcher simply stops consuming once it
//! has enough, so a target of 2 still returns exactly 2 rows.
//!
//! The returned [`QueryResult`] owns everything it needs: column names,
//! column types and the rows. Nothing ties it back to the database.
//!
//! # Examples
//!
//! ```no_run
//! # use edc_data::{Fetcher, HandleProvider, DEFAULT_QUERY, DEFAULT_ROW_TARGET};
//! # use std::sync::Arc;
//! # async fn example() -> edc_data::Result<()> {
//! let provider = Arc::new(HandleProvider::new("../database/data.duckdb"));
//! let fetcher = Fetcher::new(provider);
//! let result = fetcher.fetch_rows(DEFAULT_QUERY, DEFAULT_ROW_TARGET).await?;
//! println!("{} columns, {} rows", result.column_count(), result.row_count());
//! # Ok(())
//! # }
//! ```

use crate::column::ColumnKind;
use crate::error::{DataError, FetchFailure, Result};
use crate::handle::{DatabaseHandle, HandleProvider};
use crate::value::CellValue;
use duckdb::types::{ToSqlOutput, Value};
use duckdb::{params_from_iter, ToSql};
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};
use std::error::Error as _;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tracing::{debug, error};

/// Table queried by the example routes.
pub const DEFAULT_TABLE: &str = "edc_resultats";

/// Query issued by the example routes.
pub const DEFAULT_QUERY: &str = "SELECT * from edc_resultats";

/// Default number of rows materialized per fetch.
pub const DEFAULT_ROW_TARGET: NonZeroUsize = match NonZeroUsize::new(1000) {
    Some(n) => n,
    None => unreachable!(),
};

/// DuckDB's internal vector size. Informational: reads happen in chunks of
/// this many rows no matter what target the caller asks for.
pub const ENGINE_CHUNK_SIZE: usize = 2048;

// ─── Result types ────────────────────────────────────────────────────────────

/// One materialized row, positionally aligned with the result's columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Row {
    pub values: Vec<CellValue>,
}

impl Row {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CellValue> {
        self.values.get(index)
    }
}

/// The outcome of one fetch.
///
/// Always rectangular: every row holds exactly [`column_count`](Self::column_count)
/// values, and there are as many column names as column types.
#[derive(Debug, Clone)]
pub struct QueryResult {
    column_names: Vec<String>,
    column_types: Vec<ColumnKind>,
    rows: Vec<Row>,
}

impl QueryResult {
    pub fn column_count(&self) -> usize {
        self.column_names.len()
    }

    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    pub fn column_name(&self, index: usize) -> Option<&str> {
        self.column_names.get(index).map(String::as_str)
    }

    pub fn column_types(&self) -> &[ColumnKind] {
        &self.column_types
    }

    pub fn column_type(&self, index: usize) -> Option<&ColumnKind> {
        self.column_types.get(index)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows as JSON objects keyed by column name, in row order.
    ///
    /// If the query returns duplicate column names, the last one wins.
    pub fn row_objects(&self) -> Vec<Map<String, JsonValue>> {
        self.rows
            .iter()
            .map(|row| {
                self.column_names
                    .iter()
                    .cloned()
                    .zip(row.values.iter().map(CellValue::to_json))
                    .collect()
            })
            .collect()
    }
}

// ─── Parameters ──────────────────────────────────────────────────────────────

/// A positional parameter for [`Fetcher::fetch_rows_with_params`]
/// (`$1`, `$2`, ... or `?` in the SQL text).
#[derive(Debug, Clone, PartialEq)]
pub enum QueryParam {
    Text(String),
    Integer(i64),
    Double(f64),
    Boolean(bool),
    Null,
}

impl ToSql for QueryParam {
    fn to_sql(&self) -> duckdb::Result<ToSqlOutput<'_>> {
        let value = match self {
            QueryParam::Text(s) => Value::Text(s.clone()),
            QueryParam::Integer(i) => Value::BigInt(*i),
            QueryParam::Double(f) => Value::Double(*f),
            QueryParam::Boolean(b) => Value::Boolean(*b),
            QueryParam::Null => Value::Null,
        };
        Ok(ToSqlOutput::Owned(value))
    }
}

impl From<&str> for QueryParam {
    fn from(s: &str) -> Self {
        QueryParam::Text(s.to_string())
    }
}

impl From<i64> for QueryParam {
    fn from(i: i64) -> Self {
        QueryParam::Integer(i)
    }
}

impl From<f64> for QueryParam {
    fn from(f: f64) -> Self {
        QueryParam::Double(f)
    }
}

impl From<bool> for QueryParam {
    fn from(b: bool) -> Self {
        QueryParam::Boolean(b)
    }
}

// ─── Fetcher ─────────────────────────────────────────────────────────────────

/// Runs queries against the shared read-only handle.
#[derive(Debug, Clone)]
pub struct Fetcher {
    provider: Arc<HandleProvider>,
}

impl Fetcher {
    pub fn new(provider: Arc<HandleProvider>) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &Arc<HandleProvider> {
        &self.provider
    }

    /// Execute `query` and materialize at most `target` rows.
    ///
    /// # Errors
    ///
    /// `DataError::Configuration` / `DataError::Open` when the handle cannot
    /// be initialized; `DataError::Fetch` for any failure while connecting,
    /// preparing, executing or reading. No partial result is ever returned.
    pub async fn fetch_rows(&self, query: &str, target: NonZeroUsize) -> Result<QueryResult> {
        self.fetch_rows_with_params(query, &[], target).await
    }

    /// Prepared-statement variant of [`fetch_rows`](Self::fetch_rows).
    pub async fn fetch_rows_with_params(
        &self,
        query: &str,
        params: &[QueryParam],
        target: NonZeroUsize,
    ) -> Result<QueryResult> {
        let outcome = match self.provider.get_handle().await {
            Ok(handle) => {
                let sql = query.to_string();
                let params = params.to_vec();
                tokio::task::spawn_blocking(move || read_until(&handle, &sql, &params, target))
                    .await
                    .map_err(|e| DataError::fetch(FetchFailure::Worker(e.to_string())))
                    .and_then(|inner| inner)
            }
            Err(e) => Err(e),
        };

        match outcome {
            Ok(result) => {
                debug!(
                    query = %query,
                    target = target.get(),
                    rows = result.row_count(),
                    columns = result.column_count(),
                    "Fetched rows"
                );
                Ok(result)
            }
            Err(e) => {
                let cause = e.source().map(|s| s.to_string()).unwrap_or_default();
                error!(
                    query = %query,
                    error = %e,
                    cause = %cause,
                    configuration = e.is_configuration(),
                    "Database Error"
                );
                Err(e)
            }
        }
    }
}

/// Blocking part of a fetch: connect, execute, read up to `target` rows.
fn read_until(
    handle: &DatabaseHandle,
    sql: &str,
    params: &[QueryParam],
    target: NonZeroUsize,
) -> Result<QueryResult> {
    let connection = handle.connect()?;
    let mut statement = connection.prepare(sql)?;
    let mut result_rows = statement.query(params_from_iter(params.iter()))?;

    let mut rows = Vec::new();
    while rows.len() < target.get() {
        let Some(row) = result_rows.next()? else {
            break;
        };
        // Column metadata is only reachable through the statement, which
        // `result_rows` borrows mutably; read values until the index runs out.
        let mut values = Vec::new();
        for i in 0.. {
            match row.get_ref(i) {
                Ok(value) => values.push(CellValue::from_duckdb(value)),
                Err(_) => break,
            }
        }
        rows.push(Row { values });
    }

    drop(result_rows);

    let column_count = statement.column_count();
    let column_names = statement.column_names();
    let column_types: Vec<ColumnKind> = (0..column_count)
        .map(|i| ColumnKind::from(&statement.column_type(i)))
        .collect();

    if let Some((index, row)) = rows
        .iter()
        .enumerate()
        .find(|(_, row)| row.len() != column_count)
    {
        return Err(DataError::fetch(FetchFailure::RaggedRow {
            row: index,
            expected: column_count,
            actual: row.len(),
        }));
    }

    Ok(QueryResult {
        column_names,
        column_types,
        rows,
    })
}

/// Build `SELECT * from <table>` for a validated table identifier.
///
/// Accepts `name` or `schema.name`, each part matching `[A-Za-z_][A-Za-z0-9_]*`.
pub fn select_all_query(table: &str) -> Result<String> {
    fn valid_part(part: &str) -> bool {
        let mut chars = part.chars();
        matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    }

    let parts: Vec<&str> = table.split('.').collect();
    if parts.len() > 2 || !parts.iter().all(|p| valid_part(p)) {
        return Err(DataError::InvalidIdentifier(table.to_string()));
    }
    Ok(format!("SELECT * from {}", table))
}

#[cfg(test)]
mod tests {
    use super::*;
    use duckdb::Connection;
    use tempfile::TempDir;

    fn nz(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn fixture(rows: usize) -> (TempDir, Fetcher) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.duckdb");
        {
            let conn = Connection::open(&path).unwrap();
            conn.execute_batch(
                "CREATE TABLE edc_resultats (id INTEGER, name VARCHAR, value DOUBLE);",
            )
            .unwrap();
            let mut stmt = conn
                .prepare("INSERT INTO edc_resultats VALUES (?, ?, ?)")
                .unwrap();
            for i in 0..rows {
                stmt.execute(duckdb::params![i as i32, format!("param-{}", i), i as f64 * 0.5])
                    .unwrap();
            }
        }
        let provider = Arc::new(HandleProvider::new(&path));
        (dir, Fetcher::new(provider))
    }

    #[test]
    fn test_default_query_matches_table() {
        assert_eq!(select_all_query(DEFAULT_TABLE).unwrap(), DEFAULT_QUERY);
        assert_eq!(DEFAULT_ROW_TARGET.get(), 1000);
    }

    #[test]
    fn test_select_all_query_rejects_injection() {
        assert!(select_all_query("main.edc_resultats").is_ok());
        assert!(select_all_query("_t1").is_ok());
        assert!(select_all_query("edc; DROP TABLE x").is_err());
        assert!(select_all_query("1abc").is_err());
        assert!(select_all_query("a.b.c").is_err());
        assert!(select_all_query("").is_err());
    }

    #[tokio::test]
    async fn test_fetch_reads_metadata() {
        let (_dir, fetcher) = fixture(5);
        let result = fetcher.fetch_rows(DEFAULT_QUERY, DEFAULT_ROW_TARGET).await.unwrap();

        assert_eq!(result.row_count(), 5);
        assert_eq!(result.column_names(), ["id", "name", "value"]);
        assert_eq!(
            result.column_types(),
            [ColumnKind::Integer, ColumnKind::Varchar, ColumnKind::Double]
        );
        assert_eq!(result.column_name(1), Some("name"));
        assert_eq!(result.column_type(2), Some(&ColumnKind::Double));
        assert_eq!(result.rows()[3].get(1), Some(&CellValue::Text("param-3".into())));
    }

    #[tokio::test]
    async fn test_fetch_stops_at_target() {
        let (_dir, fetcher) = fixture(5);
        let result = fetcher.fetch_rows(DEFAULT_QUERY, nz(2)).await.unwrap();
        assert_eq!(result.row_count(), 2);
        assert_eq!(result.column_count(), 3);
    }

    #[tokio::test]
    async fn test_fetch_target_below_chunk_on_large_table() {
        let (_dir, fetcher) = fixture(ENGINE_CHUNK_SIZE + 10);
        let result = fetcher
            .fetch_rows(DEFAULT_QUERY, nz(ENGINE_CHUNK_SIZE + 3))
            .await
            .unwrap();
        assert_eq!(result.row_count(), ENGINE_CHUNK_SIZE + 3);
    }

    #[tokio::test]
    async fn test_empty_result_keeps_columns() {
        let (_dir, fetcher) = fixture(0);
        let result = fetcher.fetch_rows(DEFAULT_QUERY, nz(10)).await.unwrap();
        assert!(result.is_empty());
        assert_eq!(result.column_count(), 3);
        assert_eq!(result.column_types().len(), 3);
    }

    #[tokio::test]
    async fn test_row_objects_are_keyed_by_column() {
        let (_dir, fetcher) = fixture(2);
        let result = fetcher.fetch_rows(DEFAULT_QUERY, nz(10)).await.unwrap();
        let objects = result.row_objects();
        assert_eq!(objects.len(), 2);
        assert_eq!(objects[1]["id"], serde_json::json!(1));
        assert_eq!(objects[1]["name"], serde_json::json!("param-1"));
        assert_eq!(objects[1]["value"], serde_json::json!(0.5));
    }

    #[tokio::test]
    async fn test_prepared_statement_binds_params() {
        let (_dir, fetcher) = fixture(5);
        let result = fetcher
            .fetch_rows_with_params(
                "SELECT name, count(*) AS n FROM edc_resultats WHERE name = $1 GROUP BY name",
                &[QueryParam::from("param-4")],
                nz(10),
            )
            .await
            .unwrap();
        assert_eq!(result.row_count(), 1);
        assert_eq!(result.column_names(), ["name", "n"]);
        assert_eq!(result.rows()[0].get(0), Some(&CellValue::Text("param-4".into())));
    }

    #[tokio::test]
    async fn test_missing_table_is_fetch_error() {
        let (_dir, fetcher) = fixture(0);
        let err = fetcher
            .fetch_rows("SELECT * from no_such_table", nz(10))
            .await
            .unwrap_err();
        assert!(matches!(err, DataError::Fetch { .. }));
        assert_eq!(err.to_string(), "Failed to fetch example rows.");
    }

    #[tokio::test]
    async fn test_missing_file_is_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let provider = Arc::new(HandleProvider::new(dir.path().join("data.duckdb")));
        let err = Fetcher::new(provider)
            .fetch_rows(DEFAULT_QUERY, nz(10))
            .await
            .unwrap_err();
        assert!(matches!(err, DataError::Configuration { .. }));
    }

    #[tokio::test]
    async fn test_nested_and_enum_cells() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.duckdb");
        {
            let conn = Connection::open(&path).unwrap();
            conn.execute_batch(
                "CREATE TYPE mood AS ENUM ('ok', 'bad');
                 CREATE TABLE nested (
                     l INTEGER[],
                     s STRUCT(a INTEGER, b VARCHAR),
                     m MAP(VARCHAR, INTEGER),
                     e mood
                 );
                 INSERT INTO nested VALUES
                     ([1, 2, 3], {'a': 1, 'b': 'x'}, MAP {'k': 2}, 'ok'),
                     ([], {'a': NULL, 'b': 'y'}, MAP {}, 'bad');",
            )
            .unwrap();
        }
        let fetcher = Fetcher::new(Arc::new(HandleProvider::new(&path)));
        let result = fetcher
            .fetch_rows("SELECT * FROM nested", nz(10))
            .await
            .unwrap();

        assert_eq!(
            result.column_types(),
            [ColumnKind::List, ColumnKind::Struct, ColumnKind::Map, ColumnKind::Enum]
        );

        let first = &result.rows()[0];
        assert_eq!(
            first.get(0),
            Some(&CellValue::List(vec![
                CellValue::Integer(1),
                CellValue::Integer(2),
                CellValue::Integer(3)
            ]))
        );
        assert_eq!(first.get(0).unwrap().to_string(), "[1, 2, 3]");
        assert_eq!(first.get(1).unwrap().to_string(), "{'a': 1, 'b': x}");
        assert_eq!(first.get(2).unwrap().to_string(), "{k=2}");
        assert_eq!(first.get(3), Some(&CellValue::Text("ok".into())));

        let objects = result.row_objects();
        assert_eq!(objects[0]["l"], serde_json::json!([1, 2, 3]));
        assert_eq!(objects[0]["s"], serde_json::json!({"a": 1, "b": "x"}));
        assert_eq!(objects[0]["m"], serde_json::json!({"k": 2}));
        assert_eq!(objects[0]["e"], serde_json::json!("ok"));
        assert_eq!(objects[1]["l"], serde_json::json!([]));
        assert_eq!(objects[1]["s"], serde_json::json!({"a": null, "b": "y"}));
        assert_eq!(objects[1]["e"], serde_json::json!("bad"));
    }
}
