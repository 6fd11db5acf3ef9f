//! JSON API exposing the same rows as the results page.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/api/db-example` | Rows, column names and column types |
//!
//! # Response
//!
//! ```json
//! {
//!   "status": "OK",
//!   "rows": [{"id": 1, "name": "Nitrates", "value": 12.5}],
//!   "columnNames": ["id", "name", "value"],
//!   "columnTypes": ["INTEGER", "VARCHAR", "DOUBLE"],
//!   "count": 3
//! }
//! ```
//!
//! `count` is the number of **columns**, not rows. Existing clients rely on
//! it, so it stays that way; use `rows.length` for the row count.
//!
//! On failure the route answers `500` with `{"error": "<message>"}`.

use super::ExplorerState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use edc_data::{ColumnKind, DataError, QueryResult};
use serde::Serialize;
use serde_json::{Map, Value};

/// Path of the rows API.
pub const ROWS_API_PATH: &str = "/api/db-example";

/// Success body for `GET /api/db-example`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowsResponse {
    /// Always `"OK"`.
    pub status: &'static str,
    /// One object per row, keyed by column name.
    pub rows: Vec<Map<String, Value>>,
    /// Column names in result order.
    pub column_names: Vec<String>,
    /// DuckDB type names in result order.
    pub column_types: Vec<ColumnKind>,
    /// Column count.
    pub count: usize,
}

impl From<QueryResult> for RowsResponse {
    fn from(result: QueryResult) -> Self {
        Self {
            status: "OK",
            rows: result.row_objects(),
            column_names: result.column_names().to_vec(),
            column_types: result.column_types().to_vec(),
            count: result.column_count(),
        }
    }
}

/// Error body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

/// Create the rows API router.
pub fn create_rows_api_router(state: ExplorerState) -> Router {
    Router::new()
        .route(ROWS_API_PATH, get(rows_handler))
        .with_state(state)
}

/// `GET /api/db-example`
async fn rows_handler(State(state): State<ExplorerState>) -> Result<Json<RowsResponse>, ApiError> {
    let result = state.fetch().await.map_err(ApiError::Data)?;
    Ok(Json(RowsResponse::from(result)))
}

// ─── Error handling ──────────────────────────────────────────────────────────

/// API error type with HTTP status code mapping.
#[derive(Debug)]
enum ApiError {
    /// The data layer failed (missing file, engine error, ...).
    Data(DataError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Data(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_shape() {
        let body = serde_json::to_value(ErrorResponse {
            error: "Failed to fetch example rows.".to_string(),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"error": "Failed to fetch example rows."}));
    }

    #[test]
    fn test_api_error_is_500() {
        let resp = ApiError::Data(DataError::not_found("/x/data.duckdb")).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
