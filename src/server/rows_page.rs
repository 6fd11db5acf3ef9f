//! Server-rendered results page
//!
//! Renders the configured table as one HTML table: a synthetic `Row`
//! column holding the row index, then one column per result column.
//! No client-side script, pagination or sorting.
//!
//! ## Routes
//!
//! - `GET /duckdb-example` - The results table
//! - `GET /` - Redirects to `/duckdb-example`

use super::cell_format::{format_cell, CellFormat};
use super::rows_page_templates as tpl;
use super::ExplorerState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use edc_data::QueryResult;

/// Path of the results page.
pub const ROWS_PAGE_PATH: &str = "/duckdb-example";

/// Create the results page router.
pub fn create_rows_page_router(state: ExplorerState) -> Router {
    Router::new()
        .route(ROWS_PAGE_PATH, get(rows_page))
        .route("/", get(|| async { Redirect::to(ROWS_PAGE_PATH) }))
        .with_state(state)
}

/// `GET /duckdb-example`
async fn rows_page(State(state): State<ExplorerState>) -> Response {
    match state.fetch().await {
        Ok(result) => {
            let content = render_rows_table(&result, state.cell_format);
            render_page("DuckDB example", &content).into_response()
        }
        Err(e) => {
            let content = tpl::ERROR_PANEL.replace("{message}", &escape_html(&e.to_string()));
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                render_page("Error", &content),
            )
                .into_response()
        }
    }
}

/// Render a full page by wrapping `content` inside the base layout.
fn render_page(title: &str, content: &str) -> Html<String> {
    let html = tpl::BASE_LAYOUT
        .replace("{title}", title)
        .replace("{content}", content);
    Html(html)
}

/// Render the results table for `result`.
pub fn render_rows_table(result: &QueryResult, mode: CellFormat) -> String {
    let header_cells: String = result
        .column_names()
        .iter()
        .map(|name| tpl::HEADER_CELL.replace("{name}", &escape_html(name)))
        .collect();

    let body_rows: String = result
        .rows()
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let cells: String = result
                .column_types()
                .iter()
                .zip(&row.values)
                .map(|(kind, value)| {
                    tpl::BODY_CELL.replace("{value}", &escape_html(&format_cell(kind, value, mode)))
                })
                .collect();
            tpl::BODY_ROW
                .replace("{index}", &index.to_string())
                .replace("{cells}", &cells)
        })
        .collect();

    tpl::ROWS_TABLE
        .replace("{header_cells}", &header_cells)
        .replace("{body_rows}", &body_rows)
}

/// Escape HTML special characters in database content. Braces are escaped
/// too so values can never be mistaken for template placeholders.
fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
        .replace('{', "&#123;")
        .replace('}', "&#125;")
}
