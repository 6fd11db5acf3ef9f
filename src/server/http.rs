//! HTTP server for the results page, rows API and health checks
//!
//! This module assembles the routers:
//! - Results page (`/duckdb-example`, `/`)
//! - Rows API (`/api/db-example`)
//! - Liveness check (`/health`)

use super::rows_api::create_rows_api_router;
use super::rows_page::create_rows_page_router;
use super::shutdown::shutdown_signal;
use super::ExplorerState;
use crate::error::{ExplorerError, Result};
use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use std::net::SocketAddr;
use tracing::info;

/// Health check status
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    /// Always "ok" while the process serves requests
    pub status: &'static str,
    /// Whether the database handle has been opened yet
    pub database_open: bool,
}

/// Build the full application router.
pub fn build_http_router(state: ExplorerState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(state.clone())
        .merge(create_rows_page_router(state.clone()))
        .merge(create_rows_api_router(state))
}

/// Liveness only: never touches the database, so a missing file does not
/// make the process look dead.
async fn health_handler(State(state): State<ExplorerState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        database_open: state.fetcher.provider().is_initialized(),
    })
}

/// Start HTTP server and serve until a shutdown signal arrives.
pub async fn start_http_server(addr: SocketAddr, state: ExplorerState) -> Result<()> {
    let app = build_http_router(state);

    info!(addr = %addr, "Starting HTTP server (results page, rows API, health)");

    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::AddrInUse {
            let port = addr.port();
            ExplorerError::Server(format!(
                "HTTP port {} is already in use. \
                 Fix: Use --http-addr 0.0.0.0:{} to pick a different port, \
                 or stop the existing process.",
                port,
                port.saturating_add(1)
            ))
        } else {
            ExplorerError::Server(format!("Failed to bind HTTP server to {}: {}", addr, e))
        }
    })?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ExplorerError::Server(format!("HTTP server error: {}", e)))?;

    info!("HTTP server stopped");
    Ok(())
}
