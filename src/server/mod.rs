//! HTTP surface for the explorer
//!
//! Both presentation routes read through one [`ExplorerState`], which owns
//! the shared [`Fetcher`] and the query settings resolved at startup.

pub mod cell_format;
pub mod http;
pub mod rows_api;
pub mod rows_page;
mod rows_page_templates;
pub mod shutdown;

use crate::config::ServerConfig;
use cell_format::CellFormat;
use edc_data::{Fetcher, HandleProvider, QueryResult};
use std::num::NonZeroUsize;
use std::sync::Arc;

pub use http::{build_http_router, start_http_server};

/// State shared by every route.
#[derive(Debug, Clone)]
pub struct ExplorerState {
    /// Reads rows through the lazily opened database handle
    pub fetcher: Fetcher,
    /// Query run by both presentation routes
    pub query: Arc<str>,
    /// Maximum number of rows per response
    pub row_target: NonZeroUsize,
    /// How the results page renders cells
    pub cell_format: CellFormat,
}

impl ExplorerState {
    /// Build state from a resolved configuration. The database is not
    /// opened here; the first request does that.
    pub fn from_config(config: &ServerConfig) -> Self {
        let provider = Arc::new(HandleProvider::new(config.database.path.clone()));
        Self {
            fetcher: Fetcher::new(provider),
            query: Arc::from(config.database.query.as_str()),
            row_target: config.database.row_target,
            cell_format: config.display.cell_format,
        }
    }

    /// Run the configured query.
    pub async fn fetch(&self) -> edc_data::Result<QueryResult> {
        self.fetcher.fetch_rows(&self.query, self.row_target).await
    }
}
