//! Server module for MCP protocol handling.
//!
//! This module provides:
//! - MCP server implementation over stdio
//! - Tool call handlers routed to the session dashboard
//! - Application state owned by the server

mod handlers;
mod mcp;

pub use handlers::*;
pub use mcp::*;

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::dashboard::Dashboard;

/// Application state owned by the server.
///
/// One server process serves exactly one dashboard session; requests are
/// handled one at a time, so the state is mutated in place without locks.
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// The session dashboard.
    pub dashboard: Dashboard,
}

impl AppState {
    /// Create new application state
    pub fn new(config: Config, catalog: Catalog) -> Self {
        let dashboard = Dashboard::from_config(Arc::new(catalog), &config);

        tracing::info!(
            session_id = %dashboard.session().id,
            categories = dashboard.catalog().category_count(),
            records = dashboard.catalog().total_count(),
            reset_scope = %config.session.reset_scope,
            "AppState initialized"
        );

        Self { config, dashboard }
    }
}
