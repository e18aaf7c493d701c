//! # Cleaning Automation Hub
//!
//! A progress tracker over a curated catalog of automation ideas for
//! cleaning-service businesses. Users mark ideas implemented, star
//! favorites, assign priorities, keep notes, filter the catalog, and
//! export their progress as a CSV report.
//!
//! ## Features
//!
//! - **Catalog**: seven built-in categories of automation ideas, or a JSON catalog file
//! - **Session state**: completion, favorites, priorities, notes and first-completion times
//! - **Filtering**: search, category, difficulty, ROI, priority and status filters
//! - **Metrics**: overall and per-category progress with a priority breakdown
//! - **Reports**: configurable CSV export and re-import
//!
//! ## Architecture
//!
//! ```text
//! MCP Client → McpServer (stdio JSON-RPC) → Dashboard → Session state
//!                                               ↓
//!                                     Catalog + Projection
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use cleaning_automation_hub::{AppState, Config, McpServer};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let catalog = config.load_catalog()?;
//!     let mut server = McpServer::new(AppState::new(config, catalog));
//!     server.run().await?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

/// Automation catalog store and built-in catalog data.
pub mod catalog;
/// Command-line interface definitions and one-shot commands.
pub mod cli;
/// Configuration management loaded from the environment.
pub mod config;
/// Session-scoped dashboard tying catalog and session together.
pub mod dashboard;
/// Error types and result aliases for the application.
pub mod error;
/// CSV progress report export and import.
pub mod export;
/// View/filter projection and progress metrics.
pub mod projection;
/// MCP server implementation and request handling.
pub mod server;
/// Per-session progress state.
pub mod session;

pub use catalog::Catalog;
pub use config::Config;
pub use dashboard::Dashboard;
pub use error::{AppError, AppResult};
pub use server::{AppState, McpServer};
