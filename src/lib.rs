//! pgwarm - Managed PostgreSQL pool with a scheduled keep-alive
//!
//! This library builds a connection pool tuned for a managed PostgreSQL
//! host reached through a transaction pooler, and runs a periodic
//! keep-alive query against it in production.
//!
//! # Architecture
//!
//! - **Config**: environment variables, validated at startup
//! - **Db**: pool options and the [`Database`] query handle
//! - **Keepalive**: the scheduled keep-alive job
//! - **Handlers**: HTTP health endpoint

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod handlers;
pub mod keepalive;
pub mod state;

// Re-export commonly used types
pub use config::Config;
pub use db::Database;
pub use error::{AppError, AppResult};
pub use state::AppState;
