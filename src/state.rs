//! Application state management
//!
//! This module contains the shared application state that is passed
//! to all request handlers via Axum's State extractor.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::db::Database;
use crate::keepalive::SharedKeepAliveStatus;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

/// Inner state (wrapped in Arc for cheap cloning)
struct AppStateInner {
    /// Database connection pool
    db: PgPool,

    /// Keep-alive status, absent when the keep-alive is disabled
    keepalive: Option<SharedKeepAliveStatus>,

    /// Application configuration
    config: Config,
}

impl AppState {
    /// Create a new application state
    pub fn new(db: PgPool, keepalive: Option<SharedKeepAliveStatus>, config: Config) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                db,
                keepalive,
                config,
            }),
        }
    }

    /// Create state borrowing handles from an owned [`Database`]
    pub fn from_database(database: &Database, config: Config) -> Self {
        Self::new(database.pool().clone(), database.keepalive_status(), config)
    }

    /// Get a reference to the database pool
    pub fn db(&self) -> &PgPool {
        &self.inner.db
    }

    /// Get the keep-alive status handle
    pub fn keepalive(&self) -> Option<&SharedKeepAliveStatus> {
        self.inner.keepalive.as_ref()
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }
}
