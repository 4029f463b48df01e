//! Database module
//!
//! This module owns the connection pool and the keep-alive that runs
//! against it.

pub mod connection;

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::error::AppResult;
use crate::keepalive::{KeepAliveScheduler, SharedKeepAliveStatus};

pub use connection::*;

/// Query handle shared with the rest of the application
///
/// Created once at startup and torn down with [`Database::shutdown`]:
/// the keep-alive is stopped first, then the pool is closed.
pub struct Database {
    pool: PgPool,
    keepalive: Option<KeepAliveScheduler>,
}

impl Database {
    /// Connect, verify the connection and start the keep-alive if enabled
    pub async fn connect(config: &Config) -> AppResult<Self> {
        tracing::info!("Connecting to database...");
        let pool = create_pool(&config.database).await?;
        test_connection(&pool).await?;
        tracing::info!("Database connected");

        Self::with_pool(pool, config).await
    }

    /// Wrap an existing pool and start the keep-alive if enabled
    pub async fn with_pool(pool: PgPool, config: &Config) -> AppResult<Self> {
        let keepalive = KeepAliveScheduler::start(&config.keepalive, Arc::new(pool.clone())).await?;

        Ok(Self { pool, keepalive })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Keep-alive status, `None` when the keep-alive is not running
    pub fn keepalive_status(&self) -> Option<SharedKeepAliveStatus> {
        self.keepalive.as_ref().map(KeepAliveScheduler::status)
    }

    pub fn keepalive_enabled(&self) -> bool {
        self.keepalive.is_some()
    }

    /// Stop the keep-alive and close the pool
    ///
    /// The pool is closed even when the keep-alive fails to stop; that
    /// error is returned afterwards.
    pub async fn shutdown(self) -> AppResult<()> {
        let stopped = match self.keepalive {
            Some(keepalive) => keepalive.shutdown().await,
            None => Ok(()),
        };

        close_pool(&self.pool, stopped).await
    }
}

async fn close_pool(pool: &PgPool, stopped: AppResult<()>) -> AppResult<()> {
    if let Err(e) = &stopped {
        tracing::error!("Failed to stop keep-alive: {}", e);
    }

    tracing::info!("Closing database pool");
    pool.close().await;
    stopped
}
