//! Application-wide constants
//!
//! The pool values below are tuned for a managed PostgreSQL host reached
//! through a transaction pooler. Changing them can break compatibility
//! with the pooler, so they are not read from the environment.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

/// Default log filter when `RUST_LOG` is unset
pub const DEFAULT_RUST_LOG: &str = "info";

// =============================================================================
// ENVIRONMENT
// =============================================================================

/// Default environment mode
pub const DEFAULT_ENVIRONMENT: &str = "development";

// =============================================================================
// POOL SETTINGS
// =============================================================================

/// Maximum connections held by the pool
pub const POOL_MAX_CONNECTIONS: u32 = 10;

/// Seconds an idle connection is kept before being closed
pub const POOL_IDLE_TIMEOUT_SECS: u64 = 20;

/// Seconds a connection may live before being recycled (30 minutes)
pub const POOL_MAX_LIFETIME_SECS: u64 = 60 * 30;

/// Seconds allowed to establish or acquire a connection
pub const POOL_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Prepared statement cache size. Zero: the pooler rejects named statements.
pub const POOL_STATEMENT_CACHE_CAPACITY: usize = 0;

/// TLS mode required by the managed host
pub const DEFAULT_SSL_MODE: &str = "require";

/// Application name reported to the server
pub const APPLICATION_NAME: &str = "pgwarm";

// =============================================================================
// KEEP-ALIVE
// =============================================================================

/// Seconds between keep-alive queries (4 minutes)
pub const DEFAULT_KEEPALIVE_INTERVAL_SECS: u64 = 4 * 60;

/// Query issued by the keep-alive and the health check
pub const KEEPALIVE_QUERY: &str = "SELECT 1";

// =============================================================================
// LOG TARGETS
// =============================================================================

/// Target under which sqlx logs server notices
pub const NOTICE_LOG_TARGET: &str = "sqlx::postgres::notice";

/// Target under which sqlx logs executed statements
pub const STATEMENT_LOG_TARGET: &str = "sqlx::query";
