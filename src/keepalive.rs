//! Scheduled keep-alive query
//!
//! Issues a trivial query on a fixed interval so the host and the pooler
//! do not reap idle connections. Failures are logged and recorded, never
//! retried or propagated; the next interval fires normally.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use tokio::sync::RwLock;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::config::KeepAliveConfig;
use crate::db::test_connection;
use crate::error::AppResult;

/// Something that can be pinged with a trivial query
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Pinger: Send + Sync {
    async fn ping(&self) -> Result<(), sqlx::Error>;
}

#[async_trait]
impl Pinger for PgPool {
    async fn ping(&self) -> Result<(), sqlx::Error> {
        test_connection(self).await
    }
}

/// Running totals of keep-alive results
#[derive(Debug, Clone, Default, Serialize)]
pub struct KeepAliveStatus {
    pub successes: u64,
    pub failures: u64,
    pub last_run_at: Option<DateTime<Utc>>,
    pub last_success_at: Option<DateTime<Utc>>,
    /// Message of the most recent failure, cleared by the next success
    pub last_error: Option<String>,
}

pub type SharedKeepAliveStatus = Arc<RwLock<KeepAliveStatus>>;

/// Result of a single keep-alive run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeepAliveOutcome {
    Succeeded { elapsed: Duration },
    Failed { error: String },
}

impl KeepAliveOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }
}

/// One keep-alive target plus its status record
pub struct KeepAlive {
    pinger: Arc<dyn Pinger>,
    status: SharedKeepAliveStatus,
}

impl KeepAlive {
    pub fn new(pinger: Arc<dyn Pinger>) -> Self {
        Self {
            pinger,
            status: Arc::new(RwLock::new(KeepAliveStatus::default())),
        }
    }

    pub fn status(&self) -> SharedKeepAliveStatus {
        self.status.clone()
    }

    /// Run one keep-alive query. Never fails.
    pub async fn tick(&self) -> KeepAliveOutcome {
        let started = Instant::now();
        let result = self.pinger.ping().await;
        let now = Utc::now();

        let mut status = self.status.write().await;
        status.last_run_at = Some(now);

        match result {
            Ok(()) => {
                let elapsed = started.elapsed();
                status.successes += 1;
                status.last_success_at = Some(now);
                status.last_error = None;
                tracing::info!(
                    elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
                    "Keep-alive query succeeded"
                );
                KeepAliveOutcome::Succeeded { elapsed }
            }
            Err(e) => {
                let error = e.to_string();
                status.failures += 1;
                status.last_error = Some(error.clone());
                tracing::error!("Keep-alive query failed: {}", error);
                KeepAliveOutcome::Failed { error }
            }
        }
    }
}

/// Scheduler running the keep-alive on a fixed interval
pub struct KeepAliveScheduler {
    scheduler: JobScheduler,
    keepalive: Arc<KeepAlive>,
}

impl KeepAliveScheduler {
    /// Start the keep-alive job, or return `None` when it is disabled
    pub async fn start(
        config: &KeepAliveConfig,
        pinger: Arc<dyn Pinger>,
    ) -> AppResult<Option<Self>> {
        if !config.enabled {
            tracing::info!("Keep-alive disabled");
            return Ok(None);
        }

        let keepalive = Arc::new(KeepAlive::new(pinger));
        let scheduler = JobScheduler::new().await?;

        let job_keepalive = keepalive.clone();
        let job = Job::new_repeated_async(config.interval, move |_uuid, _lock| {
            let keepalive = job_keepalive.clone();

            Box::pin(async move {
                tracing::debug!("Running keep-alive job");
                keepalive.tick().await;
            })
        })?;

        scheduler.add(job).await?;
        scheduler.start().await?;

        tracing::info!(
            "Keep-alive enabled: every {}s",
            config.interval.as_secs()
        );

        Ok(Some(Self {
            scheduler,
            keepalive,
        }))
    }

    pub fn status(&self) -> SharedKeepAliveStatus {
        self.keepalive.status()
    }

    /// Stop the scheduler; a run already in flight is not awaited
    pub async fn shutdown(mut self) -> AppResult<()> {
        tracing::info!("Stopping keep-alive");
        self.scheduler.shutdown().await?;
        Ok(())
    }
}
