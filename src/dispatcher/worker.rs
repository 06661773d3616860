//! Worker pool for deferred deliveries.
//!
//! Deferred jobs run on the blocking thread pool of a private Tokio runtime.
//! That pool spawns threads on demand up to [`WorkerConfig::max_workers`] and
//! retires threads that have been idle for [`WorkerConfig::idle_timeout`].
//! Jobs beyond the cap wait in the pool's queue, which is unbounded.

use crate::{Error, Result};
use std::fmt;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::{Builder, Runtime};
use tracing::{debug, info};

/// Configuration for the worker pool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerConfig {
    /// Upper bound on concurrently running deferred deliveries
    pub max_workers: usize,

    /// How long an idle worker thread is kept before it is reclaimed
    pub idle_timeout: Duration,

    /// Worker thread name prefix
    pub name_prefix: String,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            max_workers: 512,
            idle_timeout: Duration::from_secs(60),
            name_prefix: "event-dispatch-worker".to_string(),
        }
    }
}

impl WorkerConfig {
    /// Create a new worker configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of worker threads
    pub fn max_workers(mut self, workers: usize) -> Self {
        self.max_workers = workers;
        self
    }

    /// Set the idle timeout after which workers are reclaimed
    pub fn idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = timeout;
        self
    }

    /// Set the worker thread name prefix
    pub fn name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.name_prefix = prefix.into();
        self
    }

    /// Check the configuration for values the pool cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.max_workers == 0 {
            return Err(Error::config("max_workers must be at least 1"));
        }
        if self.name_prefix.is_empty() {
            return Err(Error::config("worker name prefix must not be empty"));
        }
        Ok(())
    }
}

/// A pool of threads running deferred deliveries.
pub struct WorkerPool {
    runtime: Option<Runtime>,
    max_workers: usize,
    jobs_scheduled: AtomicU64,
    live_workers: Arc<AtomicUsize>,
}

impl WorkerPool {
    /// Start a worker pool.
    ///
    /// The runtime has no scheduler threads of its own, so no worker thread
    /// exists until the first job is executed.
    pub fn start(config: &WorkerConfig) -> Result<Self> {
        config.validate()?;

        info!(
            max_workers = config.max_workers,
            idle_timeout = ?config.idle_timeout,
            "Starting deferred worker pool"
        );

        let live_workers = Arc::new(AtomicUsize::new(0));
        let started = Arc::clone(&live_workers);
        let stopped = Arc::clone(&live_workers);

        let runtime = Builder::new_current_thread()
            .max_blocking_threads(config.max_workers)
            .thread_keep_alive(config.idle_timeout)
            .thread_name(config.name_prefix.clone())
            .on_thread_start(move || {
                started.fetch_add(1, Ordering::SeqCst);
            })
            .on_thread_stop(move || {
                stopped.fetch_sub(1, Ordering::SeqCst);
            })
            .build()?;

        Ok(Self {
            runtime: Some(runtime),
            max_workers: config.max_workers,
            jobs_scheduled: AtomicU64::new(0),
            live_workers,
        })
    }

    /// Schedule a job on the next available worker and return immediately.
    pub fn execute<F>(&self, job: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        let runtime = self
            .runtime
            .as_ref()
            .ok_or_else(|| Error::internal("Worker pool is shut down"))?;

        // Detached; a panicking job is contained by the pool
        drop(runtime.spawn_blocking(job));
        self.jobs_scheduled.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    /// Number of jobs handed to the pool so far
    pub fn jobs_scheduled(&self) -> u64 {
        self.jobs_scheduled.load(Ordering::Relaxed)
    }

    /// Configured upper bound on worker threads
    pub fn max_workers(&self) -> usize {
        self.max_workers
    }

    /// Worker threads currently alive, busy or idle
    pub fn live_workers(&self) -> usize {
        self.live_workers.load(Ordering::SeqCst)
    }
}

impl fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkerPool")
            .field("max_workers", &self.max_workers)
            .field("jobs_scheduled", &self.jobs_scheduled())
            .field("live_workers", &self.live_workers())
            .field("running", &self.runtime.is_some())
            .finish()
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        if let Some(runtime) = self.runtime.take() {
            debug!("Stopping deferred worker pool");
            // Does not wait for running jobs and is safe inside async contexts
            runtime.shutdown_background();
        }
    }
}
