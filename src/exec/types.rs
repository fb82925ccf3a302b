/*!
 * Executor Types
 * Pool configuration, statistics, and async error types
 */

use crate::core::types::Fault;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;

/// Unit of work submitted to a spawner
pub type Job = Box<dyn FnOnce() + Send>;

/// Result type for pool operations
pub type PoolResult<T> = Result<T, PoolError>;

/// Result type for async wait operations
pub type AsyncWaitResult<T> = Result<T, AsyncError>;

/// Worker pool errors
#[derive(Error, Debug, Clone, Diagnostic)]
pub enum PoolError {
    #[error("failed to spawn worker thread: {0}")]
    #[diagnostic(
        code(exec::spawn_failed),
        help("The OS refused a new thread. Check process thread limits.")
    )]
    SpawnFailed(String),

    #[error("invalid pool configuration: {0}")]
    #[diagnostic(
        code(exec::invalid_config),
        help("Worker count must be at least 1.")
    )]
    InvalidConfig(String),
}

/// Errors observed while waiting on an async result
#[derive(Error, Debug, Clone, Diagnostic)]
pub enum AsyncError {
    #[error("async work faulted: {0}")]
    #[diagnostic(
        code(exec::work_faulted),
        help("The submitted work failed. The original fault is carried unchanged as the cause.")
    )]
    Faulted(Fault),

    #[error("wait interrupted: the work was abandoned before completion")]
    #[diagnostic(
        code(exec::wait_interrupted),
        help("The executing pool was torn down while the work was still queued or running.")
    )]
    Interrupted,
}

impl AsyncError {
    /// The captured fault, when the work itself failed
    pub fn cause(&self) -> Option<&Fault> {
        match self {
            AsyncError::Faulted(fault) => Some(fault),
            AsyncError::Interrupted => None,
        }
    }
}

/// Worker pool configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PoolConfig {
    /// Number of worker threads
    pub workers: usize,
    /// Prefix for worker thread names
    pub thread_name: String,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            workers: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4),
            thread_name: "dispatch-worker".to_string(),
        }
    }
}

impl PoolConfig {
    /// Configuration with an explicit worker count
    pub fn with_workers(workers: usize) -> Self {
        Self {
            workers,
            ..Default::default()
        }
    }

    pub(crate) fn validate(&self) -> PoolResult<()> {
        if self.workers == 0 {
            return Err(PoolError::InvalidConfig(
                "worker count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Lock-free pool statistics
///
/// All updates use relaxed ordering; snapshots are best-effort monotonic.
#[repr(C, align(64))]
#[derive(Debug, Default)]
pub struct PoolStats {
    submitted: AtomicU64,
    completed: AtomicU64,
}

impl PoolStats {
    pub const fn new() -> Self {
        Self {
            submitted: AtomicU64::new(0),
            completed: AtomicU64::new(0),
        }
    }

    #[inline(always)]
    pub fn inc_submitted(&self) {
        self.submitted.fetch_add(1, Ordering::Relaxed);
    }

    #[inline(always)]
    pub fn inc_completed(&self) {
        self.completed.fetch_add(1, Ordering::Relaxed);
    }

    /// Read-only snapshot, no synchronization required
    pub fn snapshot(&self, workers: usize) -> PoolStatsSnapshot {
        PoolStatsSnapshot {
            submitted: self.submitted.load(Ordering::Relaxed),
            completed: self.completed.load(Ordering::Relaxed),
            workers,
        }
    }
}

/// Point-in-time pool statistics
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct PoolStatsSnapshot {
    pub submitted: u64,
    pub completed: u64,
    pub workers: usize,
}

impl PoolStatsSnapshot {
    /// Jobs submitted but not yet finished
    pub fn in_flight(&self) -> u64 {
        self.submitted.saturating_sub(self.completed)
    }
}
