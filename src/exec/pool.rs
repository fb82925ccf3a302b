/*!
 * Worker Pool
 * Fixed worker threads fed from a shared job channel
 */

use super::traits::Spawn;
use super::types::{Job, PoolConfig, PoolError, PoolResult, PoolStats, PoolStatsSnapshot};
use log::{debug, error, info};
use parking_lot::Mutex;
use std::sync::Arc;
use std::thread::JoinHandle;

/// Fixed-size worker pool.
///
/// Jobs are queued on an unbounded channel and drained by the workers in
/// submission order per worker, with no cross-job ordering guarantee.
/// Dropping the pool disconnects the channel and joins the workers; jobs
/// already queued still run to completion before the workers exit.
pub struct ThreadPool {
    // Option so Drop can disconnect the channel before joining
    sender: Option<flume::Sender<Job>>,
    workers: Mutex<Vec<JoinHandle<()>>>,
    stats: Arc<PoolStats>,
    config: PoolConfig,
}

impl ThreadPool {
    /// Create a pool with the given configuration
    pub fn new(config: PoolConfig) -> PoolResult<Self> {
        config.validate()?;

        let (sender, receiver) = flume::unbounded::<Job>();
        let stats = Arc::new(PoolStats::new());
        let mut workers = Vec::with_capacity(config.workers);

        for index in 0..config.workers {
            let receiver = receiver.clone();
            let stats = stats.clone();
            let name = format!("{}-{}", config.thread_name, index);
            let handle = std::thread::Builder::new()
                .name(name.clone())
                .spawn(move || {
                    debug!("Worker {} started", name);
                    while let Ok(job) = receiver.recv() {
                        job();
                        stats.inc_completed();
                    }
                    debug!("Worker {} exiting", name);
                })
                .map_err(|e| PoolError::SpawnFailed(e.to_string()))?;
            workers.push(handle);
        }

        info!("Thread pool started with {} worker(s)", config.workers);
        Ok(Self {
            sender: Some(sender),
            workers: Mutex::new(workers),
            stats,
            config,
        })
    }

    /// Create a pool with the default configuration
    pub fn with_defaults() -> PoolResult<Self> {
        Self::new(PoolConfig::default())
    }

    /// Worker count this pool was built with
    pub fn workers(&self) -> usize {
        self.config.workers
    }

    /// Point-in-time statistics
    pub fn stats(&self) -> PoolStatsSnapshot {
        self.stats.snapshot(self.config.workers)
    }
}

impl Spawn for ThreadPool {
    fn spawn(&self, job: Job) {
        self.stats.inc_submitted();
        if let Some(sender) = &self.sender {
            if sender.send(job).is_err() {
                // Unreachable while the pool is alive: the pool owns the
                // sender and workers only drop receivers on disconnect.
                error!("Job submission failed: pool channel disconnected");
            }
        }
    }

    fn name(&self) -> &'static str {
        "thread-pool"
    }
}

impl Drop for ThreadPool {
    fn drop(&mut self) {
        // Disconnect the channel so workers drain the queue and exit
        self.sender.take();
        let workers = std::mem::take(&mut *self.workers.lock());
        for handle in workers {
            if handle.join().is_err() {
                error!("Worker thread panicked during shutdown");
            }
        }
        debug!("Thread pool shut down");
    }
}

/// Inline spawner: runs each job on the submitting thread.
///
/// Intentionally synchronous; used for deterministic single-threaded
/// scenarios and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallerThread;

impl Spawn for CallerThread {
    fn spawn(&self, job: Job) {
        job();
    }

    fn name(&self) -> &'static str {
        "caller-thread"
    }
}
