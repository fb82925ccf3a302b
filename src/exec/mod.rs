/*!
 * Execution Module
 * Thread-pool backed asynchronous invocation with future-style results
 *
 * # Architecture
 *
 * The `Spawn` trait is the seam between submission and execution:
 * `ThreadPool` runs jobs on pooled workers, `CallerThread` runs them
 * inline for deterministic scenarios. `AsyncExecutor` wraps a unit of
 * work as an `AsyncResult`/`Promise` pair and completes it from the
 * executing thread; the only blocking point is `end`/`end_value`.
 */

mod default;
mod executor;
mod future;
mod pool;
mod traits;
pub mod types;

pub use default::{default_pool, set_default_pool};
pub use executor::AsyncExecutor;
pub use future::{AsyncResult, CompletionCallback, Promise};
pub use pool::{CallerThread, ThreadPool};
pub use traits::Spawn;
pub use types::{
    AsyncError, AsyncWaitResult, Job, PoolConfig, PoolError, PoolResult, PoolStats,
    PoolStatsSnapshot,
};
