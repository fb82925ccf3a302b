/*!
 * Default Pool
 * Process-wide worker pool, lazily created and swappable
 */

use super::pool::ThreadPool;
use super::types::{PoolConfig, PoolResult};
use arc_swap::ArcSwapOption;
use log::info;
use parking_lot::Mutex;
use std::sync::Arc;

static DEFAULT_POOL: ArcSwapOption<ThreadPool> = ArcSwapOption::const_empty();
// Serializes lazy creation only; reads go through the lock-free swap
static CREATE: Mutex<()> = Mutex::new(());

/// The process-wide default pool, created on first need.
///
/// Executors capture the pool returned here at construction time;
/// replacing the default afterwards never retargets them.
pub fn default_pool() -> PoolResult<Arc<ThreadPool>> {
    if let Some(pool) = DEFAULT_POOL.load_full() {
        return Ok(pool);
    }

    let _guard = CREATE.lock();
    if let Some(pool) = DEFAULT_POOL.load_full() {
        return Ok(pool);
    }

    let pool = Arc::new(ThreadPool::new(PoolConfig::default())?);
    info!("Created process-wide default pool");
    DEFAULT_POOL.store(Some(pool.clone()));
    Ok(pool)
}

/// Replace or clear the process-wide default pool.
///
/// Affects only executors constructed afterwards. Clearing (None) makes
/// the next [`default_pool`] call create a fresh pool.
pub fn set_default_pool(pool: Option<Arc<ThreadPool>>) {
    match &pool {
        Some(_) => info!("Default pool replaced"),
        None => info!("Default pool cleared"),
    }
    DEFAULT_POOL.store(pool);
}
