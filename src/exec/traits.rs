/*!
 * Executor Traits
 * Spawning abstractions
 */

use super::types::Job;

/// Job submission seam.
///
/// Implementations decide where a job runs: pooled worker threads for
/// production, the caller's own thread for deterministic scenarios.
pub trait Spawn: Send + Sync {
    /// Submit a job for execution
    fn spawn(&self, job: Job);

    /// Name of the spawning strategy
    fn name(&self) -> &'static str;
}
