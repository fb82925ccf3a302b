/*!
 * Async Executor
 * Submits work to a spawner and completes the matching async result
 */

use super::default::default_pool;
use super::future::{AsyncResult, CompletionCallback};
use super::traits::Spawn;
use super::types::PoolResult;
use crate::core::types::{fault, Fault, FaultResult, Value};
use log::{debug, error};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

fn panic_fault(payload: Box<dyn Any + Send>) -> Fault {
    let msg = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "non-string panic payload".to_string());
    fault(format!("work panicked: {}", msg))
}

/// Fire-and-forget submission front end.
///
/// Exactly one spawner backs an executor for its lifetime; executors
/// built with [`AsyncExecutor::new`] capture the process default pool at
/// construction and keep it even if the default is later replaced.
#[derive(Clone)]
pub struct AsyncExecutor {
    spawner: Arc<dyn Spawn>,
}

impl AsyncExecutor {
    /// Executor backed by the process-wide default pool (created on
    /// first need)
    pub fn new() -> PoolResult<Self> {
        Ok(Self {
            spawner: default_pool()?,
        })
    }

    /// Executor backed by an explicit spawner
    pub fn with_spawner(spawner: Arc<dyn Spawn>) -> Self {
        Self { spawner }
    }

    /// Name of the backing spawner strategy
    pub fn spawner_name(&self) -> &'static str {
        self.spawner.name()
    }

    /// Submit `work` for asynchronous execution.
    ///
    /// Returns immediately with a pending [`AsyncResult`] carrying
    /// `async_state`. The work's value or fault completes the result
    /// from the executing thread; a panic inside the work is captured as
    /// a fault rather than poisoning the worker. The optional callback
    /// runs exactly once, on the executing thread, after the terminal
    /// state is visible to waiters; a panicking callback is logged and
    /// never re-fails the result.
    pub fn execute<R, W>(
        &self,
        work: W,
        callback: Option<CompletionCallback<R>>,
        async_state: Option<Value>,
    ) -> AsyncResult<R>
    where
        R: Send + 'static,
        W: FnOnce() -> FaultResult<R> + Send + 'static,
    {
        let (result, promise) = AsyncResult::pair(async_state);
        let completed_view = result.clone();

        self.spawner.spawn(Box::new(move || {
            match panic::catch_unwind(AssertUnwindSafe(work)) {
                Ok(Ok(value)) => promise.complete(value),
                Ok(Err(work_fault)) => {
                    debug!("Async work faulted: {}", work_fault);
                    promise.fail(work_fault);
                }
                Err(payload) => {
                    let work_fault = panic_fault(payload);
                    debug!("Async work panicked: {}", work_fault);
                    promise.fail(work_fault);
                }
            }

            if let Some(callback) = callback {
                let outcome =
                    panic::catch_unwind(AssertUnwindSafe(|| callback(&completed_view)));
                if outcome.is_err() {
                    // Callback failures stay the caller's problem; the
                    // result keeps its terminal state.
                    error!("Completion callback panicked; async result unaffected");
                }
            }
        }));

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::pool::CallerThread;
    use crate::exec::types::AsyncError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn inline_executor() -> AsyncExecutor {
        AsyncExecutor::with_spawner(Arc::new(CallerThread))
    }

    #[test]
    fn test_execute_completes_with_value() {
        let executor = inline_executor();
        let result = executor.execute(|| Ok("X".to_string()), None, None);
        assert_eq!(result.end_value().unwrap(), "X");
    }

    #[test]
    fn test_execute_captures_fault() {
        let executor = inline_executor();
        let result = executor.execute::<(), _>(|| Err(fault("boom")), None, None);
        match result.end() {
            Err(AsyncError::Faulted(cause)) => assert_eq!(cause.to_string(), "boom"),
            other => panic!("expected fault, got {:?}", other),
        }
    }

    #[test]
    fn test_execute_captures_panic_as_fault() {
        let executor = inline_executor();
        let result = executor.execute::<(), _>(|| panic!("kaboom"), None, None);
        match result.end() {
            Err(AsyncError::Faulted(cause)) => {
                assert!(cause.to_string().contains("kaboom"));
            }
            other => panic!("expected fault, got {:?}", other),
        }
    }

    #[test]
    fn test_callback_receives_same_result_instance() {
        let executor = inline_executor();
        let seen = Arc::new(parking_lot::Mutex::new(None::<AsyncResult<u32>>));
        let seen_clone = seen.clone();
        let callback: CompletionCallback<u32> = Arc::new(move |r| {
            *seen_clone.lock() = Some(r.clone());
        });
        let result = executor.execute(|| Ok(5u32), Some(callback), None);
        let observed = seen.lock().take().expect("callback ran");
        assert_eq!(observed, result);
        assert_eq!(observed.end_value().unwrap(), 5);
    }

    #[test]
    fn test_callback_runs_after_terminal_state() {
        let executor = inline_executor();
        let completed_at_callback = Arc::new(AtomicUsize::new(0));
        let flag = completed_at_callback.clone();
        let callback: CompletionCallback<u32> = Arc::new(move |r| {
            if r.is_completed() {
                flag.fetch_add(1, Ordering::SeqCst);
            }
        });
        executor.execute(|| Ok(1u32), Some(callback), None);
        assert_eq!(completed_at_callback.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_callback_panic_does_not_refail_result() {
        let executor = inline_executor();
        let callback: CompletionCallback<u32> = Arc::new(|_| panic!("callback boom"));
        let result = executor.execute(|| Ok(9u32), Some(callback), None);
        assert_eq!(result.end_value().unwrap(), 9);
    }
}
