/*!
 * Async Result
 * Future/promise pair for one asynchronous invocation
 */

use super::types::{AsyncError, AsyncWaitResult};
use crate::core::types::{Fault, Value};
use log::warn;
use parking_lot::{Condvar, Mutex};
use std::fmt;
use std::sync::Arc;

/// Completion callback invoked on the worker thread after the result
/// reaches its terminal state
pub type CompletionCallback<R> = Arc<dyn Fn(&AsyncResult<R>) + Send + Sync>;

/// Terminal-state machine for one invocation.
///
/// Pending moves exactly once to Ready, Faulted, or Interrupted; there is
/// no transition out of a terminal state.
enum Completion<R> {
    Pending,
    Ready(R),
    Faulted(Fault),
    Interrupted,
}

impl<R> Completion<R> {
    fn is_pending(&self) -> bool {
        matches!(self, Completion::Pending)
    }
}

struct Shared<R> {
    state: Mutex<Completion<R>>,
    completed: Condvar,
    async_state: Option<Value>,
}

/// Waiter side of one asynchronous invocation.
///
/// Shared between the submitting call site and the executor; only the
/// executor's [`Promise`] can complete it. Equality is instance identity.
pub struct AsyncResult<R> {
    shared: Arc<Shared<R>>,
}

impl<R> Clone for AsyncResult<R> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<R> PartialEq for AsyncResult<R> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }
}

impl<R> Eq for AsyncResult<R> {}

impl<R> fmt::Debug for AsyncResult<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncResult")
            .field("completed", &self.is_completed())
            .field("has_async_state", &self.shared.async_state.is_some())
            .finish()
    }
}

impl<R> AsyncResult<R> {
    /// Create a pending result and its completing promise
    pub fn pair(async_state: Option<Value>) -> (AsyncResult<R>, Promise<R>) {
        let shared = Arc::new(Shared {
            state: Mutex::new(Completion::Pending),
            completed: Condvar::new(),
            async_state,
        });
        (
            AsyncResult {
                shared: shared.clone(),
            },
            Promise {
                shared,
                done: false,
            },
        )
    }

    /// The opaque correlation token supplied at submission time
    pub fn async_state(&self) -> Option<&Value> {
        self.shared.async_state.as_ref()
    }

    /// Non-blocking terminal-state check
    pub fn is_completed(&self) -> bool {
        !self.shared.state.lock().is_pending()
    }

    /// Block until the invocation reaches its terminal state.
    ///
    /// Re-raises a captured fault on every call after completion; never
    /// re-runs the work.
    pub fn end(&self) -> AsyncWaitResult<()> {
        let mut state = self.shared.state.lock();
        while state.is_pending() {
            self.shared.completed.wait(&mut state);
        }
        match &*state {
            Completion::Ready(_) => Ok(()),
            Completion::Faulted(fault) => Err(AsyncError::Faulted(fault.clone())),
            Completion::Interrupted => Err(AsyncError::Interrupted),
            Completion::Pending => unreachable!("wait loop exits only on terminal state"),
        }
    }

    /// Block until terminal state, yielding the produced value.
    ///
    /// Idempotent: repeated calls return the same value again.
    pub fn end_value(&self) -> AsyncWaitResult<R>
    where
        R: Clone,
    {
        let mut state = self.shared.state.lock();
        while state.is_pending() {
            self.shared.completed.wait(&mut state);
        }
        match &*state {
            Completion::Ready(value) => Ok(value.clone()),
            Completion::Faulted(fault) => Err(AsyncError::Faulted(fault.clone())),
            Completion::Interrupted => Err(AsyncError::Interrupted),
            Completion::Pending => unreachable!("wait loop exits only on terminal state"),
        }
    }
}

/// Completing side of one asynchronous invocation.
///
/// Held only by the executor. First write wins; dropping an uncompleted
/// promise interrupts every waiter so nobody blocks on abandoned work.
pub struct Promise<R> {
    shared: Arc<Shared<R>>,
    done: bool,
}

impl<R> Promise<R> {
    /// Complete with the produced value
    pub fn complete(mut self, value: R) {
        self.settle(Completion::Ready(value));
    }

    /// Complete with the captured fault
    pub fn fail(mut self, fault: Fault) {
        self.settle(Completion::Faulted(fault));
    }

    fn settle(&mut self, terminal: Completion<R>) {
        let mut state = self.shared.state.lock();
        if state.is_pending() {
            *state = terminal;
            self.done = true;
            drop(state);
            self.shared.completed.notify_all();
        } else {
            warn!("Ignoring completion of an already-terminal async result");
        }
    }
}

impl<R> Drop for Promise<R> {
    fn drop(&mut self) {
        if !self.done {
            self.settle(Completion::Interrupted);
        }
    }
}
