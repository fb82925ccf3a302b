/*!
 * Dynamic Async Invoker
 * Arity-erased dispatch composed with executor submission
 */

use super::begin::{split_begin_invoke_params, BeginParam, DynamicCallback};
use super::invoker::DynamicInvoker;
use crate::core::errors::{DispatchError, DispatchResult};
use crate::core::types::{Fault, Value};
use crate::exec::{AsyncExecutor, AsyncResult};
use crate::handle::Handle;
use log::debug;
use std::sync::Arc;

/// Asynchronous front end over one arity-erased handle.
///
/// Resolves at construction whether the bound handle produces a value
/// and reuses [`DynamicInvoker`]'s validation path, so `ArityMismatch`
/// and infrastructure failures behave identically to the synchronous
/// case — and surface synchronously, before any work is submitted.
pub struct DynamicAsyncInvoker {
    invoker: DynamicInvoker,
    executor: AsyncExecutor,
    produces_value: bool,
}

impl DynamicAsyncInvoker {
    pub fn new(handle: Handle, executor: AsyncExecutor) -> Self {
        let produces_value = handle.produces_value();
        debug!(
            "Dynamic async invoker bound to handle {} (arity {}, produces_value: {})",
            handle.id(),
            handle.arity(),
            produces_value
        );
        Self {
            invoker: DynamicInvoker::new(handle),
            executor,
            produces_value,
        }
    }

    /// The bound handle
    pub fn handle(&self) -> &Handle {
        self.invoker.handle()
    }

    /// Expected positional argument count
    pub fn arity(&self) -> usize {
        self.invoker.arity()
    }

    /// True when the bound handle produces a value, resolved once at
    /// construction
    pub fn produces_value(&self) -> bool {
        self.produces_value
    }

    /// Begin an asynchronous invocation of the bound handle.
    ///
    /// Setup failures (wrong arity) surface here, on the submitting
    /// thread; everything after submission is reported through the
    /// returned [`AsyncResult`]. Never blocks the submitter.
    pub fn begin_dynamic_invoke(
        &self,
        callback: Option<DynamicCallback>,
        async_state: Option<Value>,
        args: &[Value],
    ) -> DispatchResult<AsyncResult<Option<Value>>> {
        self.invoker.check_arity(args.len())?;

        let invoker = self.invoker.clone();
        let args = args.to_vec();
        let work = move || match invoker.dynamic_invoke(&args) {
            Ok(value) => Ok(value),
            // Business faults cross the thread boundary untouched
            Err(DispatchError::Fault(fault)) => Err(fault),
            Err(structural) => Err(Arc::new(structural) as Fault),
        };

        Ok(self.executor.execute(work, callback, async_state))
    }

    /// Begin an invocation from a computed `[callback, state, p1..pn]`
    /// protocol list (see [`super::begin::compute_begin_invoke_params`])
    pub fn begin_dynamic_invoke_params(
        &self,
        params: Vec<BeginParam>,
    ) -> DispatchResult<AsyncResult<Option<Value>>> {
        let (callback, async_state, args) = split_begin_invoke_params(params)?;
        self.begin_dynamic_invoke(callback, async_state, &args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{fault, value, value_ref};
    use crate::exec::{AsyncError, CallerThread};

    fn inline_invoker(handle: Handle) -> DynamicAsyncInvoker {
        DynamicAsyncInvoker::new(handle, AsyncExecutor::with_spawner(Arc::new(CallerThread)))
    }

    #[test]
    fn test_begin_invoke_yields_value_through_result() {
        let invoker = inline_invoker(Handle::func1(|n: i64| Ok(n * 2)));
        let result = invoker
            .begin_dynamic_invoke(None, None, &[value(21i64)])
            .unwrap();
        let out = result.end_value().unwrap().unwrap();
        assert_eq!(*value_ref::<i64>(&out).unwrap(), 42);
    }

    #[test]
    fn test_arity_mismatch_surfaces_before_submission() {
        let invoker = inline_invoker(Handle::action2(|_: u8, _: u8| Ok(())));
        let err = invoker
            .begin_dynamic_invoke(None, None, &[value(1u8)])
            .unwrap_err();
        assert!(matches!(
            err,
            DispatchError::ArityMismatch {
                expected: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn test_fault_is_recoverable_from_result() {
        let f = fault("async domain failure");
        let fc = f.clone();
        let invoker = inline_invoker(Handle::action0(move || Err(fc.clone())));
        let result = invoker.begin_dynamic_invoke(None, None, &[]).unwrap();
        match result.end() {
            Err(AsyncError::Faulted(cause)) => assert!(Arc::ptr_eq(&cause, &f)),
            other => panic!("expected fault, got {:?}", other),
        }
    }

    #[test]
    fn test_produces_value_resolved_at_construction() {
        assert!(inline_invoker(Handle::func0(|| Ok(1u8))).produces_value());
        assert!(!inline_invoker(Handle::action0(|| Ok(()))).produces_value());
    }
}
