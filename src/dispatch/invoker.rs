/*!
 * Dynamic Invoker
 * Arity-checked, fault-transparent dispatch for arity-erased call sites
 */

use crate::core::errors::{DispatchError, DispatchResult};
use crate::core::types::Value;
use crate::handle::Handle;
use log::debug;

/// Validating pass-through in front of one handle.
///
/// The expected arity is derived once at construction; the invoker is
/// immutable afterwards and reusable across calls. Business faults from
/// the handle propagate unchanged; structural dispatch failures surface
/// as `DispatchError::Infrastructure`.
#[derive(Clone)]
pub struct DynamicInvoker {
    handle: Handle,
    arity: usize,
}

impl DynamicInvoker {
    pub fn new(handle: Handle) -> Self {
        let arity = handle.arity();
        debug!("Dynamic invoker bound to handle {} (arity {})", handle.id(), arity);
        Self { handle, arity }
    }

    /// The bound handle
    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    /// Expected positional argument count
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Validate an argument count against the declared arity
    pub fn check_arity(&self, actual: usize) -> DispatchResult<()> {
        if actual != self.arity {
            return Err(DispatchError::ArityMismatch {
                expected: self.arity,
                actual,
            });
        }
        Ok(())
    }

    /// Invoke the bound handle with a dynamic argument list.
    ///
    /// A wrong argument count fails before the handle is reached.
    pub fn dynamic_invoke(&self, args: &[Value]) -> DispatchResult<Option<Value>> {
        self.check_arity(args.len())?;
        self.handle.invoke(args)
    }
}
