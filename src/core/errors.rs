/*!
 * Error Types
 * Centralized error handling with thiserror and miette support
 */

use super::types::Fault;
use miette::Diagnostic;
use thiserror::Error;

// Re-export subsystem errors so callers have one import point
pub use crate::exec::types::{AsyncError, PoolError};
pub use crate::registry::types::RegistryError;

/// Result type for synchronous dispatch operations
pub type DispatchResult<T> = Result<T, DispatchError>;

/// Dispatch errors raised on the arity-erased invocation path
#[derive(Error, Debug, Clone, Diagnostic)]
pub enum DispatchError {
    #[error("arity mismatch: handle expects {expected} argument(s), got {actual}")]
    #[diagnostic(
        code(dispatch::arity_mismatch),
        help("Supply exactly the declared number of positional arguments.")
    )]
    ArityMismatch { expected: usize, actual: usize },

    #[error("invocation infrastructure failure: {cause}")]
    #[diagnostic(
        code(dispatch::infrastructure),
        help("The dispatch mechanism could not reach the handle. Inspect the cause; this is not a handle business failure.")
    )]
    Infrastructure { cause: Fault },

    #[error("handle fault: {0}")]
    #[diagnostic(
        code(dispatch::handle_fault),
        help("The handle's own logic failed. The original fault is carried unchanged.")
    )]
    Fault(Fault),
}

impl DispatchError {
    /// Build an infrastructure failure wrapping its underlying cause
    pub fn infrastructure<E>(cause: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        DispatchError::Infrastructure {
            cause: std::sync::Arc::new(cause),
        }
    }

    /// The wrapped cause, when one exists
    pub fn cause(&self) -> Option<&Fault> {
        match self {
            DispatchError::ArityMismatch { .. } => None,
            DispatchError::Infrastructure { cause } => Some(cause),
            DispatchError::Fault(fault) => Some(fault),
        }
    }

    /// True when the handle's own logic failed (as opposed to dispatch plumbing)
    pub fn is_fault(&self) -> bool {
        matches!(self, DispatchError::Fault(_))
    }
}

/// Structural failure: an argument did not downcast to the type the
/// handle body was built with
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("argument {index} does not downcast to {expected}")]
pub struct ArgumentTypeError {
    pub index: usize,
    pub expected: &'static str,
}

/// Structural failure: a begin-invoke parameter list violated the
/// `[callback, state, p1..pn]` protocol ordering
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("begin-invoke parameter {index} out of protocol order: expected {expected}")]
pub struct BeginProtocolError {
    pub index: usize,
    pub expected: &'static str,
}
