/*!
 * Begin-Invoke Protocol
 * Fixed parameter ordering for asynchronous begin operations
 */

use crate::core::errors::{BeginProtocolError, DispatchError, DispatchResult};
use crate::core::types::Value;
use crate::exec::CompletionCallback;
use std::fmt;

/// Completion callback flavor used on the arity-erased async path
pub type DynamicCallback = CompletionCallback<Option<Value>>;

/// One slot in the begin-invoke parameter protocol.
///
/// Every handle shape honors the same ordering:
/// `[Callback, State, p1, p2, ..., pn]`.
pub enum BeginParam {
    Callback(Option<DynamicCallback>),
    State(Option<Value>),
    Arg(Value),
}

impl fmt::Debug for BeginParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BeginParam::Callback(cb) => write!(f, "Callback(present: {})", cb.is_some()),
            BeginParam::State(st) => write!(f, "State(present: {})", st.is_some()),
            BeginParam::Arg(_) => write!(f, "Arg"),
        }
    }
}

/// Build the ordered begin-invoke parameter list.
///
/// Deterministic: `[callback, state]` followed by the positional
/// arguments in the order supplied (empty `params` yields exactly
/// `[callback, state]`).
pub fn compute_begin_invoke_params(
    callback: Option<DynamicCallback>,
    async_state: Option<Value>,
    params: &[Value],
) -> Vec<BeginParam> {
    let mut list = Vec::with_capacity(params.len() + 2);
    list.push(BeginParam::Callback(callback));
    list.push(BeginParam::State(async_state));
    list.extend(params.iter().cloned().map(BeginParam::Arg));
    list
}

/// Decompose a begin-invoke parameter list back into its parts.
///
/// Positional inverse of [`compute_begin_invoke_params`]; a list that
/// violates the protocol ordering is a structural dispatch failure.
#[allow(clippy::type_complexity)]
pub fn split_begin_invoke_params(
    list: Vec<BeginParam>,
) -> DispatchResult<(Option<DynamicCallback>, Option<Value>, Vec<Value>)> {
    let mut iter = list.into_iter();

    let callback = match iter.next() {
        Some(BeginParam::Callback(cb)) => cb,
        _ => {
            return Err(DispatchError::infrastructure(BeginProtocolError {
                index: 0,
                expected: "callback",
            }))
        }
    };
    let state = match iter.next() {
        Some(BeginParam::State(st)) => st,
        _ => {
            return Err(DispatchError::infrastructure(BeginProtocolError {
                index: 1,
                expected: "async state",
            }))
        }
    };

    let mut args = Vec::new();
    for (offset, param) in iter.enumerate() {
        match param {
            BeginParam::Arg(arg) => args.push(arg),
            _ => {
                return Err(DispatchError::infrastructure(BeginProtocolError {
                    index: offset + 2,
                    expected: "positional argument",
                }))
            }
        }
    }

    Ok((callback, state, args))
}
