/*!
 * Dispatch Module
 * Synchronous and asynchronous arity-erased invocation
 */

mod async_invoker;
mod begin;
mod invoker;

pub use async_invoker::DynamicAsyncInvoker;
pub use begin::{
    compute_begin_invoke_params, split_begin_invoke_params, BeginParam, DynamicCallback,
};
pub use invoker::DynamicInvoker;
