/*!
 * Dispatch Core Library
 * Arity-erased callable dispatch, asynchronous invocation, and
 * subscriber registries for event sources
 */

pub mod core;
pub mod dispatch;
pub mod events;
pub mod exec;
pub mod handle;
pub mod registry;

// Re-exports
pub use crate::core::errors::{
    ArgumentTypeError, BeginProtocolError, DispatchError, DispatchResult,
};
pub use crate::core::types::{fault, value, value_ref, Fault, FaultResult, HandleId, Value};
pub use dispatch::{
    compute_begin_invoke_params, split_begin_invoke_params, BeginParam, DynamicAsyncInvoker,
    DynamicCallback, DynamicInvoker,
};
pub use events::{EventHub, EventSource, UnicastEvent};
pub use exec::{
    default_pool, set_default_pool, AsyncError, AsyncExecutor, AsyncResult, CallerThread,
    CompletionCallback, PoolConfig, PoolError, PoolStatsSnapshot, Spawn, ThreadPool,
};
pub use handle::Handle;
pub use registry::{RegistryError, SubscriberRegistry, SubscriberSlot};
