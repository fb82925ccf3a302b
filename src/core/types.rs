/*!
 * Core Types
 * Common vocabulary shared across the dispatch subsystems
 */

use std::any::Any;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// Dynamically typed argument or produced value.
///
/// Arguments cross the arity-erased dispatch boundary as shared `Any`
/// values; typed handle bodies downcast them back to concrete types.
pub type Value = Arc<dyn Any + Send + Sync>;

/// Business failure raised by a handle body.
///
/// Shared so the same failure instance can be re-raised from every
/// `end()` call on a completed async result.
pub type Fault = Arc<dyn Error + Send + Sync + 'static>;

/// Result type for handle bodies (domain logic only)
pub type FaultResult<T> = Result<T, Fault>;

/// Unique handle identifier
pub type HandleId = u64;

/// Wrap a concrete value for the dynamic dispatch boundary
pub fn value<T: Any + Send + Sync>(v: T) -> Value {
    Arc::new(v)
}

/// Downcast a dynamic value back to a concrete reference
pub fn value_ref<T: Any>(v: &Value) -> Option<&T> {
    v.downcast_ref::<T>()
}

/// Plain-message fault for callers without a richer error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaultMessage(pub String);

impl fmt::Display for FaultMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Error for FaultMessage {}

/// Build a plain-message fault
pub fn fault(msg: impl Into<String>) -> Fault {
    Arc::new(FaultMessage(msg.into()))
}
