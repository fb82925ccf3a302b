/*!
 * Callable Handle
 * Arity-erased callable capability built from typed closures
 */

use crate::core::errors::{ArgumentTypeError, DispatchError, DispatchResult};
use crate::core::types::{FaultResult, HandleId, Value};
use log::debug;
use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_HANDLE_ID: AtomicU64 = AtomicU64::new(1);

type Body0 = Arc<dyn Fn() -> DispatchResult<Option<Value>> + Send + Sync>;
type Body1 = Arc<dyn Fn(&Value) -> DispatchResult<Option<Value>> + Send + Sync>;
type Body2 = Arc<dyn Fn(&Value, &Value) -> DispatchResult<Option<Value>> + Send + Sync>;
type Body3 = Arc<dyn Fn(&Value, &Value, &Value) -> DispatchResult<Option<Value>> + Send + Sync>;
type Body4 =
    Arc<dyn Fn(&Value, &Value, &Value, &Value) -> DispatchResult<Option<Value>> + Send + Sync>;

/// Tagged variant over the supported handle shapes.
///
/// Dispatch is a variant match, not a runtime lookup, so "the handle
/// cannot be reached" is impossible by construction; the only structural
/// failure left is an argument-type mismatch inside a body.
#[derive(Clone)]
enum HandleBody {
    Nullary(Body0),
    Unary(Body1),
    Binary(Body2),
    Ternary(Body3),
    Quaternary(Body4),
}

impl HandleBody {
    fn arity(&self) -> usize {
        match self {
            HandleBody::Nullary(_) => 0,
            HandleBody::Unary(_) => 1,
            HandleBody::Binary(_) => 2,
            HandleBody::Ternary(_) => 3,
            HandleBody::Quaternary(_) => 4,
        }
    }
}

/// An opaque callable capability with a declared arity and an optional
/// produced value.
///
/// Cheap to clone (`Arc` internals); equality is identity, never a deep
/// comparison of bodies.
#[derive(Clone)]
pub struct Handle {
    id: HandleId,
    produces_value: bool,
    body: HandleBody,
}

fn arg<T>(v: &Value, index: usize) -> DispatchResult<T>
where
    T: Any + Send + Sync + Clone,
{
    v.downcast_ref::<T>().cloned().ok_or_else(|| {
        DispatchError::infrastructure(ArgumentTypeError {
            index,
            expected: std::any::type_name::<T>(),
        })
    })
}

fn produced<R: Any + Send + Sync>(r: R) -> Option<Value> {
    Some(Arc::new(r) as Value)
}

impl Handle {
    fn new(produces_value: bool, body: HandleBody) -> Self {
        let id = NEXT_HANDLE_ID.fetch_add(1, Ordering::SeqCst);
        debug!(
            "Created handle {} (arity {}, produces_value: {})",
            id,
            body.arity(),
            produces_value
        );
        Self {
            id,
            produces_value,
            body,
        }
    }

    /// Zero-argument handle with no produced value
    pub fn action0<F>(f: F) -> Self
    where
        F: Fn() -> FaultResult<()> + Send + Sync + 'static,
    {
        Self::new(
            false,
            HandleBody::Nullary(Arc::new(move || {
                f().map_err(DispatchError::Fault)?;
                Ok(None)
            })),
        )
    }

    /// One-argument handle with no produced value
    pub fn action1<A, F>(f: F) -> Self
    where
        A: Any + Send + Sync + Clone,
        F: Fn(A) -> FaultResult<()> + Send + Sync + 'static,
    {
        Self::new(
            false,
            HandleBody::Unary(Arc::new(move |a| {
                f(arg::<A>(a, 0)?).map_err(DispatchError::Fault)?;
                Ok(None)
            })),
        )
    }

    /// Two-argument handle with no produced value
    pub fn action2<A, B, F>(f: F) -> Self
    where
        A: Any + Send + Sync + Clone,
        B: Any + Send + Sync + Clone,
        F: Fn(A, B) -> FaultResult<()> + Send + Sync + 'static,
    {
        Self::new(
            false,
            HandleBody::Binary(Arc::new(move |a, b| {
                f(arg::<A>(a, 0)?, arg::<B>(b, 1)?).map_err(DispatchError::Fault)?;
                Ok(None)
            })),
        )
    }

    /// Three-argument handle with no produced value
    pub fn action3<A, B, C, F>(f: F) -> Self
    where
        A: Any + Send + Sync + Clone,
        B: Any + Send + Sync + Clone,
        C: Any + Send + Sync + Clone,
        F: Fn(A, B, C) -> FaultResult<()> + Send + Sync + 'static,
    {
        Self::new(
            false,
            HandleBody::Ternary(Arc::new(move |a, b, c| {
                f(arg::<A>(a, 0)?, arg::<B>(b, 1)?, arg::<C>(c, 2)?)
                    .map_err(DispatchError::Fault)?;
                Ok(None)
            })),
        )
    }

    /// Four-argument handle with no produced value
    pub fn action4<A, B, C, D, F>(f: F) -> Self
    where
        A: Any + Send + Sync + Clone,
        B: Any + Send + Sync + Clone,
        C: Any + Send + Sync + Clone,
        D: Any + Send + Sync + Clone,
        F: Fn(A, B, C, D) -> FaultResult<()> + Send + Sync + 'static,
    {
        Self::new(
            false,
            HandleBody::Quaternary(Arc::new(move |a, b, c, d| {
                f(
                    arg::<A>(a, 0)?,
                    arg::<B>(b, 1)?,
                    arg::<C>(c, 2)?,
                    arg::<D>(d, 3)?,
                )
                .map_err(DispatchError::Fault)?;
                Ok(None)
            })),
        )
    }

    /// Zero-argument handle producing a value
    pub fn func0<R, F>(f: F) -> Self
    where
        R: Any + Send + Sync,
        F: Fn() -> FaultResult<R> + Send + Sync + 'static,
    {
        Self::new(
            true,
            HandleBody::Nullary(Arc::new(move || {
                let r = f().map_err(DispatchError::Fault)?;
                Ok(produced(r))
            })),
        )
    }

    /// One-argument handle producing a value
    pub fn func1<A, R, F>(f: F) -> Self
    where
        A: Any + Send + Sync + Clone,
        R: Any + Send + Sync,
        F: Fn(A) -> FaultResult<R> + Send + Sync + 'static,
    {
        Self::new(
            true,
            HandleBody::Unary(Arc::new(move |a| {
                let r = f(arg::<A>(a, 0)?).map_err(DispatchError::Fault)?;
                Ok(produced(r))
            })),
        )
    }

    /// Two-argument handle producing a value
    pub fn func2<A, B, R, F>(f: F) -> Self
    where
        A: Any + Send + Sync + Clone,
        B: Any + Send + Sync + Clone,
        R: Any + Send + Sync,
        F: Fn(A, B) -> FaultResult<R> + Send + Sync + 'static,
    {
        Self::new(
            true,
            HandleBody::Binary(Arc::new(move |a, b| {
                let r = f(arg::<A>(a, 0)?, arg::<B>(b, 1)?).map_err(DispatchError::Fault)?;
                Ok(produced(r))
            })),
        )
    }

    /// Three-argument handle producing a value
    pub fn func3<A, B, C, R, F>(f: F) -> Self
    where
        A: Any + Send + Sync + Clone,
        B: Any + Send + Sync + Clone,
        C: Any + Send + Sync + Clone,
        R: Any + Send + Sync,
        F: Fn(A, B, C) -> FaultResult<R> + Send + Sync + 'static,
    {
        Self::new(
            true,
            HandleBody::Ternary(Arc::new(move |a, b, c| {
                let r = f(arg::<A>(a, 0)?, arg::<B>(b, 1)?, arg::<C>(c, 2)?)
                    .map_err(DispatchError::Fault)?;
                Ok(produced(r))
            })),
        )
    }

    /// Four-argument handle producing a value
    pub fn func4<A, B, C, D, R, F>(f: F) -> Self
    where
        A: Any + Send + Sync + Clone,
        B: Any + Send + Sync + Clone,
        C: Any + Send + Sync + Clone,
        D: Any + Send + Sync + Clone,
        R: Any + Send + Sync,
        F: Fn(A, B, C, D) -> FaultResult<R> + Send + Sync + 'static,
    {
        Self::new(
            true,
            HandleBody::Quaternary(Arc::new(move |a, b, c, d| {
                let r = f(
                    arg::<A>(a, 0)?,
                    arg::<B>(b, 1)?,
                    arg::<C>(c, 2)?,
                    arg::<D>(d, 3)?,
                )
                .map_err(DispatchError::Fault)?;
                Ok(produced(r))
            })),
        )
    }

    /// Unique identifier for this handle
    pub fn id(&self) -> HandleId {
        self.id
    }

    /// Declared positional argument count
    pub fn arity(&self) -> usize {
        self.body.arity()
    }

    /// True when invoking this handle produces a value
    pub fn produces_value(&self) -> bool {
        self.produces_value
    }

    /// Invoke the handle with a dynamic argument list.
    ///
    /// Arguments are forwarded positionally, in the order supplied.
    pub fn invoke(&self, args: &[Value]) -> DispatchResult<Option<Value>> {
        match (&self.body, args) {
            (HandleBody::Nullary(f), []) => f(),
            (HandleBody::Unary(f), [a]) => f(a),
            (HandleBody::Binary(f), [a, b]) => f(a, b),
            (HandleBody::Ternary(f), [a, b, c]) => f(a, b, c),
            (HandleBody::Quaternary(f), [a, b, c, d]) => f(a, b, c, d),
            _ => Err(DispatchError::ArityMismatch {
                expected: self.arity(),
                actual: args.len(),
            }),
        }
    }
}

// Identity equality: a handle is a capability, not a comparable value
impl PartialEq for Handle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Handle {}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("id", &self.id)
            .field("arity", &self.arity())
            .field("produces_value", &self.produces_value)
            .finish()
    }
}
