/*!
 * Event Sources
 * Multicast and unicast signal sources over the subscriber containers
 */

use crate::core::errors::DispatchResult;
use crate::core::types::Value;
use crate::dispatch::DynamicInvoker;
use crate::handle::Handle;
use crate::registry::{RegistryResult, SubscriberRegistry, SubscriberSlot};
use log::debug;

/// Multicast event source.
///
/// Subscribers are invoked synchronously on the raising thread, through
/// the arity-checked dispatch path. Fan-out order is unspecified; the
/// first failure aborts the remaining notifications and propagates
/// (isolation between subscribers is deliberately not provided here).
pub struct EventSource {
    subscribers: SubscriberRegistry<Handle>,
}

impl EventSource {
    pub fn new() -> Self {
        Self {
            subscribers: SubscriberRegistry::new(),
        }
    }

    /// Add a subscriber handle (duplicate subscription is a no-op)
    pub fn subscribe(&self, handle: Handle) {
        self.subscribers.subscribe(handle);
    }

    /// Remove a subscriber handle (absent handle is a no-op)
    pub fn unsubscribe(&self, handle: &Handle) {
        self.subscribers.unsubscribe(handle);
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    /// Fire the event, invoking every subscriber with `args`.
    ///
    /// Returns the number of subscribers notified.
    pub fn raise(&self, args: &[Value]) -> DispatchResult<usize> {
        let mut notified = 0;
        self.subscribers.try_for_each(|handle| {
            DynamicInvoker::new(handle.clone()).dynamic_invoke(args)?;
            notified += 1;
            Ok(())
        })?;
        debug!("Event raised to {} subscriber(s)", notified);
        Ok(notified)
    }
}

impl Default for EventSource {
    fn default() -> Self {
        Self::new()
    }
}

/// Unicast event source: at most one subscriber.
///
/// Raising with no subscriber is a no-op; raising with a subscriber
/// yields whatever value that handle produces.
pub struct UnicastEvent {
    slot: SubscriberSlot<Handle>,
}

impl UnicastEvent {
    pub fn new() -> Self {
        Self {
            slot: SubscriberSlot::new(),
        }
    }

    /// Occupy the slot (strict occupancy contract, see [`SubscriberSlot`])
    pub fn subscribe(&self, handle: Handle) -> RegistryResult<()> {
        self.slot.subscribe(handle)
    }

    /// Clear the slot (only the occupant may unsubscribe)
    pub fn unsubscribe(&self, handle: &Handle) -> RegistryResult<()> {
        self.slot.unsubscribe(handle)
    }

    /// The current subscriber, if any
    pub fn subscriber(&self) -> Option<Handle> {
        self.slot.subscriber()
    }

    /// Fire the event; `None` when no subscriber is present or the
    /// occupant produces no value
    pub fn raise(&self, args: &[Value]) -> DispatchResult<Option<Value>> {
        match self.slot.subscriber() {
            Some(handle) => DynamicInvoker::new(handle).dynamic_invoke(args),
            None => Ok(None),
        }
    }
}

impl Default for UnicastEvent {
    fn default() -> Self {
        Self::new()
    }
}
