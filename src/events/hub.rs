/*!
 * Event Hub
 * Named event sources, created on first use
 */

use super::source::EventSource;
use crate::core::errors::DispatchResult;
use crate::core::types::Value;
use ahash::RandomState;
use dashmap::DashMap;
use log::debug;
use std::sync::Arc;

/// Concurrent map of named multicast sources.
///
/// Sources are created lazily on first lookup and shared; raising an
/// unknown name notifies nobody rather than failing.
pub struct EventHub {
    sources: DashMap<String, Arc<EventSource>, RandomState>,
}

impl EventHub {
    pub fn new() -> Self {
        Self {
            sources: DashMap::with_hasher(RandomState::new()),
        }
    }

    /// The source registered under `name`, created on first use
    pub fn source(&self, name: &str) -> Arc<EventSource> {
        self.sources
            .entry(name.to_string())
            .or_insert_with(|| {
                debug!("Created event source '{}'", name);
                Arc::new(EventSource::new())
            })
            .clone()
    }

    /// Fire the named event; returns the number of subscribers notified
    /// (zero when the name is unknown)
    pub fn raise(&self, name: &str, args: &[Value]) -> DispatchResult<usize> {
        match self.sources.get(name) {
            Some(source) => source.raise(args),
            None => Ok(0),
        }
    }

    /// Drop the named source and all of its subscriptions
    pub fn remove(&self, name: &str) -> bool {
        let removed = self.sources.remove(name).is_some();
        if removed {
            debug!("Removed event source '{}'", name);
        }
        removed
    }

    /// Registered source names (unspecified order)
    pub fn names(&self) -> Vec<String> {
        self.sources.iter().map(|e| e.key().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl Default for EventHub {
    fn default() -> Self {
        Self::new()
    }
}
