/*!
 * Subscriber Registry
 * Deduplicated multi-subscriber set with snapshot iteration
 */

use log::debug;
use parking_lot::RwLock;

/// Concurrency-safe subscriber set.
///
/// Membership is deduplicated by value equality and order-irrelevant.
/// Iteration works on a snapshot taken under the read lock, so
/// concurrent subscribe/unsubscribe never disturbs an in-flight visit
/// and a visitor may re-enter the registry without deadlocking.
/// Invocation and ordering policy belong to the event source, not here.
pub struct SubscriberRegistry<T> {
    subscribers: RwLock<Vec<T>>,
}

impl<T> SubscriberRegistry<T>
where
    T: PartialEq + Clone,
{
    pub fn new() -> Self {
        Self {
            subscribers: RwLock::new(Vec::new()),
        }
    }

    /// Add a subscriber. Adding an equal subscriber again is a no-op.
    pub fn subscribe(&self, subscriber: T) {
        let mut subscribers = self.subscribers.write();
        if !subscribers.contains(&subscriber) {
            subscribers.push(subscriber);
            debug!("Subscriber added ({} total)", subscribers.len());
        }
    }

    /// Remove a subscriber. Removing an absent subscriber is a no-op.
    pub fn unsubscribe(&self, subscriber: &T) {
        let mut subscribers = self.subscribers.write();
        if let Some(index) = subscribers.iter().position(|s| s == subscriber) {
            subscribers.swap_remove(index);
            debug!("Subscriber removed ({} remaining)", subscribers.len());
        }
    }

    /// True when an equal subscriber is present
    pub fn contains(&self, subscriber: &T) -> bool {
        self.subscribers.read().contains(subscriber)
    }

    pub fn len(&self) -> usize {
        self.subscribers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.read().is_empty()
    }

    /// Clone of the current membership
    pub fn snapshot(&self) -> Vec<T> {
        self.subscribers.read().clone()
    }

    /// Visit each currently subscribed element.
    ///
    /// Visits a snapshot consistent with membership at call time; order
    /// is unspecified.
    pub fn for_each<F>(&self, mut visitor: F)
    where
        F: FnMut(&T),
    {
        for subscriber in self.snapshot() {
            visitor(&subscriber);
        }
    }

    /// Visit each subscriber with a fallible visitor.
    ///
    /// The first error aborts the remaining visits and propagates; the
    /// registry provides no isolation between subscribers.
    pub fn try_for_each<F, E>(&self, mut visitor: F) -> Result<(), E>
    where
        F: FnMut(&T) -> Result<(), E>,
    {
        for subscriber in self.snapshot() {
            visitor(&subscriber)?;
        }
        Ok(())
    }
}

impl<T> Default for SubscriberRegistry<T>
where
    T: PartialEq + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_subscribe_deduplicates() {
        let registry = SubscriberRegistry::new();
        registry.subscribe("a");
        registry.subscribe("a");
        assert_eq!(registry.len(), 1);
        registry.unsubscribe(&"a");
        assert!(registry.is_empty());
    }

    #[test]
    fn test_unsubscribe_absent_is_noop() {
        let registry = SubscriberRegistry::<&str>::new();
        registry.unsubscribe(&"ghost");
        assert!(registry.is_empty());
    }

    #[test]
    fn test_visitor_error_aborts_remaining_visits() {
        let registry = SubscriberRegistry::new();
        registry.subscribe(1);
        registry.subscribe(2);
        registry.subscribe(3);

        let mut visited = 0;
        let outcome: Result<(), &str> = registry.try_for_each(|_| {
            visited += 1;
            if visited == 2 {
                Err("stop")
            } else {
                Ok(())
            }
        });
        assert_eq!(outcome, Err("stop"));
        assert_eq!(visited, 2);
    }

    #[test]
    fn test_visitor_may_mutate_registry() {
        let registry = Arc::new(SubscriberRegistry::new());
        registry.subscribe(1);
        registry.subscribe(2);

        let inner = registry.clone();
        let mut seen = 0;
        registry.for_each(|_| {
            seen += 1;
            inner.subscribe(99); // must not deadlock or disturb this visit
        });
        assert_eq!(seen, 2);
        assert!(registry.contains(&99));
    }

    #[test]
    fn test_concurrent_subscribe_unsubscribe() {
        let registry = Arc::new(SubscriberRegistry::new());
        let mut handles = Vec::new();
        for i in 0..8 {
            let registry = registry.clone();
            handles.push(thread::spawn(move || {
                for round in 0..100 {
                    registry.subscribe((i, round % 4));
                    registry.for_each(|_| {});
                    registry.unsubscribe(&(i, round % 4));
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
        assert!(registry.is_empty());
    }
}
