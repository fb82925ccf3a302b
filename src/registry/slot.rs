/*!
 * Subscriber Slot
 * At-most-one subscriber with a strict occupancy contract
 */

use super::types::{RegistryError, RegistryResult};
use log::debug;
use parking_lot::Mutex;

/// Single-subscriber container.
///
/// Occupancy changes are atomic with respect to concurrent callers: the
/// check and the swap happen under one lock, so there are no lost
/// updates and never double occupancy.
pub struct SubscriberSlot<T> {
    occupant: Mutex<Option<T>>,
}

impl<T> SubscriberSlot<T>
where
    T: PartialEq + Clone,
{
    pub fn new() -> Self {
        Self {
            occupant: Mutex::new(None),
        }
    }

    /// Occupy the slot.
    ///
    /// Re-subscribing the current occupant is a no-op; a different
    /// subscriber while occupied is a contract violation.
    pub fn subscribe(&self, subscriber: T) -> RegistryResult<()> {
        let mut occupant = self.occupant.lock();
        match &*occupant {
            Some(current) if *current == subscriber => Ok(()),
            Some(_) => Err(RegistryError::AlreadySubscribed),
            None => {
                *occupant = Some(subscriber);
                debug!("Slot occupied");
                Ok(())
            }
        }
    }

    /// Clear the slot.
    ///
    /// Fails unless `subscriber` is the current occupant (an empty slot
    /// also fails).
    pub fn unsubscribe(&self, subscriber: &T) -> RegistryResult<()> {
        let mut occupant = self.occupant.lock();
        match &*occupant {
            Some(current) if current == subscriber => {
                *occupant = None;
                debug!("Slot cleared");
                Ok(())
            }
            _ => Err(RegistryError::NotSubscribed),
        }
    }

    /// The current occupant, if any
    pub fn subscriber(&self) -> Option<T> {
        self.occupant.lock().clone()
    }

    pub fn is_occupied(&self) -> bool {
        self.occupant.lock().is_some()
    }
}

impl<T> Default for SubscriberSlot<T>
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
    fn test_subscribe_then_different_subscriber_fails() {
        let slot = SubscriberSlot::new();
        slot.subscribe("a").unwrap();
        assert_eq!(slot.subscribe("b"), Err(RegistryError::AlreadySubscribed));
        assert_eq!(slot.subscriber(), Some("a"));
    }

    #[test]
    fn test_resubscribing_occupant_is_noop() {
        let slot = SubscriberSlot::new();
        slot.subscribe("a").unwrap();
        assert!(slot.subscribe("a").is_ok());
        assert_eq!(slot.subscriber(), Some("a"));
    }

    #[test]
    fn test_unsubscribe_wrong_occupant_fails() {
        let slot = SubscriberSlot::new();
        slot.subscribe("a").unwrap();
        assert_eq!(slot.unsubscribe(&"b"), Err(RegistryError::NotSubscribed));
        assert_eq!(slot.subscriber(), Some("a"));
    }

    #[test]
    fn test_unsubscribe_empty_slot_fails() {
        let slot = SubscriberSlot::<&str>::new();
        assert_eq!(slot.unsubscribe(&"a"), Err(RegistryError::NotSubscribed));
    }

    #[test]
    fn test_concurrent_subscribe_single_winner() {
        let slot = Arc::new(SubscriberSlot::new());
        let mut handles = Vec::new();
        for i in 0..8 {
            let slot = slot.clone();
            handles.push(thread::spawn(move || slot.subscribe(i).is_ok()));
        }
        let winners = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();
        assert_eq!(winners, 1);
        assert!(slot.is_occupied());
    }
}
