/*!
 * Registry Module
 * Concurrency-safe subscriber containers for event sources
 */

mod multi;
mod slot;
pub mod types;

pub use multi::SubscriberRegistry;
pub use slot::SubscriberSlot;
pub use types::{RegistryError, RegistryResult};
