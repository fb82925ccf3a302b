/*!
 * Events Module
 * Signal sources built atop the subscriber containers
 */

mod hub;
mod source;

pub use hub::EventHub;
pub use source::{EventSource, UnicastEvent};
