/*!
 * Registry Types
 * Subscription contract errors
 */

use miette::Diagnostic;
use thiserror::Error;

/// Result type for subscription operations
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Subscription contract violations.
///
/// These are caller errors, surfaced synchronously and never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum RegistryError {
    #[error("slot already holds a different subscriber")]
    #[diagnostic(
        code(registry::already_subscribed),
        help("A unicast slot holds at most one subscriber. Unsubscribe the occupant first.")
    )]
    AlreadySubscribed,

    #[error("subscriber is not the slot occupant")]
    #[diagnostic(
        code(registry::not_subscribed),
        help("Only the current occupant can be unsubscribed from a unicast slot.")
    )]
    NotSubscribed,
}
