//! Error types for the room registry.
//!
//! These cover the messaging plumbing only. Domain-level outcomes that are
//! not errors by contract (publishing to an empty room, unsubscribing a
//! connection that never subscribed) are plain no-ops and never surface here.

use crate::ConnectionId;

/// Errors that can occur when talking to the registry actor.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// The actor's request channel is closed (system shut down).
    #[error("registry closed")]
    Closed,

    /// The actor dropped the response channel before answering.
    #[error("registry dropped response channel")]
    Dropped,

    /// The referenced connection is not registered (never connected, or
    /// already disconnected).
    #[error("unknown connection: {0}")]
    UnknownConnection(ConnectionId),
}
