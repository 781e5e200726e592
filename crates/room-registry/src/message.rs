//! Request messages exchanged between [`RegistryClient`](crate::RegistryClient)
//! and [`RegistryActor`](crate::RegistryActor).
//!
//! Every request carries a oneshot `respond_to` channel so the caller can
//! await the outcome without the actor ever blocking on a reply.

use crate::error::RegistryError;
use crate::ConnectionId;
use tokio::sync::{mpsc, oneshot};

/// One-shot response channel used by the registry actor.
pub type Response<T> = oneshot::Sender<Result<T, RegistryError>>;

/// Operations the registry actor serializes through its queue.
///
/// `P` is the event payload type fanned out to subscribers; the registry
/// treats it as opaque and only requires `Clone` to hand one copy to each
/// subscriber of a room.
#[derive(Debug)]
pub enum RegistryRequest<P> {
    /// Register a connection and the outbound channel events are pushed into.
    /// Reconnecting with an existing id replaces the previous channel.
    Connect {
        connection_id: ConnectionId,
        sender: mpsc::Sender<P>,
        respond_to: Response<()>,
    },
    /// Join a room. Idempotent; already-subscribed is a no-op.
    Subscribe {
        connection_id: ConnectionId,
        room: String,
        respond_to: Response<()>,
    },
    /// Leave a room. Idempotent; never-subscribed is a no-op.
    Unsubscribe {
        connection_id: ConnectionId,
        room: String,
        respond_to: Response<()>,
    },
    /// Fan a payload out to every current subscriber of `room`; responds
    /// with the number of subscribers the payload was handed to.
    Publish {
        room: String,
        payload: P,
        respond_to: Response<usize>,
    },
    /// Drop a connection from every room it joined and forget it.
    /// Safe to send for ids that were never connected.
    RemoveConnection {
        connection_id: ConnectionId,
        respond_to: Response<()>,
    },
}
