//! Connection-event facade over the room registry.
//!
//! The transport layer (a WebSocket server, SSE endpoint, long-poll handler)
//! calls these on its connection events; the gateway translates them into
//! registry requests. By convention a customer joins the room named after
//! their order's id (the rendered form of [`OrderId`](crate::OrderId)) to
//! receive that order's updates.

use crate::event::OrderEvent;
use room_registry::{ConnectionId, RegistryClient, RegistryError};
use tokio::sync::mpsc;
use tracing::{debug, instrument};

/// Buffer size for each connection's outbound event channel. Events beyond
/// an undrained buffer are dropped for that connection only.
pub const EVENT_BUFFER: usize = 16;

/// Facade the transport layer drives with its connection events.
#[derive(Clone)]
pub struct Gateway {
    registry: RegistryClient<OrderEvent>,
}

impl Gateway {
    pub fn new(registry: RegistryClient<OrderEvent>) -> Self {
        Self { registry }
    }

    /// Registers a new connection; the transport drains the returned
    /// receiver and forwards each event to the client.
    #[instrument(skip(self))]
    pub async fn on_connect(
        &self,
        connection_id: ConnectionId,
    ) -> Result<mpsc::Receiver<OrderEvent>, RegistryError> {
        debug!("Connection opened");
        let (sender, receiver) = mpsc::channel(EVENT_BUFFER);
        self.registry.connect(connection_id, sender).await?;
        Ok(receiver)
    }

    /// Joins the connection to a room (typically an order id).
    #[instrument(skip(self))]
    pub async fn on_join_room(
        &self,
        connection_id: ConnectionId,
        room_id: &str,
    ) -> Result<(), RegistryError> {
        self.registry.subscribe(connection_id, room_id).await
    }

    /// Removes the connection from a room; idempotent.
    #[instrument(skip(self))]
    pub async fn on_leave_room(
        &self,
        connection_id: ConnectionId,
        room_id: &str,
    ) -> Result<(), RegistryError> {
        self.registry.unsubscribe(connection_id, room_id).await
    }

    /// Tears down every room membership of the connection; idempotent.
    #[instrument(skip(self))]
    pub async fn on_disconnect(&self, connection_id: ConnectionId) -> Result<(), RegistryError> {
        debug!("Connection closed");
        self.registry.remove_connection(connection_id).await
    }
}
