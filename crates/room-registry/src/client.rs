//! Client handle for the registry actor.
//!
//! Holds only an mpsc sender, so it is cheap to clone and share across tasks.
//! Every method sends a request with a paired oneshot and awaits the actor's
//! answer; channel failures map to [`RegistryError::Closed`] /
//! [`RegistryError::Dropped`].

use crate::error::RegistryError;
use crate::message::RegistryRequest;
use crate::ConnectionId;
use tokio::sync::{mpsc, oneshot};

/// Async handle to a running [`RegistryActor`](crate::RegistryActor).
pub struct RegistryClient<P> {
    sender: mpsc::Sender<RegistryRequest<P>>,
}

impl<P> Clone for RegistryClient<P> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<P> RegistryClient<P> {
    pub fn new(sender: mpsc::Sender<RegistryRequest<P>>) -> Self {
        Self { sender }
    }

    /// Registers a connection and the channel its events are pushed into.
    pub async fn connect(
        &self,
        connection_id: ConnectionId,
        sender: mpsc::Sender<P>,
    ) -> Result<(), RegistryError> {
        self.request(|respond_to| RegistryRequest::Connect {
            connection_id,
            sender,
            respond_to,
        })
        .await
    }

    /// Joins a room; idempotent.
    pub async fn subscribe(
        &self,
        connection_id: ConnectionId,
        room: impl Into<String>,
    ) -> Result<(), RegistryError> {
        let room = room.into();
        self.request(|respond_to| RegistryRequest::Subscribe {
            connection_id,
            room,
            respond_to,
        })
        .await
    }

    /// Leaves a room; idempotent.
    pub async fn unsubscribe(
        &self,
        connection_id: ConnectionId,
        room: impl Into<String>,
    ) -> Result<(), RegistryError> {
        let room = room.into();
        self.request(|respond_to| RegistryRequest::Unsubscribe {
            connection_id,
            room,
            respond_to,
        })
        .await
    }

    /// Fans `payload` out to the room's current subscribers and returns how
    /// many of them it was handed to. Zero is a valid outcome, not an error.
    pub async fn publish(
        &self,
        room: impl Into<String>,
        payload: P,
    ) -> Result<usize, RegistryError> {
        let room = room.into();
        self.request(|respond_to| RegistryRequest::Publish {
            room,
            payload,
            respond_to,
        })
        .await
    }

    /// Drops a connection from every room it joined; idempotent.
    pub async fn remove_connection(
        &self,
        connection_id: ConnectionId,
    ) -> Result<(), RegistryError> {
        self.request(|respond_to| RegistryRequest::RemoveConnection {
            connection_id,
            respond_to,
        })
        .await
    }

    async fn request<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<Result<T, RegistryError>>) -> RegistryRequest<P>,
    ) -> Result<T, RegistryError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(make(respond_to))
            .await
            .map_err(|_| RegistryError::Closed)?;
        response.await.map_err(|_| RegistryError::Dropped)?
    }
}
