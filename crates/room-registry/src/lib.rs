//! # Room Registry
//!
//! A transport-agnostic, in-process notification hub. Connections join named
//! **rooms** (opaque string keys), and anything published to a room is fanned
//! out to every connection subscribed at that moment.
//!
//! ## Design
//!
//! The room↔subscriber mapping is the one long-lived piece of shared mutable
//! state in a notification path, so it is owned by a single actor task
//! ([`RegistryActor`]) that processes requests sequentially from an mpsc
//! queue. No locks, no lost updates: every subscribe, unsubscribe, publish,
//! and disconnect is serialized through the same queue, which also means all
//! subscribers of a room observe publishes in the same relative order.
//!
//! The registry never talks to a socket. Each connection registers an
//! outbound [`tokio::sync::mpsc::Sender`] at connect time; the transport layer
//! (WebSocket, SSE, whatever) drains the paired receiver. Delivery uses
//! `try_send`, so a slow or dead consumer is dropped-and-continued rather than
//! stalling the fan-out to everyone else.
//!
//! ## Usage
//!
//! ```rust
//! use room_registry::{ConnectionId, RegistryActor};
//! use tokio::sync::mpsc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, registry) = RegistryActor::<String>::new(32);
//!     tokio::spawn(actor.run());
//!
//!     let conn = ConnectionId::from("conn_1");
//!     let (tx, mut rx) = mpsc::channel(16);
//!     registry.connect(conn.clone(), tx).await.unwrap();
//!     registry.subscribe(conn.clone(), "order_1").await.unwrap();
//!
//!     let delivered = registry.publish("order_1", "READY".to_string()).await.unwrap();
//!     assert_eq!(delivered, 1);
//!     assert_eq!(rx.recv().await.unwrap(), "READY");
//!
//!     registry.remove_connection(conn).await.unwrap();
//! }
//! ```
//!
//! ## Delivery semantics
//!
//! At-most-once, no replay: a payload reaches exactly the connections
//! subscribed when `publish` is processed. Late joiners get nothing, dead
//! subscribers are pruned silently, and an empty room is a successful
//! zero-delivery no-op. Clients that need the current state after a gap
//! re-fetch it from the system of record instead.

pub mod actor;
pub mod client;
pub mod error;
pub mod message;

pub use actor::RegistryActor;
pub use client::RegistryClient;
pub use error::RegistryError;
pub use message::{RegistryRequest, Response};

use std::fmt::Display;

/// Unique identifier for a live client connection, assigned by the transport.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectionId(pub String);

impl From<&str> for ConnectionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ConnectionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
