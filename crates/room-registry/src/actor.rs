//! The registry actor: single owner of the room↔subscriber mapping.
//!
//! One task owns the maps and processes requests sequentially, so concurrent
//! subscribes, publishes, and disconnects can never corrupt or lose an entry,
//! and every subscriber of a room observes publishes in queue order.

use crate::client::RegistryClient;
use crate::error::RegistryError;
use crate::message::RegistryRequest;
use crate::ConnectionId;
use std::collections::{HashMap, HashSet};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, info, warn};

/// Per-connection bookkeeping held by the actor.
///
/// `joined_rooms` mirrors the room sets so a disconnect can tear down every
/// membership without scanning all rooms.
struct Session<P> {
    sender: mpsc::Sender<P>,
    joined_rooms: HashSet<String>,
}

/// The notification hub actor.
///
/// Owns `rooms` (room key → member connections) and `sessions` (connection →
/// outbound channel + joined rooms) and mutates them only from its own run
/// loop. Rooms are created on first subscribe and removed as soon as their
/// member set empties, so churning subscribers cannot grow the map without
/// bound.
pub struct RegistryActor<P> {
    receiver: mpsc::Receiver<RegistryRequest<P>>,
    rooms: HashMap<String, HashSet<ConnectionId>>,
    sessions: HashMap<ConnectionId, Session<P>>,
}

impl<P: Clone + Send + 'static> RegistryActor<P> {
    /// Creates a registry actor and its client handle.
    ///
    /// `buffer_size` is the capacity of the request channel; callers wait
    /// when it is full.
    pub fn new(buffer_size: usize) -> (Self, RegistryClient<P>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            rooms: HashMap::new(),
            sessions: HashMap::new(),
        };
        (actor, RegistryClient::new(sender))
    }

    /// Runs the actor's event loop until every client handle is dropped.
    pub async fn run(mut self) {
        info!("Registry started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                RegistryRequest::Connect {
                    connection_id,
                    sender,
                    respond_to,
                } => {
                    // A replaced session loses its memberships; the transport
                    // re-joins rooms after a reconnect.
                    if self.drop_memberships(&connection_id) {
                        warn!(%connection_id, "Reconnect replaced an existing session");
                    }
                    self.sessions.insert(
                        connection_id.clone(),
                        Session {
                            sender,
                            joined_rooms: HashSet::new(),
                        },
                    );
                    info!(%connection_id, sessions = self.sessions.len(), "Connected");
                    let _ = respond_to.send(Ok(()));
                }
                RegistryRequest::Subscribe {
                    connection_id,
                    room,
                    respond_to,
                } => {
                    let result = match self.sessions.get_mut(&connection_id) {
                        Some(session) => {
                            let added = session.joined_rooms.insert(room.clone());
                            self.rooms
                                .entry(room.clone())
                                .or_default()
                                .insert(connection_id.clone());
                            debug!(%connection_id, room, added, "Subscribe");
                            Ok(())
                        }
                        None => {
                            warn!(%connection_id, room, "Subscribe from unknown connection");
                            Err(RegistryError::UnknownConnection(connection_id))
                        }
                    };
                    let _ = respond_to.send(result);
                }
                RegistryRequest::Unsubscribe {
                    connection_id,
                    room,
                    respond_to,
                } => {
                    if let Some(session) = self.sessions.get_mut(&connection_id) {
                        session.joined_rooms.remove(&room);
                    }
                    self.leave_room(&room, &connection_id);
                    debug!(%connection_id, room, "Unsubscribe");
                    let _ = respond_to.send(Ok(()));
                }
                RegistryRequest::Publish {
                    room,
                    payload,
                    respond_to,
                } => {
                    let delivered = self.fan_out(&room, payload);
                    debug!(room, delivered, "Publish");
                    let _ = respond_to.send(Ok(delivered));
                }
                RegistryRequest::RemoveConnection {
                    connection_id,
                    respond_to,
                } => {
                    let known = self.drop_memberships(&connection_id);
                    if known {
                        info!(%connection_id, sessions = self.sessions.len(), "Disconnected");
                    } else {
                        debug!(%connection_id, "Disconnect for unknown connection");
                    }
                    let _ = respond_to.send(Ok(()));
                }
            }
        }

        info!(
            sessions = self.sessions.len(),
            rooms = self.rooms.len(),
            "Registry shutdown"
        );
    }

    /// Hands one clone of `payload` to every live subscriber of `room`.
    ///
    /// Delivery per subscriber is independent: a full outbound buffer drops
    /// the event for that subscriber only, and a closed channel prunes the
    /// whole session. Returns the number of successful hand-offs.
    fn fan_out(&mut self, room: &str, payload: P) -> usize {
        let members: Vec<ConnectionId> = match self.rooms.get(room) {
            Some(members) => members.iter().cloned().collect(),
            None => return 0,
        };

        let mut delivered = 0;
        let mut dead = Vec::new();
        for connection_id in members {
            let Some(session) = self.sessions.get(&connection_id) else {
                continue;
            };
            match session.sender.try_send(payload.clone()) {
                Ok(()) => delivered += 1,
                Err(TrySendError::Full(_)) => {
                    // Slow consumer: drop this event for it, keep fanning out.
                    warn!(%connection_id, room, "Subscriber lagging, event dropped");
                }
                Err(TrySendError::Closed(_)) => dead.push(connection_id),
            }
        }

        for connection_id in dead {
            debug!(%connection_id, room, "Pruning dead subscriber");
            self.drop_memberships(&connection_id);
        }
        delivered
    }

    /// Removes `connection_id` from every room it joined and forgets the
    /// session. Returns whether the connection was known.
    fn drop_memberships(&mut self, connection_id: &ConnectionId) -> bool {
        let Some(session) = self.sessions.remove(connection_id) else {
            return false;
        };
        for room in &session.joined_rooms {
            self.leave_room(room, connection_id);
        }
        true
    }

    /// Removes one membership, garbage-collecting the room if it empties.
    fn leave_room(&mut self, room: &str, connection_id: &ConnectionId) {
        if let Some(members) = self.rooms.get_mut(room) {
            members.remove(connection_id);
            if members.is_empty() {
                self.rooms.remove(room);
            }
        }
    }
}
