//! The runtime orchestrator for the delivery order core.

use crate::event::OrderEvent;
use crate::gateway::Gateway;
use crate::service::OrderService;
use crate::store::{MemoryStore, OrderStore};
use room_registry::{RegistryActor, RegistryClient};
use std::sync::Arc;
use tracing::{error, info};

/// Capacity of the registry actor's request queue.
const REGISTRY_QUEUE: usize = 64;

/// The assembled system: one registry actor, one order service, one gateway.
///
/// Construction order matters only in that the registry actor must be
/// spawned before anything publishes to it; the service and gateway each
/// hold a clone of the registry client, and the registry stays a single
/// explicitly-constructed instance rather than a hidden global.
///
/// # Example
///
/// ```ignore
/// let system = DeliverySystem::new();
/// let order = system.orders.create_order(customer, restaurant, items).await?;
/// let mut events = system.gateway.on_connect(conn.clone()).await?;
/// system.gateway.on_join_room(conn, &order.id.to_string()).await?;
/// system.shutdown().await?;
/// ```
pub struct DeliverySystem {
    /// The order service, shared with request handlers.
    pub orders: Arc<OrderService>,

    /// Facade for the transport layer's connection events.
    pub gateway: Gateway,

    registry: RegistryClient<OrderEvent>,
    registry_handle: tokio::task::JoinHandle<()>,
}

impl DeliverySystem {
    /// Builds the system on the in-memory store.
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryStore::new()))
    }

    /// Builds the system on a caller-provided store.
    pub fn with_store(store: Arc<dyn OrderStore>) -> Self {
        let (registry_actor, registry) = RegistryActor::new(REGISTRY_QUEUE);
        let registry_handle = tokio::spawn(registry_actor.run());

        let orders = Arc::new(OrderService::new(store, registry.clone()));
        let gateway = Gateway::new(registry.clone());

        Self {
            orders,
            gateway,
            registry,
            registry_handle,
        }
    }

    /// Gracefully shuts the system down.
    ///
    /// Dropping the service and gateway releases their registry client
    /// clones; the actor exits once its request channel has no senders left,
    /// and we await its task. Outstanding `Arc<OrderService>` clones held
    /// elsewhere will keep the registry alive and stall this call.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        drop(self.orders);
        drop(self.gateway);
        drop(self.registry);

        if let Err(e) = self.registry_handle.await {
            error!("Registry task failed: {e:?}");
            return Err(format!("registry task failed: {e:?}"));
        }

        info!("System shutdown complete.");
        Ok(())
    }
}

impl Default for DeliverySystem {
    fn default() -> Self {
        Self::new()
    }
}
