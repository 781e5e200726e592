//! Order orchestration: create, read, update-status, assign-driver.
//!
//! `OrderService` is the only writer of order state. Every mutation of one
//! order runs under that order's async mutex, so racing requests execute as
//! if one at a time in arrival order while distinct orders never wait on each
//! other. Status changes go through the lifecycle graph, are persisted, and
//! only then published to the order's room, still inside the per-order
//! critical section so room delivery order matches commit order. Publishing is
//! best-effort: failures are logged, never propagated, and never roll back
//! the write.

use crate::error::OrderError;
use crate::event::OrderEvent;
use crate::lifecycle::{validate_transition, OrderStatus};
use crate::model::{CustomerId, DriverId, LineItem, Order, OrderId, RestaurantId};
use crate::store::OrderStore;
use chrono::Utc;
use room_registry::RegistryClient;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

/// The order service.
///
/// Cheap to share behind an `Arc`; one instance per process, holding the
/// store, the notification registry handle, the id counter, and the
/// per-order lock map.
pub struct OrderService {
    store: Arc<dyn OrderStore>,
    registry: RegistryClient<OrderEvent>,
    /// One mutex per order id, created lazily on first mutation.
    locks: Mutex<HashMap<OrderId, Arc<Mutex<()>>>>,
    next_id: AtomicU64,
}

impl OrderService {
    pub fn new(store: Arc<dyn OrderStore>, registry: RegistryClient<OrderEvent>) -> Self {
        Self {
            store,
            registry,
            locks: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Creates a `PENDING` order from the customer's checkout request.
    ///
    /// `total_amount` is computed from the items, never taken from input.
    /// Fails with [`OrderError::Validation`] on empty items, zero quantity,
    /// or non-positive unit price.
    #[instrument(skip(self, items), fields(customer = %customer_id, restaurant = %restaurant_id))]
    pub async fn create_order(
        &self,
        customer_id: CustomerId,
        restaurant_id: RestaurantId,
        items: Vec<LineItem>,
    ) -> Result<Order, OrderError> {
        validate_items(&items)?;

        let id = OrderId(self.next_id.fetch_add(1, Ordering::SeqCst));
        let order = Order::new(id, customer_id, restaurant_id, items);
        self.store.insert(order.clone()).await?;
        info!(order_id = %order.id, total = order.total_amount, "Order created");
        Ok(order)
    }

    /// Loads an order; [`OrderError::NotFound`] if the id is unknown.
    #[instrument(skip(self))]
    pub async fn get_order(&self, id: &OrderId) -> Result<Order, OrderError> {
        self.store
            .load(id)
            .await?
            .ok_or_else(|| OrderError::NotFound(id.clone()))
    }

    /// Applies a status transition and notifies the order's room.
    ///
    /// The sequence under the per-order lock is load → validate → persist →
    /// publish. A rejected transition or a failed write leaves the stored
    /// order untouched and publishes nothing; a failed publish leaves the
    /// write in place and the caller none the wiser.
    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        id: &OrderId,
        requested: OrderStatus,
    ) -> Result<Order, OrderError> {
        let lock = self.order_lock(id).await;
        let _guard = lock.lock().await;

        let mut order = self.get_order(id).await?;
        order.status = validate_transition(order.status, requested)?;
        order.updated_at = Utc::now();
        self.store.update(order.clone()).await?;
        info!(order_id = %order.id, status = %order.status, "Status updated");

        self.notify(&order).await;
        Ok(order)
    }

    /// Assigns the delivering driver; settable exactly once.
    #[instrument(skip(self))]
    pub async fn assign_driver(
        &self,
        id: &OrderId,
        driver_id: DriverId,
    ) -> Result<Order, OrderError> {
        let lock = self.order_lock(id).await;
        let _guard = lock.lock().await;

        let mut order = self.get_order(id).await?;
        if let Some(existing) = &order.driver_id {
            return Err(OrderError::Validation(format!(
                "driver already assigned: {existing}"
            )));
        }
        order.driver_id = Some(driver_id.clone());
        order.updated_at = Utc::now();
        self.store.update(order.clone()).await?;
        info!(order_id = %order.id, driver = %driver_id, "Driver assigned");
        Ok(order)
    }

    /// Best-effort fan-out of the order's current status to its room.
    async fn notify(&self, order: &Order) {
        match self
            .registry
            .publish(order.room(), OrderEvent::status_changed(order))
            .await
        {
            Ok(delivered) => {
                debug!(order_id = %order.id, delivered, "Status change published")
            }
            Err(e) => {
                // The write is the operation of record; delivery is not.
                warn!(order_id = %order.id, error = %e, "Status change not published")
            }
        }
    }

    /// Gets (or creates) the serialization mutex for one order id.
    async fn order_lock(&self, id: &OrderId) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks.entry(id.clone()).or_default().clone()
    }
}

fn validate_items(items: &[LineItem]) -> Result<(), OrderError> {
    if items.is_empty() {
        return Err(OrderError::Validation("order has no items".to_string()));
    }
    for item in items {
        if item.quantity == 0 {
            return Err(OrderError::Validation(format!(
                "item {}: quantity must be positive",
                item.item_id
            )));
        }
        // Also rejects NaN.
        if !(item.unit_price > 0.0) {
            return Err(OrderError::Validation(format!(
                "item {}: unit price must be positive",
                item.item_id
            )));
        }
    }
    Ok(())
}
