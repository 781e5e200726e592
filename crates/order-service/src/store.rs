//! Durable persistence seam for orders.
//!
//! The service only needs load and per-key atomic write semantics, expressed
//! here as the [`OrderStore`] trait so the backing store (a database in
//! production) stays swappable. [`MemoryStore`] is the in-process reference
//! implementation used by the demo and the tests.

use crate::model::{Order, OrderId};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Errors surfaced by an order store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// An update targeted a key the store does not hold.
    #[error("order missing from store: {0}")]
    Missing(OrderId),

    /// The backing store failed (I/O, connectivity).
    #[error("store I/O failure: {0}")]
    Io(String),
}

/// Key-value persistence for [`Order`] aggregates.
///
/// Implementations must provide per-key atomicity for `update`; the service
/// layers its own per-order serialization on top, so a store never sees two
/// interleaved read-modify-write cycles for the same id.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Stores a newly created order under its id.
    async fn insert(&self, order: Order) -> Result<(), StoreError>;

    /// Loads an order, or `None` if the id is unknown.
    async fn load(&self, id: &OrderId) -> Result<Option<Order>, StoreError>;

    /// Replaces the stored order; fails with [`StoreError::Missing`] if the
    /// id was never inserted.
    async fn update(&self, order: Order) -> Result<(), StoreError>;
}

/// In-memory [`OrderStore`] backed by a `RwLock`ed map.
#[derive(Default)]
pub struct MemoryStore {
    orders: RwLock<HashMap<OrderId, Order>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn insert(&self, order: Order) -> Result<(), StoreError> {
        self.orders.write().await.insert(order.id.clone(), order);
        Ok(())
    }

    async fn load(&self, id: &OrderId) -> Result<Option<Order>, StoreError> {
        Ok(self.orders.read().await.get(id).cloned())
    }

    async fn update(&self, order: Order) -> Result<(), StoreError> {
        let mut orders = self.orders.write().await;
        match orders.get_mut(&order.id) {
            Some(slot) => {
                *slot = order;
                Ok(())
            }
            None => Err(StoreError::Missing(order.id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CustomerId, LineItem, RestaurantId};

    fn sample(id: u64) -> Order {
        Order::new(
            OrderId(id),
            CustomerId::from("cust_1"),
            RestaurantId::from("rest_1"),
            vec![LineItem::new("burger", "Burger", 1, 5.0)],
        )
    }

    #[tokio::test]
    async fn insert_then_load_round_trips() {
        let store = MemoryStore::new();
        let order = sample(1);
        store.insert(order.clone()).await.unwrap();
        assert_eq!(store.load(&OrderId(1)).await.unwrap(), Some(order));
        assert_eq!(store.load(&OrderId(2)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn update_requires_existing_key() {
        let store = MemoryStore::new();
        let err = store.update(sample(1)).await.unwrap_err();
        assert!(matches!(err, StoreError::Missing(OrderId(1))));

        store.insert(sample(1)).await.unwrap();
        let mut changed = sample(1);
        changed.total_amount = 99.0;
        store.update(changed.clone()).await.unwrap();
        assert_eq!(
            store.load(&OrderId(1)).await.unwrap().unwrap().total_amount,
            99.0
        );
    }
}
