use async_trait::async_trait;
use order_service::model::{CustomerId, LineItem, RestaurantId};
use order_service::runtime::DeliverySystem;
use order_service::store::{MemoryStore, OrderStore, StoreError};
use order_service::{Order, OrderError, OrderEvent, OrderId, OrderStatus};
use room_registry::ConnectionId;
use std::sync::Arc;

async fn place_order(system: &DeliverySystem) -> Order {
    system
        .orders
        .create_order(
            CustomerId::from("cust_1"),
            RestaurantId::from("rest_1"),
            vec![LineItem::new("burger", "Burger", 2, 5.0)],
        )
        .await
        .unwrap()
}

#[tokio::test]
async fn test_status_change_reaches_every_room_member() {
    let system = DeliverySystem::new();
    let order = place_order(&system).await;
    let room = order.id.to_string();

    let customer = ConnectionId::from("conn_customer");
    let restaurant = ConnectionId::from("conn_restaurant");
    let mut customer_events = system.gateway.on_connect(customer.clone()).await.unwrap();
    let mut restaurant_events = system.gateway.on_connect(restaurant.clone()).await.unwrap();
    system
        .gateway
        .on_join_room(customer.clone(), &room)
        .await
        .unwrap();
    system
        .gateway
        .on_join_room(restaurant.clone(), &room)
        .await
        .unwrap();

    system
        .orders
        .update_status(&order.id, OrderStatus::Confirmed)
        .await
        .unwrap();

    let expected = OrderEvent::OrderStatusChanged {
        order_id: order.id.clone(),
        status: OrderStatus::Confirmed,
    };
    assert_eq!(customer_events.recv().await.unwrap(), expected);
    assert_eq!(restaurant_events.recv().await.unwrap(), expected);

    // After one party disconnects, only the other observes the next change.
    system.gateway.on_disconnect(restaurant).await.unwrap();
    system
        .orders
        .update_status(&order.id, OrderStatus::Preparing)
        .await
        .unwrap();

    assert_eq!(
        customer_events.recv().await.unwrap().status(),
        OrderStatus::Preparing
    );
    assert!(restaurant_events.recv().await.is_none());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_subscribers_observe_transitions_in_commit_order() {
    let system = DeliverySystem::new();
    let order = place_order(&system).await;
    let room = order.id.to_string();

    let conn = ConnectionId::from("conn_1");
    let mut events = system.gateway.on_connect(conn.clone()).await.unwrap();
    system.gateway.on_join_room(conn, &room).await.unwrap();

    let path = [
        OrderStatus::Confirmed,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::PickedUp,
        OrderStatus::Delivered,
    ];
    for status in path {
        system.orders.update_status(&order.id, status).await.unwrap();
    }

    for status in path {
        assert_eq!(events.recv().await.unwrap().status(), status);
    }
    assert!(events.try_recv().is_err());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_rejected_transition_publishes_nothing() {
    let system = DeliverySystem::new();
    let order = place_order(&system).await;
    let room = order.id.to_string();

    let conn = ConnectionId::from("conn_1");
    let mut events = system.gateway.on_connect(conn.clone()).await.unwrap();
    system.gateway.on_join_room(conn, &room).await.unwrap();

    let err = system
        .orders
        .update_status(&order.id, OrderStatus::Delivered)
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::InvalidTransition { .. }));
    assert!(events.try_recv().is_err());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_update_with_no_subscribers_still_persists() {
    let system = DeliverySystem::new();
    let order = place_order(&system).await;

    // Empty room: the publish is a silent no-op, not a failure.
    let updated = system
        .orders
        .update_status(&order.id, OrderStatus::Confirmed)
        .await
        .unwrap();
    assert_eq!(updated.status, OrderStatus::Confirmed);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_events_only_reach_the_orders_own_room() {
    let system = DeliverySystem::new();
    let watched = place_order(&system).await;
    let other = place_order(&system).await;

    let conn = ConnectionId::from("conn_1");
    let mut events = system.gateway.on_connect(conn.clone()).await.unwrap();
    system
        .gateway
        .on_join_room(conn, &watched.id.to_string())
        .await
        .unwrap();

    system
        .orders
        .update_status(&other.id, OrderStatus::Confirmed)
        .await
        .unwrap();
    assert!(events.try_recv().is_err());

    system
        .orders
        .update_status(&watched.id, OrderStatus::Confirmed)
        .await
        .unwrap();
    assert_eq!(
        events.recv().await.unwrap(),
        OrderEvent::OrderStatusChanged {
            order_id: watched.id.clone(),
            status: OrderStatus::Confirmed,
        }
    );

    system.shutdown().await.unwrap();
}

/// Store whose writes fail after creation, to prove a failed persist
/// propagates and publishes nothing.
struct BrokenUpdateStore {
    inner: MemoryStore,
}

#[async_trait]
impl OrderStore for BrokenUpdateStore {
    async fn insert(&self, order: Order) -> Result<(), StoreError> {
        self.inner.insert(order).await
    }

    async fn load(&self, id: &OrderId) -> Result<Option<Order>, StoreError> {
        self.inner.load(id).await
    }

    async fn update(&self, _order: Order) -> Result<(), StoreError> {
        Err(StoreError::Io("disk on fire".to_string()))
    }
}

#[tokio::test]
async fn test_failed_persist_propagates_and_publishes_nothing() {
    let system = DeliverySystem::with_store(Arc::new(BrokenUpdateStore {
        inner: MemoryStore::new(),
    }));
    let order = place_order(&system).await;
    let room = order.id.to_string();

    let conn = ConnectionId::from("conn_1");
    let mut events = system.gateway.on_connect(conn.clone()).await.unwrap();
    system.gateway.on_join_room(conn, &room).await.unwrap();

    let err = system
        .orders
        .update_status(&order.id, OrderStatus::Confirmed)
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::Persistence(_)));

    // No notification for a state that was never saved.
    assert!(events.try_recv().is_err());
    let stored = system.orders.get_order(&order.id).await.unwrap();
    assert_eq!(stored.status, OrderStatus::Pending);

    system.shutdown().await.unwrap();
}
