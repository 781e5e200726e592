//! Demo: one order walked through its lifecycle while two subscribed
//! connections watch the updates arrive.
//!
//! ```bash
//! RUST_LOG=info cargo run -p order-service
//! ```

use order_service::model::{CustomerId, DriverId, LineItem, RestaurantId};
use order_service::runtime::{setup_tracing, DeliverySystem};
use order_service::OrderStatus;
use room_registry::ConnectionId;
use tracing::{info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    info!("Starting delivery order system");
    let system = DeliverySystem::new();

    // Customer checks out.
    let span = tracing::info_span!("checkout");
    let order = async {
        info!("Placing order");
        system
            .orders
            .create_order(
                CustomerId::from("cust_alice"),
                RestaurantId::from("rest_burgerbarn"),
                vec![
                    LineItem::new("burger", "Smash Burger", 2, 5.0),
                    LineItem::new("fries", "Fries", 1, 2.5),
                ],
            )
            .await
            .map_err(|e| e.to_string())
    }
    .instrument(span)
    .await?;

    info!(order_id = %order.id, total = order.total_amount, "Order placed");

    // The customer's app and the restaurant dashboard both watch the order.
    let room = order.id.to_string();
    let customer_conn = ConnectionId::from("conn_customer");
    let restaurant_conn = ConnectionId::from("conn_restaurant");

    let mut customer_events = system
        .gateway
        .on_connect(customer_conn.clone())
        .await
        .map_err(|e| e.to_string())?;
    let mut restaurant_events = system
        .gateway
        .on_connect(restaurant_conn.clone())
        .await
        .map_err(|e| e.to_string())?;
    system
        .gateway
        .on_join_room(customer_conn.clone(), &room)
        .await
        .map_err(|e| e.to_string())?;
    system
        .gateway
        .on_join_room(restaurant_conn.clone(), &room)
        .await
        .map_err(|e| e.to_string())?;

    // Restaurant and driver progress the order.
    let span = tracing::info_span!("fulfillment");
    async {
        system
            .orders
            .assign_driver(&order.id, DriverId::from("driver_dana"))
            .await
            .map_err(|e| e.to_string())?;

        for status in [
            OrderStatus::Confirmed,
            OrderStatus::Preparing,
            OrderStatus::Ready,
            OrderStatus::PickedUp,
            OrderStatus::Delivered,
        ] {
            system
                .orders
                .update_status(&order.id, status)
                .await
                .map_err(|e| e.to_string())?;
        }
        Ok::<(), String>(())
    }
    .instrument(span)
    .await?;

    // Both subscribers saw every transition, in order.
    while let Ok(event) = customer_events.try_recv() {
        let json = serde_json::to_string(&event).map_err(|e| e.to_string())?;
        info!(subscriber = "customer", %json, "Event received");
    }
    while let Ok(event) = restaurant_events.try_recv() {
        info!(subscriber = "restaurant", status = %event.status(), "Event received");
    }

    system
        .gateway
        .on_disconnect(customer_conn)
        .await
        .map_err(|e| e.to_string())?;
    system
        .gateway
        .on_disconnect(restaurant_conn)
        .await
        .map_err(|e| e.to_string())?;

    system.shutdown().await?;
    info!("Demo completed");
    Ok(())
}
