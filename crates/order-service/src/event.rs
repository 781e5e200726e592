//! Events fanned out to order rooms.
//!
//! The transport layer serializes these for delivery; the wire form is
//! `{"event": "orderStatusChanged", "payload": {"orderId": ..., "status": ...}}`.

use crate::lifecycle::OrderStatus;
use crate::model::{Order, OrderId};
use serde::Serialize;

/// A notification published to an order's room.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", content = "payload", rename_all = "camelCase")]
pub enum OrderEvent {
    #[serde(rename_all = "camelCase")]
    OrderStatusChanged {
        order_id: OrderId,
        status: OrderStatus,
    },
}

impl OrderEvent {
    /// The status-changed event for an order's current state.
    pub fn status_changed(order: &Order) -> Self {
        Self::OrderStatusChanged {
            order_id: order.id.clone(),
            status: order.status,
        }
    }

    /// The status carried by this event.
    pub fn status(&self) -> OrderStatus {
        match self {
            Self::OrderStatusChanged { status, .. } => *status,
        }
    }
}
