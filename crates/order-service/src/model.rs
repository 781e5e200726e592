//! The `Order` aggregate and its typed identifiers.
//!
//! `Order` is the entity of record. It is created once with status
//! `PENDING`, mutated only through the [`OrderService`](crate::OrderService),
//! and never hard-deleted; cancellation is a terminal status, not a removal.
//! The struct carries the serde attributes for its wire projection
//! (camelCase field names, ids as opaque strings), so serializing an `Order`
//! yields the external `OrderView`.

use crate::lifecycle::OrderStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Type-safe identifier for orders.
///
/// Rendered as `order_{n}`; the rendered form doubles as the order's room
/// name in the notification hub.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrderId(pub u64);

impl From<u64> for OrderId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

impl Serialize for OrderId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Error parsing an order id from its wire form.
#[derive(Debug, thiserror::Error)]
#[error("malformed order id: {0}")]
pub struct ParseOrderIdError(String);

impl FromStr for OrderId {
    type Err = ParseOrderIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix("order_")
            .and_then(|n| n.parse().ok())
            .map(OrderId)
            .ok_or_else(|| ParseOrderIdError(s.to_string()))
    }
}

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub String);

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

string_id!(
    /// Opaque identifier of the customer who placed the order.
    CustomerId
);
string_id!(
    /// Opaque identifier of the restaurant fulfilling the order.
    RestaurantId
);
string_id!(
    /// Opaque identifier of the driver delivering the order.
    DriverId
);

/// One line of an order.
///
/// `name` and `unit_price` are snapshots taken at order time, not live
/// references into a catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub item_id: String,
    pub name: String,
    pub quantity: u32,
    pub unit_price: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

impl LineItem {
    pub fn new(item_id: impl Into<String>, name: impl Into<String>, quantity: u32, unit_price: f64) -> Self {
        Self {
            item_id: item_id.into(),
            name: name.into(),
            quantity,
            unit_price,
            options: Vec::new(),
        }
    }

    /// `quantity × unit_price` for this line.
    pub fn line_total(&self) -> f64 {
        f64::from(self.quantity) * self.unit_price
    }
}

/// A customer order, the aggregate of record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub customer_id: CustomerId,
    pub restaurant_id: RestaurantId,
    /// Set once when a driver takes the delivery; never re-assigned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver_id: Option<DriverId>,
    pub items: Vec<LineItem>,
    pub total_amount: f64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Creates a new `PENDING` order, computing `total_amount` from the
    /// line items. Input validation happens in the service, before this.
    pub fn new(
        id: OrderId,
        customer_id: CustomerId,
        restaurant_id: RestaurantId,
        items: Vec<LineItem>,
    ) -> Self {
        let total_amount = items.iter().map(LineItem::line_total).sum();
        let now = Utc::now();
        Self {
            id,
            customer_id,
            restaurant_id,
            driver_id: None,
            items,
            total_amount,
            status: OrderStatus::INITIAL,
            created_at: now,
            updated_at: now,
        }
    }

    /// The notification room this order's updates are published to.
    pub fn room(&self) -> String {
        self.id.to_string()
    }
}
