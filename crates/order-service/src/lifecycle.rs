//! The order lifecycle state machine.
//!
//! A closed set of states and an explicit transition graph:
//!
//! ```text
//! PENDING → CONFIRMED → PREPARING → READY → PICKED_UP → DELIVERED
//!    └──────────┴───────────┴─────────┴──→ CANCELLED
//! ```
//!
//! `DELIVERED` and `CANCELLED` are terminal. Cancellation is possible up to
//! and including `READY`; once the driver has the food (`PICKED_UP`) the
//! order can only complete. [`validate_transition`] is a pure function; the
//! service calls it before every persisted status change, so no writer can
//! skip ahead or move backward through the graph.

use crate::error::OrderError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Lifecycle states of an [`Order`](crate::Order).
///
/// Wire form is SCREAMING_SNAKE_CASE (`PICKED_UP`), matching the serialized
/// `status` field and the notification payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Preparing,
    Ready,
    PickedUp,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// The state every new order starts in.
    pub const INITIAL: OrderStatus = OrderStatus::Pending;

    /// Terminal states have no outgoing transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// The happy-path successor, if any.
    pub fn next(self) -> Option<OrderStatus> {
        use OrderStatus::*;
        match self {
            Pending => Some(Confirmed),
            Confirmed => Some(Preparing),
            Preparing => Some(Ready),
            Ready => Some(PickedUp),
            PickedUp => Some(Delivered),
            Delivered | Cancelled => None,
        }
    }

    /// Whether the order can still be cancelled from this state.
    /// Cancellation after pickup is not modeled.
    pub fn cancellable(self) -> bool {
        use OrderStatus::*;
        matches!(self, Pending | Confirmed | Preparing | Ready)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Confirmed => "CONFIRMED",
            OrderStatus::Preparing => "PREPARING",
            OrderStatus::Ready => "READY",
            OrderStatus::PickedUp => "PICKED_UP",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing a status from its wire form.
#[derive(Debug, thiserror::Error)]
#[error("unknown order status: {0}")]
pub struct ParseStatusError(String);

impl FromStr for OrderStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use OrderStatus::*;
        match s {
            "PENDING" => Ok(Pending),
            "CONFIRMED" => Ok(Confirmed),
            "PREPARING" => Ok(Preparing),
            "READY" => Ok(Ready),
            "PICKED_UP" => Ok(PickedUp),
            "DELIVERED" => Ok(Delivered),
            "CANCELLED" => Ok(Cancelled),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

/// Decides whether `current → requested` is an edge of the lifecycle graph.
///
/// Returns the resulting status on success and
/// [`OrderError::InvalidTransition`] otherwise. Pure, no side effects.
pub fn validate_transition(
    current: OrderStatus,
    requested: OrderStatus,
) -> Result<OrderStatus, OrderError> {
    let allowed = current.next() == Some(requested)
        || (requested == OrderStatus::Cancelled && current.cancellable());
    if allowed {
        Ok(requested)
    } else {
        Err(OrderError::InvalidTransition {
            from: current,
            to: requested,
        })
    }
}
