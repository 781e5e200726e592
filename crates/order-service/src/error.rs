//! Error taxonomy for order operations.
//!
//! All four variants are caller-recoverable; none are fatal to the process.
//! Notification-path failures are deliberately absent: persisting the new
//! status is the operation of record, so a failed publish is logged by the
//! service and never surfaced here.

use crate::lifecycle::OrderStatus;
use crate::model::OrderId;
use crate::store::StoreError;

/// Errors that can occur during order operations.
#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    /// The referenced order does not exist.
    #[error("order not found: {0}")]
    NotFound(OrderId),

    /// The requested status is not reachable from the current one.
    /// Nothing was persisted.
    #[error("invalid status transition: {from} -> {to}")]
    InvalidTransition {
        from: OrderStatus,
        to: OrderStatus,
    },

    /// Malformed input: empty items, zero quantity, non-positive price,
    /// or a driver re-assignment.
    #[error("invalid order: {0}")]
    Validation(String),

    /// The order store failed; nothing was published.
    #[error("order store failure: {0}")]
    Persistence(#[from] StoreError),
}
