//! # Order Service
//!
//! The core of a food-delivery backend: an order lifecycle state machine
//! coupled to room-based real-time notification fan-out.
//!
//! A customer places an order, the restaurant and driver walk it through a
//! fixed lifecycle, and every client subscribed to that order's room learns
//! about each transition without polling. The interesting invariants live in
//! exactly two places, and this crate is built around them:
//!
//! - **[`lifecycle`]**: a closed-set state machine. `PENDING` through
//!   `DELIVERED` on the happy path, `CANCELLED` reachable until pickup, and a
//!   pure [`validate_transition`](lifecycle::validate_transition) that is the
//!   only way a status ever changes.
//! - **[`service`]**: [`OrderService`](service::OrderService) serializes
//!   concurrent status updates per order id, persists through the
//!   [`OrderStore`](store::OrderStore) trait, and only after a successful
//!   write publishes the new status to the order's room. Notification is
//!   best-effort: a publish failure is logged, never rolled back into the
//!   caller's result.
//!
//! The notification hub itself is the `room-registry` crate: a single actor
//! task owns the room↔subscriber mapping and serializes all registry traffic
//! through its queue. [`gateway::Gateway`] adapts the transport layer's
//! connection events (`on_connect` / `on_join_room` / `on_disconnect`) onto
//! it, and [`runtime::DeliverySystem`] wires everything together.
//!
//! ## Module tour
//!
//! - [`model`]: the `Order` aggregate, line items, typed ids.
//! - [`lifecycle`]: `OrderStatus` and the transition graph.
//! - [`store`]: the `OrderStore` trait plus an in-memory implementation.
//! - [`service`]: orchestration of create / read / update-status / assign-driver.
//! - [`event`]: the `orderStatusChanged` payload fanned out to rooms.
//! - [`gateway`]: connection-event facade over the registry.
//! - [`runtime`]: system wiring, shutdown, tracing setup.
//!
//! ## Running the demo
//!
//! ```bash
//! RUST_LOG=info cargo run -p order-service
//! ```

pub mod error;
pub mod event;
pub mod gateway;
pub mod lifecycle;
pub mod model;
pub mod runtime;
pub mod service;
pub mod store;

pub use error::OrderError;
pub use event::OrderEvent;
pub use gateway::Gateway;
pub use lifecycle::OrderStatus;
pub use model::{CustomerId, DriverId, LineItem, Order, OrderId, RestaurantId};
pub use service::OrderService;
pub use store::{MemoryStore, OrderStore, StoreError};
