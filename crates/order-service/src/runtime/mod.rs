//! System wiring and runtime lifecycle.
//!
//! [`DeliverySystem`] is the orchestrator: it spawns the registry actor,
//! builds the service and gateway around its client handle, and coordinates
//! graceful shutdown. [`setup_tracing`] initializes the process-wide
//! structured-logging subscriber.

pub mod system;
pub mod tracing;

pub use system::DeliverySystem;
pub use tracing::setup_tracing;
