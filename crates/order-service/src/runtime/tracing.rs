//! Structured-logging setup.
//!
//! Initializes `tracing-subscriber` with an `EnvFilter`, so verbosity is
//! controlled through `RUST_LOG`:
//!
//! ```bash
//! RUST_LOG=info cargo run -p order-service    # compact workflow logs
//! RUST_LOG=debug cargo run -p order-service   # full payloads and fan-out detail
//! ```
//!
//! The compact format hides module paths (`with_target(false)`); log lines
//! carry structured fields like `order_id` and `connection_id` instead.

/// Installs the global tracing subscriber. Call once, at startup.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
