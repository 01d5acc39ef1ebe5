//! # Observability & Tracing
//!
//! Initializes structured logging with the `tracing` crate. Spans follow each
//! request through the service, the store client, and the store actor, with
//! levels controlled via `RUST_LOG`:
//!
//! ```bash
//! # Compact logs
//! RUST_LOG=info cargo test
//!
//! # Full payloads at function entry points (tokens stay redacted)
//! RUST_LOG=debug cargo test
//!
//! # Filter to the store actor only
//! RUST_LOG=canteen_orders::store=debug cargo test
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // Entity type fields carry the context instead
        .compact()
        .init();
}
