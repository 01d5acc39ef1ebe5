//! Lifecycle orchestration over the store, estimator, and token issuer.

pub mod lifecycle;

pub use lifecycle::{NewOrder, OrderLifecycleService, OrderReceipt};
