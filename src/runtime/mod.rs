//! Runtime wiring: system startup/shutdown and tracing setup.

pub mod system;
pub mod tracing;

pub use system::CanteenSystem;
pub use tracing::setup_tracing;
