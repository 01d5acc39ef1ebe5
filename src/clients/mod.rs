//! Type-safe wrappers around the generic [`StoreClient`](crate::store::StoreClient).

pub mod order_client;
pub mod store_client;

pub use order_client::*;
pub use store_client::*;
