//! Order-specific store wiring: entity implementation, errors, factory.

pub mod entity;
pub mod error;

pub use entity::{OrderAction, OrderActionResult};
pub use error::OrderError;

use crate::clients::OrderStoreClient;
use crate::model::Order;
use crate::store::StoreActor;

/// Creates the order store actor and its typed client.
///
/// Order IDs are opaque UUIDs, assigned at insert and never reused.
pub fn new() -> (StoreActor<Order>, OrderStoreClient) {
    let next_order_id = || uuid::Uuid::new_v4().to_string();
    let (actor, generic_client) = StoreActor::new(32, next_order_id);
    (actor, OrderStoreClient::new(generic_client))
}
