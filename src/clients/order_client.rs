//! Typed client for the order store actor.
//!
//! This is the formalized store capability surface the lifecycle service
//! consumes: atomic insert, fetch, filtered selection, an explicit
//! `count_active`, and the two transition actions.

use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::clients::store_client::EntityClient;
use crate::model::{Order, OrderCreate, OrderFilter, OrderStatus};
use crate::order_store::{OrderAction, OrderActionResult, OrderError};
use crate::store::{StoreClient, StoreError};

/// Client for interacting with the order store.
#[derive(Clone)]
pub struct OrderStoreClient {
    inner: StoreClient<Order>,
}

fn map_store_error(e: StoreError<OrderError>) -> OrderError {
    match e {
        StoreError::Entity(e) => e,
        StoreError::NotFound(id) => OrderError::NotFound(id),
        other => OrderError::Store(other.to_string()),
    }
}

impl OrderStoreClient {
    pub fn new(inner: StoreClient<Order>) -> Self {
        Self { inner }
    }

    /// Inserts a new order record, returning its assigned ID. The insert is
    /// a single store message: readers never see a partial record.
    #[instrument(skip(self, params))]
    pub async fn insert(&self, params: OrderCreate) -> Result<String, OrderError> {
        debug!(vendor_id = %params.vendor_id, "Sending insert to store");
        self.inner.create(params).await.map_err(map_store_error)
    }

    /// Orders matching the filter.
    #[instrument(skip(self))]
    pub async fn select(&self, filter: OrderFilter) -> Result<Vec<Order>, OrderError> {
        self.inner.select(filter).await.map_err(map_store_error)
    }

    /// Count of the vendor's orders not yet collected — the load figure that
    /// gates ETA estimation.
    #[instrument(skip(self))]
    pub async fn count_active(&self, vendor_id: &str) -> Result<u32, OrderError> {
        let active = self.select(OrderFilter::active_for(vendor_id)).await?;
        Ok(active.len() as u32)
    }

    /// Executes a status transition inside the store actor and returns the
    /// new status.
    #[instrument(skip(self))]
    pub async fn advance(
        &self,
        id: &str,
        target: Option<OrderStatus>,
    ) -> Result<OrderStatus, OrderError> {
        match self
            .inner
            .perform_action(id.to_string(), OrderAction::Advance { target })
            .await
            .map_err(map_store_error)?
        {
            OrderActionResult::Advanced(status) => Ok(status),
            other => Err(OrderError::Store(format!(
                "unexpected action result: {:?}",
                other
            ))),
        }
    }

    /// Redeems an order for pickup inside the store actor.
    #[instrument(skip(self, presented_token))]
    pub async fn redeem(&self, id: &str, presented_token: &str) -> Result<(), OrderError> {
        match self
            .inner
            .perform_action(
                id.to_string(),
                OrderAction::Redeem {
                    presented_token: presented_token.to_string(),
                },
            )
            .await
            .map_err(map_store_error)?
        {
            OrderActionResult::Redeemed => Ok(()),
            other => Err(OrderError::Store(format!(
                "unexpected action result: {:?}",
                other
            ))),
        }
    }
}

#[async_trait]
impl EntityClient<Order> for OrderStoreClient {
    type Error = OrderError;

    fn inner(&self) -> &StoreClient<Order> {
        &self.inner
    }

    fn map_error(e: StoreError<OrderError>) -> Self::Error {
        map_store_error(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OrderItem;
    use crate::store::mock::MockStore;
    use crate::store::StoreEntity;

    fn canned_order(id: &str, status: OrderStatus) -> Order {
        let mut order = Order::from_create(
            id.to_string(),
            OrderCreate {
                vendor_id: "V1".into(),
                student_id: "S1".into(),
                items: vec![OrderItem::new("Thali", 1, 5)],
                prep_minutes: 5,
                eta_minutes: 15,
                pickup_token: "a".repeat(32),
            },
        )
        .unwrap();
        order.status = status;
        order
    }

    #[tokio::test]
    async fn count_active_is_the_selection_length() {
        let mut mock = MockStore::<Order>::new();
        mock.expect_select().return_ok(vec![
            canned_order("o1", OrderStatus::Ordered),
            canned_order("o2", OrderStatus::Preparing),
        ]);
        let client = OrderStoreClient::new(mock.client());

        assert_eq!(client.count_active("V1").await, Ok(2));
        mock.verify();
    }

    #[tokio::test]
    async fn entity_errors_surface_untranslated() {
        let mut mock = MockStore::<Order>::new();
        mock.expect_action()
            .return_err(StoreError::Entity(OrderError::InvalidToken));
        let client = OrderStoreClient::new(mock.client());

        assert_eq!(
            client.redeem("o1", "wrong").await,
            Err(OrderError::InvalidToken)
        );
        mock.verify();
    }

    #[tokio::test]
    async fn missing_orders_map_to_not_found() {
        let mut mock = MockStore::<Order>::new();
        mock.expect_action()
            .return_err(StoreError::NotFound("o404".into()));
        let client = OrderStoreClient::new(mock.client());

        assert_eq!(
            client.advance("o404", None).await,
            Err(OrderError::NotFound("o404".into()))
        );
        mock.verify();
    }
}
