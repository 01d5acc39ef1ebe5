//! The order lifecycle service.
//!
//! Orchestrates the store, the estimator, and the token issuer. It holds no
//! order state of its own: every operation reads current state through the
//! store client, validates, and writes back via a store message.

use chrono::{Local, Timelike};
use tracing::{info, instrument};

use crate::clients::OrderStoreClient;
use crate::config::EngineConfig;
use crate::eta::{EtaError, EtaEstimator, EtaInputs};
use crate::model::{OrderCreate, OrderFilter, OrderItem, OrderStatus, QueueEntry};
use crate::order_store::OrderError;
use crate::token::TokenIssuer;

/// Incoming order request.
///
/// `prep_minutes` may be given directly or left `None` to be derived from the
/// item list (`Σ qty × per-unit prep minutes`) — the two input adapters
/// feeding one creation contract.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub vendor_id: String,
    pub student_id: String,
    pub items: Vec<OrderItem>,
    pub prep_minutes: Option<u32>,
}

impl NewOrder {
    fn resolved_prep_minutes(&self) -> u32 {
        self.prep_minutes.unwrap_or_else(|| {
            self.items
                .iter()
                .map(|item| item.qty * item.prep_minutes)
                .sum()
        })
    }
}

/// Creation response: the only place the pickup token is ever returned.
#[derive(Clone, PartialEq)]
pub struct OrderReceipt {
    pub order_id: String,
    pub eta_minutes: u32,
    pub pickup_token: String,
}

impl std::fmt::Debug for OrderReceipt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderReceipt")
            .field("order_id", &self.order_id)
            .field("eta_minutes", &self.eta_minutes)
            .field("pickup_token", &"<redacted>")
            .finish()
    }
}

/// Entry point for the four lifecycle operations.
#[derive(Clone)]
pub struct OrderLifecycleService {
    store: OrderStoreClient,
    estimator: EtaEstimator,
    issuer: TokenIssuer,
    vendor_capacity: u32,
    rush_factor: f64,
}

impl OrderLifecycleService {
    pub fn new(
        store: OrderStoreClient,
        estimator: EtaEstimator,
        issuer: TokenIssuer,
        config: &EngineConfig,
    ) -> Self {
        Self {
            store,
            estimator,
            issuer,
            vendor_capacity: config.vendor_capacity,
            rush_factor: config.rush_factor,
        }
    }

    /// Creates an order: count the vendor's active load, estimate, mint the
    /// token, insert with status `ordered`, return the receipt.
    ///
    /// The count and the insert are two store messages. A concurrent creation
    /// can make the count stale by one — a slightly optimistic (advisory) ETA
    /// — but the insert itself is atomic and the data stays consistent.
    #[instrument(skip(self, order), fields(vendor_id = %order.vendor_id))]
    pub async fn create_order(&self, order: NewOrder) -> Result<OrderReceipt, OrderError> {
        let prep_minutes = order.resolved_prep_minutes();
        let active_orders = self.store.count_active(&order.vendor_id).await?;

        let inputs = EtaInputs {
            prep_minutes,
            active_orders,
            capacity: self.vendor_capacity,
            time_of_day: time_of_day(),
            rush_factor: self.rush_factor,
        };
        let eta_minutes = self
            .estimator
            .estimate(&inputs)
            .await
            .map_err(|EtaError::InvalidInput(msg)| OrderError::InvalidInput(msg))?;

        let pickup_token = self.issuer.issue();
        let order_id = self
            .store
            .insert(OrderCreate {
                vendor_id: order.vendor_id,
                student_id: order.student_id,
                items: order.items,
                prep_minutes,
                eta_minutes,
                pickup_token: pickup_token.clone(),
            })
            .await?;

        info!(%order_id, eta_minutes, active_orders, "Order created");
        Ok(OrderReceipt {
            order_id,
            eta_minutes,
            pickup_token,
        })
    }

    /// Advances an order's status: to its unique successor, or to an
    /// explicitly requested target (administrative correction). Both paths
    /// run the same monotonicity check inside the store actor.
    #[instrument(skip(self))]
    pub async fn advance_status(
        &self,
        order_id: &str,
        target: Option<OrderStatus>,
    ) -> Result<OrderStatus, OrderError> {
        let status = self.store.advance(order_id, target).await?;
        info!(%order_id, %status, "Status advanced");
        Ok(status)
    }

    /// Redeems a ready order with its pickup token. At most one redemption
    /// can ever succeed per order.
    #[instrument(skip(self, presented_token))]
    pub async fn pickup(&self, order_id: &str, presented_token: &str) -> Result<(), OrderError> {
        self.store.redeem(order_id, presented_token).await?;
        info!(%order_id, "Order collected");
        Ok(())
    }

    /// The vendor's current queue: active orders, oldest first, with the
    /// pickup token redacted from every entry.
    #[instrument(skip(self))]
    pub async fn queue(&self, vendor_id: &str) -> Result<Vec<QueueEntry>, OrderError> {
        let mut orders = self.store.select(OrderFilter::active_for(vendor_id)).await?;
        orders.sort_by_key(|order| order.created_at);
        Ok(orders.iter().map(QueueEntry::from).collect())
    }
}

/// Current fractional hour of day (e.g. 11:30 → 11.5), in local time.
fn time_of_day() -> f64 {
    let now = Local::now().time();
    f64::from(now.hour()) + f64::from(now.minute()) / 60.0
}
