//! [`StoreEntity`] implementation for [`Order`].
//!
//! All status mutation happens here, inside the store actor's task. The
//! check-then-mutate bodies of [`OrderAction::Advance`] and
//! [`OrderAction::Redeem`] therefore execute atomically with respect to every
//! other request touching the same order — two concurrent pickups cannot both
//! observe `Ready`.

use std::fmt;

use chrono::Utc;

use crate::model::{Order, OrderCreate, OrderFilter, OrderStatus};
use crate::order_store::OrderError;
use crate::store::StoreEntity;
use crate::token::TokenIssuer;

/// Mutating operations on a stored order.
#[derive(Clone)]
pub enum OrderAction {
    /// Move the status forward: to its unique successor when `target` is
    /// `None`, or to an explicitly requested status otherwise.
    Advance { target: Option<OrderStatus> },
    /// Redeem the order for pickup with a presented token.
    Redeem { presented_token: String },
}

// Redeem may carry the real credential; keep it out of debug logs.
impl fmt::Debug for OrderAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderAction::Advance { target } => {
                f.debug_struct("Advance").field("target", target).finish()
            }
            OrderAction::Redeem { .. } => f
                .debug_struct("Redeem")
                .field("presented_token", &"<redacted>")
                .finish(),
        }
    }
}

/// Results from [`OrderAction`]s — variants match 1:1 with the actions.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderActionResult {
    /// The status after a successful advance.
    Advanced(OrderStatus),
    /// The order was collected.
    Redeemed,
}

impl StoreEntity for Order {
    type Id = String;
    type Create = OrderCreate;
    type Action = OrderAction;
    type ActionResult = OrderActionResult;
    type Filter = OrderFilter;
    type Error = OrderError;

    /// Builds the full record. The store assigns the ID, the initial status,
    /// and the timestamp; ETA and token arrive pre-computed and are never
    /// touched again.
    fn from_create(id: String, params: OrderCreate) -> Result<Self, OrderError> {
        if params.pickup_token.is_empty() {
            return Err(OrderError::InvalidInput("pickup token must be set".into()));
        }
        if params.eta_minutes < 1 {
            return Err(OrderError::InvalidInput("eta must be >= 1 minute".into()));
        }
        Ok(Self {
            id,
            vendor_id: params.vendor_id,
            student_id: params.student_id,
            items: params.items,
            prep_minutes: params.prep_minutes,
            status: OrderStatus::INITIAL,
            eta_minutes: params.eta_minutes,
            pickup_token: params.pickup_token,
            created_at: Utc::now(),
        })
    }

    fn matches(&self, filter: &OrderFilter) -> bool {
        filter
            .vendor_id
            .as_ref()
            .map_or(true, |v| *v == self.vendor_id)
            && (!filter.active_only || self.status.is_active())
    }

    /// Handles status transitions and pickup redemption.
    ///
    /// Redeem checks status strictly before the token: a wrong token against
    /// a non-ready order reports `NotReady`, not `InvalidToken`. Once
    /// collected, the order is no longer `Ready`, so a second redemption
    /// fails the status check — pickup succeeds at most once.
    fn handle_action(&mut self, action: OrderAction) -> Result<OrderActionResult, OrderError> {
        match action {
            OrderAction::Advance { target: None } => {
                self.status = self.status.advance()?;
                Ok(OrderActionResult::Advanced(self.status))
            }
            OrderAction::Advance { target: Some(target) } => {
                self.status = self.status.validate_target(target)?;
                Ok(OrderActionResult::Advanced(self.status))
            }
            OrderAction::Redeem { presented_token } => {
                if self.status != OrderStatus::Ready {
                    return Err(OrderError::NotReady(self.status));
                }
                if !TokenIssuer.verify(&self.pickup_token, &presented_token) {
                    return Err(OrderError::InvalidToken);
                }
                self.status = OrderStatus::Collected;
                Ok(OrderActionResult::Redeemed)
            }
        }
    }
}
