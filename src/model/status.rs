//! Order status vocabulary and the transition rules over it.
//!
//! The lifecycle is a single linear progression:
//!
//! ```text
//! ordered -> preparing -> ready -> collected
//! ```
//!
//! Both entry points — automatic one-step advancement and an explicitly
//! supplied target status (administrative correction) — share the same
//! total-order check, so neither can skip ahead or move a status backward.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::order_store::OrderError;

/// Preparation state of an order. Monotonic: a stored status never regresses.
///
/// The derived `Ord` gives the total order `Ordered < Preparing < Ready <
/// Collected` that every transition check relies on.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Ordered,
    Preparing,
    Ready,
    Collected,
}

impl OrderStatus {
    /// The initial status assigned at creation.
    pub const INITIAL: OrderStatus = OrderStatus::Ordered;

    /// The unique next status, or `None` from the terminal state.
    pub fn successor(self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Ordered => Some(OrderStatus::Preparing),
            OrderStatus::Preparing => Some(OrderStatus::Ready),
            OrderStatus::Ready => Some(OrderStatus::Collected),
            OrderStatus::Collected => None,
        }
    }

    /// Advances one step along the lifecycle.
    ///
    /// # Errors
    /// [`OrderError::TerminalState`] when called on `Collected`.
    pub fn advance(self) -> Result<OrderStatus, OrderError> {
        self.successor().ok_or(OrderError::TerminalState)
    }

    /// Validates an explicitly requested target status.
    ///
    /// Succeeds only when `target` is the immediate successor of `self`:
    /// strictly later in the total order, with no step skipped. Jumping
    /// `Ordered -> Collected` is as invalid as moving backward.
    ///
    /// # Errors
    /// [`OrderError::TerminalState`] from `Collected`, otherwise
    /// [`OrderError::InvalidTransition`] for any non-successor target.
    pub fn validate_target(self, target: OrderStatus) -> Result<OrderStatus, OrderError> {
        match self.successor() {
            None => Err(OrderError::TerminalState),
            Some(next) if next == target => Ok(target),
            Some(_) => Err(OrderError::InvalidTransition {
                from: self,
                to: target,
            }),
        }
    }

    /// Whether the order still counts toward a vendor's preparation load.
    /// Everything short of `Collected` is active.
    pub fn is_active(self) -> bool {
        self != OrderStatus::Collected
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OrderStatus::Ordered => "ordered",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Collected => "collected",
        };
        f.write_str(s)
    }
}
