//! Error types for order lifecycle operations.

use thiserror::Error;

use crate::model::OrderStatus;

/// Errors that can occur during order operations.
///
/// These are surfaced to the routing layer as-is; none are retried here and
/// none are fatal to the process. Predictor failures never appear in this
/// enum — they are absorbed inside the estimation layer.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The requested order does not exist.
    #[error("order not found: {0}")]
    NotFound(String),

    /// The order is already collected; there is no further transition.
    #[error("order already collected; status is terminal")]
    TerminalState,

    /// An explicit target status would skip ahead or move backward.
    #[error("invalid status transition: {from} -> {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    /// Pickup was attempted while the order is not ready.
    #[error("order not ready for pickup (status: {0})")]
    NotReady(OrderStatus),

    /// The presented pickup token does not match the stored one.
    #[error("pickup token mismatch")]
    InvalidToken,

    /// Malformed creation or estimation input.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An error occurred while communicating with the store actor.
    #[error("store communication error: {0}")]
    Store(String),
}
