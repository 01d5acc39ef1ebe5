//! The canonical order record and its DTOs.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::OrderStatus;

/// One line of an order, with its per-unit preparation minutes.
///
/// Carrying `prep_minutes` on the item lets callers omit an explicit overall
/// prep time and have it derived from the item list instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub name: String,
    pub qty: u32,
    #[serde(default)]
    pub prep_minutes: u32,
}

impl OrderItem {
    pub fn new(name: impl Into<String>, qty: u32, prep_minutes: u32) -> Self {
        Self {
            name: name.into(),
            qty,
            prep_minutes,
        }
    }
}

/// The persisted order record.
///
/// `eta_minutes` and `pickup_token` are computed exactly once, before the
/// record is inserted; the store never recomputes or reassigns them.
/// `status` is only ever mutated through the transition actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub vendor_id: String,
    pub student_id: String,
    pub items: Vec<OrderItem>,
    pub prep_minutes: u32,
    pub status: OrderStatus,
    pub eta_minutes: u32,
    pub pickup_token: String,
    pub created_at: DateTime<Utc>,
}

/// Creation payload for the order store.
///
/// The ETA and pickup token arrive pre-computed from the lifecycle service;
/// the store only assigns the ID, the initial status, and the timestamp.
#[derive(Clone)]
pub struct OrderCreate {
    pub vendor_id: String,
    pub student_id: String,
    pub items: Vec<OrderItem>,
    pub prep_minutes: u32,
    pub eta_minutes: u32,
    pub pickup_token: String,
}

// The token is a pickup credential; keep it out of debug logs.
impl fmt::Debug for OrderCreate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderCreate")
            .field("vendor_id", &self.vendor_id)
            .field("student_id", &self.student_id)
            .field("items", &self.items)
            .field("prep_minutes", &self.prep_minutes)
            .field("eta_minutes", &self.eta_minutes)
            .field("pickup_token", &"<redacted>")
            .finish()
    }
}

/// Query predicate for the order collection.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    /// Restrict to one vendor's orders; `None` matches every vendor.
    pub vendor_id: Option<String>,
    /// Restrict to orders still counting toward load (not yet collected).
    pub active_only: bool,
}

impl OrderFilter {
    /// Active (not yet collected) orders for one vendor. This is the filter
    /// behind both load counting and the queue listing.
    pub fn active_for(vendor_id: impl Into<String>) -> Self {
        Self {
            vendor_id: Some(vendor_id.into()),
            active_only: true,
        }
    }
}

/// Redacted listing projection of an order.
///
/// Deliberately has no `pickup_token` field: the token is returned once, in
/// the creation response, and never in any listing or query after that.
#[derive(Debug, Clone, Serialize)]
pub struct QueueEntry {
    pub order_id: String,
    pub student_id: String,
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
    pub eta_minutes: u32,
    pub created_at: DateTime<Utc>,
}

impl From<&Order> for QueueEntry {
    fn from(order: &Order) -> Self {
        Self {
            order_id: order.id.clone(),
            student_id: order.student_id.clone(),
            items: order.items.clone(),
            status: order.status,
            eta_minutes: order.eta_minutes,
            created_at: order.created_at,
        }
    }
}
