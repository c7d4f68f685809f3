//! Domain model: pure-data entity records and the order status enum.
//!
//! All entities are created and mutated outside this crate (order placement,
//! category administration); the reporting core only reads a consistent
//! snapshot. Child collections (items, history records, subcategories) are
//! represented as back-references on the child rows.

use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Lifecycle status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    New,
    SentToStore,
    ReceivedInStore,
    InProcessing,
    Processed,
    Canceled,
    Rejected,
    Completed,
}

impl OrderStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [OrderStatus; 8] = [
        OrderStatus::New,
        OrderStatus::SentToStore,
        OrderStatus::ReceivedInStore,
        OrderStatus::InProcessing,
        OrderStatus::Processed,
        OrderStatus::Canceled,
        OrderStatus::Rejected,
        OrderStatus::Completed,
    ];

    /// Wire form, as stored in the `status` columns.
    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::New => "NEW",
            OrderStatus::SentToStore => "SENT_TO_STORE",
            OrderStatus::ReceivedInStore => "RECEIVED_IN_STORE",
            OrderStatus::InProcessing => "IN_PROCESSING",
            OrderStatus::Processed => "PROCESSED",
            OrderStatus::Canceled => "CANCELED",
            OrderStatus::Rejected => "REJECTED",
            OrderStatus::Completed => "COMPLETED",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an unrecognized status value coming back from the store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown order status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// A store orders are routed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    pub id: Uuid,
}

/// A customer order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub store_id: Uuid,
    pub customer_id: Uuid,
    pub status: OrderStatus,
    /// Set exactly once by the persistence boundary when the record is
    /// created, in its reference time zone. Never mutated afterwards.
    pub created_at: DateTime<FixedOffset>,
    pub finished_at: Option<DateTime<FixedOffset>>,
}

/// One status transition an order passed through.
///
/// The same status value may recur for an order if it is re-entered, so
/// "order ever had status X" predicates use EXISTS semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderStatusHistory {
    pub id: Uuid,
    pub order_id: Uuid,
    pub status: OrderStatus,
    pub changed_at: DateTime<FixedOffset>,
}

/// A line item of an order. Line total = product price × quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    /// Always positive.
    pub quantity: i64,
}

/// A sellable product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    /// Non-negative.
    pub price: Decimal,
    pub category_id: Uuid,
}

/// A node of the category forest. `parent_id` is `None` for roots; the
/// parent relation is acyclic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub parent_id: Option<Uuid>,
}
