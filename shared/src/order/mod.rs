//! Order domain types
//!
//! The [`Order`] record is the single aggregate of the system: one row in
//! the record store, one mirrored document in the document store. Monetary
//! fields are `rust_decimal::Decimal` internally and serialize as plain
//! JSON numbers, so consumers never see binary floating point drift in
//! totals.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Order lifecycle status
///
/// Wire form is SCREAMING_SNAKE_CASE (`"PENDING"`). Any value is accepted
/// as a transition target from any current status; legality of transitions
/// is deliberately not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Processing,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Processing => "PROCESSING",
            OrderStatus::Completed => "COMPLETED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an unrecognized status value
#[derive(Debug, thiserror::Error)]
#[error("Invalid status '{0}'. Must be one of: PENDING, PROCESSING, COMPLETED, CANCELLED")]
pub struct ParseStatusError(pub String);

impl FromStr for OrderStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(OrderStatus::Pending),
            "PROCESSING" => Ok(OrderStatus::Processing),
            "COMPLETED" => Ok(OrderStatus::Completed),
            "CANCELLED" => Ok(OrderStatus::Cancelled),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

/// A single order line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub quantity: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// quantity × price, derived at creation
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

/// Order record as persisted and served
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// `ORD-<8 lowercase hex>`, generated at creation, never reused
    pub order_id: String,
    pub customer_id: String,
    pub customer_name: String,
    pub items: Vec<OrderItem>,
    /// Sum of all item totals, derived at creation, never caller-supplied
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    /// Refreshed on every mutation
    pub updated_at: DateTime<Utc>,
}

/// Inbound order payload (create request)
///
/// Structural fields are optional and `items` is raw JSON so the validator
/// can report exactly which field is missing or malformed instead of
/// failing opaquely at deserialization. `quantity` and `price` may arrive
/// as numbers or numeric strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderDraft {
    pub customer_id: Option<String>,
    pub customer_name: Option<String>,
    pub items: Option<serde_json::Value>,
}

/// Generate a new order id: `ORD-` plus the first 8 hex chars of a v4 UUID
pub fn new_order_id() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("ORD-{}", &hex[..8])
}
