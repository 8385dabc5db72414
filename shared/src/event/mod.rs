//! Order lifecycle event types
//!
//! A notification is broadcast after every successful lifecycle mutation.
//! The payload carries enough context (customer, previous status, total,
//! document location) for a subscriber to act without re-reading the
//! record store.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::order::OrderStatus;

/// Lifecycle event kinds, usable for subscriber-side filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderEventType {
    OrderCreated,
    StatusUpdated,
    OrderDeleted,
}

impl OrderEventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderEventType::OrderCreated => "ORDER_CREATED",
            OrderEventType::StatusUpdated => "STATUS_UPDATED",
            OrderEventType::OrderDeleted => "ORDER_DELETED",
        }
    }
}

impl fmt::Display for OrderEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Notification payload broadcast on each lifecycle transition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderNotification {
    /// Unique message id
    pub id: Uuid,
    /// Topic tag, stamped by the publisher
    pub topic: String,
    pub event_type: OrderEventType,
    pub order_id: String,
    /// Status after the transition (for deletion: the captured prior status)
    pub status: OrderStatus,
    pub customer_id: String,
    /// Status before the transition (absent for creation)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_status: Option<OrderStatus>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub total_amount: Option<Decimal>,
    /// Location of the mirrored document (absent for deletion)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_key: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl OrderNotification {
    /// Create a notification with the mandatory context fields
    pub fn new(
        event_type: OrderEventType,
        order_id: impl Into<String>,
        status: OrderStatus,
        customer_id: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            topic: String::new(),
            event_type,
            order_id: order_id.into(),
            status,
            customer_id: customer_id.into(),
            previous_status: None,
            total_amount: None,
            document_key: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_previous_status(mut self, status: OrderStatus) -> Self {
        self.previous_status = Some(status);
        self
    }

    pub fn with_total_amount(mut self, amount: Decimal) -> Self {
        self.total_amount = Some(amount);
        self
    }

    pub fn with_document_key(mut self, key: impl Into<String>) -> Self {
        self.document_key = Some(key.into());
        self
    }

    /// Subject line for plain-text subscribers (mail/SMS bridges)
    pub fn subject(&self) -> String {
        format!("Order System Notification: {}", self.event_type)
    }

    /// Human-readable body for logs and plain-text subscribers
    pub fn render(&self) -> String {
        let details = serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string());
        format!(
            "Order Event: {}\nTime: {}\nOrder ID: {}\nStatus: {}\n------------------------\nDetails: {}",
            self.event_type,
            self.created_at.format("%Y-%m-%d %H:%M:%S"),
            self.order_id,
            self.status,
            details,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn event_type_wire_form() {
        assert_eq!(OrderEventType::OrderCreated.to_string(), "ORDER_CREATED");
        assert_eq!(
            serde_json::to_value(OrderEventType::StatusUpdated).unwrap(),
            "STATUS_UPDATED"
        );
    }

    #[test]
    fn notification_serializes_total_as_plain_number() {
        let notification = OrderNotification::new(
            OrderEventType::OrderCreated,
            "ORD-0a1b2c3d",
            OrderStatus::Pending,
            "CUST-1",
        )
        .with_total_amount(Decimal::from_str("36.50").unwrap())
        .with_document_key("orders/ORD-0a1b2c3d/order.json");

        let value = serde_json::to_value(&notification).unwrap();
        assert_eq!(value["event_type"], "ORDER_CREATED");
        assert_eq!(value["total_amount"].as_f64(), Some(36.5));
        assert_eq!(value["document_key"], "orders/ORD-0a1b2c3d/order.json");
        assert!(value.get("previous_status").is_none());
    }

    #[test]
    fn render_includes_event_and_order() {
        let notification = OrderNotification::new(
            OrderEventType::OrderDeleted,
            "ORD-deadbeef",
            OrderStatus::Cancelled,
            "CUST-2",
        )
        .with_previous_status(OrderStatus::Cancelled);

        let body = notification.render();
        assert!(body.contains("Order Event: ORDER_DELETED"));
        assert!(body.contains("Order ID: ORD-deadbeef"));
        assert!(body.contains("Status: CANCELLED"));
        assert_eq!(
            notification.subject(),
            "Order System Notification: ORDER_DELETED"
        );
    }
}
