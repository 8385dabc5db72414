//! Shared types for the order management service
//!
//! Domain types used by the server and by notification subscribers:
//! order records, inbound order drafts, and lifecycle event payloads.

pub mod event;
pub mod order;

// Re-exports
pub use event::{OrderEventType, OrderNotification};
pub use order::{Order, OrderDraft, OrderItem, OrderStatus, new_order_id};
