//! Notification publishing
//!
//! Every lifecycle mutation broadcasts an [`OrderNotification`]. Publishing
//! is part of the operation's success contract: a failed publish fails the
//! operation. There is no local suppression and no retry.
//!
//! [`OrderNotification`]: shared::event::OrderNotification

pub mod bus;

// Re-exports
pub use bus::{NotificationBus, NotificationFeed, spawn_feed_task};

use async_trait::async_trait;
use shared::event::OrderNotification;
use thiserror::Error;

/// Notification publisher error types
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Notification channel for topic '{0}' has no subscribers")]
    ChannelClosed(String),
}

/// Result type for publish operations
pub type NotifyResult<T> = Result<T, NotifyError>;

/// Broadcast channel for lifecycle events
#[async_trait]
pub trait NotificationPublisher: Send + Sync {
    async fn publish(&self, notification: OrderNotification) -> NotifyResult<()>;
}
