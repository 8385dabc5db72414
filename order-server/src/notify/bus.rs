//! In-process notification bus
//!
//! A `tokio::sync::broadcast` channel fans lifecycle events out to every
//! subscriber. The feed task keeps one subscription alive for the life of
//! the process, logging each event and retaining the most recent ones for
//! the `/notifications` polling endpoint.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use shared::event::OrderNotification;
use tokio::sync::broadcast;

use super::{NotificationPublisher, NotifyError, NotifyResult};

/// Broadcast channel capacity; lagging subscribers skip old messages
const CHANNEL_CAPACITY: usize = 256;

/// Broadcast bus tagged with a topic name
#[derive(Clone)]
pub struct NotificationBus {
    sender: broadcast::Sender<OrderNotification>,
    topic: String,
}

impl NotificationBus {
    pub fn new(topic: impl Into<String>) -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            sender,
            topic: topic.into(),
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Subscribe to all future notifications
    pub fn subscribe(&self) -> broadcast::Receiver<OrderNotification> {
        self.sender.subscribe()
    }
}

#[async_trait]
impl NotificationPublisher for NotificationBus {
    async fn publish(&self, notification: OrderNotification) -> NotifyResult<()> {
        let mut notification = notification;
        notification.topic = self.topic.clone();

        tracing::info!(
            event_type = %notification.event_type,
            order_id = %notification.order_id,
            "Publishing notification"
        );

        self.sender
            .send(notification)
            .map(|_| ())
            .map_err(|_| NotifyError::ChannelClosed(self.topic.clone()))
    }
}

/// Bounded buffer of recently published notifications
///
/// Backs the `/notifications` polling endpoint. Oldest entries are evicted
/// once capacity is reached.
#[derive(Clone)]
pub struct NotificationFeed {
    inner: Arc<Mutex<VecDeque<OrderNotification>>>,
    capacity: usize,
}

impl NotificationFeed {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    pub fn push(&self, notification: OrderNotification) {
        let mut buffer = self.inner.lock();
        if buffer.len() == self.capacity {
            buffer.pop_front();
        }
        buffer.push_back(notification);
    }

    /// Most recent first
    pub fn recent(&self) -> Vec<OrderNotification> {
        self.inner.lock().iter().rev().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

/// Spawn the feed task: drains the bus into the feed and logs each event
/// in human-readable form.
///
/// The subscription is created before the task is spawned, so the bus has
/// a live subscriber as soon as this function returns.
pub fn spawn_feed_task(
    bus: &NotificationBus,
    feed: NotificationFeed,
) -> tokio::task::JoinHandle<()> {
    let mut receiver = bus.subscribe();
    tokio::spawn(async move {
        loop {
            match receiver.recv().await {
                Ok(notification) => {
                    tracing::info!(
                        target: "notifications",
                        "{}\n{}",
                        notification.subject(),
                        notification.render()
                    );
                    feed.push(notification);
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Notification feed lagged behind the bus");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    })
}
