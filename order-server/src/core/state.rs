use std::sync::Arc;

use shared::event::OrderNotification;

use crate::core::Config;
use crate::notify::{NotificationBus, NotificationFeed, spawn_feed_task};
use crate::orders::OrderProcessor;
use crate::storage::{FsDocumentStore, RedbRecordStore};
use crate::utils::{AppError, AppResult};

/// Server state - holds the adapter singletons and the order processor
///
/// Cheap to clone; every component is behind an `Arc`. The adapters are
/// constructed once here and shared by reference for the life of the
/// process.
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    processor: Arc<OrderProcessor>,
    bus: NotificationBus,
    feed: NotificationFeed,
}

impl ServerState {
    /// Build all adapters and wire the processor
    ///
    /// Order of initialization:
    /// 1. Work directory layout
    /// 2. Record store (redb, `work_dir/orders.redb`)
    /// 3. Document store (filesystem, `work_dir/documents`)
    /// 4. Notification bus and feed
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        config.ensure_work_dir_structure().map_err(|e| {
            AppError::internal(format!("Failed to create work directory structure: {e}"))
        })?;

        let records = RedbRecordStore::open(config.database_path())
            .map_err(|e| AppError::storage(e.to_string()))?;
        tracing::info!(path = %config.database_path().display(), "Record store ready");

        let documents = FsDocumentStore::new(config.documents_root());
        tracing::info!(path = %config.documents_root().display(), "Document store ready");

        let bus = NotificationBus::new(&config.order_topic);
        let feed = NotificationFeed::new(config.feed_capacity);

        let processor = Arc::new(OrderProcessor::new(
            Arc::new(records),
            Arc::new(documents),
            Arc::new(bus.clone()),
        ));

        Ok(Self {
            config: config.clone(),
            processor,
            bus,
            feed,
        })
    }

    /// Start background tasks
    ///
    /// Must be called before serving requests: the feed task holds the
    /// subscription that keeps the notification channel open.
    pub fn start_background_tasks(&self) {
        spawn_feed_task(&self.bus, self.feed.clone());
    }

    /// The order lifecycle processor
    pub fn processor(&self) -> &OrderProcessor {
        &self.processor
    }

    /// The notification bus (for additional subscribers)
    pub fn notification_bus(&self) -> &NotificationBus {
        &self.bus
    }

    /// Recently published notifications, newest first
    pub fn recent_notifications(&self) -> Vec<OrderNotification> {
        self.feed.recent()
    }
}
