//! Order lifecycle orchestration
//!
//! Composes the record store, document mirror, and notification publisher
//! into the five lifecycle operations. Adapters are invoked strictly
//! sequentially within one operation; a failed step aborts the remaining
//! sequence and already-completed steps are not compensated.

use std::sync::Arc;

use shared::event::{OrderEventType, OrderNotification};
use shared::order::{Order, OrderDraft, OrderStatus, new_order_id};

use super::{ProcessorError, ProcessorResult, money, validate};
use crate::notify::NotificationPublisher;
use crate::storage::{DocumentStore, RecordStore};

/// Orchestrates the order lifecycle across the three adapters
///
/// Constructed once at process start; each operation is stateless apart
/// from the external stores, so concurrent invocations for different
/// order ids are independent. Concurrent mutations of the same id are
/// last-writer-wins: there is no version token.
pub struct OrderProcessor {
    records: Arc<dyn RecordStore>,
    documents: Arc<dyn DocumentStore>,
    notifier: Arc<dyn NotificationPublisher>,
}

impl OrderProcessor {
    pub fn new(
        records: Arc<dyn RecordStore>,
        documents: Arc<dyn DocumentStore>,
        notifier: Arc<dyn NotificationPublisher>,
    ) -> Self {
        Self {
            records,
            documents,
            notifier,
        }
    }

    /// Create a new order: validate → format → save → mirror → notify
    ///
    /// If the mirror write fails after the save succeeded, the record is
    /// left in place and the error is surfaced (no rollback).
    pub async fn create(&self, draft: &OrderDraft) -> ProcessorResult<Order> {
        validate::validate_draft(draft)?;

        let order_id = new_order_id();
        let order = money::format_order(draft, &order_id)?;
        tracing::info!(
            order_id = %order.order_id,
            customer_id = %order.customer_id,
            total = %order.total_amount,
            "Creating order"
        );

        let saved = self.records.save(&order).await?;

        let document = serde_json::to_value(&saved)?;
        let document_key = self.documents.store_document(&saved.order_id, &document).await?;

        self.notifier
            .publish(
                OrderNotification::new(
                    OrderEventType::OrderCreated,
                    &saved.order_id,
                    saved.status,
                    &saved.customer_id,
                )
                .with_total_amount(saved.total_amount)
                .with_document_key(&document_key),
            )
            .await?;

        tracing::info!(order_id = %saved.order_id, "Order created");
        Ok(saved)
    }

    /// Fetch an order; `Ok(None)` when the id is unknown (not an error)
    pub async fn get(&self, order_id: &str) -> ProcessorResult<Option<Order>> {
        Ok(self.records.get(order_id).await?)
    }

    /// Update an order's status: existence check → record update → mirror
    /// resync → notify with old and new status
    ///
    /// Transition legality is not enforced: any status is accepted as a
    /// target from any current status.
    pub async fn update_status(
        &self,
        order_id: &str,
        status: OrderStatus,
    ) -> ProcessorResult<Order> {
        let existing = self
            .records
            .get(order_id)
            .await?
            .ok_or_else(|| ProcessorError::OrderNotFound(order_id.to_string()))?;

        tracing::info!(order_id, from = %existing.status, to = %status, "Updating order status");
        let updated = self.records.update_status(order_id, status).await?;

        let document = serde_json::to_value(&updated)?;
        let document_key = self.documents.store_document(order_id, &document).await?;

        self.notifier
            .publish(
                OrderNotification::new(
                    OrderEventType::StatusUpdated,
                    order_id,
                    updated.status,
                    &updated.customer_id,
                )
                .with_previous_status(existing.status)
                .with_document_key(&document_key),
            )
            .await?;

        Ok(updated)
    }

    /// Delete an order: existence check captures the prior state, the
    /// mirror goes first (verified), then the record, then the notification
    ///
    /// Deleting the document before the record means a failed document
    /// delete leaves the record intact rather than orphaning a record with
    /// no mirror.
    pub async fn delete(&self, order_id: &str) -> ProcessorResult<()> {
        let existing = self
            .records
            .get(order_id)
            .await?
            .ok_or_else(|| ProcessorError::OrderNotFound(order_id.to_string()))?;

        tracing::info!(order_id, status = %existing.status, "Deleting order");
        self.documents.delete_document(order_id).await?;
        self.records.delete(order_id).await?;

        self.notifier
            .publish(
                OrderNotification::new(
                    OrderEventType::OrderDeleted,
                    order_id,
                    existing.status,
                    &existing.customer_id,
                )
                .with_previous_status(existing.status),
            )
            .await?;

        tracing::info!(order_id, "Order deleted");
        Ok(())
    }

    /// List every order; no ordering guarantee
    pub async fn list(&self) -> ProcessorResult<Vec<Order>> {
        Ok(self.records.list_all().await?)
    }

    /// Read the mirrored document for an order
    pub async fn get_document(&self, order_id: &str) -> ProcessorResult<serde_json::Value> {
        Ok(self.documents.get_document(order_id).await?)
    }
}
