//! Storage adapters
//!
//! The record store holds the authoritative order rows; the document
//! store keeps a denormalized JSON mirror of each order. Both are narrow
//! capability traits so the backing technology can be swapped without
//! touching the lifecycle orchestration.

pub mod document;
pub mod record;

// Re-exports
pub use document::FsDocumentStore;
pub use record::RedbRecordStore;

use async_trait::async_trait;
use shared::order::{Order, OrderStatus};
use thiserror::Error;

/// Record store error types
#[derive(Debug, Error)]
pub enum RecordStoreError {
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Result type for record store operations
pub type RecordStoreResult<T> = Result<T, RecordStoreError>;

/// Document store error types
#[derive(Debug, Error)]
pub enum DocumentStoreError {
    /// No document exists at the derived key
    #[error("Document not found for order {0}")]
    DocumentNotFound(String),

    /// Post-delete existence probe found the object still present
    #[error("Document still exists after deletion: {0}")]
    DeleteVerification(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for document store operations
pub type DocumentStoreResult<T> = Result<T, DocumentStoreError>;

/// Primary persistence for order records, keyed by order id
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Unconditional upsert; returns the stored record
    async fn save(&self, order: &Order) -> RecordStoreResult<Order>;

    /// Fetch by id; `Ok(None)` when the id is unknown
    async fn get(&self, order_id: &str) -> RecordStoreResult<Option<Order>>;

    /// Set the status and refresh `updated_at`, returning the full updated
    /// record. Fails with [`RecordStoreError::OrderNotFound`] on an unknown
    /// id; callers that need a clean not-found result should check
    /// existence first.
    async fn update_status(
        &self,
        order_id: &str,
        status: OrderStatus,
    ) -> RecordStoreResult<Order>;

    /// Remove the record. Removing an unknown id is not an error.
    async fn delete(&self, order_id: &str) -> RecordStoreResult<()>;

    /// Every record, with no ordering or filtering guarantee
    async fn list_all(&self) -> RecordStoreResult<Vec<Order>>;
}

/// Denormalized JSON mirror of each order, addressed by a derived key
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Store the mirror document, returning the derived location key
    async fn store_document(
        &self,
        order_id: &str,
        document: &serde_json::Value,
    ) -> DocumentStoreResult<String>;

    /// Fetch the mirror document; fails with
    /// [`DocumentStoreError::DocumentNotFound`] when absent
    async fn get_document(&self, order_id: &str) -> DocumentStoreResult<serde_json::Value>;

    /// Delete the mirror. An already-absent object counts as success, but
    /// after issuing the delete an existence probe must confirm the object
    /// is gone; a still-present object is a hard consistency failure.
    async fn delete_document(&self, order_id: &str) -> DocumentStoreResult<()>;
}
