//! Order lifecycle core
//!
//! [`validate`] checks inbound payloads before any side effect, [`money`]
//! normalizes them into exact-decimal records, and [`processor`] sequences
//! each lifecycle operation across the record store, document mirror, and
//! notification bus.

pub mod money;
pub mod processor;
pub mod validate;

// Re-exports
pub use processor::OrderProcessor;

use thiserror::Error;

use crate::notify::NotifyError;
use crate::storage::{DocumentStoreError, RecordStoreError};

/// Errors surfaced by the order lifecycle operations
#[derive(Debug, Error)]
pub enum ProcessorError {
    /// Bad input, rejected before any side effect. The message names the
    /// offending field.
    #[error("{0}")]
    Validation(String),

    /// Structurally malformed data reaching the normalizer (second line of
    /// defense after validation)
    #[error("Invalid order data format: {0}")]
    Format(String),

    #[error("Order {0} not found")]
    OrderNotFound(String),

    #[error("Record store failure: {0}")]
    Record(#[from] RecordStoreError),

    #[error("Document store failure: {0}")]
    Document(#[from] DocumentStoreError),

    #[error("Notification failure: {0}")]
    Publish(#[from] NotifyError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ProcessorError {
    /// True when the error represents an absent order or document
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ProcessorError::OrderNotFound(_)
                | ProcessorError::Document(DocumentStoreError::DocumentNotFound(_))
        )
    }
}

/// Result type for lifecycle operations
pub type ProcessorResult<T> = Result<T, ProcessorError>;
