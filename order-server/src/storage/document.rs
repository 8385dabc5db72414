//! Filesystem-backed document store
//!
//! Mirrors each order as a JSON object at a deterministic key
//! (`orders/<order_id>/order.json`) under the configured root directory.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use super::{DocumentStore, DocumentStoreError, DocumentStoreResult};

/// Document store rooted at a local directory
#[derive(Clone)]
pub struct FsDocumentStore {
    root: PathBuf,
}

impl FsDocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Derived object key for an order's mirror document
    pub fn document_key(order_id: &str) -> String {
        format!("orders/{order_id}/order.json")
    }

    fn document_path(&self, order_id: &str) -> PathBuf {
        self.root.join("orders").join(order_id).join("order.json")
    }
}

#[async_trait]
impl DocumentStore for FsDocumentStore {
    async fn store_document(
        &self,
        order_id: &str,
        document: &serde_json::Value,
    ) -> DocumentStoreResult<String> {
        let key = Self::document_key(order_id);
        let path = self.document_path(order_id);
        tracing::debug!(%key, "Storing document");

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let raw = serde_json::to_vec(document)?;
        fs::write(&path, raw).await?;

        Ok(key)
    }

    async fn get_document(&self, order_id: &str) -> DocumentStoreResult<serde_json::Value> {
        let path = self.document_path(order_id);
        let raw = match fs::read(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(DocumentStoreError::DocumentNotFound(order_id.to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_slice(&raw)?)
    }

    async fn delete_document(&self, order_id: &str) -> DocumentStoreResult<()> {
        let path = self.document_path(order_id);
        match fs::remove_file(&path).await {
            Ok(()) => {}
            // Already absent counts as success for defensive callers
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e.into()),
        }

        // Post-condition: the object must actually be gone
        if fs::try_exists(&path).await? {
            return Err(DocumentStoreError::DeleteVerification(Self::document_key(
                order_id,
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn store_and_get_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsDocumentStore::new(dir.path());

        let document = json!({"order_id": "ORD-00000001", "status": "PENDING"});
        let key = store
            .store_document("ORD-00000001", &document)
            .await
            .unwrap();
        assert_eq!(key, "orders/ORD-00000001/order.json");

        let fetched = store.get_document("ORD-00000001").await.unwrap();
        assert_eq!(fetched, document);
    }

    #[tokio::test]
    async fn store_overwrites_existing_document() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsDocumentStore::new(dir.path());

        store
            .store_document("ORD-00000002", &json!({"status": "PENDING"}))
            .await
            .unwrap();
        store
            .store_document("ORD-00000002", &json!({"status": "PROCESSING"}))
            .await
            .unwrap();

        let fetched = store.get_document("ORD-00000002").await.unwrap();
        assert_eq!(fetched["status"], "PROCESSING");
    }

    #[tokio::test]
    async fn get_missing_document_is_a_distinct_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsDocumentStore::new(dir.path());

        let err = store.get_document("ORD-ffffffff").await.unwrap_err();
        assert!(matches!(err, DocumentStoreError::DocumentNotFound(_)));
    }

    #[tokio::test]
    async fn delete_verifies_removal() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsDocumentStore::new(dir.path());

        store
            .store_document("ORD-00000003", &json!({"status": "PENDING"}))
            .await
            .unwrap();
        store.delete_document("ORD-00000003").await.unwrap();

        let err = store.get_document("ORD-00000003").await.unwrap_err();
        assert!(matches!(err, DocumentStoreError::DocumentNotFound(_)));
    }

    #[tokio::test]
    async fn delete_of_absent_document_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsDocumentStore::new(dir.path());
        store.delete_document("ORD-ffffffff").await.unwrap();
    }
}
