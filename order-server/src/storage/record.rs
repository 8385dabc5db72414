//! redb-backed record store
//!
//! A single table keyed by order id, values JSON-serialized [`Order`]
//! records. redb commits are durable as soon as `commit()` returns
//! (copy-on-write with atomic pointer swap), so a crash never leaves the
//! store in an inconsistent state.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use shared::order::{Order, OrderStatus};

use super::{RecordStore, RecordStoreError, RecordStoreResult};

/// Table for order records: key = order_id, value = JSON-serialized Order
const ORDERS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("orders");

impl From<redb::DatabaseError> for RecordStoreError {
    fn from(err: redb::DatabaseError) -> Self {
        RecordStoreError::Storage(err.to_string())
    }
}

impl From<redb::TransactionError> for RecordStoreError {
    fn from(err: redb::TransactionError) -> Self {
        RecordStoreError::Storage(err.to_string())
    }
}

impl From<redb::TableError> for RecordStoreError {
    fn from(err: redb::TableError) -> Self {
        RecordStoreError::Storage(err.to_string())
    }
}

impl From<redb::StorageError> for RecordStoreError {
    fn from(err: redb::StorageError) -> Self {
        RecordStoreError::Storage(err.to_string())
    }
}

impl From<redb::CommitError> for RecordStoreError {
    fn from(err: redb::CommitError) -> Self {
        RecordStoreError::Storage(err.to_string())
    }
}

/// Order record store backed by redb
#[derive(Clone)]
pub struct RedbRecordStore {
    db: Arc<Database>,
}

impl RedbRecordStore {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> RecordStoreResult<Self> {
        let db = Database::create(path)?;

        // Create the table if it does not exist yet
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(ORDERS_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    fn read_order(&self, order_id: &str) -> RecordStoreResult<Option<Order>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ORDERS_TABLE)?;
        match table.get(order_id)? {
            Some(raw) => Ok(Some(serde_json::from_slice(raw.value())?)),
            None => Ok(None),
        }
    }

    fn write_order(&self, order: &Order) -> RecordStoreResult<()> {
        let raw = serde_json::to_vec(order)?;
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(ORDERS_TABLE)?;
            table.insert(order.order_id.as_str(), raw.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }
}

#[async_trait]
impl RecordStore for RedbRecordStore {
    async fn save(&self, order: &Order) -> RecordStoreResult<Order> {
        tracing::debug!(order_id = %order.order_id, "Saving order record");
        self.write_order(order)?;
        Ok(order.clone())
    }

    async fn get(&self, order_id: &str) -> RecordStoreResult<Option<Order>> {
        self.read_order(order_id)
    }

    async fn update_status(
        &self,
        order_id: &str,
        status: OrderStatus,
    ) -> RecordStoreResult<Order> {
        let mut order = self
            .read_order(order_id)?
            .ok_or_else(|| RecordStoreError::OrderNotFound(order_id.to_string()))?;

        order.status = status;
        order.updated_at = Utc::now();
        self.write_order(&order)?;
        Ok(order)
    }

    async fn delete(&self, order_id: &str) -> RecordStoreResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(ORDERS_TABLE)?;
            table.remove(order_id)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    async fn list_all(&self) -> RecordStoreResult<Vec<Order>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ORDERS_TABLE)?;

        let mut orders = Vec::new();
        for entry in table.iter()? {
            let (_, raw) = entry?;
            orders.push(serde_json::from_slice(raw.value())?);
        }
        Ok(orders)
    }
}
