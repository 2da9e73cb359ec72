//! redb-based sales log
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `sales` | `(timestamp_millis, id)` | `SaleRecord` (JSON) | Sales rows (append-only) |
//! | `sequence_counter` | `"seq"` | `u64` | Last assigned row id |
//!
//! Keying rows by timestamp first makes period queries a plain range scan.
//!
//! # Durability
//!
//! redb commits with `Durability::Immediate` by default: once `commit()`
//! returns the order is on disk, and a crash mid-transaction leaves none of
//! its rows behind.

use super::SalesLog;
use chrono::{DateTime, Utc};
use redb::{
    Database, ReadableDatabase, ReadableTable, ReadableTableMetadata, TableDefinition,
};
use shared::models::{SaleLine, SaleRecord};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Sales rows: key = (timestamp millis, row id), value = JSON-serialized SaleRecord
const SALES_TABLE: TableDefinition<(i64, u64), &[u8]> = TableDefinition::new("sales");

/// Row id counter: key = "seq", value = last assigned id
const SEQUENCE_TABLE: TableDefinition<&str, u64> = TableDefinition::new("sequence_counter");

const SEQUENCE_KEY: &str = "seq";

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Sales log backed by redb
#[derive(Clone)]
pub struct SalesStorage {
    db: Arc<Database>,
}

impl SalesStorage {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Open an in-memory database (for testing)
    #[cfg(test)]
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StorageResult<Self> {
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(SALES_TABLE)?;
            let mut seq_table = write_txn.open_table(SEQUENCE_TABLE)?;
            if seq_table.get(SEQUENCE_KEY)?.is_none() {
                seq_table.insert(SEQUENCE_KEY, 0u64)?;
            }
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Last assigned row id
    pub fn current_sequence(&self) -> StorageResult<u64> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(SEQUENCE_TABLE)?;
        Ok(table
            .get(SEQUENCE_KEY)?
            .map(|guard| guard.value())
            .unwrap_or(0))
    }

    /// Number of stored rows
    pub fn count(&self) -> StorageResult<u64> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(SALES_TABLE)?;
        Ok(table.len()?)
    }
}

impl SalesLog for SalesStorage {
    fn append_order(
        &self,
        order_id: &str,
        payment_method: &str,
        timestamp: DateTime<Utc>,
        lines: &[SaleLine],
    ) -> StorageResult<()> {
        let ts = timestamp.timestamp_millis();

        // Dropping the transaction on any early return aborts it
        let txn = self.db.begin_write()?;
        {
            let mut seq_table = txn.open_table(SEQUENCE_TABLE)?;
            let mut seq = seq_table
                .get(SEQUENCE_KEY)?
                .map(|guard| guard.value())
                .unwrap_or(0);

            let mut sales = txn.open_table(SALES_TABLE)?;
            for line in lines {
                seq += 1;
                let record = SaleRecord::from_line(seq, order_id, payment_method, timestamp, line);
                let bytes = serde_json::to_vec(&record)?;
                sales.insert((ts, seq), bytes.as_slice())?;
            }

            seq_table.insert(SEQUENCE_KEY, seq)?;
        }
        txn.commit()?;

        tracing::debug!(order_id = %order_id, lines = lines.len(), "Sales rows appended");
        Ok(())
    }

    fn query_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StorageResult<Vec<SaleRecord>> {
        if start > end {
            return Ok(Vec::new());
        }

        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(SALES_TABLE)?;

        let lower = (start.timestamp_millis(), 0u64);
        let upper = (end.timestamp_millis(), u64::MAX);

        let mut records = Vec::new();
        for entry in table.range(lower..=upper)? {
            let (_, value) = entry?;
            let record: SaleRecord = serde_json::from_slice(value.value())?;
            // keys are millisecond-truncated
            if record.timestamp >= start && record.timestamp <= end {
                records.push(record);
            }
        }
        Ok(records)
    }

    fn all_sales(&self) -> StorageResult<Vec<SaleRecord>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(SALES_TABLE)?;

        let mut records = Vec::new();
        for entry in table.iter()? {
            let (_, value) = entry?;
            records.push(serde_json::from_slice::<SaleRecord>(value.value())?);
        }
        records.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(records)
    }
}
