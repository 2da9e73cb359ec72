//! Append-only sales log
//!
//! Every completed checkout is written as one group of [`SaleRecord`] rows
//! sharing an order id. Rows are never updated or deleted.

pub mod export;
mod storage;

pub use export::write_receipt;
pub use storage::{SalesStorage, StorageError, StorageResult};

use chrono::{DateTime, Utc};
use shared::models::{SaleLine, SaleRecord};
use std::path::Path;

/// Persistent sales log
pub trait SalesLog {
    /// Append all lines of one order atomically (all rows or none)
    fn append_order(
        &self,
        order_id: &str,
        payment_method: &str,
        timestamp: DateTime<Utc>,
        lines: &[SaleLine],
    ) -> StorageResult<()>;

    /// Rows with `start <= timestamp <= end`, oldest first
    fn query_between(&self, start: DateTime<Utc>, end: DateTime<Utc>)
    -> StorageResult<Vec<SaleRecord>>;

    /// Every row, newest first
    fn all_sales(&self) -> StorageResult<Vec<SaleRecord>>;

    /// Dump the whole log as CSV, returning the number of rows written
    fn export_all(&self, path: &Path) -> StorageResult<usize> {
        let rows = self.all_sales()?;
        export::write_csv(path, &rows)?;
        Ok(rows.len())
    }
}
