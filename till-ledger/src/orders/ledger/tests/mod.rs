//! OrderLedger tests
//!
//! - test_core: pending order operations, undo, restock, price updates
//! - test_checkout: checkout success, stock re-check, persistence rollback
//! - test_boundary: randomized operation sequences

mod test_core;

use super::*;
use crate::catalog::{CatalogError, CatalogResult};
use crate::sales::{SalesStorage, StorageError, StorageResult};
use chrono::DateTime;
use shared::models::SaleRecord;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::str::FromStr;

pub(super) fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Catalog double: shares its saved snapshot with the test and can be told to fail
#[derive(Clone, Default)]
pub(super) struct MemoryCatalog {
    saved: Rc<RefCell<Inventory>>,
    saves: Rc<Cell<usize>>,
    fail_saves: Rc<Cell<bool>>,
}

impl MemoryCatalog {
    pub(super) fn with_items(items: &[(&str, i32, &str)]) -> Self {
        let catalog = Self::default();
        {
            let mut saved = catalog.saved.borrow_mut();
            for (key, quantity, price) in items {
                saved.insert(
                    key.to_string(),
                    InventoryItem::new(*quantity, dec(price), "", ""),
                );
            }
        }
        catalog
    }

    pub(super) fn snapshot(&self) -> Inventory {
        self.saved.borrow().clone()
    }

    pub(super) fn save_count(&self) -> usize {
        self.saves.get()
    }

    pub(super) fn set_failing(&self, fail: bool) {
        self.fail_saves.set(fail);
    }
}

impl CatalogStore for MemoryCatalog {
    fn load(&self) -> Inventory {
        self.saved.borrow().clone()
    }

    fn save(&self, inventory: &Inventory) -> CatalogResult<()> {
        if self.fail_saves.get() {
            return Err(CatalogError::Io(std::io::Error::other("disk unplugged")));
        }
        self.saves.set(self.saves.get() + 1);
        *self.saved.borrow_mut() = inventory.clone();
        Ok(())
    }
}

/// Sales log that rejects every append
pub(super) struct FailingSalesLog;

impl SalesLog for FailingSalesLog {
    fn append_order(
        &self,
        _order_id: &str,
        _payment_method: &str,
        _timestamp: DateTime<Utc>,
        _lines: &[SaleLine],
    ) -> StorageResult<()> {
        Err(StorageError::Io(std::io::Error::other("sales log offline")))
    }

    fn query_between(
        &self,
        _start: DateTime<Utc>,
        _end: DateTime<Utc>,
    ) -> StorageResult<Vec<SaleRecord>> {
        Ok(Vec::new())
    }

    fn all_sales(&self) -> StorageResult<Vec<SaleRecord>> {
        Ok(Vec::new())
    }
}

/// Ledger over an in-memory catalog and an in-memory redb sales log
pub(super) fn ledger_with(items: &[(&str, i32, &str)]) -> (OrderLedger, MemoryCatalog) {
    let catalog = MemoryCatalog::with_items(items);
    let sales = SalesStorage::open_in_memory().unwrap();
    let ledger = OrderLedger::open(Box::new(catalog.clone()), Box::new(sales));
    (ledger, catalog)
}
