//! OrderLedger - inventory, pending order and checkout
//!
//! The ledger owns the in-memory inventory and the current customer's pending
//! order. Every inventory mutation is written through to the catalog store
//! before the call returns; completed orders go to the sales log.
//!
//! # Checkout Flow
//!
//! ```text
//! checkout(payment_method)
//!     ├─ 1. Reject empty order / blank payment method
//!     ├─ 2. Re-check stock and price every line (no mutation yet)
//!     ├─ 3. Decrement inventory in memory
//!     ├─ 4. Persist inventory snapshot   ── fail → revert memory, keep order
//!     ├─ 5. Append lines to sales log    ── fail → revert memory, persist rollback
//!     ├─ 6. Clear pending order
//!     └─ 7. Return receipt
//! ```
//!
//! A crash between steps 4 and 5 leaves stock decremented with no sale row.
//! Both stores would have to share one transaction to close that window.

use super::error::{Field, LedgerError, LedgerResult};
use super::money;
use super::pending::{PendingOrder, RemovedLine};
use crate::catalog::CatalogStore;
use crate::sales::SalesLog;
use chrono::Utc;
use rust_decimal::Decimal;
use shared::models::{
    Inventory, InventoryItem, LowStockItem, Receipt, SaleLine, normalize_key,
};

#[cfg(test)]
mod tests;

/// Result of [`OrderLedger::adjust_order_quantity`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    Updated(i32),
    /// Quantity dropped to zero or below; the line went to the undo slot
    Removed,
}

/// Result of [`OrderLedger::restock_or_define_item`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestockOutcome {
    Created,
    Updated { quantity: i32 },
}

pub struct OrderLedger {
    inventory: Inventory,
    pending: PendingOrder,
    catalog: Box<dyn CatalogStore>,
    sales: Box<dyn SalesLog>,
}

impl std::fmt::Debug for OrderLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderLedger")
            .field("inventory", &self.inventory.len())
            .field("pending", &self.pending)
            .field("catalog", &"<CatalogStore>")
            .field("sales", &"<SalesLog>")
            .finish()
    }
}

impl OrderLedger {
    /// Load the inventory from `catalog` and start with an empty order
    pub fn open(catalog: Box<dyn CatalogStore>, sales: Box<dyn SalesLog>) -> Self {
        let inventory = catalog.load();
        tracing::info!(items = inventory.len(), "Order ledger opened");
        Self {
            inventory,
            pending: PendingOrder::new(),
            catalog,
            sales,
        }
    }

    // ========== Accessors ==========

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn item(&self, item: &str) -> Option<&InventoryItem> {
        self.inventory.get(&normalize_key(item))
    }

    pub fn pending(&self) -> &PendingOrder {
        &self.pending
    }

    /// The line [`undo_last_removal`](Self::undo_last_removal) would restore
    pub fn last_removed(&self) -> Option<&RemovedLine> {
        self.pending.last_removed()
    }

    pub fn sales_log(&self) -> &dyn SalesLog {
        self.sales.as_ref()
    }

    // ========== Pending order ==========

    /// Add `quantity` units to the pending order, returning the new pending quantity
    pub fn add_to_order(&mut self, item: &str, quantity: i32) -> LedgerResult<i32> {
        let key = item_key(item)?;
        let available = self.stock_of(&key)?;
        if quantity <= 0 {
            return Err(LedgerError::InvalidQuantity(quantity));
        }

        let existing = self.pending.get(&key).unwrap_or(0);
        let requested = i64::from(existing) + i64::from(quantity);
        check_stock(&key, requested, available)?;

        // requested <= available, so it fits in i32
        let new_quantity = requested as i32;
        self.pending.set(&key, new_quantity);
        tracing::debug!(item = %key, quantity = new_quantity, "Item added to order");
        Ok(new_quantity)
    }

    /// Change a pending line by `delta`. A result of zero or below removes the line.
    pub fn adjust_order_quantity(&mut self, item: &str, delta: i32) -> LedgerResult<QuantityChange> {
        let key = item_key(item)?;
        let current = self
            .pending
            .get(&key)
            .ok_or_else(|| LedgerError::NotInOrder(key.clone()))?;

        let requested = i64::from(current) + i64::from(delta);
        if requested <= 0 {
            self.pending.remove(&key);
            tracing::debug!(item = %key, "Order line removed by adjustment");
            return Ok(QuantityChange::Removed);
        }

        let available = self.inventory.get(&key).map_or(0, |i| i.quantity);
        check_stock(&key, requested, available)?;

        let new_quantity = requested as i32;
        self.pending.set(&key, new_quantity);
        Ok(QuantityChange::Updated(new_quantity))
    }

    /// Remove a line if present. Returns whether anything was removed.
    pub fn remove_from_order(&mut self, item: &str) -> bool {
        let key = normalize_key(item);
        let removed = self.pending.remove(&key).is_some();
        if removed {
            tracing::debug!(item = %key, "Order line removed");
        }
        removed
    }

    /// Put the most recently removed line back.
    ///
    /// `Ok(None)` when there is nothing to undo. If stock no longer covers the
    /// line the undo slot is kept, so it can be retried after a restock.
    pub fn undo_last_removal(&mut self) -> LedgerResult<Option<RemovedLine>> {
        let Some(line) = self.pending.last_removed().cloned() else {
            return Ok(None);
        };

        let available = self.inventory.get(&line.item).map_or(0, |i| i.quantity);
        let current = self.pending.get(&line.item).unwrap_or(0);
        let requested = i64::from(current) + i64::from(line.quantity);
        check_stock(&line.item, requested, available)?;

        self.pending.set(&line.item, requested as i32);
        self.pending.take_last_removed();
        tracing::debug!(item = %line.item, quantity = line.quantity, "Order line restored");
        Ok(Some(line))
    }

    /// Cancel the pending order
    pub fn clear_order(&mut self) {
        if !self.pending.is_empty() {
            tracing::info!(lines = self.pending.len(), "Pending order cancelled");
        }
        self.pending.clear();
    }

    // ========== Checkout ==========

    pub fn checkout(&mut self, payment_method: &str) -> LedgerResult<Receipt> {
        if self.pending.is_empty() {
            return Err(LedgerError::EmptyOrder);
        }
        let payment_method = payment_method.trim().to_lowercase();
        if payment_method.is_empty() {
            return Err(LedgerError::invalid(Field::PaymentMethod, "must not be empty"));
        }

        let lines = self.price_pending_lines()?;
        let total = money::sum_totals(lines.iter().map(|l| l.line_total))
            .ok_or_else(|| LedgerError::invalid(Field::Price, "order total is out of range"))?;

        self.take_stock(&lines);
        if let Err(e) = self.catalog.save(&self.inventory) {
            self.return_stock(&lines);
            tracing::error!(error = %e, "Failed to persist inventory, checkout aborted");
            return Err(e.into());
        }

        let order_id = shared::util::order_token();
        let created_at = Utc::now();
        if let Err(e) = self
            .sales
            .append_order(&order_id, &payment_method, created_at, &lines)
        {
            tracing::error!(order_id = %order_id, error = %e, "Sales log append failed, rolling back inventory");
            self.return_stock(&lines);
            if let Err(save_err) = self.catalog.save(&self.inventory) {
                tracing::error!(error = %save_err, "Failed to persist inventory rollback");
            }
            return Err(e.into());
        }

        self.pending.clear();

        let receipt = Receipt {
            order_id,
            payment_method,
            created_at,
            lines,
            total,
        };
        crate::audit_log!(
            "checkout",
            &receipt.order_id,
            format!(
                "lines={} items={} total={} payment={}",
                receipt.lines.len(),
                receipt.item_count(),
                receipt.total,
                receipt.payment_method
            )
        );
        tracing::info!(order_id = %receipt.order_id, total = %receipt.total, "Checkout completed");
        Ok(receipt)
    }

    /// Validate every pending line against current stock and price it.
    ///
    /// Fails on the first line (in insertion order) that stock can't cover.
    fn price_pending_lines(&self) -> LedgerResult<Vec<SaleLine>> {
        let mut lines = Vec::with_capacity(self.pending.len());
        for (key, quantity) in self.pending.iter() {
            let item = self
                .inventory
                .get(key)
                .ok_or_else(|| LedgerError::ItemNotFound(key.to_string()))?;
            check_stock(key, i64::from(quantity), item.quantity)?;
            let line_total = money::line_total(item.price, quantity).ok_or_else(|| {
                LedgerError::invalid(Field::Price, format!("line total for {key} is out of range"))
            })?;

            lines.push(SaleLine {
                item: key.to_string(),
                quantity,
                unit_price: item.price,
                line_total,
            });
        }
        Ok(lines)
    }

    fn take_stock(&mut self, lines: &[SaleLine]) {
        for line in lines {
            if let Some(item) = self.inventory.get_mut(&line.item) {
                item.quantity -= line.quantity;
            }
        }
    }

    fn return_stock(&mut self, lines: &[SaleLine]) {
        for line in lines {
            if let Some(item) = self.inventory.get_mut(&line.item) {
                item.quantity += line.quantity;
            }
        }
    }

    // ========== Catalog maintenance ==========

    /// Add stock to an existing item, or define a new one.
    ///
    /// For existing items, `price` only applies when > 0 and description or
    /// category only when non-blank.
    pub fn restock_or_define_item(
        &mut self,
        item: &str,
        quantity: i32,
        price: Decimal,
        description: &str,
        category: &str,
    ) -> LedgerResult<RestockOutcome> {
        let key = item_key(item)?;
        if quantity < 0 {
            return Err(LedgerError::invalid(Field::Quantity, "must not be negative"));
        }
        if price < Decimal::ZERO {
            return Err(LedgerError::invalid(Field::Price, "must not be negative"));
        }

        let previous = self.inventory.get(&key).cloned();
        let (updated, outcome) = match &previous {
            Some(existing) => {
                let new_quantity = existing
                    .quantity
                    .checked_add(quantity)
                    .ok_or_else(|| LedgerError::invalid(Field::Quantity, "stock level overflow"))?;
                let mut updated = existing.clone();
                updated.quantity = new_quantity;
                if price > Decimal::ZERO {
                    updated.price = price;
                }
                if !description.trim().is_empty() {
                    updated.description = description.trim().to_string();
                }
                if !category.trim().is_empty() {
                    updated.category = category.trim().to_string();
                }
                (updated, RestockOutcome::Updated { quantity: new_quantity })
            }
            None => (
                InventoryItem::new(quantity, price, description, category),
                RestockOutcome::Created,
            ),
        };

        self.inventory.insert(key.clone(), updated);
        self.persist_or_restore(&key, previous)?;

        crate::audit_log!("restock", &key, format!("added={} outcome={:?}", quantity, outcome));
        tracing::info!(item = %key, added = quantity, "Item restocked");
        Ok(outcome)
    }

    pub fn update_item_price(&mut self, item: &str, price: Decimal) -> LedgerResult<()> {
        let key = item_key(item)?;
        if price < Decimal::ZERO {
            return Err(LedgerError::invalid(Field::Price, "must not be negative"));
        }
        let previous = self
            .inventory
            .get(&key)
            .cloned()
            .ok_or_else(|| LedgerError::ItemNotFound(key.clone()))?;

        let old_price = previous.price;
        let mut updated = previous.clone();
        updated.price = price;
        self.inventory.insert(key.clone(), updated);
        self.persist_or_restore(&key, Some(previous))?;

        crate::audit_log!("price_change", &key, format!("{} -> {}", old_price, price));
        Ok(())
    }

    /// Items with `quantity <= threshold`, sorted by key
    pub fn low_stock_items(&self, threshold: i32) -> Vec<LowStockItem> {
        crate::reports::low_stock(&self.inventory, threshold)
    }

    /// Save the catalog; on failure put `previous` back (or drop a newly created key)
    fn persist_or_restore(&mut self, key: &str, previous: Option<InventoryItem>) -> LedgerResult<()> {
        let Err(e) = self.catalog.save(&self.inventory) else {
            return Ok(());
        };
        match previous {
            Some(item) => {
                self.inventory.insert(key.to_string(), item);
            }
            None => {
                self.inventory.remove(key);
            }
        }
        tracing::error!(item = %key, error = %e, "Failed to persist catalog, change reverted");
        Err(e.into())
    }

    fn stock_of(&self, key: &str) -> LedgerResult<i32> {
        self.inventory
            .get(key)
            .map(|i| i.quantity)
            .ok_or_else(|| LedgerError::ItemNotFound(key.to_string()))
    }
}

fn item_key(raw: &str) -> LedgerResult<String> {
    let key = normalize_key(raw);
    if key.is_empty() {
        return Err(LedgerError::invalid(Field::Item, "name must not be empty"));
    }
    Ok(key)
}

fn check_stock(item: &str, requested: i64, available: i32) -> LedgerResult<()> {
    if requested > i64::from(available) {
        tracing::warn!(item = %item, requested, available, "Insufficient stock");
        return Err(LedgerError::InsufficientStock {
            item: item.to_string(),
            requested,
            available,
        });
    }
    Ok(())
}
