//! Domain models shared by the ledger and its callers

pub mod inventory;
pub mod receipt;
pub mod report;
pub mod sale;

pub use inventory::{
    DEFAULT_CATEGORY, DEFAULT_DESCRIPTION, Inventory, InventoryItem, display_name, normalize_key,
};
pub use receipt::Receipt;
pub use report::{LowStockItem, SalesSummary, SummaryPeriod};
pub use sale::{SaleLine, SaleRecord};
