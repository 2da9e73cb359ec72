//! Order ledger
//!
//! - [`ledger`] - `OrderLedger`: pending order, checkout, restock
//! - [`pending`] - the customer's cart with one-step undo
//! - [`money`] - decimal rounding helpers
//! - [`error`] - `LedgerError` and its `AppError` mapping

pub mod error;
pub mod ledger;
pub mod money;
pub mod pending;

pub use error::{Field, LedgerError, LedgerResult};
pub use ledger::{OrderLedger, QuantityChange, RestockOutcome};
pub use pending::{PendingOrder, RemovedLine};
