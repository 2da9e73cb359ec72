//! Shared types for the till
//!
//! Domain models (inventory, sales, receipts, reports) and the unified
//! error-code system used by the ledger and by any presentation layer that
//! drives it.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use serde::{Deserialize, Serialize};
