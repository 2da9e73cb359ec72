//! Sale Models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One priced line of a completed order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleLine {
    /// Item key
    pub item: String,
    pub quantity: i32,
    /// Unit price at time of sale
    pub unit_price: Decimal,
    /// `unit_price * quantity`, rounded to 2 decimals
    pub line_total: Decimal,
}

/// Persisted sales log row (one per order line, immutable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    /// Log-assigned sequence number
    pub id: u64,
    /// Shared by every line of the same checkout
    pub order_id: String,
    pub item: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub line_total: Decimal,
    pub payment_method: String,
    pub timestamp: DateTime<Utc>,
}

impl SaleRecord {
    pub fn from_line(
        id: u64,
        order_id: &str,
        payment_method: &str,
        timestamp: DateTime<Utc>,
        line: &SaleLine,
    ) -> Self {
        Self {
            id,
            order_id: order_id.to_string(),
            item: line.item.clone(),
            quantity: line.quantity,
            unit_price: line.unit_price,
            line_total: line.line_total,
            payment_method: payment_method.to_string(),
            timestamp,
        }
    }
}
