//! Receipt Model

use super::inventory::display_name;
use super::sale::SaleLine;
use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of a successful checkout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    pub order_id: String,
    pub payment_method: String,
    pub created_at: DateTime<Utc>,
    pub lines: Vec<SaleLine>,
    /// Sum of all line totals
    pub total: Decimal,
}

impl Receipt {
    /// Total number of units sold
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity as i64).sum()
    }
}

/// Cents for display, half away from zero (`{:.2}` alone truncates)
fn cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Receipt ---")?;
        for line in &self.lines {
            writeln!(
                f,
                "{} x {} @ ${:.2} = ${:.2}",
                line.quantity,
                display_name(&line.item),
                cents(line.unit_price),
                cents(line.line_total)
            )?;
        }
        writeln!(f, "Total: ${:.2}", cents(self.total))?;
        writeln!(f, "Payment: {}", display_name(&self.payment_method))?;
        write!(f, "Order ID: {}", self.order_id)
    }
}
