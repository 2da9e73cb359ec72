//! Report Models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Reporting window for sales summaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryPeriod {
    /// Since UTC midnight today
    Daily,
    /// Last 7 days
    Weekly,
    /// Last 30 days
    Monthly,
    /// Everything in the log
    AllTime,
}

impl SummaryPeriod {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::AllTime => "all_time",
        }
    }
}

impl From<&str> for SummaryPeriod {
    /// Unknown names fall back to [`SummaryPeriod::AllTime`]
    fn from(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "daily" => Self::Daily,
            "weekly" => Self::Weekly,
            "monthly" => Self::Monthly,
            _ => Self::AllTime,
        }
    }
}

/// Aggregated sales figures for a period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesSummary {
    pub period: SummaryPeriod,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Sum of line totals, 2 decimals
    pub total_income: Decimal,
    /// Sum of quantities sold
    pub total_items: i64,
    /// Distinct order ids
    pub orders_count: usize,
}

/// Item at or below the low-stock threshold
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LowStockItem {
    pub item: String,
    pub quantity: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_from_str() {
        assert_eq!(SummaryPeriod::from("Daily"), SummaryPeriod::Daily);
        assert_eq!(SummaryPeriod::from("weekly"), SummaryPeriod::Weekly);
        assert_eq!(SummaryPeriod::from(" MONTHLY "), SummaryPeriod::Monthly);
        assert_eq!(SummaryPeriod::from("yearly"), SummaryPeriod::AllTime);
    }

    #[test]
    fn test_period_serde() {
        let json = serde_json::to_string(&SummaryPeriod::AllTime).unwrap();
        assert_eq!(json, "\"all_time\"");
        assert_eq!(SummaryPeriod::AllTime.name(), "all_time");
    }
}
