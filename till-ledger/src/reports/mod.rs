//! Sales reports
//!
//! Read-only views over the sales log and the inventory.

use crate::orders::money;
use crate::sales::{SalesLog, StorageResult};
use chrono::{DateTime, Duration, NaiveTime, Utc};
use rust_decimal::Decimal;
use shared::models::{Inventory, LowStockItem, SalesSummary, SummaryPeriod};
use std::collections::HashSet;

/// Start of the reporting window ending at `now`
pub fn period_start(period: SummaryPeriod, now: DateTime<Utc>) -> DateTime<Utc> {
    match period {
        // 按 UTC 零点切日
        SummaryPeriod::Daily => now.date_naive().and_time(NaiveTime::MIN).and_utc(),
        SummaryPeriod::Weekly => now - Duration::days(7),
        SummaryPeriod::Monthly => now - Duration::days(30),
        SummaryPeriod::AllTime => DateTime::<Utc>::UNIX_EPOCH,
    }
}

/// Aggregate sales in `[period_start(period, now), now]`
pub fn sales_summary(
    log: &dyn SalesLog,
    period: SummaryPeriod,
    now: DateTime<Utc>,
) -> StorageResult<SalesSummary> {
    let start = period_start(period, now);
    let rows = log.query_between(start, now)?;

    let orders: HashSet<&str> = rows.iter().map(|r| r.order_id.as_str()).collect();
    // 跨订单累加按饱和处理
    let total_income = money::round_money(
        rows.iter()
            .fold(Decimal::ZERO, |acc, r| acc.saturating_add(r.line_total)),
    );
    let total_items = rows.iter().map(|r| i64::from(r.quantity)).sum();

    Ok(SalesSummary {
        period,
        start,
        end: now,
        total_income,
        total_items,
        orders_count: orders.len(),
    })
}

/// Items with `quantity <= threshold`, sorted by key
pub fn low_stock(inventory: &Inventory, threshold: i32) -> Vec<LowStockItem> {
    inventory
        .iter()
        .filter(|(_, item)| item.quantity <= threshold)
        .map(|(key, item)| LowStockItem {
            item: key.clone(),
            quantity: item.quantity,
        })
        .collect()
}
