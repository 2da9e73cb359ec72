//! Money calculation utilities
//!
//! Prices are exact `Decimal`s end to end. Line totals are rounded to cents
//! (half-up) once, and the order total is the sum of the rounded lines, so a
//! receipt always adds up.

use rust_decimal::prelude::*;

/// Rounding precision for monetary values (2 decimal places, half-up)
pub const DECIMAL_PLACES: u32 = 2;

/// Round to cents, half away from zero
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// `unit_price * quantity`, rounded. `None` if the product overflows `Decimal`.
pub fn line_total(unit_price: Decimal, quantity: i32) -> Option<Decimal> {
    unit_price
        .checked_mul(Decimal::from(quantity))
        .map(round_money)
}

/// Sum of already-rounded amounts. `None` on overflow.
pub fn sum_totals<I>(amounts: I) -> Option<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(v))
}
