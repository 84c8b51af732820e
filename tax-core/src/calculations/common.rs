//! Common utility functions for declaration calculations.
//!
//! Amounts are whole Rials held in `i64`; rates are exact [`Decimal`]s.
//! Multiplying an amount by a rate truncates toward zero, so a fractional
//! Rial is never carried into the tax due.

use rust_decimal::{Decimal, prelude::ToPrimitive};

use crate::calculations::CalculationError;

/// Multiplies a Rial amount by a rate and truncates the result to whole Rials.
///
/// # Errors
///
/// Returns [`CalculationError::Overflow`] if the product does not fit in an `i64`.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::apply_rate;
///
/// assert_eq!(apply_rate(50_000_000, dec!(0.15)).unwrap(), 7_500_000);
/// assert_eq!(apply_rate(999, dec!(0.05)).unwrap(), 49); // 49.95 truncated
/// ```
pub fn apply_rate(
    amount: i64,
    rate: Decimal,
) -> Result<i64, CalculationError> {
    Decimal::from(amount)
        .checked_mul(rate)
        .and_then(|product| product.trunc().to_i64())
        .ok_or(CalculationError::Overflow("rate application"))
}

/// Formats a rate as a percentage label with `decimals` fractional digits.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::rate_percent;
///
/// assert_eq!(rate_percent(dec!(0.15), 0), "15%");
/// assert_eq!(rate_percent(dec!(0.05), 1), "5.0%");
/// ```
pub fn rate_percent(
    rate: Decimal,
    decimals: u32,
) -> String {
    let percent = (rate * Decimal::ONE_HUNDRED).round_dp(decimals);
    format!("{:.*}%", decimals as usize, percent)
}

/// Adds two amounts, naming the quantity in the error on overflow.
pub fn checked_add(
    a: i64,
    b: i64,
    what: &'static str,
) -> Result<i64, CalculationError> {
    a.checked_add(b).ok_or(CalculationError::Overflow(what))
}

/// Subtracts `b` from `a`, naming the quantity in the error on overflow.
pub fn checked_sub(
    a: i64,
    b: i64,
    what: &'static str,
) -> Result<i64, CalculationError> {
    a.checked_sub(b).ok_or(CalculationError::Overflow(what))
}
