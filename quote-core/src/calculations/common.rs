//! Rounding and display helpers shared by the totals and the renderer.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use quote_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(37.404)), dec!(37.40));
/// assert_eq!(round_half_up(dec!(37.405)), dec!(37.41));
/// assert_eq!(round_half_up(dec!(-0.005)), dec!(-0.01));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats an amount with exactly two decimals (`1234.5` → `"1234.50"`).
pub fn format_amount(value: Decimal) -> String {
    let mut rounded = round_half_up(value);
    rounded.rescale(2);
    rounded.to_string()
}

/// Formats a percentage without trailing zeros (`10.0` → `"10"`).
pub fn format_percent(value: Decimal) -> String {
    value.normalize().to_string()
}
