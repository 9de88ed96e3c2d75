//! Common utility functions for tax calculations.

use rust_decimal::Decimal;

/// Rounds a decimal value to the nearest whole currency unit using half-up
/// rounding (midpoint away from zero).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use savings_core::calculations::common::round_to_unit;
///
/// assert_eq!(round_to_unit(dec!(7800.4)), dec!(7800));
/// assert_eq!(round_to_unit(dec!(7800.5)), dec!(7801));
/// assert_eq!(round_to_unit(dec!(-32200.5)), dec!(-32201)); // Away from zero
/// ```
pub fn round_to_unit(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the maximum of two decimal values.
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}
