//! Common decimal helpers used by the currency formatter.
//!
//! Money is rounded and padded in [`Decimal`] rather than `f64` so that the
//! displayed digits follow a single, predictable rounding rule.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to `fraction_digits` places using half-even rounding.
///
/// Values exactly at the midpoint go to the neighbour whose last digit is
/// even, the default rounding mode of locale currency formatters.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tip_core::calculations::common::round_half_even;
///
/// assert_eq!(round_half_even(dec!(123.454), 2), dec!(123.45));
/// assert_eq!(round_half_even(dec!(123.455), 2), dec!(123.46));
/// assert_eq!(round_half_even(dec!(0.045), 2), dec!(0.04));
/// assert_eq!(round_half_even(dec!(-123.445), 2), dec!(-123.44));
/// assert_eq!(round_half_even(dec!(29.5), 0), dec!(30));
/// ```
pub fn round_half_even(
    value: Decimal,
    fraction_digits: u32,
) -> Decimal {
    value.round_dp_with_strategy(fraction_digits, RoundingStrategy::MidpointNearestEven)
}

/// Rounds `value` half-even and pads it with trailing zeros so that it
/// carries exactly `fraction_digits` decimal places.
///
/// Padding needs room in the 96-bit mantissa. When `value` already uses too
/// many significant digits the scale stays short, so callers must compare
/// [`Decimal::scale`] against `fraction_digits`.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tip_core::calculations::common::to_fixed_places;
///
/// assert_eq!(to_fixed_places(dec!(30), 2).to_string(), "30.00");
/// assert_eq!(to_fixed_places(dec!(1.851), 2).to_string(), "1.85");
/// assert_eq!(to_fixed_places(dec!(29.5), 0).to_string(), "30");
/// ```
pub fn to_fixed_places(
    value: Decimal,
    fraction_digits: u32,
) -> Decimal {
    let mut fixed = round_half_even(value, fraction_digits);
    fixed.rescale(fraction_digits);
    fixed
}
