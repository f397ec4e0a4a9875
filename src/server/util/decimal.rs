//! Exact arithmetic for hour and salary amounts.
//!
//! Amounts are stored as `f64` columns but every sum and comparison goes through
//! [`Decimal`] rounded to two places, so `0.1 + 16.1 + 7.8` is exactly `24`.

use rust_decimal::{
    prelude::{FromPrimitive, ToPrimitive},
    Decimal, RoundingStrategy,
};

/// Amounts keep two decimal places, matching the `DECIMAL(_, 2)` precision of the domain.
pub const DECIMAL_PLACES: u32 = 2;

/// Converts a stored or client supplied amount to a `Decimal` rounded to two places.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value)
        .unwrap_or_default()
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Converts a `Decimal` back to `f64` for storage or output, rounded to two places.
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Rounds an amount to the stored precision.
pub fn round_amount(value: f64) -> f64 {
    to_f64(to_decimal(value))
}

/// Adds amounts without accumulating binary floating point error.
pub fn sum<I>(values: I) -> Decimal
where
    I: IntoIterator<Item = f64>,
{
    values.into_iter().map(to_decimal).sum()
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    /// Expect tenths that drift in binary floating point to add up exactly
    #[test]
    fn sums_exactly() {
        assert_eq!(sum([0.1, 16.1, 7.8]), Decimal::from(24));
        assert_eq!(sum([0.1, 16.1]).to_string(), "16.2");
        assert_eq!(sum(Vec::<f64>::new()), Decimal::ZERO);
    }

    /// Expect amounts beyond two places to round half away from zero
    #[test]
    fn rounds_to_two_places() {
        assert_eq!(round_amount(7.125), 7.13);
        assert_eq!(round_amount(60_000.0), 60_000.0);
        assert_eq!(to_f64(sum([0.1, 0.2])), 0.3);
    }
}
