//! Conversion between decimal values and the integer minor units stored in the database.
//!
//! Amounts are kept in cents and hours in hundredths of an hour, both exposed as decimals with
//! two places.

use rust_decimal::{prelude::ToPrimitive, Decimal};

pub const SCALE: u32 = 2;

pub fn from_minor_units(minor: i64) -> Decimal {
    Decimal::new(minor, SCALE)
}

/// Converts `value` to minor units.
///
/// Returns `None` when the value has more than two significant decimal places or does not fit
/// in an `i64`.
pub fn to_minor_units(value: Decimal) -> Option<i64> {
    if value.normalize().scale() > SCALE {
        return None;
    }

    value.checked_mul(Decimal::ONE_HUNDRED)?.trunc().to_i64()
}

/// Divides a minor unit total by `count`, rounded to two places, zero when `count` is zero
pub fn average_of_minor_units(total: i64, count: u64) -> Decimal {
    if count == 0 {
        return Decimal::ZERO;
    }

    let mut average = (from_minor_units(total) / Decimal::from(count)).round_dp(SCALE);
    average.rescale(SCALE);

    average
}
