//! Money helpers shared by reports.
//!
//! The numeric engine works in `f64`. Amounts that leave the engine for
//! display are converted to [`Decimal`] and rounded here.

use rust_decimal::{Decimal, RoundingStrategy};

/// Converts an amount to whole crowns using half-up rounding.
///
/// Returns `None` for NaN, infinities and values outside the `Decimal` range.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use labor_tax_core::calculations::common::round_to_crowns;
///
/// assert_eq!(round_to_crowns(1234.49), Some(dec!(1234)));
/// assert_eq!(round_to_crowns(1234.5), Some(dec!(1235)));
/// assert_eq!(round_to_crowns(-1234.5), Some(dec!(-1235))); // Away from zero
/// assert_eq!(round_to_crowns(f64::NAN), None);
/// ```
pub fn round_to_crowns(amount: f64) -> Option<Decimal> {
    round_money(amount, 0)
}

/// Converts a rate to a percentage with two decimal places.
///
/// ```
/// use rust_decimal_macros::dec;
/// use labor_tax_core::calculations::common::rate_as_percent;
///
/// assert_eq!(rate_as_percent(0.33582), Some(dec!(33.58)));
/// ```
pub fn rate_as_percent(rate: f64) -> Option<Decimal> {
    round_money(rate * 100.0, 2)
}

fn round_money(
    value: f64,
    dp: u32,
) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    Decimal::try_from(value)
        .ok()
        .map(|d| d.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // round_to_crowns tests
    // =========================================================================

    #[test]
    fn round_to_crowns_rounds_down_below_half() {
        assert_eq!(round_to_crowns(99.4), Some(dec!(99)));
    }

    #[test]
    fn round_to_crowns_rounds_half_up() {
        assert_eq!(round_to_crowns(0.5), Some(dec!(1)));
    }

    #[test]
    fn round_to_crowns_handles_zero() {
        assert_eq!(round_to_crowns(0.0), Some(dec!(0)));
    }

    #[test]
    fn round_to_crowns_handles_large_values() {
        assert_eq!(round_to_crowns(12_345_678_901.7), Some(dec!(12345678902)));
    }

    #[test]
    fn round_to_crowns_rejects_infinity() {
        assert_eq!(round_to_crowns(f64::INFINITY), None);
    }

    // =========================================================================
    // rate_as_percent tests
    // =========================================================================

    #[test]
    fn rate_as_percent_handles_zero_rate() {
        assert_eq!(rate_as_percent(0.0), Some(dec!(0)));
    }

    #[test]
    fn rate_as_percent_keeps_two_places() {
        assert_eq!(rate_as_percent(0.47), Some(dec!(47.00)));
    }
}
