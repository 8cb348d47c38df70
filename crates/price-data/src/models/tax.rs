//! VAT estimation helpers.
//!
//! The commerce backend is the authority on taxes at checkout; these helpers
//! only estimate display prices for regions where catalog prices are stored
//! tax-exclusive. Rates are fractions (`0.19` for 19% VAT).

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places for display amounts.
const DISPLAY_SCALE: u32 = 2;

/// Gross amount for a net amount at the given VAT rate.
pub fn with_tax(net: Decimal, rate: Decimal) -> Decimal {
    (net * (Decimal::ONE + rate))
        .round_dp_with_strategy(DISPLAY_SCALE, RoundingStrategy::MidpointNearestEven)
}

/// Net amount for a gross amount at the given VAT rate.
pub fn without_tax(gross: Decimal, rate: Decimal) -> Decimal {
    (gross / (Decimal::ONE + rate))
        .round_dp_with_strategy(DISPLAY_SCALE, RoundingStrategy::MidpointNearestEven)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_with_tax() {
        assert_eq!(with_tax(dec!(100), dec!(0.19)), dec!(119.00));
        assert_eq!(with_tax(dec!(10.99), dec!(0.19)), dec!(13.08));
    }

    #[test]
    fn test_without_tax() {
        assert_eq!(without_tax(dec!(119), dec!(0.19)), dec!(100.00));
        assert_eq!(without_tax(dec!(25), dec!(0.25)), dec!(20.00));
    }

    #[test]
    fn test_zero_rate_is_identity() {
        assert_eq!(with_tax(dec!(42.50), Decimal::ZERO), dec!(42.50));
        assert_eq!(without_tax(dec!(42.50), Decimal::ZERO), dec!(42.50));
    }

    #[test]
    fn test_round_trip_within_rounding() {
        let net = dec!(8.39);
        let gross = with_tax(net, dec!(0.07));
        // 8.39 * 1.07 = 8.9773 -> 8.98; back out: 8.98 / 1.07 = 8.3925... -> 8.39
        assert_eq!(gross, dec!(8.98));
        assert_eq!(without_tax(gross, dec!(0.07)), net);
    }
}
