//! Property-based tests for conversion arithmetic.
//!
//! Checked against `rust_decimal` as an exact oracle.

use proptest::prelude::*;
use rust_decimal::Decimal as Exact;

use super::amount::Amount;
use super::conversion::{apply_exchange_rate, multiply};
use super::currency::Currency;
use super::decimal::Decimal;
use super::exchange::ExchangeRate;

/// Strategy to generate amounts from 0.00 to 10,000,000.00 in a 2-precision currency.
fn amount() -> impl Strategy<Value = Amount> {
    (0i64..1_000_000_000).prop_map(|cents| {
        Amount::new(
            Decimal::from_parts(cents, 2),
            Currency::with_precision("SRC", 2),
        )
        .unwrap()
    })
}

/// Strategy to generate positive rates with up to 8 fractional digits.
fn rate() -> impl Strategy<Value = ExchangeRate> {
    (1i64..100_000_000, 0u8..=8).prop_map(|(subunits, precision)| {
        ExchangeRate::from(Decimal::new(subunits, precision).unwrap())
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// The product never carries more than `p + q` fractional digits and is exact.
    #[test]
    fn prop_multiply_precision_law(amount in amount(), rate in rate()) {
        let quantity = amount.quantity();
        let product = multiply(quantity, rate);

        let bound = usize::from(quantity.precision()) + usize::from(rate.as_decimal().precision());
        prop_assert!(product.precision <= bound);

        let exact = Exact::from(quantity) * Exact::from(rate.as_decimal());
        let precision = u32::try_from(product.precision).unwrap();
        prop_assert_eq!(Exact::from_i128_with_scale(product.subunits, precision), exact);
    }

    /// Conversion truncates: the result is at most the exact product and less
    /// than one target subunit below it.
    #[test]
    fn prop_conversion_truncates(
        amount in amount(),
        rate in rate(),
        target_precision in 0u8..=3,
    ) {
        let target = Currency::with_precision("TRG", target_precision);
        let converted = apply_exchange_rate(&amount, &target, rate).unwrap();

        prop_assert_eq!(converted.quantity().precision(), target_precision);

        let exact = Exact::from(amount.quantity()) * Exact::from(rate.as_decimal());
        let got = Exact::from(converted.quantity());
        let step = Exact::new(1, u32::from(target_precision));
        prop_assert!(got <= exact, "{} > {}", got, exact);
        prop_assert!(exact - got < step, "{} - {} >= {}", exact, got, step);
    }
}
