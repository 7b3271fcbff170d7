//! Property-based tests for decimals and amounts.
//!
//! - Canonical round trip through parse and display
//! - Simplify idempotence
//! - Lossless precision widening, rejected narrowing

use std::str::FromStr;

use proptest::prelude::*;
use rust_decimal::Decimal as Exact;

use super::amount::Amount;
use super::currency::Currency;
use super::decimal::{Decimal, MAX_DECIMAL};
use super::error::MoneyError;

/// Strategy to generate decimal text with up to 6 integer and 6 fractional digits.
fn decimal_text() -> impl Strategy<Value = String> {
    (0u32..1_000_000, "[0-9]{0,6}").prop_map(|(int, frac)| {
        if frac.is_empty() {
            int.to_string()
        } else {
            format!("{int}.{frac}")
        }
    })
}

/// Strategy to generate raw, possibly non-canonical parts under the ceiling.
fn raw_parts() -> impl Strategy<Value = (i64, u8)> {
    (0i64..=MAX_DECIMAL, 0u8..=12)
}

/// Strategy to generate a canonical decimal with 1 to 3 fractional digits.
fn fractional_decimal() -> impl Strategy<Value = Decimal> {
    (1u8..=3, 0i64..100_000_000).prop_map(|(precision, base)| {
        // Last digit non-zero keeps the value canonical at this precision.
        let subunits = base * 10 + 1 + base % 9;
        Decimal::from_parts(subunits, precision)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Formatting a parsed decimal yields its canonical form, which parses
    /// back to the same value and carries no trailing fractional zero.
    #[test]
    fn prop_parse_display_is_canonical(text in decimal_text()) {
        let parsed = Decimal::parse(&text).unwrap();
        let shown = parsed.to_string();

        prop_assert_eq!(Decimal::parse(&shown).unwrap(), parsed);
        prop_assert!(!shown.contains('.') || !shown.ends_with('0'), "{} is not canonical", shown);
        prop_assert_eq!(Exact::from(parsed), Exact::from_str(&text).unwrap());
    }

    /// Simplifying twice is the same as simplifying once, and keeps the value.
    #[test]
    fn prop_simplify_is_idempotent((subunits, precision) in raw_parts()) {
        let mut once = Decimal::from_parts(subunits, precision);
        once.simplify();
        let mut twice = once;
        twice.simplify();

        prop_assert_eq!(once, twice);
        prop_assert_eq!(Exact::from(once), Exact::new(subunits, u32::from(precision)));
    }

    /// Widening a quantity to its currency's precision never changes its value.
    #[test]
    fn prop_widening_is_lossless(
        (subunits, precision) in (0i64..1_000_000_000, 0u8..=3),
        extra in 0u8..=3,
    ) {
        let quantity = Decimal::from_parts(subunits, precision);
        let currency = Currency::with_precision("TST", precision + extra);

        let amount = Amount::new(quantity, currency).unwrap();

        prop_assert_eq!(amount.quantity().precision(), precision + extra);
        prop_assert_eq!(Exact::from(amount.quantity()), Exact::from(quantity));
    }

    /// A quantity more precise than its currency is always rejected.
    #[test]
    fn prop_narrowing_is_rejected(quantity in fractional_decimal(), below in 1u8..=3) {
        let currency_precision = quantity.precision().saturating_sub(below);
        let currency = Currency::with_precision("TST", currency_precision);

        prop_assert!(matches!(Amount::new(quantity, currency), Err(MoneyError::TooPrecise)));
    }
}
