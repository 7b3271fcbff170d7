//! Scaled-integer decimal numbers.
//!
//! A [`Decimal`] stores its value as an integer number of subunits and the
//! count of fractional digits those subunits carry: `1.52` is `{152, 2}`.
//!
//! CRITICAL: every public constructor returns the canonical form (no trailing
//! fractional zero), and equality assumes both sides are canonical.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::MoneyError;

/// Largest supported magnitude, in subunits.
pub const MAX_DECIMAL: i64 = 1_000_000_000_000;

/// Largest number of fractional digits a canonical decimal may carry.
pub const MAX_PRECISION: u8 = 18;

/// Fixed-point decimal number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Decimal {
    subunits: i64,
    precision: u8,
}

impl Decimal {
    /// Zero.
    pub const ZERO: Self = Self::from_parts(0, 0);

    /// One.
    pub const ONE: Self = Self::from_parts(1, 0);

    /// Creates a canonical decimal worth `subunits / 10^precision`.
    ///
    /// # Errors
    ///
    /// - [`MoneyError::TooLarge`] if the magnitude exceeds [`MAX_DECIMAL`]
    /// - [`MoneyError::InvalidDecimal`] if more than [`MAX_PRECISION`]
    ///   fractional digits remain after canonicalisation
    pub fn new(subunits: i64, precision: u8) -> Result<Self, MoneyError> {
        if subunits.unsigned_abs() > MAX_DECIMAL.unsigned_abs() {
            return Err(MoneyError::TooLarge);
        }
        let mut decimal = Self::from_parts(subunits, precision);
        decimal.simplify();
        if decimal.precision > MAX_PRECISION {
            return Err(MoneyError::invalid_decimal(decimal.to_string()));
        }
        Ok(decimal)
    }

    /// Builds a decimal from raw parts, without canonicalisation.
    pub(crate) const fn from_parts(subunits: i64, precision: u8) -> Self {
        Self {
            subunits,
            precision,
        }
    }

    /// Parses text made of optional integer digits, an optional single `.`
    /// and optional fractional digits, e.g. `"1.52"`, `"150"` or `".25"`.
    ///
    /// The integer part is checked against the ceiling before the fractional
    /// part is looked at, so `"1234567890123.45"` is too large rather than
    /// invalid.
    ///
    /// # Errors
    ///
    /// - [`MoneyError::InvalidDecimal`] for malformed text
    /// - [`MoneyError::TooLarge`] when the magnitude exceeds [`MAX_DECIMAL`]
    pub fn parse(text: &str) -> Result<Self, MoneyError> {
        let (int_part, frac_part) = text.split_once('.').unwrap_or((text, ""));

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if (int_part.is_empty() && frac_part.is_empty())
            || !all_digits(int_part)
            || !all_digits(frac_part)
        {
            return Err(MoneyError::invalid_decimal(text));
        }

        let integer = accumulate_digits(0, int_part).ok_or(MoneyError::TooLarge)?;
        if integer > MAX_DECIMAL {
            return Err(MoneyError::TooLarge);
        }

        let subunits = accumulate_digits(integer, frac_part).ok_or(MoneyError::TooLarge)?;
        if subunits > MAX_DECIMAL {
            return Err(MoneyError::TooLarge);
        }

        let (subunits, precision) = strip_trailing_zeros(i128::from(subunits), frac_part.len());
        let precision = u8::try_from(precision)
            .ok()
            .filter(|p| *p <= MAX_PRECISION)
            .ok_or_else(|| MoneyError::invalid_decimal(text))?;

        // Stripping zeros only shrinks the magnitude.
        let subunits = i64::try_from(subunits).map_err(|_| MoneyError::TooLarge)?;
        Ok(Self::from_parts(subunits, precision))
    }

    /// Returns the integer magnitude with the fractional point removed.
    #[must_use]
    pub const fn subunits(&self) -> i64 {
        self.subunits
    }

    /// Returns the number of fractional digits carried by the subunits.
    #[must_use]
    pub const fn precision(&self) -> u8 {
        self.precision
    }

    /// Returns true if the value is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.subunits == 0
    }

    /// Strips removable trailing zeros from the fractional digits.
    pub(crate) fn simplify(&mut self) {
        while self.precision > 0 && self.subunits % 10 == 0 {
            self.subunits /= 10;
            self.precision -= 1;
        }
    }
}

/// Appends decimal digits to `start`, `None` on overflow.
fn accumulate_digits(start: i64, digits: &str) -> Option<i64> {
    digits.bytes().try_fold(start, |acc, b| {
        acc.checked_mul(10)?.checked_add(i64::from(b - b'0'))
    })
}

/// Canonicalisation law shared by every scaled integer in this module.
pub(crate) fn strip_trailing_zeros(mut subunits: i128, mut precision: usize) -> (i128, usize) {
    while precision > 0 && subunits % 10 == 0 {
        subunits /= 10;
        precision -= 1;
    }
    (subunits, precision)
}

/// Returns `10^power`, `None` when it does not fit in 128 bits.
pub(crate) fn pow10(power: u32) -> Option<i128> {
    10i128.checked_pow(power)
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.subunits.unsigned_abs().to_string();
        let sign = if self.subunits < 0 { "-" } else { "" };
        let precision = usize::from(self.precision);

        if precision == 0 {
            return write!(f, "{sign}{digits}");
        }

        let padded = format!("{digits:0>width$}", width = precision + 1);
        let (int_digits, frac_digits) = padded.split_at(padded.len() - precision);
        write!(f, "{sign}{int_digits}.{frac_digits}")
    }
}

impl FromStr for Decimal {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Decimal {
    type Error = MoneyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Decimal> for String {
    fn from(value: Decimal) -> Self {
        value.to_string()
    }
}

impl TryFrom<rust_decimal::Decimal> for Decimal {
    type Error = MoneyError;

    fn try_from(value: rust_decimal::Decimal) -> Result<Self, Self::Error> {
        let scale = usize::try_from(value.scale()).map_err(|_| MoneyError::TooLarge)?;
        let (subunits, precision) = strip_trailing_zeros(value.mantissa(), scale);
        let subunits = i64::try_from(subunits).map_err(|_| MoneyError::TooLarge)?;
        let precision = u8::try_from(precision)
            .ok()
            .filter(|p| *p <= MAX_PRECISION)
            .ok_or_else(|| MoneyError::invalid_decimal(value.to_string()))?;
        Self::new(subunits, precision)
    }
}

impl From<Decimal> for rust_decimal::Decimal {
    fn from(value: Decimal) -> Self {
        Self::new(value.subunits, u32::from(value.precision))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case::two_decimal_digits("1.52", 152, 2)]
    #[case::no_decimal_digits("1", 1, 0)]
    #[case::suffix_zero_as_decimal_digit("1.50", 15, 1)]
    #[case::prefix_zero_as_decimal_digit("1.02", 102, 2)]
    #[case::multiple_of_ten("150", 150, 0)]
    #[case::only_fractional_part(".25", 25, 2)]
    #[case::only_fractional_part_with_trailing_zero(".50", 5, 1)]
    #[case::trailing_point("1.", 1, 0)]
    #[case::zero_with_precision("0.00", 0, 0)]
    #[case::zero("0", 0, 0)]
    #[case::leading_zeros("007.10", 71, 1)]
    #[case::at_ceiling("1000000000000", 1_000_000_000_000, 0)]
    #[case::smallest_step(".000000000000000001", 1, 18)]
    fn test_parse(#[case] text: &str, #[case] subunits: i64, #[case] precision: u8) {
        assert_eq!(
            Decimal::parse(text).unwrap(),
            Decimal::from_parts(subunits, precision)
        );
    }

    #[rstest]
    #[case::invalid_decimal_part("65.pocket")]
    #[case::invalid_integer_part("pocket.65")]
    #[case::multiple_decimal_points("1.2.3")]
    #[case::not_a_number("NaN")]
    #[case::empty("")]
    #[case::lone_point(".")]
    #[case::signed("-1.5")]
    #[case::plus_signed("+1")]
    #[case::exponent("1e3")]
    #[case::whitespace(" 1.5")]
    #[case::too_fine(".0000000000000000001")]
    fn test_parse_invalid(#[case] text: &str) {
        assert!(matches!(
            Decimal::parse(text),
            Err(MoneyError::InvalidDecimal { input }) if input == text
        ));
    }

    #[rstest]
    #[case::too_large("1234567890123")]
    #[case::too_large_with_decimals("1234567890123.45")]
    #[case::fraction_pushes_over("999999999999.99")]
    #[case::overflows_i64("99999999999999999999")]
    #[case::just_over_ceiling("1000000000001")]
    fn test_parse_too_large(#[case] text: &str) {
        assert!(matches!(Decimal::parse(text), Err(MoneyError::TooLarge)));
    }

    #[rstest]
    #[case::integer(123, 0, "123")]
    #[case::two_decimal_places(12345, 2, "123.45")]
    #[case::one_decimal_place(1235, 1, "123.5")]
    #[case::trailing_zero_in_subunits(120, 1, "12.0")]
    #[case::three_decimal_places(12305, 3, "12.305")]
    #[case::zero(0, 0, "0")]
    #[case::zero_with_precision(0, 2, "0.00")]
    #[case::below_one(5, 3, "0.005")]
    #[case::negative(-150, 2, "-1.50")]
    #[case::negative_below_one(-5, 2, "-0.05")]
    fn test_display(#[case] subunits: i64, #[case] precision: u8, #[case] expected: &str) {
        assert_eq!(Decimal::from_parts(subunits, precision).to_string(), expected);
    }

    #[rstest]
    #[case(150, 2, 15, 1)]
    #[case(100, 2, 1, 0)]
    #[case(123, 2, 123, 2)]
    #[case(1500, 0, 1500, 0)]
    #[case(0, 2, 0, 0)]
    #[case(50, 2, 5, 1)]
    #[case(12000, 3, 12, 0)]
    #[case(-1200, 2, -12, 0)]
    fn test_simplify(
        #[case] subunits: i64,
        #[case] precision: u8,
        #[case] expected_subunits: i64,
        #[case] expected_precision: u8,
    ) {
        let mut decimal = Decimal::from_parts(subunits, precision);
        decimal.simplify();
        assert_eq!(
            decimal,
            Decimal::from_parts(expected_subunits, expected_precision)
        );
    }

    #[rstest]
    #[case(0, Some(1))]
    #[case(1, Some(10))]
    #[case(4, Some(10_000))]
    #[case(38, Some(10i128.pow(38)))]
    #[case(39, None)]
    fn test_pow10(#[case] power: u32, #[case] expected: Option<i128>) {
        assert_eq!(pow10(power), expected);
    }

    #[test]
    fn test_new_canonicalises_and_checks_ceiling() {
        assert_eq!(Decimal::new(150, 2).unwrap(), Decimal::from_parts(15, 1));
        assert!(Decimal::new(MAX_DECIMAL, 0).is_ok());
        assert!(matches!(
            Decimal::new(MAX_DECIMAL + 1, 4),
            Err(MoneyError::TooLarge)
        ));
    }

    #[rstest]
    #[case::beyond_max_precision(5, 40)]
    #[case::one_past_max_precision(7, 19)]
    #[case::max_u8_precision(1, u8::MAX)]
    fn test_new_rejects_excess_precision(#[case] subunits: i64, #[case] precision: u8) {
        assert!(matches!(
            Decimal::new(subunits, precision),
            Err(MoneyError::InvalidDecimal { .. })
        ));
    }

    #[test]
    fn test_new_precision_checked_after_simplify() {
        // 10^12 at precision 20 is 10^-8 once trailing zeros are gone.
        let decimal = Decimal::new(MAX_DECIMAL, 20).unwrap();
        assert_eq!(decimal, Decimal::from_parts(1, 8));

        let smallest = Decimal::new(1, MAX_PRECISION).unwrap();
        assert_eq!(
            rust_decimal::Decimal::from(smallest),
            rust_decimal::Decimal::new(1, u32::from(MAX_PRECISION))
        );
    }

    #[test]
    fn test_rust_decimal_interop() {
        let decimal = Decimal::try_from(dec!(1.2500)).unwrap();
        assert_eq!(decimal, Decimal::from_parts(125, 2));
        assert_eq!(rust_decimal::Decimal::from(decimal), dec!(1.25));

        assert!(matches!(
            Decimal::try_from(dec!(1000000000000.5)),
            Err(MoneyError::TooLarge)
        ));
    }

    #[test]
    fn test_serde_as_string() {
        let decimal = Decimal::parse("12.50").unwrap();
        assert_eq!(serde_json::to_string(&decimal).unwrap(), "\"12.5\"");
        let back: Decimal = serde_json::from_str("\"0.0075\"").unwrap();
        assert_eq!(back, Decimal::from_parts(75, 4));
        assert!(serde_json::from_str::<Decimal>("\"1.2.3\"").is_err());
    }
}
