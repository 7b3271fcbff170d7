//! Currency conversion logic.
//!
//! CRITICAL: Precision strategy for conversion:
//! - Multiply the scaled integers exactly, in 128 bits
//! - Truncate toward zero to the target currency's precision (never round)
//! - Pad with zeros when the product is less precise than the target
//! - All-or-nothing: any failure discards the result

use std::cmp::Ordering;

use super::amount::Amount;
use super::currency::Currency;
use super::decimal::{Decimal, pow10, strip_trailing_zeros};
use super::error::MoneyError;
use super::exchange::{ExchangeRate, RatesFetcher};

/// Converts `amount` into the `to` currency at the rate `rates` reports.
///
/// # Errors
///
/// - [`MoneyError::RateFetch`] if the rate source fails, carrying its error
/// - [`MoneyError::TooLarge`] if the converted amount exceeds the ceiling
///
/// # Example
///
/// ```
/// use async_trait::async_trait;
/// use pocketfx_core::money::{convert, Amount, Currency, ExchangeRate, RatesFetcher};
///
/// struct Fixed;
///
/// #[async_trait]
/// impl RatesFetcher for Fixed {
///     type Error = std::convert::Infallible;
///
///     async fn fetch_exchange_rate(
///         &self,
///         _: &Currency,
///         _: &Currency,
///     ) -> Result<ExchangeRate, Self::Error> {
///         Ok("2".parse().unwrap())
///     }
/// }
///
/// let runtime = tokio::runtime::Runtime::new().unwrap();
/// let amount = Amount::parse("34.98", "USD").unwrap();
/// let eur = Currency::parse("EUR").unwrap();
/// let converted = runtime.block_on(convert(&amount, &eur, &Fixed)).unwrap();
/// assert_eq!(converted.to_string(), "69.96 EUR");
/// ```
pub async fn convert<F>(amount: &Amount, to: &Currency, rates: &F) -> Result<Amount, MoneyError>
where
    F: RatesFetcher + ?Sized,
{
    let rate = rates
        .fetch_exchange_rate(amount.currency(), to)
        .await
        .map_err(|err| MoneyError::RateFetch {
            from: amount.currency().code().to_string(),
            to: to.code().to_string(),
            source: Box::new(err),
        })?;

    let converted = apply_exchange_rate(amount, to, rate)?;
    converted.validate()?;

    Ok(converted)
}

/// Exact product of a quantity and a rate, before rescaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Product {
    pub(crate) subunits: i128,
    pub(crate) precision: usize,
}

/// Multiplies a quantity by a rate: `(a * 10^-p) * (b * 10^-q) = (a * b) * 10^-(p + q)`,
/// then strips trailing zeros.
pub(crate) fn multiply(quantity: Decimal, rate: ExchangeRate) -> Product {
    let rate = rate.as_decimal();
    // Two 64-bit factors always fit in 128 bits.
    let subunits = i128::from(quantity.subunits()) * i128::from(rate.subunits());
    let precision = usize::from(quantity.precision()) + usize::from(rate.precision());

    let (subunits, precision) = strip_trailing_zeros(subunits, precision);
    Product {
        subunits,
        precision,
    }
}

/// Returns `amount` multiplied by `rate`, at the target currency's precision.
pub(crate) fn apply_exchange_rate(
    amount: &Amount,
    target: &Currency,
    rate: ExchangeRate,
) -> Result<Amount, MoneyError> {
    let product = multiply(amount.quantity(), rate);
    let quantity = rescale(product, target.precision())?;
    Ok(Amount::from_parts(quantity, target.clone()))
}

fn rescale(product: Product, precision: u8) -> Result<Decimal, MoneyError> {
    let target = usize::from(precision);

    let subunits = match product.precision.cmp(&target) {
        Ordering::Greater => {
            let divisor = u32::try_from(product.precision - target)
                .ok()
                .and_then(pow10);
            // Anything below 10^38 truncates to zero when the divisor does not fit.
            divisor.map_or(0, |divisor| product.subunits / divisor)
        }
        Ordering::Less => {
            let factor = u32::try_from(target - product.precision)
                .ok()
                .and_then(pow10)
                .ok_or(MoneyError::TooLarge)?;
            product
                .subunits
                .checked_mul(factor)
                .ok_or(MoneyError::TooLarge)?
        }
        Ordering::Equal => product.subunits,
    };

    let subunits = i64::try_from(subunits).map_err(|_| MoneyError::TooLarge)?;
    Ok(Decimal::from_parts(subunits, precision))
}
