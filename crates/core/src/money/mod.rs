//! Fixed-point money handling and currency conversion.
//!
//! This module implements:
//! - Scaled-integer decimals kept in canonical form
//! - Currencies with their conventional precision
//! - Amounts that are never more precise than their currency
//! - Conversion through an injected exchange rate source
//! - Error types for money operations

pub mod amount;
pub mod conversion;
pub mod currency;
pub mod decimal;
pub mod error;
pub mod exchange;

#[cfg(test)]
mod conversion_props;
#[cfg(test)]
mod decimal_props;

pub use amount::Amount;
pub use conversion::convert;
pub use currency::Currency;
pub use decimal::{Decimal, MAX_DECIMAL, MAX_PRECISION};
pub use error::MoneyError;
pub use exchange::{ExchangeRate, RatesFetcher};
