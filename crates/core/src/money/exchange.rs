//! Exchange rate types and the rate source abstraction.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::currency::Currency;
use super::decimal::Decimal;
use super::error::MoneyError;

/// Rate to convert one unit of a source currency into a target currency.
///
/// Structurally a [`Decimal`], but kept apart from amount quantities by type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExchangeRate(Decimal);

impl ExchangeRate {
    /// The identity rate.
    pub const ONE: Self = Self(Decimal::ONE);

    /// Returns the rate as a decimal.
    #[must_use]
    pub const fn as_decimal(&self) -> Decimal {
        self.0
    }
}

impl From<Decimal> for ExchangeRate {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl TryFrom<rust_decimal::Decimal> for ExchangeRate {
    type Error = MoneyError;

    fn try_from(value: rust_decimal::Decimal) -> Result<Self, Self::Error> {
        Decimal::try_from(value).map(Self)
    }
}

impl FromStr for ExchangeRate {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::parse(s).map(Self)
    }
}

impl fmt::Display for ExchangeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A source of exchange rates.
///
/// Implementations may call a web service, read a local table, or return a
/// canned value in tests. [`convert`](super::convert) never retries a failed
/// fetch.
#[async_trait]
pub trait RatesFetcher: Send + Sync {
    /// Error reported when no rate can be produced.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns the rate converting one unit of `source` into `target`.
    async fn fetch_exchange_rate(
        &self,
        source: &Currency,
        target: &Currency,
    ) -> Result<ExchangeRate, Self::Error>;
}
