//! Amounts of money in a given currency.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::currency::Currency;
use super::decimal::{Decimal, MAX_DECIMAL};
use super::error::MoneyError;

/// A decimal quantity of money in a currency.
///
/// The quantity always carries exactly the currency's precision when built
/// through [`Amount::new`]: `1.5 USD` is stored as 150 subunits at precision 2.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "AmountParts")]
pub struct Amount {
    quantity: Decimal,
    currency: Currency,
}

/// Unvalidated wire form of an [`Amount`].
#[derive(Deserialize)]
struct AmountParts {
    quantity: Decimal,
    currency: Currency,
}

impl TryFrom<AmountParts> for Amount {
    type Error = MoneyError;

    fn try_from(parts: AmountParts) -> Result<Self, Self::Error> {
        Self::new(parts.quantity, parts.currency)
    }
}

impl Amount {
    /// Creates an amount, widening the quantity to the currency's precision.
    ///
    /// # Errors
    ///
    /// - [`MoneyError::TooPrecise`] if the quantity has more fractional digits
    ///   than the currency allows
    /// - [`MoneyError::TooLarge`] if the widened quantity exceeds the ceiling
    pub fn new(quantity: Decimal, currency: Currency) -> Result<Self, MoneyError> {
        let quantity = match quantity.precision().cmp(&currency.precision()) {
            std::cmp::Ordering::Greater => return Err(MoneyError::TooPrecise),
            std::cmp::Ordering::Less => {
                let factor = 10i64
                    .checked_pow(u32::from(currency.precision() - quantity.precision()))
                    .ok_or(MoneyError::TooLarge)?;
                let subunits = quantity
                    .subunits()
                    .checked_mul(factor)
                    .ok_or(MoneyError::TooLarge)?;
                Decimal::from_parts(subunits, currency.precision())
            }
            std::cmp::Ordering::Equal => quantity,
        };

        let amount = Self { quantity, currency };
        amount.validate()?;
        Ok(amount)
    }

    /// Parses a decimal quantity and a currency code into an amount.
    ///
    /// # Errors
    ///
    /// Any error of [`Decimal::parse`], [`Currency::parse`] or [`Amount::new`].
    pub fn parse(quantity: &str, currency: &str) -> Result<Self, MoneyError> {
        Self::new(Decimal::parse(quantity)?, Currency::parse(currency)?)
    }

    /// Assembles an amount without widening. Conversion uses this for results
    /// it has already rescaled, then calls [`Amount::validate`].
    pub(crate) const fn from_parts(quantity: Decimal, currency: Currency) -> Self {
        Self { quantity, currency }
    }

    /// Returns the quantity, at the currency's precision.
    #[must_use]
    pub const fn quantity(&self) -> Decimal {
        self.quantity
    }

    /// Returns the currency.
    #[must_use]
    pub const fn currency(&self) -> &Currency {
        &self.currency
    }

    /// Checks the amount is within the ceiling and not too precise.
    pub(crate) fn validate(&self) -> Result<(), MoneyError> {
        if self.quantity.subunits().unsigned_abs() > MAX_DECIMAL.unsigned_abs() {
            return Err(MoneyError::TooLarge);
        }
        if self.quantity.precision() > self.currency.precision() {
            return Err(MoneyError::TooPrecise);
        }
        Ok(())
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.quantity, self.currency.code())
    }
}
