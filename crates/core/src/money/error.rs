//! Money error types.
//!
//! Every fallible money operation returns one of these. Rate source failures
//! are opaque here: they are carried as the error's `source()` together with
//! the currency pair that was being resolved.

use std::error::Error as StdError;

use pocketfx_shared::AppError;
use thiserror::Error;

/// Errors that can occur during money operations.
#[derive(Debug, Error)]
pub enum MoneyError {
    /// Text is not a decimal number.
    #[error("unable to parse {input:?}: invalid decimal")]
    InvalidDecimal {
        /// The rejected text.
        input: String,
    },

    /// Magnitude exceeds the supported ceiling.
    #[error("quantity over 10^12 is too large")]
    TooLarge,

    /// Currency code is not made of exactly 3 letters.
    #[error("invalid currency code {code:?}: must be 3 letters")]
    InvalidCurrencyCode {
        /// The rejected code.
        code: String,
    },

    /// Quantity has more fractional digits than its currency allows.
    #[error("amount quantity is too precise for its currency")]
    TooPrecise,

    /// The exchange rate source failed.
    #[error("failed to fetch exchange rate for {from} to {to}: {source}")]
    RateFetch {
        /// Source currency code.
        from: String,
        /// Target currency code.
        to: String,
        /// Error reported by the rate source.
        source: Box<dyn StdError + Send + Sync>,
    },
}

impl MoneyError {
    pub(crate) fn invalid_decimal(input: impl Into<String>) -> Self {
        Self::InvalidDecimal {
            input: input.into(),
        }
    }

    pub(crate) fn invalid_currency_code(code: impl Into<String>) -> Self {
        Self::InvalidCurrencyCode { code: code.into() }
    }
}

impl From<MoneyError> for AppError {
    fn from(err: MoneyError) -> Self {
        match err {
            MoneyError::RateFetch { .. } => Self::ExternalService(err.to_string()),
            MoneyError::InvalidDecimal { .. }
            | MoneyError::TooLarge
            | MoneyError::InvalidCurrencyCode { .. }
            | MoneyError::TooPrecise => Self::Validation(err.to_string()),
        }
    }
}
