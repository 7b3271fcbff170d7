//! Currency codes and their conventional precision.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::MoneyError;

/// Currencies with no fractional digits.
const ZERO_DECIMAL_CURRENCIES: &[&str] = &["IRR"];

/// Currencies using tenths.
const ONE_DECIMAL_CURRENCIES: &[&str] = &["MGA", "MRU", "CNY", "VND"];

/// Currencies using thousandths.
const THREE_DECIMAL_CURRENCIES: &[&str] = &["BHD", "IQD", "KWD", "LYD", "OMR", "TND"];

/// Precision of every well-formed code not listed above.
const DEFAULT_PRECISION: u8 = 2;

/// A 3-letter currency code and the number of fractional digits it uses.
///
/// The precision table is a fixed simplification of minor-unit conventions,
/// not ISO 4217: `JPY` for instance gets the default of 2.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Currency {
    code: String,
    precision: u8,
}

impl Currency {
    /// Parses a currency code and looks up its precision.
    ///
    /// The code is kept as supplied; the lookup ignores ASCII case.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::InvalidCurrencyCode`] unless `code` is exactly
    /// 3 ASCII letters.
    pub fn parse(code: &str) -> Result<Self, MoneyError> {
        if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Err(MoneyError::invalid_currency_code(code));
        }

        Ok(Self {
            code: code.to_string(),
            precision: precision_for(code),
        })
    }

    /// Builds a currency with an explicit precision, bypassing the table.
    #[cfg(test)]
    pub(crate) fn with_precision(code: &str, precision: u8) -> Self {
        Self {
            code: code.to_string(),
            precision,
        }
    }

    /// Returns the 3-letter code as supplied at parse time.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns the number of fractional digits this currency uses.
    #[must_use]
    pub const fn precision(&self) -> u8 {
        self.precision
    }
}

fn precision_for(code: &str) -> u8 {
    let listed = |table: &[&str]| table.iter().any(|c| c.eq_ignore_ascii_case(code));

    if listed(ZERO_DECIMAL_CURRENCIES) {
        0
    } else if listed(ONE_DECIMAL_CURRENCIES) {
        1
    } else if listed(THREE_DECIMAL_CURRENCIES) {
        3
    } else {
        DEFAULT_PRECISION
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

impl FromStr for Currency {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Currency {
    type Error = MoneyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Currency> for String {
    fn from(value: Currency) -> Self {
        value.code
    }
}
