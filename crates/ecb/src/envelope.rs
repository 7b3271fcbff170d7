//! Parsing of the ECB daily reference rates feed.
//!
//! The feed quotes every currency against the euro:
//!
//! ```xml
//! <gesmes:Envelope>
//!   <Cube>
//!     <Cube time='2023-10-27'>
//!       <Cube currency='USD' rate='1.0564'/>
//!     </Cube>
//!   </Cube>
//! </gesmes:Envelope>
//! ```

use std::collections::HashMap;
use std::str::FromStr;

use chrono::NaiveDate;
use pocketfx_core::money::ExchangeRate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Deserialize;

use crate::error::EcbError;

/// Currency every rate in the feed is quoted against.
pub const BASE_CURRENCY: &str = "EUR";

/// Most fractional digits kept on a derived cross rate.
const CROSS_RATE_DECIMAL_PLACES: u32 = 10;

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "Cube")]
    cube: OuterCube,
}

#[derive(Debug, Deserialize)]
struct OuterCube {
    #[serde(rename = "Cube")]
    daily: DailyCube,
}

#[derive(Debug, Deserialize)]
struct DailyCube {
    #[serde(rename = "@time", default)]
    time: Option<String>,
    #[serde(rename = "Cube", default)]
    rates: Vec<RateCube>,
}

#[derive(Debug, Deserialize)]
struct RateCube {
    #[serde(rename = "@currency")]
    currency: String,
    #[serde(rename = "@rate")]
    rate: String,
}

/// One day of euro reference rates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyRates {
    date: Option<NaiveDate>,
    euro_rates: HashMap<String, Decimal>,
}

impl DailyRates {
    /// Parses the XML feed.
    ///
    /// # Errors
    ///
    /// Returns [`EcbError::UnexpectedFormat`] if the document is not a rates
    /// envelope, or a date or rate in it is malformed or not positive.
    pub fn from_xml(xml: &str) -> Result<Self, EcbError> {
        let envelope: Envelope = quick_xml::de::from_str(xml)
            .map_err(|err| EcbError::unexpected_format(err.to_string()))?;
        let daily = envelope.cube.daily;

        let date = daily
            .time
            .map(|time| {
                NaiveDate::parse_from_str(&time, "%Y-%m-%d")
                    .map_err(|err| EcbError::unexpected_format(format!("date {time:?}: {err}")))
            })
            .transpose()?;

        let euro_rates = daily
            .rates
            .into_iter()
            .map(|cube| {
                let rate = Decimal::from_str(&cube.rate)
                    .ok()
                    .filter(|rate| rate.is_sign_positive() && !rate.is_zero())
                    .ok_or_else(|| {
                        EcbError::unexpected_format(format!(
                            "rate {:?} for {}",
                            cube.rate, cube.currency
                        ))
                    })?;
                Ok((cube.currency.to_ascii_uppercase(), rate))
            })
            .collect::<Result<HashMap<_, _>, EcbError>>()?;

        Ok(Self { date, euro_rates })
    }

    /// Returns the day the rates apply to, when the feed states it.
    #[must_use]
    pub const fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    /// Returns the number of quoted currencies, the euro excluded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.euro_rates.len()
    }

    /// Returns true if the feed quoted no currency.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.euro_rates.is_empty()
    }

    /// Returns how many units of `code` one euro buys.
    #[must_use]
    pub fn euro_rate(&self, code: &str) -> Option<Decimal> {
        if code.eq_ignore_ascii_case(BASE_CURRENCY) {
            return Some(Decimal::ONE);
        }
        self.euro_rates.get(&code.to_ascii_uppercase()).copied()
    }

    /// Derives the rate converting one unit of `source` into `target`.
    ///
    /// Same currency gives 1; otherwise the target's euro rate divided by the
    /// source's, rounded half-even to at most 10 fractional digits and to
    /// fewer if needed to stay under the decimal ceiling.
    ///
    /// # Errors
    ///
    /// - [`EcbError::ExchangeRateNotFound`] if either currency is not quoted
    /// - [`EcbError::UnexpectedFormat`] if the quotes yield no usable rate
    pub fn exchange_rate(&self, source: &str, target: &str) -> Result<ExchangeRate, EcbError> {
        if source.eq_ignore_ascii_case(target) {
            return Ok(ExchangeRate::ONE);
        }

        let source_rate = self
            .euro_rate(source)
            .ok_or_else(|| EcbError::ExchangeRateNotFound(source.to_string()))?;
        let target_rate = self
            .euro_rate(target)
            .ok_or_else(|| EcbError::ExchangeRateNotFound(target.to_string()))?;

        let quotient = target_rate.checked_div(source_rate).ok_or_else(|| {
            EcbError::unexpected_format(format!("cannot divide {target_rate} by {source_rate}"))
        })?;

        fit_rate(quotient)
            .filter(|rate| !rate.as_decimal().is_zero())
            .ok_or_else(|| {
                EcbError::unexpected_format(format!(
                    "cross rate {quotient} for {source} to {target} is out of range"
                ))
            })
    }
}

/// Rounds `quotient` to the most fractional digits that keep it representable.
fn fit_rate(quotient: Decimal) -> Option<ExchangeRate> {
    (0..=CROSS_RATE_DECIMAL_PLACES).rev().find_map(|dp| {
        let rounded = quotient.round_dp_with_strategy(dp, RoundingStrategy::MidpointNearestEven);
        ExchangeRate::try_from(rounded).ok()
    })
}
