//! HTTP client for the ECB daily reference rates.

use std::time::Duration;

use async_trait::async_trait;
use pocketfx_core::money::{Currency, ExchangeRate, RatesFetcher};
use pocketfx_shared::RatesConfig;
use reqwest::Client;

use crate::envelope::DailyRates;
use crate::error::EcbError;

/// Fetches exchange rates from the European Central Bank.
///
/// Every call downloads the current feed; nothing is cached.
#[derive(Debug, Clone)]
pub struct EcbClient {
    http: Client,
    rates_url: String,
}

impl EcbClient {
    /// Creates a client for the public feed, giving up on requests after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`EcbError::HttpClient`] if the HTTP client cannot be built.
    pub fn new(timeout: Duration) -> Result<Self, EcbError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| EcbError::HttpClient(err.to_string()))?;

        Ok(Self {
            http,
            rates_url: crate::DEFAULT_RATES_URL.to_string(),
        })
    }

    /// Creates a client from the rates section of the application config.
    ///
    /// # Errors
    ///
    /// Returns [`EcbError::HttpClient`] if the HTTP client cannot be built.
    pub fn from_config(config: &RatesConfig) -> Result<Self, EcbError> {
        Ok(Self::new(config.timeout())?.with_rates_url(&config.url))
    }

    /// Points the client at another feed URL.
    #[must_use]
    pub fn with_rates_url(mut self, url: impl Into<String>) -> Self {
        self.rates_url = url.into();
        self
    }

    /// Returns the feed URL.
    #[must_use]
    pub fn rates_url(&self) -> &str {
        &self.rates_url
    }

    /// Downloads and parses the current feed.
    ///
    /// # Errors
    ///
    /// - [`EcbError::Timeout`] or [`EcbError::CallingServer`] on transport failure
    /// - [`EcbError::ClientSide`], [`EcbError::ServerSide`] or
    ///   [`EcbError::UnknownStatusCode`] for any status but 200
    /// - [`EcbError::UnexpectedFormat`] if the body is not a rates feed
    pub async fn fetch_daily_rates(&self) -> Result<DailyRates, EcbError> {
        tracing::debug!(url = %self.rates_url, "Fetching ECB reference rates");

        let response = self.http.get(&self.rates_url).send().await?;

        let status = response.status().as_u16();
        if let Err(err) = EcbError::check_status_code(status) {
            tracing::warn!(url = %self.rates_url, status, "ECB rates request failed");
            return Err(err);
        }

        let body = response.text().await?;
        let rates = DailyRates::from_xml(&body)?;

        tracing::debug!(
            date = ?rates.date(),
            currencies = rates.len(),
            "Parsed ECB reference rates"
        );

        Ok(rates)
    }
}

#[async_trait]
impl RatesFetcher for EcbClient {
    type Error = EcbError;

    async fn fetch_exchange_rate(
        &self,
        source: &Currency,
        target: &Currency,
    ) -> Result<ExchangeRate, Self::Error> {
        let rates = self.fetch_daily_rates().await?;
        let rate = rates.exchange_rate(source.code(), target.code())?;

        tracing::debug!(
            source = %source,
            target = %target,
            rate = %rate,
            "Resolved exchange rate"
        );

        Ok(rate)
    }
}
