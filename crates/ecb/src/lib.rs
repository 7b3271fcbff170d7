//! European Central Bank exchange rate client for pocketfx.
//!
//! Fetches the daily euro foreign exchange reference rates and derives cross
//! rates from them. One GET per fetch: no retry, no cache.
//!
//! # Modules
//!
//! - `client` - HTTP client implementing [`pocketfx_core::RatesFetcher`]
//! - `envelope` - Parsing of the daily rates XML feed
//! - `error` - Error types for rate fetching

pub mod client;
pub mod envelope;
pub mod error;

pub use client::EcbClient;
pub use envelope::DailyRates;
pub use error::EcbError;
pub use pocketfx_shared::config::DEFAULT_RATES_URL;
