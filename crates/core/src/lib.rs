//! Core money logic for pocketfx.
//!
//! This crate contains pure money logic with ZERO web or I/O dependencies.
//! Decimal arithmetic, currencies, amounts and conversion live here; where
//! exchange rates come from is left to implementors of
//! [`money::RatesFetcher`].
//!
//! # Modules
//!
//! - `money` - Fixed-point decimals, currencies, amounts and conversion

pub mod money;

pub use money::{Amount, Currency, Decimal, ExchangeRate, MoneyError, RatesFetcher, convert};
