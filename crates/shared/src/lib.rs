//! Shared errors and configuration for pocketfx.
//!
//! This crate provides what every other crate in the workspace agrees on:
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;

pub use config::{AppConfig, LoggingConfig, RatesConfig};
pub use error::{AppError, AppResult};
