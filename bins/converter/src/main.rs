//! pocketfx command line converter
//!
//! Converts one amount between currencies at today's ECB reference rate.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use pocketfx_core::money::{Amount, Currency, convert};
use pocketfx_ecb::EcbClient;
use pocketfx_shared::{AppConfig, AppError};

/// Convert an amount of money between currencies.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Currency of the amount, as an ISO 4217 code.
    #[arg(short, long)]
    from: String,

    /// Currency to convert into.
    #[arg(short, long, default_value = "EUR")]
    to: String,

    /// Amount to convert, e.g. 34.98
    amount: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(line) => {
            println!("{line}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::from(exit_code(&err))
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<String> {
    let config = AppConfig::load().map_err(AppError::from)?;
    init_tracing(&config.logging.filter);

    let amount = Amount::parse(&cli.amount, &cli.from).map_err(AppError::from)?;
    let to = Currency::parse(&cli.to).map_err(AppError::from)?;

    let client = EcbClient::from_config(&config.rates).map_err(AppError::from)?;
    tracing::debug!(url = client.rates_url(), "Using rates feed");

    let converted = convert(&amount, &to, &client)
        .await
        .map_err(AppError::from)?;
    tracing::info!(%amount, %converted, "Converted amount");

    Ok(format!("{amount} = {converted}"))
}

/// Logs go to stderr so stdout only carries the result.
fn init_tracing(default_filter: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<AppError>().map_or(1, AppError::exit_code)
}
