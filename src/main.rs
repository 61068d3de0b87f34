use std::io::{self, Write};

use anyhow::Result;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use config::Config;
use privat::{PrivatBankApi, RateSource};

mod config;
mod error;
mod exchange_rate;
mod privat;
mod query;

const NO_DATA: &str = "No data found for the specified date.";

/// Show PrivatBank USD and EUR cash rates for a day in the recent past.
#[derive(Parser, Debug)]
#[command(version)]
struct Cli {
    /// How many days before today to look up (0 to 10)
    #[arg(value_name = "DAYS", value_parser = parse_days)]
    days: i64,
}

/// Accepts plain decimal digits only; signs and whitespace are rejected.
fn parse_days(s: &str) -> Result<i64, String> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("`{s}` is not a whole number of days"));
    }

    // Digits that overflow i64 are still out of range, not malformed.
    Ok(s.parse().unwrap_or(i64::MAX))
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("error")).init();

    let config = Config::from_env();
    let api = PrivatBankApi::new(config.api_url);

    run(std::env::args(), &api, &mut io::stdout().lock()).await
}

async fn run<S, I, W>(args: I, source: &S, out: &mut W) -> Result<()>
where
    S: RateSource,
    I: IntoIterator<Item = String>,
    W: Write,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            write!(out, "{}", err.render())?;
            return Ok(());
        }
        Err(err) => {
            log::debug!("Rejected arguments: {err}");
            writeln!(out, "{}", Cli::command().render_usage())?;
            return Ok(());
        }
    };

    let lookup = match query::query_rates(source, cli.days).await {
        Ok(lookup) => lookup,
        Err(err) => {
            writeln!(out, "{err}")?;
            writeln!(out, "{}", Cli::command().render_usage())?;
            return Ok(());
        }
    };

    match lookup.into_snapshot() {
        Some(snapshot) => writeln!(out, "{snapshot}")?,
        None => writeln!(out, "{NO_DATA}")?,
    }

    Ok(())
}
