//! # quote
//!
//! Prices one order request from the command line.
//!
//! ```text
//! $ echo '{"cart":[{"shapeId":"almond","quantity":2}],"promo":"welcome10"}' \
//!     | quote --config pricing.toml --format receipt
//! ```
//!
//! ## Units
//! Request amounts (`discount`, `adminDiscount`) are major units: `5` is
//! $5.00. Every amount in the JSON breakdown is integer cents: `3600` is
//! $36.00.
//!
//! ## Exit Codes
//! - `0` - breakdown printed
//! - `1` - the request could not be read
//! - `2` - pricing unavailable (configuration is broken)

mod receipt;

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::{Parser, ValueEnum};
use serde_json::Value;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use setshop_config::{ConfigError, PricingConfig};
use setshop_core::normalize::normalize_request;
use setshop_core::{compute_breakdown_observed, PricingError, RecordingObserver};

/// Output format for the breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// camelCase JSON, the shape the ordering UI consumes.
    Json,
    /// Fixed-width text receipt.
    Receipt,
}

const UNITS_HELP: &str = "\
Units:
  Request amounts (discount, adminDiscount) are major units: 5 means $5.00.
  Breakdown JSON amounts (subtotal, discounts, total, line amounts) are
  integer cents: 3600 means $36.00.";

#[derive(Parser, Debug)]
#[command(
    name = "quote",
    version,
    about = "Price a SetShop order request",
    after_help = UNITS_HELP
)]
struct Cli {
    /// Pricing config file. Defaults to the platform config directory.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Request JSON file. Reads stdin when omitted.
    #[arg(long, value_name = "PATH")]
    request: Option<PathBuf>,

    /// Date the estimate counts from. Defaults to the local date.
    #[arg(long, value_name = "YYYY-MM-DD")]
    today: Option<NaiveDate>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
}

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) if is_config_fault(&err) => {
            eprintln!("pricing unavailable: {:#}", err);
            ExitCode::from(2)
        }
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

/// Initializes the tracing subscriber on stderr.
///
/// ## Environment Variables
/// - `RUST_LOG=debug` - Show every pricing stage
/// - `RUST_LOG=setshop_core=trace` - Engine only
/// - Default: INFO, with debug for the setshop crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,setshop_core=debug,setshop_config=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<String> {
    let config = PricingConfig::load(cli.config.clone())?;
    let catalog = config.catalog();
    let delivery = config.delivery_methods();
    let settings = config.to_settings();

    let raw = read_request(cli.request.as_ref())?;
    let value: Value = serde_json::from_str(&raw).context("request is not valid JSON")?;
    let request = normalize_request(&value);
    debug!(selections = request.cart.len(), "Normalized request");

    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());
    let mut observer = RecordingObserver::new();
    let breakdown =
        compute_breakdown_observed(&request, &catalog, &delivery, &settings, today, &mut observer)?;

    info!(
        total = %breakdown.total.format_currency(config.currency_symbol()),
        days = breakdown.estimated_completion_days,
        "Quote ready"
    );

    match cli.format {
        OutputFormat::Json => {
            Ok(serde_json::to_string_pretty(&breakdown).context("failed to serialize breakdown")?)
        }
        OutputFormat::Receipt => Ok(receipt::render(&breakdown, config.currency_symbol(), &observer)),
    }
}

fn read_request(path: Option<&PathBuf>) -> anyhow::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read request {}", path.display())),
        None => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("failed to read request from stdin")?;
            Ok(raw)
        }
    }
}

fn is_config_fault(err: &anyhow::Error) -> bool {
    err.downcast_ref::<ConfigError>().is_some() || err.downcast_ref::<PricingError>().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::try_parse_from([
            "quote",
            "--config",
            "pricing.toml",
            "--today",
            "2026-10-18",
            "--format",
            "receipt",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("pricing.toml")));
        assert_eq!(cli.today, NaiveDate::from_ymd_opt(2026, 10, 18));
        assert_eq!(cli.format, OutputFormat::Receipt);
        assert!(cli.request.is_none());
    }

    #[test]
    fn test_cli_rejects_bad_date() {
        assert!(Cli::try_parse_from(["quote", "--today", "18/10/2026"]).is_err());
    }

    #[test]
    fn test_help_explains_units() {
        use clap::CommandFactory;

        let help = Cli::command().render_help().to_string();
        assert!(help.contains("major units"));
        assert!(help.contains("integer cents"));
    }

    #[test]
    fn test_config_faults_are_classified() {
        let err = anyhow::Error::from(ConfigError::from(PricingError::EmptyDeliveryConfig));
        assert!(is_config_fault(&err));

        let err = anyhow::Error::from(PricingError::EmptyDeliveryConfig);
        assert!(is_config_fault(&err));

        let err = anyhow::anyhow!("request is not valid JSON");
        assert!(!is_config_fault(&err));
    }
}
