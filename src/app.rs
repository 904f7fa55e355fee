//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - sets up logging
//! - builds the price client and output driver
//! - runs the requested command and prints its summary

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{ApplyArgs, Command, DriverKind, OutputArgs, PriceArgs};
use crate::config::{Config, OutputConfig, api_config_from_args, output_config_from_args};
use crate::data::AmberClient;
use crate::error::AppError;
use crate::gpio::{OutputDriver, SimulatedDriver};
use crate::indicator::IndicatorController;
use crate::report::RunSummary;

pub mod pipeline;

/// Entry point for the `amber-lights` binary.
pub fn run() -> Result<(), AppError> {
    // Populate AMBER_* before clap reads its env fallbacks.
    dotenvy::dotenv().ok();

    let argv = crate::cli::rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);
    init_logging(cli.verbose);

    match cli.command {
        Command::Apply(args) => handle_apply(args),
        Command::Price(args) => handle_price(args),
        Command::Off(args) => handle_off(args),
    }
}

fn init_logging(verbose: u8) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose, rust_log.as_deref()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// `RUST_LOG` wins when set; each `-v` raises the level on top of it.
fn log_filter(verbose: u8, rust_log: Option<&str>) -> EnvFilter {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    match rust_log.map(str::trim).filter(|directives| !directives.is_empty()) {
        Some(directives) if verbose == 0 => EnvFilter::new(directives),
        Some(directives) => EnvFilter::new(directives).add_directive(level.into()),
        None => EnvFilter::default().add_directive(level.into()),
    }
}

fn handle_apply(args: ApplyArgs) -> Result<(), AppError> {
    let config = Config::from_args(&args)?;
    let client = AmberClient::new(config.api.clone())?;

    let summary = match config.output.driver {
        DriverKind::Simulated => apply_with(&client, SimulatedDriver::new(), &config)?,
        DriverKind::Gpio => apply_with(&client, hardware_driver()?, &config)?,
    };

    if config.json {
        println!("{}", crate::report::to_json(&summary)?);
    } else {
        print!("{}", crate::report::format_run_summary(&summary));
    }
    Ok(())
}

fn apply_with<D: OutputDriver>(
    client: &AmberClient,
    driver: D,
    config: &Config,
) -> Result<RunSummary, AppError> {
    let mut controller =
        IndicatorController::new(driver, config.output.pins.clone(), config.output.numbering);
    pipeline::run_apply(client, &mut controller, &config.thresholds)
}

fn handle_price(args: PriceArgs) -> Result<(), AppError> {
    let client = AmberClient::new(api_config_from_args(&args.api)?)?;
    let reading = pipeline::fetch_price(&client)?;

    if args.json {
        println!("{}", crate::report::to_json(&reading)?);
    } else {
        print!("{}", crate::report::format_price(&reading));
    }
    Ok(())
}

fn handle_off(args: OutputArgs) -> Result<(), AppError> {
    let output = output_config_from_args(&args)?;
    match output.driver {
        DriverKind::Simulated => clear_with(SimulatedDriver::new(), &output),
        DriverKind::Gpio => clear_with(hardware_driver()?, &output),
    }
}

fn clear_with<D: OutputDriver>(driver: D, output: &OutputConfig) -> Result<(), AppError> {
    let mut controller = IndicatorController::new(driver, output.pins.clone(), output.numbering);
    controller.initialize()?;
    controller.clear()?;
    tracing::info!("all indicators off");
    Ok(())
}

#[cfg(target_os = "linux")]
fn hardware_driver() -> Result<crate::gpio::RppalDriver, AppError> {
    Ok(crate::gpio::RppalDriver::new())
}

#[cfg(not(target_os = "linux"))]
fn hardware_driver() -> Result<SimulatedDriver, AppError> {
    Err(AppError::new(
        crate::error::EXIT_GPIO,
        "The GPIO driver is only available on Linux; use --driver simulated.",
    ))
}

#[cfg(test)]
mod tests {
    use tracing_subscriber::filter::LevelFilter;
    use tracing_subscriber::{Layer, Registry};

    use super::*;

    fn max_level(filter: &EnvFilter) -> Option<LevelFilter> {
        <EnvFilter as Layer<Registry>>::max_level_hint(filter)
    }

    #[test]
    fn rust_log_applies_without_verbose_flags() {
        assert_eq!(max_level(&log_filter(0, Some("debug"))), Some(LevelFilter::DEBUG));
        assert_eq!(max_level(&log_filter(0, Some("trace"))), Some(LevelFilter::TRACE));
    }

    #[test]
    fn verbose_flags_set_level_when_rust_log_is_unset() {
        assert_eq!(max_level(&log_filter(0, None)), Some(LevelFilter::WARN));
        assert_eq!(max_level(&log_filter(0, Some("  "))), Some(LevelFilter::WARN));
        assert_eq!(max_level(&log_filter(1, None)), Some(LevelFilter::INFO));
        assert_eq!(max_level(&log_filter(2, None)), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn verbose_flags_raise_rust_log() {
        assert_eq!(max_level(&log_filter(3, Some("warn"))), Some(LevelFilter::TRACE));
    }
}
