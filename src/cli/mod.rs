//! Command-line parsing for the price indicator.
//!
//! Every connection and threshold option also reads an `AMBER_*` environment
//! variable, so a `.env` file next to the binary is enough for cron use.

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::data::amber::DEFAULT_BASE_URL;
use crate::domain::PinNumbering;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "amber-lights",
    version,
    about = "Light a red/amber/green indicator from the current electricity price"
)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch the current price and light the matching indicator (default).
    Apply(ApplyArgs),
    /// Fetch and print the current price without touching any pins.
    Price(PriceArgs),
    /// Turn every indicator off.
    Off(OutputArgs),
}

/// Price API connection options.
#[derive(Debug, Args, Clone)]
pub struct ApiArgs {
    /// API key used as the bearer token.
    #[arg(long, env = "AMBER_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Site identifier to query.
    #[arg(long, env = "AMBER_SITE_ID")]
    pub site_id: String,

    /// Price interval resolution in minutes.
    #[arg(long, env = "AMBER_RESOLUTION", default_value = "30")]
    pub resolution: String,

    /// API base URL.
    #[arg(long, env = "AMBER_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Request timeout in seconds (0 disables the timeout).
    #[arg(long, env = "AMBER_TIMEOUT_SECS", default_value_t = 10)]
    pub timeout_secs: u64,
}

/// Which backend drives the pins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DriverKind {
    /// Raspberry Pi GPIO header.
    Gpio,
    /// In-memory pins; writes are only logged.
    Simulated,
}

/// Output pin options.
#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    /// Output backend.
    #[arg(long, value_enum, env = "AMBER_DRIVER", default_value_t = DriverKind::Gpio)]
    pub driver: DriverKind,

    /// How pin numbers are interpreted.
    #[arg(long, value_enum, env = "AMBER_NUMBERING", default_value_t = PinNumbering::Board)]
    pub numbering: PinNumbering,

    /// Pins for the red indicator (comma-separated).
    #[arg(long, env = "AMBER_RED_PINS", value_delimiter = ',', default_values_t = [19u8, 26])]
    pub red_pins: Vec<u8>,

    /// Pins for the amber indicator (comma-separated).
    #[arg(long, env = "AMBER_AMBER_PINS", value_delimiter = ',', default_values_t = [21u8, 24])]
    pub amber_pins: Vec<u8>,

    /// Pins for the green indicator (comma-separated).
    #[arg(long, env = "AMBER_GREEN_PINS", value_delimiter = ',', default_values_t = [23u8, 22])]
    pub green_pins: Vec<u8>,
}

/// Options for `apply`.
#[derive(Debug, Args, Clone)]
pub struct ApplyArgs {
    #[command(flatten)]
    pub api: ApiArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Prices below this light green.
    #[arg(long, env = "AMBER_THRESHOLD_LOW", default_value_t = 15.0)]
    pub threshold_low: f64,

    /// Prices above this light red.
    #[arg(long, env = "AMBER_THRESHOLD_HIGH", default_value_t = 25.0)]
    pub threshold_high: f64,

    /// Print the run summary as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Options for `price`.
#[derive(Debug, Args, Clone)]
pub struct PriceArgs {
    #[command(flatten)]
    pub api: ApiArgs,

    /// Print the reading as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Rewrite argv so a bare invocation means `apply`.
///
/// Rules:
/// - `amber-lights`                     -> `amber-lights apply`
/// - `amber-lights --site-id X ...`     -> `amber-lights apply --site-id X ...`
/// - `amber-lights -v off ...`          -> unchanged (global flags may precede a subcommand)
/// - `amber-lights --help/--version/-h` -> unchanged
pub fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("apply".to_string());
        return argv;
    };

    let asks_for_help_or_version = argv[1..]
        .iter()
        .take_while(|arg| arg.starts_with('-'))
        .any(|arg| matches!(arg.as_str(), "-h" | "--help" | "-V" | "--version"));
    if asks_for_help_or_version {
        return argv;
    }

    // First token that isn't a flag; a subcommand there needs no rewrite.
    let first_word = argv[1..].iter().find(|arg| !arg.starts_with('-'));
    let names_subcommand = first_word.is_some_and(|word| {
        matches!(word.as_str(), "apply" | "price" | "off" | "help")
    });
    if names_subcommand {
        return argv;
    }

    if arg1.starts_with('-') {
        argv.insert(1, "apply".to_string());
    }
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_defaults_to_apply() {
        assert_eq!(rewrite_args(argv(&["amber-lights"])), argv(&["amber-lights", "apply"]));
        assert_eq!(
            rewrite_args(argv(&["amber-lights", "-v", "--site-id", "S"])),
            argv(&["amber-lights", "apply", "-v", "--site-id", "S"])
        );
        assert_eq!(
            rewrite_args(argv(&["amber-lights", "--help"])),
            argv(&["amber-lights", "--help"])
        );
        assert_eq!(
            rewrite_args(argv(&["amber-lights", "off"])),
            argv(&["amber-lights", "off"])
        );
    }

    #[test]
    fn global_flags_before_subcommand_are_left_alone() {
        let args = argv(&["amber-lights", "-v", "off", "--driver", "simulated"]);
        assert_eq!(rewrite_args(args.clone()), args);

        let cli = Cli::try_parse_from(rewrite_args(args)).unwrap();
        assert_eq!(cli.verbose, 1);
        assert!(matches!(cli.command, Command::Off(_)));

        let args = argv(&["amber-lights", "-vv", "price", "--api-key", "k", "--site-id", "S"]);
        assert_eq!(rewrite_args(args.clone()), args);
        assert_eq!(
            rewrite_args(argv(&["amber-lights", "-v", "--help"])),
            argv(&["amber-lights", "-v", "--help"])
        );
    }

    #[test]
    fn apply_parses_explicit_options() {
        let cli = Cli::try_parse_from([
            "amber-lights",
            "apply",
            "--api-key",
            "psk_x",
            "--site-id",
            "SITE",
            "--threshold-low",
            "10.5",
            "--threshold-high",
            "30",
            "--driver",
            "simulated",
            "--red-pins",
            "3,5",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        let Command::Apply(args) = cli.command else {
            panic!("expected apply");
        };
        assert_eq!(args.api.api_key, "psk_x");
        assert_eq!(args.api.site_id, "SITE");
        assert_eq!(args.threshold_low, 10.5);
        assert_eq!(args.threshold_high, 30.0);
        assert_eq!(args.output.driver, DriverKind::Simulated);
        assert_eq!(args.output.red_pins, vec![3, 5]);
    }

    #[test]
    fn off_needs_no_credentials() {
        let cli = Cli::try_parse_from(["amber-lights", "off", "--driver", "simulated"]).unwrap();
        assert!(matches!(cli.command, Command::Off(_)));
    }
}
