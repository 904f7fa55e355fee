//! Validated runtime configuration.
//!
//! clap only checks that values parse; the invariants the indicator relies on
//! (`low <= high`, disjoint pin groups, non-empty credentials) are enforced here
//! before any pin or socket is touched.

use std::time::Duration;

use crate::cli::{ApiArgs, ApplyArgs, DriverKind, OutputArgs};
use crate::data::ApiConfig;
use crate::domain::{PinMap, PinNumbering, ThresholdConfig};
use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub driver: DriverKind,
    pub numbering: PinNumbering,
    pub pins: PinMap,
}

/// Everything `apply` needs.
#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub output: OutputConfig,
    pub thresholds: ThresholdConfig,
    pub json: bool,
}

impl Config {
    pub fn from_args(args: &ApplyArgs) -> Result<Self, AppError> {
        let thresholds = ThresholdConfig::new(args.threshold_low, args.threshold_high)
            .map_err(|e| AppError::config(format!("Invalid thresholds: {e}.")))?;
        Ok(Self {
            api: api_config_from_args(&args.api)?,
            output: output_config_from_args(&args.output)?,
            thresholds,
            json: args.json,
        })
    }
}

pub fn api_config_from_args(args: &ApiArgs) -> Result<ApiConfig, AppError> {
    if args.api_key.trim().is_empty() {
        return Err(AppError::config("Missing API key (--api-key or AMBER_API_KEY)."));
    }
    if args.site_id.trim().is_empty() {
        return Err(AppError::config("Missing site id (--site-id or AMBER_SITE_ID)."));
    }
    if args.base_url.trim().is_empty() {
        return Err(AppError::config("Base URL must not be empty."));
    }

    Ok(ApiConfig {
        base_url: args.base_url.trim().to_string(),
        api_key: args.api_key.trim().to_string(),
        site_id: args.site_id.trim().to_string(),
        resolution: args.resolution.trim().to_string(),
        timeout: (args.timeout_secs > 0).then(|| Duration::from_secs(args.timeout_secs)),
    })
}

pub fn output_config_from_args(args: &OutputArgs) -> Result<OutputConfig, AppError> {
    let pins = PinMap::new(
        args.red_pins.clone(),
        args.amber_pins.clone(),
        args.green_pins.clone(),
    )
    .map_err(|e| AppError::config(format!("Invalid pin assignment: {e}.")))?;

    Ok(OutputConfig {
        driver: args.driver,
        numbering: args.numbering,
        pins,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EXIT_CONFIG;

    fn apply_args() -> ApplyArgs {
        ApplyArgs {
            api: ApiArgs {
                api_key: "psk_x".to_string(),
                site_id: " SITE ".to_string(),
                resolution: "30".to_string(),
                base_url: "https://api.amber.com.au".to_string(),
                timeout_secs: 0,
            },
            output: OutputArgs {
                driver: DriverKind::Simulated,
                numbering: PinNumbering::Board,
                red_pins: vec![19, 26],
                amber_pins: vec![21, 24],
                green_pins: vec![23, 22],
            },
            threshold_low: 15.0,
            threshold_high: 25.0,
            json: false,
        }
    }

    #[test]
    fn builds_config_from_defaults() {
        let config = Config::from_args(&apply_args()).unwrap();
        assert_eq!(config.api.site_id, "SITE");
        assert_eq!(config.api.timeout, None);
        assert_eq!(config.thresholds, ThresholdConfig::new(15.0, 25.0).unwrap());
        assert_eq!(config.output.pins, PinMap::default());
    }

    #[test]
    fn rejects_inverted_thresholds() {
        let mut args = apply_args();
        args.threshold_low = 30.0;
        let err = Config::from_args(&args).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_CONFIG);
        assert!(err.to_string().contains("thresholds"), "{err}");
    }

    #[test]
    fn rejects_blank_credentials_and_shared_pins() {
        let mut args = apply_args();
        args.api.api_key = "  ".to_string();
        assert_eq!(Config::from_args(&args).unwrap_err().exit_code(), EXIT_CONFIG);

        let mut args = apply_args();
        args.output.green_pins = vec![23, 21];
        let err = Config::from_args(&args).unwrap_err();
        assert!(err.to_string().contains("pin 21"), "{err}");
    }
}
