//! Amber Electric API integration (current site price).

use std::time::Duration;

use chrono::{DateTime, FixedOffset};
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::{Deserialize, Deserializer};

use crate::domain::PriceReading;
use crate::error::FetchError;

pub const DEFAULT_BASE_URL: &str = "https://api.amber.com.au";

/// Connection details for the pricing endpoint.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_key: String,
    pub site_id: String,
    pub resolution: String,
    pub timeout: Option<Duration>,
}

/// Anything that can produce the current price.
pub trait PriceSource {
    fn fetch_current_price(&self) -> Result<PriceReading, FetchError>;
}

pub struct AmberClient {
    client: Client,
    config: ApiConfig,
}

impl AmberClient {
    pub fn new(config: ApiConfig) -> Result<Self, FetchError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    /// `{base}/v1/sites/{site}/prices/current`; the resolution goes in the query.
    pub fn current_prices_url(&self) -> String {
        format!(
            "{}/v1/sites/{}/prices/current",
            self.config.base_url.trim_end_matches('/'),
            self.config.site_id
        )
    }
}

impl PriceSource for AmberClient {
    fn fetch_current_price(&self) -> Result<PriceReading, FetchError> {
        let url = self.current_prices_url();
        tracing::debug!(%url, resolution = %self.config.resolution, "requesting current price");

        let resp = self
            .client
            .get(&url)
            .query(&[("resolution", self.config.resolution.as_str())])
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, format!("Bearer {}", self.config.api_key))
            .send()?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = resp.text()?;
        parse_current_price(&body)
    }
}

/// Decode a `prices/current` body and take the first record.
pub fn parse_current_price(body: &str) -> Result<PriceReading, FetchError> {
    let records: Vec<PriceRecord> = serde_json::from_str(body)?;
    let first = records.into_iter().next().ok_or(FetchError::Empty)?;

    tracing::debug!(
        per_kwh = first.per_kwh,
        descriptor = first.descriptor.as_deref().unwrap_or("-"),
        "received price record"
    );

    Ok(PriceReading {
        per_kwh: first.per_kwh,
        spot_per_kwh: first.spot_per_kwh,
        descriptor: first.descriptor,
        channel_type: first.channel_type,
        nem_time: first.nem_time,
    })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PriceRecord {
    #[serde(deserialize_with = "number_or_numeric_string")]
    per_kwh: f64,
    #[serde(default)]
    spot_per_kwh: Option<f64>,
    #[serde(default)]
    descriptor: Option<String>,
    #[serde(default)]
    channel_type: Option<String>,
    #[serde(default)]
    nem_time: Option<DateTime<FixedOffset>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

/// Accepts `20.5` as well as `"20.5"`.
fn number_or_numeric_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(value) => Ok(value),
        NumberOrString::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|e| serde::de::Error::custom(format!("invalid perKwh {text:?}: {e}"))),
    }
}
