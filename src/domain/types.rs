//! Shared domain types.

use chrono::{DateTime, FixedOffset};
use clap::ValueEnum;
use serde::Serialize;

/// Current price as reported by the pricing API.
///
/// `per_kwh` is the only value that drives the indicators; the rest is carried
/// along for the run summary when the API provides it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceReading {
    /// Price per kWh, in the API's currency units (c/kWh for Amber).
    pub per_kwh: f64,
    pub spot_per_kwh: Option<f64>,
    pub descriptor: Option<String>,
    pub channel_type: Option<String>,
    pub nem_time: Option<DateTime<FixedOffset>>,
}

impl PriceReading {
    pub fn new(per_kwh: f64) -> Self {
        Self {
            per_kwh,
            spot_per_kwh: None,
            descriptor: None,
            channel_type: None,
            nem_time: None,
        }
    }
}

/// Price bounds splitting the indicator range. `low <= high` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThresholdConfig {
    low: f64,
    high: f64,
}

impl ThresholdConfig {
    pub fn new(low: f64, high: f64) -> Result<Self, String> {
        if !low.is_finite() || !high.is_finite() {
            return Err(format!("thresholds must be finite (low={low}, high={high})"));
        }
        if low > high {
            return Err(format!(
                "low threshold {low} is above high threshold {high}"
            ));
        }
        Ok(Self { low, high })
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }
}

/// One colored indicator, driven as a group of pins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputGroup {
    Red,
    Amber,
    Green,
}

impl OutputGroup {
    pub const ALL: [OutputGroup; 3] = [OutputGroup::Red, OutputGroup::Amber, OutputGroup::Green];

    pub fn display_name(self) -> &'static str {
        match self {
            OutputGroup::Red => "red",
            OutputGroup::Amber => "amber",
            OutputGroup::Green => "green",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    High,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Out,
}

/// How pin identifiers are interpreted by the output driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PinNumbering {
    /// Physical pin positions on the 40-pin header.
    Board,
    /// Broadcom GPIO line numbers.
    Bcm,
}

/// Pin assignment for the three indicator groups.
///
/// The groups never share a pin, so driving one group can't disturb another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinMap {
    red: Vec<u8>,
    amber: Vec<u8>,
    green: Vec<u8>,
}

impl PinMap {
    pub fn new(red: Vec<u8>, amber: Vec<u8>, green: Vec<u8>) -> Result<Self, String> {
        let map = Self { red, amber, green };
        let mut seen: Vec<(u8, OutputGroup)> = Vec::new();
        for group in OutputGroup::ALL {
            let pins = map.pins(group);
            if pins.is_empty() {
                return Err(format!("no pins assigned to the {} group", group.display_name()));
            }
            for &pin in pins {
                if let Some((_, other)) = seen.iter().find(|(p, _)| *p == pin) {
                    return Err(format!(
                        "pin {pin} is assigned to both the {} and {} groups",
                        other.display_name(),
                        group.display_name()
                    ));
                }
                seen.push((pin, group));
            }
        }
        Ok(map)
    }

    pub fn pins(&self, group: OutputGroup) -> &[u8] {
        match group {
            OutputGroup::Red => &self.red,
            OutputGroup::Amber => &self.amber,
            OutputGroup::Green => &self.green,
        }
    }
}

impl Default for PinMap {
    /// Header positions used by the stock LED board wiring.
    fn default() -> Self {
        Self {
            red: vec![19, 26],
            amber: vec![21, 24],
            green: vec![23, 22],
        }
    }
}
