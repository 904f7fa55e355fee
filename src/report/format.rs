//! Terminal formatting.
//!
//! stdout carries only these strings; diagnostics go through `tracing` on stderr.

use serde::Serialize;

use super::RunSummary;
use crate::domain::PriceReading;
use crate::error::{AppError, EXIT_REPORT};

/// One line per fact: price, optional metadata, then the lit indicator.
pub fn format_run_summary(summary: &RunSummary) -> String {
    let mut out = format_price(&summary.reading);
    out.push_str(&format!(
        "Thresholds: low {:.2}, high {:.2}\n",
        summary.thresholds.low(),
        summary.thresholds.high()
    ));
    out.push_str(&format!("Indicator: {}\n", summary.active.display_name()));
    out
}

pub fn format_price(reading: &PriceReading) -> String {
    let mut out = format!("Current price: {:.2} c/kWh\n", reading.per_kwh);
    if let Some(spot) = reading.spot_per_kwh {
        out.push_str(&format!("Spot price: {spot:.2} c/kWh\n"));
    }
    if let Some(descriptor) = &reading.descriptor {
        out.push_str(&format!("Descriptor: {descriptor}\n"));
    }
    if let Some(nem_time) = &reading.nem_time {
        out.push_str(&format!("Interval: {}\n", nem_time.to_rfc3339()));
    }
    out
}

pub fn to_json<T: Serialize>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| AppError::new(EXIT_REPORT, format!("Failed to serialize summary: {e}")))
}
