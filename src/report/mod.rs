//! Run summaries for the terminal.

use serde::Serialize;

use crate::domain::{OutputGroup, PriceReading, ThresholdConfig};

pub mod format;

pub use format::{format_price, format_run_summary, to_json};

/// Outcome of a successful `apply`.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub reading: PriceReading,
    pub thresholds: ThresholdConfig,
    pub active: OutputGroup,
}
