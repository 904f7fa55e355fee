//! Domain types used throughout the run.
//!
//! This module defines:
//!
//! - the price reading returned by the fetcher (`PriceReading`)
//! - the indicator rule inputs (`ThresholdConfig`)
//! - the output side (`OutputGroup`, `PinMap`, `Level`, `PinNumbering`)

pub mod types;

pub use types::*;
