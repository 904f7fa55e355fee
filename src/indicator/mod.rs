//! Price-to-indicator mapping.
//!
//! `select_group` is the pure rule; `IndicatorController` sequences the driver
//! calls so that exactly one group is lit after every `apply`.

use crate::domain::{Direction, Level, OutputGroup, PinMap, PinNumbering, ThresholdConfig};
use crate::error::{AppError, EXIT_FETCH};
use crate::gpio::OutputDriver;

/// Pick the indicator for `price`.
///
/// The three ranges partition the price line at the thresholds:
/// above `high` is red, below `low` is green, and `[low, high]` (both ends
/// inclusive) is amber. Returns `None` only for NaN.
pub fn select_group(price: f64, thresholds: &ThresholdConfig) -> Option<OutputGroup> {
    if price > thresholds.high() {
        Some(OutputGroup::Red)
    } else if price < thresholds.low() {
        Some(OutputGroup::Green)
    } else if price >= thresholds.low() && price <= thresholds.high() {
        Some(OutputGroup::Amber)
    } else {
        None
    }
}

pub struct IndicatorController<D> {
    driver: D,
    pins: PinMap,
    numbering: PinNumbering,
}

impl<D: OutputDriver> IndicatorController<D> {
    pub fn new(driver: D, pins: PinMap, numbering: PinNumbering) -> Self {
        Self {
            driver,
            pins,
            numbering,
        }
    }

    /// Select the numbering mode and configure every group's pins as outputs.
    pub fn initialize(&mut self) -> Result<(), AppError> {
        self.driver.initialize(self.numbering)?;
        for group in OutputGroup::ALL {
            self.driver.configure_pins(self.pins.pins(group), Direction::Out)?;
        }
        Ok(())
    }

    /// Drive every group low.
    pub fn clear(&mut self) -> Result<(), AppError> {
        for group in OutputGroup::ALL {
            self.driver.set_pins(self.pins.pins(group), Level::Low)?;
        }
        Ok(())
    }

    /// Light the group selected for `price`, after clearing all groups.
    pub fn apply(&mut self, price: f64, thresholds: &ThresholdConfig) -> Result<OutputGroup, AppError> {
        let group = select_group(price, thresholds)
            .ok_or_else(|| AppError::new(EXIT_FETCH, format!("Price {price} is not a number.")))?;

        self.clear()?;
        tracing::info!(group = group.display_name(), price, "setting indicator");
        self.driver.set_pins(self.pins.pins(group), Level::High)?;
        Ok(group)
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn into_driver(self) -> D {
        self.driver
    }
}
