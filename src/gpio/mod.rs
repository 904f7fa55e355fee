//! Output driver capability and its backends.
//!
//! The indicator logic only ever talks to `OutputDriver`, so it runs the same
//! against real Raspberry Pi pins (`RppalDriver`) and the in-memory
//! `SimulatedDriver` used for dry runs and tests.

use std::collections::BTreeMap;

use crate::domain::{Direction, Level, PinNumbering};
use crate::error::GpioError;

pub mod board;
#[cfg(target_os = "linux")]
pub mod rpi;

#[cfg(target_os = "linux")]
pub use rpi::RppalDriver;

/// The three operations needed to drive indicator pins.
pub trait OutputDriver {
    /// Select how pin identifiers are interpreted. Must be called first.
    fn initialize(&mut self, numbering: PinNumbering) -> Result<(), GpioError>;

    fn configure_pins(&mut self, pins: &[u8], direction: Direction) -> Result<(), GpioError>;

    fn set_pins(&mut self, pins: &[u8], level: Level) -> Result<(), GpioError>;
}

/// In-memory driver. Tracks pin levels and logs every write.
#[derive(Debug, Default)]
pub struct SimulatedDriver {
    numbering: Option<PinNumbering>,
    levels: BTreeMap<u8, Level>,
    writes: Vec<(u8, Level)>,
}

impl SimulatedDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn numbering(&self) -> Option<PinNumbering> {
        self.numbering
    }

    /// Current level of a configured pin.
    pub fn level(&self, pin: u8) -> Option<Level> {
        self.levels.get(&pin).copied()
    }

    /// Every `(pin, level)` write in order.
    pub fn writes(&self) -> &[(u8, Level)] {
        &self.writes
    }
}

impl OutputDriver for SimulatedDriver {
    fn initialize(&mut self, numbering: PinNumbering) -> Result<(), GpioError> {
        tracing::debug!(?numbering, "simulated driver initialized");
        self.numbering = Some(numbering);
        Ok(())
    }

    fn configure_pins(&mut self, pins: &[u8], direction: Direction) -> Result<(), GpioError> {
        if self.numbering.is_none() {
            return Err(GpioError::NotInitialized);
        }
        for &pin in pins {
            tracing::trace!(pin, ?direction, "simulated pin configured");
            // Outputs power up low.
            self.levels.entry(pin).or_insert(Level::Low);
        }
        Ok(())
    }

    fn set_pins(&mut self, pins: &[u8], level: Level) -> Result<(), GpioError> {
        for &pin in pins {
            let slot = self
                .levels
                .get_mut(&pin)
                .ok_or(GpioError::NotConfigured(pin))?;
            *slot = level;
            self.writes.push((pin, level));
            tracing::debug!(pin, ?level, "simulated pin write");
        }
        Ok(())
    }
}
