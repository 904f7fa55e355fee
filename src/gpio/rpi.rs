//! Raspberry Pi backend on top of `rppal`.

use std::collections::HashMap;

use rppal::gpio::{self, Gpio, OutputPin};

use super::OutputDriver;
use super::board::to_bcm;
use crate::domain::{Direction, Level, PinNumbering};
use crate::error::GpioError;

pub struct RppalDriver {
    gpio: Option<Gpio>,
    numbering: PinNumbering,
    outputs: HashMap<u8, OutputPin>,
}

impl RppalDriver {
    pub fn new() -> Self {
        Self {
            gpio: None,
            numbering: PinNumbering::Board,
            outputs: HashMap::new(),
        }
    }
}

impl Default for RppalDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl From<gpio::Error> for GpioError {
    fn from(err: gpio::Error) -> Self {
        GpioError::Backend(err.to_string())
    }
}

impl OutputDriver for RppalDriver {
    fn initialize(&mut self, numbering: PinNumbering) -> Result<(), GpioError> {
        self.gpio = Some(Gpio::new()?);
        self.numbering = numbering;
        tracing::debug!(?numbering, "GPIO initialized");
        Ok(())
    }

    fn configure_pins(&mut self, pins: &[u8], direction: Direction) -> Result<(), GpioError> {
        let gpio = self.gpio.as_ref().ok_or(GpioError::NotInitialized)?;
        for &pin in pins {
            let bcm = to_bcm(pin, self.numbering)?;
            let mut output = match direction {
                Direction::Out => gpio.get(bcm)?.into_output(),
            };
            // Leave the indicator lit after the process exits.
            output.set_reset_on_drop(false);
            tracing::trace!(pin, bcm, "configured output");
            self.outputs.insert(pin, output);
        }
        Ok(())
    }

    fn set_pins(&mut self, pins: &[u8], level: Level) -> Result<(), GpioError> {
        for &pin in pins {
            let output = self
                .outputs
                .get_mut(&pin)
                .ok_or(GpioError::NotConfigured(pin))?;
            output.write(match level {
                Level::High => gpio::Level::High,
                Level::Low => gpio::Level::Low,
            });
        }
        Ok(())
    }
}
