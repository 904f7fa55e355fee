//! Raspberry Pi 40-pin header layout.

use crate::domain::PinNumbering;
use crate::error::GpioError;

/// `(header position, BCM line)` for every header pin wired to a GPIO line.
/// Power and ground positions are absent.
const BOARD_TO_BCM: [(u8, u8); 28] = [
    (3, 2),
    (5, 3),
    (7, 4),
    (8, 14),
    (10, 15),
    (11, 17),
    (12, 18),
    (13, 27),
    (15, 22),
    (16, 23),
    (18, 24),
    (19, 10),
    (21, 9),
    (22, 25),
    (23, 11),
    (24, 8),
    (26, 7),
    (27, 0),
    (28, 1),
    (29, 5),
    (31, 6),
    (32, 12),
    (33, 13),
    (35, 19),
    (36, 16),
    (37, 26),
    (38, 20),
    (40, 21),
];

/// Highest BCM line exposed on the header.
const MAX_BCM: u8 = 27;

/// Translate a pin identifier to the BCM line the kernel knows.
pub fn to_bcm(pin: u8, numbering: PinNumbering) -> Result<u8, GpioError> {
    match numbering {
        PinNumbering::Bcm if pin <= MAX_BCM => Ok(pin),
        PinNumbering::Bcm => Err(GpioError::NotGpio(pin)),
        PinNumbering::Board => BOARD_TO_BCM
            .iter()
            .find(|(board, _)| *board == pin)
            .map(|(_, bcm)| *bcm)
            .ok_or(GpioError::NotGpio(pin)),
    }
}
