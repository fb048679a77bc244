//! GPIO abstractions
//!
//! The display driver addresses its lines by number, the way a board's
//! pin header is labelled. [`GpioPort`] is that numbered view; it can be
//! implemented by a chip HAL directly or built from individual
//! `embedded-hal` pins with [`OutputBank`].

use embedded_hal::digital::{PinState, StatefulOutputPin};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Direction of a GPIO line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PinMode {
    /// High-impedance input
    Input,
    /// Push-pull output
    Output,
}

/// Logic level of a GPIO line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Level {
    /// Logic 0
    #[default]
    Low,
    /// Logic 1
    High,
}

impl Level {
    /// Check if this is logic 1
    pub const fn is_high(self) -> bool {
        matches!(self, Level::High)
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

impl From<Level> for bool {
    fn from(level: Level) -> Self {
        level.is_high()
    }
}

impl From<Level> for PinState {
    fn from(level: Level) -> Self {
        PinState::from(level.is_high())
    }
}

/// A bank of numbered GPIO lines
///
/// Line numbers are whatever the implementation documents (MCU pin
/// numbers, header positions, ...). Implementations should ignore line
/// numbers they do not own rather than fail.
pub trait GpioPort {
    /// Error type for line operations
    type Error;

    /// Configure a line as input or output
    fn set_mode(&mut self, pin: u8, mode: PinMode) -> Result<(), Self::Error>;

    /// Drive an output line
    fn set_level(&mut self, pin: u8, level: Level) -> Result<(), Self::Error>;

    /// Read the current level of a line
    fn level(&mut self, pin: u8) -> Result<Level, Self::Error>;
}

/// [`GpioPort`] built from a fixed array of `embedded-hal` output pins
///
/// Line `n` is `pins[n]`. Reading a line returns the level it is being
/// driven to. Pins are typed as outputs by the HAL, so `set_mode` has
/// nothing to do; line numbers past the end of the array are ignored.
pub struct OutputBank<P, const N: usize> {
    pins: [P; N],
}

impl<P, const N: usize> OutputBank<P, N> {
    /// Create a bank from already-configured output pins
    pub fn new(pins: [P; N]) -> Self {
        Self { pins }
    }

    /// Number of lines in the bank
    pub const fn len(&self) -> usize {
        N
    }

    /// Check if the bank has no lines
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Give the pins back
    pub fn release(self) -> [P; N] {
        self.pins
    }
}

impl<P: StatefulOutputPin, const N: usize> GpioPort for OutputBank<P, N> {
    type Error = P::Error;

    fn set_mode(&mut self, _pin: u8, _mode: PinMode) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_level(&mut self, pin: u8, level: Level) -> Result<(), Self::Error> {
        match self.pins.get_mut(pin as usize) {
            Some(p) => p.set_state(level.into()),
            None => Ok(()),
        }
    }

    fn level(&mut self, pin: u8) -> Result<Level, Self::Error> {
        match self.pins.get_mut(pin as usize) {
            Some(p) => Ok(Level::from(p.is_set_high()?)),
            None => Ok(Level::Low),
        }
    }
}
