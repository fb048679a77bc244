//! Shift register abstractions
//!
//! A serial-in, parallel-out register (74HC595 and friends) takes a byte
//! one bit per clock edge and only shows it on its outputs when latched.
//! Keeping [`ShiftRegister::push`] and [`ShiftRegister::latch`] separate
//! lets the caller decide when a whole byte of line state becomes visible.

use embedded_hal::digital::OutputPin;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Serial-in, parallel-out shift register
pub trait ShiftRegister {
    /// Error type for register operations
    type Error;

    /// Shift 8 bits into the register
    fn push(&mut self, byte: u8) -> Result<(), Self::Error>;

    /// Copy the shifted bits to the parallel outputs
    fn latch(&mut self) -> Result<(), Self::Error>;
}

/// Order in which bits leave the data line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BitOrder {
    /// Bit 7 first (ends up on Q7)
    #[default]
    MsbFirst,
    /// Bit 0 first
    LsbFirst,
}

/// Bit-banged shift register on three output pins
///
/// `push` pulls the latch low and clocks the byte out on rising clock
/// edges; `latch` raises the latch line to present it.
pub struct BitBangShifter<D, C, L> {
    data: D,
    clock: C,
    latch: L,
    order: BitOrder,
}

impl<D, C, L> BitBangShifter<D, C, L>
where
    D: OutputPin,
    C: OutputPin<Error = D::Error>,
    L: OutputPin<Error = D::Error>,
{
    /// Create a shifter that sends the most significant bit first
    pub fn new(data: D, clock: C, latch: L) -> Self {
        Self::with_order(data, clock, latch, BitOrder::MsbFirst)
    }

    /// Create a shifter with an explicit bit order
    pub fn with_order(data: D, clock: C, latch: L, order: BitOrder) -> Self {
        Self {
            data,
            clock,
            latch,
            order,
        }
    }

    /// Bit order in use
    pub fn order(&self) -> BitOrder {
        self.order
    }

    /// Give the pins back
    pub fn release(self) -> (D, C, L) {
        (self.data, self.clock, self.latch)
    }
}

impl<D, C, L> ShiftRegister for BitBangShifter<D, C, L>
where
    D: OutputPin,
    C: OutputPin<Error = D::Error>,
    L: OutputPin<Error = D::Error>,
{
    type Error = D::Error;

    fn push(&mut self, byte: u8) -> Result<(), Self::Error> {
        self.latch.set_low()?;
        for i in 0..8 {
            let bit = match self.order {
                BitOrder::MsbFirst => (byte >> (7 - i)) & 0x01,
                BitOrder::LsbFirst => (byte >> i) & 0x01,
            };
            if bit != 0 {
                self.data.set_high()?;
            } else {
                self.data.set_low()?;
            }
            self.clock.set_high()?;
            self.clock.set_low()?;
        }
        Ok(())
    }

    fn latch(&mut self) -> Result<(), Self::Error> {
        self.latch.set_high()
    }
}
