//! MCP23008 8-bit I2C port expander
//!
//! The MCP23008 exposes eight GPIO lines behind a small register file.
//! Every transaction starts by writing the register address; a write
//! follows it with the data byte, a read issues a separate one-byte read.
//!
//! # Addressing
//!
//! The device answers at `0x20 | A2:A0`, so up to eight expanders can
//! share a bus. Sub-addresses above 7 are clamped to 7.
//!
//! # Register access
//!
//! The driver keeps no copy of the device registers. Every pin change is
//! a read-modify-write over the bus: a register-address write, a one-byte
//! read, then the write of the new value.

use tinylcd_hal::{I2cBus, Level, PinMode};

/// Fixed part of the 7-bit bus address
pub const MCP23008_ADDRESS: u8 = 0x20;

/// Highest valid sub-address (A2:A0 all high)
pub const MAX_SUB_ADDRESS: u8 = 7;

/// MCP23008 register addresses
pub mod reg {
    /// I/O direction (1 = input)
    pub const IODIR: u8 = 0x00;
    /// Input polarity
    pub const IPOL: u8 = 0x01;
    /// Interrupt-on-change enable
    pub const GPINTEN: u8 = 0x02;
    /// Default compare value for interrupt-on-change
    pub const DEFVAL: u8 = 0x03;
    /// Interrupt control
    pub const INTCON: u8 = 0x04;
    /// Device configuration
    pub const IOCON: u8 = 0x05;
    /// Pull-up enable
    pub const GPPU: u8 = 0x06;
    /// Interrupt flags
    pub const INTF: u8 = 0x07;
    /// Interrupt capture
    pub const INTCAP: u8 = 0x08;
    /// Port input level
    pub const GPIO: u8 = 0x09;
    /// Output latch
    pub const OLAT: u8 = 0x0A;
}

/// Registers after IODIR that `begin` clears (IPOL through OLAT)
const CLEARED_REGISTERS: usize = (reg::OLAT - reg::IODIR) as usize;

/// MCP23008 driver
pub struct Mcp23008<I2C> {
    i2c: I2C,
    sub_address: u8,
}

impl<I2C: I2cBus> Mcp23008<I2C> {
    /// Create a driver at sub-address 0
    ///
    /// No bus traffic happens until [`begin`](Self::begin).
    pub fn new(i2c: I2C) -> Self {
        Self { i2c, sub_address: 0 }
    }

    /// Full 7-bit bus address
    pub fn address(&self) -> u8 {
        MCP23008_ADDRESS | self.sub_address
    }

    /// Configured sub-address (0-7)
    pub fn sub_address(&self) -> u8 {
        self.sub_address
    }

    /// Select the device and reset it to its power-on configuration
    ///
    /// Sets every pin to input and clears all other configuration
    /// registers in one sequential write. Must be called before any
    /// other operation.
    pub fn begin(&mut self, sub_address: u8) -> Result<(), I2C::Error> {
        self.sub_address = sub_address.min(MAX_SUB_ADDRESS);

        #[cfg(feature = "defmt")]
        defmt::debug!("MCP23008: reset at {=u8:#x}", self.address());

        let mut frame = [0u8; 2 + CLEARED_REGISTERS];
        frame[0] = reg::IODIR;
        frame[1] = 0xFF; // all inputs
        self.i2c.write(self.address(), &frame)
    }

    /// Configure a pin as input or output
    ///
    /// Pins above 7 are ignored.
    pub fn set_pin_mode(&mut self, pin: u8, mode: PinMode) -> Result<(), I2C::Error> {
        self.update_bit(reg::IODIR, pin, mode == PinMode::Input)
    }

    /// Drive an output pin
    ///
    /// Pins above 7 are ignored.
    pub fn set_pin_level(&mut self, pin: u8, level: Level) -> Result<(), I2C::Error> {
        self.update_bit(reg::OLAT, pin, level.is_high())
    }

    /// Enable or disable the 100k pull-up on a pin
    ///
    /// Pins above 7 are ignored.
    pub fn set_pull_up(&mut self, pin: u8, enabled: bool) -> Result<(), I2C::Error> {
        self.update_bit(reg::GPPU, pin, enabled)
    }

    /// Read the level of a single pin
    ///
    /// Returns `Low` for pins above 7 without touching the bus.
    pub fn read_pin_level(&mut self, pin: u8) -> Result<Level, I2C::Error> {
        if pin > 7 {
            return Ok(Level::Low);
        }
        let port = self.read_port()?;
        Ok(Level::from((port >> pin) & 0x01 != 0))
    }

    /// Read all eight input levels
    pub fn read_port(&mut self) -> Result<u8, I2C::Error> {
        self.read_register(reg::GPIO)
    }

    /// Read the output latch
    pub fn read_output_latch(&mut self) -> Result<u8, I2C::Error> {
        self.read_register(reg::OLAT)
    }

    /// Write all eight output latches at once
    pub fn write_output_port(&mut self, value: u8) -> Result<(), I2C::Error> {
        self.write_register(reg::OLAT, value)
    }

    /// Read a single register
    pub fn read_register(&mut self, register: u8) -> Result<u8, I2C::Error> {
        let address = self.address();
        self.i2c.write(address, &[register])?;
        let mut buf = [0u8; 1];
        self.i2c.read(address, &mut buf)?;
        Ok(buf[0])
    }

    /// Write a single register
    pub fn write_register(&mut self, register: u8, value: u8) -> Result<(), I2C::Error> {
        let address = self.address();
        self.i2c.write(address, &[register, value])
    }

    /// Give the bus back
    pub fn release(self) -> I2C {
        self.i2c
    }

    fn update_bit(&mut self, register: u8, pin: u8, set: bool) -> Result<(), I2C::Error> {
        if pin > 7 {
            return Ok(());
        }
        let mut value = self.read_register(register)?;
        if set {
            value |= 1 << pin;
        } else {
            value &= !(1 << pin);
        }
        self.write_register(register, value)
    }
}
