//! Line backends
//!
//! The display has up to eleven control and data lines. How they are
//! reached depends on the wiring:
//!
//! - [`GpioLines`] - straight to MCU pins through a [`GpioPort`]
//! - [`ExpanderLines`] - bits of an MCP23008 on an I2C backpack
//! - [`ShiftLines`] - outputs of a shift register on an SPI-style backpack
//!
//! [`Hd44780`](crate::lcd::Hd44780) only talks to [`LineBackend`], so the
//! protocol logic is the same for all three.
//!
//! # Backpack wiring
//!
//! ```text
//!            bit:  7    6    5    4    3    2    1    0
//! I2C backpack:    LT   D7   D6   D5   D4   EN   RS   -
//! SPI backpack:    LT   D4   D5   D6   D7   EN   RS   -
//! ```

use tinylcd_hal::{GpioPort, I2cBus, Level, PinMode, ShiftRegister};

use crate::expander::Mcp23008;
use crate::lcd::command::TransferWidth;

/// How the display is wired to the MCU
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterconnectMode {
    /// Every line on its own MCU pin
    DirectGpio,
    /// MCP23008 I2C backpack
    I2cExpander,
    /// Shift-register backpack
    ShiftRegister,
}

/// Data line assignment, least significant bit first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataLines {
    /// D4, D5, D6, D7
    Four([u8; 4]),
    /// D0 through D7
    Eight([u8; 8]),
}

impl DataLines {
    /// Line identifiers in bit order
    pub fn as_slice(&self) -> &[u8] {
        match self {
            DataLines::Four(lines) => lines,
            DataLines::Eight(lines) => lines,
        }
    }

    /// Transfer width these lines imply
    pub fn width(&self) -> TransferWidth {
        match self {
            DataLines::Four(_) => TransferWidth::Four,
            DataLines::Eight(_) => TransferWidth::Eight,
        }
    }
}

/// Line identifiers for one display
///
/// For [`GpioLines`] these are pin numbers on the port; for the backpacks
/// they are bit positions 0-7.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinePins {
    /// Register select (low = instruction, high = data)
    pub rs: u8,
    /// Read/write, when wired (held low)
    pub rw: Option<u8>,
    /// Enable strobe
    pub enable: u8,
    /// Data lines
    pub data: DataLines,
    /// Backlight switch, when wired
    pub backlight: Option<u8>,
}

impl LinePins {
    /// MCP23008 I2C backpack wiring
    pub const I2C_BACKPACK: Self = Self {
        rs: 1,
        rw: None,
        enable: 2,
        data: DataLines::Four([3, 4, 5, 6]),
        backlight: Some(7),
    };

    /// Shift-register backpack wiring
    pub const SHIFT_BACKPACK: Self = Self {
        rs: 1,
        rw: None,
        enable: 2,
        data: DataLines::Four([6, 5, 4, 3]),
        backlight: Some(7),
    };

    /// 4-bit wiring without RW or backlight
    pub const fn four_bit(rs: u8, enable: u8, data: [u8; 4]) -> Self {
        Self {
            rs,
            rw: None,
            enable,
            data: DataLines::Four(data),
            backlight: None,
        }
    }

    /// 8-bit wiring without RW or backlight
    pub const fn eight_bit(rs: u8, enable: u8, data: [u8; 8]) -> Self {
        Self {
            rs,
            rw: None,
            enable,
            data: DataLines::Eight(data),
            backlight: None,
        }
    }

    /// Add an RW line
    pub const fn with_rw(mut self, rw: u8) -> Self {
        self.rw = Some(rw);
        self
    }

    /// Add a backlight line
    pub const fn with_backlight(mut self, backlight: u8) -> Self {
        self.backlight = Some(backlight);
        self
    }

    /// Transfer width implied by the data lines
    pub fn width(&self) -> TransferWidth {
        self.data.width()
    }

    /// Every wired line: RS, RW, enable, backlight, then data
    pub fn all(&self) -> impl Iterator<Item = u8> + '_ {
        [Some(self.rs), self.rw, Some(self.enable), self.backlight]
            .into_iter()
            .flatten()
            .chain(self.data.as_slice().iter().copied())
    }
}

/// Access to the display's lines
///
/// A backend may buffer line changes until [`commit`](Self::commit);
/// callers commit whenever the display must see the current state.
pub trait LineBackend {
    /// Error type for line operations
    type Error;

    /// Wiring this backend implements
    const MODE: InterconnectMode;

    /// Line assignment
    fn pins(&self) -> &LinePins;

    /// Bring up the transport before any line is touched
    fn init(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Configure a line as output
    fn set_output(&mut self, line: u8) -> Result<(), Self::Error>;

    /// Set a single line
    fn set_line(&mut self, line: u8, high: bool) -> Result<(), Self::Error>;

    /// Read back a line
    fn line(&mut self, line: u8) -> Result<bool, Self::Error>;

    /// Set `lines[i]` to bit `i` of `value`
    fn set_lines(&mut self, lines: &[u8], value: u8) -> Result<(), Self::Error> {
        for (i, &line) in lines.iter().enumerate() {
            self.set_line(line, (value >> i) & 0x01 != 0)?;
        }
        Ok(())
    }

    /// Make pending line changes visible to the display
    fn commit(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Display wired straight to MCU pins
pub struct GpioLines<G> {
    port: G,
    pins: LinePins,
}

impl<G: GpioPort> GpioLines<G> {
    pub fn new(port: G, pins: LinePins) -> Self {
        Self { port, pins }
    }

    /// Give the port back
    pub fn release(self) -> G {
        self.port
    }
}

impl<G: GpioPort> LineBackend for GpioLines<G> {
    type Error = G::Error;

    const MODE: InterconnectMode = InterconnectMode::DirectGpio;

    fn pins(&self) -> &LinePins {
        &self.pins
    }

    fn set_output(&mut self, line: u8) -> Result<(), Self::Error> {
        self.port.set_mode(line, PinMode::Output)
    }

    fn set_line(&mut self, line: u8, high: bool) -> Result<(), Self::Error> {
        self.port.set_level(line, Level::from(high))
    }

    fn line(&mut self, line: u8) -> Result<bool, Self::Error> {
        Ok(self.port.level(line)?.is_high())
    }
}

/// Display behind an MCP23008 I2C backpack
///
/// Single lines go through the expander's read-modify-write. A group of
/// data lines is folded into one read and one write of the output latch.
pub struct ExpanderLines<I2C> {
    expander: Mcp23008<I2C>,
    sub_address: u8,
    pins: LinePins,
}

impl<I2C: I2cBus> ExpanderLines<I2C> {
    /// Backpack at `0x20 | sub_address`
    pub fn new(i2c: I2C, sub_address: u8) -> Self {
        Self {
            expander: Mcp23008::new(i2c),
            sub_address,
            pins: LinePins::I2C_BACKPACK,
        }
    }

    /// The expander, for the pins the display does not use
    pub fn expander(&mut self) -> &mut Mcp23008<I2C> {
        &mut self.expander
    }

    /// Give the bus back
    pub fn release(self) -> I2C {
        self.expander.release()
    }
}

impl<I2C: I2cBus> LineBackend for ExpanderLines<I2C> {
    type Error = I2C::Error;

    const MODE: InterconnectMode = InterconnectMode::I2cExpander;

    fn pins(&self) -> &LinePins {
        &self.pins
    }

    fn init(&mut self) -> Result<(), Self::Error> {
        self.expander.begin(self.sub_address)
    }

    fn set_output(&mut self, line: u8) -> Result<(), Self::Error> {
        self.expander.set_pin_mode(line, PinMode::Output)
    }

    fn set_line(&mut self, line: u8, high: bool) -> Result<(), Self::Error> {
        self.expander.set_pin_level(line, Level::from(high))
    }

    fn line(&mut self, line: u8) -> Result<bool, Self::Error> {
        Ok(self.expander.read_pin_level(line)?.is_high())
    }

    fn set_lines(&mut self, lines: &[u8], value: u8) -> Result<(), Self::Error> {
        let mut out = self.expander.read_output_latch()?;
        for (i, &line) in lines.iter().enumerate() {
            if line > 7 {
                continue;
            }
            out &= !(1 << line);
            out |= ((value >> i) & 0x01) << line;
        }
        self.expander.write_output_port(out)
    }
}

/// Display behind a shift-register backpack
///
/// Line changes only update a shadow byte; [`commit`](LineBackend::commit)
/// shifts it out and latches, so a whole byte of line state changes at
/// once.
pub struct ShiftLines<S> {
    shifter: S,
    buffer: u8,
    pins: LinePins,
}

impl<S: ShiftRegister> ShiftLines<S> {
    pub fn new(shifter: S) -> Self {
        Self {
            shifter,
            buffer: 0,
            pins: LinePins::SHIFT_BACKPACK,
        }
    }

    /// Shadow of the register outputs
    pub fn buffer(&self) -> u8 {
        self.buffer
    }

    /// Give the shift register back
    pub fn release(self) -> S {
        self.shifter
    }
}

impl<S: ShiftRegister> LineBackend for ShiftLines<S> {
    type Error = S::Error;

    const MODE: InterconnectMode = InterconnectMode::ShiftRegister;

    fn pins(&self) -> &LinePins {
        &self.pins
    }

    fn set_output(&mut self, _line: u8) -> Result<(), Self::Error> {
        // Register outputs are always driven
        Ok(())
    }

    fn set_line(&mut self, line: u8, high: bool) -> Result<(), Self::Error> {
        if line > 7 {
            return Ok(());
        }
        if high {
            self.buffer |= 1 << line;
        } else {
            self.buffer &= !(1 << line);
        }
        Ok(())
    }

    fn line(&mut self, line: u8) -> Result<bool, Self::Error> {
        Ok(line <= 7 && (self.buffer >> line) & 0x01 != 0)
    }

    fn commit(&mut self) -> Result<(), Self::Error> {
        self.shifter.push(self.buffer)?;
        self.shifter.latch()
    }
}
