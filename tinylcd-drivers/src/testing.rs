//! Recording mocks shared by the driver tests
//!
//! Every mock appends to one [`Log`], so a test can assert on the exact
//! interleaving of bus traffic, line changes and delays.

use core::cell::RefCell;
use core::convert::Infallible;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use tinylcd_hal::{GpioPort, I2cBus, Level, PinMode, ShiftRegister};

use crate::expander::mcp23008::reg;
use crate::lcd::{InterconnectMode, LineBackend, LinePins};

/// One observable action on a mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    I2cWrite { address: u8, data: Vec<u8> },
    I2cRead { address: u8, len: usize },
    PinMode(u8, PinMode),
    PinLevel(u8, Level),
    Push(u8),
    Latch,
    Output(u8),
    Line(u8, bool),
    Commit,
    DelayUs(u32),
}

pub type Log = Rc<RefCell<Vec<Event>>>;

pub fn new_log() -> Log {
    Rc::default()
}

/// Snapshot of everything recorded so far
pub fn events(log: &Log) -> Vec<Event> {
    log.borrow().clone()
}

/// Total delay recorded between two indices of the log
pub fn delay_between(events: &[Event], from: usize, to: usize) -> u32 {
    events[from..to]
        .iter()
        .map(|e| match e {
            Event::DelayUs(us) => *us,
            _ => 0,
        })
        .sum()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimError {
    /// Nobody answered at the address
    Nack,
    /// Failure requested by the test
    Injected,
}

/// Register-level MCP23008 simulation
///
/// Sequential writes auto-increment the register pointer; writes to GPIO
/// land in OLAT; reading GPIO returns OLAT on output pins and `inputs` on
/// input pins.
pub struct SimMcp23008 {
    pub address: u8,
    pub regs: [u8; 11],
    pub inputs: u8,
    pub fail: bool,
    pointer: u8,
    log: Log,
}

impl SimMcp23008 {
    pub fn new(address: u8, log: Log) -> Self {
        let mut regs = [0u8; 11];
        regs[reg::IODIR as usize] = 0xFF;
        Self {
            address,
            regs,
            inputs: 0,
            fail: false,
            pointer: 0,
            log,
        }
    }

    pub fn reg(&self, r: u8) -> u8 {
        self.regs[r as usize]
    }

    fn check(&self, address: u8) -> Result<(), SimError> {
        if self.fail {
            return Err(SimError::Injected);
        }
        if address != self.address {
            return Err(SimError::Nack);
        }
        Ok(())
    }

    fn advance(&mut self) {
        self.pointer = (self.pointer + 1) % self.regs.len() as u8;
    }

    fn load(&self, r: u8) -> u8 {
        if r == reg::GPIO {
            let iodir = self.reg(reg::IODIR);
            (self.reg(reg::OLAT) & !iodir) | (self.inputs & iodir)
        } else {
            self.reg(r)
        }
    }

    fn store(&mut self, r: u8, value: u8) {
        let target = if r == reg::GPIO { reg::OLAT } else { r };
        self.regs[target as usize] = value;
    }
}

impl I2cBus for SimMcp23008 {
    type Error = SimError;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Event::I2cWrite {
            address,
            data: data.to_vec(),
        });
        self.check(address)?;
        if let Some((&r, values)) = data.split_first() {
            self.pointer = r % self.regs.len() as u8;
            for &value in values {
                self.store(self.pointer, value);
                self.advance();
            }
        }
        Ok(())
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Event::I2cRead {
            address,
            len: buf.len(),
        });
        self.check(address)?;
        for b in buf.iter_mut() {
            *b = self.load(self.pointer);
            self.advance();
        }
        Ok(())
    }
}

/// GPIO port that records mode and level changes
pub struct RecordingGpio {
    levels: [Level; 32],
    log: Log,
}

impl RecordingGpio {
    pub fn new(log: Log) -> Self {
        Self {
            levels: [Level::Low; 32],
            log,
        }
    }
}

impl GpioPort for RecordingGpio {
    type Error = Infallible;

    fn set_mode(&mut self, pin: u8, mode: PinMode) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Event::PinMode(pin, mode));
        Ok(())
    }

    fn set_level(&mut self, pin: u8, level: Level) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Event::PinLevel(pin, level));
        if let Some(l) = self.levels.get_mut(pin as usize) {
            *l = level;
        }
        Ok(())
    }

    fn level(&mut self, pin: u8) -> Result<Level, Self::Error> {
        Ok(self.levels.get(pin as usize).copied().unwrap_or_default())
    }
}

/// Shift register that records pushes and latches
pub struct RecordingShifter {
    log: Log,
}

impl RecordingShifter {
    pub fn new(log: Log) -> Self {
        Self { log }
    }
}

impl ShiftRegister for RecordingShifter {
    type Error = Infallible;

    fn push(&mut self, byte: u8) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Event::Push(byte));
        Ok(())
    }

    fn latch(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Event::Latch);
        Ok(())
    }
}

/// Delay that records its duration in microseconds instead of waiting
pub struct RecordingDelay {
    log: Log,
}

impl RecordingDelay {
    pub fn new(log: Log) -> Self {
        Self { log }
    }
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.log.borrow_mut().push(Event::DelayUs(ns.div_ceil(1000)));
    }

    fn delay_us(&mut self, us: u32) {
        self.log.borrow_mut().push(Event::DelayUs(us));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.log.borrow_mut().push(Event::DelayUs(ms * 1000));
    }
}

/// In-memory line backend
///
/// Records every line operation and keeps line levels so tests can check
/// the state the display would see.
pub struct MockLines {
    pins: LinePins,
    levels: [bool; 16],
    log: Log,
}

impl MockLines {
    pub fn new(pins: LinePins, log: Log) -> Self {
        Self {
            pins,
            levels: [false; 16],
            log,
        }
    }
}

impl LineBackend for MockLines {
    type Error = Infallible;

    const MODE: InterconnectMode = InterconnectMode::DirectGpio;

    fn pins(&self) -> &LinePins {
        &self.pins
    }

    fn set_output(&mut self, line: u8) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Event::Output(line));
        Ok(())
    }

    fn set_line(&mut self, line: u8, high: bool) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Event::Line(line, high));
        if let Some(l) = self.levels.get_mut(line as usize) {
            *l = high;
        }
        Ok(())
    }

    fn line(&mut self, line: u8) -> Result<bool, Self::Error> {
        Ok(self.levels.get(line as usize).copied().unwrap_or(false))
    }

    fn commit(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Event::Commit);
        Ok(())
    }
}
