//! HD44780 character LCD
//!
//! The controller logic lives in [`Hd44780`]; how its lines reach the
//! display is up to a [`LineBackend`]. Pick the backend that matches the
//! wiring:
//!
//! ```text
//! Hd44780 ──▶ GpioLines<GpioPort>        (pins on the MCU)
//!         ──▶ ExpanderLines<I2cBus>      (MCP23008 backpack)
//!         ──▶ ShiftLines<ShiftRegister>  (shift-register backpack)
//! ```

pub mod backend;
pub mod command;
pub mod config;
pub mod hd44780;

pub use backend::{
    DataLines, ExpanderLines, GpioLines, InterconnectMode, LineBackend, LinePins, ShiftLines,
};
pub use command::{DisplayControl, EntryMode, FunctionSet, TransferWidth};
pub use config::{CharSize, LcdConfig};
pub use hd44780::{Hd44780, ROW_OFFSETS};
