//! Hardware driver implementations
//!
//! This crate provides drivers built on the transports defined in
//! `tinylcd-hal`:
//!
//! - [`expander::Mcp23008`] - 8-bit I2C port expander
//! - [`lcd::Hd44780`] - HD44780 character LCD over direct GPIO, an
//!   MCP23008 I2C backpack, or a shift-register backpack
//!
//! Every operation returns the transport's error. On targets with no
//! way to report failures the results can simply be discarded.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod expander;
pub mod lcd;

#[cfg(test)]
mod testing;

pub use expander::Mcp23008;
pub use lcd::{CharSize, Hd44780, LcdConfig};
