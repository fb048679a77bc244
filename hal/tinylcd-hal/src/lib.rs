//! tinylcd Hardware Abstraction Layer
//!
//! This crate defines the transports the display and expander drivers
//! talk through. Each trait is small enough for a board crate or a test
//! mock to provide.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  tinylcd-drivers (Hd44780, Mcp23008)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  tinylcd-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  embedded-hal 1.0 implementations       │
//! │  (embassy-rp, avr-hal, rp2040-hal, ...) │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::GpioPort`] - Numbered digital I/O lines
//! - [`i2c::I2cBus`] - Two-wire bus operations
//! - [`shift::ShiftRegister`] - Serial-in, parallel-out shift registers
//!
//! Delays use [`embedded_hal::delay::DelayNs`] directly.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod gpio;
pub mod i2c;
pub mod shift;

// Re-export key traits at crate root for convenience
pub use gpio::{GpioPort, Level, OutputBank, PinMode};
pub use i2c::{HalI2c, I2cBus, I2cBusError};
pub use shift::{BitBangShifter, BitOrder, ShiftRegister};
