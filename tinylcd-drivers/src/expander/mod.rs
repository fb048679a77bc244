//! I2C port expander drivers

pub mod mcp23008;

pub use mcp23008::{Mcp23008, MCP23008_ADDRESS};
