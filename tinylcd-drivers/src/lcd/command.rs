//! HD44780 instruction set
//!
//! Instructions are one byte: the highest set bit selects the
//! instruction, the bits below it are its flags.
//!
//! ```text
//! ┌──────────────────┬─────────────────────────────────┐
//! │ 0000 0001        │ clear display                   │
//! │ 0000 001x        │ return home                     │
//! │ 0000 01 I/D S    │ entry mode set                  │
//! │ 0000 1 D C B     │ display on/off control          │
//! │ 0001 S/C R/L xx  │ cursor or display shift         │
//! │ 001 DL N F xx    │ function set                    │
//! │ 01 AAAAAA        │ set CGRAM address               │
//! │ 1 AAAAAAA        │ set DDRAM address               │
//! └──────────────────┴─────────────────────────────────┘
//! ```
//!
//! The chip's control registers cannot be read back, so the driver keeps
//! the last written value of each one as a [`FunctionSet`],
//! [`DisplayControl`] or [`EntryMode`].

use crate::lcd::config::CharSize;

/// Instruction opcodes
pub mod cmd {
    /// Clear display, cursor to zero
    pub const CLEAR_DISPLAY: u8 = 0x01;
    /// Cursor to zero, undo display shift
    pub const RETURN_HOME: u8 = 0x02;
    /// Cursor direction and display shift on write
    pub const ENTRY_MODE_SET: u8 = 0x04;
    /// Display, cursor and blink on/off
    pub const DISPLAY_CONTROL: u8 = 0x08;
    /// Move cursor or shift display
    pub const CURSOR_SHIFT: u8 = 0x10;
    /// Interface width, line count and font
    pub const FUNCTION_SET: u8 = 0x20;
    /// Select character generator RAM address
    pub const SET_CGRAM_ADDR: u8 = 0x40;
    /// Select display data RAM address
    pub const SET_DDRAM_ADDR: u8 = 0x80;
}

/// Instruction flags
pub mod flag {
    // Entry mode
    /// Cursor moves right after each write
    pub const ENTRY_LEFT: u8 = 0x02;
    /// Display shifts after each write
    pub const ENTRY_SHIFT_INCREMENT: u8 = 0x01;

    // Display control
    /// Display on
    pub const DISPLAY_ON: u8 = 0x04;
    /// Underline cursor on
    pub const CURSOR_ON: u8 = 0x02;
    /// Blinking block cursor on
    pub const BLINK_ON: u8 = 0x01;

    // Cursor/display shift
    /// Shift the display instead of the cursor
    pub const DISPLAY_MOVE: u8 = 0x08;
    /// Shift right instead of left
    pub const MOVE_RIGHT: u8 = 0x04;

    // Function set
    /// 8-bit interface
    pub const EIGHT_BIT_MODE: u8 = 0x10;
    /// Two display lines
    pub const TWO_LINE: u8 = 0x08;
    /// 5x10 dot font
    pub const DOTS_5X10: u8 = 0x04;
}

/// Number of data lines used per transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransferWidth {
    /// D4-D7, two enable pulses per byte
    Four,
    /// D0-D7, one enable pulse per byte
    Eight,
}

/// Function set register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FunctionSet {
    pub width: TransferWidth,
    pub two_line: bool,
    pub font: CharSize,
}

impl FunctionSet {
    /// Flag bits
    pub fn bits(&self) -> u8 {
        let mut bits = 0;
        if self.width == TransferWidth::Eight {
            bits |= flag::EIGHT_BIT_MODE;
        }
        if self.two_line {
            bits |= flag::TWO_LINE;
        }
        if self.font == CharSize::Dots5x10 {
            bits |= flag::DOTS_5X10;
        }
        bits
    }

    /// Complete instruction byte
    pub fn instruction(&self) -> u8 {
        cmd::FUNCTION_SET | self.bits()
    }
}

/// Display on/off control register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayControl {
    pub display: bool,
    pub cursor: bool,
    pub blink: bool,
}

impl Default for DisplayControl {
    /// Display on, cursor off, blink off
    fn default() -> Self {
        Self {
            display: true,
            cursor: false,
            blink: false,
        }
    }
}

impl DisplayControl {
    /// Flag bits
    pub fn bits(&self) -> u8 {
        let mut bits = 0;
        if self.display {
            bits |= flag::DISPLAY_ON;
        }
        if self.cursor {
            bits |= flag::CURSOR_ON;
        }
        if self.blink {
            bits |= flag::BLINK_ON;
        }
        bits
    }

    /// Complete instruction byte
    pub fn instruction(&self) -> u8 {
        cmd::DISPLAY_CONTROL | self.bits()
    }
}

/// Entry mode register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EntryMode {
    /// Cursor advances to the right
    pub left_to_right: bool,
    /// Display shifts with each write, keeping the cursor in place
    pub autoscroll: bool,
}

impl Default for EntryMode {
    /// Left to right, no autoscroll
    fn default() -> Self {
        Self {
            left_to_right: true,
            autoscroll: false,
        }
    }
}

impl EntryMode {
    /// Flag bits
    pub fn bits(&self) -> u8 {
        let mut bits = 0;
        if self.left_to_right {
            bits |= flag::ENTRY_LEFT;
        }
        if self.autoscroll {
            bits |= flag::ENTRY_SHIFT_INCREMENT;
        }
        bits
    }

    /// Complete instruction byte
    pub fn instruction(&self) -> u8 {
        cmd::ENTRY_MODE_SET | self.bits()
    }
}

/// What a cursor-shift instruction moves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ShiftTarget {
    Cursor,
    Display,
}

/// Direction of a cursor-shift instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ShiftDirection {
    Left,
    Right,
}

/// Cursor-shift instruction byte
pub fn cursor_shift(target: ShiftTarget, direction: ShiftDirection) -> u8 {
    let mut value = cmd::CURSOR_SHIFT;
    if target == ShiftTarget::Display {
        value |= flag::DISPLAY_MOVE;
    }
    if direction == ShiftDirection::Right {
        value |= flag::MOVE_RIGHT;
    }
    value
}
