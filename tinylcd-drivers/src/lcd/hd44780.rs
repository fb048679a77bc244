//! HD44780 character LCD controller
//!
//! Turns the display API (clear, cursor, custom glyphs, text) into
//! register-select and data transfers on a [`LineBackend`].
//!
//! # Transfers
//!
//! Every byte is either an instruction (RS low) or data (RS high). In
//! 8-bit mode the byte goes out on D0-D7 with one enable pulse; in 4-bit
//! mode the high nibble goes out on D4-D7 first, then the low nibble,
//! with one pulse each.
//!
//! # Timing
//!
//! The controller ignores instructions for 40 ms after power-up and may
//! be in either interface mode when we start talking to it. `begin`
//! therefore waits, then sends the function-set sequence from the
//! datasheet's "initialization by instruction" flow before configuring
//! the display.

use core::fmt;

use embedded_hal::delay::DelayNs;

use crate::lcd::backend::{DataLines, InterconnectMode, LineBackend};
use crate::lcd::command::{
    cmd, cursor_shift, DisplayControl, EntryMode, FunctionSet, ShiftDirection, ShiftTarget,
    TransferWidth,
};
use crate::lcd::config::{CharSize, LcdConfig};

/// DDRAM address of the first cell of each row
pub const ROW_OFFSETS: [u8; 4] = [0x00, 0x40, 0x14, 0x54];

/// Power-up settle time before the first instruction (datasheet: >40 ms)
const POWER_UP_DELAY_MS: u32 = 50;
/// Wait after the first and second wake-up function set (>4.1 ms)
const WAKE_DELAY_US: u32 = 4500;
/// Wait after the third wake-up function set (>100 µs)
const WAKE_SHORT_DELAY_US: u32 = 150;
/// Execution time of clear and home (1.52 ms)
const SLOW_COMMAND_DELAY_US: u32 = 2000;
/// Execution time of every other instruction (37 µs)
const COMMAND_SETTLE_US: u32 = 100;

/// Register-select state for a transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum RegisterSelect {
    Instruction,
    Data,
}

/// HD44780 controller
pub struct Hd44780<B, D> {
    backend: B,
    delay: D,
    config: LcdConfig,
    function: FunctionSet,
    control: DisplayControl,
    entry: EntryMode,
    current_line: u8,
}

impl<B: LineBackend, D: DelayNs> Hd44780<B, D> {
    /// Create a controller; nothing is sent until [`begin`](Self::begin)
    pub fn new(backend: B, delay: D) -> Self {
        let width = backend.pins().width();
        Self {
            backend,
            delay,
            config: LcdConfig::default(),
            function: FunctionSet {
                width,
                two_line: false,
                font: CharSize::Dots5x8,
            },
            control: DisplayControl::default(),
            entry: EntryMode::default(),
            current_line: 0,
        }
    }

    /// Initialize the display
    ///
    /// Leaves it cleared, on, with no cursor, writing left to right.
    pub fn begin(&mut self, cols: u8, rows: u8, char_size: CharSize) -> Result<(), B::Error> {
        self.begin_with(LcdConfig::new(cols, rows, char_size))
    }

    /// Initialize the display from a config
    ///
    /// Rows outside 1-4 are clamped, as in [`LcdConfig::new`].
    pub fn begin_with(&mut self, config: LcdConfig) -> Result<(), B::Error> {
        let config = LcdConfig::new(config.cols, config.rows, config.char_size);

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "HD44780: begin {}x{} via {}",
            config.cols,
            config.rows,
            B::MODE
        );

        self.config = config;
        self.current_line = 0;
        self.function.two_line = config.rows > 1;
        self.function.font = config.effective_char_size();

        let pins = *self.backend.pins();
        self.backend.init()?;
        for line in pins.all() {
            self.backend.set_output(line)?;
        }
        if let Some(backlight) = pins.backlight {
            self.backend.set_line(backlight, true)?;
        }

        self.delay.delay_ms(POWER_UP_DELAY_MS);

        self.backend.set_line(pins.rs, false)?;
        self.backend.set_line(pins.enable, false)?;
        if let Some(rw) = pins.rw {
            self.backend.set_line(rw, false)?;
        }
        self.backend.commit()?;

        match pins.data {
            DataLines::Four(lines) => {
                // The chip may be mid-byte in 4-bit mode or idle in 8-bit
                // mode; three 0x3 nibbles bring both to 8-bit, then 0x2
                // switches to 4-bit.
                self.write_bits(&lines, 0x03)?;
                self.delay.delay_us(WAKE_DELAY_US);
                self.write_bits(&lines, 0x03)?;
                self.delay.delay_us(WAKE_DELAY_US);
                self.write_bits(&lines, 0x03)?;
                self.delay.delay_us(WAKE_SHORT_DELAY_US);
                self.write_bits(&lines, 0x02)?;
            }
            DataLines::Eight(_) => {
                let function = self.function.instruction();
                self.command(function)?;
                self.delay.delay_us(WAKE_DELAY_US);
                self.command(function)?;
                self.delay.delay_us(WAKE_SHORT_DELAY_US);
                self.command(function)?;
            }
        }

        self.command(self.function.instruction())?;
        self.write_control(DisplayControl::default())?;
        self.clear()?;
        self.write_entry(EntryMode::default())
    }

    /// Clear the display and return the cursor to zero
    pub fn clear(&mut self) -> Result<(), B::Error> {
        self.command(cmd::CLEAR_DISPLAY)?;
        self.delay.delay_us(SLOW_COMMAND_DELAY_US);
        Ok(())
    }

    /// Return the cursor to zero and undo any display shift
    pub fn home(&mut self) -> Result<(), B::Error> {
        self.command(cmd::RETURN_HOME)?;
        self.delay.delay_us(SLOW_COMMAND_DELAY_US);
        Ok(())
    }

    /// Turn the display on (contents are kept while off)
    pub fn display(&mut self) -> Result<(), B::Error> {
        self.update_control(|c| c.display = true)
    }

    /// Turn the display off
    pub fn no_display(&mut self) -> Result<(), B::Error> {
        self.update_control(|c| c.display = false)
    }

    /// Show the underline cursor
    pub fn cursor(&mut self) -> Result<(), B::Error> {
        self.update_control(|c| c.cursor = true)
    }

    /// Hide the underline cursor
    pub fn no_cursor(&mut self) -> Result<(), B::Error> {
        self.update_control(|c| c.cursor = false)
    }

    /// Blink the cursor cell
    pub fn blink(&mut self) -> Result<(), B::Error> {
        self.update_control(|c| c.blink = true)
    }

    /// Stop blinking the cursor cell
    pub fn no_blink(&mut self) -> Result<(), B::Error> {
        self.update_control(|c| c.blink = false)
    }

    /// Shift the whole display one cell left without changing DDRAM
    pub fn scroll_display_left(&mut self) -> Result<(), B::Error> {
        self.command(cursor_shift(ShiftTarget::Display, ShiftDirection::Left))
    }

    /// Shift the whole display one cell right without changing DDRAM
    pub fn scroll_display_right(&mut self) -> Result<(), B::Error> {
        self.command(cursor_shift(ShiftTarget::Display, ShiftDirection::Right))
    }

    /// Move the cursor one cell left
    pub fn move_cursor_left(&mut self) -> Result<(), B::Error> {
        self.command(cursor_shift(ShiftTarget::Cursor, ShiftDirection::Left))
    }

    /// Move the cursor one cell right
    pub fn move_cursor_right(&mut self) -> Result<(), B::Error> {
        self.command(cursor_shift(ShiftTarget::Cursor, ShiftDirection::Right))
    }

    /// Text flows left to right
    pub fn left_to_right(&mut self) -> Result<(), B::Error> {
        self.update_entry(|e| e.left_to_right = true)
    }

    /// Text flows right to left
    pub fn right_to_left(&mut self) -> Result<(), B::Error> {
        self.update_entry(|e| e.left_to_right = false)
    }

    /// Shift the display on each write so text is justified at the cursor
    pub fn autoscroll(&mut self) -> Result<(), B::Error> {
        self.update_entry(|e| e.autoscroll = true)
    }

    /// Move the cursor on each write
    pub fn no_autoscroll(&mut self) -> Result<(), B::Error> {
        self.update_entry(|e| e.autoscroll = false)
    }

    /// Position the cursor
    ///
    /// Rows past the configured line count land on the last row.
    pub fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), B::Error> {
        let row = row.min(self.config.rows.saturating_sub(1));
        let offset = ROW_OFFSETS[(row as usize).min(ROW_OFFSETS.len() - 1)];
        self.command(cmd::SET_DDRAM_ADDR | (offset.wrapping_add(col) & 0x7F))?;
        self.current_line = row;
        Ok(())
    }

    /// Store a custom glyph in one of the eight CGRAM slots
    ///
    /// `rows` holds the eight 5-bit pixel rows, top first. Locations above
    /// 7 use slot 7. The glyph is shown by writing the slot number as a
    /// character; call [`set_cursor`](Self::set_cursor) afterwards to get
    /// back to DDRAM.
    pub fn create_char(&mut self, location: u8, rows: &[u8; 8]) -> Result<(), B::Error> {
        let location = location.min(7);
        self.command(cmd::SET_CGRAM_ADDR | (location << 3))?;
        for &row in rows {
            self.write(row)?;
        }
        Ok(())
    }

    /// Switch the backlight, on wirings that have one
    pub fn set_backlight(&mut self, on: bool) -> Result<(), B::Error> {
        if let Some(backlight) = self.backend.pins().backlight {
            self.backend.set_line(backlight, on)?;
            self.backend.commit()?;
        }
        Ok(())
    }

    /// Current backlight state, `None` when no backlight line is wired
    pub fn backlight(&mut self) -> Result<Option<bool>, B::Error> {
        match self.backend.pins().backlight {
            Some(backlight) => Ok(Some(self.backend.line(backlight)?)),
            None => Ok(None),
        }
    }

    /// Send a raw instruction byte
    pub fn command(&mut self, value: u8) -> Result<(), B::Error> {
        self.send(value, RegisterSelect::Instruction)
    }

    /// Write one character code at the cursor
    pub fn write(&mut self, value: u8) -> Result<(), B::Error> {
        self.send(value, RegisterSelect::Data)
    }

    /// Write every byte of `text` at the cursor
    ///
    /// Bytes are sent as character codes; the ROM maps ASCII 0x20-0x7D
    /// as expected.
    pub fn print(&mut self, text: &str) -> Result<(), B::Error> {
        for byte in text.bytes() {
            self.write(byte)?;
        }
        Ok(())
    }

    /// Geometry passed to the last `begin`
    pub fn config(&self) -> &LcdConfig {
        &self.config
    }

    /// Interface width in use
    pub fn transfer_width(&self) -> TransferWidth {
        self.function.width
    }

    /// Wiring in use
    pub fn mode(&self) -> InterconnectMode {
        B::MODE
    }

    /// Row of the last `set_cursor`
    pub fn current_line(&self) -> u8 {
        self.current_line
    }

    /// Last written function set
    pub fn function_set(&self) -> FunctionSet {
        self.function
    }

    /// Last written display control
    pub fn display_control(&self) -> DisplayControl {
        self.control
    }

    /// Last written entry mode
    pub fn entry_mode(&self) -> EntryMode {
        self.entry
    }

    /// Borrow the line backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Give the backend and delay back
    pub fn release(self) -> (B, D) {
        (self.backend, self.delay)
    }

    fn update_control(&mut self, f: impl FnOnce(&mut DisplayControl)) -> Result<(), B::Error> {
        let mut control = self.control;
        f(&mut control);
        self.write_control(control)
    }

    fn write_control(&mut self, control: DisplayControl) -> Result<(), B::Error> {
        self.command(control.instruction())?;
        self.control = control;
        Ok(())
    }

    fn update_entry(&mut self, f: impl FnOnce(&mut EntryMode)) -> Result<(), B::Error> {
        let mut entry = self.entry;
        f(&mut entry);
        self.write_entry(entry)
    }

    fn write_entry(&mut self, entry: EntryMode) -> Result<(), B::Error> {
        self.command(entry.instruction())?;
        self.entry = entry;
        Ok(())
    }

    fn send(&mut self, value: u8, mode: RegisterSelect) -> Result<(), B::Error> {
        let pins = *self.backend.pins();
        self.backend
            .set_line(pins.rs, mode == RegisterSelect::Data)?;
        if let Some(rw) = pins.rw {
            self.backend.set_line(rw, false)?;
        }

        match pins.data {
            DataLines::Eight(lines) => self.write_bits(&lines, value),
            DataLines::Four(lines) => {
                self.write_bits(&lines, value >> 4)?;
                self.write_bits(&lines, value & 0x0F)
            }
        }
    }

    fn write_bits(&mut self, lines: &[u8], value: u8) -> Result<(), B::Error> {
        self.backend.set_lines(lines, value)?;
        self.pulse_enable()
    }

    fn pulse_enable(&mut self) -> Result<(), B::Error> {
        let enable = self.backend.pins().enable;
        self.backend.set_line(enable, false)?;
        self.backend.commit()?;
        self.delay.delay_us(1);
        self.backend.set_line(enable, true)?;
        self.backend.commit()?;
        self.delay.delay_us(1); // enable pulse must be >450ns
        self.backend.set_line(enable, false)?;
        self.backend.commit()?;
        self.delay.delay_us(COMMAND_SETTLE_US);
        Ok(())
    }
}

impl<B: LineBackend, D: DelayNs> fmt::Write for Hd44780<B, D> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.print(s).map_err(|_| fmt::Error)
    }
}
