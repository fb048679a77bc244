//! tinylcd demo
//!
//! Drives a 16x2 HD44780 on an MCP23008 I2C backpack from an RP2040.
//! Wiring: SDA on GPIO4, SCL on GPIO5, backpack address jumpers open.
//!
//! Prints a greeting with a custom glyph, then an uptime counter on the
//! second row. The backlight blinks off briefly every ten seconds.

#![no_std]
#![no_main]

use core::fmt::Write as _;

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::i2c::{self, I2c};
use embassy_time::{Delay, Timer};
use heapless::String;
use {defmt_rtt as _, panic_probe as _};

use tinylcd_drivers::lcd::{ExpanderLines, Hd44780, LcdConfig};
use tinylcd_drivers::CharSize;
use tinylcd_hal::i2c::{HalI2c, I2cConfig};

/// Backpack address jumpers (A0-A2)
const BACKPACK_SUB_ADDRESS: u8 = 0;

const DISPLAY: LcdConfig = LcdConfig::new(16, 2, CharSize::Dots5x8);

/// CGRAM slot 0: a small bell
const BELL: [u8; 8] = [
    0b00100, 0b01110, 0b01110, 0b01110, 0b11111, 0b00000, 0b00100, 0b00000,
];

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("tinylcd demo starting...");

    let p = embassy_rp::init(Default::default());

    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = I2cConfig::STANDARD.frequency;
    let bus = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, i2c_config);

    let lines = ExpanderLines::new(HalI2c::new(bus), BACKPACK_SUB_ADDRESS);
    let mut lcd = Hd44780::new(lines, Delay);

    if let Err(e) = lcd.begin_with(DISPLAY) {
        error!("Display init failed: {}", e);
        loop {
            Timer::after_secs(1).await;
        }
    }
    info!("Display ready ({} rows)", lcd.config().rows);

    let greeting = lcd
        .create_char(0, &BELL)
        .and_then(|_| lcd.set_cursor(0, 0))
        .and_then(|_| lcd.write(0))
        .and_then(|_| lcd.print(" tinylcd"));
    if let Err(e) = greeting {
        warn!("Greeting failed: {}", e);
    }

    let mut seconds: u32 = 0;
    let mut line: String<16> = String::new();
    loop {
        line.clear();
        // Fits: "up " plus at most 10 digits plus "s"
        let _ = write!(line, "up {}s", seconds);

        let shown = lcd.set_cursor(0, 1).and_then(|_| lcd.print(&line));
        if let Err(e) = shown {
            warn!("Update failed: {}", e);
        }

        if seconds % 10 == 9 {
            let _ = lcd.set_backlight(false);
            Timer::after_millis(200).await;
            let _ = lcd.set_backlight(true);
            Timer::after_millis(800).await;
        } else {
            Timer::after_secs(1).await;
        }
        seconds = seconds.wrapping_add(1);
    }
}
