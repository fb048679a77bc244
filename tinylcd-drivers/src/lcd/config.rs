//! Display geometry configuration

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Character cell height
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CharSize {
    /// 5x8 dots (every multi-line module)
    #[default]
    Dots5x8,
    /// 5x10 dots, only available on single-line modules
    Dots5x10,
}

/// Display geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LcdConfig {
    /// Visible columns
    pub cols: u8,
    /// Visible rows (1-4)
    pub rows: u8,
    /// Font height
    pub char_size: CharSize,
}

impl Default for LcdConfig {
    fn default() -> Self {
        Self::new(16, 2, CharSize::Dots5x8)
    }
}

impl LcdConfig {
    /// Most rows an HD44780 can address
    pub const MAX_ROWS: u8 = 4;

    /// Create a config, clamping `rows` to 1-4
    pub const fn new(cols: u8, rows: u8, char_size: CharSize) -> Self {
        let rows = if rows == 0 {
            1
        } else if rows > Self::MAX_ROWS {
            Self::MAX_ROWS
        } else {
            rows
        };
        Self {
            cols,
            rows,
            char_size,
        }
    }

    /// Font the controller will actually use
    ///
    /// The 5x10 font only exists in one-line mode.
    pub fn effective_char_size(&self) -> CharSize {
        if self.rows == 1 {
            self.char_size
        } else {
            CharSize::Dots5x8
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_16x2() {
        let config = LcdConfig::default();
        assert_eq!(config.cols, 16);
        assert_eq!(config.rows, 2);
        assert_eq!(config.char_size, CharSize::Dots5x8);
    }

    #[test]
    fn test_rows_clamped() {
        assert_eq!(LcdConfig::new(20, 0, CharSize::Dots5x8).rows, 1);
        assert_eq!(LcdConfig::new(20, 9, CharSize::Dots5x8).rows, 4);
    }

    #[test]
    fn test_tall_font_needs_single_line() {
        let one = LcdConfig::new(8, 1, CharSize::Dots5x10);
        assert_eq!(one.effective_char_size(), CharSize::Dots5x10);

        let two = LcdConfig::new(16, 2, CharSize::Dots5x10);
        assert_eq!(two.effective_char_size(), CharSize::Dots5x8);
    }
}
