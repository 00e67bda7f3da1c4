//! Character display trait for the 16x2 LCD

use core::fmt::{self, Write};

use heapless::String;

/// Number of character columns
pub const DISPLAY_COLS: usize = 16;

/// Number of character rows
pub const DISPLAY_ROWS: usize = 2;

/// Errors that can occur with display communication
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus transaction failed
    Bus,
    /// Cursor position outside the grid
    InvalidPosition,
}

/// Trait for character displays
///
/// Mirrors the LiquidCrystal-style primitive set: the cursor is moved
/// explicitly and text is written from there.
pub trait Display {
    /// Clear the entire screen and home the cursor
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Move the cursor
    ///
    /// - `col`: Column number (0-15)
    /// - `row`: Row number (0-1)
    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), DisplayError>;

    /// Write ASCII text at the cursor
    fn print(&mut self, text: &str) -> Result<(), DisplayError>;
}

/// Helper trait for common drawing patterns
pub trait DisplayExt: Display {
    /// Move the cursor and print
    fn print_at(&mut self, col: u8, row: u8, text: &str) -> Result<(), DisplayError> {
        self.set_cursor(col, row)?;
        self.print(text)
    }

    /// Print formatted text at the cursor
    ///
    /// Output longer than a display row is truncated.
    fn print_fmt(&mut self, args: fmt::Arguments<'_>) -> Result<(), DisplayError> {
        let mut buf: String<DISPLAY_COLS> = String::new();
        let _ = buf.write_fmt(args);
        self.print(&buf)
    }
}

// Blanket implementation for all Display types
impl<T: Display + ?Sized> DisplayExt for T {}
