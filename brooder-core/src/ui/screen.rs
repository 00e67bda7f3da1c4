//! Screen buffer

use core::fmt::{self, Write};

use heapless::String;

use crate::traits::{Display, DisplayError, DisplayExt, DISPLAY_COLS, DISPLAY_ROWS};

/// One display row of text
pub type Line = String<DISPLAY_COLS>;

/// Text content of the 16x2 display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    lines: [Line; DISPLAY_ROWS],
}

impl Screen {
    /// Create an empty screen
    pub const fn new() -> Self {
        Self {
            lines: [String::new(), String::new()],
        }
    }

    /// Clear every line
    pub fn clear(&mut self) {
        for line in &mut self.lines {
            line.clear();
        }
    }

    /// Replace a line; text past the last column is dropped
    pub fn set_line(&mut self, row: u8, text: &str) {
        if let Some(line) = self.lines.get_mut(row as usize) {
            line.clear();
            for c in text.chars().take(DISPLAY_COLS) {
                if line.push(c).is_err() {
                    break;
                }
            }
        }
    }

    /// Replace a line with formatted text, truncated at the last column
    pub fn write_line(&mut self, row: u8, args: fmt::Arguments<'_>) {
        if let Some(line) = self.lines.get_mut(row as usize) {
            line.clear();
            let mut writer = Truncating(line);
            let _ = writer.write_fmt(args);
        }
    }

    /// Get a line of text
    pub fn line(&self, row: u8) -> &str {
        self.lines.get(row as usize).map(|l| l.as_str()).unwrap_or("")
    }

    /// Clear the display and print every non-empty line
    pub fn draw<D: Display + ?Sized>(&self, display: &mut D) -> Result<(), DisplayError> {
        display.clear()?;
        for (row, line) in self.lines.iter().enumerate() {
            if !line.is_empty() {
                display.print_at(0, row as u8, line)?;
            }
        }
        Ok(())
    }

    /// Overwrite every row in place, padding with spaces to the full width
    ///
    /// Leaves no flicker and no stale characters from a longer previous line.
    pub fn overwrite<D: Display + ?Sized>(&self, display: &mut D) -> Result<(), DisplayError> {
        for (row, line) in self.lines.iter().enumerate() {
            display.set_cursor(0, row as u8)?;
            display.print_fmt(format_args!("{:<width$}", line.as_str(), width = DISPLAY_COLS))?;
        }
        Ok(())
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

/// Writer that silently drops what does not fit
struct Truncating<'a>(&'a mut Line);

impl Write for Truncating<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            if self.0.push(c).is_err() {
                break;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_line_truncates() {
        let mut screen = Screen::new();
        screen.set_line(0, "0123456789abcdefXYZ");
        assert_eq!(screen.line(0), "0123456789abcdef");
        screen.set_line(5, "ignored");
        assert_eq!(screen.line(5), "");
    }

    #[test]
    fn test_write_line_truncates() {
        let mut screen = Screen::new();
        screen.write_line(1, format_args!("E: {}h R: {}h", 123456, -654321));
        assert_eq!(screen.line(1), "E: 123456h R: -6");
    }

    #[derive(Default)]
    struct Grid {
        cells: [[u8; DISPLAY_COLS]; DISPLAY_ROWS],
        cursor: (usize, usize),
        clears: u32,
    }

    impl Display for Grid {
        fn clear(&mut self) -> Result<(), DisplayError> {
            self.cells = [[b' '; DISPLAY_COLS]; DISPLAY_ROWS];
            self.cursor = (0, 0);
            self.clears += 1;
            Ok(())
        }

        fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), DisplayError> {
            self.cursor = (col as usize, row as usize);
            Ok(())
        }

        fn print(&mut self, text: &str) -> Result<(), DisplayError> {
            let (mut col, row) = self.cursor;
            for b in text.bytes() {
                if col < DISPLAY_COLS {
                    self.cells[row][col] = b;
                }
                col += 1;
            }
            self.cursor = (col, row);
            Ok(())
        }
    }

    impl Grid {
        fn row(&self, row: usize) -> &str {
            core::str::from_utf8(&self.cells[row]).unwrap_or("")
        }
    }

    #[test]
    fn test_draw_and_overwrite_through_trait_object() {
        let mut screen = Screen::new();
        screen.set_line(0, "Temp: 37.5 C");
        screen.set_line(1, "E: 2h    R: 3h");

        let mut grid = Grid::default();
        {
            let display: &mut dyn Display = &mut grid;
            screen.draw(display).unwrap();
        }
        assert_eq!(grid.clears, 1);
        assert_eq!(grid.row(0), "Temp: 37.5 C    ");

        screen.set_line(0, "Temp: 8.0 C");
        {
            let display: &mut dyn Display = &mut grid;
            screen.overwrite(display).unwrap();
        }
        assert_eq!(grid.clears, 1);
        assert_eq!(grid.row(0), "Temp: 8.0 C     ");
        assert_eq!(grid.row(1), "E: 2h    R: 3h  ");
    }
}
