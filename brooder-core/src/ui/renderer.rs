//! Screen rendering
//!
//! Builds the menu and status screens and pushes them to the display.
//!
//! The menu is redrawn from a cleared display on every change. The
//! status screen is rebuilt every tick but only written when its text
//! changes, and then in place without clearing.

use core::fmt::Write;

use heapless::String;

use super::fmt_x10;
use super::screen::{Line, Screen};
use crate::incubation::StatusView;
use crate::menu::{ConfigMenu, ConfigState};
use crate::traits::{Display, DisplayError};

/// Column where the remaining-hours field starts
pub const REMAINING_COLUMN: usize = 9;

/// What the physical display currently shows
#[derive(Debug, Clone, PartialEq, Eq)]
enum Shown {
    Menu,
    Status(Screen),
}

/// Screen renderer for menu and running states
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    screen: Screen,
    shown: Option<Shown>,
}

impl Renderer {
    /// Create a new renderer
    pub const fn new() -> Self {
        Self {
            screen: Screen::new(),
            shown: None,
        }
    }

    /// Get the current screen buffer
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Forget what the display shows so the next screen is fully redrawn
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Render the configuration menu
    ///
    /// ```text
    /// Start Time:
    /// 01/01/2024 : 00
    /// ```
    pub fn render_menu(&mut self, menu: &ConfigMenu) {
        self.screen.clear();
        let state = menu.state();
        self.screen.set_line(0, state.label());
        match state {
            ConfigState::EditingStartTime => {
                self.screen.write_line(1, format_args!("{}", menu.start_time()))
            }
            ConfigState::EditingHatchTime => {
                self.screen.write_line(1, format_args!("{}", menu.hatch_time()))
            }
            ConfigState::EditingTemperature => {
                self.screen.write_line(1, format_args!("{} C", menu.target()))
            }
            ConfigState::Armed => {}
        }
    }

    /// Render the running status screen
    ///
    /// ```text
    /// Temp: 37.5 C
    /// E: 12h   R: 492h
    /// ```
    pub fn render_status(&mut self, status: &StatusView) {
        self.screen.clear();

        let mut temp = Line::new();
        let _ = temp.push_str("Temp: ");
        match status.temperature_x10 {
            Some(t) => {
                let _ = fmt_x10(&mut temp, i32::from(t));
            }
            None => {
                let _ = temp.push_str("--.-");
            }
        }
        let _ = temp.push_str(" C");
        self.screen.set_line(0, &temp);

        let mut elapsed: String<16> = String::new();
        match status.elapsed_hours {
            Some(h) => {
                let _ = write!(elapsed, "E: {}h", h);
            }
            None => {
                let _ = elapsed.push_str("E: --h");
            }
        }
        // The remaining field always starts at its own column
        let elapsed = truncate(&elapsed, REMAINING_COLUMN);
        match status.remaining_hours {
            Some(h) => self.screen.write_line(
                1,
                format_args!("{:<w$}R: {}h", elapsed, h, w = REMAINING_COLUMN),
            ),
            None => self.screen.write_line(
                1,
                format_args!("{:<w$}R: --h", elapsed, w = REMAINING_COLUMN),
            ),
        }
    }

    /// Render the menu and draw it on a cleared display
    pub fn show_menu<D: Display + ?Sized>(
        &mut self,
        menu: &ConfigMenu,
        display: &mut D,
    ) -> Result<(), DisplayError> {
        self.render_menu(menu);
        self.shown = None;
        self.screen.draw(display)?;
        self.shown = Some(Shown::Menu);
        Ok(())
    }

    /// Render the status screen and write it if it changed
    ///
    /// Returns `Ok(false)` when the display already showed this screen.
    pub fn show_status<D: Display + ?Sized>(
        &mut self,
        status: &StatusView,
        display: &mut D,
    ) -> Result<bool, DisplayError> {
        self.render_status(status);
        match &self.shown {
            Some(Shown::Status(current)) if *current == self.screen => return Ok(false),
            Some(Shown::Status(_)) => {}
            // Leaving the menu or recovering from an error
            _ => display.clear()?,
        }
        self.shown = None;
        self.screen.overwrite(display)?;
        self.shown = Some(Shown::Status(self.screen.clone()));
        Ok(true)
    }
}

fn truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DefaultsConfig;
    use crate::incubation::AlarmState;
    use crate::input::Button;
    use crate::menu::DateTimeField;

    /// Display mock that records the calls it receives
    #[derive(Default)]
    struct MockDisplay {
        clears: u32,
        prints: u32,
        rows: [String<32>; 2],
        cursor: (u8, u8),
        fail: bool,
    }

    impl Display for MockDisplay {
        fn clear(&mut self) -> Result<(), DisplayError> {
            if self.fail {
                return Err(DisplayError::Bus);
            }
            self.clears += 1;
            self.rows = Default::default();
            self.cursor = (0, 0);
            Ok(())
        }

        fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), DisplayError> {
            if self.fail {
                return Err(DisplayError::Bus);
            }
            self.cursor = (col, row);
            Ok(())
        }

        fn print(&mut self, text: &str) -> Result<(), DisplayError> {
            if self.fail {
                return Err(DisplayError::Bus);
            }
            self.prints += 1;
            let row = &mut self.rows[self.cursor.1 as usize];
            row.clear();
            let _ = row.push_str(text);
            Ok(())
        }
    }

    fn status(temp: Option<i16>, elapsed: Option<i32>, remaining: Option<i32>) -> StatusView {
        StatusView {
            temperature_x10: temp,
            elapsed_hours: elapsed,
            remaining_hours: remaining,
            alarm: AlarmState::Idle,
        }
    }

    #[test]
    fn test_menu_screens() {
        let mut renderer = Renderer::new();
        let mut menu = ConfigMenu::default();

        renderer.render_menu(&menu);
        assert_eq!(renderer.screen().line(0), "Start Time:");
        assert_eq!(renderer.screen().line(1), "01/01/2024 : 00");

        menu.handle(Button::Next);
        renderer.render_menu(&menu);
        assert_eq!(renderer.screen().line(0), "Hatch Time:");

        menu.handle(Button::Next);
        renderer.render_menu(&menu);
        assert_eq!(renderer.screen().line(0), "Temperature:");
        assert_eq!(renderer.screen().line(1), "37.5 C");
    }

    #[test]
    fn test_status_screen() {
        let mut renderer = Renderer::new();
        renderer.render_status(&status(Some(375), Some(12), Some(492)));
        assert_eq!(renderer.screen().line(0), "Temp: 37.5 C");
        assert_eq!(renderer.screen().line(1), "E: 12h   R: 492h");

        renderer.render_status(&status(None, Some(-3), Some(-1)));
        assert_eq!(renderer.screen().line(0), "Temp: --.- C");
        assert_eq!(renderer.screen().line(1), "E: -3h   R: -1h");
    }

    #[test]
    fn test_status_without_clock() {
        let mut renderer = Renderer::new();
        renderer.render_status(&status(Some(360), None, None));
        assert_eq!(renderer.screen().line(1), "E: --h   R: --h");
    }

    #[test]
    fn test_remaining_column_is_fixed() {
        let mut renderer = Renderer::new();
        renderer.render_status(&status(Some(375), Some(1234567), Some(5)));
        assert_eq!(renderer.screen().line(1), "E: 123456R: 5h");
        assert_eq!(renderer.screen().line(1).find('R'), Some(REMAINING_COLUMN));
    }

    #[test]
    fn test_menu_hour_survives_wide_year() {
        let defaults = DefaultsConfig {
            start: DateTimeField::new(1, 1, 1_234_567, 7),
            ..DefaultsConfig::default()
        };
        let mut renderer = Renderer::new();
        renderer.render_menu(&ConfigMenu::new(&defaults));
        assert_eq!(renderer.screen().line(1), "01/01/34567 : 07");
    }

    #[test]
    fn test_show_menu_clears_first() {
        let mut renderer = Renderer::new();
        let mut display = MockDisplay::default();
        renderer.show_menu(&ConfigMenu::default(), &mut display).unwrap();
        assert_eq!(display.clears, 1);
        assert_eq!(display.rows[0].as_str(), "Start Time:");
        assert_eq!(display.rows[1].as_str(), "01/01/2024 : 00");
    }

    #[test]
    fn test_show_status_skips_unchanged() {
        let mut renderer = Renderer::new();
        let mut display = MockDisplay::default();
        let view = status(Some(375), Some(1), Some(2));

        assert!(renderer.show_status(&view, &mut display).unwrap());
        assert_eq!(display.clears, 1);
        assert_eq!(display.rows[0].as_str(), "Temp: 37.5 C    ");
        let prints = display.prints;

        assert!(!renderer.show_status(&view, &mut display).unwrap());
        assert_eq!(display.prints, prints);

        // A change is written in place, without clearing
        assert!(renderer
            .show_status(&status(Some(376), Some(1), Some(2)), &mut display)
            .unwrap());
        assert_eq!(display.clears, 1);
        assert_eq!(display.rows[0].as_str(), "Temp: 37.6 C    ");
    }

    #[test]
    fn test_show_status_retries_after_error() {
        let mut renderer = Renderer::new();
        let mut display = MockDisplay {
            fail: true,
            ..Default::default()
        };
        let view = status(Some(375), Some(1), Some(2));
        assert_eq!(
            renderer.show_status(&view, &mut display),
            Err(DisplayError::Bus)
        );

        display.fail = false;
        assert!(renderer.show_status(&view, &mut display).unwrap());
        assert_eq!(display.clears, 1);
    }
}
