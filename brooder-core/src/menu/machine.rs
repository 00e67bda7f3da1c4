//! Configuration menu state machine

use super::field::{DateTimeField, FieldCursor, TargetTemperature};
use super::state::ConfigState;
use crate::config::DefaultsConfig;
use crate::input::Button;

/// Result of handling one button press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuOutcome {
    /// A value or the state changed; redraw the menu
    Redraw,
    /// The menu reached `Armed`; hand over to the incubation controller
    Armed,
    /// The press had no effect
    Ignored,
}

/// Values the incubation controller runs with once armed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IncubationSettings {
    pub start_time: DateTimeField,
    pub hatch_time: DateTimeField,
    pub target: TargetTemperature,
}

/// Menu state plus the values being edited
#[derive(Debug, Clone)]
pub struct ConfigMenu {
    state: ConfigState,
    cursor: FieldCursor,
    start_time: DateTimeField,
    hatch_time: DateTimeField,
    target: TargetTemperature,
}

impl Default for ConfigMenu {
    fn default() -> Self {
        Self::new(&DefaultsConfig::default())
    }
}

impl ConfigMenu {
    /// Create a menu at `EditingStartTime` seeded with configured defaults
    pub fn new(defaults: &DefaultsConfig) -> Self {
        Self {
            state: ConfigState::EditingStartTime,
            cursor: FieldCursor::default(),
            start_time: defaults.start,
            hatch_time: defaults.hatch,
            target: TargetTemperature::from_x10(i32::from(defaults.target_temp_x10)),
        }
    }

    /// Current menu state
    pub fn state(&self) -> ConfigState {
        self.state
    }

    /// Current cursor
    pub fn cursor(&self) -> FieldCursor {
        self.cursor
    }

    /// Configured start time
    pub fn start_time(&self) -> &DateTimeField {
        &self.start_time
    }

    /// Configured hatch time
    pub fn hatch_time(&self) -> &DateTimeField {
        &self.hatch_time
    }

    /// Configured target temperature
    pub fn target(&self) -> TargetTemperature {
        self.target
    }

    /// Snapshot of the values the controller needs
    pub fn settings(&self) -> IncubationSettings {
        IncubationSettings {
            start_time: self.start_time,
            hatch_time: self.hatch_time,
            target: self.target,
        }
    }

    /// Dispatch a button press
    pub fn handle(&mut self, button: Button) -> MenuOutcome {
        match button {
            Button::Next => self.on_next(),
            Button::Increment => self.on_increment(),
            Button::Decrement => self.on_decrement(),
            Button::CursorLeft => self.on_cursor_left(),
            Button::CursorRight => self.on_cursor_right(),
        }
    }

    /// Advance to the next state and reset the cursor
    ///
    /// Once armed the menu no longer changes state.
    pub fn on_next(&mut self) -> MenuOutcome {
        if self.state.is_armed() {
            return MenuOutcome::Ignored;
        }
        self.state = self.state.next();
        self.cursor.reset();

        if self.state.is_armed() {
            MenuOutcome::Armed
        } else {
            MenuOutcome::Redraw
        }
    }

    /// Increase the selected value
    pub fn on_increment(&mut self) -> MenuOutcome {
        self.adjust(1)
    }

    /// Decrease the selected value
    pub fn on_decrement(&mut self) -> MenuOutcome {
        self.adjust(-1)
    }

    /// Move the cursor left
    pub fn on_cursor_left(&mut self) -> MenuOutcome {
        if self.state.is_armed() {
            return MenuOutcome::Ignored;
        }
        self.cursor.left();
        MenuOutcome::Redraw
    }

    /// Move the cursor right
    pub fn on_cursor_right(&mut self) -> MenuOutcome {
        if self.state.is_armed() {
            return MenuOutcome::Ignored;
        }
        self.cursor.right();
        MenuOutcome::Redraw
    }

    fn adjust(&mut self, delta: i16) -> MenuOutcome {
        let component = self.cursor.component();
        match self.state {
            ConfigState::EditingStartTime => self.start_time.adjust(component, delta as i32),
            ConfigState::EditingHatchTime => self.hatch_time.adjust(component, delta as i32),
            ConfigState::EditingTemperature => self.target.step(i32::from(delta)),
            ConfigState::Armed => return MenuOutcome::Ignored,
        }
        MenuOutcome::Redraw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decrement_day_wraps() {
        let mut menu = ConfigMenu::default();
        assert_eq!(menu.start_time().day, 1);

        assert_eq!(menu.on_decrement(), MenuOutcome::Redraw);
        assert_eq!(menu.start_time().day, 31);
        assert_eq!(menu.state(), ConfigState::EditingStartTime);
    }

    #[test]
    fn test_next_resets_cursor() {
        let mut menu = ConfigMenu::default();
        menu.on_cursor_right();
        menu.on_cursor_right();
        assert_eq!(menu.cursor().index(), 2);

        menu.on_next();
        assert_eq!(menu.state(), ConfigState::EditingHatchTime);
        assert_eq!(menu.cursor().index(), 0);
    }

    #[test]
    fn test_edits_go_to_active_field_only() {
        let mut menu = ConfigMenu::default();
        menu.on_next(); // hatch time
        menu.on_cursor_left(); // hour
        menu.on_increment();

        assert_eq!(menu.hatch_time().hour, 1);
        assert_eq!(menu.start_time().hour, 0);
    }

    #[test]
    fn test_temperature_clamps_at_zero() {
        let mut menu = ConfigMenu::default();
        menu.on_next();
        menu.on_next();
        assert_eq!(menu.state(), ConfigState::EditingTemperature);

        for _ in 0..400 {
            menu.on_decrement();
        }
        assert_eq!(menu.target().x10(), 0);
    }

    #[test]
    fn test_cursor_moves_in_temperature_state() {
        let mut menu = ConfigMenu::default();
        menu.on_next();
        menu.on_next();

        assert_eq!(menu.on_cursor_right(), MenuOutcome::Redraw);
        assert_eq!(menu.cursor().index(), 1);
        // Temperature edit ignores the cursor
        menu.on_increment();
        assert_eq!(menu.target().x10(), 376);
    }

    #[test]
    fn test_third_next_arms() {
        let mut menu = ConfigMenu::default();
        assert_eq!(menu.on_next(), MenuOutcome::Redraw);
        assert_eq!(menu.on_next(), MenuOutcome::Redraw);
        assert_eq!(menu.on_next(), MenuOutcome::Armed);
        assert!(menu.state().is_armed());

        assert_eq!(menu.on_increment(), MenuOutcome::Ignored);
        assert_eq!(menu.on_cursor_left(), MenuOutcome::Ignored);
        assert_eq!(menu.on_next(), MenuOutcome::Ignored);
        assert!(menu.state().is_armed());
    }

    #[test]
    fn test_settings_snapshot() {
        let mut menu = ConfigMenu::default();
        menu.on_cursor_left();
        menu.on_increment(); // start hour 1
        menu.on_next();
        menu.on_increment(); // hatch day 2
        menu.on_next();
        menu.on_increment(); // 37.6

        let settings = menu.settings();
        assert_eq!(settings.start_time.hour, 1);
        assert_eq!(settings.hatch_time.day, 2);
        assert_eq!(settings.target.x10(), 376);
    }
}
