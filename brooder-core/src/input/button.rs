//! Logical buttons

/// Logical front-panel buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Advance the menu / acknowledge the hatch alarm
    Next,
    /// Increase the selected value
    Increment,
    /// Decrease the selected value
    Decrement,
    /// Move the field cursor left
    CursorLeft,
    /// Move the field cursor right
    CursorRight,
}

impl Button {
    /// Number of buttons
    pub const COUNT: usize = 5;

    /// Every button, in polling order
    pub const ALL: [Button; Self::COUNT] = [
        Button::Next,
        Button::Increment,
        Button::Decrement,
        Button::CursorLeft,
        Button::CursorRight,
    ];

    /// Stable index for per-button bookkeeping
    pub fn index(self) -> usize {
        match self {
            Button::Next => 0,
            Button::Increment => 1,
            Button::Decrement => 2,
            Button::CursorLeft => 3,
            Button::CursorRight => 4,
        }
    }
}

/// Pressed level of every button for one loop iteration
///
/// Indexed by [`Button::index`]; `true` means pressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonLevels(pub [bool; Button::COUNT]);

impl ButtonLevels {
    /// No button pressed
    pub const RELEASED: Self = Self([false; Button::COUNT]);

    /// Only `button` pressed
    pub fn only(button: Button) -> Self {
        let mut levels = Self::RELEASED;
        levels.set(button, true);
        levels
    }

    /// Set the level of one button
    pub fn set(&mut self, button: Button, pressed: bool) {
        self.0[button.index()] = pressed;
    }

    /// Level of one button
    pub fn is_pressed(&self, button: Button) -> bool {
        self.0[button.index()]
    }
}
