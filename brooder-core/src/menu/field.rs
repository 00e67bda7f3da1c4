//! Editable configuration values

use core::fmt;

use crate::traits::WallTime;

/// Valid day range (inclusive)
pub const DAY_RANGE: (i32, i32) = (1, 31);

/// Valid month range (inclusive)
pub const MONTH_RANGE: (i32, i32) = (1, 12);

/// Valid hour range (inclusive)
///
/// 24 is accepted as an hour value; the front panel has always allowed it.
pub const HOUR_RANGE: (i32, i32) = (0, 24);

/// Default target temperature (°C × 10)
pub const DEFAULT_TARGET_X10: i16 = 375;

/// Target temperature step per button press (°C × 10)
pub const TARGET_STEP_X10: i32 = 1;

/// Component of a [`DateTimeField`] selected by the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FieldComponent {
    Day,
    Month,
    Year,
    Hour,
}

impl FieldComponent {
    /// Component for a cursor index (0-3)
    pub fn from_index(index: u8) -> Self {
        match index & 0x03 {
            0 => FieldComponent::Day,
            1 => FieldComponent::Month,
            2 => FieldComponent::Year,
            _ => FieldComponent::Hour,
        }
    }

    /// Inclusive wrap range, `None` for the unchecked year
    pub fn range(&self) -> Option<(i32, i32)> {
        match self {
            FieldComponent::Day => Some(DAY_RANGE),
            FieldComponent::Month => Some(MONTH_RANGE),
            FieldComponent::Year => None,
            FieldComponent::Hour => Some(HOUR_RANGE),
        }
    }
}

/// Calendar day plus hour-of-day, edited one component at a time
///
/// Components wrap independently; the day never carries into the month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DateTimeField {
    pub day: u8,
    pub month: u8,
    pub year: i32,
    pub hour: u8,
}

impl Default for DateTimeField {
    fn default() -> Self {
        Self::new(1, 1, 2024, 0)
    }
}

impl DateTimeField {
    /// Create a field from its components
    pub const fn new(day: u8, month: u8, year: i32, hour: u8) -> Self {
        Self {
            day,
            month,
            year,
            hour,
        }
    }

    /// Get a component value
    pub fn get(&self, component: FieldComponent) -> i32 {
        match component {
            FieldComponent::Day => self.day as i32,
            FieldComponent::Month => self.month as i32,
            FieldComponent::Year => self.year,
            FieldComponent::Hour => self.hour as i32,
        }
    }

    /// Adjust one component by `delta` and wrap it into its range
    ///
    /// The year is adjusted without any range check.
    pub fn adjust(&mut self, component: FieldComponent, delta: i32) {
        let raw = self.get(component).saturating_add(delta);
        let value = match component.range() {
            Some((min, max)) => wrap(raw, min, max),
            None => raw,
        };

        match component {
            FieldComponent::Day => self.day = value as u8,
            FieldComponent::Month => self.month = value as u8,
            FieldComponent::Year => self.year = value,
            FieldComponent::Hour => self.hour = value as u8,
        }
    }

    /// Configured hour expressed as minutes since midnight
    pub fn hour_minutes(&self) -> i32 {
        self.hour as i32 * 60
    }

    /// Wall-clock time at the top of the configured hour
    ///
    /// `None` for hour 24 and for years a clock cannot hold.
    pub fn to_wall_time(&self) -> Option<WallTime> {
        if !self.is_valid() || self.hour >= 24 {
            return None;
        }
        Some(WallTime {
            year: u16::try_from(self.year).ok()?,
            month: self.month,
            day: self.day,
            hour: self.hour,
            minute: 0,
            second: 0,
        })
    }

    /// Check every ranged component
    pub fn is_valid(&self) -> bool {
        in_range(self.day as i32, DAY_RANGE)
            && in_range(self.month as i32, MONTH_RANGE)
            && in_range(self.hour as i32, HOUR_RANGE)
    }

    /// Parse the display format `DD/MM/YYYY : HH`
    ///
    /// Whitespace around the separators is optional.
    pub fn parse(s: &str) -> Option<Self> {
        let (date, hour) = s.split_once(':')?;
        let mut parts = date.trim().split('/');
        let day = parts.next()?.trim().parse().ok()?;
        let month = parts.next()?.trim().parse().ok()?;
        let year = parts.next()?.trim().parse().ok()?;
        if parts.next().is_some() {
            return None;
        }
        let hour = hour.trim().parse().ok()?;

        let field = Self::new(day, month, year, hour);
        field.is_valid().then_some(field)
    }
}

impl fmt::Display for DateTimeField {
    /// `DD/MM/YYYY : HH`
    ///
    /// Years wider than five columns show only their trailing digits, so
    /// the hour always fits on a 16-column row.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}/", self.day, self.month)?;
        if (-9_999..=99_999).contains(&self.year) {
            write!(f, "{:04}", self.year)?;
        } else if self.year < 0 {
            write!(f, "-{:04}", self.year.unsigned_abs() % 10_000)?;
        } else {
            write!(f, "{:05}", self.year % 100_000)?;
        }
        write!(f, " : {:02}", self.hour)
    }
}

/// Index of the date/time component being edited (0-3)
///
/// Moves cyclically in both directions. The cursor is shared by both
/// date/time fields and is reset whenever the menu state changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FieldCursor(u8);

impl FieldCursor {
    /// Number of cursor positions
    pub const POSITIONS: u8 = 4;

    /// Cursor at a specific position, wrapped into range
    pub fn at(index: u8) -> Self {
        Self(index % Self::POSITIONS)
    }

    /// Current position
    pub fn index(&self) -> u8 {
        self.0
    }

    /// Component under the cursor
    pub fn component(&self) -> FieldComponent {
        FieldComponent::from_index(self.0)
    }

    /// Move one position left, wrapping 0 → 3
    pub fn left(&mut self) {
        self.0 = (self.0 + Self::POSITIONS - 1) % Self::POSITIONS;
    }

    /// Move one position right, wrapping 3 → 0
    pub fn right(&mut self) {
        self.0 = (self.0 + 1) % Self::POSITIONS;
    }

    /// Return to the first position
    pub fn reset(&mut self) {
        self.0 = 0;
    }
}

/// Target temperature in 0.1°C units
///
/// Clamped at 0°C from below; there is no upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TargetTemperature(i32);

impl Default for TargetTemperature {
    fn default() -> Self {
        Self(i32::from(DEFAULT_TARGET_X10))
    }
}

impl TargetTemperature {
    /// Create a target, clamping negative values to zero
    pub fn from_x10(value_x10: i32) -> Self {
        Self(value_x10.max(0))
    }

    /// Value in 0.1°C units
    pub fn x10(&self) -> i32 {
        self.0
    }

    /// Step the target by `steps` increments of 0.1°C
    pub fn step(&mut self, steps: i32) {
        let delta = steps.saturating_mul(TARGET_STEP_X10);
        self.0 = self.0.saturating_add(delta).max(0);
    }
}

impl fmt::Display for TargetTemperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::ui::fmt_x10(f, self.0)
    }
}

/// Wrap a value that overshot its inclusive range by one step
fn wrap(value: i32, min: i32, max: i32) -> i32 {
    if value > max {
        min
    } else if value < min {
        max
    } else {
        value
    }
}

fn in_range(value: i32, (min, max): (i32, i32)) -> bool {
    value >= min && value <= max
}
