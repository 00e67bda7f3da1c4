//! Real-time clock trait

/// Errors reported by the real-time clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockError {
    /// Bus transaction failed
    Bus,
    /// Oscillator halted (clock lost power and was never set)
    Halted,
    /// Registers held values outside their calendar ranges
    InvalidData,
}

/// Calendar date and time of day as read from the clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WallTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl WallTime {
    /// Minutes since midnight
    pub fn minute_of_day(&self) -> i32 {
        self.hour as i32 * 60 + self.minute as i32
    }
}

/// Trait for wall-clock sources
///
/// Setting the clock is not part of the controller; a DS1307 keeps time
/// on its backup cell.
pub trait Clock {
    /// Read the current date and time
    fn now(&mut self) -> Result<WallTime, ClockError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minute_of_day() {
        let t = WallTime {
            year: 2024,
            month: 3,
            day: 2,
            hour: 6,
            minute: 1,
            second: 59,
        };
        assert_eq!(t.minute_of_day(), 361);
    }
}
