//! Incubation control loop
//!
//! One [`IncubationController::tick`] per loop iteration. The controller
//! does no I/O itself: it takes the clock and sensor results and returns
//! the relay, buzzer and display decisions in a [`TickReport`].

use heapless::Vec;

use super::alarm::{AlarmEvent, AlarmState, HatchAlarm};
use super::regulation::{regulate, ClimateCommand};
use crate::config::IncubatorConfig;
use crate::menu::{DateTimeField, IncubationSettings};
use crate::safety::{SensorMonitor, SensorStatus};
use crate::traits::{ClockError, SensorReadError, WallTime};

/// Alarm events that can occur in a single tick
pub type AlarmEvents = Vec<AlarmEvent, 3>;

/// Values shown on the running screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusView {
    /// Temperature being regulated on (°C × 10), `None` when failed safe
    pub temperature_x10: Option<i16>,
    /// Whole hours since the start hour, `None` without a clock reading
    pub elapsed_hours: Option<i32>,
    /// Whole hours until the hatch hour, `None` without a clock reading
    pub remaining_hours: Option<i32>,
    /// Alarm state after this tick
    pub alarm: AlarmState,
}

/// Everything decided during one tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickReport {
    /// Relay command applied this tick
    pub climate: ClimateCommand,
    /// Buzzer tone after this tick
    pub tone: Option<u32>,
    /// Running screen contents
    pub status: StatusView,
    /// Sensor status if the sensor was read this tick
    pub sensor: Option<SensorStatus>,
    /// Clock failure, if the clock could not be read
    pub clock_error: Option<ClockError>,
    /// Alarm transitions, in the order they happened
    pub alarm_events: AlarmEvents,
}

/// Hours elapsed since the start hour on the current day
///
/// Truncating integer division; negative before the start hour and not
/// corrected across midnight.
pub fn elapsed_hours(minute_of_day: i32, start: &DateTimeField) -> i32 {
    (minute_of_day - start.hour_minutes()) / 60
}

/// Hours remaining until the hatch hour on the current day
///
/// Same truncation as [`elapsed_hours`]; negative once the hatch hour
/// has passed.
pub fn remaining_hours(minute_of_day: i32, hatch: &DateTimeField) -> i32 {
    (hatch.hour_minutes() - minute_of_day) / 60
}

/// Incubation controller state
#[derive(Debug, Clone)]
pub struct IncubationController {
    settings: IncubationSettings,
    alarm: HatchAlarm,
    sensor: SensorMonitor,
    climate: ClimateCommand,
}

impl IncubationController {
    /// Create a controller for freshly armed settings
    pub fn new(settings: IncubationSettings, config: &IncubatorConfig) -> Self {
        Self {
            settings,
            alarm: HatchAlarm::new(config.alarm),
            sensor: SensorMonitor::new(config.sensor),
            climate: ClimateCommand::Off,
        }
    }

    /// Settings the controller runs with
    pub fn settings(&self) -> &IncubationSettings {
        &self.settings
    }

    /// Hatch alarm
    pub fn alarm(&self) -> &HatchAlarm {
        &self.alarm
    }

    /// Relay command from the last tick
    pub fn climate(&self) -> ClimateCommand {
        self.climate
    }

    /// Check if the sensor should be read this tick
    pub fn sensor_read_due(&self, now_ms: u32) -> bool {
        self.sensor.read_due(now_ms)
    }

    /// Run one control iteration
    ///
    /// - `time`: clock result for this tick
    /// - `reading`: sensor result, or `None` if the sensor was not due
    /// - `acknowledge`: the Next button was pressed this tick
    pub fn tick(
        &mut self,
        now_ms: u32,
        time: Result<WallTime, ClockError>,
        reading: Option<Result<i16, SensorReadError>>,
        acknowledge: bool,
    ) -> TickReport {
        let sensor = reading.map(|r| self.sensor.record(now_ms, r));

        // Regulate on whatever the sensor policy allows
        let temperature_x10 = self.sensor.status().and_then(|s| s.temperature_x10());
        self.climate = match temperature_x10 {
            Some(t) => regulate(t, self.settings.target.x10()),
            None => ClimateCommand::Off,
        };

        let mut alarm_events = AlarmEvents::new();
        let (elapsed, remaining, clock_error) = match time {
            Ok(now) => {
                let minute = now.minute_of_day();
                let hatch_minutes = self.settings.hatch_time.hour_minutes();
                if let Some(event) = self.alarm.check_deadline(minute, hatch_minutes, now_ms) {
                    let _ = alarm_events.push(event);
                }
                (
                    Some(elapsed_hours(minute, &self.settings.start_time)),
                    Some(remaining_hours(minute, &self.settings.hatch_time)),
                    None,
                )
            }
            Err(e) => (None, None, Some(e)),
        };

        if let Some(event) = self.alarm.update(now_ms) {
            let _ = alarm_events.push(event);
        }

        if acknowledge {
            if let Some(event) = self.alarm.acknowledge() {
                let _ = alarm_events.push(event);
            }
        }

        TickReport {
            climate: self.climate,
            tone: self.alarm.tone(),
            status: StatusView {
                temperature_x10,
                elapsed_hours: elapsed,
                remaining_hours: remaining,
                alarm: self.alarm.state(),
            },
            sensor,
            clock_error,
            alarm_events,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::TargetTemperature;

    fn at(hour: u8, minute: u8) -> Result<WallTime, ClockError> {
        Ok(WallTime {
            year: 2024,
            month: 1,
            day: 1,
            hour,
            minute,
            second: 0,
        })
    }

    fn controller(start_hour: u8, hatch_hour: u8) -> IncubationController {
        let settings = IncubationSettings {
            start_time: DateTimeField::new(1, 1, 2024, start_hour),
            hatch_time: DateTimeField::new(22, 1, 2024, hatch_hour),
            target: TargetTemperature::default(),
        };
        IncubationController::new(settings, &IncubatorConfig::default())
    }

    #[test]
    fn test_hour_arithmetic_truncates() {
        let start = DateTimeField::new(1, 1, 2024, 8);
        assert_eq!(elapsed_hours(10 * 60 + 59, &start), 2);
        // Before the start hour: truncation toward zero
        assert_eq!(elapsed_hours(7 * 60 + 30, &start), 0);
        assert_eq!(elapsed_hours(6 * 60 + 30, &start), -1);

        let hatch = DateTimeField::new(1, 1, 2024, 6);
        assert_eq!(remaining_hours(3 * 60 + 1, &hatch), 2);
        assert_eq!(remaining_hours(8 * 60, &hatch), -2);
    }

    #[test]
    fn test_regulates_on_reading() {
        let mut c = controller(0, 6);
        let report = c.tick(0, at(1, 0), Some(Ok(360)), false);
        assert_eq!(report.climate, ClimateCommand::Heat);

        let report = c.tick(2_000, at(1, 0), Some(Ok(380)), false);
        assert_eq!(report.climate, ClimateCommand::Cool);

        let report = c.tick(4_000, at(1, 0), Some(Ok(375)), false);
        assert_eq!(report.climate, ClimateCommand::Hold);
    }

    #[test]
    fn test_off_before_first_reading() {
        let mut c = controller(0, 6);
        let report = c.tick(0, at(1, 0), None, false);
        assert_eq!(report.climate, ClimateCommand::Off);
        assert_eq!(report.status.temperature_x10, None);
    }

    #[test]
    fn test_keeps_last_reading_between_reads() {
        let mut c = controller(0, 6);
        c.tick(0, at(1, 0), Some(Ok(360)), false);
        let report = c.tick(50, at(1, 0), None, false);
        assert_eq!(report.climate, ClimateCommand::Heat);
        assert_eq!(report.sensor, None);
    }

    #[test]
    fn test_alarm_triggers_once_at_hatch_hour() {
        let mut c = controller(0, 6);
        let report = c.tick(0, at(6, 0), Some(Ok(375)), false);
        assert_eq!(report.alarm_events.as_slice(), &[AlarmEvent::Triggered]);
        assert_eq!(report.status.alarm, AlarmState::Sounding);

        let report = c.tick(60_000, at(6, 1), None, false);
        assert!(report.alarm_events.is_empty());
        assert_eq!(report.status.alarm, AlarmState::Sounding);
    }

    #[test]
    fn test_acknowledge_silences() {
        let mut c = controller(0, 6);
        c.tick(0, at(6, 0), Some(Ok(375)), false);
        let report = c.tick(300_000, at(6, 5), None, false);
        assert_eq!(report.tone, Some(1_000));

        let report = c.tick(301_000, at(6, 5), None, true);
        assert_eq!(report.tone, None);
        assert_eq!(report.alarm_events.as_slice(), &[AlarmEvent::Acknowledged]);
        assert_eq!(report.status.alarm, AlarmState::Idle);
    }

    #[test]
    fn test_clock_failure_still_regulates() {
        let mut c = controller(0, 6);
        let report = c.tick(0, Err(ClockError::Bus), Some(Ok(360)), false);
        assert_eq!(report.climate, ClimateCommand::Heat);
        assert_eq!(report.clock_error, Some(ClockError::Bus));
        assert_eq!(report.status.elapsed_hours, None);
        assert_eq!(c.alarm().state(), AlarmState::Idle);
    }

    #[test]
    fn test_sensor_failure_fails_safe() {
        let mut c = controller(0, 6);
        c.tick(0, at(1, 0), Some(Ok(360)), false);
        for i in 1..=3 {
            let report = c.tick(i * 2_000, at(1, 0), Some(Err(SensorReadError::Timeout)), false);
            assert_eq!(report.climate, ClimateCommand::Heat);
        }
        let report = c.tick(8_000, at(1, 0), Some(Err(SensorReadError::Timeout)), false);
        assert_eq!(report.climate, ClimateCommand::Off);
        assert_eq!(report.status.temperature_x10, None);
    }
}
