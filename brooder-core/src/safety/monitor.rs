//! Sensor monitor implementation
//!
//! Tracks the last good reading, counts consecutive failures and applies
//! the configured [`SensorPolicy`].

use crate::config::{SensorConfig, SensorPolicy};
use crate::traits::SensorReadError;

/// Outcome of feeding a reading into the monitor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorStatus {
    /// Fresh reading (°C × 10)
    Fresh(i16),
    /// Read failed; regulating on the last good value
    Stale {
        temp_x10: i16,
        misses: u8,
        error: SensorReadError,
    },
    /// No usable reading; outputs must be off
    Failed(SensorReadError),
}

impl SensorStatus {
    /// Temperature to regulate on, if any
    pub fn temperature_x10(&self) -> Option<i16> {
        match self {
            SensorStatus::Fresh(t) => Some(*t),
            SensorStatus::Stale { temp_x10, .. } => Some(*temp_x10),
            SensorStatus::Failed(_) => None,
        }
    }

    /// Check if the controller must fail safe
    pub fn is_failed(&self) -> bool {
        matches!(self, SensorStatus::Failed(_))
    }
}

/// Sensor monitor for fault detection and read pacing
#[derive(Debug, Clone)]
pub struct SensorMonitor {
    config: SensorConfig,
    /// Last good reading (×10 for 0.1°C resolution)
    last_good_x10: Option<i16>,
    /// Consecutive failed reads
    misses: u8,
    /// Timestamp of the last read attempt (ms)
    last_read_ms: Option<u32>,
    /// Status after the last read attempt
    status: Option<SensorStatus>,
}

impl SensorMonitor {
    /// Create a new sensor monitor
    pub fn new(config: SensorConfig) -> Self {
        Self {
            config,
            last_good_x10: None,
            misses: 0,
            last_read_ms: None,
            status: None,
        }
    }

    /// Check if the sensor may be read again
    pub fn read_due(&self, now_ms: u32) -> bool {
        match self.last_read_ms {
            None => true,
            Some(last) => now_ms.wrapping_sub(last) >= self.config.min_read_interval_ms,
        }
    }

    /// Record a read attempt and return the resulting status
    pub fn record(&mut self, now_ms: u32, reading: Result<i16, SensorReadError>) -> SensorStatus {
        self.last_read_ms = Some(now_ms);

        let status = match reading {
            Ok(temp_x10) => {
                self.last_good_x10 = Some(temp_x10);
                self.misses = 0;
                SensorStatus::Fresh(temp_x10)
            }
            Err(error) => {
                self.misses = self.misses.saturating_add(1);
                match (self.config.policy, self.last_good_x10) {
                    (SensorPolicy::HoldLast, Some(temp_x10))
                        if self.misses <= self.config.max_stale_reads =>
                    {
                        SensorStatus::Stale {
                            temp_x10,
                            misses: self.misses,
                            error,
                        }
                    }
                    _ => SensorStatus::Failed(error),
                }
            }
        };

        self.status = Some(status);
        status
    }

    /// Status after the most recent read, `None` before the first read
    pub fn status(&self) -> Option<SensorStatus> {
        self.status
    }

    /// Consecutive failed reads
    pub fn misses(&self) -> u8 {
        self.misses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monitor(policy: SensorPolicy, max_stale_reads: u8) -> SensorMonitor {
        SensorMonitor::new(SensorConfig {
            policy,
            max_stale_reads,
            min_read_interval_ms: 2_000,
        })
    }

    #[test]
    fn test_fresh_reading() {
        let mut m = monitor(SensorPolicy::HoldLast, 3);
        assert_eq!(m.record(0, Ok(375)), SensorStatus::Fresh(375));
        assert_eq!(m.status().and_then(|s| s.temperature_x10()), Some(375));
    }

    #[test]
    fn test_hold_last_then_fail_safe() {
        let mut m = monitor(SensorPolicy::HoldLast, 2);
        m.record(0, Ok(370));

        let s = m.record(2_000, Err(SensorReadError::Checksum));
        assert_eq!(s.temperature_x10(), Some(370));
        let s = m.record(4_000, Err(SensorReadError::Checksum));
        assert_eq!(s.temperature_x10(), Some(370));
        let s = m.record(6_000, Err(SensorReadError::Timeout));
        assert_eq!(s, SensorStatus::Failed(SensorReadError::Timeout));
        assert_eq!(m.misses(), 3);

        // Recovery clears the miss counter
        assert_eq!(m.record(8_000, Ok(372)), SensorStatus::Fresh(372));
        assert_eq!(m.misses(), 0);
    }

    #[test]
    fn test_hold_last_without_history_fails() {
        let mut m = monitor(SensorPolicy::HoldLast, 3);
        assert!(m.record(0, Err(SensorReadError::Timeout)).is_failed());
    }

    #[test]
    fn test_fail_safe_policy() {
        let mut m = monitor(SensorPolicy::FailSafe, 3);
        m.record(0, Ok(370));
        assert!(m.record(2_000, Err(SensorReadError::OutOfRange)).is_failed());
    }

    #[test]
    fn test_read_pacing() {
        let mut m = monitor(SensorPolicy::HoldLast, 3);
        assert!(m.read_due(0));
        m.record(100, Ok(370));
        assert!(!m.read_due(1_000));
        assert!(m.read_due(2_100));
    }
}
