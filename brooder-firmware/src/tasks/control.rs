//! Control loop
//!
//! Runs the incubator on a fixed ticker. Each tick samples the buttons,
//! lets the core decide, and logs what changed. Nothing else touches the
//! incubator state, so no locking is needed.

use defmt::*;
use embassy_time::{Duration, Instant, Ticker};

use brooder_core::incubation::{AlarmEvent, ClimateCommand, TickReport};
use brooder_core::menu::ConfigState;
use brooder_core::safety::SensorStatus;
use brooder_core::{Activity, Incubator, TickOutcome};

use crate::board::{Board, FrontPanel};

/// Drive the incubator forever
pub async fn run(mut incubator: Incubator, mut board: Board<'_>, panel: FrontPanel<'_>) -> ! {
    let tick_ms = incubator.config().control_loop.tick_ms;
    info!("Control loop started, tick={}ms", tick_ms);

    if let Err(e) = incubator.start(&mut board) {
        warn!("Menu draw failed: {}", e);
    }

    let mut log = EventLog::default();
    let mut ticker = Ticker::every(Duration::from_millis(tick_ms as u64));

    loop {
        ticker.next().await;

        // Wraps after ~49 days; the core compares timestamps with wrapping_sub
        let now_ms = Instant::now().as_millis() as u32;
        let outcome = incubator.tick(now_ms, panel.levels(), &mut board);
        log.record(&outcome);
    }
}

/// Remembers the last reported conditions so logs fire on change only
#[derive(Default)]
struct EventLog {
    menu_state: Option<ConfigState>,
    climate: Option<ClimateCommand>,
    clock_failed: bool,
    sensor_failed: bool,
    display_failed: bool,
}

impl EventLog {
    fn record(&mut self, outcome: &TickOutcome) {
        match &outcome.activity {
            Activity::Configuring { state, presses } => {
                for button in presses {
                    debug!("Button: {}", button);
                }
                if self.menu_state != Some(*state) {
                    info!("Menu: {}", state);
                    self.menu_state = Some(*state);
                }
            }
            Activity::Armed(settings) => {
                info!(
                    "Armed: start={} hatch={} target={}",
                    settings.start_time, settings.hatch_time, settings.target
                );
            }
            Activity::Running(report) => self.record_report(report),
        }

        match outcome.display_error {
            Some(e) if !self.display_failed => {
                warn!("Display error: {}", e);
                self.display_failed = true;
            }
            None if self.display_failed => {
                info!("Display recovered");
                self.display_failed = false;
            }
            _ => {}
        }
    }

    fn record_report(&mut self, report: &TickReport) {
        for event in &report.alarm_events {
            match event {
                AlarmEvent::Triggered => warn!("Hatch alarm triggered"),
                AlarmEvent::PulseStarted => debug!("Alarm tone on"),
                AlarmEvent::PulseEnded => debug!("Alarm tone off"),
                AlarmEvent::Acknowledged => info!("Hatch alarm acknowledged"),
            }
        }

        match report.sensor {
            Some(SensorStatus::Fresh(t)) => {
                if self.sensor_failed {
                    info!("Sensor recovered");
                    self.sensor_failed = false;
                }
                trace!("Temperature {} (x10 C)", t);
            }
            Some(SensorStatus::Stale {
                temp_x10,
                misses,
                error,
            }) => {
                warn!(
                    "Sensor read failed ({}), holding {} for miss {}",
                    error, temp_x10, misses
                );
            }
            Some(SensorStatus::Failed(e)) if !self.sensor_failed => {
                error!("Sensor failed ({}), heater and fan off", e);
                self.sensor_failed = true;
            }
            _ => {}
        }

        match report.clock_error {
            Some(e) if !self.clock_failed => {
                warn!("Clock read failed: {}", e);
                self.clock_failed = true;
            }
            None if self.clock_failed => {
                info!("Clock recovered");
                self.clock_failed = false;
            }
            _ => {}
        }

        if self.climate != Some(report.climate) {
            info!(
                "Climate: {} at {} (x10 C)",
                report.climate, report.status.temperature_x10
            );
            self.climate = Some(report.climate);
        }
    }
}
