//! Top-level incubator application
//!
//! Owns the two phases of a run:
//! - Configuring: buttons edit the start time, hatch time and target
//!   temperature through the [`ConfigMenu`]
//! - Running: the [`IncubationController`] regulates climate and sounds
//!   the hatch alarm until power-off
//!
//! Each loop iteration runs exactly one of them. The transition is one
//! way; once armed the menu is gone.

use crate::config::IncubatorConfig;
use crate::incubation::{ClimateCommand, IncubationController, TickReport};
use crate::input::{Button, ButtonLevels, Debouncer, Presses};
use crate::menu::{ConfigMenu, ConfigState, IncubationSettings, MenuOutcome};
use crate::traits::{AlarmOutput, Clock, ClimateOutputs, Display, DisplayError, TemperatureSensor};
use crate::ui::Renderer;

/// Hardware collaborators the application drives
pub struct Peripherals<C, S, D, O, A> {
    pub clock: C,
    pub sensor: S,
    pub display: D,
    pub climate: O,
    pub alarm: A,
}

/// What a tick did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activity {
    /// Menu handled these presses and is now in `state`
    Configuring { state: ConfigState, presses: Presses },
    /// Menu was armed this tick; the controller starts next tick
    Armed(IncubationSettings),
    /// Controller ran
    Running(TickReport),
}

/// Result of [`Incubator::tick`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickOutcome {
    pub activity: Activity,
    /// Display write that failed this tick, if any
    pub display_error: Option<DisplayError>,
}

#[derive(Debug, Clone)]
enum Phase {
    Configuring(ConfigMenu),
    Running(IncubationController),
}

/// The incubator application
#[derive(Debug, Clone)]
pub struct Incubator {
    config: IncubatorConfig,
    phase: Phase,
    debouncer: Debouncer,
    renderer: Renderer,
}

impl Incubator {
    /// Create an incubator at the first menu screen
    pub fn new(config: IncubatorConfig) -> Self {
        Self {
            phase: Phase::Configuring(ConfigMenu::new(&config.defaults)),
            debouncer: Debouncer::new(&config.input),
            renderer: Renderer::new(),
            config,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &IncubatorConfig {
        &self.config
    }

    /// Check if the menu has been armed
    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running(_))
    }

    /// Menu, while configuring
    pub fn menu(&self) -> Option<&ConfigMenu> {
        match &self.phase {
            Phase::Configuring(menu) => Some(menu),
            Phase::Running(_) => None,
        }
    }

    /// Controller, once armed
    pub fn controller(&self) -> Option<&IncubationController> {
        match &self.phase {
            Phase::Configuring(_) => None,
            Phase::Running(controller) => Some(controller),
        }
    }

    /// Put the outputs in a safe state and draw the first menu screen
    pub fn start<C, S, D, O, A>(
        &mut self,
        p: &mut Peripherals<C, S, D, O, A>,
    ) -> Result<(), DisplayError>
    where
        D: Display,
        O: ClimateOutputs,
        A: AlarmOutput,
    {
        ClimateCommand::Off.apply(&mut p.climate);
        p.alarm.set_tone(None);

        match &self.phase {
            Phase::Configuring(menu) => self.renderer.show_menu(menu, &mut p.display),
            Phase::Running(_) => {
                self.renderer.invalidate();
                Ok(())
            }
        }
    }

    /// Run one loop iteration
    ///
    /// `levels` are the raw button levels sampled this tick.
    pub fn tick<C, S, D, O, A>(
        &mut self,
        now_ms: u32,
        levels: ButtonLevels,
        p: &mut Peripherals<C, S, D, O, A>,
    ) -> TickOutcome
    where
        C: Clock,
        S: TemperatureSensor,
        D: Display,
        O: ClimateOutputs,
        A: AlarmOutput,
    {
        let presses = self.debouncer.poll(levels, now_ms);

        let (activity, display_error, armed) = match &mut self.phase {
            Phase::Configuring(menu) => {
                let mut redraw = false;
                let mut armed = None;
                for button in presses.iter().copied() {
                    match menu.handle(button) {
                        MenuOutcome::Redraw => redraw = true,
                        MenuOutcome::Armed => {
                            // Presses after arming are dropped
                            armed = Some(menu.settings());
                            break;
                        }
                        MenuOutcome::Ignored => {}
                    }
                }

                match armed {
                    Some(settings) => {
                        self.renderer.invalidate();
                        let err = p.display.clear().err();
                        (Activity::Armed(settings), err, armed)
                    }
                    None => {
                        let err = if redraw {
                            self.renderer.show_menu(menu, &mut p.display).err()
                        } else {
                            None
                        };
                        let activity = Activity::Configuring {
                            state: menu.state(),
                            presses,
                        };
                        (activity, err, None)
                    }
                }
            }
            Phase::Running(controller) => {
                let acknowledge = presses.contains(&Button::Next);
                let time = p.clock.now();
                let reading = if controller.sensor_read_due(now_ms) {
                    Some(p.sensor.read_celsius_x10())
                } else {
                    None
                };

                let report = controller.tick(now_ms, time, reading, acknowledge);

                // Outputs first; a display fault must not delay them
                report.climate.apply(&mut p.climate);
                p.alarm.set_tone(report.tone);

                let err = self
                    .renderer
                    .show_status(&report.status, &mut p.display)
                    .err();
                (Activity::Running(report), err, None)
            }
        };

        if let Some(settings) = armed {
            self.phase = Phase::Running(IncubationController::new(settings, &self.config));
        }

        TickOutcome {
            activity,
            display_error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{ClockError, SensorReadError, WallTime};

    struct FixedClock(Result<WallTime, ClockError>);

    impl Clock for FixedClock {
        fn now(&mut self) -> Result<WallTime, ClockError> {
            self.0
        }
    }

    struct FixedSensor(Result<i16, SensorReadError>);

    impl TemperatureSensor for FixedSensor {
        fn read_celsius_x10(&mut self) -> Result<i16, SensorReadError> {
            self.0
        }
    }

    #[derive(Default)]
    struct NullDisplay {
        clears: u32,
    }

    impl Display for NullDisplay {
        fn clear(&mut self) -> Result<(), DisplayError> {
            self.clears += 1;
            Ok(())
        }

        fn set_cursor(&mut self, _col: u8, _row: u8) -> Result<(), DisplayError> {
            Ok(())
        }

        fn print(&mut self, _text: &str) -> Result<(), DisplayError> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct Relays {
        heater: bool,
        fan: bool,
    }

    impl ClimateOutputs for Relays {
        fn set_heater(&mut self, on: bool) {
            self.heater = on;
        }

        fn set_fan(&mut self, on: bool) {
            self.fan = on;
        }
    }

    #[derive(Default)]
    struct Buzzer(Option<u32>);

    impl AlarmOutput for Buzzer {
        fn set_tone(&mut self, frequency_hz: Option<u32>) {
            self.0 = frequency_hz;
        }
    }

    type Board = Peripherals<FixedClock, FixedSensor, NullDisplay, Relays, Buzzer>;

    fn board(temp_x10: i16) -> Board {
        Peripherals {
            clock: FixedClock(Ok(WallTime {
                year: 2024,
                month: 1,
                day: 1,
                hour: 1,
                minute: 0,
                second: 0,
            })),
            sensor: FixedSensor(Ok(temp_x10)),
            display: NullDisplay::default(),
            climate: Relays::default(),
            alarm: Buzzer::default(),
        }
    }

    /// Press and release `button`, one debounce window later than `now`
    fn press(app: &mut Incubator, p: &mut Board, now: &mut u32, button: Button) -> TickOutcome {
        *now += 1_000;
        let outcome = app.tick(*now, ButtonLevels::only(button), p);
        *now += 50;
        app.tick(*now, ButtonLevels::RELEASED, p);
        outcome
    }

    #[test]
    fn test_start_draws_menu_with_outputs_off() {
        let mut app = Incubator::new(IncubatorConfig::default());
        let mut p = board(360);
        p.climate.heater = true;
        app.start(&mut p).unwrap();
        assert!(!p.climate.heater);
        assert_eq!(p.display.clears, 1);
        assert_eq!(app.menu().map(|m| m.state()), Some(ConfigState::EditingStartTime));
    }

    #[test]
    fn test_arms_after_three_next_presses() {
        let mut app = Incubator::new(IncubatorConfig::default());
        let mut p = board(360);
        let mut now = 0;

        press(&mut app, &mut p, &mut now, Button::Next);
        press(&mut app, &mut p, &mut now, Button::Next);
        assert!(!app.is_running());
        let outcome = press(&mut app, &mut p, &mut now, Button::Next);
        assert!(matches!(outcome.activity, Activity::Armed(_)));
        assert!(app.is_running());
        assert!(app.menu().is_none());
    }

    #[test]
    fn test_running_drives_outputs() {
        let mut app = Incubator::new(IncubatorConfig::default());
        let mut p = board(360);
        let mut now = 0;
        for _ in 0..3 {
            press(&mut app, &mut p, &mut now, Button::Next);
        }

        now += 50;
        let outcome = app.tick(now, ButtonLevels::RELEASED, &mut p);
        match outcome.activity {
            Activity::Running(report) => assert_eq!(report.climate, ClimateCommand::Heat),
            other => panic!("unexpected activity {:?}", other),
        }
        assert!(p.climate.heater);
        assert!(!p.climate.fan);
        assert_eq!(outcome.display_error, None);
    }
}
