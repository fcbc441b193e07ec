//! Actuation loop.
//!
//! Drains controller events, tracks the latest steer/throttle axis values
//! and submits a clamped [`ActuationCommand`] every iteration.
//!
//! ```text
//!   Running ──quit / input error / actuator error──► Stopping ──zero cmd, release──► Stopped
//! ```
//!
//! `Stopped` is reached exactly once and lowers the [`RunFlag`].

use crate::error::ControlError;
use rover_common::config::ControlConfig;
use rover_common::control::axis::AxisSample;
use rover_common::control::command::ActuationCommand;
use rover_common::hal::driver::{InputDevice, MotorActuator};
use rover_common::hal::types::InputEvent;
use rover_common::signal::{QuitSignal, RunFlag};
use std::thread;
use tracing::{debug, error, info, warn};

/// Lifecycle phase of the control loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlPhase {
    /// Polling input and driving motors.
    Running,
    /// Issuing the final zero command and releasing devices.
    Stopping,
    /// Devices released, run flag lowered.
    Stopped,
}

/// Latest raw axis values. Owned by the control loop only.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControlState {
    /// Last steer axis value, as reported.
    pub last_steer: f64,
    /// Last throttle axis value, sign already adjusted.
    pub last_throttle: f64,
}

impl ControlState {
    /// Clamped command for the current state.
    pub fn command(&self) -> ActuationCommand {
        ActuationCommand::new(self.last_steer, self.last_throttle)
    }
}

/// Control loop counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlStats {
    /// Completed iterations.
    pub iterations: u64,
    /// Commands accepted by the actuator, including the final zero command.
    pub commands: u64,
    /// Axis motion events consumed.
    pub axis_events: u64,
    /// Iterations that found no pending events.
    pub idle_iterations: u64,
}

/// Result of one iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Keep going.
    Continue,
    /// A quit was requested.
    Quit,
}

/// The actuation loop.
pub struct ControlLoop {
    input: Box<dyn InputDevice>,
    motors: Box<dyn MotorActuator>,
    config: ControlConfig,
    state: ControlState,
    phase: ControlPhase,
    run_flag: RunFlag,
    quit: QuitSignal,
    stats: ControlStats,
}

impl ControlLoop {
    /// Create a loop in the `Running` phase.
    pub fn new(
        input: Box<dyn InputDevice>,
        motors: Box<dyn MotorActuator>,
        config: ControlConfig,
        run_flag: RunFlag,
        quit: QuitSignal,
    ) -> Self {
        Self {
            input,
            motors,
            config,
            state: ControlState::default(),
            phase: ControlPhase::Running,
            run_flag,
            quit,
            stats: ControlStats::default(),
        }
    }

    /// Current phase.
    pub fn phase(&self) -> ControlPhase {
        self.phase
    }

    /// Current axis state.
    pub fn state(&self) -> ControlState {
        self.state
    }

    /// Counters so far.
    pub fn stats(&self) -> ControlStats {
        self.stats
    }

    /// Run until quit or a fatal error, then stop.
    ///
    /// # Errors
    /// The first input or actuation failure. The loop is `Stopped` either way.
    pub fn run(&mut self) -> Result<ControlStats, ControlError> {
        info!(
            input = self.input.name(),
            motors = self.motors.name(),
            steer_axis = self.config.steer_axis,
            throttle_axis = self.config.throttle_axis,
            "Control loop running"
        );

        let outcome = loop {
            match self.step() {
                Ok(Step::Continue) => {
                    if self.stats.iterations % 10_000 == 0 {
                        debug!(
                            "Control loop: {} iterations, {} commands, {} axis events",
                            self.stats.iterations, self.stats.commands, self.stats.axis_events
                        );
                    }
                }
                Ok(Step::Quit) => {
                    info!("Quit requested");
                    break Ok(());
                }
                Err(e) => {
                    error!("{e}");
                    break Err(e);
                }
            }
        };

        let stopped = self.stop();
        outcome.and(stopped)?;
        Ok(self.stats)
    }

    /// One iteration: drain events, submit a command, idle if nothing came in.
    ///
    /// # Errors
    /// Input or actuation failure. The caller must then [`stop`](Self::stop).
    pub fn step(&mut self) -> Result<Step, ControlError> {
        if self.phase != ControlPhase::Running || self.quit.is_raised() {
            return Ok(Step::Quit);
        }

        let mut drained = 0;
        while drained < self.config.max_events_per_iteration {
            match self.input.poll_event().map_err(ControlError::Input)? {
                Some(InputEvent::AxisMotion(sample)) => {
                    drained += 1;
                    self.apply(sample);
                }
                Some(InputEvent::Quit) => return Ok(Step::Quit),
                None => break,
            }
        }

        self.motors
            .set(self.state.command())
            .map_err(ControlError::Actuation)?;
        self.stats.commands += 1;
        self.stats.iterations += 1;

        if drained == 0 {
            self.stats.idle_iterations += 1;
            thread::sleep(self.config.idle_wait());
        }
        Ok(Step::Continue)
    }

    /// Issue the zero command, release devices and lower the run flag.
    ///
    /// Idempotent. Release failures are logged; a failed zero command is
    /// returned after the devices have been released.
    pub fn stop(&mut self) -> Result<(), ControlError> {
        if self.phase == ControlPhase::Stopped {
            return Ok(());
        }
        self.phase = ControlPhase::Stopping;

        let zeroed = match self.motors.set(ActuationCommand::STOP) {
            Ok(()) => {
                self.stats.commands += 1;
                Ok(())
            }
            Err(e) => {
                warn!("Final zero command failed: {e}");
                Err(ControlError::Actuation(e))
            }
        };
        if let Err(e) = self.motors.release() {
            warn!("Motor release failed: {e}");
        }
        if let Err(e) = self.input.release() {
            warn!("Input release failed: {e}");
        }

        self.phase = ControlPhase::Stopped;
        self.run_flag.lower();
        info!(
            iterations = self.stats.iterations,
            commands = self.stats.commands,
            "Control loop stopped"
        );
        zeroed
    }

    fn apply(&mut self, sample: AxisSample) {
        self.stats.axis_events += 1;
        if sample.axis_id == self.config.steer_axis {
            self.state.last_steer = sample.value;
        } else if sample.axis_id == self.config.throttle_axis {
            self.state.last_throttle = if self.config.invert_throttle {
                -sample.value
            } else {
                sample.value
            };
        }
    }
}
