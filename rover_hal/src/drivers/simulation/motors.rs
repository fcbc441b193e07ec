//! Recording motor actuator.

use parking_lot::Mutex;
use rover_common::control::command::ActuationCommand;
use rover_common::hal::driver::{HalError, MotorActuator};
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::trace;

/// Commands kept for inspection; older entries are dropped.
const HISTORY_LIMIT: usize = 4096;

#[derive(Debug, Default)]
struct MotorState {
    history: VecDeque<ActuationCommand>,
    total: u64,
    released: bool,
    fail_after: Option<u64>,
    rejected: u64,
}

/// Inspection handle for [`SimulatedMotors`]. Cheap to clone.
#[derive(Debug, Clone, Default)]
pub struct MotorLog(Arc<Mutex<MotorState>>);

/// Actuator that records every accepted command.
pub struct SimulatedMotors {
    log: MotorLog,
}

impl SimulatedMotors {
    /// Create an actuator and its inspection handle.
    pub fn new() -> (Self, MotorLog) {
        let log = MotorLog::default();
        (Self { log: log.clone() }, log)
    }
}

impl MotorActuator for SimulatedMotors {
    fn name(&self) -> &'static str {
        "simulation"
    }

    fn set(&mut self, command: ActuationCommand) -> Result<(), HalError> {
        let mut state = self.log.0.lock();
        if state.fail_after.is_some_and(|limit| state.total >= limit) {
            state.rejected += 1;
            return Err(HalError::Unavailable("simulated motor driver offline".to_string()));
        }
        trace!(steer = command.steer(), throttle = command.throttle(), "motor set");
        if state.history.len() == HISTORY_LIMIT {
            state.history.pop_front();
        }
        state.history.push_back(command);
        state.total += 1;
        Ok(())
    }

    fn release(&mut self) -> Result<(), HalError> {
        self.log.0.lock().released = true;
        Ok(())
    }
}

impl MotorLog {
    /// Recent accepted commands, oldest first.
    pub fn commands(&self) -> Vec<ActuationCommand> {
        self.0.lock().history.iter().copied().collect()
    }

    /// Most recent accepted command.
    pub fn last(&self) -> Option<ActuationCommand> {
        self.0.lock().history.back().copied()
    }

    /// Number of accepted commands since creation.
    pub fn count(&self) -> u64 {
        self.0.lock().total
    }

    /// Number of commands refused by an injected failure.
    pub fn rejected(&self) -> u64 {
        self.0.lock().rejected
    }

    /// Whether the actuator was released.
    pub fn is_released(&self) -> bool {
        self.0.lock().released
    }

    /// Refuse every command once `accepted` commands have gone through.
    pub fn fail_after(&self, accepted: u64) {
        self.0.lock().fail_after = Some(accepted);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_commands() {
        let (mut motors, log) = SimulatedMotors::new();
        motors.set(ActuationCommand::new(0.5, 0.3)).unwrap();
        motors.set(ActuationCommand::STOP).unwrap();

        assert_eq!(log.count(), 2);
        assert_eq!(log.commands()[0], ActuationCommand::new(0.5, 0.3));
        assert_eq!(log.last(), Some(ActuationCommand::STOP));
        assert!(!log.is_released());

        motors.release().unwrap();
        assert!(log.is_released());
    }

    #[test]
    fn injected_failure() {
        let (mut motors, log) = SimulatedMotors::new();
        log.fail_after(1);
        assert!(motors.set(ActuationCommand::new(0.1, 0.1)).is_ok());
        assert!(matches!(
            motors.set(ActuationCommand::STOP),
            Err(HalError::Unavailable(_))
        ));
        assert_eq!(log.count(), 1);
        assert_eq!(log.rejected(), 1);
    }

    #[test]
    fn history_is_bounded() {
        let (mut motors, log) = SimulatedMotors::new();
        for _ in 0..(HISTORY_LIMIT + 10) {
            motors.set(ActuationCommand::STOP).unwrap();
        }
        assert_eq!(log.commands().len(), HISTORY_LIMIT);
        assert_eq!(log.count(), (HISTORY_LIMIT + 10) as u64);
    }
}
