//! Two-motor drive through the Linux sysfs PWM interface.
//!
//! Each motor is an H-bridge driven by two PWM channels, one per
//! direction. A channel directory (`/sys/class/pwm/pwmchipN/pwmM`) must
//! already be exported; it exposes `period`, `duty_cycle` and `enable`.

use rover_common::config::{MotorChannelConfig, MotorConfig};
use rover_common::control::command::ActuationCommand;
use rover_common::hal::driver::{HalError, MotorActuator};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// One exported PWM channel.
#[derive(Debug)]
pub struct PwmChannel {
    dir: PathBuf,
    period_ns: u64,
    duty_ns: u64,
}

impl PwmChannel {
    /// Configure the period, zero the duty cycle and enable the output.
    pub fn open(dir: &Path, period_ns: u64) -> Result<Self, HalError> {
        let mut channel = Self {
            dir: dir.to_path_buf(),
            period_ns,
            duty_ns: u64::MAX,
        };
        // The kernel rejects a period shorter than the current duty cycle.
        channel.set_duty_ns(0)?;
        channel.write("period", period_ns)?;
        channel.write("enable", 1)?;
        debug!(channel = %dir.display(), period_ns, "PWM channel enabled");
        Ok(channel)
    }

    /// Set the duty as a fraction of the period. Clamped to `[0, 1]`.
    pub fn set_fraction(&mut self, fraction: f64) -> Result<(), HalError> {
        let fraction = if fraction.is_nan() { 0.0 } else { fraction.clamp(0.0, 1.0) };
        let duty_ns = (fraction * self.period_ns as f64).round() as u64;
        self.set_duty_ns(duty_ns)
    }

    /// Current duty cycle [ns].
    pub fn duty_ns(&self) -> u64 {
        self.duty_ns
    }

    /// Zero the duty cycle and disable the output.
    pub fn disable(&mut self) -> Result<(), HalError> {
        self.set_duty_ns(0)?;
        self.write("enable", 0)
    }

    fn set_duty_ns(&mut self, duty_ns: u64) -> Result<(), HalError> {
        if duty_ns == self.duty_ns {
            return Ok(());
        }
        self.write("duty_cycle", duty_ns)?;
        self.duty_ns = duty_ns;
        Ok(())
    }

    fn write(&self, attribute: &str, value: u64) -> Result<(), HalError> {
        let path = self.dir.join(attribute);
        fs::write(&path, value.to_string())
            .map_err(|e| HalError::Unavailable(format!("{}: {e}", path.display())))
    }
}

/// H-bridge motor with one channel per direction.
#[derive(Debug)]
pub struct PwmMotor {
    forward: PwmChannel,
    backward: PwmChannel,
}

impl PwmMotor {
    /// Open both direction channels.
    pub fn open(config: &MotorChannelConfig, period_ns: u64) -> Result<Self, HalError> {
        if config.forward == config.backward {
            return Err(HalError::ConfigError(format!(
                "forward and backward share channel {}",
                config.forward.display()
            )));
        }
        Ok(Self {
            forward: PwmChannel::open(&config.forward, period_ns)?,
            backward: PwmChannel::open(&config.backward, period_ns)?,
        })
    }

    /// Drive at `value` in `[-1, 1]`; the sign selects the direction.
    pub fn drive(&mut self, value: f64) -> Result<(), HalError> {
        // Drop the opposing side before raising the active one.
        if value >= 0.0 {
            self.backward.set_fraction(0.0)?;
            self.forward.set_fraction(value)
        } else {
            self.forward.set_fraction(0.0)?;
            self.backward.set_fraction(-value)
        }
    }

    /// Duty cycles `(forward, backward)` [ns].
    pub fn duty_ns(&self) -> (u64, u64) {
        (self.forward.duty_ns(), self.backward.duty_ns())
    }

    fn disable(&mut self) -> Result<(), HalError> {
        let forward = self.forward.disable();
        let backward = self.backward.disable();
        forward.and(backward)
    }
}

/// Steering and drive motors.
#[derive(Debug)]
pub struct PwmMotors {
    steer: PwmMotor,
    drive: PwmMotor,
}

impl PwmMotors {
    /// Open all four channels described by `config`.
    ///
    /// # Errors
    /// `HalError::Unavailable` if a channel is not exported or not writable.
    pub fn open(config: &MotorConfig) -> Result<Self, HalError> {
        let motors = Self {
            steer: PwmMotor::open(&config.steer, config.period_ns)?,
            drive: PwmMotor::open(&config.drive, config.period_ns)?,
        };
        info!(period_ns = config.period_ns, "PWM motors ready");
        Ok(motors)
    }

    /// Steering motor.
    pub fn steer(&self) -> &PwmMotor {
        &self.steer
    }

    /// Drive motor.
    pub fn drive(&self) -> &PwmMotor {
        &self.drive
    }
}

impl MotorActuator for PwmMotors {
    fn name(&self) -> &'static str {
        "sysfs_pwm"
    }

    fn set(&mut self, command: ActuationCommand) -> Result<(), HalError> {
        self.steer.drive(command.steer())?;
        self.drive.drive(command.throttle())
    }

    fn release(&mut self) -> Result<(), HalError> {
        let steer = self.steer.disable();
        let drive = self.drive.disable();
        if let Err(e) = &steer {
            warn!("Steering release failed: {e}");
        }
        steer.and(drive)
    }
}
