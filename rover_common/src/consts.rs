//! System-wide constants for the rover workspace.
//!
//! Single source of truth for default timings, device paths and panel
//! geometry. Configuration defaults are built from these values.

use std::time::Duration;

/// Default telemetry frame rate [Hz].
pub const TELEMETRY_FRAME_RATE_HZ: u32 = 20;

/// Default telemetry frame budget (1 / 20 Hz).
pub const TELEMETRY_FRAME_BUDGET: Duration = Duration::from_millis(50);

/// Default idle wait after an empty input poll [ms].
pub const CONTROL_IDLE_WAIT_MS: u64 = 2;

/// Allowed idle wait range [ms].
pub const CONTROL_IDLE_WAIT_RANGE_MS: std::ops::RangeInclusive<u64> = 1..=5;

/// Default upper bound on input events drained per control iteration.
pub const MAX_EVENTS_PER_ITERATION: usize = 64;

/// Physical controller axis mapped to steering.
pub const STEER_AXIS: u8 = 2;

/// Physical controller axis mapped to throttle.
pub const THROTTLE_AXIS: u8 = 1;

/// Default bounded wait for the telemetry thread at shutdown [ms].
pub const TELEMETRY_JOIN_TIMEOUT_MS: u64 = 250;

/// Wait for an abandoned render to release the panel before closing it
/// in the background instead [ms].
pub const SURFACE_CLOSE_GRACE_MS: u64 = 100;

/// Default 1-Wire bus device directory.
pub const W1_BASE_DIR: &str = "/sys/bus/w1/devices";

/// Family-code prefix of DS18B20 temperature probes.
pub const W1_DEVICE_PREFIX: &str = "28";

/// Data file exposed by the w1_therm kernel driver.
pub const W1_DATA_FILE: &str = "w1_slave";

/// Ready-marker ending the first line of a completed conversion.
pub const W1_READY_MARKER: &str = "YES";

/// Marker preceding the temperature field on the second line.
pub const W1_DATA_MARKER: &str = "t=";

/// Default panel width [px].
pub const DISPLAY_WIDTH: u32 = 500;

/// Default panel height [px].
pub const DISPLAY_HEIGHT: u32 = 700;

/// Default window caption.
pub const DISPLAY_CAPTION: &str = "Output Panel";

/// Default PWM period for motor channels [ns] (1 kHz).
pub const MOTOR_PWM_PERIOD_NS: u64 = 1_000_000;

/// Default configuration file path.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/rover/rover.toml";
