//! Thread lifecycle and ordered teardown.
//!
//! ```text
//! Hardware ──► shared surface + RunFlag ──► spawn "telemetry"
//!          ──► ControlLoop::run (this thread) ──► lower RunFlag
//!          ──► wait for telemetry (bounded) ──► close surface under lock
//!                                                 (bounded if abandoned)
//! ```

use crate::control::{ControlLoop, ControlStats};
use crate::error::CoordinatorError;
use crate::sensor::SensorReader;
use crate::telemetry::{FrameStats, TelemetryLoop};
use crossbeam::channel::{self, RecvTimeoutError};
use parking_lot::Mutex;
use rover_common::config::RoverConfig;
use rover_common::consts::SURFACE_CLOSE_GRACE_MS;
use rover_common::hal::driver::DisplaySurface;
use rover_common::signal::{QuitSignal, RunFlag};
use rover_hal::Hardware;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

/// Display surface shared between telemetry and teardown.
///
/// `None` once the surface has been closed.
pub type SharedSurface = Arc<Mutex<Option<Box<dyn DisplaySurface>>>>;

/// Wrap a display for sharing.
pub fn shared_surface(display: Box<dyn DisplaySurface>) -> SharedSurface {
    Arc::new(Mutex::new(Some(display)))
}

/// What happened to the telemetry thread at shutdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TelemetryExit {
    /// Signalled completion within the timeout.
    Stopped(FrameStats),
    /// Did not signal in time and was left running.
    Abandoned,
    /// Ended without signalling (panicked).
    Crashed,
}

/// Summary returned after an orderly shutdown.
#[derive(Debug, Clone, Copy)]
pub struct ShutdownReport {
    /// Control loop counters.
    pub control: ControlStats,
    /// Telemetry thread outcome.
    pub telemetry: TelemetryExit,
    /// Time from lowering the run flag to the telemetry outcome.
    pub telemetry_wait: Duration,
    /// `false` when an abandoned render still held the surface and the
    /// close was handed to a background thread.
    pub surface_closed: bool,
}

/// Owns the run flag and sequences both loops.
pub struct Coordinator {
    config: RoverConfig,
    run_flag: RunFlag,
    quit: QuitSignal,
}

impl Coordinator {
    /// Create a coordinator. `quit` is observed by the control loop.
    pub fn new(config: RoverConfig, quit: QuitSignal) -> Self {
        Self {
            config,
            run_flag: RunFlag::new(),
            quit,
        }
    }

    /// The run flag both loops observe.
    pub fn run_flag(&self) -> RunFlag {
        self.run_flag.clone()
    }

    /// Run both loops until the control loop stops, then tear down.
    ///
    /// # Errors
    /// - `CoordinatorError::Spawn` if the telemetry thread cannot start
    /// - `CoordinatorError::Control` if the control loop stopped on a fatal
    ///   error; teardown has completed by then
    pub fn run(&self, hardware: Hardware) -> Result<ShutdownReport, CoordinatorError> {
        let Hardware {
            input,
            motors,
            sensor,
            display,
        } = hardware;

        let surface = shared_surface(display);
        let telemetry = TelemetryLoop::new(
            SensorReader::new(sensor),
            surface.clone(),
            self.run_flag.clone(),
            &self.config.telemetry,
        );

        let (done_tx, done_rx) = channel::bounded::<FrameStats>(1);
        let spawned = thread::Builder::new()
            .name("telemetry".to_string())
            .spawn(move || {
                let stats = telemetry.run();
                let _ = done_tx.send(stats);
            });
        let handle = match spawned {
            Ok(handle) => handle,
            Err(e) => {
                self.run_flag.lower();
                close_surface(&surface);
                return Err(CoordinatorError::Spawn(e));
            }
        };

        let mut control = ControlLoop::new(
            input,
            motors,
            self.config.control.clone(),
            self.run_flag.clone(),
            self.quit.clone(),
        );
        let outcome = control.run();
        self.run_flag.lower();
        let lowered_at = Instant::now();

        let timeout = self.config.telemetry.join_timeout();
        let telemetry = match done_rx.recv_timeout(timeout) {
            Ok(stats) => {
                join_telemetry(handle);
                TelemetryExit::Stopped(stats)
            }
            Err(RecvTimeoutError::Timeout) => {
                warn!(
                    "Telemetry thread did not stop within {}ms, abandoning it",
                    timeout.as_millis()
                );
                TelemetryExit::Abandoned
            }
            Err(RecvTimeoutError::Disconnected) => {
                join_telemetry(handle);
                error!("Telemetry thread ended without signalling");
                TelemetryExit::Crashed
            }
        };
        let telemetry_wait = lowered_at.elapsed();

        let surface_closed = match telemetry {
            TelemetryExit::Abandoned => close_surface_within(&surface, SURFACE_CLOSE_GRACE),
            _ => {
                close_surface(&surface);
                true
            }
        };
        if !surface_closed {
            defer_close(surface);
        }

        let report = ShutdownReport {
            control: control.stats(),
            telemetry,
            telemetry_wait,
            surface_closed,
        };
        report.log();
        outcome?;
        Ok(report)
    }
}

impl ShutdownReport {
    fn log(&self) {
        let (frames, overruns, max_frame_us) = match self.telemetry {
            TelemetryExit::Stopped(stats) => (
                stats.frames,
                stats.overruns,
                stats.max_frame.as_micros() as u64,
            ),
            _ => (0, 0, 0),
        };
        info!(
            iterations = self.control.iterations,
            commands = self.control.commands,
            frames,
            overruns,
            max_frame_us,
            telemetry = self.telemetry_state(),
            telemetry_wait_ms = self.telemetry_wait.as_millis() as u64,
            surface_closed = self.surface_closed,
            "Shutdown complete"
        );
    }

    fn telemetry_state(&self) -> &'static str {
        match self.telemetry {
            TelemetryExit::Stopped(_) => "stopped",
            TelemetryExit::Abandoned => "abandoned",
            TelemetryExit::Crashed => "crashed",
        }
    }
}

/// How long teardown waits for an abandoned render to release the surface.
const SURFACE_CLOSE_GRACE: Duration = Duration::from_millis(SURFACE_CLOSE_GRACE_MS);

fn join_telemetry(handle: JoinHandle<()>) {
    if handle.join().is_err() {
        warn!("Telemetry thread panicked");
    }
}

fn close_surface(surface: &SharedSurface) {
    let mut guard = surface.lock();
    close_taken(&mut guard);
}

/// Close the surface unless a render holds it longer than `grace`.
///
/// Returns `false` if the lock could not be taken; the surface is untouched.
fn close_surface_within(surface: &SharedSurface, grace: Duration) -> bool {
    match surface.try_lock_for(grace) {
        Some(mut guard) => {
            close_taken(&mut guard);
            true
        }
        None => {
            warn!(
                "Display still held by abandoned telemetry after {}ms, closing it in the background",
                grace.as_millis()
            );
            false
        }
    }
}

/// Close once the abandoned render lets go. The run flag is already lowered,
/// so that render is its last.
fn defer_close(surface: SharedSurface) {
    let spawned = thread::Builder::new()
        .name("display-close".to_string())
        .spawn(move || close_surface(&surface));
    if let Err(e) = spawned {
        warn!("Could not start display close thread: {e}");
    }
}

fn close_taken(slot: &mut Option<Box<dyn DisplaySurface>>) {
    if let Some(mut display) = slot.take() {
        if let Err(e) = display.close() {
            warn!("Display close failed: {e}");
        }
    }
}
