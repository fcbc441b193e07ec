//! Background sensor sampling and panel rendering.

use crate::coordinator::SharedSurface;
use crate::error::SensorError;
use crate::presenter::TelemetryPresenter;
use crate::sensor::SensorReader;
use rover_common::config::TelemetryConfig;
use rover_common::hal::types::Rgb;
use rover_common::signal::RunFlag;
use rover_common::telemetry::{TemperatureReading, TemperatureUnit};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Frame timing statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Frames completed.
    pub frames: u64,
    /// Frames that exceeded the budget.
    pub overruns: u64,
    /// Longest frame.
    pub max_frame: Duration,
    /// Sum of frame times, for the average.
    pub total_frame: Duration,
    /// Frames rendered and presented.
    pub rendered: u64,
}

impl FrameStats {
    /// Record one frame.
    #[inline]
    pub fn record(&mut self, elapsed: Duration, budget: Duration) {
        self.frames += 1;
        self.total_frame += elapsed;
        if elapsed > self.max_frame {
            self.max_frame = elapsed;
        }
        if elapsed > budget {
            self.overruns += 1;
        }
    }

    /// Average frame time (zero if no frames).
    pub fn avg_frame(&self) -> Duration {
        match u32::try_from(self.frames) {
            Ok(0) => Duration::ZERO,
            Ok(n) => self.total_frame / n,
            Err(_) => Duration::ZERO,
        }
    }
}

/// Fixed-rate pacing with overrun accounting.
#[derive(Debug, Clone)]
pub struct FramePacer {
    budget: Duration,
    stats: FrameStats,
}

impl FramePacer {
    /// Pacer for the given frame budget.
    pub fn new(budget: Duration) -> Self {
        Self {
            budget,
            stats: FrameStats::default(),
        }
    }

    /// Frame budget.
    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Statistics so far.
    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    /// Count a rendered frame.
    pub fn mark_rendered(&mut self) {
        self.stats.rendered += 1;
    }

    /// Close the frame started at `started` and return the slack left.
    pub fn finish(&mut self, started: Instant) -> Duration {
        let elapsed = started.elapsed();
        self.stats.record(elapsed, self.budget);

        if elapsed > self.budget {
            let n = self.stats.overruns;
            if n <= 10 || n % 1000 == 0 {
                warn!(
                    "Telemetry overrun #{n}: frame took {}us (budget {}us)",
                    elapsed.as_micros(),
                    self.budget.as_micros()
                );
            }
        }
        if self.stats.frames % 1000 == 0 {
            debug!(
                "Telemetry: {} frames, avg={}us, max={}us, overruns={}",
                self.stats.frames,
                self.stats.avg_frame().as_micros(),
                self.stats.max_frame.as_micros(),
                self.stats.overruns
            );
        }
        self.budget.saturating_sub(elapsed)
    }

    /// Close the frame and sleep out the slack.
    pub fn pace(&mut self, started: Instant) {
        let slack = self.finish(started);
        if !slack.is_zero() {
            thread::sleep(slack);
        }
    }
}

/// The telemetry loop.
///
/// Runs on its own thread; the only writer of the shared surface while the
/// system is running.
pub struct TelemetryLoop {
    reader: SensorReader,
    surface: SharedSurface,
    run_flag: RunFlag,
    presenter: TelemetryPresenter,
    unit: TemperatureUnit,
    pacer: FramePacer,
    displayed: Option<TemperatureReading>,
    sensor_online: bool,
    flip_failing: bool,
}

impl TelemetryLoop {
    /// Create a loop over a sensor and the shared surface.
    pub fn new(
        reader: SensorReader,
        surface: SharedSurface,
        run_flag: RunFlag,
        config: &TelemetryConfig,
    ) -> Self {
        Self {
            reader,
            surface,
            run_flag,
            presenter: TelemetryPresenter::new(),
            unit: config.unit,
            pacer: FramePacer::new(config.frame_budget()),
            displayed: None,
            sensor_online: true,
            flip_failing: false,
        }
    }

    /// Reading currently shown on the panel.
    pub fn displayed(&self) -> Option<TemperatureReading> {
        self.displayed
    }

    /// Run until the run flag is lowered or the surface is gone.
    pub fn run(mut self) -> FrameStats {
        info!(
            rate_hz = 1.0 / self.pacer.budget().as_secs_f64().max(f64::EPSILON),
            unit = self.unit.symbol(),
            "Telemetry loop running"
        );
        loop {
            let started = Instant::now();
            if !self.frame() {
                break;
            }
            self.pacer.pace(started);
        }
        let stats = *self.pacer.stats();
        info!(
            frames = stats.frames,
            overruns = stats.overruns,
            max_frame_us = stats.max_frame.as_micros() as u64,
            "Telemetry loop stopped"
        );
        stats
    }

    /// One frame without pacing. Returns `false` when the loop must exit.
    pub fn frame(&mut self) -> bool {
        if !self.run_flag.is_running() {
            return false;
        }
        self.sample();
        let lines = self.lines();

        let mut guard = self.surface.lock();
        if !self.run_flag.is_running() {
            return false;
        }
        let Some(surface) = guard.as_mut() else {
            return false;
        };
        surface.fill(Rgb::WHITE);
        self.presenter.render(&mut **surface, &lines);
        match surface.flip() {
            Ok(()) => {
                if self.flip_failing {
                    info!("Panel present recovered");
                    self.flip_failing = false;
                }
                self.pacer.mark_rendered();
            }
            Err(e) => {
                if !self.flip_failing {
                    warn!("Panel present failed: {e}");
                    self.flip_failing = true;
                }
            }
        }
        true
    }

    /// Lines shown on the panel for the current state.
    pub fn lines(&self) -> Vec<String> {
        let temperature = if !self.sensor_online {
            "Temperature: sensor unavailable".to_string()
        } else {
            match self.displayed {
                Some(reading) => format!(
                    "Temperature: {:.2} {}",
                    reading.in_unit(self.unit),
                    self.unit.symbol()
                ),
                None => "Temperature: --".to_string(),
            }
        };
        vec![temperature]
    }

    fn sample(&mut self) {
        match self.reader.read() {
            Ok(reading) => {
                if !self.sensor_online {
                    info!("Temperature sensor back online");
                    self.sensor_online = true;
                }
                if reading.valid {
                    self.displayed = Some(reading);
                }
            }
            Err(SensorError::Disconnected(cause)) => {
                if self.sensor_online {
                    warn!("Temperature sensor unavailable: {cause}");
                    self.sensor_online = false;
                }
            }
        }
    }
}
