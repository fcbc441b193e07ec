//! Simulated 1-Wire temperature probe.
//!
//! Produces records in the w1_therm format:
//!
//! ```text
//! 72 01 4b 46 7f ff 0e 10 57 : crc=57 YES
//! 72 01 4b 46 7f ff 0e 10 57 t=23125
//! ```

use parking_lot::Mutex;
use rover_common::hal::driver::{HalError, SensorSource};
use std::sync::Arc;

const SCRATCHPAD: &str = "72 01 4b 46 7f ff 0e 10 57";

#[derive(Debug)]
struct ProbeState {
    millidegrees: i32,
    ready: bool,
    connected: bool,
    not_ready_every: Option<u64>,
    reads: u64,
}

/// Control handle for [`SimulatedSensor`]. Cheap to clone.
#[derive(Debug, Clone)]
pub struct SensorProbe(Arc<Mutex<ProbeState>>);

/// Sensor source generating w1_therm records.
pub struct SimulatedSensor {
    probe: SensorProbe,
}

impl SimulatedSensor {
    /// Create a connected, ready probe reporting `millidegrees`.
    pub fn new(millidegrees: i32) -> (Self, SensorProbe) {
        let probe = SensorProbe(Arc::new(Mutex::new(ProbeState {
            millidegrees,
            ready: true,
            connected: true,
            not_ready_every: None,
            reads: 0,
        })));
        (
            Self {
                probe: probe.clone(),
            },
            probe,
        )
    }
}

impl SensorSource for SimulatedSensor {
    fn read_record(&mut self) -> Result<String, HalError> {
        let mut state = self.probe.0.lock();
        state.reads += 1;
        if !state.connected {
            return Err(HalError::CommunicationError(
                "simulated probe disconnected".to_string(),
            ));
        }
        let in_flight = state
            .not_ready_every
            .is_some_and(|n| n > 0 && state.reads % n == 0);
        let marker = if state.ready && !in_flight { "YES" } else { "NO" };
        Ok(format!(
            "{SCRATCHPAD} : crc=57 {marker}\n{SCRATCHPAD} t={}\n",
            state.millidegrees
        ))
    }
}

impl SensorProbe {
    /// Change the reported temperature [m°C].
    pub fn set_temperature(&self, millidegrees: i32) {
        self.0.lock().millidegrees = millidegrees;
    }

    /// Mark conversions as complete (`YES`) or in flight (`NO`).
    pub fn set_ready(&self, ready: bool) {
        self.0.lock().ready = ready;
    }

    /// Report every Nth read as not ready.
    pub fn set_not_ready_every(&self, n: Option<u64>) {
        self.0.lock().not_ready_every = n;
    }

    /// Make reads fail as if the probe was unplugged.
    pub fn disconnect(&self) {
        self.0.lock().connected = false;
    }

    /// Undo [`disconnect`](Self::disconnect).
    pub fn reconnect(&self) {
        self.0.lock().connected = true;
    }

    /// Number of read attempts so far.
    pub fn reads(&self) -> u64 {
        self.0.lock().reads
    }
}
