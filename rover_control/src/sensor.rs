//! Temperature record decoding.
//!
//! The w1_therm driver answers each read with two lines:
//!
//! ```text
//! 72 01 4b 46 7f ff 0e 10 57 : crc=57 YES
//! 72 01 4b 46 7f ff 0e 10 57 t=23125
//! ```
//!
//! Line 1 ends with `YES` once the conversion has completed and the CRC
//! matched. Line 2 carries the value after `t=` in millidegrees Celsius.

use crate::error::SensorError;
use rover_common::consts::{W1_DATA_MARKER, W1_READY_MARKER};
use rover_common::hal::driver::SensorSource;
use rover_common::telemetry::TemperatureReading;
use tracing::trace;

/// Decode a raw two-line record.
///
/// Anything short of a complete, ready record yields
/// [`TemperatureReading::NOT_READY`].
pub fn parse_record(record: &str) -> TemperatureReading {
    let mut lines = record.lines();

    let Some(status) = lines.next() else {
        return TemperatureReading::NOT_READY;
    };
    if !status.trim_end().ends_with(W1_READY_MARKER) {
        return TemperatureReading::NOT_READY;
    }

    let Some(data) = lines.next() else {
        return TemperatureReading::NOT_READY;
    };
    let Some(pos) = data.find(W1_DATA_MARKER) else {
        return TemperatureReading::NOT_READY;
    };

    match data[pos + W1_DATA_MARKER.len()..].trim().parse::<i32>() {
        Ok(millidegrees) => TemperatureReading::ready(millidegrees),
        Err(_) => TemperatureReading::NOT_READY,
    }
}

/// Reads and decodes records from a sensor source.
pub struct SensorReader {
    source: Box<dyn SensorSource>,
}

impl SensorReader {
    /// Wrap a sensor source.
    pub fn new(source: Box<dyn SensorSource>) -> Self {
        Self { source }
    }

    /// Read the latest record.
    ///
    /// # Errors
    /// `SensorError::Disconnected` if the source cannot be read at all.
    pub fn read(&mut self) -> Result<TemperatureReading, SensorError> {
        let record = self
            .source
            .read_record()
            .map_err(|e| SensorError::Disconnected(e.to_string()))?;
        let reading = parse_record(&record);
        if !reading.valid {
            trace!("temperature record not ready");
        }
        Ok(reading)
    }
}
