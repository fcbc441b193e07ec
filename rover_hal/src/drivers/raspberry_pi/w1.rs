//! 1-Wire temperature probe via the kernel w1_therm driver.
//!
//! Devices appear under the bus directory as `<family>-<serial>`; the
//! DS18B20 family is `28`. Each read of the device data file triggers a
//! conversion and returns a two-line record.

use rover_common::config::SensorConfig;
use rover_common::hal::driver::{HalError, SensorSource};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Probe bound to one device data file.
#[derive(Debug)]
pub struct W1Sensor {
    data_path: PathBuf,
}

impl W1Sensor {
    /// Locate the first device matching the configured family prefix.
    ///
    /// Candidates are sorted by name so the choice is stable across boots.
    ///
    /// # Errors
    /// `HalError::DeviceNotFound` if the bus directory is missing or holds
    /// no matching device.
    pub fn discover(config: &SensorConfig) -> Result<Self, HalError> {
        let entries = fs::read_dir(&config.base_dir).map_err(|e| {
            HalError::DeviceNotFound(format!(
                "1-Wire bus {}: {e}",
                config.base_dir.display()
            ))
        })?;

        let mut candidates: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .filter(|entry| {
                entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| name.starts_with(config.device_prefix.as_str()))
            })
            .map(|entry| entry.path())
            .collect();
        candidates.sort();

        let device = candidates.into_iter().next().ok_or_else(|| {
            HalError::DeviceNotFound(format!(
                "no device with prefix '{}' under {}",
                config.device_prefix,
                config.base_dir.display()
            ))
        })?;

        debug!(device = %device.display(), "1-Wire device chosen");
        let data_path = device.join(&config.data_file);
        info!(path = %data_path.display(), "Temperature probe found");
        Ok(Self { data_path })
    }

    /// Bind to an explicit data file.
    pub fn at(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
        }
    }

    /// Path of the device data file.
    pub fn data_path(&self) -> &Path {
        &self.data_path
    }
}

impl SensorSource for W1Sensor {
    fn read_record(&mut self) -> Result<String, HalError> {
        fs::read_to_string(&self.data_path).map_err(|e| {
            HalError::CommunicationError(format!("{}: {e}", self.data_path.display()))
        })
    }
}
