//! Driver registry.
//!
//! Maps a driver name (e.g. `"simulation"`, `"raspberry_pi"`) to a factory
//! that builds the full [`Hardware`] bundle. Uses constructor injection
//! rather than global state.

use crate::hardware::Hardware;
use rover_common::config::RoverConfig;
use rover_common::hal::driver::HalError;
use rover_common::signal::QuitSignal;
use std::collections::HashMap;

/// Factory function building every collaborator for one backend.
///
/// The quit signal is handed to backends that can observe an operator quit
/// outside the input device (e.g. a window close button).
pub type HardwareFactory = fn(&RoverConfig, &QuitSignal) -> Result<Hardware, HalError>;

/// Registry of available hardware backends.
///
/// Constructed at startup, populated via `register()`. No global state,
/// testable in isolation.
pub struct DriverRegistry {
    factories: HashMap<&'static str, HardwareFactory>,
}

impl DriverRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Create a registry holding every built-in backend.
    pub fn with_builtin_drivers() -> Self {
        let mut registry = Self::new();
        crate::drivers::register_all_drivers(&mut registry);
        registry
    }

    /// Register a hardware factory.
    ///
    /// # Panics
    /// Panics if a driver with the same name is already registered.
    pub fn register(&mut self, name: &'static str, factory: HardwareFactory) {
        if self.factories.contains_key(name) {
            panic!("Driver '{name}' is already registered");
        }
        self.factories.insert(name, factory);
    }

    /// Get a factory by name.
    pub fn get_factory(&self, name: &str) -> Option<HardwareFactory> {
        self.factories.get(name).copied()
    }

    /// Build the hardware bundle for the named backend.
    ///
    /// # Errors
    /// `HalError::DriverNotFound` for an unknown name; otherwise whatever the
    /// backend reports while opening its devices.
    pub fn create_hardware(
        &self,
        name: &str,
        config: &RoverConfig,
        quit: &QuitSignal,
    ) -> Result<Hardware, HalError> {
        let factory = self
            .get_factory(name)
            .ok_or_else(|| HalError::DriverNotFound(name.to_string()))?;
        factory(config, quit)
    }

    /// List all registered driver names.
    pub fn list_drivers(&self) -> Vec<&'static str> {
        self.factories.keys().copied().collect()
    }
}

impl Default for DriverRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rover_common::hal::driver::{DisplaySurface, InputDevice};

    fn failing_factory(_: &RoverConfig, _: &QuitSignal) -> Result<Hardware, HalError> {
        Err(HalError::InitFailed("no hardware".to_string()))
    }

    #[test]
    fn registry_builtin_drivers() {
        let reg = DriverRegistry::with_builtin_drivers();
        let mut names = reg.list_drivers();
        names.sort();
        assert_eq!(names, vec!["raspberry_pi", "simulation"]);
    }

    #[test]
    fn registry_creates_simulation_hardware() {
        let reg = DriverRegistry::with_builtin_drivers();
        let hw = reg
            .create_hardware("simulation", &RoverConfig::default(), &QuitSignal::new())
            .expect("simulation hardware");
        assert_eq!(hw.input.name(), "simulation");
        assert_eq!(hw.display.size(), (500, 700));
    }

    #[test]
    fn registry_driver_not_found() {
        let reg = DriverRegistry::new();
        let result = reg.create_hardware("nonexistent", &RoverConfig::default(), &QuitSignal::new());
        assert!(matches!(result, Err(HalError::DriverNotFound(_))));
    }

    #[test]
    fn registry_propagates_factory_error() {
        let mut reg = DriverRegistry::new();
        reg.register("broken", failing_factory);
        let result = reg.create_hardware("broken", &RoverConfig::default(), &QuitSignal::new());
        assert!(matches!(result, Err(HalError::InitFailed(_))));
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn registry_duplicate_panics() {
        let mut reg = DriverRegistry::new();
        reg.register("dup", failing_factory);
        reg.register("dup", failing_factory);
    }
}
