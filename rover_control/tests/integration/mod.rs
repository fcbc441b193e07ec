mod end_to_end;
mod shutdown;
mod startup;

use rover_common::config::RoverConfig;
use rover_common::signal::QuitSignal;
use rover_control::{Coordinator, CoordinatorError, ShutdownReport};
use rover_hal::Hardware;
use rover_hal::drivers::simulation::{self, SimulationHandles};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Simulated rig with a coordinator ready to run.
pub struct Bench {
    pub coordinator: Coordinator,
    pub hardware: Hardware,
    pub handles: SimulationHandles,
    pub quit: QuitSignal,
}

impl Bench {
    pub fn new(config: RoverConfig) -> Self {
        let (hardware, handles) = simulation::rig(&config, false);
        let quit = QuitSignal::new();
        Self {
            coordinator: Coordinator::new(config, quit.clone()),
            hardware,
            handles,
            quit,
        }
    }

    /// Run on this thread while `driver` scripts the rig from another.
    pub fn run_with<T, F>(self, driver: F) -> (Result<ShutdownReport, CoordinatorError>, T)
    where
        T: Send + 'static,
        F: FnOnce(SimulationHandles, QuitSignal) -> T + Send + 'static,
    {
        let handles = self.handles.clone();
        let quit = self.quit.clone();
        let script: JoinHandle<T> = thread::spawn(move || driver(handles, quit));
        let result = self.coordinator.run(self.hardware);
        (result, script.join().unwrap())
    }
}

pub fn settle() {
    thread::sleep(Duration::from_millis(120));
}
