//! # Rover Control
//!
//! Teleop controller entry point. Loads `RoverConfig`, builds the hardware
//! bundle for the selected driver and runs the coordinator until the
//! operator quits (controller, window close or Ctrl-C).

use clap::Parser;
use rover_common::config::{ConfigError, RoverConfig};
use rover_common::consts::DEFAULT_CONFIG_PATH;
use rover_common::signal::QuitSignal;
use rover_control::Coordinator;
use rover_hal::DriverRegistry;
use std::path::{Path, PathBuf};
use std::process;
use tracing::{Level, error, info};
use tracing_subscriber::EnvFilter;

/// Rover teleop controller
#[derive(Parser, Debug)]
#[command(name = "rover_control")]
#[command(version)]
#[command(about = "Gamepad teleoperation with a temperature panel")]
struct Args {
    /// Path to the configuration TOML. Defaults to /etc/rover/rover.toml,
    /// which may be absent.
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Hardware driver to use. `raspberry_pi` needs a build with the
    /// `gamepad` feature for controller input.
    #[arg(long, default_value = "raspberry_pi")]
    driver: String,

    /// Use the simulation driver regardless of --driver.
    #[arg(short, long)]
    simulate: bool,

    /// Enable verbose logging (DEBUG level).
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format.
    #[arg(long)]
    json: bool,
}

fn main() {
    let args = Args::parse();

    let (config, from_file) = match load_config(args.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(e) => {
            setup_tracing(&args, Level::INFO);
            error!("FATAL: {e}");
            process::exit(1);
        }
    };
    setup_tracing(&args, config.shared.log_level.into());

    info!("Rover control v{} starting...", env!("CARGO_PKG_VERSION"));
    match &from_file {
        Some(path) => info!("Configuration loaded from {}", path.display()),
        None => info!("No configuration at {DEFAULT_CONFIG_PATH}, using defaults"),
    }

    if let Err(e) = run(&args, config) {
        error!("FATAL: {e}");
        process::exit(1);
    }

    info!("Rover control shutdown complete");
}

fn run(args: &Args, config: RoverConfig) -> Result<(), Box<dyn std::error::Error>> {
    let driver = if args.simulate {
        "simulation"
    } else {
        args.driver.as_str()
    };

    let quit = QuitSignal::new();
    let handler = quit.clone();
    ctrlc::set_handler(move || {
        info!("Received shutdown signal");
        handler.raise();
    })?;

    let registry = DriverRegistry::with_builtin_drivers();
    info!("Initializing '{driver}' hardware");
    let hardware = registry.create_hardware(driver, &config, &quit)?;

    let report = Coordinator::new(config, quit).run(hardware)?;
    info!(
        "Stopped after {} control iterations ({} commands)",
        report.control.iterations, report.control.commands
    );
    Ok(())
}

/// Load the configuration.
///
/// An explicit path must exist. The default path is optional; when it is
/// missing the built-in defaults apply. Returns the path actually read.
fn load_config(explicit: Option<&Path>) -> Result<(RoverConfig, Option<PathBuf>), ConfigError> {
    let path = explicit.unwrap_or(Path::new(DEFAULT_CONFIG_PATH));
    match RoverConfig::load_validated(path) {
        Ok(config) => Ok((config, Some(path.to_path_buf()))),
        Err(ConfigError::FileNotFound) if explicit.is_none() => Ok((RoverConfig::default(), None)),
        Err(e) => Err(e),
    }
}

fn setup_tracing(args: &Args, base: Level) {
    let level = if args.verbose { Level::DEBUG } else { base };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn explicit_missing_config_is_fatal() {
        let result = load_config(Some(Path::new("/nonexistent/rover.toml")));
        assert!(matches!(result, Err(ConfigError::FileNotFound)));
    }

    #[test]
    fn explicit_config_is_read() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[telemetry]\nframe_rate_hz = 10").unwrap();

        let (config, path) = load_config(Some(file.path())).unwrap();
        assert_eq!(config.telemetry.frame_rate_hz, 10);
        assert_eq!(path.as_deref(), Some(file.path()));
    }

    #[test]
    fn simulate_flag_parses() {
        let args = Args::parse_from(["rover_control", "-s", "--json"]);
        assert!(args.simulate);
        assert!(args.json);
        assert_eq!(args.driver, "raspberry_pi");
        assert!(args.config.is_none());
    }
}
