use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use color_eyre::{eyre::eyre, Result};
use tracing::{debug, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use psxpad::bus::hardware::RppalLines;
use psxpad::bus::lines::HostDelay;
use psxpad::config::PadConfig;
use psxpad::pad::driver::PadDriver;
use psxpad::pad::error::PadError;
use psxpad::pad::types::{ButtonSet, InputMode, ModeLock, PressureButton};

fn main() -> Result<()> {
    setup()?;

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("psxpad.toml"));
    let config = PadConfig::load(&config_path)?;

    // Pad initialisieren
    info!("Initializing pad driver");
    let lines = RppalLines::new(&config.pins)
        .map_err(|e| eyre!("Failed to open GPIO lines: {}", e))?;
    let mut pad = PadDriver::new(lines, HostDelay, config.driver_settings());

    // Give the pad a moment to power up before the first frame
    thread::sleep(Duration::from_millis(1000));
    info!("Entering poll loop");

    let interval = Duration::from_millis(config.poll_interval_ms);
    loop {
        thread::sleep(interval);

        let state = match pad.poll() {
            Ok(state) => *state,
            Err(PadError::PollRejected) => {
                debug!("pad busy in config mode, skipping tick");
                continue;
            }
            Err(e) => {
                warn!("poll failed: {}", e);
                continue;
            }
        };
        info!(
            "pad state: buttons={:#06x} r2_pressure={}",
            state.buttons(),
            state.pressure_of(PressureButton::R2)
        );

        // Mode switches ride on button chords, as a stand-in for a real
        // command source
        if state.is_pressed(ButtonSet::SQUARE) {
            log_mode_change("pressure off", pad.set_pressure_mode(false));
        }
        if state.is_pressed(ButtonSet::TRIANGLE) {
            log_mode_change("pressure on", pad.set_pressure_mode(true));
        }
        if state.is_pressed(ButtonSet::R1) {
            log_mode_change(
                "analog",
                pad.set_input_mode(InputMode::Analog, ModeLock::Unlocked),
            );
        }
        if state.is_pressed(ButtonSet::L1) {
            log_mode_change(
                "digital",
                pad.set_input_mode(InputMode::Digital, ModeLock::Unlocked),
            );
        }
    }
}

fn log_mode_change(label: &str, result: Result<(), PadError>) {
    match result {
        Ok(()) => info!("mode change applied: {}", label),
        Err(e) => warn!("mode change failed ({}): {}", label, e),
    }
}

fn setup() -> Result<()> {
    if std::env::var("RUST_LIB_BACKTRACE").is_err() {
        std::env::set_var("RUST_LIB_BACKTRACE", "0")
    }
    color_eyre::install()?;
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info")
    }
    setup_logging_env();
    Ok(())
}

fn setup_logging_env() {
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .pretty()
        .init();
}
