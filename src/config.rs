//! TOML configuration for the runner.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::bus::transport::BusTiming;
use crate::pad::driver::DriverSettings;

/// BCM numbers of the five bus lines.
#[derive(Deserialize, Serialize, Clone, Copy, Debug)]
#[serde(default)]
pub struct PinAssignment {
    pub clock: u8,
    pub command: u8,
    pub data: u8,
    pub attention: u8,
    pub ack: u8,
}

impl Default for PinAssignment {
    fn default() -> Self {
        // SPI0 header pins plus GPIO25 for acknowledge
        Self {
            clock: 11,
            command: 10,
            data: 9,
            attention: 8,
            ack: 25,
        }
    }
}

/// Protocol timing knobs.
#[derive(Deserialize, Serialize, Clone, Copy, Debug)]
#[serde(default)]
pub struct TimingConfig {
    /// Hold time for each clock phase, in microseconds.
    pub clock_settle_us: u64,
    /// Upper bound on each acknowledge wait, in microseconds.
    pub ack_timeout_us: u64,
    /// Quiet time before a config frame, in milliseconds.
    pub frame_gap_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            clock_settle_us: 5,
            ack_timeout_us: 100,
            frame_gap_ms: 5,
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Copy, Debug)]
#[serde(default)]
pub struct PadConfig {
    pub pins: PinAssignment,
    pub timing: TimingConfig,
    /// Poll cadence of the runner, in milliseconds.
    pub poll_interval_ms: u64,
}

impl Default for PadConfig {
    fn default() -> Self {
        Self {
            pins: PinAssignment::default(),
            timing: TimingConfig::default(),
            poll_interval_ms: 50,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

impl PadConfig {
    /// Load a config file, or fall back to the defaults when the path does
    /// not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            info!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)?;
        let config: PadConfig = toml::from_str(&raw)?;
        debug!(path = %path.display(), ?config, "config loaded");
        Ok(config)
    }

    pub fn driver_settings(&self) -> DriverSettings {
        DriverSettings {
            timing: BusTiming {
                settle_us: self.timing.clock_settle_us,
                ack_timeout_us: self.timing.ack_timeout_us,
            },
            frame_gap_ms: self.timing.frame_gap_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_fills_in_defaults() {
        let config: PadConfig = toml::from_str(
            r#"
            poll_interval_ms = 20

            [pins]
            ack = 24
            "#,
        )
        .unwrap();
        assert_eq!(config.poll_interval_ms, 20);
        assert_eq!(config.pins.ack, 24);
        assert_eq!(config.pins.clock, 11);
        assert_eq!(config.timing.clock_settle_us, 5);
    }

    #[test]
    fn settings_mirror_the_timing_section() {
        let mut config = PadConfig::default();
        config.timing.ack_timeout_us = 250;
        let settings = config.driver_settings();
        assert_eq!(settings.timing.ack_timeout_us, 250);
        assert_eq!(settings.frame_gap_ms, 5);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let config = PadConfig::load(Path::new("/nonexistent/psxpad.toml")).unwrap();
        assert_eq!(config.poll_interval_ms, 50);
    }
}
