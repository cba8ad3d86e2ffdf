//! Error definitions for the pad protocol.

use thiserror::Error;

use crate::bus::transport::BusError;
use crate::pad::protocol;

/// Error types for the pad driver and the query layer.
///
/// None of these are fatal: the polling loop is expected to retry on its
/// next tick.
#[derive(Debug, Error)]
pub enum PadError {
    /// Transport-level failure, passed through unchanged.
    #[error(transparent)]
    Bus(#[from] BusError),

    /// The pad was in config mode when a data poll was attempted. Expected
    /// and recoverable; leave config mode or retry later.
    #[error("data poll rejected: pad is in config mode")]
    PollRejected,

    /// A mode-change frame was refused: the negotiated header was not the
    /// config-mode marker, so the mode bytes were never sent.
    #[error("mode change rejected: header {header:#04x} is not the config marker")]
    ModeChangeRejected { header: u8 },

    /// Pressure index outside the twelve-byte block.
    #[error("pressure index {index} out of range (0..{})", protocol::PRESSURE_BYTES)]
    PressureIndexOutOfRange { index: usize },
}
