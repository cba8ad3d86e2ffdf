//! Command-frame sequencing for the pad.
//!
//! Every operation speaks one or more complete frames: attention is pulled
//! low, the bytes of the frame are exchanged in fixed order, attention is
//! released. The driver owns the transport exclusively, so frames can never
//! overlap and no caller can slip a raw byte into the middle of one.

use tracing::{debug, info, trace, warn};

use crate::bus::lines::{BusLines, Delay};
use crate::bus::transport::{BusTiming, BusTransport};
use crate::pad::error::PadError;
use crate::pad::protocol;
use crate::pad::state::PadState;
use crate::pad::types::{InputMode, ModeLock};

/// Driver settings.
#[derive(Debug, Clone, Copy)]
pub struct DriverSettings {
    pub timing: BusTiming,
    /// Quiet time before a config-frame's attention drop, in milliseconds.
    pub frame_gap_ms: u64,
}

impl Default for DriverSettings {
    fn default() -> Self {
        Self {
            timing: BusTiming::default(),
            frame_gap_ms: 5,
        }
    }
}

/// Sequencer for the pad's command/response protocol.
pub struct PadDriver<L, D> {
    bus: BusTransport<L, D>,
    state: PadState,
    frame_gap_ms: u64,
}

impl<L: BusLines, D: Delay> PadDriver<L, D> {
    pub fn new(lines: L, delay: D, settings: DriverSettings) -> Self {
        Self {
            bus: BusTransport::new(lines, delay, settings.timing),
            state: PadState::new(),
            frame_gap_ms: settings.frame_gap_ms,
        }
    }

    /// Last decoded snapshot.
    pub fn state(&self) -> &PadState {
        &self.state
    }

    /// Run one attention-bracketed frame. Attention is released on every
    /// path out, errors included; a frame aborts, it never half-ends.
    fn framed<T>(
        &mut self,
        body: impl FnOnce(&mut Self) -> Result<T, PadError>,
    ) -> Result<T, PadError> {
        self.bus.assert_attention();
        let res = body(self);
        self.bus.release_attention();
        res
    }

    /// Exchange the three header bytes of a frame.
    ///
    /// The response to the second exchange is the header; it is stored
    /// immediately, before the remaining acknowledge waits can fail.
    fn negotiate_header(&mut self, cmd: u8) -> Result<u8, PadError> {
        self.bus.exchange_byte(protocol::CMD_START);
        self.bus.wait_for_ack()?;
        let header = self.bus.exchange_byte(cmd);
        self.state.set_header(header);
        self.bus.wait_for_ack()?;
        self.bus.exchange_byte(protocol::CMD_IDLE);
        self.bus.wait_for_ack()?;
        trace!("header negotiated: cmd={cmd:#04x} header={header:#04x}");
        Ok(header)
    }

    /// Enter or leave config mode.
    ///
    /// Brackets [`set_input_mode`](Self::set_input_mode) and
    /// [`set_pressure_mode`](Self::set_pressure_mode); the pad refuses both
    /// unless it is already in config mode. Leaving emits the exit filler
    /// five times, with an acknowledge wait after each but the last.
    pub fn set_config_mode(&mut self, enable: bool) -> Result<(), PadError> {
        self.bus.frame_gap(self.frame_gap_ms);
        self.framed(|pad| {
            pad.negotiate_header(protocol::CMD_SET_CONFIG)?;
            let state_byte = if enable {
                protocol::CONFIG_ON
            } else {
                protocol::CONFIG_OFF
            };
            pad.bus.exchange_byte(state_byte);
            pad.bus.wait_for_ack()?;
            if enable {
                pad.bus.exchange_byte(protocol::CMD_IDLE);
            } else {
                for i in 0..5 {
                    pad.bus.exchange_byte(protocol::CONFIG_EXIT);
                    if i != 4 {
                        pad.bus.wait_for_ack()?;
                    }
                }
            }
            Ok(())
        })?;
        debug!(enable, "config mode frame sent");
        Ok(())
    }

    /// Switch between digital and analog reporting.
    pub fn set_input_mode(&mut self, mode: InputMode, lock: ModeLock) -> Result<(), PadError> {
        self.set_config_mode(true)?;
        let body = [
            mode.wire_byte(),
            lock.wire_byte(),
            protocol::CMD_IDLE,
            protocol::CMD_IDLE,
            protocol::CMD_IDLE,
            protocol::CMD_IDLE,
        ];
        let res = self.config_command(protocol::CMD_SWITCH_MODE, &body);
        let exit = self.set_config_mode(false);
        res?;
        exit?;
        info!(?mode, ?lock, "input mode switched");
        Ok(())
    }

    /// Enable or disable per-button pressure reporting.
    pub fn set_pressure_mode(&mut self, enable: bool) -> Result<(), PadError> {
        self.set_config_mode(true)?;
        let state_byte = if enable {
            protocol::PRESSURE_ON
        } else {
            protocol::PRESSURE_OFF
        };
        let body = [
            protocol::PRESSURE_MASKS[0] & state_byte,
            protocol::PRESSURE_MASKS[1] & state_byte,
            protocol::PRESSURE_MASKS[2] & state_byte,
            protocol::CMD_IDLE,
            protocol::CMD_IDLE,
            protocol::CMD_IDLE,
        ];
        let res = self.config_command(protocol::CMD_PRESSURE_MODE, &body);
        let exit = self.set_config_mode(false);
        res?;
        exit?;
        info!(enable, "pressure mode switched");
        Ok(())
    }

    /// One config-only command frame: header, marker check, body bytes with
    /// an acknowledge wait after each but the last.
    ///
    /// A pad that did not actually reach config mode answers with its
    /// regular header; the body is then withheld and the mismatch surfaces
    /// as [`PadError::ModeChangeRejected`] once the frame has closed.
    fn config_command(&mut self, cmd: u8, body: &[u8]) -> Result<(), PadError> {
        self.bus.frame_gap(self.frame_gap_ms);
        self.framed(|pad| {
            let header = pad.negotiate_header(cmd)?;
            if header != protocol::HEADER_CONFIG {
                warn!("mode change rejected: cmd={cmd:#04x} header={header:#04x}");
                return Err(PadError::ModeChangeRejected { header });
            }
            for (i, &byte) in body.iter().enumerate() {
                pad.bus.exchange_byte(byte);
                if i != body.len() - 1 {
                    pad.bus.wait_for_ack()?;
                }
            }
            Ok(())
        })
    }

    /// Request a report and decode it into the snapshot.
    ///
    /// The pad declares its own payload length in the header's low nibble;
    /// the declared value is clamped to the buffer capacity before any byte
    /// is read. A pad sitting in config mode cannot report buttons, which
    /// surfaces as [`PadError::PollRejected`] with zero payload bytes read.
    pub fn poll(&mut self) -> Result<&PadState, PadError> {
        self.framed(|pad| {
            let header = pad.negotiate_header(protocol::CMD_REQUEST_DATA)?;
            if header == protocol::HEADER_CONFIG {
                debug!("poll rejected: pad is in config mode");
                return Err(PadError::PollRejected);
            }
            let declared = 2 * usize::from(header & protocol::LEN_MASK);
            let cycles = if declared > protocol::MAX_FRAME_BYTES {
                warn!(
                    declared,
                    capacity = protocol::MAX_FRAME_BYTES,
                    "pad declared an oversized report, clamping"
                );
                protocol::MAX_FRAME_BYTES
            } else {
                declared
            };
            let mut raw = [0u8; protocol::MAX_FRAME_BYTES];
            for i in 0..cycles {
                raw[i] = pad.bus.exchange_byte(protocol::CMD_IDLE);
                // The pad does not acknowledge the final byte of a frame
                if i != cycles - 1 {
                    pad.bus.wait_for_ack()?;
                }
            }
            pad.state.decode(header, &raw[..cycles]);
            Ok(())
        })?;
        Ok(&self.state)
    }
}
