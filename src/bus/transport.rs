//! Byte exchange over the bus.
//!
//! One byte per call, least significant bit first: the command bit is driven
//! while the clock is high, the pad shifts its data bit out on the falling
//! edge and we sample it while the clock is low. The pad synchronizes
//! strictly by clock edge and bit index, so the loop never skips or reorders
//! a bit.

use tracing::{debug, trace};

use crate::bus::lines::{BusLines, Delay, InputLine, Level, OutputLine};

/// Bus timing knobs.
#[derive(Debug, Clone, Copy)]
pub struct BusTiming {
    /// Hold time for each clock phase, in microseconds.
    pub settle_us: u64,
    /// Upper bound on the acknowledge wait, in microseconds.
    pub ack_timeout_us: u64,
}

impl Default for BusTiming {
    fn default() -> Self {
        Self {
            settle_us: 5,
            ack_timeout_us: 100,
        }
    }
}

/// Transport errors.
#[derive(Debug, thiserror::Error)]
pub enum BusError {
    /// The pad never pulled the acknowledge line low. A disconnected or
    /// unpowered pad looks exactly like this.
    #[error("no acknowledge from the pad within {timeout_us} us")]
    AckTimeout { timeout_us: u64 },
}

/// Exclusive owner of the five bus lines.
///
/// Higher layers go through this handle for every edge, so a poll and a
/// mode switch can never interleave on the wire.
#[derive(Debug)]
pub struct BusTransport<L, D> {
    lines: L,
    delay: D,
    timing: BusTiming,
}

impl<L: BusLines, D: Delay> BusTransport<L, D> {
    pub fn new(lines: L, delay: D, timing: BusTiming) -> Self {
        Self {
            lines,
            delay,
            timing,
        }
    }

    /// Exchange one byte with the pad, LSB first.
    pub fn exchange_byte(&mut self, out: u8) -> u8 {
        let mut data = 0u8;
        for bit in 0..8 {
            // Command bit goes out while the clock is still high
            let level = if out & (1 << bit) != 0 {
                Level::High
            } else {
                Level::Low
            };
            self.lines.write(OutputLine::Command, level);
            self.delay.delay_us(self.timing.settle_us);
            // Falling edge; the pad shifts its bit onto the data line
            self.lines.write(OutputLine::Clock, Level::Low);
            self.delay.delay_us(self.timing.settle_us);
            if self.lines.read(InputLine::Data) == Level::High {
                data |= 1 << bit;
            }
            self.lines.write(OutputLine::Clock, Level::High);
        }
        trace!("byte exchanged: out={out:#04x} read={data:#04x}");
        data
    }

    /// Wait for the pad to request the next byte.
    ///
    /// The acknowledge line is polled once per microsecond up to the
    /// configured bound; a pad that never answers yields
    /// [`BusError::AckTimeout`] instead of hanging the caller.
    pub fn wait_for_ack(&mut self) -> Result<(), BusError> {
        let timeout_us = self.timing.ack_timeout_us;
        let mut waited = 0;
        while self.lines.read(InputLine::Ack) == Level::High {
            if waited >= timeout_us {
                debug!(timeout_us, "acknowledge wait timed out");
                return Err(BusError::AckTimeout { timeout_us });
            }
            self.delay.delay_us(1);
            waited += 1;
        }
        Ok(())
    }

    /// Select the pad for one command frame.
    pub fn assert_attention(&mut self) {
        self.lines.write(OutputLine::Attention, Level::Low);
    }

    /// Deselect the pad. Holds one settle time first so the final clock
    /// phase completes before the frame ends.
    pub fn release_attention(&mut self) {
        self.delay.delay_us(self.timing.settle_us);
        self.lines.write(OutputLine::Attention, Level::High);
    }

    /// Wait between two command frames.
    pub fn frame_gap(&mut self, gap_ms: u64) {
        self.delay.delay_ms(gap_ms);
    }

    pub fn lines_mut(&mut self) -> &mut L {
        &mut self.lines
    }
}
