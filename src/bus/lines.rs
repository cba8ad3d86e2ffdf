//! Line model and capability traits for the controller bus.
//!
//! [`BusLines`] is the seam between the protocol code and the physical pins:
//! the real backend lives in [`crate::bus::hardware`], the simulated pad in
//! [`crate::pad::sim`]. Line directions are fixed when a backend is
//! constructed, so the type split between [`OutputLine`] and [`InputLine`]
//! is the whole direction story.

use std::thread;
use std::time::{Duration, Instant};

/// Logical level of a bus line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

/// Lines driven by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputLine {
    /// Serial clock, idle high.
    Clock,
    /// Command bits towards the pad, valid while the clock is high.
    Command,
    /// Frame select, asserted low for the whole command frame.
    Attention,
}

/// Lines driven by the pad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputLine {
    /// Response bits from the pad, sampled while the clock is low.
    Data,
    /// Pulled low briefly by the pad to request the next byte.
    Ack,
}

/// GPIO capability over the five bus lines.
///
/// Writes and reads are infallible: a backend that can fail to construct
/// reports that from its constructor, not per edge.
pub trait BusLines {
    fn write(&mut self, line: OutputLine, level: Level);
    fn read(&mut self, line: InputLine) -> Level;
}

/// Microsecond-granularity delay provider.
///
/// Injected next to [`BusLines`] so tests can run the protocol without
/// real-time waits.
pub trait Delay {
    fn delay_us(&mut self, us: u64);

    fn delay_ms(&mut self, ms: u64) {
        self.delay_us(ms * 1000);
    }
}

impl<L: BusLines + ?Sized> BusLines for &mut L {
    fn write(&mut self, line: OutputLine, level: Level) {
        (**self).write(line, level);
    }

    fn read(&mut self, line: InputLine) -> Level {
        (**self).read(line)
    }
}

impl<D: Delay + ?Sized> Delay for &mut D {
    fn delay_us(&mut self, us: u64) {
        (**self).delay_us(us);
    }
}

/// Delay provider for the real bus.
///
/// Sub-millisecond waits spin on [`Instant`] because `thread::sleep` is far
/// too coarse for the 5 µs clock phases; longer waits sleep.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostDelay;

impl Delay for HostDelay {
    fn delay_us(&mut self, us: u64) {
        if us >= 1000 {
            thread::sleep(Duration::from_micros(us));
        } else {
            let end = Instant::now() + Duration::from_micros(us);
            while Instant::now() < end {
                std::hint::spin_loop();
            }
        }
    }
}

/// Delay provider that does not wait. Pairs with the simulated pad, which
/// reacts to edges instead of wall time.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDelay;

impl Delay for NoopDelay {
    fn delay_us(&mut self, _us: u64) {}
}
