//! Five-wire controller bus
//!
//! The PlayStation pad hangs off five logical lines: clock, command and
//! attention driven by us, data and acknowledge driven by the pad.
//!
//! ```text
//! DATA -|---__________--__|--
//!          0 1 2 3 4 5 6 7
//! CLK  -|-_-_-_-_-_-_-_-_-|--
//!        0 1 2 3 4 5 6 7
//! CMD  -|__--________--__-|--
//! ```
//!
//! 1. [`lines`] - line model and the GPIO/delay capability traits
//! 2. [`hardware`] - rppal-backed line access for the real pins
//! 3. [`transport`] - byte exchange and the bounded acknowledge wait
//!
//! Everything above this module works in whole bytes; everything below the
//! [`transport::BusTransport`] works in clock edges.

pub mod hardware;
pub mod lines;
pub mod transport;

pub use lines::{BusLines, Delay, HostDelay, InputLine, Level, NoopDelay, OutputLine};
pub use transport::{BusError, BusTiming, BusTransport};
