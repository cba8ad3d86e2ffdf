//! Bit-banged PlayStation controller driver.
//!
//! [`bus`] exchanges bytes over the five-wire serial bus, [`pad`] speaks the
//! controller's command/response protocol on top of it, and [`config`] feeds
//! both from a TOML file. The runner in `main.rs` is thin glue: it polls at a
//! fixed cadence and logs what it sees.

pub mod bus;
pub mod config;
pub mod pad;

pub use crate::bus::transport::{BusError, BusTiming, BusTransport};
pub use crate::pad::driver::PadDriver;
pub use crate::pad::error::PadError;
pub use crate::pad::state::PadState;
pub use crate::pad::types::{AnalogAxis, ButtonSet, InputMode, ModeLock, PressureButton};
