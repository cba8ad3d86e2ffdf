//! PlayStation pad protocol
//!
//! Implements the pad's command/response protocol on top of the byte
//! transport:
//!
//! ```text
//! Bus lines ──► BusTransport ──► PadDriver ──► PadState
//!               (bytes)          (frames)      (queries)
//! ```
//!
//! 1. [`protocol`] - wire constants
//! 2. [`types`] - buttons, axes, modes
//! 3. [`state`] - decoded snapshot and the read-only query layer
//! 4. [`driver`] - command-frame sequencing
//! 5. [`sim`] - simulated pad for running without hardware

pub mod driver;
pub mod error;
pub mod protocol;
pub mod sim;
pub mod state;
pub mod types;

pub use driver::PadDriver;
pub use error::PadError;
pub use sim::SimulatedPad;
pub use state::PadState;
pub use types::{AnalogAxis, ButtonSet, InputMode, ModeLock, PressureButton};
