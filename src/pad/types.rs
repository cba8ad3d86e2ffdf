//! Buttons, axes and reporting modes.

use std::fmt;
use std::ops::BitOr;

use serde::{Deserialize, Serialize};

use crate::pad::protocol;

/// OR-combinable set of digital buttons.
///
/// The wire convention is active-low: a zero bit in the report means the
/// button is held. Combined sets test as pressed only when every member is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ButtonSet(u16);

impl ButtonSet {
    pub const SELECT: ButtonSet = ButtonSet(0x0100);
    pub const L3: ButtonSet = ButtonSet(0x0200);
    pub const R3: ButtonSet = ButtonSet(0x0400);
    pub const START: ButtonSet = ButtonSet(0x0800);
    pub const UP: ButtonSet = ButtonSet(0x1000);
    pub const RIGHT: ButtonSet = ButtonSet(0x2000);
    pub const DOWN: ButtonSet = ButtonSet(0x4000);
    pub const LEFT: ButtonSet = ButtonSet(0x8000);
    pub const L2: ButtonSet = ButtonSet(0x0001);
    pub const R2: ButtonSet = ButtonSet(0x0002);
    pub const L1: ButtonSet = ButtonSet(0x0004);
    pub const R1: ButtonSet = ButtonSet(0x0008);
    pub const TRIANGLE: ButtonSet = ButtonSet(0x0010);
    pub const CIRCLE: ButtonSet = ButtonSet(0x0020);
    pub const CROSS: ButtonSet = ButtonSet(0x0040);
    pub const SQUARE: ButtonSet = ButtonSet(0x0080);

    pub const fn bits(self) -> u16 {
        self.0
    }
}

impl BitOr for ButtonSet {
    type Output = ButtonSet;

    fn bitor(self, rhs: ButtonSet) -> ButtonSet {
        ButtonSet(self.0 | rhs.0)
    }
}

impl fmt::Display for ButtonSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#06x}", self.0)
    }
}

/// Analog stick axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnalogAxis {
    RightX,
    RightY,
    LeftX,
    LeftY,
}

/// Buttons with a pressure channel, in the fixed order of the report's
/// twelve-byte pressure block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PressureButton {
    DpadRight = 0,
    DpadLeft = 1,
    DpadUp = 2,
    DpadDown = 3,
    Triangle = 4,
    Circle = 5,
    Cross = 6,
    Square = 7,
    L1 = 8,
    R1 = 9,
    L2 = 10,
    R2 = 11,
}

impl PressureButton {
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Reporting mode selected over the switch-mode command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputMode {
    Digital,
    Analog,
}

impl InputMode {
    pub(crate) const fn wire_byte(self) -> u8 {
        match self {
            InputMode::Digital => 0x00,
            InputMode::Analog => 0x01,
        }
    }
}

/// Whether the pad's own mode button stays operable after a switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModeLock {
    Unlocked,
    Locked,
}

impl ModeLock {
    pub(crate) const fn wire_byte(self) -> u8 {
        match self {
            ModeLock::Unlocked => 0x00,
            ModeLock::Locked => 0x03,
        }
    }
}

/// Pad kind carried in the header's high nibble.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadKind {
    Digital,
    Analog,
    Config,
    Unknown(u8),
}

impl PadKind {
    pub const fn from_header(header: u8) -> PadKind {
        match header & protocol::KIND_MASK {
            protocol::KIND_DIGITAL => PadKind::Digital,
            protocol::KIND_ANALOG => PadKind::Analog,
            protocol::KIND_CONFIG => PadKind::Config,
            other => PadKind::Unknown(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_sets_or_together() {
        let combo = ButtonSet::L1 | ButtonSet::R1;
        assert_eq!(combo.bits(), 0x000C);
    }

    #[test]
    fn pressure_buttons_cover_the_whole_block() {
        assert_eq!(PressureButton::DpadRight.index(), 0);
        assert_eq!(PressureButton::R2.index(), 11);
    }

    #[test]
    fn pad_kind_comes_from_the_high_nibble() {
        assert_eq!(PadKind::from_header(0x41), PadKind::Digital);
        assert_eq!(PadKind::from_header(0x73), PadKind::Analog);
        assert_eq!(PadKind::from_header(0x79), PadKind::Analog);
        assert_eq!(PadKind::from_header(0xF3), PadKind::Config);
        assert_eq!(PadKind::from_header(0x23), PadKind::Unknown(0x20));
    }
}
