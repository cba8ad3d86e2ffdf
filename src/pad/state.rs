//! Decoded pad snapshot and the read-only query layer.

use crate::pad::error::PadError;
use crate::pad::protocol;
use crate::pad::types::{AnalogAxis, ButtonSet, PadKind, PressureButton};

/// Mid-scale axis value returned whenever the pad is not reporting analog.
pub const AXIS_NEUTRAL: u8 = 0x7F;

/// Snapshot of the pad's last successful report.
///
/// Rebuilt wholesale on every poll, never patched in place: fields not
/// covered by a short report stay at their released/neutral defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PadState {
    header: u8,
    buttons: u16,
    stick_right_x: u8,
    stick_right_y: u8,
    stick_left_x: u8,
    stick_left_y: u8,
    pressure: [u8; protocol::PRESSURE_BYTES],
}

impl Default for PadState {
    fn default() -> Self {
        Self {
            header: 0,
            // Active-low: all-ones means nothing pressed
            buttons: 0xFFFF,
            stick_right_x: AXIS_NEUTRAL,
            stick_right_y: AXIS_NEUTRAL,
            stick_left_x: AXIS_NEUTRAL,
            stick_left_y: AXIS_NEUTRAL,
            pressure: [0; protocol::PRESSURE_BYTES],
        }
    }
}

impl PadState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the snapshot with a freshly read report.
    ///
    /// `payload` is the raw frame after the three header bytes: buttons
    /// big-endian in `[0..2]`, right X/Y and left X/Y in `[2..6]`, the
    /// pressure block in `[6..18]`.
    pub(crate) fn decode(&mut self, header: u8, payload: &[u8]) {
        let mut next = PadState {
            header,
            ..PadState::default()
        };
        if payload.len() >= 2 {
            next.buttons = u16::from(payload[0]) << 8 | u16::from(payload[1]);
        }
        if payload.len() >= 6 {
            next.stick_right_x = payload[2];
            next.stick_right_y = payload[3];
            next.stick_left_x = payload[4];
            next.stick_left_y = payload[5];
        }
        if payload.len() >= 6 + protocol::PRESSURE_BYTES {
            next.pressure
                .copy_from_slice(&payload[6..6 + protocol::PRESSURE_BYTES]);
        }
        *self = next;
    }

    pub(crate) fn set_header(&mut self, header: u8) {
        self.header = header;
    }

    /// Last negotiated header byte.
    pub fn header(&self) -> u8 {
        self.header
    }

    pub fn kind(&self) -> PadKind {
        PadKind::from_header(self.header)
    }

    /// Raw active-low button mask.
    pub fn buttons(&self) -> u16 {
        self.buttons
    }

    /// True when every button in `set` is held.
    pub fn is_pressed(&self, set: ButtonSet) -> bool {
        self.buttons & set.bits() == 0
    }

    /// Stored axis value, or [`AXIS_NEUTRAL`] whenever the last header did
    /// not report analog mode. Stale axis bytes from an earlier analog
    /// report are never exposed.
    pub fn analog_axis(&self, axis: AnalogAxis) -> u8 {
        if self.kind() != PadKind::Analog {
            return AXIS_NEUTRAL;
        }
        match axis {
            AnalogAxis::RightX => self.stick_right_x,
            AnalogAxis::RightY => self.stick_right_y,
            AnalogAxis::LeftX => self.stick_left_x,
            AnalogAxis::LeftY => self.stick_left_y,
        }
    }

    /// Pressure reading for a button's channel.
    pub fn pressure_of(&self, button: PressureButton) -> u8 {
        self.pressure[button.index()]
    }

    /// Pressure reading by raw block index, validated at this boundary.
    pub fn pressure_at(&self, index: usize) -> Result<u8, PadError> {
        self.pressure
            .get(index)
            .copied()
            .ok_or(PadError::PressureIndexOutOfRange { index })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_frame() -> [u8; 18] {
        let mut frame = [0u8; 18];
        frame[0] = 0xFF;
        frame[1] = 0xFF;
        frame[2..6].copy_from_slice(&[0x80, 0x80, 0x80, 0x80]);
        frame
    }

    #[test]
    fn full_report_lands_on_fixed_offsets() {
        let mut state = PadState::new();
        state.decode(0x79, &full_frame());
        assert_eq!(state.buttons(), 0xFFFF);
        assert_eq!(state.analog_axis(AnalogAxis::RightX), 0x80);
        assert_eq!(state.analog_axis(AnalogAxis::LeftY), 0x80);
        for i in 0..12 {
            assert_eq!(state.pressure_at(i).unwrap(), 0);
        }
    }

    #[test]
    fn buttons_are_big_endian_and_active_low() {
        let mut state = PadState::new();
        // Select lives in the first payload byte, cross in the second
        state.decode(0x41, &[0xFE, 0xBF]);
        assert!(state.is_pressed(ButtonSet::SELECT));
        assert!(state.is_pressed(ButtonSet::CROSS));
        assert!(!state.is_pressed(ButtonSet::START));
    }

    #[test]
    fn combined_masks_need_every_member_held() {
        let mut state = PadState::new();
        let l1_only = !ButtonSet::L1.bits();
        state.decode(0x41, &[(l1_only >> 8) as u8, l1_only as u8]);
        assert!(state.is_pressed(ButtonSet::L1));
        assert!(!state.is_pressed(ButtonSet::L1 | ButtonSet::R1));
        let both = !(ButtonSet::L1 | ButtonSet::R1).bits();
        state.decode(0x41, &[(both >> 8) as u8, both as u8]);
        assert!(state.is_pressed(ButtonSet::L1 | ButtonSet::R1));
    }

    #[test]
    fn axes_read_neutral_outside_analog_mode() {
        let mut state = PadState::new();
        state.decode(0x73, &[0xFF, 0xFF, 0x10, 0x20, 0x30, 0x40]);
        assert_eq!(state.analog_axis(AnalogAxis::RightY), 0x20);
        // A digital report wipes the snapshot; stale axes must not leak
        state.decode(0x41, &[0xFF, 0xFF]);
        assert_eq!(state.analog_axis(AnalogAxis::RightY), AXIS_NEUTRAL);
        assert_eq!(state.analog_axis(AnalogAxis::LeftX), AXIS_NEUTRAL);
    }

    #[test]
    fn pressure_channels_follow_the_block_order() {
        let mut state = PadState::new();
        let mut frame = full_frame();
        frame[6 + PressureButton::Cross.index()] = 0xC0;
        frame[6 + PressureButton::R2.index()] = 0x55;
        state.decode(0x79, &frame);
        assert_eq!(state.pressure_of(PressureButton::Cross), 0xC0);
        assert_eq!(state.pressure_of(PressureButton::R2), 0x55);
        assert_eq!(state.pressure_of(PressureButton::DpadRight), 0);
    }

    #[test]
    fn out_of_range_pressure_index_is_rejected() {
        let state = PadState::new();
        assert!(state.pressure_at(11).is_ok());
        assert!(matches!(
            state.pressure_at(12),
            Err(PadError::PressureIndexOutOfRange { index: 12 })
        ));
    }

    #[test]
    fn short_report_leaves_released_defaults() {
        let mut state = PadState::new();
        state.decode(0x41, &[]);
        assert_eq!(state.buttons(), 0xFFFF);
        assert_eq!(state.pressure_of(PressureButton::Square), 0);
    }
}
