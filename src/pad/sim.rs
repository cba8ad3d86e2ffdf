//! Simulated pad for running the protocol without hardware.
//!
//! Implements [`BusLines`] at clock-edge level: command bits are latched on
//! the falling edge, response bits are presented for the low phase, a byte
//! completes on the eighth rising edge. The simulation keeps the same mode
//! state a real pad keeps (config, analog, pressure) and records every
//! attention-delimited frame it was served, so tests can assert exact frame
//! shapes. Pair it with [`NoopDelay`](crate::bus::lines::NoopDelay); the
//! simulation reacts to edges, not wall time.

use crate::bus::lines::{BusLines, InputLine, Level, OutputLine};
use crate::pad::protocol;
use crate::pad::types::{ButtonSet, PressureButton};

/// One attention-delimited frame as seen by the pad.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameRecord {
    /// Command bytes latched from the host, in order.
    pub commands: Vec<u8>,
    /// Acknowledge waits the host performed within the frame.
    pub ack_waits: usize,
}

/// Line-level simulation of a DualShock-style pad.
#[derive(Debug)]
pub struct SimulatedPad {
    present: bool,
    config_mode: bool,
    analog: bool,
    locked: bool,
    pressure: bool,
    ignore_config_entry: bool,
    header_override: Option<u8>,

    buttons: u16,
    axes: [u8; 4],
    pressure_values: [u8; protocol::PRESSURE_BYTES],

    attention_low: bool,
    clock: Level,
    command_level: Level,
    data_out: Level,
    bit_index: u8,
    cmd_shift: u8,
    tx_byte: u8,
    byte_pos: usize,
    ack_pending: u8,
    current: FrameRecord,
    frames: Vec<FrameRecord>,
}

impl SimulatedPad {
    fn new(present: bool, analog: bool) -> Self {
        Self {
            present,
            config_mode: false,
            analog,
            locked: false,
            pressure: false,
            ignore_config_entry: false,
            header_override: None,
            buttons: 0xFFFF,
            axes: [0x80; 4],
            pressure_values: [0; protocol::PRESSURE_BYTES],
            attention_low: false,
            clock: Level::High,
            command_level: Level::Low,
            data_out: Level::High,
            bit_index: 0,
            cmd_shift: 0,
            tx_byte: 0xFF,
            byte_pos: 0,
            ack_pending: 0,
            current: FrameRecord::default(),
            frames: Vec::new(),
        }
    }

    /// Pad in digital mode, nothing pressed.
    pub fn digital() -> Self {
        Self::new(true, false)
    }

    /// Pad already switched to analog mode, sticks centered.
    pub fn analog() -> Self {
        Self::new(true, true)
    }

    /// No pad on the bus: data and acknowledge float high.
    pub fn absent() -> Self {
        Self::new(false, false)
    }

    /// Hold the given buttons down (clears their active-low bits).
    pub fn hold_buttons(&mut self, set: ButtonSet) {
        self.buttons &= !set.bits();
    }

    pub fn release_all_buttons(&mut self) {
        self.buttons = 0xFFFF;
    }

    /// Stick positions as `[right_x, right_y, left_x, left_y]`.
    pub fn set_axes(&mut self, axes: [u8; 4]) {
        self.axes = axes;
    }

    pub fn set_pressure(&mut self, button: PressureButton, value: u8) {
        self.pressure_values[button.index()] = value;
    }

    /// Put the pad straight into (or out of) config mode.
    pub fn force_config_mode(&mut self, on: bool) {
        self.config_mode = on;
    }

    /// Drop config-entry commands on the floor, like a pad that never
    /// reached config mode. Exercises the mode-change rejection path.
    pub fn ignore_config_entry(&mut self) {
        self.ignore_config_entry = true;
    }

    /// Report this header byte regardless of mode. Lets tests declare
    /// nonsense payload lengths.
    pub fn override_header(&mut self, header: u8) {
        self.header_override = Some(header);
    }

    /// Frames completed so far.
    pub fn frames(&self) -> &[FrameRecord] {
        &self.frames
    }

    pub fn in_config_mode(&self) -> bool {
        self.config_mode
    }

    pub fn is_analog(&self) -> bool {
        self.analog
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn pressure_enabled(&self) -> bool {
        self.pressure
    }

    fn header(&self) -> u8 {
        if let Some(header) = self.header_override {
            return header;
        }
        if self.config_mode {
            protocol::HEADER_CONFIG
        } else if self.analog {
            if self.pressure {
                0x79
            } else {
                0x73
            }
        } else {
            0x41
        }
    }

    fn payload(&self) -> Vec<u8> {
        let mut payload = vec![(self.buttons >> 8) as u8, self.buttons as u8];
        if self.analog {
            payload.extend_from_slice(&self.axes);
            if self.pressure {
                payload.extend_from_slice(&self.pressure_values);
            }
        }
        payload
    }

    /// Response byte for frame position `pos` (0 is the wake-up slot).
    fn response_for(&self, pos: usize) -> u8 {
        match pos {
            0 => 0xFF,
            1 => self.header(),
            2 => protocol::HEADER_ACK,
            _ => match self.current.commands.get(1) {
                Some(&protocol::CMD_REQUEST_DATA) if !self.config_mode => {
                    self.payload().get(pos - 3).copied().unwrap_or(0xFF)
                }
                _ => 0xFF,
            },
        }
    }

    fn begin_frame(&mut self) {
        self.bit_index = 0;
        self.cmd_shift = 0;
        self.byte_pos = 0;
        self.tx_byte = self.response_for(0);
        self.ack_pending = 0;
        self.current = FrameRecord::default();
    }

    fn complete_byte(&mut self) {
        self.current.commands.push(self.cmd_shift);
        self.bit_index = 0;
        self.cmd_shift = 0;
        self.ack_pending = 1;
        self.byte_pos += 1;
        self.tx_byte = self.response_for(self.byte_pos);
    }

    /// Mode changes take effect when the frame ends, with attention.
    fn end_frame(&mut self) {
        let frame = std::mem::take(&mut self.current);
        let cmd = frame.commands.get(1).copied();
        let arg = frame.commands.get(3).copied();
        match cmd {
            Some(protocol::CMD_SET_CONFIG) => match arg {
                Some(protocol::CONFIG_ON) if !self.ignore_config_entry => {
                    self.config_mode = true;
                }
                Some(protocol::CONFIG_OFF) => self.config_mode = false,
                _ => {}
            },
            Some(protocol::CMD_SWITCH_MODE) if self.config_mode => {
                if let Some(mode) = arg {
                    self.analog = mode == 0x01;
                }
                if let Some(&lock) = frame.commands.get(4) {
                    self.locked = lock == 0x03;
                }
            }
            Some(protocol::CMD_PRESSURE_MODE) if self.config_mode => match arg {
                Some(protocol::PRESSURE_ON) => self.pressure = true,
                Some(protocol::PRESSURE_OFF) => self.pressure = false,
                _ => {}
            },
            _ => {}
        }
        self.frames.push(frame);
    }
}

impl BusLines for SimulatedPad {
    fn write(&mut self, line: OutputLine, level: Level) {
        match line {
            OutputLine::Attention => {
                if !self.present {
                    return;
                }
                if level == Level::Low && !self.attention_low {
                    self.attention_low = true;
                    self.begin_frame();
                } else if level == Level::High && self.attention_low {
                    self.attention_low = false;
                    self.end_frame();
                }
            }
            OutputLine::Command => self.command_level = level,
            OutputLine::Clock => {
                let previous = self.clock;
                self.clock = level;
                if !self.present || !self.attention_low {
                    return;
                }
                if previous == Level::High && level == Level::Low {
                    // Falling edge: latch the command bit, shift ours out
                    if self.command_level == Level::High {
                        self.cmd_shift |= 1 << self.bit_index;
                    }
                    self.data_out = if self.tx_byte & (1 << self.bit_index) != 0 {
                        Level::High
                    } else {
                        Level::Low
                    };
                } else if previous == Level::Low && level == Level::High {
                    self.bit_index += 1;
                    if self.bit_index == 8 {
                        self.complete_byte();
                    }
                }
            }
        }
    }

    fn read(&mut self, line: InputLine) -> Level {
        if !self.present {
            return Level::High;
        }
        match line {
            InputLine::Data => {
                if self.attention_low {
                    self.data_out
                } else {
                    Level::High
                }
            }
            InputLine::Ack => {
                if self.ack_pending > 0 {
                    self.ack_pending -= 1;
                    self.current.ack_waits += 1;
                    Level::Low
                } else {
                    Level::High
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Clock one byte through the simulation by hand.
    fn clock_byte(sim: &mut SimulatedPad, out: u8) -> u8 {
        let mut read = 0u8;
        for bit in 0..8 {
            let level = if out & (1 << bit) != 0 {
                Level::High
            } else {
                Level::Low
            };
            sim.write(OutputLine::Command, level);
            sim.write(OutputLine::Clock, Level::Low);
            if sim.read(InputLine::Data) == Level::High {
                read |= 1 << bit;
            }
            sim.write(OutputLine::Clock, Level::High);
        }
        read
    }

    #[test]
    fn header_frame_answers_marker_bytes() {
        let mut sim = SimulatedPad::digital();
        sim.write(OutputLine::Attention, Level::Low);
        assert_eq!(clock_byte(&mut sim, 0x01), 0xFF);
        assert_eq!(sim.read(InputLine::Ack), Level::Low);
        assert_eq!(clock_byte(&mut sim, 0x42), 0x41);
        assert_eq!(sim.read(InputLine::Ack), Level::Low);
        assert_eq!(clock_byte(&mut sim, 0x00), 0x5A);
        sim.write(OutputLine::Attention, Level::High);
        assert_eq!(sim.frames()[0].commands, vec![0x01, 0x42, 0x00]);
        assert_eq!(sim.frames()[0].ack_waits, 2);
    }

    #[test]
    fn edges_outside_a_frame_are_ignored() {
        let mut sim = SimulatedPad::digital();
        clock_byte(&mut sim, 0xFF);
        assert!(sim.frames().is_empty());
        assert_eq!(sim.read(InputLine::Ack), Level::High);
    }

    #[test]
    fn absent_pad_never_acknowledges() {
        let mut sim = SimulatedPad::absent();
        sim.write(OutputLine::Attention, Level::Low);
        assert_eq!(clock_byte(&mut sim, 0x01), 0xFF);
        assert_eq!(sim.read(InputLine::Ack), Level::High);
        sim.write(OutputLine::Attention, Level::High);
        assert!(sim.frames().is_empty());
    }
}
