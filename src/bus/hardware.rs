//! rppal-backed line access for the real pins.

use rppal::gpio::{Gpio, InputPin, OutputPin};
use tracing::info;

use crate::bus::lines::{BusLines, InputLine, Level, OutputLine};
use crate::config::PinAssignment;

/// The five bus lines on the Pi's GPIO header.
///
/// Directions are fixed here, once: clock, command and attention are
/// push-pull outputs (clock and attention idle high), data and acknowledge
/// are inputs with the internal pull-ups enabled so an absent pad reads as
/// all-ones.
#[derive(Debug)]
pub struct RppalLines {
    clock: OutputPin,
    command: OutputPin,
    attention: OutputPin,
    data: InputPin,
    ack: InputPin,
}

impl RppalLines {
    pub fn new(pins: &PinAssignment) -> Result<Self, rppal::gpio::Error> {
        let gpio = Gpio::new()?;
        let lines = Self {
            clock: gpio.get(pins.clock)?.into_output_high(),
            command: gpio.get(pins.command)?.into_output_low(),
            attention: gpio.get(pins.attention)?.into_output_high(),
            data: gpio.get(pins.data)?.into_input_pullup(),
            ack: gpio.get(pins.ack)?.into_input_pullup(),
        };
        info!(
            clock = pins.clock,
            command = pins.command,
            attention = pins.attention,
            data = pins.data,
            ack = pins.ack,
            "bus lines configured"
        );
        Ok(lines)
    }
}

impl BusLines for RppalLines {
    fn write(&mut self, line: OutputLine, level: Level) {
        let pin = match line {
            OutputLine::Clock => &mut self.clock,
            OutputLine::Command => &mut self.command,
            OutputLine::Attention => &mut self.attention,
        };
        match level {
            Level::High => pin.set_high(),
            Level::Low => pin.set_low(),
        }
    }

    fn read(&mut self, line: InputLine) -> Level {
        let pin = match line {
            InputLine::Data => &self.data,
            InputLine::Ack => &self.ack,
        };
        if pin.is_high() {
            Level::High
        } else {
            Level::Low
        }
    }
}
