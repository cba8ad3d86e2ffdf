//! End-to-end protocol scenarios against the simulated pad.

use psxpad::bus::lines::NoopDelay;
use psxpad::bus::transport::BusError;
use psxpad::pad::driver::{DriverSettings, PadDriver};
use psxpad::pad::error::PadError;
use psxpad::pad::sim::SimulatedPad;
use psxpad::pad::state::AXIS_NEUTRAL;
use psxpad::pad::types::{AnalogAxis, ButtonSet, InputMode, ModeLock, PressureButton};

fn driver(sim: &mut SimulatedPad) -> PadDriver<&mut SimulatedPad, NoopDelay> {
    PadDriver::new(sim, NoopDelay, DriverSettings::default())
}

#[test]
fn digital_pad_reports_held_buttons() {
    let mut sim = SimulatedPad::digital();
    sim.hold_buttons(ButtonSet::CROSS | ButtonSet::UP);
    let mut pad = driver(&mut sim);

    let state = pad.poll().unwrap();
    assert!(state.is_pressed(ButtonSet::CROSS));
    assert!(state.is_pressed(ButtonSet::UP));
    assert!(state.is_pressed(ButtonSet::CROSS | ButtonSet::UP));
    assert!(!state.is_pressed(ButtonSet::CROSS | ButtonSet::CIRCLE));
    // Digital pads never expose real axis data
    assert_eq!(state.analog_axis(AnalogAxis::LeftX), AXIS_NEUTRAL);
}

#[test]
fn full_session_switches_modes_and_reads_pressure() {
    let mut sim = SimulatedPad::digital();
    sim.set_axes([0x40, 0xC0, 0x7F, 0x81]);
    sim.hold_buttons(ButtonSet::R2);
    sim.set_pressure(PressureButton::R2, 0xEE);
    let mut pad = driver(&mut sim);

    // Straight out of the box: digital
    assert_eq!(pad.poll().unwrap().header(), 0x41);

    pad.set_input_mode(InputMode::Analog, ModeLock::Locked).unwrap();
    let state = pad.poll().unwrap();
    assert_eq!(state.header(), 0x73);
    assert_eq!(state.analog_axis(AnalogAxis::RightX), 0x40);
    assert_eq!(state.analog_axis(AnalogAxis::RightY), 0xC0);

    pad.set_pressure_mode(true).unwrap();
    let state = pad.poll().unwrap();
    assert_eq!(state.header(), 0x79);
    assert!(state.is_pressed(ButtonSet::R2));
    assert_eq!(state.pressure_of(PressureButton::R2), 0xEE);
    assert_eq!(state.pressure_of(PressureButton::Cross), 0);

    pad.set_pressure_mode(false).unwrap();
    assert_eq!(pad.poll().unwrap().header(), 0x73);

    pad.set_input_mode(InputMode::Digital, ModeLock::Unlocked).unwrap();
    assert_eq!(pad.poll().unwrap().header(), 0x41);

    drop(pad);
    assert!(!sim.in_config_mode());
    assert!(!sim.is_locked());
}

#[test]
fn frame_lengths_follow_the_declared_header_nibble() {
    let mut sim = SimulatedPad::digital();
    {
        let mut pad = driver(&mut sim);
        pad.poll().unwrap();
        pad.set_input_mode(InputMode::Analog, ModeLock::Unlocked).unwrap();
        pad.poll().unwrap();
        pad.set_pressure_mode(true).unwrap();
        pad.poll().unwrap();
    }
    let poll_frames: Vec<usize> = sim
        .frames()
        .iter()
        .filter(|f| f.commands.get(1) == Some(&0x42))
        .map(|f| f.commands.len() - 3)
        .collect();
    // 2 * (header & 0x0F) for headers 0x41, 0x73, 0x79
    assert_eq!(poll_frames, vec![2, 6, 18]);
}

#[test]
fn pad_left_in_config_mode_rejects_polls_until_released() {
    let mut sim = SimulatedPad::digital();
    let mut pad = driver(&mut sim);

    pad.set_config_mode(true).unwrap();
    assert!(matches!(pad.poll(), Err(PadError::PollRejected)));
    // Recoverable: leave config mode and poll again
    pad.set_config_mode(false).unwrap();
    assert!(pad.poll().is_ok());
}

#[test]
fn unplugged_pad_times_out_on_every_operation() {
    let mut sim = SimulatedPad::absent();
    let mut pad = driver(&mut sim);

    for _ in 0..3 {
        assert!(matches!(
            pad.poll(),
            Err(PadError::Bus(BusError::AckTimeout { .. }))
        ));
    }
    assert!(matches!(
        pad.set_input_mode(InputMode::Analog, ModeLock::Unlocked),
        Err(PadError::Bus(BusError::AckTimeout { .. }))
    ));
}

#[test]
fn rejected_mode_change_still_leaves_config_mode() {
    let mut sim = SimulatedPad::digital();
    sim.ignore_config_entry();
    let mut pad = driver(&mut sim);

    assert!(matches!(
        pad.set_pressure_mode(true),
        Err(PadError::ModeChangeRejected { header: 0x41 })
    ));
    // The pad is pollable right after; nothing was left half-configured
    let state = pad.poll().unwrap();
    assert_eq!(state.header(), 0x41);
    drop(pad);
    assert!(!sim.pressure_enabled());
}
