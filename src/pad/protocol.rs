//! Wire constants of the pad protocol.

/// First byte of every frame; the pad wakes up and starts listening.
pub const CMD_START: u8 = 0x01;
/// Request a button/axis report.
pub const CMD_REQUEST_DATA: u8 = 0x42;
/// Enter or leave config mode.
pub const CMD_SET_CONFIG: u8 = 0x43;
pub const CONFIG_ON: u8 = 0x01;
pub const CONFIG_OFF: u8 = 0x00;
/// Filler repeated five times when leaving config mode.
pub const CONFIG_EXIT: u8 = 0x5A;
/// Switch between analog and digital reporting. Config mode only.
pub const CMD_SWITCH_MODE: u8 = 0x44;
/// Enable or disable per-button pressure reporting. Config mode only.
pub const CMD_PRESSURE_MODE: u8 = 0x4F;
/// Masks AND-ed with the enable byte in the pressure-mode frame.
pub const PRESSURE_MASKS: [u8; 3] = [0xFF, 0xFF, 0x03];
pub const PRESSURE_ON: u8 = 0xFF;
pub const PRESSURE_OFF: u8 = 0x00;
/// Idle filler clocked out while reading response bytes.
pub const CMD_IDLE: u8 = 0x00;

/// Header reported while the pad is in config mode.
pub const HEADER_CONFIG: u8 = 0xF3;
/// Third header byte; the pad's "ready to talk" marker.
pub const HEADER_ACK: u8 = 0x5A;

/// High-nibble pad kinds carried in the header byte.
pub const KIND_DIGITAL: u8 = 0x40;
pub const KIND_ANALOG: u8 = 0x70;
pub const KIND_CONFIG: u8 = 0xF0;
pub const KIND_MASK: u8 = 0xF0;
/// Low nibble of the header is the payload length in 16-bit words.
pub const LEN_MASK: u8 = 0x0F;

/// Capacity of the raw response buffer, in bytes.
pub const MAX_FRAME_BYTES: usize = 21;
/// Size of the per-button pressure block.
pub const PRESSURE_BYTES: usize = 12;
