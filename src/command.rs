//! IL0373 command definitions
//!
//! This module defines the opcode bytes understood by the IL0373 e-paper
//! controller. Opcodes are clocked with the DC line low, payload bytes with
//! the DC line high.
//!
//! ## Command Structure
//!
//! Every command follows the same framing:
//! 1. Assert CS (active low)
//! 2. Set DC low (command phase)
//! 3. Transfer the opcode byte
//! 4. Set DC high (data phase) and transfer payload bytes, if any
//! 5. Optionally deassert CS; otherwise later data transfers stay in the same frame
//!
//! ## Example
//!
//! ```rust,no_run
//! use il0373::{command, DisplayInterface};
//!
//! fn power_off<I: DisplayInterface>(interface: &mut I) -> Result<(), I::Error> {
//!     interface.command(command::VCM_DC_SETTING, Some(&[0x00]), true)?;
//!     interface.command(command::POWER_OFF, None, true)
//! }
//! ```

// Power and panel configuration

/// Panel setting command (0x00)
///
/// Selects resolution, LUT source, gate/source scan direction and booster state.
/// Requires 1 byte.
pub const PANEL_SETTING: u8 = 0x00;

/// Power setting command (0x01)
///
/// Selects internal/external power and the VGH/VGL/VDH/VDL levels.
/// Requires 5 bytes.
pub const POWER_SETTING: u8 = 0x01;

/// Power off command (0x02)
///
/// Turns off the booster, regulators and VCOM after the current refresh.
pub const POWER_OFF: u8 = 0x02;

/// Power off sequence setting command (0x03)
pub const POWER_OFF_SEQUENCE: u8 = 0x03;

/// Power on command (0x04)
///
/// Turns on the booster and regulators. BUSY is asserted until the rails are stable.
pub const POWER_ON: u8 = 0x04;

/// Power on measure command (0x05)
pub const POWER_ON_MEASURE: u8 = 0x05;

/// Booster soft-start command (0x06)
///
/// Requires 3 bytes, one per booster phase.
pub const BOOSTER_SOFT_START: u8 = 0x06;

/// Deep sleep command (0x07)
///
/// Requires the check code [`DEEP_SLEEP_CHECK`]. Only a hardware reset wakes the controller.
pub const DEEP_SLEEP: u8 = 0x07;

/// Check code that must follow [`DEEP_SLEEP`]
pub const DEEP_SLEEP_CHECK: u8 = 0xA5;

// Display RAM

/// Data start transmission 1 (0x10)
///
/// Streams the first RAM bank (black/white plane).
pub const DATA_TRANSFER_1: u8 = 0x10;

/// Data stop command (0x11)
pub const DATA_STOP: u8 = 0x11;

/// Display refresh command (0x12)
///
/// Drives the waveform for the current RAM contents. BUSY is asserted during refresh.
pub const DISPLAY_REFRESH: u8 = 0x12;

/// Data start transmission 2 (0x13)
///
/// Streams the second RAM bank (accent color plane).
pub const DATA_TRANSFER_2: u8 = 0x13;

/// Partial data start transmission 1 (0x14)
pub const PARTIAL_DATA_1: u8 = 0x14;

/// Partial data start transmission 2 (0x15)
pub const PARTIAL_DATA_2: u8 = 0x15;

/// Partial display refresh (0x16)
pub const PARTIAL_REFRESH: u8 = 0x16;

// Waveform look-up tables

/// VCOM LUT (0x20)
pub const LUT1: u8 = 0x20;

/// White-to-white LUT (0x21)
pub const LUT_WW: u8 = 0x21;

/// Black-to-white LUT (0x22)
pub const LUT_BW: u8 = 0x22;

/// White-to-black LUT (0x23)
pub const LUT_WB: u8 = 0x23;

/// Black-to-black LUT (0x24)
pub const LUT_BB: u8 = 0x24;

// Timing and analog

/// PLL control command (0x30)
///
/// Sets the frame rate. Requires 1 byte.
pub const PLL: u8 = 0x30;

/// VCOM and data interval setting (0x50)
///
/// Sets border behavior and the VCOM/data interval. Requires 1 byte.
pub const CHARGE_DISCHARGE_INTERVAL: u8 = 0x50;

/// Resolution setting command (0x61)
///
/// Requires 3 bytes: [width, height (MSB), height (LSB)]
pub const RESOLUTION: u8 = 0x61;

/// VCM DC setting command (0x82)
///
/// Requires 1 byte.
pub const VCM_DC_SETTING: u8 = 0x82;
