//! Start-up configuration applied by [`UnitDds::begin`](crate::UnitDds::begin).

use platform::I2cConfig;

use crate::registers::DEFAULT_I2C_ADDR;
use crate::types::{Bank, Mode};

/// Frequency programmed at start-up by default (10 kHz).
pub const DEFAULT_FREQUENCY_HZ: u32 = 10_000;

/// Bus settings for a unit at its factory address.
///
/// The bridge handles fast-mode I2C; the address is fixed in its firmware.
pub const fn default_i2c_config() -> I2cConfig {
    I2cConfig::fast_mode(DEFAULT_I2C_ADDR)
}

/// What `begin` should do once the unit has identified itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DdsConfig {
    /// Program and start the output in `begin`.
    pub start_output: bool,
    /// Output mode to start with
    pub mode: Mode,
    /// Bank to program and select
    pub bank: Bank,
    /// Frequency in Hz (0 to 1 MHz)
    pub frequency_hz: u32,
    /// Phase offset in degrees
    pub phase_deg: u16,
}

impl Default for DdsConfig {
    fn default() -> Self {
        Self {
            start_output: true,
            mode: Mode::Sine,
            bank: Bank::Bank0,
            frequency_hz: DEFAULT_FREQUENCY_HZ,
            phase_deg: 0,
        }
    }
}

impl DdsConfig {
    /// Only verify the unit's identity in `begin`; leave the output untouched.
    pub fn probe_only() -> Self {
        Self {
            start_output: false,
            ..Self::default()
        }
    }
}
