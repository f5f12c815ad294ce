//! DDS domain types.
//!
//! - [`Mode`]: output waveform, the low 3 bits of the mode register
//! - [`Bank`]: one of the two frequency / phase register slots
//! - [`ControlRegister`]: typed view over the control byte
//! - [`Description`]: identity string read from the unit

use crate::registers::{
    CONTROL_FREQ_SELECT, CONTROL_PHASE_SELECT, CONTROL_RESET, CONTROL_SLEEP_DAC,
    CONTROL_SLEEP_MASK, CONTROL_SLEEP_MCLK, CONTROL_WAKE_MASK, DESCRIPTION_LEN,
    EXPECTED_DESCRIPTION, MODE_MASK, TAG_BANK0, TAG_BANK1,
};

// ── Mode ─────────────────────────────────────────────────────────────────────

/// Output mode.
///
/// `Sawtooth` and `Dc` are extensions implemented by the bridge firmware.
/// They run at a fixed internal frequency and phase and ignore the bank
/// registers; entering either one zeroes the chip's frequency latches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Mode {
    /// Uninitialised / unknown. Never written on purpose.
    #[default]
    Reserved = 0,
    /// Sine wave
    Sine = 1,
    /// Triangle wave
    Triangle = 2,
    /// Square wave
    Square = 3,
    /// Sawtooth wave (fixed frequency and phase)
    Sawtooth = 4,
    /// DC level (fixed)
    Dc = 5,
}

impl Mode {
    /// Every mode that can be selected for output, in register order.
    pub const OUTPUTS: [Mode; 5] = [
        Mode::Sine,
        Mode::Triangle,
        Mode::Square,
        Mode::Sawtooth,
        Mode::Dc,
    ];

    /// Decode the mode register.
    ///
    /// Only bits \[2:0\] are significant. Field values 6 and 7 are not
    /// assigned and decode to [`Mode::Reserved`].
    pub const fn from_bits(raw: u8) -> Self {
        match raw & MODE_MASK {
            1 => Mode::Sine,
            2 => Mode::Triangle,
            3 => Mode::Square,
            4 => Mode::Sawtooth,
            5 => Mode::Dc,
            _ => Mode::Reserved,
        }
    }

    /// Mode field value.
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Whether the mode ignores the frequency and phase banks.
    pub const fn is_fixed_output(self) -> bool {
        matches!(self, Mode::Sawtooth | Mode::Dc)
    }

    /// Human-readable name.
    pub const fn name(self) -> &'static str {
        match self {
            Mode::Reserved => "Reserved",
            Mode::Sine => "Sine",
            Mode::Triangle => "Triangle",
            Mode::Square => "Square",
            Mode::Sawtooth => "Sawtooth",
            Mode::Dc => "DC",
        }
    }
}

impl core::fmt::Display for Mode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

// ── Bank ─────────────────────────────────────────────────────────────────────

/// Frequency or phase register slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Bank {
    /// FREQ0 / PHASE0
    #[default]
    Bank0,
    /// FREQ1 / PHASE1
    Bank1,
}

impl Bank {
    /// Both banks, bank 0 first.
    pub const ALL: [Bank; 2] = [Bank::Bank0, Bank::Bank1];

    /// `true` for bank 1.
    pub const fn is_bank1(self) -> bool {
        matches!(self, Bank::Bank1)
    }

    /// Leading-byte tag addressing this bank in the frequency/phase registers.
    pub const fn tag(self) -> u8 {
        match self {
            Bank::Bank0 => TAG_BANK0,
            Bank::Bank1 => TAG_BANK1,
        }
    }

    /// The other bank.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Bank::Bank0 => Bank::Bank1,
            Bank::Bank1 => Bank::Bank0,
        }
    }
}

impl From<bool> for Bank {
    /// `false` selects bank 0, `true` selects bank 1.
    fn from(select: bool) -> Self {
        if select {
            Bank::Bank1
        } else {
            Bank::Bank0
        }
    }
}

// ── ControlRegister ──────────────────────────────────────────────────────────

/// Typed view over the control register byte.
///
/// Builders only touch their own bits, so read-modify-write sequences keep
/// every other bit exactly as read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct ControlRegister(u8);

impl ControlRegister {
    /// Wrap a raw control byte.
    pub const fn from_bits(raw: u8) -> Self {
        Self(raw)
    }

    /// Raw control byte (without the write marker).
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Frequency bank currently driving the output.
    pub const fn frequency_bank(self) -> Bank {
        if self.0 & CONTROL_FREQ_SELECT != 0 {
            Bank::Bank1
        } else {
            Bank::Bank0
        }
    }

    /// Phase bank currently driving the output.
    pub const fn phase_bank(self) -> Bank {
        if self.0 & CONTROL_PHASE_SELECT != 0 {
            Bank::Bank1
        } else {
            Bank::Bank0
        }
    }

    /// MCLK stopped.
    pub const fn is_mclk_asleep(self) -> bool {
        self.0 & CONTROL_SLEEP_MCLK != 0
    }

    /// DAC powered down.
    pub const fn is_dac_asleep(self) -> bool {
        self.0 & CONTROL_SLEEP_DAC != 0
    }

    /// Phase accumulator held in reset.
    pub const fn is_reset(self) -> bool {
        self.0 & CONTROL_RESET != 0
    }

    /// Select the frequency bank driving the output.
    #[must_use]
    pub const fn with_frequency_bank(self, bank: Bank) -> Self {
        Self::set(self.0, CONTROL_FREQ_SELECT, bank.is_bank1())
    }

    /// Select the phase bank driving the output.
    #[must_use]
    pub const fn with_phase_bank(self, bank: Bank) -> Self {
        Self::set(self.0, CONTROL_PHASE_SELECT, bank.is_bank1())
    }

    /// Replace both sleep bits.
    #[must_use]
    pub const fn with_sleep(self, mclk: bool, dac: bool) -> Self {
        let cleared = Self(self.0 & !CONTROL_SLEEP_MASK);
        let with_mclk = Self::set(cleared.0, CONTROL_SLEEP_MCLK, mclk);
        Self::set(with_mclk.0, CONTROL_SLEEP_DAC, dac)
    }

    /// Set the reset bit.
    #[must_use]
    pub const fn with_reset(self) -> Self {
        Self(self.0 | CONTROL_RESET)
    }

    /// Clear both sleep bits and the reset bit.
    #[must_use]
    pub const fn awake(self) -> Self {
        Self(self.0 & !CONTROL_WAKE_MASK)
    }

    const fn set(raw: u8, mask: u8, on: bool) -> Self {
        if on {
            Self(raw | mask)
        } else {
            Self(raw & !mask)
        }
    }
}

// ── Description ──────────────────────────────────────────────────────────────

/// Identity string reported by the unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description {
    raw: [u8; DESCRIPTION_LEN],
    text: heapless::String<DESCRIPTION_LEN>,
}

impl Description {
    /// Build from the raw register contents.
    ///
    /// Bytes that are not valid UTF-8 leave [`Description::as_str`] empty;
    /// [`Description::raw`] always holds what was read.
    pub fn from_raw(raw: [u8; DESCRIPTION_LEN]) -> Self {
        let mut text = heapless::String::new();
        if let Ok(s) = core::str::from_utf8(&raw) {
            // Capacity equals the register width, so this cannot overflow.
            let _ = text.push_str(s);
        }
        Self { raw, text }
    }

    /// Raw register bytes.
    pub fn raw(&self) -> &[u8; DESCRIPTION_LEN] {
        &self.raw
    }

    /// Text form, empty if the bytes were not UTF-8.
    pub fn as_str(&self) -> &str {
        self.text.as_str()
    }

    /// Whether this is an AD9833 DDS unit.
    pub fn is_expected(&self) -> bool {
        &self.raw == EXPECTED_DESCRIPTION
    }
}

impl core::fmt::Display for Description {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Description {
    fn format(&self, f: defmt::Formatter<'_>) {
        defmt::write!(f, "{=[u8]:a}", self.raw.as_slice());
    }
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn mode_decode_masks_low_three_bits() {
        assert_eq!(Mode::from_bits(0x03), Mode::Square);
        assert_eq!(Mode::from_bits(0xF3), Mode::Square);
        assert_eq!(Mode::from_bits(0x00), Mode::Reserved);
        assert_eq!(Mode::from_bits(0x06), Mode::Reserved);
        assert_eq!(Mode::from_bits(0x07), Mode::Reserved);
    }

    #[test]
    fn mode_bits_round_trip_for_outputs() {
        for mode in Mode::OUTPUTS {
            assert_eq!(Mode::from_bits(mode.bits()), mode);
        }
    }

    #[test]
    fn fixed_output_modes() {
        assert!(Mode::Sawtooth.is_fixed_output());
        assert!(Mode::Dc.is_fixed_output());
        assert!(!Mode::Sine.is_fixed_output());
        assert!(!Mode::Square.is_fixed_output());
        assert!(!Mode::Reserved.is_fixed_output());
    }

    #[test]
    fn bank_from_bool() {
        assert_eq!(Bank::from(false), Bank::Bank0);
        assert_eq!(Bank::from(true), Bank::Bank1);
        assert_eq!(Bank::Bank0.tag(), 0x80);
        assert_eq!(Bank::Bank1.tag(), 0xC0);
        assert_eq!(Bank::Bank0.other(), Bank::Bank1);
    }

    #[test]
    fn control_bank_selects_preserve_other_bits() {
        let ctrl = ControlRegister::from_bits(0x1C);
        let ctrl = ctrl.with_frequency_bank(Bank::Bank1);
        assert_eq!(ctrl.bits(), 0x5C);
        let ctrl = ctrl.with_phase_bank(Bank::Bank1);
        assert_eq!(ctrl.bits(), 0x7C);
        let ctrl = ctrl.with_frequency_bank(Bank::Bank0);
        assert_eq!(ctrl.bits(), 0x3C);
        assert_eq!(ctrl.frequency_bank(), Bank::Bank0);
        assert_eq!(ctrl.phase_bank(), Bank::Bank1);
    }

    #[test]
    fn control_sleep_replaces_both_bits() {
        let ctrl = ControlRegister::from_bits(0x68).with_sleep(true, false);
        assert_eq!(ctrl.bits(), 0x70);
        assert!(ctrl.is_mclk_asleep());
        assert!(!ctrl.is_dac_asleep());
    }

    #[test]
    fn control_awake_clears_sleep_and_reset_only() {
        let ctrl = ControlRegister::from_bits(0xFF).awake();
        assert_eq!(ctrl.bits(), 0xE3);
        assert!(!ctrl.is_reset());
        assert!(ControlRegister::from_bits(0).with_reset().is_reset());
    }

    #[test]
    fn description_matches_expected() {
        let desc = Description::from_raw(*b"ad9833");
        assert!(desc.is_expected());
        assert_eq!(desc.as_str(), "ad9833");
        assert!(!Description::from_raw(*b"ad9834").is_expected());
    }

    #[test]
    fn description_with_invalid_utf8_keeps_raw() {
        let desc = Description::from_raw([0xFF, 0xFE, b'a', b'd', 0, 0]);
        assert_eq!(desc.as_str(), "");
        assert_eq!(desc.raw()[2], b'a');
        assert!(!desc.is_expected());
    }
}
