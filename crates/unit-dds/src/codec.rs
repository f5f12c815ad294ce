//! Fixed-point word encoding for the frequency and phase registers.
//!
//! ```text
//! FTW   = round(f_out × 2^28 / MCLK)        & 0x0FFF_FFFF
//! PHASE = round((deg mod 360) × 2048 / 360) & 0x7FF
//! ```
//!
//! Both are computed in exact integer arithmetic. Neither quotient can land
//! on a .5 tie (MCLK is 2^7·5^7 and f·2^28 is always a multiple of 2^7, so
//! the remainder is never 2^6·5^7; likewise 2048·deg/360 has denominator 45),
//! so round-half-up matches a float `llround` bit for bit.

use platform::OutOfRangeError;

use crate::registers::{
    FREQUENCY_HIGH_MASK, FREQUENCY_LEN, MAX_FREQUENCY_HZ, MCLK_HZ, MIN_FREQUENCY_HZ,
    PHASE_HIGH_MASK, PHASE_LEN, PHASE_STEPS, PHASE_WORD_MASK, TUNING_WORD_BITS,
    TUNING_WORD_MASK,
};
use crate::types::Bank;

/// Degrees per full turn.
const FULL_TURN_DEG: u16 = 360;

/// Check `hz` against the range the driver accepts (0 Hz to 1 MHz).
///
/// # Errors
///
/// Returns [`OutOfRangeError`] if `hz > 1_000_000`.
pub const fn validate_frequency(hz: u32) -> Result<u32, OutOfRangeError> {
    OutOfRangeError::check(hz, MIN_FREQUENCY_HZ, MAX_FREQUENCY_HZ)
}

/// 28-bit frequency tuning word for an output of `hz` Hz.
///
/// Any `u32` is accepted; values at or above MCLK wrap through the mask
/// (`tuning_word(10_000_000) == 0`). Range checking is the caller's job.
#[must_use]
#[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
pub const fn tuning_word(hz: u32) -> u32 {
    // u32::MAX << 28 < 2^60, no overflow in u64.
    let scaled = (hz as u64) << TUNING_WORD_BITS;
    let mclk = MCLK_HZ as u64;
    let rounded = (scaled + mclk / 2) / mclk;
    // Masked to 28 bits before narrowing.
    (rounded & TUNING_WORD_MASK as u64) as u32
}

/// 11-bit phase word for an offset of `deg` degrees.
///
/// `deg` is reduced modulo 360 first, so 0 and 360 give the same word.
#[must_use]
#[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
pub const fn phase_word(deg: u16) -> u16 {
    let reduced = (deg % FULL_TURN_DEG) as u32;
    let full_turn = FULL_TURN_DEG as u32;
    let rounded = (reduced * PHASE_STEPS + full_turn / 2) / full_turn;
    // At most 2048 before masking; 359° rounds to 2042.
    (rounded as u16) & PHASE_WORD_MASK
}

/// Frequency register payload: bank tag + tuning word, big-endian.
#[must_use]
pub const fn encode_frequency(bank: Bank, hz: u32) -> [u8; FREQUENCY_LEN] {
    let [b0, b1, b2, b3] = tuning_word(hz).to_be_bytes();
    [(b0 & FREQUENCY_HIGH_MASK) | bank.tag(), b1, b2, b3]
}

/// Phase register payload: bank tag + phase word, big-endian.
#[must_use]
pub const fn encode_phase(bank: Bank, deg: u16) -> [u8; PHASE_LEN] {
    let [hi, lo] = phase_word(deg).to_be_bytes();
    [(hi & PHASE_HIGH_MASK) | bank.tag(), lo]
}

/// Combined payload for a 6-byte write starting at the frequency register.
#[must_use]
pub const fn encode_frequency_and_phase(
    frequency_bank: Bank,
    hz: u32,
    phase_bank: Bank,
    deg: u16,
) -> [u8; FREQUENCY_LEN + PHASE_LEN] {
    let [f0, f1, f2, f3] = encode_frequency(frequency_bank, hz);
    let [p0, p1] = encode_phase(phase_bank, deg);
    [f0, f1, f2, f3, p0, p1]
}

/// Decode a frequency register payload into `(bank, tuning word)`.
///
/// Returns `None` if the leading byte carries no bank tag.
#[must_use]
pub const fn decode_frequency(payload: [u8; FREQUENCY_LEN]) -> Option<(Bank, u32)> {
    let [b0, b1, b2, b3] = payload;
    match decode_tag(b0) {
        Some(bank) => Some((
            bank,
            u32::from_be_bytes([b0 & FREQUENCY_HIGH_MASK, b1, b2, b3]),
        )),
        None => None,
    }
}

/// Decode a phase register payload into `(bank, phase word)`.
///
/// Returns `None` if the leading byte carries no bank tag.
#[must_use]
pub const fn decode_phase(payload: [u8; PHASE_LEN]) -> Option<(Bank, u16)> {
    let [hi, lo] = payload;
    match decode_tag(hi) {
        Some(bank) => Some((bank, u16::from_be_bytes([hi & PHASE_HIGH_MASK, lo]))),
        None => None,
    }
}

const fn decode_tag(byte: u8) -> Option<Bank> {
    match byte & 0xC0 {
        0xC0 => Some(Bank::Bank1),
        0x80 => Some(Bank::Bank0),
        _ => None,
    }
}
