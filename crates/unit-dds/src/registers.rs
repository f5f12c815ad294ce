//! DDS unit register map
//!
//! The AD9833 itself is an SPI-only part. The unit puts a small
//! microcontroller in front of it that exposes the chip's state as a flat
//! I2C register map and translates writes into AD9833 control words.
//!
//! # Register map
//!
//! | Register    | Addr   | Width | Contents                                     |
//! |-------------|--------|-------|----------------------------------------------|
//! | Description | `0x10` | 6     | ASCII identity, `"ad9833"`                   |
//! | Mode        | `0x20` | 1     | bits\[2:0\] output mode                      |
//! | Control     | `0x21` | 1     | active banks, sleep and reset bits           |
//! | Frequency   | `0x30` | 4     | bank tag + 28-bit tuning word, big-endian    |
//! | Phase       | `0x34` | 2     | bank tag + 11-bit phase word, big-endian     |
//!
//! The frequency register may also be written with 6 bytes, in which case the
//! trailing 2 bytes land in the phase register in the same transaction.
//!
//! ## Write marker
//! Bytes written to the Mode and Control registers must carry bit 7
//! ([`WRITE_FLAG`]); the bridge ignores single-byte writes without it. The
//! marker is not part of the stored value.
//!
//! ## Bank tags
//! Bits \[7:6\] of the leading frequency/phase byte select the target bank:
//! `0b10` for bank 0, `0b11` for bank 1. They are not a generic write marker.

// ---------------------------------------------------------------------------
// Register addresses
// ---------------------------------------------------------------------------

/// Identity string register (6 bytes, read-only)
pub const REG_DESCRIPTION: u8 = 0x10;

/// Output mode register (1 byte)
pub const REG_MODE: u8 = 0x20;

/// Control register (1 byte)
pub const REG_CONTROL: u8 = 0x21;

/// Frequency register (4 bytes, or 6 with a trailing phase word)
pub const REG_FREQUENCY: u8 = 0x30;

/// Phase register (2 bytes)
pub const REG_PHASE: u8 = 0x34;

/// Width of the description register
pub const DESCRIPTION_LEN: usize = 6;

/// Width of the frequency register
pub const FREQUENCY_LEN: usize = 4;

/// Width of the phase register
pub const PHASE_LEN: usize = 2;

// ---------------------------------------------------------------------------
// Field values
// ---------------------------------------------------------------------------

/// Write marker OR'd into every Mode/Control byte on the wire.
pub const WRITE_FLAG: u8 = 0x80;

/// Mode register: output mode field
pub const MODE_MASK: u8 = 0x07;

/// Control: frequency bank in use (0 = bank 0, 1 = bank 1)
pub const CONTROL_FREQ_SELECT: u8 = 0x40;

/// Control: phase bank in use (0 = bank 0, 1 = bank 1)
pub const CONTROL_PHASE_SELECT: u8 = 0x20;

/// Control: stop MCLK (DAC holds its last value)
pub const CONTROL_SLEEP_MCLK: u8 = 0x10;

/// Control: power down the DAC (output stops)
pub const CONTROL_SLEEP_DAC: u8 = 0x08;

/// Control: hold the phase accumulator in reset (DAC at mid-scale)
pub const CONTROL_RESET: u8 = 0x04;

/// Control: both bank-select bits
pub const CONTROL_SELECT_MASK: u8 = CONTROL_FREQ_SELECT | CONTROL_PHASE_SELECT;

/// Control: both sleep bits
pub const CONTROL_SLEEP_MASK: u8 = CONTROL_SLEEP_MCLK | CONTROL_SLEEP_DAC;

/// Control: bits cleared by a wake-up (both sleeps and reset)
pub const CONTROL_WAKE_MASK: u8 = CONTROL_SLEEP_MASK | CONTROL_RESET;

/// Leading-byte tag addressing bank 0
pub const TAG_BANK0: u8 = 0x80;

/// Leading-byte tag addressing bank 1
pub const TAG_BANK1: u8 = 0xC0;

/// Frequency word bits carried in the leading byte
pub const FREQUENCY_HIGH_MASK: u8 = 0x0F;

/// Phase word bits carried in the leading byte
pub const PHASE_HIGH_MASK: u8 = 0x07;

// ---------------------------------------------------------------------------
// Device constants
// ---------------------------------------------------------------------------

/// Default 7-bit I2C address of the unit.
pub const DEFAULT_I2C_ADDR: u8 = 0x31;

/// Expected contents of [`REG_DESCRIPTION`].
pub const EXPECTED_DESCRIPTION: &[u8; DESCRIPTION_LEN] = b"ad9833";

/// Master clock feeding the AD9833 (10 MHz crystal).
pub const MCLK_HZ: u32 = 10_000_000;

/// Highest frequency accepted by the driver.
pub const MAX_FREQUENCY_HZ: u32 = 1_000_000;

/// Lowest frequency accepted by the driver.
pub const MIN_FREQUENCY_HZ: u32 = 0;

/// Tuning word width in bits.
pub const TUNING_WORD_BITS: u32 = 28;

/// Tuning word mask.
pub const TUNING_WORD_MASK: u32 = 0x0FFF_FFFF;

/// Phase word mask (11 bits as exposed by the bridge).
pub const PHASE_WORD_MASK: u16 = 0x07FF;

/// Phase word steps per full turn.
pub const PHASE_STEPS: u32 = 2048;

/// Settling time after clearing RESET/sleep.
///
/// The DAC output is updated 7 to 8 MCLK cycles after RESET returns to 0,
/// about 0.8 µs at 10 MHz; 2 µs leaves margin.
pub const WAKEUP_SETTLE_US: u32 = 2;
