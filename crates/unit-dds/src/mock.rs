//! Simulated DDS unit for host-side testing
//!
//! [`MockDds`] implements [`RegisterBus`] by modelling the bridge's register
//! file: bank-tagged frequency/phase writes land in the addressed bank, Mode
//! and Control bytes are only accepted with the write marker, and entering
//! Sawtooth or DC zeroes both frequency words the way the bridge firmware
//! does. Every transaction is recorded for assertions, and a single failure
//! can be injected at a chosen position.
//!
//! The transaction log is fixed-capacity so the mock stays usable in
//! `no_std` test harnesses; transactions past [`LOG_CAPACITY`] are not
//! recorded.

use platform::RegisterBus;

use crate::codec::{decode_frequency, decode_phase};
use crate::registers::{
    DESCRIPTION_LEN, EXPECTED_DESCRIPTION, FREQUENCY_LEN, PHASE_LEN, REG_CONTROL,
    REG_DESCRIPTION, REG_FREQUENCY, REG_MODE, REG_PHASE, WRITE_FLAG,
};
use crate::types::{Bank, ControlRegister, Mode};

/// Recorded transactions kept by [`MockDds`].
pub const LOG_CAPACITY: usize = 64;

/// Largest payload the bridge accepts in one write.
const MAX_PAYLOAD: usize = FREQUENCY_LEN + PHASE_LEN;

/// One recorded bus transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusOp {
    /// Register read of `len` bytes
    #[allow(missing_docs)]
    Read { reg: u8, len: usize },
    /// Register write of `data`
    #[allow(missing_docs)]
    Write {
        reg: u8,
        data: heapless::Vec<u8, MAX_PAYLOAD>,
    },
}

impl BusOp {
    /// Expected read of `len` bytes from `reg`.
    pub fn read(reg: u8, len: usize) -> Self {
        Self::Read { reg, len }
    }

    /// Expected write of `data` to `reg`.
    ///
    /// Payloads longer than the bridge accepts are truncated.
    pub fn write(reg: u8, data: &[u8]) -> Self {
        let mut payload = heapless::Vec::new();
        for &byte in data.iter().take(MAX_PAYLOAD) {
            let _ = payload.push(byte);
        }
        Self::Write { reg, data: payload }
    }
}

/// Injected transport failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MockBusError;

/// Simulated DDS unit.
#[derive(Debug, Clone)]
pub struct MockDds {
    description: [u8; DESCRIPTION_LEN],
    mode: u8,
    control: u8,
    frequency0: u32,
    frequency1: u32,
    phase0: u16,
    phase1: u16,
    log: heapless::Vec<BusOp, LOG_CAPACITY>,
    fail_in: Option<usize>,
}

impl Default for MockDds {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDds {
    /// A unit that identifies as `"ad9833"` with every register cleared.
    pub fn new() -> Self {
        Self {
            description: *EXPECTED_DESCRIPTION,
            mode: 0,
            control: 0,
            frequency0: 0,
            frequency1: 0,
            phase0: 0,
            phase1: 0,
            log: heapless::Vec::new(),
            fail_in: None,
        }
    }

    /// Replace the identity string.
    pub fn set_description(&mut self, description: [u8; DESCRIPTION_LEN]) {
        self.description = description;
    }

    /// Preload the mode register (stored value, no write marker).
    pub fn set_mode_raw(&mut self, raw: u8) {
        self.mode = raw;
    }

    /// Preload the control register (stored value, no write marker).
    pub fn set_control_raw(&mut self, raw: u8) {
        self.control = raw;
    }

    /// Fail the `n`-th transaction from now (0 is the next one).
    ///
    /// The failing transaction is still recorded but changes no state. Only
    /// one failure is pending at a time.
    pub fn fail_next(&mut self, n: usize) {
        self.fail_in = Some(n);
    }

    /// Every transaction since creation or the last
    /// [`MockDds::clear_transactions`].
    pub fn transactions(&self) -> &[BusOp] {
        &self.log
    }

    /// Forget recorded transactions.
    pub fn clear_transactions(&mut self) {
        self.log.clear();
    }

    /// Payloads written to `reg`, oldest first.
    pub fn writes_to(&self, reg: u8) -> impl Iterator<Item = &[u8]> + '_ {
        self.log.iter().filter_map(move |op| match op {
            BusOp::Write { reg: r, data } if *r == reg => Some(data.as_slice()),
            _ => None,
        })
    }

    /// Raw mode register.
    pub fn mode_raw(&self) -> u8 {
        self.mode
    }

    /// Decoded output mode.
    pub fn mode(&self) -> Mode {
        Mode::from_bits(self.mode)
    }

    /// Control register.
    pub fn control(&self) -> ControlRegister {
        ControlRegister::from_bits(self.control)
    }

    /// Tuning word held in a frequency bank.
    pub fn frequency_word(&self, bank: Bank) -> u32 {
        match bank {
            Bank::Bank0 => self.frequency0,
            Bank::Bank1 => self.frequency1,
        }
    }

    /// Phase word held in a phase bank.
    pub fn phase_word(&self, bank: Bank) -> u16 {
        match bank {
            Bank::Bank0 => self.phase0,
            Bank::Bank1 => self.phase1,
        }
    }

    fn record(&mut self, op: BusOp) -> Result<(), MockBusError> {
        let _ = self.log.push(op);
        match self.fail_in {
            Some(0) => {
                self.fail_in = None;
                Err(MockBusError)
            }
            Some(n) => {
                self.fail_in = Some(n.saturating_sub(1));
                Ok(())
            }
            None => Ok(()),
        }
    }

    fn store_frequency(&mut self, payload: [u8; FREQUENCY_LEN]) {
        match decode_frequency(payload) {
            Some((Bank::Bank0, word)) => self.frequency0 = word,
            Some((Bank::Bank1, word)) => self.frequency1 = word,
            None => {}
        }
    }

    fn store_phase(&mut self, payload: [u8; PHASE_LEN]) {
        match decode_phase(payload) {
            Some((Bank::Bank0, word)) => self.phase0 = word,
            Some((Bank::Bank1, word)) => self.phase1 = word,
            None => {}
        }
    }

    /// Single-byte registers drop writes without the marker.
    fn marked_byte(data: &[u8]) -> Option<u8> {
        match data {
            [byte] if byte & WRITE_FLAG != 0 => Some(byte & !WRITE_FLAG),
            _ => None,
        }
    }
}

impl RegisterBus for MockDds {
    type Error = MockBusError;

    fn read_register(&mut self, reg: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.record(BusOp::read(reg, buf.len()))?;
        buf.fill(0);
        match reg {
            REG_DESCRIPTION => {
                for (dst, src) in buf.iter_mut().zip(self.description) {
                    *dst = src;
                }
            }
            REG_MODE => {
                if let Some(first) = buf.first_mut() {
                    *first = self.mode;
                }
            }
            REG_CONTROL => {
                if let Some(first) = buf.first_mut() {
                    *first = self.control;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn write_register(&mut self, reg: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.record(BusOp::write(reg, data))?;
        match reg {
            REG_MODE => {
                if let Some(value) = Self::marked_byte(data) {
                    self.mode = value;
                    if Mode::from_bits(value).is_fixed_output() {
                        self.frequency0 = 0;
                        self.frequency1 = 0;
                    }
                }
            }
            REG_CONTROL => {
                if let Some(value) = Self::marked_byte(data) {
                    self.control = value;
                }
            }
            REG_FREQUENCY => {
                if let Some((frequency, rest)) = data.split_first_chunk::<FREQUENCY_LEN>() {
                    self.store_frequency(*frequency);
                    if let Ok(phase) = <[u8; PHASE_LEN]>::try_from(rest) {
                        self.store_phase(phase);
                    }
                }
            }
            REG_PHASE => {
                if let Ok(phase) = <[u8; PHASE_LEN]>::try_from(data) {
                    self.store_phase(phase);
                }
            }
            _ => {}
        }
        Ok(())
    }
}
