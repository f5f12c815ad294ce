//! DDS unit driver
//!
//! Talks to the unit's register bridge through any [`RegisterBus`]; on real
//! hardware that is an [`platform::I2cRegisterBus`] at
//! [`DEFAULT_I2C_ADDR`](crate::registers::DEFAULT_I2C_ADDR).
//!
//! Every operation is blocking and issues its bus transactions in order.
//! Composite operations ([`UnitDds::write_mode`], [`UnitDds::write_output`],
//! [`UnitDds::begin`]) stop at the first failing step and leave the steps
//! before it applied. The driver does no locking; callers sharing the unit
//! between contexts must serialise access themselves.
//!
//! # Bank model
//!
//! The AD9833 has two frequency and two phase registers. Writing a bank does
//! not change the output until that bank is selected in the control register
//! ([`UnitDds::write_current`]), so a new setting can be staged in the idle
//! bank and switched in glitch-free.

use embedded_hal::delay::DelayNs;
use platform::RegisterBus;

use crate::codec::{encode_frequency, encode_frequency_and_phase, encode_phase, validate_frequency};
use crate::config::DdsConfig;
use crate::error::Error;
use crate::fmt::{debug, error, info};
use crate::registers::{
    DESCRIPTION_LEN, REG_CONTROL, REG_DESCRIPTION, REG_FREQUENCY, REG_MODE, REG_PHASE,
    MODE_MASK, WAKEUP_SETTLE_US, WRITE_FLAG,
};
use crate::types::{Bank, ControlRegister, Description, Mode};

/// AD9833 DDS unit driver.
pub struct UnitDds<B, D> {
    bus: B,
    delay: D,
    config: DdsConfig,
    /// Last frequency confirmed written to bank 0, in Hz.
    frequency0: u32,
    /// Last frequency confirmed written to bank 1, in Hz.
    frequency1: u32,
}

impl<B: RegisterBus, D: DelayNs> UnitDds<B, D> {
    /// Create a driver with the default start-up configuration.
    ///
    /// No bus traffic happens until [`UnitDds::begin`] or another operation
    /// is called.
    pub fn new(bus: B, delay: D) -> Self {
        Self::with_config(bus, delay, DdsConfig::default())
    }

    /// Create a driver with an explicit start-up configuration.
    pub fn with_config(bus: B, delay: D, config: DdsConfig) -> Self {
        Self {
            bus,
            delay,
            config,
            frequency0: 0,
            frequency1: 0,
        }
    }

    /// Start-up configuration used by [`UnitDds::begin`].
    pub fn config(&self) -> DdsConfig {
        self.config
    }

    /// Replace the start-up configuration.
    pub fn set_config(&mut self, config: DdsConfig) {
        self.config = config;
    }

    /// Last frequency confirmed written to bank 0 (Hz).
    pub fn frequency0(&self) -> u32 {
        self.frequency0
    }

    /// Last frequency confirmed written to bank 1 (Hz).
    pub fn frequency1(&self) -> u32 {
        self.frequency1
    }

    /// Last frequency confirmed written to `bank` (Hz).
    ///
    /// Reads 0 after a failed write to that bank.
    pub fn frequency(&self, bank: Bank) -> u32 {
        match bank {
            Bank::Bank0 => self.frequency0,
            Bank::Bank1 => self.frequency1,
        }
    }

    /// Borrow the underlying bus.
    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Mutably borrow the underlying bus.
    ///
    /// Register writes made through it bypass the frequency cache.
    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Give back the bus and the delay source.
    pub fn release(self) -> (B, D) {
        (self.bus, self.delay)
    }

    // -----------------------------------------------------------------------
    // Start-up
    // -----------------------------------------------------------------------

    /// Confirm the unit's identity and apply the start-up configuration.
    ///
    /// With `start_output` set this is [`UnitDds::write_output`] with the
    /// configured values followed by [`UnitDds::wakeup`].
    pub fn begin(&mut self) -> Result<(), Error<B::Error>> {
        let description = self.read_description()?;
        if !description.is_expected() {
            error!("Illegal desc [{}]", description);
            return Err(Error::UnexpectedDescription(description));
        }
        info!("DDS unit identified");

        let cfg = self.config;
        if cfg.start_output {
            self.write_output(cfg.mode, cfg.bank, cfg.frequency_hz, cfg.phase_deg)?;
            self.wakeup()?;
            info!("DDS output started: {} {} Hz", cfg.mode, cfg.frequency_hz);
        }
        Ok(())
    }

    /// Read the 6-byte identity string (`"ad9833"` on a DDS unit).
    pub fn read_description(&mut self) -> Result<Description, Error<B::Error>> {
        let mut raw = [0u8; DESCRIPTION_LEN];
        self.bus
            .read_register(REG_DESCRIPTION, &mut raw)
            .map_err(Error::Bus)?;
        Ok(Description::from_raw(raw))
    }

    // -----------------------------------------------------------------------
    // Mode
    // -----------------------------------------------------------------------

    /// Read the output mode.
    pub fn read_mode(&mut self) -> Result<Mode, Error<B::Error>> {
        let raw = self.bus.read_register8(REG_MODE).map_err(Error::Bus)?;
        Ok(Mode::from_bits(raw))
    }

    /// Write the output mode.
    ///
    /// The bridge only applies a mode change once the control register has
    /// been rewritten, so the current control byte is written back unchanged.
    /// Entering Sawtooth or DC zeroes the chip's frequency registers; leaving
    /// them rewrites both banks from the cached frequencies.
    ///
    /// Frequency and phase settings are ignored in Sawtooth and DC.
    pub fn write_mode(&mut self, mode: Mode) -> Result<(), Error<B::Error>> {
        let raw = self.bus.read_register8(REG_MODE).map_err(Error::Bus)?;
        let control = self.read_control()?;

        let old = Mode::from_bits(raw);
        let resync = old.is_fixed_output() && !mode.is_fixed_output();
        let updated = (raw & !MODE_MASK) | mode.bits();

        self.write_register8(REG_MODE, updated)?;
        self.write_control(control)?;
        debug!("DDS mode {} -> {}", old, mode);

        if resync {
            let (f0, f1) = (self.frequency0, self.frequency1);
            debug!("DDS restoring frequencies {} / {} Hz", f0, f1);
            self.write_frequency(Bank::Bank0, f0)?;
            self.write_frequency(Bank::Bank1, f1)?;
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Frequency / phase banks
    // -----------------------------------------------------------------------

    /// Write `hz` (0 to 1 MHz) to a frequency bank.
    ///
    /// The cached value for `bank` reads 0 while the write is in flight and
    /// stays 0 if it fails.
    pub fn write_frequency(&mut self, bank: Bank, hz: u32) -> Result<(), Error<B::Error>> {
        let hz = Self::checked_frequency(hz)?;
        let payload = encode_frequency(bank, hz);

        self.set_cached_frequency(bank, 0);
        self.bus
            .write_register(REG_FREQUENCY, &payload)
            .map_err(Error::Bus)?;
        self.set_cached_frequency(bank, hz);
        Ok(())
    }

    /// Write `hz` to frequency bank 0.
    pub fn write_frequency0(&mut self, hz: u32) -> Result<(), Error<B::Error>> {
        self.write_frequency(Bank::Bank0, hz)
    }

    /// Write `hz` to frequency bank 1.
    pub fn write_frequency1(&mut self, hz: u32) -> Result<(), Error<B::Error>> {
        self.write_frequency(Bank::Bank1, hz)
    }

    /// Write a phase offset in degrees to a phase bank.
    ///
    /// Any value is accepted; it is reduced modulo 360.
    pub fn write_phase(&mut self, bank: Bank, deg: u16) -> Result<(), Error<B::Error>> {
        let payload = encode_phase(bank, deg);
        self.bus
            .write_register(REG_PHASE, &payload)
            .map_err(Error::Bus)
    }

    /// Write a phase offset to phase bank 0.
    pub fn write_phase0(&mut self, deg: u16) -> Result<(), Error<B::Error>> {
        self.write_phase(Bank::Bank0, deg)
    }

    /// Write a phase offset to phase bank 1.
    pub fn write_phase1(&mut self, deg: u16) -> Result<(), Error<B::Error>> {
        self.write_phase(Bank::Bank1, deg)
    }

    /// Write a frequency and a phase in a single 6-byte transaction.
    ///
    /// The frequency is validated first; either both fields reach the unit
    /// or neither does.
    pub fn write_frequency_and_phase(
        &mut self,
        frequency_bank: Bank,
        hz: u32,
        phase_bank: Bank,
        deg: u16,
    ) -> Result<(), Error<B::Error>> {
        let hz = Self::checked_frequency(hz)?;
        let payload = encode_frequency_and_phase(frequency_bank, hz, phase_bank, deg);

        self.set_cached_frequency(frequency_bank, 0);
        self.bus
            .write_register(REG_FREQUENCY, &payload)
            .map_err(Error::Bus)?;
        self.set_cached_frequency(frequency_bank, hz);
        Ok(())
    }

    /// Select which frequency and phase banks drive the output.
    pub fn write_current(
        &mut self,
        frequency_bank: Bank,
        phase_bank: Bank,
    ) -> Result<(), Error<B::Error>> {
        self.modify_control(|c| {
            c.with_frequency_bank(frequency_bank)
                .with_phase_bank(phase_bank)
        })
    }

    /// Select which frequency bank drives the output.
    pub fn write_current_frequency(&mut self, bank: Bank) -> Result<(), Error<B::Error>> {
        self.modify_control(|c| c.with_frequency_bank(bank))
    }

    /// Select which phase bank drives the output.
    pub fn write_current_phase(&mut self, bank: Bank) -> Result<(), Error<B::Error>> {
        self.modify_control(|c| c.with_phase_bank(bank))
    }

    // -----------------------------------------------------------------------
    // Operation
    // -----------------------------------------------------------------------

    /// Program `bank` with `hz` / `deg`, switch to `mode` and select `bank`
    /// for both frequency and phase.
    ///
    /// Sequence: frequency+phase write, [`UnitDds::write_mode`],
    /// [`UnitDds::write_current`]. An out-of-range frequency fails before any
    /// bus traffic.
    pub fn write_output(
        &mut self,
        mode: Mode,
        bank: Bank,
        hz: u32,
        deg: u16,
    ) -> Result<(), Error<B::Error>> {
        let hz = Self::checked_frequency(hz)?;
        self.write_frequency_and_phase(bank, hz, bank, deg)?;
        self.write_mode(mode)?;
        self.write_current(bank, bank)
    }

    /// Put MCLK and/or the DAC to sleep.
    ///
    /// - `mclk`: stop the clock, the output holds its current value
    /// - `dac`: power down the DAC, the output stops
    ///
    /// At least one target must be selected.
    pub fn sleep(&mut self, mclk: bool, dac: bool) -> Result<(), Error<B::Error>> {
        if !mclk && !dac {
            error!("Sleep target must be specified");
            return Err(Error::NoSleepTarget);
        }
        self.modify_control(|c| c.with_sleep(mclk, dac))
    }

    /// Leave sleep and reset.
    ///
    /// Clears both sleep bits and RESET, then waits for the DAC to settle
    /// before returning.
    pub fn wakeup(&mut self) -> Result<(), Error<B::Error>> {
        self.modify_control(ControlRegister::awake)?;
        self.delay.delay_us(WAKEUP_SETTLE_US);
        Ok(())
    }

    /// Hold the phase accumulator in reset; the DAC sits at mid-scale until
    /// [`UnitDds::wakeup`].
    pub fn reset(&mut self) -> Result<(), Error<B::Error>> {
        self.modify_control(ControlRegister::with_reset)
    }

    /// Read the control register.
    pub fn read_control(&mut self) -> Result<ControlRegister, Error<B::Error>> {
        self.bus
            .read_register8(REG_CONTROL)
            .map(ControlRegister::from_bits)
            .map_err(Error::Bus)
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn checked_frequency(hz: u32) -> Result<u32, Error<B::Error>> {
        validate_frequency(hz).map_err(|e| {
            error!("freq must be between {} and {} ({})", e.min, e.max, e.value);
            Error::from(e)
        })
    }

    fn set_cached_frequency(&mut self, bank: Bank, hz: u32) {
        match bank {
            Bank::Bank0 => self.frequency0 = hz,
            Bank::Bank1 => self.frequency1 = hz,
        }
    }

    fn modify_control(
        &mut self,
        f: impl FnOnce(ControlRegister) -> ControlRegister,
    ) -> Result<(), Error<B::Error>> {
        let control = self.read_control()?;
        self.write_control(f(control))
    }

    fn write_control(&mut self, control: ControlRegister) -> Result<(), Error<B::Error>> {
        self.write_register8(REG_CONTROL, control.bits())
    }

    /// Single-byte registers only accept bytes carrying the write marker.
    fn write_register8(&mut self, reg: u8, value: u8) -> Result<(), Error<B::Error>> {
        self.bus
            .write_register8(reg, value | WRITE_FLAG)
            .map_err(Error::Bus)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic, clippy::arithmetic_side_effects)]
mod tests {
    use super::*;
    use crate::mock::{BusOp, MockDds};
    use crate::registers::{CONTROL_RESET, CONTROL_SLEEP_DAC, CONTROL_SLEEP_MCLK};
    use embedded_hal_mock::eh1::delay::NoopDelay;

    type TestDriver<'a> = UnitDds<&'a mut MockDds, NoopDelay>;

    fn driver(mock: &mut MockDds) -> TestDriver<'_> {
        UnitDds::new(mock, NoopDelay)
    }

    /// Delay that records the total time requested.
    #[derive(Default)]
    struct RecordingDelay {
        total_ns: u64,
    }

    impl DelayNs for RecordingDelay {
        #[allow(clippy::arithmetic_side_effects)]
        fn delay_ns(&mut self, ns: u32) {
            self.total_ns += u64::from(ns);
        }
    }

    #[test]
    fn single_byte_writes_carry_write_flag() {
        let mut mock = MockDds::new();
        mock.set_control_raw(0x00);
        driver(&mut mock).write_current(Bank::Bank1, Bank::Bank0).unwrap();
        assert_eq!(
            mock.transactions(),
            &[
                BusOp::read(REG_CONTROL, 1),
                BusOp::write(REG_CONTROL, &[0x80 | 0x40]),
            ]
        );
    }

    #[test]
    fn write_frequency_sends_tagged_tuning_word() {
        let mut mock = MockDds::new();
        let mut dds = driver(&mut mock);
        dds.write_frequency(Bank::Bank1, 50_000).unwrap();
        assert_eq!(dds.frequency1(), 50_000);
        assert_eq!(dds.frequency0(), 0);
        assert_eq!(
            mock.transactions(),
            &[BusOp::write(REG_FREQUENCY, &[0xC0, 0x14, 0x7A, 0xE1])]
        );
    }

    #[test]
    fn write_frequency_rejects_out_of_range_without_traffic() {
        let mut mock = MockDds::new();
        let mut dds = driver(&mut mock);
        dds.write_frequency0(1_000).unwrap();
        let err = dds.write_frequency0(1_000_001).unwrap_err();
        assert!(matches!(err, Error::FrequencyOutOfRange(_)));
        // Prior confirmed value is kept on validation failure.
        assert_eq!(dds.frequency0(), 1_000);
        assert_eq!(mock.transactions().len(), 1);
    }

    #[test]
    fn failed_frequency_write_leaves_cache_cleared() {
        let mut mock = MockDds::new();
        let mut dds = driver(&mut mock);
        dds.write_frequency1(2_000).unwrap();
        dds.bus.fail_next(0);
        assert!(matches!(dds.write_frequency1(3_000), Err(Error::Bus(_))));
        assert_eq!(dds.frequency1(), 0);
    }

    #[test]
    fn write_phase_reduces_modulo_360() {
        let mut mock = MockDds::new();
        let mut dds = driver(&mut mock);
        dds.write_phase0(360).unwrap();
        dds.write_phase1(361).unwrap();
        assert_eq!(
            mock.transactions(),
            &[
                BusOp::write(REG_PHASE, &[0x80, 0x00]),
                BusOp::write(REG_PHASE, &[0xC0, 0x06]),
            ]
        );
    }

    #[test]
    fn write_frequency_and_phase_is_one_transaction() {
        let mut mock = MockDds::new();
        let mut dds = driver(&mut mock);
        dds.write_frequency_and_phase(Bank::Bank0, 1_000_000, Bank::Bank1, 180)
            .unwrap();
        assert_eq!(dds.frequency0(), 1_000_000);
        assert_eq!(mock.transactions().len(), 1);
        assert_eq!(mock.frequency_word(Bank::Bank0), 26_843_546);
        assert_eq!(mock.phase_word(Bank::Bank1), 1024);
    }

    #[test]
    fn write_frequency_and_phase_rejects_out_of_range_without_traffic() {
        let mut mock = MockDds::new();
        let mut dds = driver(&mut mock);
        dds.write_frequency0(4_000).unwrap();
        dds.bus.clear_transactions();
        let err = dds
            .write_frequency_and_phase(Bank::Bank0, 1_000_001, Bank::Bank1, 0)
            .unwrap_err();
        assert!(matches!(err, Error::FrequencyOutOfRange(_)));
        assert_eq!(dds.frequency0(), 4_000);
        assert!(mock.transactions().is_empty());
    }

    #[test]
    fn failed_frequency_and_phase_write_leaves_cache_cleared() {
        let mut mock = MockDds::new();
        let mut dds = driver(&mut mock);
        dds.write_frequency1(7_000).unwrap();
        dds.bus.fail_next(0);
        assert!(matches!(
            dds.write_frequency_and_phase(Bank::Bank1, 8_000, Bank::Bank0, 90),
            Err(Error::Bus(_))
        ));
        assert_eq!(dds.frequency(Bank::Bank1), 0);
        assert_eq!(dds.frequency(Bank::Bank0), 0);
    }

    #[test]
    fn write_mode_preserves_upper_mode_bits_and_rewrites_control() {
        let mut mock = MockDds::new();
        mock.set_mode_raw(0x61);
        mock.set_control_raw(0x28);
        driver(&mut mock).write_mode(Mode::Square).unwrap();
        assert_eq!(
            mock.transactions(),
            &[
                BusOp::read(REG_MODE, 1),
                BusOp::read(REG_CONTROL, 1),
                BusOp::write(REG_MODE, &[0x80 | 0x63]),
                BusOp::write(REG_CONTROL, &[0x80 | 0x28]),
            ]
        );
    }

    #[test]
    fn sleep_requires_a_target() {
        let mut mock = MockDds::new();
        let err = driver(&mut mock).sleep(false, false).unwrap_err();
        assert_eq!(err, Error::NoSleepTarget);
        assert!(mock.transactions().is_empty());
    }

    #[test]
    fn sleep_replaces_both_sleep_bits() {
        let mut mock = MockDds::new();
        mock.set_control_raw(CONTROL_SLEEP_DAC);
        driver(&mut mock).sleep(true, false).unwrap();
        let control = mock.control().bits();
        assert_eq!(control & CONTROL_SLEEP_MCLK, CONTROL_SLEEP_MCLK);
        assert_eq!(control & CONTROL_SLEEP_DAC, 0);
    }

    #[test]
    fn wakeup_clears_sleep_and_reset_then_settles() {
        let mut mock = MockDds::new();
        mock.set_control_raw(0x7C);
        let mut dds = UnitDds::new(&mut mock, RecordingDelay::default());
        dds.wakeup().unwrap();
        let (_, delay) = dds.release();
        assert_eq!(delay.total_ns, u64::from(WAKEUP_SETTLE_US) * 1_000);
        assert_eq!(mock.control().bits(), 0x60);
    }

    #[test]
    fn wakeup_skips_settle_delay_when_write_fails() {
        let mut mock = MockDds::new();
        mock.fail_next(1);
        let mut dds = UnitDds::new(&mut mock, RecordingDelay::default());
        assert!(dds.wakeup().is_err());
        let (_, delay) = dds.release();
        assert_eq!(delay.total_ns, 0);
    }

    #[test]
    fn reset_sets_only_the_reset_bit() {
        let mut mock = MockDds::new();
        mock.set_control_raw(0x40);
        driver(&mut mock).reset().unwrap();
        assert_eq!(mock.control().bits(), 0x40 | CONTROL_RESET);
    }

    #[test]
    fn read_mode_failure_is_a_bus_error() {
        let mut mock = MockDds::new();
        mock.fail_next(0);
        assert!(matches!(driver(&mut mock).read_mode(), Err(Error::Bus(_))));
    }

    #[test]
    fn begin_rejects_foreign_device() {
        let mut mock = MockDds::new();
        mock.set_description(*b"si5351");
        let err = driver(&mut mock).begin().unwrap_err();
        match err {
            Error::UnexpectedDescription(desc) => assert_eq!(desc.as_str(), "si5351"),
            other => panic!("unexpected error {other:?}"),
        }
        // Only the identity read went out.
        assert_eq!(mock.transactions().len(), 1);
    }

    #[test]
    fn begin_probe_only_does_not_touch_output() {
        let mut mock = MockDds::new();
        let mut dds = UnitDds::with_config(&mut mock, NoopDelay, DdsConfig::probe_only());
        dds.begin().unwrap();
        assert_eq!(mock.transactions(), &[BusOp::read(REG_DESCRIPTION, 6)]);
    }
}
