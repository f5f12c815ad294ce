//! Output demo: cycle every waveform against the simulated unit.
//!
//! Stages 80 Hz / 180° in bank 1, starts a 10 Hz sine from bank 0, then walks
//! through each output mode, switching banks between modes. Mode changes are
//! made with MCLK stopped so the output holds its level across the switch.
//!
//! Run with: RUST_LOG=debug cargo run -p unit-dds --example output --features demo

#![allow(clippy::print_stdout)]

use std::time::Duration;

use embedded_hal::delay::DelayNs;
use tracing_subscriber::EnvFilter;
use unit_dds::{Bank, Error, MockBusError, MockDds, Mode, UnitDds};

/// Host delay backed by the OS scheduler.
struct StdDelay;

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(Duration::from_nanos(u64::from(ns)));
    }
}

fn main() -> Result<(), Error<MockBusError>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut dds = UnitDds::new(MockDds::new(), StdDelay);
    dds.begin()?;

    dds.write_frequency(Bank::Bank1, 80)?;
    dds.write_phase(Bank::Bank1, 180)?;
    dds.write_output(Mode::Sine, Bank::Bank0, 10, 0)?;

    let mut bank = Bank::Bank0;
    for mode in Mode::OUTPUTS {
        dds.sleep(true, false)?;
        dds.write_mode(mode)?;
        dds.wakeup()?;

        let control = dds.read_control()?;
        tracing::info!(
            mode = mode.name(),
            bank = bank.is_bank1(),
            hz = dds.frequency(bank),
            control = control.bits(),
            "output running"
        );
        std::thread::sleep(Duration::from_millis(250));

        bank = bank.other();
        dds.write_current(bank, bank)?;
    }

    let unit = dds.bus();
    println!(
        "final: mode {} | bank0 word {:#09x} | bank1 word {:#09x}",
        unit.mode(),
        unit.frequency_word(Bank::Bank0),
        unit.frequency_word(Bank::Bank1)
    );
    Ok(())
}
