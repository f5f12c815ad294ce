//! Driver for the AD9833 DDS waveform unit
//!
//! The unit pairs an AD9833 direct digital synthesiser (10 MHz MCLK) with a
//! small I2C register bridge. This crate encodes frequencies and phases into
//! the bridge's bank-tagged register format and drives output mode, active
//! bank selection, sleep, reset and wake-up over any
//! [`platform::RegisterBus`].
//!
//! # Example
//!
//! ```no_run
//! use embedded_hal::{delay::DelayNs, i2c::I2c};
//! use platform::I2cRegisterBus;
//! use unit_dds::{config::default_i2c_config, Bank, Error, Mode, UnitDds};
//!
//! fn run<I: I2c, D: DelayNs>(i2c: I, delay: D) -> Result<(), Error<I::Error>> {
//!     // Clock the bus at `default_i2c_config().frequency_hz` in the HAL.
//!     let bus = I2cRegisterBus::new(i2c, default_i2c_config().address);
//!     let mut dds = UnitDds::new(bus, delay);
//!     dds.begin()?;
//!
//!     // Stage 440 Hz in the idle bank, then switch to it.
//!     dds.write_frequency(Bank::Bank1, 440)?;
//!     dds.write_current_frequency(Bank::Bank1)?;
//!     dds.write_mode(Mode::Triangle)
//! }
//! ```
//!
//! # Features
//!
//! - `std`: `std::error::Error` impls
//! - `defmt`: log through defmt and derive `defmt::Format` (target builds)
//! - `tracing`: log through tracing (host builds)
//! - `serde`: derive `Serialize`/`Deserialize` on [`DdsConfig`]
//! - `demo`: everything the `output` demo needs

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(unused_must_use)]
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::print_stdout)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

#[cfg(feature = "std")]
extern crate std;

mod fmt;

pub mod codec;
pub mod config;
pub mod driver;
pub mod error;
pub mod mock;
pub mod registers;
pub mod types;

pub use config::{default_i2c_config, DdsConfig};
pub use driver::UnitDds;
pub use error::Error;
pub use mock::{BusOp, MockBusError, MockDds};
pub use types::{Bank, ControlRegister, Description, Mode};
