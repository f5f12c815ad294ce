//! Hardware Abstraction Layer (HAL) for I2C register-bridge units
//!
//! This crate provides the trait seam between device drivers and the bus
//! that carries their register traffic, enabling development and testing
//! without physical hardware.
//!
//! # Architecture Layers
//!
//! ```text
//! Application / demo
//!         ↓
//! Device drivers (unit-dds)
//!         ↓
//! Platform HAL (this crate - RegisterBus)
//!         ↓
//! embedded-hal I2C implementation
//! ```
//!
//! # Features
//!
//! - `std`: Enable standard library support (`std::error::Error` impls)
//! - `defmt`: Enable defmt derives on platform types
//!
//! # Example
//!
//! ```no_run
//! use platform::{I2cRegisterBus, RegisterBus};
//!
//! fn read_id<I: embedded_hal::i2c::I2c>(i2c: I) -> Result<[u8; 6], I::Error> {
//!     let mut bus = I2cRegisterBus::new(i2c, 0x31);
//!     let mut id = [0u8; 6];
//!     bus.read_register(0x10, &mut id)?;
//!     Ok(id)
//! }
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
#![allow(clippy::doc_markdown)] // hex addresses and register names in doc comments
#![allow(clippy::must_use_candidate)] // hardware accessors — callers decide
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

#[cfg(feature = "std")]
extern crate std;

pub mod peripheral;
pub mod register_bus;
pub mod types;

pub use peripheral::{I2cConfig, I2C_FAST_MODE_HZ, I2C_STANDARD_MODE_HZ};
pub use register_bus::{I2cRegisterBus, RegisterBus};
pub use types::OutOfRangeError;
