//! Register-level transport abstraction
//!
//! Peripheral units that sit behind a microcontroller "register bridge"
//! expose a flat map of byte-addressed registers. Drivers only ever need four
//! primitives on top of that map, captured by [`RegisterBus`]:
//!
//! | Primitive          | Bus traffic                                  |
//! |--------------------|----------------------------------------------|
//! | `read_register`    | `S addr+W reg Sr addr+R data.. P`            |
//! | `read_register8`   | same, one data byte                          |
//! | `write_register`   | `S addr+W reg data.. P` (single frame)       |
//! | `write_register8`  | same, one data byte                          |
//!
//! [`I2cRegisterBus`] implements the trait on top of any blocking
//! [`embedded_hal::i2c::I2c`] implementation. Retry policy, bus timing and
//! clock stretching are the I2C implementation's business.

use embedded_hal::i2c::{I2c, Operation};

/// Byte-addressed register transport.
///
/// Implementations perform exactly one bus transaction per call and never
/// retry on their own.
pub trait RegisterBus {
    /// Transport error type
    type Error: core::fmt::Debug;

    /// Read `buf.len()` bytes starting at register `reg`.
    fn read_register(&mut self, reg: u8, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Write `data` to register `reg` in one bus transaction.
    fn write_register(&mut self, reg: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Read a single byte register.
    fn read_register8(&mut self, reg: u8) -> Result<u8, Self::Error> {
        let mut buf = [0u8; 1];
        self.read_register(reg, &mut buf)?;
        let [value] = buf;
        Ok(value)
    }

    /// Write a single byte register.
    fn write_register8(&mut self, reg: u8, value: u8) -> Result<(), Self::Error> {
        self.write_register(reg, &[value])
    }
}

impl<B: RegisterBus + ?Sized> RegisterBus for &mut B {
    type Error = B::Error;

    fn read_register(&mut self, reg: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        (**self).read_register(reg, buf)
    }

    fn write_register(&mut self, reg: u8, data: &[u8]) -> Result<(), Self::Error> {
        (**self).write_register(reg, data)
    }

    fn read_register8(&mut self, reg: u8) -> Result<u8, Self::Error> {
        (**self).read_register8(reg)
    }

    fn write_register8(&mut self, reg: u8, value: u8) -> Result<(), Self::Error> {
        (**self).write_register8(reg, value)
    }
}

/// [`RegisterBus`] over a blocking I2C bus at a fixed 7-bit address.
pub struct I2cRegisterBus<I> {
    i2c: I,
    address: u8,
}

impl<I: I2c> I2cRegisterBus<I> {
    /// Wrap `i2c`, addressing every transaction to `address`.
    pub fn new(i2c: I, address: u8) -> Self {
        Self { i2c, address }
    }

    /// 7-bit device address used for every transaction.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Give the underlying bus back.
    pub fn release(self) -> I {
        self.i2c
    }
}

impl<I: I2c> RegisterBus for I2cRegisterBus<I> {
    type Error = I::Error;

    fn read_register(&mut self, reg: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.i2c.write_read(self.address, &[reg], buf)
    }

    fn write_register(&mut self, reg: u8, data: &[u8]) -> Result<(), Self::Error> {
        // Adjacent write operations go out as one frame (no SR in between),
        // so the payload needs no staging buffer.
        self.i2c.transaction(
            self.address,
            &mut [Operation::Write(&[reg]), Operation::Write(data)],
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    /// Records every operation as (address, is_write, bytes).
    #[derive(Default)]
    struct RecordingI2c {
        ops: std::vec::Vec<(u8, bool, std::vec::Vec<u8>)>,
        read_fill: u8,
    }
    impl embedded_hal::i2c::ErrorType for RecordingI2c {
        type Error = core::convert::Infallible;
    }
    impl embedded_hal::i2c::I2c for RecordingI2c {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            for op in operations.iter_mut() {
                match op {
                    Operation::Write(data) => self.ops.push((address, true, data.to_vec())),
                    Operation::Read(buf) => {
                        buf.fill(self.read_fill);
                        self.ops.push((address, false, buf.to_vec()));
                    }
                }
            }
            Ok(())
        }
    }

    #[test]
    fn write_register_sends_register_then_payload() {
        let mut bus = I2cRegisterBus::new(RecordingI2c::default(), 0x31);
        bus.write_register(0x30, &[0xC1, 0x02, 0x03, 0x04]).unwrap();
        let i2c = bus.release();
        assert_eq!(i2c.ops.len(), 2);
        assert_eq!(i2c.ops[0], (0x31, true, vec![0x30]));
        assert_eq!(i2c.ops[1], (0x31, true, vec![0xC1, 0x02, 0x03, 0x04]));
    }

    #[test]
    fn write_register8_is_a_one_byte_payload() {
        let mut bus = I2cRegisterBus::new(RecordingI2c::default(), 0x31);
        bus.write_register8(0x21, 0x80).unwrap();
        let i2c = bus.release();
        assert_eq!(i2c.ops[1], (0x31, true, vec![0x80]));
    }

    #[test]
    fn read_register8_returns_first_byte() {
        let i2c = RecordingI2c {
            read_fill: 0x5A,
            ..RecordingI2c::default()
        };
        let mut bus = I2cRegisterBus::new(i2c, 0x31);
        assert_eq!(bus.read_register8(0x20).unwrap(), 0x5A);
        let i2c = bus.release();
        assert_eq!(i2c.ops[0], (0x31, true, vec![0x20]));
        assert_eq!(i2c.ops[1], (0x31, false, vec![0x5A]));
    }

    #[test]
    fn borrowed_bus_forwards() {
        fn poke<B: RegisterBus>(mut bus: B) {
            bus.write_register8(0x01, 0x02).unwrap();
        }

        let mut bus = I2cRegisterBus::new(RecordingI2c::default(), 0x40);
        poke(&mut bus);
        assert_eq!(bus.address(), 0x40);
        assert_eq!(bus.release().ops.len(), 2);
    }

    #[test]
    fn write_read_against_embedded_hal_mock() {
        use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

        let expectations = [I2cTransaction::write_read(
            0x31,
            vec![0x10],
            b"ad9833".to_vec(),
        )];
        let mut i2c = I2cMock::new(&expectations);
        let mut bus = I2cRegisterBus::new(i2c.clone(), 0x31);
        let mut buf = [0u8; 6];
        bus.read_register(0x10, &mut buf).unwrap();
        assert_eq!(&buf, b"ad9833");
        i2c.done();
    }

    #[test]
    fn bus_errors_propagate() {
        use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};
        use embedded_hal::i2c::ErrorKind;

        let expectations = [I2cTransaction::write_read(0x31, vec![0x21], vec![0x00])
            .with_error(ErrorKind::Other)];
        let mut i2c = I2cMock::new(&expectations);
        let mut bus = I2cRegisterBus::new(i2c.clone(), 0x31);
        assert!(bus.read_register8(0x21).is_err());
        i2c.done();
    }
}
