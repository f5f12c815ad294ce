//! Peripheral bus configuration
//!
//! The HAL owns pin muxing and clock setup; drivers only need to know which
//! address to talk to and how fast the bus may be clocked.

/// Standard-mode I2C clock (100 kHz).
pub const I2C_STANDARD_MODE_HZ: u32 = 100_000;

/// Fast-mode I2C clock (400 kHz).
pub const I2C_FAST_MODE_HZ: u32 = 400_000;

/// I2C configuration for one target device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cConfig {
    /// Clock frequency in Hz
    pub frequency_hz: u32,
    /// 7-bit device address
    pub address: u8,
}

impl I2cConfig {
    /// Configuration for a device at `address` on a fast-mode bus.
    pub const fn fast_mode(address: u8) -> Self {
        Self {
            frequency_hz: I2C_FAST_MODE_HZ,
            address,
        }
    }

    /// Whether `address` fits in 7 bits and is outside the reserved ranges
    /// (`0x00..=0x07` and `0x78..=0x7F`).
    pub const fn is_valid_address(&self) -> bool {
        self.address >= 0x08 && self.address <= 0x77
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fast_mode_is_400khz() {
        let cfg = I2cConfig::fast_mode(0x31);
        assert_eq!(cfg.frequency_hz, 400_000);
        assert_eq!(cfg.address, 0x31);
    }

    #[test]
    fn reserved_addresses_are_rejected() {
        assert!(I2cConfig::fast_mode(0x31).is_valid_address());
        assert!(!I2cConfig::fast_mode(0x00).is_valid_address());
        assert!(!I2cConfig::fast_mode(0x07).is_valid_address());
        assert!(!I2cConfig::fast_mode(0x78).is_valid_address());
        assert!(!I2cConfig::fast_mode(0x80).is_valid_address());
        assert!(I2cConfig::fast_mode(0x77).is_valid_address());
    }
}
