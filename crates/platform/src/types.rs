//! Shared validation types.

/// Error returned when a value is out of the valid range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutOfRangeError {
    /// The value that was out of range.
    pub value: u32,
    /// The inclusive minimum allowed value.
    pub min: u32,
    /// The inclusive maximum allowed value.
    pub max: u32,
}

impl OutOfRangeError {
    /// Check `value` against the inclusive range `min..=max`.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRangeError`] describing the range if `value` is outside it.
    pub const fn check(value: u32, min: u32, max: u32) -> Result<u32, Self> {
        if value < min || value > max {
            Err(Self { value, min, max })
        } else {
            Ok(value)
        }
    }
}

impl core::fmt::Display for OutOfRangeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "value {} out of range [{}, {}]",
            self.value, self.min, self.max
        )
    }
}

#[cfg(feature = "std")]
impl std::error::Error for OutOfRangeError {}
