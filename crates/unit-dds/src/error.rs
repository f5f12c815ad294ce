//! Driver errors

use platform::OutOfRangeError;

use crate::types::Description;

/// Errors returned by [`UnitDds`](crate::UnitDds) operations.
///
/// Validation errors are raised before any bus traffic. A [`Error::Bus`]
/// returned from a composite operation means earlier steps may already have
/// been applied; nothing is rolled back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error<E> {
    /// Transport failure
    Bus(E),
    /// Frequency outside 0 Hz to 1 MHz
    FrequencyOutOfRange(OutOfRangeError),
    /// `sleep` called with neither MCLK nor DAC selected
    NoSleepTarget,
    /// The unit did not identify itself as `"ad9833"`
    UnexpectedDescription(Description),
}

impl<E> Error<E> {
    /// Whether the failure happened before touching the bus.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::FrequencyOutOfRange(_) | Self::NoSleepTarget
        )
    }
}

impl<E> From<OutOfRangeError> for Error<E> {
    fn from(err: OutOfRangeError) -> Self {
        Self::FrequencyOutOfRange(err)
    }
}

impl<E: core::fmt::Debug> core::fmt::Display for Error<E> {
    #[allow(clippy::use_debug)] // transport errors only promise Debug
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Bus(e) => write!(f, "DDS bus error: {e:?}"),
            Self::FrequencyOutOfRange(e) => {
                write!(f, "DDS frequency {} Hz must be between {} and {}", e.value, e.min, e.max)
            }
            Self::NoSleepTarget => write!(f, "DDS sleep target must be specified"),
            Self::UnexpectedDescription(d) => write!(f, "DDS illegal description [{d}]"),
        }
    }
}

#[cfg(feature = "std")]
impl<E: core::fmt::Debug> std::error::Error for Error<E> {}

#[cfg(feature = "defmt")]
impl<E> defmt::Format for Error<E> {
    fn format(&self, f: defmt::Formatter<'_>) {
        match self {
            Self::Bus(_) => defmt::write!(f, "DDS bus error"),
            Self::FrequencyOutOfRange(e) => defmt::write!(
                f,
                "DDS frequency {} Hz must be between {} and {}",
                e.value,
                e.min,
                e.max
            ),
            Self::NoSleepTarget => defmt::write!(f, "DDS sleep target must be specified"),
            Self::UnexpectedDescription(d) => defmt::write!(f, "DDS illegal description [{}]", d),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_classified() {
        let range: Error<()> = OutOfRangeError::check(2_000_000, 0, 1_000_000)
            .map_err(Error::from)
            .unwrap_err();
        assert!(range.is_validation());
        assert!(Error::<()>::NoSleepTarget.is_validation());
        assert!(!Error::Bus(()).is_validation());
    }

    #[test]
    fn display_messages() {
        let err: Error<&str> = Error::FrequencyOutOfRange(OutOfRangeError {
            value: 1_000_001,
            min: 0,
            max: 1_000_000,
        });
        assert_eq!(
            err.to_string(),
            "DDS frequency 1000001 Hz must be between 0 and 1000000"
        );
        assert_eq!(
            Error::Bus("nack").to_string(),
            "DDS bus error: \"nack\""
        );
        let desc = Description::from_raw(*b"ad9834");
        assert_eq!(
            Error::<()>::UnexpectedDescription(desc).to_string(),
            "DDS illegal description [ad9834]"
        );
    }
}
