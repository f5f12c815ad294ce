//! Logging shim.
//!
//! Forwards to `defmt` on target builds and `tracing` on host builds. With
//! neither feature enabled the calls compile to nothing, but the arguments
//! are still type-checked.

#![allow(unused_macros)]

macro_rules! dds_log {
    ($level:ident, $($arg:tt)+) => {{
        #[cfg(feature = "defmt")]
        defmt::$level!($($arg)+);
        #[cfg(feature = "tracing")]
        tracing::$level!($($arg)+);
        #[cfg(not(any(feature = "defmt", feature = "tracing")))]
        {
            let _ = core::format_args!($($arg)+);
        }
    }};
}

macro_rules! error {
    ($($arg:tt)+) => { $crate::fmt::dds_log!(error, $($arg)+) };
}

macro_rules! info {
    ($($arg:tt)+) => { $crate::fmt::dds_log!(info, $($arg)+) };
}

macro_rules! debug {
    ($($arg:tt)+) => { $crate::fmt::dds_log!(debug, $($arg)+) };
}

pub(crate) use {debug, dds_log, error, info};
