//! Unified error types for the controller firmware.
//!
//! The control loop itself has no error path: the phase table is total and
//! every input snapshot is a valid condition.  These types cover bring-up,
//! configuration, and the pin-level faults the GPIO adapter logs and absorbs.
//! All variants are `Copy` so they can travel through log lines and the
//! adapters without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Peripheral initialisation failed.
    Init(&'static str),
    /// A digital line could not be driven or sampled.
    Gpio(GpioError),
    /// Configuration is invalid or could not be loaded.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::Gpio(e) => write!(f, "gpio: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// GPIO errors
// ---------------------------------------------------------------------------

/// A failed register access on one pin.  `code` is the driver's return code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpioError {
    WriteFailed { gpio: i32, code: i32 },
    ReadFailed { gpio: i32, code: i32 },
}

impl fmt::Display for GpioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WriteFailed { gpio, code } => write!(f, "GPIO{gpio} write failed (rc={code})"),
            Self::ReadFailed { gpio, code } => write!(f, "GPIO{gpio} read failed (rc={code})"),
        }
    }
}

impl embedded_hal::digital::Error for GpioError {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}

impl From<GpioError> for Error {
    fn from(e: GpioError) -> Self {
        Self::Gpio(e)
    }
}

impl From<crate::config::ConfigError> for Error {
    fn from(e: crate::config::ConfigError) -> Self {
        match e {
            crate::config::ConfigError::ValidationFailed(msg) => Self::Config(msg),
            crate::config::ConfigError::Malformed => Self::Config("malformed config document"),
        }
    }
}
