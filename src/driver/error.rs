//! Error types for the KSZ8851SNL driver
//!
//! Errors are organized by domain for better diagnostics:
//! - [`BusError`]: SPI transfer failures reported by the platform
//! - [`ConfigError`]: Bring-up and configuration failures
//! - [`IoError`]: Runtime frame TX/RX failures
//!
//! The unified [`Error`] enum wraps all domain errors and is returned
//! by most driver methods.

// =============================================================================
// Bus Errors
// =============================================================================

/// Status reported by a bus primitive of the [`Platform`](crate::hal::Platform).
///
/// The register engine hands these back verbatim; it never retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError {
    /// The transfer itself failed
    Transfer,
    /// The bus was busy with another transfer
    Busy,
    /// The transfer did not complete in time
    Timeout,
}

impl core::fmt::Display for BusError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl BusError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            BusError::Transfer => "bus transfer failed",
            BusError::Busy => "bus busy",
            BusError::Timeout => "bus timeout",
        }
    }
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Bring-up and configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// The identity register never matched the KSZ8851SNL after all attempts
    ChipIdMismatch,
    /// Driver already initialized
    AlreadyInitialized,
    /// Operation requires a completed bring-up
    NotInitialized,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ConfigError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ConfigError::ChipIdMismatch => "chip identity mismatch",
            ConfigError::AlreadyInitialized => "already initialized",
            ConfigError::NotInitialized => "not initialized",
        }
    }
}

// =============================================================================
// I/O Errors
// =============================================================================

/// Runtime TX/RX errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IoError {
    /// Invalid state for operation (e.g., bring-up not finished)
    InvalidState,
    /// Invalid frame length (zero or exceeds maximum)
    InvalidLength,
    /// Buffer too small for the padded FIFO burst
    BufferTooSmall,
    /// Not enough free space in the TX queue
    NoSpace,
    /// Received frame header reported an error; the frame was released
    FrameError,
}

impl core::fmt::Display for IoError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl IoError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            IoError::InvalidState => "invalid state for operation",
            IoError::InvalidLength => "invalid frame length",
            IoError::BufferTooSmall => "buffer too small for frame",
            IoError::NoSpace => "no space in TX queue",
            IoError::FrameError => "frame error",
        }
    }
}

// =============================================================================
// Unified Error Type
// =============================================================================

/// This enum wraps all domain-specific errors for unified error handling.
///
/// Match on the inner domain error for specific handling:
/// ```ignore
/// match result {
///     Err(Error::Config(ConfigError::ChipIdMismatch)) => { /* wrong chip or wiring */ }
///     Err(Error::Bus(BusError::Timeout)) => { /* ... */ }
///     Err(Error::Io(IoError::FrameError)) => { /* ... */ }
///     _ => {}
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Bus error
    Bus(BusError),
    /// Configuration error
    Config(ConfigError),
    /// I/O error
    Io(IoError),
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Bus(e) => write!(f, "bus: {}", e.as_str()),
            Error::Config(e) => write!(f, "config: {}", e.as_str()),
            Error::Io(e) => write!(f, "io: {}", e.as_str()),
        }
    }
}

impl From<BusError> for Error {
    fn from(e: BusError) -> Self {
        Error::Bus(e)
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<IoError> for Error {
    fn from(e: IoError) -> Self {
        Error::Io(e)
    }
}

/// Result type alias for driver operations
pub type Result<T> = core::result::Result<T, Error>;

/// Result type returned by the bus primitives and the register engine
pub type BusResult<T = ()> = core::result::Result<T, BusError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    extern crate std;
    use std::format;

    use super::*;

    #[test]
    fn bus_error_as_str_non_empty() {
        for variant in [BusError::Transfer, BusError::Busy, BusError::Timeout] {
            assert!(!variant.as_str().is_empty(), "BusError::{variant:?} has empty string");
        }
    }

    #[test]
    fn config_error_display() {
        let display = format!("{}", ConfigError::ChipIdMismatch);
        assert_eq!(display, "chip identity mismatch");
    }

    #[test]
    fn io_error_as_str_non_empty() {
        let variants = [
            IoError::InvalidState,
            IoError::InvalidLength,
            IoError::BufferTooSmall,
            IoError::NoSpace,
            IoError::FrameError,
        ];

        for variant in variants {
            assert!(!variant.as_str().is_empty(), "IoError::{variant:?} has empty string");
        }
    }

    #[test]
    fn error_from_bus_error() {
        let err: Error = BusError::Timeout.into();
        assert_eq!(err, Error::Bus(BusError::Timeout));
    }

    #[test]
    fn error_from_config_error() {
        let err: Error = ConfigError::ChipIdMismatch.into();

        match err {
            Error::Config(e) => assert_eq!(e, ConfigError::ChipIdMismatch),
            _ => panic!("Expected Error::Config"),
        }
    }

    #[test]
    fn error_display_prefixes_domain() {
        let display = format!("{}", Error::Bus(BusError::Busy));
        assert!(display.contains("bus"));
        assert!(display.contains("busy"));

        let display = format!("{}", Error::Io(IoError::BufferTooSmall));
        assert!(display.contains("io"));
        assert!(display.contains("buffer"));
    }

    #[test]
    fn question_mark_lifts_bus_result() {
        fn inner() -> BusResult<u16> {
            Err(BusError::Transfer)
        }
        fn outer() -> Result<u16> {
            Ok(inner()?)
        }

        assert_eq!(outer(), Err(Error::Bus(BusError::Transfer)));
    }
}
