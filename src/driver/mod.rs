//! Core driver components for the KSZ8851SNL.
//!
//! - [`config`] - Configuration types and builder patterns
//! - [`error`] - Error types and result aliases
//! - [`register`] - Register access over the SPI command frame
//! - [`status`] / [`interrupt`] - Register snapshot decoders
//! - [`bringup`] - Driver state and configuration report
//! - [`ksz`] - The [`Ksz8851`] driver itself
//!
//! # Example
//!
//! ```ignore
//! use ph_ksz8851::driver::{DriverConfig, Ksz8851};
//!
//! let config = DriverConfig::new()
//!     .with_mac_address([0x02, 0x00, 0x00, 0x00, 0x00, 0x01]);
//! ```

// Submodules
pub mod bringup;
pub mod config;
pub mod error;
mod fifo;
pub mod interrupt;
pub mod ksz;
pub mod register;
pub mod status;

// Re-exports for convenience
pub use bringup::{ConfigReport, ConfigStep, State, StepOutcome};
pub use config::{
    ChipSelectMode, DriverConfig, Duplex, InterfaceConfig, MacAddress, SoftReset, Speed, Timing,
    Watermarks,
};
pub use error::{BusError, BusResult, ConfigError, Error, IoError, Result};
pub use interrupt::InterruptStatus;
pub use ksz::Ksz8851;
pub use register::RegisterEngine;
pub use status::{ChipId, RxFrameHeader, TxStatus};
