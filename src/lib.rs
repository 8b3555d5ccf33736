//! KSZ8851SNL Ethernet Controller Driver
//!
//! A `no_std`, `no_alloc` Rust driver for the Microchip KSZ8851SNL single-port
//! Ethernet controller with SPI host interface.
//!
//! The chip integrates a 10/100 MAC and PHY and exposes its register file and
//! frame queues over SPI. This crate brings the chip up from reset and moves
//! raw Ethernet frames in and out of its queues; it does not implement a
//! network stack.
//!
//! # Architecture
//!
//! The driver is organized into layers:
//!
//! 1. **Driver** ([`driver`]): [`Ksz8851`] with bring-up, frame I/O and
//!    status access, built on the register access engine
//! 2. **PHY** ([`phy`]): Port status decoding and link control
//! 3. **HAL** ([`hal`]): The [`Platform`] trait the driver consumes, an
//!    `embedded-hal` 1.0 implementation of it, and reset sequences
//!
//! All hardware access goes through [`Platform`]: a millisecond tick, three
//! blocking SPI primitives, and a pin setter for chip select and reset.
//!
//! # Features
//!
//! - `defmt`: Enable defmt formatting for public types and driver logging
//! - `critical-section`: Enable the ISR-safe [`SharedKsz8851`] wrapper
//!
//! # Example
//!
//! ```ignore
//! use ph_ksz8851::hal::embedded;
//! use ph_ksz8851::{DriverConfig, HalPlatform, Ksz8851};
//!
//! let platform = HalPlatform::new(spi, cs, reset, || timer.now_ms());
//! let config = DriverConfig::new()
//!     .with_interface(embedded::interface())
//!     .with_mac_address([0x02, 0x00, 0x00, 0x12, 0x34, 0x56]);
//!
//! let mut eth = Ksz8851::new(platform, config);
//! let report = eth.init()?;
//! for (step, error) in report.failures() {
//!     // bring-up continued past these
//! }
//!
//! let mut buf = [0u8; ph_ksz8851::constants::RX_BUFFER_SIZE];
//! loop {
//!     let status = eth.interrupt_status()?;
//!     if status.rx_frame {
//!         while let Some(len) = eth.read_frame(&mut buf)? {
//!             stack.receive(&buf[..len]);
//!         }
//!     }
//!     eth.clear_interrupts(status)?;
//! }
//! ```

#![no_std]
#![deny(missing_docs)]
#![deny(unsafe_code)]
// Clippy lint levels live here.
#![deny(clippy::correctness)]
#![warn(
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::cloned_instead_of_copied,
    clippy::explicit_iter_loop,
    clippy::implicit_clone,
    clippy::inconsistent_struct_constructor,
    clippy::manual_assert,
    clippy::manual_let_else,
    clippy::match_same_arms,
    clippy::needless_pass_by_value,
    clippy::semicolon_if_nothing_returned,
    clippy::uninlined_format_args,
    clippy::unnested_or_patterns,
    clippy::std_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::alloc_instead_of_core
)]
#![allow(
    clippy::mod_module_files,
    clippy::self_named_module_files,
    clippy::similar_names,
    clippy::too_many_arguments,
    clippy::struct_excessive_bools,
    clippy::fn_params_excessive_bools,
    clippy::type_complexity,
    clippy::must_use_candidate,
    clippy::assertions_on_constants,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::cast_lossless,
    clippy::panic_in_result_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::module_name_repetitions,
    clippy::wildcard_imports,
    clippy::items_after_statements
)]

// =============================================================================
// Modules
// =============================================================================

pub mod driver;
pub mod hal;
pub mod phy;

// Internal implementation details (pub(crate) only)
mod internal;

#[cfg(feature = "critical-section")]
#[cfg_attr(docsrs, doc(cfg(feature = "critical-section")))]
pub mod sync;

// Test utilities (only available during testing)
#[cfg(test)]
pub mod testing;

// =============================================================================
// Re-exports
// =============================================================================

pub use driver::bringup::{ConfigReport, ConfigStep, State, StepOutcome};
pub use driver::config::{
    ChipSelectMode, DriverConfig, Duplex, InterfaceConfig, MacAddress, SoftReset, Speed, Timing,
    Watermarks,
};
pub use driver::error::{BusError, BusResult, ConfigError, Error, IoError, Result};
pub use driver::interrupt::InterruptStatus;
pub use driver::ksz::Ksz8851;
pub use driver::status::{ChipId, RxFrameHeader, TxStatus};

pub use hal::embedded::{HalPlatform, TickSource};
pub use hal::platform::{PinId, PinLevel, Platform};

// Re-export PHY types
pub use phy::{LinkStatus, PhyCapabilities, PhyStatus, PortStatus};

// Re-export sync types when critical-section is enabled
#[cfg(feature = "critical-section")]
pub use sync::SharedKsz8851;

/// Shared driver constants.
///
/// These are grouped into a dedicated module to keep the top-level facade
/// focused on driver types.
pub mod constants {
    pub use crate::internal::constants::{
        // Frame/buffer sizes
        CRC_SIZE,
        // MAC address
        DEFAULT_MAC_ADDR,
        ETH_HEADER_SIZE,
        // Bring-up
        IDENTITY_ATTEMPTS,
        MAC_ADDR_LEN,
        MAX_FRAME_SIZE,
        MTU,
        // Timing
        RESET_HOLD_MS,
        RESET_RECOVERY_MS,
        RX_BUFFER_SIZE,
        SETTLE_MS,
    };
}
