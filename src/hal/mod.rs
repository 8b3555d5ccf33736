//! Hardware Abstraction Layer
//!
//! The driver reaches the outside world only through the [`Platform`] trait.
//!
//! # Modules
//!
//! - [`platform`]: The [`Platform`] trait, pin identifiers and the tick-based delay
//! - [`embedded`]: [`Platform`] over `embedded-hal` 1.0 SPI and GPIO traits
//! - [`reset`]: Hard (RSTN pin) and soft (GRR) reset sequences

pub mod embedded;
pub mod platform;
pub mod reset;

// Re-export commonly used types
pub use embedded::{HalPlatform, TickSource};
pub use platform::{PinId, PinLevel, Platform, wait_ms};
pub use reset::{hard_reset, soft_reset};
