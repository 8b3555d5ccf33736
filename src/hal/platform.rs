//! Platform capability trait.
//!
//! The driver never touches hardware directly. Everything it needs from the
//! host (a millisecond tick, three SPI primitives and a GPIO setter) comes
//! through [`Platform`], which the driver owns for its whole lifetime.

use crate::driver::error::BusResult;

// =============================================================================
// Pins
// =============================================================================

/// Opaque identifier of a GPIO line.
///
/// The driver only hands these back to [`Platform::set_pin`]; their meaning
/// is up to the platform implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinId {
    /// Port (GPIO bank) identifier
    pub port: u32,
    /// Pin number within the port
    pub pin: u16,
}

impl PinId {
    /// Create a pin identifier
    pub const fn new(port: u32, pin: u16) -> Self {
        Self { port, pin }
    }
}

/// Output level for [`Platform::set_pin`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinLevel {
    /// Drive low
    Low,
    /// Drive high
    High,
}

// =============================================================================
// Platform Trait
// =============================================================================

/// Host services consumed by the driver.
///
/// All SPI primitives are blocking and MSB first. Chip select is driven
/// separately through [`set_pin`](Self::set_pin) unless the interface is
/// configured for [`ChipSelectMode::External`](crate::driver::config::ChipSelectMode).
///
/// # Example Implementation
///
/// ```ignore
/// struct Board { spi: Spi, gpio: Gpio, timer: Timer }
///
/// impl Platform for Board {
///     fn get_tick(&mut self) -> u32 { self.timer.millis() }
///     fn transmit(&mut self, data: &[u8]) -> BusResult {
///         self.spi.write(data).map_err(|_| BusError::Transfer)
///     }
///     // ...
/// }
/// ```
pub trait Platform {
    /// Monotonic millisecond counter; wrapping is expected.
    fn get_tick(&mut self) -> u32;

    /// Clock `data` out, discarding whatever is clocked in.
    fn transmit(&mut self, data: &[u8]) -> BusResult;

    /// Fill `buf` with bytes clocked in while sending filler.
    fn receive(&mut self, buf: &mut [u8]) -> BusResult;

    /// Full-duplex exchange of `tx.len()` bytes.
    ///
    /// `tx` and `rx` have the same length.
    fn transmit_receive(&mut self, tx: &[u8], rx: &mut [u8]) -> BusResult;

    /// Drive a GPIO line.
    fn set_pin(&mut self, pin: PinId, level: PinLevel);
}

/// Busy-wait for `ms` milliseconds using the platform tick.
///
/// The elapsed time is computed with wrapping arithmetic, so a tick counter
/// rolling over mid-wait does not shorten or extend the delay.
pub fn wait_ms<P: Platform + ?Sized>(platform: &mut P, ms: u32) {
    if ms == 0 {
        return;
    }
    let start = platform.get_tick();
    while platform.get_tick().wrapping_sub(start) < ms {
        core::hint::spin_loop();
    }
}
