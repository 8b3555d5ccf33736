//! `embedded-hal` 1.0 backed [`Platform`].
//!
//! [`HalPlatform`] owns an [`SpiBus`], the chip-select and reset
//! [`OutputPin`]s, and a millisecond [`TickSource`]. It answers
//! [`Platform::set_pin`] for [`CHIP_SELECT`] and [`RESET`], which
//! [`interface`] bundles for the driver config:
//!
//! ```ignore
//! let platform = HalPlatform::new(spi, cs, reset, || timer.now_ms());
//! let config = DriverConfig::new().with_interface(embedded::interface());
//! let mut eth = Ksz8851::new(platform, config);
//! eth.init()?;
//! ```

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use super::platform::{PinId, PinLevel, Platform};
use crate::driver::config::InterfaceConfig;
use crate::driver::error::{BusError, BusResult};

/// Source of a wrapping millisecond counter
pub trait TickSource {
    /// Current time in milliseconds
    fn now_ms(&mut self) -> u32;
}

impl<F> TickSource for F
where
    F: FnMut() -> u32,
{
    #[inline]
    fn now_ms(&mut self) -> u32 {
        self()
    }
}

/// Identifier [`HalPlatform`] answers for the chip-select line
pub const CHIP_SELECT: PinId = PinId::new(0, 0);
/// Identifier [`HalPlatform`] answers for the reset line
pub const RESET: PinId = PinId::new(0, 1);

/// Interface descriptor naming the [`HalPlatform`] pins
pub const fn interface() -> InterfaceConfig {
    InterfaceConfig::new(CHIP_SELECT, RESET)
}

/// [`Platform`] implementation over `embedded-hal` traits
#[derive(Debug)]
pub struct HalPlatform<SPI, CS, RST, T> {
    spi: SPI,
    cs: CS,
    reset: RST,
    tick: T,
}

impl<SPI, CS, RST, T> HalPlatform<SPI, CS, RST, T>
where
    SPI: SpiBus<u8>,
    CS: OutputPin,
    RST: OutputPin,
    T: TickSource,
{
    /// Create a platform from its parts.
    pub fn new(spi: SPI, cs: CS, reset: RST, tick: T) -> Self {
        Self {
            spi,
            cs,
            reset,
            tick,
        }
    }

    /// Give back the owned peripherals
    pub fn release(self) -> (SPI, CS, RST, T) {
        (self.spi, self.cs, self.reset, self.tick)
    }
}

impl<SPI, CS, RST, T> Platform for HalPlatform<SPI, CS, RST, T>
where
    SPI: SpiBus<u8>,
    CS: OutputPin,
    RST: OutputPin,
    T: TickSource,
{
    fn get_tick(&mut self) -> u32 {
        self.tick.now_ms()
    }

    fn transmit(&mut self, data: &[u8]) -> BusResult {
        self.spi.write(data).map_err(|_| BusError::Transfer)?;
        self.spi.flush().map_err(|_| BusError::Transfer)
    }

    fn receive(&mut self, buf: &mut [u8]) -> BusResult {
        self.spi.read(buf).map_err(|_| BusError::Transfer)?;
        self.spi.flush().map_err(|_| BusError::Transfer)
    }

    fn transmit_receive(&mut self, tx: &[u8], rx: &mut [u8]) -> BusResult {
        self.spi.transfer(rx, tx).map_err(|_| BusError::Transfer)?;
        self.spi.flush().map_err(|_| BusError::Transfer)
    }

    fn set_pin(&mut self, pin: PinId, level: PinLevel) {
        let driven = if pin == CHIP_SELECT {
            drive(&mut self.cs, level).is_ok()
        } else if pin == RESET {
            drive(&mut self.reset, level).is_ok()
        } else {
            true
        };

        if !driven {
            #[cfg(feature = "defmt")]
            defmt::warn!("failed to drive pin {}", pin);
        }
    }
}

fn drive<PIN: OutputPin>(pin: &mut PIN, level: PinLevel) -> Result<(), PIN::Error> {
    match level {
        PinLevel::Low => pin.set_low(),
        PinLevel::High => pin.set_high(),
    }
}
