//! Reset sequences
//!
//! The hard reset pulses the chip's active-low RSTN line; the soft reset
//! pulses bits in the global reset register (GRR).

use crate::driver::config::{SoftReset, Timing};
use crate::driver::error::BusResult;
use crate::driver::register::RegisterEngine;
use crate::hal::platform::{PinId, PinLevel, Platform, wait_ms};
use crate::internal::constants::SOFT_RESET_HOLD_MS;
use crate::internal::regs::GRR;

/// Pulse the reset line and wait for the chip to come out of reset.
///
/// No register access is valid until this returns.
pub fn hard_reset<P: Platform + ?Sized>(platform: &mut P, pin: PinId, timing: &Timing) {
    #[cfg(feature = "defmt")]
    defmt::debug!("hard reset ({} ms hold)", timing.reset_hold_ms);

    platform.set_pin(pin, PinLevel::Low);
    wait_ms(platform, timing.reset_hold_ms);
    platform.set_pin(pin, PinLevel::High);
    wait_ms(platform, timing.reset_recovery_ms);
}

/// Pulse the GRR bits for `kind`, then restore the register.
///
/// The release write is attempted even if setting the bits failed.
pub fn soft_reset<P: Platform>(regs: &mut RegisterEngine<P>, kind: SoftReset) -> BusResult {
    if kind == SoftReset::None {
        return Ok(());
    }

    #[cfg(feature = "defmt")]
    defmt::debug!("soft reset: {}", kind);

    let original = regs.read(GRR)?;

    let asserted = regs.write(GRR, original | kind.bits());
    wait_ms(regs.platform_mut(), SOFT_RESET_HOLD_MS);
    let released = regs.write(GRR, original);
    wait_ms(regs.platform_mut(), SOFT_RESET_HOLD_MS);

    asserted?;
    released
}
