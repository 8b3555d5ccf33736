//! Register access engine.
//!
//! Each register access is one 4-byte SPI transaction framed by chip select.
//! The engine owns the [`Platform`] and is the only place that drives the
//! chip-select line, so FIFO bursts borrow it through
//! [`select`](RegisterEngine::select) / [`deselect`](RegisterEngine::deselect).

use crate::driver::config::{ChipSelectMode, InterfaceConfig};
use crate::driver::error::BusResult;
use crate::hal::platform::{PinLevel, Platform, wait_ms};
use crate::internal::frame::{REG_FRAME_LEN, decode_read, encode_read, encode_write};
use crate::internal::regs::has_reserved_bits;

/// Register read/write over the platform's SPI primitives
#[derive(Debug)]
pub struct RegisterEngine<P> {
    platform: P,
    interface: InterfaceConfig,
    settle_ms: u32,
}

impl<P: Platform> RegisterEngine<P> {
    /// Create an engine driving `interface`'s chip select.
    pub fn new(platform: P, interface: InterfaceConfig, settle_ms: u32) -> Self {
        Self {
            platform,
            interface,
            settle_ms,
        }
    }

    /// Read a 16-bit register.
    ///
    /// Bus errors are returned unchanged; chip select is released either way.
    pub fn read(&mut self, addr: u8) -> BusResult<u16> {
        let tx = encode_read(addr);
        let mut rx = [0u8; REG_FRAME_LEN];

        self.select();
        let result = self.platform.transmit_receive(&tx, &mut rx);
        self.settle();
        self.deselect();

        result.map(|()| decode_read(&rx))
    }

    /// Write a 16-bit register, replacing its whole value.
    pub fn write(&mut self, addr: u8, value: u16) -> BusResult {
        let tx = encode_write(addr, value);

        self.select();
        let result = self.platform.transmit(&tx);
        self.settle();
        self.deselect();

        result
    }

    /// Read-modify-write; returns the value written.
    pub fn modify<F>(&mut self, addr: u8, f: F) -> BusResult<u16>
    where
        F: FnOnce(u16) -> u16,
    {
        let value = f(self.read(addr)?);
        self.write(addr, value)?;
        Ok(value)
    }

    /// Set `mask` in a register; returns the value written.
    #[inline]
    pub fn set_bits(&mut self, addr: u8, mask: u16) -> BusResult<u16> {
        self.modify(addr, |v| v | mask)
    }

    /// Clear `mask` in a register; returns the value written.
    #[inline]
    pub fn clear_bits(&mut self, addr: u8, mask: u16) -> BusResult<u16> {
        self.modify(addr, |v| v & !mask)
    }

    /// Write `bits` without disturbing reserved bits.
    ///
    /// Registers that have reserved bits get their current value OR-ed in
    /// first. Fully defined registers are written directly.
    pub fn write_preserving(&mut self, addr: u8, bits: u16) -> BusResult {
        if has_reserved_bits(addr) {
            self.set_bits(addr, bits).map(|_| ())
        } else {
            self.write(addr, bits)
        }
    }

    /// Assert chip select when the driver owns it.
    pub(crate) fn select(&mut self) {
        if self.interface.cs_mode == ChipSelectMode::Driver {
            self.platform.set_pin(self.interface.chip_select, PinLevel::Low);
        }
    }

    /// Release chip select when the driver owns it.
    pub(crate) fn deselect(&mut self) {
        if self.interface.cs_mode == ChipSelectMode::Driver {
            self.platform.set_pin(self.interface.chip_select, PinLevel::High);
        }
    }

    fn settle(&mut self) {
        if self.interface.cs_mode == ChipSelectMode::Driver {
            wait_ms(&mut self.platform, self.settle_ms);
        }
    }

    /// Wiring this engine drives
    pub fn interface(&self) -> &InterfaceConfig {
        &self.interface
    }

    /// Shared access to the platform
    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Exclusive access to the platform
    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    /// Give back the platform
    pub fn into_platform(self) -> P {
        self.platform
    }
}

#[cfg(test)]
mod tests {
    extern crate std;
    use std::vec;

    use super::*;
    use crate::driver::error::BusError;
    use crate::hal::platform::PinId;
    use crate::internal::regs::{CIDER, MARM, RXFCTR, TXCR};
    use crate::testing::{BusOp, SimChip};

    fn engine() -> RegisterEngine<SimChip> {
        RegisterEngine::new(SimChip::new(), SimChip::interface(), 1)
    }

    #[test]
    fn write_then_read_round_trip() {
        let mut regs = engine();

        regs.write(TXCR, 0x01EE).unwrap();
        assert_eq!(regs.read(TXCR).unwrap(), 0x01EE);
    }

    #[test]
    fn fully_defined_registers_round_trip() {
        let mut regs = engine();
        let mut checked = 0;

        // RXFCTR carries the live frame count in its upper byte
        for addr in (0..=0xFEu8).step_by(2) {
            if has_reserved_bits(addr) || addr == RXFCTR {
                continue;
            }
            let value = 0xA55A ^ (u16::from(addr) << 4);
            regs.write(addr, value).unwrap();
            assert_eq!(regs.read(addr).unwrap(), value, "register {addr:#04x}");
            checked += 1;
        }

        assert_eq!(checked, 37);
    }

    #[test]
    fn read_identity() {
        let mut regs = engine();
        assert_eq!(regs.read(CIDER).unwrap(), 0x8872);
    }

    #[test]
    fn write_frame_on_the_wire() {
        let mut regs = engine();
        regs.write(MARM, 0x4567).unwrap();

        let sent = regs.platform().transmitted();
        assert_eq!(sent.last().unwrap().as_slice(), &[0x70, 0x40, 0x67, 0x45]);
    }

    #[test]
    fn chip_select_frames_each_access() {
        let mut regs = engine();
        regs.read(CIDER).unwrap();

        let cs = SimChip::CHIP_SELECT;
        assert_eq!(
            regs.platform().pins(),
            vec![(cs, PinLevel::Low), (cs, PinLevel::High)]
        );
    }

    #[test]
    fn settle_delay_before_release() {
        let mut regs = engine();
        let before = regs.platform().tick();
        regs.write(TXCR, 1).unwrap();
        assert!(regs.platform().tick().wrapping_sub(before) >= 1);
    }

    #[test]
    fn external_chip_select_skips_pins_and_settle() {
        let iface = SimChip::interface().with_cs_mode(ChipSelectMode::External);
        let mut regs = RegisterEngine::new(SimChip::new(), iface, 1);

        regs.write(TXCR, 0x0007).unwrap();
        assert_eq!(regs.read(TXCR).unwrap(), 0x0007);
        assert!(regs.platform().pins().is_empty());
        assert_eq!(regs.platform().tick(), 0);
    }

    #[test]
    fn bus_error_is_propagated_and_cs_released() {
        let mut regs = engine();
        regs.platform_mut().fail_next(BusOp::TransmitReceive, BusError::Timeout);

        assert_eq!(regs.read(CIDER), Err(BusError::Timeout));
        assert_eq!(
            regs.platform().pins().last().copied(),
            Some((SimChip::CHIP_SELECT, PinLevel::High))
        );
    }

    #[test]
    fn reserved_bits_survive_preserving_write() {
        let mut regs = engine();
        regs.platform_mut().set_register(TXCR, 0x8001);

        regs.write_preserving(TXCR, 0x0010).unwrap();
        assert_eq!(regs.platform().register(TXCR), 0x8011);
    }

    #[test]
    fn fully_defined_register_written_directly() {
        let mut regs = engine();
        regs.platform_mut().set_register(RXFCTR, 0x0300);

        regs.write_preserving(RXFCTR, 0x0001).unwrap();
        assert!(!regs.platform().reads().contains(&RXFCTR));
        assert_eq!(regs.platform().writes().last().copied(), Some((RXFCTR, 0x0001)));
    }

    #[test]
    fn set_and_clear_bits() {
        let mut regs = engine();
        regs.platform_mut().set_register(TXCR, 0x00F0);

        assert_eq!(regs.set_bits(TXCR, 0x0001).unwrap(), 0x00F1);
        assert_eq!(regs.clear_bits(TXCR, 0x0010).unwrap(), 0x00E1);
        assert_eq!(regs.platform().register(TXCR), 0x00E1);
    }

    #[test]
    fn modify_aborts_when_read_fails() {
        let mut regs = engine();
        regs.platform_mut().fail_next(BusOp::TransmitReceive, BusError::Busy);

        assert_eq!(regs.set_bits(TXCR, 1), Err(BusError::Busy));
        assert!(regs.platform().writes().is_empty());
    }

    #[test]
    fn custom_chip_select_pin() {
        let cs = PinId::new(3, 12);
        let iface = InterfaceConfig::new(cs, SimChip::RESET);
        let mut regs = RegisterEngine::new(SimChip::new().with_chip_select(cs), iface, 0);

        regs.write(TXCR, 2).unwrap();
        assert_eq!(regs.platform().pins()[0], (cs, PinLevel::Low));
    }
}
