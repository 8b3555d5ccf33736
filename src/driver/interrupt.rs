//! Interrupt status handling for the KSZ8851SNL.
//!
//! This module provides the [`InterruptStatus`] structure for parsing
//! and building ISR / IER values.

use crate::internal::regs::int;

// =============================================================================
// Interrupt Status
// =============================================================================

/// Interrupt flags as laid out in ISR and IER.
///
/// The same layout is used for pending status (ISR, write-1-to-clear) and
/// for the enable mask (IER).
///
/// # Example
///
/// ```ignore
/// let status = eth.interrupt_status()?;
/// if status.rx_frame {
///     while let Some(len) = eth.read_frame(&mut buf)? { /* ... */ }
/// }
/// eth.clear_interrupts(status)?;
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InterruptStatus {
    /// Link state changed
    pub link_change: bool,
    /// Frame transmitted
    pub tx_done: bool,
    /// Frame(s) available in the RX queue
    pub rx_frame: bool,
    /// RX queue overran
    pub rx_overrun: bool,
    /// Transmit process stopped
    pub tx_stopped: bool,
    /// Receive process stopped
    pub rx_stopped: bool,
    /// TX queue space became available
    pub tx_space: bool,
    /// Wake-up frame detected
    pub wakeup_frame: bool,
    /// Magic packet detected
    pub magic_packet: bool,
    /// Link-up wake event
    pub linkup: bool,
    /// Energy detected on the wire
    pub energy_detect: bool,
    /// SPI bus error
    pub spi_error: bool,
}

impl InterruptStatus {
    /// Flags enabled when the datapath is started
    pub const DATAPATH: Self = Self::from_raw(int::LINK_CHANGE | int::TX | int::RX);

    /// Create from a raw ISR or IER value
    #[inline]
    pub const fn from_raw(raw: u16) -> Self {
        Self {
            link_change: raw & int::LINK_CHANGE != 0,
            tx_done: raw & int::TX != 0,
            rx_frame: raw & int::RX != 0,
            rx_overrun: raw & int::RX_OVERRUN != 0,
            tx_stopped: raw & int::TX_STOPPED != 0,
            rx_stopped: raw & int::RX_STOPPED != 0,
            tx_space: raw & int::TX_SPACE != 0,
            wakeup_frame: raw & int::WAKEUP_FRAME != 0,
            magic_packet: raw & int::MAGIC_PACKET != 0,
            linkup: raw & int::LINKUP != 0,
            energy_detect: raw & int::ENERGY != 0,
            spi_error: raw & int::SPI_ERROR != 0,
        }
    }

    /// Convert to raw value (for IER, or write-1-to-clear on ISR)
    #[inline]
    pub const fn to_raw(&self) -> u16 {
        let mut val = 0u16;
        if self.link_change {
            val |= int::LINK_CHANGE;
        }
        if self.tx_done {
            val |= int::TX;
        }
        if self.rx_frame {
            val |= int::RX;
        }
        if self.rx_overrun {
            val |= int::RX_OVERRUN;
        }
        if self.tx_stopped {
            val |= int::TX_STOPPED;
        }
        if self.rx_stopped {
            val |= int::RX_STOPPED;
        }
        if self.tx_space {
            val |= int::TX_SPACE;
        }
        if self.wakeup_frame {
            val |= int::WAKEUP_FRAME;
        }
        if self.magic_packet {
            val |= int::MAGIC_PACKET;
        }
        if self.linkup {
            val |= int::LINKUP;
        }
        if self.energy_detect {
            val |= int::ENERGY;
        }
        if self.spi_error {
            val |= int::SPI_ERROR;
        }
        val
    }

    /// Check if any interrupt is flagged
    #[inline]
    pub const fn any(&self) -> bool {
        self.to_raw() != 0
    }

    /// Check if any error condition is flagged
    #[inline]
    pub const fn has_error(&self) -> bool {
        self.rx_overrun || self.tx_stopped || self.rx_stopped || self.spi_error
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
