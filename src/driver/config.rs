//! Configuration types for the KSZ8851SNL driver

use crate::hal::platform::PinId;
use crate::internal::constants::{
    DEFAULT_MAC_ADDR, MAC_ADDR_LEN, RESET_HOLD_MS, RESET_RECOVERY_MS, SETTLE_MS,
};
use crate::internal::regs::{grr, watermark};

/// Ethernet link speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Speed {
    /// 10 Mbps
    Mbps10,
    /// 100 Mbps
    #[default]
    Mbps100,
}

/// Ethernet duplex mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Duplex {
    /// Half duplex
    Half,
    /// Full duplex
    #[default]
    Full,
}

// =============================================================================
// Interface
// =============================================================================

/// Who drives the chip-select line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChipSelectMode {
    /// The driver asserts chip select around every transaction and waits
    /// the settle time before releasing it
    #[default]
    Driver,
    /// Chip select is handled outside the driver (hardware NSS or the
    /// platform's SPI layer); no pin toggles and no settle delay
    External,
}

/// Pins wiring the chip to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InterfaceConfig {
    /// Chip-select (active low)
    pub chip_select: PinId,
    /// Hardware reset (active low)
    pub reset: PinId,
    /// Chip-select ownership
    pub cs_mode: ChipSelectMode,
}

impl InterfaceConfig {
    /// Interface with driver-managed chip select
    #[must_use]
    pub const fn new(chip_select: PinId, reset: PinId) -> Self {
        Self {
            chip_select,
            reset,
            cs_mode: ChipSelectMode::Driver,
        }
    }

    /// Set the chip-select ownership mode
    #[must_use]
    pub const fn with_cs_mode(mut self, mode: ChipSelectMode) -> Self {
        self.cs_mode = mode;
        self
    }
}

// =============================================================================
// MAC Address
// =============================================================================

/// Station MAC address.
///
/// The chip stores the address in three 16-bit registers, most significant
/// pair in MARH. [`register_words`](Self::register_words) gives the values
/// to write, which put the earlier byte of each pair in the high half.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MacAddress([u8; MAC_ADDR_LEN]);

impl MacAddress {
    /// Wrap six address bytes
    pub const fn new(bytes: [u8; MAC_ADDR_LEN]) -> Self {
        Self(bytes)
    }

    /// Address bytes in transmission order
    pub const fn bytes(&self) -> [u8; MAC_ADDR_LEN] {
        self.0
    }

    /// Bytes 0 and 1 as a little-endian group
    pub const fn high(&self) -> u16 {
        u16::from_le_bytes([self.0[0], self.0[1]])
    }

    /// Bytes 2 and 3 as a little-endian group
    pub const fn middle(&self) -> u16 {
        u16::from_le_bytes([self.0[2], self.0[3]])
    }

    /// Bytes 4 and 5 as a little-endian group
    pub const fn low(&self) -> u16 {
        u16::from_le_bytes([self.0[4], self.0[5]])
    }

    /// Values for MARL, MARM and MARH, in that order
    pub const fn register_words(&self) -> [u16; 3] {
        [
            self.low().swap_bytes(),
            self.middle().swap_bytes(),
            self.high().swap_bytes(),
        ]
    }

    /// Rebuild an address from MARL, MARM and MARH values
    pub const fn from_register_words(marl: u16, marm: u16, marh: u16) -> Self {
        let h = marh.to_be_bytes();
        let m = marm.to_be_bytes();
        let l = marl.to_be_bytes();
        Self([h[0], h[1], m[0], m[1], l[0], l[1]])
    }

    /// Locally administered bit set
    pub const fn is_local(&self) -> bool {
        self.0[0] & 0x02 != 0
    }

    /// Group (multicast) bit set
    pub const fn is_multicast(&self) -> bool {
        self.0[0] & 0x01 != 0
    }
}

impl Default for MacAddress {
    fn default() -> Self {
        Self(DEFAULT_MAC_ADDR)
    }
}

impl From<[u8; MAC_ADDR_LEN]> for MacAddress {
    fn from(bytes: [u8; MAC_ADDR_LEN]) -> Self {
        Self(bytes)
    }
}

impl core::fmt::Display for MacAddress {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let b = self.0;
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            b[0], b[1], b[2], b[3], b[4], b[5]
        )
    }
}

// =============================================================================
// Timing
// =============================================================================

/// Delays used during bring-up and register access, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timing {
    /// Time the reset line is held low
    pub reset_hold_ms: u32,
    /// Wait after releasing reset before the first register access
    pub reset_recovery_ms: u32,
    /// Wait between the end of a register exchange and releasing chip select
    pub settle_ms: u32,
}

impl Timing {
    /// Default timing
    pub const fn new() -> Self {
        Self {
            reset_hold_ms: RESET_HOLD_MS,
            reset_recovery_ms: RESET_RECOVERY_MS,
            settle_ms: SETTLE_MS,
        }
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Soft Reset
// =============================================================================

/// Software reset performed after the identity check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SoftReset {
    /// Skip the soft reset
    None,
    /// Reset PHY, MAC, QMU and all registers
    #[default]
    Global,
    /// Flush both queues and reset the QMU registers
    Queue,
}

impl SoftReset {
    /// GRR bits for this reset
    pub const fn bits(self) -> u16 {
        match self {
            SoftReset::None => 0,
            SoftReset::Global => grr::GLOBAL_RESET,
            SoftReset::Queue => grr::QMU_RESET,
        }
    }
}

// =============================================================================
// Flow Control Watermarks
// =============================================================================

/// RX flow control thresholds written to FCLWR / FCHWR
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Watermarks {
    /// Free-space level that releases flow control
    pub low: u16,
    /// Free-space level that asserts flow control
    pub high: u16,
}

impl Watermarks {
    /// 4 KB low, 6 KB high
    pub const fn new() -> Self {
        Self {
            low: watermark::KB_4,
            high: watermark::KB_6,
        }
    }
}

impl Default for Watermarks {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Driver Configuration
// =============================================================================

/// Driver configuration
///
/// Built with the `with_*` methods:
///
/// ```ignore
/// let config = DriverConfig::new()
///     .with_interface(InterfaceConfig::new(PinId::new(0, 4), PinId::new(1, 0)))
///     .with_mac_address([0x02, 0x00, 0x00, 0x12, 0x34, 0x56])
///     .with_soft_reset(SoftReset::Global);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DriverConfig {
    /// Chip-select and reset wiring
    pub interface: InterfaceConfig,
    /// Station MAC address
    pub mac_address: MacAddress,
    /// Reset and settle delays
    pub timing: Timing,
    /// Soft reset applied after the identity check
    pub soft_reset: SoftReset,
    /// Apply the default TX/RX/PHY register settings during bring-up
    pub use_default_settings: bool,
    /// Enable the transmitter, receiver and interrupts at the end of bring-up
    pub enable_on_init: bool,
    /// Check TXMIR free space before queueing a frame
    pub check_tx_space: bool,
    /// Flow control watermarks
    pub watermarks: Watermarks,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl DriverConfig {
    /// Create a new configuration with defaults
    #[must_use]
    pub const fn new() -> Self {
        Self {
            interface: InterfaceConfig::new(PinId::new(0, 0), PinId::new(0, 1)),
            mac_address: MacAddress::new(DEFAULT_MAC_ADDR),
            timing: Timing::new(),
            soft_reset: SoftReset::Global,
            use_default_settings: true,
            enable_on_init: true,
            check_tx_space: true,
            watermarks: Watermarks::new(),
        }
    }

    /// Set the pin wiring
    #[must_use]
    pub const fn with_interface(mut self, interface: InterfaceConfig) -> Self {
        self.interface = interface;
        self
    }

    /// Set the MAC address
    #[must_use]
    pub const fn with_mac_address(mut self, addr: [u8; 6]) -> Self {
        self.mac_address = MacAddress::new(addr);
        self
    }

    /// Set reset and settle timing
    #[must_use]
    pub const fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    /// Set the soft reset kind
    #[must_use]
    pub const fn with_soft_reset(mut self, soft_reset: SoftReset) -> Self {
        self.soft_reset = soft_reset;
        self
    }

    /// Apply or skip the default register settings
    #[must_use]
    pub const fn with_default_settings(mut self, enabled: bool) -> Self {
        self.use_default_settings = enabled;
        self
    }

    /// Start the datapath at the end of bring-up
    #[must_use]
    pub const fn with_enable_on_init(mut self, enabled: bool) -> Self {
        self.enable_on_init = enabled;
        self
    }

    /// Check TX queue space before each transmit
    #[must_use]
    pub const fn with_tx_space_check(mut self, enabled: bool) -> Self {
        self.check_tx_space = enabled;
        self
    }

    /// Set the flow control watermarks
    #[must_use]
    pub const fn with_watermarks(mut self, watermarks: Watermarks) -> Self {
        self.watermarks = watermarks;
        self
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
