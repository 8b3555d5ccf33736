//! Decoders for the transmit, receive and identity registers.
//!
//! All types are plain snapshots built from a fresh register read; nothing
//! here talks to the chip.

// =============================================================================
// TX Status (TXSR)
// =============================================================================

const TXSR_LATE_COLLISION: u16 = 1 << 13;
const TXSR_MAX_COLLISION: u16 = 1 << 12;
const TXSR_FRAME_ID_MASK: u16 = 0x003F;

/// Status of the most recently transmitted frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TxStatus {
    /// Collision after the first 64 bytes
    pub late_collision: bool,
    /// Frame dropped after 16 collisions
    pub max_collision: bool,
    /// Frame ID given to the frame when it was queued
    pub frame_id: u8,
}

impl TxStatus {
    /// Decode a TXSR value
    #[inline]
    pub const fn from_raw(raw: u16) -> Self {
        Self {
            late_collision: raw & TXSR_LATE_COLLISION != 0,
            max_collision: raw & TXSR_MAX_COLLISION != 0,
            frame_id: (raw & TXSR_FRAME_ID_MASK) as u8,
        }
    }

    /// Frame left the wire without a collision error
    #[inline]
    pub const fn is_ok(&self) -> bool {
        !self.late_collision && !self.max_collision
    }
}

// =============================================================================
// RX Frame Header (RXFHSR + RXFHBCR)
// =============================================================================

const RXFHSR_VALID: u16 = 1 << 15;
const RXFHSR_ICMP_ERROR: u16 = 1 << 13;
const RXFHSR_IP_ERROR: u16 = 1 << 12;
const RXFHSR_TCP_ERROR: u16 = 1 << 11;
const RXFHSR_UDP_ERROR: u16 = 1 << 10;
const RXFHSR_BROADCAST: u16 = 1 << 7;
const RXFHSR_MULTICAST: u16 = 1 << 6;
const RXFHSR_UNICAST: u16 = 1 << 5;
const RXFHSR_MII_ERROR: u16 = 1 << 4;
const RXFHSR_FRAME_TYPE: u16 = 1 << 3;
const RXFHSR_TOO_LONG: u16 = 1 << 2;
const RXFHSR_RUNT: u16 = 1 << 1;
const RXFHSR_CRC_ERROR: u16 = 1 << 0;
const RXFHBCR_COUNT_MASK: u16 = 0x0FFF;

/// Header of the frame at the head of the RX queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RxFrameHeader {
    /// Frame is complete and valid
    pub valid: bool,
    /// ICMP checksum failed
    pub icmp_checksum_error: bool,
    /// IP header checksum failed
    pub ip_checksum_error: bool,
    /// TCP checksum failed
    pub tcp_checksum_error: bool,
    /// UDP checksum failed
    pub udp_checksum_error: bool,
    /// Broadcast destination
    pub broadcast: bool,
    /// Multicast destination
    pub multicast: bool,
    /// Unicast destination
    pub unicast: bool,
    /// MII symbol error during reception
    pub mii_error: bool,
    /// Ethernet (type/length > 1500) frame
    pub ethernet_type: bool,
    /// Longer than the maximum frame size
    pub too_long: bool,
    /// Shorter than 64 bytes
    pub runt: bool,
    /// Frame check sequence mismatch
    pub crc_error: bool,
    /// Bytes in the queue for this frame, CRC included
    pub byte_count: u16,
}

impl RxFrameHeader {
    /// Decode from RXFHSR and RXFHBCR
    pub const fn from_raw(status: u16, byte_count: u16) -> Self {
        Self {
            valid: status & RXFHSR_VALID != 0,
            icmp_checksum_error: status & RXFHSR_ICMP_ERROR != 0,
            ip_checksum_error: status & RXFHSR_IP_ERROR != 0,
            tcp_checksum_error: status & RXFHSR_TCP_ERROR != 0,
            udp_checksum_error: status & RXFHSR_UDP_ERROR != 0,
            broadcast: status & RXFHSR_BROADCAST != 0,
            multicast: status & RXFHSR_MULTICAST != 0,
            unicast: status & RXFHSR_UNICAST != 0,
            mii_error: status & RXFHSR_MII_ERROR != 0,
            ethernet_type: status & RXFHSR_FRAME_TYPE != 0,
            too_long: status & RXFHSR_TOO_LONG != 0,
            runt: status & RXFHSR_RUNT != 0,
            crc_error: status & RXFHSR_CRC_ERROR != 0,
            byte_count: byte_count & RXFHBCR_COUNT_MASK,
        }
    }

    /// Any error flag set
    pub const fn has_error(&self) -> bool {
        self.icmp_checksum_error
            || self.ip_checksum_error
            || self.tcp_checksum_error
            || self.udp_checksum_error
            || self.mii_error
            || self.too_long
            || self.runt
            || self.crc_error
    }

    /// Valid, error free and non-empty
    pub const fn is_good(&self) -> bool {
        self.valid && !self.has_error() && self.byte_count != 0
    }
}

// =============================================================================
// Chip ID (CIDER)
// =============================================================================

/// Decoded chip identity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChipId {
    /// Family ID (0x88)
    pub family: u8,
    /// Chip ID (0x7 for the KSZ8851SNL)
    pub chip: u8,
    /// Silicon revision
    pub revision: u8,
}

impl ChipId {
    /// Decode a CIDER value
    pub const fn from_raw(raw: u16) -> Self {
        Self {
            family: (raw >> 8) as u8,
            chip: ((raw >> 4) & 0x0F) as u8,
            revision: ((raw >> 1) & 0x07) as u8,
        }
    }

    /// Family and chip match the KSZ8851SNL
    pub const fn is_ksz8851(&self) -> bool {
        self.family == 0x88 && self.chip == 0x7
    }
}
