//! KSZ8851SNL register map and bit definitions.
//!
//! Addresses are the byte offsets of the 16-bit registers as listed in the
//! datasheet register map. Only the bits the driver touches are named.

#![allow(dead_code)]

// =============================================================================
// Register Addresses
// =============================================================================

/// Chip configuration
pub const CCR: u8 = 0x08;
/// Host MAC address, low / middle / high
pub const MARL: u8 = 0x10;
pub const MARM: u8 = 0x12;
pub const MARH: u8 = 0x14;
/// On-chip bus control
pub const OBCR: u8 = 0x20;
/// EEPROM control
pub const EEPCR: u8 = 0x22;
/// Memory BIST info
pub const MBIR: u8 = 0x24;
/// Global reset
pub const GRR: u8 = 0x26;
/// Wake-up frame control
pub const WFCR: u8 = 0x2A;

/// Wake-up frame 0..3 CRC and byte mask registers
pub const WF0CRC0: u8 = 0x30;
pub const WF0CRC1: u8 = 0x32;
pub const WF0BM0: u8 = 0x34;
pub const WF0BM1: u8 = 0x36;
pub const WF0BM2: u8 = 0x38;
pub const WF0BM3: u8 = 0x3A;
pub const WF1CRC0: u8 = 0x40;
pub const WF1CRC1: u8 = 0x42;
pub const WF1BM0: u8 = 0x44;
pub const WF1BM1: u8 = 0x46;
pub const WF1BM2: u8 = 0x48;
pub const WF1BM3: u8 = 0x4A;
pub const WF2CRC0: u8 = 0x50;
pub const WF2CRC1: u8 = 0x52;
pub const WF2BM0: u8 = 0x54;
pub const WF2BM1: u8 = 0x56;
pub const WF2BM2: u8 = 0x58;
pub const WF2BM3: u8 = 0x5A;
pub const WF3CRC0: u8 = 0x60;
pub const WF3CRC1: u8 = 0x62;
pub const WF3BM0: u8 = 0x64;
pub const WF3BM1: u8 = 0x66;
pub const WF3BM2: u8 = 0x68;
pub const WF3BM3: u8 = 0x6A;

/// Transmit control
pub const TXCR: u8 = 0x70;
/// Transmit status
pub const TXSR: u8 = 0x72;
/// Receive control 1 / 2
pub const RXCR1: u8 = 0x74;
pub const RXCR2: u8 = 0x76;
/// TXQ memory information (free bytes)
pub const TXMIR: u8 = 0x78;
/// Receive frame header status
pub const RXFHSR: u8 = 0x7C;
/// Receive frame header byte count
pub const RXFHBCR: u8 = 0x7E;
/// TXQ command
pub const TXQCR: u8 = 0x80;
/// RXQ command
pub const RXQCR: u8 = 0x82;
/// TX / RX frame data pointer
pub const TXFDPR: u8 = 0x84;
pub const RXFDPR: u8 = 0x86;
/// RX duration timer threshold
pub const RXDTTR: u8 = 0x8C;
/// RX data byte count threshold
pub const RXDBCTR: u8 = 0x8E;
/// Interrupt enable / status
pub const IER: u8 = 0x90;
pub const ISR: u8 = 0x92;
/// RX frame count and threshold
pub const RXFCTR: u8 = 0x9C;
/// TX next total frames size
pub const TXNTFSR: u8 = 0x9E;
/// Multicast hash table
pub const MAHTR0: u8 = 0xA0;
pub const MAHTR1: u8 = 0xA2;
pub const MAHTR2: u8 = 0xA4;
pub const MAHTR3: u8 = 0xA6;
/// Flow control low / high / overrun watermark
pub const FCLWR: u8 = 0xB0;
pub const FCHWR: u8 = 0xB2;
pub const FCOWR: u8 = 0xB4;
/// Chip ID and enable
pub const CIDER: u8 = 0xC0;
/// Chip global control
pub const CGCR: u8 = 0xC6;
/// Indirect access control / data
pub const IACR: u8 = 0xC8;
pub const IADLR: u8 = 0xD0;
pub const IADHR: u8 = 0xD2;
/// Power management event control
pub const PMECR: u8 = 0xD4;
/// Go-sleep and wake-up time
pub const GSWUTR: u8 = 0xD6;
/// PHY reset
pub const PHYRR: u8 = 0xD8;
/// PHY 1 MII basic control / status
pub const P1MBCR: u8 = 0xE4;
pub const P1MBSR: u8 = 0xE6;
/// PHY 1 identifier low / high
pub const PHY1ILR: u8 = 0xE8;
pub const PHY1IHR: u8 = 0xEA;
/// Port 1 auto-negotiation advertisement / link partner ability
pub const P1ANAR: u8 = 0xEC;
pub const P1ANLPR: u8 = 0xEE;
/// Port 1 PHY special control / status, LinkMD
pub const P1SCLMD: u8 = 0xF4;
/// Port 1 control / status
pub const P1CR: u8 = 0xF6;
pub const P1SR: u8 = 0xF8;

/// Whether a write to `addr` must preserve the register's reserved bits.
///
/// Registers whose every bit is defined return `false`; everything else,
/// including addresses not in the map, returns `true`.
pub const fn has_reserved_bits(addr: u8) -> bool {
    !matches!(
        addr,
        MARL | MARM
            | MARH
            | WF0CRC0
            | WF0CRC1
            | WF0BM0
            | WF0BM1
            | WF0BM2
            | WF0BM3
            | WF1CRC0
            | WF1CRC1
            | WF1BM0
            | WF1BM1
            | WF1BM2
            | WF1BM3
            | WF2CRC0
            | WF2CRC1
            | WF2BM0
            | WF2BM1
            | WF2BM2
            | WF2BM3
            | WF3CRC0
            | WF3CRC1
            | WF3BM0
            | WF3BM1
            | WF3BM2
            | WF3BM3
            | RXDTTR
            | RXDBCTR
            | RXFCTR
            | TXNTFSR
            | MAHTR0
            | MAHTR1
            | MAHTR2
            | MAHTR3
            | IADLR
            | IADHR
            | GSWUTR
    )
}

// =============================================================================
// Identity
// =============================================================================

/// Expected CIDER value after masking the revision field
pub const CHIP_ID: u16 = 0x8870;
/// CIDER mask dropping the revision bits
pub const CHIP_ID_MASK: u16 = 0xFFF0;

// =============================================================================
// Bit Definitions
// =============================================================================

/// GRR bits
pub mod grr {
    pub const GLOBAL_RESET: u16 = 0x0001;
    pub const QMU_RESET: u16 = 0x0002;
}

/// TXFDPR / RXFDPR bits
pub mod fdpr {
    pub const AUTO_INCREMENT: u16 = 0x4000;
    pub const POINTER_MASK: u16 = 0x07FF;
}

/// TXCR bits
pub mod txcr {
    pub const ENABLE: u16 = 0x0001;
    pub const CRC: u16 = 0x0002;
    pub const PAD: u16 = 0x0004;
    pub const FLOW: u16 = 0x0008;
    pub const FLUSH: u16 = 0x0010;
    pub const IP_CHECKSUM: u16 = 0x0020;
    pub const TCP_CHECKSUM: u16 = 0x0040;
    pub const UDP_CHECKSUM: u16 = 0x0080;
    pub const ICMP_CHECKSUM: u16 = 0x0100;
}

/// RXCR1 bits
pub mod rxcr1 {
    pub const ENABLE: u16 = 0x0001;
    pub const INVERSE_FILTER: u16 = 0x0002;
    pub const ALL: u16 = 0x0010;
    pub const UNICAST: u16 = 0x0020;
    pub const ALL_MULTICAST: u16 = 0x0040;
    pub const BROADCAST: u16 = 0x0080;
    pub const MULTICAST: u16 = 0x0100;
    pub const ERROR: u16 = 0x0200;
    pub const FLOW: u16 = 0x0400;
    pub const MAC_FILTER: u16 = 0x0800;
    pub const IP_CHECKSUM: u16 = 0x1000;
    pub const TCP_CHECKSUM: u16 = 0x2000;
    pub const UDP_CHECKSUM: u16 = 0x4000;
    pub const FLUSH: u16 = 0x8000;
}

/// RXCR2 bits
pub mod rxcr2 {
    pub const BLOCK_SAME_MAC: u16 = 0x0001;
    pub const ICMP_CHECKSUM: u16 = 0x0002;
    pub const UDP_LITE_CHECKSUM: u16 = 0x0004;
    pub const IPV6_UDP_ZERO_CHECKSUM: u16 = 0x0008;
    pub const IPV6_UDP_FRAGMENT_PASS: u16 = 0x0010;
    pub const BURST_4: u16 = 0x0000;
    pub const BURST_8: u16 = 0x0020;
    pub const BURST_16: u16 = 0x0040;
    pub const BURST_32: u16 = 0x0060;
    pub const BURST_SINGLE_FRAME: u16 = 0x0080;
}

/// RXFCTR fields
pub mod rxfctr {
    pub const THRESHOLD_ONE_FRAME: u16 = 0x0001;
    pub const COUNT_SHIFT: u16 = 8;
}

/// TXQCR bits
pub mod txqcr {
    pub const MANUAL_ENQUEUE: u16 = 0x0001;
}

/// RXQCR bits
pub mod rxqcr {
    pub const RELEASE_ERROR_FRAME: u16 = 0x0001;
    pub const START_DMA_ACCESS: u16 = 0x0008;
    pub const AUTO_DEQUEUE: u16 = 0x0010;
    pub const FRAME_COUNT_THRESHOLD: u16 = 0x0020;
    pub const BYTE_COUNT_THRESHOLD: u16 = 0x0040;
    pub const DURATION_THRESHOLD: u16 = 0x0080;
    pub const IP_TWO_BYTE_OFFSET: u16 = 0x0200;
    pub const FRAME_COUNT_STATUS: u16 = 0x0400;
    pub const BYTE_COUNT_STATUS: u16 = 0x0800;
    pub const DURATION_STATUS: u16 = 0x1000;
}

/// TXMIR fields
pub mod txmir {
    pub const FREE_MASK: u16 = 0x1FFF;
}

/// OBCR fields
pub mod obcr {
    pub const DIVIDE_BY_1: u16 = 0x0000;
    pub const CLOCK_125MHZ: u16 = 0x0000;
    pub const STRENGTH_8MA: u16 = 0x0000;
    pub const STRENGTH_16MA: u16 = 0x0040;
}

/// P1CR bits
pub mod p1cr {
    pub const ADVERTISE_10HD: u16 = 0x0001;
    pub const ADVERTISE_10FD: u16 = 0x0002;
    pub const ADVERTISE_100HD: u16 = 0x0004;
    pub const ADVERTISE_100FD: u16 = 0x0008;
    pub const ADVERTISE_PAUSE: u16 = 0x0010;
    pub const FORCE_FULL_DUPLEX: u16 = 0x0020;
    pub const FORCE_100: u16 = 0x0040;
    pub const AUTO_NEG_ENABLE: u16 = 0x0080;
    pub const FORCE_MDIX: u16 = 0x0200;
    pub const AUTO_MDIX_DISABLE: u16 = 0x0400;
    pub const AUTO_NEG_RESTART: u16 = 0x2000;
    pub const TX_DISABLE: u16 = 0x4000;
    pub const LED_OFF: u16 = 0x8000;
}

/// Interrupt bits shared by IER and ISR
pub mod int {
    pub const LINK_CHANGE: u16 = 1 << 15;
    pub const TX: u16 = 1 << 14;
    pub const RX: u16 = 1 << 13;
    pub const RX_OVERRUN: u16 = 1 << 11;
    pub const TX_STOPPED: u16 = 1 << 9;
    pub const RX_STOPPED: u16 = 1 << 8;
    pub const TX_SPACE: u16 = 1 << 6;
    pub const WAKEUP_FRAME: u16 = 1 << 5;
    pub const MAGIC_PACKET: u16 = 1 << 4;
    pub const LINKUP: u16 = 1 << 3;
    pub const ENERGY: u16 = 1 << 2;
    pub const SPI_ERROR: u16 = 1 << 1;
    pub const ALL: u16 = 0xFFFF;
}

/// Flow control watermarks, in KSZ 4-byte units
pub mod watermark {
    pub const KB_4: u16 = 0x0400;
    pub const KB_6: u16 = 0x0600;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fully_defined_registers() {
        for addr in [MARL, MARM, MARH, RXFCTR, TXNTFSR, MAHTR2, IADHR, GSWUTR, WF2BM3] {
            assert!(!has_reserved_bits(addr), "{addr:#04x}");
        }
    }

    #[test]
    fn registers_with_reserved_bits() {
        for addr in [CCR, GRR, TXCR, RXCR1, RXQCR, ISR, IER, P1CR, OBCR, FCLWR, CIDER] {
            assert!(has_reserved_bits(addr), "{addr:#04x}");
        }
    }

    #[test]
    fn unmapped_addresses_preserve() {
        assert!(has_reserved_bits(0x00));
        assert!(has_reserved_bits(0xFE));
    }
}
