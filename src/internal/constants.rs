//! Centralized Constants
//!
//! Frame dimensions, timing defaults and bring-up limits used throughout
//! the driver. Register addresses and bit definitions live in
//! [`regs`](super::regs).

// =============================================================================
// Frame and Buffer Sizes
// =============================================================================

/// Largest frame accepted by the TX path (1500 payload + 14 header, no CRC)
pub const MAX_FRAME_SIZE: usize = 1514;

/// Standard Ethernet MTU (Maximum Transmission Unit)
pub const MTU: usize = 1500;

/// Ethernet header size (dst MAC + src MAC + EtherType)
pub const ETH_HEADER_SIZE: usize = 14;

/// CRC/FCS size at end of a received frame
pub const CRC_SIZE: usize = 4;

/// Bytes inserted ahead of a received frame when IP header alignment is on
pub const IP_ALIGN_OFFSET: usize = 2;

/// TX control word prepended to every frame in the TX queue
pub const TX_CONTROL_WORD_SIZE: usize = 4;

/// Dummy bytes clocked out by the chip at the start of an RX burst
pub const RX_DUMMY_SIZE: usize = 4;

/// Status and byte count words that follow the dummy bytes of an RX burst
pub const RX_STATUS_SIZE: usize = 4;

/// Buffer size that fits any padded RX burst
pub const RX_BUFFER_SIZE: usize = 1536;

/// MAC address length
pub const MAC_ADDR_LEN: usize = 6;

/// Default MAC address (locally administered)
pub const DEFAULT_MAC_ADDR: [u8; 6] = [0x02, 0x00, 0x00, 0x00, 0x00, 0x01];

// =============================================================================
// Timing Constants
// =============================================================================

/// Time the reset line is held low, in milliseconds
pub const RESET_HOLD_MS: u32 = 100;

/// Time after releasing reset before the first register access, in milliseconds
pub const RESET_RECOVERY_MS: u32 = 200;

/// Delay after a register transaction before chip select is released
pub const SETTLE_MS: u32 = 1;

/// Time a soft reset bit is held in GRR, and the pause after releasing it
pub const SOFT_RESET_HOLD_MS: u32 = 1;

// =============================================================================
// Bring-up
// =============================================================================

/// Number of hard reset + identity read attempts before giving up
pub const IDENTITY_ATTEMPTS: u8 = 3;
