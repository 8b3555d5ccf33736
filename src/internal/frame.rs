//! SPI command frame codec.
//!
//! Every register transaction starts with a 16-bit header, sent MSB first:
//!
//! ```text
//!  15 14 | 13 12 11 10 | 9 8 7 6 5 4 | 3 2 1 0
//!   cmd  | byte enable |  addr[7:2]  |  don't care
//! ```
//!
//! The chip exposes registers through a 4-byte window selected by
//! `addr[7:2]`; the byte-enable lanes pick which 16-bit half of the window
//! the transaction touches.

/// Opcode carried in the top two bits of the command header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Command {
    /// Register read
    ReadRegister = 0,
    /// Register write
    WriteRegister = 1,
    /// RX queue read
    ReadRxFifo = 2,
    /// TX queue write
    WriteTxFifo = 3,
}

impl Command {
    /// Single-byte opcode used to open a FIFO burst (`cmd << 6`).
    #[inline]
    pub const fn fifo_opcode(self) -> u8 {
        (self as u8) << 6
    }
}

/// Byte lanes for bytes 0 and 1 of the register window
pub const LANES_LOW: u16 = 0x03;
/// Byte lanes for bytes 2 and 3 of the register window
pub const LANES_HIGH: u16 = 0x0C;

const ADDR_MASK: u16 = 0x03F0;
const CMD_SHIFT: u16 = 14;
const LANES_SHIFT: u16 = 10;

/// Length of a register transaction on the wire
pub const REG_FRAME_LEN: usize = 4;

/// Byte lanes selected for `addr`.
///
/// Bit 1 of the address is the 16-bit word index inside the window.
#[inline]
pub const fn lanes(addr: u8) -> u16 {
    if addr & 0x02 == 0 {
        LANES_LOW
    } else {
        LANES_HIGH
    }
}

/// Build the 16-bit command header.
#[inline]
pub const fn header(cmd: Command, addr: u8) -> u16 {
    ((cmd as u16) << CMD_SHIFT) | (lanes(addr) << LANES_SHIFT) | (((addr as u16) << 2) & ADDR_MASK)
}

/// Frame for a register read; the trailing two bytes are clocked out as zeros.
#[inline]
pub const fn encode_read(addr: u8) -> [u8; REG_FRAME_LEN] {
    let hdr = header(Command::ReadRegister, addr).to_be_bytes();
    [hdr[0], hdr[1], 0, 0]
}

/// Frame for a register write; the value follows the header low byte first.
#[inline]
pub const fn encode_write(addr: u8, value: u16) -> [u8; REG_FRAME_LEN] {
    let hdr = header(Command::WriteRegister, addr).to_be_bytes();
    let val = value.to_le_bytes();
    [hdr[0], hdr[1], val[0], val[1]]
}

/// Extract the register value from a read reply.
#[inline]
pub const fn decode_read(buf: &[u8; REG_FRAME_LEN]) -> u16 {
    ((buf[3] as u16) << 8) | buf[2] as u16
}

/// Round `len` up to the next DWORD boundary.
#[inline]
pub const fn padded_len(len: usize) -> usize {
    len + (4 - len % 4) % 4
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_for_every_address() {
        for addr in 0..=u8::MAX {
            let hdr = header(Command::ReadRegister, addr);
            let expected_lanes = if addr & 0x02 == 0 { 0x03 } else { 0x0C };

            assert_eq!(hdr >> 14, 0, "cmd bits for {addr:#04x}");
            assert_eq!((hdr >> 10) & 0x0F, expected_lanes, "lanes for {addr:#04x}");
            assert_eq!(hdr & 0x03F0, ((addr as u16) << 2) & 0x03F0, "addr for {addr:#04x}");
            assert_eq!(hdr & 0x000F, 0, "low nibble must stay clear");
        }
    }

    #[test]
    fn write_header_sets_command_bits() {
        let hdr = header(Command::WriteRegister, 0x10);
        assert_eq!(hdr >> 14, 1);
        assert_eq!(header(Command::WriteTxFifo, 0x00) >> 14, 3);
    }

    #[test]
    fn chip_id_read_frame() {
        // CIDER 0xC0: lanes 0x03, addr bits 0x300
        assert_eq!(encode_read(0xC0), [0x0F, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn high_half_read_frame() {
        // ISR 0x92: lanes 0x0C
        assert_eq!(header(Command::ReadRegister, 0x92), 0x3240);
        assert_eq!(encode_read(0x92), [0x32, 0x40, 0x00, 0x00]);
    }

    #[test]
    fn write_frame_value_is_little_endian() {
        let frame = encode_write(0x12, 0x4567);
        assert_eq!(frame, [0x70, 0x40, 0x67, 0x45]);
    }

    #[test]
    fn decode_uses_trailing_bytes() {
        assert_eq!(decode_read(&[0xAA, 0xBB, 0x72, 0x88]), 0x8872);
        assert_eq!(decode_read(&[0, 0, 0, 0]), 0);
    }

    #[test]
    fn padding_to_dword() {
        let padded: [usize; 6] = core::array::from_fn(padded_len);
        assert_eq!(padded, [0, 4, 4, 4, 4, 8]);
        assert_eq!(padded_len(1514), 1516);
    }

    #[test]
    fn fifo_opcodes() {
        assert_eq!(Command::ReadRxFifo.fifo_opcode(), 0x80);
        assert_eq!(Command::WriteTxFifo.fifo_opcode(), 0xC0);
    }
}
