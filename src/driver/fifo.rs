//! Frame queue (FIFO) transfer engine.
//!
//! Frames move between host memory and the chip's TXQ/RXQ as a single SPI
//! burst opened by a one-byte FIFO command. The QMU only accepts such a burst
//! while RXQCR "start DMA access" is set, and every burst must be a whole
//! number of DWORDs.
//!
//! The start bit is always cleared again once it has been requested, and on
//! the TX side the interrupt enable mask is always restored, whatever
//! happened in between.

use crate::driver::error::{BusResult, IoError, Result};
use crate::driver::register::RegisterEngine;
use crate::driver::status::RxFrameHeader;
use crate::hal::platform::Platform;
use crate::internal::constants::{
    CRC_SIZE, IP_ALIGN_OFFSET, MAX_FRAME_SIZE, RX_DUMMY_SIZE, RX_STATUS_SIZE,
    TX_CONTROL_WORD_SIZE,
};
use crate::internal::frame::{Command, padded_len};
use crate::internal::regs::{
    IER, RXFCTR, RXFDPR, RXFHBCR, RXFHSR, RXQCR, TXMIR, TXQCR, fdpr, rxfctr, rxqcr, txmir, txqcr,
};

/// Interrupt-on-completion flag in the TX control word
const TX_CTRL_IRQ_ON_DONE: u16 = 0x8000;
/// Frame ID field of the TX control word
const TX_CTRL_FRAME_ID_MASK: u16 = 0x003F;

const PAD: [u8; 3] = [0; 3];

// =============================================================================
// Receive
// =============================================================================

/// Number of frames waiting in the RX queue
pub(crate) fn rx_frame_count<P: Platform>(regs: &mut RegisterEngine<P>) -> BusResult<u8> {
    Ok((regs.read(RXFCTR)? >> rxfctr::COUNT_SHIFT) as u8)
}

/// Header of the frame at the head of the RX queue
pub(crate) fn rx_frame_header<P: Platform>(
    regs: &mut RegisterEngine<P>,
) -> BusResult<RxFrameHeader> {
    let status = regs.read(RXFHSR)?;
    let count = regs.read(RXFHBCR)?;
    Ok(RxFrameHeader::from_raw(status, count))
}

/// Receive the frame at the head of the RX queue into `buf`.
///
/// Returns `Ok(None)` when the queue is empty, otherwise the frame length
/// with the trailing CRC (and the alignment offset, when enabled) removed.
/// `buf` must hold the DWORD-padded byte count.
pub(crate) fn read_frame<P: Platform>(
    regs: &mut RegisterEngine<P>,
    buf: &mut [u8],
) -> Result<Option<usize>> {
    if rx_frame_count(regs)? == 0 {
        return Ok(None);
    }

    let header = rx_frame_header(regs)?;
    if !header.is_good() {
        #[cfg(feature = "defmt")]
        defmt::warn!("dropping bad rx frame: {}", header);

        regs.write_preserving(RXQCR, rxqcr::RELEASE_ERROR_FRAME)?;
        return Err(IoError::FrameError.into());
    }

    let len = usize::from(header.byte_count);
    if buf.len() < padded_len(len) {
        return Err(IoError::BufferTooSmall.into());
    }

    regs.write(RXFDPR, fdpr::AUTO_INCREMENT)?;
    let rxqcr = burst_read(regs, buf, len)?;

    let mut frame_len = len.saturating_sub(CRC_SIZE);
    if rxqcr & rxqcr::IP_TWO_BYTE_OFFSET != 0 {
        frame_len = frame_len.saturating_sub(IP_ALIGN_OFFSET);
        buf.copy_within(IP_ALIGN_OFFSET..IP_ALIGN_OFFSET + frame_len, 0);
    }

    Ok(Some(frame_len))
}

/// Stream `len` bytes (padded to a DWORD) out of the RX queue.
///
/// Returns the number of bytes transferred.
pub(crate) fn read_fifo<P: Platform>(
    regs: &mut RegisterEngine<P>,
    buf: &mut [u8],
    len: usize,
) -> Result<usize> {
    let padded = padded_len(len);
    if buf.len() < padded {
        return Err(IoError::BufferTooSmall.into());
    }
    burst_read(regs, buf, len)?;
    Ok(padded)
}

/// RX burst bracketed by the DMA start bit; returns RXQCR as written when
/// the burst was opened.
fn burst_read<P: Platform>(
    regs: &mut RegisterEngine<P>,
    buf: &mut [u8],
    len: usize,
) -> BusResult<u16> {
    let padded = padded_len(len);

    let started = regs.set_bits(RXQCR, rxqcr::START_DMA_ACCESS);
    let burst = started.and_then(|rxqcr| {
        regs.select();
        let streamed = stream_in(regs.platform_mut(), &mut buf[..padded]);
        regs.deselect();
        streamed.map(|()| rxqcr)
    });
    let stopped = regs.clear_bits(RXQCR, rxqcr::START_DMA_ACCESS);

    let rxqcr = burst?;
    stopped?;
    Ok(rxqcr)
}

fn stream_in<P: Platform>(platform: &mut P, data: &mut [u8]) -> BusResult {
    let mut preamble = [0u8; RX_DUMMY_SIZE + RX_STATUS_SIZE];

    platform.transmit(&[Command::ReadRxFifo.fifo_opcode()])?;
    platform.receive(&mut preamble)?;
    if data.is_empty() {
        return Ok(());
    }
    platform.receive(data)
}

// =============================================================================
// Transmit
// =============================================================================

/// Free bytes in the TX queue
pub(crate) fn tx_free_space<P: Platform>(regs: &mut RegisterEngine<P>) -> BusResult<u16> {
    Ok(regs.read(TXMIR)? & txmir::FREE_MASK)
}

/// Queue `frame` for transmission.
///
/// Interrupts are masked for the duration of the burst and the previous
/// mask restored afterwards. The frame is handed to the MAC with a manual
/// enqueue only when the burst went through.
pub(crate) fn write_frame<P: Platform>(
    regs: &mut RegisterEngine<P>,
    frame: &[u8],
    frame_id: u8,
    check_space: bool,
) -> Result<()> {
    if frame.is_empty() || frame.len() > MAX_FRAME_SIZE {
        return Err(IoError::InvalidLength.into());
    }

    if check_space {
        // The burst carries the control word and the DWORD padding too.
        let free = usize::from(tx_free_space(regs)?);
        if free < padded_len(frame.len()) + TX_CONTROL_WORD_SIZE {
            return Err(IoError::NoSpace.into());
        }
    }

    let saved_ier = regs.read(IER)?;
    let burst = regs
        .write(IER, 0)
        .and_then(|()| burst_write(regs, frame, frame_id));
    let restored = regs.write(IER, saved_ier);

    burst?;
    restored?;

    regs.write_preserving(TXQCR, txqcr::MANUAL_ENQUEUE)?;
    Ok(())
}

fn burst_write<P: Platform>(
    regs: &mut RegisterEngine<P>,
    frame: &[u8],
    frame_id: u8,
) -> BusResult {
    let started = regs.set_bits(RXQCR, rxqcr::START_DMA_ACCESS);
    let burst = started.and_then(|_| {
        regs.select();
        let streamed = stream_out(regs.platform_mut(), frame, frame_id);
        regs.deselect();
        streamed
    });
    let stopped = regs.clear_bits(RXQCR, rxqcr::START_DMA_ACCESS);

    burst?;
    stopped.map(|_| ())
}

fn stream_out<P: Platform>(platform: &mut P, frame: &[u8], frame_id: u8) -> BusResult {
    let ctrl = (u16::from(frame_id) & TX_CTRL_FRAME_ID_MASK) | TX_CTRL_IRQ_ON_DONE;
    let [c0, c1] = ctrl.to_le_bytes();
    let [l0, l1] = (frame.len() as u16).to_le_bytes();

    platform.transmit(&[Command::WriteTxFifo.fifo_opcode()])?;
    platform.transmit(&[c0, c1, l0, l1])?;
    platform.transmit(frame)?;

    let pad = padded_len(frame.len()) - frame.len();
    if pad > 0 {
        platform.transmit(&PAD[..pad])?;
    }
    Ok(())
}
