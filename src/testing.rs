//! Testing utilities: a simulated KSZ8851SNL behind the [`Platform`] trait
//!
//! [`SimChip`] decodes the register and FIFO frames the driver puts on the
//! bus, keeps a register file, and logs every pin change and successful
//! transfer so tests can check the exact bus traffic.
//!
//! Only available when running `cargo test`.

// Note: The #[cfg(test)] attribute is applied in lib.rs where this module is declared
#![allow(missing_docs)]
#![allow(clippy::std_instead_of_core, clippy::std_instead_of_alloc)]

extern crate std;

use std::collections::VecDeque;
use std::vec;
use std::vec::Vec;

use crate::driver::config::InterfaceConfig;
use crate::driver::error::{BusError, BusResult};
use crate::hal::platform::{PinId, PinLevel, Platform};
use crate::internal::constants::{CRC_SIZE, IP_ALIGN_OFFSET};
use crate::internal::frame::{Command, LANES_HIGH, REG_FRAME_LEN, padded_len};
use crate::internal::regs::{
    CIDER, ISR, P1CR, RXFCTR, RXFHBCR, RXFHSR, RXQCR, TXMIR, TXQCR, rxfctr, rxqcr, txqcr,
};

const DEFAULT_CHIP_ID: u16 = 0x8872;
const DEFAULT_TX_FREE: u16 = 0x1800;
/// RXFHSR of a good unicast frame
const RX_STATUS_GOOD: u16 = 0x8020;
const FAKE_CRC: [u8; CRC_SIZE] = [0xDE, 0xAD, 0xBE, 0xEF];

/// Platform primitive to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusOp {
    Transmit,
    Receive,
    TransmitReceive,
}

#[derive(Debug)]
struct RxFrame {
    data: Vec<u8>,
    status: u16,
}

#[derive(Debug, Default)]
struct RxBurst {
    data: Vec<u8>,
    pos: usize,
    preamble_done: bool,
}

// =============================================================================
// Simulated Chip
// =============================================================================

/// Simulated KSZ8851SNL with a millisecond tick that advances on every read
#[derive(Debug)]
pub struct SimChip {
    tick: u32,
    registers: [u16; 128],
    chip_id: u16,
    tx_free: u16,
    self_clearing_p1cr: u16,
    chip_select: PinId,

    cs_low: bool,
    reset_low_at: Option<u32>,
    reset_pulse: Option<(u32, u32)>,
    hard_resets: usize,

    fail_next: Option<(BusOp, BusError)>,
    fail_fifo_write: Option<BusError>,

    rx_queue: VecDeque<RxFrame>,
    rx_burst: Option<RxBurst>,
    last_rx_burst_len: usize,
    fifo_bursts: usize,
    fifo_without_dma: bool,

    tx_capture: Option<Vec<u8>>,
    tx_pending: Option<Vec<u8>>,
    tx_frames: Vec<Vec<u8>>,

    pins: Vec<(PinId, PinLevel)>,
    transmitted: Vec<Vec<u8>>,
    reads: Vec<u8>,
    writes: Vec<(u8, u16)>,
    identity_reads: usize,
}

impl Default for SimChip {
    fn default() -> Self {
        Self::new()
    }
}

impl SimChip {
    pub const CHIP_SELECT: PinId = PinId::new(1, 4);
    pub const RESET: PinId = PinId::new(1, 5);

    pub fn new() -> Self {
        Self {
            tick: 0,
            registers: [0; 128],
            chip_id: DEFAULT_CHIP_ID,
            tx_free: DEFAULT_TX_FREE,
            self_clearing_p1cr: 0,
            chip_select: Self::CHIP_SELECT,
            cs_low: false,
            reset_low_at: None,
            reset_pulse: None,
            hard_resets: 0,
            fail_next: None,
            fail_fifo_write: None,
            rx_queue: VecDeque::new(),
            rx_burst: None,
            last_rx_burst_len: 0,
            fifo_bursts: 0,
            fifo_without_dma: false,
            tx_capture: None,
            tx_pending: None,
            tx_frames: Vec::new(),
            pins: Vec::new(),
            transmitted: Vec::new(),
            reads: Vec::new(),
            writes: Vec::new(),
            identity_reads: 0,
        }
    }

    /// Interface wired to this chip's pins
    pub const fn interface() -> InterfaceConfig {
        InterfaceConfig::new(Self::CHIP_SELECT, Self::RESET)
    }

    pub fn with_chip_select(mut self, pin: PinId) -> Self {
        self.chip_select = pin;
        self
    }

    /// P1CR bits that read back cleared right after a write
    pub fn with_self_clearing(mut self, mask: u16) -> Self {
        self.self_clearing_p1cr = mask;
        self
    }

    pub fn set_self_clearing(&mut self, mask: u16) {
        self.self_clearing_p1cr = mask;
    }

    // -------------------------------------------------------------------------
    // Setup
    // -------------------------------------------------------------------------

    pub fn tick(&self) -> u32 {
        self.tick
    }

    pub fn set_tick(&mut self, tick: u32) {
        self.tick = tick;
    }

    pub fn set_chip_id(&mut self, id: u16) {
        self.chip_id = id;
    }

    pub fn set_tx_free(&mut self, free: u16) {
        self.tx_free = free;
    }

    /// Set a register without logging a write
    pub fn set_register(&mut self, addr: u8, value: u16) {
        self.registers[usize::from(addr >> 1)] = value;
    }

    /// Raw register file content
    pub fn register(&self, addr: u8) -> u16 {
        self.registers[usize::from(addr >> 1)]
    }

    pub fn fail_next(&mut self, op: BusOp, error: BusError) {
        self.fail_next = Some((op, error));
    }

    /// Fail the next transfer inside a TX FIFO burst
    pub fn fail_next_fifo_write(&mut self, error: BusError) {
        self.fail_fifo_write = Some(error);
    }

    /// Queue a good frame (without CRC) for reception
    pub fn push_rx_frame(&mut self, data: &[u8]) {
        self.push_rx_frame_with_status(data, RX_STATUS_GOOD);
    }

    pub fn push_rx_frame_with_status(&mut self, data: &[u8], status: u16) {
        self.rx_queue.push_back(RxFrame {
            data: data.to_vec(),
            status,
        });
    }

    // -------------------------------------------------------------------------
    // Inspection
    // -------------------------------------------------------------------------

    pub fn pins(&self) -> &[(PinId, PinLevel)] {
        &self.pins
    }

    /// Successful `transmit` payloads, in order
    pub fn transmitted(&self) -> &[Vec<u8>] {
        &self.transmitted
    }

    /// Addresses of successful register reads
    pub fn reads(&self) -> &[u8] {
        &self.reads
    }

    /// Successful register writes
    pub fn writes(&self) -> &[(u8, u16)] {
        &self.writes
    }

    pub fn identity_reads(&self) -> usize {
        self.identity_reads
    }

    pub fn hard_resets(&self) -> usize {
        self.hard_resets
    }

    /// Ticks at which the last reset pulse went low and high
    pub fn reset_pulse(&self) -> Option<(u32, u32)> {
        self.reset_pulse
    }

    pub fn cs_released(&self) -> bool {
        !self.cs_low
    }

    pub fn rx_pending(&self) -> usize {
        self.rx_queue.len()
    }

    /// Number of RX FIFO bursts opened
    pub fn fifo_bursts(&self) -> usize {
        self.fifo_bursts
    }

    /// Data bytes (after the preamble) clocked in by the last RX burst
    pub fn last_rx_burst_len(&self) -> usize {
        self.last_rx_burst_len
    }

    /// A FIFO burst was opened while RXQCR start-DMA-access was clear
    pub fn fifo_without_dma_access(&self) -> bool {
        self.fifo_without_dma
    }

    /// Enqueued TX bursts: control word, frame, padding
    pub fn tx_frames(&self) -> &[Vec<u8>] {
        &self.tx_frames
    }

    // -------------------------------------------------------------------------
    // Chip model
    // -------------------------------------------------------------------------

    fn injected(&mut self, op: BusOp) -> BusResult {
        match self.fail_next {
            Some((failing, error)) if failing == op => {
                self.fail_next = None;
                Err(error)
            }
            _ => Ok(()),
        }
    }

    fn hard_reset(&mut self, low_at: u32) {
        self.hard_resets += 1;
        self.reset_pulse = Some((low_at, self.tick));
        self.registers = [0; 128];
        self.rx_queue.clear();
        self.rx_burst = None;
        self.tx_capture = None;
        self.tx_pending = None;
    }

    fn offset_len(&self) -> usize {
        if self.register(RXQCR) & rxqcr::IP_TWO_BYTE_OFFSET != 0 {
            IP_ALIGN_OFFSET
        } else {
            0
        }
    }

    fn read_register(&mut self, addr: u8) -> u16 {
        match addr {
            CIDER => {
                self.identity_reads += 1;
                self.chip_id
            }
            TXMIR => self.tx_free,
            RXFCTR => {
                let count = self.rx_queue.len().min(0xFF) as u16;
                (count << rxfctr::COUNT_SHIFT) | (self.register(RXFCTR) & 0x00FF)
            }
            RXFHSR => self.rx_queue.front().map_or(0, |f| f.status),
            RXFHBCR => {
                let offset = self.offset_len();
                self.rx_queue
                    .front()
                    .map_or(0, |f| (f.data.len() + CRC_SIZE + offset) as u16)
            }
            _ => self.register(addr),
        }
    }

    fn write_register(&mut self, addr: u8, value: u16) {
        match addr {
            ISR => {
                let pending = self.register(ISR);
                self.set_register(ISR, pending & !value);
            }
            TXQCR => {
                if value & txqcr::MANUAL_ENQUEUE != 0 {
                    if let Some(burst) = self.tx_pending.take() {
                        self.tx_frames.push(burst);
                    }
                }
                self.set_register(TXQCR, value & !txqcr::MANUAL_ENQUEUE);
            }
            RXQCR => {
                if value & rxqcr::RELEASE_ERROR_FRAME != 0 {
                    self.rx_queue.pop_front();
                }
                self.set_register(RXQCR, value & !rxqcr::RELEASE_ERROR_FRAME);
            }
            P1CR => self.set_register(P1CR, value & !self.self_clearing_p1cr),
            _ => self.set_register(addr, value),
        }
    }

    fn open_fifo(&mut self, opcode: u8) {
        if self.register(RXQCR) & rxqcr::START_DMA_ACCESS == 0 {
            self.fifo_without_dma = true;
        }

        if opcode == Command::ReadRxFifo.fifo_opcode() {
            self.fifo_bursts += 1;
            self.last_rx_burst_len = 0;

            let mut data = vec![0u8; self.offset_len()];
            if let Some(frame) = self.rx_queue.pop_front() {
                data.extend_from_slice(&frame.data);
                data.extend_from_slice(&FAKE_CRC);
                data.resize(padded_len(data.len()), 0);
            } else {
                data.clear();
            }
            self.rx_burst = Some(RxBurst {
                data,
                ..RxBurst::default()
            });
        } else {
            self.tx_capture = Some(Vec::new());
        }
    }

    fn close_tx_capture(&mut self) {
        if let Some(burst) = self.tx_capture.take() {
            self.tx_pending = Some(burst);
        }
    }
}

/// Decode a register frame into (command, address)
fn decode_header(frame: &[u8]) -> (u16, u8) {
    let header = u16::from_be_bytes([frame[0], frame[1]]);
    let cmd = header >> 14;
    let lanes = (header >> 10) & 0x0F;
    let mut addr = ((header & 0x03F0) >> 2) as u8;
    if lanes == LANES_HIGH {
        addr |= 0x02;
    }
    (cmd, addr)
}

impl Platform for SimChip {
    fn get_tick(&mut self) -> u32 {
        let now = self.tick;
        self.tick = self.tick.wrapping_add(1);
        now
    }

    fn transmit(&mut self, data: &[u8]) -> BusResult {
        if self.tx_capture.is_some() {
            if let Some(error) = self.fail_fifo_write.take() {
                return Err(error);
            }
        }
        self.injected(BusOp::Transmit)?;

        if let Some(burst) = self.tx_capture.as_mut() {
            burst.extend_from_slice(data);
            self.transmitted.push(data.to_vec());
            return Ok(());
        }

        let fifo_read = Command::ReadRxFifo.fifo_opcode();
        let fifo_write = Command::WriteTxFifo.fifo_opcode();
        match data {
            [opcode] if *opcode == fifo_read || *opcode == fifo_write => self.open_fifo(*opcode),
            frame if frame.len() == REG_FRAME_LEN => {
                let (cmd, addr) = decode_header(frame);
                if cmd == Command::WriteRegister as u16 {
                    let value = u16::from_le_bytes([frame[2], frame[3]]);
                    self.write_register(addr, value);
                    self.writes.push((addr, value));
                }
            }
            _ => {}
        }

        self.transmitted.push(data.to_vec());
        Ok(())
    }

    fn receive(&mut self, buf: &mut [u8]) -> BusResult {
        self.injected(BusOp::Receive)?;

        match self.rx_burst.as_mut() {
            Some(burst) if !burst.preamble_done => {
                buf.fill(0);
                burst.preamble_done = true;
            }
            Some(burst) => {
                for byte in buf.iter_mut() {
                    *byte = burst.data.get(burst.pos).copied().unwrap_or(0);
                    burst.pos += 1;
                }
                self.last_rx_burst_len += buf.len();
            }
            None => buf.fill(0),
        }
        Ok(())
    }

    fn transmit_receive(&mut self, tx: &[u8], rx: &mut [u8]) -> BusResult {
        self.close_tx_capture();
        self.injected(BusOp::TransmitReceive)?;

        rx.fill(0);
        if tx.len() == REG_FRAME_LEN && rx.len() == REG_FRAME_LEN {
            let (cmd, addr) = decode_header(tx);
            if cmd == Command::ReadRegister as u16 {
                let [lo, hi] = self.read_register(addr).to_le_bytes();
                rx[2] = lo;
                rx[3] = hi;
                self.reads.push(addr);
            }
        }
        Ok(())
    }

    fn set_pin(&mut self, pin: PinId, level: PinLevel) {
        self.pins.push((pin, level));

        if pin == self.chip_select {
            self.cs_low = level == PinLevel::Low;
            if level == PinLevel::High {
                self.close_tx_capture();
            }
        } else if pin == Self::RESET {
            match level {
                PinLevel::Low => self.reset_low_at = Some(self.tick),
                PinLevel::High => {
                    if let Some(low_at) = self.reset_low_at.take() {
                        self.hard_reset(low_at);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::internal::frame::{encode_read, encode_write};
    use crate::internal::regs::{MARM, TXCR};

    #[test]
    fn decodes_both_lane_halves() {
        assert_eq!(decode_header(&encode_read(TXCR)), (0, TXCR));
        assert_eq!(decode_header(&encode_write(MARM, 0)), (1, MARM));
    }

    #[test]
    fn isr_is_write_one_to_clear() {
        let mut chip = SimChip::new();
        chip.set_register(ISR, 0xA000);
        chip.transmit(&encode_write(ISR, 0x2000)).unwrap();
        assert_eq!(chip.register(ISR), 0x8000);
    }

    #[test]
    fn reset_pulse_clears_registers() {
        let mut chip = SimChip::new();
        chip.set_register(TXCR, 0x00EE);
        chip.set_pin(SimChip::RESET, PinLevel::Low);
        chip.set_pin(SimChip::RESET, PinLevel::High);
        assert_eq!(chip.register(TXCR), 0);
        assert_eq!(chip.hard_resets(), 1);
    }
}
