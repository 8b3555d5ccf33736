//! KSZ8851SNL driver.
//!
//! [`Ksz8851`] owns the platform and walks the chip from reset to a
//! configured, running state in [`init`](Ksz8851::init). After that it
//! offers raw frame I/O and access to the status, interrupt and PHY
//! registers.
//!
//! Every method takes `&mut self`; one driver value talks to one chip and
//! calls are never interleaved. Use [`SharedKsz8851`](crate::sync::SharedKsz8851)
//! to reach the driver from interrupt context.

use crate::driver::bringup::{ConfigReport, ConfigStep, State};
use crate::driver::config::{DriverConfig, MacAddress, SoftReset};
use crate::driver::error::{ConfigError, IoError, Result};
use crate::driver::fifo;
use crate::driver::interrupt::InterruptStatus;
use crate::driver::register::RegisterEngine;
use crate::driver::status::{ChipId, TxStatus};
use crate::hal::platform::Platform;
use crate::hal::reset::{hard_reset, soft_reset};
use crate::internal::constants::IDENTITY_ATTEMPTS;
use crate::internal::regs::{
    CHIP_ID, CHIP_ID_MASK, CIDER, FCHWR, FCLWR, IER, ISR, MARH, MARL, MARM, OBCR, P1CR, P1MBSR,
    P1SR, RXCR1, RXCR2, RXFCTR, RXFDPR, RXQCR, TXCR, TXFDPR, TXSR, fdpr, int, obcr, p1cr, rxcr1,
    rxcr2, rxfctr, rxqcr, txcr,
};
use crate::phy::generic::{forced_control, restart_an_control};
use crate::phy::{LinkStatus, PhyStatus, PortStatus};

/// TX frame IDs wrap within the 6-bit control word field
const FRAME_ID_MASK: u8 = 0x3F;

const TXCR_DEFAULT: u16 = txcr::FLOW
    | txcr::PAD
    | txcr::CRC
    | txcr::IP_CHECKSUM
    | txcr::TCP_CHECKSUM
    | txcr::UDP_CHECKSUM;

const RXCR1_DEFAULT: u16 = rxcr1::UNICAST
    | rxcr1::ALL_MULTICAST
    | rxcr1::BROADCAST
    | rxcr1::FLOW
    | rxcr1::MAC_FILTER
    | rxcr1::IP_CHECKSUM
    | rxcr1::TCP_CHECKSUM
    | rxcr1::UDP_CHECKSUM;

const RXCR2_DEFAULT: u16 = rxcr2::ICMP_CHECKSUM
    | rxcr2::UDP_LITE_CHECKSUM
    | rxcr2::IPV6_UDP_ZERO_CHECKSUM
    | rxcr2::IPV6_UDP_FRAGMENT_PASS
    | rxcr2::BURST_SINGLE_FRAME;

const RXQCR_DEFAULT: u16 =
    rxqcr::AUTO_DEQUEUE | rxqcr::FRAME_COUNT_THRESHOLD | rxqcr::IP_TWO_BYTE_OFFSET;

const OBCR_DEFAULT: u16 = obcr::DIVIDE_BY_1 | obcr::CLOCK_125MHZ | obcr::STRENGTH_8MA;

/// KSZ8851SNL Ethernet controller driver
///
/// # Example
///
/// ```ignore
/// let config = DriverConfig::new()
///     .with_interface(InterfaceConfig::new(PinId::new(GPIOA, 4), PinId::new(GPIOB, 0)))
///     .with_mac_address([0x02, 0x00, 0x00, 0x12, 0x34, 0x56]);
///
/// let mut eth = Ksz8851::new(board, config);
/// let report = eth.init()?;
/// if !report.is_complete() {
///     // some register writes failed; see report.failures()
/// }
///
/// let mut buf = [0u8; RX_BUFFER_SIZE];
/// if let Some(len) = eth.read_frame(&mut buf)? {
///     handle(&buf[..len]);
/// }
/// ```
#[derive(Debug)]
pub struct Ksz8851<P> {
    regs: RegisterEngine<P>,
    config: DriverConfig,
    state: State,
    next_frame_id: u8,
}

impl<P: Platform> Ksz8851<P> {
    /// Create a driver; the chip is not touched until [`init`](Self::init).
    pub fn new(platform: P, config: DriverConfig) -> Self {
        Self {
            regs: RegisterEngine::new(platform, config.interface, config.timing.settle_ms),
            config,
            state: State::Created,
            next_frame_id: 0,
        }
    }

    // =========================================================================
    // Bring-up
    // =========================================================================

    /// Bring the chip from reset to a configured state.
    ///
    /// Fails with [`ConfigError::ChipIdMismatch`] when the identity register
    /// never matches; nothing is configured in that case and `init` may be
    /// called again. Register write failures during configuration do not
    /// abort bring-up; they are listed in the returned [`ConfigReport`].
    pub fn init(&mut self) -> Result<ConfigReport> {
        if self.state == State::Ready {
            return Err(ConfigError::AlreadyInitialized.into());
        }

        self.identify()?;

        let mut report = ConfigReport::new();

        self.state = State::SoftReset;
        if self.config.soft_reset != SoftReset::None {
            report.record(
                ConfigStep::SoftReset,
                soft_reset(&mut self.regs, self.config.soft_reset),
            );
        }

        self.state = State::Configuring;
        self.configure(&mut report);
        if self.config.enable_on_init {
            self.enable_datapath(&mut report);
        }

        self.state = State::Ready;

        #[cfg(feature = "defmt")]
        defmt::info!(
            "ksz8851 ready, mac {}, {} steps applied, complete: {}",
            self.config.mac_address,
            report.applied(),
            report.is_complete()
        );

        Ok(report)
    }

    /// Hard reset and identity read, up to [`IDENTITY_ATTEMPTS`] times.
    fn identify(&mut self) -> Result<()> {
        for _attempt in 0..IDENTITY_ATTEMPTS {
            self.state = State::HardReset;
            let reset = self.config.interface.reset;
            hard_reset(self.regs.platform_mut(), reset, &self.config.timing);

            self.state = State::IdentityCheck;
            match self.regs.read(CIDER) {
                Ok(id) if id & CHIP_ID_MASK == CHIP_ID => {
                    #[cfg(feature = "defmt")]
                    defmt::info!("ksz8851 found: {:#x} (attempt {})", id, _attempt + 1);
                    return Ok(());
                }
                Ok(_id) => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("unexpected chip id {:#x}", _id);
                }
                Err(_e) => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("chip id read failed: {}", _e);
                }
            }
        }

        self.state = State::InitError;

        #[cfg(feature = "defmt")]
        defmt::error!("ksz8851 not found after {} attempts", IDENTITY_ATTEMPTS);

        Err(ConfigError::ChipIdMismatch.into())
    }

    fn configure(&mut self, report: &mut ConfigReport) {
        let regs = &mut self.regs;

        let [low, middle, high] = self.config.mac_address.register_words();
        report.record(ConfigStep::MacLow, regs.write(MARL, low));
        report.record(ConfigStep::MacMiddle, regs.write(MARM, middle));
        report.record(ConfigStep::MacHigh, regs.write(MARH, high));

        if !self.config.use_default_settings {
            return;
        }

        let steps = [
            (ConfigStep::TxPointer, TXFDPR, fdpr::AUTO_INCREMENT),
            (ConfigStep::TxControl, TXCR, TXCR_DEFAULT),
            (ConfigStep::RxPointer, RXFDPR, fdpr::AUTO_INCREMENT),
            (ConfigStep::RxThreshold, RXFCTR, rxfctr::THRESHOLD_ONE_FRAME),
            (ConfigStep::RxControl1, RXCR1, RXCR1_DEFAULT),
            (ConfigStep::RxControl2, RXCR2, RXCR2_DEFAULT),
            (ConfigStep::RxQueue, RXQCR, RXQCR_DEFAULT),
            (ConfigStep::BusControl, OBCR, OBCR_DEFAULT),
            (ConfigStep::AutoNegRestart, P1CR, p1cr::AUTO_NEG_RESTART),
        ];
        for (step, addr, bits) in steps {
            report.record(step, regs.write_preserving(addr, bits));
        }

        // A partner that does not negotiate (e.g. a hub) leaves the restart
        // bit clear; fall back to forced full duplex.
        match regs.read(P1CR) {
            Ok(value) if value & p1cr::AUTO_NEG_RESTART == 0 => {
                #[cfg(feature = "defmt")]
                defmt::warn!("auto-negotiation restart not taken, forcing full duplex");

                report.record(
                    ConfigStep::DuplexFallback,
                    regs.write(P1CR, value | p1cr::FORCE_FULL_DUPLEX),
                );
            }
            Ok(_) => {}
            Err(e) => report.record(ConfigStep::DuplexFallback, Err(e)),
        }

        let wm = self.config.watermarks;
        report.record(ConfigStep::ClearInterrupts, regs.write_preserving(ISR, int::ALL));
        report.record(ConfigStep::FlowLowWatermark, regs.write_preserving(FCLWR, wm.low));
        report.record(ConfigStep::FlowHighWatermark, regs.write_preserving(FCHWR, wm.high));
    }

    fn enable_datapath(&mut self, report: &mut ConfigReport) {
        report.record(
            ConfigStep::EnableTx,
            self.regs.set_bits(TXCR, txcr::ENABLE).map(|_| ()),
        );
        report.record(
            ConfigStep::EnableRx,
            self.regs.set_bits(RXCR1, rxcr1::ENABLE).map(|_| ()),
        );
        report.record(
            ConfigStep::EnableInterrupts,
            self.regs.write(IER, InterruptStatus::DATAPATH.to_raw()),
        );
    }

    /// Enable the transmitter, the receiver and the datapath interrupts.
    pub fn start(&mut self) -> Result<()> {
        self.require_ready_config()?;
        let mut report = ConfigReport::new();
        self.enable_datapath(&mut report);
        Ok(report.aggregate()?)
    }

    /// Disable the transmitter, the receiver and all interrupts.
    pub fn stop(&mut self) -> Result<()> {
        self.require_ready_config()?;
        self.regs.write(IER, 0)?;
        self.regs.clear_bits(TXCR, txcr::ENABLE)?;
        self.regs.clear_bits(RXCR1, rxcr1::ENABLE)?;
        Ok(())
    }

    /// Pulse the soft reset bits in GRR.
    ///
    /// A global reset returns every register to its default; run
    /// [`init`](Self::init) again afterwards.
    pub fn soft_reset(&mut self, kind: SoftReset) -> Result<()> {
        soft_reset(&mut self.regs, kind)?;
        if kind == SoftReset::Global {
            self.state = State::Created;
        }
        Ok(())
    }

    fn require_ready_config(&self) -> Result<()> {
        if self.state == State::Ready {
            Ok(())
        } else {
            Err(ConfigError::NotInitialized.into())
        }
    }

    fn require_ready_io(&self) -> Result<()> {
        if self.state == State::Ready {
            Ok(())
        } else {
            Err(IoError::InvalidState.into())
        }
    }

    // =========================================================================
    // Register Access
    // =========================================================================

    /// Read a register
    pub fn read_register(&mut self, addr: u8) -> Result<u16> {
        Ok(self.regs.read(addr)?)
    }

    /// Write a register, replacing its whole value
    pub fn write_register(&mut self, addr: u8, value: u16) -> Result<()> {
        Ok(self.regs.write(addr, value)?)
    }

    /// Write `bits` into a register, keeping any reserved bits it has
    pub fn write_register_preserving(&mut self, addr: u8, bits: u16) -> Result<()> {
        Ok(self.regs.write_preserving(addr, bits)?)
    }

    /// Set bits in a register; returns the value written
    pub fn set_register_bits(&mut self, addr: u8, mask: u16) -> Result<u16> {
        Ok(self.regs.set_bits(addr, mask)?)
    }

    /// Clear bits in a register; returns the value written
    pub fn clear_register_bits(&mut self, addr: u8, mask: u16) -> Result<u16> {
        Ok(self.regs.clear_bits(addr, mask)?)
    }

    // =========================================================================
    // Frame I/O
    // =========================================================================

    /// Receive one frame into `buf`.
    ///
    /// Returns `Ok(None)` when no frame is waiting. The length excludes the
    /// CRC. `buf` must hold the frame's byte count rounded up to four bytes;
    /// [`RX_BUFFER_SIZE`](crate::constants::RX_BUFFER_SIZE) always does.
    ///
    /// A frame flagged bad by the MAC is dropped from the queue and reported
    /// as [`IoError::FrameError`].
    pub fn read_frame(&mut self, buf: &mut [u8]) -> Result<Option<usize>> {
        self.require_ready_io()?;
        fifo::read_frame(&mut self.regs, buf)
    }

    /// Raw RX queue burst of `len` bytes (padded to a DWORD).
    ///
    /// Returns the number of bytes read. Callers are responsible for having
    /// set the RX frame pointer and for interpreting the data.
    pub fn read_fifo(&mut self, buf: &mut [u8], len: usize) -> Result<usize> {
        self.require_ready_io()?;
        fifo::read_fifo(&mut self.regs, buf, len)
    }

    /// Queue one frame (without CRC) for transmission.
    ///
    /// Returns the frame ID reported back in [`TxStatus::frame_id`].
    pub fn write_frame(&mut self, frame: &[u8]) -> Result<u8> {
        self.require_ready_io()?;

        let id = self.next_frame_id;
        fifo::write_frame(&mut self.regs, frame, id, self.config.check_tx_space)?;
        self.next_frame_id = id.wrapping_add(1) & FRAME_ID_MASK;
        Ok(id)
    }

    /// Drop every frame in the RX queue.
    pub fn flush_rx_queue(&mut self) -> Result<()> {
        let rxcr1 = self.regs.read(RXCR1)?;
        self.regs.write(RXCR1, (rxcr1 & !rxcr1::ENABLE) | rxcr1::FLUSH)?;
        self.regs.write(RXCR1, rxcr1)?;
        Ok(())
    }

    /// Drop every frame in the TX queue.
    pub fn flush_tx_queue(&mut self) -> Result<()> {
        let txcr = self.regs.read(TXCR)?;
        self.regs.write(TXCR, (txcr & !txcr::ENABLE) | txcr::FLUSH)?;
        self.regs.write(TXCR, txcr)?;
        Ok(())
    }

    // =========================================================================
    // Status
    // =========================================================================

    /// Status of the last transmitted frame
    pub fn tx_status(&mut self) -> Result<TxStatus> {
        Ok(TxStatus::from_raw(self.regs.read(TXSR)?))
    }

    /// Free bytes in the TX queue
    pub fn tx_free_space(&mut self) -> Result<u16> {
        Ok(fifo::tx_free_space(&mut self.regs)?)
    }

    /// Frames waiting in the RX queue
    pub fn rx_frame_count(&mut self) -> Result<u8> {
        Ok(fifo::rx_frame_count(&mut self.regs)?)
    }

    /// Decoded chip identity
    pub fn chip_id(&mut self) -> Result<ChipId> {
        Ok(ChipId::from_raw(self.regs.read(CIDER)?))
    }

    // =========================================================================
    // Interrupts
    // =========================================================================

    /// Pending interrupts (ISR)
    pub fn interrupt_status(&mut self) -> Result<InterruptStatus> {
        Ok(InterruptStatus::from_raw(self.regs.read(ISR)?))
    }

    /// Acknowledge the flagged interrupts
    pub fn clear_interrupts(&mut self, status: InterruptStatus) -> Result<()> {
        Ok(self.regs.write(ISR, status.to_raw())?)
    }

    /// Set the interrupt enable mask (IER)
    pub fn enable_interrupts(&mut self, mask: InterruptStatus) -> Result<()> {
        Ok(self.regs.write(IER, mask.to_raw())?)
    }

    /// Mask all interrupts; returns the previous mask for
    /// [`enable_interrupts`](Self::enable_interrupts)
    pub fn disable_interrupts(&mut self) -> Result<InterruptStatus> {
        let saved = self.regs.read(IER)?;
        self.regs.write(IER, 0)?;
        Ok(InterruptStatus::from_raw(saved))
    }

    // =========================================================================
    // PHY
    // =========================================================================

    /// PHY basic status (P1MBSR)
    pub fn phy_status(&mut self) -> Result<PhyStatus> {
        Ok(PhyStatus::from_raw(self.regs.read(P1MBSR)?))
    }

    /// Port status (P1SR)
    pub fn port_status(&mut self) -> Result<PortStatus> {
        Ok(PortStatus::from_raw(self.regs.read(P1SR)?))
    }

    /// Operating speed and duplex, or `None` while the link is down
    pub fn link_status(&mut self) -> Result<Option<LinkStatus>> {
        Ok(self.port_status()?.link())
    }

    /// Link is up
    pub fn is_link_up(&mut self) -> Result<bool> {
        Ok(self.port_status()?.link_good)
    }

    /// Enable and restart auto-negotiation
    pub fn restart_auto_negotiation(&mut self) -> Result<()> {
        self.regs.modify(P1CR, restart_an_control)?;
        Ok(())
    }

    /// Disable auto-negotiation and force speed and duplex
    pub fn force_link(&mut self, link: LinkStatus) -> Result<()> {
        self.regs.modify(P1CR, |v| forced_control(v, link))?;
        Ok(())
    }

    // =========================================================================
    // MAC Address
    // =========================================================================

    /// Program a new station address
    pub fn set_mac_address(&mut self, mac: MacAddress) -> Result<()> {
        let [low, middle, high] = mac.register_words();
        self.regs.write(MARL, low)?;
        self.regs.write(MARM, middle)?;
        self.regs.write(MARH, high)?;
        self.config.mac_address = mac;
        Ok(())
    }

    /// Station address as currently held by the chip
    pub fn read_mac_address(&mut self) -> Result<MacAddress> {
        let low = self.regs.read(MARL)?;
        let middle = self.regs.read(MARM)?;
        let high = self.regs.read(MARH)?;
        Ok(MacAddress::from_register_words(low, middle, high))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Current state
    pub fn state(&self) -> State {
        self.state
    }

    /// Bring-up complete
    pub fn is_ready(&self) -> bool {
        self.state == State::Ready
    }

    /// Active configuration
    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Configured station address
    pub fn mac_address(&self) -> MacAddress {
        self.config.mac_address
    }

    /// Shared access to the platform
    pub fn platform(&self) -> &P {
        self.regs.platform()
    }

    /// Exclusive access to the platform
    pub fn platform_mut(&mut self) -> &mut P {
        self.regs.platform_mut()
    }

    /// Give the platform back
    pub fn release(self) -> P {
        self.regs.into_platform()
    }
}
