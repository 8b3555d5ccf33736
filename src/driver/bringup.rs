//! Bring-up state and configuration reporting.

use crate::driver::error::{BusError, BusResult};

/// Driver state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Constructed, chip untouched
    #[default]
    Created,
    /// Reset line being pulsed
    HardReset,
    /// Reading the chip identity
    IdentityCheck,
    /// Pulsing the soft reset bits
    SoftReset,
    /// Applying the register configuration
    Configuring,
    /// Bring-up complete, frame I/O allowed
    Ready,
    /// Identity never matched; `init` may be retried
    InitError,
}

/// One write (or read-back) of the configuration sequence, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ConfigStep {
    /// GRR soft reset pulse
    SoftReset,
    /// MARL
    MacLow,
    /// MARM
    MacMiddle,
    /// MARH
    MacHigh,
    /// TXFDPR auto-increment
    TxPointer,
    /// TXCR flow/pad/CRC/checksum generation
    TxControl,
    /// RXFDPR auto-increment
    RxPointer,
    /// RXFCTR one-frame threshold
    RxThreshold,
    /// RXCR1 address filtering, flow control, checksum verification
    RxControl1,
    /// RXCR2 extra checksum handling, single-frame burst
    RxControl2,
    /// RXQCR auto-dequeue, frame-count interrupt, IP offset
    RxQueue,
    /// OBCR bus clock and drive strength
    BusControl,
    /// P1CR auto-negotiation restart
    AutoNegRestart,
    /// P1CR read-back, forcing full duplex when the restart did not take
    DuplexFallback,
    /// ISR clear-all
    ClearInterrupts,
    /// FCLWR
    FlowLowWatermark,
    /// FCHWR
    FlowHighWatermark,
    /// TXCR transmit enable
    EnableTx,
    /// RXCR1 receive enable
    EnableRx,
    /// IER datapath interrupts
    EnableInterrupts,
}

impl ConfigStep {
    /// Number of steps
    pub const COUNT: usize = 20;

    /// All steps in execution order
    pub const ALL: [ConfigStep; Self::COUNT] = [
        ConfigStep::SoftReset,
        ConfigStep::MacLow,
        ConfigStep::MacMiddle,
        ConfigStep::MacHigh,
        ConfigStep::TxPointer,
        ConfigStep::TxControl,
        ConfigStep::RxPointer,
        ConfigStep::RxThreshold,
        ConfigStep::RxControl1,
        ConfigStep::RxControl2,
        ConfigStep::RxQueue,
        ConfigStep::BusControl,
        ConfigStep::AutoNegRestart,
        ConfigStep::DuplexFallback,
        ConfigStep::ClearInterrupts,
        ConfigStep::FlowLowWatermark,
        ConfigStep::FlowHighWatermark,
        ConfigStep::EnableTx,
        ConfigStep::EnableRx,
        ConfigStep::EnableInterrupts,
    ];

    const fn index(self) -> usize {
        self as usize
    }
}

/// Outcome of a single configuration step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StepOutcome {
    /// Not performed (option disabled or condition not met)
    #[default]
    Skipped,
    /// Performed successfully
    Applied,
    /// Bus error while performing the step
    Failed(BusError),
}

/// Per-step results of the configuration sequence.
///
/// A failing step does not stop the sequence, so the report may show
/// failures followed by applied steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConfigReport {
    outcomes: [StepOutcome; ConfigStep::COUNT],
}

impl Default for ConfigReport {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigReport {
    /// Report with every step skipped
    pub const fn new() -> Self {
        Self {
            outcomes: [StepOutcome::Skipped; ConfigStep::COUNT],
        }
    }

    /// Record the result of `step`
    pub fn record(&mut self, step: ConfigStep, result: BusResult) {
        let outcome = match result {
            Ok(()) => StepOutcome::Applied,
            Err(e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("config step {} failed: {}", step, e);
                StepOutcome::Failed(e)
            }
        };
        self.outcomes[step.index()] = outcome;
    }

    /// Outcome of `step`
    pub const fn outcome(&self, step: ConfigStep) -> StepOutcome {
        self.outcomes[step.index()]
    }

    /// No step failed
    pub fn is_complete(&self) -> bool {
        self.failures().next().is_none()
    }

    /// Failed steps with their bus errors, in execution order
    pub fn failures(&self) -> impl Iterator<Item = (ConfigStep, BusError)> + '_ {
        ConfigStep::ALL
            .iter()
            .zip(self.outcomes.iter())
            .filter_map(|(step, outcome)| match outcome {
                StepOutcome::Failed(e) => Some((*step, *e)),
                _ => None,
            })
    }

    /// Number of steps performed successfully
    pub fn applied(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, StepOutcome::Applied))
            .count()
    }

    /// Single status for the whole sequence: the first failure, if any
    pub fn aggregate(&self) -> BusResult {
        match self.failures().next() {
            Some((_, e)) => Err(e),
            None => Ok(()),
        }
    }
}
