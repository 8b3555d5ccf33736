//! Port 1 PHY status types
//!
//! The KSZ8851SNL integrates its PHY; the MII registers are mirrored into
//! the chip's register space (P1MBCR/P1MBSR, P1CR/P1SR). This module
//! decodes those registers and builds the P1CR values used to steer
//! auto-negotiation.

use crate::driver::config::{Duplex, Speed};
use crate::internal::regs::p1cr;

// =============================================================================
// Link Status
// =============================================================================

/// Ethernet link status information
///
/// Contains the negotiated or configured link parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkStatus {
    /// Link speed
    pub speed: Speed,
    /// Duplex mode
    pub duplex: Duplex,
}

impl LinkStatus {
    /// Create a new link status
    pub const fn new(speed: Speed, duplex: Duplex) -> Self {
        Self { speed, duplex }
    }

    /// 100 Mbps Full Duplex
    pub const fn fast_full() -> Self {
        Self::new(Speed::Mbps100, Duplex::Full)
    }

    /// 10 Mbps Half Duplex
    pub const fn slow_half() -> Self {
        Self::new(Speed::Mbps10, Duplex::Half)
    }
}

// =============================================================================
// PHY Capabilities
// =============================================================================

/// Speed/duplex abilities, either local (P1MBSR) or the link partner's (P1SR)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhyCapabilities {
    /// 100BASE-TX Full Duplex
    pub speed_100_fd: bool,
    /// 100BASE-TX Half Duplex
    pub speed_100_hd: bool,
    /// 10BASE-T Full Duplex
    pub speed_10_fd: bool,
    /// 10BASE-T Half Duplex
    pub speed_10_hd: bool,
    /// PAUSE flow control
    pub pause: bool,
}

impl PhyCapabilities {
    /// Best common mode with a partner, if any
    pub const fn best_common(&self, partner: &Self) -> Option<LinkStatus> {
        if self.speed_100_fd && partner.speed_100_fd {
            Some(LinkStatus::new(Speed::Mbps100, Duplex::Full))
        } else if self.speed_100_hd && partner.speed_100_hd {
            Some(LinkStatus::new(Speed::Mbps100, Duplex::Half))
        } else if self.speed_10_fd && partner.speed_10_fd {
            Some(LinkStatus::new(Speed::Mbps10, Duplex::Full))
        } else if self.speed_10_hd && partner.speed_10_hd {
            Some(LinkStatus::new(Speed::Mbps10, Duplex::Half))
        } else {
            None
        }
    }
}

// =============================================================================
// PHY Status (P1MBSR)
// =============================================================================

const MBSR_100_T4: u16 = 1 << 15;
const MBSR_100_FD: u16 = 1 << 14;
const MBSR_100_HD: u16 = 1 << 13;
const MBSR_10_FD: u16 = 1 << 12;
const MBSR_10_HD: u16 = 1 << 11;
const MBSR_AN_COMPLETE: u16 = 1 << 5;
const MBSR_AN_CAPABLE: u16 = 1 << 3;
const MBSR_LINK: u16 = 1 << 2;
const MBSR_EXTENDED: u16 = 1 << 0;

/// Snapshot of the PHY's MII basic status register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhyStatus {
    /// Local abilities
    pub capabilities: PhyCapabilities,
    /// 100BASE-T4 capable (always clear on this chip)
    pub t4_capable: bool,
    /// Auto-negotiation finished
    pub an_complete: bool,
    /// Auto-negotiation supported
    pub an_capable: bool,
    /// Link is up
    pub link_up: bool,
    /// Extended register set present
    pub extended: bool,
}

impl PhyStatus {
    /// Decode a P1MBSR value
    pub const fn from_raw(raw: u16) -> Self {
        Self {
            capabilities: PhyCapabilities {
                speed_100_fd: raw & MBSR_100_FD != 0,
                speed_100_hd: raw & MBSR_100_HD != 0,
                speed_10_fd: raw & MBSR_10_FD != 0,
                speed_10_hd: raw & MBSR_10_HD != 0,
                pause: false,
            },
            t4_capable: raw & MBSR_100_T4 != 0,
            an_complete: raw & MBSR_AN_COMPLETE != 0,
            an_capable: raw & MBSR_AN_CAPABLE != 0,
            link_up: raw & MBSR_LINK != 0,
            extended: raw & MBSR_EXTENDED != 0,
        }
    }
}

// =============================================================================
// Port Status (P1SR)
// =============================================================================

const P1SR_HP_MDIX: u16 = 1 << 15;
const P1SR_POLARITY_REVERSED: u16 = 1 << 13;
const P1SR_SPEED_100: u16 = 1 << 10;
const P1SR_FULL_DUPLEX: u16 = 1 << 9;
const P1SR_MDIX: u16 = 1 << 7;
const P1SR_AN_DONE: u16 = 1 << 6;
const P1SR_LINK_GOOD: u16 = 1 << 5;
const P1SR_PARTNER_PAUSE: u16 = 1 << 4;
const P1SR_PARTNER_100FD: u16 = 1 << 3;
const P1SR_PARTNER_100HD: u16 = 1 << 2;
const P1SR_PARTNER_10FD: u16 = 1 << 1;
const P1SR_PARTNER_10HD: u16 = 1 << 0;

/// Snapshot of the port 1 status register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PortStatus {
    /// HP Auto-MDIX mode
    pub hp_mdix: bool,
    /// Receive polarity is reversed
    pub polarity_reversed: bool,
    /// Operating at 100 Mbps
    pub speed_100: bool,
    /// Operating in full duplex
    pub full_duplex: bool,
    /// MDI-X (crossed) operation
    pub mdix: bool,
    /// Auto-negotiation done
    pub an_done: bool,
    /// Link is good
    pub link_good: bool,
    /// Abilities advertised by the link partner
    pub partner: PhyCapabilities,
}

impl PortStatus {
    /// Decode a P1SR value
    pub const fn from_raw(raw: u16) -> Self {
        Self {
            hp_mdix: raw & P1SR_HP_MDIX != 0,
            polarity_reversed: raw & P1SR_POLARITY_REVERSED != 0,
            speed_100: raw & P1SR_SPEED_100 != 0,
            full_duplex: raw & P1SR_FULL_DUPLEX != 0,
            mdix: raw & P1SR_MDIX != 0,
            an_done: raw & P1SR_AN_DONE != 0,
            link_good: raw & P1SR_LINK_GOOD != 0,
            partner: PhyCapabilities {
                speed_100_fd: raw & P1SR_PARTNER_100FD != 0,
                speed_100_hd: raw & P1SR_PARTNER_100HD != 0,
                speed_10_fd: raw & P1SR_PARTNER_10FD != 0,
                speed_10_hd: raw & P1SR_PARTNER_10HD != 0,
                pause: raw & P1SR_PARTNER_PAUSE != 0,
            },
        }
    }

    /// Operating speed and duplex, or `None` while the link is down
    pub const fn link(&self) -> Option<LinkStatus> {
        if !self.link_good {
            return None;
        }
        let speed = if self.speed_100 {
            Speed::Mbps100
        } else {
            Speed::Mbps10
        };
        let duplex = if self.full_duplex {
            Duplex::Full
        } else {
            Duplex::Half
        };
        Some(LinkStatus::new(speed, duplex))
    }
}

// =============================================================================
// Port Control (P1CR)
// =============================================================================

/// P1CR value forcing `link`, with auto-negotiation disabled.
///
/// Bits outside speed, duplex, AN enable and AN restart are kept from
/// `current`.
pub const fn forced_control(current: u16, link: LinkStatus) -> u16 {
    const CLEARED: u16 =
        p1cr::AUTO_NEG_ENABLE | p1cr::AUTO_NEG_RESTART | p1cr::FORCE_100 | p1cr::FORCE_FULL_DUPLEX;

    let mut value = current & !CLEARED;
    if matches!(link.speed, Speed::Mbps100) {
        value |= p1cr::FORCE_100;
    }
    if matches!(link.duplex, Duplex::Full) {
        value |= p1cr::FORCE_FULL_DUPLEX;
    }
    value
}

/// P1CR value enabling and restarting auto-negotiation.
pub const fn restart_an_control(current: u16) -> u16 {
    current | p1cr::AUTO_NEG_ENABLE | p1cr::AUTO_NEG_RESTART
}
