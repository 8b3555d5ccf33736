//! Integrated PHY support
//!
//! The KSZ8851SNL has a single 10/100 PHY (port 1) reached through ordinary
//! chip registers rather than an MDIO bus. The driver reads and writes those
//! registers through its register engine; this module only holds the
//! decoded views and the P1CR value builders.
//!
//! # Example
//!
//! ```ignore
//! // Wait for link and report the negotiated mode
//! loop {
//!     if let Some(link) = eth.link_status()? {
//!         defmt::info!("link up: {}", link);
//!         break;
//!     }
//! }
//! ```

pub mod generic;

pub use generic::{LinkStatus, PhyCapabilities, PhyStatus, PortStatus};
