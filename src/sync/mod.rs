//! Synchronization Support
//!
//! - **Shared Wrapper** (`shared`): [`SharedKsz8851`], a critical-section
//!   protected driver slot usable from `static`s and interrupt handlers
//!
//! # Feature Flags
//!
//! - `critical-section`: Enables this module
//!
//! # Example
//!
//! ```ignore
//! use ph_ksz8851::sync::SharedKsz8851;
//!
//! static ETH: SharedKsz8851<Board> = SharedKsz8851::new();
//!
//! fn main() {
//!     ETH.install(Ksz8851::new(board, config));
//!     ETH.with(|eth| eth.init());
//! }
//! ```

mod shared;

pub use shared::SharedKsz8851;
