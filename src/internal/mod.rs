//! Internal Implementation Details
//!
//! This module contains implementation details that are not part of the public API.
//! Types in this module may change without notice between minor versions.
//!
//! # Contents
//!
//! - [`frame`]: SPI command header codec and DWORD padding
//! - [`regs`]: Register map, bit definitions and the reserved-bit predicate
//! - [`constants`]: Frame sizes, timing defaults and bring-up limits
//!
//! # Stability
//!
//! **WARNING:** Do not depend on any types or functions in this module from
//! external code. They are subject to change without notice.

pub(crate) mod constants;
pub(crate) mod frame;
pub(crate) mod regs;
