//! Raw row storage behind column vectors.
//!
//! This module provides:
//! - Null masks packed one bit per row ([`NullMask`])
//! - Little-endian fixed-width buffers ([`FixedWidthRegion`])
//! - Per-row slots for text, blobs and nested values ([`VariableLengthStore`])

mod fixed;
mod null_mask;
mod varlen;

pub use fixed::{FixedWidth, FixedWidthRegion};
pub use null_mask::NullMask;
pub use varlen::{StoredValue, VariableLengthStore};
