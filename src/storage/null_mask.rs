//! Per-row null bitmap.

use bitvec::prelude::*;

use crate::error::{ColvecError, Result};

/// Packed null bitmap. A set bit marks a row with no value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NullMask {
    bits: BitVec<u8, Lsb0>,
}

impl NullMask {
    /// Creates a mask from per-row flags, `true` meaning null.
    #[must_use]
    pub fn from_bools(mask: &[bool]) -> Self {
        mask.iter().copied().collect()
    }

    /// Creates a mask of `len` rows with no nulls.
    #[must_use]
    pub fn all_valid(len: usize) -> Self {
        NullMask {
            bits: bitvec![u8, Lsb0; 0; len],
        }
    }

    /// Creates a mask from an Arrow-style validity bitmap, where a set bit
    /// (least significant first) marks a row that has a value.
    ///
    /// # Errors
    ///
    /// Returns `LayoutMismatch` if the bitmap holds fewer than `len` bits.
    pub fn from_validity_bitmap(validity: &[u8], len: usize) -> Result<Self> {
        let needed = len.div_ceil(8);
        if validity.len() < needed {
            return Err(ColvecError::LayoutMismatch {
                what: "validity bitmap",
                expected: needed,
                actual: validity.len(),
            });
        }
        let mut bits = BitVec::<u8, Lsb0>::from_slice(validity);
        bits.truncate(len);
        Ok(NullMask { bits: !bits })
    }

    /// Returns whether `row` is null.
    ///
    /// # Errors
    ///
    /// Returns `BoundsViolation` if `row` is outside the mask.
    pub fn is_null(&self, row: usize) -> Result<bool> {
        self.bits
            .get(row)
            .map(|bit| *bit)
            .ok_or(ColvecError::BoundsViolation {
                row,
                len: self.bits.len(),
            })
    }

    /// Returns the number of rows covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Returns true if the mask covers no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Returns the number of null rows.
    #[must_use]
    pub fn null_count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Returns per-row null flags in order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().by_vals()
    }

    /// Returns per-row validity flags (`true` meaning a value is present).
    #[must_use]
    pub fn validity(&self) -> Vec<bool> {
        self.iter().map(|null| !null).collect()
    }
}

impl FromIterator<bool> for NullMask {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        NullMask {
            bits: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<bool>> for NullMask {
    fn from(mask: Vec<bool>) -> Self {
        mask.into_iter().collect()
    }
}
