//! Packed little-endian storage for constant-width types.

use crate::error::{ColvecError, Result};

/// Primitive that can be read from a little-endian slot.
pub trait FixedWidth: Sized + Copy {
    /// Bytes per slot.
    const WIDTH: usize;

    /// Decodes one slot. `bytes` is exactly `WIDTH` long.
    fn from_le_slice(bytes: &[u8]) -> Self;
}

macro_rules! impl_fixed_width {
    ($($t:ty),*) => {
        $(
            impl FixedWidth for $t {
                const WIDTH: usize = std::mem::size_of::<$t>();

                fn from_le_slice(bytes: &[u8]) -> Self {
                    let mut buf = [0u8; std::mem::size_of::<$t>()];
                    buf.copy_from_slice(bytes);
                    <$t>::from_le_bytes(buf)
                }
            }
        )*
    };
}

impl_fixed_width!(i8, i16, i32, i64, f32, f64);

impl FixedWidth for bool {
    const WIDTH: usize = 1;

    fn from_le_slice(bytes: &[u8]) -> Self {
        bytes[0] != 0
    }
}

/// Contiguous buffer holding one `width`-byte encoding per row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedWidthRegion {
    bytes: Vec<u8>,
    width: usize,
    len: usize,
}

impl FixedWidthRegion {
    /// Wraps a buffer of `len` rows of `width` bytes each.
    ///
    /// # Errors
    ///
    /// Returns `LayoutMismatch` if the buffer is not exactly `len * width`
    /// bytes long.
    pub fn new(bytes: Vec<u8>, width: usize, len: usize) -> Result<Self> {
        let expected = len.checked_mul(width).ok_or(ColvecError::LayoutMismatch {
            what: "fixed-width buffer",
            expected: usize::MAX,
            actual: bytes.len(),
        })?;
        if bytes.len() != expected {
            return Err(ColvecError::LayoutMismatch {
                what: "fixed-width buffer",
                expected,
                actual: bytes.len(),
            });
        }
        Ok(FixedWidthRegion { bytes, width, len })
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the region holds no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the bytes `[row * width, row * width + width)`.
    ///
    /// # Errors
    ///
    /// Returns `BoundsViolation` if `row >= len`.
    pub fn row_bytes(&self, row: usize) -> Result<&[u8]> {
        if row >= self.len {
            return Err(ColvecError::BoundsViolation { row, len: self.len });
        }
        let start = row * self.width;
        Ok(&self.bytes[start..start + self.width])
    }

    /// Reads one row as `T`.
    ///
    /// # Errors
    ///
    /// Returns `TypeError` if `T` does not have the region's width, or
    /// `BoundsViolation` if `row >= len`.
    pub fn read<T: FixedWidth>(&self, row: usize) -> Result<T> {
        if T::WIDTH != self.width {
            return Err(ColvecError::type_error(
                format!("{}-byte slot", T::WIDTH),
                format!("{}-byte slot", self.width),
            ));
        }
        self.row_bytes(row).map(T::from_le_slice)
    }
}
