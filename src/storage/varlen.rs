//! Per-row slots for variable-width and nested types.

use crate::error::{ColvecError, Result};
use crate::types::StructValue;
use crate::vector::ColumnVector;

/// A pre-decoded row value handed over by the producer.
#[derive(Debug, Clone, PartialEq)]
pub enum StoredValue {
    /// Placeholder for a null row.
    Null,
    /// Text of a `VARCHAR` row.
    Text(String),
    /// Bytes of a `BLOB` row.
    Bytes(Vec<u8>),
    /// Fields of a `STRUCT` row.
    Struct(StructValue),
    /// Child vector of a `LIST` row, or the entry struct vector of a `MAP` row.
    Vector(ColumnVector),
}

impl StoredValue {
    /// Short name of the slot kind, used in error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            StoredValue::Null => "null slot",
            StoredValue::Text(_) => "text slot",
            StoredValue::Bytes(_) => "bytes slot",
            StoredValue::Struct(_) => "struct slot",
            StoredValue::Vector(_) => "vector slot",
        }
    }
}

impl From<&str> for StoredValue {
    fn from(v: &str) -> Self {
        StoredValue::Text(v.to_string())
    }
}

impl From<String> for StoredValue {
    fn from(v: String) -> Self {
        StoredValue::Text(v)
    }
}

impl From<Vec<u8>> for StoredValue {
    fn from(v: Vec<u8>) -> Self {
        StoredValue::Bytes(v)
    }
}

impl From<StructValue> for StoredValue {
    fn from(v: StructValue) -> Self {
        StoredValue::Struct(v)
    }
}

impl From<ColumnVector> for StoredValue {
    fn from(v: ColumnVector) -> Self {
        StoredValue::Vector(v)
    }
}

/// Ordered row slots, one per row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariableLengthStore {
    slots: Vec<StoredValue>,
}

impl VariableLengthStore {
    /// Wraps `len` row slots.
    ///
    /// # Errors
    ///
    /// Returns `LayoutMismatch` if the slot count differs from `len`.
    pub fn new(slots: Vec<StoredValue>, len: usize) -> Result<Self> {
        if slots.len() != len {
            return Err(ColvecError::LayoutMismatch {
                what: "variable-length values",
                expected: len,
                actual: slots.len(),
            });
        }
        Ok(VariableLengthStore { slots })
    }

    /// Returns the slot of `row`.
    ///
    /// # Errors
    ///
    /// Returns `BoundsViolation` if `row` is out of range.
    pub fn read(&self, row: usize) -> Result<&StoredValue> {
        self.slots.get(row).ok_or(ColvecError::BoundsViolation {
            row,
            len: self.slots.len(),
        })
    }

    /// Returns the number of slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if there are no slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns an iterator over the slots.
    pub fn iter(&self) -> impl Iterator<Item = &StoredValue> {
        self.slots.iter()
    }
}
