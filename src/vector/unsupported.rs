//! Collection mutators that a read-only vector refuses.
//!
//! Result vectors are views over an immutable batch. Code written against a
//! generic collection shape can still call these methods; every one of them
//! fails with `UnsupportedOperation` regardless of its input.

use super::ColumnVector;
use crate::error::{ColvecError, Result};
use crate::types::Value;

fn unsupported<T>(operation: &str) -> Result<T> {
    Err(ColvecError::UnsupportedOperation(format!(
        "{operation} on a read-only column vector"
    )))
}

/// Mutating and membership operations of a general-purpose collection.
pub trait CollectionMut {
    /// Appends a value.
    ///
    /// # Errors
    ///
    /// Always returns `UnsupportedOperation` for read-only vectors.
    fn add(&mut self, _value: Value) -> Result<bool> {
        unsupported("add")
    }

    /// Appends every value.
    ///
    /// # Errors
    ///
    /// Always returns `UnsupportedOperation` for read-only vectors.
    fn add_all(&mut self, _values: &[Value]) -> Result<bool> {
        unsupported("add_all")
    }

    /// Removes one occurrence of a value.
    ///
    /// # Errors
    ///
    /// Always returns `UnsupportedOperation` for read-only vectors.
    fn remove(&mut self, _value: &Value) -> Result<bool> {
        unsupported("remove")
    }

    /// Removes every occurrence of the given values.
    ///
    /// # Errors
    ///
    /// Always returns `UnsupportedOperation` for read-only vectors.
    fn remove_all(&mut self, _values: &[Value]) -> Result<bool> {
        unsupported("remove_all")
    }

    /// Keeps only the given values.
    ///
    /// # Errors
    ///
    /// Always returns `UnsupportedOperation` for read-only vectors.
    fn retain_all(&mut self, _values: &[Value]) -> Result<bool> {
        unsupported("retain_all")
    }

    /// Removes every element.
    ///
    /// # Errors
    ///
    /// Always returns `UnsupportedOperation` for read-only vectors.
    fn clear(&mut self) -> Result<()> {
        unsupported("clear")
    }

    /// Tests membership of a value.
    ///
    /// # Errors
    ///
    /// Always returns `UnsupportedOperation` for read-only vectors.
    fn contains(&self, _value: &Value) -> Result<bool> {
        unsupported("contains")
    }

    /// Tests membership of every value.
    ///
    /// # Errors
    ///
    /// Always returns `UnsupportedOperation` for read-only vectors.
    fn contains_all(&self, _values: &[Value]) -> Result<bool> {
        unsupported("contains_all")
    }
}

impl CollectionMut for ColumnVector {}
