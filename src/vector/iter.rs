//! Forward iteration over decoded rows.

use std::iter::FusedIterator;

use super::ColumnVector;
use crate::error::Result;
use crate::types::Value;

/// Single-pass iterator over a vector's rows in order.
///
/// Once the last row has been yielded every further call to `next` returns
/// `None`. Start a new pass with [`ColumnVector::iter`].
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    vector: &'a ColumnVector,
    index: usize,
}

impl<'a> Iter<'a> {
    pub(super) fn new(vector: &'a ColumnVector) -> Self {
        Iter { vector, index: 0 }
    }

    /// Returns true while rows remain.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.index < self.vector.len()
    }
}

impl Iterator for Iter<'_> {
    type Item = Result<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.has_next() {
            return None;
        }
        let row = self.index;
        self.index += 1;
        Some(self.vector.get(row))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.vector.len() - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}
