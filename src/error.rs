//! Error types for colvec decoding operations.

use thiserror::Error;

/// Result type alias using [`ColvecError`].
pub type Result<T> = std::result::Result<T, ColvecError>;

/// Error types for column vector decoding.
#[derive(Debug, Error)]
pub enum ColvecError {
    /// Type token or logical type with no decode path.
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// Mutating call on a read-only vector.
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// Map row whose backing struct entries are unusable as key/value pairs.
    #[error("Malformed map: {0}")]
    MalformedMap(String),

    /// Row index outside `[0, len)`.
    #[error("Row {row} out of bounds for vector of length {len}")]
    BoundsViolation { row: usize, len: usize },

    /// Input buffers whose sizes disagree with the declared row count.
    #[error("Layout mismatch in {what}: expected {expected}, got {actual}")]
    LayoutMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Accessor or stored slot that does not match the column type.
    #[error("Type error: expected {expected}, got {actual}")]
    TypeError { expected: String, actual: String },

    /// Conversion to Arrow failed.
    #[error("Export error: {0}")]
    ExportError(String),
}

impl ColvecError {
    pub(crate) fn type_error(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        ColvecError::TypeError {
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}
