//! colvec - Read-only decoding of columnar query results
//!
//! A result batch arrives as one buffer set per column: a null mask plus
//! either a packed little-endian buffer or per-row slots. [`ColumnVector`]
//! wraps one column and decodes rows on demand into [`Value`]s, including
//! struct, list and map columns whose rows own child vectors.
//!
//! ```
//! use colvec::{ColumnVector, NullMask, Value};
//!
//! let bytes: Vec<u8> = [7i32, 0, 9].iter().flat_map(|v| v.to_le_bytes()).collect();
//! let vector = ColumnVector::fixed(
//!     "INTEGER",
//!     3,
//!     NullMask::from_bools(&[false, true, false]),
//!     bytes,
//! )?;
//! assert_eq!(
//!     vector.to_array()?,
//!     vec![Value::Int32(7), Value::Null, Value::Int32(9)]
//! );
//! # Ok::<(), colvec::ColvecError>(())
//! ```

pub mod batch;
pub mod config;
pub mod error;
pub mod storage;
pub mod types;
pub mod vector;

pub use batch::{ResultBatch, Row};
pub use config::{DecodeConfig, DuplicateKeyPolicy};
pub use error::{ColvecError, Result};
pub use storage::{NullMask, StoredValue};
pub use types::{
    parse_type, resolve, LogicalType, MapValue, StructValue, TimeUnit, TypeDescriptor, Value,
};
pub use vector::{CollectionMut, ColumnVector};
