//! Logical column types and the type-name registry.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::descriptor::parse_type;

/// Resolution of timestamp values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeUnit {
    Second,
    Millisecond,
    Microsecond,
    Nanosecond,
}

impl TimeUnit {
    /// Converts to the Arrow time unit.
    #[must_use]
    pub fn to_arrow(self) -> arrow::datatypes::TimeUnit {
        match self {
            TimeUnit::Second => arrow::datatypes::TimeUnit::Second,
            TimeUnit::Millisecond => arrow::datatypes::TimeUnit::Millisecond,
            TimeUnit::Microsecond => arrow::datatypes::TimeUnit::Microsecond,
            TimeUnit::Nanosecond => arrow::datatypes::TimeUnit::Nanosecond,
        }
    }

    /// Converts from the Arrow time unit.
    #[must_use]
    pub fn from_arrow(unit: arrow::datatypes::TimeUnit) -> Self {
        match unit {
            arrow::datatypes::TimeUnit::Second => TimeUnit::Second,
            arrow::datatypes::TimeUnit::Millisecond => TimeUnit::Millisecond,
            arrow::datatypes::TimeUnit::Microsecond => TimeUnit::Microsecond,
            arrow::datatypes::TimeUnit::Nanosecond => TimeUnit::Nanosecond,
        }
    }
}

/// In-buffer representation of a logical type.
///
/// Unsigned logical types are widened by the producer to the next signed
/// width, so `UInt8` rows occupy an `I16` slot and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhysicalType {
    Bool,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    /// Pre-decoded slot in the variable-length store.
    Variable,
}

impl PhysicalType {
    /// Bytes per row in a fixed-width region, `None` for variable slots.
    ///
    /// This is the only width table in the crate.
    #[must_use]
    pub fn byte_width(self) -> Option<usize> {
        match self {
            PhysicalType::Bool | PhysicalType::I8 => Some(1),
            PhysicalType::I16 => Some(2),
            PhysicalType::I32 | PhysicalType::F32 => Some(4),
            PhysicalType::I64 | PhysicalType::F64 => Some(8),
            PhysicalType::Variable => None,
        }
    }

    /// Short name used in error messages.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            PhysicalType::Bool => "bool",
            PhysicalType::I8 => "i8",
            PhysicalType::I16 => "i16",
            PhysicalType::I32 => "i32",
            PhysicalType::I64 => "i64",
            PhysicalType::F32 => "f32",
            PhysicalType::F64 => "f64",
            PhysicalType::Variable => "variable",
        }
    }
}

/// Semantic kind of a column's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicalType {
    /// Boolean stored as one byte.
    Boolean,
    /// 8-bit signed integer.
    Int8,
    /// 16-bit signed integer.
    Int16,
    /// 32-bit signed integer.
    Int32,
    /// 64-bit signed integer.
    Int64,
    /// 8-bit unsigned integer, widened to 16 bits.
    UInt8,
    /// 16-bit unsigned integer, widened to 32 bits.
    UInt16,
    /// 32-bit unsigned integer, widened to 64 bits.
    UInt32,
    /// 32-bit floating point.
    Float32,
    /// 64-bit floating point.
    Float64,
    /// Days since 1970-01-01.
    Date,
    /// Microseconds since midnight.
    Time,
    /// Ticks since the Unix epoch in the given unit.
    Timestamp(TimeUnit),
    /// UTF-8 text.
    Utf8,
    /// Opaque bytes.
    Blob,
    /// Ordered named fields.
    Struct,
    /// Variable-length sequence of one child type.
    List,
    /// Key/value pairs backed by a struct vector.
    Map,
}

/// Recognized type-name tokens. Parameterized forms (`STRUCT(...)`, `T[]`,
/// `MAP(K, V)`) are handled by the descriptor grammar.
const REGISTRY: &[(&str, LogicalType)] = &[
    ("BOOLEAN", LogicalType::Boolean),
    ("TINYINT", LogicalType::Int8),
    ("SMALLINT", LogicalType::Int16),
    ("INTEGER", LogicalType::Int32),
    ("BIGINT", LogicalType::Int64),
    ("UTINYINT", LogicalType::UInt8),
    ("USMALLINT", LogicalType::UInt16),
    ("UINTEGER", LogicalType::UInt32),
    ("FLOAT", LogicalType::Float32),
    ("DOUBLE", LogicalType::Float64),
    ("DATE", LogicalType::Date),
    ("TIME", LogicalType::Time),
    ("TIMESTAMP", LogicalType::Timestamp(TimeUnit::Microsecond)),
    ("TIMESTAMP_S", LogicalType::Timestamp(TimeUnit::Second)),
    ("TIMESTAMP_MS", LogicalType::Timestamp(TimeUnit::Millisecond)),
    ("TIMESTAMP_NS", LogicalType::Timestamp(TimeUnit::Nanosecond)),
    ("VARCHAR", LogicalType::Utf8),
    ("BLOB", LogicalType::Blob),
    ("STRUCT", LogicalType::Struct),
    ("LIST", LogicalType::List),
    ("MAP", LogicalType::Map),
];

/// Resolves a type-name token to its logical type.
///
/// Accepts the bare tokens of the registry as well as parameterized
/// descriptors such as `STRUCT(a INTEGER, b VARCHAR)`, `INTEGER[]` and
/// `MAP(VARCHAR, BIGINT)`. Matching is case-sensitive.
///
/// # Errors
///
/// Returns `UnsupportedType` for any token outside the recognized vocabulary.
pub fn resolve(type_name: &str) -> Result<LogicalType> {
    parse_type(type_name).map(|descriptor| descriptor.logical_type())
}

impl LogicalType {
    /// Looks up a bare registry token.
    #[must_use]
    pub fn from_name(token: &str) -> Option<Self> {
        REGISTRY
            .iter()
            .find(|(name, _)| *name == token)
            .map(|(_, logical_type)| *logical_type)
    }

    /// Returns the canonical type-name token.
    #[must_use]
    pub fn name(&self) -> &'static str {
        REGISTRY
            .iter()
            .find(|(_, logical_type)| logical_type == self)
            .map_or("UNKNOWN", |(name, _)| name)
    }

    /// Returns how rows of this type are laid out in storage.
    #[must_use]
    pub fn physical_type(&self) -> PhysicalType {
        match self {
            LogicalType::Boolean => PhysicalType::Bool,
            LogicalType::Int8 => PhysicalType::I8,
            LogicalType::Int16 | LogicalType::UInt8 => PhysicalType::I16,
            LogicalType::Int32 | LogicalType::UInt16 | LogicalType::Date => PhysicalType::I32,
            LogicalType::Int64
            | LogicalType::UInt32
            | LogicalType::Time
            | LogicalType::Timestamp(_) => PhysicalType::I64,
            LogicalType::Float32 => PhysicalType::F32,
            LogicalType::Float64 => PhysicalType::F64,
            LogicalType::Utf8
            | LogicalType::Blob
            | LogicalType::Struct
            | LogicalType::List
            | LogicalType::Map => PhysicalType::Variable,
        }
    }

    /// Returns the byte width for fixed-width types.
    #[must_use]
    pub fn byte_width(&self) -> Option<usize> {
        self.physical_type().byte_width()
    }

    /// Returns whether rows live in a fixed-width region.
    #[must_use]
    pub fn is_fixed_width(&self) -> bool {
        self.byte_width().is_some()
    }

    /// Returns whether this type has child vectors or fields.
    #[must_use]
    pub fn is_nested(&self) -> bool {
        matches!(
            self,
            LogicalType::Struct | LogicalType::List | LogicalType::Map
        )
    }

    /// Converts a scalar type to an Arrow data type.
    ///
    /// Returns None for nested types, whose Arrow shape depends on their
    /// children; see [`TypeDescriptor::to_arrow`](crate::types::TypeDescriptor::to_arrow).
    #[must_use]
    pub fn to_arrow(&self) -> Option<arrow::datatypes::DataType> {
        use arrow::datatypes::DataType as Arrow;
        let arrow_type = match self {
            LogicalType::Boolean => Arrow::Boolean,
            LogicalType::Int8 => Arrow::Int8,
            LogicalType::Int16 => Arrow::Int16,
            LogicalType::Int32 => Arrow::Int32,
            LogicalType::Int64 => Arrow::Int64,
            LogicalType::UInt8 => Arrow::UInt8,
            LogicalType::UInt16 => Arrow::UInt16,
            LogicalType::UInt32 => Arrow::UInt32,
            LogicalType::Float32 => Arrow::Float32,
            LogicalType::Float64 => Arrow::Float64,
            LogicalType::Date => Arrow::Date32,
            LogicalType::Time => Arrow::Time64(arrow::datatypes::TimeUnit::Microsecond),
            LogicalType::Timestamp(unit) => Arrow::Timestamp(unit.to_arrow(), None),
            LogicalType::Utf8 => Arrow::Utf8,
            LogicalType::Blob => Arrow::Binary,
            LogicalType::Struct | LogicalType::List | LogicalType::Map => return None,
        };
        Some(arrow_type)
    }

    /// Converts from an Arrow data type.
    ///
    /// Returns None for unsupported Arrow types.
    #[must_use]
    pub fn from_arrow(arrow_type: &arrow::datatypes::DataType) -> Option<Self> {
        use arrow::datatypes::DataType as Arrow;
        match arrow_type {
            Arrow::Boolean => Some(LogicalType::Boolean),
            Arrow::Int8 => Some(LogicalType::Int8),
            Arrow::Int16 => Some(LogicalType::Int16),
            Arrow::Int32 => Some(LogicalType::Int32),
            Arrow::Int64 => Some(LogicalType::Int64),
            Arrow::UInt8 => Some(LogicalType::UInt8),
            Arrow::UInt16 => Some(LogicalType::UInt16),
            Arrow::UInt32 => Some(LogicalType::UInt32),
            Arrow::Float32 => Some(LogicalType::Float32),
            Arrow::Float64 => Some(LogicalType::Float64),
            Arrow::Date32 => Some(LogicalType::Date),
            Arrow::Time64(arrow::datatypes::TimeUnit::Microsecond) => Some(LogicalType::Time),
            Arrow::Timestamp(unit, _) => Some(LogicalType::Timestamp(TimeUnit::from_arrow(*unit))),
            Arrow::Utf8 | Arrow::LargeUtf8 => Some(LogicalType::Utf8),
            Arrow::Binary | Arrow::LargeBinary => Some(LogicalType::Blob),
            Arrow::Struct(_) => Some(LogicalType::Struct),
            Arrow::List(_) | Arrow::LargeList(_) => Some(LogicalType::List),
            Arrow::Map(_, _) => Some(LogicalType::Map),
            _ => None,
        }
    }
}

impl std::fmt::Display for LogicalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
