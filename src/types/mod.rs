//! Type system: logical types, descriptors and decoded values.

pub mod descriptor;
pub mod logical_type;
pub mod value;

pub use descriptor::{parse_type, ChildType, TypeDescriptor};
pub use logical_type::{resolve, LogicalType, PhysicalType, TimeUnit};
pub use value::{MapValue, StructValue, Value};
