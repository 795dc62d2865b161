//! Conversion of decoded vectors into Arrow arrays.

use std::sync::Arc;

use arrow::array::{
    new_empty_array, Array, ArrayRef, BinaryArray, BooleanArray, Date32Array, Float32Array,
    Float64Array, Int16Array, Int32Array, Int64Array, Int8Array, ListArray, StringArray,
    Time64MicrosecondArray, TimestampMicrosecondArray, TimestampMillisecondArray,
    TimestampNanosecondArray, TimestampSecondArray, UInt16Array, UInt32Array, UInt8Array,
};
use arrow::buffer::{NullBuffer, OffsetBuffer};
use arrow::datatypes::Field;
use arrow::error::ArrowError;

use super::ColumnVector;
use crate::error::{ColvecError, Result};
use crate::storage::FixedWidth;
use crate::types::{LogicalType, TimeUnit};

fn export_error(e: ArrowError) -> ColvecError {
    ColvecError::ExportError(e.to_string())
}

impl ColumnVector {
    /// Converts the vector to an Arrow array.
    ///
    /// Widened unsigned columns are narrowed back to their Arrow unsigned
    /// types. List columns are exported recursively.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedType` for struct and map columns, and for list
    /// columns whose element type is neither declared nor observable.
    /// Returns `ExportError` if a value does not fit its Arrow type or the
    /// list children disagree on type.
    pub fn to_arrow(&self) -> Result<ArrayRef> {
        let array: ArrayRef = match self.logical_type() {
            LogicalType::Boolean => Arc::new(BooleanArray::from(self.values_of::<bool>()?)),
            LogicalType::Int8 => Arc::new(Int8Array::from(self.values_of::<i8>()?)),
            LogicalType::Int16 => Arc::new(Int16Array::from(self.values_of::<i16>()?)),
            LogicalType::Int32 => Arc::new(Int32Array::from(self.values_of::<i32>()?)),
            LogicalType::Int64 => Arc::new(Int64Array::from(self.values_of::<i64>()?)),
            LogicalType::UInt8 => Arc::new(UInt8Array::from(self.narrow::<i16, u8>()?)),
            LogicalType::UInt16 => Arc::new(UInt16Array::from(self.narrow::<i32, u16>()?)),
            LogicalType::UInt32 => Arc::new(UInt32Array::from(self.narrow::<i64, u32>()?)),
            LogicalType::Float32 => Arc::new(Float32Array::from(self.values_of::<f32>()?)),
            LogicalType::Float64 => Arc::new(Float64Array::from(self.values_of::<f64>()?)),
            LogicalType::Date => Arc::new(Date32Array::from(self.values_of::<i32>()?)),
            LogicalType::Time => Arc::new(Time64MicrosecondArray::from(self.values_of::<i64>()?)),
            LogicalType::Timestamp(unit) => {
                let ticks = self.values_of::<i64>()?;
                match unit {
                    TimeUnit::Second => Arc::new(TimestampSecondArray::from(ticks)),
                    TimeUnit::Millisecond => Arc::new(TimestampMillisecondArray::from(ticks)),
                    TimeUnit::Microsecond => Arc::new(TimestampMicrosecondArray::from(ticks)),
                    TimeUnit::Nanosecond => Arc::new(TimestampNanosecondArray::from(ticks)),
                }
            }
            LogicalType::Utf8 => {
                let values = (0..self.len)
                    .map(|row| self.get_str(row))
                    .collect::<Result<Vec<_>>>()?;
                Arc::new(StringArray::from(values))
            }
            LogicalType::Blob => {
                let values = (0..self.len)
                    .map(|row| self.get_bytes(row))
                    .collect::<Result<Vec<_>>>()?;
                Arc::new(BinaryArray::from(values))
            }
            LogicalType::List => self.list_to_arrow()?,
            LogicalType::Struct | LogicalType::Map => {
                return Err(ColvecError::UnsupportedType(format!(
                    "{} columns cannot be exported to Arrow",
                    self.type_name
                )))
            }
        };
        Ok(array)
    }

    fn values_of<T: FixedWidth>(&self) -> Result<Vec<Option<T>>> {
        (0..self.len)
            .map(|row| {
                if self.nulls.is_null(row)? {
                    Ok(None)
                } else {
                    self.read::<T>(row).map(Some)
                }
            })
            .collect()
    }

    fn narrow<W, N>(&self) -> Result<Vec<Option<N>>>
    where
        W: FixedWidth + Copy + std::fmt::Display,
        N: TryFrom<W>,
    {
        self.values_of::<W>()?
            .into_iter()
            .map(|slot| {
                slot.map(|wide| {
                    N::try_from(wide).map_err(|_| {
                        ColvecError::ExportError(format!(
                            "{wide} is out of range for {}",
                            self.type_name
                        ))
                    })
                })
                .transpose()
            })
            .collect()
    }

    fn list_to_arrow(&self) -> Result<ArrayRef> {
        let mut children: Vec<ArrayRef> = Vec::new();
        let mut lengths = Vec::with_capacity(self.len);
        for row in 0..self.len {
            match self.get_list(row)? {
                Some(child) => {
                    lengths.push(child.len());
                    children.push(child.to_arrow()?);
                }
                None => lengths.push(0),
            }
        }

        let element_type = match self.descriptor.element() {
            Some(element) => element.to_arrow()?,
            None => children
                .first()
                .map(|c| c.data_type().clone())
                .ok_or_else(|| {
                    ColvecError::UnsupportedType(format!(
                        "{} column has no element type to export",
                        self.type_name
                    ))
                })?,
        };

        let values = if children.is_empty() {
            new_empty_array(&element_type)
        } else {
            let refs: Vec<&dyn Array> = children.iter().map(AsRef::as_ref).collect();
            arrow::compute::concat(&refs).map_err(export_error)?
        };

        let nulls = (self.nulls.null_count() > 0).then(|| NullBuffer::from(self.nulls.validity()));
        let field = Arc::new(Field::new("item", element_type, true));
        let list = ListArray::try_new(field, OffsetBuffer::from_lengths(lengths), values, nulls)
            .map_err(export_error)?;
        Ok(Arc::new(list))
    }
}
