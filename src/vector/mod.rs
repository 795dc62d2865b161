//! Read-only column vectors over one result column.
//!
//! A [`ColumnVector`] combines a resolved type descriptor, a [`NullMask`] and
//! exactly one storage variant: a [`FixedWidthRegion`] for constant-width
//! types or a [`VariableLengthStore`] for text, blobs and nested types.
//! Vectors are immutable once built; list and map rows own their child
//! vectors outright.

mod export;
mod iter;
mod nested;
mod unsupported;

pub use iter::Iter;
pub use unsupported::CollectionMut;

use crate::config::DecodeConfig;
use crate::error::{ColvecError, Result};
use crate::storage::{FixedWidth, FixedWidthRegion, NullMask, StoredValue, VariableLengthStore};
use crate::types::{parse_type, LogicalType, PhysicalType, TypeDescriptor, Value};

/// Backing storage of a vector. Exactly one variant is populated.
#[derive(Debug, Clone, PartialEq)]
enum Storage {
    Fixed(FixedWidthRegion),
    Variable(VariableLengthStore),
}

/// Decoded, read-only view over one column of a result batch.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnVector {
    type_name: String,
    descriptor: TypeDescriptor,
    len: usize,
    nulls: NullMask,
    storage: Storage,
    config: DecodeConfig,
}

impl ColumnVector {
    /// Builds a vector over a packed little-endian buffer.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedType` for an unknown type token, `TypeError` if the
    /// type is not fixed-width, and `LayoutMismatch` if the mask or buffer
    /// length disagrees with `len`.
    pub fn fixed(type_name: &str, len: usize, nulls: NullMask, bytes: Vec<u8>) -> Result<Self> {
        Self::fixed_with_config(type_name, len, nulls, bytes, DecodeConfig::default())
    }

    /// Builds a fixed-width vector with explicit decoding options.
    ///
    /// # Errors
    ///
    /// See [`ColumnVector::fixed`].
    pub fn fixed_with_config(
        type_name: &str,
        len: usize,
        nulls: NullMask,
        bytes: Vec<u8>,
        config: DecodeConfig,
    ) -> Result<Self> {
        let descriptor = parse_type(type_name)?;
        let width = descriptor.logical_type().byte_width().ok_or_else(|| {
            ColvecError::type_error(
                format!("variable-length values for {type_name}"),
                "fixed-width buffer",
            )
        })?;
        check_mask_len(&nulls, len)?;
        let region = FixedWidthRegion::new(bytes, width, len)?;

        log::trace!(
            "built {type_name} vector: {len} rows, {} nulls, {width}-byte slots",
            nulls.null_count()
        );

        Ok(ColumnVector {
            type_name: type_name.to_string(),
            descriptor,
            len,
            nulls,
            storage: Storage::Fixed(region),
            config,
        })
    }

    /// Builds a vector over pre-decoded row slots.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedType` for an unknown type token, `TypeError` if the
    /// type is fixed-width or (with layout verification on) a non-null slot
    /// does not match the type, and `LayoutMismatch` if the mask or slot
    /// count disagrees with `len`.
    pub fn variable(
        type_name: &str,
        len: usize,
        nulls: NullMask,
        values: Vec<StoredValue>,
    ) -> Result<Self> {
        Self::variable_with_config(type_name, len, nulls, values, DecodeConfig::default())
    }

    /// Builds a variable-length vector with explicit decoding options.
    ///
    /// # Errors
    ///
    /// See [`ColumnVector::variable`].
    pub fn variable_with_config(
        type_name: &str,
        len: usize,
        nulls: NullMask,
        values: Vec<StoredValue>,
        config: DecodeConfig,
    ) -> Result<Self> {
        let descriptor = parse_type(type_name)?;
        if descriptor.logical_type().is_fixed_width() {
            return Err(ColvecError::type_error(
                format!("fixed-width buffer for {type_name}"),
                "variable-length values",
            ));
        }
        check_mask_len(&nulls, len)?;
        let store = VariableLengthStore::new(values, len)?;

        let vector = ColumnVector {
            type_name: type_name.to_string(),
            descriptor,
            len,
            nulls,
            storage: Storage::Variable(store),
            config,
        };
        if config.verify_layout {
            vector.verify_slots()?;
        }

        log::trace!(
            "built {type_name} vector: {len} rows, {} nulls",
            vector.nulls.null_count()
        );

        Ok(vector)
    }

    /// Returns the type token the vector was built from.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Returns the parsed type descriptor.
    #[must_use]
    pub fn descriptor(&self) -> &TypeDescriptor {
        &self.descriptor
    }

    /// Returns the logical type shared by every row.
    #[must_use]
    pub fn logical_type(&self) -> LogicalType {
        self.descriptor.logical_type()
    }

    /// Returns whether the vector has the given logical type.
    #[must_use]
    pub fn is_type(&self, logical_type: LogicalType) -> bool {
        self.logical_type() == logical_type
    }

    /// Returns the decoding options.
    #[must_use]
    pub fn config(&self) -> &DecodeConfig {
        &self.config
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns the number of rows. Same as [`ColumnVector::len`].
    #[must_use]
    pub fn size(&self) -> usize {
        self.len
    }

    /// Returns true if the vector has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the null mask.
    #[must_use]
    pub fn null_mask(&self) -> &NullMask {
        &self.nulls
    }

    /// Returns whether `row` is null.
    ///
    /// # Errors
    ///
    /// Returns `BoundsViolation` if `row >= len`.
    pub fn is_null(&self, row: usize) -> Result<bool> {
        self.nulls.is_null(row)
    }

    /// Decodes one row. Null rows decode to [`Value::Null`].
    ///
    /// # Errors
    ///
    /// Returns `BoundsViolation` if `row >= len`, `TypeError` if a stored
    /// slot does not match the column type, and `MalformedMap` for unusable
    /// map rows.
    pub fn get(&self, row: usize) -> Result<Value> {
        if self.nulls.is_null(row)? {
            return Ok(Value::Null);
        }

        match self.logical_type() {
            LogicalType::Boolean => self.read::<bool>(row).map(Value::Bool),
            LogicalType::Int8 => self.read::<i8>(row).map(Value::Int8),
            LogicalType::Int16 | LogicalType::UInt8 => self.read::<i16>(row).map(Value::Int16),
            LogicalType::Int32 | LogicalType::UInt16 => self.read::<i32>(row).map(Value::Int32),
            LogicalType::Int64 | LogicalType::UInt32 => self.read::<i64>(row).map(Value::Int64),
            LogicalType::Float32 => self.read::<f32>(row).map(Value::Float32),
            LogicalType::Float64 => self.read::<f64>(row).map(Value::Float64),
            LogicalType::Date => self.read::<i32>(row).map(Value::Date),
            LogicalType::Time => self.read::<i64>(row).map(Value::Time),
            LogicalType::Timestamp(unit) => {
                self.read::<i64>(row).map(|ticks| Value::Timestamp(ticks, unit))
            }
            LogicalType::Utf8 => self.text_at(row).map(|s| Value::String(s.to_string())),
            LogicalType::Blob => self.bytes_at(row).map(|b| Value::Blob(b.to_vec())),
            LogicalType::Struct => self.struct_at(row).map(|s| Value::Struct(s.clone())),
            LogicalType::List => self.list_at(row)?.to_array().map(Value::List),
            LogicalType::Map => self.map_at(row).map(Value::Map),
        }
    }

    /// Decodes every row in order. The result always has `len` elements.
    ///
    /// # Errors
    ///
    /// Returns the first error [`ColumnVector::get`] reports.
    pub fn to_array(&self) -> Result<Vec<Value>> {
        self.iter().collect()
    }

    /// Decodes rows `[offset, offset + count)`.
    ///
    /// # Errors
    ///
    /// Returns `BoundsViolation` if the range extends past the last row.
    pub fn slice(&self, offset: usize, count: usize) -> Result<Vec<Value>> {
        let end = offset
            .checked_add(count)
            .filter(|end| *end <= self.len)
            .ok_or(ColvecError::BoundsViolation {
                row: offset.saturating_add(count).saturating_sub(1),
                len: self.len,
            })?;
        (offset..end).map(|row| self.get(row)).collect()
    }

    /// Returns a single-pass iterator over decoded rows.
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self)
    }

    // ==================== Typed accessors ====================

    /// Reads a `BOOLEAN` row.
    ///
    /// # Errors
    ///
    /// Returns `TypeError` for other types and `BoundsViolation` for rows
    /// out of range.
    pub fn get_bool(&self, row: usize) -> Result<Option<bool>> {
        self.read_typed(row, PhysicalType::Bool)
    }

    /// Reads a `TINYINT` row.
    ///
    /// # Errors
    ///
    /// Returns `TypeError` for other types and `BoundsViolation` for rows
    /// out of range.
    pub fn get_i8(&self, row: usize) -> Result<Option<i8>> {
        self.read_typed(row, PhysicalType::I8)
    }

    /// Reads a row stored in a 2-byte slot (`SMALLINT`, `UTINYINT`).
    ///
    /// # Errors
    ///
    /// Returns `TypeError` for other types and `BoundsViolation` for rows
    /// out of range.
    pub fn get_i16(&self, row: usize) -> Result<Option<i16>> {
        self.read_typed(row, PhysicalType::I16)
    }

    /// Reads a row stored in a 4-byte integer slot (`INTEGER`,
    /// `USMALLINT`, `DATE`).
    ///
    /// # Errors
    ///
    /// Returns `TypeError` for other types and `BoundsViolation` for rows
    /// out of range.
    pub fn get_i32(&self, row: usize) -> Result<Option<i32>> {
        self.read_typed(row, PhysicalType::I32)
    }

    /// Reads a row as i64, widening any integer or temporal slot and parsing
    /// `VARCHAR` text.
    ///
    /// # Errors
    ///
    /// Returns `TypeError` for floating point, boolean, blob and nested
    /// columns, or text that is not an integer.
    pub fn get_i64(&self, row: usize) -> Result<Option<i64>> {
        if self.nulls.is_null(row)? {
            return Ok(None);
        }
        let value = match self.logical_type().physical_type() {
            PhysicalType::I8 => i64::from(self.read::<i8>(row)?),
            PhysicalType::I16 => i64::from(self.read::<i16>(row)?),
            PhysicalType::I32 => i64::from(self.read::<i32>(row)?),
            PhysicalType::I64 => self.read::<i64>(row)?,
            PhysicalType::Variable if self.is_type(LogicalType::Utf8) => {
                let text = self.text_at(row)?;
                text.trim()
                    .parse::<i64>()
                    .map_err(|_| ColvecError::type_error("i64", format!("'{text}'")))?
            }
            _ => return Err(ColvecError::type_error("i64", self.type_name.clone())),
        };
        Ok(Some(value))
    }

    /// Reads a `FLOAT` row.
    ///
    /// # Errors
    ///
    /// Returns `TypeError` for other types and `BoundsViolation` for rows
    /// out of range.
    pub fn get_f32(&self, row: usize) -> Result<Option<f32>> {
        self.read_typed(row, PhysicalType::F32)
    }

    /// Reads a `DOUBLE` row.
    ///
    /// # Errors
    ///
    /// Returns `TypeError` for other types and `BoundsViolation` for rows
    /// out of range.
    pub fn get_f64(&self, row: usize) -> Result<Option<f64>> {
        self.read_typed(row, PhysicalType::F64)
    }

    /// Borrows the text of a `VARCHAR` row.
    ///
    /// # Errors
    ///
    /// Returns `TypeError` for other types and `BoundsViolation` for rows
    /// out of range.
    pub fn get_str(&self, row: usize) -> Result<Option<&str>> {
        self.expect_type(LogicalType::Utf8)?;
        if self.nulls.is_null(row)? {
            return Ok(None);
        }
        self.text_at(row).map(Some)
    }

    /// Borrows the bytes of a `BLOB` row.
    ///
    /// # Errors
    ///
    /// Returns `TypeError` for other types and `BoundsViolation` for rows
    /// out of range.
    pub fn get_bytes(&self, row: usize) -> Result<Option<&[u8]>> {
        self.expect_type(LogicalType::Blob)?;
        if self.nulls.is_null(row)? {
            return Ok(None);
        }
        self.bytes_at(row).map(Some)
    }

    // ==================== Internals ====================

    fn read_typed<T: FixedWidth>(&self, row: usize, physical: PhysicalType) -> Result<Option<T>> {
        if self.logical_type().physical_type() != physical {
            return Err(ColvecError::type_error(
                physical.name(),
                self.type_name.clone(),
            ));
        }
        if self.nulls.is_null(row)? {
            return Ok(None);
        }
        self.read::<T>(row).map(Some)
    }

    fn expect_type(&self, logical_type: LogicalType) -> Result<()> {
        if self.is_type(logical_type) {
            Ok(())
        } else {
            Err(ColvecError::type_error(
                logical_type.name(),
                self.type_name.clone(),
            ))
        }
    }

    fn read<T: FixedWidth>(&self, row: usize) -> Result<T> {
        match &self.storage {
            Storage::Fixed(region) => region.read::<T>(row),
            Storage::Variable(_) => Err(ColvecError::type_error(
                "fixed-width buffer",
                format!("variable-length values for {}", self.type_name),
            )),
        }
    }

    fn slot(&self, row: usize) -> Result<&StoredValue> {
        match &self.storage {
            Storage::Variable(store) => store.read(row),
            Storage::Fixed(_) => Err(ColvecError::type_error(
                "variable-length values",
                format!("fixed-width buffer for {}", self.type_name),
            )),
        }
    }

    fn text_at(&self, row: usize) -> Result<&str> {
        match self.slot(row)? {
            StoredValue::Text(s) => Ok(s),
            other => Err(ColvecError::type_error("text slot", other.kind())),
        }
    }

    fn bytes_at(&self, row: usize) -> Result<&[u8]> {
        match self.slot(row)? {
            StoredValue::Bytes(b) => Ok(b),
            other => Err(ColvecError::type_error("bytes slot", other.kind())),
        }
    }

    /// Checks every non-null slot against the descriptor.
    fn verify_slots(&self) -> Result<()> {
        let Storage::Variable(store) = &self.storage else {
            return Ok(());
        };
        for (slot, null) in store.iter().zip(self.nulls.iter()) {
            if !null {
                self.verify_slot(slot)?;
            }
        }
        Ok(())
    }

    fn verify_slot(&self, slot: &StoredValue) -> Result<()> {
        let mismatch = |expected: &str| -> Result<()> {
            Err(ColvecError::type_error(
                format!("{expected} for {}", self.type_name),
                slot.kind(),
            ))
        };

        match (self.logical_type(), slot) {
            (LogicalType::Utf8, StoredValue::Text(_))
            | (LogicalType::Blob, StoredValue::Bytes(_)) => Ok(()),
            (LogicalType::Struct, StoredValue::Struct(fields)) => {
                if self.descriptor.admits_struct(fields) {
                    Ok(())
                } else {
                    Err(ColvecError::type_error(
                        self.descriptor.to_string(),
                        format!("struct {fields}"),
                    ))
                }
            }
            (LogicalType::List, StoredValue::Vector(child)) => match self.descriptor.element() {
                Some(element) if !element.accepts(child.descriptor()) => {
                    Err(ColvecError::type_error(
                        format!("{element} elements"),
                        format!("{} child vector", child.type_name()),
                    ))
                }
                _ => Ok(()),
            },
            (LogicalType::Map, StoredValue::Vector(child)) => {
                let entry = self.descriptor.map_entry();
                let fits = entry.as_ref().map_or_else(
                    || child.is_type(LogicalType::Struct),
                    |entry| entry.accepts(child.descriptor()),
                );
                if fits {
                    Ok(())
                } else {
                    let expected = entry.map_or_else(|| "STRUCT".to_string(), |e| e.to_string());
                    Err(ColvecError::type_error(
                        format!("{expected} entry vector"),
                        format!("{} child vector", child.type_name()),
                    ))
                }
            }
            (LogicalType::Utf8, _) => mismatch("text slot"),
            (LogicalType::Blob, _) => mismatch("bytes slot"),
            (LogicalType::Struct, _) => mismatch("struct slot"),
            (LogicalType::List | LogicalType::Map, _) => mismatch("vector slot"),
            (other, _) => mismatch(other.name()),
        }
    }
}

fn check_mask_len(nulls: &NullMask, len: usize) -> Result<()> {
    if nulls.len() == len {
        Ok(())
    } else {
        Err(ColvecError::LayoutMismatch {
            what: "null mask",
            expected: len,
            actual: nulls.len(),
        })
    }
}

impl<'a> IntoIterator for &'a ColumnVector {
    type Item = Result<Value>;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{StructValue, TimeUnit};

    fn i32_bytes(values: &[i32]) -> Vec<u8> {
        values.iter().flat_map(|v| v.to_le_bytes()).collect()
    }

    fn i64_bytes(values: &[i64]) -> Vec<u8> {
        values.iter().flat_map(|v| v.to_le_bytes()).collect()
    }

    #[test]
    fn test_int32_with_null_row() {
        let vector = ColumnVector::fixed(
            "INTEGER",
            3,
            NullMask::from_bools(&[false, true, false]),
            i32_bytes(&[7, 12345, 9]),
        )
        .unwrap();
        assert_eq!(
            vector.to_array().unwrap(),
            vec![Value::Int32(7), Value::Null, Value::Int32(9)]
        );
        assert_eq!(vector.get_i32(1).unwrap(), None);
    }

    #[test]
    fn test_widened_unsigned_types() {
        let bytes: Vec<u8> = [255i16, 3].iter().flat_map(|v| v.to_le_bytes()).collect();
        let vector = ColumnVector::fixed("UTINYINT", 2, NullMask::all_valid(2), bytes).unwrap();
        assert_eq!(vector.get(0).unwrap(), Value::Int16(255));
        assert_eq!(vector.get_i16(1).unwrap(), Some(3));

        let vector = ColumnVector::fixed(
            "UINTEGER",
            1,
            NullMask::all_valid(1),
            i64_bytes(&[4_000_000_000]),
        )
        .unwrap();
        assert_eq!(vector.get(0).unwrap(), Value::Int64(4_000_000_000));
    }

    #[test]
    fn test_temporal_types() {
        let ts = ColumnVector::fixed(
            "TIMESTAMP_MS",
            1,
            NullMask::all_valid(1),
            i64_bytes(&[1_000]),
        )
        .unwrap();
        assert_eq!(
            ts.get(0).unwrap(),
            Value::Timestamp(1_000, TimeUnit::Millisecond)
        );
        assert_eq!(ts.get_i64(0).unwrap(), Some(1_000));

        let date = ColumnVector::fixed("DATE", 1, NullMask::all_valid(1), i32_bytes(&[1])).unwrap();
        assert_eq!(date.get(0).unwrap(), Value::Date(1));
    }

    #[test]
    fn test_boolean_nonzero_bytes_are_true() {
        let vector = ColumnVector::fixed(
            "BOOLEAN",
            4,
            NullMask::from_bools(&[false, false, false, true]),
            vec![1, 0, 2, 0xFF],
        )
        .unwrap();
        assert_eq!(
            vector.to_array().unwrap(),
            vec![Value::Bool(true), Value::Bool(false), Value::Bool(true), Value::Null]
        );
        assert_eq!(vector.get_bool(2).unwrap(), Some(true));
        assert_eq!(vector.get_bool(3).unwrap(), None);
        assert!(matches!(vector.get_i8(0), Err(ColvecError::TypeError { .. })));
    }

    #[test]
    fn test_tinyint_rows() {
        let bytes: Vec<u8> = [-128i8, 0, 127].iter().flat_map(|v| v.to_le_bytes()).collect();
        let vector = ColumnVector::fixed(
            "TINYINT",
            3,
            NullMask::from_bools(&[false, true, false]),
            bytes,
        )
        .unwrap();
        assert_eq!(vector.get(0).unwrap(), Value::Int8(-128));
        assert_eq!(vector.get(1).unwrap(), Value::Null);
        assert_eq!(vector.get_i8(2).unwrap(), Some(127));
        assert_eq!(vector.get_i8(1).unwrap(), None);
        assert_eq!(vector.get_i64(0).unwrap(), Some(-128));
    }

    #[test]
    fn test_float_rows() {
        let bytes: Vec<u8> = [1.5f32, 0.0, -0.25].iter().flat_map(|v| v.to_le_bytes()).collect();
        let vector = ColumnVector::fixed(
            "FLOAT",
            3,
            NullMask::from_bools(&[false, true, false]),
            bytes,
        )
        .unwrap();
        assert_eq!(
            vector.to_array().unwrap(),
            vec![Value::Float32(1.5), Value::Null, Value::Float32(-0.25)]
        );
        assert_eq!(vector.get_f32(2).unwrap(), Some(-0.25));
        assert_eq!(vector.get_f32(1).unwrap(), None);
        assert!(matches!(vector.get_f64(0), Err(ColvecError::TypeError { .. })));
    }

    #[test]
    fn test_double_rows() {
        let bytes: Vec<u8> = [f64::MAX, 0.0, -2.5].iter().flat_map(|v| v.to_le_bytes()).collect();
        let vector = ColumnVector::fixed(
            "DOUBLE",
            3,
            NullMask::from_bools(&[false, true, false]),
            bytes,
        )
        .unwrap();
        assert_eq!(vector.get(0).unwrap(), Value::Float64(f64::MAX));
        assert_eq!(vector.get(1).unwrap(), Value::Null);
        assert_eq!(vector.get_f64(2).unwrap(), Some(-2.5));
        assert_eq!(vector.get_f64(1).unwrap(), None);
        assert!(matches!(vector.get_i64(0), Err(ColvecError::TypeError { .. })));
    }

    #[test]
    fn test_time_rows() {
        let vector = ColumnVector::fixed(
            "TIME",
            2,
            NullMask::from_bools(&[false, true]),
            i64_bytes(&[3_723_000_001, 0]),
        )
        .unwrap();
        let value = vector.get(0).unwrap();
        assert_eq!(value, Value::Time(3_723_000_001));
        assert_eq!(value.to_string(), "01:02:03.000001");
        assert_eq!(vector.get_i64(0).unwrap(), Some(3_723_000_001));
        assert_eq!(vector.get(1).unwrap(), Value::Null);
    }

    #[test]
    fn test_blob_rows() {
        let vector = ColumnVector::variable(
            "BLOB",
            3,
            NullMask::from_bools(&[false, true, false]),
            vec![
                StoredValue::Bytes(vec![0xDE, 0xAD]),
                StoredValue::Null,
                StoredValue::Bytes(Vec::new()),
            ],
        )
        .unwrap();
        assert_eq!(vector.get_bytes(0).unwrap(), Some(&[0xDE, 0xAD][..]));
        assert_eq!(vector.get_bytes(1).unwrap(), None);
        assert_eq!(vector.get(2).unwrap(), Value::Blob(Vec::new()));
        assert!(matches!(vector.get_str(0), Err(ColvecError::TypeError { .. })));

        assert!(matches!(
            ColumnVector::variable("BLOB", 1, NullMask::all_valid(1), vec!["text".into()]),
            Err(ColvecError::TypeError { .. })
        ));
    }

    #[test]
    fn test_get_i64_widens_and_parses() {
        let small = ColumnVector::fixed(
            "SMALLINT",
            1,
            NullMask::all_valid(1),
            (-5i16).to_le_bytes().to_vec(),
        )
        .unwrap();
        assert_eq!(small.get_i64(0).unwrap(), Some(-5));

        let text = ColumnVector::variable(
            "VARCHAR",
            2,
            NullMask::all_valid(2),
            vec![" 42 ".into(), "x".into()],
        )
        .unwrap();
        assert_eq!(text.get_i64(0).unwrap(), Some(42));
        assert!(matches!(text.get_i64(1), Err(ColvecError::TypeError { .. })));
    }

    #[test]
    fn test_typed_accessor_type_mismatch() {
        let vector =
            ColumnVector::fixed("BIGINT", 1, NullMask::all_valid(1), i64_bytes(&[1])).unwrap();
        assert!(matches!(vector.get_i32(0), Err(ColvecError::TypeError { .. })));
        assert!(matches!(vector.get_str(0), Err(ColvecError::TypeError { .. })));
    }

    #[test]
    fn test_storage_kind_must_match_type() {
        assert!(matches!(
            ColumnVector::fixed("VARCHAR", 0, NullMask::all_valid(0), Vec::new()),
            Err(ColvecError::TypeError { .. })
        ));
        assert!(matches!(
            ColumnVector::variable("INTEGER", 0, NullMask::all_valid(0), Vec::new()),
            Err(ColvecError::TypeError { .. })
        ));
    }

    #[test]
    fn test_mask_length_must_match() {
        assert!(matches!(
            ColumnVector::fixed("INTEGER", 2, NullMask::all_valid(1), i32_bytes(&[1, 2])),
            Err(ColvecError::LayoutMismatch {
                what: "null mask",
                ..
            })
        ));
    }

    #[test]
    fn test_verify_rejects_wrong_slot() {
        let err = ColumnVector::variable(
            "VARCHAR",
            1,
            NullMask::all_valid(1),
            vec![StoredValue::Bytes(vec![1])],
        )
        .unwrap_err();
        assert!(matches!(err, ColvecError::TypeError { .. }));
    }

    #[test]
    fn test_verify_skips_null_rows() {
        let vector = ColumnVector::variable(
            "VARCHAR",
            2,
            NullMask::from_bools(&[true, false]),
            vec![StoredValue::Null, "b".into()],
        )
        .unwrap();
        assert_eq!(vector.get(0).unwrap(), Value::Null);
        assert_eq!(vector.get_str(1).unwrap(), Some("b"));
    }

    #[test]
    fn test_unverified_slot_mismatch_surfaces_on_read() {
        let vector = ColumnVector::variable_with_config(
            "VARCHAR",
            1,
            NullMask::all_valid(1),
            vec![StoredValue::Null],
            DecodeConfig::new().with_verify_layout(false),
        )
        .unwrap();
        assert!(matches!(vector.get(0), Err(ColvecError::TypeError { .. })));
    }

    #[test]
    fn test_verify_struct_field_order() {
        let row: StructValue = vec![("b", Value::Int32(1)), ("a", Value::Int32(2))]
            .into_iter()
            .collect();
        let err = ColumnVector::variable(
            "STRUCT(a INTEGER, b INTEGER)",
            1,
            NullMask::all_valid(1),
            vec![row.into()],
        )
        .unwrap_err();
        assert!(matches!(err, ColvecError::TypeError { .. }));
    }

    #[test]
    fn test_slice_bounds() {
        let vector = ColumnVector::fixed(
            "INTEGER",
            3,
            NullMask::all_valid(3),
            i32_bytes(&[1, 2, 3]),
        )
        .unwrap();
        assert_eq!(
            vector.slice(1, 2).unwrap(),
            vec![Value::Int32(2), Value::Int32(3)]
        );
        assert!(vector.slice(3, 0).unwrap().is_empty());
        assert!(matches!(
            vector.slice(2, 2),
            Err(ColvecError::BoundsViolation { row: 3, len: 3 })
        ));
    }

    #[test]
    fn test_vector_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ColumnVector>();
    }
}
