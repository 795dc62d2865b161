//! Struct, list and map accessors.

use super::ColumnVector;
use crate::error::{ColvecError, Result};
use crate::storage::StoredValue;
use crate::types::descriptor::{MAP_KEY, MAP_VALUE};
use crate::types::{LogicalType, MapValue, StructValue, Value};

impl ColumnVector {
    /// Borrows the field mapping of a `STRUCT` row.
    ///
    /// # Errors
    ///
    /// Returns `TypeError` for non-struct vectors and `BoundsViolation` for
    /// rows out of range.
    pub fn get_struct(&self, row: usize) -> Result<Option<&StructValue>> {
        self.expect_type(LogicalType::Struct)?;
        if self.nulls.is_null(row)? {
            return Ok(None);
        }
        self.struct_at(row).map(Some)
    }

    /// Borrows the child vector of a `LIST` row.
    ///
    /// # Errors
    ///
    /// Returns `TypeError` for non-list vectors and `BoundsViolation` for
    /// rows out of range.
    pub fn get_list(&self, row: usize) -> Result<Option<&ColumnVector>> {
        self.expect_type(LogicalType::List)?;
        if self.nulls.is_null(row)? {
            return Ok(None);
        }
        self.list_at(row).map(Some)
    }

    /// Builds the key/value mapping of a `MAP` row from its entry vector.
    ///
    /// # Errors
    ///
    /// Returns `TypeError` for non-map vectors, `BoundsViolation` for rows
    /// out of range, and `MalformedMap` if the entries are not structs with
    /// `key` and `value` fields, a key is null, or a key repeats under
    /// [`DuplicateKeyPolicy::Reject`](crate::config::DuplicateKeyPolicy::Reject).
    pub fn get_map(&self, row: usize) -> Result<Option<MapValue>> {
        self.expect_type(LogicalType::Map)?;
        if self.nulls.is_null(row)? {
            return Ok(None);
        }
        self.map_at(row).map(Some)
    }

    pub(super) fn struct_at(&self, row: usize) -> Result<&StructValue> {
        match self.slot(row)? {
            StoredValue::Struct(fields) => Ok(fields),
            other => Err(ColvecError::type_error("struct slot", other.kind())),
        }
    }

    pub(super) fn list_at(&self, row: usize) -> Result<&ColumnVector> {
        match self.slot(row)? {
            StoredValue::Vector(child) => Ok(child),
            other => Err(ColvecError::type_error("vector slot", other.kind())),
        }
    }

    pub(super) fn map_at(&self, row: usize) -> Result<MapValue> {
        let entries = match self.slot(row)? {
            StoredValue::Vector(child) => child,
            other => {
                return Err(ColvecError::MalformedMap(format!(
                    "row {row} holds a {} instead of an entry vector",
                    other.kind()
                )))
            }
        };
        if !entries.is_type(LogicalType::Struct) {
            return Err(ColvecError::MalformedMap(format!(
                "row {row} entries are {}, not STRUCT",
                entries.type_name()
            )));
        }

        let pairs = entries
            .to_array()?
            .into_iter()
            .enumerate()
            .map(|(i, entry)| key_value(row, i, entry))
            .collect::<Result<Vec<_>>>()?;

        MapValue::try_from_entries(pairs, self.config.duplicate_keys)
            .map_err(|e| match e {
                ColvecError::MalformedMap(msg) => {
                    ColvecError::MalformedMap(format!("row {row}: {msg}"))
                }
                other => other,
            })
    }
}

/// Splits one entry struct into its key and value.
fn key_value(row: usize, entry_index: usize, entry: Value) -> Result<(Value, Value)> {
    let Value::Struct(fields) = entry else {
        return Err(ColvecError::MalformedMap(format!(
            "row {row} entry {entry_index} is null"
        )));
    };

    let mut key = None;
    let mut value = None;
    for (name, field) in fields.into_fields() {
        if name == MAP_KEY {
            key = Some(field);
        } else if name == MAP_VALUE {
            value = Some(field);
        }
    }

    match (key, value) {
        (Some(key), Some(value)) => Ok((key, value)),
        (None, _) => Err(ColvecError::MalformedMap(format!(
            "row {row} entry {entry_index} has no '{MAP_KEY}' field"
        ))),
        (_, None) => Err(ColvecError::MalformedMap(format!(
            "row {row} entry {entry_index} has no '{MAP_VALUE}' field"
        ))),
    }
}
