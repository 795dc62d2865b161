//! Decoded values produced by column vectors.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::config::DuplicateKeyPolicy;
use crate::error::{ColvecError, Result};
use crate::types::{LogicalType, TimeUnit};

/// Days between 0001-01-01 (CE day 1) and 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

const MICROS_PER_DAY: i64 = 86_400_000_000;

/// Runtime value container for decoded rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Value {
    /// Absent value (null row).
    Null,
    /// Boolean value.
    Bool(bool),
    /// 8-bit signed integer value.
    Int8(i8),
    /// 16-bit signed integer value.
    Int16(i16),
    /// 32-bit signed integer value.
    Int32(i32),
    /// 64-bit signed integer value.
    Int64(i64),
    /// 32-bit floating point value.
    Float32(f32),
    /// 64-bit floating point value.
    Float64(f64),
    /// Date value (days since Unix epoch).
    Date(i32),
    /// Time of day (microseconds since midnight).
    Time(i64),
    /// Timestamp value (ticks since Unix epoch in the given unit).
    Timestamp(i64, TimeUnit),
    /// String value.
    String(String),
    /// Binary value.
    Blob(Vec<u8>),
    /// Elements of a list row.
    List(Vec<Value>),
    /// Fields of a struct row.
    Struct(StructValue),
    /// Entries of a map row.
    Map(MapValue),
}

/// Bit pattern used for float equality and hashing. Zeros share one
/// pattern, as do NaNs.
fn canonical_f32_bits(v: f32) -> u32 {
    if v.is_nan() {
        f32::NAN.to_bits()
    } else if v == 0.0 {
        0
    } else {
        v.to_bits()
    }
}

fn canonical_f64_bits(v: f64) -> u64 {
    if v.is_nan() {
        f64::NAN.to_bits()
    } else if v == 0.0 {
        0
    } else {
        v.to_bits()
    }
}

// Floats compare by canonical bits so that equality agrees with Hash
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int8(a), Value::Int8(b)) => a == b,
            (Value::Int16(a), Value::Int16(b)) => a == b,
            (Value::Int32(a), Value::Int32(b)) | (Value::Date(a), Value::Date(b)) => a == b,
            (Value::Int64(a), Value::Int64(b)) | (Value::Time(a), Value::Time(b)) => a == b,
            (Value::Float32(a), Value::Float32(b)) => {
                canonical_f32_bits(*a) == canonical_f32_bits(*b)
            }
            (Value::Float64(a), Value::Float64(b)) => {
                canonical_f64_bits(*a) == canonical_f64_bits(*b)
            }
            (Value::Timestamp(a, ua), Value::Timestamp(b, ub)) => a == b && ua == ub,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Blob(a), Value::Blob(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Struct(a), Value::Struct(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

// Manual Hash implementation because f32/f64 doesn't implement Hash
impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Bool(v) => v.hash(state),
            Value::Int8(v) => v.hash(state),
            Value::Int16(v) => v.hash(state),
            Value::Int32(v) | Value::Date(v) => v.hash(state),
            Value::Int64(v) | Value::Time(v) => v.hash(state),
            Value::Timestamp(v, unit) => {
                v.hash(state);
                unit.hash(state);
            }
            Value::Float32(v) => canonical_f32_bits(*v).hash(state),
            Value::Float64(v) => canonical_f64_bits(*v).hash(state),
            Value::String(v) => v.hash(state),
            Value::Blob(v) => v.hash(state),
            Value::List(v) => v.hash(state),
            Value::Struct(v) => v.hash(state),
            Value::Map(v) => v.hash(state),
            Value::Null => {}
        }
    }
}

impl Value {
    /// Returns true if this value is null.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Attempts to extract a bool value.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Attempts to extract an i16 value.
    #[must_use]
    pub fn as_int16(&self) -> Option<i16> {
        match self {
            Value::Int16(i) => Some(*i),
            _ => None,
        }
    }

    /// Attempts to extract an i32 value.
    #[must_use]
    pub fn as_int32(&self) -> Option<i32> {
        match self {
            Value::Int32(i) => Some(*i),
            _ => None,
        }
    }

    /// Attempts to extract an i64 value.
    #[must_use]
    pub fn as_int64(&self) -> Option<i64> {
        match self {
            Value::Int64(i) => Some(*i),
            _ => None,
        }
    }

    /// Widens any integer value to i64.
    #[must_use]
    pub fn to_i64(&self) -> Option<i64> {
        match self {
            Value::Int8(i) => Some(i64::from(*i)),
            Value::Int16(i) => Some(i64::from(*i)),
            Value::Int32(i) => Some(i64::from(*i)),
            Value::Int64(i) => Some(*i),
            _ => None,
        }
    }

    /// Attempts to extract an f32 value.
    #[must_use]
    pub fn as_float32(&self) -> Option<f32> {
        match self {
            Value::Float32(f) => Some(*f),
            _ => None,
        }
    }

    /// Attempts to extract an f64 value.
    #[must_use]
    pub fn as_float64(&self) -> Option<f64> {
        match self {
            Value::Float64(f) => Some(*f),
            _ => None,
        }
    }

    /// Attempts to extract a string reference.
    #[must_use]
    pub fn as_string(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Attempts to extract a byte slice.
    #[must_use]
    pub fn as_blob(&self) -> Option<&[u8]> {
        match self {
            Value::Blob(b) => Some(b.as_slice()),
            _ => None,
        }
    }

    /// Attempts to extract list elements.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Attempts to extract struct fields.
    #[must_use]
    pub fn as_struct(&self) -> Option<&StructValue> {
        match self {
            Value::Struct(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to extract map entries.
    #[must_use]
    pub fn as_map(&self) -> Option<&MapValue> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Attempts to extract a timestamp as (ticks, unit).
    #[must_use]
    pub fn as_timestamp(&self) -> Option<(i64, TimeUnit)> {
        match self {
            Value::Timestamp(t, unit) => Some((*t, *unit)),
            _ => None,
        }
    }

    /// Interprets a date value as a calendar date.
    #[must_use]
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(days) => days
                .checked_add(UNIX_EPOCH_DAYS_FROM_CE)
                .and_then(NaiveDate::from_num_days_from_ce_opt),
            _ => None,
        }
    }

    /// Interprets a time value as a time of day.
    #[must_use]
    pub fn as_time(&self) -> Option<NaiveTime> {
        match self {
            Value::Time(micros) if (0..MICROS_PER_DAY).contains(micros) => {
                let secs = (micros / 1_000_000) as u32;
                let nanos = ((micros % 1_000_000) * 1_000) as u32;
                NaiveTime::from_num_seconds_from_midnight_opt(secs, nanos)
            }
            _ => None,
        }
    }

    /// Interprets a timestamp value as a UTC date-time.
    #[must_use]
    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        let (ticks, unit) = self.as_timestamp()?;
        let (secs, nanos) = match unit {
            TimeUnit::Second => (ticks, 0),
            TimeUnit::Millisecond => (ticks.div_euclid(1_000), ticks.rem_euclid(1_000) * 1_000_000),
            TimeUnit::Microsecond => (
                ticks.div_euclid(1_000_000),
                ticks.rem_euclid(1_000_000) * 1_000,
            ),
            TimeUnit::Nanosecond => (
                ticks.div_euclid(1_000_000_000),
                ticks.rem_euclid(1_000_000_000),
            ),
        };
        DateTime::from_timestamp(secs, nanos as u32).map(|dt| dt.naive_utc())
    }

    /// Returns the logical type a column of this value would have, or None
    /// for Null.
    #[must_use]
    pub fn data_type(&self) -> Option<LogicalType> {
        match self {
            Value::Null => None,
            Value::Bool(_) => Some(LogicalType::Boolean),
            Value::Int8(_) => Some(LogicalType::Int8),
            Value::Int16(_) => Some(LogicalType::Int16),
            Value::Int32(_) => Some(LogicalType::Int32),
            Value::Int64(_) => Some(LogicalType::Int64),
            Value::Float32(_) => Some(LogicalType::Float32),
            Value::Float64(_) => Some(LogicalType::Float64),
            Value::Date(_) => Some(LogicalType::Date),
            Value::Time(_) => Some(LogicalType::Time),
            Value::Timestamp(_, unit) => Some(LogicalType::Timestamp(*unit)),
            Value::String(_) => Some(LogicalType::Utf8),
            Value::Blob(_) => Some(LogicalType::Blob),
            Value::List(_) => Some(LogicalType::List),
            Value::Struct(_) => Some(LogicalType::Struct),
            Value::Map(_) => Some(LogicalType::Map),
        }
    }

    /// Compares two values using SQL null semantics.
    ///
    /// Returns None if either value is null or types don't match.
    #[must_use]
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Int8(a), Value::Int8(b)) => Some(a.cmp(b)),
            (Value::Int16(a), Value::Int16(b)) => Some(a.cmp(b)),
            (Value::Int32(a), Value::Int32(b)) | (Value::Date(a), Value::Date(b)) => {
                Some(a.cmp(b))
            }
            (Value::Int64(a), Value::Int64(b)) | (Value::Time(a), Value::Time(b)) => {
                Some(a.cmp(b))
            }
            (Value::Timestamp(a, ua), Value::Timestamp(b, ub)) if ua == ub => Some(a.cmp(b)),
            (Value::Float32(a), Value::Float32(b)) => a.partial_cmp(b),
            (Value::Float64(a), Value::Float64(b)) => a.partial_cmp(b),
            (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            (Value::Blob(a), Value::Blob(b)) => Some(a.cmp(b)),
            // Null, nested values or type mismatch
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i16> for Value {
    fn from(v: i16) -> Self {
        Value::Int16(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int32(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int64(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float64(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<StructValue> for Value {
    fn from(v: StructValue) -> Self {
        Value::Struct(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Int8(v) => write!(f, "{v}"),
            Value::Int16(v) => write!(f, "{v}"),
            Value::Int32(v) => write!(f, "{v}"),
            Value::Int64(v) => write!(f, "{v}"),
            Value::Float32(v) => write!(f, "{v}"),
            Value::Float64(v) => write!(f, "{v}"),
            Value::Date(days) => match self.as_date() {
                Some(date) => write!(f, "{date}"),
                None => write!(f, "{days}"),
            },
            Value::Time(micros) => match self.as_time() {
                Some(time) => write!(f, "{time}"),
                None => write!(f, "{micros}"),
            },
            Value::Timestamp(ticks, _) => match self.as_datetime() {
                Some(datetime) => write!(f, "{datetime}"),
                None => write!(f, "{ticks}"),
            },
            Value::String(s) => f.write_str(s),
            Value::Blob(bytes) => {
                for b in bytes {
                    write!(f, "\\x{b:02X}")?;
                }
                Ok(())
            }
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Struct(s) => write!(f, "{s}"),
            Value::Map(m) => write!(f, "{m}"),
        }
    }
}

/// Ordered field name to value mapping for one struct row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StructValue {
    fields: Vec<(String, Value)>,
}

impl StructValue {
    /// Creates a struct value from fields in declared order.
    #[must_use]
    pub fn new(fields: Vec<(String, Value)>) -> Self {
        StructValue { fields }
    }

    /// Gets a field value by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the struct has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns field names in declared order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    /// Returns an iterator over fields in declared order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Consumes the struct, returning its fields.
    #[must_use]
    pub fn into_fields(self) -> Vec<(String, Value)> {
        self.fields
    }
}

impl<S: Into<String>> FromIterator<(S, Value)> for StructValue {
    fn from_iter<I: IntoIterator<Item = (S, Value)>>(iter: I) -> Self {
        StructValue {
            fields: iter.into_iter().map(|(n, v)| (n.into(), v)).collect(),
        }
    }
}

impl fmt::Display for StructValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (name, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "'{name}': {value}")?;
        }
        f.write_str("}")
    }
}

/// Key to value mapping for one map row, in entry order.
///
/// Deserialization goes through [`MapValue::try_from_entries`] with
/// [`DuplicateKeyPolicy::Reject`], so a decoded map never holds a null or
/// repeated key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<(Value, Value)>", into = "Vec<(Value, Value)>")]
pub struct MapValue {
    entries: Vec<(Value, Value)>,
}

impl MapValue {
    /// Folds key/value pairs into a map.
    ///
    /// # Errors
    ///
    /// Returns `MalformedMap` if a key is null, or if a key repeats and the
    /// policy is [`DuplicateKeyPolicy::Reject`].
    pub fn try_from_entries<I>(entries: I, policy: DuplicateKeyPolicy) -> Result<Self>
    where
        I: IntoIterator<Item = (Value, Value)>,
    {
        let mut positions: HashMap<Value, usize> = HashMap::new();
        let mut folded: Vec<(Value, Value)> = Vec::new();

        for (key, value) in entries {
            if key.is_null() {
                return Err(ColvecError::MalformedMap("map key is null".into()));
            }
            if let Some(&pos) = positions.get(&key) {
                match policy {
                    DuplicateKeyPolicy::Reject => {
                        return Err(ColvecError::MalformedMap(format!(
                            "duplicate key '{key}'"
                        )));
                    }
                    DuplicateKeyPolicy::LastWins => folded[pos].1 = value,
                }
            } else {
                positions.insert(key.clone(), folded.len());
                folded.push((key, value));
            }
        }

        Ok(MapValue { entries: folded })
    }

    /// Gets the value for a key.
    #[must_use]
    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Returns true if the map contains the key.
    #[must_use]
    pub fn contains_key(&self, key: &Value) -> bool {
        self.get(key).is_some()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns an iterator over entries in order.
    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// Returns keys in entry order.
    pub fn keys(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Consumes the map into an unordered `HashMap`.
    #[must_use]
    pub fn into_hash_map(self) -> HashMap<Value, Value> {
        self.entries.into_iter().collect()
    }
}

impl TryFrom<Vec<(Value, Value)>> for MapValue {
    type Error = ColvecError;

    fn try_from(entries: Vec<(Value, Value)>) -> Result<Self> {
        MapValue::try_from_entries(entries, DuplicateKeyPolicy::Reject)
    }
}

impl From<MapValue> for Vec<(Value, Value)> {
    fn from(map: MapValue) -> Self {
        map.entries
    }
}

impl fmt::Display for MapValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}={value}")?;
        }
        f.write_str("}")
    }
}
