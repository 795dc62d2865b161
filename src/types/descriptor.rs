//! Pest parser for column type descriptors.
//!
//! A descriptor is the type token reported for a result column. Bare tokens
//! map straight to a [`LogicalType`]; nested tokens additionally carry their
//! child types, which vectors use to check the children they are built from.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;

use crate::error::{ColvecError, Result};
use crate::types::{LogicalType, StructValue, Value};

#[derive(Parser)]
#[grammar = "types/descriptor.pest"]
struct DescriptorParser;

/// Name of the single child of a parameterized list.
pub const LIST_ELEMENT: &str = "element";
/// Name of the key child of a parameterized map.
pub const MAP_KEY: &str = "key";
/// Name of the value child of a parameterized map.
pub const MAP_VALUE: &str = "value";

/// Parsed column type: a logical type plus ordered named children.
///
/// Children are struct fields in declaration order, `element` for lists, and
/// `key`/`value` for maps. Bare `STRUCT`, `LIST` and `MAP` have none.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    logical_type: LogicalType,
    children: Vec<ChildType>,
}

/// A named child of a nested type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChildType {
    /// Field name, or the fixed child name for lists and maps.
    pub name: String,
    /// Type of the child.
    pub descriptor: TypeDescriptor,
}

impl TypeDescriptor {
    /// Creates a descriptor without children.
    #[must_use]
    pub fn new(logical_type: LogicalType) -> Self {
        TypeDescriptor {
            logical_type,
            children: Vec::new(),
        }
    }

    /// Creates a list descriptor with the given element type.
    #[must_use]
    pub fn list_of(element: TypeDescriptor) -> Self {
        TypeDescriptor {
            logical_type: LogicalType::List,
            children: vec![ChildType {
                name: LIST_ELEMENT.to_string(),
                descriptor: element,
            }],
        }
    }

    /// Creates a map descriptor with the given key and value types.
    #[must_use]
    pub fn map_of(key: TypeDescriptor, value: TypeDescriptor) -> Self {
        TypeDescriptor {
            logical_type: LogicalType::Map,
            children: vec![
                ChildType {
                    name: MAP_KEY.to_string(),
                    descriptor: key,
                },
                ChildType {
                    name: MAP_VALUE.to_string(),
                    descriptor: value,
                },
            ],
        }
    }

    /// Creates a struct descriptor with the given fields.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedType` if two fields share a name.
    pub fn struct_of<I, S>(fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, TypeDescriptor)>,
        S: Into<String>,
    {
        let children: Vec<ChildType> = fields
            .into_iter()
            .map(|(name, descriptor)| ChildType {
                name: name.into(),
                descriptor,
            })
            .collect();

        let mut seen = HashSet::new();
        for child in &children {
            if !seen.insert(child.name.as_str()) {
                return Err(ColvecError::UnsupportedType(format!(
                    "STRUCT with duplicate field '{}'",
                    child.name
                )));
            }
        }

        Ok(TypeDescriptor {
            logical_type: LogicalType::Struct,
            children,
        })
    }

    /// Returns the root logical type.
    #[must_use]
    pub fn logical_type(&self) -> LogicalType {
        self.logical_type
    }

    /// Returns the children in declaration order.
    #[must_use]
    pub fn children(&self) -> &[ChildType] {
        &self.children
    }

    /// Returns whether a nested type declares its children.
    #[must_use]
    pub fn is_parameterized(&self) -> bool {
        !self.children.is_empty()
    }

    /// Finds a child by name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&TypeDescriptor> {
        self.children
            .iter()
            .find(|c| c.name == name)
            .map(|c| &c.descriptor)
    }

    /// Returns struct field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.children.iter().map(|c| c.name.as_str())
    }

    /// Returns the element type of a parameterized list.
    #[must_use]
    pub fn element(&self) -> Option<&TypeDescriptor> {
        match self.logical_type {
            LogicalType::List => self.child(LIST_ELEMENT),
            _ => None,
        }
    }

    /// Returns the entry struct a map row's child vector is expected to hold.
    #[must_use]
    pub fn map_entry(&self) -> Option<TypeDescriptor> {
        if self.logical_type != LogicalType::Map || self.children.is_empty() {
            return None;
        }
        Some(TypeDescriptor {
            logical_type: LogicalType::Struct,
            children: self.children.clone(),
        })
    }

    /// Returns whether a child vector typed `actual` satisfies this
    /// declared type.
    ///
    /// Bare nested types accept any children; parameterized types need the
    /// same child names, each child accepted in turn.
    #[must_use]
    pub fn accepts(&self, actual: &TypeDescriptor) -> bool {
        if self.logical_type != actual.logical_type {
            return false;
        }
        if !self.is_parameterized() {
            return true;
        }
        self.children.len() == actual.children.len()
            && self
                .children
                .iter()
                .zip(&actual.children)
                .all(|(want, got)| {
                    want.name == got.name && want.descriptor.accepts(&got.descriptor)
                })
    }

    /// Returns whether a decoded value could be a row of this type.
    ///
    /// Null fits every type. Unsigned types hold their widened signed value.
    #[must_use]
    pub fn admits(&self, value: &Value) -> bool {
        match value {
            Value::Null => true,
            Value::Struct(fields) => self.admits_struct(fields),
            Value::List(items) => {
                self.logical_type == LogicalType::List
                    && self
                        .element()
                        .map_or(true, |element| items.iter().all(|v| element.admits(v)))
            }
            Value::Map(entries) => {
                self.logical_type == LogicalType::Map
                    && match (self.child(MAP_KEY), self.child(MAP_VALUE)) {
                        (Some(key_type), Some(value_type)) => entries
                            .iter()
                            .all(|(k, v)| key_type.admits(k) && value_type.admits(v)),
                        _ => true,
                    }
            }
            scalar => scalar.data_type() == Some(decoded_type(self.logical_type)),
        }
    }

    /// Returns whether a struct row has this type's fields, in order, with
    /// values of the declared types.
    #[must_use]
    pub fn admits_struct(&self, fields: &StructValue) -> bool {
        self.logical_type == LogicalType::Struct
            && (!self.is_parameterized()
                || (fields.field_names().eq(self.field_names())
                    && fields
                        .iter()
                        .zip(&self.children)
                        .all(|((_, v), child)| child.descriptor.admits(v))))
    }

    /// Converts to an Arrow data type.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedType` for nested types without declared children.
    pub fn to_arrow(&self) -> Result<arrow::datatypes::DataType> {
        use arrow::datatypes::{DataType as Arrow, Field, Fields};

        if let Some(scalar) = self.logical_type.to_arrow() {
            return Ok(scalar);
        }
        if !self.is_parameterized() {
            return Err(ColvecError::UnsupportedType(format!(
                "{} without declared children has no Arrow type",
                self.logical_type
            )));
        }

        let fields = self
            .children
            .iter()
            .map(|c| Ok(Field::new(c.name.clone(), c.descriptor.to_arrow()?, true)))
            .collect::<Result<Vec<_>>>()?;

        match self.logical_type {
            LogicalType::List => {
                let element = fields.into_iter().next().ok_or_else(|| {
                    ColvecError::UnsupportedType("LIST without element type".into())
                })?;
                Ok(Arrow::List(Arc::new(element.with_name("item"))))
            }
            LogicalType::Map => {
                let mut fields = fields;
                if let Some(key) = fields.first_mut() {
                    *key = key.clone().with_nullable(false);
                }
                let entries = Field::new("entries", Arrow::Struct(Fields::from(fields)), false);
                Ok(Arrow::Map(Arc::new(entries), false))
            }
            _ => Ok(Arrow::Struct(Fields::from(fields))),
        }
    }
}

impl From<LogicalType> for TypeDescriptor {
    fn from(logical_type: LogicalType) -> Self {
        TypeDescriptor::new(logical_type)
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.logical_type, self.children.as_slice()) {
            (LogicalType::List, [element]) => write!(f, "{}[]", element.descriptor),
            (LogicalType::Map, [key, value]) => {
                write!(f, "MAP({}, {})", key.descriptor, value.descriptor)
            }
            (LogicalType::Struct, fields) if !fields.is_empty() => {
                f.write_str("STRUCT(")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write_field_name(f, &field.name)?;
                    write!(f, " {}", field.descriptor)?;
                }
                f.write_str(")")
            }
            (logical_type, _) => f.write_str(logical_type.name()),
        }
    }
}

fn write_field_name(f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
    let bare = !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if bare {
        f.write_str(name)
    } else {
        write!(f, "\"{}\"", name.replace('"', "\"\""))
    }
}

/// Type of the values a column of `logical_type` decodes to.
fn decoded_type(logical_type: LogicalType) -> LogicalType {
    match logical_type {
        LogicalType::UInt8 => LogicalType::Int16,
        LogicalType::UInt16 => LogicalType::Int32,
        LogicalType::UInt32 => LogicalType::Int64,
        other => other,
    }
}

/// Parses a type descriptor.
///
/// # Errors
///
/// Returns `UnsupportedType` naming the token if it is malformed or uses a
/// type name outside the registry.
pub fn parse_type(type_name: &str) -> Result<TypeDescriptor> {
    let pairs = DescriptorParser::parse(Rule::type_decl, type_name).map_err(|e| {
        log::debug!(
            "rejected type descriptor {type_name:?}: {}",
            e.variant.message()
        );
        unsupported(type_name)
    })?;

    let expr = pairs
        .flat_map(Pair::into_inner)
        .find(|p| p.as_rule() == Rule::type_expr)
        .ok_or_else(|| unsupported(type_name))?;

    build_type_expr(expr, type_name)
}

fn unsupported(type_name: &str) -> ColvecError {
    ColvecError::UnsupportedType(type_name.to_string())
}

fn build_type_expr(pair: Pair<Rule>, type_name: &str) -> Result<TypeDescriptor> {
    let mut inner = pair.into_inner();
    let base = inner.next().ok_or_else(|| unsupported(type_name))?;
    let mut descriptor = build_base_type(base, type_name)?;
    for suffix in inner {
        if suffix.as_rule() == Rule::list_suffix {
            descriptor = TypeDescriptor::list_of(descriptor);
        }
    }
    Ok(descriptor)
}

fn build_base_type(pair: Pair<Rule>, type_name: &str) -> Result<TypeDescriptor> {
    match pair.as_rule() {
        Rule::struct_type => {
            let mut fields = Vec::new();
            for field in pair.into_inner().filter(|p| p.as_rule() == Rule::struct_field) {
                let mut parts = field.into_inner();
                let name = parts.next().ok_or_else(|| unsupported(type_name))?;
                let name = match name.as_rule() {
                    Rule::quoted_name => name
                        .into_inner()
                        .next()
                        .map(|inner| inner.as_str().replace("\"\"", "\""))
                        .unwrap_or_default(),
                    _ => name.as_str().to_string(),
                };
                let ty = parts.next().ok_or_else(|| unsupported(type_name))?;
                fields.push((name, build_type_expr(ty, type_name)?));
            }
            TypeDescriptor::struct_of(fields).map_err(|e| {
                log::debug!("rejected type descriptor {type_name:?}: {e}");
                unsupported(type_name)
            })
        }
        Rule::map_type => {
            let mut params = pair
                .into_inner()
                .filter(|p| p.as_rule() == Rule::type_expr)
                .map(|p| build_type_expr(p, type_name));
            match (params.next(), params.next()) {
                (Some(key), Some(value)) => Ok(TypeDescriptor::map_of(key?, value?)),
                _ => Ok(TypeDescriptor::new(LogicalType::Map)),
            }
        }
        Rule::list_type => Ok(TypeDescriptor::new(LogicalType::List)),
        Rule::scalar_type => LogicalType::from_name(pair.as_str())
            .map(TypeDescriptor::new)
            .ok_or_else(|| unsupported(type_name)),
        _ => Err(unsupported(type_name)),
    }
}
