use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::encode::writer::JsonWriter;
use crate::error::EncodeError;
use crate::naming::NamingPolicy;

/// String-keyed, insertion-ordered object.
pub type Mapping = IndexMap<String, Value>;

#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    Decimal(Decimal),
    Text(String),
    Timestamp(DateTime<Utc>),
    Sequence(Vec<Value>),
    Mapping(Mapping),
    Structured(Structured),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Bool,
    Integer,
    Decimal,
    Text,
    Timestamp,
    Sequence,
    Mapping,
    Structured,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Integer => "integer",
            ValueKind::Decimal => "decimal",
            ValueKind::Text => "text",
            ValueKind::Timestamp => "timestamp",
            ValueKind::Sequence => "sequence",
            ValueKind::Mapping => "mapping",
            ValueKind::Structured => "structured",
        })
    }
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Integer(_) => ValueKind::Integer,
            Value::Decimal(_) => ValueKind::Decimal,
            Value::Text(_) => ValueKind::Text,
            Value::Timestamp(_) => ValueKind::Timestamp,
            Value::Sequence(_) => ValueKind::Sequence,
            Value::Mapping(_) => ValueKind::Mapping,
            Value::Structured(_) => ValueKind::Structured,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<&Decimal> {
        match self {
            Value::Decimal(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<&DateTime<Utc>> {
        match self {
            Value::Timestamp(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Value::Mapping(m) => Some(m),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Decimal(a), Value::Decimal(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Timestamp(a), Value::Timestamp(b)) => a == b,
            (Value::Sequence(a), Value::Sequence(b)) => a == b,
            (Value::Mapping(a), Value::Mapping(b)) => a == b,
            (Value::Structured(a), Value::Structured(b)) => a.same_record(b),
            // Integer(1) and Decimal(1) are different kinds
            _ => false,
        }
    }
}

macro_rules! from_integer {
    ($($t:ty)*) => {$(
        impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Value::Integer(v.into())
            }
        }
    )*};
}

from_integer!(i8 i16 i32 i64 u8 u16 u32);

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        Value::Decimal(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Timestamp(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::Sequence(v)
    }
}

impl From<Mapping> for Value {
    fn from(v: Mapping) -> Self {
        Value::Mapping(v)
    }
}

impl From<Structured> for Value {
    fn from(v: Structured) -> Self {
        Value::Structured(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::Mapping(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Capability to write a host-defined record through the generic writer.
///
/// The encoder never inspects a structured value; it hands over the output and the active
/// naming policy and lets the record write itself.
pub trait StructuredValue: Send + Sync {
    fn type_name(&self) -> &'static str;

    fn write_json(&self, out: &mut dyn JsonWriter, naming: NamingPolicy)
    -> Result<(), EncodeError>;
}

struct SerdeRecord<T>(T);

impl<T: Serialize + Send + Sync> StructuredValue for SerdeRecord<T> {
    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn write_json(
        &self,
        out: &mut dyn JsonWriter,
        naming: NamingPolicy,
    ) -> Result<(), EncodeError> {
        crate::ser::serialize_into(&self.0, out, naming)
    }
}

/// Shared handle to an opaque record.
#[derive(Clone)]
pub struct Structured(Arc<dyn StructuredValue>);

impl Structured {
    /// Wrap any serde-serializable record; its struct field names follow the naming policy.
    pub fn new<T: Serialize + Send + Sync + 'static>(record: T) -> Self {
        Structured(Arc::new(SerdeRecord(record)))
    }

    pub fn from_writer(writer: Arc<dyn StructuredValue>) -> Self {
        Structured(writer)
    }

    pub fn type_name(&self) -> &'static str {
        self.0.type_name()
    }

    pub fn write_json(
        &self,
        out: &mut dyn JsonWriter,
        naming: NamingPolicy,
    ) -> Result<(), EncodeError> {
        self.0.write_json(out, naming)
    }

    fn same_record(&self, other: &Structured) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Structured {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Structured").field(&self.type_name()).finish()
    }
}
