//! Value writers: the shared structural walk and the two primitive strategies.

use serde::ser::{Error as _, Serialize, Serializer};

use crate::encode::writer::JsonWriter;
use crate::error::EncodeError;
use crate::naming::NamingPolicy;
use crate::number::format_decimal;
use crate::options::WriteStrategy;
use crate::ser::{GenericSerializer, NUMBER_TOKEN};
use crate::timestamp;
use crate::value::{Mapping, Value};

/// Emits primitive values. Containers and structured records are walked by [`write_value`].
pub trait ValueWriter {
    fn write_primitive(
        &self,
        value: &Value,
        out: &mut dyn JsonWriter,
        naming: NamingPolicy,
    ) -> Result<(), EncodeError>;
}

/// Every primitive is handed to serde through a fresh [`GenericSerializer`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RecursiveGeneric;

/// Primitives are matched inline and written straight to the output.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectWrite;

impl ValueWriter for RecursiveGeneric {
    fn write_primitive(
        &self,
        value: &Value,
        out: &mut dyn JsonWriter,
        naming: NamingPolicy,
    ) -> Result<(), EncodeError> {
        // Range failures must surface as Unrepresentable, not as a serde custom error
        if let Value::Timestamp(ts) = value {
            timestamp::ensure_representable(ts)?;
        }
        Primitive(value).serialize(&mut GenericSerializer::new(out, naming))
    }
}

impl ValueWriter for DirectWrite {
    fn write_primitive(
        &self,
        value: &Value,
        out: &mut dyn JsonWriter,
        _naming: NamingPolicy,
    ) -> Result<(), EncodeError> {
        match value {
            Value::Null => out.write_null(),
            Value::Bool(b) => out.write_bool(*b),
            Value::Integer(i) => out.write_i64(*i),
            Value::Decimal(d) => out.write_number_literal(&format_decimal(d)),
            Value::Text(s) => out.write_string(s),
            Value::Timestamp(ts) => out.write_string(&timestamp::format(ts)?),
            other => Err(not_primitive(other)),
        }
    }
}

fn not_primitive(value: &Value) -> EncodeError {
    EncodeError::Custom(format!("{} is not a primitive value", value.kind()))
}

/// Serde view of a single primitive.
struct Primitive<'a>(&'a Value);

impl Serialize for Primitive<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Integer(i) => serializer.serialize_i64(*i),
            Value::Decimal(d) => serializer.serialize_newtype_struct(NUMBER_TOKEN, &format_decimal(d)),
            Value::Text(s) => serializer.serialize_str(s),
            Value::Timestamp(ts) => {
                let text = timestamp::format(ts).map_err(S::Error::custom)?;
                serializer.serialize_str(&text)
            }
            other => Err(S::Error::custom(not_primitive(other))),
        }
    }
}

/// Walk `value`, recursing through containers and delegating records to their own writer.
pub fn write_value<S: ValueWriter + ?Sized>(
    strategy: &S,
    value: &Value,
    out: &mut dyn JsonWriter,
    naming: NamingPolicy,
) -> Result<(), EncodeError> {
    match value {
        Value::Sequence(items) => {
            out.begin_array()?;
            for item in items {
                write_value(strategy, item, out, naming)?;
            }
            out.end_array()
        }
        Value::Mapping(mapping) => write_mapping(strategy, mapping, out, naming),
        Value::Structured(record) => record.write_json(out, naming),
        primitive => strategy.write_primitive(primitive, out, naming),
    }
}

/// Mapping keys are data and are never renamed.
pub fn write_mapping<S: ValueWriter + ?Sized>(
    strategy: &S,
    mapping: &Mapping,
    out: &mut dyn JsonWriter,
    naming: NamingPolicy,
) -> Result<(), EncodeError> {
    out.begin_object()?;
    for (key, item) in mapping {
        out.write_name(key)?;
        write_value(strategy, item, out, naming)?;
    }
    out.end_object()
}

/// The writer selected by `strategy`.
pub fn select(strategy: WriteStrategy) -> &'static dyn ValueWriter {
    match strategy {
        WriteStrategy::RecursiveGeneric => &RecursiveGeneric,
        WriteStrategy::DirectWrite => &DirectWrite,
    }
}
