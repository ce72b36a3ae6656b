//! Serde bridge: write any `Serialize` type through a [`JsonWriter`].

mod generic;

use std::io::Write;

use serde::Serialize;

pub use generic::GenericSerializer;
pub(crate) use generic::NUMBER_TOKEN;

use crate::encode::writer::{JsonTextWriter, JsonWriter};
use crate::error::EncodeError;
use crate::naming::NamingPolicy;
use crate::options::Options;

/// Serialize `value` into an already-positioned writer, e.g. from inside a structured record.
pub fn serialize_into<T: ?Sized + Serialize>(
    value: &T,
    out: &mut dyn JsonWriter,
    naming: NamingPolicy,
) -> Result<(), EncodeError> {
    value.serialize(&mut GenericSerializer::new(out, naming))
}

pub fn to_string<T: ?Sized + Serialize>(value: &T, options: &Options) -> Result<String, EncodeError> {
    let mut buf = Vec::new();
    to_writer(&mut buf, value, options)?;
    String::from_utf8(buf).map_err(|e| EncodeError::Custom(e.to_string()))
}

pub fn to_writer<W: Write, T: ?Sized + Serialize>(
    writer: W,
    value: &T,
    options: &Options,
) -> Result<(), EncodeError> {
    let mut out = JsonTextWriter::with_indent(writer, options.indent);
    serialize_into(value, &mut out, options.naming_policy)
}
