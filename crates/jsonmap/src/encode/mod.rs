//! Value to JSON text.

pub mod strategy;
pub mod writer;

use std::io::Write;

use crate::error::EncodeError;
use crate::options::Options;
use crate::value::{Mapping, Value};

use self::writer::{JsonTextWriter, JsonWriter};

pub fn to_writer<W: Write>(writer: W, value: &Value, options: &Options) -> Result<(), EncodeError> {
    let mut out = JsonTextWriter::with_indent(writer, options.indent);
    write_into(value, &mut out, options)
}

/// Encode into a caller-owned [`JsonWriter`], e.g. in the middle of a larger document.
pub fn write_into(value: &Value, out: &mut dyn JsonWriter, options: &Options) -> Result<(), EncodeError> {
    let writer = strategy::select(options.strategy);
    strategy::write_value(writer, value, out, options.naming_policy)
}

pub fn to_vec(value: &Value, options: &Options) -> Result<Vec<u8>, EncodeError> {
    let mut buf = Vec::with_capacity(128);
    to_writer(&mut buf, value, options)?;
    Ok(buf)
}

pub fn to_string(value: &Value, options: &Options) -> Result<String, EncodeError> {
    let buf = to_vec(value, options)?;
    String::from_utf8(buf).map_err(|e| EncodeError::Custom(e.to_string()))
}

/// An absent mapping is written as `null`.
pub fn mapping_to_writer<W: Write>(
    writer: W,
    mapping: Option<&Mapping>,
    options: &Options,
) -> Result<(), EncodeError> {
    let mut out = JsonTextWriter::with_indent(writer, options.indent);
    match mapping {
        None => out.write_null(),
        Some(m) => {
            let writer = strategy::select(options.strategy);
            strategy::write_mapping(writer, m, &mut out, options.naming_policy)
        }
    }
}

pub fn mapping_to_string(mapping: Option<&Mapping>, options: &Options) -> Result<String, EncodeError> {
    let mut buf = Vec::with_capacity(128);
    mapping_to_writer(&mut buf, mapping, options)?;
    String::from_utf8(buf).map_err(|e| EncodeError::Custom(e.to_string()))
}
