#![doc = include_str!("../README.md")]

pub mod bind;
pub mod decode;
pub mod encode;
pub mod error;
pub mod naming;
pub mod options;
pub mod ser;
pub mod timestamp;
pub mod value;

mod number;

pub use crate::bind::{BindingResult, MappingBinder, TargetShape};
pub use crate::error::{ConfigurationError, DecodeError, EncodeError, Error, Result};
pub use crate::naming::NamingPolicy;
pub use crate::options::{Options, WriteStrategy};
pub use crate::value::{Mapping, Structured, StructuredValue, Value, ValueKind};

use std::io::{Read, Write};

pub fn decode_from_slice(input: &[u8], options: &Options) -> Result<Value> {
    Ok(crate::decode::from_slice(input, options)?)
}

pub fn decode_from_str(s: &str, options: &Options) -> Result<Value> {
    decode_from_slice(s.as_bytes(), options)
}

pub fn decode_from_reader<R: Read>(reader: R, options: &Options) -> Result<Value> {
    Ok(crate::decode::from_reader(reader, options)?)
}

/// Decode a document whose root must be an object; empty input gives an empty mapping.
pub fn decode_mapping_from_slice(input: &[u8], options: &Options) -> Result<Mapping> {
    Ok(crate::decode::mapping_from_slice(input, options)?)
}

pub fn decode_mapping_from_str(s: &str, options: &Options) -> Result<Mapping> {
    decode_mapping_from_slice(s.as_bytes(), options)
}

pub fn decode_mapping_from_reader<R: Read>(reader: R, options: &Options) -> Result<Mapping> {
    Ok(crate::decode::mapping_from_reader(reader, options)?)
}

pub fn encode_to_string(value: &Value, options: &Options) -> Result<String> {
    Ok(crate::encode::to_string(value, options)?)
}

pub fn encode_to_vec(value: &Value, options: &Options) -> Result<Vec<u8>> {
    Ok(crate::encode::to_vec(value, options)?)
}

pub fn encode_to_writer<W: Write>(writer: W, value: &Value, options: &Options) -> Result<()> {
    Ok(crate::encode::to_writer(writer, value, options)?)
}

/// `None` is written as `null`.
pub fn encode_mapping_to_string(mapping: Option<&Mapping>, options: &Options) -> Result<String> {
    Ok(crate::encode::mapping_to_string(mapping, options)?)
}

pub fn encode_mapping_to_writer<W: Write>(
    writer: W,
    mapping: Option<&Mapping>,
    options: &Options,
) -> Result<()> {
    Ok(crate::encode::mapping_to_writer(writer, mapping, options)?)
}
