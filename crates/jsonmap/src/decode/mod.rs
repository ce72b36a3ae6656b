//! Decoding pipeline: `serde_json` parse, token replay, then type inference

pub mod infer;
pub mod reader;

use std::io::Read;

use crate::error::DecodeError;
use crate::options::Options;
use crate::value::{Mapping, Value};

use reader::DocumentTokens;

pub fn from_slice(input: &[u8], options: &Options) -> Result<Value, DecodeError> {
    let document = reader::parse(input, options)?;
    infer::read_value(&mut DocumentTokens::new(document.as_ref()), options)
}

pub fn mapping_from_slice(input: &[u8], options: &Options) -> Result<Mapping, DecodeError> {
    let document = reader::parse(input, options)?;
    infer::read_mapping(&mut DocumentTokens::new(document.as_ref()), options)
}

pub fn from_reader<R: Read>(mut reader: R, options: &Options) -> Result<Value, DecodeError> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    from_slice(&buf, options)
}

pub fn mapping_from_reader<R: Read>(mut reader: R, options: &Options) -> Result<Mapping, DecodeError> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    mapping_from_slice(&buf, options)
}
