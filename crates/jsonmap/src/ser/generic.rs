//! The generic writer: a `serde::Serializer` emitting through a [`JsonWriter`].
//!
//! Data model matches serde_json: unit and `None` are `null`, enum variants with data are
//! externally tagged, scalar map keys are stringified. Struct field names go through the
//! naming policy, map keys never do.

use serde::Serialize;
use serde::ser::{
    Impossible, SerializeMap, SerializeSeq, SerializeStruct, SerializeStructVariant,
    SerializeTuple, SerializeTupleStruct, SerializeTupleVariant, Serializer,
};

use crate::encode::writer::JsonWriter;
use crate::error::EncodeError;
use crate::naming::NamingPolicy;
use crate::number::format_canonical_float;

/// Newtype-struct name whose string payload is written as a bare JSON number.
pub(crate) const NUMBER_TOKEN: &str = "$jsonmap::private::Number";

pub struct GenericSerializer<'w> {
    out: &'w mut dyn JsonWriter,
    naming: NamingPolicy,
    raw_number: bool,
}

impl<'w> GenericSerializer<'w> {
    pub fn new(out: &'w mut dyn JsonWriter, naming: NamingPolicy) -> Self {
        Self {
            out,
            naming,
            raw_number: false,
        }
    }

    fn write_float_text(&mut self, text: Option<String>, kind: &str) -> Result<(), EncodeError> {
        match text {
            Some(t) => self.out.write_number_literal(&t),
            None => Err(EncodeError::Unrepresentable {
                kind: format!("non-finite {}", kind),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Close {
    Array,
    Object,
    /// Tuple variant: inner array, then the tagging object
    ArrayThenObject,
    /// Struct variant: inner object, then the tagging object
    ObjectThenObject,
}

pub struct Compound<'a, 'w> {
    ser: &'a mut GenericSerializer<'w>,
    close: Close,
}

impl Compound<'_, '_> {
    fn finish(self) -> Result<(), EncodeError> {
        match self.close {
            Close::Array => self.ser.out.end_array(),
            Close::Object => self.ser.out.end_object(),
            Close::ArrayThenObject => {
                self.ser.out.end_array()?;
                self.ser.out.end_object()
            }
            Close::ObjectThenObject => {
                self.ser.out.end_object()?;
                self.ser.out.end_object()
            }
        }
    }

    fn element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), EncodeError> {
        value.serialize(&mut *self.ser)
    }

    fn field<T: ?Sized + Serialize>(&mut self, key: &'static str, value: &T) -> Result<(), EncodeError> {
        let name = self.ser.naming.convert(key);
        self.ser.out.write_name(&name)?;
        value.serialize(&mut *self.ser)
    }
}

impl<'a, 'w> Serializer for &'a mut GenericSerializer<'w> {
    type Ok = ();
    type Error = EncodeError;

    type SerializeSeq = Compound<'a, 'w>;
    type SerializeTuple = Compound<'a, 'w>;
    type SerializeTupleStruct = Compound<'a, 'w>;
    type SerializeTupleVariant = Compound<'a, 'w>;
    type SerializeMap = Compound<'a, 'w>;
    type SerializeStruct = Compound<'a, 'w>;
    type SerializeStructVariant = Compound<'a, 'w>;

    fn serialize_bool(self, v: bool) -> Result<(), EncodeError> { self.out.write_bool(v) }
    fn serialize_i8(self, v: i8) -> Result<(), EncodeError> { self.out.write_i64(v.into()) }
    fn serialize_i16(self, v: i16) -> Result<(), EncodeError> { self.out.write_i64(v.into()) }
    fn serialize_i32(self, v: i32) -> Result<(), EncodeError> { self.out.write_i64(v.into()) }
    fn serialize_i64(self, v: i64) -> Result<(), EncodeError> { self.out.write_i64(v) }
    fn serialize_i128(self, v: i128) -> Result<(), EncodeError> { self.out.write_number_literal(&v.to_string()) }
    fn serialize_u8(self, v: u8) -> Result<(), EncodeError> { self.out.write_u64(v.into()) }
    fn serialize_u16(self, v: u16) -> Result<(), EncodeError> { self.out.write_u64(v.into()) }
    fn serialize_u32(self, v: u32) -> Result<(), EncodeError> { self.out.write_u64(v.into()) }
    fn serialize_u64(self, v: u64) -> Result<(), EncodeError> { self.out.write_u64(v) }
    fn serialize_u128(self, v: u128) -> Result<(), EncodeError> { self.out.write_number_literal(&v.to_string()) }
    fn serialize_f32(self, v: f32) -> Result<(), EncodeError> {
        self.write_float_text(v.is_finite().then(|| format_canonical_float(v)), "f32")
    }
    fn serialize_f64(self, v: f64) -> Result<(), EncodeError> {
        self.write_float_text(v.is_finite().then(|| format_canonical_float(v)), "f64")
    }
    fn serialize_char(self, v: char) -> Result<(), EncodeError> {
        let mut buf = [0u8; 4];
        self.out.write_string(v.encode_utf8(&mut buf))
    }
    fn serialize_str(self, v: &str) -> Result<(), EncodeError> {
        if self.raw_number {
            self.raw_number = false;
            return self.out.write_number_literal(v);
        }
        self.out.write_string(v)
    }
    fn serialize_bytes(self, v: &[u8]) -> Result<(), EncodeError> {
        self.out.begin_array()?;
        for b in v {
            self.out.write_u64((*b).into())?;
        }
        self.out.end_array()
    }
    fn serialize_none(self) -> Result<(), EncodeError> { self.out.write_null() }
    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<(), EncodeError> { value.serialize(self) }
    fn serialize_unit(self) -> Result<(), EncodeError> { self.out.write_null() }
    fn serialize_unit_struct(self, _name: &'static str) -> Result<(), EncodeError> { self.out.write_null() }
    fn serialize_unit_variant(self, _name: &'static str, _variant_index: u32, variant: &'static str) -> Result<(), EncodeError> {
        self.out.write_string(variant)
    }
    fn serialize_newtype_struct<T: ?Sized + Serialize>(self, name: &'static str, value: &T) -> Result<(), EncodeError> {
        if name == NUMBER_TOKEN {
            self.raw_number = true;
            let result = value.serialize(&mut *self);
            self.raw_number = false;
            return result;
        }
        value.serialize(self)
    }
    fn serialize_newtype_variant<T: ?Sized + Serialize>(self, _name: &'static str, _variant_index: u32, variant: &'static str, value: &T) -> Result<(), EncodeError> {
        self.out.begin_object()?;
        self.out.write_name(variant)?;
        value.serialize(&mut *self)?;
        self.out.end_object()
    }
    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, EncodeError> {
        self.out.begin_array()?;
        Ok(Compound { ser: self, close: Close::Array })
    }
    fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple, EncodeError> { self.serialize_seq(Some(len)) }
    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<Self::SerializeTupleStruct, EncodeError> { self.serialize_seq(Some(len)) }
    fn serialize_tuple_variant(self, _name: &'static str, _variant_index: u32, variant: &'static str, _len: usize) -> Result<Self::SerializeTupleVariant, EncodeError> {
        self.out.begin_object()?;
        self.out.write_name(variant)?;
        self.out.begin_array()?;
        Ok(Compound { ser: self, close: Close::ArrayThenObject })
    }
    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, EncodeError> {
        self.out.begin_object()?;
        Ok(Compound { ser: self, close: Close::Object })
    }
    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<Self::SerializeStruct, EncodeError> { self.serialize_map(Some(len)) }
    fn serialize_struct_variant(self, _name: &'static str, _variant_index: u32, variant: &'static str, _len: usize) -> Result<Self::SerializeStructVariant, EncodeError> {
        self.out.begin_object()?;
        self.out.write_name(variant)?;
        self.out.begin_object()?;
        Ok(Compound { ser: self, close: Close::ObjectThenObject })
    }
}

impl SerializeSeq for Compound<'_, '_> {
    type Ok = ();
    type Error = EncodeError;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), EncodeError> { self.element(value) }
    fn end(self) -> Result<(), EncodeError> { self.finish() }
}

impl SerializeTuple for Compound<'_, '_> {
    type Ok = ();
    type Error = EncodeError;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), EncodeError> { self.element(value) }
    fn end(self) -> Result<(), EncodeError> { self.finish() }
}

impl SerializeTupleStruct for Compound<'_, '_> {
    type Ok = ();
    type Error = EncodeError;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), EncodeError> { self.element(value) }
    fn end(self) -> Result<(), EncodeError> { self.finish() }
}

impl SerializeTupleVariant for Compound<'_, '_> {
    type Ok = ();
    type Error = EncodeError;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), EncodeError> { self.element(value) }
    fn end(self) -> Result<(), EncodeError> { self.finish() }
}

impl SerializeMap for Compound<'_, '_> {
    type Ok = ();
    type Error = EncodeError;

    fn serialize_key<T: ?Sized + Serialize>(&mut self, key: &T) -> Result<(), EncodeError> {
        // Map keys are data: written verbatim, never renamed
        let name = key.serialize(KeySerializer)?;
        self.ser.out.write_name(&name)
    }

    fn serialize_value<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), EncodeError> { self.element(value) }
    fn end(self) -> Result<(), EncodeError> { self.finish() }
}

impl SerializeStruct for Compound<'_, '_> {
    type Ok = ();
    type Error = EncodeError;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, key: &'static str, value: &T) -> Result<(), EncodeError> { self.field(key, value) }
    fn end(self) -> Result<(), EncodeError> { self.finish() }
}

impl SerializeStructVariant for Compound<'_, '_> {
    type Ok = ();
    type Error = EncodeError;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, key: &'static str, value: &T) -> Result<(), EncodeError> { self.field(key, value) }
    fn end(self) -> Result<(), EncodeError> { self.finish() }
}

fn invalid_key(kind: &str) -> EncodeError {
    EncodeError::Unrepresentable {
        kind: format!("map key of kind {}", kind),
    }
}

/// Turns a scalar map key into its string form.
struct KeySerializer;

impl Serializer for KeySerializer {
    type Ok = String;
    type Error = EncodeError;
    type SerializeSeq = Impossible<String, EncodeError>;
    type SerializeTuple = Impossible<String, EncodeError>;
    type SerializeTupleStruct = Impossible<String, EncodeError>;
    type SerializeTupleVariant = Impossible<String, EncodeError>;
    type SerializeMap = Impossible<String, EncodeError>;
    type SerializeStruct = Impossible<String, EncodeError>;
    type SerializeStructVariant = Impossible<String, EncodeError>;

    fn serialize_bool(self, v: bool) -> Result<String, EncodeError> { Ok(v.to_string()) }
    fn serialize_i8(self, v: i8) -> Result<String, EncodeError> { Ok(v.to_string()) }
    fn serialize_i16(self, v: i16) -> Result<String, EncodeError> { Ok(v.to_string()) }
    fn serialize_i32(self, v: i32) -> Result<String, EncodeError> { Ok(v.to_string()) }
    fn serialize_i64(self, v: i64) -> Result<String, EncodeError> { Ok(v.to_string()) }
    fn serialize_u8(self, v: u8) -> Result<String, EncodeError> { Ok(v.to_string()) }
    fn serialize_u16(self, v: u16) -> Result<String, EncodeError> { Ok(v.to_string()) }
    fn serialize_u32(self, v: u32) -> Result<String, EncodeError> { Ok(v.to_string()) }
    fn serialize_u64(self, v: u64) -> Result<String, EncodeError> { Ok(v.to_string()) }
    fn serialize_f32(self, _v: f32) -> Result<String, EncodeError> { Err(invalid_key("f32")) }
    fn serialize_f64(self, _v: f64) -> Result<String, EncodeError> { Err(invalid_key("f64")) }
    fn serialize_char(self, v: char) -> Result<String, EncodeError> { Ok(v.to_string()) }
    fn serialize_str(self, v: &str) -> Result<String, EncodeError> { Ok(v.to_string()) }
    fn serialize_bytes(self, _v: &[u8]) -> Result<String, EncodeError> { Err(invalid_key("bytes")) }
    fn serialize_none(self) -> Result<String, EncodeError> { Err(invalid_key("null")) }
    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<String, EncodeError> { value.serialize(self) }
    fn serialize_unit(self) -> Result<String, EncodeError> { Err(invalid_key("null")) }
    fn serialize_unit_struct(self, _name: &'static str) -> Result<String, EncodeError> { Err(invalid_key("null")) }
    fn serialize_unit_variant(self, _name: &'static str, _variant_index: u32, variant: &'static str) -> Result<String, EncodeError> { Ok(variant.to_string()) }
    fn serialize_newtype_struct<T: ?Sized + Serialize>(self, _name: &'static str, value: &T) -> Result<String, EncodeError> { value.serialize(self) }
    fn serialize_newtype_variant<T: ?Sized + Serialize>(self, _name: &'static str, _variant_index: u32, _variant: &'static str, _value: &T) -> Result<String, EncodeError> { Err(invalid_key("enum variant")) }
    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, EncodeError> { Err(invalid_key("sequence")) }
    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple, EncodeError> { Err(invalid_key("tuple")) }
    fn serialize_tuple_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeTupleStruct, EncodeError> { Err(invalid_key("tuple")) }
    fn serialize_tuple_variant(self, _name: &'static str, _variant_index: u32, _variant: &'static str, _len: usize) -> Result<Self::SerializeTupleVariant, EncodeError> { Err(invalid_key("enum variant")) }
    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, EncodeError> { Err(invalid_key("map")) }
    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct, EncodeError> { Err(invalid_key("struct")) }
    fn serialize_struct_variant(self, _name: &'static str, _variant_index: u32, _variant: &'static str, _len: usize) -> Result<Self::SerializeStructVariant, EncodeError> { Err(invalid_key("enum variant")) }
}
