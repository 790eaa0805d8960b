//! Host values → `AmfValue`, through `serde::Serialize`.

use serde::ser::{self, Serialize};

use super::DATE_TOKEN;
use crate::amf0::marker::MAX_SHORT_STRING;
use crate::error::{AmfError, Result};
use crate::options::Options;
use crate::types::{AmfDate, AmfObject, AmfValue};

/// Serializer producing an in-memory `AmfValue` tree.
#[derive(Clone, Copy)]
pub(crate) struct ValueSerializer<'a> {
    options: &'a Options,
}

impl<'a> ValueSerializer<'a> {
    pub(crate) fn new(options: &'a Options) -> Self {
        Self { options }
    }

    fn text(self, s: &str) -> AmfValue {
        if self.options.promotes_long_strings() && s.len() > MAX_SHORT_STRING {
            tracing::debug!(len = s.len(), "promoting text to AMF0 long string");
            AmfValue::LongString(s.to_owned())
        } else {
            AmfValue::String(s.to_owned())
        }
    }

    fn unsupported(what: impl Into<String>) -> AmfError {
        AmfError::UnsupportedNativeType(what.into())
    }
}

impl<'a> ser::Serializer for ValueSerializer<'a> {
    type Ok = AmfValue;
    type Error = AmfError;

    type SerializeSeq = SerializeVec<'a>;
    type SerializeTuple = SerializeVec<'a>;
    type SerializeTupleStruct = SerializeVec<'a>;
    type SerializeTupleVariant = ser::Impossible<AmfValue, AmfError>;
    type SerializeMap = SerializeMap<'a>;
    type SerializeStruct = SerializeMap<'a>;
    type SerializeStructVariant = ser::Impossible<AmfValue, AmfError>;

    fn serialize_bool(self, v: bool) -> Result<AmfValue> {
        Ok(AmfValue::Boolean(v))
    }

    fn serialize_i8(self, v: i8) -> Result<AmfValue> {
        Ok(AmfValue::Number(f64::from(v)))
    }

    fn serialize_i16(self, v: i16) -> Result<AmfValue> {
        Ok(AmfValue::Number(f64::from(v)))
    }

    fn serialize_i32(self, v: i32) -> Result<AmfValue> {
        Ok(AmfValue::Number(f64::from(v)))
    }

    fn serialize_i64(self, v: i64) -> Result<AmfValue> {
        Ok(AmfValue::Number(v as f64))
    }

    fn serialize_i128(self, _v: i128) -> Result<AmfValue> {
        Err(Self::unsupported("i128"))
    }

    fn serialize_u8(self, v: u8) -> Result<AmfValue> {
        Ok(AmfValue::Number(f64::from(v)))
    }

    fn serialize_u16(self, v: u16) -> Result<AmfValue> {
        Ok(AmfValue::Number(f64::from(v)))
    }

    fn serialize_u32(self, v: u32) -> Result<AmfValue> {
        Ok(AmfValue::Number(f64::from(v)))
    }

    fn serialize_u64(self, v: u64) -> Result<AmfValue> {
        Ok(AmfValue::Number(v as f64))
    }

    fn serialize_u128(self, _v: u128) -> Result<AmfValue> {
        Err(Self::unsupported("u128"))
    }

    fn serialize_f32(self, v: f32) -> Result<AmfValue> {
        Ok(AmfValue::Number(f64::from(v)))
    }

    fn serialize_f64(self, v: f64) -> Result<AmfValue> {
        Ok(AmfValue::Number(v))
    }

    fn serialize_char(self, v: char) -> Result<AmfValue> {
        Ok(AmfValue::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<AmfValue> {
        Ok(self.text(v))
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<AmfValue> {
        Err(Self::unsupported("byte array"))
    }

    fn serialize_none(self) -> Result<AmfValue> {
        Ok(AmfValue::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<AmfValue>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<AmfValue> {
        Ok(AmfValue::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<AmfValue> {
        Ok(AmfValue::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<AmfValue> {
        Ok(self.text(variant))
    }

    fn serialize_newtype_struct<T>(self, name: &'static str, value: &T) -> Result<AmfValue>
    where
        T: ?Sized + Serialize,
    {
        if name != DATE_TOKEN {
            return value.serialize(self);
        }
        match value.serialize(self)? {
            AmfValue::Number(millis) => Ok(AmfValue::Date(AmfDate::from_millis(millis))),
            other => Err(AmfError::custom(format!(
                "date must serialize as milliseconds, got {other}"
            ))),
        }
    }

    fn serialize_newtype_variant<T>(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _value: &T,
    ) -> Result<AmfValue>
    where
        T: ?Sized + Serialize,
    {
        Err(Self::unsupported(format!("enum variant {name}::{variant}")))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec<'a>> {
        Ok(SerializeVec {
            ser: self,
            items: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec<'a>> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec<'a>> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(Self::unsupported(format!("enum variant {name}::{variant}")))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeMap<'a>> {
        Ok(SerializeMap {
            ser: self,
            props: AmfObject::with_capacity(len.unwrap_or(0)),
            pending_key: None,
        })
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<SerializeMap<'a>> {
        self.serialize_map(Some(len))
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(Self::unsupported(format!("enum variant {name}::{variant}")))
    }
}

pub(crate) struct SerializeVec<'a> {
    ser: ValueSerializer<'a>,
    items: Vec<AmfValue>,
}

impl ser::SerializeSeq for SerializeVec<'_> {
    type Ok = AmfValue;
    type Error = AmfError;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.items.push(value.serialize(self.ser)?);
        Ok(())
    }

    fn end(self) -> Result<AmfValue> {
        Ok(AmfValue::StrictArray(self.items))
    }
}

impl ser::SerializeTuple for SerializeVec<'_> {
    type Ok = AmfValue;
    type Error = AmfError;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<AmfValue> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SerializeVec<'_> {
    type Ok = AmfValue;
    type Error = AmfError;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<AmfValue> {
        ser::SerializeSeq::end(self)
    }
}

pub(crate) struct SerializeMap<'a> {
    ser: ValueSerializer<'a>,
    props: AmfObject,
    pending_key: Option<String>,
}

impl ser::SerializeMap for SerializeMap<'_> {
    type Ok = AmfValue;
    type Error = AmfError;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match key.serialize(self.ser)? {
            AmfValue::String(s) | AmfValue::LongString(s) => {
                self.pending_key = Some(s);
                Ok(())
            }
            other => Err(AmfError::NonStringKey(other.wire_type().name().to_owned())),
        }
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .pending_key
            .take()
            .ok_or_else(|| AmfError::custom("map value serialized before its key"))?;
        let value = value.serialize(self.ser)?;
        self.props.insert(key, value);
        Ok(())
    }

    fn end(self) -> Result<AmfValue> {
        Ok(AmfValue::Object(self.props))
    }
}

impl ser::SerializeStruct for SerializeMap<'_> {
    type Ok = AmfValue;
    type Error = AmfError;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let value = value.serialize(self.ser)?;
        self.props.insert(key.to_owned(), value);
        Ok(())
    }

    fn end(self) -> Result<AmfValue> {
        Ok(AmfValue::Object(self.props))
    }
}
