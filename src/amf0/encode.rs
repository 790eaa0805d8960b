//! AMF0 encoding: `AmfValue` → bytes.
//!
//! Every function writes straight to the sink; nothing is buffered beyond
//! the current field.

use std::io::Write;

use super::byteorder::{to_be16, to_be32};
use super::marker;
use crate::error::{AmfError, Result};
use crate::types::{AmfDate, AmfObject, AmfValue};

/// Encodes one value (marker and payload) into the sink.
pub fn encode_value<W: Write + ?Sized>(w: &mut W, value: &AmfValue) -> Result<()> {
    match value {
        AmfValue::Number(n) => encode_number(w, *n),
        AmfValue::Boolean(b) => encode_bool(w, *b),
        AmfValue::String(s) => encode_string(w, s),
        AmfValue::Object(props) => encode_object(w, props),
        AmfValue::Null => write_marker(w, marker::NULL),
        AmfValue::Undefined => write_marker(w, marker::UNDEFINED),
        AmfValue::EcmaArray(props) => encode_ecma_array(w, props),
        AmfValue::StrictArray(items) => encode_strict_array(w, items),
        AmfValue::Date(d) => encode_date(w, d),
        AmfValue::LongString(s) => encode_long_string(w, s),
        AmfValue::Unsupported => write_marker(w, marker::UNSUPPORTED),
        AmfValue::XmlDocument(s) => encode_xml_document(w, s),
    }
}

pub fn encode_number<W: Write + ?Sized>(w: &mut W, value: f64) -> Result<()> {
    write_marker(w, marker::NUMBER)?;
    w.write_all(&value.to_be_bytes())?;
    Ok(())
}

pub fn encode_bool<W: Write + ?Sized>(w: &mut W, value: bool) -> Result<()> {
    w.write_all(&[marker::BOOLEAN, u8::from(value)])?;
    Ok(())
}

/// Encodes text with the 16-bit String layout. Fails with `StringTooLong`
/// before writing anything if the UTF-8 payload exceeds 65535 bytes.
pub fn encode_string<W: Write + ?Sized>(w: &mut W, value: &str) -> Result<()> {
    let len = short_len(value)?;
    write_marker(w, marker::STRING)?;
    w.write_all(&to_be16(len))?;
    w.write_all(value.as_bytes())?;
    Ok(())
}

pub fn encode_long_string<W: Write + ?Sized>(w: &mut W, value: &str) -> Result<()> {
    write_long_utf8(w, marker::LONG_STRING, value)
}

pub fn encode_xml_document<W: Write + ?Sized>(w: &mut W, value: &str) -> Result<()> {
    write_long_utf8(w, marker::XML_DOCUMENT, value)
}

pub fn encode_date<W: Write + ?Sized>(w: &mut W, date: &AmfDate) -> Result<()> {
    write_marker(w, marker::DATE)?;
    w.write_all(&date.millis().to_be_bytes())?;
    // Reserved timezone offset.
    w.write_all(&to_be16(0))?;
    Ok(())
}

pub fn encode_object<W: Write + ?Sized>(w: &mut W, props: &AmfObject) -> Result<()> {
    write_marker(w, marker::OBJECT)?;
    write_properties(w, props)
}

/// The leading count is written as the number of pairs; readers treat it as a hint.
pub fn encode_ecma_array<W: Write + ?Sized>(w: &mut W, props: &AmfObject) -> Result<()> {
    let count = long_len(props.len())?;
    write_marker(w, marker::ECMA_ARRAY)?;
    w.write_all(&to_be32(count))?;
    write_properties(w, props)
}

pub fn encode_strict_array<W: Write + ?Sized>(w: &mut W, items: &[AmfValue]) -> Result<()> {
    let count = long_len(items.len())?;
    write_marker(w, marker::STRICT_ARRAY)?;
    w.write_all(&to_be32(count))?;
    for item in items {
        encode_value(w, item)?;
    }
    Ok(())
}

fn write_marker<W: Write + ?Sized>(w: &mut W, m: u8) -> Result<()> {
    w.write_all(&[m])?;
    Ok(())
}

/// Key/value pairs followed by the `00 00 09` terminator.
fn write_properties<W: Write + ?Sized>(w: &mut W, props: &AmfObject) -> Result<()> {
    for (key, value) in props {
        let len = short_len(key)?;
        w.write_all(&to_be16(len))?;
        w.write_all(key.as_bytes())?;
        encode_value(w, value)?;
    }
    w.write_all(&marker::OBJECT_END_SEQUENCE)?;
    Ok(())
}

fn write_long_utf8<W: Write + ?Sized>(w: &mut W, m: u8, value: &str) -> Result<()> {
    let len = long_len(value.len())?;
    write_marker(w, m)?;
    w.write_all(&to_be32(len))?;
    w.write_all(value.as_bytes())?;
    Ok(())
}

fn short_len(s: &str) -> Result<u16> {
    u16::try_from(s.len()).map_err(|_| AmfError::StringTooLong { len: s.len() })
}

fn long_len(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| AmfError::LengthOverflow { len })
}
