//! amfr: a pure-Rust AMF0 (Action Message Format 0) codec.
//!
//! AMF0 is the compact binary format used by RTMP and Flash-era remoting to
//! carry typed values: numbers, booleans, strings, dates, ordered objects and
//! arrays. This crate converts between those bytes and an in-memory value
//! tree, and between that tree and ordinary Rust types through serde.
//!
//! # Architecture
//!
//! - **`amf0`** - Wire format: markers, byte order, encoder and decoder
//! - **`types`** - The `AmfValue` model and `AmfDate`
//! - **`stream`** - Streaming reader/writer and the rewind adapter used for lookahead
//! - **`native`** - serde bridge between Rust types and `AmfValue`
//! - **`options`** - Decoder limits and string policy
//!
//! ```
//! use amfr::AmfValue;
//!
//! let bytes = amfr::encode(&AmfValue::from("hello world")).unwrap();
//! assert_eq!(&bytes[..3], &[0x02, 0x00, 0x0B]);
//! assert_eq!(amfr::decode(&bytes).unwrap(), AmfValue::from("hello world"));
//! ```

pub mod amf0;
pub mod error;
pub mod native;
pub mod options;
pub mod stream;
pub mod types;

use std::io::{Read, Write};

use bytes::{BufMut, Bytes, BytesMut};
use serde::Serialize;
use serde::de::DeserializeOwned;

pub use amf0::WireType;
pub use error::{AmfError, Result};
pub use native::{from_value, to_value, to_value_with};
pub use options::Options;
pub use stream::{AmfReader, AmfWriter, RewindReader};
pub use types::{AmfDate, AmfObject, AmfValue};

/// Encodes a single value.
pub fn encode(value: &AmfValue) -> Result<Bytes> {
    let mut sink = BytesMut::with_capacity(value.encoded_len()).writer();
    amf0::encode_value(&mut sink, value)?;
    Ok(sink.into_inner().freeze())
}

/// Encodes values back to back, as in an RTMP command body.
pub fn encode_all(values: &[AmfValue]) -> Result<Bytes> {
    let capacity = values.iter().map(AmfValue::encoded_len).sum();
    let mut writer = AmfWriter::new(BytesMut::with_capacity(capacity).writer());
    writer.write_all(values)?;
    Ok(writer.into_inner().into_inner().freeze())
}

/// Decodes the first value in `data`. Trailing bytes are left unread.
pub fn decode(data: &[u8]) -> Result<AmfValue> {
    amf0::decode_value(data)
}

/// Decodes every value in `data`.
pub fn decode_all(data: &[u8]) -> Result<Vec<AmfValue>> {
    AmfReader::new(data).read_all()
}

/// Serializes a Rust value straight to AMF0 bytes.
pub fn to_vec<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let value = to_value(value)?;
    let mut out = Vec::with_capacity(value.encoded_len());
    amf0::encode_value(&mut out, &value)?;
    Ok(out)
}

/// Serializes a Rust value into a writer.
pub fn to_writer<W: Write, T: Serialize + ?Sized>(mut writer: W, value: &T) -> Result<()> {
    amf0::encode_value(&mut writer, &to_value(value)?)
}

/// Deserializes a Rust value from the first AMF0 value in `data`.
pub fn from_slice<T: DeserializeOwned>(data: &[u8]) -> Result<T> {
    from_value(decode(data)?)
}

/// Deserializes a Rust value from the next AMF0 value in a reader.
pub fn from_reader<R: Read, T: DeserializeOwned>(reader: R) -> Result<T> {
    from_value(amf0::decode_value(reader)?)
}
